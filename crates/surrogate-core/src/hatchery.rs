//! Registry of sung-method specifications for one surrogate class.
//!
//! Each surrogate class owns two hatcheries: one for instance methods and
//! one for class-level methods. A reprise starts from a copy of its
//! parent's registry: the specs are shared `Arc`s and immutable once sung,
//! while the tables that name them belong to the reprise alone.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::endower::{ClassId, Receiver};
use crate::error::{Result, SurrogateError};
use crate::reflect::MethodKind;
use crate::signature::{Param, Signature};
use crate::value::Value;

/// Name of the constructor song every instance hatchery knows.
pub const INITIALIZE: &str = "initialize";

/// Name of the invocation-log helper.
pub const INVOCATIONS: &str = "invocations";

/// Signature of a behavior body.
pub type BlockBody = dyn Fn(&Receiver<'_>, &[Value]) -> Result<Value> + Send + Sync;

/// Behavior body of a song, with its declared parameters.
///
/// The body runs in the receiver's context and gets the call arguments.
/// Extra or missing arguments are not checked against the declared
/// parameters; those only describe the song's API.
#[derive(Clone)]
pub struct Block {
    signature: Signature,
    body: Arc<BlockBody>,
}

impl Block {
    /// Creates a block with declared parameters.
    pub fn new<F>(params: impl IntoIterator<Item = Param>, body: F) -> Self
    where
        F: Fn(&Receiver<'_>, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            signature: Signature::new(params),
            body: Arc::new(body),
        }
    }

    /// Creates a block declared as `(*args)`.
    pub fn variadic<F>(body: F) -> Self
    where
        F: Fn(&Receiver<'_>, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new([Param::rest("args")], body)
    }

    /// Declared parameters.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Runs the body.
    pub fn call(&self, receiver: &Receiver<'_>, args: &[Value]) -> Result<Value> {
        (self.body)(receiver, args)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Fallback value of a song. Only one can be configured.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fallback {
    /// No fallback.
    #[default]
    None,
    /// Returned when nothing else resolves (`default:`).
    Default(Value),
    /// Stored as an attribute at construction and returned as the
    /// fallback afterwards (`default!:`).
    StoredDefault(Value),
}

impl Fallback {
    /// Value usable as the static default, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::None => None,
            Self::Default(v) | Self::StoredDefault(v) => Some(v),
        }
    }

    /// Value to seed as an attribute at construction, if any.
    #[must_use]
    pub const fn stored(&self) -> Option<&Value> {
        match self {
            Self::StoredDefault(v) => Some(v),
            _ => None,
        }
    }
}

/// Registration options for [`crate::SurrogateClass::sing`].
///
/// `default` and `stored_default` write the same slot; the last call wins.
#[derive(Debug, Clone, Default)]
pub struct Song {
    fallback: Fallback,
    block: Option<Block>,
    signature: Option<Signature>,
}

impl Song {
    /// A song with no behavior; calling it fails until prepared.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback: Fallback::None,
            block: None,
            signature: None,
        }
    }

    /// Static fallback value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.fallback = Fallback::Default(value.into());
        self
    }

    /// Fallback that is also stored as an attribute named after the
    /// method when the receiver is created.
    #[must_use]
    pub fn stored_default(mut self, value: impl Into<Value>) -> Self {
        self.fallback = Fallback::StoredDefault(value.into());
        self
    }

    /// Behavior body.
    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    /// Declared parameters for a song without a block.
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.signature = Some(Signature::new(params));
        self
    }
}

/// Immutable description of one sung method.
#[derive(Debug, Clone)]
pub struct MethodSpec {
    name: String,
    fallback: Fallback,
    block: Option<Block>,
    signature: Option<Signature>,
}

impl MethodSpec {
    /// Builds the spec for `name` from registration options.
    #[must_use]
    pub fn new(name: impl Into<String>, song: Song) -> Self {
        Self {
            name: name.into(),
            fallback: song.fallback,
            block: song.block,
            signature: song.signature,
        }
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured fallback.
    #[must_use]
    pub const fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    /// Behavior body, if any.
    #[must_use]
    pub const fn block(&self) -> Option<&Block> {
        self.block.as_ref()
    }

    /// Declared API of the song: the block's parameters, else the
    /// explicitly declared ones.
    #[must_use]
    pub fn api_signature(&self) -> Option<&Signature> {
        self.block
            .as_ref()
            .map(Block::signature)
            .or(self.signature.as_ref())
    }
}

/// A method generated on a surrogate by the endower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installed {
    /// The sung method itself.
    Song(String),
    /// `will_<name>(value)`.
    Override(String),
    /// `will_<name>_queue(*values)`.
    Queue(String),
    /// `invocations(name)`.
    Invocations,
}

impl Installed {
    /// Parameters the generated method accepts.
    #[must_use]
    pub fn signature(&self) -> Signature {
        match self {
            Self::Song(_) => Signature::catch_all(),
            Self::Override(_) => Signature::new([Param::required("value")]),
            Self::Queue(_) => Signature::new([Param::rest("values")]),
            Self::Invocations => Signature::new([Param::required("name")]),
        }
    }
}

/// Name of the override helper for `song`.
#[must_use]
pub fn override_helper(song: &str) -> String {
    format!("will_{song}")
}

/// Name of the queue helper for `song`.
#[must_use]
pub fn queue_helper(song: &str) -> String {
    format!("will_{song}_queue")
}

/// Class that sang a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Identity of the singing class.
    pub id: ClassId,
    /// Name of the singing class.
    pub name: String,
}

/// Behavior registry for one level (instance or class) of a surrogate.
#[derive(Debug)]
pub struct Hatchery {
    owner: ClassId,
    owner_name: String,
    kind: MethodKind,
    specs: BTreeMap<String, Arc<MethodSpec>>,
    installed: BTreeMap<String, Installed>,
    origins: BTreeMap<String, Origin>,
    helper_methods: BTreeSet<String>,
}

impl Hatchery {
    /// Creates the registry for one level of a newly endowed class.
    #[must_use]
    pub fn new(owner: ClassId, owner_name: impl Into<String>, kind: MethodKind) -> Self {
        let mut hatchery = Self {
            owner,
            owner_name: owner_name.into(),
            kind,
            specs: BTreeMap::new(),
            installed: BTreeMap::new(),
            origins: BTreeMap::new(),
            helper_methods: BTreeSet::new(),
        };
        hatchery.install(INVOCATIONS.to_string(), Installed::Invocations);
        hatchery.helper_methods.insert(INVOCATIONS.to_string());
        if kind == MethodKind::Instance {
            hatchery.specs.insert(
                INITIALIZE.to_string(),
                Arc::new(MethodSpec::new(INITIALIZE, Song::new())),
            );
        }
        hatchery
    }

    /// Registry for a reprise of the class that owns `parent`.
    ///
    /// Starts with every song the parent knows, still attributed to the
    /// classes that sang them. Later songs on either side stay on that side.
    #[must_use]
    pub fn reprise(parent: &Self, owner: ClassId, owner_name: impl Into<String>) -> Self {
        Self {
            owner,
            owner_name: owner_name.into(),
            kind: parent.kind,
            specs: parent.specs.clone(),
            installed: parent.installed.clone(),
            origins: parent.origins.clone(),
            helper_methods: parent.helper_methods.clone(),
        }
    }

    fn install(&mut self, name: String, installed: Installed) {
        let origin = Origin {
            id: self.owner,
            name: self.owner_name.clone(),
        };
        self.origins.insert(name.clone(), origin);
        self.installed.insert(name, installed);
    }

    /// Registers a spec and installs its generated methods.
    ///
    /// The constructor song gets no helpers and is not callable by name.
    /// A song named `invocations` replaces the log helper: it is callable
    /// and compared like any other song, and the log stays reachable
    /// through [`crate::Instance::invocations`].
    pub fn sing(&mut self, spec: MethodSpec) -> Arc<MethodSpec> {
        let name = spec.name.clone();
        let spec = Arc::new(spec);
        self.specs.insert(name.clone(), Arc::clone(&spec));
        if name != INITIALIZE {
            let will = override_helper(&name);
            let queue = queue_helper(&name);
            self.helper_methods.remove(&name);
            self.install(name.clone(), Installed::Song(name.clone()));
            self.install(will.clone(), Installed::Override(name.clone()));
            self.install(queue.clone(), Installed::Queue(name));
            self.helper_methods.insert(will);
            self.helper_methods.insert(queue);
        }
        spec
    }

    /// Spec of a song.
    #[must_use]
    pub fn spec(&self, name: &str) -> Option<Arc<MethodSpec>> {
        self.specs.get(name).cloned()
    }

    /// Returns true if `name` was sung.
    #[must_use]
    pub fn knows(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Every song name, sorted.
    #[must_use]
    pub fn song_names(&self) -> Vec<String> {
        self.specs.keys().cloned().collect()
    }

    /// Returns true if `name` is a callable song (the constructor is not).
    #[must_use]
    pub fn is_api_method(&self, name: &str) -> bool {
        name != INITIALIZE && self.specs.contains_key(name)
    }

    /// Declared API of a song, if it has one.
    #[must_use]
    pub fn api_signature(&self, name: &str) -> Option<Signature> {
        self.specs.get(name)?.api_signature().cloned()
    }

    /// Names injected by the engine; never part of a comparison.
    #[must_use]
    pub const fn helper_methods(&self) -> &BTreeSet<String> {
        &self.helper_methods
    }

    /// Generated method registered under `name`.
    #[must_use]
    pub fn installed(&self, name: &str) -> Option<&Installed> {
        self.installed.get(name)
    }

    /// Class that sang the generated method `name`.
    #[must_use]
    pub fn origin(&self, name: &str) -> Option<&Origin> {
        self.origins.get(name)
    }

    /// Names of every generated method.
    pub fn installed_names(&self) -> impl Iterator<Item = &str> {
        self.installed.keys().map(String::as_str)
    }

    /// `(name, value)` pairs to seed as attributes on a new receiver.
    #[must_use]
    pub fn stored_defaults(&self) -> Vec<(String, Value)> {
        self.specs
            .values()
            .filter_map(|spec| Some((spec.name.clone(), spec.fallback.stored()?.clone())))
            .collect()
    }

    /// The error for asking about a song this hatchery does not know.
    #[must_use]
    pub fn unknown_song(&self, name: &str) -> SurrogateError {
        SurrogateError::UnknownSong {
            name: name.to_string(),
            known: self.song_names(),
        }
    }

    /// Class this registry belongs to.
    #[must_use]
    pub const fn owner(&self) -> ClassId {
        self.owner
    }

    /// Name of the owning class.
    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Level this hatchery serves.
    #[must_use]
    pub const fn kind(&self) -> MethodKind {
        self.kind
    }
}
