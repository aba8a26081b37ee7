//! Surrogate classes, their instances, and the endower that builds them.
//!
//! A surrogate class holds two structurally identical levels: instance
//! methods and class-level methods. Each level pairs a behavior registry
//! ([`Hatchery`]) with per-receiver state ([`Hatchling`]); instances own
//! their instance-level state and the class object owns its class-level
//! state. Calls never touch a live method table: they look the name up in
//! the registry and run the resolution strategy list against the
//! receiver's state.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::error::{Result, SurrogateError};
use crate::hatchery::{Block, Hatchery, INITIALIZE, Installed, MethodSpec, Song};
use crate::hatchling::Hatchling;
use crate::method_queue::QueueState;
use crate::reflect::{MethodInfo, MethodKind, Reflect};
use crate::resolution::{Resolution, resolve};
use crate::shape::Visibility;
use crate::signature::Signature;
use crate::value::Value;

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a surrogate class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hand-written (non-sung) method.
#[derive(Debug, Clone)]
struct DefinedMethod {
    body: Block,
    visibility: Visibility,
}

/// One level of a surrogate class.
#[derive(Debug)]
struct Level {
    hatchery: RwLock<Hatchery>,
    defined: RwLock<BTreeMap<String, DefinedMethod>>,
}

impl Level {
    fn new(hatchery: Hatchery) -> Self {
        Self {
            hatchery: RwLock::new(hatchery),
            defined: RwLock::new(BTreeMap::new()),
        }
    }
}

#[derive(Debug)]
struct ClassInner {
    id: ClassId,
    name: String,
    parent: Option<SurrogateClass>,
    instance_level: Level,
    class_level: Level,
    class_state: Arc<Mutex<Hatchling>>,
}

/// What a method name resolves to on a class.
enum Target {
    Installed(Installed),
    Defined(DefinedMethod),
}

struct Found {
    owner_id: ClassId,
    owner_name: String,
    target: Target,
}

/// Builds surrogate classes and their reprises.
#[derive(Debug, Clone, Copy, Default)]
pub struct Endower;

impl Endower {
    /// Turns a fresh class named `name` into a surrogate.
    #[must_use]
    pub fn endow(name: impl Into<String>) -> SurrogateClass {
        let name = name.into();
        let id = ClassId::next();
        let instance_hatchery = Hatchery::new(id, name.clone(), MethodKind::Instance);
        let class_hatchery = Hatchery::new(id, name.clone(), MethodKind::Class);
        tracing::debug!(class = %name, id = %id, "endowed surrogate class");
        SurrogateClass {
            inner: Arc::new(ClassInner {
                id,
                name,
                parent: None,
                instance_level: Level::new(instance_hatchery),
                class_level: Level::new(class_hatchery),
                class_state: Arc::new(Mutex::new(Hatchling::new())),
            }),
        }
    }

    /// Creates a subclass of `parent` that shares its behavior specs and
    /// starts with empty call-time state.
    ///
    /// The reprise gets its own registries seeded from the parent's songs.
    /// Songs sung afterwards on the parent, the reprise or a sibling do not
    /// cross over.
    #[must_use]
    pub fn reprise(parent: &SurrogateClass) -> SurrogateClass {
        let id = ClassId::next();
        let name = format!("{} (reprise)", parent.name());
        let instance_hatchery =
            Hatchery::reprise(&parent.inner.instance_level.hatchery.read(), id, name.clone());
        let class_hatchery =
            Hatchery::reprise(&parent.inner.class_level.hatchery.read(), id, name.clone());

        let mut class_state = Hatchling::new();
        for (attribute, value) in class_hatchery.stored_defaults() {
            class_state.set_attribute(&attribute, value);
        }

        tracing::debug!(class = %name, id = %id, parent = %parent.id(), "reprised surrogate class");
        SurrogateClass {
            inner: Arc::new(ClassInner {
                id,
                name,
                parent: Some(parent.clone()),
                instance_level: Level::new(instance_hatchery),
                class_level: Level::new(class_hatchery),
                class_state: Arc::new(Mutex::new(class_state)),
            }),
        }
    }

    /// Registers a song on one level of `class` and installs its helpers.
    pub fn install(
        class: &SurrogateClass,
        kind: MethodKind,
        name: impl Into<String>,
        song: Song,
    ) -> Arc<MethodSpec> {
        let spec = class
            .level(kind)
            .hatchery
            .write()
            .sing(MethodSpec::new(name, song));
        if kind == MethodKind::Class {
            if let Some(value) = spec.fallback().stored() {
                class
                    .inner
                    .class_state
                    .lock()
                    .set_attribute(spec.name(), value.clone());
            }
        }
        tracing::debug!(
            class = %class.name(),
            kind = %kind,
            method = %spec.name(),
            has_block = spec.block().is_some(),
            "sang method"
        );
        spec
    }
}

/// A surrogate class. Cheap to clone; clones are the same class.
#[derive(Clone)]
pub struct SurrogateClass {
    inner: Arc<ClassInner>,
}

impl SurrogateClass {
    /// Endows a fresh surrogate class.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Endower::endow(name)
    }

    /// Identity of this class.
    #[must_use]
    pub fn id(&self) -> ClassId {
        self.inner.id
    }

    /// Class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Class this one was reprised from.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.inner.parent.as_ref()
    }

    fn level(&self, kind: MethodKind) -> &Level {
        match kind {
            MethodKind::Class => &self.inner.class_level,
            MethodKind::Instance => &self.inner.instance_level,
        }
    }

    fn ancestors(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// Sings an instance method.
    pub fn sing(&self, name: impl Into<String>, song: Song) -> &Self {
        Endower::install(self, MethodKind::Instance, name, song);
        self
    }

    /// Sings a class-level method.
    pub fn sing_class(&self, name: impl Into<String>, song: Song) -> &Self {
        Endower::install(self, MethodKind::Class, name, song);
        self
    }

    /// Defines a hand-written method. `initialize` is always private.
    pub fn define(
        &self,
        kind: MethodKind,
        name: impl Into<String>,
        body: Block,
        visibility: Visibility,
    ) -> &Self {
        let name = name.into();
        let visibility = if kind == MethodKind::Instance && name == INITIALIZE {
            Visibility::Private
        } else {
            visibility
        };
        tracing::debug!(class = %self.name(), kind = %kind, method = %name, "defined method");
        self.level(kind)
            .defined
            .write()
            .insert(name, DefinedMethod { body, visibility });
        self
    }

    /// Defines a public instance method.
    pub fn define_method(&self, name: impl Into<String>, body: Block) -> &Self {
        self.define(MethodKind::Instance, name, body, Visibility::Public)
    }

    /// Defines a public class method.
    pub fn define_class_method(&self, name: impl Into<String>, body: Block) -> &Self {
        self.define(MethodKind::Class, name, body, Visibility::Public)
    }

    /// Creates a reprise of this class.
    #[must_use]
    pub fn reprise(&self) -> Self {
        Endower::reprise(self)
    }

    /// Returns true if this class is `other` or was reprised from it.
    #[must_use]
    pub fn is_subclass_of(&self, other: &Self) -> bool {
        self.ancestors().any(|class| class.id() == other.id())
    }

    /// Constructs an instance.
    ///
    /// `default!` attributes are seeded first, then the arguments are
    /// recorded as an `initialize` invocation, checked against the
    /// constructor's arity, and handed to the sung or defined
    /// `initialize` body. The arity comes from the sung constructor's
    /// block or declared parameters, else from the defined body.
    /// Constructor failures propagate on every call.
    pub fn new_instance(&self, args: &[Value]) -> Result<Instance> {
        let mut state = Hatchling::new();
        let (initializer, declared, stored) = {
            let hatchery = self.inner.instance_level.hatchery.read();
            let sung = hatchery.spec(INITIALIZE);
            (
                sung.as_ref().and_then(|spec| spec.block().cloned()),
                sung.as_ref().and_then(|spec| spec.api_signature().cloned()),
                hatchery.stored_defaults(),
            )
        };
        for (attribute, value) in stored {
            state.set_attribute(&attribute, value);
        }
        state.record(INITIALIZE, args.to_vec());

        let instance = Instance {
            class: self.clone(),
            state: Arc::new(Mutex::new(state)),
        };

        let initializer = initializer.or_else(|| self.defined_initializer());
        let arity = declared
            .or_else(|| initializer.as_ref().map(|block| block.signature().clone()))
            .unwrap_or_else(Signature::empty)
            .arity();
        if !arity.accepts(args.len()) {
            return Err(SurrogateError::wrong_arity(args.len(), arity));
        }
        if let Some(block) = initializer {
            block.call(&Receiver::Instance(&instance), args)?;
        }
        tracing::debug!(class = %self.name(), args = args.len(), "constructed instance");
        Ok(instance)
    }

    fn defined_initializer(&self) -> Option<Block> {
        self.ancestors().find_map(|class| {
            class
                .inner
                .instance_level
                .defined
                .read()
                .get(INITIALIZE)
                .map(|method| method.body.clone())
        })
    }

    /// Walks the reprise chain for `name`. A generated method sits on the
    /// class that sang it, so definitions below that class shadow it.
    fn lookup(&self, kind: MethodKind, name: &str) -> Option<(Found, Visibility)> {
        let generated = {
            let hatchery = self.level(kind).hatchery.read();
            hatchery
                .installed(name)
                .cloned()
                .zip(hatchery.origin(name).cloned())
        };
        for class in self.ancestors() {
            if let Some(method) = class.level(kind).defined.read().get(name) {
                let found = Found {
                    owner_id: class.id(),
                    owner_name: class.name().to_string(),
                    target: Target::Defined(method.clone()),
                };
                return Some((found, method.visibility));
            }
            let sung_here = generated
                .as_ref()
                .filter(|(_, origin)| origin.id == class.id());
            if let Some((installed, origin)) = sung_here {
                let found = Found {
                    owner_id: origin.id,
                    owner_name: origin.name.clone(),
                    target: Target::Installed(installed.clone()),
                };
                return Some((found, Visibility::Public));
            }
        }
        None
    }

    fn stage(&self) -> Stage<'_> {
        Stage {
            class: self,
            kind: MethodKind::Class,
            state: &self.inner.class_state,
            receiver: Receiver::Class(self),
        }
    }

    /// Calls a class-level method by name.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.stage().call(name, args)
    }

    /// Sets the override for a class-level song (`will_<name>`).
    pub fn will(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.stage().will(name, value.into())
    }

    /// Loads a queue for a class-level song (`will_<name>_queue`).
    pub fn will_queue<I, V>(&self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.stage()
            .will_queue(name, values.into_iter().map(Into::into).collect())
    }

    /// Recorded argument lists of a class-level song.
    pub fn invocations(&self, name: &str) -> Result<Vec<Vec<Value>>> {
        self.stage().invocations(name)
    }

    /// Class-level attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.inner.class_state.lock().attribute(name).cloned()
    }

    /// Sets a class-level attribute.
    pub fn set_attribute(&self, name: &str, value: impl Into<Value>) {
        self.inner
            .class_state
            .lock()
            .set_attribute(name, value.into());
    }

    /// Names the engine injected on the given level.
    #[must_use]
    pub fn helper_methods(&self, kind: MethodKind) -> BTreeSet<String> {
        self.level(kind).hatchery.read().helper_methods().clone()
    }

    /// Returns true if `name` is a song on the given level.
    #[must_use]
    pub fn is_song(&self, kind: MethodKind, name: &str) -> bool {
        self.level(kind).hatchery.read().is_api_method(name)
    }

    /// Declared API of a song: its block's parameters or its declared
    /// parameters.
    #[must_use]
    pub fn song_signature(&self, kind: MethodKind, name: &str) -> Option<Signature> {
        self.level(kind).hatchery.read().api_signature(name)
    }
}

impl fmt::Debug for SurrogateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurrogateClass")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

impl Reflect for SurrogateClass {
    fn class_name(&self) -> String {
        self.name().to_string()
    }

    fn public_methods(&self, kind: MethodKind) -> BTreeSet<String> {
        let mut names: BTreeSet<String> = self
            .level(kind)
            .hatchery
            .read()
            .installed_names()
            .map(str::to_string)
            .collect();
        let mut hidden = BTreeSet::new();
        for class in self.ancestors() {
            for (name, method) in class.level(kind).defined.read().iter() {
                if names.contains(name) || hidden.contains(name) {
                    continue;
                }
                match method.visibility {
                    Visibility::Public => names.insert(name.clone()),
                    Visibility::Private => hidden.insert(name.clone()),
                };
            }
        }
        // a private definition in a reprise hides the inherited song
        names.retain(|name| self.find_method(kind, name).is_some());
        names
    }

    fn find_method(&self, kind: MethodKind, name: &str) -> Option<MethodInfo> {
        let (found, visibility) = self.lookup(kind, name)?;
        if visibility == Visibility::Private {
            return None;
        }
        let signature = match &found.target {
            Target::Installed(installed) => installed.signature(),
            Target::Defined(method) => method.body.signature().clone(),
        };
        Some(MethodInfo {
            name: name.to_string(),
            owner: found.owner_name,
            inherited: found.owner_id != self.id(),
            signature,
        })
    }
}

/// An instance of a surrogate class. Clones share state.
#[derive(Clone)]
pub struct Instance {
    class: SurrogateClass,
    state: Arc<Mutex<Hatchling>>,
}

impl Instance {
    fn stage(&self) -> Stage<'_> {
        Stage {
            class: &self.class,
            kind: MethodKind::Instance,
            state: &self.state,
            receiver: Receiver::Instance(self),
        }
    }

    /// Class of this instance.
    #[must_use]
    pub const fn class(&self) -> &SurrogateClass {
        &self.class
    }

    /// Calls an instance method by name: a song, a generated helper, or a
    /// defined method.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.stage().call(name, args)
    }

    /// Sets the override for a song (`will_<name>`).
    pub fn will(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.stage().will(name, value.into())
    }

    /// Loads a queue for a song (`will_<name>_queue`).
    pub fn will_queue<I, V>(&self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.stage()
            .will_queue(name, values.into_iter().map(Into::into).collect())
    }

    /// Recorded argument lists of a song, in call order.
    pub fn invocations(&self, name: &str) -> Result<Vec<Vec<Value>>> {
        self.stage().invocations(name)
    }

    /// State of the queue for a song, if one was ever loaded.
    #[must_use]
    pub fn queue_state(&self, name: &str) -> Option<QueueState> {
        self.state.lock().queue(name).map(|queue| queue.state())
    }

    /// Attribute lookup.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.state.lock().attribute(name).cloned()
    }

    /// Sets an attribute.
    pub fn set_attribute(&self, name: &str, value: impl Into<Value>) {
        self.state.lock().set_attribute(name, value.into());
    }

    /// Returns true if this is an instance of `class` or of a reprise of it.
    #[must_use]
    pub fn is_kind_of(&self, class: &SurrogateClass) -> bool {
        self.class.is_subclass_of(class)
    }

    /// Identity comparison.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .finish_non_exhaustive()
    }
}

/// The receiver a behavior body runs against.
#[derive(Debug, Clone, Copy)]
pub enum Receiver<'a> {
    /// An instance.
    Instance(&'a Instance),
    /// A class object.
    Class(&'a SurrogateClass),
}

impl Receiver<'_> {
    fn state(&self) -> &Mutex<Hatchling> {
        match self {
            Self::Instance(instance) => &instance.state,
            Self::Class(class) => &class.inner.class_state,
        }
    }

    /// Attribute lookup.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.state().lock().attribute(name).cloned()
    }

    /// Sets an attribute.
    pub fn set_attribute(&self, name: &str, value: impl Into<Value>) {
        self.state().lock().set_attribute(name, value.into());
    }

    /// Calls a method on the receiver.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self {
            Self::Instance(instance) => instance.call(name, args),
            Self::Class(class) => class.call(name, args),
        }
    }

    /// The instance, when the receiver is one.
    #[must_use]
    pub const fn instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(instance) => Some(*instance),
            Self::Class(_) => None,
        }
    }

    /// The receiver's class (the class object itself for class receivers).
    #[must_use]
    pub const fn class(&self) -> &SurrogateClass {
        match self {
            Self::Instance(instance) => &instance.class,
            Self::Class(class) => *class,
        }
    }

    /// The receiver as a value (`self`). Class objects have no value form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.instance().cloned().map_or(Value::Nil, Value::Object)
    }
}

/// One level of one receiver: where calls are performed.
struct Stage<'a> {
    class: &'a SurrogateClass,
    kind: MethodKind,
    state: &'a Mutex<Hatchling>,
    receiver: Receiver<'a>,
}

impl Stage<'_> {
    fn hatchery(&self) -> &RwLock<Hatchery> {
        &self.class.level(self.kind).hatchery
    }

    fn describe(&self) -> String {
        match self.kind {
            MethodKind::Instance => format!("#<{}>", self.class.name()),
            MethodKind::Class => self.class.name().to_string(),
        }
    }

    fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let Some((found, visibility)) = self.class.lookup(self.kind, name) else {
            return Err(SurrogateError::no_method(self.describe(), name));
        };
        if visibility == Visibility::Private {
            return Err(SurrogateError::no_method(self.describe(), name));
        }
        match found.target {
            Target::Installed(Installed::Song(song)) => self.perform(&song, args),
            Target::Installed(Installed::Override(song)) => {
                let [value] = args else {
                    return Err(SurrogateError::wrong_arity(args.len(), 1));
                };
                self.will(&song, value.clone())?;
                Ok(self.receiver.to_value())
            }
            Target::Installed(Installed::Queue(song)) => {
                self.will_queue(&song, args.to_vec())?;
                Ok(self.receiver.to_value())
            }
            Target::Installed(Installed::Invocations) => {
                let [song] = args else {
                    return Err(SurrogateError::wrong_arity(args.len(), 1));
                };
                let song = song.as_name().ok_or_else(|| {
                    SurrogateError::argument(format!("expected a method name, got {song}"))
                })?;
                let log = self.invocations(song)?;
                Ok(Value::List(log.into_iter().map(Value::List).collect()))
            }
            Target::Defined(method) => {
                let arity = method.body.signature().arity();
                if !arity.accepts(args.len()) {
                    return Err(SurrogateError::wrong_arity(args.len(), arity));
                }
                method.body.call(&self.receiver, args)
            }
        }
    }

    /// Records the call, then resolves it. The state lock is released
    /// before a block runs.
    fn perform(&self, name: &str, args: &[Value]) -> Result<Value> {
        let spec = self
            .hatchery()
            .read()
            .spec(name)
            .ok_or_else(|| SurrogateError::no_method(self.describe(), name))?;
        let resolution = {
            let mut state = self.state.lock();
            state.record(name, args.to_vec());
            resolve(&spec, &mut state)
        };
        match resolution {
            Ok(Resolution::Value(value, strategy)) => {
                tracing::trace!(
                    class = %self.class.name(),
                    method = %name,
                    strategy = ?strategy,
                    "resolved song"
                );
                Ok(value)
            }
            Ok(Resolution::Block(block)) => {
                tracing::trace!(class = %self.class.name(), method = %name, "running song block");
                block.call(&self.receiver, args)
            }
            Err(err) => {
                tracing::debug!(class = %self.class.name(), method = %name, "unprepared song invoked");
                Err(err)
            }
        }
    }

    fn ensure_song(&self, name: &str, helper: impl FnOnce(&str) -> String) -> Result<()> {
        if self.hatchery().read().is_api_method(name) {
            Ok(())
        } else {
            Err(SurrogateError::no_method(self.describe(), helper(name)))
        }
    }

    fn will(&self, name: &str, value: Value) -> Result<()> {
        self.ensure_song(name, crate::hatchery::override_helper)?;
        tracing::debug!(class = %self.class.name(), method = %name, "override set");
        self.state.lock().set_override(name, value);
        Ok(())
    }

    fn will_queue(&self, name: &str, values: Vec<Value>) -> Result<()> {
        self.ensure_song(name, crate::hatchery::queue_helper)?;
        tracing::debug!(
            class = %self.class.name(),
            method = %name,
            len = values.len(),
            "queue loaded"
        );
        self.state.lock().load_queue(name, values);
        Ok(())
    }

    fn invocations(&self, name: &str) -> Result<Vec<Vec<Value>>> {
        {
            let hatchery = self.hatchery().read();
            if !hatchery.knows(name) {
                return Err(hatchery.unknown_song(name));
            }
        }
        Ok(self.state.lock().invocations(name).to_vec())
    }
}
