//! One method name as seen from both compared sides.

use std::fmt;

use surrogate_core::{MethodInfo, MethodKind, Reflect, Signature, SurrogateClass};

use crate::error::{CompareError, Result};

/// A method name paired with its surrogate-side and actual-side
/// reflections.
#[derive(Debug, Clone)]
pub struct Method {
    kind: MethodKind,
    name: String,
    surrogate_method: Option<MethodInfo>,
    actual_method: Option<MethodInfo>,
    song_signature: Option<Signature>,
    api_method: bool,
}

impl Method {
    /// Reflects `name` of the given kind on both sides.
    #[must_use]
    pub fn new(
        kind: MethodKind,
        name: impl Into<String>,
        surrogate: &SurrogateClass,
        actual: &dyn Reflect,
    ) -> Self {
        let name = name.into();
        Self {
            kind,
            surrogate_method: surrogate.find_method(kind, &name),
            actual_method: actual.find_method(kind, &name),
            song_signature: surrogate.song_signature(kind, &name),
            api_method: surrogate.is_song(kind, &name),
            name,
        }
    }

    /// Like [`Method::new`], taking the `"class"` / `"instance"`
    /// discriminator as text.
    ///
    /// # Errors
    /// Returns an argument error for any other discriminator.
    pub fn from_discriminator(
        discriminator: &str,
        name: impl Into<String>,
        surrogate: &SurrogateClass,
        actual: &dyn Reflect,
    ) -> Result<Self> {
        let kind = MethodKind::parse(discriminator).ok_or_else(|| {
            CompareError::argument(format!(
                "Expected :class or :instance, got {discriminator:?}"
            ))
        })?;
        Ok(Self::new(kind, name, surrogate, actual))
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class or instance method.
    #[must_use]
    pub const fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Returns true for class methods.
    #[must_use]
    pub fn is_class_method(&self) -> bool {
        self.kind == MethodKind::Class
    }

    /// Returns true for instance methods.
    #[must_use]
    pub fn is_instance_method(&self) -> bool {
        self.kind == MethodKind::Instance
    }

    /// Present on the surrogate.
    #[must_use]
    pub const fn on_surrogate(&self) -> bool {
        self.surrogate_method.is_some()
    }

    /// Present on the actual class.
    #[must_use]
    pub const fn on_actual(&self) -> bool {
        self.actual_method.is_some()
    }

    /// Returns true if the surrogate's method is a song.
    #[must_use]
    pub const fn is_api_method(&self) -> bool {
        self.api_method
    }

    /// Present on the surrogate through an ancestor.
    #[must_use]
    pub fn inherited_on_surrogate(&self) -> bool {
        self.surrogate_method.as_ref().is_some_and(|m| m.inherited)
    }

    /// Present on the actual class through an ancestor.
    #[must_use]
    pub fn inherited_on_actual(&self) -> bool {
        self.actual_method.as_ref().is_some_and(|m| m.inherited)
    }

    /// Surrogate-side parameters.
    ///
    /// A song with a block (or declared parameters) compares with those
    /// instead of the generated stub's `(*args)`.
    ///
    /// # Errors
    /// Fails if the surrogate lacks the method.
    pub fn surrogate_parameters(&self) -> Result<Signature> {
        let method = self
            .surrogate_method
            .as_ref()
            .ok_or_else(|| CompareError::no_method(&self.name))?;
        if self.api_method {
            if let Some(signature) = &self.song_signature {
                return Ok(signature.clone());
            }
        }
        Ok(method.signature.clone())
    }

    /// Actual-side parameters.
    ///
    /// # Errors
    /// Fails if the actual class lacks the method.
    pub fn actual_parameters(&self) -> Result<Signature> {
        self.actual_method
            .as_ref()
            .map(|m| m.signature.clone())
            .ok_or_else(|| CompareError::no_method(&self.name))
    }

    fn both_parameters(&self) -> Option<(Signature, Signature)> {
        Some((
            self.surrogate_parameters().ok()?,
            self.actual_parameters().ok()?,
        ))
    }

    /// On both sides, with every parameter's kind and name known on both.
    #[must_use]
    pub fn reflectable(&self) -> bool {
        self.both_parameters()
            .is_some_and(|(s, a)| s.is_reflectable() && a.is_reflectable())
    }

    /// On both sides with identical ordered parameter kinds.
    #[must_use]
    pub fn types_match(&self) -> bool {
        self.both_parameters()
            .is_some_and(|(s, a)| s.param_kinds() == a.param_kinds())
    }

    /// On both sides with identical ordered parameter names.
    #[must_use]
    pub fn names_match(&self) -> bool {
        self.both_parameters()
            .is_some_and(|(s, a)| s.param_names() == a.param_names())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.sigil(), self.name)
    }
}
