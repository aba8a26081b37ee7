//! Error types for surrogate-core.
//!
//! Every failure the behavior engine can produce is an explicit variant;
//! nothing in the engine panics.

/// Result type alias for surrogate operations.
pub type Result<T> = std::result::Result<T, SurrogateError>;

/// Errors raised by surrogate classes and instances.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurrogateError {
    /// A sung method was invoked with nothing to resolve its return value.
    #[error("{name} has been invoked without being told how to behave")]
    UnpreparedMethod {
        /// The sung method.
        name: String,
    },

    /// Invocations were requested for a name that was never sung.
    #[error("doesn't know {name:?}, only knows {}", quoted(.known))]
    UnknownSong {
        /// The unknown name.
        name: String,
        /// Every song the hatchery knows, sorted.
        known: Vec<String>,
    },

    /// The receiver has no method with this name.
    #[error("undefined method `{name}' for {receiver}")]
    NoMethod {
        /// Description of the receiver.
        receiver: String,
        /// The method that was looked up.
        name: String,
    },

    /// Wrong arguments for a constructor, defined method or helper.
    #[error("{0}")]
    Argument(String),

    /// Raised from inside a behavior block or defined method body.
    #[error("{0}")]
    Raised(String),
}

impl SurrogateError {
    /// Creates an unprepared method error.
    #[must_use]
    pub fn unprepared(name: impl Into<String>) -> Self {
        Self::UnpreparedMethod { name: name.into() }
    }

    /// Creates an argument error.
    #[must_use]
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Creates an arity error in the `(given for expected)` form.
    #[must_use]
    pub fn wrong_arity(given: usize, expected: impl std::fmt::Display) -> Self {
        Self::Argument(format!("wrong number of arguments ({given} for {expected})"))
    }

    /// Creates an error for a behavior body to return.
    #[must_use]
    pub fn raise(msg: impl Into<String>) -> Self {
        Self::Raised(msg.into())
    }

    /// Creates a missing method error.
    #[must_use]
    pub fn no_method(receiver: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NoMethod {
            receiver: receiver.into(),
            name: name.into(),
        }
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("{n:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
