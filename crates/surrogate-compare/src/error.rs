//! Comparator error types.

use surrogate_core::SurrogateError;

/// Result type alias for comparator operations.
pub type Result<T> = std::result::Result<T, CompareError>;

/// Errors raised by the comparator.
///
/// Ordinary API differences are never errors; they are returned as data.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A signature was requested from a side that lacks the method.
    #[error("no method {name} to check the signature of")]
    NoMethodToCheckSignatureOf {
        /// The missing method.
        name: String,
    },

    /// Invalid argument, such as an unknown class/instance discriminator.
    #[error("argument error: {0}")]
    Argument(String),

    /// Comparison options could not be parsed.
    #[error("invalid comparison options: {0}")]
    Options(String),

    /// A report could not be serialized.
    #[error("report serialization error: {0}")]
    Report(String),

    /// Error from the behavior engine.
    #[error("surrogate error: {0}")]
    Surrogate(#[from] SurrogateError),
}

impl CompareError {
    /// Creates a missing-signature error.
    #[must_use]
    pub fn no_method(name: impl Into<String>) -> Self {
        Self::NoMethodToCheckSignatureOf { name: name.into() }
    }

    /// Creates an argument error.
    #[must_use]
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }
}

impl From<toml::de::Error> for CompareError {
    fn from(err: toml::de::Error) -> Self {
        Self::Options(err.to_string())
    }
}

impl From<serde_json::Error> for CompareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Report(err.to_string())
    }
}
