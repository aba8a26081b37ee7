//! Comparison options.
//!
//! Options gate which findings a [`crate::ComparisonReport`] keeps. They
//! can be built in code or parsed from TOML:
//!
//! ```toml
//! subset = true   # allow the surrogate to implement only part of the API
//! types = true    # report parameter-kind drift
//! names = false   # report parameter-name drift
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which comparison findings count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOptions {
    /// Ignore methods the surrogate is missing.
    #[serde(default)]
    pub subset: bool,

    /// Report parameter-kind mismatches.
    #[serde(default = "default_types")]
    pub types: bool,

    /// Report parameter-name mismatches.
    #[serde(default)]
    pub names: bool,
}

const fn default_types() -> bool {
    true
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            subset: false,
            types: default_types(),
            names: false,
        }
    }
}

impl ComparisonOptions {
    /// Parses options from a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns an error if the document is not valid TOML or has
    /// unexpected value types.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Sets subset mode.
    #[must_use]
    pub const fn subset(mut self, subset: bool) -> Self {
        self.subset = subset;
        self
    }

    /// Enables or disables the parameter-kind check.
    #[must_use]
    pub const fn types(mut self, types: bool) -> Self {
        self.types = types;
        self
    }

    /// Enables or disables the parameter-name check.
    #[must_use]
    pub const fn names(mut self, names: bool) -> Self {
        self.names = names;
        self
    }
}
