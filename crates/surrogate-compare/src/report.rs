//! Structured comparison output for an assertion layer to format.

use serde::Serialize;

use crate::comparer::{NameMismatch, TypeMismatch};
use crate::config::ComparisonOptions;
use crate::error::Result;

/// Findings of one comparison, already filtered by the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Surrogate class name.
    pub surrogate: String,
    /// Actual class name.
    pub actual: String,
    /// Options the report was built with.
    pub options: ComparisonOptions,
    /// Instance methods only the surrogate has.
    pub extra_instance_methods: Vec<String>,
    /// Class methods only the surrogate has.
    pub extra_class_methods: Vec<String>,
    /// Instance methods only the actual class has. Empty in subset mode.
    pub missing_instance_methods: Vec<String>,
    /// Class methods only the actual class has. Empty in subset mode.
    pub missing_class_methods: Vec<String>,
    /// Instance parameter-kind drift. Empty unless `types`.
    pub instance_type_mismatches: Vec<TypeMismatch>,
    /// Class parameter-kind drift. Empty unless `types`.
    pub class_type_mismatches: Vec<TypeMismatch>,
    /// Instance parameter-name drift. Empty unless `names`.
    pub instance_name_mismatches: Vec<NameMismatch>,
    /// Class parameter-name drift. Empty unless `names`.
    pub class_name_mismatches: Vec<NameMismatch>,
}

impl ComparisonReport {
    /// Total number of findings.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.extra_instance_methods.len()
            + self.extra_class_methods.len()
            + self.missing_instance_methods.len()
            + self.missing_class_methods.len()
            + self.instance_type_mismatches.len()
            + self.class_type_mismatches.len()
            + self.instance_name_mismatches.len()
            + self.class_name_mismatches.len()
    }

    /// Returns true if nothing was found.
    #[must_use]
    pub fn is_substitutable(&self) -> bool {
        self.finding_count() == 0
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
