//! API comparison between a surrogate and the class it stands in for.
//!
//! The method universe is the union of both sides' public methods of each
//! kind, minus the helper methods the engine injected into the surrogate.
//! Every query returns data; nothing here fails on a mismatch.

use std::collections::BTreeSet;

use serde::Serialize;
use surrogate_core::{Instance, MethodKind, ParamKind, Reflect, SurrogateClass};

use crate::config::ComparisonOptions;
use crate::method::Method;
use crate::report::ComparisonReport;

/// A reflectable method whose parameter lists differ.
///
/// `T` is [`ParamKind`] for shape drift and `String` for name drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch<T> {
    /// Method name.
    pub name: String,
    /// Class or instance method.
    pub kind: MethodKind,
    /// Surrogate-side sequence.
    pub surrogate: Vec<T>,
    /// Actual-side sequence.
    pub actual: Vec<T>,
}

/// Parameter-kind drift.
pub type TypeMismatch = Mismatch<ParamKind>;

/// Parameter-name drift.
pub type NameMismatch = Mismatch<String>;

/// Compares a surrogate against an actual class.
#[derive(Debug, Clone)]
pub struct ApiComparer {
    surrogate_name: String,
    actual_name: String,
    methods: Vec<Method>,
}

impl ApiComparer {
    /// Reflects both sides and builds the method universe.
    #[must_use]
    pub fn new(surrogate: &SurrogateClass, actual: &dyn Reflect) -> Self {
        let mut methods = Vec::new();
        for kind in [MethodKind::Class, MethodKind::Instance] {
            let helpers = surrogate.helper_methods(kind);
            let universe: BTreeSet<String> = surrogate
                .public_methods(kind)
                .union(&actual.public_methods(kind))
                .filter(|name| !helpers.contains(*name))
                .cloned()
                .collect();
            methods.extend(
                universe
                    .into_iter()
                    .map(|name| Method::new(kind, name, surrogate, actual)),
            );
        }

        tracing::debug!(
            surrogate = %surrogate.name(),
            actual = %actual.class_name(),
            methods = methods.len(),
            "built comparison universe"
        );

        Self {
            surrogate_name: surrogate.name().to_string(),
            actual_name: actual.class_name(),
            methods,
        }
    }

    /// Compares the class of a surrogate instance.
    #[must_use]
    pub fn for_instance(instance: &Instance, actual: &dyn Reflect) -> Self {
        Self::new(instance.class(), actual)
    }

    /// Name of the surrogate class.
    #[must_use]
    pub fn surrogate_name(&self) -> &str {
        &self.surrogate_name
    }

    /// Name of the actual class.
    #[must_use]
    pub fn actual_name(&self) -> &str {
        &self.actual_name
    }

    /// Every method in the universe, class methods first, sorted by name.
    #[must_use]
    pub fn all_methods(&self) -> &[Method] {
        &self.methods
    }

    fn of_kind(&self, kind: MethodKind) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(move |m| m.kind() == kind)
    }

    fn extra(&self, kind: MethodKind) -> Vec<&Method> {
        self.of_kind(kind)
            .filter(|m| m.on_surrogate() && !m.on_actual())
            .collect()
    }

    fn missing(&self, kind: MethodKind) -> Vec<&Method> {
        self.of_kind(kind)
            .filter(|m| !m.on_surrogate() && m.on_actual())
            .collect()
    }

    fn type_mismatches(&self, kind: MethodKind) -> Vec<TypeMismatch> {
        self.of_kind(kind)
            .filter(|m| m.reflectable() && !m.types_match())
            .filter_map(|m| {
                let surrogate = m.surrogate_parameters().ok()?;
                let actual = m.actual_parameters().ok()?;
                Some(Mismatch {
                    name: m.name().to_string(),
                    kind,
                    surrogate: surrogate.param_kinds().into_iter().flatten().collect(),
                    actual: actual.param_kinds().into_iter().flatten().collect(),
                })
            })
            .collect()
    }

    fn name_mismatches(&self, kind: MethodKind) -> Vec<NameMismatch> {
        self.of_kind(kind)
            .filter(|m| m.reflectable() && !m.names_match())
            .filter_map(|m| {
                let surrogate = m.surrogate_parameters().ok()?;
                let actual = m.actual_parameters().ok()?;
                Some(Mismatch {
                    name: m.name().to_string(),
                    kind,
                    surrogate: surrogate.param_names().into_iter().flatten().collect(),
                    actual: actual.param_names().into_iter().flatten().collect(),
                })
            })
            .collect()
    }

    /// Instance methods the surrogate has and the actual class lacks.
    #[must_use]
    pub fn extra_instance_methods(&self) -> Vec<&Method> {
        self.extra(MethodKind::Instance)
    }

    /// Class methods the surrogate has and the actual class lacks.
    #[must_use]
    pub fn extra_class_methods(&self) -> Vec<&Method> {
        self.extra(MethodKind::Class)
    }

    /// Instance methods the actual class has and the surrogate lacks.
    #[must_use]
    pub fn missing_instance_methods(&self) -> Vec<&Method> {
        self.missing(MethodKind::Instance)
    }

    /// Class methods the actual class has and the surrogate lacks.
    #[must_use]
    pub fn missing_class_methods(&self) -> Vec<&Method> {
        self.missing(MethodKind::Class)
    }

    /// Reflectable instance methods whose parameter kinds differ.
    #[must_use]
    pub fn instance_type_mismatches(&self) -> Vec<TypeMismatch> {
        self.type_mismatches(MethodKind::Instance)
    }

    /// Reflectable class methods whose parameter kinds differ.
    #[must_use]
    pub fn class_type_mismatches(&self) -> Vec<TypeMismatch> {
        self.type_mismatches(MethodKind::Class)
    }

    /// Reflectable instance methods whose parameter names differ.
    #[must_use]
    pub fn instance_name_mismatches(&self) -> Vec<NameMismatch> {
        self.name_mismatches(MethodKind::Instance)
    }

    /// Reflectable class methods whose parameter names differ.
    #[must_use]
    pub fn class_name_mismatches(&self) -> Vec<NameMismatch> {
        self.name_mismatches(MethodKind::Class)
    }

    /// Collects the findings the options ask for.
    #[must_use]
    pub fn report(&self, options: &ComparisonOptions) -> ComparisonReport {
        let names = |methods: Vec<&Method>| -> Vec<String> {
            methods.into_iter().map(|m| m.name().to_string()).collect()
        };
        let report = ComparisonReport {
            surrogate: self.surrogate_name.clone(),
            actual: self.actual_name.clone(),
            options: *options,
            extra_instance_methods: names(self.extra_instance_methods()),
            extra_class_methods: names(self.extra_class_methods()),
            missing_instance_methods: if options.subset {
                Vec::new()
            } else {
                names(self.missing_instance_methods())
            },
            missing_class_methods: if options.subset {
                Vec::new()
            } else {
                names(self.missing_class_methods())
            },
            instance_type_mismatches: if options.types {
                self.instance_type_mismatches()
            } else {
                Vec::new()
            },
            class_type_mismatches: if options.types {
                self.class_type_mismatches()
            } else {
                Vec::new()
            },
            instance_name_mismatches: if options.names {
                self.instance_name_mismatches()
            } else {
                Vec::new()
            },
            class_name_mismatches: if options.names {
                self.class_name_mismatches()
            } else {
                Vec::new()
            },
        };
        tracing::debug!(
            surrogate = %report.surrogate,
            actual = %report.actual,
            findings = report.finding_count(),
            "compared api"
        );
        report
    }
}
