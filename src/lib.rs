//! Surrogate: test doubles that behave on cue and stay true to the API
//! they replace.
//!
//! Part of the PAIML Sovereign AI Stack.
//!
//! # Quick Start
//!
//! ```rust
//! use surrogate::prelude::*;
//!
//! let mock = SurrogateClass::new("MockMailer");
//! mock.sing("deliver", Song::new().default(true).params([Param::required("to")]));
//!
//! let mailer = mock.new_instance(&[])?;
//! assert_eq!(mailer.call("deliver", &[Value::from("ops@example.com")])?, Value::Bool(true));
//!
//! let actual = ClassShape::new("Mailer").instance_method("deliver", [Param::required("to")]);
//! let report = ApiComparer::new(&mock, &actual).report(&ComparisonOptions::default());
//! assert!(report.is_substitutable());
//! # Ok::<(), surrogate::core::SurrogateError>(())
//! ```

pub use surrogate_compare as compare;
pub use surrogate_core as core;

/// Prelude module for common imports.
pub mod prelude {
    pub use surrogate_compare::{ApiComparer, ComparisonOptions, ComparisonReport};
    pub use surrogate_core::{
        Block, ClassShape, Endower, Instance, MethodKind, Param, Receiver, Reflect, Song,
        SurrogateClass, SurrogateError, Value,
    };
}

/// Installs a formatting subscriber for engine logs.
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns false if a
/// global subscriber was already set, so test suites can call it freely.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(filter = default_filter, "surrogate logging initialized");
    }
    installed
}
