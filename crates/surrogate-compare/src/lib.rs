// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # surrogate-compare
//!
//! API conformance checks between a surrogate and the real class it
//! imitates.
//!
//! This crate provides:
//! - **Method records**: one name reflected on both sides
//! - **Presence checks**: extra and missing instance/class methods
//! - **Signature checks**: parameter-kind and parameter-name drift on
//!   reflectable methods
//! - **Reports**: findings gated by [`ComparisonOptions`], serializable to
//!   JSON
//!
//! Engine-injected helpers (`will_<name>`, `will_<name>_queue`,
//! `invocations`) never take part in a comparison.
//!
//! ## Example
//!
//! ```rust
//! use surrogate_compare::{ApiComparer, ComparisonOptions};
//! use surrogate_core::{ClassShape, Param, Song, SurrogateClass};
//!
//! let actual = ClassShape::new("Mailer").instance_method("deliver", [Param::required("to")]);
//! let mock = SurrogateClass::new("MockMailer");
//! mock.sing("deliver", Song::new().params([Param::required("to")]));
//!
//! let report = ApiComparer::new(&mock, &actual).report(&ComparisonOptions::default());
//! assert!(report.is_substitutable());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod comparer;
pub mod config;
pub mod error;
pub mod method;
pub mod report;

pub use comparer::{ApiComparer, Mismatch, NameMismatch, TypeMismatch};
pub use config::ComparisonOptions;
pub use error::{CompareError, Result};
pub use method::Method;
pub use report::ComparisonReport;
