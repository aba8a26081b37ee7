// Iron Lotus: Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # surrogate-core
//!
//! Behavior engine for surrogate test doubles.
//!
//! A surrogate stands in for a real collaborator in unit tests. This crate
//! provides:
//!
//! - [`SurrogateClass`] with `sing` / `sing_class` to register canned
//!   behavior: static defaults, stored defaults, behavior blocks
//! - [`Instance`] with `will` / `will_queue` overrides and an invocation
//!   log per song
//! - [`Endower::reprise`] to clone a surrogate class into an independent
//!   variant that shares behavior specs but no call-time state
//! - [`Signature`], [`Reflect`] and [`ClassShape`] for describing APIs the
//!   comparator checks against
//!
//! ## Resolution order
//!
//! A call to a sung method returns the first of: a queued value, the
//! `will_<name>` override, the attribute named after the method, the
//! configured default, the block's result. Otherwise it fails with
//! [`SurrogateError::UnpreparedMethod`]. Every call is logged first.
//!
//! ## Example
//!
//! ```rust
//! use surrogate_core::{Song, SurrogateClass, Value};
//!
//! let mock = SurrogateClass::new("MockMailer");
//! mock.sing("deliver", Song::new().default(true));
//!
//! let mailer = mock.new_instance(&[])?;
//! mailer.will_queue("deliver", [false])?;
//! assert_eq!(mailer.call("deliver", &[Value::from("hi")])?, Value::Bool(false));
//! assert_eq!(mailer.call("deliver", &[])?, Value::Bool(true));
//! assert_eq!(mailer.invocations("deliver")?.len(), 2);
//! # Ok::<(), surrogate_core::SurrogateError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::significant_drop_tightening)]

pub mod endower;
pub mod error;
pub mod hatchery;
pub mod hatchling;
pub mod method_queue;
pub mod reflect;
pub mod resolution;
pub mod shape;
pub mod signature;
pub mod value;

pub use endower::{ClassId, Endower, Instance, Receiver, SurrogateClass};
pub use error::{Result, SurrogateError};
pub use hatchery::{Block, Fallback, Hatchery, Installed, MethodSpec, Origin, Song};
pub use hatchling::Hatchling;
pub use method_queue::{MethodQueue, QueueState};
pub use reflect::{MethodInfo, MethodKind, Reflect};
pub use resolution::{Resolution, Strategy, resolve};
pub use shape::{ClassShape, Visibility};
pub use signature::{Arity, Param, ParamKind, Signature};
pub use value::Value;
