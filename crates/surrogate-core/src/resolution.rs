//! What a sung method returns.
//!
//! Resolution walks an explicit, ordered strategy list and stops at the
//! first strategy that produces something:
//!
//! | Step | Strategy      | Source                                   |
//! |------|---------------|------------------------------------------|
//! | 1    | `Queue`       | non-empty queue for this receiver/method |
//! | 2    | `Override`    | value set through `will_<name>`          |
//! | 3    | `StoredValue` | attribute named after the method         |
//! | 4    | `Default`     | `default` / `default!` option            |
//! | 5    | `Block`       | behavior body                            |
//!
//! If none applies the call fails with `UnpreparedMethod`.

use crate::error::{Result, SurrogateError};
use crate::hatchery::{Block, MethodSpec};
use crate::hatchling::Hatchling;
use crate::value::Value;

/// One step of the resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Pop the receiver's queue.
    Queue,
    /// Return the `will_<name>` override.
    Override,
    /// Return the attribute named after the method.
    StoredValue,
    /// Return the configured default.
    Default,
    /// Run the behavior body.
    Block,
}

impl Strategy {
    /// Evaluation order, first match wins.
    pub const ORDER: [Self; 5] = [
        Self::Queue,
        Self::Override,
        Self::StoredValue,
        Self::Default,
        Self::Block,
    ];

    fn attempt(self, spec: &MethodSpec, state: &mut Hatchling) -> Option<Resolution> {
        let name = spec.name();
        let value = match self {
            Self::Queue => state.pop_queue(name),
            Self::Override => state.override_value(name).cloned(),
            Self::StoredValue => state.attribute(name).cloned(),
            Self::Default => spec.fallback().value().cloned(),
            Self::Block => return spec.block().cloned().map(Resolution::Block),
        };
        value.map(|v| Resolution::Value(v, self))
    }
}

/// Outcome of resolution.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// A ready value and the strategy that produced it.
    Value(Value, Strategy),
    /// The body to run. The caller runs it after releasing the state so
    /// the body can call back into its receiver.
    Block(Block),
}

/// Resolves the return value of `spec` against a receiver's state.
pub fn resolve(spec: &MethodSpec, state: &mut Hatchling) -> Result<Resolution> {
    Strategy::ORDER
        .into_iter()
        .find_map(|strategy| strategy.attempt(spec, state))
        .ok_or_else(|| SurrogateError::unprepared(spec.name()))
}
