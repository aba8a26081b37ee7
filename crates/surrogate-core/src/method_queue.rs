//! Queued return values for one method on one receiver.
//!
//! State machine:
//! ```text
//! Empty → Loaded → (pop)* → Drained
//! ```
//! Popping never rewinds; a consumed value is gone for good.

use std::collections::VecDeque;

use crate::value::Value;

/// Observable state of a [`MethodQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Nothing was ever loaded.
    Empty,
    /// Values remain.
    Loaded,
    /// Every loaded value has been popped.
    Drained,
}

/// Ordered sequence of canned return values.
#[derive(Debug, Clone, Default)]
pub struct MethodQueue {
    pending: VecDeque<Value>,
    popped: usize,
}

impl MethodQueue {
    /// Creates a queue holding `values` in order.
    #[must_use]
    pub fn loaded(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            pending: values.into_iter().collect(),
            popped: 0,
        }
    }

    /// Removes and returns the next value.
    pub fn pop(&mut self) -> Option<Value> {
        let value = self.pending.pop_front()?;
        self.popped += 1;
        Some(value)
    }

    /// Returns true if no value remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Values not yet popped.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Values popped so far.
    #[must_use]
    pub const fn popped(&self) -> usize {
        self.popped
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> QueueState {
        match (self.pending.is_empty(), self.popped) {
            (false, _) => QueueState::Loaded,
            (true, 0) => QueueState::Empty,
            (true, _) => QueueState::Drained,
        }
    }
}
