//! Per-receiver runtime state: invocation logs, queues, overrides and
//! attributes.
//!
//! One `Hatchling` belongs to each surrogate instance, and one to each
//! surrogate class object for its class-level songs. A reprise always
//! starts from a fresh one.

use std::collections::HashMap;

use crate::method_queue::MethodQueue;
use crate::value::Value;

#[derive(Debug, Default)]
struct SongState {
    invocations: Vec<Vec<Value>>,
    queue: Option<MethodQueue>,
    override_value: Option<Value>,
}

/// Runtime state of one receiver.
#[derive(Debug, Default)]
pub struct Hatchling {
    songs: HashMap<String, SongState>,
    attributes: HashMap<String, Value>,
}

impl Hatchling {
    /// Creates empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn song_mut(&mut self, name: &str) -> &mut SongState {
        self.songs.entry(name.to_string()).or_default()
    }

    /// Appends one invocation to the log of `name`. Entries are never removed.
    pub fn record(&mut self, name: &str, args: Vec<Value>) {
        self.song_mut(name).invocations.push(args);
    }

    /// Recorded argument lists for `name`, oldest first.
    #[must_use]
    pub fn invocations(&self, name: &str) -> &[Vec<Value>] {
        self.songs
            .get(name)
            .map(|s| s.invocations.as_slice())
            .unwrap_or_default()
    }

    /// Replaces the queue of `name` with `values`.
    pub fn load_queue(&mut self, name: &str, values: Vec<Value>) {
        self.song_mut(name).queue = Some(MethodQueue::loaded(values));
    }

    /// Pops the next queued value of `name`, if one remains.
    pub fn pop_queue(&mut self, name: &str) -> Option<Value> {
        self.songs.get_mut(name)?.queue.as_mut()?.pop()
    }

    /// The queue of `name`, if one was ever loaded.
    #[must_use]
    pub fn queue(&self, name: &str) -> Option<&MethodQueue> {
        self.songs.get(name)?.queue.as_ref()
    }

    /// Sets the override returned by `name` once its queue is empty.
    pub fn set_override(&mut self, name: &str, value: Value) {
        self.song_mut(name).override_value = Some(value);
    }

    /// The override of `name`, if set.
    #[must_use]
    pub fn override_value(&self, name: &str) -> Option<&Value> {
        self.songs.get(name)?.override_value.as_ref()
    }

    /// Attribute lookup.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets an attribute, returning the previous value.
    pub fn set_attribute(&mut self, name: &str, value: Value) -> Option<Value> {
        self.attributes.insert(name.to_string(), value)
    }
}
