//! Configuration values that are either fixed or computed at render time.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Deserializer;

/// A value that is either known up front or produced by a closure each time
/// it is read.
///
/// Component fields such as `enabled` or `hl` use this so a configuration can
/// react to editor state without the render pipeline knowing where the value
/// comes from. Values loaded from TOML are always [`Deferred::Literal`].
pub enum Deferred<T> {
    Literal(T),
    Computed(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T> Deferred<T> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Deferred::Computed(Arc::new(f))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Deferred::Computed(_))
    }
}

impl<T: Clone> Deferred<T> {
    /// Evaluate the value. Computed values run their closure on every call.
    pub fn get(&self) -> T {
        match self {
            Deferred::Literal(value) => value.clone(),
            Deferred::Computed(f) => f(),
        }
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Deferred::Literal(value)
    }
}

impl<T: Default> Default for Deferred<T> {
    fn default() -> Self {
        Deferred::Literal(T::default())
    }
}

impl<T: Clone> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        match self {
            Deferred::Literal(value) => Deferred::Literal(value.clone()),
            Deferred::Computed(f) => Deferred::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Deferred::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Deferred<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Deferred::Literal)
    }
}
