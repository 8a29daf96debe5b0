//! The thread-safe [`Store`] handle over the shared [`CoreState`].

use crate::state::CoreState;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct StoreInner {
    state: RwLock<CoreState>,
}

/// A cheaply clonable handle to the process-wide state.
///
/// Internally reference-counted; clones observe the same state. Mutations go
/// through [`Store::write`], which is the exclusive section the domain relies
/// on for its count caps and atomic cascades.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` under the shared read lock.
    pub fn read<R>(&self, f: impl FnOnce(&CoreState) -> R) -> R {
        f(&self.inner.state.read())
    }

    /// Runs `f` under the exclusive write lock.
    ///
    /// The closure must stay synchronous; holding the section across a
    /// suspension point would stall every other request.
    pub fn write<R>(&self, f: impl FnOnce(&mut CoreState) -> R) -> R {
        f(&mut self.inner.state.write())
    }
}
