//! Chores feature slice.
//!
//! Recurring chore templates scoped to a room, with due instances
//! materialized eagerly at definition time.

mod error;
mod scheduler;
pub mod server;

pub use crate::error::ChoresError;
pub use crate::scheduler::{ChoreScheduler, ChoreSpec};

use rhub_domain::registry::{FeatureSlice, InitializedSlice};
use rhub_store::Store;
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Chores feature state.
#[derive(Debug, Clone)]
pub struct Chores {
    inner: Arc<ChoresInner>,
}

#[derive(Debug)]
pub struct ChoresInner {
    pub scheduler: ChoreScheduler,
}

impl Chores {
    fn new(inner: ChoresInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Chores {
    type Target = ChoresInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Chores {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initializes the chores slice.
pub fn init(store: &Store) -> InitializedSlice {
    tracing::info!("Chores slice initialized");

    InitializedSlice::new(Chores::new(ChoresInner { scheduler: ChoreScheduler::new(store.clone()) }))
}
