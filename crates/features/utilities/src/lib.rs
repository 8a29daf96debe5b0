//! Utilities feature slice.
//!
//! Shared bills scoped to a room, split exactly across the active members at
//! creation time, with payment tracking and per-member balances.

mod error;
mod ledger;
pub mod server;

pub use crate::error::UtilityError;
pub use crate::ledger::UtilityLedger;

use rhub_domain::registry::{FeatureSlice, InitializedSlice};
use rhub_store::Store;
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Utilities feature state.
#[derive(Debug, Clone)]
pub struct Utilities {
    inner: Arc<UtilitiesInner>,
}

#[derive(Debug)]
pub struct UtilitiesInner {
    pub ledger: UtilityLedger,
}

impl Utilities {
    fn new(inner: UtilitiesInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Utilities {
    type Target = UtilitiesInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Utilities {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initializes the utilities slice.
pub fn init(store: &Store) -> InitializedSlice {
    tracing::info!("Utilities slice initialized");

    InitializedSlice::new(Utilities::new(UtilitiesInner { ledger: UtilityLedger::new(store.clone()) }))
}
