//! Rooms feature slice.
//!
//! Owns the room registry (rooms, memberships, ranked roles, invitations)
//! and its REST surface. Authorization over memberships delegates to the
//! role model in `rhub_domain::role`.

mod error;
pub mod invite;
mod registry;
pub mod server;

pub use crate::error::RoomsError;
pub use crate::invite::{DeliveryError, InviteMailer, InviteRequested, LogMailer};
pub use crate::registry::{RoomProfile, RoomRegistry};

use rhub_domain::config::ApiConfig;
use rhub_domain::registry::{FeatureSlice, InitializedSlice};
use rhub_event_bus::EventBus;
use rhub_store::Store;
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Rooms feature state.
#[derive(Debug, Clone)]
pub struct Rooms {
    inner: Arc<RoomsInner>,
}

#[derive(Debug)]
pub struct RoomsInner {
    pub registry: RoomRegistry,
    /// Keeps the invite delivery worker owned by the slice.
    _delivery_worker: JoinHandle<()>,
}

impl Rooms {
    fn new(inner: RoomsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Rooms {
    type Target = RoomsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Rooms {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initializes the rooms slice and starts the invite delivery worker.
///
/// Must run inside a Tokio runtime.
///
/// # Errors
/// Returns an error when the invite queue was already claimed.
pub fn init(
    config: &ApiConfig,
    store: &Store,
    events: &EventBus,
) -> Result<InitializedSlice, RoomsError> {
    let registry = RoomRegistry::new(store.clone(), events.clone());
    let worker = invite::spawn_delivery_worker(events, &config.invites, Arc::new(LogMailer))
        .map_err(|e| RoomsError::Internal { message: e.to_string().into() })?;

    tracing::info!("Rooms slice initialized");

    Ok(InitializedSlice::new(Rooms::new(RoomsInner {
        registry,
        _delivery_worker: worker,
    })))
}
