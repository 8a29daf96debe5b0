//! Facade crate for RoomHub features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement
//! business logic.
//!
//! ## Usage
//! - Call [`init`] to register the feature slices against a store and bus.
//! - Mount the routers from [`server::router`] onto the application router.

use rhub_domain::config::ApiConfig;
pub use rhub_domain as domain;
use rhub_event_bus::EventBus;
pub use rhub_kernel as kernel;
use rhub_store::Store;

pub mod server {
    pub mod router {
        pub use rhub_chores::server::router as chores_router;
        pub use rhub_kernel::server::router::system_router;
        pub use rhub_rooms::server::router as rooms_router;
        pub use rhub_utilities::server::router as utilities_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use rhub_chores as chores;
    pub use rhub_rooms as rooms;
    pub use rhub_utilities as utilities;

    /// Built-in feature slices.
    pub const ENABLED: &[&str] = &["rooms", "chores", "utilities"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all feature slices.
///
/// Must run inside a Tokio runtime; the rooms slice starts its invite
/// delivery worker here.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
    store: &Store,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Rooms & memberships
    slices.push(features::rooms::init(config, store, events)?);

    // Chore scheduling
    slices.push(features::chores::init(store));

    // Utility ledger
    slices.push(features::utilities::init(store));

    Ok(slices)
}
