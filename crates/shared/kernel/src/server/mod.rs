//! Server-side plumbing shared by every slice: API state, actor extraction,
//! the common error body, and the system router.

pub mod actor;
pub mod error;
mod health;
pub mod router;
pub mod state;

pub use actor::CurrentActor;
pub use error::ErrorBody;
pub use state::ApiState;
