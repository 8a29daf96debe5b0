//! Convenience re-exports for slice and server code.

pub use crate::safe_nanoid;
pub use crate::server::actor::CurrentActor;
pub use crate::server::error::ErrorBody;
pub use crate::server::state::ApiState;
pub use rhub_domain::registry::{FeatureSlice, InitializedSlice};
