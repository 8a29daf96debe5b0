//! # State Engine
//!
//! An in-process store for the room, chore, and utility collections.
//!
//! Every mutation runs inside one exclusive write section, so multi-entity
//! changes (member joins against the caps, chore batches, cascade deletes,
//! split snapshots) are atomic and serialized; reads share the lock and may
//! observe brief staleness relative to concurrent writers. Callers must not
//! hold a section across an `.await`.
//!
//! ## Example
//!
//! ```rust
//! use rhub_store::Store;
//!
//! let store = Store::new();
//! let room_count = store.read(|state| state.rooms().count());
//! assert_eq!(room_count, 0);
//! ```

mod engine;
mod state;

pub use engine::Store;
pub use state::CoreState;
