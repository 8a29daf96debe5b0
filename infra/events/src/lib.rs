//! # Event Bus
//!
//! A type-safe, asynchronous event bus for handing work between feature
//! slices and background workers.
//!
//! Channels are indexed by the event's Rust type. Broadcast channels fan an
//! event out to every subscriber; MPSC channels queue events for a single
//! consumer (the shape used for invite delivery, where the publisher must
//! never block on the consumer).
//!
//! # Example
//!
//! ```rust
//! use rhub_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct RoomCreated { id: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<RoomCreated>()?;
//!     bus.publish(RoomCreated { id: 7 })?;
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.id, 7);
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::EventBusError;
pub use receiver::EventReceiverExt;
