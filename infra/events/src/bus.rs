use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::trace;

/// A safe default for channel buffers; enough for domain events in a slice.
const DEFAULT_CAPACITY: usize = 128;

/// Marker trait for types that can travel across the [`EventBus`].
///
/// Any `Send + Sync + 'static` type qualifies automatically.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelKind {
    Broadcast,
    Mpsc,
}

struct ChannelState {
    kind: ChannelKind,
    channel: Box<dyn Any + Send + Sync>,
}

impl std::fmt::Debug for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelState").field("kind", &self.kind).finish_non_exhaustive()
    }
}

struct MpscChannel<T> {
    sender: mpsc::Sender<Arc<T>>,
    receiver: Option<mpsc::Receiver<Arc<T>>>,
}

/// A thread-safe event bus managing channels indexed by event type.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl EventBus {
    /// Creates a new, empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to broadcast events of type `T` with the default buffer.
    ///
    /// # Errors
    /// Returns [`EventBusError::KindMismatch`] if `T` is already wired as a
    /// queue.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to broadcast events of type `T` with a specific buffer size.
    ///
    /// # Errors
    /// Returns [`EventBusError::KindMismatch`] if `T` is already wired as a
    /// queue, or [`EventBusError::InvalidCapacity`] for a zero capacity.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        Ok(self.broadcast_sender::<T>(capacity)?.subscribe())
    }

    /// Takes the single receiver of the bounded queue for `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::ReceiverTaken`] if it was already claimed,
    /// [`EventBusError::KindMismatch`] if `T` is wired as broadcast, or
    /// [`EventBusError::InvalidCapacity`] for a zero capacity.
    pub fn subscribe_mpsc<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<mpsc::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity);
        }

        let mut channels = self.channels.write();
        let state = channels.entry(TypeId::of::<T>()).or_insert_with(|| new_mpsc::<T>(capacity));
        if state.kind != ChannelKind::Mpsc {
            return Err(EventBusError::kind_mismatch::<T>());
        }
        let channel = state
            .channel
            .downcast_mut::<MpscChannel<T>>()
            .ok_or_else(EventBusError::type_mismatch::<T>)?;
        channel.receiver.take().ok_or(EventBusError::ReceiverTaken {
            event: std::any::type_name::<T>(),
        })
    }

    /// Publishes a broadcast event. Returns how many subscribers saw it; an
    /// event with no subscribers is dropped silently.
    ///
    /// # Errors
    /// Returns [`EventBusError::KindMismatch`] if `T` is wired as a queue.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        let sender = self.broadcast_sender::<T>(DEFAULT_CAPACITY)?;
        match sender.send(Arc::new(event)) {
            Ok(count) => {
                trace!(event = std::any::type_name::<T>(), count, "Event dispatched");
                Ok(count)
            },
            Err(_) => {
                trace!(event = std::any::type_name::<T>(), "Event dropped: no subscribers");
                Ok(0)
            },
        }
    }

    /// Enqueues an event onto the bounded queue for `T` without blocking.
    ///
    /// # Errors
    /// Returns [`EventBusError::ChannelFull`] when the queue has no room, or
    /// [`EventBusError::KindMismatch`] if `T` is wired as broadcast.
    pub fn publish_mpsc<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        let sender = self.mpsc_sender::<T>(DEFAULT_CAPACITY)?;
        sender
            .try_send(Arc::new(event))
            .map_err(|_| EventBusError::ChannelFull { event: std::any::type_name::<T>() })
    }

    /// Drops every channel, disconnecting all subscribers. Returns how many
    /// channels were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn broadcast_sender<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity);
        }

        let mut channels = self.channels.write();
        let state = channels.entry(TypeId::of::<T>()).or_insert_with(|| {
            let (tx, _rx) = broadcast::channel::<Arc<T>>(capacity);
            ChannelState { kind: ChannelKind::Broadcast, channel: Box::new(tx) }
        });
        if state.kind != ChannelKind::Broadcast {
            return Err(EventBusError::kind_mismatch::<T>());
        }
        state
            .channel
            .downcast_ref::<broadcast::Sender<Arc<T>>>()
            .cloned()
            .ok_or_else(EventBusError::type_mismatch::<T>)
    }

    fn mpsc_sender<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<mpsc::Sender<Arc<T>>, EventBusError> {
        let mut channels = self.channels.write();
        let state = channels.entry(TypeId::of::<T>()).or_insert_with(|| new_mpsc::<T>(capacity));
        if state.kind != ChannelKind::Mpsc {
            return Err(EventBusError::kind_mismatch::<T>());
        }
        state
            .channel
            .downcast_ref::<MpscChannel<T>>()
            .map(|c| c.sender.clone())
            .ok_or_else(EventBusError::type_mismatch::<T>)
    }
}

fn new_mpsc<T: Event>(capacity: usize) -> ChannelState {
    let (tx, rx) = mpsc::channel::<Arc<T>>(capacity);
    ChannelState {
        kind: ChannelKind::Mpsc,
        channel: Box::new(MpscChannel { sender: tx, receiver: Some(rx) }),
    }
}
