/// Errors that can occur during event bus operations.
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    /// An internal dynamic cast failed; the type registry invariant broke.
    #[error("channel type mismatch for {event}")]
    TypeMismatch { event: &'static str },

    /// A channel for this event exists with a different kind.
    #[error("channel kind mismatch for {event}")]
    KindMismatch { event: &'static str },

    /// The single MPSC receiver for this event was already handed out.
    #[error("mpsc receiver for {event} already taken")]
    ReceiverTaken { event: &'static str },

    /// A bounded queue is full and the event was not enqueued.
    #[error("channel for {event} is full")]
    ChannelFull { event: &'static str },

    /// Bounded channels require a capacity greater than zero.
    #[error("capacity must be greater than zero")]
    InvalidCapacity,
}

impl EventBusError {
    pub(crate) fn type_mismatch<T>() -> Self {
        Self::TypeMismatch { event: std::any::type_name::<T>() }
    }

    pub(crate) fn kind_mismatch<T>() -> Self {
        Self::KindMismatch { event: std::any::type_name::<T>() }
    }
}
