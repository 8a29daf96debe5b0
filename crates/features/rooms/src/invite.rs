//! Background invitation delivery.
//!
//! The registry only gates and records an invite; delivery belongs to an
//! external collaborator behind the [`InviteMailer`] port. A worker drains
//! the bus queue outside any store lock and retries a bounded number of
//! times; failures are logged, never propagated to the inviting request.

use async_trait::async_trait;
use rhub_domain::config::InviteConfig;
use rhub_event_bus::{EventBus, EventBusError, EventReceiverExt};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// An invitation that passed authorization and awaits delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequested {
    pub room_id: String,
    pub room_name: String,
    pub email: String,
    /// Membership id of the inviting member.
    pub invited_by: String,
}

/// Delivery failed; the worker decides whether to retry.
#[derive(Debug, thiserror::Error)]
#[error("invite delivery failed: {message}")]
pub struct DeliveryError {
    pub message: String,
}

/// Port to the external invitation collaborator.
#[async_trait]
pub trait InviteMailer: Debug + Send + Sync {
    /// Attempts one delivery of the invitation.
    async fn deliver(&self, invite: &InviteRequested) -> Result<(), DeliveryError>;
}

/// Stand-in collaborator that records deliveries in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl InviteMailer for LogMailer {
    async fn deliver(&self, invite: &InviteRequested) -> Result<(), DeliveryError> {
        info!(
            email = %invite.email,
            room = %invite.room_id,
            "Invitation handed to the delivery collaborator"
        );
        Ok(())
    }
}

/// Spawns the delivery worker draining [`InviteRequested`] events.
///
/// # Errors
/// Returns an error when the invite queue was already claimed by another
/// worker.
pub fn spawn_delivery_worker(
    events: &EventBus,
    config: &InviteConfig,
    mailer: Arc<dyn InviteMailer>,
) -> Result<JoinHandle<()>, EventBusError> {
    let mut queue = events.subscribe_mpsc::<InviteRequested>(config.queue_capacity)?;
    let max_attempts = config.max_attempts.max(1);
    let base_backoff = Duration::from_millis(config.retry_backoff_ms);

    Ok(tokio::spawn(async move {
        while let Some(invite) = queue.recv_event().await {
            deliver_with_retry(mailer.as_ref(), &invite, max_attempts, base_backoff).await;
        }
        debug!("Invite delivery worker stopped");
    }))
}

async fn deliver_with_retry(
    mailer: &dyn InviteMailer,
    invite: &InviteRequested,
    max_attempts: u32,
    base_backoff: Duration,
) {
    let mut backoff = base_backoff;

    for attempt in 1..=max_attempts {
        match mailer.deliver(invite).await {
            Ok(()) => {
                debug!(email = %invite.email, attempt, "Invite delivered");
                return;
            },
            Err(err) if attempt < max_attempts => {
                warn!(email = %invite.email, attempt, error = %err, "Invite delivery failed; retrying");
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
            },
            Err(err) => {
                error!(email = %invite.email, attempts = max_attempts, error = %err, "Invite dropped after retries");
            },
        }
    }
}
