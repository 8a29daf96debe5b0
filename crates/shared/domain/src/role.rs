//! Role rank model and the authorization checks over a room's member list.
//!
//! The hierarchy is a closed, totally ordered set; the derived `Ord` agrees
//! with [`Role::rank`]. Every mutation of someone else's membership goes
//! through [`authorize`] before any state changes.

use crate::entity::Membership;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Membership role, ordered from least to most privileged.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Guest,
    Roommate,
    Assistant,
    HeadRoommate,
}

impl Role {
    /// Numeric rank backing the total order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Guest => 0,
            Self::Roommate => 1,
            Self::Assistant => 2,
            Self::HeadRoommate => 3,
        }
    }
}

/// A mutation of another member's membership, subject to rank checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    /// End the target's membership.
    Remove,
    /// Assign the target a new role.
    ChangeRole(Role),
}

/// Why an action over another membership was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("a member cannot act on its own membership")]
    SelfAction,
    #[error("{actor} does not outrank {target}")]
    Outranked { actor: Role, target: Role },
    #[error("{actor} cannot grant {granted}")]
    GrantTooHigh { actor: Role, granted: Role },
}

/// Checks whether `actor` may apply `action` to `target`.
///
/// Self-targeted actions are always refused; otherwise the actor must
/// strictly outrank the target, and a granted role must rank strictly below
/// the actor's own.
///
/// Headship transfer is the one sanctioned exception to the grant rule and is
/// decided by the room registry, not here: a head roommate assigning
/// `HeadRoommate` steps down in the same operation.
///
/// # Errors
/// Returns the violated rule as an [`AccessError`].
pub fn authorize(
    actor: &Membership,
    target: &Membership,
    action: MemberAction,
) -> Result<(), AccessError> {
    if actor.id == target.id {
        return Err(AccessError::SelfAction);
    }
    if actor.role.rank() <= target.role.rank() {
        return Err(AccessError::Outranked { actor: actor.role, target: target.role });
    }
    if let MemberAction::ChangeRole(granted) = action {
        if granted.rank() >= actor.role.rank() {
            return Err(AccessError::GrantTooHigh { actor: actor.role, granted });
        }
    }
    Ok(())
}
