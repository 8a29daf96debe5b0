//! Core entities: rooms, memberships, chores, and utilities.
//!
//! Memberships live inside their room in join order; ended memberships stay
//! in the list (states `Left`/`Removed`) so historical attribution survives.

use crate::money::Money;
use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Room lifecycle. `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomState {
    Active,
    Deleted,
}

/// Membership lifecycle. `Left` and `Removed` are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipState {
    Active,
    Left,
    Removed,
}

/// A user's association with a room, carrying a role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub display_name: String,
    pub role: Role,
    pub state: MembershipState,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, MembershipState::Active)
    }
}

/// A shared living space grouping members, chores, and utilities.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    /// Unique join token among active rooms.
    pub code: String,
    pub created_by: String,
    /// All memberships ever held, in join order.
    pub members: Vec<Membership>,
    pub state: RoomState,
    pub created_at: DateTime<Utc>,
}

impl Room {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, RoomState::Active)
    }

    /// Active memberships in join order.
    pub fn active_members(&self) -> impl Iterator<Item = &Membership> {
        self.members.iter().filter(|m| m.is_active())
    }

    #[must_use]
    pub fn active_member_count(&self) -> usize {
        self.active_members().count()
    }

    /// The current head roommate, if the room still has one.
    #[must_use]
    pub fn head(&self) -> Option<&Membership> {
        self.active_members().find(|m| m.role == Role::HeadRoommate)
    }

    #[must_use]
    pub fn member(&self, member_id: &str) -> Option<&Membership> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// The user's active membership in this room, if any.
    #[must_use]
    pub fn membership_of(&self, user_id: &str) -> Option<&Membership> {
        self.active_members().find(|m| m.user_id == user_id)
    }
}

/// Recurrence cadence for chores. Fixed-duration periods.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyUnit {
    Weekly,
    Biweekly,
    Monthly,
}

impl FrequencyUnit {
    /// Period length in days.
    #[must_use]
    pub const fn period_days(self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Biweekly => 14,
            Self::Monthly => 30,
        }
    }
}

/// A recurring chore definition scoped to a room.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoreTemplate {
    pub id: String,
    pub room_id: String,
    pub chore_name: String,
    /// Instances materialized per period boundary. At least 1.
    pub frequency: u32,
    pub frequency_unit: FrequencyUnit,
    pub deadline: DateTime<Utc>,
}

/// A materialized due occurrence of a chore.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoreInstance {
    pub id: String,
    pub room_id: String,
    pub chore_name: String,
    pub due_at: DateTime<Utc>,
}

/// How a utility's price is distributed across members.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
pub enum Distribution {
    #[serde(rename = "EQUALSPLIT")]
    #[strum(serialize = "EQUALSPLIT")]
    EqualSplit,
}

/// Settlement progress of a utility, derived from recorded payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtilityStatus {
    Pending,
    PartiallyPaid,
    Paid,
}

/// One member's slice of a utility, snapshotted at creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UtilityShare {
    pub member_id: String,
    pub user_id: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    #[schema(value_type = f64)]
    pub paid: Money,
}

impl UtilityShare {
    #[must_use]
    pub fn outstanding(&self) -> Money {
        self.amount.saturating_sub(self.paid)
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.paid >= self.amount
    }
}

/// A shared bill distributed across a room's members.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Utility {
    pub id: String,
    pub room_id: String,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub price: Money,
    pub distribution: Distribution,
    pub status: UtilityStatus,
    /// Per-member shares in the room's join order at creation time.
    pub shares: Vec<UtilityShare>,
    pub created_at: DateTime<Utc>,
}

impl Utility {
    #[must_use]
    pub fn share_for(&self, member_id: &str) -> Option<&UtilityShare> {
        self.shares.iter().find(|s| s.member_id == member_id)
    }

    #[must_use]
    pub fn total_paid(&self) -> Money {
        self.shares.iter().map(|s| s.paid).sum()
    }

    /// Recomputes the settlement status from the shares.
    #[must_use]
    pub fn derived_status(&self) -> UtilityStatus {
        if !self.shares.is_empty() && self.shares.iter().all(UtilityShare::is_settled) {
            UtilityStatus::Paid
        } else if self.total_paid() > Money::ZERO {
            UtilityStatus::PartiallyPaid
        } else {
            UtilityStatus::Pending
        }
    }
}

/// A member's aggregate position across a room's utilities.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalance {
    pub member_id: String,
    pub user_id: String,
    pub display_name: String,
    #[schema(value_type = f64)]
    pub owed: Money,
    #[schema(value_type = f64)]
    pub paid: Money,
    #[schema(value_type = f64)]
    pub outstanding: Money,
}
