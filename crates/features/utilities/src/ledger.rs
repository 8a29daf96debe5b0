//! Shared bills and their per-member distribution.
//!
//! A utility snapshots the room's active members at creation time and splits
//! the price exactly across them; payments accumulate against those shares
//! and drive the settlement status.

use crate::error::UtilityError;
use chrono::Utc;
use rhub_domain::entity::{
    Distribution, MemberBalance, Room, Utility, UtilityShare, UtilityStatus,
};
use rhub_domain::money::{Money, equal_split};
use rhub_domain::role::Role;
use rhub_kernel::safe_nanoid;
use rhub_store::{CoreState, Store};
use tracing::info;

/// Owns every mutation of utilities and their shares.
#[derive(Debug, Clone)]
pub struct UtilityLedger {
    store: Store,
}

impl UtilityLedger {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a utility and snapshots its equal split over the room's
    /// current active members, earliest joined first.
    ///
    /// # Errors
    /// `Validation` for an empty name or negative price, `NotFound` and
    /// `Forbidden` for unknown rooms or non-members.
    pub fn create(
        &self,
        room_id: &str,
        actor_id: &str,
        name: &str,
        description: &str,
        price: Money,
        distribution: Distribution,
    ) -> Result<Utility, UtilityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UtilityError::Validation { message: "utility name must not be empty".into() });
        }
        if price.is_negative() {
            return Err(UtilityError::Validation {
                message: "utility price must not be negative".into(),
            });
        }

        self.store.write(|state| {
            let room = member_gate(state, room_id, actor_id)?;

            let members: Vec<(String, String)> = room
                .active_members()
                .map(|m| (m.id.clone(), m.user_id.clone()))
                .collect();
            let amounts = equal_split(price, members.len());
            let shares: Vec<UtilityShare> = members
                .into_iter()
                .zip(amounts)
                .map(|((member_id, user_id), amount)| UtilityShare {
                    member_id,
                    user_id,
                    amount,
                    paid: Money::ZERO,
                })
                .collect();

            let utility = Utility {
                id: safe_nanoid!(),
                room_id: room_id.to_owned(),
                name: name.to_owned(),
                description: description.to_owned(),
                price,
                distribution,
                status: UtilityStatus::Pending,
                shares,
                created_at: Utc::now(),
            };

            state.insert_utility(utility.clone());
            info!(room = room_id, utility = %utility.id, price = %price, "Utility created");
            Ok(utility)
        })
    }

    /// Utilities of a room, newest first.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for unknown rooms or non-members.
    pub fn list_by_room(
        &self,
        room_id: &str,
        actor_id: &str,
    ) -> Result<Vec<Utility>, UtilityError> {
        self.store.read(|state| {
            member_gate(state, room_id, actor_id)?;
            Ok(sorted(state.utilities_by_room(room_id).cloned().collect()))
        })
    }

    /// Utilities of a room in which the given member holds a share.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for unknown rooms or non-members.
    pub fn list_for_member(
        &self,
        member_id: &str,
        room_id: &str,
        actor_id: &str,
    ) -> Result<Vec<Utility>, UtilityError> {
        self.store.read(|state| {
            member_gate(state, room_id, actor_id)?;
            Ok(sorted(
                state
                    .utilities_by_room(room_id)
                    .filter(|u| u.share_for(member_id).is_some())
                    .cloned()
                    .collect(),
            ))
        })
    }

    /// Deletes a utility and all of its shares.
    ///
    /// # Errors
    /// `NotFound` for unknown utilities, `Forbidden` for non-members of the
    /// owning room.
    pub fn remove(&self, utility_id: &str, actor_id: &str) -> Result<(), UtilityError> {
        self.store.write(|state| {
            let room_id = state
                .utility(utility_id)
                .map(|u| u.room_id.clone())
                .ok_or(UtilityError::NotFound { message: "no such utility".into() })?;
            member_gate(state, &room_id, actor_id)?;

            state.remove_utility(utility_id);
            info!(room = %room_id, utility = utility_id, "Utility deleted");
            Ok(())
        })
    }

    /// Records a payment against a member's share. Members settle their own
    /// shares; the head roommate may record payments for anyone.
    ///
    /// # Errors
    /// `Validation` for non-positive or overpaying amounts, `Forbidden` for
    /// payments on someone else's share, `NotFound` for unknown utilities or
    /// shares.
    pub fn record_payment(
        &self,
        utility_id: &str,
        actor_id: &str,
        member_id: &str,
        amount: Money,
    ) -> Result<Utility, UtilityError> {
        if amount <= Money::ZERO {
            return Err(UtilityError::Validation {
                message: "payment amount must be positive".into(),
            });
        }

        self.store.write(|state| {
            let room_id = state
                .utility(utility_id)
                .map(|u| u.room_id.clone())
                .ok_or(UtilityError::NotFound { message: "no such utility".into() })?;
            let room = member_gate(state, &room_id, actor_id)?;
            let actor = room
                .membership_of(actor_id)
                .ok_or(UtilityError::Internal { message: "membership vanished mid-read".into() })?;
            if actor.id != member_id && actor.role != Role::HeadRoommate {
                return Err(UtilityError::Forbidden {
                    message: "members may only settle their own share".into(),
                });
            }

            let utility = state
                .utility_mut(utility_id)
                .ok_or(UtilityError::Internal { message: "utility vanished mid-write".into() })?;
            let share = utility
                .shares
                .iter_mut()
                .find(|s| s.member_id == member_id)
                .ok_or(UtilityError::NotFound { message: "no share for that member".into() })?;

            let settled = share.paid.saturating_add(amount);
            if settled > share.amount {
                return Err(UtilityError::Validation {
                    message: format!(
                        "payment of {amount} would overpay the share ({} outstanding)",
                        share.outstanding()
                    )
                    .into(),
                });
            }
            share.paid = settled;
            utility.status = utility.derived_status();

            info!(utility = utility_id, member = member_id, amount = %amount, "Payment recorded");
            Ok(utility.clone())
        })
    }

    /// Per-member aggregate position across the room's utilities, in join
    /// order.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for unknown rooms or non-members.
    pub fn balances(
        &self,
        room_id: &str,
        actor_id: &str,
    ) -> Result<Vec<MemberBalance>, UtilityError> {
        self.store.read(|state| {
            let room = member_gate(state, room_id, actor_id)?;
            let utilities: Vec<&Utility> = state.utilities_by_room(room_id).collect();

            Ok(room
                .active_members()
                .map(|member| {
                    let mut owed = Money::ZERO;
                    let mut paid = Money::ZERO;
                    for share in utilities.iter().filter_map(|u| u.share_for(&member.id)) {
                        owed = owed.saturating_add(share.amount);
                        paid = paid.saturating_add(share.paid);
                    }
                    MemberBalance {
                        member_id: member.id.clone(),
                        user_id: member.user_id.clone(),
                        display_name: member.display_name.clone(),
                        owed,
                        paid,
                        outstanding: owed.saturating_sub(paid),
                    }
                })
                .collect())
        })
    }
}

fn member_gate<'a>(
    state: &'a CoreState,
    room_id: &str,
    actor_id: &str,
) -> Result<&'a Room, UtilityError> {
    let room = state
        .room(room_id)
        .filter(|r| r.is_active())
        .ok_or(UtilityError::NotFound { message: "no such room".into() })?;
    if room.membership_of(actor_id).is_none() {
        return Err(UtilityError::Forbidden {
            message: "not an active member of this room".into(),
        });
    }
    Ok(room)
}

fn sorted(mut utilities: Vec<Utility>) -> Vec<Utility> {
    utilities.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    utilities
}
