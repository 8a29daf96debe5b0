//! Room and membership lifecycle, serialized through the store's exclusive
//! write section so the count caps and the single-head invariant hold under
//! concurrent requests.

use crate::error::RoomsError;
use crate::invite::InviteRequested;
use chrono::Utc;
use rhub_domain::constants::{
    MAX_ROOM_MEMBERS, MAX_USER_MEMBERSHIPS, ROOM_CODE_ATTEMPTS, ROOM_CODE_LEN,
};
use rhub_domain::entity::{Membership, MembershipState, Room, RoomState};
use rhub_domain::role::{MemberAction, Role, authorize};
use rhub_event_bus::EventBus;
use rhub_kernel::safe_nanoid;
use rhub_store::{CoreState, Store};
use tracing::{info, warn};

/// Inputs for creating a room.
#[derive(Debug, Clone)]
pub struct RoomProfile {
    pub name: String,
    pub address: String,
    pub description: String,
}

/// Owns every mutation of rooms and memberships.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    store: Store,
    events: EventBus,
}

impl RoomRegistry {
    #[must_use]
    pub fn new(store: Store, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Creates a room with the caller as its head roommate.
    ///
    /// # Errors
    /// `Validation` for an empty name, `LimitExceeded` when the caller already
    /// holds the maximum number of active memberships, `Internal` when no
    /// unused join code could be allocated.
    pub fn create_room(
        &self,
        owner_id: &str,
        display_name: Option<String>,
        profile: RoomProfile,
    ) -> Result<Room, RoomsError> {
        if profile.name.trim().is_empty() {
            return Err(RoomsError::Validation { message: "room name must not be empty".into() });
        }

        self.store.write(|state| {
            if state.active_membership_count(owner_id) >= MAX_USER_MEMBERSHIPS {
                return Err(RoomsError::LimitExceeded {
                    message: format!("a user may belong to at most {MAX_USER_MEMBERSHIPS} rooms")
                        .into(),
                });
            }

            let code = allocate_code(state)?;
            let room_id = safe_nanoid!();
            let now = Utc::now();
            let room = Room {
                id: room_id.clone(),
                name: profile.name.trim().to_owned(),
                address: profile.address,
                description: profile.description,
                code,
                created_by: owner_id.to_owned(),
                members: vec![Membership {
                    id: safe_nanoid!(),
                    user_id: owner_id.to_owned(),
                    room_id,
                    display_name: display_name.unwrap_or_else(|| owner_id.to_owned()),
                    role: Role::HeadRoommate,
                    state: MembershipState::Active,
                    joined_at: now,
                }],
                state: RoomState::Active,
                created_at: now,
            };

            state.insert_room(room.clone());
            info!(room = %room.id, owner = owner_id, "Room created");
            Ok(room)
        })
    }

    /// Joins a room by its code, as a guest.
    ///
    /// # Errors
    /// `NotFound` for an unknown code, `Conflict` for an existing active
    /// membership, `LimitExceeded` when the room or the caller is at capacity.
    pub fn join_room(
        &self,
        user_id: &str,
        display_name: Option<String>,
        code: &str,
    ) -> Result<Room, RoomsError> {
        self.store.write(|state| {
            let room_id = state
                .room_id_by_code(code.trim())
                .cloned()
                .ok_or(RoomsError::NotFound { message: "no room with that code".into() })?;

            {
                let room = state
                    .room(&room_id)
                    .ok_or(RoomsError::Internal { message: "code index out of sync".into() })?;
                if room.membership_of(user_id).is_some() {
                    return Err(RoomsError::Conflict {
                        message: "already an active member of this room".into(),
                    });
                }
                if room.active_member_count() >= MAX_ROOM_MEMBERS {
                    return Err(RoomsError::LimitExceeded {
                        message: format!("room is full ({MAX_ROOM_MEMBERS} members)").into(),
                    });
                }
            }
            if state.active_membership_count(user_id) >= MAX_USER_MEMBERSHIPS {
                return Err(RoomsError::LimitExceeded {
                    message: format!("a user may belong to at most {MAX_USER_MEMBERSHIPS} rooms")
                        .into(),
                });
            }

            let room = state
                .room_mut(&room_id)
                .ok_or(RoomsError::Internal { message: "code index out of sync".into() })?;
            room.members.push(Membership {
                id: safe_nanoid!(),
                user_id: user_id.to_owned(),
                room_id: room_id.clone(),
                display_name: display_name.unwrap_or_else(|| user_id.to_owned()),
                role: Role::Guest,
                state: MembershipState::Active,
                joined_at: Utc::now(),
            });
            info!(room = %room_id, user = user_id, "Member joined");
            Ok(room.clone())
        })
    }

    /// Active rooms the user belongs to.
    #[must_use]
    pub fn rooms_for(&self, user_id: &str) -> Vec<Room> {
        self.store.read(|state| state.rooms_of_user(user_id).cloned().collect())
    }

    /// A single active room, requiring the caller to be an active member.
    ///
    /// # Errors
    /// `NotFound` for unknown rooms, `Forbidden` for non-members.
    pub fn room_for_member(&self, room_id: &str, user_id: &str) -> Result<Room, RoomsError> {
        self.store.read(|state| {
            let room = active_room(state, room_id)?;
            if room.membership_of(user_id).is_none() {
                return Err(RoomsError::Forbidden {
                    message: "not an active member of this room".into(),
                });
            }
            Ok(room.clone())
        })
    }

    /// Deletes a room and everything scoped to it.
    ///
    /// # Errors
    /// `NotFound` for unknown rooms, `Forbidden` unless the caller is the
    /// head roommate.
    pub fn delete_room(&self, room_id: &str, actor_id: &str) -> Result<(), RoomsError> {
        self.store.write(|state| {
            let room = active_room(state, room_id)?;
            let actor = room.membership_of(actor_id).ok_or(RoomsError::Forbidden {
                message: "not an active member of this room".into(),
            })?;
            if actor.role != Role::HeadRoommate {
                return Err(RoomsError::Forbidden {
                    message: "only the head roommate may delete the room".into(),
                });
            }

            state.purge_room(room_id);
            info!(room = room_id, actor = actor_id, "Room deleted");
            Ok(())
        })
    }

    /// Marks the caller's membership as left.
    ///
    /// The head roommate must transfer headship first while other members
    /// remain; the last member leaving deletes the room.
    ///
    /// # Errors
    /// `NotFound` without an active membership, `Forbidden` for the sole head
    /// of a room that still has other members.
    pub fn leave_room(&self, room_id: &str, actor_id: &str) -> Result<(), RoomsError> {
        self.store.write(|state| {
            let room = active_room(state, room_id)?;
            let actor = room.membership_of(actor_id).ok_or(RoomsError::NotFound {
                message: "no active membership in this room".into(),
            })?;
            let remaining = room.active_member_count() - 1;
            if actor.role == Role::HeadRoommate && remaining > 0 {
                return Err(RoomsError::Forbidden {
                    message: "transfer headship before leaving the room".into(),
                });
            }

            if remaining == 0 {
                // Nobody left to coordinate; the room goes with its last member.
                state.purge_room(room_id);
                info!(room = room_id, user = actor_id, "Last member left; room deleted");
                return Ok(());
            }

            mark_membership(state, room_id, actor_id, MembershipState::Left)?;
            info!(room = room_id, user = actor_id, "Member left");
            Ok(())
        })
    }

    /// Assigns a member a new role; assigning `HEAD_ROOMMATE` is an explicit
    /// headship transfer that demotes the current head to roommate.
    ///
    /// # Errors
    /// `NotFound` for unknown rooms/members, `Forbidden` on any rank or
    /// self-action violation.
    pub fn change_role(
        &self,
        room_id: &str,
        actor_id: &str,
        member_id: &str,
        new_role: Role,
    ) -> Result<Membership, RoomsError> {
        self.store.write(|state| {
            let room = active_room(state, room_id)?;
            let actor = room
                .membership_of(actor_id)
                .ok_or(RoomsError::Forbidden {
                    message: "not an active member of this room".into(),
                })?
                .clone();
            let target = room
                .member(member_id)
                .filter(|m| m.is_active())
                .ok_or(RoomsError::NotFound { message: "no such active member".into() })?
                .clone();

            if new_role == Role::HeadRoommate {
                // Headship transfer: only the current head may hand it over.
                if actor.role != Role::HeadRoommate || actor.id == target.id {
                    return Err(RoomsError::Forbidden {
                        message: "only the head roommate may transfer headship".into(),
                    });
                }
                let room = state
                    .room_mut(room_id)
                    .ok_or(RoomsError::Internal { message: "room vanished mid-write".into() })?;
                for member in &mut room.members {
                    if member.id == actor.id {
                        member.role = Role::Roommate;
                    } else if member.id == target.id {
                        member.role = Role::HeadRoommate;
                    }
                }
                info!(room = room_id, from = %actor.id, to = %target.id, "Headship transferred");
                return room
                    .member(member_id)
                    .cloned()
                    .ok_or(RoomsError::Internal { message: "member vanished mid-write".into() });
            }

            authorize(&actor, &target, MemberAction::ChangeRole(new_role))?;

            let room = state
                .room_mut(room_id)
                .ok_or(RoomsError::Internal { message: "room vanished mid-write".into() })?;
            let member = room
                .members
                .iter_mut()
                .find(|m| m.id == member_id)
                .ok_or(RoomsError::Internal { message: "member vanished mid-write".into() })?;
            member.role = new_role;
            info!(room = room_id, member = member_id, role = %new_role, "Role changed");
            Ok(member.clone())
        })
    }

    /// Ends another member's membership.
    ///
    /// # Errors
    /// `NotFound` for unknown rooms/members, `Forbidden` on rank or
    /// self-action violations.
    pub fn remove_member(
        &self,
        room_id: &str,
        actor_id: &str,
        member_id: &str,
    ) -> Result<(), RoomsError> {
        self.store.write(|state| {
            let room = active_room(state, room_id)?;
            let actor = room
                .membership_of(actor_id)
                .ok_or(RoomsError::Forbidden {
                    message: "not an active member of this room".into(),
                })?
                .clone();
            let target = room
                .member(member_id)
                .filter(|m| m.is_active())
                .ok_or(RoomsError::NotFound { message: "no such active member".into() })?
                .clone();

            authorize(&actor, &target, MemberAction::Remove)?;

            mark_membership(state, room_id, &target.user_id, MembershipState::Removed)?;
            info!(room = room_id, member = member_id, actor = actor_id, "Member removed");
            Ok(())
        })
    }

    /// Gates an invitation and hands it to the background delivery worker.
    ///
    /// Delivery is an external concern: a full queue is logged, never
    /// surfaced, and the authorizing operation still succeeds.
    ///
    /// # Errors
    /// `Validation` for an implausible email, `NotFound`/`Forbidden` for
    /// unknown rooms or insufficient rank.
    pub fn invite(&self, room_id: &str, actor_id: &str, email: &str) -> Result<(), RoomsError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(RoomsError::Validation { message: "invalid email address".into() });
        }

        let invite = self.store.read(|state| {
            let room = active_room(state, room_id)?;
            let actor = room.membership_of(actor_id).ok_or(RoomsError::Forbidden {
                message: "not an active member of this room".into(),
            })?;
            if actor.role.rank() < Role::Assistant.rank() {
                return Err(RoomsError::Forbidden {
                    message: "inviting requires at least the assistant role".into(),
                });
            }
            Ok(InviteRequested {
                room_id: room.id.clone(),
                room_name: room.name.clone(),
                email: email.to_owned(),
                invited_by: actor.id.clone(),
            })
        })?;

        info!(room = room_id, email, actor = actor_id, "Invite recorded");
        if let Err(err) = self.events.publish_mpsc(invite) {
            warn!(error = %err, "Invite queue unavailable; delivery skipped");
        }
        Ok(())
    }
}

fn active_room<'a>(state: &'a CoreState, room_id: &str) -> Result<&'a Room, RoomsError> {
    state
        .room(room_id)
        .filter(|r| r.is_active())
        .ok_or(RoomsError::NotFound { message: "no such room".into() })
}

fn mark_membership(
    state: &mut CoreState,
    room_id: &str,
    user_id: &str,
    end_state: MembershipState,
) -> Result<(), RoomsError> {
    let room = state
        .room_mut(room_id)
        .ok_or(RoomsError::Internal { message: "room vanished mid-write".into() })?;
    let member = room
        .members
        .iter_mut()
        .find(|m| m.is_active() && m.user_id == user_id)
        .ok_or(RoomsError::Internal { message: "membership vanished mid-write".into() })?;
    member.state = end_state;
    Ok(())
}

fn allocate_code(state: &CoreState) -> Result<String, RoomsError> {
    for _ in 0..ROOM_CODE_ATTEMPTS {
        let code = safe_nanoid!(ROOM_CODE_LEN);
        if !state.code_in_use(&code) {
            return Ok(code);
        }
    }
    Err(RoomsError::Internal { message: "could not allocate an unused room code".into() })
}
