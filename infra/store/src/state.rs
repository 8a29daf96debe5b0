//! The collections behind the store and their cross-collection operations.

use fxhash::FxHashMap;
use rhub_domain::entity::{ChoreInstance, ChoreTemplate, Room, Utility};
use tracing::debug;

/// All domain collections. Rooms own their memberships in join order; chores
/// and utilities are indexed by id and carry their room id.
#[derive(Debug, Default)]
pub struct CoreState {
    rooms: FxHashMap<String, Room>,
    /// Join-code index over active rooms.
    codes: FxHashMap<String, String>,
    templates: FxHashMap<String, ChoreTemplate>,
    instances: FxHashMap<String, ChoreInstance>,
    utilities: FxHashMap<String, Utility>,
}

impl CoreState {
    // --- Rooms & memberships ---

    #[must_use]
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Registers a new room and claims its join code.
    pub fn insert_room(&mut self, room: Room) {
        self.codes.insert(room.code.clone(), room.id.clone());
        self.rooms.insert(room.id.clone(), room);
    }

    /// Resolves a join code against active rooms.
    #[must_use]
    pub fn room_id_by_code(&self, code: &str) -> Option<&String> {
        self.codes.get(code)
    }

    #[must_use]
    pub fn code_in_use(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// Active rooms in which the user holds an active membership.
    pub fn rooms_of_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Room> {
        self.rooms.values().filter(move |r| r.is_active() && r.membership_of(user_id).is_some())
    }

    /// Active memberships the user holds across all rooms.
    #[must_use]
    pub fn active_membership_count(&self, user_id: &str) -> usize {
        self.rooms_of_user(user_id).count()
    }

    /// Removes a room and everything scoped to it: memberships, chore
    /// templates and instances, utilities, and the join-code reservation.
    ///
    /// Returns `false` when the room is unknown. Runs inside the caller's
    /// write section, so the cascade is atomic.
    pub fn purge_room(&mut self, room_id: &str) -> bool {
        let Some(room) = self.rooms.remove(room_id) else {
            return false;
        };
        self.codes.remove(&room.code);
        self.templates.retain(|_, t| t.room_id != room_id);
        let chores_removed = self.remove_instances(|i| i.room_id == room_id);
        let utilities_removed = self.utilities.len();
        self.utilities.retain(|_, u| u.room_id != room_id);
        let utilities_removed = utilities_removed - self.utilities.len();

        debug!(
            room = room_id,
            chores = chores_removed,
            utilities = utilities_removed,
            "Room purged with dependents"
        );
        true
    }

    // --- Chores ---

    pub fn insert_template(&mut self, template: ChoreTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn insert_instance(&mut self, instance: ChoreInstance) {
        self.instances.insert(instance.id.clone(), instance);
    }

    pub fn instances(&self) -> impl Iterator<Item = &ChoreInstance> {
        self.instances.values()
    }

    pub fn instances_by_room<'a>(
        &'a self,
        room_id: &'a str,
    ) -> impl Iterator<Item = &'a ChoreInstance> {
        self.instances.values().filter(move |i| i.room_id == room_id)
    }

    /// Deletes every instance matching the predicate; returns how many went.
    pub fn remove_instances(&mut self, mut gone: impl FnMut(&ChoreInstance) -> bool) -> usize {
        let before = self.instances.len();
        self.instances.retain(|_, i| !gone(i));
        before - self.instances.len()
    }

    /// Drops the templates of a chore name within a room.
    pub fn remove_templates(&mut self, room_id: &str, chore_name: &str) {
        self.templates.retain(|_, t| !(t.room_id == room_id && t.chore_name == chore_name));
    }

    // --- Utilities ---

    #[must_use]
    pub fn utility(&self, utility_id: &str) -> Option<&Utility> {
        self.utilities.get(utility_id)
    }

    pub fn utility_mut(&mut self, utility_id: &str) -> Option<&mut Utility> {
        self.utilities.get_mut(utility_id)
    }

    pub fn insert_utility(&mut self, utility: Utility) {
        self.utilities.insert(utility.id.clone(), utility);
    }

    pub fn utilities_by_room<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a Utility> {
        self.utilities.values().filter(move |u| u.room_id == room_id)
    }

    /// Deletes a utility together with its shares (held inline).
    pub fn remove_utility(&mut self, utility_id: &str) -> Option<Utility> {
        self.utilities.remove(utility_id)
    }
}
