use chrono::Utc;
use rhub_domain::entity::{
    ChoreInstance, Distribution, Membership, MembershipState, Room, RoomState, Utility,
    UtilityStatus,
};
use rhub_domain::money::Money;
use rhub_domain::role::Role;
use rhub_store::Store;

fn sample_room(id: &str, code: &str, owner: &str) -> Room {
    Room {
        id: id.to_owned(),
        name: "Flat 12".to_owned(),
        address: "12 Main St".to_owned(),
        description: String::new(),
        code: code.to_owned(),
        created_by: owner.to_owned(),
        members: vec![Membership {
            id: format!("{id}-m1"),
            user_id: owner.to_owned(),
            room_id: id.to_owned(),
            display_name: owner.to_owned(),
            role: Role::HeadRoommate,
            state: MembershipState::Active,
            joined_at: Utc::now(),
        }],
        state: RoomState::Active,
        created_at: Utc::now(),
    }
}

#[test]
fn code_index_resolves_active_rooms() {
    let store = Store::new();
    store.write(|state| state.insert_room(sample_room("r1", "ABCD2345", "alice")));

    store.read(|state| {
        assert_eq!(state.room_id_by_code("ABCD2345").map(String::as_str), Some("r1"));
        assert!(state.code_in_use("ABCD2345"));
        assert!(!state.code_in_use("ZZZZ9999"));
        assert_eq!(state.active_membership_count("alice"), 1);
    });
}

#[test]
fn purge_room_cascades_to_every_collection() {
    let store = Store::new();
    store.write(|state| {
        state.insert_room(sample_room("r1", "ABCD2345", "alice"));
        state.insert_instance(ChoreInstance {
            id: "c1".to_owned(),
            room_id: "r1".to_owned(),
            chore_name: "Trash".to_owned(),
            due_at: Utc::now(),
        });
        state.insert_utility(Utility {
            id: "u1".to_owned(),
            room_id: "r1".to_owned(),
            name: "Internet".to_owned(),
            description: String::new(),
            price: Money::from_cents(4999),
            distribution: Distribution::EqualSplit,
            status: UtilityStatus::Pending,
            shares: Vec::new(),
            created_at: Utc::now(),
        });
    });

    let purged = store.write(|state| state.purge_room("r1"));
    assert!(purged);

    store.read(|state| {
        assert!(state.room("r1").is_none());
        assert!(!state.code_in_use("ABCD2345"));
        assert_eq!(state.instances_by_room("r1").count(), 0);
        assert_eq!(state.utilities_by_room("r1").count(), 0);
    });

    // Unknown rooms are reported, not panicked on.
    assert!(!store.write(|state| state.purge_room("r1")));
}

#[test]
fn clones_share_the_same_state() {
    let store = Store::new();
    let clone = store.clone();
    store.write(|state| state.insert_room(sample_room("r1", "ABCD2345", "alice")));
    assert_eq!(clone.read(|state| state.rooms().count()), 1);
}
