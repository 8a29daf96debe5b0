use chrono::{Duration, Utc};
use rhub_chores::{ChoreScheduler, ChoreSpec, ChoresError};
use rhub_domain::entity::FrequencyUnit;
use rhub_event_bus::EventBus;
use rhub_rooms::{RoomProfile, RoomRegistry};
use rhub_store::Store;

fn setup() -> (ChoreScheduler, RoomRegistry, Store) {
    let store = Store::new();
    let registry = RoomRegistry::new(store.clone(), EventBus::new());
    (ChoreScheduler::new(store.clone()), registry, store)
}

fn room_with_head(registry: &RoomRegistry) -> String {
    registry
        .create_room(
            "head",
            None,
            RoomProfile {
                name: "Flat".to_owned(),
                address: String::new(),
                description: String::new(),
            },
        )
        .unwrap()
        .id
}

fn spec(name: &str, frequency: u32, unit: FrequencyUnit, days_ahead: i64) -> ChoreSpec {
    ChoreSpec {
        name: name.to_owned(),
        frequency,
        unit,
        deadline: Utc::now() + Duration::days(days_ahead),
    }
}

#[test]
fn a_batch_materializes_instances_up_to_the_deadline() {
    let (scheduler, registry, _store) = setup();
    let room_id = room_with_head(&registry);

    let now = Utc::now();
    let created = scheduler
        .define_batch(
            &room_id,
            "head",
            &[ChoreSpec {
                name: "Trash".to_owned(),
                frequency: 1,
                unit: FrequencyUnit::Weekly,
                deadline: now + Duration::days(21),
            }],
            now,
        )
        .unwrap();

    assert_eq!(created.len(), 3);
    assert!(created.iter().all(|i| i.chore_name == "Trash"));
    assert!(created.windows(2).all(|w| w[0].due_at <= w[1].due_at));
}

#[test]
fn frequency_repeats_instances_per_boundary() {
    let (scheduler, registry, _store) = setup();
    let room_id = room_with_head(&registry);

    let now = Utc::now();
    let created = scheduler
        .define_batch(&room_id, "head", &[spec("Dishes", 2, FrequencyUnit::Weekly, 14)], now)
        .unwrap();

    // Two boundaries, two instances each.
    assert_eq!(created.len(), 4);
}

#[test]
fn an_invalid_spec_rejects_the_whole_batch() {
    let (scheduler, registry, store) = setup();
    let room_id = room_with_head(&registry);

    let now = Utc::now();
    let specs = [
        spec("Valid", 1, FrequencyUnit::Weekly, 30),
        ChoreSpec {
            name: "Expired".to_owned(),
            frequency: 1,
            unit: FrequencyUnit::Weekly,
            deadline: now - Duration::days(1),
        },
    ];

    let err = scheduler.define_batch(&room_id, "head", &specs, now).unwrap_err();
    assert!(matches!(err, ChoresError::Validation { .. }));

    // Nothing persisted for either spec.
    assert_eq!(store.read(|s| s.instances_by_room(&room_id).count()), 0);
}

#[test]
fn deadline_bounds_are_inclusive_at_the_horizon() {
    let (scheduler, registry, _store) = setup();
    let room_id = room_with_head(&registry);
    let now = Utc::now();

    // Exactly at the horizon: accepted.
    let at_horizon = ChoreSpec {
        name: "Windows".to_owned(),
        frequency: 1,
        unit: FrequencyUnit::Monthly,
        deadline: now + Duration::days(365),
    };
    scheduler.define_batch(&room_id, "head", &[at_horizon], now).unwrap();

    // One second past the horizon: rejected.
    let past_horizon = ChoreSpec {
        name: "Gutters".to_owned(),
        frequency: 1,
        unit: FrequencyUnit::Monthly,
        deadline: now + Duration::days(365) + Duration::seconds(1),
    };
    let err = scheduler.define_batch(&room_id, "head", &[past_horizon], now).unwrap_err();
    assert!(matches!(err, ChoresError::Validation { .. }));

    // A deadline equal to now is already in the past.
    let at_now = ChoreSpec {
        name: "Mirror".to_owned(),
        frequency: 1,
        unit: FrequencyUnit::Weekly,
        deadline: now,
    };
    let err = scheduler.define_batch(&room_id, "head", &[at_now], now).unwrap_err();
    assert!(matches!(err, ChoresError::Validation { .. }));

    let zero_frequency = ChoreSpec {
        name: "Floors".to_owned(),
        frequency: 0,
        unit: FrequencyUnit::Weekly,
        deadline: now + Duration::days(7),
    };
    let err = scheduler.define_batch(&room_id, "head", &[zero_frequency], now).unwrap_err();
    assert!(matches!(err, ChoresError::Validation { .. }));
}

#[test]
fn remove_by_type_only_touches_that_name() {
    let (scheduler, registry, _store) = setup();
    let room_id = room_with_head(&registry);
    let now = Utc::now();

    // 5 "Trash" instances and 2 "Mop" instances.
    scheduler
        .define_batch(
            &room_id,
            "head",
            &[spec("Trash", 1, FrequencyUnit::Weekly, 35), spec("Mop", 1, FrequencyUnit::Weekly, 14)],
            now,
        )
        .unwrap();

    let removed = scheduler.remove_by_type(&room_id, "head", "Trash").unwrap();
    assert_eq!(removed, 5);

    let remaining = scheduler.list_by_room(&room_id, "head").unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|i| i.chore_name == "Mop"));

    // Removing again finds nothing.
    assert_eq!(scheduler.remove_by_type(&room_id, "head", "Trash").unwrap(), 0);
}

#[test]
fn listings_are_gated_on_membership() {
    let (scheduler, registry, _store) = setup();
    let room_id = room_with_head(&registry);

    let err = scheduler.list_by_room(&room_id, "stranger").unwrap_err();
    assert!(matches!(err, ChoresError::Forbidden { .. }));

    let err = scheduler.define_batch(
        &room_id,
        "stranger",
        &[spec("Trash", 1, FrequencyUnit::Weekly, 7)],
        Utc::now(),
    );
    assert!(matches!(err, Err(ChoresError::Forbidden { .. })));
}

#[test]
fn user_listing_spans_all_their_rooms() {
    let (scheduler, registry, _store) = setup();
    let first = room_with_head(&registry);
    let second = registry
        .create_room(
            "head",
            None,
            RoomProfile {
                name: "Other".to_owned(),
                address: String::new(),
                description: String::new(),
            },
        )
        .unwrap();
    let now = Utc::now();

    scheduler
        .define_batch(&first, "head", &[spec("Trash", 1, FrequencyUnit::Weekly, 7)], now)
        .unwrap();
    scheduler
        .define_batch(&second.id, "head", &[spec("Mop", 1, FrequencyUnit::Weekly, 7)], now)
        .unwrap();

    let mine = scheduler.list_for_user("head");
    assert_eq!(mine.len(), 2);

    // A member of neither room sees nothing.
    assert!(scheduler.list_for_user("stranger").is_empty());
}
