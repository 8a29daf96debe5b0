use rhub_domain::entity::{Distribution, UtilityStatus};
use rhub_domain::money::Money;
use rhub_event_bus::EventBus;
use rhub_rooms::{RoomProfile, RoomRegistry};
use rhub_store::Store;
use rhub_utilities::{UtilityError, UtilityLedger};

fn setup() -> (UtilityLedger, RoomRegistry) {
    let store = Store::new();
    let registry = RoomRegistry::new(store.clone(), EventBus::new());
    (UtilityLedger::new(store), registry)
}

fn room_with_members(registry: &RoomRegistry, extra: &[&str]) -> String {
    let room = registry
        .create_room(
            "head",
            None,
            RoomProfile {
                name: "Flat".to_owned(),
                address: String::new(),
                description: String::new(),
            },
        )
        .unwrap();
    for user in extra {
        registry.join_room(user, None, &room.code).unwrap();
    }
    room.id
}

#[test]
fn an_uneven_price_splits_without_leakage() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &["bob", "carol"]);

    let utility = ledger
        .create(
            &room_id,
            "head",
            "Internet",
            "Monthly fibre",
            Money::from_cents(10_000),
            Distribution::EqualSplit,
        )
        .unwrap();

    assert_eq!(utility.shares.len(), 3);
    let cents: Vec<i64> = utility.shares.iter().map(|s| s.amount.cents()).collect();
    assert_eq!(cents, vec![3334, 3333, 3333]);
    assert_eq!(cents.iter().sum::<i64>(), 10_000);

    // Earliest joined member absorbs the spare cent.
    assert_eq!(utility.shares[0].user_id, "head");
    assert_eq!(utility.status, UtilityStatus::Pending);
}

#[test]
fn creation_validates_price_and_name() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &[]);

    let err = ledger
        .create(&room_id, "head", "", "", Money::from_cents(100), Distribution::EqualSplit)
        .unwrap_err();
    assert!(matches!(err, UtilityError::Validation { .. }));

    let err = ledger
        .create(&room_id, "head", "Water", "", Money::from_cents(-1), Distribution::EqualSplit)
        .unwrap_err();
    assert!(matches!(err, UtilityError::Validation { .. }));

    let err = ledger
        .create("missing", "head", "Water", "", Money::from_cents(1), Distribution::EqualSplit)
        .unwrap_err();
    assert!(matches!(err, UtilityError::NotFound { .. }));

    let err = ledger
        .create(&room_id, "stranger", "Water", "", Money::from_cents(1), Distribution::EqualSplit)
        .unwrap_err();
    assert!(matches!(err, UtilityError::Forbidden { .. }));
}

#[test]
fn the_split_snapshot_ignores_later_joins() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &["bob"]);

    let utility = ledger
        .create(&room_id, "head", "Power", "", Money::from_cents(500), Distribution::EqualSplit)
        .unwrap();
    assert_eq!(utility.shares.len(), 2);

    let room = registry.room_for_member(&room_id, "head").unwrap();
    registry.join_room("late", None, &room.code).unwrap();

    let listed = ledger.list_by_room(&room_id, "head").unwrap();
    assert_eq!(listed[0].shares.len(), 2, "existing splits stay as created");
}

#[test]
fn member_listing_only_returns_their_shares() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &["bob"]);

    ledger
        .create(&room_id, "head", "Power", "", Money::from_cents(500), Distribution::EqualSplit)
        .unwrap();

    let room = registry.room_for_member(&room_id, "head").unwrap();
    registry.join_room("late", None, &room.code).unwrap();
    ledger
        .create(&room_id, "head", "Gas", "", Money::from_cents(900), Distribution::EqualSplit)
        .unwrap();

    let late_id = registry
        .room_for_member(&room_id, "late")
        .unwrap()
        .membership_of("late")
        .unwrap()
        .id
        .clone();

    let mine = ledger.list_for_member(&late_id, &room_id, "late").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Gas");
}

#[test]
fn removal_deletes_the_utility_and_its_shares() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &["bob"]);

    let utility = ledger
        .create(&room_id, "head", "Power", "", Money::from_cents(500), Distribution::EqualSplit)
        .unwrap();

    let err = ledger.remove(&utility.id, "stranger").unwrap_err();
    assert!(matches!(err, UtilityError::Forbidden { .. }));

    ledger.remove(&utility.id, "bob").unwrap();
    assert!(ledger.list_by_room(&room_id, "head").unwrap().is_empty());

    let err = ledger.remove(&utility.id, "head").unwrap_err();
    assert!(matches!(err, UtilityError::NotFound { .. }));
}

#[test]
fn payments_settle_shares_and_drive_the_status() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &["bob"]);

    let utility = ledger
        .create(&room_id, "head", "Power", "", Money::from_cents(1000), Distribution::EqualSplit)
        .unwrap();

    let room = registry.room_for_member(&room_id, "head").unwrap();
    let head_id = room.membership_of("head").unwrap().id.clone();
    let bob_id = room.membership_of("bob").unwrap().id.clone();

    // Bob settles his own share.
    let updated = ledger.record_payment(&utility.id, "bob", &bob_id, Money::from_cents(500)).unwrap();
    assert_eq!(updated.status, UtilityStatus::PartiallyPaid);

    // Bob cannot settle the head's share.
    let err = ledger
        .record_payment(&utility.id, "bob", &head_id, Money::from_cents(500))
        .unwrap_err();
    assert!(matches!(err, UtilityError::Forbidden { .. }));

    // The head can record for anyone; full settlement flips the status.
    let updated =
        ledger.record_payment(&utility.id, "head", &head_id, Money::from_cents(500)).unwrap();
    assert_eq!(updated.status, UtilityStatus::Paid);
}

#[test]
fn overpaying_a_share_is_rejected() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &[]);

    let utility = ledger
        .create(&room_id, "head", "Power", "", Money::from_cents(1000), Distribution::EqualSplit)
        .unwrap();
    let head_id = registry
        .room_for_member(&room_id, "head")
        .unwrap()
        .membership_of("head")
        .unwrap()
        .id
        .clone();

    let err = ledger
        .record_payment(&utility.id, "head", &head_id, Money::from_cents(1001))
        .unwrap_err();
    assert!(matches!(err, UtilityError::Validation { .. }));

    let err = ledger.record_payment(&utility.id, "head", &head_id, Money::ZERO).unwrap_err();
    assert!(matches!(err, UtilityError::Validation { .. }));
}

#[test]
fn balances_aggregate_across_utilities() {
    let (ledger, registry) = setup();
    let room_id = room_with_members(&registry, &["bob"]);

    ledger
        .create(&room_id, "head", "Power", "", Money::from_cents(1000), Distribution::EqualSplit)
        .unwrap();
    let gas = ledger
        .create(&room_id, "head", "Gas", "", Money::from_cents(501), Distribution::EqualSplit)
        .unwrap();

    let room = registry.room_for_member(&room_id, "head").unwrap();
    let bob_id = room.membership_of("bob").unwrap().id.clone();
    ledger.record_payment(&gas.id, "bob", &bob_id, Money::from_cents(250)).unwrap();

    let balances = ledger.balances(&room_id, "head").unwrap();
    assert_eq!(balances.len(), 2);

    // Join order: head first with the spare cent of the uneven gas bill.
    assert_eq!(balances[0].user_id, "head");
    assert_eq!(balances[0].owed, Money::from_cents(500 + 251));
    assert_eq!(balances[1].owed, Money::from_cents(500 + 250));
    assert_eq!(balances[1].paid, Money::from_cents(250));
    assert_eq!(balances[1].outstanding, Money::from_cents(500));

    let total_owed: i64 = balances.iter().map(|b| b.owed.cents()).sum();
    assert_eq!(total_owed, 1501);
}
