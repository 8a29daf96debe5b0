use chrono::Utc;
use rhub_domain::entity::{Membership, MembershipState};
use rhub_domain::role::{AccessError, MemberAction, Role, authorize};

fn member(id: &str, role: Role) -> Membership {
    Membership {
        id: id.to_owned(),
        user_id: format!("user-{id}"),
        room_id: "room-1".to_owned(),
        display_name: id.to_owned(),
        role,
        state: MembershipState::Active,
        joined_at: Utc::now(),
    }
}

#[test]
fn rank_order_is_total_and_matches_ord() {
    let ranked = [Role::Guest, Role::Roommate, Role::Assistant, Role::HeadRoommate];
    for pair in ranked.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[0].rank() < pair[1].rank());
    }
}

#[test]
fn role_wire_names_are_screaming_snake() {
    assert_eq!(serde_json::to_value(Role::HeadRoommate).unwrap(), "HEAD_ROOMMATE");
    assert_eq!(serde_json::to_value(Role::Guest).unwrap(), "GUEST");
    let parsed: Role = serde_json::from_value(serde_json::json!("ASSISTANT")).unwrap();
    assert_eq!(parsed, Role::Assistant);
}

#[test]
fn self_targeted_actions_are_refused() {
    let head = member("a", Role::HeadRoommate);
    let err = authorize(&head, &head, MemberAction::Remove).unwrap_err();
    assert_eq!(err, AccessError::SelfAction);

    let err = authorize(&head, &head, MemberAction::ChangeRole(Role::Roommate)).unwrap_err();
    assert_eq!(err, AccessError::SelfAction);
}

#[test]
fn actor_must_strictly_outrank_target() {
    let assistant = member("a", Role::Assistant);
    let head = member("b", Role::HeadRoommate);
    let peer = member("c", Role::Assistant);
    let guest = member("d", Role::Guest);

    assert!(matches!(
        authorize(&assistant, &head, MemberAction::Remove),
        Err(AccessError::Outranked { .. })
    ));
    assert!(matches!(
        authorize(&assistant, &peer, MemberAction::Remove),
        Err(AccessError::Outranked { .. })
    ));
    assert!(authorize(&assistant, &guest, MemberAction::Remove).is_ok());
}

#[test]
fn granted_rank_must_stay_below_the_actor() {
    let head = member("a", Role::HeadRoommate);
    let assistant = member("b", Role::Assistant);
    let guest = member("c", Role::Guest);

    assert!(authorize(&head, &guest, MemberAction::ChangeRole(Role::Assistant)).is_ok());
    assert!(matches!(
        authorize(&assistant, &guest, MemberAction::ChangeRole(Role::Assistant)),
        Err(AccessError::GrantTooHigh { .. })
    ));
    assert!(matches!(
        authorize(&head, &guest, MemberAction::ChangeRole(Role::HeadRoommate)),
        Err(AccessError::GrantTooHigh { .. })
    ));
}
