use rhub_domain::constants::{
    CHORE_HORIZON_DAYS, MAX_ROOM_MEMBERS, MAX_USER_MEMBERSHIPS, ROOM_CODE_LEN,
};

#[test]
fn caps_match_the_product_rules() {
    assert_eq!(MAX_ROOM_MEMBERS, 6);
    assert_eq!(MAX_USER_MEMBERSHIPS, 3);
    assert_eq!(CHORE_HORIZON_DAYS, 365);
    assert_eq!(ROOM_CODE_LEN, 8);
}
