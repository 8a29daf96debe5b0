//! Shared domain constants: entity caps, scheduling horizon, id shapes, API tags.

/// Maximum number of active memberships a room may hold.
pub const MAX_ROOM_MEMBERS: usize = 6;
/// Maximum number of active memberships a user may hold across all rooms.
pub const MAX_USER_MEMBERSHIPS: usize = 3;
/// Chore deadlines must fall within this many days from the time of definition.
pub const CHORE_HORIZON_DAYS: i64 = 365;

/// Length of generated entity ids.
pub const ENTITY_ID_LEN: usize = 12;
/// Length of generated room join codes.
pub const ROOM_CODE_LEN: usize = 8;
/// Attempts at allocating a join code before giving up on the collision check.
pub const ROOM_CODE_ATTEMPTS: usize = 16;

/// OpenAPI tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// OpenAPI tag for room and membership endpoints.
pub const ROOMS_TAG: &str = "Rooms";
/// OpenAPI tag for chore endpoints.
pub const CHORES_TAG: &str = "Chores";
/// OpenAPI tag for utility endpoints.
pub const UTILITIES_TAG: &str = "Utilities";
