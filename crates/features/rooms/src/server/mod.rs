//! REST surface of the rooms slice.

use crate::error::RoomsError;
use crate::registry::{RoomProfile, RoomRegistry};
use crate::Rooms;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rhub_domain::constants::ROOMS_TAG;
use rhub_domain::entity::{Membership, Room};
use rhub_domain::role::Role;
use rhub_kernel::server::{ApiState, CurrentActor, ErrorBody};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Create room request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    /// Name shown to other members; defaults to the actor id.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Join room request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JoinRoomRequest {
    pub code: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Role change request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

/// Invitation request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InviteRequest {
    pub email: String,
    pub room_id: String,
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_room))
        .routes(routes!(join_room))
        .routes(routes!(list_rooms))
        .routes(routes!(delete_room))
        .routes(routes!(change_role))
        .routes(routes!(remove_member))
        .routes(routes!(leave_room))
        .routes(routes!(invite_member))
}

fn registry(state: &ApiState) -> Result<&RoomRegistry, RoomsError> {
    state
        .try_get_slice::<Rooms>()
        .map(|slice| &slice.registry)
        .map_err(|e| RoomsError::Internal { message: e.to_string().into() })
}

#[utoipa::path(
    post,
    path = "/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = OK, description = "Room created with the caller as head roommate", body = Room),
        (status = UNPROCESSABLE_ENTITY, description = "Caller is at the membership cap", body = ErrorBody),
    ),
    tag = ROOMS_TAG,
)]
async fn create_room(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Json(body): Json<CreateRoomRequest>,
) -> Result<Json<Room>, RoomsError> {
    let profile = RoomProfile {
        name: body.name,
        address: body.address,
        description: body.description,
    };
    let room = registry(&state)?.create_room(actor.id(), body.display_name, profile)?;
    Ok(Json(room))
}

#[utoipa::path(
    post,
    path = "/rooms/join",
    request_body = JoinRoomRequest,
    responses(
        (status = OK, description = "Joined the room as a guest", body = Room),
        (status = NOT_FOUND, description = "Unknown join code", body = ErrorBody),
        (status = CONFLICT, description = "Already a member", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Room or caller at capacity", body = ErrorBody),
    ),
    tag = ROOMS_TAG,
)]
async fn join_room(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Json(body): Json<JoinRoomRequest>,
) -> Result<Json<Room>, RoomsError> {
    let room = registry(&state)?.join_room(actor.id(), body.display_name, &body.code)?;
    Ok(Json(room))
}

#[utoipa::path(
    get,
    path = "/rooms",
    responses((status = OK, description = "Active rooms of the caller", body = [Room])),
    tag = ROOMS_TAG,
)]
async fn list_rooms(
    State(state): State<ApiState>,
    actor: CurrentActor,
) -> Result<Json<Vec<Room>>, RoomsError> {
    Ok(Json(registry(&state)?.rooms_for(actor.id())))
}

#[utoipa::path(
    delete,
    path = "/rooms/{room_id}",
    params(("room_id" = String, Path, description = "Room id")),
    responses(
        (status = NO_CONTENT, description = "Room and all dependents deleted"),
        (status = FORBIDDEN, description = "Caller is not the head roommate", body = ErrorBody),
    ),
    tag = ROOMS_TAG,
)]
async fn delete_room(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(room_id): Path<String>,
) -> Result<StatusCode, RoomsError> {
    registry(&state)?.delete_room(&room_id, actor.id())?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/rooms/{room_id}/members/{member_id}/role",
    params(
        ("room_id" = String, Path, description = "Room id"),
        ("member_id" = String, Path, description = "Membership id"),
    ),
    request_body = ChangeRoleRequest,
    responses(
        (status = OK, description = "Updated membership", body = Membership),
        (status = FORBIDDEN, description = "Rank or self-action violation", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown member", body = ErrorBody),
    ),
    tag = ROOMS_TAG,
)]
async fn change_role(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path((room_id, member_id)): Path<(String, String)>,
    Json(body): Json<ChangeRoleRequest>,
) -> Result<Json<Membership>, RoomsError> {
    let membership = registry(&state)?.change_role(&room_id, actor.id(), &member_id, body.role)?;
    Ok(Json(membership))
}

#[utoipa::path(
    delete,
    path = "/rooms/{room_id}/members/{member_id}",
    params(
        ("room_id" = String, Path, description = "Room id"),
        ("member_id" = String, Path, description = "Membership id"),
    ),
    responses(
        (status = NO_CONTENT, description = "Membership ended"),
        (status = FORBIDDEN, description = "Rank or self-action violation", body = ErrorBody),
    ),
    tag = ROOMS_TAG,
)]
async fn remove_member(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path((room_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, RoomsError> {
    registry(&state)?.remove_member(&room_id, actor.id(), &member_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/rooms/{room_id}/leave",
    params(("room_id" = String, Path, description = "Room id")),
    responses(
        (status = NO_CONTENT, description = "Left the room"),
        (status = FORBIDDEN, description = "Headship must be transferred first", body = ErrorBody),
    ),
    tag = ROOMS_TAG,
)]
async fn leave_room(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(room_id): Path<String>,
) -> Result<StatusCode, RoomsError> {
    registry(&state)?.leave_room(&room_id, actor.id())?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/rooms/invite",
    request_body = InviteRequest,
    responses(
        (status = ACCEPTED, description = "Invite queued for delivery"),
        (status = FORBIDDEN, description = "Requires at least the assistant role", body = ErrorBody),
    ),
    tag = ROOMS_TAG,
)]
async fn invite_member(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Json(body): Json<InviteRequest>,
) -> Result<StatusCode, RoomsError> {
    registry(&state)?.invite(&body.room_id, actor.id(), &body.email)?;
    Ok(StatusCode::ACCEPTED)
}
