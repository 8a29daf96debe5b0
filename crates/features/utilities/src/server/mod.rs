//! REST surface of the utilities slice.

use crate::error::UtilityError;
use crate::ledger::UtilityLedger;
use crate::Utilities;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rhub_domain::constants::UTILITIES_TAG;
use rhub_domain::entity::{Distribution, MemberBalance, Utility};
use rhub_domain::money::Money;
use rhub_kernel::server::{ApiState, CurrentActor, ErrorBody};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Utility creation request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUtilityRequest {
    pub utility_name: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = f64)]
    pub utility_price: Money,
    pub util_distribution_enum: Distribution,
    pub room_id: String,
}

/// Payment against a member's share
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecordPaymentRequest {
    pub member_id: String,
    #[schema(value_type = f64)]
    pub amount: Money,
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_utility))
        .routes(routes!(list_room_utilities))
        .routes(routes!(list_member_utilities))
        .routes(routes!(delete_utility))
        .routes(routes!(record_payment))
        .routes(routes!(room_balances))
}

fn ledger(state: &ApiState) -> Result<&UtilityLedger, UtilityError> {
    state
        .try_get_slice::<Utilities>()
        .map(|slice| &slice.ledger)
        .map_err(|e| UtilityError::Internal { message: e.to_string().into() })
}

#[utoipa::path(
    post,
    path = "/utility/create",
    request_body = CreateUtilityRequest,
    responses(
        (status = OK, description = "Utility with its split snapshot", body = Utility),
        (status = BAD_REQUEST, description = "Negative price or empty name", body = ErrorBody),
        (status = FORBIDDEN, description = "Caller is not a member", body = ErrorBody),
    ),
    tag = UTILITIES_TAG,
)]
async fn create_utility(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Json(body): Json<CreateUtilityRequest>,
) -> Result<Json<Utility>, UtilityError> {
    let utility = ledger(&state)?.create(
        &body.room_id,
        actor.id(),
        &body.utility_name,
        &body.description,
        body.utility_price,
        body.util_distribution_enum,
    )?;
    Ok(Json(utility))
}

#[utoipa::path(
    get,
    path = "/utility/room/{room_id}",
    params(("room_id" = String, Path, description = "Room id")),
    responses(
        (status = OK, description = "Utilities of the room", body = [Utility]),
        (status = FORBIDDEN, description = "Caller is not a member", body = ErrorBody),
    ),
    tag = UTILITIES_TAG,
)]
async fn list_room_utilities(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<Utility>>, UtilityError> {
    Ok(Json(ledger(&state)?.list_by_room(&room_id, actor.id())?))
}

#[utoipa::path(
    get,
    path = "/utility/{member_id}/room/{room_id}",
    params(
        ("member_id" = String, Path, description = "Membership id"),
        ("room_id" = String, Path, description = "Room id"),
    ),
    responses(
        (status = OK, description = "Utilities in which that member holds a share", body = [Utility]),
        (status = FORBIDDEN, description = "Caller is not a member", body = ErrorBody),
    ),
    tag = UTILITIES_TAG,
)]
async fn list_member_utilities(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path((member_id, room_id)): Path<(String, String)>,
) -> Result<Json<Vec<Utility>>, UtilityError> {
    Ok(Json(ledger(&state)?.list_for_member(&member_id, &room_id, actor.id())?))
}

#[utoipa::path(
    delete,
    path = "/utility/{utility_id}",
    params(("utility_id" = String, Path, description = "Utility id")),
    responses(
        (status = NO_CONTENT, description = "Utility and its shares deleted"),
        (status = NOT_FOUND, description = "Unknown utility", body = ErrorBody),
    ),
    tag = UTILITIES_TAG,
)]
async fn delete_utility(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(utility_id): Path<String>,
) -> Result<StatusCode, UtilityError> {
    ledger(&state)?.remove(&utility_id, actor.id())?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/utility/{utility_id}/payments",
    params(("utility_id" = String, Path, description = "Utility id")),
    request_body = RecordPaymentRequest,
    responses(
        (status = OK, description = "Utility with the updated share", body = Utility),
        (status = BAD_REQUEST, description = "Non-positive or overpaying amount", body = ErrorBody),
        (status = FORBIDDEN, description = "Not your share", body = ErrorBody),
    ),
    tag = UTILITIES_TAG,
)]
async fn record_payment(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(utility_id): Path<String>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<Json<Utility>, UtilityError> {
    let utility =
        ledger(&state)?.record_payment(&utility_id, actor.id(), &body.member_id, body.amount)?;
    Ok(Json(utility))
}

#[utoipa::path(
    get,
    path = "/utility/room/{room_id}/balances",
    params(("room_id" = String, Path, description = "Room id")),
    responses(
        (status = OK, description = "Per-member balances in join order", body = [MemberBalance]),
        (status = FORBIDDEN, description = "Caller is not a member", body = ErrorBody),
    ),
    tag = UTILITIES_TAG,
)]
async fn room_balances(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<MemberBalance>>, UtilityError> {
    Ok(Json(ledger(&state)?.balances(&room_id, actor.id())?))
}
