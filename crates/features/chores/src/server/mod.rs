//! REST surface of the chores slice.

use crate::error::ChoresError;
use crate::scheduler::{ChoreScheduler, ChoreSpec};
use crate::Chores;
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rhub_domain::constants::CHORES_TAG;
use rhub_domain::entity::{ChoreInstance, FrequencyUnit};
use rhub_kernel::server::{ApiState, CurrentActor, ErrorBody};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// One chore definition within a batch.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChoreSpecRequest {
    pub chore_name: String,
    pub frequency: u32,
    pub frequency_unit: FrequencyUnit,
    pub deadline: DateTime<Utc>,
}

/// Count of removed instances.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemovedResponse {
    pub removed: usize,
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_chores))
        .routes(routes!(list_room_chores))
        .routes(routes!(list_my_chores))
        .routes(routes!(remove_chore_type))
}

fn scheduler(state: &ApiState) -> Result<&ChoreScheduler, ChoresError> {
    state
        .try_get_slice::<Chores>()
        .map(|slice| &slice.scheduler)
        .map_err(|e| ChoresError::Internal { message: e.to_string().into() })
}

#[utoipa::path(
    post,
    path = "/chores/room/{room_id}",
    params(("room_id" = String, Path, description = "Room id")),
    request_body = Vec<ChoreSpecRequest>,
    responses(
        (status = OK, description = "Materialized instances for the whole batch", body = [ChoreInstance]),
        (status = BAD_REQUEST, description = "A spec failed validation; nothing was persisted", body = ErrorBody),
        (status = FORBIDDEN, description = "Caller is not a member", body = ErrorBody),
    ),
    tag = CHORES_TAG,
)]
async fn create_chores(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(room_id): Path<String>,
    Json(body): Json<Vec<ChoreSpecRequest>>,
) -> Result<Json<Vec<ChoreInstance>>, ChoresError> {
    let specs: Vec<ChoreSpec> = body
        .into_iter()
        .map(|spec| ChoreSpec {
            name: spec.chore_name,
            frequency: spec.frequency,
            unit: spec.frequency_unit,
            deadline: spec.deadline,
        })
        .collect();
    let created = scheduler(&state)?.define_batch(&room_id, actor.id(), &specs, Utc::now())?;
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/chores/room/{room_id}",
    params(("room_id" = String, Path, description = "Room id")),
    responses(
        (status = OK, description = "Instances of the room by due time", body = [ChoreInstance]),
        (status = FORBIDDEN, description = "Caller is not a member", body = ErrorBody),
    ),
    tag = CHORES_TAG,
)]
async fn list_room_chores(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<ChoreInstance>>, ChoresError> {
    Ok(Json(scheduler(&state)?.list_by_room(&room_id, actor.id())?))
}

#[utoipa::path(
    get,
    path = "/chores/user/me",
    responses((status = OK, description = "Instances across the caller's rooms", body = [ChoreInstance])),
    tag = CHORES_TAG,
)]
async fn list_my_chores(
    State(state): State<ApiState>,
    actor: CurrentActor,
) -> Result<Json<Vec<ChoreInstance>>, ChoresError> {
    Ok(Json(scheduler(&state)?.list_for_user(actor.id())))
}

#[utoipa::path(
    delete,
    path = "/chores/room/{room_id}/type/{chore_name}",
    params(
        ("room_id" = String, Path, description = "Room id"),
        ("chore_name" = String, Path, description = "Chore name"),
    ),
    responses(
        (status = OK, description = "Every instance of that name removed", body = RemovedResponse),
        (status = FORBIDDEN, description = "Caller is not a member", body = ErrorBody),
    ),
    tag = CHORES_TAG,
)]
async fn remove_chore_type(
    State(state): State<ApiState>,
    actor: CurrentActor,
    Path((room_id, chore_name)): Path<(String, String)>,
) -> Result<Json<RemovedResponse>, ChoresError> {
    let removed = scheduler(&state)?.remove_by_type(&room_id, actor.id(), &chore_name)?;
    Ok(Json(RemovedResponse { removed }))
}
