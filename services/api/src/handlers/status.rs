use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use provault_domain::category::CategoryType;

use crate::domain::access::{Action, Actor, Resource, permitted};
use crate::domain::types::Status;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::status::{
    CreateStatusInput, CreateStatusUseCase, DeleteStatusUseCase, ListStatusesUseCase,
    UpdateStatusInput, UpdateStatusUseCase,
};

#[derive(Serialize)]
pub struct StatusResponse {
    pub id: String,
    pub name: String,
    pub category_type: CategoryType,
    pub color: String,
    pub icon: String,
    pub display_order: i32,
    pub description: Option<String>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Status> for StatusResponse {
    fn from(status: Status) -> Self {
        Self {
            id: status.id.to_string(),
            name: status.name,
            category_type: status.category_type,
            color: status.color,
            icon: status.icon,
            display_order: status.display_order,
            description: status.description,
            created_at: status.created_at,
        }
    }
}

// ── GET /statuses ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StatusListQuery {
    pub category_type: Option<String>,
}

pub async fn list_statuses(
    actor: Actor,
    State(state): State<AppState>,
    Query(query): Query<StatusListQuery>,
) -> Result<Json<Vec<StatusResponse>>, ApiError> {
    if !permitted(&actor, Action::List, Resource::Status) {
        return Err(ApiError::Forbidden);
    }
    let usecase = ListStatusesUseCase {
        statuses: state.status_repo(),
    };
    let statuses = usecase.execute(query.category_type).await?;
    Ok(Json(statuses.into_iter().map(Into::into).collect()))
}

// ── POST /statuses ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateStatusRequest {
    pub name: String,
    pub category_type: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    pub description: Option<String>,
}

pub async fn create_status(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<CreateStatusRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    if !permitted(&actor, Action::Create, Resource::Status) {
        return Err(ApiError::Forbidden);
    }
    let usecase = CreateStatusUseCase {
        statuses: state.status_repo(),
    };
    let status = usecase
        .execute(CreateStatusInput {
            name: body.name,
            category_type: body.category_type,
            color: body.color,
            icon: body.icon,
            display_order: body.display_order,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(status.into())))
}

// ── PUT /statuses/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    #[serde(default)]
    pub description: Option<Option<String>>,
}

pub async fn update_status(
    actor: Actor,
    State(state): State<AppState>,
    Path(status_id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    if !permitted(&actor, Action::Update, Resource::Status) {
        return Err(ApiError::Forbidden);
    }
    let usecase = UpdateStatusUseCase {
        statuses: state.status_repo(),
    };
    let status = usecase
        .execute(
            status_id,
            UpdateStatusInput {
                name: body.name,
                color: body.color,
                icon: body.icon,
                display_order: body.display_order,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(status.into()))
}

// ── DELETE /statuses/{id} ────────────────────────────────────────────────────

pub async fn delete_status(
    actor: Actor,
    State(state): State<AppState>,
    Path(status_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !permitted(&actor, Action::Delete, Resource::Status) {
        return Err(ApiError::Forbidden);
    }
    let usecase = DeleteStatusUseCase {
        statuses: state.status_repo(),
    };
    usecase.execute(status_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
