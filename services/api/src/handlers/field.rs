use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use provault_domain::category::CategoryType;
use provault_domain::field::FieldKind;

use crate::domain::access::{Action, Actor, Resource, permitted};
use crate::domain::types::CustomField;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::field::{
    CreateFieldInput, CreateFieldUseCase, DeleteFieldUseCase, ListFieldsUseCase, UpdateFieldInput,
    UpdateFieldOrderUseCase, UpdateFieldUseCase,
};

#[derive(Serialize)]
pub struct FieldResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub category_type: CategoryType,
    pub display_order: i32,
    pub is_required: bool,
    pub options: Option<Vec<String>>,
    pub description: Option<String>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CustomField> for FieldResponse {
    fn from(field: CustomField) -> Self {
        Self {
            id: field.id.to_string(),
            name: field.name,
            kind: field.kind,
            category_type: field.category_type,
            display_order: field.display_order,
            is_required: field.is_required,
            options: field.options,
            description: field.description,
            created_at: field.created_at,
        }
    }
}

// ── GET /fields ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FieldListQuery {
    pub category_type: Option<String>,
}

pub async fn list_fields(
    actor: Actor,
    State(state): State<AppState>,
    Query(query): Query<FieldListQuery>,
) -> Result<Json<Vec<FieldResponse>>, ApiError> {
    if !permitted(&actor, Action::List, Resource::CustomField) {
        return Err(ApiError::Forbidden);
    }
    let usecase = ListFieldsUseCase {
        fields: state.field_repo(),
    };
    let fields = usecase.execute(query.category_type).await?;
    Ok(Json(fields.into_iter().map(Into::into).collect()))
}

// ── POST /fields ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateFieldRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category_type: String,
    pub display_order: i32,
    #[serde(default)]
    pub is_required: bool,
    pub options: Option<Vec<String>>,
    pub description: Option<String>,
}

pub async fn create_field(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<CreateFieldRequest>,
) -> Result<(StatusCode, Json<FieldResponse>), ApiError> {
    if !permitted(&actor, Action::Create, Resource::CustomField) {
        return Err(ApiError::Forbidden);
    }
    let usecase = CreateFieldUseCase {
        fields: state.field_repo(),
    };
    let field = usecase
        .execute(CreateFieldInput {
            name: body.name,
            kind: body.kind,
            category_type: body.category_type,
            display_order: body.display_order,
            is_required: body.is_required,
            options: body.options,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(field.into())))
}

// ── PUT /fields/{id} ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateFieldRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub display_order: Option<i32>,
    pub is_required: Option<bool>,
    #[serde(default)]
    pub options: Option<Option<Vec<String>>>,
    #[serde(default)]
    pub description: Option<Option<String>>,
}

pub async fn update_field(
    actor: Actor,
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
    Json(body): Json<UpdateFieldRequest>,
) -> Result<Json<FieldResponse>, ApiError> {
    if !permitted(&actor, Action::Update, Resource::CustomField) {
        return Err(ApiError::Forbidden);
    }
    let usecase = UpdateFieldUseCase {
        fields: state.field_repo(),
    };
    let field = usecase
        .execute(
            field_id,
            UpdateFieldInput {
                name: body.name,
                kind: body.kind,
                display_order: body.display_order,
                is_required: body.is_required,
                options: body.options,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(field.into()))
}

// ── PUT /fields/{id}/order ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateFieldOrderRequest {
    pub display_order: i32,
}

pub async fn update_field_order(
    actor: Actor,
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
    Json(body): Json<UpdateFieldOrderRequest>,
) -> Result<StatusCode, ApiError> {
    if !permitted(&actor, Action::Update, Resource::CustomField) {
        return Err(ApiError::Forbidden);
    }
    let usecase = UpdateFieldOrderUseCase {
        fields: state.field_repo(),
    };
    usecase.execute(field_id, body.display_order).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /fields/{id} ──────────────────────────────────────────────────────

pub async fn delete_field(
    actor: Actor,
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !permitted(&actor, Action::Delete, Resource::CustomField) {
        return Err(ApiError::Forbidden);
    }
    let usecase = DeleteFieldUseCase {
        fields: state.field_repo(),
    };
    usecase.execute(field_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
