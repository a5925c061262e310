use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use provault_domain::category::CategoryType;

use crate::domain::access::{Action, Actor, Resource, permitted};
use crate::domain::types::Category;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::category::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryInput, UpdateCategoryUseCase,
};

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub description: Option<String>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            kind: category.kind,
            description: category.description,
            created_at: category.created_at,
        }
    }
}

// ── GET /categories ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CategoryListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub async fn list_categories(
    actor: Actor,
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    if !permitted(&actor, Action::List, Resource::Category) {
        return Err(ApiError::Forbidden);
    }
    let usecase = ListCategoriesUseCase {
        categories: state.category_repo(),
    };
    let categories = usecase.execute(query.kind).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

// ── POST /categories ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
}

pub async fn create_category(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    if !permitted(&actor, Action::Create, Resource::Category) {
        return Err(ApiError::Forbidden);
    }
    let usecase = CreateCategoryUseCase {
        categories: state.category_repo(),
    };
    let category = usecase
        .execute(CreateCategoryInput {
            name: body.name,
            kind: body.kind,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

// ── PUT /categories/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
}

pub async fn update_category(
    actor: Actor,
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    if !permitted(&actor, Action::Update, Resource::Category) {
        return Err(ApiError::Forbidden);
    }
    let usecase = UpdateCategoryUseCase {
        categories: state.category_repo(),
    };
    let category = usecase
        .execute(
            category_id,
            UpdateCategoryInput {
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(category.into()))
}

// ── DELETE /categories/{id} ──────────────────────────────────────────────────

pub async fn delete_category(
    actor: Actor,
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !permitted(&actor, Action::Delete, Resource::Category) {
        return Err(ApiError::Forbidden);
    }
    let usecase = DeleteCategoryUseCase {
        categories: state.category_repo(),
    };
    usecase.execute(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
