use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::access::{Action, Actor, Resource, permitted};
use crate::error::ApiError;
use crate::handlers::auth::UserResponse;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, ListUsersUseCase, UpdateUserInput,
    UpdateUserUseCase,
};

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    if !permitted(&actor, Action::List, Resource::User) {
        return Err(ApiError::Forbidden);
    }
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
}

pub async fn create_user(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if !permitted(&actor, Action::Create, Resource::User) {
        return Err(ApiError::Forbidden);
    }
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            username: body.username,
            password: body.password,
            role: body.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

pub async fn update_user(
    actor: Actor,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if !permitted(&actor, Action::Update, Resource::User) {
        return Err(ApiError::Forbidden);
    }
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            user_id,
            UpdateUserInput {
                username: body.username,
                role: body.role,
                password: body.password,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    actor: Actor,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !permitted(&actor, Action::Delete, Resource::User) {
        return Err(ApiError::Forbidden);
    }
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(actor.user_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
