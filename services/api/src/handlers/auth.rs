use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use provault_domain::user::UserRole;

use crate::domain::access::Actor;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_exp: u64,
    pub user: UserResponse,
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(RegisterInput {
            username: body.username,
            password: body.password,
            role: body.role,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: output.token,
            token_exp: output.token_exp,
            user: output.user.into(),
        }),
    ))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(AuthResponse {
        token: output.token,
        token_exp: output.token_exp,
        user: output.user.into(),
    }))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

pub async fn me(actor: Actor) -> Json<MeResponse> {
    Json(MeResponse {
        id: actor.user_id.to_string(),
        username: actor.username,
        role: actor.role,
    })
}
