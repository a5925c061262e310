use chrono::Utc;
use uuid::Uuid;

use provault_auth::password::{hash_password, verify_password};
use provault_auth::token::issue_token;
use provault_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, validate_password, validate_username};
use crate::error::ApiError;

/// Issued credentials plus the account they belong to.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub token: String,
    pub token_exp: u64,
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, ApiError> {
        if !validate_username(&input.username) {
            return Err(ApiError::InvalidUsername);
        }
        if !validate_password(&input.password) {
            return Err(ApiError::InvalidPassword);
        }
        let role = match input.role.as_deref() {
            None => UserRole::User,
            Some(v) => UserRole::from_str_value(v).ok_or(ApiError::InvalidRole)?,
        };

        let password_hash =
            hash_password(&input.password).map_err(|e| ApiError::Internal(e.into()))?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username.trim().to_owned(),
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let (token, token_exp) = issue_token(user.id, user.role, &self.jwt_secret)
            .map_err(|e| ApiError::Internal(e.into()))?;
        Ok(AuthOutput {
            user,
            token,
            token_exp,
        })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, ApiError> {
        let user = self
            .users
            .find_by_username(input.username.trim())
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        let (token, token_exp) = issue_token(user.id, user.role, &self.jwt_secret)
            .map_err(|e| ApiError::Internal(e.into()))?;
        Ok(AuthOutput {
            user,
            token,
            token_exp,
        })
    }
}
