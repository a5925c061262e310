//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use provault_auth::token::validate_token;

use crate::domain::access::Actor;
use crate::domain::repository::UserRepository as _;
use crate::error::ApiError;
use crate::state::AppState;

/// Extract the bearer token from the `Authorization` header, validate it,
/// and resolve it to a live user row.
///
/// Returns 401 when the header is absent, the token fails validation, or
/// the user behind it no longer exists. The role comes from the row, not
/// the claims, so revoked admins lose access as soon as the row changes.
impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract the header synchronously, then do the DB lookup in a 'static
    // async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);
        let state = state.clone();

        async move {
            let token = token.ok_or(ApiError::InvalidToken)?;
            let info =
                validate_token(&token, &state.jwt_secret).map_err(|_| ApiError::InvalidToken)?;
            let user = state
                .user_repo()
                .find_by_id(info.user_id)
                .await?
                .ok_or(ApiError::InvalidToken)?;
            Ok(Actor {
                user_id: user.id,
                username: user.username,
                role: user.role,
            })
        }
    }
}
