//! JWT access-token issue and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use provault_domain::user::UserRole;

/// Access-token lifetime in seconds (24 hours).
pub const ACCESS_TOKEN_EXP: u64 = 24 * 60 * 60;

/// Errors returned by token issue/validation.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token encoding failed")]
    Encoding,
}

/// JWT claims payload.
///
/// `sub` is the user ID as a UUID string, `role` the stored role string
/// (`"user"` | `"admin"`), `exp` seconds since the UNIX epoch.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: UserRole,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a signed access token for the given identity. Returns the token
/// and its expiry timestamp.
pub fn issue_token(user_id: Uuid, role: UserRole, secret: &str) -> Result<(String, u64), TokenError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = TokenClaims {
        sub: user_id.to_string(),
        role: role.as_str().to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Encoding)?;
    Ok((token, exp))
}

/// Decode and validate a bearer token, returning the parsed identity.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`.
/// Default leeway = 60s tolerates minor clock skew.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    let role = UserRole::from_str_value(&data.claims.role).ok_or(TokenError::Malformed)?;

    Ok(TokenInfo {
        user_id,
        role,
        exp: data.claims.exp,
    })
}
