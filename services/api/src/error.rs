use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("field not found")]
    FieldNotFound,
    #[error("status not found")]
    StatusNotFound,
    #[error("email not found")]
    EmailNotFound,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("reminder not found")]
    ReminderNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("category already exists")]
    CategoryAlreadyExists,
    #[error("field already exists")]
    FieldAlreadyExists,
    #[error("status already exists")]
    StatusAlreadyExists,
    #[error("email already exists")]
    EmailAlreadyExists,
    #[error("category has profiles")]
    CategoryInUse,
    #[error("status is used by profiles")]
    StatusInUse,
    #[error("email is assigned to a profile")]
    EmailInUse,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid password")]
    InvalidPassword,
    #[error("invalid email address")]
    InvalidEmailAddress,
    #[error("invalid role")]
    InvalidRole,
    #[error("invalid category type")]
    InvalidCategoryType,
    #[error("invalid field kind")]
    InvalidFieldKind,
    #[error("invalid email status")]
    InvalidEmailStatus,
    #[error("invalid display order")]
    InvalidDisplayOrder,
    #[error("missing data")]
    MissingData,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("forbidden")]
    Forbidden,
    #[error("cannot delete own account")]
    OwnAccountDeletion,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::FieldNotFound => "FIELD_NOT_FOUND",
            Self::StatusNotFound => "STATUS_NOT_FOUND",
            Self::EmailNotFound => "EMAIL_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::ReminderNotFound => "REMINDER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::CategoryAlreadyExists => "CATEGORY_ALREADY_EXISTS",
            Self::FieldAlreadyExists => "FIELD_ALREADY_EXISTS",
            Self::StatusAlreadyExists => "STATUS_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::CategoryInUse => "CATEGORY_IN_USE",
            Self::StatusInUse => "STATUS_IN_USE",
            Self::EmailInUse => "EMAIL_IN_USE",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidEmailAddress => "INVALID_EMAIL_ADDRESS",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidCategoryType => "INVALID_CATEGORY_TYPE",
            Self::InvalidFieldKind => "INVALID_FIELD_KIND",
            Self::InvalidEmailStatus => "INVALID_EMAIL_STATUS",
            Self::InvalidDisplayOrder => "INVALID_DISPLAY_ORDER",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::OwnAccountDeletion => "OWN_ACCOUNT_DELETION",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::CategoryNotFound
            | Self::FieldNotFound
            | Self::StatusNotFound
            | Self::EmailNotFound
            | Self::ProfileNotFound
            | Self::ReminderNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists
            | Self::CategoryAlreadyExists
            | Self::FieldAlreadyExists
            | Self::StatusAlreadyExists
            | Self::EmailAlreadyExists
            | Self::CategoryInUse
            | Self::StatusInUse
            | Self::EmailInUse => StatusCode::CONFLICT,
            Self::InvalidUsername
            | Self::InvalidPassword
            | Self::InvalidEmailAddress
            | Self::InvalidRole
            | Self::InvalidCategoryType
            | Self::InvalidFieldKind
            | Self::InvalidEmailStatus
            | Self::InvalidDisplayOrder
            | Self::MissingData
            | Self::OwnAccountDeletion => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — the TraceLayer already records method/uri/status
        // for every request, and 4xx are expected client errors.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(
        error: ApiError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_profile_not_found() {
        assert_error(
            ApiError::ProfileNotFound,
            StatusCode::NOT_FOUND,
            "PROFILE_NOT_FOUND",
            "profile not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_category_already_exists() {
        assert_error(
            ApiError::CategoryAlreadyExists,
            StatusCode::CONFLICT,
            "CATEGORY_ALREADY_EXISTS",
            "category already exists",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_category_in_use() {
        assert_error(
            ApiError::CategoryInUse,
            StatusCode::CONFLICT,
            "CATEGORY_IN_USE",
            "category has profiles",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_credentials() {
        assert_error(
            ApiError::InvalidCredentials,
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "invalid credentials",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_forbidden() {
        assert_error(
            ApiError::Forbidden,
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "forbidden",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_own_account_deletion_as_bad_request() {
        assert_error(
            ApiError::OwnAccountDeletion,
            StatusCode::BAD_REQUEST,
            "OWN_ACCOUNT_DELETION",
            "cannot delete own account",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_internal() {
        assert_error(
            ApiError::Internal(anyhow::anyhow!("db error")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
    }
}
