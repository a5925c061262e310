use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use provault_domain::email::EmailStatus;
use provault_domain::pagination::PageRequest;

use crate::domain::access::{Action, Actor, Resource, permitted};
use crate::domain::types::{EmailAccount, EmailStats};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::email::{
    AvailableEmailUseCase, BulkImportEmailsUseCase, CreateEmailInput, CreateEmailUseCase,
    DeleteEmailUseCase, EmailStatsUseCase, ListEmailsInput, ListEmailsUseCase, UpdateEmailInput,
    UpdateEmailUseCase,
};

#[derive(Serialize)]
pub struct EmailResponse {
    pub id: String,
    pub email: String,
    pub password: String,
    pub status: EmailStatus,
    pub notes: Option<String>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms_opt")]
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<EmailAccount> for EmailResponse {
    fn from(account: EmailAccount) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email,
            password: account.password,
            status: account.status,
            notes: account.notes,
            used_at: account.used_at,
            created_at: account.created_at,
        }
    }
}

// ── GET /emails ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EmailListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Serialize)]
pub struct PaginationResponse {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u64,
}

#[derive(Serialize)]
pub struct EmailListResponse {
    pub emails: Vec<EmailResponse>,
    pub pagination: PaginationResponse,
}

pub async fn list_emails(
    actor: Actor,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<EmailListResponse>, ApiError> {
    if !permitted(&actor, Action::List, Resource::EmailPool) {
        return Err(ApiError::Forbidden);
    }
    let query: EmailListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ApiError::MissingData)?
        .unwrap_or_default();

    let defaults = PageRequest::default();
    let usecase = ListEmailsUseCase {
        emails: state.email_repo(),
    };
    let page = usecase
        .execute(ListEmailsInput {
            status: query.status,
            search: query.search,
            page: PageRequest {
                per_page: query.per_page.unwrap_or(defaults.per_page),
                page: query.page.unwrap_or(defaults.page),
            },
        })
        .await?;

    Ok(Json(EmailListResponse {
        pagination: PaginationResponse {
            page: page.page.page,
            per_page: page.page.per_page,
            total: page.total,
            pages: page.page.page_count(page.total),
        },
        emails: page.emails.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /emails/stats ────────────────────────────────────────────────────────

pub async fn email_stats(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<EmailStats>, ApiError> {
    if !permitted(&actor, Action::List, Resource::EmailPool) {
        return Err(ApiError::Forbidden);
    }
    let usecase = EmailStatsUseCase {
        emails: state.email_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /emails/available ────────────────────────────────────────────────────

pub async fn available_email(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<EmailResponse>, ApiError> {
    if !permitted(&actor, Action::List, Resource::EmailPool) {
        return Err(ApiError::Forbidden);
    }
    let usecase = AvailableEmailUseCase {
        emails: state.email_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── POST /emails ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEmailRequest {
    pub email: String,
    pub password: String,
    pub notes: Option<String>,
}

pub async fn create_email(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<CreateEmailRequest>,
) -> Result<(StatusCode, Json<EmailResponse>), ApiError> {
    if !permitted(&actor, Action::Create, Resource::EmailPool) {
        return Err(ApiError::Forbidden);
    }
    let usecase = CreateEmailUseCase {
        emails: state.email_repo(),
    };
    let account = usecase
        .execute(CreateEmailInput {
            email: body.email,
            password: body.password,
            notes: body.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

// ── POST /emails/bulk ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BulkImportRequest {
    pub emails: Vec<CreateEmailRequest>,
}

#[derive(Serialize)]
pub struct BulkFailureResponse {
    pub email: String,
    pub error: &'static str,
}

#[derive(Serialize)]
pub struct BulkImportResponse {
    pub successful: Vec<EmailResponse>,
    pub failed: Vec<BulkFailureResponse>,
}

pub async fn bulk_import_emails(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<BulkImportRequest>,
) -> Result<(StatusCode, Json<BulkImportResponse>), ApiError> {
    if !permitted(&actor, Action::Create, Resource::EmailPool) {
        return Err(ApiError::Forbidden);
    }
    let usecase = BulkImportEmailsUseCase {
        emails: state.email_repo(),
    };
    let output = usecase
        .execute(
            body.emails
                .into_iter()
                .map(|item| CreateEmailInput {
                    email: item.email,
                    password: item.password,
                    notes: item.notes,
                })
                .collect(),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(BulkImportResponse {
            successful: output.successful.into_iter().map(Into::into).collect(),
            failed: output
                .failed
                .into_iter()
                .map(|f| BulkFailureResponse {
                    email: f.email,
                    error: f.reason,
                })
                .collect(),
        }),
    ))
}

// ── PUT /emails/{id} ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateEmailRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<Option<String>>,
}

pub async fn update_email(
    actor: Actor,
    State(state): State<AppState>,
    Path(email_id): Path<Uuid>,
    Json(body): Json<UpdateEmailRequest>,
) -> Result<Json<EmailResponse>, ApiError> {
    if !permitted(&actor, Action::Update, Resource::EmailPool) {
        return Err(ApiError::Forbidden);
    }
    let usecase = UpdateEmailUseCase {
        emails: state.email_repo(),
    };
    let account = usecase
        .execute(
            email_id,
            UpdateEmailInput {
                email: body.email,
                password: body.password,
                status: body.status,
                notes: body.notes,
            },
        )
        .await?;
    Ok(Json(account.into()))
}

// ── DELETE /emails/{id} ──────────────────────────────────────────────────────

pub async fn delete_email(
    actor: Actor,
    State(state): State<AppState>,
    Path(email_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !permitted(&actor, Action::Delete, Resource::EmailPool) {
        return Err(ApiError::Forbidden);
    }
    let usecase = DeleteEmailUseCase {
        emails: state.email_repo(),
    };
    usecase.execute(email_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
