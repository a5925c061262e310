use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use provault_domain::reminder::ReminderStatus;

use crate::domain::access::Actor;
use crate::domain::types::{Reminder, ReminderWithProfile};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::reminder::{
    CreateReminderInput, CreateReminderUseCase, DeleteReminderUseCase, DismissReminderUseCase,
    ListRemindersUseCase,
};

#[derive(Serialize)]
pub struct ReminderResponse {
    pub id: String,
    pub user_id: String,
    pub profile_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms_opt")]
    pub reminder_date: Option<chrono::DateTime<chrono::Utc>>,
    pub status: ReminderStatus,
    pub site_name: Option<String>,
    pub profile_status: Option<String>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReminderWithProfile> for ReminderResponse {
    fn from(row: ReminderWithProfile) -> Self {
        let mut response: Self = row.reminder.into();
        response.site_name = row.site_name;
        response.profile_status = row.profile_status;
        response
    }
}

impl From<Reminder> for ReminderResponse {
    fn from(reminder: Reminder) -> Self {
        Self {
            id: reminder.id.to_string(),
            user_id: reminder.user_id.to_string(),
            profile_id: reminder.profile_id.to_string(),
            kind: reminder.kind,
            message: reminder.message,
            reminder_date: reminder.reminder_date,
            status: reminder.status,
            site_name: None,
            profile_status: None,
            created_at: reminder.created_at,
        }
    }
}

// ── GET /reminders ───────────────────────────────────────────────────────────

pub async fn list_reminders(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReminderResponse>>, ApiError> {
    let usecase = ListRemindersUseCase {
        reminders: state.reminder_repo(),
    };
    let reminders = usecase.execute(actor.user_id, false).await?;
    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}

// ── GET /reminders/pending ───────────────────────────────────────────────────

pub async fn pending_reminders(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReminderResponse>>, ApiError> {
    let usecase = ListRemindersUseCase {
        reminders: state.reminder_repo(),
    };
    let reminders = usecase.execute(actor.user_id, true).await?;
    Ok(Json(reminders.into_iter().map(Into::into).collect()))
}

// ── POST /reminders ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateReminderRequest {
    pub profile_id: Uuid,
    pub message: String,
    pub reminder_date: chrono::DateTime<chrono::Utc>,
}

pub async fn create_reminder(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<ReminderResponse>), ApiError> {
    let usecase = CreateReminderUseCase {
        reminders: state.reminder_repo(),
    };
    let reminder = usecase
        .execute(
            actor.user_id,
            CreateReminderInput {
                profile_id: body.profile_id,
                message: body.message,
                reminder_date: body.reminder_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(reminder.into())))
}

// ── PUT /reminders/{id}/dismiss ──────────────────────────────────────────────

pub async fn dismiss_reminder(
    actor: Actor,
    State(state): State<AppState>,
    Path(reminder_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DismissReminderUseCase {
        reminders: state.reminder_repo(),
    };
    usecase.execute(&actor, reminder_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /reminders/{id} ───────────────────────────────────────────────────

pub async fn delete_reminder(
    actor: Actor,
    State(state): State<AppState>,
    Path(reminder_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteReminderUseCase {
        reminders: state.reminder_repo(),
    };
    usecase.execute(&actor, reminder_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
