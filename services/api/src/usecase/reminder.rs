use chrono::{DateTime, Utc};
use uuid::Uuid;

use provault_domain::reminder::ReminderStatus;

use crate::domain::access::{Action, Actor, Resource, permitted};
use crate::domain::repository::ReminderRepository;
use crate::domain::types::{Reminder, ReminderWithProfile};
use crate::error::ApiError;

/// Kind written for user-created reminders; the sweep writes
/// [`provault_domain::reminder::VERIFICATION_KIND`].
const MANUAL_KIND: &str = "manual";

// ── ListReminders ────────────────────────────────────────────────────────────

pub struct ListRemindersUseCase<R: ReminderRepository> {
    pub reminders: R,
}

impl<R: ReminderRepository> ListRemindersUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        only_pending: bool,
    ) -> Result<Vec<ReminderWithProfile>, ApiError> {
        self.reminders.list(user_id, only_pending).await
    }
}

// ── CreateReminder ───────────────────────────────────────────────────────────

pub struct CreateReminderInput {
    pub profile_id: Uuid,
    pub message: String,
    pub reminder_date: DateTime<Utc>,
}

pub struct CreateReminderUseCase<R: ReminderRepository> {
    pub reminders: R,
}

impl<R: ReminderRepository> CreateReminderUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateReminderInput,
    ) -> Result<Reminder, ApiError> {
        if input.message.trim().is_empty() {
            return Err(ApiError::MissingData);
        }
        let reminder = Reminder {
            id: Uuid::now_v7(),
            user_id,
            profile_id: input.profile_id,
            kind: MANUAL_KIND.to_owned(),
            message: input.message,
            reminder_date: Some(input.reminder_date),
            status: ReminderStatus::Pending,
            created_at: Utc::now(),
        };
        self.reminders.create(&reminder).await?;
        Ok(reminder)
    }
}

// ── DismissReminder ──────────────────────────────────────────────────────────

pub struct DismissReminderUseCase<R: ReminderRepository> {
    pub reminders: R,
}

impl<R: ReminderRepository> DismissReminderUseCase<R> {
    pub async fn execute(&self, actor: &Actor, reminder_id: Uuid) -> Result<(), ApiError> {
        let reminder = self
            .reminders
            .find_by_id(reminder_id)
            .await?
            .ok_or(ApiError::ReminderNotFound)?;
        if !permitted(
            actor,
            Action::Update,
            Resource::Reminder {
                owner: reminder.user_id,
            },
        ) {
            return Err(ApiError::ReminderNotFound);
        }
        self.reminders.dismiss(reminder_id).await
    }
}

// ── DeleteReminder ───────────────────────────────────────────────────────────

pub struct DeleteReminderUseCase<R: ReminderRepository> {
    pub reminders: R,
}

impl<R: ReminderRepository> DeleteReminderUseCase<R> {
    pub async fn execute(&self, actor: &Actor, reminder_id: Uuid) -> Result<(), ApiError> {
        let reminder = self
            .reminders
            .find_by_id(reminder_id)
            .await?
            .ok_or(ApiError::ReminderNotFound)?;
        if !permitted(
            actor,
            Action::Delete,
            Resource::Reminder {
                owner: reminder.user_id,
            },
        ) {
            return Err(ApiError::ReminderNotFound);
        }
        if !self.reminders.delete(reminder_id).await? {
            return Err(ApiError::ReminderNotFound);
        }
        Ok(())
    }
}
