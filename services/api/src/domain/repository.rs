#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use provault_domain::category::CategoryType;
use provault_domain::pagination::PageRequest;

use crate::domain::types::{
    Category, CategoryPatch, CustomField, CustomFieldPatch, EmailAccount, EmailListFilter,
    EmailPatch, EmailStats, Event, Profile, ProfileListFilter, ProfilePatch, ProfileWithCategory,
    Reminder, ReminderWithProfile, StalePendingProfile, Status, StatusPatch, User, UserPatch,
};
use crate::error::ApiError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn list(&self) -> Result<Vec<User>, ApiError>;
    /// Insert a user. A username collision maps to `UserAlreadyExists` from
    /// the store-level unique index.
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<(), ApiError>;
    /// Delete a user. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for profile categories.
pub trait CategoryRepository: Send + Sync {
    async fn list(&self, kind: Option<CategoryType>) -> Result<Vec<Category>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError>;
    async fn create(&self, category: &Category) -> Result<(), ApiError>;
    async fn update(&self, id: Uuid, patch: &CategoryPatch) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Number of profiles referencing the category.
    async fn profile_count(&self, id: Uuid) -> Result<u64, ApiError>;
}

/// Repository for custom field definitions.
pub trait CustomFieldRepository: Send + Sync {
    async fn list(
        &self,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<CustomField>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomField>, ApiError>;
    async fn create(&self, field: &CustomField) -> Result<(), ApiError>;
    async fn update(&self, id: Uuid, patch: &CustomFieldPatch) -> Result<(), ApiError>;
    async fn update_order(&self, id: Uuid, display_order: i32) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for status templates.
pub trait StatusRepository: Send + Sync {
    async fn list(&self, category_type: Option<CategoryType>) -> Result<Vec<Status>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Status>, ApiError>;
    async fn create(&self, status: &Status) -> Result<(), ApiError>;
    async fn update(&self, id: Uuid, patch: &StatusPatch) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Number of profiles of the status's category type carrying its name.
    async fn profiles_using(
        &self,
        name: &str,
        category_type: CategoryType,
    ) -> Result<u64, ApiError>;
}

/// Repository for the pooled email credentials.
pub trait EmailRepository: Send + Sync {
    /// Filtered page of emails plus the total row count for the filter.
    async fn list(
        &self,
        filter: &EmailListFilter,
        page: PageRequest,
    ) -> Result<(Vec<EmailAccount>, u64), ApiError>;
    async fn stats(&self) -> Result<EmailStats, ApiError>;
    /// The next email the allocator would claim, without claiming it.
    async fn find_first_free(&self) -> Result<Option<EmailAccount>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmailAccount>, ApiError>;
    async fn create(&self, email: &EmailAccount) -> Result<(), ApiError>;
    async fn update(&self, id: Uuid, patch: &EmailPatch) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Number of profiles holding the address as their assigned email.
    async fn profile_count(&self, address: &str) -> Result<u64, ApiError>;
}

/// Repository for profiles.
pub trait ProfileRepository: Send + Sync {
    /// List profiles joined with their category, newest first. `owner`
    /// scopes the listing to one user's rows.
    async fn list(
        &self,
        owner: Option<Uuid>,
        filter: &ProfileListFilter,
    ) -> Result<Vec<ProfileWithCategory>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError>;
    /// Insert a profile. With `claim_email`, atomically claim one free email
    /// in the same transaction and attach its address; a pool with no free
    /// rows leaves the profile unassigned. The returned profile carries the
    /// claimed address, if any.
    async fn create(&self, profile: &Profile, claim_email: bool) -> Result<Profile, ApiError>;
    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Pending profiles created at or before `older_than` with no
    /// verification reminder created at or after `reminded_since`.
    async fn find_stale_pending(
        &self,
        older_than: DateTime<Utc>,
        reminded_since: DateTime<Utc>,
    ) -> Result<Vec<StalePendingProfile>, ApiError>;
}

/// Repository for reminders.
pub trait ReminderRepository: Send + Sync {
    /// A user's reminders joined with their profile, newest first.
    async fn list(
        &self,
        user_id: Uuid,
        only_pending: bool,
    ) -> Result<Vec<ReminderWithProfile>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reminder>, ApiError>;
    /// Insert a reminder. A missing profile maps to `ProfileNotFound` from
    /// the store-level foreign key.
    async fn create(&self, reminder: &Reminder) -> Result<(), ApiError>;
    async fn dismiss(&self, id: Uuid) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Port for the real-time push channel. Fire-and-forget: delivery failures
/// never surface to callers.
pub trait NotifierPort: Send + Sync {
    async fn broadcast(&self, event: &Event);
    async fn notify_user(&self, user_id: Uuid, event: &Event);
}
