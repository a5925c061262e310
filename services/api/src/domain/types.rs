use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use provault_domain::category::CategoryType;
use provault_domain::email::EmailStatus;
use provault_domain::field::FieldKind;
use provault_domain::reminder::ReminderStatus;
use provault_domain::user::UserRole;

/// Account record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a user. `password_hash` is already hashed by the
/// usecase.
#[derive(Debug, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub role: Option<UserRole>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.role.is_none() && self.password_hash.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: CategoryType,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CustomField {
    pub id: Uuid,
    pub name: String,
    pub kind: FieldKind,
    pub category_type: CategoryType,
    pub display_order: i32,
    pub is_required: bool,
    pub options: Option<Vec<String>>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct CustomFieldPatch {
    pub name: Option<String>,
    pub kind: Option<FieldKind>,
    pub display_order: Option<i32>,
    pub is_required: Option<bool>,
    pub options: Option<Option<Vec<String>>>,
    pub description: Option<Option<String>>,
}

impl CustomFieldPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_none()
            && self.display_order.is_none()
            && self.is_required.is_none()
            && self.options.is_none()
            && self.description.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Status {
    pub id: Uuid,
    pub name: String,
    pub category_type: CategoryType,
    pub color: String,
    pub icon: String,
    pub display_order: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct StatusPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    pub description: Option<Option<String>>,
}

impl StatusPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.display_order.is_none()
            && self.description.is_none()
    }
}

/// Pooled email credential.
#[derive(Debug, Clone)]
pub struct EmailAccount {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub status: EmailStatus,
    pub notes: Option<String>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct EmailPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<EmailStatus>,
    pub notes: Option<Option<String>>,
}

impl EmailPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

/// Filters for the paginated email listing.
#[derive(Debug, Default)]
pub struct EmailListFilter {
    pub status: Option<EmailStatus>,
    pub search: Option<String>,
}

/// Pool counters for `GET /emails/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailStats {
    pub total: u64,
    pub free: u64,
    pub used: u64,
    pub blocked: u64,
}

/// Tenant-owned profile.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub site_name: String,
    pub status: String,
    pub username: String,
    pub password: String,
    pub verification_status: Option<String>,
    pub phone: Option<String>,
    pub registration_status: Option<String>,
    pub registration_country: Option<String>,
    pub ip_country: Option<String>,
    pub comments: Option<String>,
    pub assigned_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile row joined with its category for list/detail responses.
#[derive(Debug, Clone)]
pub struct ProfileWithCategory {
    pub profile: Profile,
    pub category_name: String,
    pub category_type: CategoryType,
}

#[derive(Debug, Default)]
pub struct ProfilePatch {
    pub site_name: Option<String>,
    pub status: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub verification_status: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub registration_status: Option<Option<String>>,
    pub registration_country: Option<Option<String>>,
    pub ip_country: Option<Option<String>>,
    pub comments: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.site_name.is_none()
            && self.status.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.verification_status.is_none()
            && self.phone.is_none()
            && self.registration_status.is_none()
            && self.registration_country.is_none()
            && self.ip_country.is_none()
            && self.comments.is_none()
    }
}

/// Filters for the profile listing.
#[derive(Debug, Default)]
pub struct ProfileListFilter {
    pub category_type: Option<CategoryType>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Reminder attached to a profile.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub kind: String,
    pub message: String,
    pub reminder_date: Option<DateTime<Utc>>,
    pub status: ReminderStatus,
    pub created_at: DateTime<Utc>,
}

/// Reminder joined with its profile (LEFT JOIN — the profile may be gone).
#[derive(Debug, Clone)]
pub struct ReminderWithProfile {
    pub reminder: Reminder,
    pub site_name: Option<String>,
    pub profile_status: Option<String>,
}

/// Scan row produced by the verification sweep: a pending profile past the
/// staleness threshold with no recent verification reminder.
#[derive(Debug, Clone)]
pub struct StalePendingProfile {
    pub profile_id: Uuid,
    pub user_id: Uuid,
    pub site_name: String,
}

/// Event pushed over the real-time channel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Event {
    NewProfile {
        profile_id: Uuid,
        user_id: Uuid,
        site_name: String,
        category_type: CategoryType,
    },
    ReminderCreated {
        reminder_id: Uuid,
        profile_id: Uuid,
        message: String,
    },
}

/// Minimum username length accepted at registration.
pub const USERNAME_MIN_LEN: usize = 3;

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LEN: usize = 6;

pub fn validate_username(username: &str) -> bool {
    username.trim().chars().count() >= USERNAME_MIN_LEN
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
}
