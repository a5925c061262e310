use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use provault_api::domain::repository::{
    CategoryRepository, NotifierPort, ProfileRepository, ReminderRepository, UserRepository,
};
use provault_api::domain::types::{
    Category, CategoryPatch, EmailAccount, Event, Profile, ProfileListFilter, ProfilePatch,
    ProfileWithCategory, Reminder, ReminderWithProfile, StalePendingProfile, User, UserPatch,
};
use provault_api::error::ApiError;
use provault_domain::category::CategoryType;
use provault_domain::email::EmailStatus;
use provault_domain::reminder::VERIFICATION_KIND;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
    async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.users.lock().unwrap().clone())
    }
    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(ApiError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            if let Some(ref username) = patch.username {
                user.username = username.clone();
            }
            if let Some(role) = patch.role {
                user.role = role;
            }
            if let Some(ref hash) = patch.password_hash {
                user.password_hash = hash.clone();
            }
        }
        Ok(())
    }
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MockCategoryRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCategoryRepo {
    pub categories: Arc<Mutex<Vec<Category>>>,
}

impl CategoryRepository for MockCategoryRepo {
    async fn list(&self, kind: Option<CategoryType>) -> Result<Vec<Category>, ApiError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .cloned()
            .collect())
    }
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
    async fn create(&self, category: &Category) -> Result<(), ApiError> {
        let mut categories = self.categories.lock().unwrap();
        if categories
            .iter()
            .any(|c| c.name == category.name && c.kind == category.kind)
        {
            return Err(ApiError::CategoryAlreadyExists);
        }
        categories.push(category.clone());
        Ok(())
    }
    async fn update(&self, _id: Uuid, _patch: &CategoryPatch) -> Result<(), ApiError> {
        Ok(())
    }
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() < before)
    }
    async fn profile_count(&self, _id: Uuid) -> Result<u64, ApiError> {
        Ok(0)
    }
}

// ── MockProfileRepo ──────────────────────────────────────────────────────────

/// Profile store sharing an email pool and a reminder store, so both the
/// atomic-claim contract and the sweep suppression window can be exercised.
#[derive(Clone, Default)]
pub struct MockProfileRepo {
    pub profiles: Arc<Mutex<Vec<Profile>>>,
    pub email_pool: Arc<Mutex<Vec<EmailAccount>>>,
    pub reminders: Arc<Mutex<Vec<Reminder>>>,
}

impl ProfileRepository for MockProfileRepo {
    async fn list(
        &self,
        owner: Option<Uuid>,
        filter: &ProfileListFilter,
    ) -> Result<Vec<ProfileWithCategory>, ApiError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| owner.is_none_or(|o| p.user_id == o))
            .filter(|p| filter.status.as_deref().is_none_or(|s| p.status == s))
            .map(|p| ProfileWithCategory {
                profile: p.clone(),
                category_name: "Shops".into(),
                category_type: CategoryType::ForSale,
            })
            .collect())
    }
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }
    async fn create(&self, profile: &Profile, claim_email: bool) -> Result<Profile, ApiError> {
        let mut created = profile.clone();
        if claim_email {
            // Pool lock makes the claim atomic, like the single-statement
            // UPDATE in the real repository.
            let mut pool = self.email_pool.lock().unwrap();
            if let Some(free) = pool
                .iter_mut()
                .filter(|e| e.status == EmailStatus::Free)
                .min_by_key(|e| e.id)
            {
                free.status = EmailStatus::Used;
                free.used_at = Some(profile.created_at);
                created.assigned_email = Some(free.email.clone());
            }
        }
        self.profiles.lock().unwrap().push(created.clone());
        Ok(created)
    }
    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<(), ApiError> {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(profile) = profiles.iter_mut().find(|p| p.id == id) {
            if let Some(ref status) = patch.status {
                profile.status = status.clone();
            }
            if let Some(ref site_name) = patch.site_name {
                profile.site_name = site_name.clone();
            }
            profile.updated_at = Utc::now();
        }
        Ok(())
    }
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut profiles = self.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        Ok(profiles.len() < before)
    }
    async fn find_stale_pending(
        &self,
        older_than: DateTime<Utc>,
        reminded_since: DateTime<Utc>,
    ) -> Result<Vec<StalePendingProfile>, ApiError> {
        let reminders = self.reminders.lock().unwrap();
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.status == "pending" && p.created_at <= older_than)
            .filter(|p| {
                !reminders.iter().any(|r| {
                    r.profile_id == p.id
                        && r.kind == VERIFICATION_KIND
                        && r.created_at >= reminded_since
                })
            })
            .map(|p| StalePendingProfile {
                profile_id: p.id,
                user_id: p.user_id,
                site_name: p.site_name.clone(),
            })
            .collect())
    }
}

// ── MockReminderRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockReminderRepo {
    pub reminders: Arc<Mutex<Vec<Reminder>>>,
}

impl ReminderRepository for MockReminderRepo {
    async fn list(
        &self,
        user_id: Uuid,
        only_pending: bool,
    ) -> Result<Vec<ReminderWithProfile>, ApiError> {
        Ok(self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| !only_pending || r.status == provault_domain::reminder::ReminderStatus::Pending)
            .map(|r| ReminderWithProfile {
                reminder: r.clone(),
                site_name: None,
                profile_status: None,
            })
            .collect())
    }
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reminder>, ApiError> {
        Ok(self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
    async fn create(&self, reminder: &Reminder) -> Result<(), ApiError> {
        self.reminders.lock().unwrap().push(reminder.clone());
        Ok(())
    }
    async fn dismiss(&self, _id: Uuid) -> Result<(), ApiError> {
        Ok(())
    }
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut reminders = self.reminders.lock().unwrap();
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        Ok(reminders.len() < before)
    }
}

// ── NullNotifier ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct NullNotifier;

impl NotifierPort for NullNotifier {
    async fn broadcast(&self, _event: &Event) {}
    async fn notify_user(&self, _user_id: Uuid, _event: &Event) {}
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_category(kind: CategoryType) -> Category {
    Category {
        id: Uuid::now_v7(),
        name: "Shops".into(),
        kind,
        description: None,
        created_at: Utc::now(),
    }
}

pub fn free_email(address: &str) -> EmailAccount {
    EmailAccount {
        id: Uuid::now_v7(),
        email: address.to_owned(),
        password: "pw".into(),
        status: EmailStatus::Free,
        notes: None,
        used_at: None,
        created_at: Utc::now(),
    }
}

pub fn pending_profile(user_id: Uuid, created_at: DateTime<Utc>) -> Profile {
    Profile {
        id: Uuid::now_v7(),
        user_id,
        category_id: Uuid::now_v7(),
        site_name: "example.com".into(),
        status: "pending".into(),
        username: "login".into(),
        password: "pw".into(),
        verification_status: None,
        phone: None,
        registration_status: None,
        registration_country: None,
        ip_country: None,
        comments: None,
        assigned_email: None,
        created_at,
        updated_at: created_at,
    }
}
