use chrono::Utc;
use uuid::Uuid;

use provault_domain::category::CategoryType;

use crate::domain::access::{Action, Actor, Resource, permitted};
use crate::domain::repository::{CategoryRepository, ProfileRepository};
use crate::domain::types::{Profile, ProfileListFilter, ProfilePatch, ProfileWithCategory};
use crate::error::ApiError;

// ── ListProfiles ─────────────────────────────────────────────────────────────

pub struct ListProfilesInput {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

pub struct ListProfilesUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> ListProfilesUseCase<P> {
    /// `owner` is `None` for admins (all rows) and the caller's own id for
    /// regular users.
    pub async fn execute(
        &self,
        owner: Option<Uuid>,
        input: ListProfilesInput,
    ) -> Result<Vec<ProfileWithCategory>, ApiError> {
        let filter = ProfileListFilter {
            category_type: input
                .category
                .as_deref()
                .map(|v| CategoryType::from_str_value(v).ok_or(ApiError::InvalidCategoryType))
                .transpose()?,
            status: input.status.filter(|s| !s.trim().is_empty()),
            search: input.search.filter(|s| !s.trim().is_empty()),
        };
        self.profiles.list(owner, &filter).await
    }
}

// ── CreateProfile ────────────────────────────────────────────────────────────

pub struct CreateProfileInput {
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
}

pub struct CreateProfileUseCase<P: ProfileRepository, C: CategoryRepository> {
    pub profiles: P,
    pub categories: C,
}

impl<P: ProfileRepository, C: CategoryRepository> CreateProfileUseCase<P, C> {
    /// Create a profile owned by `owner_id`. For `for_sale` categories the
    /// repository claims one free email atomically with the insert; an
    /// empty pool leaves the profile unassigned rather than failing.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: CreateProfileInput,
    ) -> Result<ProfileWithCategory, ApiError> {
        for required in [
            &input.site_name,
            &input.status,
            &input.username,
            &input.password,
        ] {
            if required.trim().is_empty() {
                return Err(ApiError::MissingData);
            }
        }

        let category = self
            .categories
            .find_by_id(input.category_id)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;
        let claim_email = category.kind == CategoryType::ForSale;

        let now = Utc::now();
        let profile = Profile {
            id: Uuid::now_v7(),
            user_id: owner_id,
            category_id: category.id,
            site_name: input.site_name.trim().to_owned(),
            status: input.status.trim().to_owned(),
            username: input.username,
            password: input.password,
            verification_status: input.verification_status,
            phone: input.phone,
            registration_status: input.registration_status,
            registration_country: input.registration_country,
            ip_country: input.ip_country,
            comments: input.comments,
            assigned_email: None,
            created_at: now,
            updated_at: now,
        };
        let created = self.profiles.create(&profile, claim_email).await?;
        Ok(ProfileWithCategory {
            profile: created,
            category_name: category.name,
            category_type: category.kind,
        })
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
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

pub struct UpdateProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> UpdateProfileUseCase<P> {
    pub async fn execute(
        &self,
        actor: &Actor,
        profile_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<Profile, ApiError> {
        for required in [&input.site_name, &input.status, &input.username, &input.password] {
            if let Some(value) = required {
                if value.trim().is_empty() {
                    return Err(ApiError::MissingData);
                }
            }
        }

        let profile = self
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(ApiError::ProfileNotFound)?;
        // A foreign profile looks like a missing one to its non-owner.
        if !permitted(
            actor,
            Action::Update,
            Resource::Profile {
                owner: Some(profile.user_id),
            },
        ) {
            return Err(ApiError::ProfileNotFound);
        }

        let patch = ProfilePatch {
            site_name: input.site_name,
            status: input.status,
            username: input.username,
            password: input.password,
            verification_status: input.verification_status,
            phone: input.phone,
            registration_status: input.registration_status,
            registration_country: input.registration_country,
            ip_country: input.ip_country,
            comments: input.comments,
        };
        if patch.is_empty() {
            return Err(ApiError::MissingData);
        }

        self.profiles.update(profile_id, &patch).await?;
        self.profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(ApiError::ProfileNotFound)
    }
}

// ── DeleteProfile ────────────────────────────────────────────────────────────

pub struct DeleteProfileUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> DeleteProfileUseCase<P> {
    pub async fn execute(&self, actor: &Actor, profile_id: Uuid) -> Result<(), ApiError> {
        let profile = self
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(ApiError::ProfileNotFound)?;
        if !permitted(
            actor,
            Action::Delete,
            Resource::Profile {
                owner: Some(profile.user_id),
            },
        ) {
            return Err(ApiError::ProfileNotFound);
        }
        if !self.profiles.delete(profile_id).await? {
            return Err(ApiError::ProfileNotFound);
        }
        Ok(())
    }
}
