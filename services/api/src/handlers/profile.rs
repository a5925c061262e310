use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use provault_domain::category::CategoryType;

use crate::domain::access::{Action, Actor, Resource, permitted, profile_list_scope};
use crate::domain::repository::NotifierPort as _;
use crate::domain::types::{Event, Profile, ProfileWithCategory};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::profile::{
    CreateProfileInput, CreateProfileUseCase, DeleteProfileUseCase, ListProfilesInput,
    ListProfilesUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub category_name: Option<String>,
    pub category_type: Option<CategoryType>,
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
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "provault_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            user_id: profile.user_id.to_string(),
            category_id: profile.category_id.to_string(),
            category_name: None,
            category_type: None,
            site_name: profile.site_name,
            status: profile.status,
            username: profile.username,
            password: profile.password,
            verification_status: profile.verification_status,
            phone: profile.phone,
            registration_status: profile.registration_status,
            registration_country: profile.registration_country,
            ip_country: profile.ip_country,
            comments: profile.comments,
            assigned_email: profile.assigned_email,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<ProfileWithCategory> for ProfileResponse {
    fn from(row: ProfileWithCategory) -> Self {
        let mut response: Self = row.profile.into();
        response.category_name = Some(row.category_name);
        response.category_type = Some(row.category_type);
        response
    }
}

// ── GET /profiles ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ProfileListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

pub async fn list_profiles(
    actor: Actor,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let query: ProfileListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ApiError::MissingData)?
        .unwrap_or_default();

    let usecase = ListProfilesUseCase {
        profiles: state.profile_repo(),
    };
    let rows = usecase
        .execute(
            profile_list_scope(&actor),
            ListProfilesInput {
                category: query.category,
                status: query.status,
                search: query.search,
            },
        )
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── POST /profiles ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProfileRequest {
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

pub async fn create_profile(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    if !permitted(
        &actor,
        Action::Create,
        Resource::Profile {
            owner: Some(actor.user_id),
        },
    ) {
        return Err(ApiError::Forbidden);
    }
    let usecase = CreateProfileUseCase {
        profiles: state.profile_repo(),
        categories: state.category_repo(),
    };
    let created = usecase
        .execute(
            actor.user_id,
            CreateProfileInput {
                category_id: body.category_id,
                site_name: body.site_name,
                status: body.status,
                username: body.username,
                password: body.password,
                verification_status: body.verification_status,
                phone: body.phone,
                registration_status: body.registration_status,
                registration_country: body.registration_country,
                ip_country: body.ip_country,
                comments: body.comments,
            },
        )
        .await?;

    state
        .notifier
        .broadcast(&Event::NewProfile {
            profile_id: created.profile.id,
            user_id: created.profile.user_id,
            site_name: created.profile.site_name.clone(),
            category_type: created.category_type,
        })
        .await;

    Ok((StatusCode::CREATED, Json(created.into())))
}

// ── PUT /profiles/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub site_name: Option<String>,
    pub status: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub verification_status: Option<Option<String>>,
    #[serde(default)]
    pub phone: Option<Option<String>>,
    #[serde(default)]
    pub registration_status: Option<Option<String>>,
    #[serde(default)]
    pub registration_country: Option<Option<String>>,
    #[serde(default)]
    pub ip_country: Option<Option<String>>,
    #[serde(default)]
    pub comments: Option<Option<String>>,
}

pub async fn update_profile(
    actor: Actor,
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        profiles: state.profile_repo(),
    };
    let profile = usecase
        .execute(
            &actor,
            profile_id,
            UpdateProfileInput {
                site_name: body.site_name,
                status: body.status,
                username: body.username,
                password: body.password,
                verification_status: body.verification_status,
                phone: body.phone,
                registration_status: body.registration_status,
                registration_country: body.registration_country,
                ip_country: body.ip_country,
                comments: body.comments,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}

// ── DELETE /profiles/{id} ────────────────────────────────────────────────────

pub async fn delete_profile(
    actor: Actor,
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteProfileUseCase {
        profiles: state.profile_repo(),
    };
    usecase.execute(&actor, profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
