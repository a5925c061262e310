use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, Statement, TransactionTrait,
};
use uuid::Uuid;

use provault_domain::category::CategoryType;
use provault_domain::email::EmailStatus;
use provault_domain::field::FieldKind;
use provault_domain::pagination::PageRequest;
use provault_domain::reminder::ReminderStatus;
use provault_domain::user::UserRole;
use provault_schema::{categories, custom_fields, emails, profiles, reminders, statuses, users};

use crate::domain::repository::{
    CategoryRepository, CustomFieldRepository, EmailRepository, ProfileRepository,
    ReminderRepository, StatusRepository, UserRepository,
};
use crate::domain::types::{
    Category, CategoryPatch, CustomField, CustomFieldPatch, EmailAccount, EmailListFilter,
    EmailPatch, EmailStats, Profile, ProfileListFilter, ProfilePatch, ProfileWithCategory,
    Reminder, ReminderWithProfile, StalePendingProfile, Status, StatusPatch, User, UserPatch,
};
use crate::error::ApiError;

/// Map an insert/update error: store-level unique violations become the
/// given duplicate error, everything else is internal.
fn map_unique(e: DbErr, duplicate: ApiError, context: &'static str) -> ApiError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate,
        _ => ApiError::Internal(anyhow::Error::new(e).context(context)),
    }
}

/// Map a delete/insert error: store-level foreign-key violations become the
/// given conflict error, everything else is internal.
fn map_foreign_key(e: DbErr, conflict: ApiError, context: &'static str) -> ApiError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => conflict,
        _ => ApiError::Internal(anyhow::Error::new(e).context(context)),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique(e, ApiError::UserAlreadyExists, "create user"))?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<(), ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref username) = patch.username {
            am.username = Set(username.clone());
        }
        if let Some(role) = patch.role {
            am.role = Set(role.as_str().to_owned());
        }
        if let Some(ref hash) = patch.password_hash {
            am.password_hash = Set(hash.clone());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .map_err(|e| map_unique(e, ApiError::UserAlreadyExists, "update user"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = UserRole::from_str_value(&model.role).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown role {:?} stored for user {}",
            model.role,
            model.id
        ))
    })?;
    Ok(User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn list(&self, kind: Option<CategoryType>) -> Result<Vec<Category>, ApiError> {
        let mut query = categories::Entity::find().order_by_asc(categories::Column::Name);
        if let Some(kind) = kind {
            query = query.filter(categories::Column::Kind.eq(kind.as_str()));
        }
        let models = query.all(&self.db).await.context("list categories")?;
        models.into_iter().map(category_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        model.map(category_from_model).transpose()
    }

    async fn create(&self, category: &Category) -> Result<(), ApiError> {
        categories::ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            kind: Set(category.kind.as_str().to_owned()),
            description: Set(category.description.clone()),
            created_at: Set(category.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique(e, ApiError::CategoryAlreadyExists, "create category"))?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &CategoryPatch) -> Result<(), ApiError> {
        let mut am = categories::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = patch.name {
            am.name = Set(name.clone());
        }
        if let Some(ref description) = patch.description {
            am.description = Set(description.clone());
        }
        am.update(&self.db)
            .await
            .map_err(|e| map_unique(e, ApiError::CategoryAlreadyExists, "update category"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_foreign_key(e, ApiError::CategoryInUse, "delete category"))?;
        Ok(res.rows_affected > 0)
    }

    async fn profile_count(&self, id: Uuid) -> Result<u64, ApiError> {
        let count = profiles::Entity::find()
            .filter(profiles::Column::CategoryId.eq(id))
            .count(&self.db)
            .await
            .context("count profiles for category")?;
        Ok(count)
    }
}

fn category_from_model(model: categories::Model) -> Result<Category, ApiError> {
    let kind = CategoryType::from_str_value(&model.kind).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown type {:?} stored for category {}",
            model.kind,
            model.id
        ))
    })?;
    Ok(Category {
        id: model.id,
        name: model.name,
        kind,
        description: model.description,
        created_at: model.created_at,
    })
}

// ── Custom field repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCustomFieldRepository {
    pub db: DatabaseConnection,
}

impl CustomFieldRepository for DbCustomFieldRepository {
    async fn list(
        &self,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<CustomField>, ApiError> {
        let mut query = custom_fields::Entity::find()
            .order_by_asc(custom_fields::Column::CategoryType)
            .order_by_asc(custom_fields::Column::DisplayOrder);
        if let Some(t) = category_type {
            query = query.filter(custom_fields::Column::CategoryType.eq(t.as_str()));
        }
        let models = query.all(&self.db).await.context("list custom fields")?;
        models.into_iter().map(field_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomField>, ApiError> {
        let model = custom_fields::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find custom field by id")?;
        model.map(field_from_model).transpose()
    }

    async fn create(&self, field: &CustomField) -> Result<(), ApiError> {
        custom_fields::ActiveModel {
            id: Set(field.id),
            name: Set(field.name.clone()),
            kind: Set(field.kind.as_str().to_owned()),
            category_type: Set(field.category_type.as_str().to_owned()),
            display_order: Set(field.display_order),
            is_required: Set(field.is_required),
            options: Set(options_to_json(&field.options)),
            description: Set(field.description.clone()),
            created_at: Set(field.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique(e, ApiError::FieldAlreadyExists, "create custom field"))?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &CustomFieldPatch) -> Result<(), ApiError> {
        let mut am = custom_fields::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = patch.name {
            am.name = Set(name.clone());
        }
        if let Some(kind) = patch.kind {
            am.kind = Set(kind.as_str().to_owned());
        }
        if let Some(order) = patch.display_order {
            am.display_order = Set(order);
        }
        if let Some(required) = patch.is_required {
            am.is_required = Set(required);
        }
        if let Some(ref options) = patch.options {
            am.options = Set(options_to_json(options));
        }
        if let Some(ref description) = patch.description {
            am.description = Set(description.clone());
        }
        am.update(&self.db)
            .await
            .map_err(|e| map_unique(e, ApiError::FieldAlreadyExists, "update custom field"))?;
        Ok(())
    }

    async fn update_order(&self, id: Uuid, display_order: i32) -> Result<(), ApiError> {
        custom_fields::ActiveModel {
            id: Set(id),
            display_order: Set(display_order),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update custom field order")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = custom_fields::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete custom field")?;
        Ok(res.rows_affected > 0)
    }
}

fn options_to_json(options: &Option<Vec<String>>) -> Option<serde_json::Value> {
    options
        .as_ref()
        .map(|opts| serde_json::Value::Array(opts.iter().cloned().map(Into::into).collect()))
}

fn field_from_model(model: custom_fields::Model) -> Result<CustomField, ApiError> {
    let kind = FieldKind::from_str_value(&model.kind).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown kind {:?} stored for field {}",
            model.kind,
            model.id
        ))
    })?;
    let category_type = CategoryType::from_str_value(&model.category_type).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown category type {:?} stored for field {}",
            model.category_type,
            model.id
        ))
    })?;
    let options = model
        .options
        .map(serde_json::from_value)
        .transpose()
        .context("decode field options")?;
    Ok(CustomField {
        id: model.id,
        name: model.name,
        kind,
        category_type,
        display_order: model.display_order,
        is_required: model.is_required,
        options,
        description: model.description,
        created_at: model.created_at,
    })
}

// ── Status repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStatusRepository {
    pub db: DatabaseConnection,
}

impl StatusRepository for DbStatusRepository {
    async fn list(&self, category_type: Option<CategoryType>) -> Result<Vec<Status>, ApiError> {
        let mut query = statuses::Entity::find()
            .order_by_asc(statuses::Column::CategoryType)
            .order_by_asc(statuses::Column::DisplayOrder);
        if let Some(t) = category_type {
            query = query.filter(statuses::Column::CategoryType.eq(t.as_str()));
        }
        let models = query.all(&self.db).await.context("list statuses")?;
        models.into_iter().map(status_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Status>, ApiError> {
        let model = statuses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find status by id")?;
        model.map(status_from_model).transpose()
    }

    async fn create(&self, status: &Status) -> Result<(), ApiError> {
        statuses::ActiveModel {
            id: Set(status.id),
            name: Set(status.name.clone()),
            category_type: Set(status.category_type.as_str().to_owned()),
            color: Set(status.color.clone()),
            icon: Set(status.icon.clone()),
            display_order: Set(status.display_order),
            description: Set(status.description.clone()),
            created_at: Set(status.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique(e, ApiError::StatusAlreadyExists, "create status"))?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &StatusPatch) -> Result<(), ApiError> {
        let mut am = statuses::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = patch.name {
            am.name = Set(name.clone());
        }
        if let Some(ref color) = patch.color {
            am.color = Set(color.clone());
        }
        if let Some(ref icon) = patch.icon {
            am.icon = Set(icon.clone());
        }
        if let Some(order) = patch.display_order {
            am.display_order = Set(order);
        }
        if let Some(ref description) = patch.description {
            am.description = Set(description.clone());
        }
        am.update(&self.db)
            .await
            .map_err(|e| map_unique(e, ApiError::StatusAlreadyExists, "update status"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = statuses::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete status")?;
        Ok(res.rows_affected > 0)
    }

    async fn profiles_using(
        &self,
        name: &str,
        category_type: CategoryType,
    ) -> Result<u64, ApiError> {
        // Profiles reference statuses by name within a category type, not
        // by foreign key, so the usage check joins through categories.
        #[derive(FromQueryResult)]
        struct CountRow {
            count: i64,
        }

        let row = CountRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT COUNT(*) AS count
            FROM profiles p
            JOIN categories c ON p.category_id = c.id
            WHERE p.status = $1 AND c.type = $2
            "#,
            [name.into(), category_type.as_str().into()],
        ))
        .one(&self.db)
        .await
        .context("count profiles using status")?;
        Ok(row.map(|r| r.count as u64).unwrap_or(0))
    }
}

fn status_from_model(model: statuses::Model) -> Result<Status, ApiError> {
    let category_type = CategoryType::from_str_value(&model.category_type).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown category type {:?} stored for status {}",
            model.category_type,
            model.id
        ))
    })?;
    Ok(Status {
        id: model.id,
        name: model.name,
        category_type,
        color: model.color,
        icon: model.icon,
        display_order: model.display_order,
        description: model.description,
        created_at: model.created_at,
    })
}

// ── Email repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmailRepository {
    pub db: DatabaseConnection,
}

impl EmailRepository for DbEmailRepository {
    async fn list(
        &self,
        filter: &EmailListFilter,
        page: PageRequest,
    ) -> Result<(Vec<EmailAccount>, u64), ApiError> {
        let mut query = emails::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(emails::Column::Status.eq(status.as_str()));
        }
        if let Some(ref term) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(emails::Column::Email.contains(term.as_str()))
                    .add(emails::Column::Notes.contains(term.as_str())),
            );
        }

        let total = query.clone().count(&self.db).await.context("count emails")?;

        let offset = u64::from(page.page - 1) * u64::from(page.per_page);
        let models = query
            .order_by_desc(emails::Column::CreatedAt)
            .offset(offset)
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list emails")?;
        let accounts = models
            .into_iter()
            .map(email_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((accounts, total))
    }

    async fn stats(&self) -> Result<EmailStats, ApiError> {
        #[derive(FromQueryResult)]
        struct StatsRow {
            total: i64,
            free: i64,
            used: i64,
            blocked: i64,
        }

        let row = StatsRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'free') AS free,
                   COUNT(*) FILTER (WHERE status = 'used') AS used,
                   COUNT(*) FILTER (WHERE status = 'blocked') AS blocked
            FROM emails
            "#,
        ))
        .one(&self.db)
        .await
        .context("email stats")?
        .context("email stats returned no row")?;

        Ok(EmailStats {
            total: row.total as u64,
            free: row.free as u64,
            used: row.used as u64,
            blocked: row.blocked as u64,
        })
    }

    async fn find_first_free(&self) -> Result<Option<EmailAccount>, ApiError> {
        let model = emails::Entity::find()
            .filter(emails::Column::Status.eq(EmailStatus::Free.as_str()))
            .order_by_asc(emails::Column::Id)
            .one(&self.db)
            .await
            .context("find first free email")?;
        model.map(email_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<EmailAccount>, ApiError> {
        let model = emails::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find email by id")?;
        model.map(email_from_model).transpose()
    }

    async fn create(&self, email: &EmailAccount) -> Result<(), ApiError> {
        emails::ActiveModel {
            id: Set(email.id),
            email: Set(email.email.clone()),
            password: Set(email.password.clone()),
            status: Set(email.status.as_str().to_owned()),
            notes: Set(email.notes.clone()),
            used_at: Set(email.used_at),
            created_at: Set(email.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_unique(e, ApiError::EmailAlreadyExists, "create email"))?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &EmailPatch) -> Result<(), ApiError> {
        let mut am = emails::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref address) = patch.email {
            am.email = Set(address.clone());
        }
        if let Some(ref password) = patch.password {
            am.password = Set(password.clone());
        }
        if let Some(status) = patch.status {
            am.status = Set(status.as_str().to_owned());
        }
        if let Some(ref notes) = patch.notes {
            am.notes = Set(notes.clone());
        }
        am.update(&self.db)
            .await
            .map_err(|e| map_unique(e, ApiError::EmailAlreadyExists, "update email"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = emails::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_foreign_key(e, ApiError::EmailInUse, "delete email"))?;
        Ok(res.rows_affected > 0)
    }

    async fn profile_count(&self, address: &str) -> Result<u64, ApiError> {
        let count = profiles::Entity::find()
            .filter(profiles::Column::AssignedEmail.eq(address))
            .count(&self.db)
            .await
            .context("count profiles holding email")?;
        Ok(count)
    }
}

fn email_from_model(model: emails::Model) -> Result<EmailAccount, ApiError> {
    let status = EmailStatus::from_str_value(&model.status).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown status {:?} stored for email {}",
            model.status,
            model.id
        ))
    })?;
    Ok(EmailAccount {
        id: model.id,
        email: model.email,
        password: model.password,
        status,
        notes: model.notes,
        used_at: model.used_at,
        created_at: model.created_at,
    })
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn list(
        &self,
        owner: Option<Uuid>,
        filter: &ProfileListFilter,
    ) -> Result<Vec<ProfileWithCategory>, ApiError> {
        let mut query = profiles::Entity::find()
            .find_also_related(categories::Entity)
            .order_by_desc(profiles::Column::CreatedAt);
        if let Some(owner) = owner {
            query = query.filter(profiles::Column::UserId.eq(owner));
        }
        if let Some(t) = filter.category_type {
            query = query.filter(categories::Column::Kind.eq(t.as_str()));
        }
        if let Some(ref status) = filter.status {
            query = query.filter(profiles::Column::Status.eq(status.as_str()));
        }
        if let Some(ref term) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(profiles::Column::SiteName.contains(term.as_str()))
                    .add(profiles::Column::Username.contains(term.as_str()))
                    .add(profiles::Column::Comments.contains(term.as_str())),
            );
        }

        let rows = query.all(&self.db).await.context("list profiles")?;
        rows.into_iter()
            .map(|(profile, category)| {
                let category =
                    category.context("profile row without category despite foreign key")?;
                let kind = CategoryType::from_str_value(&category.kind).ok_or_else(|| {
                    ApiError::Internal(anyhow::anyhow!(
                        "unknown type {:?} stored for category {}",
                        category.kind,
                        category.id
                    ))
                })?;
                Ok(ProfileWithCategory {
                    profile: profile_from_model(profile),
                    category_name: category.name,
                    category_type: kind,
                })
            })
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError> {
        let model = profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn create(&self, profile: &Profile, claim_email: bool) -> Result<Profile, ApiError> {
        let txn = self.db.begin().await.context("begin profile transaction")?;

        // Claim-one-row: select-and-transition in a single statement so two
        // concurrent creations can never claim the same address. SKIP LOCKED
        // makes the loser move on to the next free row instead of blocking.
        let mut assigned_email = None;
        if claim_email {
            #[derive(FromQueryResult)]
            struct ClaimedRow {
                email: String,
            }

            let claimed = ClaimedRow::find_by_statement(Statement::from_sql_and_values(
                txn.get_database_backend(),
                r#"
                UPDATE emails
                SET status = 'used', used_at = $1
                WHERE id = (
                    SELECT id FROM emails
                    WHERE status = 'free'
                    ORDER BY id
                    LIMIT 1
                    FOR UPDATE SKIP LOCKED
                )
                RETURNING email
                "#,
                [profile.created_at.into()],
            ))
            .one(&txn)
            .await
            .context("claim free email")?;
            assigned_email = claimed.map(|row| row.email);
        }

        profiles::ActiveModel {
            id: Set(profile.id),
            user_id: Set(profile.user_id),
            category_id: Set(profile.category_id),
            site_name: Set(profile.site_name.clone()),
            status: Set(profile.status.clone()),
            username: Set(profile.username.clone()),
            password: Set(profile.password.clone()),
            verification_status: Set(profile.verification_status.clone()),
            phone: Set(profile.phone.clone()),
            registration_status: Set(profile.registration_status.clone()),
            registration_country: Set(profile.registration_country.clone()),
            ip_country: Set(profile.ip_country.clone()),
            comments: Set(profile.comments.clone()),
            assigned_email: Set(assigned_email.clone()),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        }
        .insert(&txn)
        .await
        .context("create profile")?;

        txn.commit().await.context("commit profile transaction")?;

        Ok(Profile {
            assigned_email,
            ..profile.clone()
        })
    }

    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<(), ApiError> {
        let mut am = profiles::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref site_name) = patch.site_name {
            am.site_name = Set(site_name.clone());
        }
        if let Some(ref status) = patch.status {
            am.status = Set(status.clone());
        }
        if let Some(ref username) = patch.username {
            am.username = Set(username.clone());
        }
        if let Some(ref password) = patch.password {
            am.password = Set(password.clone());
        }
        if let Some(ref verification_status) = patch.verification_status {
            am.verification_status = Set(verification_status.clone());
        }
        if let Some(ref phone) = patch.phone {
            am.phone = Set(phone.clone());
        }
        if let Some(ref registration_status) = patch.registration_status {
            am.registration_status = Set(registration_status.clone());
        }
        if let Some(ref registration_country) = patch.registration_country {
            am.registration_country = Set(registration_country.clone());
        }
        if let Some(ref ip_country) = patch.ip_country {
            am.ip_country = Set(ip_country.clone());
        }
        if let Some(ref comments) = patch.comments {
            am.comments = Set(comments.clone());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update profile")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = profiles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete profile")?;
        Ok(res.rows_affected > 0)
    }

    async fn find_stale_pending(
        &self,
        older_than: DateTime<Utc>,
        reminded_since: DateTime<Utc>,
    ) -> Result<Vec<StalePendingProfile>, ApiError> {
        #[derive(FromQueryResult)]
        struct StaleRow {
            id: Uuid,
            user_id: Uuid,
            site_name: String,
        }

        let rows = StaleRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT p.id, p.user_id, p.site_name
            FROM profiles p
            WHERE p.status = 'pending'
              AND p.created_at <= $1
              AND NOT EXISTS (
                  SELECT 1 FROM reminders r
                  WHERE r.profile_id = p.id
                    AND r.type = 'verification'
                    AND r.created_at >= $2
              )
            ORDER BY p.created_at
            "#,
            [older_than.into(), reminded_since.into()],
        ))
        .all(&self.db)
        .await
        .context("scan stale pending profiles")?;

        Ok(rows
            .into_iter()
            .map(|row| StalePendingProfile {
                profile_id: row.id,
                user_id: row.user_id,
                site_name: row.site_name,
            })
            .collect())
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id,
        user_id: model.user_id,
        category_id: model.category_id,
        site_name: model.site_name,
        status: model.status,
        username: model.username,
        password: model.password,
        verification_status: model.verification_status,
        phone: model.phone,
        registration_status: model.registration_status,
        registration_country: model.registration_country,
        ip_country: model.ip_country,
        comments: model.comments,
        assigned_email: model.assigned_email,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Reminder repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReminderRepository {
    pub db: DatabaseConnection,
}

impl ReminderRepository for DbReminderRepository {
    async fn list(
        &self,
        user_id: Uuid,
        only_pending: bool,
    ) -> Result<Vec<ReminderWithProfile>, ApiError> {
        let mut query = reminders::Entity::find()
            .find_also_related(profiles::Entity)
            .filter(reminders::Column::UserId.eq(user_id))
            .order_by_desc(reminders::Column::CreatedAt);
        if only_pending {
            query = query.filter(
                reminders::Column::Status.eq(ReminderStatus::Pending.as_str()),
            );
        }

        let rows = query.all(&self.db).await.context("list reminders")?;
        rows.into_iter()
            .map(|(reminder, profile)| {
                Ok(ReminderWithProfile {
                    reminder: reminder_from_model(reminder)?,
                    site_name: profile.as_ref().map(|p| p.site_name.clone()),
                    profile_status: profile.map(|p| p.status),
                })
            })
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reminder>, ApiError> {
        let model = reminders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find reminder by id")?;
        model.map(reminder_from_model).transpose()
    }

    async fn create(&self, reminder: &Reminder) -> Result<(), ApiError> {
        reminders::ActiveModel {
            id: Set(reminder.id),
            user_id: Set(reminder.user_id),
            profile_id: Set(reminder.profile_id),
            kind: Set(reminder.kind.clone()),
            message: Set(reminder.message.clone()),
            reminder_date: Set(reminder.reminder_date),
            status: Set(reminder.status.as_str().to_owned()),
            created_at: Set(reminder.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_foreign_key(e, ApiError::ProfileNotFound, "create reminder"))?;
        Ok(())
    }

    async fn dismiss(&self, id: Uuid) -> Result<(), ApiError> {
        reminders::ActiveModel {
            id: Set(id),
            status: Set(ReminderStatus::Dismissed.as_str().to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("dismiss reminder")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = reminders::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete reminder")?;
        Ok(res.rows_affected > 0)
    }
}

fn reminder_from_model(model: reminders::Model) -> Result<Reminder, ApiError> {
    let status = ReminderStatus::from_str_value(&model.status).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown status {:?} stored for reminder {}",
            model.status,
            model.id
        ))
    })?;
    Ok(Reminder {
        id: model.id,
        user_id: model.user_id,
        profile_id: model.profile_id,
        kind: model.kind,
        message: model.message,
        reminder_date: model.reminder_date,
        status,
        created_at: model.created_at,
    })
}
