use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCategoryRepository, DbCustomFieldRepository, DbEmailRepository, DbProfileRepository,
    DbReminderRepository, DbStatusRepository, DbUserRepository,
};
use crate::infra::notifier::Notifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub notifier: Notifier,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn field_repo(&self) -> DbCustomFieldRepository {
        DbCustomFieldRepository {
            db: self.db.clone(),
        }
    }

    pub fn status_repo(&self) -> DbStatusRepository {
        DbStatusRepository {
            db: self.db.clone(),
        }
    }

    pub fn email_repo(&self) -> DbEmailRepository {
        DbEmailRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn reminder_repo(&self) -> DbReminderRepository {
        DbReminderRepository {
            db: self.db.clone(),
        }
    }
}
