use sea_orm_migration::prelude::*;

mod m20260601_000001_create_users;
mod m20260601_000002_create_categories;
mod m20260601_000003_create_custom_fields;
mod m20260601_000004_create_statuses;
mod m20260601_000005_create_emails;
mod m20260601_000006_create_profiles;
mod m20260601_000007_create_reminders;
mod m20260601_000008_add_missing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_users::Migration),
            Box::new(m20260601_000002_create_categories::Migration),
            Box::new(m20260601_000003_create_custom_fields::Migration),
            Box::new(m20260601_000004_create_statuses::Migration),
            Box::new(m20260601_000005_create_emails::Migration),
            Box::new(m20260601_000006_create_profiles::Migration),
            Box::new(m20260601_000007_create_reminders::Migration),
            Box::new(m20260601_000008_add_missing_indexes::Migration),
        ]
    }
}
