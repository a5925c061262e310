use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Profiles::Table)
                    .col(Profiles::UserId)
                    .name("idx_profiles_user_id")
                    .to_owned(),
            )
            .await?;
        // The allocator scans for the oldest free row; the sweep scans for
        // pending profiles by age.
        manager
            .create_index(
                Index::create()
                    .table(Emails::Table)
                    .col(Emails::Status)
                    .name("idx_emails_status")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Profiles::Table)
                    .col(Profiles::Status)
                    .col(Profiles::CreatedAt)
                    .name("idx_profiles_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reminders::Table)
                    .col(Reminders::ProfileId)
                    .col(Reminders::Type)
                    .col(Reminders::CreatedAt)
                    .name("idx_reminders_profile_id_type_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reminders::Table)
                    .col(Reminders::UserId)
                    .name("idx_reminders_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_reminders_user_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reminders_profile_id_type_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_profiles_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_emails_status").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_profiles_user_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    UserId,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Emails {
    Table,
    Status,
}

#[derive(Iden)]
enum Reminders {
    Table,
    UserId,
    ProfileId,
    Type,
    CreatedAt,
}
