use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profiles::UserId).uuid().not_null())
                    .col(ColumnDef::new(Profiles::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Profiles::SiteName).string().not_null())
                    .col(ColumnDef::new(Profiles::Status).string().not_null())
                    .col(ColumnDef::new(Profiles::Username).string().not_null())
                    .col(ColumnDef::new(Profiles::Password).string().not_null())
                    .col(ColumnDef::new(Profiles::VerificationStatus).string())
                    .col(ColumnDef::new(Profiles::Phone).string())
                    .col(ColumnDef::new(Profiles::RegistrationStatus).string())
                    .col(ColumnDef::new(Profiles::RegistrationCountry).string())
                    .col(ColumnDef::new(Profiles::IpCountry).string())
                    .col(ColumnDef::new(Profiles::Comments).text())
                    .col(ColumnDef::new(Profiles::AssignedEmail).string())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Profiles::Table, Profiles::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    // Restrict keeps a claimed address from being deleted
                    // out from under the profile that holds it.
                    .foreign_key(
                        ForeignKey::create()
                            .from(Profiles::Table, Profiles::AssignedEmail)
                            .to(Emails::Table, Emails::Email)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    UserId,
    CategoryId,
    SiteName,
    Status,
    Username,
    Password,
    VerificationStatus,
    Phone,
    RegistrationStatus,
    RegistrationCountry,
    IpCountry,
    Comments,
    AssignedEmail,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
}

#[derive(Iden)]
enum Emails {
    Table,
    Email,
}
