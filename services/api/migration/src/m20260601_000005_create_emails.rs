use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Emails::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Emails::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Emails::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Emails::Password).string().not_null())
                    .col(
                        ColumnDef::new(Emails::Status)
                            .string()
                            .not_null()
                            .default("free"),
                    )
                    .col(ColumnDef::new(Emails::Notes).string())
                    .col(ColumnDef::new(Emails::UsedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Emails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Emails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Emails {
    Table,
    Id,
    Email,
    Password,
    Status,
    Notes,
    UsedAt,
    CreatedAt,
}
