use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Statuses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Statuses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Statuses::Name).string().not_null())
                    .col(ColumnDef::new(Statuses::CategoryType).string().not_null())
                    .col(
                        ColumnDef::new(Statuses::Color)
                            .string()
                            .not_null()
                            .default("#6b7280"),
                    )
                    .col(
                        ColumnDef::new(Statuses::Icon)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Statuses::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Statuses::Description).string())
                    .col(
                        ColumnDef::new(Statuses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Statuses::Table)
                    .col(Statuses::Name)
                    .col(Statuses::CategoryType)
                    .unique()
                    .name("uq_statuses_name_category_type")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Statuses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Statuses {
    Table,
    Id,
    Name,
    CategoryType,
    Color,
    Icon,
    DisplayOrder,
    Description,
    CreatedAt,
}
