use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomFields::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomFields::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomFields::Name).string().not_null())
                    .col(ColumnDef::new(CustomFields::Type).string().not_null())
                    .col(ColumnDef::new(CustomFields::CategoryType).string().not_null())
                    .col(
                        ColumnDef::new(CustomFields::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CustomFields::IsRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CustomFields::Options).json_binary())
                    .col(ColumnDef::new(CustomFields::Description).string())
                    .col(
                        ColumnDef::new(CustomFields::CreatedAt)
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
                    .table(CustomFields::Table)
                    .col(CustomFields::Name)
                    .col(CustomFields::CategoryType)
                    .unique()
                    .name("uq_custom_fields_name_category_type")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomFields::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CustomFields {
    Table,
    Id,
    Name,
    Type,
    CategoryType,
    DisplayOrder,
    IsRequired,
    Options,
    Description,
    CreatedAt,
}
