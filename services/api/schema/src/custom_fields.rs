use sea_orm::entity::prelude::*;

/// Per-category-type form field definition. `(name, category_type)` is
/// unique at the store level. `options` is a JSON array, meaningful only
/// for the `select` kind.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "custom_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub category_type: String,
    pub display_order: i32,
    pub is_required: bool,
    pub options: Option<Json>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
