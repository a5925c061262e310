use sea_orm::entity::prelude::*;

/// Per-category-type profile status template. `(name, category_type)` is
/// unique at the store level. Profiles reference statuses by name, not by
/// id — see the loose-matching note in DESIGN.md.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "statuses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category_type: String,
    pub color: String,
    pub icon: String,
    pub display_order: i32,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
