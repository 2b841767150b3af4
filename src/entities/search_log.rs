use sea_orm::entity::prelude::*;

/// One logged search event. Append-only; never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "search_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub timestamp: i64,
    pub search_type: String,
    /// Canonical JSON of `models::SearchParams`, used as the grouping key.
    pub params: String,
    pub results_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
