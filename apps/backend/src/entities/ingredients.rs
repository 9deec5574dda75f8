use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    /// Recipe that produces this ingredient, if any.
    pub recipe_id: Option<i64>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recipes::Entity",
        from = "Column::RecipeId",
        to = "super::recipes::Column::Id",
        on_delete = "SetNull"
    )]
    Recipe,
    #[sea_orm(has_many = "super::shelves::Entity")]
    Shelves,
}

impl Related<super::shelves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shelves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
