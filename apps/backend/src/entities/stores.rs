use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub address: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub preview_img: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shelves::Entity")]
    Shelves,
}

impl Related<super::shelves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shelves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
