use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "cuisine_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurant_category::Entity")]
    RestaurantCategory,
}

impl Related<super::restaurant_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
