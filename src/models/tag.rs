use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurant_tag::Entity")]
    RestaurantTag,
}

impl Related<super::restaurant_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantTag.def()
    }
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        super::restaurant_tag::Relation::Restaurant.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::restaurant_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
