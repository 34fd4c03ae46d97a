use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Number of characters shown in the review list column.
pub const CONTENT_PARTIAL_LEN: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub restaurant_id: i32,
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub rating: i16,
    pub social_channel_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn content_partial(&self) -> String {
        self.content.chars().take(CONTENT_PARTIAL_LEN).collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id",
        on_delete = "Cascade"
    )]
    Restaurant,
    #[sea_orm(
        belongs_to = "super::social_channel::Entity",
        from = "Column::SocialChannelId",
        to = "super::social_channel::Column::Id",
        on_delete = "SetNull"
    )]
    SocialChannel,
    #[sea_orm(has_many = "super::review_image::Entity")]
    Image,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::social_channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialChannel.def()
    }
}

impl Related<super::review_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
