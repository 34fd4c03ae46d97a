use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub branch_name: Option<String>,
    pub address: Option<String>,
    pub feature: String,
    pub is_closed: bool,
    #[sea_orm(column_type = "Decimal(Some((16, 12)))")]
    pub latitude: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 12)))")]
    pub longitude: Decimal,
    /// Expected in E.164 format; stored as given.
    pub phone: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((3, 2)))")]
    pub rating: Decimal,
    pub rating_count: i32,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub last_order_time: Option<Time>,
    pub category_id: Option<i32>,
}

impl Model {
    /// `name` alone, or `name-branch_name` when the restaurant is a branch.
    pub fn display_name(&self) -> String {
        match self.branch_name.as_deref() {
            Some(branch) if !branch.is_empty() => format!("{}-{}", self.name, branch),
            _ => self.name.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restaurant_category::Entity",
        from = "Column::CategoryId",
        to = "super::restaurant_category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::restaurant_image::Entity")]
    Image,
    #[sea_orm(has_many = "super::restaurant_menu::Entity")]
    Menu,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::restaurant_tag::Entity")]
    RestaurantTag,
}

impl Related<super::restaurant_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::restaurant_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl Related<super::restaurant_menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::restaurant_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::restaurant_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::restaurant_tag::Relation::Restaurant.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(name: &str, branch_name: Option<&str>) -> Model {
        Model {
            id: 1,
            name: name.to_string(),
            branch_name: branch_name.map(str::to_string),
            address: None,
            feature: String::new(),
            is_closed: false,
            latitude: Decimal::ZERO,
            longitude: Decimal::ZERO,
            phone: "+82212345678".to_string(),
            description: None,
            rating: Decimal::ZERO,
            rating_count: 0,
            start_time: None,
            end_time: None,
            last_order_time: None,
            category_id: None,
        }
    }

    #[test]
    fn display_name_without_branch() {
        assert_eq!(restaurant("Mugyodong", None).display_name(), "Mugyodong");
    }

    #[test]
    fn display_name_with_branch() {
        assert_eq!(
            restaurant("Mugyodong", Some("Gangnam")).display_name(),
            "Mugyodong-Gangnam"
        );
    }

    #[test]
    fn display_name_ignores_empty_branch() {
        assert_eq!(restaurant("Mugyodong", Some("")).display_name(), "Mugyodong");
    }
}
