use super::registry::{AdminRegistry, FilterKind, ModelAdmin};
use crate::models::{Article, CuisineType, Restaurant, RestaurantCategory, Review, SocialChannel, Tag};

pub const MAKE_PUBLISHED: &str = "make_published";

/// Build the presentation rules for every model the admin manages.
pub fn default_registry() -> anyhow::Result<AdminRegistry> {
    let mut registry = AdminRegistry::new();

    registry.register(
        ModelAdmin::new::<Article>("article", "Article", "Articles")
            .list_display(&[
                "id",
                "title",
                "show_at_index",
                "is_published",
                "created_at",
                "modified_at",
            ])
            .fields(&["title", "preview_image", "content", "show_at_index", "is_published"])
            .readonly_fields(&["created_at", "modified_at"])
            .search_fields(&["title"])
            .list_filter("show_at_index", FilterKind::Boolean)
            .list_filter("is_published", FilterKind::Boolean)
            .date_hierarchy("created_at")
            .action(MAKE_PUBLISHED, "Mark selected articles as published"),
    )?;

    registry.register(
        ModelAdmin::new::<Tag>("tag", "Tag", "Tags")
            .list_display(&["id", "name"])
            .fields(&["name"])
            .search_fields(&["name"]),
    )?;

    registry.register(
        ModelAdmin::new::<Restaurant>("restaurant", "Restaurant", "Restaurants")
            .many_to_many("tags")
            .list_display(&["name", "branch_name", "is_closed", "phone", "rating"])
            .fields(&[
                "name",
                "branch_name",
                "address",
                "feature",
                "category_id",
                "is_closed",
                "phone",
                "latitude",
                "longitude",
                "description",
                "start_time",
                "end_time",
                "last_order_time",
                "tags",
            ])
            .readonly_fields(&["rating", "rating_count"])
            .search_fields(&["name", "branch_name"])
            .list_filter("tags", FilterKind::ManyToMany)
            .autocomplete_fields(&["tags"])
            .inline("restaurant_menu", "restaurant_id", 1)
            .inline("restaurant_image", "restaurant_id", 1)
            .label("phone", "Phone (E.164)")
            .label("category_id", "Category"),
    )?;

    registry.register(
        ModelAdmin::new::<RestaurantCategory>(
            "restaurant_category",
            "Restaurant category",
            "Restaurant categories",
        )
        .list_display(&["name"])
        .fields(&["cuisine_type_id", "name"])
        .search_fields(&["name"])
        .list_filter("cuisine_type_id", FilterKind::ForeignKey),
    )?;

    registry.register(
        ModelAdmin::new::<CuisineType>("cuisine_type", "Cuisine type", "Cuisine types")
            .list_display(&["id", "name"])
            .fields(&["name"])
            .search_fields(&["name"]),
    )?;

    registry.register(
        ModelAdmin::new::<Review>("review", "Review", "Reviews")
            .virtual_column("restaurant_name")
            .virtual_column("content_partial")
            .list_display(&["id", "restaurant_name", "author", "rating", "content_partial"])
            .fields(&[
                "restaurant_id",
                "title",
                "author",
                "profile_image",
                "content",
                "rating",
                "social_channel_id",
            ])
            .readonly_fields(&["created_at", "updated_at"])
            .search_fields(&["title", "author"])
            .list_filter("social_channel_id", FilterKind::ForeignKey)
            .ordering(&["-created_at"])
            .inline("review_image", "review_id", 1)
            .label("restaurant_name", "Restaurant")
            .label("content_partial", "Content"),
    )?;

    registry.register(
        ModelAdmin::new::<SocialChannel>("social_channel", "Social channel", "Social channels")
            .list_display(&["id", "name"])
            .fields(&["name"])
            .search_fields(&["name"]),
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_builds() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn article_exposes_publish_action() {
        let registry = default_registry().unwrap();
        let article = registry.get("article").unwrap();
        assert_eq!(article.actions.len(), 1);
        let action = article.find_action(MAKE_PUBLISHED).unwrap();
        assert_eq!(action.description, "Mark selected articles as published");
        assert_eq!(article.date_hierarchy, Some("created_at"));
    }

    #[test]
    fn tag_has_no_inlines() {
        let registry = default_registry().unwrap();
        assert!(registry.get("tag").unwrap().inlines.is_empty());
    }

    #[test]
    fn restaurant_inlines_menus_and_images() {
        let registry = default_registry().unwrap();
        let restaurant = registry.get("restaurant").unwrap();
        let inlines: Vec<_> = restaurant.inlines.iter().map(|i| i.model).collect();
        assert_eq!(inlines, vec!["restaurant_menu", "restaurant_image"]);
        assert!(restaurant.inlines.iter().all(|i| i.extra == 1));
        assert!(!restaurant.fields.contains(&"rating"));
        assert!(restaurant.readonly_fields.contains(&"rating_count"));
    }

    #[test]
    fn review_lists_virtual_columns_newest_first() {
        let registry = default_registry().unwrap();
        let review = registry.get("review").unwrap();
        assert!(review.list_display.contains(&"restaurant_name"));
        assert!(review.list_display.contains(&"content_partial"));
        assert!(!review.is_column("content_partial"));
        assert_eq!(review.ordering, vec!["-created_at"]);
        assert_eq!(review.field_label("restaurant_name"), "Restaurant");
    }

    #[test]
    fn inline_children_are_not_top_level_models() {
        let registry = default_registry().unwrap();
        assert!(registry.get("restaurant_menu").is_err());
        assert!(registry.get("review_image").is_err());
    }
}
