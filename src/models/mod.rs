pub mod article;
pub mod cuisine_type;
pub mod restaurant;
pub mod restaurant_category;
pub mod restaurant_image;
pub mod restaurant_menu;
pub mod restaurant_tag;
pub mod review;
pub mod review_image;
pub mod social_channel;
pub mod tag;

pub use article::{Entity as Article, Model as ArticleModel};
pub use cuisine_type::{Entity as CuisineType, Model as CuisineTypeModel};
pub use restaurant::{Entity as Restaurant, Model as RestaurantModel};
pub use restaurant_category::{Entity as RestaurantCategory, Model as RestaurantCategoryModel};
pub use restaurant_image::{Entity as RestaurantImage, Model as RestaurantImageModel};
pub use restaurant_menu::{Entity as RestaurantMenu, Model as RestaurantMenuModel};
pub use restaurant_tag::Entity as RestaurantTag;
pub use review::{Entity as Review, Model as ReviewModel};
pub use review_image::{Entity as ReviewImage, Model as ReviewImageModel};
pub use social_channel::{Entity as SocialChannel, Model as SocialChannelModel};
pub use tag::{Entity as Tag, Model as TagModel};
