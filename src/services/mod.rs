pub mod article;
pub mod cuisine_type;
pub mod media;
pub mod restaurant;
pub mod restaurant_category;
pub mod review;
pub mod social_channel;
pub mod tag;
