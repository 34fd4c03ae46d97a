use sea_orm_migration::prelude::*;

mod m20240101_000001_create_articles_table;
mod m20240101_000002_create_lookup_tables;
mod m20240101_000003_create_restaurant_categories_table;
mod m20240101_000004_create_restaurants_table;
mod m20240101_000005_create_restaurant_media_tables;
mod m20240101_000006_create_reviews_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_articles_table::Migration),
            Box::new(m20240101_000002_create_lookup_tables::Migration),
            Box::new(m20240101_000003_create_restaurant_categories_table::Migration),
            Box::new(m20240101_000004_create_restaurants_table::Migration),
            Box::new(m20240101_000005_create_restaurant_media_tables::Migration),
            Box::new(m20240101_000006_create_reviews_tables::Migration),
        ]
    }
}
