use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum RestaurantImages {
    Table,
    Id,
    RestaurantId,
    IsRepresentative,
    DisplayOrder,
    Name,
    Image,
    CreatedAt,
    ModifiedAt,
}

#[derive(DeriveIden)]
enum RestaurantMenus {
    Table,
    Id,
    RestaurantId,
    Name,
    Price,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Restaurants {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RestaurantImages::RestaurantId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantImages::IsRepresentative)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RestaurantImages::DisplayOrder)
                            .integer()
                            .null()
                            .check(Expr::col(RestaurantImages::DisplayOrder).gte(0)),
                    )
                    .col(
                        ColumnDef::new(RestaurantImages::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantImages::Image)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantImages::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RestaurantImages::ModifiedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_images_restaurant_id")
                            .from(RestaurantImages::Table, RestaurantImages::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RestaurantMenus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantMenus::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RestaurantMenus::RestaurantId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantMenus::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantMenus::Price)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(RestaurantMenus::Price).gte(0)),
                    )
                    .col(ColumnDef::new(RestaurantMenus::Image).string_len(100).null())
                    .col(
                        ColumnDef::new(RestaurantMenus::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RestaurantMenus::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_menus_restaurant_id")
                            .from(RestaurantMenus::Table, RestaurantMenus::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        for sql in [
            "CREATE INDEX IF NOT EXISTS idx_restaurant_images_restaurant_id ON restaurant_images (restaurant_id)",
            "CREATE INDEX IF NOT EXISTS idx_restaurant_images_created_at ON restaurant_images (created_at)",
            "CREATE INDEX IF NOT EXISTS idx_restaurant_images_modified_at ON restaurant_images (modified_at)",
            "CREATE INDEX IF NOT EXISTS idx_restaurant_menus_restaurant_id ON restaurant_menus (restaurant_id)",
            "CREATE INDEX IF NOT EXISTS idx_restaurant_menus_created_at ON restaurant_menus (created_at)",
            "CREATE INDEX IF NOT EXISTS idx_restaurant_menus_updated_at ON restaurant_menus (updated_at)",
        ] {
            db.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantMenus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RestaurantImages::Table).to_owned())
            .await
    }
}
