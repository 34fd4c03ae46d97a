use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    RestaurantId,
    Title,
    Author,
    ProfileImage,
    Content,
    Rating,
    SocialChannelId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReviewImages {
    Table,
    Id,
    ReviewId,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Restaurants {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum SocialChannels {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::RestaurantId).integer().not_null())
                    .col(ColumnDef::new(Reviews::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Reviews::Author).string_len(100).not_null())
                    .col(ColumnDef::new(Reviews::ProfileImage).string_len(100).null())
                    .col(ColumnDef::new(Reviews::Content).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::Rating)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Reviews::Rating).between(1, 5)),
                    )
                    .col(ColumnDef::new(Reviews::SocialChannelId).integer().null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reviews::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_restaurant_id")
                            .from(Reviews::Table, Reviews::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_social_channel_id")
                            .from(Reviews::Table, Reviews::SocialChannelId)
                            .to(SocialChannels::Table, SocialChannels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReviewImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReviewImages::ReviewId).integer().not_null())
                    .col(ColumnDef::new(ReviewImages::Image).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ReviewImages::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ReviewImages::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_images_review_id")
                            .from(ReviewImages::Table, ReviewImages::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        for sql in [
            "CREATE INDEX IF NOT EXISTS idx_reviews_restaurant_id ON reviews (restaurant_id)",
            "CREATE INDEX IF NOT EXISTS idx_reviews_social_channel_id ON reviews (social_channel_id)",
            "CREATE INDEX IF NOT EXISTS idx_reviews_created_at ON reviews (created_at DESC)",
            "CREATE INDEX IF NOT EXISTS idx_reviews_updated_at ON reviews (updated_at)",
            "CREATE INDEX IF NOT EXISTS idx_review_images_review_id ON review_images (review_id)",
            "CREATE INDEX IF NOT EXISTS idx_review_images_created_at ON review_images (created_at)",
            "CREATE INDEX IF NOT EXISTS idx_review_images_updated_at ON review_images (updated_at)",
        ] {
            db.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}
