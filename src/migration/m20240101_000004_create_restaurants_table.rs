use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden, Clone, Copy)]
enum Restaurants {
    Table,
    Id,
    Name,
    BranchName,
    Address,
    Feature,
    IsClosed,
    Latitude,
    Longitude,
    Phone,
    Description,
    Rating,
    RatingCount,
    StartTime,
    EndTime,
    LastOrderTime,
    CategoryId,
}

#[derive(DeriveIden)]
enum RestaurantTags {
    Table,
    Id,
    RestaurantId,
    TagId,
}

#[derive(DeriveIden)]
enum RestaurantCategories {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Restaurants::BranchName).string_len(100).null())
                    .col(ColumnDef::new(Restaurants::Address).string_len(255).null())
                    .col(ColumnDef::new(Restaurants::Feature).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Restaurants::IsClosed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Restaurants::Latitude)
                            .decimal_len(16, 12)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Restaurants::Longitude)
                            .decimal_len(16, 12)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Restaurants::Phone).string_len(16).not_null())
                    .col(ColumnDef::new(Restaurants::Description).text().null())
                    .col(
                        ColumnDef::new(Restaurants::Rating)
                            .decimal_len(3, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Restaurants::RatingCount)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Restaurants::RatingCount).gte(0)),
                    )
                    .col(ColumnDef::new(Restaurants::StartTime).time().null())
                    .col(ColumnDef::new(Restaurants::EndTime).time().null())
                    .col(ColumnDef::new(Restaurants::LastOrderTime).time().null())
                    .col(ColumnDef::new(Restaurants::CategoryId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurants_category_id")
                            .from(Restaurants::Table, Restaurants::CategoryId)
                            .to(RestaurantCategories::Table, RestaurantCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        let indexed = [
            ("idx_restaurants_name", Restaurants::Name),
            ("idx_restaurants_branch_name", Restaurants::BranchName),
            ("idx_restaurants_address", Restaurants::Address),
            ("idx_restaurants_latitude", Restaurants::Latitude),
            ("idx_restaurants_longitude", Restaurants::Longitude),
            ("idx_restaurants_category_id", Restaurants::CategoryId),
        ];
        for (name, col) in indexed {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Restaurants::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(RestaurantTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantTags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RestaurantTags::RestaurantId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RestaurantTags::TagId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_tags_restaurant_id")
                            .from(RestaurantTags::Table, RestaurantTags::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_tags_tag_id")
                            .from(RestaurantTags::Table, RestaurantTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_restaurant_tags_pair")
                    .table(RestaurantTags::Table)
                    .col(RestaurantTags::RestaurantId)
                    .col(RestaurantTags::TagId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_restaurant_tags_tag_id")
                    .table(RestaurantTags::Table)
                    .col(RestaurantTags::TagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}
