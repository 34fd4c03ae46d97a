use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum RestaurantCategories {
    Table,
    Id,
    Name,
    CuisineTypeId,
}

#[derive(DeriveIden)]
enum CuisineTypes {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RestaurantCategories::Name)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantCategories::CuisineTypeId)
                            .integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_categories_cuisine_type_id")
                            .from(
                                RestaurantCategories::Table,
                                RestaurantCategories::CuisineTypeId,
                            )
                            .to(CuisineTypes::Table, CuisineTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_restaurant_categories_cuisine_type_id")
                    .table(RestaurantCategories::Table)
                    .col(RestaurantCategories::CuisineTypeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantCategories::Table).to_owned())
            .await
    }
}
