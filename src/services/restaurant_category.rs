use crate::admin::list::{self, ListParams, Page};
use crate::admin::ModelAdmin;
use crate::error::{AppError, AppResult};
use crate::models::{restaurant_category, RestaurantCategory, RestaurantCategoryModel};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

pub struct RestaurantCategoryService {
    db: DatabaseConnection,
}

impl RestaurantCategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        admin: &ModelAdmin,
        params: &ListParams,
    ) -> AppResult<Page<RestaurantCategoryModel>> {
        let query = list::filter(RestaurantCategory::find(), admin, params)?;
        list::paginate(&self.db, query, admin, params).await
    }

    pub async fn get(&self, id: i32) -> AppResult<RestaurantCategoryModel> {
        RestaurantCategory::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(
        &self,
        name: &str,
        cuisine_type_id: Option<i32>,
    ) -> AppResult<RestaurantCategoryModel> {
        let category = restaurant_category::ActiveModel {
            name: Set(name.trim().to_string()),
            cuisine_type_id: Set(cuisine_type_id),
            ..Default::default()
        };
        Ok(category.insert(&self.db).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        cuisine_type_id: Option<i32>,
    ) -> AppResult<RestaurantCategoryModel> {
        let mut active: restaurant_category::ActiveModel = self.get(id).await?.into();
        active.name = Set(name.trim().to_string());
        active.cuisine_type_id = Set(cuisine_type_id);
        Ok(active.update(&self.db).await?)
    }

    /// Restaurants in the category keep existing, uncategorised.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        Ok(())
    }
}
