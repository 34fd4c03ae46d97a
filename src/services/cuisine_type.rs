use crate::admin::list::{self, ListParams, Page};
use crate::admin::ModelAdmin;
use crate::error::{AppError, AppResult};
use crate::models::{cuisine_type, CuisineType, CuisineTypeModel};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

pub struct CuisineTypeService {
    db: DatabaseConnection,
}

impl CuisineTypeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        admin: &ModelAdmin,
        params: &ListParams,
    ) -> AppResult<Page<CuisineTypeModel>> {
        let query = list::filter(CuisineType::find(), admin, params)?;
        list::paginate(&self.db, query, admin, params).await
    }

    pub async fn get(&self, id: i32) -> AppResult<CuisineTypeModel> {
        CuisineType::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, name: &str) -> AppResult<CuisineTypeModel> {
        let cuisine = cuisine_type::ActiveModel {
            name: Set(name.trim().to_string()),
            ..Default::default()
        };
        Ok(cuisine.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, name: &str) -> AppResult<CuisineTypeModel> {
        let mut active: cuisine_type::ActiveModel = self.get(id).await?.into();
        active.name = Set(name.trim().to_string());
        Ok(active.update(&self.db).await?)
    }

    /// Cascades to the categories filed under this cuisine.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        Ok(())
    }
}
