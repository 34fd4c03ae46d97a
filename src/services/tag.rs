use crate::admin::list::{self, ListParams, Page};
use crate::admin::ModelAdmin;
use crate::error::{AppError, AppResult};
use crate::models::{tag, Tag, TagModel};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

pub struct TagService {
    db: DatabaseConnection,
}

impl TagService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, admin: &ModelAdmin, params: &ListParams) -> AppResult<Page<TagModel>> {
        let query = list::filter(Tag::find(), admin, params)?;
        list::paginate(&self.db, query, admin, params).await
    }

    pub async fn get(&self, id: i32) -> AppResult<TagModel> {
        Tag::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, name: &str) -> AppResult<TagModel> {
        let new_tag = tag::ActiveModel {
            name: Set(name.trim().to_string()),
            ..Default::default()
        };
        Ok(new_tag.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, name: &str) -> AppResult<TagModel> {
        let mut active: tag::ActiveModel = self.get(id).await?.into();
        active.name = Set(name.trim().to_string());
        Ok(active.update(&self.db).await?)
    }

    /// Deleting a tag also drops it from every restaurant that carried it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        Ok(())
    }
}
