use crate::admin::list::{self, ListParams, Page};
use crate::admin::ModelAdmin;
use crate::error::{AppError, AppResult};
use crate::models::{social_channel, SocialChannel, SocialChannelModel};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

pub struct SocialChannelService {
    db: DatabaseConnection,
}

impl SocialChannelService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        admin: &ModelAdmin,
        params: &ListParams,
    ) -> AppResult<Page<SocialChannelModel>> {
        let query = list::filter(SocialChannel::find(), admin, params)?;
        list::paginate(&self.db, query, admin, params).await
    }

    pub async fn get(&self, id: i32) -> AppResult<SocialChannelModel> {
        SocialChannel::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, name: &str) -> AppResult<SocialChannelModel> {
        let channel = social_channel::ActiveModel {
            name: Set(name.trim().to_string()),
            ..Default::default()
        };
        Ok(channel.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, name: &str) -> AppResult<SocialChannelModel> {
        let mut active: social_channel::ActiveModel = self.get(id).await?.into();
        active.name = Set(name.trim().to_string());
        Ok(active.update(&self.db).await?)
    }

    /// Reviews that cited the channel keep existing with no channel.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        Ok(())
    }
}
