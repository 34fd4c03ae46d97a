use crate::admin::list::{self, ListParams, Page};
use crate::admin::ModelAdmin;
use crate::error::{AppError, AppResult};
use crate::models::{article, Article, ArticleModel};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};

/// Editable article fields.
#[derive(Debug, Clone)]
pub struct ArticleFields {
    pub title: String,
    pub preview_image: Option<String>,
    pub content: String,
    pub show_at_index: bool,
    pub is_published: bool,
}

pub struct ArticleService {
    db: DatabaseConnection,
}

impl ArticleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, admin: &ModelAdmin, params: &ListParams) -> AppResult<Page<ArticleModel>> {
        let query = list::filter(Article::find(), admin, params)?;
        list::paginate(&self.db, query, admin, params).await
    }

    pub async fn get(&self, id: i32) -> AppResult<ArticleModel> {
        Article::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, fields: ArticleFields) -> AppResult<ArticleModel> {
        let now = chrono::Utc::now().naive_utc();
        let new_article = article::ActiveModel {
            title: Set(fields.title),
            preview_image: Set(fields.preview_image),
            content: Set(fields.content),
            show_at_index: Set(fields.show_at_index),
            is_published: Set(fields.is_published),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        };
        Ok(new_article.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, fields: ArticleFields) -> AppResult<ArticleModel> {
        let existing = self.get(id).await?;
        let mut active: article::ActiveModel = existing.into();
        active.title = Set(fields.title);
        active.preview_image = Set(fields.preview_image);
        active.content = Set(fields.content);
        active.show_at_index = Set(fields.show_at_index);
        active.is_published = Set(fields.is_published);
        active.modified_at = Set(chrono::Utc::now().naive_utc());
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = self.get(id).await?;
        existing.delete(&self.db).await?;
        Ok(())
    }

    /// Mark the selected articles published in a single UPDATE.
    /// Returns the number of rows changed; unknown ids are skipped.
    pub async fn make_published(&self, ids: &[i32]) -> AppResult<u64> {
        if ids.is_empty() {
            return Err(AppError::Validation("No articles selected".to_string()));
        }

        let result = Article::update_many()
            .col_expr(article::Column::IsPublished, Expr::value(true))
            .col_expr(
                article::Column::ModifiedAt,
                Expr::value(chrono::Utc::now().naive_utc()),
            )
            .filter(article::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await?;

        tracing::info!("Published {} of {} selected articles", result.rows_affected, ids.len());
        Ok(result.rows_affected)
    }
}
