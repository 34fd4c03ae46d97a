use crate::admin::list::{self, ListParams, Page};
use crate::admin::ModelAdmin;
use crate::error::{AppError, AppResult};
use crate::models::{
    restaurant, review, review_image, Restaurant, Review, ReviewImage, ReviewImageModel,
    ReviewModel,
};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct ReviewFields {
    pub restaurant_id: i32,
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    pub content: String,
    pub rating: i16,
    pub social_channel_id: Option<i32>,
}

/// A review as shown in the changelist, with its computed columns.
#[derive(Debug, Serialize)]
pub struct ReviewRow {
    #[serde(flatten)]
    pub review: ReviewModel,
    pub restaurant_name: String,
    pub content_partial: String,
}

/// Average of `ratings` to two decimal places, half away from zero.
pub fn average_rating(ratings: &[i16]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let count = Decimal::from(ratings.len() as u64);
    (Decimal::from(sum) / count).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Take row locks on the given restaurants, lowest id first, so that
/// concurrent review writes against them serialize and two moves in
/// opposite directions cannot deadlock. Missing ids are skipped.
async fn lock_restaurants<C: ConnectionTrait>(conn: &C, ids: &[i32]) -> AppResult<()> {
    let ids: BTreeSet<i32> = ids.iter().copied().collect();
    for id in ids {
        Restaurant::find_by_id(id).lock_exclusive().one(conn).await?;
    }
    Ok(())
}

/// Recompute a restaurant's rating and rating count from its reviews.
async fn refresh_rating<C: ConnectionTrait>(conn: &C, restaurant_id: i32) -> AppResult<()> {
    let ratings: Vec<i16> = Review::find()
        .select_only()
        .column(review::Column::Rating)
        .filter(review::Column::RestaurantId.eq(restaurant_id))
        .into_tuple()
        .all(conn)
        .await?;

    let count = i32::try_from(ratings.len())
        .map_err(|_| AppError::Internal(anyhow::anyhow!("review count overflow")))?;

    Restaurant::update_many()
        .col_expr(restaurant::Column::Rating, Expr::value(average_rating(&ratings)))
        .col_expr(restaurant::Column::RatingCount, Expr::value(count))
        .filter(restaurant::Column::Id.eq(restaurant_id))
        .exec(conn)
        .await?;

    Ok(())
}

pub struct ReviewService {
    db: DatabaseConnection,
}

impl ReviewService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Changelist page; each row carries the reviewed restaurant's name.
    pub async fn list(&self, admin: &ModelAdmin, params: &ListParams) -> AppResult<Page<ReviewRow>> {
        let query = list::filter(Review::find(), admin, params)?;
        let page = list::paginate(&self.db, query, admin, params).await?;

        let restaurant_ids: BTreeSet<i32> = page.items.iter().map(|r| r.restaurant_id).collect();
        let names: HashMap<i32, String> = if restaurant_ids.is_empty() {
            HashMap::new()
        } else {
            Restaurant::find()
                .filter(restaurant::Column::Id.is_in(restaurant_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|r| (r.id, r.name))
                .collect()
        };

        Ok(page.map(|review| ReviewRow {
            restaurant_name: names
                .get(&review.restaurant_id)
                .cloned()
                .unwrap_or_default(),
            content_partial: review.content_partial(),
            review,
        }))
    }

    pub async fn get(&self, id: i32) -> AppResult<ReviewModel> {
        Review::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, fields: ReviewFields) -> AppResult<ReviewModel> {
        let now = chrono::Utc::now().naive_utc();
        let restaurant_id = fields.restaurant_id;
        let new_review = review::ActiveModel {
            restaurant_id: Set(fields.restaurant_id),
            title: Set(fields.title),
            author: Set(fields.author),
            profile_image: Set(fields.profile_image),
            content: Set(fields.content),
            rating: Set(fields.rating),
            social_channel_id: Set(fields.social_channel_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        lock_restaurants(&txn, &[restaurant_id]).await?;
        let created = new_review.insert(&txn).await?;
        refresh_rating(&txn, restaurant_id).await?;
        txn.commit().await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, fields: ReviewFields) -> AppResult<ReviewModel> {
        let txn = self.db.begin().await?;
        let existing = Review::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        let previous_restaurant = existing.restaurant_id;
        lock_restaurants(&txn, &[previous_restaurant, fields.restaurant_id]).await?;

        let mut active: review::ActiveModel = existing.into();
        active.restaurant_id = Set(fields.restaurant_id);
        active.title = Set(fields.title);
        active.author = Set(fields.author);
        active.profile_image = Set(fields.profile_image);
        active.content = Set(fields.content);
        active.rating = Set(fields.rating);
        active.social_channel_id = Set(fields.social_channel_id);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        let updated = active.update(&txn).await?;

        refresh_rating(&txn, updated.restaurant_id).await?;
        if previous_restaurant != updated.restaurant_id {
            refresh_rating(&txn, previous_restaurant).await?;
        }
        txn.commit().await?;

        Ok(updated)
    }

    /// Removes the review and its images.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let existing = Review::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        lock_restaurants(&txn, &[existing.restaurant_id]).await?;
        Review::delete_by_id(id).exec(&txn).await?;
        refresh_rating(&txn, existing.restaurant_id).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn list_images(&self, review_id: i32) -> AppResult<Vec<ReviewImageModel>> {
        Ok(ReviewImage::find()
            .filter(review_image::Column::ReviewId.eq(review_id))
            .order_by_asc(review_image::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn add_image(&self, review_id: i32, image: String) -> AppResult<ReviewImageModel> {
        self.get(review_id).await?;

        let now = chrono::Utc::now().naive_utc();
        let new_image = review_image::ActiveModel {
            review_id: Set(review_id),
            image: Set(image),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(new_image.insert(&self.db).await?)
    }

    pub async fn delete_image(&self, id: i32) -> AppResult<()> {
        let result = ReviewImage::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn no_reviews_means_zero() {
        assert_eq!(average_rating(&[]), Decimal::ZERO);
    }

    #[test]
    fn whole_average() {
        assert_eq!(average_rating(&[4, 4, 4]), Decimal::from(4));
    }

    #[test]
    fn average_rounds_to_two_places() {
        assert_eq!(average_rating(&[5, 4, 4]), Decimal::from_str("4.33").unwrap());
        assert_eq!(average_rating(&[5, 5, 4]), Decimal::from_str("4.67").unwrap());
    }

    #[test]
    fn midpoint_rounds_up() {
        // 4.125 -> 4.13
        let ratings = [5, 4, 4, 4, 4, 4, 4, 4];
        assert_eq!(average_rating(&ratings), Decimal::from_str("4.13").unwrap());
    }
}
