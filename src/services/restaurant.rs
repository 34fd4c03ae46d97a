use crate::admin::list::{self, ListParams, Page};
use crate::admin::ModelAdmin;
use crate::error::{AppError, AppResult};
use crate::models::{
    restaurant, restaurant_image, restaurant_menu, restaurant_tag, Restaurant, RestaurantImage,
    RestaurantImageModel, RestaurantMenu, RestaurantMenuModel, RestaurantModel, RestaurantTag,
};
use chrono::NaiveTime;
use rust_decimal::Decimal;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Editable restaurant fields. `rating` and `rating_count` are derived
/// from reviews and never written here.
#[derive(Debug, Clone)]
pub struct RestaurantFields {
    pub name: String,
    pub branch_name: Option<String>,
    pub address: Option<String>,
    pub feature: String,
    pub category_id: Option<i32>,
    pub is_closed: bool,
    pub phone: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub description: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub last_order_time: Option<NaiveTime>,
}

#[derive(Debug, Clone)]
pub struct MenuFields {
    pub name: String,
    pub price: i32,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageFields {
    pub name: String,
    pub image: String,
    pub is_representative: bool,
    pub display_order: Option<i32>,
}

/// A restaurant with its tags and inline children.
#[derive(Debug)]
pub struct RestaurantDetail {
    pub restaurant: RestaurantModel,
    pub tag_ids: Vec<i32>,
    pub menus: Vec<RestaurantMenuModel>,
    pub images: Vec<RestaurantImageModel>,
}

pub struct RestaurantService {
    db: DatabaseConnection,
}

impl RestaurantService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Changelist query. `tags=<id>` keeps restaurants carrying that tag.
    pub async fn list(
        &self,
        admin: &ModelAdmin,
        params: &ListParams,
    ) -> AppResult<Page<RestaurantModel>> {
        let mut query = list::filter(Restaurant::find(), admin, params)?;

        if let Some(raw) = params.get("tags") {
            let tag_id: i32 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("tags expects an id, got '{}'", raw)))?;
            query = query.filter(
                restaurant::Column::Id.in_subquery(
                    Query::select()
                        .column(restaurant_tag::Column::RestaurantId)
                        .from(RestaurantTag)
                        .and_where(restaurant_tag::Column::TagId.eq(tag_id))
                        .to_owned(),
                ),
            );
        }

        list::paginate(&self.db, query, admin, params).await
    }

    pub async fn get(&self, id: i32) -> AppResult<RestaurantModel> {
        Restaurant::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn detail(&self, id: i32) -> AppResult<RestaurantDetail> {
        let restaurant = self.get(id).await?;
        let tag_ids = tag_ids(&self.db, id).await?;
        let menus = self.list_menus(id).await?;
        let images = self.list_images(id).await?;
        Ok(RestaurantDetail {
            restaurant,
            tag_ids,
            menus,
            images,
        })
    }

    pub async fn create(
        &self,
        fields: RestaurantFields,
        tags: Option<Vec<i32>>,
    ) -> AppResult<RestaurantDetail> {
        let mut active = restaurant::ActiveModel {
            rating: Set(Decimal::ZERO),
            rating_count: Set(0),
            ..Default::default()
        };
        apply_fields(&mut active, fields);

        let txn = self.db.begin().await?;
        let created = active.insert(&txn).await?;
        if let Some(tags) = tags {
            replace_tags(&txn, created.id, &tags).await?;
        }
        txn.commit().await?;

        tracing::debug!("Created restaurant {} ({})", created.id, created.display_name());
        self.detail(created.id).await
    }

    /// Overwrite the editable fields; the tag set is replaced only when
    /// `tags` is given.
    pub async fn update(
        &self,
        id: i32,
        fields: RestaurantFields,
        tags: Option<Vec<i32>>,
    ) -> AppResult<RestaurantDetail> {
        let txn = self.db.begin().await?;
        let existing = Restaurant::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: restaurant::ActiveModel = existing.into();
        apply_fields(&mut active, fields);
        active.update(&txn).await?;

        if let Some(tags) = tags {
            replace_tags(&txn, id, &tags).await?;
        }
        txn.commit().await?;

        self.detail(id).await
    }

    /// Menus, images, reviews and tag links go with the restaurant.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        Ok(())
    }

    pub async fn list_menus(&self, restaurant_id: i32) -> AppResult<Vec<RestaurantMenuModel>> {
        Ok(RestaurantMenu::find()
            .filter(restaurant_menu::Column::RestaurantId.eq(restaurant_id))
            .order_by_asc(restaurant_menu::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_menu(
        &self,
        restaurant_id: i32,
        fields: MenuFields,
    ) -> AppResult<RestaurantMenuModel> {
        self.get(restaurant_id).await?;

        let now = chrono::Utc::now().naive_utc();
        let menu = restaurant_menu::ActiveModel {
            restaurant_id: Set(restaurant_id),
            name: Set(fields.name),
            price: Set(fields.price),
            image: Set(fields.image),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(menu.insert(&self.db).await?)
    }

    pub async fn update_menu(&self, id: i32, fields: MenuFields) -> AppResult<RestaurantMenuModel> {
        let menu = RestaurantMenu::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: restaurant_menu::ActiveModel = menu.into();
        active.name = Set(fields.name);
        active.price = Set(fields.price);
        active.image = Set(fields.image);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_menu(&self, id: i32) -> AppResult<()> {
        let result = RestaurantMenu::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Images in display order; unordered images come last.
    pub async fn list_images(&self, restaurant_id: i32) -> AppResult<Vec<RestaurantImageModel>> {
        Ok(RestaurantImage::find()
            .filter(restaurant_image::Column::RestaurantId.eq(restaurant_id))
            .order_by_asc(restaurant_image::Column::DisplayOrder)
            .order_by_asc(restaurant_image::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_image(
        &self,
        restaurant_id: i32,
        fields: ImageFields,
    ) -> AppResult<RestaurantImageModel> {
        self.get(restaurant_id).await?;

        let now = chrono::Utc::now().naive_utc();
        let image = restaurant_image::ActiveModel {
            restaurant_id: Set(restaurant_id),
            name: Set(fields.name),
            image: Set(fields.image),
            is_representative: Set(fields.is_representative),
            display_order: Set(fields.display_order),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        };
        Ok(image.insert(&self.db).await?)
    }

    pub async fn update_image(
        &self,
        id: i32,
        fields: ImageFields,
    ) -> AppResult<RestaurantImageModel> {
        let image = RestaurantImage::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: restaurant_image::ActiveModel = image.into();
        active.name = Set(fields.name);
        active.image = Set(fields.image);
        active.is_representative = Set(fields.is_representative);
        active.display_order = Set(fields.display_order);
        active.modified_at = Set(chrono::Utc::now().naive_utc());
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_image(&self, id: i32) -> AppResult<()> {
        let result = RestaurantImage::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn apply_fields(active: &mut restaurant::ActiveModel, fields: RestaurantFields) {
    active.name = Set(fields.name);
    active.branch_name = Set(fields.branch_name);
    active.address = Set(fields.address);
    active.feature = Set(fields.feature);
    active.category_id = Set(fields.category_id);
    active.is_closed = Set(fields.is_closed);
    active.phone = Set(fields.phone);
    active.latitude = Set(fields.latitude);
    active.longitude = Set(fields.longitude);
    active.description = Set(fields.description);
    active.start_time = Set(fields.start_time);
    active.end_time = Set(fields.end_time);
    active.last_order_time = Set(fields.last_order_time);
}

async fn tag_ids<C: ConnectionTrait>(conn: &C, restaurant_id: i32) -> AppResult<Vec<i32>> {
    let links = RestaurantTag::find()
        .filter(restaurant_tag::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(restaurant_tag::Column::TagId)
        .all(conn)
        .await?;
    Ok(links.into_iter().map(|l| l.tag_id).collect())
}

async fn replace_tags<C: ConnectionTrait>(
    conn: &C,
    restaurant_id: i32,
    tag_ids: &[i32],
) -> AppResult<()> {
    RestaurantTag::delete_many()
        .filter(restaurant_tag::Column::RestaurantId.eq(restaurant_id))
        .exec(conn)
        .await?;

    let mut unique = tag_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.is_empty() {
        return Ok(());
    }

    RestaurantTag::insert_many(unique.into_iter().map(|tag_id| restaurant_tag::ActiveModel {
        restaurant_id: Set(restaurant_id),
        tag_id: Set(tag_id),
        ..Default::default()
    }))
    .exec(conn)
    .await?;

    Ok(())
}
