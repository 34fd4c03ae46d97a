pub mod admin;
pub mod article;
pub mod cuisine_type;
pub mod media;
pub mod restaurant;
pub mod restaurant_category;
pub mod review;
pub mod social_channel;
pub mod tag;

use crate::admin::{list, ModelAdmin, Page};
use crate::error::{AppError, AppResult};
use crate::response::PaginatedResponse;
use chrono::NaiveTime;
use serde::Serialize;
use serde_json::Value;

/// Project a changelist page down to the model's list columns.
fn changelist<T: Serialize>(
    page: Page<T>,
    admin: &ModelAdmin,
) -> AppResult<PaginatedResponse<Value>> {
    let items = page
        .items
        .iter()
        .map(|row| list::project(row, admin))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Page {
        items,
        total: page.total,
        page: page.page,
        per_page: page.per_page,
    }
    .into())
}

/// Accepts `HH:MM` or `HH:MM:SS`.
fn parse_time(field: &str, raw: Option<&str>) -> AppResult<Option<NaiveTime>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map(Some)
        .map_err(|_| AppError::Validation(format!("{}: invalid time '{}'", field, raw)))
}

fn format_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format("%H:%M:%S").to_string())
}
