use crate::admin::Page;
use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for every successful admin response.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Used by bulk actions to report what happened alongside the result.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// One changelist page as sent to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T: Serialize> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = match page.per_page {
            0 => 0,
            n => page.total.div_ceil(n),
        };
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64, per_page: u64) -> PaginatedResponse<i32> {
        Page {
            items: vec![],
            total,
            page: 1,
            per_page,
        }
        .into()
    }

    #[test]
    fn partial_last_page_counts() {
        assert_eq!(page(101, 100).total_pages, 2);
        assert_eq!(page(100, 100).total_pages, 1);
    }

    #[test]
    fn empty_changelist_has_no_pages() {
        assert_eq!(page(0, 100).total_pages, 0);
        assert_eq!(page(10, 0).total_pages, 0);
    }

    #[test]
    fn message_is_optional() {
        let plain = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert!(plain["message"].is_null());

        let noted = serde_json::to_value(ApiResponse::with_message(2, "2 articles published")).unwrap();
        assert_eq!(noted["message"], "2 articles published");
        assert_eq!(noted["success"], true);
    }
}
