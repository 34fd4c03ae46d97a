use crate::admin::{AdminRegistry, ModelAdmin};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use axum::{extract::Path, response::IntoResponse, Extension};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ListFilterResponse {
    pub field: String,
    /// `boolean`, `foreign_key` or `many_to_many`
    pub kind: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InlineResponse {
    pub model: String,
    pub fk_field: String,
    pub extra: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub name: String,
    pub description: String,
}

/// Presentation rules for one model.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelAdminResponse {
    pub model: String,
    pub verbose_name: String,
    pub verbose_name_plural: String,
    pub list_display: Vec<String>,
    pub fields: Vec<String>,
    pub readonly_fields: Vec<String>,
    pub search_fields: Vec<String>,
    pub list_filter: Vec<ListFilterResponse>,
    pub date_hierarchy: Option<String>,
    pub ordering: Vec<String>,
    pub autocomplete_fields: Vec<String>,
    pub inlines: Vec<InlineResponse>,
    pub actions: Vec<ActionResponse>,
    pub list_per_page: u64,
    /// Field name to human-readable label
    pub labels: BTreeMap<String, String>,
}

fn names(fields: &[&'static str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

impl From<&ModelAdmin> for ModelAdminResponse {
    fn from(a: &ModelAdmin) -> Self {
        Self {
            model: a.model.to_string(),
            verbose_name: a.verbose_name.to_string(),
            verbose_name_plural: a.verbose_name_plural.to_string(),
            list_display: names(&a.list_display),
            fields: names(&a.fields),
            readonly_fields: names(&a.readonly_fields),
            search_fields: names(&a.search_fields),
            list_filter: a
                .list_filter
                .iter()
                .map(|f| ListFilterResponse {
                    field: f.field.to_string(),
                    kind: f.kind.as_str().to_string(),
                })
                .collect(),
            date_hierarchy: a.date_hierarchy.map(str::to_string),
            ordering: names(&a.ordering),
            autocomplete_fields: names(&a.autocomplete_fields),
            inlines: a
                .inlines
                .iter()
                .map(|i| InlineResponse {
                    model: i.model.to_string(),
                    fk_field: i.fk_field.to_string(),
                    extra: i.extra,
                })
                .collect(),
            actions: a
                .actions
                .iter()
                .map(|act| ActionResponse {
                    name: act.name.to_string(),
                    description: act.description.to_string(),
                })
                .collect(),
            list_per_page: a.list_per_page,
            labels: a
                .field_labels()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/models",
    responses(
        (status = 200, description = "Every registered model", body = Vec<ModelAdminResponse>),
    ),
    tag = "admin"
)]
pub async fn list_models(
    Extension(registry): Extension<Arc<AdminRegistry>>,
) -> AppResult<impl IntoResponse> {
    let models: Vec<ModelAdminResponse> = registry.iter().map(ModelAdminResponse::from).collect();
    Ok(ApiResponse::ok(models))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/models/{model}",
    params(("model" = String, Path, description = "Model key, e.g. `restaurant`")),
    responses(
        (status = 200, description = "Presentation rules", body = ModelAdminResponse),
        (status = 404, description = "Model not registered", body = AppError),
    ),
    tag = "admin"
)]
pub async fn get_model(
    Extension(registry): Extension<Arc<AdminRegistry>>,
    Path(model): Path<String>,
) -> AppResult<impl IntoResponse> {
    let admin = registry.get(&model)?;
    Ok(ApiResponse::ok(ModelAdminResponse::from(admin)))
}
