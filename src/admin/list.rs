//! Generic changelist queries driven by a [`ModelAdmin`].

use super::registry::{FilterKind, ModelAdmin};
use crate::error::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

pub const MAX_PER_PAGE: u64 = 500;

/// Raw changelist query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    raw: HashMap<String, String>,
}

impl ListParams {
    pub fn new(raw: HashMap<String, String>) -> Self {
        Self { raw }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    /// The `q` parameter, if it carries anything besides whitespace.
    pub fn search(&self) -> Option<&str> {
        self.get("q").map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn page(&self) -> AppResult<u64> {
        match self.get("page") {
            None => Ok(1),
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| AppError::Validation(format!("invalid page '{}'", raw))),
        }
    }

    pub fn per_page(&self, admin: &ModelAdmin) -> AppResult<u64> {
        let per_page = match self.get("per_page") {
            None => admin.list_per_page,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| AppError::Validation(format!("invalid per_page '{}'", raw)))?,
        };
        Ok(per_page.min(MAX_PER_PAGE))
    }
}

/// One page of a changelist.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn parse_component(params: &ListParams, key: &str) -> AppResult<Option<u32>> {
    params
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| AppError::Validation(format!("invalid {} '{}'", key, raw)))
        })
        .transpose()
}

fn midnight(date: NaiveDate) -> AppResult<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Validation(format!("invalid date {}", date)))
}

/// Half-open `[start, end)` range selected by `<field>__year`,
/// `<field>__month` and `<field>__day`.
pub fn date_range(
    params: &ListParams,
    field: &str,
) -> AppResult<Option<(NaiveDateTime, NaiveDateTime)>> {
    let year = parse_component(params, &format!("{}__year", field))?;
    let month = parse_component(params, &format!("{}__month", field))?;
    let day = parse_component(params, &format!("{}__day", field))?;

    let invalid = || AppError::Validation(format!("invalid date for {}", field));

    let (start, end) = match (year, month, day) {
        (None, None, None) => return Ok(None),
        (Some(y), None, None) => {
            let y = i32::try_from(y).map_err(|_| invalid())?;
            let start = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let end = NaiveDate::from_ymd_opt(y + 1, 1, 1).ok_or_else(invalid)?;
            (start, end)
        }
        (Some(y), Some(m), None) => {
            let y = i32::try_from(y).map_err(|_| invalid())?;
            let start = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
            let end = if m == 12 {
                NaiveDate::from_ymd_opt(y + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(y, m + 1, 1)
            }
            .ok_or_else(invalid)?;
            (start, end)
        }
        (Some(y), Some(m), Some(d)) => {
            let y = i32::try_from(y).map_err(|_| invalid())?;
            let start = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)?;
            let end = start.succ_opt().ok_or_else(invalid)?;
            (start, end)
        }
        _ => {
            return Err(AppError::Validation(format!(
                "{0}__month requires {0}__year and {0}__day requires {0}__month",
                field
            )))
        }
    };

    Ok(Some((midnight(start)?, midnight(end)?)))
}

pub fn column<E: EntityTrait>(name: &str) -> AppResult<E::Column> {
    E::Column::from_str(name)
        .map_err(|_| AppError::Validation(format!("unknown field '{}'", name)))
}

fn search_condition<E: EntityTrait>(admin: &ModelAdmin, term: &str) -> AppResult<Condition> {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    let mut cond = Condition::any();
    for field in &admin.search_fields {
        let col = column::<E>(field)?;
        cond = cond.add(
            Expr::expr(Func::lower(Expr::col((E::default(), col))))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        );
    }
    Ok(cond)
}

/// Requested ordering: the `o` parameter when given, otherwise the
/// model's default. Each entry is `(field, descending)`.
pub fn ordering<'a>(
    admin: &'a ModelAdmin,
    params: &'a ListParams,
) -> AppResult<Vec<(&'a str, bool)>> {
    let requested = params.get("o").map(str::trim).filter(|o| !o.is_empty());

    let Some(raw) = requested else {
        return Ok(admin
            .ordering
            .iter()
            .map(|f| match f.strip_prefix('-') {
                Some(name) => (name, true),
                None => (*f, false),
            })
            .collect());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| {
            let (name, desc) = match f.strip_prefix('-') {
                Some(name) => (name, true),
                None => (f, false),
            };
            let sortable = name == "id"
                || (admin.is_column(name) && admin.list_display.iter().any(|d| *d == name));
            if !sortable {
                return Err(AppError::Validation(format!(
                    "cannot order {} by '{}'",
                    admin.model, name
                )));
            }
            Ok((name, desc))
        })
        .collect()
}

/// Apply search, filters, date hierarchy and ordering from `params`.
///
/// Many-to-many filters are left to the caller since they need a join
/// table the generic layer does not know about.
pub fn filter<E: EntityTrait>(
    mut query: Select<E>,
    admin: &ModelAdmin,
    params: &ListParams,
) -> AppResult<Select<E>> {
    if let Some(term) = params.search() {
        if !admin.search_fields.is_empty() {
            query = query.filter(search_condition::<E>(admin, term)?);
        }
    }

    for f in &admin.list_filter {
        let Some(raw) = params.get(f.field) else {
            continue;
        };
        match f.kind {
            FilterKind::Boolean => {
                let value = parse_bool(raw).ok_or_else(|| {
                    AppError::Validation(format!("{} expects a boolean, got '{}'", f.field, raw))
                })?;
                query = query.filter(column::<E>(f.field)?.eq(value));
            }
            FilterKind::ForeignKey => {
                let col = column::<E>(f.field)?;
                if raw.eq_ignore_ascii_case("null") {
                    query = query.filter(col.is_null());
                } else {
                    let id: i32 = raw.trim().parse().map_err(|_| {
                        AppError::Validation(format!("{} expects an id, got '{}'", f.field, raw))
                    })?;
                    query = query.filter(col.eq(id));
                }
            }
            FilterKind::ManyToMany => {}
        }
    }

    if let Some(field) = admin.date_hierarchy {
        if let Some((start, end)) = date_range(params, field)? {
            let col = column::<E>(field)?;
            query = query.filter(col.gte(start)).filter(col.lt(end));
        }
    }

    let order = ordering(admin, params)?;
    let mut has_id = false;
    for (name, desc) in order {
        has_id |= name == "id";
        let dir = if desc { Order::Desc } else { Order::Asc };
        query = query.order_by(column::<E>(name)?, dir);
    }
    if !has_id {
        query = query.order_by(column::<E>("id")?, Order::Desc);
    }

    Ok(query)
}

/// Run `query` for the requested page.
pub async fn paginate<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    admin: &ModelAdmin,
    params: &ListParams,
) -> AppResult<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let page = params.page()?;
    let per_page = params.per_page(admin)?;

    let paginator = query.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        total,
        page,
        per_page,
    })
}

/// Reduce a serialized row to `id` plus the model's `list_display` columns.
pub fn project<T: Serialize>(row: &T, admin: &ModelAdmin) -> AppResult<Value> {
    let value = serde_json::to_value(row).map_err(|e| AppError::Internal(e.into()))?;
    let Value::Object(full) = value else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "{} row is not a JSON object",
            admin.model
        )));
    };

    let mut out = Map::new();
    out.insert(
        "id".to_string(),
        full.get("id").cloned().unwrap_or(Value::Null),
    );
    for field in &admin.list_display {
        out.insert(
            field.to_string(),
            full.get(*field).cloned().unwrap_or(Value::Null),
        );
    }
    Ok(Value::Object(out))
}
