//! Per-model presentation rules for the admin API.
//!
//! A [`ModelAdmin`] describes how one record type is listed, searched,
//! filtered and edited. [`AdminRegistry`] maps model keys to their rules and
//! is built once at startup.

use crate::error::{AppError, AppResult};
use sea_orm::{EntityTrait, IdenStatic, Iterable};
use std::collections::BTreeMap;

pub const DEFAULT_LIST_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `field=true|false` against a boolean column.
    Boolean,
    /// `field=<id>|null` against a foreign-key column.
    ForeignKey,
    /// `field=<id>` through a join table; applied by the owning service.
    ManyToMany,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Boolean => "boolean",
            FilterKind::ForeignKey => "foreign_key",
            FilterKind::ManyToMany => "many_to_many",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    pub field: &'static str,
    pub kind: FilterKind,
}

/// Child records edited alongside their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineAdmin {
    pub model: &'static str,
    pub fk_field: &'static str,
    /// Number of blank rows an editor offers for new children.
    pub extra: u32,
}

/// A bulk action over a selection of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAction {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone)]
pub struct ModelAdmin {
    pub model: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: Vec<&'static str>,
    pub fields: Vec<&'static str>,
    pub readonly_fields: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
    pub list_filter: Vec<ListFilter>,
    pub date_hierarchy: Option<&'static str>,
    pub ordering: Vec<&'static str>,
    pub autocomplete_fields: Vec<&'static str>,
    pub inlines: Vec<InlineAdmin>,
    pub actions: Vec<AdminAction>,
    pub list_per_page: u64,
    columns: Vec<String>,
    virtual_columns: Vec<&'static str>,
    relations: Vec<&'static str>,
    labels: Vec<(&'static str, &'static str)>,
}

impl ModelAdmin {
    /// Start a configuration for entity `E`; its stored columns are taken
    /// from the entity definition.
    pub fn new<E: EntityTrait>(
        model: &'static str,
        verbose_name: &'static str,
        verbose_name_plural: &'static str,
    ) -> Self {
        Self {
            model,
            verbose_name,
            verbose_name_plural,
            list_display: vec!["id"],
            fields: Vec::new(),
            readonly_fields: Vec::new(),
            search_fields: Vec::new(),
            list_filter: Vec::new(),
            date_hierarchy: None,
            ordering: vec!["-id"],
            autocomplete_fields: Vec::new(),
            inlines: Vec::new(),
            actions: Vec::new(),
            list_per_page: DEFAULT_LIST_PER_PAGE,
            columns: E::Column::iter().map(|c| c.as_str().to_owned()).collect(),
            virtual_columns: Vec::new(),
            relations: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn list_display(mut self, fields: &[&'static str]) -> Self {
        self.list_display = fields.to_vec();
        self
    }

    pub fn fields(mut self, fields: &[&'static str]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    pub fn readonly_fields(mut self, fields: &[&'static str]) -> Self {
        self.readonly_fields = fields.to_vec();
        self
    }

    pub fn search_fields(mut self, fields: &[&'static str]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    pub fn list_filter(mut self, field: &'static str, kind: FilterKind) -> Self {
        self.list_filter.push(ListFilter { field, kind });
        self
    }

    pub fn date_hierarchy(mut self, field: &'static str) -> Self {
        self.date_hierarchy = Some(field);
        self
    }

    /// Default ordering; prefix a field with `-` for descending.
    pub fn ordering(mut self, fields: &[&'static str]) -> Self {
        self.ordering = fields.to_vec();
        self
    }

    pub fn autocomplete_fields(mut self, fields: &[&'static str]) -> Self {
        self.autocomplete_fields = fields.to_vec();
        self
    }

    pub fn inline(mut self, model: &'static str, fk_field: &'static str, extra: u32) -> Self {
        self.inlines.push(InlineAdmin {
            model,
            fk_field,
            extra,
        });
        self
    }

    pub fn action(mut self, name: &'static str, description: &'static str) -> Self {
        self.actions.push(AdminAction { name, description });
        self
    }

    /// A list column computed from the record rather than stored.
    pub fn virtual_column(mut self, name: &'static str) -> Self {
        self.virtual_columns.push(name);
        self
    }

    /// A many-to-many field backed by a join table.
    pub fn many_to_many(mut self, name: &'static str) -> Self {
        self.relations.push(name);
        self
    }

    pub fn label(mut self, field: &'static str, label: &'static str) -> Self {
        self.labels.push((field, label));
        self
    }

    pub fn list_per_page(mut self, count: u64) -> Self {
        self.list_per_page = count;
        self
    }

    pub fn is_column(&self, field: &str) -> bool {
        self.columns.iter().any(|c| *c == field)
    }

    pub fn is_virtual(&self, field: &str) -> bool {
        self.virtual_columns.iter().any(|c| *c == field)
    }

    pub fn is_many_to_many(&self, field: &str) -> bool {
        self.relations.iter().any(|r| *r == field)
    }

    pub fn find_action(&self, name: &str) -> Option<&AdminAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn find_filter(&self, field: &str) -> Option<&ListFilter> {
        self.list_filter.iter().find(|f| f.field == field)
    }

    /// Human-readable label for a field: the explicit override, otherwise the
    /// field name with `_id` dropped and underscores turned into spaces.
    pub fn field_label(&self, field: &str) -> String {
        if let Some((_, label)) = self.labels.iter().find(|(f, _)| *f == field) {
            return label.to_string();
        }
        humanize(field)
    }

    /// Labels for every field the admin surfaces.
    pub fn field_labels(&self) -> BTreeMap<&'static str, String> {
        self.list_display
            .iter()
            .chain(self.fields.iter())
            .chain(self.readonly_fields.iter())
            .map(|f| (*f, self.field_label(f)))
            .collect()
    }

    /// Check that every configured name refers to something the model has.
    pub fn check(&self) -> Result<(), String> {
        let displayable = |f: &str| self.is_column(f) || self.is_virtual(f);
        let editable = |f: &str| self.is_column(f) || self.is_many_to_many(f);

        for f in &self.list_display {
            if !displayable(*f) {
                return Err(format!("list_display: unknown field '{}'", f));
            }
        }
        for f in self.fields.iter().chain(self.readonly_fields.iter()) {
            if !editable(*f) {
                return Err(format!("fields: unknown field '{}'", f));
            }
        }
        for f in &self.search_fields {
            if !self.is_column(f) {
                return Err(format!("search_fields: '{}' is not a stored column", f));
            }
        }
        for filter in &self.list_filter {
            let known = match filter.kind {
                FilterKind::Boolean | FilterKind::ForeignKey => self.is_column(filter.field),
                FilterKind::ManyToMany => self.is_many_to_many(filter.field),
            };
            if !known {
                return Err(format!("list_filter: unknown field '{}'", filter.field));
            }
        }
        for f in &self.ordering {
            if !self.is_column(f.trim_start_matches('-')) {
                return Err(format!("ordering: '{}' is not a stored column", f));
            }
        }
        for f in &self.autocomplete_fields {
            if !editable(*f) {
                return Err(format!("autocomplete_fields: unknown field '{}'", f));
            }
        }
        if let Some(f) = self.date_hierarchy {
            if !self.is_column(f) {
                return Err(format!("date_hierarchy: '{}' is not a stored column", f));
            }
        }
        if self.list_per_page == 0 {
            return Err("list_per_page must be > 0".to_string());
        }
        Ok(())
    }
}

fn humanize(field: &str) -> String {
    let base = field.strip_suffix("_id").unwrap_or(field).replace('_', " ");
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Model key to presentation rules.
#[derive(Debug, Default)]
pub struct AdminRegistry {
    models: BTreeMap<&'static str, ModelAdmin>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, admin: ModelAdmin) -> anyhow::Result<()> {
        admin
            .check()
            .map_err(|e| anyhow::anyhow!("invalid admin for '{}': {}", admin.model, e))?;
        if self.models.contains_key(admin.model) {
            anyhow::bail!("model '{}' is already registered", admin.model);
        }
        self.models.insert(admin.model, admin);
        Ok(())
    }

    pub fn get(&self, model: &str) -> AppResult<&ModelAdmin> {
        self.models.get(model).ok_or(AppError::NotFound)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelAdmin> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
