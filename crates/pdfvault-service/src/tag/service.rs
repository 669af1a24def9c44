//! Access-tag listing, editing and bulk actions.
//!
//! Category labels, colors and the default color all come from the
//! [`CatalogConfig`]; nothing here hard-codes them.

use std::cmp::Reverse;

use serde::Serialize;
use tracing::info;

use pdfvault_client::api::TagApi;
use pdfvault_client::dto::{
    BulkResponse, BulkTagRequest, CreateTagRequest, MessageResponse, UpdateTagRequest,
};
use pdfvault_core::config::{CatalogConfig, TagCategoryConfig};
use pdfvault_core::{AppError, AppResult};
use pdfvault_entity::tag::{AccessTag, BulkTagAction, TagFilter, TagSort, TagStats};

/// A tag to create; unset fields take catalog defaults.
#[derive(Debug, Clone, Default)]
pub struct NewTag {
    /// Tag name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Category value.
    pub category: Option<String>,
    /// Badge color.
    pub color: Option<String>,
}

/// Changes to an existing tag.
#[derive(Debug, Clone, Default)]
pub struct TagEdit {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// Activation flag.
    pub is_active: Option<bool>,
}

/// A catalog category with its current tag count.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOverview {
    /// Category definition.
    #[serde(flatten)]
    pub category: TagCategoryConfig,
    /// Tags in the category.
    pub count: u64,
}

/// Manages access tags.
#[derive(Debug, Clone)]
pub struct TagService {
    api: TagApi,
    catalog: CatalogConfig,
}

impl TagService {
    /// Create the service.
    pub fn new(api: TagApi, catalog: CatalogConfig) -> Self {
        Self { api, catalog }
    }

    /// The category table.
    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    /// Display entry for a category value; unknown values get the default
    /// category's entry.
    pub fn category_info(&self, value: &str) -> Option<&TagCategoryConfig> {
        self.catalog.category(value)
    }

    /// Tags matching `filter`, ordered by `filter.sort`.
    ///
    /// The filter is applied again locally so the result does not depend on
    /// how faithfully the backend honors it.
    pub async fn list(&self, filter: &TagFilter) -> AppResult<Vec<AccessTag>> {
        if let Some(category) = &filter.category {
            self.check_category(category)?;
        }
        let response = self.api.list(filter).await?;
        let mut tags = filter_tags(response.tags, filter);
        sort_tags(&mut tags, filter.sort);
        Ok(tags)
    }

    /// Aggregate statistics.
    pub async fn stats(&self) -> AppResult<TagStats> {
        self.api.stats().await
    }

    /// Every catalog category with its tag count, in catalog order.
    ///
    /// Categories the backend reports but the catalog does not know are
    /// folded into the default category.
    pub async fn categories(&self) -> AppResult<Vec<CategoryOverview>> {
        let stats = self.api.stats().await?;
        let mut overview: Vec<CategoryOverview> = self
            .catalog
            .categories
            .iter()
            .map(|category| CategoryOverview {
                category: category.clone(),
                count: 0,
            })
            .collect();

        for bucket in &stats.category_breakdown {
            let value = self
                .catalog
                .category(&bucket.category)
                .map(|c| c.value.clone())
                .unwrap_or_else(|| self.catalog.default_category.clone());
            if let Some(entry) = overview.iter_mut().find(|o| o.category.value == value) {
                entry.count += bucket.count;
            }
        }
        Ok(overview)
    }

    /// Active tags that can be assigned.
    pub async fn available(&self, category: Option<&str>) -> AppResult<Vec<AccessTag>> {
        self.api.available(category, None).await
    }

    /// Most used tags.
    pub async fn popular(&self, limit: u32) -> AppResult<Vec<AccessTag>> {
        self.api.popular(limit.max(1)).await
    }

    /// Create a tag.
    pub async fn create(&self, tag: NewTag) -> AppResult<AccessTag> {
        let category = tag
            .category
            .unwrap_or_else(|| self.catalog.default_category.clone());
        self.check_category(&category)?;

        let request = CreateTagRequest {
            name: tag.name.trim().to_string(),
            description: tag.description.filter(|d| !d.trim().is_empty()),
            category,
            color: tag
                .color
                .unwrap_or_else(|| self.catalog.default_color.clone()),
        };
        let created = self.api.create(&request).await?;
        info!(tag_id = %created.id, name = %created.name, "Access tag created");
        Ok(created)
    }

    /// Update a tag.
    pub async fn update(&self, tag_id: &str, edit: TagEdit) -> AppResult<AccessTag> {
        if let Some(category) = &edit.category {
            self.check_category(category)?;
        }
        let request = UpdateTagRequest {
            name: edit.name.map(|n| n.trim().to_string()),
            description: edit.description,
            category: edit.category,
            color: edit.color,
            is_active: edit.is_active,
        };
        if request.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        let updated = self.api.update(tag_id, &request).await?;
        info!(tag_id = %updated.id, "Access tag updated");
        Ok(updated)
    }

    /// Delete a tag.
    pub async fn delete(&self, tag_id: &str) -> AppResult<MessageResponse> {
        let response = self.api.delete(tag_id).await?;
        info!(tag_id = %tag_id, "Access tag deleted");
        Ok(response)
    }

    /// Apply `action` to every tag in `tag_ids`.
    pub async fn bulk(&self, action: BulkTagAction, tag_ids: Vec<String>) -> AppResult<BulkResponse> {
        if tag_ids.is_empty() {
            return Err(AppError::validation("Select at least one tag"));
        }
        let response = self.api.bulk(&BulkTagRequest { action, tag_ids }).await?;
        info!(
            action = %action,
            modified = response.modified_count,
            matched = response.matched_count,
            "Bulk tag action applied"
        );
        Ok(response)
    }

    fn check_category(&self, category: &str) -> AppResult<()> {
        if self.catalog.is_known_category(category) {
            return Ok(());
        }
        let known: Vec<&str> = self
            .catalog
            .categories
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        Err(AppError::validation(format!(
            "Unknown category '{category}'. Expected one of: {}",
            known.join(", ")
        )))
    }
}

/// Keep the tags matching `filter`.
pub fn filter_tags(tags: Vec<AccessTag>, filter: &TagFilter) -> Vec<AccessTag> {
    let needle = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    tags.into_iter()
        .filter(|tag| filter.category.as_ref().is_none_or(|c| &tag.category == c))
        .filter(|tag| filter.active.is_none_or(|a| tag.is_active == a))
        .filter(|tag| {
            needle.as_ref().is_none_or(|needle| {
                tag.name.to_lowercase().contains(needle.as_str())
                    || tag
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle.as_str()))
            })
        })
        .collect()
}

/// Order tags in place. Ties fall back to the name.
pub fn sort_tags(tags: &mut [AccessTag], sort: TagSort) {
    match sort {
        TagSort::Name => tags.sort_by(|a, b| a.name.cmp(&b.name)),
        TagSort::Category => {
            tags.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)))
        }
        TagSort::Usage => tags.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.name.cmp(&b.name))
        }),
        TagSort::Created => {
            tags.sort_by_key(|t| (Reverse(t.created_at), t.name.clone()));
        }
    }
}
