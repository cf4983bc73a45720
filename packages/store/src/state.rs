//! Site document data model.
//!
//! These are the serialized shapes: the local backup snapshot and the
//! persistence collaborator both see this exact structure (camelCase keys).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arbitrary component properties, validated against the registry schema
/// at creation time only.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// A single content block on a page: a registry type tag plus its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub properties: PropertyMap,
}

impl SiteComponent {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }
}

/// The ordered component list for one page. Sequence order is render order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageData {
    pub components: Vec<SiteComponent>,
}

/// Page identifier → page document. BTreeMap keeps serialization stable.
pub type WebsiteData = BTreeMap<String, PageData>;

/// A page's navigation/menu metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_home_page: Option<bool>,
    pub order: usize,
}

impl Page {
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            description: None,
            is_home_page: None,
            order: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn home_page(mut self) -> Self {
        self.is_home_page = Some(true);
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }
}

/// Partial page update, merged field-by-field into an existing entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_home_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub order: Option<usize>,
}

impl PagePatch {
    pub fn apply_to(&self, page: &mut Page) {
        if let Some(id) = &self.id {
            page.id = id.clone();
        }
        if let Some(title) = &self.title {
            page.title = title.clone();
        }
        if let Some(slug) = &self.slug {
            page.slug = slug.clone();
        }
        if let Some(description) = &self.description {
            page.description = Some(description.clone());
        }
        if let Some(is_home_page) = self.is_home_page {
            page.is_home_page = Some(is_home_page);
        }
        if let Some(order) = self.order {
            page.order = order;
        }
    }
}

/// Ordered page list shown in the site navigation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Navigation {
    pub pages: Vec<Page>,
}

impl Navigation {
    pub fn find_page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }
}

/// Edit metadata. `version` is the monotonic change counter; selection
/// fields track UI focus and do not participate in the counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Unix millis of the last content mutation
    pub last_updated: i64,
    /// Increments on every content mutation
    pub version: u64,
    pub active_page: String,
    #[serde(default)]
    pub active_component_id: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            last_updated: 0,
            version: 1,
            active_page: "home".to_string(),
            active_component_id: None,
        }
    }
}

/// Full store snapshot: what the backup slot holds and what the persistence
/// collaborator receives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteState {
    pub website_data: WebsiteData,
    pub navigation: Navigation,
    pub metadata: Metadata,
}
