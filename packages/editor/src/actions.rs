//! Page-management actions.
//!
//! [`PageActions`] is the session's remote collaborator: a stand-in for the
//! server-side page CRUD and site save endpoints. The session validates
//! input, calls the collaborator, and only then mutates the store, so a
//! rejected action leaves the document untouched.
//!
//! [`MockPageActions`] returns canned payloads and records calls; it backs
//! tests and any shell running without a server.

use crate::errors::EditorError;
use sitewright_store::{Page, PagePatch, SiteState};

pub trait PageActions {
    fn get_pages(&mut self, site_id: &str) -> Result<Vec<Page>, EditorError>;

    fn create_page(&mut self, site_id: &str, page: &Page) -> Result<(), EditorError>;

    fn update_page(
        &mut self,
        site_id: &str,
        page_id: &str,
        patch: &PagePatch,
    ) -> Result<(), EditorError>;

    fn delete_page(&mut self, site_id: &str, page_id: &str) -> Result<(), EditorError>;

    fn reorder_pages(&mut self, site_id: &str, page_ids: &[String]) -> Result<(), EditorError>;

    /// Persist the full site snapshot. This is the save the session's
    /// unsaved-changes tracking is about.
    fn save_website_data(&mut self, site_id: &str, state: &SiteState) -> Result<(), EditorError>;
}

/// Lowercased, hyphen-separated slug derived from a page title
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Build a navigation entry for a new page, rejecting empty titles and
/// duplicate slugs. The page id equals the slug.
pub fn validate_new_page(
    title: &str,
    description: Option<&str>,
    existing: &[Page],
) -> Result<Page, EditorError> {
    if title.trim().is_empty() {
        return Err(EditorError::EmptyTitle);
    }

    let slug = slugify(title);
    if slug.is_empty() {
        return Err(EditorError::EmptyTitle);
    }
    if existing.iter().any(|p| p.slug == slug) {
        return Err(EditorError::DuplicateSlug(slug));
    }

    let mut page = Page::new(slug.clone(), title.trim(), slug).with_order(existing.len());
    if let Some(description) = description {
        page = page.with_description(description);
    }
    Ok(page)
}

/// In-memory stand-in for the server actions
pub struct MockPageActions {
    pages: Vec<Page>,
    /// When set, every call fails with this message
    failure: Option<String>,
    pub save_count: usize,
}

impl MockPageActions {
    pub fn new() -> Self {
        Self {
            pages: vec![
                Page::new("home", "Home", "home").home_page(),
                Page::new("about", "About", "about").with_order(1),
                Page::new("services", "Services", "services").with_order(2),
                Page::new("contact", "Contact", "contact").with_order(3),
            ],
            failure: None,
            save_count: 0,
        }
    }

    /// Mock that rejects every call, for failure-path tests
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            pages: Vec::new(),
            failure: Some(message.into()),
            save_count: 0,
        }
    }

    fn check_failure(&self) -> Result<(), EditorError> {
        match &self.failure {
            Some(message) => Err(EditorError::SaveFailed(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockPageActions {
    fn default() -> Self {
        Self::new()
    }
}

impl PageActions for MockPageActions {
    fn get_pages(&mut self, _site_id: &str) -> Result<Vec<Page>, EditorError> {
        self.check_failure()?;
        Ok(self.pages.clone())
    }

    fn create_page(&mut self, _site_id: &str, page: &Page) -> Result<(), EditorError> {
        self.check_failure()?;
        self.pages.push(page.clone());
        Ok(())
    }

    fn update_page(
        &mut self,
        _site_id: &str,
        page_id: &str,
        patch: &PagePatch,
    ) -> Result<(), EditorError> {
        self.check_failure()?;
        if let Some(page) = self.pages.iter_mut().find(|p| p.id == page_id) {
            patch.apply_to(page);
        }
        Ok(())
    }

    fn delete_page(&mut self, _site_id: &str, page_id: &str) -> Result<(), EditorError> {
        self.check_failure()?;
        self.pages.retain(|p| p.id != page_id);
        Ok(())
    }

    fn reorder_pages(&mut self, _site_id: &str, page_ids: &[String]) -> Result<(), EditorError> {
        self.check_failure()?;
        self.pages = page_ids
            .iter()
            .filter_map(|id| self.pages.iter().find(|p| &p.id == id).cloned())
            .enumerate()
            .map(|(order, page)| page.with_order(order))
            .collect();
        Ok(())
    }

    fn save_website_data(&mut self, _site_id: &str, _state: &SiteState) -> Result<(), EditorError> {
        self.check_failure()?;
        self.save_count += 1;
        Ok(())
    }
}
