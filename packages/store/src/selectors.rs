//! # Selector Cache
//!
//! Many UI panels subscribe to slices of store state. Two mechanisms keep
//! that cheap:
//!
//! 1. [`SelectorCache`]: selector functions registered under a stable key.
//!    The first registration wins; every later call with the same key
//!    returns the originally registered selector (observable through
//!    `Arc::ptr_eq`), so a subscription layer can use referential equality
//!    to skip re-subscription.
//! 2. [`StoreViews`]: built-in derived views. The component and page views
//!    are memoized against explicit dependency keys (`metadata.version`
//!    plus the relevant focus field) rather than object identity, so a
//!    repeated read at the same version returns the same `Arc`. The
//!    metadata view is a plain snapshot clone.
//!
//! The cache is deliberately process-wide for the life of the store with no
//! eviction: keys are a bounded set of subscription sites (plus one per
//! page id), not unbounded user data.

use crate::state::{Metadata, PageData, SiteComponent, SiteState};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared selector over a state snapshot
pub type SelectorFn<T> = Arc<dyn Fn(&SiteState) -> T>;

/// Keyed selector registry with first-registration-wins semantics
pub struct SelectorCache<T> {
    selectors: HashMap<String, SelectorFn<T>>,
}

impl<T> SelectorCache<T> {
    pub fn new() -> Self {
        Self {
            selectors: HashMap::new(),
        }
    }

    /// Return the selector registered under `key`, registering `selector`
    /// only if the key is new. Later calls with a different function body
    /// still return the original.
    pub fn cached<F>(&mut self, key: &str, selector: F) -> SelectorFn<T>
    where
        F: Fn(&SiteState) -> T + 'static,
    {
        let entry = self
            .selectors
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(selector));
        Arc::clone(entry)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.selectors.contains_key(key)
    }

    /// Number of registered selector sites (bounded by construction)
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl<T> Default for SelectorCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct ActiveComponentsMemo {
    version: u64,
    active_page: String,
    components: Arc<Vec<SiteComponent>>,
}

struct PageMemo {
    version: u64,
    data: Arc<PageData>,
}

/// Built-in derived read-only views over a state snapshot
#[derive(Default)]
pub struct StoreViews {
    active_components: RefCell<Option<ActiveComponentsMemo>>,
    pages: RefCell<HashMap<String, PageMemo>>,
}

impl StoreViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Component list of the active page; empty when the page document is
    /// absent. Memoized on (version, active page).
    pub fn active_page_components(&self, state: &SiteState) -> Arc<Vec<SiteComponent>> {
        let version = state.metadata.version;
        let active_page = &state.metadata.active_page;

        let mut memo = self.active_components.borrow_mut();
        if let Some(cached) = memo.as_ref() {
            if cached.version == version && &cached.active_page == active_page {
                return Arc::clone(&cached.components);
            }
        }

        let components = Arc::new(
            state
                .website_data
                .get(active_page)
                .map(|page| page.components.clone())
                .unwrap_or_default(),
        );
        *memo = Some(ActiveComponentsMemo {
            version,
            active_page: active_page.clone(),
            components: Arc::clone(&components),
        });
        components
    }

    /// Single page document snapshot, keyed by page id. Memoized on version.
    pub fn page_data(&self, state: &SiteState, page_id: &str) -> Arc<PageData> {
        let version = state.metadata.version;

        let mut pages = self.pages.borrow_mut();
        if let Some(cached) = pages.get(page_id) {
            if cached.version == version {
                return Arc::clone(&cached.data);
            }
        }

        let data = Arc::new(state.website_data.get(page_id).cloned().unwrap_or_default());
        pages.insert(
            page_id.to_string(),
            PageMemo {
                version,
                data: Arc::clone(&data),
            },
        );
        data
    }

    /// Full metadata snapshot. Not memoized: the focus fields change
    /// without a version bump, so a version-keyed memo would serve a stale
    /// selection.
    pub fn metadata(&self, state: &SiteState) -> Metadata {
        state.metadata.clone()
    }
}
