//! # Edit Session Management
//!
//! An [`EditSession`] is one user's editing workflow over a site: it owns
//! the document store, translates user intent into mutations, watches the
//! version counter for unsaved work, and talks to the remote page actions.
//!
//! The session never mutates the store on a failed collaborator call, so
//! validation errors and save failures leave the document exactly as it
//! was.

use crate::actions::{validate_new_page, PageActions};
use crate::errors::EditorError;
use crate::starter::{starter_navigation, starter_website_data};
use serde::{Deserialize, Serialize};
use sitewright_registry::{ComponentRegistry, RenderOptions};
use sitewright_store::{Page, PagePatch, PropertyMap, SiteStore, StoreViews};
use sitewright_vdom::{render_html, RenderHtmlOptions, VNode};
use tracing::{debug, error, info};

/// Answer to the restore-backup prompt shown on session start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupChoice {
    Restore,
    Discard,
}

/// User confirmations the session needs mid-flow. Implemented by the UI
/// shell; tests script the answers.
pub trait SessionPrompts {
    fn confirm_restore_backup(&mut self) -> BackupChoice;
    fn confirm_remove_component(&mut self) -> bool;
}

/// Fixed prompt answers, for headless shells and tests
pub struct StaticPrompts {
    pub restore_backup: BackupChoice,
    pub confirm_removal: bool,
}

impl Default for StaticPrompts {
    fn default() -> Self {
        Self {
            restore_backup: BackupChoice::Discard,
            confirm_removal: true,
        }
    }
}

impl SessionPrompts for StaticPrompts {
    fn confirm_restore_backup(&mut self) -> BackupChoice {
        self.restore_backup
    }

    fn confirm_remove_component(&mut self) -> bool {
        self.confirm_removal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Transient user-visible message, drained by the UI shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    fn info(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    fn error(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

/// Which sidebar panel is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    Components,
    Properties,
    Pages,
}

pub struct EditSession {
    site_id: String,
    store: SiteStore,
    registry: ComponentRegistry,
    actions: Box<dyn PageActions>,
    prompts: Box<dyn SessionPrompts>,
    views: StoreViews,

    initialized: bool,
    has_unsaved_changes: bool,
    is_saving: bool,
    /// Last store version the watcher acknowledged
    last_seen_version: u64,
    /// Remount key for the preview pane; changes force a clean remount
    preview_key: u64,
    active_tab: SidebarTab,
    /// Counter behind generated component ids
    component_counter: u64,
    notices: Vec<Notice>,
    on_update: Option<Box<dyn FnMut()>>,
}

impl EditSession {
    pub fn new(
        site_id: impl Into<String>,
        store: SiteStore,
        registry: ComponentRegistry,
        actions: Box<dyn PageActions>,
        prompts: Box<dyn SessionPrompts>,
    ) -> Self {
        let last_seen_version = store.version();
        Self {
            site_id: site_id.into(),
            store,
            registry,
            actions,
            prompts,
            views: StoreViews::new(),
            initialized: false,
            has_unsaved_changes: false,
            is_saving: false,
            last_seen_version,
            preview_key: 0,
            active_tab: SidebarTab::default(),
            component_counter: 0,
            notices: Vec::new(),
            on_update: None,
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn store(&self) -> &SiteStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SiteStore {
        &mut self.store
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn preview_key(&self) -> u64 {
        self.preview_key
    }

    pub fn active_tab(&self) -> SidebarTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: SidebarTab) {
        self.active_tab = tab;
    }

    /// The before-unload guard: warn exactly while unsaved work exists
    pub fn should_warn_before_exit(&self) -> bool {
        self.has_unsaved_changes
    }

    /// Hook fired by the version watcher after each acknowledged change
    pub fn set_on_update(&mut self, hook: Box<dyn FnMut()>) {
        self.on_update = Some(hook);
    }

    /// Drain accumulated notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// One-time session start: offer backup recovery, seed the starter site
    /// into an empty store, and heal a dangling active page. Calling again
    /// is a no-op.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        if self.store.has_local_backup() {
            match self.prompts.confirm_restore_backup() {
                BackupChoice::Restore => {
                    if self.store.restore_from_local_backup() {
                        info!(site_id = %self.site_id, "restored unsaved work from local backup");
                        // Restored content is by definition not on the server
                        self.has_unsaved_changes = true;
                        self.preview_key += 1;
                        self.last_seen_version = self.store.version();
                    }
                }
                BackupChoice::Discard => {
                    self.store.clear_local_backup();
                }
            }
        }

        if self.store.website_data().is_empty() {
            debug!(site_id = %self.site_id, "empty site, installing starter template");
            self.store
                .set_website_data(starter_website_data(&self.registry));
            self.store.set_navigation(starter_navigation());
            // last_seen_version is not advanced: the starter counts as
            // unsaved work on the next poll.
        }

        let active = self.store.metadata().active_page.clone();
        if !self.store.website_data().contains_key(&active) {
            let fallback = self
                .store
                .website_data()
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| "home".to_string());
            self.store.set_active_page(fallback);
        }
    }

    /// Version watcher tick. Returns whether a change was acknowledged.
    /// Focus-only changes never trip it.
    pub fn poll_changes(&mut self) -> bool {
        let version = self.store.version();
        if version == self.last_seen_version {
            return false;
        }

        self.last_seen_version = version;
        self.has_unsaved_changes = true;
        self.preview_key += 1;
        if let Some(hook) = self.on_update.as_mut() {
            hook();
        }
        true
    }

    /// Push the full snapshot to the remote save action. Success clears the
    /// unsaved flag and the local backup; failure surfaces a notice and
    /// leaves both intact.
    pub fn save(&mut self) {
        if self.is_saving {
            debug!("save already in flight, ignoring");
            return;
        }
        self.is_saving = true;

        let result = self
            .actions
            .save_website_data(&self.site_id, self.store.state());
        match result {
            Ok(()) => {
                self.has_unsaved_changes = false;
                self.store.clear_local_backup();
                self.notices
                    .push(Notice::info("Saved", "Your changes have been saved."));
            }
            Err(err) => {
                error!(error = %err, site_id = %self.site_id, "save failed");
                self.notices.push(Notice::error("Save failed", err.to_string()));
            }
        }
        self.is_saving = false;
    }

    // Component operations, all against the active page

    /// Add a catalog component with default properties and focus it. An
    /// unknown type surfaces a notice and mutates nothing.
    pub fn add_component(&mut self, type_tag: &str) {
        let page = self.store.metadata().active_page.clone();
        let component_id = self.next_component_id(type_tag, &page);

        match self.registry.create_default_component(type_tag, component_id) {
            Ok(component) => {
                self.store.add_component(page, component);
                self.active_tab = SidebarTab::Properties;
            }
            Err(err) => {
                self.notices
                    .push(Notice::error("Cannot add component", err.to_string()));
            }
        }
    }

    /// Next `<type>-<n>` id that is unused on the target page. Starter
    /// content already occupies low numbers, so collisions are skipped.
    fn next_component_id(&mut self, type_tag: &str, page: &str) -> String {
        let taken: Vec<String> = self
            .store
            .website_data()
            .get(page)
            .map(|p| p.components.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default();

        loop {
            self.component_counter += 1;
            let candidate = format!("{}-{}", type_tag, self.component_counter);
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Remove a component after confirmation; declined means untouched
    pub fn remove_component(&mut self, component_id: &str) {
        if !self.prompts.confirm_remove_component() {
            return;
        }
        let page = self.store.metadata().active_page.clone();
        self.store.remove_component(page, component_id);
    }

    /// Replace a component's properties on the active page
    pub fn update_component_properties(&mut self, component_id: &str, properties: PropertyMap) {
        let page = self.store.metadata().active_page.clone();
        self.store
            .update_component_properties(page, component_id, properties);
    }

    pub fn select_component(&mut self, component_id: Option<String>) {
        self.store.set_active_component(component_id);
    }

    /// Switch to a page, creating its document lazily if it only exists in
    /// the navigation
    pub fn select_page(&mut self, page_id: &str) {
        if !self.store.website_data().contains_key(page_id) {
            let mut data = self.store.website_data().clone();
            data.entry(page_id.to_string()).or_default();
            self.store.set_website_data(data);
        }
        self.store.set_active_page(page_id);
    }

    /// Drag-and-drop reorder: move the component identified by `source_id`
    /// to where `destination_id` currently sits. Same or unknown ids are a
    /// no-op.
    pub fn reorder_component(&mut self, source_id: &str, destination_id: &str) {
        if source_id == destination_id {
            return;
        }
        let page = self.store.metadata().active_page.clone();
        let Some(page_data) = self.store.website_data().get(&page) else {
            return;
        };

        let position = |id: &str| page_data.components.iter().position(|c| c.id == id);
        let (Some(from_index), Some(to_index)) = (position(source_id), position(destination_id))
        else {
            return;
        };

        self.store.move_component(page, from_index, to_index);
    }

    /// Edit-mode render of the active page, selection highlighted
    pub fn preview(&self) -> VNode {
        let components = self.views.active_page_components(self.store.state());

        let mut options = RenderOptions::editing();
        if let Some(selected) = &self.store.metadata().active_component_id {
            options = options.with_selection(selected.clone());
        }
        self.registry.render_page(&components, &options)
    }

    pub fn preview_html(&self) -> String {
        render_html(&self.preview(), RenderHtmlOptions::default())
    }

    // Page management, validated here before any mutation

    pub fn create_page(
        &mut self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Page, EditorError> {
        let page = validate_new_page(title, description, &self.store.navigation().pages)?;
        self.actions.create_page(&self.site_id, &page)?;
        self.store.add_page(page.clone());
        Ok(page)
    }

    /// Rename a page. The home page keeps its slug; other pages get a fresh
    /// slug derived from the new title.
    pub fn rename_page(&mut self, page_id: &str, new_title: &str) -> Result<(), EditorError> {
        if new_title.trim().is_empty() {
            return Err(EditorError::EmptyTitle);
        }
        let page = self
            .store
            .navigation()
            .find_page(page_id)
            .ok_or_else(|| EditorError::PageNotFound(page_id.to_string()))?;

        let mut patch = PagePatch {
            title: Some(new_title.trim().to_string()),
            ..Default::default()
        };
        if page.is_home_page != Some(true) {
            let slug = crate::actions::slugify(new_title);
            let taken = self
                .store
                .navigation()
                .pages
                .iter()
                .any(|p| p.slug == slug && p.id != page_id);
            if taken {
                return Err(EditorError::DuplicateSlug(slug));
            }
            patch.slug = Some(slug);
        }

        self.actions.update_page(&self.site_id, page_id, &patch)?;
        self.store.update_page(page_id, patch);
        Ok(())
    }

    /// Delete a page. The home page is protected.
    pub fn delete_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        let page = self
            .store
            .navigation()
            .find_page(page_id)
            .ok_or_else(|| EditorError::PageNotFound(page_id.to_string()))?;
        if page.is_home_page == Some(true) {
            return Err(EditorError::HomePageProtected);
        }

        self.actions.delete_page(&self.site_id, page_id)?;
        self.store.remove_page(page_id);
        Ok(())
    }

    pub fn reorder_pages(&mut self, page_ids: Vec<String>) -> Result<(), EditorError> {
        self.actions.reorder_pages(&self.site_id, &page_ids)?;
        self.store.reorder_pages(page_ids);
        Ok(())
    }

    /// Copy a page and its components under a timestamped slug
    pub fn duplicate_page(&mut self, page_id: &str) -> Result<Page, EditorError> {
        let source = self
            .store
            .navigation()
            .find_page(page_id)
            .ok_or_else(|| EditorError::PageNotFound(page_id.to_string()))?
            .clone();

        let copy_id = format!(
            "{}-copy-{}",
            source.slug,
            chrono::Utc::now().timestamp_millis()
        );
        let copy = Page::new(copy_id.clone(), format!("{} (Copy)", source.title), copy_id)
            .with_order(self.store.navigation().pages.len());

        self.actions.create_page(&self.site_id, &copy)?;
        self.store.add_page(copy.clone());

        let components = self
            .store
            .website_data()
            .get(page_id)
            .cloned()
            .unwrap_or_default();
        let mut data = self.store.website_data().clone();
        data.insert(copy.id.clone(), components);
        self.store.set_website_data(data);

        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MockPageActions;
    use sitewright_store::{MemoryBackup, SiteComponent};

    fn session_with(store: SiteStore, prompts: StaticPrompts) -> EditSession {
        EditSession::new(
            "site-1",
            store,
            ComponentRegistry::builtin(),
            Box::new(MockPageActions::new()),
            Box::new(prompts),
        )
    }

    fn session() -> EditSession {
        session_with(SiteStore::new(), StaticPrompts::default())
    }

    #[test]
    fn test_initialize_installs_starter_into_empty_store() {
        let mut session = session();
        session.initialize();

        assert!(session.store().website_data().contains_key("home"));
        assert_eq!(session.store().navigation().pages.len(), 4);
        // next poll sees the seeded content as unsaved work
        assert!(session.poll_changes());
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn test_initialize_is_once_only() {
        let mut session = session();
        session.initialize();
        let version = session.store().version();

        session.initialize();

        assert_eq!(session.store().version(), version);
    }

    #[test]
    fn test_initialize_restores_backup_when_accepted() {
        let mut previous = SiteStore::with_backup(Box::new(MemoryBackup::new()));
        previous.add_component("home", SiteComponent::new("hero-1", "hero-section"));
        let slot = previous.into_backup().unwrap();

        let store = SiteStore::with_backup(slot);
        let mut session = session_with(
            store,
            StaticPrompts {
                restore_backup: BackupChoice::Restore,
                ..Default::default()
            },
        );
        session.initialize();

        assert_eq!(session.store().website_data()["home"].components.len(), 1);
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn test_initialize_discard_clears_backup_and_seeds_starter() {
        let mut previous = SiteStore::with_backup(Box::new(MemoryBackup::new()));
        previous.add_component("home", SiteComponent::new("hero-1", "hero-section"));
        let slot = previous.into_backup().unwrap();

        let store = SiteStore::with_backup(slot);
        let mut session = session_with(store, StaticPrompts::default());
        session.initialize();

        // discarded, so the starter replaced the backed-up content (and the
        // starter install itself re-mirrors to the slot)
        assert!(session.store().website_data().contains_key("about"));
        assert!(session
            .store()
            .website_data()
            .get("home")
            .map(|p| p.components.iter().all(|c| c.id != "hero-1"))
            .unwrap_or(false));
    }

    #[test]
    fn test_poll_ignores_focus_changes() {
        let mut session = session();
        session.initialize();
        session.poll_changes();

        session.select_component(Some("hero-1".to_string()));

        assert!(!session.poll_changes());
    }

    #[test]
    fn test_poll_fires_update_hook_once_per_change() {
        use std::cell::Cell;
        use std::rc::Rc;

        let fired = Rc::new(Cell::new(0u32));
        let mut session = session();
        session.initialize();
        let counter = Rc::clone(&fired);
        session.set_on_update(Box::new(move || counter.set(counter.get() + 1)));

        session.poll_changes();
        session.poll_changes();

        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_add_component_generates_id_and_switches_tab() {
        let mut session = session();
        session.initialize();

        session.add_component("hero-section");

        assert_eq!(session.active_tab(), SidebarTab::Properties);
        let components = &session.store().website_data()["home"].components;
        // starter content already holds hero-section-1
        assert_eq!(
            components.last().map(|c| c.id.as_str()),
            Some("hero-section-2")
        );
        assert_eq!(
            session.store().metadata().active_component_id.as_deref(),
            Some("hero-section-2")
        );
    }

    #[test]
    fn test_add_unknown_component_surfaces_notice_without_mutation() {
        let mut session = session();
        session.initialize();
        session.poll_changes();
        let version = session.store().version();

        session.add_component("holographic-banner");

        assert_eq!(session.store().version(), version);
        let notices = session.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].body.contains("holographic-banner"));
    }

    #[test]
    fn test_remove_component_declined_is_noop() {
        let mut session = session_with(
            SiteStore::new(),
            StaticPrompts {
                confirm_removal: false,
                ..Default::default()
            },
        );
        session.initialize();
        let before = session.store().website_data()["home"].components.len();

        session.remove_component("hero-section-1");

        assert_eq!(
            session.store().website_data()["home"].components.len(),
            before
        );
    }

    #[test]
    fn test_reorder_component_translates_ids_to_indices() {
        let mut session = session();
        session.initialize();
        session.add_component("hero-section");
        session.add_component("content");
        let ids: Vec<String> = session.store().website_data()["home"]
            .components
            .iter()
            .map(|c| c.id.clone())
            .collect();

        session.reorder_component(&ids[ids.len() - 1], &ids[0]);

        assert_eq!(
            session.store().website_data()["home"].components[0].id,
            ids[ids.len() - 1]
        );
    }

    #[test]
    fn test_reorder_component_unknown_or_same_id_is_noop() {
        let mut session = session();
        session.initialize();
        session.add_component("hero-section");
        session.poll_changes();
        let version = session.store().version();

        session.reorder_component("ghost-1", "hero-section-1");
        session.reorder_component("hero-section-1", "hero-section-1");

        assert_eq!(session.store().version(), version);
    }

    #[test]
    fn test_select_page_heals_missing_document() {
        let mut session = session();
        session.initialize();
        session
            .store_mut()
            .add_page(Page::new("blog", "Blog", "blog").with_order(4));
        let mut data = session.store().website_data().clone();
        data.remove("blog");
        session.store_mut().set_website_data(data);

        session.select_page("blog");

        assert!(session.store().website_data().contains_key("blog"));
        assert_eq!(session.store().metadata().active_page, "blog");
    }

    #[test]
    fn test_save_success_clears_unsaved_and_backup() {
        let store = SiteStore::with_backup(Box::new(MemoryBackup::new()));
        let mut session = session_with(store, StaticPrompts::default());
        session.initialize();
        session.poll_changes();
        assert!(session.should_warn_before_exit());

        session.save();

        assert!(!session.has_unsaved_changes());
        assert!(!session.should_warn_before_exit());
        assert!(!session.store().has_local_backup());
        assert_eq!(session.take_notices()[0].severity, Severity::Info);
    }

    #[test]
    fn test_save_failure_keeps_unsaved_state() {
        let mut session = EditSession::new(
            "site-1",
            SiteStore::with_backup(Box::new(MemoryBackup::new())),
            ComponentRegistry::builtin(),
            Box::new(MockPageActions::failing("network down")),
            Box::new(StaticPrompts::default()),
        );
        session.initialize();
        session.poll_changes();

        session.save();

        assert!(session.has_unsaved_changes());
        assert!(session.store().has_local_backup());
        let notices = session.take_notices();
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].body.contains("network down"));
        assert!(!session.is_saving());
    }

    #[test]
    fn test_create_page_rejects_duplicate_slug() {
        let mut session = session();
        session.initialize();

        let err = session.create_page("About", None).unwrap_err();
        assert!(matches!(err, EditorError::DuplicateSlug(_)));
        assert_eq!(session.store().navigation().pages.len(), 4);
    }

    #[test]
    fn test_create_page_adds_navigation_and_document() {
        let mut session = session();
        session.initialize();

        let page = session.create_page("Our Blog", Some("News")).unwrap();

        assert_eq!(page.id, "our-blog");
        assert!(session.store().website_data().contains_key("our-blog"));
        assert!(session.store().navigation().find_page("our-blog").is_some());
    }

    #[test]
    fn test_delete_home_page_is_protected() {
        let mut session = session();
        session.initialize();

        let err = session.delete_page("home").unwrap_err();

        assert!(matches!(err, EditorError::HomePageProtected));
        assert!(session.store().website_data().contains_key("home"));
    }

    #[test]
    fn test_rename_page_reslugs_non_home_pages() {
        let mut session = session();
        session.initialize();

        session.rename_page("about", "Our Story").unwrap();

        let page = session.store().navigation().find_page("about").unwrap();
        assert_eq!(page.title, "Our Story");
        assert_eq!(page.slug, "our-story");
    }

    #[test]
    fn test_rename_home_page_keeps_slug() {
        let mut session = session();
        session.initialize();

        session.rename_page("home", "Welcome").unwrap();

        let page = session.store().navigation().find_page("home").unwrap();
        assert_eq!(page.title, "Welcome");
        assert_eq!(page.slug, "home");
    }

    #[test]
    fn test_duplicate_page_copies_components() {
        let mut session = session();
        session.initialize();

        let copy = session.duplicate_page("home").unwrap();

        assert!(copy.id.starts_with("home-copy-"));
        assert_eq!(
            session.store().website_data()[&copy.id].components.len(),
            session.store().website_data()["home"].components.len()
        );
    }

    #[test]
    fn test_preview_highlights_selection() {
        let mut session = session();
        session.initialize();
        session.add_component("hero-section");

        let html = session.preview_html();

        assert!(html.contains("sw-selected"));
        assert!(html.contains("data-component-id=\"hero-section-1\""));
    }
}
