//! # Site Document Store
//!
//! The single authoritative, mutable state container. Explicitly
//! constructed and passed to consumers; there is no process-wide singleton.
//!
//! All content mutations run through [`SiteStore::apply`]: the pure mutation
//! core computes the new state, then the store bumps the version counter,
//! stamps `last_updated`, and mirrors the snapshot to the backup slot.
//! Selection changes (`set_active_page`, `set_active_component`) bypass all
//! of that: they are UI focus, not content.

use crate::backup::BackupStorage;
use crate::mutations::Mutation;
use crate::state::{
    Metadata, Navigation, Page, PagePatch, PropertyMap, SiteComponent, SiteState, WebsiteData,
};
use tracing::{debug, error, warn};

pub struct SiteStore {
    state: SiteState,
    backup: Option<Box<dyn BackupStorage>>,
}

impl SiteStore {
    /// Empty store, no backup mirroring
    pub fn new() -> Self {
        Self {
            state: SiteState::default(),
            backup: None,
        }
    }

    /// Store mirrored to a durable backup slot on every content mutation.
    /// The slot is not read here; restoring is an explicit operation driven
    /// by the session's initialization prompt.
    pub fn with_backup(backup: Box<dyn BackupStorage>) -> Self {
        Self {
            state: SiteState::default(),
            backup: Some(backup),
        }
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn metadata(&self) -> &Metadata {
        &self.state.metadata
    }

    pub fn website_data(&self) -> &WebsiteData {
        &self.state.website_data
    }

    pub fn navigation(&self) -> &Navigation {
        &self.state.navigation
    }

    /// Current value of the change counter
    pub fn version(&self) -> u64 {
        self.state.metadata.version
    }

    /// Apply a content mutation. Returns the version afterwards, which
    /// advances by exactly one iff the mutation counted as a change.
    pub fn apply(&mut self, mutation: Mutation) -> u64 {
        debug!(mutation = mutation.name(), "applying mutation");

        if mutation.apply(&mut self.state) {
            self.state.metadata.version += 1;
            self.state.metadata.last_updated = now_millis();
            self.mirror_to_backup();
        }

        self.state.metadata.version
    }

    // Convenience wrappers, one per operation

    pub fn set_website_data(&mut self, data: WebsiteData) -> u64 {
        self.apply(Mutation::SetWebsiteData { data })
    }

    pub fn set_navigation(&mut self, navigation: Navigation) -> u64 {
        self.apply(Mutation::SetNavigation { navigation })
    }

    pub fn add_component(&mut self, page: impl Into<String>, component: SiteComponent) -> u64 {
        self.apply(Mutation::AddComponent {
            page: page.into(),
            component,
        })
    }

    pub fn remove_component(
        &mut self,
        page: impl Into<String>,
        component_id: impl Into<String>,
    ) -> u64 {
        self.apply(Mutation::RemoveComponent {
            page: page.into(),
            component_id: component_id.into(),
        })
    }

    pub fn update_component_properties(
        &mut self,
        page: impl Into<String>,
        component_id: impl Into<String>,
        properties: PropertyMap,
    ) -> u64 {
        self.apply(Mutation::UpdateComponentProperties {
            page: page.into(),
            component_id: component_id.into(),
            properties,
        })
    }

    pub fn move_component(
        &mut self,
        page: impl Into<String>,
        from_index: usize,
        to_index: usize,
    ) -> u64 {
        self.apply(Mutation::MoveComponent {
            page: page.into(),
            from_index,
            to_index,
        })
    }

    pub fn add_page(&mut self, page: Page) -> u64 {
        self.apply(Mutation::AddPage { page })
    }

    pub fn update_page(&mut self, page_id: impl Into<String>, patch: PagePatch) -> u64 {
        self.apply(Mutation::UpdatePage {
            page_id: page_id.into(),
            patch,
        })
    }

    pub fn remove_page(&mut self, page_id: impl Into<String>) -> u64 {
        self.apply(Mutation::RemovePage {
            page_id: page_id.into(),
        })
    }

    pub fn reorder_pages(&mut self, page_ids: Vec<String>) -> u64 {
        self.apply(Mutation::ReorderPages { page_ids })
    }

    // Focus operations: never bump the version counter

    /// Switch the page being edited and drop the component selection
    pub fn set_active_page(&mut self, page_id: impl Into<String>) {
        self.state.metadata.active_page = page_id.into();
        self.state.metadata.active_component_id = None;
    }

    /// Change the component selection
    pub fn set_active_component(&mut self, component_id: Option<String>) {
        self.state.metadata.active_component_id = component_id;
    }

    // Backup operations

    /// True iff a persisted snapshot exists in the backup slot
    pub fn has_local_backup(&self) -> bool {
        self.backup.as_ref().map(|b| b.exists()).unwrap_or(false)
    }

    /// Overwrite in-memory state from the backup snapshot. A malformed
    /// snapshot is logged and abandoned, leaving current state intact.
    /// Returns whether a restore happened.
    pub fn restore_from_local_backup(&mut self) -> bool {
        let Some(backup) = self.backup.as_ref() else {
            return false;
        };

        match backup.read() {
            Ok(mut snapshot) => {
                snapshot.metadata.last_updated = now_millis();
                self.state = snapshot;
                true
            }
            Err(err) => {
                error!(error = %err, "failed to restore from backup");
                false
            }
        }
    }

    /// Tear down the store and hand back its backup slot, so a later
    /// session can be constructed over the same slot
    pub fn into_backup(self) -> Option<Box<dyn BackupStorage>> {
        self.backup
    }

    /// Delete the backup snapshot
    pub fn clear_local_backup(&mut self) {
        if let Some(backup) = self.backup.as_mut() {
            if let Err(err) = backup.clear() {
                warn!(error = %err, "failed to clear local backup");
            }
        }
    }

    fn mirror_to_backup(&mut self) {
        if let Some(backup) = self.backup.as_mut() {
            // Fire-and-forget: a failed mirror must not fail the mutation
            if let Err(err) = backup.write(&self.state) {
                warn!(error = %err, "failed to mirror state to local backup");
            }
        }
    }
}

impl Default for SiteStore {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
