//! # Site Mutations
//!
//! Semantic operations on the site document.
//!
//! ## Design Principles
//!
//! 1. **Total**: every mutation is defined for every input. Missing targets
//!    degrade to no-ops instead of errors.
//! 2. **Pure**: `apply` touches only the passed state. No clocks, no
//!    storage. The store wrapper owns version bumps and backup mirroring.
//! 3. **Intent-preserving**: each variant is one user-level operation, not a
//!    generic patch.
//!
//! ## No-op vs. bump
//!
//! `apply` returns whether the mutation counted as a content change, which
//! is what drives the version counter. The subtle case is
//! `RemoveComponent`: a missing page is a pure no-op, but once the page
//! matched, the removal attempt counts as a change even when the component
//! id matched nothing. Touching an existing page's list is a content
//! mutation.

use crate::state::{Navigation, Page, PageData, PagePatch, PropertyMap, SiteComponent, SiteState};
use serde::{Deserialize, Serialize};

/// Content mutations. Selection changes are not mutations; they live as
/// focus methods on the store and never bump the version counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Wholesale replacement of all page documents
    SetWebsiteData { data: crate::state::WebsiteData },

    /// Wholesale replacement of the navigation
    SetNavigation { navigation: Navigation },

    /// Append a component to a page, creating the page document if absent.
    /// Focuses the new component.
    AddComponent {
        page: String,
        component: SiteComponent,
    },

    /// Remove a component from a page and clear the selection
    RemoveComponent { page: String, component_id: String },

    /// Wholesale-replace one component's properties
    UpdateComponentProperties {
        page: String,
        component_id: String,
        properties: PropertyMap,
    },

    /// Relocate a component within its page (splice semantics, clamped)
    MoveComponent {
        page: String,
        from_index: usize,
        to_index: usize,
    },

    /// Append a navigation entry and ensure its page document exists
    AddPage { page: Page },

    /// Merge fields into a navigation entry; an id change moves the page
    /// document key along with it
    UpdatePage { page_id: String, patch: PagePatch },

    /// Remove a page everywhere and re-point the active page
    RemovePage { page_id: String },

    /// Rebuild the navigation order from an id sequence
    ReorderPages { page_ids: Vec<String> },
}

impl Mutation {
    /// Short tag for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetWebsiteData { .. } => "set_website_data",
            Mutation::SetNavigation { .. } => "set_navigation",
            Mutation::AddComponent { .. } => "add_component",
            Mutation::RemoveComponent { .. } => "remove_component",
            Mutation::UpdateComponentProperties { .. } => "update_component_properties",
            Mutation::MoveComponent { .. } => "move_component",
            Mutation::AddPage { .. } => "add_page",
            Mutation::UpdatePage { .. } => "update_page",
            Mutation::RemovePage { .. } => "remove_page",
            Mutation::ReorderPages { .. } => "reorder_pages",
        }
    }

    /// Apply to state. Returns true when the mutation counted as a content
    /// change (the caller bumps the version counter on true).
    pub fn apply(&self, state: &mut SiteState) -> bool {
        match self {
            Mutation::SetWebsiteData { data } => {
                state.website_data = data.clone();
                true
            }

            Mutation::SetNavigation { navigation } => {
                state.navigation = navigation.clone();
                true
            }

            Mutation::AddComponent { page, component } => {
                let page_data = state.website_data.entry(page.clone()).or_default();
                page_data.components.push(component.clone());
                state.metadata.active_component_id = Some(component.id.clone());
                true
            }

            Mutation::RemoveComponent { page, component_id } => {
                let Some(page_data) = state.website_data.get_mut(page) else {
                    return false;
                };
                page_data.components.retain(|c| &c.id != component_id);
                state.metadata.active_component_id = None;
                true
            }

            Mutation::UpdateComponentProperties {
                page,
                component_id,
                properties,
            } => {
                let Some(page_data) = state.website_data.get_mut(page) else {
                    return false;
                };
                let Some(component) = page_data
                    .components
                    .iter_mut()
                    .find(|c| &c.id == component_id)
                else {
                    return false;
                };
                component.properties = properties.clone();
                true
            }

            Mutation::MoveComponent {
                page,
                from_index,
                to_index,
            } => {
                let Some(page_data) = state.website_data.get_mut(page) else {
                    return false;
                };
                if *from_index >= page_data.components.len() {
                    return false;
                }
                let component = page_data.components.remove(*from_index);
                let insert_index = (*to_index).min(page_data.components.len());
                page_data.components.insert(insert_index, component);
                true
            }

            Mutation::AddPage { page } => {
                state.navigation.pages.push(page.clone());
                state.website_data.entry(page.id.clone()).or_default();
                true
            }

            Mutation::UpdatePage { page_id, patch } => {
                let Some(entry) = state
                    .navigation
                    .pages
                    .iter_mut()
                    .find(|p| &p.id == page_id)
                else {
                    return false;
                };
                patch.apply_to(entry);

                // An id change moves the page document key (move, not copy)
                if let Some(new_id) = &patch.id {
                    if new_id != page_id {
                        if let Some(page_data) = state.website_data.remove(page_id) {
                            state.website_data.insert(new_id.clone(), page_data);
                        }
                    }
                }
                true
            }

            Mutation::RemovePage { page_id } => {
                state.navigation.pages.retain(|p| &p.id != page_id);
                state.website_data.remove(page_id);
                state.metadata.active_page = state
                    .navigation
                    .pages
                    .first()
                    .map(|p| p.id.clone())
                    .unwrap_or_else(|| "home".to_string());
                true
            }

            Mutation::ReorderPages { page_ids } => {
                // Unknown ids are dropped, never invented
                let reordered: Vec<Page> = page_ids
                    .iter()
                    .filter_map(|id| state.navigation.find_page(id).cloned())
                    .enumerate()
                    .map(|(index, mut page)| {
                        page.order = index;
                        page
                    })
                    .collect();
                state.navigation.pages = reordered;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: &str) -> SiteComponent {
        SiteComponent::new(id, "header")
    }

    fn state_with_page(page: &str, ids: &[&str]) -> SiteState {
        let mut state = SiteState::default();
        state.website_data.insert(
            page.to_string(),
            PageData {
                components: ids.iter().map(|id| component(id)).collect(),
            },
        );
        state
    }

    #[test]
    fn test_add_component_creates_missing_page() {
        let mut state = SiteState::default();

        let changed = Mutation::AddComponent {
            page: "home".to_string(),
            component: component("a"),
        }
        .apply(&mut state);

        assert!(changed);
        assert_eq!(state.website_data["home"].components.len(), 1);
        assert_eq!(state.metadata.active_component_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_add_then_remove_round_trips_list() {
        let mut state = state_with_page("home", &["a", "b"]);
        let before = state.website_data["home"].components.clone();

        Mutation::AddComponent {
            page: "home".to_string(),
            component: component("c"),
        }
        .apply(&mut state);
        Mutation::RemoveComponent {
            page: "home".to_string(),
            component_id: "c".to_string(),
        }
        .apply(&mut state);

        assert_eq!(state.website_data["home"].components, before);
    }

    #[test]
    fn test_remove_component_missing_page_is_pure_noop() {
        let mut state = state_with_page("home", &["a"]);
        state.metadata.active_component_id = Some("a".to_string());

        let changed = Mutation::RemoveComponent {
            page: "nope".to_string(),
            component_id: "a".to_string(),
        }
        .apply(&mut state);

        assert!(!changed);
        assert_eq!(state.metadata.active_component_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_remove_component_missing_id_still_counts_on_page_match() {
        let mut state = state_with_page("home", &["a"]);

        let changed = Mutation::RemoveComponent {
            page: "home".to_string(),
            component_id: "missing".to_string(),
        }
        .apply(&mut state);

        assert!(changed);
        assert_eq!(state.website_data["home"].components.len(), 1);
        assert!(state.metadata.active_component_id.is_none());
    }

    #[test]
    fn test_update_properties_missing_component_is_noop() {
        let mut state = state_with_page("home", &["a"]);

        let changed = Mutation::UpdateComponentProperties {
            page: "home".to_string(),
            component_id: "missing".to_string(),
            properties: PropertyMap::new(),
        }
        .apply(&mut state);

        assert!(!changed);
    }

    #[test]
    fn test_move_component_and_inverse_restore_order() {
        let mut state = state_with_page("home", &["a", "b", "c"]);

        Mutation::MoveComponent {
            page: "home".to_string(),
            from_index: 0,
            to_index: 2,
        }
        .apply(&mut state);
        let ids: Vec<&str> = state.website_data["home"]
            .components
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        Mutation::MoveComponent {
            page: "home".to_string(),
            from_index: 2,
            to_index: 0,
        }
        .apply(&mut state);
        let ids: Vec<&str> = state.website_data["home"]
            .components
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_component_clamps_destination() {
        let mut state = state_with_page("home", &["a", "b"]);

        let changed = Mutation::MoveComponent {
            page: "home".to_string(),
            from_index: 0,
            to_index: 99,
        }
        .apply(&mut state);

        assert!(changed);
        let ids: Vec<&str> = state.website_data["home"]
            .components
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_move_component_out_of_range_source_is_noop() {
        let mut state = state_with_page("home", &["a", "b"]);

        let changed = Mutation::MoveComponent {
            page: "home".to_string(),
            from_index: 5,
            to_index: 0,
        }
        .apply(&mut state);

        assert!(!changed);
    }

    #[test]
    fn test_update_page_id_moves_data_key() {
        let mut state = state_with_page("about", &["a"]);
        state
            .navigation
            .pages
            .push(Page::new("about", "About", "about"));

        let changed = Mutation::UpdatePage {
            page_id: "about".to_string(),
            patch: PagePatch {
                id: Some("about-us".to_string()),
                slug: Some("about-us".to_string()),
                ..Default::default()
            },
        }
        .apply(&mut state);

        assert!(changed);
        assert!(!state.website_data.contains_key("about"));
        assert_eq!(state.website_data["about-us"].components.len(), 1);
        assert_eq!(state.navigation.pages[0].id, "about-us");
    }

    #[test]
    fn test_update_page_missing_is_noop() {
        let mut state = SiteState::default();

        let changed = Mutation::UpdatePage {
            page_id: "nope".to_string(),
            patch: PagePatch::default(),
        }
        .apply(&mut state);

        assert!(!changed);
    }

    #[test]
    fn test_remove_page_resets_active_page() {
        let mut state = SiteState::default();
        Mutation::AddPage {
            page: Page::new("home", "Home", "home").home_page(),
        }
        .apply(&mut state);
        Mutation::AddPage {
            page: Page::new("about", "About", "about").with_order(1),
        }
        .apply(&mut state);
        state.metadata.active_page = "about".to_string();

        Mutation::RemovePage {
            page_id: "about".to_string(),
        }
        .apply(&mut state);

        assert_eq!(state.metadata.active_page, "home");
        assert!(!state.website_data.contains_key("about"));
    }

    #[test]
    fn test_remove_last_page_falls_back_to_home() {
        let mut state = SiteState::default();
        Mutation::AddPage {
            page: Page::new("only", "Only", "only"),
        }
        .apply(&mut state);

        Mutation::RemovePage {
            page_id: "only".to_string(),
        }
        .apply(&mut state);

        assert_eq!(state.metadata.active_page, "home");
        assert!(state.navigation.pages.is_empty());
    }

    #[test]
    fn test_reorder_pages_recomputes_dense_order() {
        let mut state = SiteState::default();
        for (i, id) in ["home", "about", "contact"].iter().enumerate() {
            Mutation::AddPage {
                page: Page::new(*id, *id, *id).with_order(i),
            }
            .apply(&mut state);
        }

        Mutation::ReorderPages {
            page_ids: vec![
                "contact".to_string(),
                "ghost".to_string(),
                "home".to_string(),
                "about".to_string(),
            ],
        }
        .apply(&mut state);

        let ids: Vec<&str> = state.navigation.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["contact", "home", "about"]);
        let orders: Vec<usize> = state.navigation.pages.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_mutation_serialization_round_trip() {
        let mutation = Mutation::UpdateComponentProperties {
            page: "home".to_string(),
            component_id: "hero-1".to_string(),
            properties: PropertyMap::new(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let back: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, back);
    }
}
