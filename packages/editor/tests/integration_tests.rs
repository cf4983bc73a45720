//! End-to-end editing scenarios across store, registry, and session.

use anyhow::Result;
use sitewright_editor::{
    BackupChoice, ComponentRegistry, EditSession, MockPageActions, SiteStore, StaticPrompts,
};
use sitewright_store::{
    FileBackup, MemoryBackup, Navigation, Page, SiteComponent, StoreViews, WebsiteData,
};
use std::sync::Arc;

fn session_over(store: SiteStore) -> EditSession {
    EditSession::new(
        "site-1",
        store,
        ComponentRegistry::builtin(),
        Box::new(MockPageActions::new()),
        Box::new(StaticPrompts::default()),
    )
}

#[test]
fn test_build_page_from_empty_store() {
    let mut store = SiteStore::new();
    let views = StoreViews::new();

    store.set_website_data(WebsiteData::new());
    store.add_page(Page::new("home", "Home", "home").home_page());
    store.add_component("home", SiteComponent::new("hero-1", "hero-section"));
    store.set_active_page("home");

    let components = views.active_page_components(store.state());
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].id, "hero-1");

    // repeated read at the same version returns the cached view
    let again = views.active_page_components(store.state());
    assert!(Arc::ptr_eq(&components, &again));
}

#[test]
fn test_full_editing_workflow() {
    let mut session = session_over(SiteStore::new());
    session.initialize();
    assert!(session.poll_changes());

    session.add_component("pricing-table");
    assert!(session.poll_changes());
    assert!(session.should_warn_before_exit());

    let html = session.preview_html();
    assert!(html.contains("Choose Your Plan"));

    session.save();
    assert!(!session.should_warn_before_exit());
}

#[test]
fn test_backup_survives_session_crash() -> Result<()> {
    let dir = tempfile::tempdir()?;

    // first session edits and "crashes" without saving
    let store = SiteStore::with_backup(Box::new(FileBackup::in_dir(dir.path())));
    let mut first = session_over(store);
    first.initialize();
    first.add_component("hero-section");
    let edited = first.store().state().clone();
    drop(first);

    // second session over the same directory offers the backup
    let store = SiteStore::with_backup(Box::new(FileBackup::in_dir(dir.path())));
    let mut second = EditSession::new(
        "site-1",
        store,
        ComponentRegistry::builtin(),
        Box::new(MockPageActions::new()),
        Box::new(StaticPrompts {
            restore_backup: BackupChoice::Restore,
            ..Default::default()
        }),
    );
    second.initialize();

    assert_eq!(second.store().website_data(), &edited.website_data);
    assert!(second.has_unsaved_changes());
    Ok(())
}

#[test]
fn test_save_failure_preserves_backup_for_recovery() {
    let mut session = EditSession::new(
        "site-1",
        SiteStore::with_backup(Box::new(MemoryBackup::new())),
        ComponentRegistry::builtin(),
        Box::new(MockPageActions::failing("server unavailable")),
        Box::new(StaticPrompts::default()),
    );
    session.initialize();
    session.add_component("content");
    session.poll_changes();
    let before = session.store().state().clone();

    session.save();

    assert!(session.has_unsaved_changes());
    assert!(session.store().has_local_backup());
    assert_eq!(session.store().state(), &before);
}

#[test]
fn test_unknown_component_type_renders_placeholder_with_tag() {
    let mut store = SiteStore::new();
    store.add_component("home", SiteComponent::new("legacy-1", "marquee-banner"));
    store.set_active_page("home");

    let mut session = session_over(store);
    // initialize keeps existing content since the store is not empty
    session.initialize();

    let html = session.preview_html();
    assert!(html.contains("marquee-banner"));
    assert!(html.contains("sw-unknown-component"));
}

#[test]
fn test_page_lifecycle_through_session() -> Result<()> {
    let mut session = session_over(SiteStore::new());
    session.initialize();

    let page = session.create_page("Portfolio", Some("Our work"))?;
    session.select_page(&page.id);
    session.add_component("slide-viewer");

    session.reorder_pages(vec![
        "portfolio".to_string(),
        "home".to_string(),
        "about".to_string(),
        "services".to_string(),
        "contact".to_string(),
    ])?;
    assert_eq!(session.store().navigation().pages[0].id, "portfolio");
    assert_eq!(session.store().navigation().pages[0].order, 0);

    session.delete_page("portfolio")?;
    assert!(session.store().navigation().find_page("portfolio").is_none());
    assert!(!session.store().website_data().contains_key("portfolio"));
    Ok(())
}

#[test]
fn test_navigation_replacement_keeps_page_documents() {
    let mut session = session_over(SiteStore::new());
    session.initialize();

    let navigation = Navigation {
        pages: vec![Page::new("home", "Start", "home").home_page()],
    };
    session.store_mut().set_navigation(navigation);

    assert_eq!(session.store().navigation().pages.len(), 1);
    assert!(session.store().website_data().contains_key("about"));
}
