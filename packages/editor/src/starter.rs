//! Built-in starter site.
//!
//! Installed by the session when a site's document store is still empty:
//! four pages seeded with catalog-default components so the first preview
//! is never blank.

use serde_json::{json, Value};
use sitewright_registry::ComponentRegistry;
use sitewright_store::{Navigation, Page, PageData, PropertyMap, SiteComponent, WebsiteData};

/// Navigation for the starter site
pub fn starter_navigation() -> Navigation {
    Navigation {
        pages: vec![
            Page::new("home", "Home", "home")
                .with_description("Welcome to our website")
                .home_page(),
            Page::new("about", "About", "about")
                .with_description("Learn more about us")
                .with_order(1),
            Page::new("services", "Services", "services")
                .with_description("What we offer")
                .with_order(2),
            Page::new("contact", "Contact", "contact")
                .with_description("Get in touch")
                .with_order(3),
        ],
    }
}

/// Page documents for the starter site, seeded from catalog defaults
pub fn starter_website_data(registry: &ComponentRegistry) -> WebsiteData {
    let mut data = WebsiteData::new();

    data.insert(
        "home".to_string(),
        page(vec![
            seeded(registry, "hero-section", "hero-section-1", PropertyMap::new()),
            seeded(registry, "team-showcase", "team-showcase-1", PropertyMap::new()),
        ]),
    );

    data.insert(
        "about".to_string(),
        page(vec![
            seeded(
                registry,
                "header",
                "header-1",
                overrides(json!({
                    "title": "About Us",
                    "subtitle": "Our story and mission",
                })),
            ),
            seeded(registry, "feature-section", "feature-section-1", PropertyMap::new()),
        ]),
    );

    data.insert(
        "services".to_string(),
        page(vec![
            seeded(
                registry,
                "header",
                "header-2",
                overrides(json!({
                    "title": "Our Services",
                    "subtitle": "What we can do for you",
                })),
            ),
            seeded(registry, "servicesList", "servicesList-1", PropertyMap::new()),
        ]),
    );

    data.insert(
        "contact".to_string(),
        page(vec![
            seeded(
                registry,
                "header",
                "header-3",
                overrides(json!({
                    "title": "Contact Us",
                    "subtitle": "We'd love to hear from you",
                })),
            ),
            seeded(registry, "email-form", "email-form-1", PropertyMap::new()),
        ]),
    );

    data
}

fn page(components: Vec<Option<SiteComponent>>) -> PageData {
    PageData {
        components: components.into_iter().flatten().collect(),
    }
}

fn seeded(
    registry: &ComponentRegistry,
    type_tag: &str,
    id: &str,
    overrides: PropertyMap,
) -> Option<SiteComponent> {
    let mut component = registry.create_default_component(type_tag, id).ok()?;
    for (key, value) in overrides {
        component.properties.insert(key, value);
    }
    Some(component)
}

fn overrides(value: Value) -> PropertyMap {
    match value {
        Value::Object(map) => map,
        _ => PropertyMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_pages_match_navigation() {
        let registry = ComponentRegistry::builtin();
        let data = starter_website_data(&registry);
        let navigation = starter_navigation();

        for page in &navigation.pages {
            assert!(data.contains_key(&page.id), "missing page doc: {}", page.id);
        }
        assert_eq!(navigation.pages[0].is_home_page, Some(true));
    }

    #[test]
    fn test_starter_components_use_registered_types() {
        let registry = ComponentRegistry::builtin();
        let data = starter_website_data(&registry);

        for (page_id, page_data) in &data {
            assert!(!page_data.components.is_empty(), "{} is empty", page_id);
            for component in &page_data.components {
                assert!(
                    registry.is_registered(&component.component_type),
                    "unregistered type {} on {}",
                    component.component_type,
                    page_id
                );
            }
        }
    }

    #[test]
    fn test_starter_overrides_replace_defaults() {
        let registry = ComponentRegistry::builtin();
        let data = starter_website_data(&registry);

        let header = &data["about"].components[0];
        assert_eq!(
            header.properties.get("title").and_then(|v| v.as_str()),
            Some("About Us")
        );
    }
}
