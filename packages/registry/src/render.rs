//! Component dispatch.
//!
//! Looks up the render function for a component's type tag and wraps the
//! result in an addressable container. Unknown types render a diagnostic
//! placeholder instead of failing, since stored documents can reference
//! types the running catalog has never heard of.

use crate::catalog::ComponentRegistry;
use sitewright_store::SiteComponent;
use sitewright_vdom::VNode;

/// Rendering context shared by every component on a page
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Editing preview rather than published output
    pub edit_mode: bool,
    /// Component highlighted in the editor, if any
    pub selected_component_id: Option<String>,
}

impl RenderOptions {
    pub fn editing() -> Self {
        Self {
            edit_mode: true,
            selected_component_id: None,
        }
    }

    pub fn with_selection(mut self, component_id: impl Into<String>) -> Self {
        self.selected_component_id = Some(component_id.into());
        self
    }
}

impl ComponentRegistry {
    /// Render one component, wrapped in a container carrying its identity.
    /// The container class gains `sw-selected` when this component is the
    /// edit-mode selection.
    pub fn render_component(&self, component: &SiteComponent, options: &RenderOptions) -> VNode {
        let body = match self.entry(&component.component_type) {
            Some(entry) => (entry.render)(&component.properties, options),
            None => {
                tracing::warn!(
                    component_id = %component.id,
                    component_type = %component.component_type,
                    "no renderer registered for component type"
                );
                self.unknown_placeholder(&component.component_type)
            }
        };

        let selected = options.edit_mode
            && options
                .selected_component_id
                .as_deref()
                .map(|id| id == component.id)
                .unwrap_or(false);

        VNode::element("div")
            .with_class(if selected {
                "sw-component sw-selected"
            } else {
                "sw-component"
            })
            .with_attr("data-component-id", &component.id)
            .with_attr("data-component-type", &component.component_type)
            .with_child(body)
    }

    /// Render a page's component list in document order
    pub fn render_page(&self, components: &[SiteComponent], options: &RenderOptions) -> VNode {
        let rendered = components
            .iter()
            .map(|c| self.render_component(c, options))
            .collect();

        VNode::element("div")
            .with_class("sw-page")
            .with_children(rendered)
    }

    fn unknown_placeholder(&self, type_tag: &str) -> VNode {
        let valid: Vec<String> = self
            .component_types()
            .iter()
            .map(|t| t.to_string())
            .collect();

        VNode::element("div")
            .with_class("sw-unknown-component")
            .with_child(VNode::error(
                format!("Unknown component type: {}", type_tag),
                valid,
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sitewright_store::PropertyMap;

    fn props(value: serde_json::Value) -> PropertyMap {
        match value {
            serde_json::Value::Object(map) => map,
            _ => PropertyMap::new(),
        }
    }

    fn hero(id: &str) -> SiteComponent {
        SiteComponent::new(id, "hero-section")
            .with_properties(props(json!({ "title": "Hi", "subtitle": "s" })))
    }

    #[test]
    fn test_rendered_component_carries_identity_attributes() {
        let registry = ComponentRegistry::builtin();
        let node = registry.render_component(&hero("hero-1"), &RenderOptions::default());

        match &node {
            VNode::Element { attributes, .. } => {
                assert_eq!(attributes.get("data-component-id").unwrap(), "hero-1");
                assert_eq!(
                    attributes.get("data-component-type").unwrap(),
                    "hero-section"
                );
            }
            _ => panic!("expected element wrapper"),
        }
    }

    #[test]
    fn test_unknown_type_renders_placeholder_naming_the_tag() {
        let registry = ComponentRegistry::builtin();
        let component = SiteComponent::new("x-1", "holographic-banner");
        let node = registry.render_component(&component, &RenderOptions::default());

        let text = node.text_content();
        assert!(text.contains("holographic-banner"));
        // the placeholder lists valid alternatives
        assert!(text.contains("hero-section"));
    }

    #[test]
    fn test_selection_marks_only_the_selected_component() {
        let registry = ComponentRegistry::builtin();
        let options = RenderOptions::editing().with_selection("hero-2");

        let classes = |node: &VNode| match node {
            VNode::Element { attributes, .. } => attributes.get("class").cloned().unwrap_or_default(),
            _ => String::new(),
        };

        let selected = registry.render_component(&hero("hero-2"), &options);
        let other = registry.render_component(&hero("hero-1"), &options);
        assert!(classes(&selected).contains("sw-selected"));
        assert!(!classes(&other).contains("sw-selected"));
    }

    #[test]
    fn test_selection_ignored_outside_edit_mode() {
        let registry = ComponentRegistry::builtin();
        let options = RenderOptions::default().with_selection("hero-1");

        let node = registry.render_component(&hero("hero-1"), &options);
        match &node {
            VNode::Element { attributes, .. } => {
                assert_eq!(attributes.get("class").unwrap(), "sw-component");
            }
            _ => panic!("expected element wrapper"),
        }
    }

    #[test]
    fn test_render_page_preserves_order() {
        let registry = ComponentRegistry::builtin();
        let components = vec![hero("hero-1"), SiteComponent::new("content-1", "content")];
        let node = registry.render_page(&components, &RenderOptions::default());

        match &node {
            VNode::Element { children, .. } => {
                assert_eq!(children.len(), 2);
                match &children[0] {
                    VNode::Element { attributes, .. } => {
                        assert_eq!(attributes.get("data-component-id").unwrap(), "hero-1")
                    }
                    _ => panic!("expected element"),
                }
            }
            _ => panic!("expected page wrapper"),
        }
    }
}
