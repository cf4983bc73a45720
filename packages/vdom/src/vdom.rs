use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Error node (shows problems inline instead of crashing the preview)
    Error {
        message: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        details: Vec<String>,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>, details: Vec<String>) -> Self {
        VNode::Error {
            message: message.into(),
            details,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Collect all text content in the subtree (used by tests and search)
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            VNode::Text { content } => out.push_str(content),
            VNode::Error { message, details } => {
                out.push_str(message);
                for detail in details {
                    out.push(' ');
                    out.push_str(detail);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let node = VNode::element("div")
            .with_class("hero")
            .with_style("color", "red")
            .with_child(VNode::text("Hello"));

        match &node {
            VNode::Element {
                tag,
                attributes,
                styles,
                children,
            } => {
                assert_eq!(tag, "div");
                assert_eq!(attributes.get("class").unwrap(), "hero");
                assert_eq!(styles.get("color").unwrap(), "red");
                assert_eq!(children.len(), 1);
            }
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn test_builders_are_noop_on_non_elements() {
        let node = VNode::text("plain").with_attr("class", "x");
        assert_eq!(node, VNode::text("plain"));
    }

    #[test]
    fn test_text_content_walks_subtree() {
        let node = VNode::element("section")
            .with_child(VNode::element("h1").with_child(VNode::text("Title")))
            .with_child(VNode::text(" body"));

        assert_eq!(node.text_content(), "Title body");
    }

    #[test]
    fn test_serde_round_trip() {
        let node = VNode::element("div")
            .with_attr("id", "a")
            .with_child(VNode::error("bad type", vec!["hero-section".to_string()]));

        let json = serde_json::to_string(&node).unwrap();
        let back: VNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
