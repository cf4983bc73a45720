//! VNode → HTML serialization.

use crate::VNode;

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct RenderHtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for RenderHtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: RenderHtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: RenderHtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            let indent = self.options.indent.clone();
            for _ in 0..self.depth {
                self.buffer.push_str(&indent);
            }
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a VNode tree to an HTML fragment
pub fn render_html(node: &VNode, options: RenderHtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => {
            let mut open = format!("<{}", tag);
            for (key, value) in attributes {
                open.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
            }
            if !styles.is_empty() {
                let css: Vec<String> = styles
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                open.push_str(&format!(" style=\"{}\"", escape_attr(&css.join("; "))));
            }

            if children.is_empty() && is_void_tag(tag) {
                open.push_str(" />");
                ctx.add_line(&open);
                return;
            }

            open.push('>');
            ctx.add_line(&open);
            ctx.indent();
            for child in children {
                write_node(child, ctx);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{}>", tag));
        }

        VNode::Text { content } => {
            ctx.add_line(&escape_text(content));
        }

        VNode::Error { message, details } => {
            ctx.add_line("<div class=\"sw-render-error\">");
            ctx.indent();
            ctx.add_line(&format!("<strong>{}</strong>", escape_text(message)));
            for detail in details {
                ctx.add_line(&format!("<code>{}</code>", escape_text(detail)));
            }
            ctx.dedent();
            ctx.add_line("</div>");
        }
    }
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "br" | "hr" | "input" | "source" | "link" | "meta"
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_element() {
        let node = VNode::element("div")
            .with_attr("class", "box")
            .with_child(VNode::text("hi"));

        let html = render_html(
            &node,
            RenderHtmlOptions {
                pretty: false,
                indent: String::new(),
            },
        );
        assert_eq!(html, "<div class=\"box\">hi</div>");
    }

    #[test]
    fn test_void_tag_self_closes() {
        let node = VNode::element("img").with_attr("src", "/a.png");
        let html = render_html(
            &node,
            RenderHtmlOptions {
                pretty: false,
                indent: String::new(),
            },
        );
        assert_eq!(html, "<img src=\"/a.png\" />");
    }

    #[test]
    fn test_escaping() {
        let node = VNode::element("p")
            .with_attr("title", "a \"b\"")
            .with_child(VNode::text("1 < 2 & 3"));

        let html = render_html(
            &node,
            RenderHtmlOptions {
                pretty: false,
                indent: String::new(),
            },
        );
        assert!(html.contains("title=\"a &quot;b&quot;\""));
        assert!(html.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn test_error_node_renders_details() {
        let node = VNode::error("Unknown component type", vec!["hero-section".to_string()]);
        let html = render_html(&node, RenderHtmlOptions::default());
        assert!(html.contains("sw-render-error"));
        assert!(html.contains("hero-section"));
    }

    #[test]
    fn test_inline_styles_serialized() {
        let node = VNode::element("div").with_style("color", "red");
        let html = render_html(
            &node,
            RenderHtmlOptions {
                pretty: false,
                indent: String::new(),
            },
        );
        assert_eq!(html, "<div style=\"color: red\"></div>");
    }
}
