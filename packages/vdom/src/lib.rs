//! # Sitewright VDOM
//!
//! Virtual DOM produced by component rendering.
//!
//! Templates build `VNode` trees; the preview shell serializes them to HTML.
//! Render errors are represented inline as `VNode::Error` nodes instead of
//! failing the whole page.

mod html;
mod vdom;

pub use html::{render_html, RenderHtmlOptions};
pub use vdom::VNode;
