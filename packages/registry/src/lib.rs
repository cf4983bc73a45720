//! # Sitewright Registry
//!
//! Static catalog of content component types.
//!
//! Each catalog entry pairs everything the editor needs to know about a
//! type in one place: the property schema, display metadata, default
//! properties, and the render function. Keeping schema and renderer in the
//! same entry means a type cannot be registered for editing but missing
//! from dispatch, or vice versa.
//!
//! ## Failure modes
//!
//! Lookups never fail. An unregistered type degrades to safe defaults
//! (permissive schema, raw tag as display name, empty properties) and
//! renders as a diagnostic placeholder naming the offending tag, because a
//! stored document may have been produced by a newer catalog than the one
//! running.

mod catalog;
mod errors;
mod render;
mod schema;
mod templates;

pub use catalog::{CatalogEntry, ComponentRegistry, RenderFn};
pub use errors::RegistryError;
pub use render::RenderOptions;
pub use schema::{FieldKind, FieldSpec, Schema, SchemaViolation};
