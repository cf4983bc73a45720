//! Error types for the registry

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The type tag is not in the catalog. Distinct from a registered type
    /// with an intentionally empty defaults map, which is valid.
    #[error("Unknown component type: {0}")]
    UnknownType(String),
}
