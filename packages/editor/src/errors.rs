//! Error types for editing orchestration.
//!
//! Page-management validation lives at this boundary. The store itself is
//! total and never raises these; by the time a mutation reaches it the
//! input has already passed validation here.

use sitewright_registry::RegistryError;
use sitewright_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("page title cannot be empty")]
    EmptyTitle,

    #[error("a page with slug \"{0}\" already exists")]
    DuplicateSlug(String),

    #[error("the home page cannot be removed")]
    HomePageProtected,

    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("save failed: {0}")]
    SaveFailed(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
