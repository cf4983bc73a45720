//! # Sitewright Editor
//!
//! Editing orchestration for a site document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ session: EditSession                        │
//! │  - one-time init (backup prompt, starter)   │
//! │  - version watcher → unsaved tracking       │
//! │  - user intent → store mutations            │
//! │  - save via remote page actions             │
//! └─────────────────────────────────────────────┘
//!           ↓                       ↓
//! ┌──────────────────┐   ┌──────────────────────┐
//! │ store: SiteStore │   │ registry: catalog +  │
//! │ (document state) │   │ render dispatch      │
//! └──────────────────┘   └──────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is the source of truth**: the session holds workflow
//!    state only (unsaved flag, prompts, notices), never content.
//! 2. **Validate before mutating**: page-management input is checked here,
//!    and the remote action must succeed before the store changes.
//! 3. **Failures are notices, not corruption**: a failed save or an unknown
//!    component type reports to the user and leaves the document intact.

mod actions;
mod errors;
mod session;
mod starter;

pub use actions::{slugify, validate_new_page, MockPageActions, PageActions};
pub use errors::EditorError;
pub use session::{
    BackupChoice, EditSession, Notice, SessionPrompts, Severity, SidebarTab, StaticPrompts,
};
pub use starter::{starter_navigation, starter_website_data};

// Re-export the collaborating crates' entry points for convenience
pub use sitewright_registry::{ComponentRegistry, RenderOptions};
pub use sitewright_store::{SiteState, SiteStore};
