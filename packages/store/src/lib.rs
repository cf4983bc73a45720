//! # Sitewright Store
//!
//! The site document store: the single authoritative state container for a
//! website being edited.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ mutations: pure operations on SiteState     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: SiteStore                            │
//! │  - applies mutations                        │
//! │  - bumps version + timestamp on content     │
//! │  - mirrors every content change to backup   │
//! │  - focus ops (selection) bypass the counter │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ selectors: cached, version-memoized views   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Mutations are total**: a missing page or component degrades to a
//!    no-op, never an error. Every operation is defined for every input.
//! 2. **Version counter is the change signal**: `metadata.version` increases
//!    exactly once per content mutation and never on selection changes.
//!    Consumers watch it to detect unsaved work.
//! 3. **The pure core never touches storage or clocks**: version bumps,
//!    timestamps, and backup mirroring live in [`SiteStore`], so the
//!    mutation core is testable without either.
//! 4. **Backup is crash recovery, not save**: the local backup mirrors the
//!    live state on every content mutation, independent of any server save.

mod backup;
mod errors;
mod mutations;
mod selectors;
mod state;
mod store;

pub use backup::{BackupStorage, FileBackup, MemoryBackup, BACKUP_FILE_NAME};
pub use errors::StoreError;
pub use mutations::Mutation;
pub use selectors::{SelectorCache, StoreViews};
pub use state::{
    Metadata, Navigation, Page, PageData, PagePatch, PropertyMap, SiteComponent, SiteState,
    WebsiteData,
};
pub use store::SiteStore;
