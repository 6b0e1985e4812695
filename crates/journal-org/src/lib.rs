//! # Journal Organization
//!
//! This crate provides the journal domain model for the journal
//! platform, shared across the authorization, content, and API crates.
//!
//! ## Overview
//!
//! The journal-org crate handles:
//! - **Journals**: The tenant context that owns issues and submissions
//! - **Roles**: Per-journal role grants and set-intersection checks
//! - **Workflow stages**: The fixed submission pipeline phases
//! - **Settings**: Publishing mode and reader notification options
//! - **Localized text**: Locale-keyed values for reader-facing fields
//!
//! ## Role Model
//!
//! A user holds a set of [`Role`]s per journal; authorization compares
//! role sets by intersection, never by equality. Site-level roles
//! (SiteAdmin) apply to every journal.
//!
//! ## Usage
//!
//! ```rust
//! use journal_org::{Journal, PublishingMode, Role, RoleSet};
//!
//! let journal = Journal::new("Journal of Examples", "joe")
//!     .with_publishing_mode(PublishingMode::Subscription);
//!
//! let held = RoleSet::of(&[Role::Author]);
//! let required = RoleSet::of(&[Role::Manager, Role::Author]);
//! assert!(held.intersects(&required));
//! ```
//!
//! ## Integration
//!
//! This crate works with:
//! - `journal-authz`: Policies consume [`RoleResolver`] and compare
//!   [`RoleSet`]s
//! - `journal-content`: Issue defaults derive from
//!   [`JournalSettings::publishing_mode`]

pub mod journal;
pub mod locale;
pub mod resolver;
pub mod roles;
pub mod settings;
pub mod stages;

// Re-export main types for convenience
pub use journal::Journal;
pub use locale::LocalizedText;
pub use resolver::{MemoryRoleResolver, RoleResolver};
pub use roles::{Role, RoleSet};
pub use settings::{JournalSettings, PublishingMode};
pub use stages::WorkflowStage;
