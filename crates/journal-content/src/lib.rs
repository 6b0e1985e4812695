//! # Journal Content
//!
//! This crate provides issue lifecycle and published-content
//! management for the journal platform.
//!
//! ## Overview
//!
//! The journal-content crate handles:
//! - **Issues**: Creation, partial updates, publish/unpublish, and
//!   deletion with cascading side effects
//! - **Access status**: Mapping a journal's publishing mode to the
//!   default reader access of new issues
//! - **Tombstones**: Harvester-visible records of content removed
//!   from back issues
//! - **Repositories**: Storage traits with in-memory implementations
//!
//! ## Lifecycle Invariants
//!
//! - A journal has at most one current issue; publish uses
//!   clear-then-set under a per-journal lock.
//! - Deleting an issue reverts its published articles to the
//!   editorial queue; tombstones are written only when the issue was
//!   a back issue.
//! - The delete cascade is all-or-nothing: completed steps are
//!   compensated when a later step fails.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use journal_content::{
//!     IssueLifecycleManager, IssueUpdateRequest, MemoryArticles, MemoryIssueRepository,
//!     MemoryPublishedArticles, MemoryTombstones, NoopSearchIndexer,
//! };
//! use journal_org::Journal;
//!
//! # async fn example() {
//! let manager = IssueLifecycleManager::new(
//!     MemoryIssueRepository::shared(),
//!     MemoryPublishedArticles::shared(),
//!     MemoryArticles::shared(),
//!     MemoryTombstones::shared(),
//!     NoopSearchIndexer::shared(),
//! );
//!
//! let journal = Journal::new("Journal of Examples", "joe");
//! let issue = manager
//!     .create(
//!         &journal,
//!         IssueUpdateRequest::default().with_volume(1).with_show_volume(true),
//!     )
//!     .await
//!     .unwrap();
//! let issue = manager.publish(issue.id, &journal).await.unwrap();
//! assert!(issue.current);
//! # }
//! ```
//!
//! ## Integration
//!
//! This crate works with:
//! - `journal-org`: Journals, publishing modes, and localized text
//! - `journal-authz`: The issue-required policy loads issues through
//!   [`IssueRepository`]
//! - `journal-api`: Handlers call the lifecycle manager after a
//!   permit

pub mod access;
pub mod article;
pub mod error;
pub mod issue;
pub mod lifecycle;
pub mod memory;
pub mod repository;

// Re-export main types for convenience
pub use access::{
    resolve_access_status, user_has_access_to_galleys, AccessStatus, MemorySubscriptions,
    SubscriptionChecker,
};
pub use article::{Article, ArticleStatus, PublishedArticle, Tombstone};
pub use error::{ContentError, ContentResult, ValidationError};
pub use issue::{Issue, IssueUpdateRequest};
pub use lifecycle::IssueLifecycleManager;
pub use memory::{
    MemoryArticles, MemoryIssueRepository, MemoryPublishedArticles, MemoryTombstones,
    NoopSearchIndexer, RecordingSearchIndexer,
};
pub use repository::{
    ArticleRepository, IssueRepository, PublishedArticleRepository, SearchIndexer, TombstoneWriter,
};
