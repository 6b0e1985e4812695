//! Repository traits for content persistence
//!
//! The lifecycle manager receives these interfaces at construction
//! and never performs ambient lookups. In-memory implementations
//! live in [`crate::memory`]; production deployments back them with
//! the persistence layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::article::{Article, ArticleStatus, PublishedArticle, Tombstone};
use crate::error::ContentResult;
use crate::issue::Issue;

/// Storage for issues.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Persist a new issue.
    async fn insert(&self, issue: Issue) -> ContentResult<Issue>;

    /// Persist changes to an existing issue.
    async fn update(&self, issue: Issue) -> ContentResult<Issue>;

    /// Remove an issue record.
    async fn delete(&self, issue_id: Uuid) -> ContentResult<()>;

    /// Look up an issue by id.
    async fn find(&self, issue_id: Uuid) -> ContentResult<Option<Issue>>;

    /// All issues of a journal.
    async fn for_journal(&self, journal_id: Uuid) -> ContentResult<Vec<Issue>>;

    /// Published issues of a journal, most recently published first.
    ///
    /// The ordering is part of the contract: the lifecycle manager
    /// promotes the first entry when the current issue is deleted.
    async fn published_for_journal(&self, journal_id: Uuid) -> ContentResult<Vec<Issue>>;

    /// The journal's current issue, if any.
    async fn current_for_journal(&self, journal_id: Uuid) -> ContentResult<Option<Issue>>;

    /// Unset the current flag on every issue of a journal.
    async fn clear_current(&self, journal_id: Uuid) -> ContentResult<()>;
}

/// Storage for published-article associations.
#[async_trait]
pub trait PublishedArticleRepository: Send + Sync {
    /// Persist a new association.
    async fn insert(&self, published: PublishedArticle) -> ContentResult<PublishedArticle>;

    /// All associations within an issue, ordered by sequence.
    async fn for_issue(&self, issue_id: Uuid) -> ContentResult<Vec<PublishedArticle>>;

    /// Remove an association by id.
    async fn delete(&self, published_id: Uuid) -> ContentResult<()>;
}

/// Storage for articles.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Persist a new article.
    async fn insert(&self, article: Article) -> ContentResult<Article>;

    /// Look up an article by id.
    async fn find(&self, article_id: Uuid) -> ContentResult<Option<Article>>;

    /// Change an article's editorial status.
    async fn set_status(&self, article_id: Uuid, status: ArticleStatus) -> ContentResult<()>;
}

/// Writer for deletion tombstones.
#[async_trait]
pub trait TombstoneWriter: Send + Sync {
    /// Record a tombstone.
    async fn insert(&self, tombstone: Tombstone) -> ContentResult<()>;

    /// Remove a tombstone.
    ///
    /// Used as the compensating action when a delete cascade rolls
    /// back after its tombstones were already written.
    async fn remove(&self, tombstone_id: Uuid) -> ContentResult<()>;
}

/// Search index updater for published content.
#[async_trait]
pub trait SearchIndexer: Send + Sync {
    /// Index (or reindex) a newly published issue.
    async fn index_issue(&self, journal_id: Uuid, issue_id: Uuid) -> ContentResult<()>;

    /// Drop an issue from the index.
    async fn remove_issue(&self, journal_id: Uuid, issue_id: Uuid) -> ContentResult<()>;
}
