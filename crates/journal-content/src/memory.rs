//! In-memory repository implementations
//!
//! Suitable for single-process deployments and testing. Each store
//! guards its table with a `tokio::sync::RwLock`; the lifecycle
//! manager layers per-journal mutation locks on top.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::article::{Article, ArticleStatus, PublishedArticle, Tombstone};
use crate::error::{ContentError, ContentResult};
use crate::issue::Issue;
use crate::repository::{
    ArticleRepository, IssueRepository, PublishedArticleRepository, SearchIndexer, TombstoneWriter,
};

/// In-memory issue store.
#[derive(Debug, Default)]
pub struct MemoryIssueRepository {
    issues: RwLock<HashMap<Uuid, Issue>>,
}

impl MemoryIssueRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store wrapped for shared use.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of stored issues.
    pub async fn len(&self) -> usize {
        self.issues.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.issues.read().await.is_empty()
    }
}

#[async_trait]
impl IssueRepository for MemoryIssueRepository {
    async fn insert(&self, issue: Issue) -> ContentResult<Issue> {
        let mut issues = self.issues.write().await;
        issues.insert(issue.id, issue.clone());
        Ok(issue)
    }

    async fn update(&self, issue: Issue) -> ContentResult<Issue> {
        let mut issues = self.issues.write().await;
        if !issues.contains_key(&issue.id) {
            return Err(ContentError::IssueNotFound(issue.id));
        }
        issues.insert(issue.id, issue.clone());
        Ok(issue)
    }

    async fn delete(&self, issue_id: Uuid) -> ContentResult<()> {
        let mut issues = self.issues.write().await;
        issues
            .remove(&issue_id)
            .map(|_| ())
            .ok_or(ContentError::IssueNotFound(issue_id))
    }

    async fn find(&self, issue_id: Uuid) -> ContentResult<Option<Issue>> {
        let issues = self.issues.read().await;
        Ok(issues.get(&issue_id).cloned())
    }

    async fn for_journal(&self, journal_id: Uuid) -> ContentResult<Vec<Issue>> {
        let issues = self.issues.read().await;
        let mut found: Vec<Issue> = issues
            .values()
            .filter(|issue| issue.journal_id == journal_id)
            .cloned()
            .collect();
        found.sort_by_key(|issue| issue.created_at);
        Ok(found)
    }

    async fn published_for_journal(&self, journal_id: Uuid) -> ContentResult<Vec<Issue>> {
        let issues = self.issues.read().await;
        let mut found: Vec<Issue> = issues
            .values()
            .filter(|issue| issue.journal_id == journal_id && issue.published)
            .cloned()
            .collect();
        // Most recently published first; the head is the promotion
        // candidate when the current issue is deleted.
        found.sort_by(|a, b| b.date_published.cmp(&a.date_published));
        Ok(found)
    }

    async fn current_for_journal(&self, journal_id: Uuid) -> ContentResult<Option<Issue>> {
        let issues = self.issues.read().await;
        Ok(issues
            .values()
            .find(|issue| issue.journal_id == journal_id && issue.current)
            .cloned())
    }

    async fn clear_current(&self, journal_id: Uuid) -> ContentResult<()> {
        let mut issues = self.issues.write().await;
        for issue in issues.values_mut() {
            if issue.journal_id == journal_id {
                issue.current = false;
            }
        }
        Ok(())
    }
}

/// In-memory published-article store.
#[derive(Debug, Default)]
pub struct MemoryPublishedArticles {
    published: RwLock<HashMap<Uuid, PublishedArticle>>,
}

impl MemoryPublishedArticles {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store wrapped for shared use.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl PublishedArticleRepository for MemoryPublishedArticles {
    async fn insert(&self, published: PublishedArticle) -> ContentResult<PublishedArticle> {
        let mut table = self.published.write().await;
        table.insert(published.id, published.clone());
        Ok(published)
    }

    async fn for_issue(&self, issue_id: Uuid) -> ContentResult<Vec<PublishedArticle>> {
        let table = self.published.read().await;
        let mut found: Vec<PublishedArticle> = table
            .values()
            .filter(|pa| pa.issue_id == issue_id)
            .cloned()
            .collect();
        found.sort_by_key(|pa| pa.seq);
        Ok(found)
    }

    async fn delete(&self, published_id: Uuid) -> ContentResult<()> {
        let mut table = self.published.write().await;
        table.remove(&published_id);
        Ok(())
    }
}

/// In-memory article store.
#[derive(Debug, Default)]
pub struct MemoryArticles {
    articles: RwLock<HashMap<Uuid, Article>>,
}

impl MemoryArticles {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store wrapped for shared use.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticles {
    async fn insert(&self, article: Article) -> ContentResult<Article> {
        let mut articles = self.articles.write().await;
        articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn find(&self, article_id: Uuid) -> ContentResult<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.get(&article_id).cloned())
    }

    async fn set_status(&self, article_id: Uuid, status: ArticleStatus) -> ContentResult<()> {
        let mut articles = self.articles.write().await;
        let article = articles
            .get_mut(&article_id)
            .ok_or(ContentError::ArticleNotFound(article_id))?;
        article.status = status;
        article.updated_at = chrono::Utc::now();
        Ok(())
    }
}

/// In-memory tombstone store.
///
/// Exposes the stored tombstones for tests and for feeding the
/// harvester endpoint.
#[derive(Debug, Default)]
pub struct MemoryTombstones {
    tombstones: RwLock<HashMap<Uuid, Tombstone>>,
}

impl MemoryTombstones {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store wrapped for shared use.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// All tombstones recorded for a journal.
    pub async fn for_journal(&self, journal_id: Uuid) -> Vec<Tombstone> {
        let table = self.tombstones.read().await;
        let mut found: Vec<Tombstone> = table
            .values()
            .filter(|t| t.journal_id == journal_id)
            .cloned()
            .collect();
        found.sort_by_key(|t| t.date_deleted);
        found
    }

    /// Number of stored tombstones.
    pub async fn len(&self) -> usize {
        self.tombstones.read().await.len()
    }
}

#[async_trait]
impl TombstoneWriter for MemoryTombstones {
    async fn insert(&self, tombstone: Tombstone) -> ContentResult<()> {
        let mut table = self.tombstones.write().await;
        table.insert(tombstone.id, tombstone);
        Ok(())
    }

    async fn remove(&self, tombstone_id: Uuid) -> ContentResult<()> {
        let mut table = self.tombstones.write().await;
        table.remove(&tombstone_id);
        Ok(())
    }
}

/// Search indexer that ignores all updates.
///
/// For deployments without a search backend and for tests that do
/// not assert on indexing.
#[derive(Debug, Default)]
pub struct NoopSearchIndexer;

impl NoopSearchIndexer {
    /// Create a no-op indexer wrapped for shared use.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl SearchIndexer for NoopSearchIndexer {
    async fn index_issue(&self, _journal_id: Uuid, _issue_id: Uuid) -> ContentResult<()> {
        Ok(())
    }

    async fn remove_issue(&self, _journal_id: Uuid, _issue_id: Uuid) -> ContentResult<()> {
        Ok(())
    }
}

/// Search indexer that records every call, for tests.
#[derive(Debug, Default)]
pub struct RecordingSearchIndexer {
    indexed: RwLock<Vec<(Uuid, Uuid)>>,
    removed: RwLock<Vec<(Uuid, Uuid)>>,
}

impl RecordingSearchIndexer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty recorder wrapped for shared use.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// `(journal, issue)` pairs passed to `index_issue`.
    pub async fn indexed(&self) -> Vec<(Uuid, Uuid)> {
        self.indexed.read().await.clone()
    }

    /// `(journal, issue)` pairs passed to `remove_issue`.
    pub async fn removed(&self) -> Vec<(Uuid, Uuid)> {
        self.removed.read().await.clone()
    }
}

#[async_trait]
impl SearchIndexer for RecordingSearchIndexer {
    async fn index_issue(&self, journal_id: Uuid, issue_id: Uuid) -> ContentResult<()> {
        self.indexed.write().await.push((journal_id, issue_id));
        Ok(())
    }

    async fn remove_issue(&self, journal_id: Uuid, issue_id: Uuid) -> ContentResult<()> {
        self.removed.write().await.push((journal_id, issue_id));
        Ok(())
    }
}
