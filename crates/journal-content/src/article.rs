//! Article domain models
//!
//! This module provides the article (submission), published-article
//! association, and tombstone entities that the issue lifecycle
//! cascades over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use journal_org::{LocalizedText, WorkflowStage};

/// Editorial status of an article.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// In the editorial queue (submitted or scheduled)
    Queued,

    /// Published within an issue
    Published,

    /// Declined by the editors
    Declined,
}

impl ArticleStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Published => "published",
            Self::Declined => "declined",
        }
    }
}

/// An article submitted to a journal.
///
/// Articles move through workflow stages while queued; once assigned
/// to a published issue they gain a [`PublishedArticle`] association.
/// Deleting that issue reverts them to the queue.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use journal_content::{Article, ArticleStatus};
/// use journal_org::LocalizedText;
///
/// let article = Article::new(Uuid::now_v7(), LocalizedText::with("en_US", "On Examples"));
/// assert_eq!(article.status, ArticleStatus::Queued);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier for the article
    pub id: Uuid,

    /// The journal this article was submitted to
    pub journal_id: Uuid,

    /// Localized article title
    pub title: LocalizedText,

    /// Editorial status
    pub status: ArticleStatus,

    /// Current workflow stage
    pub stage: WorkflowStage,

    /// When the article was submitted
    pub created_at: DateTime<Utc>,

    /// When the article was last updated
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Creates a new queued article in the submission stage.
    ///
    /// # Arguments
    ///
    /// * `journal_id` - The journal receiving the submission
    /// * `title` - Localized article title
    pub fn new(journal_id: Uuid, title: LocalizedText) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            journal_id,
            title,
            status: ArticleStatus::Queued,
            stage: WorkflowStage::Submission,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the workflow stage at construction time.
    pub fn with_stage(mut self, stage: WorkflowStage) -> Self {
        self.stage = stage;
        self
    }
}

/// The association placing an article within an issue.
///
/// Exists only while the article is published; dropping it returns
/// the article to the plain editorial queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedArticle {
    /// Unique identifier for the association
    pub id: Uuid,

    /// The published article
    pub article_id: Uuid,

    /// The issue the article appears in
    pub issue_id: Uuid,

    /// When the article was published
    pub date_published: DateTime<Utc>,

    /// Position within the issue's table of contents
    pub seq: u32,
}

impl PublishedArticle {
    /// Creates a new published-article association.
    ///
    /// # Arguments
    ///
    /// * `article_id` - The article being published
    /// * `issue_id` - The issue it appears in
    /// * `seq` - Position within the issue
    pub fn new(article_id: Uuid, issue_id: Uuid, seq: u32) -> Self {
        Self {
            id: Uuid::now_v7(),
            article_id,
            issue_id,
            date_published: Utc::now(),
            seq,
        }
    }
}

/// An immutable record of previously-published content that was
/// removed.
///
/// External harvesters and feeds learn about deletions through
/// tombstones; without one, a removed article would silently vanish
/// from harvested metadata. Tombstones are only written for articles
/// removed from a back issue (an issue that was published at some
/// point).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tombstone {
    /// Unique identifier for the tombstone
    pub id: Uuid,

    /// The removed article
    pub article_id: Uuid,

    /// The journal the article belonged to
    pub journal_id: Uuid,

    /// The issue the article was removed from
    pub issue_id: Uuid,

    /// OAI identifier harvesters referenced the article by
    pub oai_identifier: String,

    /// When the article was removed
    pub date_deleted: DateTime<Utc>,
}

impl Tombstone {
    /// Creates a tombstone for an article removed from a back issue.
    ///
    /// # Arguments
    ///
    /// * `article` - The article being removed
    /// * `journal_path` - The journal's URL path, used in the OAI
    ///   identifier
    /// * `issue_id` - The issue the article is being removed from
    pub fn for_article(article: &Article, journal_path: &str, issue_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            article_id: article.id,
            journal_id: article.journal_id,
            issue_id,
            oai_identifier: format!("oai:{}:article/{}", journal_path, article.id),
            date_deleted: Utc::now(),
        }
    }
}
