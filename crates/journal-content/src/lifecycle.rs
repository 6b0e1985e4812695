//! Issue lifecycle management
//!
//! This module provides the manager that validates, creates,
//! updates, deletes, publishes, and unpublishes issues, including
//! the cascading side effects deletion has on published articles.
//!
//! Two invariants drive the design:
//!
//! - Within a journal at most one issue is current at a time.
//!   Operations that touch the current flag serialize on a
//!   per-journal lock, and publish uses clear-then-set.
//! - A delete cascade either applies completely or not at all. The
//!   cascade records a compensating action for each completed step
//!   and replays them in reverse when a later step fails.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};
use uuid::Uuid;

use journal_org::Journal;

use crate::access::resolve_access_status;
use crate::article::{ArticleStatus, PublishedArticle, Tombstone};
use crate::error::{ContentError, ContentResult, ValidationError};
use crate::issue::{Issue, IssueUpdateRequest};
use crate::repository::{
    ArticleRepository, IssueRepository, PublishedArticleRepository, SearchIndexer, TombstoneWriter,
};

/// Inverse of one completed cascade step.
enum Compensation {
    RemoveTombstone(Uuid),
    RestoreStatus(Uuid, ArticleStatus),
    RestoreAssociation(PublishedArticle),
    RestoreIssue(Issue),
    ClearCurrent(Uuid),
}

/// Orchestrates issue mutations and their cascading side effects.
///
/// The manager receives its repositories at construction (explicit
/// dependency injection, no ambient registries) and serializes
/// current-flag mutations per journal.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use journal_content::{
///     IssueLifecycleManager, IssueUpdateRequest, MemoryArticles, MemoryIssueRepository,
///     MemoryPublishedArticles, MemoryTombstones, NoopSearchIndexer,
/// };
/// use journal_org::Journal;
///
/// # async fn example() {
/// let manager = IssueLifecycleManager::new(
///     MemoryIssueRepository::shared(),
///     MemoryPublishedArticles::shared(),
///     MemoryArticles::shared(),
///     MemoryTombstones::shared(),
///     NoopSearchIndexer::shared(),
/// );
///
/// let journal = Journal::new("Journal of Examples", "joe");
/// let req = IssueUpdateRequest::default().with_volume(1).with_show_volume(true);
/// let issue = manager.create(&journal, req).await.unwrap();
/// assert!(!issue.published);
/// # }
/// ```
pub struct IssueLifecycleManager {
    issues: Arc<dyn IssueRepository>,
    published_articles: Arc<dyn PublishedArticleRepository>,
    articles: Arc<dyn ArticleRepository>,
    tombstones: Arc<dyn TombstoneWriter>,
    search_index: Arc<dyn SearchIndexer>,
    /// Per-journal mutation locks guarding the current flag
    journal_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl IssueLifecycleManager {
    /// Creates a lifecycle manager over the given repositories.
    ///
    /// # Arguments
    ///
    /// * `issues` - Issue storage
    /// * `published_articles` - Published-article association storage
    /// * `articles` - Article storage
    /// * `tombstones` - Tombstone writer for harvester consistency
    /// * `search_index` - Search index updater for published content
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        published_articles: Arc<dyn PublishedArticleRepository>,
        articles: Arc<dyn ArticleRepository>,
        tombstones: Arc<dyn TombstoneWriter>,
        search_index: Arc<dyn SearchIndexer>,
    ) -> Self {
        Self {
            issues,
            published_articles,
            articles,
            tombstones,
            search_index,
            journal_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get (or create) the mutation lock for a journal.
    ///
    /// Locking is per journal; there is no cross-journal contention.
    /// Idle entries are dropped on each acquisition so the map stays
    /// bounded by the number of journals with an operation in flight.
    async fn journal_lock(&self, journal_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.journal_locks.lock().await;
        // A strong count of one means only the map holds the lock.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(journal_id).or_default().clone()
    }

    #[cfg(test)]
    async fn journal_lock_count(&self) -> usize {
        self.journal_locks.lock().await.len()
    }

    /// Validate an issue's merged state.
    ///
    /// The same rules run for create and update; only the
    /// identification rule (at least one of the four show flags) is
    /// restricted to creation.
    ///
    /// # Arguments
    ///
    /// * `is_create` - Whether this validates a new issue
    /// * `issue` - The merged candidate state
    pub fn validate(is_create: bool, issue: &Issue) -> Result<(), ValidationError> {
        if is_create
            && !issue.show_volume
            && !issue.show_year
            && !issue.show_number
            && !issue.show_title
        {
            return Err(ValidationError::IdentificationRequired);
        }

        if issue.show_volume && issue.volume == 0 {
            return Err(ValidationError::VolumeRequired);
        }
        if issue.show_year && issue.year == 0 {
            return Err(ValidationError::YearRequired);
        }
        if issue.show_number && issue.number.trim().is_empty() {
            return Err(ValidationError::NumberRequired);
        }
        if issue.show_title && issue.title.is_blank() {
            return Err(ValidationError::TitleRequired);
        }

        if issue.title.has_blank_locale() {
            return Err(ValidationError::LocaleRequired("title"));
        }
        if issue.description.has_blank_locale() {
            return Err(ValidationError::LocaleRequired("description"));
        }

        Ok(())
    }

    /// Create a new issue in a journal.
    ///
    /// The request is merged over freshly initialized defaults; the
    /// access status defaults from the journal's publishing mode
    /// unless the request overrides it. The issue starts unpublished
    /// and non-current.
    ///
    /// # Arguments
    ///
    /// * `journal` - The owning journal
    /// * `request` - Issue data
    ///
    /// # Errors
    ///
    /// [`ContentError::Validation`] when the merged data fails a
    /// rule; storage errors pass through.
    pub async fn create(
        &self,
        journal: &Journal,
        request: IssueUpdateRequest,
    ) -> ContentResult<Issue> {
        let mut issue = Issue::new(journal.id);
        issue.access_status = resolve_access_status(journal.settings.publishing_mode);
        request.apply_to(&mut issue);

        Self::validate(true, &issue)?;

        issue.published = false;
        issue.current = false;
        self.issues.insert(issue).await
    }

    /// Update an existing issue.
    ///
    /// The request is merged over the issue's current values, so
    /// omitted fields are preserved.
    ///
    /// # Arguments
    ///
    /// * `issue_id` - The issue to update
    /// * `request` - Partial issue data
    pub async fn update(
        &self,
        issue_id: Uuid,
        request: IssueUpdateRequest,
    ) -> ContentResult<Issue> {
        let mut issue = self
            .issues
            .find(issue_id)
            .await?
            .ok_or(ContentError::IssueNotFound(issue_id))?;

        request.apply_to(&mut issue);
        Self::validate(false, &issue)?;

        issue.updated_at = Utc::now();
        self.issues.update(issue).await
    }

    /// Delete an issue, cascading over its published articles.
    ///
    /// For each published article: a tombstone is written when the
    /// issue is a back issue (published at some point), the article
    /// reverts to the editorial queue, and the published association
    /// is dropped. When the deleted issue was current, the most
    /// recently published remaining issue of the journal becomes
    /// current.
    ///
    /// The cascade is all-or-nothing: a storage failure mid-way
    /// rolls back every completed step before the error is returned.
    ///
    /// # Arguments
    ///
    /// * `issue_id` - The issue to delete
    /// * `journal` - The owning journal
    ///
    /// # Returns
    ///
    /// The deleted issue.
    pub async fn delete(&self, issue_id: Uuid, journal: &Journal) -> ContentResult<Issue> {
        let lock = self.journal_lock(journal.id).await;
        let _guard = lock.lock().await;

        let issue = self.find_in_journal(issue_id, journal).await?;
        let published = self.published_articles.for_issue(issue.id).await?;

        // Captured before any mutation; the issue record is gone by
        // the time tombstone decisions would otherwise be made.
        let is_back_issue = issue.published;

        let mut undo: Vec<Compensation> = Vec::new();
        debug!(
            issue_id = %issue.id,
            journal_id = %journal.id,
            articles = published.len(),
            back_issue = is_back_issue,
            "Deleting issue"
        );

        match self
            .run_delete_cascade(&issue, journal, &published, is_back_issue, &mut undo)
            .await
        {
            Ok(()) => Ok(issue),
            Err(err) => {
                warn!(issue_id = %issue.id, "Delete cascade failed, rolling back: {}", err);
                self.roll_back(undo).await;
                Err(err)
            }
        }
    }

    async fn run_delete_cascade(
        &self,
        issue: &Issue,
        journal: &Journal,
        published: &[PublishedArticle],
        is_back_issue: bool,
        undo: &mut Vec<Compensation>,
    ) -> ContentResult<()> {
        for pa in published {
            let article = self
                .articles
                .find(pa.article_id)
                .await?
                .ok_or(ContentError::ArticleNotFound(pa.article_id))?;

            if is_back_issue {
                let tombstone = Tombstone::for_article(&article, &journal.path, issue.id);
                let tombstone_id = tombstone.id;
                self.tombstones.insert(tombstone).await?;
                undo.push(Compensation::RemoveTombstone(tombstone_id));
            }

            self.articles
                .set_status(article.id, ArticleStatus::Queued)
                .await?;
            undo.push(Compensation::RestoreStatus(article.id, article.status));

            self.published_articles.delete(pa.id).await?;
            undo.push(Compensation::RestoreAssociation(pa.clone()));
        }

        self.issues.delete(issue.id).await?;
        undo.push(Compensation::RestoreIssue(issue.clone()));

        if issue.current {
            let remaining = self.issues.published_for_journal(journal.id).await?;
            if let Some(mut successor) = remaining.into_iter().next() {
                successor.current = true;
                successor.updated_at = Utc::now();
                let successor_id = successor.id;
                self.issues.update(successor).await?;
                undo.push(Compensation::ClearCurrent(successor_id));
            }
        }

        Ok(())
    }

    /// Replay compensations in reverse order, best effort.
    async fn roll_back(&self, undo: Vec<Compensation>) {
        for step in undo.into_iter().rev() {
            let result = match step {
                Compensation::RemoveTombstone(id) => self.tombstones.remove(id).await,
                Compensation::RestoreStatus(article_id, status) => {
                    self.articles.set_status(article_id, status).await
                }
                Compensation::RestoreAssociation(pa) => {
                    self.published_articles.insert(pa).await.map(|_| ())
                }
                Compensation::RestoreIssue(issue) => self.issues.insert(issue).await.map(|_| ()),
                Compensation::ClearCurrent(issue_id) => match self.issues.find(issue_id).await {
                    Ok(Some(mut issue)) => {
                        issue.current = false;
                        self.issues.update(issue).await.map(|_| ())
                    }
                    Ok(None) => Ok(()),
                    Err(err) => Err(err),
                },
            };
            if let Err(err) = result {
                error!("Delete rollback step failed: {}", err);
            }
        }
    }

    /// Publish an issue and make it the journal's current issue.
    ///
    /// Any previously current issue loses the flag first
    /// (clear-then-set under the journal lock), then the newly
    /// published issue is indexed for search. Publishing an already
    /// published issue leaves its state unchanged but resubmits it
    /// to the search index, so a retry after an indexer failure
    /// still reaches the index.
    ///
    /// # Arguments
    ///
    /// * `issue_id` - The issue to publish
    /// * `journal` - The owning journal
    pub async fn publish(&self, issue_id: Uuid, journal: &Journal) -> ContentResult<Issue> {
        let lock = self.journal_lock(journal.id).await;
        let _guard = lock.lock().await;

        let mut issue = self.find_in_journal(issue_id, journal).await?;
        if issue.published {
            // The state change committed on a prior attempt; only the
            // index submission can still be outstanding. Indexing is
            // idempotent, so resubmit it.
            self.search_index.index_issue(journal.id, issue.id).await?;
            return Ok(issue);
        }

        let prior_current = self.issues.current_for_journal(journal.id).await?;
        self.issues.clear_current(journal.id).await?;

        issue.published = true;
        issue.current = true;
        if issue.date_published.is_none() {
            issue.date_published = Some(Utc::now());
        }
        issue.updated_at = Utc::now();

        match self.issues.update(issue).await {
            Ok(issue) => {
                debug!(issue_id = %issue.id, journal_id = %journal.id, "Published issue");
                self.search_index.index_issue(journal.id, issue.id).await?;
                Ok(issue)
            }
            Err(err) => {
                // Restore the displaced current issue so the journal
                // is not left without one.
                if let Some(mut prior) = prior_current {
                    prior.current = true;
                    if let Err(restore_err) = self.issues.update(prior).await {
                        error!("Publish rollback failed: {}", restore_err);
                    }
                }
                Err(err)
            }
        }
    }

    /// Unpublish an issue.
    ///
    /// The issue loses both its published and current flags and is
    /// dropped from the search index. Unpublishing an issue that is
    /// not published re-requests the index removal and returns the
    /// issue unchanged. No successor is promoted: an unpublished
    /// front page shows no current issue until the next publish.
    ///
    /// # Arguments
    ///
    /// * `issue_id` - The issue to unpublish
    /// * `journal` - The owning journal
    pub async fn unpublish(&self, issue_id: Uuid, journal: &Journal) -> ContentResult<Issue> {
        let lock = self.journal_lock(journal.id).await;
        let _guard = lock.lock().await;

        let mut issue = self.find_in_journal(issue_id, journal).await?;
        if !issue.published {
            // Mirror of the publish retry path: removal is
            // idempotent, so re-request it in case an earlier
            // attempt committed the state but failed at the index.
            self.search_index.remove_issue(journal.id, issue.id).await?;
            return Ok(issue);
        }

        issue.published = false;
        issue.current = false;
        issue.updated_at = Utc::now();

        let issue = self.issues.update(issue).await?;
        self.search_index.remove_issue(journal.id, issue.id).await?;
        Ok(issue)
    }

    /// Load an issue, treating ownership by another journal as
    /// absence.
    async fn find_in_journal(&self, issue_id: Uuid, journal: &Journal) -> ContentResult<Issue> {
        let issue = self
            .issues
            .find(issue_id)
            .await?
            .ok_or(ContentError::IssueNotFound(issue_id))?;
        if issue.journal_id != journal.id {
            return Err(ContentError::IssueNotFound(issue_id));
        }
        Ok(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::memory::{
        MemoryArticles, MemoryIssueRepository, MemoryPublishedArticles, MemoryTombstones,
        RecordingSearchIndexer,
    };
    use async_trait::async_trait;
    use journal_org::{LocalizedText, PublishingMode};
    use crate::access::AccessStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        issues: Arc<MemoryIssueRepository>,
        published_articles: Arc<MemoryPublishedArticles>,
        articles: Arc<MemoryArticles>,
        tombstones: Arc<MemoryTombstones>,
        search: Arc<RecordingSearchIndexer>,
        manager: IssueLifecycleManager,
        journal: Journal,
    }

    fn fixture() -> Fixture {
        fixture_for(Journal::new("Journal of Examples", "joe"))
    }

    fn fixture_for(journal: Journal) -> Fixture {
        let issues = MemoryIssueRepository::shared();
        let published_articles = MemoryPublishedArticles::shared();
        let articles = MemoryArticles::shared();
        let tombstones = MemoryTombstones::shared();
        let search = RecordingSearchIndexer::shared();
        let manager = IssueLifecycleManager::new(
            issues.clone(),
            published_articles.clone(),
            articles.clone(),
            tombstones.clone(),
            search.clone(),
        );
        Fixture {
            issues,
            published_articles,
            articles,
            tombstones,
            search,
            manager,
            journal,
        }
    }

    fn volume_request(volume: u32) -> IssueUpdateRequest {
        IssueUpdateRequest::default()
            .with_volume(volume)
            .with_show_volume(true)
    }

    /// Attach `count` published articles to an issue.
    async fn seed_published_articles(fx: &Fixture, issue_id: Uuid, count: u32) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for seq in 0..count {
            let mut article = Article::new(
                fx.journal.id,
                LocalizedText::with("en_US", format!("Article {}", seq)),
            );
            article.status = ArticleStatus::Published;
            let article = fx.articles.insert(article).await.unwrap();
            fx.published_articles
                .insert(PublishedArticle::new(article.id, issue_id, seq))
                .await
                .unwrap();
            ids.push(article.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_create_requires_identification() {
        let fx = fixture();
        let err = fx
            .manager
            .create(&fx.journal, IssueUpdateRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::IdentificationRequired)
        ));

        // One criterion with a value is enough.
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        assert!(!issue.published);
        assert!(!issue.current);
    }

    #[tokio::test]
    async fn test_create_show_flag_requires_value() {
        let fx = fixture();

        let err = fx
            .manager
            .create(
                &fx.journal,
                IssueUpdateRequest::default().with_show_volume(true),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::VolumeRequired)
        ));

        let err = fx
            .manager
            .create(
                &fx.journal,
                IssueUpdateRequest::default()
                    .with_show_number(true)
                    .with_number("   "),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::NumberRequired)
        ));

        let err = fx
            .manager
            .create(
                &fx.journal,
                IssueUpdateRequest::default().with_show_title(true),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::TitleRequired)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_locale() {
        let fx = fixture();
        let mut title = LocalizedText::new();
        title.set("", "No locale");

        let err = fx
            .manager
            .create(
                &fx.journal,
                IssueUpdateRequest::default()
                    .with_show_title(true)
                    .with_title(title),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::LocaleRequired("title"))
        ));
    }

    #[tokio::test]
    async fn test_access_status_defaults_from_publishing_mode() {
        let fx = fixture_for(
            Journal::new("Paywalled", "pw").with_publishing_mode(PublishingMode::Subscription),
        );
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        assert_eq!(issue.access_status, AccessStatus::Subscription);

        // Explicit override wins over the journal default.
        let issue = fx
            .manager
            .create(
                &fx.journal,
                volume_request(2).with_access_status(AccessStatus::Open),
            )
            .await
            .unwrap();
        assert_eq!(issue.access_status, AccessStatus::Open);
    }

    #[tokio::test]
    async fn test_update_preserves_untouched_fields() {
        let fx = fixture();
        let issue = fx
            .manager
            .create(
                &fx.journal,
                volume_request(4)
                    .with_number("1")
                    .with_show_number(true)
                    .with_title(LocalizedText::with("en_US", "Kept")),
            )
            .await
            .unwrap();

        let updated = fx
            .manager
            .update(issue.id, IssueUpdateRequest::default().with_volume(5))
            .await
            .unwrap();

        assert_eq!(updated.volume, 5);
        assert_eq!(updated.number, "1");
        assert!(updated.show_number);
        assert_eq!(updated.title.get("en_US"), Some("Kept"));
    }

    #[tokio::test]
    async fn test_update_validates_merged_state() {
        let fx = fixture();
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();

        // Clearing the volume while it is still shown must fail.
        let err = fx
            .manager
            .update(issue.id, IssueUpdateRequest::default().with_volume(0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::VolumeRequired)
        ));
    }

    #[tokio::test]
    async fn test_update_missing_issue() {
        let fx = fixture();
        let err = fx
            .manager
            .update(Uuid::now_v7(), IssueUpdateRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::IssueNotFound(_)));
    }

    #[tokio::test]
    async fn test_publish_sets_current_and_indexes() {
        let fx = fixture();
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();

        let published = fx.manager.publish(issue.id, &fx.journal).await.unwrap();
        assert!(published.published);
        assert!(published.current);
        assert!(published.date_published.is_some());
        assert_eq!(fx.search.indexed().await, vec![(fx.journal.id, issue.id)]);
    }

    #[tokio::test]
    async fn test_publish_displaces_prior_current() {
        let fx = fixture();
        let first = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        let second = fx.manager.create(&fx.journal, volume_request(2)).await.unwrap();

        fx.manager.publish(first.id, &fx.journal).await.unwrap();
        fx.manager.publish(second.id, &fx.journal).await.unwrap();

        let current = fx
            .issues
            .current_for_journal(fx.journal.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, second.id);

        // Exactly one current issue after any sequence.
        let all = fx.issues.for_journal(fx.journal.id).await.unwrap();
        assert_eq!(all.iter().filter(|i| i.current).count(), 1);
    }

    #[tokio::test]
    async fn test_publish_in_wrong_journal_fails() {
        let fx = fixture();
        let other = Journal::new("Other", "other");
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();

        let err = fx.manager.publish(issue.id, &other).await.unwrap_err();
        assert!(matches!(err, ContentError::IssueNotFound(_)));
    }

    #[tokio::test]
    async fn test_unpublish_clears_current_without_successor() {
        let fx = fixture();
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        fx.manager.publish(issue.id, &fx.journal).await.unwrap();

        let unpublished = fx.manager.unpublish(issue.id, &fx.journal).await.unwrap();
        assert!(!unpublished.published);
        assert!(!unpublished.current);
        assert!(fx
            .issues
            .current_for_journal(fx.journal.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(fx.search.removed().await, vec![(fx.journal.id, issue.id)]);
    }

    #[tokio::test]
    async fn test_delete_back_issue_writes_tombstones() {
        let fx = fixture();
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        fx.manager.publish(issue.id, &fx.journal).await.unwrap();
        let article_ids = seed_published_articles(&fx, issue.id, 3).await;

        fx.manager.delete(issue.id, &fx.journal).await.unwrap();

        assert_eq!(fx.tombstones.len().await, 3);
        for article_id in article_ids {
            let article = fx.articles.find(article_id).await.unwrap().unwrap();
            assert_eq!(article.status, ArticleStatus::Queued);
        }
        assert!(fx
            .published_articles
            .for_issue(issue.id)
            .await
            .unwrap()
            .is_empty());
        assert!(fx.issues.find(issue.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unpublished_issue_writes_no_tombstones() {
        let fx = fixture();
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        seed_published_articles(&fx, issue.id, 2).await;

        fx.manager.delete(issue.id, &fx.journal).await.unwrap();

        assert_eq!(fx.tombstones.len().await, 0);
        assert!(fx
            .published_articles
            .for_issue(issue.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_current_promotes_most_recent() {
        let fx = fixture();
        let oldest = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        let middle = fx.manager.create(&fx.journal, volume_request(2)).await.unwrap();
        let newest = fx.manager.create(&fx.journal, volume_request(3)).await.unwrap();

        fx.manager.publish(oldest.id, &fx.journal).await.unwrap();
        fx.manager.publish(middle.id, &fx.journal).await.unwrap();
        fx.manager.publish(newest.id, &fx.journal).await.unwrap();

        fx.manager.delete(newest.id, &fx.journal).await.unwrap();

        // Most recently published remaining issue takes over.
        let current = fx
            .issues
            .current_for_journal(fx.journal.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, middle.id);

        let all = fx.issues.for_journal(fx.journal.id).await.unwrap();
        assert_eq!(all.iter().filter(|i| i.current).count(), 1);
    }

    #[tokio::test]
    async fn test_delete_only_published_issue_leaves_no_current() {
        let fx = fixture();
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        fx.manager.publish(issue.id, &fx.journal).await.unwrap();

        fx.manager.delete(issue.id, &fx.journal).await.unwrap();

        assert!(fx
            .issues
            .current_for_journal(fx.journal.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_non_current_leaves_current_alone() {
        let fx = fixture();
        let first = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        let second = fx.manager.create(&fx.journal, volume_request(2)).await.unwrap();
        fx.manager.publish(first.id, &fx.journal).await.unwrap();
        fx.manager.publish(second.id, &fx.journal).await.unwrap();

        fx.manager.delete(first.id, &fx.journal).await.unwrap();

        let current = fx
            .issues
            .current_for_journal(fx.journal.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, second.id);
    }

    /// Tombstone writer that fails after a set number of inserts.
    struct FailingTombstones {
        inner: Arc<MemoryTombstones>,
        failures_after: usize,
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl TombstoneWriter for FailingTombstones {
        async fn insert(&self, tombstone: Tombstone) -> ContentResult<()> {
            let seen = self.inserts.fetch_add(1, Ordering::SeqCst);
            if seen >= self.failures_after {
                return Err(ContentError::Storage("tombstone store unavailable".into()));
            }
            self.inner.insert(tombstone).await
        }

        async fn remove(&self, tombstone_id: Uuid) -> ContentResult<()> {
            self.inner.remove(tombstone_id).await
        }
    }

    #[tokio::test]
    async fn test_delete_cascade_rolls_back_on_failure() {
        let issues = MemoryIssueRepository::shared();
        let published_articles = MemoryPublishedArticles::shared();
        let articles = MemoryArticles::shared();
        let tombstone_store = MemoryTombstones::shared();
        let tombstones = Arc::new(FailingTombstones {
            inner: tombstone_store.clone(),
            failures_after: 1,
            inserts: AtomicUsize::new(0),
        });
        let journal = Journal::new("Journal of Examples", "joe");
        let manager = IssueLifecycleManager::new(
            issues.clone(),
            published_articles.clone(),
            articles.clone(),
            tombstones,
            RecordingSearchIndexer::shared(),
        );

        let issue = manager.create(&journal, volume_request(1)).await.unwrap();
        manager.publish(issue.id, &journal).await.unwrap();

        let mut article_ids = Vec::new();
        for seq in 0..3 {
            let mut article = Article::new(
                journal.id,
                LocalizedText::with("en_US", format!("Article {}", seq)),
            );
            article.status = ArticleStatus::Published;
            let article = articles.insert(article).await.unwrap();
            published_articles
                .insert(PublishedArticle::new(article.id, issue.id, seq))
                .await
                .unwrap();
            article_ids.push(article.id);
        }

        let err = manager.delete(issue.id, &journal).await.unwrap_err();
        assert!(matches!(err, ContentError::Storage(_)));

        // Everything is back: the issue, its current flag, the
        // associations, the article statuses, and no tombstones.
        let restored = issues.find(issue.id).await.unwrap().unwrap();
        assert!(restored.current);
        assert_eq!(
            published_articles.for_issue(issue.id).await.unwrap().len(),
            3
        );
        for article_id in article_ids {
            let article = articles.find(article_id).await.unwrap().unwrap();
            assert_eq!(article.status, ArticleStatus::Published);
        }
        assert_eq!(tombstone_store.len().await, 0);
    }

    /// Search indexer whose first few submissions fail, then recover.
    struct FailingSearchIndex {
        inner: Arc<RecordingSearchIndexer>,
        index_failures: AtomicUsize,
        remove_failures: AtomicUsize,
    }

    impl FailingSearchIndex {
        fn fails(failures: &AtomicUsize) -> bool {
            failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl SearchIndexer for FailingSearchIndex {
        async fn index_issue(&self, journal_id: Uuid, issue_id: Uuid) -> ContentResult<()> {
            if Self::fails(&self.index_failures) {
                return Err(ContentError::Storage("search index unavailable".into()));
            }
            self.inner.index_issue(journal_id, issue_id).await
        }

        async fn remove_issue(&self, journal_id: Uuid, issue_id: Uuid) -> ContentResult<()> {
            if Self::fails(&self.remove_failures) {
                return Err(ContentError::Storage("search index unavailable".into()));
            }
            self.inner.remove_issue(journal_id, issue_id).await
        }
    }

    fn failing_index_fixture(index_failures: usize, remove_failures: usize) -> Fixture {
        let issues = MemoryIssueRepository::shared();
        let published_articles = MemoryPublishedArticles::shared();
        let articles = MemoryArticles::shared();
        let tombstones = MemoryTombstones::shared();
        let search = RecordingSearchIndexer::shared();
        let manager = IssueLifecycleManager::new(
            issues.clone(),
            published_articles.clone(),
            articles.clone(),
            tombstones.clone(),
            Arc::new(FailingSearchIndex {
                inner: search.clone(),
                index_failures: AtomicUsize::new(index_failures),
                remove_failures: AtomicUsize::new(remove_failures),
            }),
        );
        Fixture {
            issues,
            published_articles,
            articles,
            tombstones,
            search,
            manager,
            journal: Journal::new("Journal of Examples", "joe"),
        }
    }

    #[tokio::test]
    async fn test_publish_retry_reindexes_after_index_failure() {
        let fx = failing_index_fixture(1, 0);
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();

        let err = fx.manager.publish(issue.id, &fx.journal).await.unwrap_err();
        assert!(matches!(err, ContentError::Storage(_)));

        // The state change committed even though indexing failed.
        let stored = fx.issues.find(issue.id).await.unwrap().unwrap();
        assert!(stored.published);
        assert!(fx.search.indexed().await.is_empty());

        // Retrying resubmits the issue to the index.
        let retried = fx.manager.publish(issue.id, &fx.journal).await.unwrap();
        assert!(retried.published);
        assert_eq!(fx.search.indexed().await, vec![(fx.journal.id, issue.id)]);
    }

    #[tokio::test]
    async fn test_unpublish_retry_removes_after_index_failure() {
        let fx = failing_index_fixture(0, 1);
        let issue = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        fx.manager.publish(issue.id, &fx.journal).await.unwrap();

        let err = fx.manager.unpublish(issue.id, &fx.journal).await.unwrap_err();
        assert!(matches!(err, ContentError::Storage(_)));
        assert!(fx.search.removed().await.is_empty());

        let retried = fx.manager.unpublish(issue.id, &fx.journal).await.unwrap();
        assert!(!retried.published);
        assert_eq!(fx.search.removed().await, vec![(fx.journal.id, issue.id)]);
    }

    #[tokio::test]
    async fn test_idle_journal_locks_are_evicted() {
        let fx = fixture();
        for _ in 0..4 {
            let lock = fx.manager.journal_lock(Uuid::now_v7()).await;
            drop(lock);
        }

        let held = fx.manager.journal_lock(fx.journal.id).await;
        let _guard = held.lock().await;
        assert_eq!(fx.manager.journal_lock_count().await, 1);
    }

    #[tokio::test]
    async fn test_current_invariant_over_operation_sequence() {
        let fx = fixture();
        let a = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        let b = fx.manager.create(&fx.journal, volume_request(2)).await.unwrap();
        let c = fx.manager.create(&fx.journal, volume_request(3)).await.unwrap();

        fx.manager.publish(a.id, &fx.journal).await.unwrap();
        fx.manager.publish(b.id, &fx.journal).await.unwrap();
        fx.manager.unpublish(b.id, &fx.journal).await.unwrap();
        fx.manager.publish(c.id, &fx.journal).await.unwrap();
        fx.manager.delete(c.id, &fx.journal).await.unwrap();

        let all = fx.issues.for_journal(fx.journal.id).await.unwrap();
        let current_count = all.iter().filter(|i| i.current).count();
        assert!(current_count <= 1, "found {} current issues", current_count);
    }

    #[tokio::test]
    async fn test_concurrent_publishes_keep_one_current() {
        let fx = fixture();
        let a = fx.manager.create(&fx.journal, volume_request(1)).await.unwrap();
        let b = fx.manager.create(&fx.journal, volume_request(2)).await.unwrap();

        let manager = Arc::new(fx.manager);
        let journal = fx.journal.clone();
        let (left, right) = tokio::join!(
            {
                let manager = manager.clone();
                let journal = journal.clone();
                async move { manager.publish(a.id, &journal).await }
            },
            {
                let manager = manager.clone();
                let journal = journal.clone();
                async move { manager.publish(b.id, &journal).await }
            }
        );
        left.unwrap();
        right.unwrap();

        let all = fx.issues.for_journal(fx.journal.id).await.unwrap();
        assert_eq!(all.iter().filter(|i| i.current).count(), 1);
    }
}
