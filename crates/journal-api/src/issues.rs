//! Issue API handler
//!
//! Each operation evaluates its policy chain first and only touches
//! content state on a permit. Handlers shape responses as JSON maps;
//! they never expose domain entities directly.

use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use journal_authz::RequestContext;
use journal_content::{Issue, IssueLifecycleManager, IssueUpdateRequest};
use journal_org::Journal;

use crate::chains::{issue_chain, AuthzDeps, IssueOp};
use crate::error::{ApiError, ApiResult};

/// Locale used for reader-facing identification strings.
const DEFAULT_LOCALE: &str = "en_US";

/// Shape an issue for an API response.
///
/// Localized fields serialize as locale-keyed maps; the computed
/// identification line uses the default locale.
pub fn make_issue_data(issue: &Issue) -> serde_json::Value {
    serde_json::json!({
        "id": issue.id,
        "journal_id": issue.journal_id,
        "volume": issue.volume,
        "number": issue.number,
        "year": issue.year,
        "title": issue.title,
        "description": issue.description,
        "identification": issue.identification(DEFAULT_LOCALE),
        "published": issue.published,
        "current": issue.current,
        "access_status": issue.access_status,
        "open_access_date": issue.open_access_date,
        "date_published": issue.date_published,
    })
}

/// Handler for the issue routes.
///
/// Holds the lifecycle manager and the authorization lookups; all
/// state lives behind them, so the handler itself is cheap to clone
/// per request.
pub struct IssueHandler {
    deps: AuthzDeps,
    lifecycle: Arc<IssueLifecycleManager>,
}

impl IssueHandler {
    /// Create a handler over the authorization lookups and lifecycle
    /// manager.
    ///
    /// The lifecycle manager and `deps.issues` must share the same
    /// issue store, otherwise the issue-required policy authorizes
    /// against state the lifecycle never sees.
    pub fn new(deps: AuthzDeps, lifecycle: Arc<IssueLifecycleManager>) -> Self {
        Self { deps, lifecycle }
    }

    fn context(
        &self,
        op: IssueOp,
        journal: &Journal,
        user_id: Option<Uuid>,
        issue_id: Option<Uuid>,
    ) -> RequestContext {
        let mut ctx = RequestContext::new(op.route_name())
            .with_journal(journal.clone())
            .with_required_roles(op.required_roles());
        if let Some(user_id) = user_id {
            ctx = ctx.with_user(user_id);
        }
        if let Some(issue_id) = issue_id {
            ctx = ctx.with_param("issue_id", issue_id.to_string());
        }
        ctx
    }

    /// List a journal's issues.
    ///
    /// Readers see published issues only; users whose resolved roles
    /// may preview unpublished content see every issue.
    #[instrument(skip_all, fields(route = "list_issues", journal_id = %journal.id))]
    pub async fn list(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context(IssueOp::List, journal, user_id, None);
        let outcome = issue_chain(IssueOp::List, &self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            debug!("List denied: {:?}", outcome.decision.reason());
            return Err(ApiError::from_denial(&outcome.decision));
        }

        let staff_view = outcome
            .objects
            .user_roles()
            .map(|roles| roles.can_preview_unpublished())
            .unwrap_or(false);

        let issues = if staff_view {
            self.deps.issues.for_journal(journal.id).await?
        } else {
            self.deps.issues.published_for_journal(journal.id).await?
        };

        Ok(serde_json::json!({
            "items": issues.iter().map(make_issue_data).collect::<Vec<_>>(),
            "item_count": issues.len(),
        }))
    }

    /// Fetch one issue.
    ///
    /// The issue comes out of the chain's authorized objects; the
    /// handler never loads it a second time.
    #[instrument(skip_all, fields(route = "get_issue", issue_id = %issue_id))]
    pub async fn get(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        issue_id: Uuid,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context(IssueOp::Get, journal, user_id, Some(issue_id));
        let outcome = issue_chain(IssueOp::Get, &self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        match outcome.objects.issue() {
            Some(issue) => Ok(make_issue_data(issue)),
            None => Err(ApiError::Content(
                journal_content::ContentError::IssueNotFound(issue_id),
            )),
        }
    }

    /// Create a new issue.
    #[instrument(skip_all, fields(route = "create_issue", journal_id = %journal.id))]
    pub async fn create(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        request: IssueUpdateRequest,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context(IssueOp::Create, journal, user_id, None);
        let outcome = issue_chain(IssueOp::Create, &self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        let issue = self.lifecycle.create(journal, request).await?;
        debug!(issue_id = %issue.id, "Created issue");
        Ok(make_issue_data(&issue))
    }

    /// Edit an existing issue.
    #[instrument(skip_all, fields(route = "edit_issue", issue_id = %issue_id))]
    pub async fn edit(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        issue_id: Uuid,
        request: IssueUpdateRequest,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context(IssueOp::Edit, journal, user_id, Some(issue_id));
        let outcome = issue_chain(IssueOp::Edit, &self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        let issue = self.lifecycle.update(issue_id, request).await?;
        Ok(make_issue_data(&issue))
    }

    /// Delete an issue and cascade over its published articles.
    #[instrument(skip_all, fields(route = "delete_issue", issue_id = %issue_id))]
    pub async fn delete(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        issue_id: Uuid,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context(IssueOp::Delete, journal, user_id, Some(issue_id));
        let outcome = issue_chain(IssueOp::Delete, &self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        let issue = self.lifecycle.delete(issue_id, journal).await?;
        Ok(make_issue_data(&issue))
    }

    /// Publish an issue and make it current.
    #[instrument(skip_all, fields(route = "publish_issue", issue_id = %issue_id))]
    pub async fn publish(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        issue_id: Uuid,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context(IssueOp::Publish, journal, user_id, Some(issue_id));
        let outcome = issue_chain(IssueOp::Publish, &self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        let issue = self.lifecycle.publish(issue_id, journal).await?;
        Ok(make_issue_data(&issue))
    }

    /// Unpublish an issue.
    #[instrument(skip_all, fields(route = "unpublish_issue", issue_id = %issue_id))]
    pub async fn unpublish(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        issue_id: Uuid,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context(IssueOp::Unpublish, journal, user_id, Some(issue_id));
        let outcome = issue_chain(IssueOp::Unpublish, &self.deps)
            .evaluate(&ctx)
            .await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        let issue = self.lifecycle.unpublish(issue_id, journal).await?;
        Ok(make_issue_data(&issue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_authz::policies::MemoryStageAssignments;
    use journal_content::{
        MemoryArticles, MemoryIssueRepository, MemoryPublishedArticles, MemoryTombstones,
        NoopSearchIndexer,
    };
    use journal_org::{MemoryRoleResolver, PublishingMode, Role};

    struct Fixture {
        handler: IssueHandler,
        journal: Journal,
        manager: Uuid,
        author: Uuid,
    }

    async fn fixture_for(journal: Journal) -> Fixture {
        let resolver = MemoryRoleResolver::shared();
        let issues = MemoryIssueRepository::shared();
        let articles = MemoryArticles::shared();
        let deps = AuthzDeps::new(
            resolver.clone(),
            issues.clone(),
            articles.clone(),
            MemoryStageAssignments::shared(),
        );
        let lifecycle = Arc::new(IssueLifecycleManager::new(
            issues,
            MemoryPublishedArticles::shared(),
            articles,
            MemoryTombstones::shared(),
            NoopSearchIndexer::shared(),
        ));

        let manager = Uuid::now_v7();
        let author = Uuid::now_v7();
        resolver.grant(manager, journal.id, Role::Manager).await;
        resolver.grant(author, journal.id, Role::Author).await;

        Fixture {
            handler: IssueHandler::new(deps, lifecycle),
            journal,
            manager,
            author,
        }
    }

    async fn fixture() -> Fixture {
        fixture_for(Journal::new("Journal of Examples", "joe")).await
    }

    fn volume_request(volume: u32) -> IssueUpdateRequest {
        IssueUpdateRequest::default()
            .with_volume(volume)
            .with_show_volume(true)
    }

    #[tokio::test]
    async fn test_manager_full_lifecycle() {
        let fx = fixture().await;

        let created = fx
            .handler
            .create(&fx.journal, Some(fx.manager), volume_request(1))
            .await
            .unwrap();
        let issue_id: Uuid =
            serde_json::from_value(created["id"].clone()).unwrap();
        assert_eq!(created["published"], false);

        let edited = fx
            .handler
            .edit(
                &fx.journal,
                Some(fx.manager),
                issue_id,
                IssueUpdateRequest::default().with_volume(2),
            )
            .await
            .unwrap();
        assert_eq!(edited["volume"], 2);
        assert_eq!(edited["identification"], "Vol. 2");

        let published = fx
            .handler
            .publish(&fx.journal, Some(fx.manager), issue_id)
            .await
            .unwrap();
        assert_eq!(published["published"], true);
        assert_eq!(published["current"], true);

        let unpublished = fx
            .handler
            .unpublish(&fx.journal, Some(fx.manager), issue_id)
            .await
            .unwrap();
        assert_eq!(unpublished["current"], false);

        fx.handler
            .delete(&fx.journal, Some(fx.manager), issue_id)
            .await
            .unwrap();
        let err = fx
            .handler
            .get(&fx.journal, Some(fx.manager), issue_id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_author_cannot_create() {
        let fx = fixture().await;
        let err = fx
            .handler
            .create(&fx.journal, Some(fx.author), volume_request(1))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.message_key(), "user.authorization.roleBasedAccessDenied");
    }

    #[tokio::test]
    async fn test_anonymous_cannot_edit() {
        let fx = fixture().await;
        let issue = fx
            .handler
            .create(&fx.journal, Some(fx.manager), volume_request(1))
            .await
            .unwrap();
        let issue_id: Uuid = serde_json::from_value(issue["id"].clone()).unwrap();

        let err = fx
            .handler
            .edit(&fx.journal, None, issue_id, IssueUpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_validation_surfaces_as_bad_request() {
        let fx = fixture().await;
        let err = fx
            .handler
            .create(&fx.journal, Some(fx.manager), IssueUpdateRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.message_key(),
            "editor.issues.issueIdentificationRequired"
        );
    }

    #[tokio::test]
    async fn test_non_publishing_journal_hidden_from_readers() {
        let journal =
            Journal::new("Print Only Quarterly", "poq").with_publishing_mode(PublishingMode::None);
        let fx = fixture_for(journal).await;

        // A reader gets not-found, as if the content did not exist.
        let err = fx.handler.list(&fx.journal, None).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.message_key(),
            "user.authorization.journalDoesNotPublish"
        );

        // Staff still see the journal's issues.
        let listed = fx
            .handler
            .list(&fx.journal, Some(fx.manager))
            .await
            .unwrap();
        assert_eq!(listed["item_count"], 0);
    }

    #[tokio::test]
    async fn test_list_hides_unpublished_from_readers() {
        let fx = fixture().await;
        let first = fx
            .handler
            .create(&fx.journal, Some(fx.manager), volume_request(1))
            .await
            .unwrap();
        fx.handler
            .create(&fx.journal, Some(fx.manager), volume_request(2))
            .await
            .unwrap();
        let first_id: Uuid = serde_json::from_value(first["id"].clone()).unwrap();
        fx.handler
            .publish(&fx.journal, Some(fx.manager), first_id)
            .await
            .unwrap();

        let public = fx.handler.list(&fx.journal, None).await.unwrap();
        assert_eq!(public["item_count"], 1);

        let staff = fx
            .handler
            .list(&fx.journal, Some(fx.manager))
            .await
            .unwrap();
        assert_eq!(staff["item_count"], 2);

        // An author holds a role but not a preview role.
        let reader_view = fx
            .handler
            .list(&fx.journal, Some(fx.author))
            .await
            .unwrap();
        assert_eq!(reader_view["item_count"], 1);
    }

    #[tokio::test]
    async fn test_get_issue_from_other_journal_is_not_found() {
        let fx = fixture().await;
        let other = fixture_for(Journal::new("Other", "other")).await;
        let foreign = other
            .handler
            .create(&other.journal, Some(other.manager), volume_request(1))
            .await
            .unwrap();
        let foreign_id: Uuid = serde_json::from_value(foreign["id"].clone()).unwrap();

        let err = fx
            .handler
            .get(&fx.journal, Some(fx.manager), foreign_id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
