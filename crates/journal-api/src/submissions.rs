//! Submission API handler
//!
//! Stage-scoped access to submission metadata and files. Both routes
//! run the submission chain: the submission must exist in the
//! journal, and the user must hold a qualifying assignment at the
//! requested workflow stage.

use tracing::instrument;
use uuid::Uuid;

use journal_authz::RequestContext;
use journal_content::Article;
use journal_org::Journal;

use crate::chains::{submission_chain, submission_roles, AuthzDeps};
use crate::error::{ApiError, ApiResult};

/// Shape a submission for an API response.
fn make_submission_data(article: &Article) -> serde_json::Value {
    serde_json::json!({
        "id": article.id,
        "journal_id": article.journal_id,
        "title": article.title,
        "status": article.status,
        "stage": article.stage,
        "created_at": article.created_at,
    })
}

/// Handler for the stage-scoped submission routes.
pub struct SubmissionHandler {
    deps: AuthzDeps,
}

impl SubmissionHandler {
    /// Create a handler over the authorization lookups.
    pub fn new(deps: AuthzDeps) -> Self {
        Self { deps }
    }

    fn context(
        &self,
        route: &str,
        journal: &Journal,
        user_id: Option<Uuid>,
        submission_id: Uuid,
        stage: Option<&str>,
    ) -> RequestContext {
        let mut ctx = RequestContext::new(route)
            .with_journal(journal.clone())
            .with_param("submission_id", submission_id.to_string())
            .with_required_roles(submission_roles());
        if let Some(user_id) = user_id {
            ctx = ctx.with_user(user_id);
        }
        if let Some(stage) = stage {
            ctx = ctx.with_param("stage", stage);
        }
        ctx
    }

    /// Fetch a submission's metadata.
    ///
    /// # Arguments
    ///
    /// * `journal` - The resolved journal context
    /// * `user_id` - The authenticated user, if any
    /// * `submission_id` - The submission to fetch
    /// * `stage` - Requested workflow stage; defaults to the
    ///   submission's current stage
    #[instrument(skip_all, fields(route = "submission_metadata", submission_id = %submission_id))]
    pub async fn submission_metadata(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        submission_id: Uuid,
        stage: Option<&str>,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self.context("submission_metadata", journal, user_id, submission_id, stage);
        let outcome = submission_chain(&self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        match outcome.objects.submission() {
            Some(article) => Ok(make_submission_data(article)),
            None => Err(ApiError::Content(
                journal_content::ContentError::ArticleNotFound(submission_id),
            )),
        }
    }

    /// Fetch a reference to a submission file.
    ///
    /// Returns the resolved file reference; actual bytes are served
    /// by the file store behind the returned path.
    #[instrument(skip_all, fields(route = "get_file", submission_id = %submission_id))]
    pub async fn get_file(
        &self,
        journal: &Journal,
        user_id: Option<Uuid>,
        submission_id: Uuid,
        file_id: &str,
        stage: Option<&str>,
    ) -> ApiResult<serde_json::Value> {
        let ctx = self
            .context("get_file", journal, user_id, submission_id, stage)
            .with_param("file_id", file_id);
        let outcome = submission_chain(&self.deps).evaluate(&ctx).await;
        if !outcome.is_permitted() {
            return Err(ApiError::from_denial(&outcome.decision));
        }

        Ok(serde_json::json!({
            "submission_id": submission_id,
            "file_id": file_id,
            "path": format!(
                "/journals/{}/submissions/{}/files/{}",
                journal.path, submission_id, file_id
            ),
        }))
    }
}
