//! Resource-required policies
//!
//! Policies that locate the resource a route names, deny when it is
//! missing or belongs to another journal, and register it for the
//! rest of the chain.

use async_trait::async_trait;
use std::sync::Arc;

use journal_content::{ArticleRepository, IssueRepository};

use crate::chain::Policy;
use crate::decision::{AuthorizationDecision, DenialCode};
use crate::objects::{AuthorizedObject, AuthorizedObjects};
use crate::request::RequestContext;

/// Requires the `issue_id` parameter to name an issue of the current
/// journal.
///
/// On success the resolved issue is registered under
/// [`crate::ObjectKind::Issue`]. An issue belonging to a different
/// journal denies `NotFound`, indistinguishable from a missing one.
pub struct IssueRequiredPolicy {
    issues: Arc<dyn IssueRepository>,
}

impl IssueRequiredPolicy {
    /// Create the policy over an issue repository.
    pub fn new(issues: Arc<dyn IssueRepository>) -> Self {
        Self { issues }
    }
}

#[async_trait]
impl Policy for IssueRequiredPolicy {
    fn name(&self) -> &'static str {
        "issue_required"
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        objects: &mut AuthorizedObjects,
    ) -> AuthorizationDecision {
        let journal = match ctx.journal.as_ref() {
            Some(journal) => journal,
            None => {
                return AuthorizationDecision::deny(
                    "user.authorization.contextRequired",
                    DenialCode::BadRequest,
                )
            }
        };

        let issue_id = match ctx.uuid_param("issue_id") {
            Some(issue_id) => issue_id,
            None => {
                return AuthorizationDecision::deny(
                    "user.authorization.invalidIssue",
                    DenialCode::BadRequest,
                )
            }
        };

        // A storage failure must not confirm the issue's existence.
        let issue = match self.issues.find(issue_id).await {
            Ok(Some(issue)) => issue,
            Ok(None) | Err(_) => {
                return AuthorizationDecision::deny(
                    "user.authorization.issueNotFound",
                    DenialCode::NotFound,
                )
            }
        };

        if issue.journal_id != journal.id {
            return AuthorizationDecision::deny(
                "user.authorization.issueNotFound",
                DenialCode::NotFound,
            );
        }

        objects.register(AuthorizedObject::Issue(issue));
        AuthorizationDecision::permit()
    }
}

/// Requires the `submission_id` parameter to name a submission of
/// the current journal.
///
/// On success the resolved submission is registered under
/// [`crate::ObjectKind::Submission`] for stage-scoped policies and
/// the handler.
pub struct SubmissionRequiredPolicy {
    articles: Arc<dyn ArticleRepository>,
}

impl SubmissionRequiredPolicy {
    /// Create the policy over an article repository.
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }
}

#[async_trait]
impl Policy for SubmissionRequiredPolicy {
    fn name(&self) -> &'static str {
        "submission_required"
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        objects: &mut AuthorizedObjects,
    ) -> AuthorizationDecision {
        let journal = match ctx.journal.as_ref() {
            Some(journal) => journal,
            None => {
                return AuthorizationDecision::deny(
                    "user.authorization.contextRequired",
                    DenialCode::BadRequest,
                )
            }
        };

        let submission_id = match ctx.uuid_param("submission_id") {
            Some(submission_id) => submission_id,
            None => {
                return AuthorizationDecision::deny(
                    "user.authorization.invalidSubmission",
                    DenialCode::BadRequest,
                )
            }
        };

        let article = match self.articles.find(submission_id).await {
            Ok(Some(article)) => article,
            Ok(None) | Err(_) => {
                return AuthorizationDecision::deny(
                    "user.authorization.submissionNotFound",
                    DenialCode::NotFound,
                )
            }
        };

        if article.journal_id != journal.id {
            return AuthorizationDecision::deny(
                "user.authorization.submissionNotFound",
                DenialCode::NotFound,
            );
        }

        objects.register(AuthorizedObject::Submission(article));
        AuthorizationDecision::permit()
    }
}
