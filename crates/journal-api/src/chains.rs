//! Per-route policy chains
//!
//! Each route declares its authorization as an ordered chain built
//! here. Handlers evaluate the chain before touching any state;
//! changing a route's authorization means changing its chain, never
//! its handler body.

use std::sync::Arc;

use journal_authz::policies::{
    ContextAccessPolicy, ContextRequiredPolicy, IssueRequiredPolicy, JournalMustPublishPolicy,
    StageAssignmentLookup, SubmissionRequiredPolicy, WorkflowStageAccessPolicy,
};
use journal_authz::PolicyChain;
use journal_content::{ArticleRepository, IssueRepository};
use journal_org::{Role, RoleResolver, RoleSet};

/// The shared lookups policies are built from.
///
/// One instance is wired at startup and cloned into every handler;
/// all clones share the underlying stores.
#[derive(Clone)]
pub struct AuthzDeps {
    /// Role grants per user and journal
    pub roles: Arc<dyn RoleResolver>,

    /// Issue storage, for the issue-required policy
    pub issues: Arc<dyn IssueRepository>,

    /// Article storage, for the submission-required policy
    pub articles: Arc<dyn ArticleRepository>,

    /// Stage-scoped assignments, for the workflow-stage policy
    pub assignments: Arc<dyn StageAssignmentLookup>,
}

impl AuthzDeps {
    /// Bundle the authorization lookups.
    pub fn new(
        roles: Arc<dyn RoleResolver>,
        issues: Arc<dyn IssueRepository>,
        articles: Arc<dyn ArticleRepository>,
        assignments: Arc<dyn StageAssignmentLookup>,
    ) -> Self {
        Self {
            roles,
            issues,
            articles,
            assignments,
        }
    }
}

/// An issue API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOp {
    /// List a journal's issues
    List,

    /// Fetch one issue
    Get,

    /// Create an issue
    Create,

    /// Edit an issue
    Edit,

    /// Delete an issue
    Delete,

    /// Publish an issue
    Publish,

    /// Unpublish an issue
    Unpublish,
}

impl IssueOp {
    /// The route name recorded in the request context.
    pub fn route_name(&self) -> &'static str {
        match self {
            Self::List => "list_issues",
            Self::Get => "get_issue",
            Self::Create => "create_issue",
            Self::Edit => "edit_issue",
            Self::Delete => "delete_issue",
            Self::Publish => "publish_issue",
            Self::Unpublish => "unpublish_issue",
        }
    }

    /// The roles that qualify for this operation.
    ///
    /// Read routes carry no role requirement (the publishing gate
    /// decides); editorial routes require the editorial set.
    pub fn required_roles(&self) -> RoleSet {
        match self {
            Self::List | Self::Get => RoleSet::new(),
            Self::Create | Self::Edit | Self::Delete | Self::Publish | Self::Unpublish => {
                editorial_roles()
            }
        }
    }
}

/// Roles allowed to manage issues.
pub fn editorial_roles() -> RoleSet {
    RoleSet::of(&[Role::Manager, Role::SubEditor, Role::Assistant])
}

/// Roles allowed to reach stage-scoped submission content.
pub fn submission_roles() -> RoleSet {
    RoleSet::of(&[
        Role::Manager,
        Role::SubEditor,
        Role::Assistant,
        Role::Reviewer,
        Role::Author,
    ])
}

/// Build the policy chain for an issue operation.
///
/// Read routes go through the publishing gate so non-publishing
/// journals stay invisible to the public; editorial routes skip it
/// (staff manage issues regardless of mode) and check roles instead.
/// Routes that name an issue resolve it before the role check so a
/// bad id fails as not-found rather than forbidden.
pub fn issue_chain(op: IssueOp, deps: &AuthzDeps) -> PolicyChain {
    let mut chain = PolicyChain::new().with_policy(ContextRequiredPolicy);

    match op {
        IssueOp::List => {
            chain = chain.with_policy(JournalMustPublishPolicy::new(deps.roles.clone()));
        }
        IssueOp::Get => {
            chain = chain
                .with_policy(JournalMustPublishPolicy::new(deps.roles.clone()))
                .with_policy(IssueRequiredPolicy::new(deps.issues.clone()));
        }
        IssueOp::Create => {
            chain = chain.with_policy(ContextAccessPolicy::new(deps.roles.clone()));
        }
        IssueOp::Edit | IssueOp::Delete | IssueOp::Publish | IssueOp::Unpublish => {
            chain = chain
                .with_policy(IssueRequiredPolicy::new(deps.issues.clone()))
                .with_policy(ContextAccessPolicy::new(deps.roles.clone()));
        }
    }

    chain
}

/// Build the policy chain for stage-scoped submission routes.
pub fn submission_chain(deps: &AuthzDeps) -> PolicyChain {
    PolicyChain::new()
        .with_policy(ContextRequiredPolicy)
        .with_policy(SubmissionRequiredPolicy::new(deps.articles.clone()))
        .with_policy(WorkflowStageAccessPolicy::new(deps.assignments.clone()))
}
