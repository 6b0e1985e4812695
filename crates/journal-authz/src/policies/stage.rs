//! Workflow stage access
//!
//! Scopes editorial access to a submission by workflow stage. A user
//! who edits at the copyediting stage does not automatically edit at
//! review.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use journal_org::{Role, RoleSet, WorkflowStage};

use crate::chain::Policy;
use crate::decision::{AuthorizationDecision, DenialCode};
use crate::objects::AuthorizedObjects;
use crate::request::RequestContext;

/// Source of per-stage role assignments on a submission.
#[async_trait]
pub trait StageAssignmentLookup: Send + Sync {
    /// Get the roles a user holds on one submission at one stage.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user being checked
    /// * `submission_id` - The submission the assignment is scoped to
    /// * `stage` - The workflow stage being accessed
    async fn stage_roles(
        &self,
        user_id: Uuid,
        submission_id: Uuid,
        stage: WorkflowStage,
    ) -> RoleSet;
}

/// In-memory stage assignment store.
pub struct MemoryStageAssignments {
    assignments: RwLock<HashMap<(Uuid, Uuid, WorkflowStage), RoleSet>>,
}

impl MemoryStageAssignments {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            assignments: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an empty store behind an `Arc` for sharing with
    /// policies.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Assign a role to a user on a submission at a stage.
    pub async fn assign(
        &self,
        user_id: Uuid,
        submission_id: Uuid,
        stage: WorkflowStage,
        role: Role,
    ) {
        let mut assignments = self.assignments.write().await;
        assignments
            .entry((user_id, submission_id, stage))
            .or_insert_with(RoleSet::new)
            .insert(role);
    }
}

impl Default for MemoryStageAssignments {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StageAssignmentLookup for MemoryStageAssignments {
    async fn stage_roles(
        &self,
        user_id: Uuid,
        submission_id: Uuid,
        stage: WorkflowStage,
    ) -> RoleSet {
        let assignments = self.assignments.read().await;
        assignments
            .get(&(user_id, submission_id, stage))
            .cloned()
            .unwrap_or_default()
    }
}

/// Permits when the user's stage assignments on the authorized
/// submission intersect the operation's required roles.
///
/// Composes after [`crate::policies::SubmissionRequiredPolicy`]; the
/// submission must already be registered. The stage comes from the
/// `stage` parameter when present, otherwise the submission's current
/// stage.
pub struct WorkflowStageAccessPolicy {
    assignments: Arc<dyn StageAssignmentLookup>,
}

impl WorkflowStageAccessPolicy {
    /// Create the policy over a stage assignment lookup.
    pub fn new(assignments: Arc<dyn StageAssignmentLookup>) -> Self {
        Self { assignments }
    }
}

#[async_trait]
impl Policy for WorkflowStageAccessPolicy {
    fn name(&self) -> &'static str {
        "workflow_stage_access"
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        objects: &mut AuthorizedObjects,
    ) -> AuthorizationDecision {
        let submission = match objects.submission() {
            Some(submission) => submission,
            None => {
                return AuthorizationDecision::deny(
                    "user.authorization.submissionRequired",
                    DenialCode::BadRequest,
                )
            }
        };

        let user_id = match ctx.user_id {
            Some(user_id) => user_id,
            None => {
                return AuthorizationDecision::deny(
                    "user.authorization.loginRequired",
                    DenialCode::Forbidden,
                )
            }
        };

        let stage = ctx
            .param("stage")
            .and_then(WorkflowStage::parse)
            .unwrap_or(submission.stage);

        let held = self
            .assignments
            .stage_roles(user_id, submission.id, stage)
            .await;

        if held.intersects(&ctx.required_roles) {
            AuthorizationDecision::permit()
        } else {
            AuthorizationDecision::deny(
                "user.authorization.workflowStageAssignmentMissing",
                DenialCode::Forbidden,
            )
        }
    }
}
