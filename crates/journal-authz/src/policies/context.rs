//! Context policies
//!
//! Policies that require a journal context and check the user's
//! roles within it.

use async_trait::async_trait;
use std::sync::Arc;

use journal_org::RoleResolver;

use crate::chain::Policy;
use crate::decision::{AuthorizationDecision, DenialCode};
use crate::objects::{AuthorizedObject, AuthorizedObjects};
use crate::request::RequestContext;

/// Denies any request that carries no journal context.
///
/// Most routes are journal-scoped; a request that reaches them
/// without a resolvable journal is malformed, not forbidden.
pub struct ContextRequiredPolicy;

#[async_trait]
impl Policy for ContextRequiredPolicy {
    fn name(&self) -> &'static str {
        "context_required"
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        _objects: &mut AuthorizedObjects,
    ) -> AuthorizationDecision {
        if ctx.journal.is_none() {
            return AuthorizationDecision::deny(
                "user.authorization.contextRequired",
                DenialCode::BadRequest,
            );
        }
        AuthorizationDecision::permit()
    }
}

/// Permits when the user's effective roles in the journal intersect
/// the roles the operation declared.
///
/// Resolves the user's role set and registers it for later policies
/// in the chain. Composes after [`ContextRequiredPolicy`]; without a
/// journal there is no role scope to check.
pub struct ContextAccessPolicy {
    roles: Arc<dyn RoleResolver>,
}

impl ContextAccessPolicy {
    /// Create the policy over a role resolver.
    pub fn new(roles: Arc<dyn RoleResolver>) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl Policy for ContextAccessPolicy {
    fn name(&self) -> &'static str {
        "context_access"
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

        let user_id = match ctx.user_id {
            Some(user_id) => user_id,
            None => {
                return AuthorizationDecision::deny(
                    "user.authorization.loginRequired",
                    DenialCode::Forbidden,
                )
            }
        };

        let held = self.roles.roles_for(user_id, journal.id).await;
        objects.register(AuthorizedObject::UserRoles(held.clone()));

        if held.intersects(&ctx.required_roles) {
            AuthorizationDecision::permit()
        } else {
            AuthorizationDecision::deny(
                "user.authorization.roleBasedAccessDenied",
                DenialCode::Forbidden,
            )
        }
    }
}
