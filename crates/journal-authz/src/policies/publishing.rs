//! Publishing gate
//!
//! Hides content of journals that do not publish online from the
//! public while allowing staff to preview it.

use async_trait::async_trait;
use std::sync::Arc;

use journal_org::{PublishingMode, RoleResolver, RoleSet};

use crate::chain::Policy;
use crate::decision::{AuthorizationDecision, DenialCode};
use crate::objects::{AuthorizedObject, AuthorizedObjects};
use crate::request::RequestContext;

/// Denies public access to journals whose publishing mode is
/// `None`, as if their content did not exist.
///
/// The privilege check runs before the publishing-mode check so
/// staff always see content regardless of mode. A staff bypass
/// permits with an advisory `Forbidden` code. The denial for
/// everyone else is `NotFound`, never `Forbidden`: a permission
/// error would leak that the journal exists and is configured not
/// to publish.
pub struct JournalMustPublishPolicy {
    roles: Arc<dyn RoleResolver>,
}

impl JournalMustPublishPolicy {
    /// Create the policy over a role resolver.
    pub fn new(roles: Arc<dyn RoleResolver>) -> Self {
        Self { roles }
    }
}

#[async_trait]
impl Policy for JournalMustPublishPolicy {
    fn name(&self) -> &'static str {
        "journal_must_publish"
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

        // Reuse roles an earlier policy resolved, otherwise resolve
        // them here; anonymous users hold no roles.
        let held = match objects.user_roles() {
            Some(held) => held.clone(),
            None => match ctx.user_id {
                Some(user_id) => {
                    let held = self.roles.roles_for(user_id, journal.id).await;
                    objects.register(AuthorizedObject::UserRoles(held.clone()));
                    held
                }
                None => RoleSet::new(),
            },
        };

        if held.can_preview_unpublished() {
            return AuthorizationDecision::permit_with_advisory(DenialCode::Forbidden);
        }

        if journal.settings.publishing_mode == PublishingMode::None {
            return AuthorizationDecision::deny(
                "user.authorization.journalDoesNotPublish",
                DenialCode::NotFound,
            );
        }

        AuthorizationDecision::permit()
    }
}
