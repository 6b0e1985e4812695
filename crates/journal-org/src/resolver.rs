//! Role resolution
//!
//! This module provides the lookup that computes a user's effective
//! role set within a journal. Role-based policies consume it; they
//! never inspect role grants directly.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::roles::{Role, RoleSet};

/// Computes a user's effective roles within a journal.
///
/// Site-level roles (such as [`Role::SiteAdmin`]) apply to every
/// journal and are merged into the result for any journal queried.
#[async_trait]
pub trait RoleResolver: Send + Sync {
    /// Get the effective role set for a user within a journal.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user whose roles to resolve
    /// * `journal_id` - The journal scope
    ///
    /// # Returns
    ///
    /// The user's roles in that journal plus any site-level roles;
    /// empty when the user holds no roles there.
    async fn roles_for(&self, user_id: Uuid, journal_id: Uuid) -> RoleSet;
}

/// In-memory role resolver.
///
/// Suitable for single-process deployments and testing. Role grants
/// are keyed by `(user, journal)`, with a separate site-level table.
///
/// # Examples
///
/// ```rust,no_run
/// use uuid::Uuid;
/// use journal_org::{MemoryRoleResolver, Role, RoleResolver};
///
/// # async fn example() {
/// let resolver = MemoryRoleResolver::new();
/// let user = Uuid::now_v7();
/// let journal = Uuid::now_v7();
///
/// resolver.grant(user, journal, Role::Manager).await;
/// let roles = resolver.roles_for(user, journal).await;
/// assert!(roles.contains(Role::Manager));
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryRoleResolver {
    /// Roles granted per (user, journal)
    journal_roles: RwLock<HashMap<(Uuid, Uuid), RoleSet>>,
    /// Site-level roles per user
    site_roles: RwLock<HashMap<Uuid, RoleSet>>,
}

impl MemoryRoleResolver {
    /// Create an empty resolver with no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty resolver wrapped for shared use.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Grant a role to a user within a journal.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user receiving the role
    /// * `journal_id` - The journal scope
    /// * `role` - The role to grant
    pub async fn grant(&self, user_id: Uuid, journal_id: Uuid, role: Role) {
        let mut grants = self.journal_roles.write().await;
        grants
            .entry((user_id, journal_id))
            .or_default()
            .insert(role);
    }

    /// Grant a site-level role to a user.
    ///
    /// Site-level roles are returned for every journal.
    pub async fn grant_site_role(&self, user_id: Uuid, role: Role) {
        let mut grants = self.site_roles.write().await;
        grants.entry(user_id).or_default().insert(role);
    }

    /// Revoke a role from a user within a journal.
    pub async fn revoke(&self, user_id: Uuid, journal_id: Uuid, role: Role) {
        let mut grants = self.journal_roles.write().await;
        if let Some(set) = grants.get_mut(&(user_id, journal_id)) {
            let remaining: RoleSet = set.iter().copied().filter(|r| *r != role).collect();
            *set = remaining;
        }
    }
}

#[async_trait]
impl RoleResolver for MemoryRoleResolver {
    async fn roles_for(&self, user_id: Uuid, journal_id: Uuid) -> RoleSet {
        let mut roles = {
            let grants = self.journal_roles.read().await;
            grants
                .get(&(user_id, journal_id))
                .cloned()
                .unwrap_or_default()
        };

        let site = self.site_roles.read().await;
        if let Some(site_roles) = site.get(&user_id) {
            roles.extend(site_roles);
        }

        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roles_scoped_per_journal() {
        let resolver = MemoryRoleResolver::new();
        let user = Uuid::now_v7();
        let journal_a = Uuid::now_v7();
        let journal_b = Uuid::now_v7();

        resolver.grant(user, journal_a, Role::Manager).await;
        resolver.grant(user, journal_b, Role::Author).await;

        let in_a = resolver.roles_for(user, journal_a).await;
        assert!(in_a.contains(Role::Manager));
        assert!(!in_a.contains(Role::Author));

        let in_b = resolver.roles_for(user, journal_b).await;
        assert!(in_b.contains(Role::Author));
        assert!(!in_b.contains(Role::Manager));
    }

    #[tokio::test]
    async fn test_site_roles_apply_everywhere() {
        let resolver = MemoryRoleResolver::new();
        let admin = Uuid::now_v7();
        let any_journal = Uuid::now_v7();

        resolver.grant_site_role(admin, Role::SiteAdmin).await;

        let roles = resolver.roles_for(admin, any_journal).await;
        assert!(roles.contains(Role::SiteAdmin));
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_roles() {
        let resolver = MemoryRoleResolver::new();
        let roles = resolver.roles_for(Uuid::now_v7(), Uuid::now_v7()).await;
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn test_revoke() {
        let resolver = MemoryRoleResolver::new();
        let user = Uuid::now_v7();
        let journal = Uuid::now_v7();

        resolver.grant(user, journal, Role::Reviewer).await;
        resolver.grant(user, journal, Role::Author).await;
        resolver.revoke(user, journal, Role::Reviewer).await;

        let roles = resolver.roles_for(user, journal).await;
        assert!(!roles.contains(Role::Reviewer));
        assert!(roles.contains(Role::Author));
    }
}
