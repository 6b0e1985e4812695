//! Request context
//!
//! The inbound request state that policies evaluate against: the
//! resolved journal, the authenticated user, the route, the path and
//! query parameters, and the roles the operation declared.

use std::collections::HashMap;
use uuid::Uuid;

use journal_org::{Journal, RoleSet};

/// Everything a policy chain may inspect for one request.
///
/// Built by the transport layer before authorization; policies never
/// see the raw request.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use journal_authz::RequestContext;
/// use journal_org::{Journal, Role, RoleSet};
///
/// let journal = Journal::new("Journal of Examples", "joe");
/// let ctx = RequestContext::new("get_issue")
///     .with_journal(journal)
///     .with_user(Uuid::now_v7())
///     .with_param("issue_id", Uuid::now_v7().to_string())
///     .with_required_roles(RoleSet::of(&[Role::Manager]));
/// assert!(ctx.journal.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The journal resolved from the request path, if any
    pub journal: Option<Journal>,

    /// The authenticated user, if any
    pub user_id: Option<Uuid>,

    /// Route name declared by the handler
    pub route: String,

    /// Path and query parameters by name
    pub params: HashMap<String, String>,

    /// Roles the operation declared as qualifying
    pub required_roles: RoleSet,
}

impl RequestContext {
    /// Create a context for a route with nothing resolved yet.
    ///
    /// # Arguments
    ///
    /// * `route` - The route name (e.g. `"get_issue"`)
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            journal: None,
            user_id: None,
            route: route.into(),
            params: HashMap::new(),
            required_roles: RoleSet::new(),
        }
    }

    /// Attach the resolved journal.
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Attach the authenticated user.
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Attach a named parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Declare the qualifying roles for this operation.
    pub fn with_required_roles(mut self, roles: RoleSet) -> Self {
        self.required_roles = roles;
        self
    }

    /// Get a named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Get a named parameter parsed as a UUID.
    ///
    /// # Returns
    ///
    /// `None` when the parameter is absent or not a valid UUID
    pub fn uuid_param(&self, name: &str) -> Option<Uuid> {
        self.param(name).and_then(|raw| Uuid::parse_str(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_building() {
        let user = Uuid::now_v7();
        let ctx = RequestContext::new("list_issues")
            .with_user(user)
            .with_param("volume", "5");

        assert_eq!(ctx.route, "list_issues");
        assert_eq!(ctx.user_id, Some(user));
        assert_eq!(ctx.param("volume"), Some("5"));
        assert_eq!(ctx.param("missing"), None);
    }

    #[test]
    fn test_uuid_param() {
        let id = Uuid::now_v7();
        let ctx = RequestContext::new("get_issue")
            .with_param("issue_id", id.to_string())
            .with_param("garbage", "not-a-uuid");

        assert_eq!(ctx.uuid_param("issue_id"), Some(id));
        assert_eq!(ctx.uuid_param("garbage"), None);
        assert_eq!(ctx.uuid_param("missing"), None);
    }
}
