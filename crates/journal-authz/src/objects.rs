//! Authorized context objects
//!
//! Policies that resolve a resource register it here so later
//! policies in the chain and the handler can use it without loading
//! it again. The map is the only side effect of a chain evaluation.

use std::collections::HashMap;

use journal_content::{Article, Issue};
use journal_org::RoleSet;

/// The name a resolved object is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// The user's effective role set in the current journal
    UserRoles,

    /// The issue named by the request
    Issue,

    /// The submission (article) named by the request
    Submission,
}

/// A resolved object contributed by a permitting policy.
#[derive(Debug, Clone)]
pub enum AuthorizedObject {
    /// The user's effective role set
    UserRoles(RoleSet),

    /// The authorized issue
    Issue(Issue),

    /// The authorized submission
    Submission(Article),
}

impl AuthorizedObject {
    /// The name this object registers under.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::UserRoles(_) => ObjectKind::UserRoles,
            Self::Issue(_) => ObjectKind::Issue,
            Self::Submission(_) => ObjectKind::Submission,
        }
    }
}

/// The objects resolved so far during a chain evaluation.
///
/// Later policies read what earlier policies registered; on an
/// overall permit the handler receives the full map.
#[derive(Debug, Clone, Default)]
pub struct AuthorizedObjects {
    map: HashMap<ObjectKind, AuthorizedObject>,
}

impl AuthorizedObjects {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolved object, replacing any previous entry of
    /// the same kind.
    pub fn register(&mut self, object: AuthorizedObject) {
        self.map.insert(object.kind(), object);
    }

    /// Check if an object of the given kind was registered.
    pub fn contains(&self, kind: ObjectKind) -> bool {
        self.map.contains_key(&kind)
    }

    /// Get the registered role set, if any.
    pub fn user_roles(&self) -> Option<&RoleSet> {
        match self.map.get(&ObjectKind::UserRoles) {
            Some(AuthorizedObject::UserRoles(roles)) => Some(roles),
            _ => None,
        }
    }

    /// Get the authorized issue, if any.
    pub fn issue(&self) -> Option<&Issue> {
        match self.map.get(&ObjectKind::Issue) {
            Some(AuthorizedObject::Issue(issue)) => Some(issue),
            _ => None,
        }
    }

    /// Get the authorized submission, if any.
    pub fn submission(&self) -> Option<&Article> {
        match self.map.get(&ObjectKind::Submission) {
            Some(AuthorizedObject::Submission(article)) => Some(article),
            _ => None,
        }
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_org::Role;
    use uuid::Uuid;

    #[test]
    fn test_register_and_read_back() {
        let mut objects = AuthorizedObjects::new();
        assert!(objects.is_empty());

        objects.register(AuthorizedObject::UserRoles(RoleSet::of(&[Role::Manager])));
        objects.register(AuthorizedObject::Issue(Issue::new(Uuid::now_v7())));

        assert_eq!(objects.len(), 2);
        assert!(objects.contains(ObjectKind::UserRoles));
        assert!(objects.user_roles().unwrap().contains(Role::Manager));
        assert!(objects.issue().is_some());
        assert!(objects.submission().is_none());
    }

    #[test]
    fn test_register_replaces_same_kind() {
        let mut objects = AuthorizedObjects::new();
        objects.register(AuthorizedObject::UserRoles(RoleSet::of(&[Role::Author])));
        objects.register(AuthorizedObject::UserRoles(RoleSet::of(&[Role::Manager])));

        assert_eq!(objects.len(), 1);
        assert!(objects.user_roles().unwrap().contains(Role::Manager));
        assert!(!objects.user_roles().unwrap().contains(Role::Author));
    }
}
