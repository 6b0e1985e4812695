//! Role-based access control
//!
//! This module defines the roles a user can hold within a journal,
//! along with the role sets that authorization policies compare by
//! intersection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User role within a journal.
///
/// A user holds a set of roles per journal; a single user is commonly
/// both an `Author` in one journal and a `Manager` in another. Roles
/// are compared by set intersection, never by equality of single
/// values (see [`RoleSet::intersects`]).
///
/// # Examples
///
/// ```
/// use journal_org::Role;
///
/// let role = Role::Manager;
/// assert!(role.can_preview_unpublished());
/// assert!(!Role::Reader.can_preview_unpublished());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Site-wide administrator (applies to every journal)
    SiteAdmin,

    /// Journal manager (full editorial control)
    Manager,

    /// Section editor (manages assigned sections and submissions)
    SubEditor,

    /// Editorial assistant (copyediting, layout, proofreading)
    Assistant,

    /// Peer reviewer
    Reviewer,

    /// Submitting author
    Author,

    /// Registered reader
    Reader,
}

impl Role {
    /// Check if this role may see unpublished journal content.
    ///
    /// These roles bypass the publishing gate so staff can preview
    /// content on journals that do not publish online.
    ///
    /// # Returns
    ///
    /// `true` for SiteAdmin, Manager, SubEditor, and Assistant
    pub fn can_preview_unpublished(&self) -> bool {
        matches!(
            self,
            Role::SiteAdmin | Role::Manager | Role::SubEditor | Role::Assistant
        )
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use journal_org::Role;
    ///
    /// assert_eq!(Role::parse("manager"), Some(Role::Manager));
    /// assert_eq!(Role::parse("AUTHOR"), Some(Role::Author));
    /// assert_eq!(Role::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "site_admin" => Some(Self::SiteAdmin),
            "manager" => Some(Self::Manager),
            "sub_editor" => Some(Self::SubEditor),
            "assistant" => Some(Self::Assistant),
            "reviewer" => Some(Self::Reviewer),
            "author" => Some(Self::Author),
            "reader" => Some(Self::Reader),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SiteAdmin => "site_admin",
            Self::Manager => "manager",
            Self::SubEditor => "sub_editor",
            Self::Assistant => "assistant",
            Self::Reviewer => "reviewer",
            Self::Author => "author",
            Self::Reader => "reader",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SiteAdmin => "Site Admin",
            Self::Manager => "Journal Manager",
            Self::SubEditor => "Section Editor",
            Self::Assistant => "Assistant",
            Self::Reviewer => "Reviewer",
            Self::Author => "Author",
            Self::Reader => "Reader",
        }
    }
}

/// An unordered set of roles held by a user within one journal.
///
/// Authorization decisions compare role sets by intersection: an
/// operation declares the roles that qualify, and the user passes
/// when they hold at least one of them.
///
/// # Examples
///
/// ```
/// use journal_org::{Role, RoleSet};
///
/// let held = RoleSet::of(&[Role::Author, Role::Reviewer]);
/// let required = RoleSet::of(&[Role::Manager, Role::Reviewer]);
/// assert!(held.intersects(&required));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Create an empty role set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Create a role set from a slice of roles.
    ///
    /// # Examples
    ///
    /// ```
    /// use journal_org::{Role, RoleSet};
    ///
    /// let set = RoleSet::of(&[Role::Manager, Role::Manager]);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn of(roles: &[Role]) -> Self {
        Self(roles.iter().copied().collect())
    }

    /// Add a role to the set.
    pub fn insert(&mut self, role: Role) {
        self.0.insert(role);
    }

    /// Check if the set contains a specific role.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Check if this set shares at least one role with another.
    ///
    /// This is the only comparison authorization policies use; two
    /// sets never need to be equal for access to be granted.
    pub fn intersects(&self, other: &RoleSet) -> bool {
        self.0.intersection(&other.0).next().is_some()
    }

    /// Merge all roles from another set into this one.
    pub fn extend(&mut self, other: &RoleSet) {
        self.0.extend(other.0.iter().copied());
    }

    /// Check if any held role may see unpublished journal content.
    pub fn can_preview_unpublished(&self) -> bool {
        self.0.iter().any(Role::can_preview_unpublished)
    }

    /// Number of roles in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the roles in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
