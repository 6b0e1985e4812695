//! # Journal Authorization
//!
//! This crate provides composable authorization policies for the
//! journal platform.
//!
//! ## Overview
//!
//! The journal-authz crate handles:
//! - **Decisions**: Permit/deny values with denial classes and
//!   advisory codes
//! - **Request context**: The resolved journal, user, and parameters
//!   policies evaluate against
//! - **Policy chains**: Ordered, short-circuiting composition of
//!   independent policies
//! - **Authorized objects**: Resources resolved during evaluation,
//!   shared down the chain and with the handler
//!
//! ## Evaluation Model
//!
//! A handler assembles one [`PolicyChain`] per route and evaluates it
//! once per request. Policies run in order; the first denial is the
//! chain's decision and later policies never run. A permit may carry
//! an advisory code, but only the variant tag is authoritative.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use journal_authz::policies::{ContextRequiredPolicy, JournalMustPublishPolicy};
//! use journal_authz::{PolicyChain, RequestContext};
//! use journal_org::{Journal, MemoryRoleResolver};
//!
//! # async fn example() {
//! let chain = PolicyChain::new()
//!     .with_policy(ContextRequiredPolicy)
//!     .with_policy(JournalMustPublishPolicy::new(MemoryRoleResolver::shared()));
//!
//! let ctx = RequestContext::new("list_issues")
//!     .with_journal(Journal::new("Journal of Examples", "joe"));
//! let outcome = chain.evaluate(&ctx).await;
//! assert!(outcome.is_permitted());
//! # }
//! ```
//!
//! ## Integration
//!
//! This crate works with:
//! - `journal-org`: Role sets and the [`journal_org::RoleResolver`]
//!   policies resolve through
//! - `journal-content`: Resource policies load issues and submissions
//!   through its repository traits
//! - `journal-api`: Handlers build chains, evaluate them, and map
//!   denials to responses

pub mod chain;
pub mod decision;
pub mod objects;
pub mod policies;
pub mod request;

// Re-export main types for convenience
pub use chain::{ChainOutcome, Policy, PolicyChain};
pub use decision::{AuthorizationDecision, DenialCode};
pub use objects::{AuthorizedObject, AuthorizedObjects, ObjectKind};
pub use request::RequestContext;
