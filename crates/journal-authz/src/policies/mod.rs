//! Policy variants
//!
//! The fixed, composable set of policies handlers assemble into
//! chains. Each policy is an independent decision unit; ordering is
//! the caller's responsibility (resource-required policies must run
//! before policies that read their resolved objects).

pub mod context;
pub mod publishing;
pub mod resource;
pub mod stage;

pub use context::{ContextAccessPolicy, ContextRequiredPolicy};
pub use publishing::JournalMustPublishPolicy;
pub use resource::{IssueRequiredPolicy, SubmissionRequiredPolicy};
pub use stage::{MemoryStageAssignments, StageAssignmentLookup, WorkflowStageAccessPolicy};
