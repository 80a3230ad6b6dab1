//! # invex-workflow
//!
//! The approval workflows of the console: the deposit/withdrawal lifecycle
//! engine and the pending-user queue. Both enforce the mediator read-only
//! rule, guard same-id double submission with a processing marker, and
//! refetch the authoritative list after every successful mutation instead
//! of patching local state.

pub mod approvals;
mod processing;
pub mod users;

pub use approvals::ApprovalWorkflow;
pub use users::PendingUserQueue;
