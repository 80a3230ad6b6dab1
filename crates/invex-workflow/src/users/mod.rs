//! Pending signup approvals.

pub mod queue;

pub use queue::PendingUserQueue;
