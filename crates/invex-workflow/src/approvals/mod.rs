//! Deposit/withdrawal approval lifecycle.

pub mod engine;

pub use engine::ApprovalWorkflow;
