//! # invex-client
//!
//! The narrow contract through which the console consumes its backend:
//! the [`BackendApi`] trait, the production HTTP implementation, and an
//! in-memory mock (behind the `mock` feature) for tests and offline use.
//!
//! The core never assumes transport details beyond "success or failure
//! with an optional human-readable message".

pub mod api;
pub mod dto;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;

pub use api::BackendApi;
pub use http::HttpBackend;
#[cfg(feature = "mock")]
pub use mock::MockBackend;
