//! # invex-core
//!
//! Core crate for the Invex administrative console. Contains the shared
//! trait seams, configuration schemas, opaque identifier types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Invex crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
