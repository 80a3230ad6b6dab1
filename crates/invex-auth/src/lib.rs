//! # invex-auth
//!
//! Credential handling for the Invex console: structural decoding of the
//! backend-issued session credential, durable credential storage, and the
//! session oracle that the access policy and workflow engines consult.
//!
//! No signature verification happens here — the credential is only decoded
//! for its claims; verification is owned by the issuing backend.

pub mod claims;
pub mod oracle;
pub mod parser;
pub mod store;

pub use claims::SessionClaims;
pub use oracle::SessionOracle;
