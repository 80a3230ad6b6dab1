//! Newtype wrappers around opaque backend identifiers.
//!
//! The backend owns identifier generation and the console never inspects
//! the contents, so these wrap `String` rather than a structured type.
//! Using distinct types prevents accidentally passing a `UserId` where a
//! `RequestId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype wrapper around an opaque `String` identifier.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id! {
    /// Identifier of a financial (deposit or withdrawal) request.
    RequestId
}

define_id! {
    /// Identifier of a user account or pending signup.
    UserId
}
