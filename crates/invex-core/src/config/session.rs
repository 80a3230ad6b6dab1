//! Local session persistence configuration.

use serde::{Deserialize, Serialize};

/// Settings for the durable credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON file holding the persisted credential slots.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
        }
    }
}

fn default_credentials_file() -> String {
    "data/session.json".to_string()
}
