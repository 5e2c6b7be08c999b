//! Resource identifier configuration.

use serde::{Deserialize, Serialize};

/// Settings for the resource identifier generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdConfig {
    /// Salt mixed into every generated suffix.
    ///
    /// Changing it changes every identifier the process will hand out, so
    /// it must stay fixed for the lifetime of a data set.
    #[serde(default = "default_salt")]
    pub salt: String,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            salt: default_salt(),
        }
    }
}

fn default_salt() -> String {
    crate::types::id::DEFAULT_SALT.to_string()
}
