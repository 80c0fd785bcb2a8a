//! Tools configuration from TOML (`[tools]` section)
//!
//! ```toml
//! [tools]
//! default_location = "New York"
//! allowed_paths = ["~/Documents", "/tmp"]
//! search_results = 5
//! ```

use serde::{Deserialize, Serialize};

/// Raw tools configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Location used when a weather query names none
    pub default_location: String,
    /// Roots the system tool may inspect. Empty means the working directory.
    pub allowed_paths: Vec<String>,
    /// Default number of search results
    pub search_results: usize,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            default_location: "New York".to_string(),
            allowed_paths: Vec::new(),
            search_results: 5,
        }
    }
}
