//! Query context supplied alongside a query.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys under which an uploaded artifact path may be supplied, in lookup order.
const FILE_KEYS: [&str; 3] = ["file_path", "uploaded_file", "pdf_path"];

/// Free-form `string → value` mapping that accompanies a query.
///
/// The orchestrator only interprets the uploaded-file keys; everything else
/// is passed through to the LLM selector and echoed in the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryContext(BTreeMap<String, serde_json::Value>);

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }

    /// Path of a previously uploaded artifact, if one is referenced.
    pub fn uploaded_file(&self) -> Option<&str> {
        FILE_KEYS
            .iter()
            .filter_map(|key| self.0.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

impl From<BTreeMap<String, serde_json::Value>> for QueryContext {
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        Self(map)
    }
}
