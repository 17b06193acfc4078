//! In-memory JSON source for testing
//!
//! Serves canned documents by path and counts requests, so adapter and cache
//! behavior can be verified without a provider.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::network::JsonSource;

#[derive(Debug, Default)]
pub struct MockSource {
    name: String,
    documents: Mutex<HashMap<String, Value>>,
    requests: AtomicUsize,
}

impl MockSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Serve `document` for `path` (leading slashes ignored)
    pub fn with_document(self, path: &str, document: Value) -> Self {
        self.insert(path, document);
        self
    }

    pub fn insert(&self, path: &str, document: Value) {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.trim_start_matches('/').to_string(), document);
    }

    /// Number of fetches served or refused so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl JsonSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_json(&self, path: &str, _query: &[(String, String)]) -> Result<Value> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path.trim_start_matches('/'))
            .cloned()
            .ok_or_else(|| Error::Http(format!("HTTP 404 error: {}", path)))
    }
}
