use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::HTTP_1_1;
use crate::error::Result;
use crate::models::headers::HeaderStore;
use crate::storage;

/// Response from one transport exchange
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_reason: String,
    pub headers: HeaderStore,
    pub body: String,
}

impl HttpResponse {
    /// Status line, one line per header, a blank line, then the body
    pub fn to_raw(&self) -> String {
        let mut raw = format!("{} {} {}", HTTP_1_1, self.status_code, self.status_reason);
        for (name, value) in self.headers.iter() {
            raw.push('\n');
            raw.push_str(name);
            raw.push_str(": ");
            raw.push_str(value);
        }
        raw.push_str("\n\n");
        raw.push_str(&self.body);
        raw
    }

    /// Body re-indented when it is JSON, verbatim otherwise
    pub fn pretty_body(&self) -> String {
        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.body.clone()),
            Err(_) => self.body.clone(),
        }
    }

    pub fn try_save(&self, path: impl AsRef<Path>) -> Result<()> {
        storage::write_text(path.as_ref(), &self.to_raw())
    }

    pub fn try_save_body(&self, path: impl AsRef<Path>) -> Result<()> {
        storage::write_text(path.as_ref(), &self.body)
    }

    /// Write the full response text to `path`. Failures are logged, not returned.
    pub fn save_response(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Err(e) = self.try_save(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save response");
        }
    }

    /// Write only the body to `path`. Failures are logged, not returned.
    pub fn save_response_body(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Err(e) = self.try_save_body(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save response body");
        }
    }
}

impl std::fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_raw())
    }
}
