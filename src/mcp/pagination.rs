//! Cursor-based pagination for the list tool
//!
//! Cursors are URL-safe base64 JSON holding the offset of the next
//! page. Clients treat them as opaque strings.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Cursor for paginating list results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListCursor {
    /// Offset of the first item of the next page
    pub offset: usize,
}

impl ListCursor {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Cursor for the page after one of `returned` items at `offset`
    ///
    /// `None` when the page was short, which means it was the last one.
    pub fn next(offset: usize, limit: usize, returned: usize) -> Option<Self> {
        if limit > 0 && returned == limit {
            Some(Self::new(offset + returned))
        } else {
            None
        }
    }

    /// Encode cursor as URL-safe base64
    pub fn encode(&self) -> String {
        let json = json!({ "offset": self.offset }).to_string();
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    /// Decode cursor from URL-safe base64
    pub fn decode(encoded: &str) -> Result<Self, String> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| format!("Invalid cursor encoding: {e}"))?;

        let json = String::from_utf8(bytes).map_err(|e| format!("Invalid cursor UTF-8: {e}"))?;

        serde_json::from_str(&json).map_err(|e| format!("Invalid cursor format: {e}"))
    }
}
