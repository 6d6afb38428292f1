//! Tantivy schema for item documents.
//!
//! One document carries both the canonical item (stored fields) and
//! its searchable projection (indexed fields), so replacing or
//! deleting the document keeps the two in lockstep.

use crate::core::error::{MemdexError, Result};
use crate::core::types::{from_micros, to_micros, Item, TagSet};
use serde::{Deserialize, Serialize};
use tantivy::schema::*;
use tantivy::{TantivyDocument, Term};

/// Current schema version
/// Version 1: items with title/content/tags, microsecond timestamps and seq
pub const SCHEMA_VERSION: u32 = 1;

/// Create the Tantivy schema for item documents
///
/// Fields:
/// - id: Item identity (STRING | STORED)
/// - title: Searchable title (TEXT | STORED)
/// - content: Searchable body (TEXT | STORED)
/// - tags: Exact tag values, one per value (STRING | STORED)
/// - tags_text: Tokenized tags for full-text matching (TEXT)
/// - created_at: First insertion, micros (i64 | STORED)
/// - updated_at: Last write, micros (i64 | INDEXED | STORED | FAST)
/// - seq: Write order (u64 | STORED | FAST)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    // Identity
    builder.add_text_field("id", STRING | STORED);

    // Searchable text content
    builder.add_text_field("title", TEXT | STORED);
    builder.add_text_field("content", TEXT | STORED);

    // Tags: raw values for filtering, tokenized copy for search
    builder.add_text_field("tags", STRING | STORED);
    builder.add_text_field("tags_text", TEXT);

    // Timestamps
    builder.add_i64_field("created_at", STORED);
    builder.add_i64_field("updated_at", INDEXED | STORED | FAST);

    // Write order for tie-breaking
    builder.add_u64_field("seq", STORED | FAST);

    builder.build()
}

/// Resolved field handles for the item schema
#[derive(Debug, Clone, Copy)]
pub struct ItemFields {
    pub id: Field,
    pub title: Field,
    pub content: Field,
    pub tags: Field,
    pub tags_text: Field,
    pub created_at: Field,
    pub updated_at: Field,
    pub seq: Field,
}

impl ItemFields {
    /// Resolve every field, failing if the index was built with another schema
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let get = |name: &str| {
            schema.get_field(name).map_err(|e| {
                MemdexError::StorageError(format!("Incompatible store schema, missing '{name}': {e}"))
            })
        };

        Ok(Self {
            id: get("id")?,
            title: get("title")?,
            content: get("content")?,
            tags: get("tags")?,
            tags_text: get("tags_text")?,
            created_at: get("created_at")?,
            updated_at: get("updated_at")?,
            seq: get("seq")?,
        })
    }

    /// Fields searched by an unscoped query term
    pub fn searchable(&self) -> Vec<Field> {
        vec![self.title, self.content, self.tags_text]
    }

    /// Term addressing the document of `id`
    pub fn id_term(&self, id: &str) -> Term {
        Term::from_field_text(self.id, id)
    }

    /// Build the index document for an item
    pub fn to_document(&self, item: &Item, seq: u64) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(self.id, &item.id);
        doc.add_text(self.title, &item.title);
        doc.add_text(self.content, &item.content);
        for tag in item.tags.iter() {
            doc.add_text(self.tags, tag);
        }
        doc.add_text(self.tags_text, item.tags.join(" "));
        doc.add_i64(self.created_at, to_micros(&item.created_at));
        doc.add_i64(self.updated_at, to_micros(&item.updated_at));
        doc.add_u64(self.seq, seq);
        doc
    }

    /// Materialize an item from its stored fields
    pub fn to_item(&self, doc: &TantivyDocument) -> Result<Item> {
        let id = Self::extract_text(doc, self.id)
            .ok_or_else(|| MemdexError::StorageError("Document without id".to_string()))?;
        let title = Self::extract_text(doc, self.title).ok_or_else(|| {
            MemdexError::StorageError(format!("Document '{id}' has no title"))
        })?;

        Ok(Item {
            content: Self::extract_text(doc, self.content).unwrap_or_default(),
            tags: doc
                .get_all(self.tags)
                .filter_map(|v| v.as_str())
                .collect::<TagSet>(),
            created_at: from_micros(Self::extract_i64(doc, self.created_at)),
            updated_at: from_micros(Self::extract_i64(doc, self.updated_at)),
            id,
            title,
        })
    }

    /// Stored write order of a document
    pub fn seq_of(&self, doc: &TantivyDocument) -> u64 {
        doc.get_first(self.seq).and_then(|v| v.as_u64()).unwrap_or(0)
    }

    /// Extract text field from document
    fn extract_text(doc: &TantivyDocument, field: Field) -> Option<String> {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Extract i64 field from document
    fn extract_i64(doc: &TantivyDocument, field: Field) -> i64 {
        doc.get_first(field).and_then(|v| v.as_i64()).unwrap_or(0)
    }
}

/// Bookkeeping published with every commit
///
/// Stored as the commit payload in tantivy's `meta.json`, so it is
/// exactly as durable as the documents it describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPayload {
    pub schema_version: u32,
    /// Next unused write-order value
    pub next_seq: u64,
    /// Last `updated_at` issued, in micros
    pub last_stamp: i64,
}
