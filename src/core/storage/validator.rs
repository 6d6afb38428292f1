//! Store integrity checking.
//!
//! Scans every live document and reports anything that would break
//! the one-document-per-item invariant. Never mutates the store.

use super::store::ItemStore;
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Integrity validation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Live documents scanned
    pub documents: usize,

    /// Ids held by more than one live document
    pub duplicate_ids: Vec<String>,

    /// Documents that could not be materialized as items
    pub malformed: Vec<String>,

    /// Store directory size in bytes
    pub size_on_disk: u64,

    /// Validation results
    pub is_consistent: bool,

    /// Validation timestamp
    pub validated_at: String,
}

impl ValidationReport {
    /// What an operator can do about the findings, if anything
    ///
    /// Storing or deleting an id replaces every document that holds it.
    pub fn remediation(&self) -> Option<String> {
        let mut steps = Vec::new();
        if !self.duplicate_ids.is_empty() {
            steps.push(format!(
                "re-store or delete the duplicated ids ({})",
                self.duplicate_ids.join(", ")
            ));
        }
        if !self.malformed.is_empty() {
            steps.push(format!(
                "restore {} malformed document(s) from backup or delete their ids",
                self.malformed.len()
            ));
        }
        (!steps.is_empty()).then(|| steps.join("; "))
    }
}

/// Integrity validator for an open store
pub struct StoreValidator<'a> {
    store: &'a ItemStore,
}

impl<'a> StoreValidator<'a> {
    /// Create a new store validator
    pub fn new(store: &'a ItemStore) -> Self {
        Self { store }
    }

    /// Scan the current snapshot
    ///
    /// Checks:
    /// - Every document has an id and a title
    /// - No id is held by more than one document
    pub fn validate(&self) -> Result<ValidationReport> {
        let documents = self
            .store
            .read(|searcher| self.store.all_documents(searcher))?;
        let fields = self.store.fields();

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut malformed = Vec::new();

        for (position, doc) in documents.iter().enumerate() {
            match fields.to_item(doc) {
                Ok(item) => *seen.entry(item.id).or_default() += 1,
                Err(e) => malformed.push(format!("document {position}: {e}")),
            }
        }

        let mut duplicate_ids: Vec<String> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id)
            .collect();
        duplicate_ids.sort();

        let is_consistent = duplicate_ids.is_empty() && malformed.is_empty();

        Ok(ValidationReport {
            documents: documents.len(),
            duplicate_ids,
            malformed,
            size_on_disk: self.store.size_on_disk(),
            is_consistent,
            validated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Validate and log findings through tracing
    pub fn validate_and_log(&self) -> Result<ValidationReport> {
        let report = self.validate()?;

        if report.is_consistent {
            tracing::info!(
                "Store integrity check passed ({} documents, {} bytes)",
                report.documents,
                report.size_on_disk
            );
        } else {
            for id in &report.duplicate_ids {
                tracing::warn!("Item '{}' is held by more than one document", id);
            }
            for problem in &report.malformed {
                tracing::warn!("Malformed document: {}", problem);
            }
        }

        Ok(report)
    }
}
