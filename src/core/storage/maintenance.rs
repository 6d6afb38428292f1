//! Checkpointing, statistics refresh and segment compaction.

use super::store::ItemStore;
use crate::core::error::{MemdexError, Result};
use crate::core::types::OptimizeReport;
use std::time::Instant;

fn storage_err(context: &str, e: impl std::fmt::Display) -> MemdexError {
    MemdexError::StorageError(format!("{context}: {e}"))
}

impl ItemStore {
    /// Compact the store
    ///
    /// Commits buffered operations and collects unreferenced files,
    /// reloads readers so BM25 statistics are current, then merges all
    /// searchable segments into one (dropping deleted documents).
    /// Safe to run at any time; a second run finds nothing to do.
    pub fn optimize(&self) -> Result<OptimizeReport> {
        let start = Instant::now();
        let size_before = self.size_on_disk();

        let (segments_before, segments_after) = self.write(|state| {
            let segments_before = self
                .index
                .searchable_segment_ids()
                .map_err(|e| storage_err("Failed to list segments", e))?
                .len();

            // Checkpoint
            let (next_seq, last_stamp) = (state.next_seq, state.last_stamp);
            self.publish(state, next_seq, last_stamp)?;
            state
                .writer
                .garbage_collect_files()
                .wait()
                .map_err(|e| storage_err("Garbage collection failed", e))?;

            // Compaction
            let searcher = self.reader.searcher();
            let has_deletes = searcher
                .segment_readers()
                .iter()
                .any(|segment| segment.has_deletes());
            let segment_ids = self
                .index
                .searchable_segment_ids()
                .map_err(|e| storage_err("Failed to list segments", e))?;

            if segment_ids.len() > 1 || (segment_ids.len() == 1 && has_deletes) {
                tracing::info!("Merging {} segments", segment_ids.len());
                state
                    .writer
                    .merge(&segment_ids)
                    .wait()
                    .map_err(|e| storage_err("Merge failed", e))?;
                state
                    .writer
                    .garbage_collect_files()
                    .wait()
                    .map_err(|e| storage_err("Garbage collection failed", e))?;
                self.reader
                    .reload()
                    .map_err(|e| storage_err("Failed to reload reader", e))?;
            }

            let segments_after = self
                .index
                .searchable_segment_ids()
                .map_err(|e| storage_err("Failed to list segments", e))?
                .len();

            Ok((segments_before, segments_after))
        })?;

        let report = OptimizeReport {
            segments_before,
            segments_after,
            size_before,
            size_after: self.size_on_disk(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Optimized store: {} -> {} segments, {} -> {} bytes in {}ms",
            report.segments_before,
            report.segments_after,
            report.size_before,
            report.size_after,
            report.duration_ms
        );

        Ok(report)
    }
}
