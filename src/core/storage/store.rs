//! Item store backed by a single Tantivy index.
//!
//! Writers serialize on one `IndexWriter` behind a mutex. Every
//! mutation ends in exactly one commit followed by a reader reload
//! under the same lock, so readers observe either the snapshot
//! before a write or the one after it.

use super::schema::{create_schema, CommitPayload, ItemFields, SCHEMA_VERSION};
use crate::core::config::StorageConfig;
use crate::core::error::{MemdexError, Result};
use crate::core::types::{from_micros, to_micros, Item, ItemInput, StoreStats};
use chrono::Utc;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tantivy::collector::{DocSetCollector, TopDocs};
use tantivy::indexer::NoMergePolicy;
use tantivy::query::{AllQuery, TermQuery};
use tantivy::schema::IndexRecordOption;
use tantivy::{
    DocAddress, DocId, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, SegmentReader,
    TantivyDocument,
};
use walkdir::WalkDir;

/// Mutable writer-side state, guarded by the store mutex
pub(super) struct WriterState {
    pub(super) writer: IndexWriter,
    /// Next unused write-order value
    pub(super) next_seq: u64,
    /// Last `updated_at` issued, in micros
    pub(super) last_stamp: i64,
}

impl WriterState {
    /// Next write timestamp: wall clock, but strictly after both the
    /// previous write and `floor`
    fn next_stamp(&self, floor: Option<i64>) -> i64 {
        let mut stamp = Utc::now().timestamp_micros().max(self.last_stamp + 1);
        if let Some(floor) = floor {
            stamp = stamp.max(floor + 1);
        }
        stamp
    }
}

/// Persistent store of knowledge items
///
/// Each item is one document in the index. Replacing an item deletes
/// its document by id term and adds the new one in the same commit.
pub struct ItemStore {
    pub(super) root: PathBuf,
    pub(super) index: Index,
    pub(super) fields: ItemFields,
    pub(super) reader: IndexReader,
    /// `None` once the store is closed
    pub(super) writer: Mutex<Option<WriterState>>,
    pub(super) failed: AtomicBool,
    max_id_length: usize,
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("root", &self.root)
            .field("failed", &self.failed.load(Ordering::SeqCst))
            .finish()
    }
}

impl ItemStore {
    /// Open the store at `config.store_dir`, creating it if missing
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let root = config.store_dir.clone();
        let existing = root.join("meta.json").exists();

        let index = if existing {
            Index::open_in_dir(&root)
                .map_err(|e| MemdexError::StorageError(format!("Failed to open store: {e}")))?
        } else {
            std::fs::create_dir_all(&root)?;
            Index::create_in_dir(&root, create_schema())
                .map_err(|e| MemdexError::StorageError(format!("Failed to create store: {e}")))?
        };

        let fields = ItemFields::from_schema(&index.schema())?;

        let writer: IndexWriter = index
            .writer_with_num_threads(1, config.writer_heap_mb * 1024 * 1024)
            .map_err(|e| MemdexError::StorageError(format!("Failed to create writer: {e}")))?;
        writer.set_merge_policy(Box::new(NoMergePolicy));

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| MemdexError::StorageError(format!("Failed to create reader: {e}")))?;

        let mut store = Self {
            root,
            index,
            fields,
            reader,
            writer: Mutex::new(None),
            failed: AtomicBool::new(false),
            max_id_length: config.max_id_length,
        };

        let payload = store.load_payload()?;
        *store.writer.get_mut().map_err(|_| poisoned())? = Some(WriterState {
            writer,
            next_seq: payload.next_seq,
            last_stamp: payload.last_stamp,
        });

        tracing::info!(
            "Opened store at {:?} ({} items, next seq {})",
            store.root,
            store.reader.searcher().num_docs(),
            payload.next_seq
        );

        Ok(store)
    }

    /// Insert or replace an item
    ///
    /// `created_at` carries over from an existing item with the same id.
    pub fn store(&self, input: ItemInput) -> Result<Item> {
        let input = self.validate_input(input)?;

        self.write(|state| {
            let searcher = self.reader.searcher();
            let existing = self.find_item(&searcher, &input.id)?;

            let stamp = state.next_stamp(existing.as_ref().map(|e| to_micros(&e.updated_at)));
            let seq = state.next_seq;
            let now = from_micros(stamp);

            let item = Item {
                created_at: existing.map(|e| e.created_at).unwrap_or(now),
                updated_at: now,
                id: input.id,
                title: input.title,
                content: input.content,
                tags: input.tags,
            };

            self.put_document(state, &item, seq)?;
            self.publish(state, seq + 1, stamp)?;

            tracing::debug!("Stored item '{}' (seq {})", item.id, seq);
            Ok(item)
        })
    }

    /// Insert or replace many items in one commit
    ///
    /// Every input is validated before anything is written; one invalid
    /// item rejects the whole batch. All stored items share one
    /// `updated_at`. An id repeated inside the batch resolves to its
    /// last occurrence.
    pub fn store_batch(&self, inputs: Vec<ItemInput>) -> Result<Vec<Item>> {
        let inputs = inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| {
                self.validate_input(input).map_err(|e| match e {
                    MemdexError::InvalidItem(msg) => {
                        MemdexError::InvalidItem(format!("item {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        self.write(|state| {
            let searcher = self.reader.searcher();

            // Resolve created_at for every distinct id up front
            let mut created: HashMap<String, chrono::DateTime<Utc>> = HashMap::new();
            let mut floor: Option<i64> = None;
            for input in &inputs {
                if created.contains_key(&input.id) {
                    continue;
                }
                if let Some(existing) = self.find_item(&searcher, &input.id)? {
                    let updated = to_micros(&existing.updated_at);
                    floor = Some(floor.map_or(updated, |f| f.max(updated)));
                    created.insert(input.id.clone(), existing.created_at);
                }
            }

            let stamp = state.next_stamp(floor);
            let now = from_micros(stamp);
            let mut seq = state.next_seq;
            let mut stored = Vec::with_capacity(inputs.len());

            for input in &inputs {
                let created_at = *created.entry(input.id.clone()).or_insert(now);
                let item = Item {
                    id: input.id.clone(),
                    title: input.title.clone(),
                    content: input.content.clone(),
                    tags: input.tags.clone(),
                    created_at,
                    updated_at: now,
                };
                self.put_document(state, &item, seq)?;
                seq += 1;
                stored.push(item);
            }

            self.publish(state, seq, stamp)?;

            tracing::info!("Stored batch of {} items", stored.len());
            Ok(stored)
        })
    }

    /// Point lookup by exact id
    pub fn retrieve(&self, id: &str) -> Result<Option<Item>> {
        self.validate_id(id)?;
        self.read(|searcher| self.find_item(searcher, id))
    }

    /// Delete an item; returns whether it existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.validate_id(id)?;

        self.write(|state| {
            let searcher = self.reader.searcher();
            if self.find_item(&searcher, id)?.is_none() {
                return Ok(false);
            }

            state.writer.delete_term(self.fields.id_term(id));
            let (next_seq, last_stamp) = (state.next_seq, state.last_stamp);
            self.publish(state, next_seq, last_stamp)?;

            tracing::debug!("Deleted item '{}'", id);
            Ok(true)
        })
    }

    /// Items ordered by `updated_at` descending, ties by write order
    ///
    /// An offset at or past the item count yields an empty page.
    pub fn list(&self, limit: usize, offset: usize) -> Result<Vec<Item>> {
        self.read(|searcher| self.list_page(searcher, limit, offset))
    }

    fn list_page(&self, searcher: &Searcher, limit: usize, offset: usize) -> Result<Vec<Item>> {
        // The collector sizes its heap from limit + offset
        let total = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX);
        if limit == 0 || offset >= total {
            return Ok(Vec::new());
        }
        let limit = limit.min(total - offset);

        let collector = TopDocs::with_limit(limit)
            .and_offset(offset)
            .custom_score(|segment_reader: &SegmentReader| {
                let fast_fields = segment_reader.fast_fields();
                let updated = fast_fields.i64("updated_at").ok();
                let seq = fast_fields.u64("seq").ok();
                move |doc: DocId| {
                    let updated_at = updated
                        .as_ref()
                        .and_then(|c| c.first(doc))
                        .unwrap_or(i64::MIN);
                    let seq = seq.as_ref().and_then(|c| c.first(doc)).unwrap_or(u64::MAX);
                    (updated_at, Reverse(seq))
                }
            });

        let top_docs = searcher
            .search(&AllQuery, &collector)
            .map_err(|e| MemdexError::StorageError(format!("List failed: {e}")))?;

        top_docs
            .into_iter()
            .map(|(_, address)| self.load_item(searcher, address))
            .collect()
    }

    /// All distinct tags, sorted
    pub fn get_tags(&self) -> Result<Vec<String>> {
        self.read(|searcher| self.collect_tags(searcher))
    }

    fn collect_tags(&self, searcher: &Searcher) -> Result<Vec<String>> {
        let mut tags = BTreeSet::new();
        for doc in self.all_documents(searcher)? {
            let item = self.fields.to_item(&doc)?;
            tags.extend(item.tags.to_vec());
        }
        Ok(tags.into_iter().collect())
    }

    /// Aggregate counts and on-disk size
    pub fn get_stats(&self) -> Result<StoreStats> {
        self.read(|searcher| {
            Ok(StoreStats {
                item_count: searcher.num_docs(),
                tag_count: self.collect_tags(searcher)?.len(),
                size_on_disk: self.size_on_disk(),
            })
        })
    }

    /// Flush reader statistics, wait for merges and release the writer
    ///
    /// Further writes fail with `StoreUnavailable`; reads keep working.
    pub fn close(&self) -> Result<()> {
        let state = self.lock_writer()?.take();
        let Some(state) = state else {
            return Ok(());
        };

        self.reader
            .reload()
            .map_err(|e| MemdexError::StorageError(format!("Failed to reload reader: {e}")))?;
        state
            .writer
            .wait_merging_threads()
            .map_err(|e| MemdexError::StorageError(format!("Failed to stop writer: {e}")))?;

        tracing::info!("Closed store at {:?}", self.root);
        Ok(())
    }

    /// Whether a medium failure has disabled the store
    pub fn is_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    /// Store directory
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Field handles of the item schema
    pub fn fields(&self) -> &ItemFields {
        &self.fields
    }

    /// Underlying Tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Current reader snapshot, refused once the store has failed
    pub fn searcher(&self) -> Result<Searcher> {
        self.ensure_available()?;
        Ok(self.reader.searcher())
    }

    /// Run a read against the current snapshot
    ///
    /// Medium failures mark the store failed, as they do on the write path.
    pub fn read<T>(&self, op: impl FnOnce(&Searcher) -> Result<T>) -> Result<T> {
        let searcher = self.searcher()?;
        op(&searcher).inspect_err(|err| {
            if err.is_fatal() {
                self.mark_failed(&err.to_string());
            }
        })
    }

    /// Materialize the item stored at `address`
    pub fn load_item(&self, searcher: &Searcher, address: DocAddress) -> Result<Item> {
        let doc: TantivyDocument = searcher
            .doc(address)
            .map_err(|e| MemdexError::StorageError(format!("Failed to load document: {e}")))?;
        self.fields.to_item(&doc)
    }

    /// Every live document in the snapshot, in address order
    pub fn all_documents(&self, searcher: &Searcher) -> Result<Vec<TantivyDocument>> {
        let mut addresses: Vec<DocAddress> = searcher
            .search(&AllQuery, &DocSetCollector)
            .map_err(|e| MemdexError::StorageError(format!("Scan failed: {e}")))?
            .into_iter()
            .collect();
        addresses.sort();

        addresses
            .into_iter()
            .map(|address| {
                searcher.doc(address).map_err(|e| {
                    MemdexError::StorageError(format!("Failed to load document: {e}"))
                })
            })
            .collect()
    }

    /// Total byte size of the store directory
    pub fn size_on_disk(&self) -> u64 {
        calculate_directory_size(&self.root)
    }

    /// Run a mutation under the writer lock
    ///
    /// On error the uncommitted operations are rolled back. Medium
    /// failures mark the store failed.
    pub(super) fn write<T>(&self, op: impl FnOnce(&mut WriterState) -> Result<T>) -> Result<T> {
        self.ensure_available()?;
        let mut guard = self.lock_writer()?;
        let state = guard
            .as_mut()
            .ok_or_else(|| MemdexError::StoreUnavailable("Store is closed".to_string()))?;

        match op(state) {
            Ok(value) => Ok(value),
            Err(err) => {
                if let Err(rollback_err) = state.writer.rollback() {
                    tracing::error!("Rollback failed: {}", rollback_err);
                    self.mark_failed(&format!("rollback failed: {rollback_err}"));
                }
                if err.is_fatal() {
                    self.mark_failed(&err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Commit pending operations with bookkeeping, then reload readers
    pub(super) fn publish(
        &self,
        state: &mut WriterState,
        next_seq: u64,
        last_stamp: i64,
    ) -> Result<()> {
        let payload = serde_json::to_string(&CommitPayload {
            schema_version: SCHEMA_VERSION,
            next_seq,
            last_stamp,
        })?;

        let mut prepared = state
            .writer
            .prepare_commit()
            .map_err(|e| MemdexError::StorageError(format!("Failed to prepare commit: {e}")))?;
        prepared.set_payload(&payload);
        prepared
            .commit()
            .map_err(|e| MemdexError::StorageError(format!("Failed to commit: {e}")))?;

        state.next_seq = next_seq;
        state.last_stamp = last_stamp;

        self.reader
            .reload()
            .map_err(|e| MemdexError::StorageError(format!("Failed to reload reader: {e}")))
    }

    pub(super) fn lock_writer(&self) -> Result<MutexGuard<'_, Option<WriterState>>> {
        self.writer.lock().map_err(|_| {
            self.mark_failed("writer lock poisoned");
            poisoned()
        })
    }

    /// Refuse with `StoreUnavailable` once a medium failure latched
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_failed() {
            return Err(MemdexError::StoreUnavailable(
                "A previous storage operation failed; restart required".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn mark_failed(&self, reason: &str) {
        if !self.failed.swap(true, Ordering::SeqCst) {
            tracing::error!("Store at {:?} marked failed: {}", self.root, reason);
        }
    }

    /// Replace the document of `item.id` with a fresh one
    fn put_document(&self, state: &mut WriterState, item: &Item, seq: u64) -> Result<()> {
        state.writer.delete_term(self.fields.id_term(&item.id));
        state
            .writer
            .add_document(self.fields.to_document(item, seq))
            .map_err(|e| MemdexError::StorageError(format!("Failed to add document: {e}")))?;
        Ok(())
    }

    fn find_item(&self, searcher: &Searcher, id: &str) -> Result<Option<Item>> {
        let query = TermQuery::new(self.fields.id_term(id), IndexRecordOption::Basic);
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(1))
            .map_err(|e| MemdexError::StorageError(format!("Lookup failed: {e}")))?;

        match top_docs.into_iter().next() {
            Some((_, address)) => self.load_item(searcher, address).map(Some),
            None => Ok(None),
        }
    }

    /// Recover writer bookkeeping from the last commit
    ///
    /// The payload is raised to the highest `seq` and `updated_at` held
    /// by any segment, so a stale or missing payload (for instance after
    /// an external merge) never reissues a value.
    fn load_payload(&self) -> Result<CommitPayload> {
        let metas = self
            .index
            .load_metas()
            .map_err(|e| MemdexError::StorageError(format!("Failed to read metas: {e}")))?;

        let stored = match metas.payload.as_deref() {
            Some(raw) => {
                let payload: CommitPayload = serde_json::from_str(raw)?;
                if payload.schema_version > SCHEMA_VERSION {
                    return Err(MemdexError::StorageError(format!(
                        "Store schema version {} is newer than supported version {}",
                        payload.schema_version, SCHEMA_VERSION
                    )));
                }
                Some(payload)
            }
            None => None,
        };

        let mut payload = stored.unwrap_or(CommitPayload {
            schema_version: SCHEMA_VERSION,
            ..Default::default()
        });
        let (max_seq, max_stamp) = self.scan_bookkeeping()?;
        if let Some(seq) = max_seq {
            payload.next_seq = payload.next_seq.max(seq + 1);
        }
        if let Some(stamp) = max_stamp {
            payload.last_stamp = payload.last_stamp.max(stamp);
        }

        if stored != Some(payload) && payload.next_seq > 0 {
            tracing::warn!(
                "Store at {:?} had a missing or stale commit payload, recovered next seq {}",
                self.root,
                payload.next_seq
            );
        }
        Ok(payload)
    }

    /// Highest `seq` and `updated_at` in any segment, from fast fields
    fn scan_bookkeeping(&self) -> Result<(Option<u64>, Option<i64>)> {
        let searcher = self.reader.searcher();
        let mut max_seq = None;
        let mut max_stamp = None;

        for segment in searcher.segment_readers() {
            if segment.max_doc() == 0 {
                continue;
            }
            let fast_fields = segment.fast_fields();
            let seq = fast_fields
                .u64("seq")
                .map_err(|e| MemdexError::StorageError(format!("Failed to read seq column: {e}")))?;
            let updated = fast_fields.i64("updated_at").map_err(|e| {
                MemdexError::StorageError(format!("Failed to read updated_at column: {e}"))
            })?;
            max_seq = max_seq.max(Some(seq.max_value()));
            max_stamp = max_stamp.max(Some(updated.max_value()));
        }

        Ok((max_seq, max_stamp))
    }

    fn validate_id(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(MemdexError::InvalidItem("id must not be empty".to_string()));
        }
        if id.len() > self.max_id_length {
            return Err(MemdexError::InvalidItem(format!(
                "id exceeds {} bytes",
                self.max_id_length
            )));
        }
        if id.chars().any(char::is_control) {
            return Err(MemdexError::InvalidItem(
                "id must not contain control characters".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_input(&self, input: ItemInput) -> Result<ItemInput> {
        self.validate_id(&input.id)?;
        if input.title.trim().is_empty() {
            return Err(MemdexError::InvalidItem(format!(
                "title must not be empty (id '{}')",
                input.id
            )));
        }
        Ok(input)
    }
}

fn poisoned() -> MemdexError {
    MemdexError::StoreUnavailable("Writer lock poisoned".to_string())
}

/// Calculate total size of a directory recursively
pub(crate) fn calculate_directory_size(dir_path: &Path) -> u64 {
    if !dir_path.exists() {
        return 0;
    }

    WalkDir::new(dir_path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
