// Concurrent writers and readers against one store

use crate::common::create_test_services;
use memdex::core::types::{ItemInput, TagSet};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;
use std::thread;

const WRITERS: usize = 4;
const PER_WRITER: usize = 25;

#[test]
fn test_parallel_stores_with_concurrent_reader() {
    let (services, _temp) = create_test_services();
    let barrier = Barrier::new(WRITERS + 1);
    let writers_done = AtomicBool::new(false);

    thread::scope(|scope| {
        let writers: Vec<_> = (0..WRITERS)
            .map(|w| {
                let (services, barrier) = (&services, &barrier);
                scope.spawn(move || {
                    barrier.wait();
                    for i in 0..PER_WRITER {
                        services
                            .store
                            .store(ItemInput::new(
                                format!("w{w}-{i:02}"),
                                format!("Writer {w} note {i}"),
                                format!("shared body from writer{w}"),
                                TagSet::new([format!("w{w}")]),
                            ))
                            .unwrap();
                    }
                })
            })
            .collect();

        let reader = scope.spawn(|| {
            barrier.wait();
            let mut last_count = 0;
            loop {
                let done = writers_done.load(Ordering::SeqCst);

                let count = services.store.get_stats().unwrap().item_count;
                assert!(count >= last_count, "item count went backwards");
                last_count = count;

                let response = services.search.search("shared", Some(50)).unwrap();
                for hit in &response.results {
                    let fetched = services.store.retrieve(&hit.item.id).unwrap();
                    assert_eq!(fetched.as_ref(), Some(&hit.item));
                }

                if done {
                    break;
                }
            }
        });

        for writer in writers {
            writer.join().unwrap();
        }
        writers_done.store(true, Ordering::SeqCst);
        reader.join().unwrap();
    });

    let store = &services.store;
    assert_eq!(
        store.get_stats().unwrap().item_count,
        (WRITERS * PER_WRITER) as u64
    );

    let searcher = store.searcher().unwrap();
    let docs = store.all_documents(&searcher).unwrap();
    let seqs: HashSet<u64> = docs.iter().map(|doc| store.fields().seq_of(doc)).collect();
    assert_eq!(seqs.len(), WRITERS * PER_WRITER);

    // Serialized writers never share a timestamp
    let stamps: HashSet<_> = store
        .list(WRITERS * PER_WRITER, 0)
        .unwrap()
        .into_iter()
        .map(|item| item.updated_at)
        .collect();
    assert_eq!(stamps.len(), WRITERS * PER_WRITER);
}
