// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Concurrent access to the in-memory contact store.

use people_keeper::db::{ContactStore, MemoryContactStore};
use people_keeper::models::{Category, NewContact};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_are_all_kept() {
    let store = Arc::new(MemoryContactStore::new());

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let owner = if i % 2 == 0 { "alice" } else { "bob" };
                store
                    .create(
                        owner,
                        NewContact {
                            name: format!("Person {}", i),
                            category: Category::Friends,
                            image_url: None,
                        },
                    )
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.list("alice").await.unwrap().len(), 25);
    assert_eq!(store.list("bob").await.unwrap().len(), 25);
}
