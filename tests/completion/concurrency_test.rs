//! Completing while the catalog is rebuilt from another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use sql_intellisense::catalog::{Schema, Table};
use sql_intellisense::completion::{CompletionEngine, CompletionRequest};

use super::common::{engine, labels};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_engine_is_send_and_sync() {
    assert_send_sync::<CompletionEngine>();
}

#[test]
fn test_rebuild_is_atomic_for_readers() {
    let hr = vec![Schema::new(
        "HR",
        vec![Table::new("EMP", ["ID"]), Table::new("DEPT", ["ID"])],
    )];
    let sales = vec![Schema::new(
        "SALES",
        vec![Table::new("ORDERS", ["ORDER_ID"]), Table::new("ITEMS", ["SKU"])],
    )];
    let hr_labels = vec!["HR", "HR.EMP", "HR.DEPT"];
    let sales_labels = vec!["SALES", "SALES.ORDERS", "SALES.ITEMS"];

    let engine = engine();
    engine.rebuild_catalog(&hr, &[]);
    let done = AtomicBool::new(false);
    let request = CompletionRequest::new("SELECT * FROM ");

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..200 {
                let schemas = if i % 2 == 0 { &sales } else { &hr };
                engine.rebuild_catalog(schemas, &[]);
            }
            done.store(true, Ordering::SeqCst);
        });

        for _ in 0..4 {
            s.spawn(|| {
                let mut rounds = 0;
                while !done.load(Ordering::SeqCst) || rounds < 50 {
                    let candidates = engine.complete(&request);
                    let seen = labels(&candidates);
                    assert!(
                        seen == hr_labels || seen == sales_labels,
                        "observed a partial catalog: {seen:?}"
                    );
                    rounds += 1;
                }
            });
        }
    });
}

#[test]
fn test_clones_share_catalog() {
    let engine = engine();
    let clone = engine.clone();
    clone.rebuild_catalog(&[Schema::new("ONLY", vec![])], &[]);

    let candidates = engine.complete(&CompletionRequest::new("SELECT * FROM "));
    assert_eq!(labels(&candidates), vec!["ONLY"]);
}
