//! Tests for tracing instrumentation.
//!
//! These tests verify that tracing spans and events are emitted while a
//! histogram is built.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use findkmer::histogram::RecordFilter;
use findkmer::kmer::KmerLength;
use findkmer::run::analyze_bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_test::traced_test;

/// A simple layer that counts events at INFO level or above.
struct EventCounter {
    count: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if event.metadata().level() <= &Level::INFO {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn scan_and_traversal_emit_events() {
    let event_count = Arc::new(AtomicUsize::new(0));
    let layer = EventCounter {
        count: Arc::clone(&event_count),
    };
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        let analysis = analyze_bytes(b">id1\nACGTACGT\n", KmerLength::new(2).unwrap()).unwrap();
        analysis.summary().unwrap();
    });

    // "scan complete" and "histogram complete".
    assert!(
        event_count.load(Ordering::SeqCst) >= 2,
        "should emit tracing events"
    );
}

#[test]
#[traced_test]
fn scan_logs_totals() {
    let analysis =
        findkmer::run::analyze_reader(&b">id1\nAANAA\n"[..], KmerLength::new(2).unwrap()).unwrap();
    analysis.records(&RecordFilter::default()).unwrap();
    assert!(logs_contain("scan complete"));
    assert!(logs_contain("histogram complete"));
}

#[test]
#[traced_test]
fn identifiers_logged_at_debug() {
    findkmer::run::analyze_reader(&b">chr1 test\nACGT\n"[..], KmerLength::new(2).unwrap())
        .unwrap();
    assert!(logs_contain("chr1 test"));
}

#[test]
#[traced_test]
fn slice_scan_logs_totals_and_identifiers() {
    findkmer::run::analyze_bytes(b">chr2 slice\nACGTACGT\n", KmerLength::new(2).unwrap())
        .unwrap();
    assert!(logs_contain("scan complete"));
    assert!(logs_contain("<memory>"));
    assert!(logs_contain("chr2 slice"));
}
