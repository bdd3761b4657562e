#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::BTreeSet;

use common::{create_test_dir, in_memory_fixture, on_disk_fixture};
use futures::future::join_all;
use listings_daemon::code::is_valid_property_code;
use listings_daemon::sequence::SequenceStore;
use listings_daemon::AllocationError;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_allocations_form_exact_permutation() {
    let fixture = in_memory_fixture();

    // Warm the prefix so the batch starts from a non-zero counter.
    for _ in 0..5 {
        fixture.allocator.allocate("Pune", "Office").await.unwrap();
    }

    let calls = (0..100).map(|_| {
        let allocator = fixture.allocator.clone();
        tokio::spawn(async move { allocator.allocate("Pune", "Office").await })
    });
    let results = join_all(calls).await;

    let sequences: BTreeSet<u64> = results
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().sequence())
        .collect();
    let expected: BTreeSet<u64> = (6..=105).collect();
    assert_eq!(sequences, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_across_prefixes_are_independent() {
    let fixture = in_memory_fixture();

    let calls = (0..60).map(|i| {
        let allocator = fixture.allocator.clone();
        let location = if i % 2 == 0 { "Mumbai" } else { "Delhi" };
        async move { allocator.allocate(location, "Retail").await.unwrap() }
    });
    let codes = join_all(calls).await;

    let mumbai: BTreeSet<u64> = codes
        .iter()
        .filter(|c| c.location_code() == "MUM")
        .map(|c| c.sequence())
        .collect();
    let delhi: BTreeSet<u64> = codes
        .iter()
        .filter(|c| c.location_code() == "DEL")
        .map(|c| c.sequence())
        .collect();
    assert_eq!(mumbai, (1..=30).collect::<BTreeSet<u64>>());
    assert_eq!(delhi, (1..=30).collect::<BTreeSet<u64>>());
}

#[tokio::test]
async fn test_sequential_allocations_are_increasing() {
    let fixture = in_memory_fixture();
    let mut last = 0;
    for _ in 0..20 {
        let code = fixture.allocator.allocate("Chennai", "Co-Working").await.unwrap();
        assert!(code.sequence() > last);
        last = code.sequence();
    }
    assert_eq!(last, 20);
}

#[tokio::test]
async fn test_formatting_and_derivation() {
    let fixture = in_memory_fixture();

    let code = fixture.allocator.allocate("Bangalore", "Office").await.unwrap();
    assert_eq!(code.to_string(), "BLR-O-001");
    assert!(is_valid_property_code(&code.to_string()));

    let fallback = fixture.allocator.allocate("Timbuktu", "Warehouse").await.unwrap();
    assert_eq!(fallback.to_string(), "TIM-W-001");

    // Lookup is case-insensitive and trims whitespace.
    let folded = fixture.allocator.allocate("  mumbai ", "RETAIL").await.unwrap();
    assert_eq!(folded.to_string(), "MUM-R-001");
}

#[tokio::test]
async fn test_blank_input_leaves_counters_untouched() {
    let fixture = in_memory_fixture();

    let err = fixture.allocator.allocate("   ", "Office").await.unwrap_err();
    assert!(matches!(err, AllocationError::InvalidInput(_)));
    let err = fixture.allocator.allocate("Pune", "").await.unwrap_err();
    assert!(matches!(err, AllocationError::InvalidInput(_)));

    assert!(fixture.sequences.counters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_underivable_name_consumes_nothing() {
    let fixture = in_memory_fixture();

    let err = fixture.allocator.allocate("42nd Street", "Office").await.unwrap_err();
    assert!(matches!(err, AllocationError::InternalInvariant(_)));
    assert!(fixture.sequences.counters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_same_inputs_give_same_prefix() {
    let fixture = in_memory_fixture();
    let a = fixture.allocator.allocate("Hyderabad", "Office").await.unwrap();
    let b = fixture.allocator.allocate("hyderabad", "office").await.unwrap();
    assert_eq!(a.prefix(), b.prefix());
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_counters_survive_reopen() {
    let temp_dir = create_test_dir();
    {
        let fixture = on_disk_fixture(temp_dir.path());
        for _ in 0..3 {
            fixture.allocator.allocate("Kochi", "Office").await.unwrap();
        }
    }

    let fixture = on_disk_fixture(temp_dir.path());
    let code = fixture.allocator.allocate("Kochi", "Office").await.unwrap();
    assert_eq!(code.to_string(), "KOC-O-004");
}

#[tokio::test]
async fn test_sequence_widens_past_three_digits() {
    let fixture = in_memory_fixture();
    for _ in 0..999 {
        fixture.sequences.next_sequence("NAG-O").await.unwrap();
    }
    let code = fixture.allocator.allocate("Nagpur", "Office").await.unwrap();
    assert_eq!(code.to_string(), "NAG-O-1000");
    assert!(is_valid_property_code(&code.to_string()));
}
