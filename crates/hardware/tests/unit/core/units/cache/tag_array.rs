//! Tag Array Tests.
//!
//! Verifies address splitting, invalid-way fills, LRU-IPV eviction, dirty
//! tracking and flushing.

use rstest::rstest;

use uarch_core::config::IpvConfig;
use uarch_core::core::units::cache::{AccessOutcome, TagArray};

fn tags(num_sets: usize, line_bytes: usize) -> TagArray {
    match TagArray::new(num_sets, line_bytes, &IpvConfig::default()) {
        Ok(tags) => tags,
        Err(e) => panic!("tag array rejected: {e}"),
    }
}

#[test]
fn geometry_and_fallbacks() {
    let t = tags(64, 64);
    assert_eq!(t.num_sets(), 64);
    assert_eq!(t.ways(), 16);
    assert_eq!(t.policy().sets(), 64);

    let t = tags(0, 0);
    assert_eq!(t.num_sets(), 1);
    assert!(!t.contains(0));
}

#[test]
fn miss_then_hit() {
    let mut t = tags(4, 64);
    assert_eq!(t.access(0x1000, false), AccessOutcome::Fill { way: 0 });
    assert!(t.contains(0x1000));
    assert!(t.contains(0x103F), "same line");
    assert!(t.access(0x1010, false).is_hit());
    assert!(!t.contains(0x1040), "next line");
}

/// Sixteen lines fill the set; the seventeenth evicts the oldest fill.
#[test]
fn full_set_evicts_oldest_fill() {
    let mut t = tags(1, 64);
    for i in 0..16u64 {
        assert_eq!(t.access(i * 64, false), AccessOutcome::Fill { way: i as usize });
    }
    assert_eq!(
        t.access(16 * 64, false),
        AccessOutcome::Evict {
            way: 0,
            victim_tag: 0,
            writeback: false,
        }
    );
    assert!(!t.contains(0));
    assert!(t.contains(16 * 64));
    assert_eq!(t.policy().stats().victims, 1);
}

/// A hit promotes the line, so the next eviction skips it.
#[test]
fn hit_protects_line_from_eviction() {
    let mut t = tags(1, 64);
    for i in 0..16u64 {
        let _ = t.access(i * 64, false);
    }
    assert_eq!(t.access(0, false), AccessOutcome::Hit { way: 0 });

    let outcome = t.access(16 * 64, false);
    assert_eq!(outcome.way(), 1);
    assert!(t.contains(0));
}

#[rstest]
#[case(true, true)]
#[case(false, false)]
fn eviction_reports_dirty_lines(#[case] write: bool, #[case] writeback: bool) {
    let mut t = tags(1, 64);
    let _ = t.access(0, write);
    for i in 1..16u64 {
        let _ = t.access(i * 64, false);
    }
    match t.access(16 * 64, false) {
        AccessOutcome::Evict { way, writeback: wb, .. } => {
            assert_eq!(way, 0);
            assert_eq!(wb, writeback);
        }
        other => panic!("expected eviction, got {other:?}"),
    }
}

/// A write hit marks a clean line dirty.
#[test]
fn write_hit_dirties_line() {
    let mut t = tags(2, 64);
    let _ = t.access(0x80, false);
    let _ = t.access(0x80, true);
    assert_eq!(t.flush(), 1);
}

#[test]
fn flush_invalidates_everything() {
    let mut t = tags(2, 64);
    let _ = t.access(0x00, true);
    let _ = t.access(0x40, false);
    let _ = t.access(0x80, true);
    assert_eq!(t.flush(), 2);
    assert!(!t.contains(0x00));
    assert!(!t.contains(0x40));
    assert_eq!(t.flush(), 0);
    assert_eq!(t.access(0x40, false), AccessOutcome::Fill { way: 0 });
}

/// Addresses differing only above the set bits land in the same set.
#[test]
fn set_conflicts_stay_in_their_set() {
    let mut t = tags(4, 64);
    let _ = t.access(64, false);
    let stride = 4 * 64;
    for i in 0..17u64 {
        let _ = t.access(i * stride, false);
    }
    assert!(!t.contains(0));
    assert!(t.contains(64), "other sets untouched");
    assert_eq!(t.policy().stats().victims, 1);
}
