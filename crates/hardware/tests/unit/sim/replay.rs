//! Replay Driver Tests.
//!
//! Verifies that recorded host decisions (wrong path, squashed resolution, BTB
//! miss) reach the predictor, and that access replays tally tag array outcomes.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use uarch_core::config::{GSelectConfig, IpvConfig};
use uarch_core::core::units::cache::TagArray;
use uarch_core::sim::replay::{
    AccessReplaySummary, BranchReplaySummary, replay_accesses, replay_branches,
};
use uarch_core::sim::trace::{AccessEvent, BranchEvent, BranchKind};

use crate::common::{gselect, gselect_with};

fn branch(pc: u64, taken: bool) -> BranchEvent {
    BranchEvent {
        thread: 0,
        pc,
        taken,
        kind: BranchKind::Conditional,
        squashed: false,
        wrong_path: false,
        btb_miss: false,
    }
}

fn access(addr: u64, write: bool) -> AccessEvent {
    AccessEvent { addr, write }
}

// ══════════════════════════════════════════════════════════
// 1. Branch replay
// ══════════════════════════════════════════════════════════

#[test]
fn empty_replay() {
    let mut bp = gselect(256, 4);
    let summary = replay_branches(&mut bp, &[]);
    assert_eq!(summary, BranchReplaySummary::default());
    assert!(summary.accuracy().abs() < f64::EPSILON);
}

/// Wrong-path events are squashed, squashed events only repair history.
#[test]
fn forwards_host_decisions() {
    let mut bp = gselect(256, 4);
    let events = [
        BranchEvent {
            kind: BranchKind::Unconditional,
            ..branch(0x10, true)
        },
        BranchEvent {
            wrong_path: true,
            ..branch(0x20, true)
        },
        BranchEvent {
            squashed: true,
            ..branch(0x24, false)
        },
    ];

    let summary = replay_branches(&mut bp, &events);
    assert_eq!(
        summary,
        BranchReplaySummary {
            events: 3,
            resolved: 1,
            squashed: 1,
            wrong_path: 1,
            conditional: 1,
            correct: 1,
        }
    );

    // 0b11 after the unconditional commit, restored by the wrong-path squash,
    // then the squashed resolve shifts in not-taken.
    assert_eq!(bp.history(0), 0b110);
    assert_eq!(bp.stats().squashed, 2);
    assert_eq!(bp.stats().committed, 1);
    assert_eq!(bp.stats().committed_conditional, 0);
}

/// A taken prediction without a target falls through and counts as not-taken.
#[test]
fn btb_miss_forces_not_taken() {
    let mut bp = gselect_with(GSelectConfig {
        table_size: 256,
        history_bits: 4,
        initial_counter: Some(3),
        ..GSelectConfig::default()
    });
    let events = [BranchEvent {
        btb_miss: true,
        ..branch(0x40, true)
    }];

    let summary = replay_branches(&mut bp, &events);
    assert_eq!(summary.conditional, 1);
    assert_eq!(summary.correct, 0);
    assert_eq!(bp.stats().btb_misses, 1);
    assert_eq!(bp.stats().mispredicted, 0, "the table itself predicted taken");
    assert_eq!(bp.history(0), 0b1);
}

/// A BTB miss on a not-taken prediction changes nothing.
#[test]
fn btb_miss_ignored_when_not_taken() {
    let mut bp = gselect(256, 4);
    let events = [BranchEvent {
        btb_miss: true,
        ..branch(0x40, false)
    }];

    let summary = replay_branches(&mut bp, &events);
    assert_eq!(summary.correct, 1);
    assert_eq!(bp.stats().btb_misses, 0);
}

proptest! {
    /// On a clean stream the driver and the predictor agree on every count.
    #[test]
    fn summary_matches_predictor_stats(
        events in proptest::collection::vec((0..64u64, any::<bool>()), 0..300),
    ) {
        let mut bp = gselect(256, 4);
        let events: Vec<_> = events.into_iter().map(|(pc, taken)| branch(pc * 4, taken)).collect();

        let summary = replay_branches(&mut bp, &events);
        let stats = bp.stats();
        prop_assert_eq!(summary.events, events.len() as u64);
        prop_assert_eq!(summary.resolved, stats.committed);
        prop_assert_eq!(summary.conditional, stats.committed_conditional);
        prop_assert_eq!(summary.correct, stats.committed_conditional - stats.mispredicted);
        prop_assert_eq!(stats.lookups, events.len() as u64);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Access replay
// ══════════════════════════════════════════════════════════

#[test]
fn access_replay_tallies_outcomes() {
    let mut tags = match TagArray::new(1, 64, &IpvConfig::default()) {
        Ok(tags) => tags,
        Err(e) => panic!("tag array rejected: {e}"),
    };
    let mut events = vec![access(0, true)];
    events.extend((1..17).map(|i| access(i * 64, false)));
    events.push(access(0x40, false));

    let summary = replay_accesses(&mut tags, &events);
    assert_eq!(
        summary,
        AccessReplaySummary {
            accesses: 18,
            hits: 1,
            fills: 16,
            evictions: 1,
            writebacks: 1,
        }
    );
    assert!((summary.hit_rate() - 1.0 / 18.0).abs() < 1e-12);
}
