//! Trace Replay Drivers.
//!
//! Feeds recorded events through the components the way a host simulator would.
//! The branch driver forwards the host's recorded decisions; it does not decide on
//! its own when to squash. The access driver runs addresses through a [`TagArray`].

use serde::Serialize;
use tracing::info;

use super::trace::{AccessEvent, BranchEvent, BranchKind};
use crate::core::units::bru::BranchPredictor;
use crate::core::units::cache::{AccessOutcome, TagArray};

/// Outcome counts of a branch replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BranchReplaySummary {
    /// Events replayed.
    pub events: u64,
    /// Events resolved normally (counter trained).
    pub resolved: u64,
    /// Events resolved as squashed (history repaired only).
    pub squashed: u64,
    /// Wrong-path events discarded.
    pub wrong_path: u64,
    /// Correct-path conditional branches.
    pub conditional: u64,
    /// Correct-path conditional branches whose effective prediction was right.
    pub correct: u64,
}

impl BranchReplaySummary {
    /// Fraction of correct-path conditional branches predicted correctly.
    pub fn accuracy(&self) -> f64 {
        if self.conditional == 0 {
            0.0
        } else {
            self.correct as f64 / self.conditional as f64
        }
    }
}

/// Outcome counts of an access replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AccessReplaySummary {
    /// Accesses replayed.
    pub accesses: u64,
    /// Accesses that hit.
    pub hits: u64,
    /// Misses filled into an empty way.
    pub fills: u64,
    /// Misses that evicted a valid line.
    pub evictions: u64,
    /// Evictions of dirty lines.
    pub writebacks: u64,
}

impl AccessReplaySummary {
    /// Fraction of accesses that hit.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}

/// Replays branch events through `bp`.
///
/// Each event is predicted (or recorded as unconditional), then its token is
/// returned through `squash` for wrong-path events or `resolve` otherwise.
///
/// # Panics
///
/// Panics if an event names a thread the predictor was not built for.
pub fn replay_branches<P: BranchPredictor>(bp: &mut P, events: &[BranchEvent]) -> BranchReplaySummary {
    let mut summary = BranchReplaySummary::default();

    for event in events {
        summary.events += 1;
        let tid = event.thread;

        let (predicted, token) = match event.kind {
            BranchKind::Conditional => {
                let (taken, token) = bp.predict(tid, event.pc);
                if taken && event.btb_miss {
                    bp.force_not_taken(tid);
                }
                (Some(taken && !event.btb_miss), token)
            }
            BranchKind::Unconditional => (None, bp.unconditional_branch(tid, event.pc)),
        };

        if event.wrong_path {
            bp.squash(tid, token);
            summary.wrong_path += 1;
            continue;
        }

        if let Some(predicted) = predicted {
            summary.conditional += 1;
            if predicted == event.taken {
                summary.correct += 1;
            }
        }

        bp.resolve(tid, event.pc, event.taken, token, event.squashed);
        if event.squashed {
            summary.squashed += 1;
        } else {
            summary.resolved += 1;
        }
    }

    info!(
        events = summary.events,
        accuracy = summary.accuracy(),
        "branch replay finished"
    );
    summary
}

/// Replays memory accesses through `tags`.
pub fn replay_accesses(tags: &mut TagArray, events: &[AccessEvent]) -> AccessReplaySummary {
    let mut summary = AccessReplaySummary::default();

    for event in events {
        summary.accesses += 1;
        match tags.access(event.addr, event.write) {
            AccessOutcome::Hit { .. } => summary.hits += 1,
            AccessOutcome::Fill { .. } => summary.fills += 1,
            AccessOutcome::Evict { writeback, .. } => {
                summary.evictions += 1;
                if writeback {
                    summary.writebacks += 1;
                }
            }
        }
    }

    info!(
        accesses = summary.accesses,
        hit_rate = summary.hit_rate(),
        "access replay finished"
    );
    summary
}
