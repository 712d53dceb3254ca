//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait through which a host pipeline
//! drives a speculative direction predictor. Predictions are made at fetch, before
//! the branch resolves, and hand back a [`BpHistory`] token. The token returns to the
//! predictor exactly once: at commit through [`BranchPredictor::resolve`], or on a
//! wrong path through [`BranchPredictor::squash`].

use super::history::BpHistory;
use crate::common::ThreadId;

/// Trait for speculative branch direction predictors.
pub trait BranchPredictor {
    /// Predicts whether a conditional branch will be taken.
    ///
    /// Speculatively shifts the prediction into the thread's history so that
    /// back-to-back predictions see it.
    ///
    /// # Arguments
    ///
    /// * `tid` - Hardware thread issuing the branch
    /// * `pc` - Program counter of the branch instruction
    ///
    /// # Returns
    ///
    /// A tuple `(taken, history)` where `history` must later be passed to
    /// `resolve` or `squash`.
    fn predict(&mut self, tid: ThreadId, pc: u64) -> (bool, BpHistory);

    /// Updates the predictor with the actual outcome of a branch.
    ///
    /// # Arguments
    ///
    /// * `tid` - Hardware thread that issued the branch
    /// * `pc` - Program counter of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    /// * `history` - Token returned when the branch was predicted
    /// * `squashed` - The branch was mispredicted; repair history only
    fn resolve(&mut self, tid: ThreadId, pc: u64, taken: bool, history: BpHistory, squashed: bool);

    /// Discards a wrong-path branch, restoring the history saved at prediction.
    fn squash(&mut self, tid: ThreadId, history: BpHistory);

    /// Records that a predicted-taken branch had no target, so it falls through.
    fn force_not_taken(&mut self, tid: ThreadId);

    /// Records an unconditional control transfer as taken without a table lookup.
    fn unconditional_branch(&mut self, tid: ThreadId, pc: u64) -> BpHistory;
}
