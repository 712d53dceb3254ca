//! Prediction and replacement statistics.
//!
//! This module tracks event counts for both components. It provides:
//! 1. **Branch prediction:** Lookups, commits, mispredictions, squashes, and accuracy.
//! 2. **Replacement:** Fills, hits, promotions, demotions, and victim selections.
//!
//! Both structures serialize to JSON for the CLI's machine-readable output.

use serde::Serialize;

/// Branch predictor event counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PredictorStats {
    /// Conditional branch predictions made.
    pub lookups: u64,
    /// Conditional predictions that came out taken.
    pub predicted_taken: u64,
    /// Unconditional branches recorded.
    pub unconditional: u64,
    /// Resolutions that trained the counter table.
    pub committed: u64,
    /// Committed resolutions of conditional branches.
    pub committed_conditional: u64,
    /// Committed conditional branches whose prediction was wrong.
    pub mispredicted: u64,
    /// Tokens discarded through a squash or a squashed resolution.
    pub squashed: u64,
    /// Taken predictions forced to not-taken for lack of a target.
    pub btb_misses: u64,
}

impl PredictorStats {
    /// Fraction of committed conditional branches predicted correctly.
    ///
    /// Returns `0.0` when nothing conditional has committed.
    pub fn accuracy(&self) -> f64 {
        if self.committed_conditional == 0 {
            0.0
        } else {
            let correct = self.committed_conditional.saturating_sub(self.mispredicted);
            correct as f64 / self.committed_conditional as f64
        }
    }

    /// Prints a human-readable summary to stdout.
    pub fn print(&self) {
        println!("BRANCH PREDICTION");
        println!("  lookups          {}", self.lookups);
        println!("  predicted taken  {}", self.predicted_taken);
        println!("  unconditional    {}", self.unconditional);
        println!("  committed        {}", self.committed);
        println!("  mispredicted     {}", self.mispredicted);
        println!("  squashed         {}", self.squashed);
        println!("  btb misses       {}", self.btb_misses);
        println!("  accuracy         {:.2}%", self.accuracy() * 100.0);
    }
}

/// Replacement policy event counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplacementStats {
    /// Line records created.
    pub instantiated: u64,
    /// Fills (`reset` calls).
    pub resets: u64,
    /// Hits (`touch` calls).
    pub touches: u64,
    /// Touches that moved a line to a lower rank.
    pub promotions: u64,
    /// Touches that moved a line to a higher rank.
    pub demotions: u64,
    /// Victims selected.
    pub victims: u64,
    /// Invalidation notices received.
    pub invalidations: u64,
}

impl ReplacementStats {
    /// Prints a human-readable summary to stdout.
    pub fn print(&self) {
        println!("REPLACEMENT");
        println!("  lines            {}", self.instantiated);
        println!("  fills            {}", self.resets);
        println!("  hits             {}", self.touches);
        println!("  promotions       {}", self.promotions);
        println!("  demotions        {}", self.demotions);
        println!("  victims          {}", self.victims);
        println!("  invalidations    {}", self.invalidations);
    }
}
