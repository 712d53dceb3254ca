//! GSelect Branch Predictor.
//!
//! GSelect concatenates low program counter bits with the global branch history to
//! index a table of saturating counters. Unlike gshare, the two fields occupy
//! disjoint index bits: the history fills the low `history_bits`, the PC the rest.
//!
//! History is updated eagerly at prediction time so that consecutive predictions in
//! flight see each other. Counters are only written at commit, never speculatively.
//! Each prediction returns a [`BpHistory`] holding the pre-prediction history, which
//! lets a squash rewind the register exactly.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `resolve()`: O(1)
//! - **Space Complexity:** O(T + H) where T is the table size and H the thread count
//! - **Hardware Cost:** Low - single table lookup, concatenation, counter update
//! - **Best Case:** Branches whose outcome is decided by a short recent history
//! - **Worst Case:** Many hot branches aliasing into few PC bits

use tracing::{debug, trace};

use super::{BranchPredictor, BpHistory, SatCounter};
use crate::common::{ConfigError, ThreadId, ceil_log2, constants::MAX_COUNTER_BITS, mask};
use crate::config::GSelectConfig;
use crate::stats::PredictorStats;

/// GSelect Predictor structure.
#[derive(Debug, Clone)]
pub struct GSelectPredictor {
    /// Pattern table of saturating counters.
    counters: Vec<SatCounter>,
    /// Per-thread global history registers.
    ghr: Vec<u64>,
    /// Width of each history register.
    history_bits: u32,
    /// Low PC bits dropped before indexing.
    inst_shift_amt: u32,
    /// Number of PC bits in the index.
    pc_bits: u32,
    pc_mask: u64,
    history_mask: u64,
    index_mask: u64,
    stats: PredictorStats,
}

impl GSelectPredictor {
    /// Creates a new GSelect predictor.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the table size is not a power of two, the history
    /// is wider than the index, the counter width is outside `1..=8`, the initial
    /// counter value does not fit, no threads are configured, or the instruction
    /// shift is 64 or more.
    pub fn new(config: &GSelectConfig) -> Result<Self, ConfigError> {
        debug!(
            table_size = config.table_size,
            counter_bits = config.counter_bits,
            history_bits = config.history_bits,
            threads = config.threads,
            "building gselect predictor"
        );

        if !config.table_size.is_power_of_two() {
            return Err(ConfigError::TableSizeNotPowerOfTwo(config.table_size));
        }
        if config.counter_bits == 0 || config.counter_bits > MAX_COUNTER_BITS {
            return Err(ConfigError::CounterBits(config.counter_bits));
        }
        if config.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if config.inst_shift_amt >= u64::BITS {
            return Err(ConfigError::InstShift(config.inst_shift_amt));
        }

        let index_bits = ceil_log2(config.table_size);
        let Some(pc_bits) = index_bits.checked_sub(config.history_bits) else {
            return Err(ConfigError::HistoryTooWide {
                history_bits: config.history_bits,
                index_bits,
            });
        };

        let max = SatCounter::max_for(config.counter_bits);
        let initial = config.initial_counter.unwrap_or(max / 2);
        if initial > max {
            return Err(ConfigError::InitialCounter {
                value: initial,
                max,
            });
        }

        debug!(index_bits, pc_bits, initial, "gselect index layout");

        Ok(Self {
            counters: vec![SatCounter::new(config.counter_bits, initial); config.table_size],
            ghr: vec![0; config.threads],
            history_bits: config.history_bits,
            inst_shift_amt: config.inst_shift_amt,
            pc_bits,
            pc_mask: mask(pc_bits),
            history_mask: mask(config.history_bits),
            index_mask: mask(index_bits),
            stats: PredictorStats::default(),
        })
    }

    /// Calculates the pattern table index.
    ///
    /// Concatenates the aligned PC bits above the history bits and masks the
    /// result to the index width.
    pub const fn index(&self, pc: u64, history: u64) -> usize {
        let pc_part = (pc >> self.inst_shift_amt) & self.pc_mask;
        let index = (pc_part << self.history_bits) | (history & self.history_mask);
        (index & self.index_mask) as usize
    }

    /// Current global history of `tid`.
    ///
    /// # Panics
    ///
    /// Panics if `tid` is not a configured thread.
    pub fn history(&self, tid: ThreadId) -> u64 {
        self.ghr[self.check_thread(tid)]
    }

    /// Counter at `index` in the pattern table.
    pub fn counter(&self, index: usize) -> SatCounter {
        self.counters[index]
    }

    /// Number of pattern table entries.
    pub const fn table_size(&self) -> usize {
        self.counters.len()
    }

    /// Number of PC bits used in the index.
    pub const fn pc_bits(&self) -> u32 {
        self.pc_bits
    }

    /// Width of the global history registers.
    pub const fn history_bits(&self) -> u32 {
        self.history_bits
    }

    /// Mask applied to the PC bits before concatenation.
    pub const fn pc_mask(&self) -> u64 {
        self.pc_mask
    }

    /// Mask applied to the history registers.
    pub const fn history_mask(&self) -> u64 {
        self.history_mask
    }

    /// Mask applied to the final index.
    pub const fn index_mask(&self) -> u64 {
        self.index_mask
    }

    /// Number of hardware threads.
    pub fn threads(&self) -> usize {
        self.ghr.len()
    }

    /// Accumulated prediction statistics.
    pub const fn stats(&self) -> &PredictorStats {
        &self.stats
    }

    fn check_thread(&self, tid: ThreadId) -> ThreadId {
        assert!(
            tid < self.ghr.len(),
            "thread {tid} out of range ({} threads configured)",
            self.ghr.len()
        );
        tid
    }

    /// Shifts `taken` into the history register of `tid`.
    fn update_global_hist(&mut self, tid: ThreadId, taken: bool) {
        let ghr = &mut self.ghr[tid];
        *ghr = ((*ghr << 1) | u64::from(taken)) & self.history_mask;
        trace!(tid, taken, ghr = *ghr, "history updated");
    }
}

impl BranchPredictor for GSelectPredictor {
    /// Predicts branch direction from the counter's top bit.
    ///
    /// The returned token holds the history from before the speculative shift.
    fn predict(&mut self, tid: ThreadId, pc: u64) -> (bool, BpHistory) {
        let tid = self.check_thread(tid);
        let global_history = self.ghr[tid];
        let idx = self.index(pc, global_history);
        let taken = self.counters[idx].is_taken();

        self.stats.lookups += 1;
        if taken {
            self.stats.predicted_taken += 1;
        }
        trace!(tid, pc, idx, taken, "predict");

        self.update_global_hist(tid, taken);
        (taken, BpHistory::conditional(tid, global_history, taken))
    }

    /// Updates the predictor with the actual branch outcome.
    ///
    /// A squashed resolution rebuilds the history from the saved value and the
    /// actual outcome and leaves the counters alone. A committed resolution indexes
    /// with the current history, trains the counter, then shifts the outcome in.
    fn resolve(&mut self, tid: ThreadId, pc: u64, taken: bool, history: BpHistory, squashed: bool) {
        let tid = self.check_thread(tid);
        assert_eq!(
            history.thread(),
            tid,
            "branch history token resolved on the wrong thread"
        );

        if squashed {
            self.ghr[tid] = ((history.saved_history() << 1) | u64::from(taken)) & self.history_mask;
            self.stats.squashed += 1;
            debug!(tid, ghr = self.ghr[tid], "resolve: squashed, history repaired");
            return;
        }

        let idx = self.index(pc, self.ghr[tid]);
        trace!(tid, idx, taken, "resolve: training counter");
        if taken {
            self.counters[idx].increment();
        } else {
            self.counters[idx].decrement();
        }

        self.stats.committed += 1;
        if !history.is_unconditional() {
            self.stats.committed_conditional += 1;
            if history.predicted_taken() != taken {
                self.stats.mispredicted += 1;
            }
        }

        self.update_global_hist(tid, taken);
    }

    /// Restores the history saved when the squashed branch was predicted.
    fn squash(&mut self, tid: ThreadId, history: BpHistory) {
        let tid = self.check_thread(tid);
        assert_eq!(
            history.thread(),
            tid,
            "branch history token squashed on the wrong thread"
        );
        self.ghr[tid] = history.saved_history();
        self.stats.squashed += 1;
        debug!(tid, ghr = self.ghr[tid], "squash: history restored");
    }

    /// Clears the most recent history bit.
    fn force_not_taken(&mut self, tid: ThreadId) {
        let tid = self.check_thread(tid);
        self.ghr[tid] &= self.history_mask & !1;
        self.stats.btb_misses += 1;
        trace!(tid, ghr = self.ghr[tid], "btb miss: forced not taken");
    }

    /// Shifts a taken outcome into the history without reading the table.
    fn unconditional_branch(&mut self, tid: ThreadId, pc: u64) -> BpHistory {
        let tid = self.check_thread(tid);
        let global_history = self.ghr[tid];
        self.stats.unconditional += 1;
        trace!(tid, pc, "unconditional branch");
        self.update_global_hist(tid, true);
        BpHistory::unconditional(tid, global_history)
    }
}
