//! LRU Insertion/Promotion Vector (LRU-IPV) Replacement Policy.
//!
//! Each set keeps one rank per line. The line holding the highest rank is the next
//! victim. Instead of moving a hit line to the MRU position, the policy moves it to
//! the rank named by a fixed insertion/promotion vector (IPV) for its slot, and a
//! filled line enters at the IPV's insertion rank. Whenever a line moves, the lines
//! it passes are shifted by one so that ranks in a set stay pairwise distinct.
//!
//! Ranks of all sets live in a [`RankArena`] owned by the policy; line records only
//! carry a set index and a slot.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `reset()`: O(W) where W is the associativity
//!   - `get_victim()`: O(C) where C is the number of candidates
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Hardware Cost:** High - per-way rank comparators and incrementers
//! - **Best Case:** Workloads where the IPV keeps reused lines below the insertion rank
//! - **Worst Case:** Access orders the IPV was not tuned for

use tracing::{debug, trace};

use super::{ReplData, ReplacementPolicy};
use crate::common::ConfigError;
use crate::common::constants::{DEFAULT_ASSOCIATIVITY, DEFAULT_IPV};
use crate::config::IpvConfig;
use crate::stats::ReplacementStats;

/// Storage for the rank vectors of every set.
///
/// Ranks are kept flat, `associativity` entries per set. `None` marks a line that
/// has never been filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankArena {
    associativity: usize,
    ranks: Vec<Option<u32>>,
}

impl RankArena {
    /// Creates an empty arena for sets of `associativity` lines.
    pub const fn new(associativity: usize) -> Self {
        Self {
            associativity,
            ranks: Vec::new(),
        }
    }

    /// Appends a set with every line unfilled and returns its index.
    pub fn push_set(&mut self) -> usize {
        let set = self.sets();
        self.ranks
            .extend(std::iter::repeat_n(None, self.associativity));
        set
    }

    /// Number of allocated sets.
    pub fn sets(&self) -> usize {
        self.ranks.len() / self.associativity
    }

    /// Rank vector of `set`.
    ///
    /// # Panics
    ///
    /// Panics if `set` has not been allocated.
    pub fn set(&self, set: usize) -> &[Option<u32>] {
        let base = set * self.associativity;
        &self.ranks[base..base + self.associativity]
    }

    /// Mutable rank vector of `set`.
    ///
    /// # Panics
    ///
    /// Panics if `set` has not been allocated.
    pub fn set_mut(&mut self, set: usize) -> &mut [Option<u32>] {
        let base = set * self.associativity;
        &mut self.ranks[base..base + self.associativity]
    }
}

/// LRU-IPV Policy state.
#[derive(Debug, Clone)]
pub struct LruIpvPolicy {
    /// Promotion target per slot, followed by the insertion rank.
    ipv: Vec<u32>,
    associativity: usize,
    /// Line records handed out so far.
    created: usize,
    arena: RankArena,
    stats: ReplacementStats,
}

impl Default for LruIpvPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl LruIpvPolicy {
    /// Creates a policy with 16-way sets and the default IPV.
    pub fn new() -> Self {
        Self {
            ipv: DEFAULT_IPV.to_vec(),
            associativity: DEFAULT_ASSOCIATIVITY,
            created: 0,
            arena: RankArena::new(DEFAULT_ASSOCIATIVITY),
            stats: ReplacementStats::default(),
        }
    }

    /// Creates a policy from a custom associativity and IPV.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the associativity is zero, the IPV does not have
    /// `associativity + 1` entries, or an entry is not below the associativity.
    pub fn with_config(config: &IpvConfig) -> Result<Self, ConfigError> {
        if config.associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        let expected = config.associativity + 1;
        if config.ipv.len() != expected {
            return Err(ConfigError::IpvLength {
                len: config.ipv.len(),
                expected,
            });
        }
        if let Some((index, &rank)) = config
            .ipv
            .iter()
            .enumerate()
            .find(|&(_, &rank)| rank as usize >= config.associativity)
        {
            return Err(ConfigError::IpvRank {
                index,
                rank,
                associativity: config.associativity,
            });
        }

        debug!(associativity = config.associativity, ipv = ?config.ipv, "building lru-ipv policy");
        Ok(Self {
            ipv: config.ipv.clone(),
            associativity: config.associativity,
            created: 0,
            arena: RankArena::new(config.associativity),
            stats: ReplacementStats::default(),
        })
    }

    /// Number of lines per set.
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Rank given to freshly filled lines.
    pub fn insertion_rank(&self) -> u32 {
        self.ipv[self.associativity]
    }

    /// Promotion target for hits on `slot`.
    pub fn promotion_rank(&self, slot: usize) -> u32 {
        self.ipv[slot]
    }

    /// Current rank of a line, `None` if it was never filled.
    pub fn rank(&self, data: &ReplData) -> Option<u32> {
        self.arena.set(data.set)[data.slot]
    }

    /// Rank vector of `set`.
    pub fn ranks(&self, set: usize) -> &[Option<u32>] {
        self.arena.set(set)
    }

    /// Number of sets allocated so far.
    pub fn sets(&self) -> usize {
        self.arena.sets()
    }

    /// Accumulated replacement statistics.
    pub const fn stats(&self) -> &ReplacementStats {
        &self.stats
    }
}

impl ReplacementPolicy for LruIpvPolicy {
    /// Assigns the next slot; every `associativity` lines share a new rank vector.
    fn instantiate(&mut self) -> ReplData {
        let slot = self.created % self.associativity;
        if slot == 0 {
            let set = self.arena.push_set();
            debug!(set, "new rank vector");
        }
        let data = ReplData {
            set: self.arena.sets() - 1,
            slot,
        };
        self.created += 1;
        self.stats.instantiated += 1;
        trace!(set = data.set, slot, created = self.created, "instantiate");
        data
    }

    /// Inserts the line at the insertion rank.
    ///
    /// Every other filled line at or above the insertion rank moves up by one.
    fn reset(&mut self, data: &ReplData) {
        let worst = self.insertion_rank();
        let ranks = self.arena.set_mut(data.set);

        for (slot, rank) in ranks.iter_mut().enumerate() {
            if slot == data.slot {
                continue;
            }
            if let Some(r) = rank.as_mut().filter(|r| **r >= worst) {
                *r += 1;
                trace!(slot, rank = *r, "shifted on insert");
            }
        }
        ranks[data.slot] = Some(worst);

        self.stats.resets += 1;
        trace!(set = data.set, slot = data.slot, rank = worst, "reset");
    }

    /// Moves the line to the IPV target for its slot.
    ///
    /// Moving up (to a lower rank) pushes the lines in `[target, old)` up by one.
    /// Moving down pulls the lines in `(old, target]` down by one. A line that was
    /// never filled has no old rank and pushes up everything at or above `target`.
    fn touch(&mut self, data: &ReplData) {
        let target = self.promotion_rank(data.slot);
        let ranks = self.arena.set_mut(data.set);
        let old = ranks[data.slot];

        for (slot, rank) in ranks.iter_mut().enumerate() {
            if slot == data.slot {
                continue;
            }
            let Some(r) = rank.as_mut() else { continue };
            let current = *r;
            match old {
                Some(old) if target < old && (target..old).contains(&current) => *r += 1,
                Some(old) if target > old && (old + 1..=target).contains(&current) => *r -= 1,
                None if current >= target => *r += 1,
                _ => {}
            }
        }
        ranks[data.slot] = Some(target);

        self.stats.touches += 1;
        match old {
            Some(old) if target < old => self.stats.promotions += 1,
            Some(old) if target > old => self.stats.demotions += 1,
            _ => {}
        }
        trace!(set = data.set, slot = data.slot, ?old, target, "touch");
    }

    /// Returns the candidate holding the highest rank; the first one wins ties.
    ///
    /// Unfilled lines rank below every filled line.
    fn get_victim(&mut self, candidates: &[ReplData]) -> usize {
        assert!(
            !candidates.is_empty(),
            "there must be at least one replacement candidate"
        );

        let mut victim = 0;
        let mut max_rank = self.rank(&candidates[0]);
        for (i, candidate) in candidates.iter().enumerate().skip(1) {
            let rank = self.rank(candidate);
            if rank > max_rank {
                victim = i;
                max_rank = rank;
            }
        }

        self.stats.victims += 1;
        debug!(victim, rank = ?max_rank, "victim selected");
        victim
    }

    /// Nothing to do: the victim is re-ranked by the `reset` that follows its refill.
    fn invalidate(&mut self, data: &ReplData) {
        self.stats.invalidations += 1;
        trace!(set = data.set, slot = data.slot, "invalidate");
    }
}
