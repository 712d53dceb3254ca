//! Set-Associative Tag Array.
//!
//! This module implements a timing-free set-associative tag store used to replay
//! address traces against a replacement policy. It tracks tags, validity and dirty
//! bits, asks the policy for victims, and reports fills, hits and evictions. Hit
//! latency and memory timing belong to the host simulator and are not modeled.

/// Cache replacement policy implementations (LRU-IPV).
pub mod policies;

use tracing::trace;

use self::policies::{LruIpvPolicy, ReplData, ReplacementPolicy};
use crate::common::ConfigError;
use crate::config::IpvConfig;

/// Cache line entry containing tag, validity, dirty bit and its replacement record.
#[derive(Clone, Copy, Debug)]
struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
    repl: ReplData,
}

/// Result of a single tag array access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The line was present in `way`.
    Hit {
        /// Way that matched.
        way: usize,
    },
    /// The line was missing and filled into an empty `way`.
    Fill {
        /// Way that was filled.
        way: usize,
    },
    /// The line was missing and replaced a valid line in `way`.
    Evict {
        /// Way that was replaced.
        way: usize,
        /// Tag of the evicted line.
        victim_tag: u64,
        /// Whether the evicted line was dirty.
        writeback: bool,
    },
}

impl AccessOutcome {
    /// Whether the access hit.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Way that was hit or filled.
    pub const fn way(self) -> usize {
        match self {
            Self::Hit { way } | Self::Fill { way } | Self::Evict { way, .. } => way,
        }
    }
}

/// Set-associative tag array whose sets are ranked by an LRU-IPV policy.
#[derive(Debug, Clone)]
pub struct TagArray {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    policy: LruIpvPolicy,
}

impl TagArray {
    /// Creates a tag array of `num_sets` sets with the associativity of `config`.
    ///
    /// Zero set counts and line sizes fall back to one set and 64-byte lines.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is not a valid LRU-IPV configuration.
    pub fn new(num_sets: usize, line_bytes: usize, config: &IpvConfig) -> Result<Self, ConfigError> {
        let mut policy = LruIpvPolicy::with_config(config)?;
        let safe_sets = if num_sets == 0 { 1 } else { num_sets };
        let safe_line = if line_bytes == 0 { 64 } else { line_bytes };
        let ways = policy.associativity();

        let lines = (0..safe_sets * ways)
            .map(|_| CacheLine {
                tag: 0,
                valid: false,
                dirty: false,
                repl: policy.instantiate(),
            })
            .collect();

        Ok(Self {
            lines,
            num_sets: safe_sets,
            ways,
            line_bytes: safe_line,
            policy,
        })
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Lines per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Replacement policy backing the sets.
    pub const fn policy(&self) -> &LruIpvPolicy {
        &self.policy
    }

    /// Splits an address into its set index and tag.
    fn locate(&self, addr: u64) -> (usize, u64) {
        let line_addr = addr / self.line_bytes as u64;
        let set_index = (line_addr % self.num_sets as u64) as usize;
        let tag = line_addr / self.num_sets as u64;
        (set_index, tag)
    }

    /// Checks if the tag array holds the line containing `addr`.
    pub fn contains(&self, addr: u64) -> bool {
        let (set_index, tag) = self.locate(addr);
        let base_idx = set_index * self.ways;
        self.lines[base_idx..base_idx + self.ways]
            .iter()
            .any(|line| line.valid && line.tag == tag)
    }

    /// Accesses the line containing `addr`.
    ///
    /// A hit touches the line. A miss fills the first invalid way, or asks the
    /// policy for a victim when the set is full, then resets the filled line.
    pub fn access(&mut self, addr: u64, is_write: bool) -> AccessOutcome {
        let (set_index, tag) = self.locate(addr);
        let base_idx = set_index * self.ways;
        let set = base_idx..base_idx + self.ways;

        if let Some(way) = self.lines[set.clone()]
            .iter()
            .position(|line| line.valid && line.tag == tag)
        {
            let line = &mut self.lines[base_idx + way];
            line.dirty |= is_write;
            self.policy.touch(&line.repl);
            trace!(addr, set = set_index, way, "hit");
            return AccessOutcome::Hit { way };
        }

        let outcome = if let Some(way) = self.lines[set.clone()].iter().position(|line| !line.valid) {
            AccessOutcome::Fill { way }
        } else {
            let candidates: Vec<ReplData> = self.lines[set].iter().map(|line| line.repl).collect();
            let way = self.policy.get_victim(&candidates);
            let victim = self.lines[base_idx + way];
            self.policy.invalidate(&victim.repl);
            AccessOutcome::Evict {
                way,
                victim_tag: victim.tag,
                writeback: victim.dirty,
            }
        };

        let way = outcome.way();
        let line = &mut self.lines[base_idx + way];
        line.tag = tag;
        line.valid = true;
        line.dirty = is_write;
        self.policy.reset(&line.repl);
        trace!(addr, set = set_index, way, ?outcome, "miss");

        outcome
    }

    /// Invalidates every line, returning the number of dirty lines dropped.
    pub fn flush(&mut self) -> usize {
        let mut dirty = 0;
        for line in self.lines.iter_mut().filter(|line| line.valid) {
            if line.dirty {
                dirty += 1;
            }
            line.valid = false;
            line.dirty = false;
            self.policy.invalidate(&line.repl);
        }
        dirty
    }
}
