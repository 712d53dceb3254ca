//! Cache Replacement Policies.
//!
//! Implements rank-based victim selection for set-associative caches.
//!
//! # Policies
//!
//! - `LruIpv`: LRU ordering driven by a fixed insertion/promotion vector.

/// LRU insertion/promotion vector replacement policy.
pub mod lru_ipv;

pub use lru_ipv::{LruIpvPolicy, RankArena};

/// Replacement bookkeeping handle for one cache line.
///
/// Created by [`ReplacementPolicy::instantiate`]. The handle does not own any rank
/// state; it names the set whose rank vector it shares and its fixed slot within
/// that set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplData {
    /// Index of the set's rank vector in the policy's arena.
    pub set: usize,
    /// Structural position of the line within its set.
    pub slot: usize,
}

/// Trait for cache replacement policies.
///
/// Defines the interface a cache controller uses to create line records, report
/// fills and hits, and pick eviction victims.
pub trait ReplacementPolicy: Send + Sync {
    /// Creates the replacement record for the next physical line.
    ///
    /// Called once per line while the cache is being built.
    fn instantiate(&mut self) -> ReplData;

    /// Updates the policy state when new data is filled into a line.
    ///
    /// # Arguments
    ///
    /// * `data` - Record of the filled line.
    fn reset(&mut self, data: &ReplData);

    /// Updates the policy state when a line is hit.
    ///
    /// # Arguments
    ///
    /// * `data` - Record of the accessed line.
    fn touch(&mut self, data: &ReplData);

    /// Selects a victim among `candidates`.
    ///
    /// # Returns
    ///
    /// The position in `candidates` of the line to evict.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty.
    fn get_victim(&mut self, candidates: &[ReplData]) -> usize;

    /// Notifies the policy that a line's contents were discarded.
    fn invalidate(&mut self, data: &ReplData);
}
