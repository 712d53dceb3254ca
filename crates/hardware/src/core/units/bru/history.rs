//! Speculative history token.
//!
//! A [`BpHistory`] is created when a branch is predicted and captures the thread's
//! global history as it was *before* the speculative update. It is move-only, so
//! the type system guarantees it is handed back to the predictor at most once.

use crate::common::ThreadId;

/// History snapshot for one in-flight branch.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a branch history token must be resolved or squashed"]
pub struct BpHistory {
    thread: ThreadId,
    global_history: u64,
    predicted_taken: bool,
    unconditional: bool,
}

impl BpHistory {
    pub(crate) const fn conditional(thread: ThreadId, global_history: u64, taken: bool) -> Self {
        Self {
            thread,
            global_history,
            predicted_taken: taken,
            unconditional: false,
        }
    }

    pub(crate) const fn unconditional(thread: ThreadId, global_history: u64) -> Self {
        Self {
            thread,
            global_history,
            predicted_taken: true,
            unconditional: true,
        }
    }

    /// Thread that issued the branch.
    pub const fn thread(&self) -> ThreadId {
        self.thread
    }

    /// Global history value before the speculative update.
    pub const fn saved_history(&self) -> u64 {
        self.global_history
    }

    /// Direction the predictor returned for this branch.
    pub const fn predicted_taken(&self) -> bool {
        self.predicted_taken
    }

    /// Whether the token came from an unconditional branch.
    pub const fn is_unconditional(&self) -> bool {
        self.unconditional
    }
}
