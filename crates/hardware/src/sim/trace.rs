//! Trace Events and Loading.
//!
//! This module defines the recorded event streams the replay drivers consume. It provides:
//! 1. **Branch events:** One per branch the host pipeline predicted, with the decisions
//!    the host made for it (wrong path, squashed resolution, BTB miss).
//! 2. **Access events:** One per memory access presented to a cache.
//! 3. **Loading:** JSON file readers for traces and configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::common::{ThreadId, TraceError};

/// Kind of control transfer recorded in a branch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchKind {
    /// Direction predicted from the counter table.
    #[default]
    Conditional,
    /// Always taken; history is updated without a table lookup.
    Unconditional,
}

/// One branch seen by the host pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchEvent {
    /// Hardware thread that fetched the branch.
    #[serde(default)]
    pub thread: ThreadId,
    /// Program counter of the branch.
    pub pc: u64,
    /// Actual outcome.
    pub taken: bool,
    /// Conditional or unconditional transfer.
    #[serde(default)]
    pub kind: BranchKind,
    /// The host resolved the branch as mispredicted and only repaired history.
    #[serde(default)]
    pub squashed: bool,
    /// The branch was fetched down a wrong path and discarded.
    #[serde(default)]
    pub wrong_path: bool,
    /// A taken prediction found no target and fell through.
    #[serde(default)]
    pub btb_miss: bool,
}

/// One memory access presented to a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AccessEvent {
    /// Byte address accessed.
    pub addr: u64,
    /// Whether the access writes the line.
    #[serde(default)]
    pub write: bool,
}

/// A recorded trace; either stream may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Trace {
    /// Branch events in fetch order.
    #[serde(default)]
    pub branches: Vec<BranchEvent>,
    /// Memory accesses in program order.
    #[serde(default)]
    pub accesses: Vec<AccessEvent>,
}

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read and [`TraceError::Parse`]
/// if its contents do not match `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, TraceError> {
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TraceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a trace from a JSON file.
///
/// # Errors
///
/// See [`load_json`].
pub fn load_trace(path: &Path) -> Result<Trace, TraceError> {
    let trace: Trace = load_json(path)?;
    debug!(
        path = %path.display(),
        branches = trace.branches.len(),
        accesses = trace.accesses.len(),
        "trace loaded"
    );
    Ok(trace)
}
