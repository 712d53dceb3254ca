//! Trace Loading Tests.
//!
//! Verifies JSON trace parsing, field defaults, and error reporting for missing
//! or malformed files.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use uarch_core::common::TraceError;
use uarch_core::config::Config;
use uarch_core::sim::trace::{self, AccessEvent, BranchEvent, BranchKind, Trace};

/// Writes `contents` to `name` inside a fresh temporary directory.
fn write_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => panic!("could not create temp dir: {e}"),
    };
    let path = dir.path().join(name);
    if let Err(e) = fs::write(&path, contents) {
        panic!("could not write {}: {e}", path.display());
    }
    (dir, path)
}

fn load(path: &Path) -> Trace {
    match trace::load_trace(path) {
        Ok(trace) => trace,
        Err(e) => panic!("trace did not load: {e}"),
    }
}

#[test]
fn loads_both_streams() {
    let (_dir, path) = write_file(
        "trace.json",
        r#"{
            "branches": [
                { "pc": 4096, "taken": true },
                { "thread": 1, "pc": 4100, "taken": false, "kind": "Unconditional",
                  "squashed": true, "wrong_path": false, "btb_miss": true }
            ],
            "accesses": [
                { "addr": 64 },
                { "addr": 128, "write": true }
            ]
        }"#,
    );

    let trace = load(&path);
    assert_eq!(
        trace.branches,
        vec![
            BranchEvent {
                thread: 0,
                pc: 4096,
                taken: true,
                kind: BranchKind::Conditional,
                squashed: false,
                wrong_path: false,
                btb_miss: false,
            },
            BranchEvent {
                thread: 1,
                pc: 4100,
                taken: false,
                kind: BranchKind::Unconditional,
                squashed: true,
                wrong_path: false,
                btb_miss: true,
            },
        ]
    );
    assert_eq!(
        trace.accesses,
        vec![
            AccessEvent {
                addr: 64,
                write: false,
            },
            AccessEvent {
                addr: 128,
                write: true,
            },
        ]
    );
}

#[test]
fn missing_streams_are_empty() {
    let (_dir, path) = write_file("empty.json", "{}");
    assert_eq!(load(&path), Trace::default());
}

#[test]
fn missing_file_is_io_error() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => panic!("could not create temp dir: {e}"),
    };
    let path = dir.path().join("absent.json");
    match trace::load_trace(&path) {
        Err(TraceError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_parse_error() {
    let (_dir, path) = write_file("bad.json", r#"{ "branches": [ { "pc": "x" } ] }"#);
    let err = match trace::load_trace(&path) {
        Err(e) => e,
        Ok(trace) => panic!("expected parse error, got {trace:?}"),
    };
    assert!(matches!(err, TraceError::Parse { .. }));
    assert!(err.to_string().contains("bad.json"));
}

/// An unknown branch kind is rejected rather than defaulted.
#[test]
fn unknown_kind_is_parse_error() {
    let (_dir, path) = write_file(
        "kind.json",
        r#"{ "branches": [ { "pc": 0, "taken": true, "kind": "Indirect" } ] }"#,
    );
    assert!(matches!(
        trace::load_trace(&path),
        Err(TraceError::Parse { .. })
    ));
}

#[test]
fn load_json_reads_config() {
    let (_dir, path) = write_file(
        "config.json",
        r#"{ "predictor": { "table_size": 512 }, "replacement": { "associativity": 2, "ipv": [0, 0, 1] } }"#,
    );
    let config: Config = match trace::load_json(&path) {
        Ok(config) => config,
        Err(e) => panic!("config did not load: {e}"),
    };
    assert_eq!(config.predictor.table_size, 512);
    assert_eq!(config.replacement.ipv, vec![0, 0, 1]);
}
