//! Trace replay CLI for the uarch prediction structures.
//!
//! This binary provides one entry point per component. It performs:
//! 1. **Branch replay:** Run a recorded branch trace through a GSelect predictor.
//! 2. **Cache replay:** Run a recorded address trace through an LRU-IPV tag array.
//!
//! Both commands take an optional JSON configuration; missing fields use built-in defaults.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use uarch_core::config::Config;
use uarch_core::core::units::cache::TagArray;
use uarch_core::sim::replay::{self, AccessReplaySummary, BranchReplaySummary};
use uarch_core::sim::trace::{self, Trace};
use uarch_core::stats::{PredictorStats, ReplacementStats};
use uarch_core::GSelectPredictor;

#[derive(Parser, Debug)]
#[command(
    name = "uarch",
    author,
    version,
    about = "Replay traces through GSelect and LRU-IPV",
    long_about = "Replay recorded branch or memory access traces through the GSelect branch predictor or the LRU-IPV replacement policy.\n\nExamples:\n  uarch branch --trace traces/loop.json\n  uarch cache --trace traces/stream.json --sets 64 --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay the branch stream of a trace through a GSelect predictor.
    Branch {
        /// Trace file (JSON).
        #[arg(short, long)]
        trace: PathBuf,

        /// Configuration file (JSON); defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Replay the access stream of a trace through an LRU-IPV tag array.
    Cache {
        /// Trace file (JSON).
        #[arg(short, long)]
        trace: PathBuf,

        /// Configuration file (JSON); defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of sets in the tag array.
        #[arg(long, default_value_t = 64)]
        sets: usize,

        /// Line size in bytes.
        #[arg(long, default_value_t = 64)]
        line_bytes: usize,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct BranchReport<'a> {
    replay: &'a BranchReplaySummary,
    predictor: &'a PredictorStats,
}

#[derive(Serialize)]
struct CacheReport<'a> {
    replay: &'a AccessReplaySummary,
    policy: &'a ReplacementStats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Branch {
            trace,
            config,
            json,
        } => cmd_branch(&trace, config.as_deref(), json),
        Commands::Cache {
            trace,
            config,
            sets,
            line_bytes,
            json,
        } => cmd_cache(&trace, config.as_deref(), sets, line_bytes, json),
    }
}

/// Prints `msg` and exits with status 1.
fn fatal(msg: &dyn std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {msg}");
    process::exit(1);
}

/// Loads the configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Config {
    path.map_or_else(Config::default, |p| {
        trace::load_json(p).unwrap_or_else(|e| fatal(&e))
    })
}

fn load_trace(path: &Path) -> Trace {
    trace::load_trace(path).unwrap_or_else(|e| fatal(&e))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => fatal(&e),
    }
}

/// Runs the branch replay and prints the predictor statistics.
fn cmd_branch(trace_path: &Path, config_path: Option<&Path>, json: bool) {
    let config = load_config(config_path);
    let trace = load_trace(trace_path);
    let mut bp = GSelectPredictor::new(&config.predictor).unwrap_or_else(|e| fatal(&e));

    let summary = replay::replay_branches(&mut bp, &trace.branches);

    if json {
        print_json(&BranchReport {
            replay: &summary,
            predictor: bp.stats(),
        });
        return;
    }

    println!(
        "GSelect: {} entries, {} PC bits + {} history bits, {} thread(s)",
        bp.table_size(),
        bp.pc_bits(),
        bp.history_bits(),
        bp.threads()
    );
    println!(
        "Replayed {} branches ({} wrong-path, {} squashed)",
        summary.events, summary.wrong_path, summary.squashed
    );
    println!("Trace accuracy: {:.2}%", summary.accuracy() * 100.0);
    println!();
    bp.stats().print();
}

/// Runs the access replay and prints the replacement statistics.
fn cmd_cache(
    trace_path: &Path,
    config_path: Option<&Path>,
    sets: usize,
    line_bytes: usize,
    json: bool,
) {
    let config = load_config(config_path);
    let trace = load_trace(trace_path);
    let mut tags =
        TagArray::new(sets, line_bytes, &config.replacement).unwrap_or_else(|e| fatal(&e));

    let summary = replay::replay_accesses(&mut tags, &trace.accesses);

    if json {
        print_json(&CacheReport {
            replay: &summary,
            policy: tags.policy().stats(),
        });
        return;
    }

    println!(
        "LRU-IPV: {} sets x {} ways, insertion rank {}",
        tags.num_sets(),
        tags.ways(),
        tags.policy().insertion_rank()
    );
    println!(
        "Replayed {} accesses: {} hits, {} fills, {} evictions ({} writebacks)",
        summary.accesses, summary.hits, summary.fills, summary.evictions, summary.writebacks
    );
    println!("Hit rate: {:.2}%", summary.hit_rate() * 100.0);
    println!();
    tags.policy().stats().print();
}
