//! Cache timing model CLI.
//!
//! This binary drives the cache controller from recorded traces. It performs:
//! 1. **Trace replay:** Runs a JSON access trace through the cycle-stepped scheduler and prints statistics.
//! 2. **Config check:** Validates a cache configuration and prints the derived geometry.

use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hwcache_core::config::SimConfig;
use hwcache_core::sim::{Simulator, parse_trace};

#[derive(Parser, Debug)]
#[command(
    name = "hwcache",
    author,
    version,
    about = "Cycle-stepped cache timing model",
    long_about = "Replay memory access traces through a set-associative LRU cache model and its control register state machine.\n\nExamples:\n  hwcache run trace.json\n  hwcache run trace.json --config cache.json --json\n  hwcache check cache.json"
)]
struct Cli {
    /// Log state transitions (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON trace and print the cache statistics.
    Run {
        /// Trace file (JSON array of events).
        trace: String,

        /// Simulator configuration (JSON). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Print the run summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration file and print the derived geometry.
    Check {
        /// Simulator configuration (JSON).
        config: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            trace,
            config,
            json,
        } => cmd_run(&trace, config.as_deref(), json),
        Commands::Check { config } => cmd_check(&config),
    }
}

/// Installs the fmt subscriber; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a file or exits with status 1.
fn read_or_exit(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: Could not read file '{path}': {e}");
        process::exit(1);
    })
}

/// Parses an optional configuration file, falling back to defaults.
fn load_config(path: Option<&str>) -> SimConfig {
    let Some(path) = path else {
        return SimConfig::default();
    };
    serde_json::from_str(&read_or_exit(path)).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: Invalid configuration '{path}': {e}");
        process::exit(1);
    })
}

/// Replays `trace_path` and prints the summary.
fn cmd_run(trace_path: &str, config_path: Option<&str>, json: bool) {
    let config = load_config(config_path);
    let events = parse_trace(&read_or_exit(trace_path)).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: Invalid trace '{trace_path}': {e}");
        process::exit(1);
    });

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });
    info!(events = events.len(), trace = trace_path, "replaying trace");

    let summary = sim.run(&events).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("[!] FATAL: Could not encode summary: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!("sim_cycles               {}", summary.cycles);
    println!("sim_stalls               {}", summary.stall_cycles);
    println!("sim_events               {}", summary.events);
    println!("sim_time_ns              {}", summary.sim_time_ns);
    println!("irqs_raised              {}", summary.irqs_raised);
    println!("cache_state              {:?}", summary.state);
    println!("cache_ccr                {:#04x}", summary.ccr);
    println!("----------------------------------------------------------");
    summary.cache.print();
}

/// Validates a configuration and prints its geometry.
fn cmd_check(config_path: &str) {
    let config = load_config(Some(config_path));
    match config.cache.validate() {
        Ok(geometry) => {
            println!(
                "lines={} line_bytes={} ({} offset bits) ways={} sets={} policy=LRU",
                geometry.lines,
                geometry.line_bytes,
                geometry.offset_bits,
                geometry.ways,
                geometry.sets
            );
        }
        Err(e) => {
            eprintln!("[!] Invalid cache geometry: {e}");
            process::exit(1);
        }
    }
}
