//! range-sieve - Parallel Prime Scanner
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use range_sieve::config::{CliArgs, SieveConfig};
use range_sieve::pipeline::Coordinator;
use range_sieve::primes;
use range_sieve::progress::{print_header, print_summary, ProgressReporter};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = SieveConfig::from_args(args).context("Invalid configuration")?;

    // Print header
    if config.show_progress {
        print_header(
            config.start,
            config.end,
            config.worker_count,
            config.queue_capacity,
        );
    }

    // Create progress reporter
    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(ref p) = progress {
        p.set_status("Scanning candidates...");
    }

    // Run the scan
    let coordinator = Coordinator::new(
        config.worker_count,
        config.queue_capacity,
        config.stall_timeout,
    );
    let report = coordinator
        .run(primes::classify, config.start..config.end)
        .context("Scan failed")?;

    // Finish progress
    if let Some(ref p) = progress {
        p.finish_and_clear();
    }

    // Order is nondeterministic across workers; sort for display
    let mut found = report.outputs;
    found.sort_unstable();

    print_summary(report.submitted, &found, report.duration);

    if report.workers_panicked > 0 {
        warn!(
            panicked = report.workers_panicked,
            "Scan completed with worker failures"
        );
    }

    info!(
        candidates = report.submitted,
        primes = found.len(),
        "Scan finished"
    );

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("range_sieve=debug,warn")
    } else {
        EnvFilter::new("range_sieve=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
