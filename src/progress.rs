//! Progress reporting for the prime scanner
//!
//! Provides a spinner while a run is in flight and styled header/summary
//! output around it.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter that displays run status
pub struct ProgressReporter {
    /// Progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Join a slice of primes for display
fn format_primes(primes: &[u64]) -> String {
    primes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print a header at the start of the scan
pub fn print_header(start: u64, end: u64, workers: usize, queue_capacity: Option<usize>) {
    println!();
    println!(
        "{} {}",
        style("range-sieve").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} [{}, {})",
        style("Range:").bold(),
        format_number(start),
        format_number(end)
    );
    println!(
        "  {} {}",
        style("Candidates:").bold(),
        format_number(end - start)
    );
    println!("  {} {}", style("Workers:").bold(), workers);
    match queue_capacity {
        Some(capacity) => println!(
            "  {} {}",
            style("Queue:").bold(),
            format_number(capacity as u64)
        ),
        None => println!("  {} unbounded", style("Queue:").bold()),
    }
    println!();
}

/// Print a summary of the scan results
///
/// `primes` must be sorted; the summary shows the lowest and highest few.
pub fn print_summary(candidates: u64, primes: &[u64], duration: Duration) {
    let duration_secs = duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        candidates as f64 / duration_secs
    } else {
        0.0
    };

    const SAMPLE: usize = 5;

    println!();
    println!("{}", style("Scan Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Candidates:").bold(),
        format_number(candidates)
    );
    println!(
        "  {} {}",
        style("Primes found:").bold(),
        format_number(primes.len() as u64)
    );
    println!(
        "  {} {:.2}s ({:.0} candidates/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    if primes.len() > 2 * SAMPLE {
        println!(
            "  {} {}",
            style("Lowest:").bold(),
            format_primes(&primes[..SAMPLE])
        );
        println!(
            "  {} {}",
            style("Highest:").bold(),
            format_primes(&primes[primes.len() - SAMPLE..])
        );
    } else if !primes.is_empty() {
        println!("  {} {}", style("Primes:").bold(), format_primes(primes));
    }
    println!();
}
