//! Precompute command implementation.

use std::time::Instant;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use hts_synth::catalog;

/// Execute the precompute command.
pub fn execute() -> Result<()> {
    let start = Instant::now();
    let entries = catalog().entries();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut classes = 0;
    for entry in entries {
        spinner.set_message(format!(
            "Building distance table for {} ({} qubits)...",
            entry.name(),
            entry.num_qubits()
        ));
        classes += entry.distances()?.len();
    }
    spinner.finish_and_clear();

    println!(
        "{} Built {} distance tables ({} classes) in {:.2?}",
        style("✓").green().bold(),
        entries.len(),
        classes,
        start.elapsed()
    );
    Ok(())
}
