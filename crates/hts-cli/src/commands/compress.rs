//! Compress command implementation.

use anyhow::{Context, Result};
use console::style;

use hts_ir::GateSequence;
use hts_synth::{Config, compress_with};

use super::common::{self, TargetArgs};

/// Execute the compress command.
pub fn execute(circuit: &str, num_qubits: u32, target: &TargetArgs, config: &Config) -> Result<()> {
    let seq = GateSequence::parse(num_qubits, circuit)
        .with_context(|| format!("Failed to parse circuit '{circuit}'"))?;
    let connectivity = common::connectivity(target, num_qubits)?;
    let synth = common::synthesizer(target, config)?;

    println!(
        "{} Compressing {} qubits onto {} ({}, {})",
        style("→").cyan().bold(),
        num_qubits,
        style(&connectivity).yellow(),
        synth.strategy(),
        synth.basis()
    );
    println!("  Input:");
    common::print_sequence(&seq);

    let out = compress_with(&seq, connectivity, &synth)?;

    println!("{} Compression complete", style("✓").green().bold());
    println!("  {}", style("Equivalent to the input on |0…0⟩ only").dim());
    common::print_sequence(&out);
    Ok(())
}
