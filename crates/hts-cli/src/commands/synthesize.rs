//! Prepare and readout command implementations.

use anyhow::Result;
use console::style;
use serde::Serialize;

use hts_synth::Config;

use super::common::{self, TargetArgs};

/// Which direction to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// |0…0⟩ to the state.
    Prepare,
    /// The state to |0…0⟩.
    Readout,
}

#[derive(Serialize)]
struct Report {
    stabilizer: Vec<String>,
    connectivity: String,
    strategy: String,
    basis: String,
    circuit: String,
    two_qubit_count: usize,
    two_qubit_depth: usize,
    depth: usize,
}

/// Execute the prepare or readout command.
pub fn execute(
    mode: Mode,
    paulis: &[String],
    target: &TargetArgs,
    json: bool,
    config: &Config,
) -> Result<()> {
    let stabilizer = common::parse_stabilizer(paulis)?;
    let connectivity = common::connectivity(target, stabilizer.num_qubits() as u32)?;
    let synth = common::synthesizer(target, config)?;

    let seq = match mode {
        Mode::Prepare => synth.preparation(&stabilizer, &connectivity)?,
        Mode::Readout => synth.readout(&stabilizer, &connectivity)?,
    };

    if json {
        let report = Report {
            stabilizer: stabilizer.to_signed_strings(),
            connectivity: connectivity.to_string(),
            strategy: synth.strategy().to_string(),
            basis: synth.basis().to_string(),
            circuit: seq.to_string(),
            two_qubit_count: seq.two_qubit_count(),
            two_qubit_depth: seq.two_qubit_depth(),
            depth: seq.depth(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let what = match mode {
        Mode::Prepare => "Preparation",
        Mode::Readout => "Readout",
    };
    println!(
        "{} {} circuit for {} on {} ({} engine, {})",
        style("✓").green().bold(),
        what,
        style(&stabilizer).green(),
        style(&connectivity).yellow(),
        synth.strategy(),
        synth.basis()
    );
    common::print_sequence(&seq);
    Ok(())
}
