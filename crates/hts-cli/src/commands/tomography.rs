//! Tomography command implementation.

use anyhow::Result;
use console::style;

use hts_synth::mub::{get_mubs, mub_circuits};
use hts_synth::{Config, Connectivity, MubInfo, Synthesizer};

use super::common;

/// Execute the tomography command.
pub fn execute(num_qubits: usize, connectivity: &str, info: bool, config: &Config) -> Result<()> {
    let conn = Connectivity::from(connectivity);
    let synth = Synthesizer::from_config(&config.synthesis);
    let circuits = mub_circuits(num_qubits, &conn, &synth)?;

    if info {
        let MubInfo {
            num_circuits,
            max_two_qubit_count,
            max_two_qubit_depth,
            average_two_qubit_gates,
        } = MubInfo::from_circuits(&circuits);
        println!(
            "{} Tomography of {} qubits on {}",
            style("✓").green().bold(),
            num_qubits,
            style(&conn).yellow()
        );
        println!("  Circuits:                 {num_circuits}");
        println!("  Max two-qubit count:      {max_two_qubit_count}");
        println!("  Max two-qubit depth:      {max_two_qubit_depth}");
        println!("  Average two-qubit gates:  {average_two_qubit_gates:.3}");
        return Ok(());
    }

    let bases = get_mubs(num_qubits)?;
    for (i, (basis, circuit)) in bases.iter().zip(&circuits).enumerate() {
        println!(
            "{} Basis {}: {}",
            style("→").cyan().bold(),
            i,
            style(basis).green()
        );
        common::print_sequence(circuit);
    }
    Ok(())
}
