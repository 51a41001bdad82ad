//! Mubs command implementation.

use anyhow::Result;
use console::style;

use hts_synth::mub::get_mub_strings;

/// Execute the mubs command.
pub fn execute(num_qubits: usize) -> Result<()> {
    let bases = get_mub_strings(num_qubits)?;
    println!(
        "{} {} mutually unbiased bases on {} qubits",
        style("✓").green().bold(),
        bases.len(),
        num_qubits
    );
    for (i, basis) in bases.iter().enumerate() {
        println!("  {:>3}: {}", i, style(basis.join(" ")).cyan());
    }
    Ok(())
}
