//! Lc-class command implementation.

use anyhow::Result;
use console::style;

use hts_synth::{graph_form, lc_class};

use super::common;

/// Execute the lc-class command.
pub fn execute(paulis: &[String]) -> Result<()> {
    let stabilizer = common::parse_stabilizer(paulis)?;
    let class = lc_class(&stabilizer)?;
    let form = graph_form(&stabilizer)?;

    println!(
        "{} {} on {} qubits",
        style("✓").green().bold(),
        style(&stabilizer).green(),
        class.num_qubits
    );
    println!("  LC class:          {}", style(class.class).yellow());
    println!("  Representative:    {}", class.representative());
    println!("  Graph form:        {}", form.graph);
    println!("  Local layer:       {}", form.layer);
    println!(
        "  Entangled qubits:  {:?}",
        (0..stabilizer.num_qubits())
            .filter(|&q| stabilizer.is_qubit_entangled(q))
            .collect::<Vec<_>>()
    );
    Ok(())
}
