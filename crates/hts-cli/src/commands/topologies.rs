//! Topologies command implementation.

use console::style;

use hts_synth::catalog;

/// Execute the topologies command.
pub fn execute(num_qubits: Option<u32>) {
    println!("{}", style("Supported connectivities:").bold());
    for entry in catalog().entries() {
        if num_qubits.is_some_and(|n| n != entry.num_qubits()) {
            continue;
        }
        let edges: Vec<String> = entry
            .topology()
            .edges()
            .iter()
            .map(|(a, b)| format!("{a}-{b}"))
            .collect();
        let table = if entry.is_precomputed() {
            style("precomputed").green()
        } else {
            style("lazy").dim()
        };
        println!(
            "  {:>2} qubits  {:<8} {:<11} {}",
            entry.num_qubits(),
            style(entry.name()).cyan(),
            table,
            edges.join(",")
        );
    }
    println!();
    println!(
        "  '{}' is accepted as an alias for 'full'.",
        hts_synth::catalog::FULL_ALIAS
    );
}
