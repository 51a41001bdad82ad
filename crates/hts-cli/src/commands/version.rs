//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - hardware-tailored stabilizer synthesis",
        style("hts").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  hts-ir     Clifford gate sequences");
    println!("  hts-synth  Synthesis, compression and tomography");
    println!("  hts-cli    Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
