//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use hts_ir::GateSequence;
use hts_synth::{Config, Connectivity, Stabilizer, Synthesizer, Topology};

/// Connectivity and synthesis overrides shared by `prepare`, `readout` and
/// `compress`.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Catalog connectivity (full, linear, star, cycle, T, Q, ladder, E, H)
    #[arg(short, long, default_value = "full")]
    pub connectivity: String,

    /// Custom coupling graph as an edge list, e.g. "0-1,1-2,2-3"
    #[arg(long, conflicts_with = "connectivity")]
    pub edges: Option<String>,

    /// Synthesis engine (exact, elimination); overrides the config file
    #[arg(long)]
    pub strategy: Option<String>,

    /// Two-qubit gate (cx, cz); overrides the config file
    #[arg(long)]
    pub basis: Option<String>,
}

/// Return the default configuration file (~/.hts/config.yaml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".hts").join("config.yaml"))
}

/// Load the configuration from `path`, or from the default location when it
/// exists, then apply `HTS_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let default = default_config_path().filter(|p| p.exists());
    let path = path.or(default.as_deref());
    let config = Config::load(path).with_context(|| match path {
        Some(p) => format!("Failed to load configuration from {}", p.display()),
        None => "Failed to load configuration".to_string(),
    })?;
    tracing::debug!(?path, ?config, "configuration loaded");
    Ok(config)
}

/// Parse stabilizer generators from the command line.
pub fn parse_stabilizer(paulis: &[String]) -> Result<Stabilizer> {
    Ok(Stabilizer::from_strings(paulis)?)
}

/// Parse an edge list such as `0-1,1-2`.
pub fn parse_edges(text: &str) -> Result<Vec<(u32, u32)>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (a, b) = pair
                .split_once('-')
                .with_context(|| format!("Invalid edge '{pair}', expected 'a-b'"))?;
            let a = a.trim().parse().with_context(|| format!("Invalid qubit in '{pair}'"))?;
            let b = b.trim().parse().with_context(|| format!("Invalid qubit in '{pair}'"))?;
            Ok((a, b))
        })
        .collect()
}

/// Resolve the target connectivity for an `n`-qubit state.
pub fn connectivity(target: &TargetArgs, num_qubits: u32) -> Result<Connectivity> {
    match &target.edges {
        Some(edges) => {
            let topology = Topology::from_edges("custom", num_qubits, parse_edges(edges)?)?;
            Ok(Connectivity::from(topology))
        }
        None => Ok(Connectivity::from(target.connectivity.as_str())),
    }
}

/// Build a synthesizer from the configuration plus command-line overrides.
pub fn synthesizer(target: &TargetArgs, config: &Config) -> Result<Synthesizer> {
    let mut synth = Synthesizer::from_config(&config.synthesis);
    if let Some(strategy) = &target.strategy {
        synth = synth.with_strategy(strategy.parse().map_err(anyhow::Error::msg)?);
    }
    if let Some(basis) = &target.basis {
        synth = synth.with_basis(basis.parse()?);
    }
    Ok(synth)
}

/// Print a gate sequence with its cost summary.
pub fn print_sequence(seq: &GateSequence) {
    if seq.is_empty() {
        println!("  {}", style("(empty circuit)").dim());
    } else {
        println!("  {}", seq);
    }
    println!(
        "  Two-qubit gates: {}, two-qubit depth: {}, depth: {}",
        style(seq.two_qubit_count()).yellow(),
        seq.two_qubit_depth(),
        seq.depth()
    );
}
