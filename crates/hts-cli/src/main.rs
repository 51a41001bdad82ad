//! Hardware-Tailored Stabilizer Synthesis command-line interface.
//!
//! The `hts` binary prepares and measures stabilizer states on a chosen
//! connectivity, compresses Clifford circuits and emits tomography circuits.
//!
//! ```text
//! hts prepare XZZ ZXI ZIX -c linear
//! hts compress "h0 cx0,1 cx1,2 cx0,1" -n 3 --basis cz
//! hts tomography -n 3 -c linear --info
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{self, TargetArgs};
use commands::{compress, lc_class, mubs, precompute, synthesize, tomography, topologies, version};

/// hts - connectivity-aware stabilizer state synthesis
#[derive(Parser)]
#[command(name = "hts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ~/.hts/config.yaml)
    #[arg(long, global = true, env = "HTS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a circuit preparing a stabilizer state from |0…0⟩
    Prepare {
        /// Stabilizer generators, e.g. XZZ ZXI ZIX (after `--` when one starts with -)
        #[arg(required = true)]
        paulis: Vec<String>,

        #[command(flatten)]
        target: TargetArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Synthesize a circuit mapping a stabilizer state to |0…0⟩
    Readout {
        /// Stabilizer generators, e.g. XZZ ZXI ZIX (after `--` when one starts with -)
        #[arg(required = true)]
        paulis: Vec<String>,

        #[command(flatten)]
        target: TargetArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compress a Clifford preparation circuit
    Compress {
        /// Circuit in text form, e.g. "h0 cx0,1 cx1,2"
        circuit: String,

        /// Number of qubits
        #[arg(short = 'n', long)]
        num_qubits: u32,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Readout circuits for full-state tomography
    Tomography {
        /// Number of qubits (1-6)
        #[arg(short = 'n', long)]
        num_qubits: usize,

        /// Target connectivity
        #[arg(short, long, default_value = "full")]
        connectivity: String,

        /// Print cost statistics only
        #[arg(long)]
        info: bool,
    },

    /// List mutually unbiased stabilizer bases
    Mubs {
        /// Number of qubits (1-6)
        #[arg(short = 'n', long)]
        num_qubits: usize,
    },

    /// List supported connectivities
    Topologies {
        /// Only show topologies on this many qubits
        #[arg(short = 'n', long)]
        num_qubits: Option<u32>,
    },

    /// Show the local-Clifford class of a stabilizer state
    LcClass {
        /// Stabilizer generators (after `--` when one starts with -)
        #[arg(required = true)]
        paulis: Vec<String>,
    },

    /// Build the distance tables of every catalog topology
    Precompute,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match common::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Prepare {
            paulis,
            target,
            json,
        } => synthesize::execute(synthesize::Mode::Prepare, &paulis, &target, json, &config),

        Commands::Readout {
            paulis,
            target,
            json,
        } => synthesize::execute(synthesize::Mode::Readout, &paulis, &target, json, &config),

        Commands::Compress {
            circuit,
            num_qubits,
            target,
        } => compress::execute(&circuit, num_qubits, &target, &config),

        Commands::Tomography {
            num_qubits,
            connectivity,
            info,
        } => tomography::execute(num_qubits, &connectivity, info, &config),

        Commands::Mubs { num_qubits } => mubs::execute(num_qubits),

        Commands::Topologies { num_qubits } => {
            topologies::execute(num_qubits);
            Ok(())
        }

        Commands::LcClass { paulis } => lc_class::execute(&paulis),

        Commands::Precompute => precompute::execute(),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
