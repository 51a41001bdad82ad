//! Hardware-Tailored Stabilizer Synthesis
//!
//! This crate builds Clifford circuits that prepare or measure stabilizer
//! states using only the two-qubit interactions a device offers. It also
//! compresses existing Clifford preparation circuits and generates optimized
//! measurement circuits for full-state tomography.
//!
//! # Overview
//!
//! A stabilizer state is given as `n` commuting Pauli strings. Synthesis
//! produces a [`GateSequence`](hts_ir::GateSequence):
//! 1. **Resolution**: the connectivity name (or custom graph) is resolved
//!    against the [`catalog`]
//! 2. **Synthesis**: the exact engine walks a precomputed distance table over
//!    local-Clifford classes; the elimination engine handles everything else
//! 3. **Post-processing**: a [`PassManager`] translates to the native two-qubit
//!    gate, cancels inverse pairs and verifies connectivity
//!
//! # Architecture
//!
//! ```text
//! Stabilizer ──► Target (catalog entry + relabeling, or custom topology)
//!                     │
//!                     ├── exact::readout        (catalog graphs)
//!                     └── elimination::readout  (any connected graph)
//!                     │
//!                     ▼
//!               PassManager ◄── PropertySet (topology, two-qubit basis)
//!                     │
//!                     ├── BasisTranslation
//!                     ├── CancelInverses
//!                     └── ConnectivityCheck
//!                     │
//!                     ▼
//!              readout circuit ──inverse──► preparation circuit
//! ```
//!
//! # Example: Preparing a Graph State on a Line
//!
//! ```rust
//! use hts_synth::{get_preparation_circuit, Stabilizer};
//!
//! let star = Stabilizer::from_strings(&["XZZ", "ZXI", "ZIX"]).unwrap();
//! let prep = get_preparation_circuit(&star, "linear").unwrap();
//!
//! assert!(prep.two_qubit_count() <= 2);
//! assert!(Stabilizer::from_circuit(&prep).is_equivalent(&star));
//! ```
//!
//! # Example: Tomography Circuits
//!
//! ```rust
//! use hts_synth::{get_mub_info, get_tomography_circuits};
//!
//! let circuits = get_tomography_circuits(3, "linear").unwrap();
//! assert_eq!(circuits.len(), 9);
//!
//! let info = get_mub_info(3, "linear").unwrap();
//! assert_eq!(info.num_circuits, 9);
//! ```
//!
//! # Connectivities
//!
//! | Name | Qubits |
//! |------|--------|
//! | `full` (alias `all`) | 1–6 |
//! | `linear` | 3–6 |
//! | `star` | 4–6 |
//! | `cycle` | 4–5 |
//! | `T` | 5 |
//! | `Q` | 5–6 |
//! | `ladder`, `E`, `H` | 6 |
//!
//! Custom graphs are accepted as [`Topology`] values; when one is isomorphic
//! to a catalog entry the exact engine is used.

pub mod canonical;
pub mod catalog;
pub mod compress;
pub mod config;
pub mod error;
pub mod f2;
pub mod graph;
pub mod manager;
pub mod mub;
pub mod pass;
pub mod passes;
pub mod pauli;
pub mod property;
pub mod stabilizer;
pub mod synthesis;
pub mod tableau;
pub mod tomography;
pub mod topology;

pub use canonical::{graph_form, lc_class, GraphForm, LcClass};
pub use catalog::{
    available_connectivities, catalog, get_connectivity_graph, is_connectivity_supported,
    Catalog, CatalogEntry,
};
pub use compress::{compress, compress_preparation_circuit, compress_with};
pub use config::{Config, ConfigError, LoggingConfig, SynthesisConfig};
pub use error::{SynthError, SynthResult};
pub use graph::Graph;
pub use manager::{PassManager, PassManagerBuilder};
pub use mub::{are_mutually_unbiased, get_mub_circuits, get_mub_info, get_mubs, MubInfo};
pub use pass::{Pass, PassKind};
pub use passes::{CompressionStats, TwoQubitBasis};
pub use pauli::{Pauli, PauliString};
pub use property::PropertySet;
pub use stabilizer::Stabilizer;
pub use synthesis::{
    get_preparation_circuit, get_readout_circuit, Connectivity, Strategy, Synthesizer,
};
pub use tableau::CliffordTableau;
pub use tomography::{
    full_state_tomography_circuits, get_tomography_circuits, stabilizer_measurement_circuit,
    MeasurementCircuit, MeasurementFitter, ReadoutInfo, TomographyFitter,
};
pub use topology::Topology;
