//! Error types for the synthesis crate.

use thiserror::Error;

/// Errors produced by stabilizer synthesis, compression and tomography.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Malformed or algebraically inconsistent generator set.
    #[error("Invalid stabilizer {input}: {reason}")]
    InvalidStabilizer {
        /// The offending input, as given.
        input: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Unknown topology name, or a qubit count outside the catalog.
    #[error("Connectivity '{name}' is not supported for {num_qubits} qubits")]
    UnsupportedConnectivity {
        /// Requested topology name.
        name: String,
        /// Requested qubit count.
        num_qubits: u32,
    },

    /// Qubit count outside the range a generator supports.
    #[error("{num_qubits} qubits are not supported (supported: 1..={max})")]
    UnsupportedQubitCount {
        /// Requested qubit count.
        num_qubits: u32,
        /// Largest supported qubit count.
        max: u32,
    },

    /// The connectivity graph does not connect all required qubits.
    #[error("Connectivity '{name}' does not connect all {num_qubits} qubits")]
    DisconnectedTopology {
        /// Topology name.
        name: String,
        /// Number of qubits that must be connected.
        num_qubits: u32,
    },

    /// A two-qubit instruction acts on a pair that is not an edge.
    #[error("Instruction on qubits ({a}, {b}) is not an edge of '{name}'")]
    ConnectivityViolation {
        /// First qubit.
        a: u32,
        /// Second qubit.
        b: u32,
        /// Topology name.
        name: String,
    },

    /// Unknown two-qubit gate label for basis translation.
    #[error("Unsupported two-qubit basis '{0}' (expected 'cx' or 'cz')")]
    UnsupportedBasis(String),

    /// Measurement counts cannot be evaluated.
    #[error("Invalid measurement counts: {0}")]
    InvalidCounts(String),

    /// Gate sequence error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] hts_ir::IrError),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
