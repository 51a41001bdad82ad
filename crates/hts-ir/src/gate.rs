//! Clifford gate vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// The closed set of Clifford gates understood by the synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliffordGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate, control first.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl CliffordGate {
    /// All gate kinds, single-qubit first.
    pub const ALL: [CliffordGate; 10] = [
        CliffordGate::I,
        CliffordGate::X,
        CliffordGate::Y,
        CliffordGate::Z,
        CliffordGate::H,
        CliffordGate::S,
        CliffordGate::Sdg,
        CliffordGate::CX,
        CliffordGate::CZ,
        CliffordGate::Swap,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            CliffordGate::I => "id",
            CliffordGate::X => "x",
            CliffordGate::Y => "y",
            CliffordGate::Z => "z",
            CliffordGate::H => "h",
            CliffordGate::S => "s",
            CliffordGate::Sdg => "sdg",
            CliffordGate::CX => "cx",
            CliffordGate::CZ => "cz",
            CliffordGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            CliffordGate::I
            | CliffordGate::X
            | CliffordGate::Y
            | CliffordGate::Z
            | CliffordGate::H
            | CliffordGate::S
            | CliffordGate::Sdg => 1,

            CliffordGate::CX | CliffordGate::CZ | CliffordGate::Swap => 2,
        }
    }

    /// Check if this is a two-qubit gate.
    #[inline]
    pub fn is_two_qubit(&self) -> bool {
        self.num_qubits() == 2
    }

    /// The inverse gate. Only S and S-dagger are not self-inverse.
    #[inline]
    pub fn inverse(&self) -> CliffordGate {
        match self {
            CliffordGate::S => CliffordGate::Sdg,
            CliffordGate::Sdg => CliffordGate::S,
            other => *other,
        }
    }

    /// Cost in native entangling gates (CX or CZ); a SWAP costs three.
    #[inline]
    pub fn native_cost(&self) -> usize {
        match self {
            CliffordGate::CX | CliffordGate::CZ => 1,
            CliffordGate::Swap => 3,
            _ => 0,
        }
    }

    /// Whether the gate is unchanged by exchanging its two operands.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        matches!(self, CliffordGate::CZ | CliffordGate::Swap)
    }
}

impl fmt::Display for CliffordGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CliffordGate {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" | "i" => Ok(CliffordGate::I),
            "x" => Ok(CliffordGate::X),
            "y" => Ok(CliffordGate::Y),
            "z" => Ok(CliffordGate::Z),
            "h" => Ok(CliffordGate::H),
            "s" => Ok(CliffordGate::S),
            "sdg" => Ok(CliffordGate::Sdg),
            "cx" | "cnot" => Ok(CliffordGate::CX),
            "cz" => Ok(CliffordGate::CZ),
            "swap" => Ok(CliffordGate::Swap),
            other => Err(IrError::Parse {
                token: other.to_string(),
                reason: "unknown Clifford gate".into(),
            }),
        }
    }
}
