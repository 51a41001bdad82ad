//! Gate instructions combining a Clifford gate with its operands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::gate::CliffordGate;
use crate::qubit::QubitId;

/// A gate applied to concrete qubits.
///
/// Two-qubit operands are ordered: for CX the first qubit is the control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: CliffordGate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create an instruction, checking arity and operand distinctness.
    pub fn new(gate: CliffordGate, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let qubits: Vec<QubitId> = qubits.into_iter().collect();
        if qubits.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len() as u32,
            });
        }
        if qubits.len() == 2 && qubits[0] == qubits[1] {
            return Err(IrError::DuplicateQubit {
                qubit: qubits[0],
                gate_name: Some(gate.name().to_string()),
            });
        }
        Ok(Self { gate, qubits })
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: CliffordGate, qubit: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![qubit],
        }
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: CliffordGate, q1: QubitId, q2: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![q1, q2],
        }
    }

    /// Check if this is a two-qubit gate instruction.
    #[inline]
    pub fn is_two_qubit(&self) -> bool {
        self.gate.is_two_qubit()
    }

    /// The inverse instruction on the same operands.
    pub fn inverse(&self) -> Self {
        Self {
            gate: self.gate.inverse(),
            qubits: self.qubits.clone(),
        }
    }

    /// The unordered qubit pair of a two-qubit instruction, smaller index first.
    pub fn pair(&self) -> Option<(u32, u32)> {
        match self.qubits.as_slice() {
            [a, b] => Some((a.0.min(b.0), a.0.max(b.0))),
            _ => None,
        }
    }

    /// Relabel operands through `map` (new label of qubit `i` is `map[i]`).
    pub fn remapped(&self, map: &[u32]) -> Self {
        Self {
            gate: self.gate,
            qubits: self.qubits.iter().map(|q| QubitId(map[q.index()])).collect(),
        }
    }

    /// Check if both instructions act on the same qubits in the same order.
    pub fn same_operands(&self, other: &Instruction) -> bool {
        self.qubits == other.qubits
            || (self.gate.is_symmetric()
                && self.qubits.len() == 2
                && other.qubits.len() == 2
                && self.qubits[0] == other.qubits[1]
                && self.qubits[1] == other.qubits[0])
    }

    /// Check if the two instructions share at least one qubit.
    pub fn overlaps(&self, other: &Instruction) -> bool {
        self.qubits.iter().any(|q| other.qubits.contains(q))
    }
}

/// Text form: gate name immediately followed by comma-separated qubit indices,
/// e.g. `h1`, `sdg0`, `cx0,2`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gate.name())?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", q.0)?;
        }
        Ok(())
    }
}

impl FromStr for Instruction {
    type Err = IrError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let split = token
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| IrError::Parse {
                token: token.to_string(),
                reason: "missing qubit index".into(),
            })?;
        let (name, operands) = token.split_at(split);
        let gate: CliffordGate = name.parse().map_err(|_| IrError::Parse {
            token: token.to_string(),
            reason: format!("unknown gate '{name}'"),
        })?;

        let qubits = operands
            .split(',')
            .map(|s| {
                s.parse::<u32>().map(QubitId).map_err(|_| IrError::Parse {
                    token: token.to_string(),
                    reason: format!("invalid qubit index '{s}'"),
                })
            })
            .collect::<IrResult<Vec<_>>>()?;

        Instruction::new(gate, qubits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_creation() {
        let inst = Instruction::two_qubit_gate(CliffordGate::CX, QubitId(0), QubitId(2));
        assert!(inst.is_two_qubit());
        assert_eq!(inst.pair(), Some((0, 2)));
        assert_eq!(inst.to_string(), "cx0,2");
    }

    #[test]
    fn test_instruction_arity_checked() {
        let err = Instruction::new(CliffordGate::CZ, [QubitId(1)]).unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { expected: 2, got: 1, .. }));

        let err = Instruction::new(CliffordGate::CX, [QubitId(1), QubitId(1)]).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_instruction_parse() {
        let inst: Instruction = "sdg3".parse().unwrap();
        assert_eq!(inst.gate, CliffordGate::Sdg);
        assert_eq!(inst.qubits, vec![QubitId(3)]);

        let inst: Instruction = "swap1,12".parse().unwrap();
        assert_eq!(inst.gate, CliffordGate::Swap);
        assert_eq!(inst.qubits, vec![QubitId(1), QubitId(12)]);

        assert!("cx0".parse::<Instruction>().is_err());
        assert!("rz0".parse::<Instruction>().is_err());
        assert!("h".parse::<Instruction>().is_err());
        assert!("cx0,x".parse::<Instruction>().is_err());
    }

    #[test]
    fn test_symmetric_operands() {
        let a = Instruction::two_qubit_gate(CliffordGate::CZ, QubitId(0), QubitId(1));
        let b = Instruction::two_qubit_gate(CliffordGate::CZ, QubitId(1), QubitId(0));
        assert!(a.same_operands(&b));

        let c = Instruction::two_qubit_gate(CliffordGate::CX, QubitId(0), QubitId(1));
        let d = Instruction::two_qubit_gate(CliffordGate::CX, QubitId(1), QubitId(0));
        assert!(!c.same_operands(&d));
    }

    #[test]
    fn test_remap() {
        let inst = Instruction::two_qubit_gate(CliffordGate::CX, QubitId(0), QubitId(1));
        let mapped = inst.remapped(&[4, 2]);
        assert_eq!(mapped.qubits, vec![QubitId(4), QubitId(2)]);
    }
}
