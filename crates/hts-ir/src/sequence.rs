//! Ordered Clifford gate sequences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::gate::CliffordGate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// An ordered list of Clifford instructions over a fixed qubit register.
///
/// This is the output of synthesis and the input of compression. Builder
/// methods validate operands against the register size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSequence {
    /// Register size.
    num_qubits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl GateSequence {
    /// Create an empty sequence on `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            instructions: vec![],
        }
    }

    /// Create a sequence from instructions, validating each one.
    pub fn from_instructions(
        num_qubits: u32,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut seq = Self::new(num_qubits);
        for inst in instructions {
            seq.push(inst)?;
        }
        Ok(seq)
    }

    /// Parse the whitespace-separated text form (`h1 s3 cx0,2`).
    pub fn parse(num_qubits: u32, text: &str) -> IrResult<Self> {
        let instructions = text
            .split_whitespace()
            .map(str::parse::<Instruction>)
            .collect::<IrResult<Vec<_>>>()?;
        Self::from_instructions(num_qubits, instructions)
    }

    /// Append an instruction.
    pub fn push(&mut self, inst: Instruction) -> IrResult<&mut Self> {
        self.check_instruction(&inst)?;
        self.instructions.push(inst);
        Ok(self)
    }

    fn check_instruction(&self, inst: &Instruction) -> IrResult<()> {
        if inst.qubits.len() != inst.gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: inst.gate.name().to_string(),
                expected: inst.gate.num_qubits(),
                got: inst.qubits.len() as u32,
            });
        }
        for (i, &q) in inst.qubits.iter().enumerate() {
            if q.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit: q,
                    num_qubits: self.num_qubits,
                    gate_name: Some(inst.gate.name().to_string()),
                });
            }
            if inst.qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: Some(inst.gate.name().to_string()),
                });
            }
        }
        Ok(())
    }

    /// Apply a gate to the given qubits.
    pub fn gate(
        &mut self,
        gate: CliffordGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction {
            gate,
            qubits: qubits.into_iter().collect(),
        })
    }

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::I, qubit))
    }

    /// Apply X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::X, qubit))
    }

    /// Apply Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::Y, qubit))
    }

    /// Apply Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::Z, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::H, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(CliffordGate::Sdg, qubit))
    }

    /// Apply CX (CNOT) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(CliffordGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(CliffordGate::CZ, q1, q2))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(CliffordGate::Swap, q1, q2))
    }

    /// Register size.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the sequence has no instructions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over the instructions.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Consume the sequence, returning its instructions.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Number of two-qubit instructions.
    pub fn two_qubit_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_two_qubit()).count()
    }

    /// Number of native entangling gates, counting a SWAP as three.
    pub fn native_two_qubit_count(&self) -> usize {
        self.instructions.iter().map(|i| i.gate.native_cost()).sum()
    }

    /// Circuit depth over all instructions.
    pub fn depth(&self) -> usize {
        self.layered_depth(|inst| usize::from(inst.gate != CliffordGate::I))
    }

    /// Depth counting only native entangling layers (a SWAP spans three).
    pub fn two_qubit_depth(&self) -> usize {
        self.layered_depth(|inst| inst.gate.native_cost())
    }

    fn layered_depth(&self, weight: impl Fn(&Instruction) -> usize) -> usize {
        let mut level = vec![0usize; self.num_qubits as usize];
        for inst in &self.instructions {
            let w = weight(inst);
            if w == 0 {
                continue;
            }
            let start = inst.qubits.iter().map(|q| level[q.index()]).max().unwrap_or(0);
            for q in &inst.qubits {
                level[q.index()] = start + w;
            }
        }
        level.into_iter().max().unwrap_or(0)
    }

    /// Unordered qubit pairs touched by two-qubit instructions, in order.
    pub fn two_qubit_pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.instructions.iter().filter_map(Instruction::pair)
    }

    /// The inverse sequence: reversed order, every gate inverted.
    pub fn inverse(&self) -> Self {
        Self {
            num_qubits: self.num_qubits,
            instructions: self.instructions.iter().rev().map(Instruction::inverse).collect(),
        }
    }

    /// Append another sequence on the same register.
    pub fn compose(&mut self, other: &GateSequence) -> IrResult<&mut Self> {
        if other.num_qubits != self.num_qubits {
            return Err(IrError::SizeMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        self.instructions.extend(other.instructions.iter().cloned());
        Ok(self)
    }

    /// Append another sequence whose qubit `i` acts on `qubits[i]` of this one.
    pub fn compose_on(&mut self, other: &GateSequence, qubits: &[QubitId]) -> IrResult<&mut Self> {
        if qubits.len() != other.num_qubits as usize {
            return Err(IrError::SizeMismatch {
                expected: other.num_qubits,
                got: qubits.len() as u32,
            });
        }
        let map: Vec<u32> = qubits.iter().map(|q| q.0).collect();
        for inst in &other.instructions {
            self.push(inst.remapped(&map))?;
        }
        Ok(self)
    }

    /// Relabel qubits: qubit `i` becomes `map[i]`. `map` must be a permutation
    /// of the register.
    pub fn relabeled(&self, map: &[u32]) -> IrResult<Self> {
        if map.len() != self.num_qubits as usize {
            return Err(IrError::SizeMismatch {
                expected: self.num_qubits,
                got: map.len() as u32,
            });
        }
        let mut seen = vec![false; map.len()];
        for &m in map {
            let slot = seen.get_mut(m as usize).ok_or(IrError::QubitNotFound {
                qubit: QubitId(m),
                num_qubits: self.num_qubits,
                gate_name: None,
            })?;
            if *slot {
                return Err(IrError::DuplicateQubit {
                    qubit: QubitId(m),
                    gate_name: None,
                });
            }
            *slot = true;
        }
        Ok(Self {
            num_qubits: self.num_qubits,
            instructions: self.instructions.iter().map(|i| i.remapped(map)).collect(),
        })
    }
}

impl<'a> IntoIterator for &'a GateSequence {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl fmt::Display for GateSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, inst) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{inst}")?;
        }
        Ok(())
    }
}

/// Parses the text form, sizing the register to the largest qubit index used.
impl FromStr for GateSequence {
    type Err = IrError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let instructions = text
            .split_whitespace()
            .map(str::parse::<Instruction>)
            .collect::<IrResult<Vec<_>>>()?;
        let num_qubits = instructions
            .iter()
            .flat_map(|i| i.qubits.iter())
            .map(|q| q.0 + 1)
            .max()
            .unwrap_or(0);
        Self::from_instructions(num_qubits, instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_counts() {
        let mut seq = GateSequence::new(3);
        seq.h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .cz(QubitId(1), QubitId(2))
            .unwrap()
            .swap(QubitId(0), QubitId(2))
            .unwrap();

        assert_eq!(seq.len(), 4);
        assert_eq!(seq.two_qubit_count(), 3);
        assert_eq!(seq.native_two_qubit_count(), 5);
        assert_eq!(seq.depth(), 4);
        assert_eq!(seq.two_qubit_depth(), 5);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut seq = GateSequence::new(2);
        let err = seq.h(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { num_qubits: 2, .. }));
        assert!(seq.is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        let seq = GateSequence::parse(4, "h1 s3 sdg0 cx0,2 cz1,2 swap1,2").unwrap();
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.to_string(), "h1 s3 sdg0 cx0,2 cz1,2 swap1,2");
        assert!(GateSequence::parse(2, "cx0,2").is_err());

        let inferred: GateSequence = "h0 cx0,4".parse().unwrap();
        assert_eq!(inferred.num_qubits(), 5);
    }

    #[test]
    fn test_parallel_two_qubit_depth() {
        let seq = GateSequence::parse(4, "cx0,1 cz2,3 h1 cx1,2").unwrap();
        assert_eq!(seq.two_qubit_depth(), 2);
        assert_eq!(seq.depth(), 3);
    }

    #[test]
    fn test_inverse() {
        let seq = GateSequence::parse(2, "h0 s1 cx0,1 sdg0").unwrap();
        let inv = seq.inverse();
        assert_eq!(inv.to_string(), "s0 cx0,1 sdg1 h0");
        assert_eq!(inv.inverse(), seq);
    }

    #[test]
    fn test_compose_on_subset() {
        let bell = GateSequence::parse(2, "h0 cx0,1").unwrap();
        let mut wide = GateSequence::new(6);
        wide.compose_on(&bell, &[QubitId(3), QubitId(5)]).unwrap();
        assert_eq!(wide.to_string(), "h3 cx3,5");

        let mut small = GateSequence::new(1);
        assert!(small.compose(&bell).is_err());
    }

    #[test]
    fn test_relabeled() {
        let seq = GateSequence::parse(3, "cx0,1 h2").unwrap();
        let relabeled = seq.relabeled(&[2, 0, 1]).unwrap();
        assert_eq!(relabeled.to_string(), "cx2,0 h1");
        assert!(seq.relabeled(&[0, 0, 1]).is_err());
        assert!(seq.relabeled(&[0, 1]).is_err());
    }

    #[test]
    fn test_serde_json() {
        let seq = GateSequence::parse(2, "h0 cx0,1").unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        let back: GateSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
    }
}
