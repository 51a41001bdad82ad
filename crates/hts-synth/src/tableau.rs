//! Clifford tableaux: the images of every single-qubit X and Z.

use std::fmt;

use hts_ir::{GateSequence, Instruction};

use crate::pauli::PauliString;

/// A Clifford operation `U` stored as `U X_i U†` and `U Z_i U†` for all `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliffordTableau {
    num_qubits: usize,
    /// Rows `0..n` are X images, rows `n..2n` Z images.
    rows: Vec<PauliString>,
}

impl CliffordTableau {
    /// The identity operation.
    pub fn identity(num_qubits: usize) -> Self {
        let rows = (0..num_qubits)
            .map(|q| PauliString::from_bits(num_qubits, 1 << q, 0, false))
            .chain((0..num_qubits).map(|q| PauliString::from_bits(num_qubits, 0, 1 << q, false)))
            .collect();
        Self { num_qubits, rows }
    }

    /// The operation implemented by a gate sequence.
    pub fn from_sequence(seq: &GateSequence) -> Self {
        let mut tableau = Self::identity(seq.num_qubits() as usize);
        tableau.apply_sequence(seq);
        tableau
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Image of X on `qubit`.
    pub fn x_image(&self, qubit: usize) -> &PauliString {
        &self.rows[qubit]
    }

    /// Image of Z on `qubit`.
    pub fn z_image(&self, qubit: usize) -> &PauliString {
        &self.rows[self.num_qubits + qubit]
    }

    /// Append one gate: the tableau of `U` becomes that of `G U`.
    pub fn apply(&mut self, inst: &Instruction) {
        for row in &mut self.rows {
            row.conjugate_by(inst);
        }
    }

    /// Append every gate of a sequence.
    pub fn apply_sequence(&mut self, seq: &GateSequence) {
        for inst in seq {
            self.apply(inst);
        }
    }

    /// Image `U P U†` of an arbitrary signed Pauli string.
    pub fn conjugate(&self, p: &PauliString) -> PauliString {
        let n = self.num_qubits;
        // Y = iXZ on every qubit where both bits are set.
        let mut exponent = (p.x_bits() & p.z_bits()).count_ones() + 2 * u32::from(p.is_negative());
        let mut acc = PauliString::identity(n);

        for q in 0..n {
            if (p.x_bits() >> q) & 1 == 1 {
                let (r, k) = acc.product(self.x_image(q));
                acc = r;
                exponent += k;
            }
            if (p.z_bits() >> q) & 1 == 1 {
                let (r, k) = acc.product(self.z_image(q));
                acc = r;
                exponent += k;
            }
        }

        debug_assert!(exponent % 2 == 0, "Clifford image must be Hermitian");
        PauliString::from_bits(n, acc.x_bits(), acc.z_bits(), exponent % 4 == 2)
    }

    /// The operation "first `self`, then `other`".
    pub fn then(&self, other: &CliffordTableau) -> CliffordTableau {
        debug_assert_eq!(self.num_qubits, other.num_qubits);
        CliffordTableau {
            num_qubits: self.num_qubits,
            rows: self.rows.iter().map(|row| other.conjugate(row)).collect(),
        }
    }

    /// Whether this is the identity, signs included.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity(self.num_qubits)
    }

    /// Whether both tableaux agree once signs are ignored.
    pub fn equivalent_up_to_signs(&self, other: &CliffordTableau) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| a.unsigned() == b.unsigned())
    }
}

impl fmt::Display for CliffordTableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in 0..self.num_qubits {
            writeln!(f, "X{q} -> {}", self.x_image(q).signed_label())?;
        }
        for q in 0..self.num_qubits {
            writeln!(f, "Z{q} -> {}", self.z_image(q).signed_label())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(n: u32, text: &str) -> GateSequence {
        GateSequence::parse(n, text).unwrap()
    }

    fn p(s: &str) -> PauliString {
        s.parse().unwrap()
    }

    #[test]
    fn test_identity_conjugation() {
        let t = CliffordTableau::identity(3);
        assert!(t.is_identity());
        assert_eq!(t.conjugate(&p("-XYZ")), p("-XYZ"));
    }

    #[test]
    fn test_conjugate_matches_gate_rules() {
        let s = seq(3, "h0 s1 cx0,2 cz1,2 sdg2 swap0,1 y1");
        let t = CliffordTableau::from_sequence(&s);
        for label in ["XII", "IYI", "IIZ", "-XZY", "YYX", "ZZZ"] {
            let mut expected = p(label);
            for inst in &s {
                expected.conjugate_by(inst);
            }
            assert_eq!(t.conjugate(&p(label)), expected, "{label}");
        }
    }

    #[test]
    fn test_sequence_then_inverse_is_identity() {
        let s = seq(3, "h0 s0 cx0,1 h2 cz1,2 sdg1 swap0,2 x1");
        let forward = CliffordTableau::from_sequence(&s);
        let backward = CliffordTableau::from_sequence(&s.inverse());
        assert!(forward.then(&backward).is_identity());
        assert!(backward.then(&forward).is_identity());
    }

    #[test]
    fn test_then_matches_concatenation() {
        let a = seq(2, "h0 cx0,1 s1");
        let b = seq(2, "sdg0 cz0,1 h1 x0");
        let mut ab = a.clone();
        ab.compose(&b).unwrap();
        assert_eq!(
            CliffordTableau::from_sequence(&a).then(&CliffordTableau::from_sequence(&b)),
            CliffordTableau::from_sequence(&ab)
        );
    }

    #[test]
    fn test_signs_distinguish_pauli_gates() {
        let x = CliffordTableau::from_sequence(&seq(1, "x0"));
        assert!(!x.is_identity());
        assert!(x.equivalent_up_to_signs(&CliffordTableau::identity(1)));
        assert_eq!(x.z_image(0), &p("-Z"));
    }
}
