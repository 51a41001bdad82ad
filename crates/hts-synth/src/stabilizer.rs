//! Stabilizer groups: `n` independent, commuting, signed Pauli strings.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use hts_ir::{CliffordGate, GateSequence, Instruction, QubitId};

use crate::error::{SynthError, SynthResult};
use crate::f2::{self, XorBasis};
use crate::graph::Graph;
use crate::pauli::{MAX_QUBITS, Pauli, PauliString};

/// Generators of a stabilizer state on `n` qubits.
///
/// Construction validates that there are `n` rows of length `n` that commute
/// pairwise and are independent over GF(2). Transformations return new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stabilizer {
    num_qubits: usize,
    rows: Vec<PauliString>,
}

impl Stabilizer {
    /// Parse generators such as `["XZZ", "-ZXI", "+ZIX"]`.
    ///
    /// The first character of each string is qubit 0.
    pub fn from_strings<S: AsRef<str>>(paulis: &[S]) -> SynthResult<Self> {
        let describe = || {
            let quoted: Vec<String> = paulis.iter().map(|s| format!("\"{}\"", s.as_ref())).collect();
            format!("[{}]", quoted.join(", "))
        };
        let rows = paulis
            .iter()
            .map(|s| s.as_ref().parse::<PauliString>())
            .collect::<SynthResult<Vec<_>>>()
            .map_err(|e| match e {
                SynthError::InvalidStabilizer { reason, .. } => SynthError::InvalidStabilizer {
                    input: describe(),
                    reason,
                },
                other => other,
            })?;
        Self::validated(rows, describe)
    }

    /// Build from already parsed rows, with full validation.
    pub fn from_rows(rows: Vec<PauliString>) -> SynthResult<Self> {
        let describe = {
            let rows = rows.clone();
            move || {
                let labels: Vec<String> = rows.iter().map(|r| format!("\"{r}\"")).collect();
                format!("[{}]", labels.join(", "))
            }
        };
        Self::validated(rows, describe)
    }

    fn validated(rows: Vec<PauliString>, describe: impl Fn() -> String) -> SynthResult<Self> {
        let invalid = |reason: String| SynthError::InvalidStabilizer {
            input: describe(),
            reason,
        };

        let n = rows.len();
        if n == 0 {
            return Err(invalid("no generators".into()));
        }
        if n > MAX_QUBITS {
            return Err(invalid(format!("more than {MAX_QUBITS} generators")));
        }
        if let Some(row) = rows.iter().find(|r| r.num_qubits() != n) {
            return Err(invalid(format!(
                "expected {n} Pauli strings of length {n}, found length {}",
                row.num_qubits()
            )));
        }
        for (i, a) in rows.iter().enumerate() {
            for (j, b) in rows.iter().enumerate().skip(i + 1) {
                if !a.commutes_with(b) {
                    return Err(invalid(format!("generators {i} and {j} do not commute")));
                }
            }
        }
        if f2::rank(rows.iter().map(f2::pack)) != n {
            return Err(invalid("generators are not independent".into()));
        }
        Ok(Self { num_qubits: n, rows })
    }

    /// Rows that are known to be valid.
    pub(crate) fn from_rows_unchecked(rows: Vec<PauliString>) -> Self {
        Self {
            num_qubits: rows.len(),
            rows,
        }
    }

    /// The all-zero state: `Z` on every qubit.
    pub fn zero_state(num_qubits: usize) -> Self {
        Self::from_rows_unchecked(
            (0..num_qubits)
                .map(|q| PauliString::single(num_qubits, q, Pauli::Z))
                .collect(),
        )
    }

    /// The graph state of `graph`: row `v` is `X_v` times `Z` on the
    /// neighbors of `v`.
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.num_vertices();
        Self::from_rows_unchecked(
            (0..n)
                .map(|v| PauliString::from_bits(n, 1 << v, graph.neighbors(v), false))
                .collect(),
        )
    }

    /// The state a Clifford circuit prepares from the all-zero state.
    pub fn from_circuit(seq: &GateSequence) -> Self {
        Self::zero_state(seq.num_qubits() as usize).evolve(seq)
    }

    /// A random stabilizer state: a random graph state dressed with random
    /// single-qubit Cliffords and a random Pauli frame.
    pub fn random<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> Self {
        let mut graph = Graph::new(num_qubits);
        for a in 0..num_qubits {
            for b in (a + 1)..num_qubits {
                if rng.gen_bool(0.5) {
                    graph.add_edge(a, b);
                }
            }
        }
        let mut state = Self::from_graph(&graph);
        for q in 0..num_qubits {
            let qubit = QubitId(q as u32);
            let local: &[CliffordGate] = match rng.gen_range(0..6) {
                0 => &[],
                1 => &[CliffordGate::H],
                2 => &[CliffordGate::S],
                3 => &[CliffordGate::H, CliffordGate::S],
                4 => &[CliffordGate::S, CliffordGate::H],
                _ => &[CliffordGate::H, CliffordGate::S, CliffordGate::H],
            };
            for &gate in local {
                state.apply(&Instruction::single_qubit_gate(gate, qubit));
            }
            for frame in [CliffordGate::X, CliffordGate::Z] {
                if rng.gen_bool(0.5) {
                    state.apply(&Instruction::single_qubit_gate(frame, qubit));
                }
            }
        }
        state
    }

    /// Number of qubits (and of generators).
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The generators.
    pub fn rows(&self) -> &[PauliString] {
        &self.rows
    }

    /// Conjugate every row by one gate in place.
    pub(crate) fn apply(&mut self, inst: &Instruction) {
        for row in &mut self.rows {
            row.conjugate_by(inst);
        }
    }

    /// The state after running `seq` on this one.
    pub fn evolve(&self, seq: &GateSequence) -> Self {
        let mut out = self.clone();
        for inst in seq {
            out.apply(inst);
        }
        out
    }

    /// Generators as strings without signs.
    pub fn to_strings(&self) -> Vec<String> {
        self.rows.iter().map(PauliString::label).collect()
    }

    /// Generators as strings with explicit `+`/`-`.
    pub fn to_signed_strings(&self) -> Vec<String> {
        self.rows.iter().map(PauliString::signed_label).collect()
    }

    /// Reduced row-echelon generators of the same group, signs tracked.
    ///
    /// Two stabilizers describe the same state iff their canonical forms are
    /// equal.
    pub fn canonical_form(&self) -> Stabilizer {
        let n = self.num_qubits;
        let mut rows = self.rows.clone();
        let mut pivot_row = 0;
        // X block first, then Z block, qubit 0 first in each.
        let columns = (0..n).map(|q| (true, q)).chain((0..n).map(|q| (false, q)));
        for (is_x, q) in columns {
            if pivot_row == n {
                break;
            }
            let bit = |r: &PauliString| {
                let mask = if is_x { r.x_bits() } else { r.z_bits() };
                (mask >> q) & 1 == 1
            };
            let Some(found) = (pivot_row..n).find(|&r| bit(&rows[r])) else {
                continue;
            };
            rows.swap(pivot_row, found);
            let pivot = rows[pivot_row];
            for (r, row) in rows.iter_mut().enumerate() {
                if r != pivot_row && bit(row) {
                    *row = row.mul_commuting(&pivot);
                }
            }
            pivot_row += 1;
        }
        Self::from_rows_unchecked(rows)
    }

    /// Whether both generate the same group when signs are ignored.
    pub fn is_equivalent_mod_phase(&self, other: &Stabilizer) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .rows
                .iter()
                .all(|a| other.rows.iter().all(|b| a.commutes_with(b)))
    }

    /// Whether both generate the same group, signs included.
    pub fn is_equivalent(&self, other: &Stabilizer) -> bool {
        if !self.is_equivalent_mod_phase(other) {
            return false;
        }
        let mut basis = XorBasis::new();
        for (i, row) in other.rows.iter().enumerate() {
            basis.insert(f2::pack(row), 1 << i);
        }
        self.rows.iter().all(|row| {
            let (residual, combo) = basis.reduce(f2::pack(row));
            if residual != 0 {
                return false;
            }
            let product = other
                .rows
                .iter()
                .enumerate()
                .filter(|(i, _)| (combo >> i) & 1 == 1)
                .fold(PauliString::identity(self.num_qubits), |acc, (_, r)| {
                    acc.mul_commuting(r)
                });
            product.is_negative() == row.is_negative()
        })
    }

    /// Whether `qubit` is entangled with the rest of the register.
    ///
    /// A qubit is in a product state with the rest exactly when all
    /// generators act on it with the identity or one common Pauli.
    pub fn is_qubit_entangled(&self, qubit: usize) -> bool {
        let mut seen = Pauli::I;
        for row in &self.rows {
            let p = row.get(qubit);
            if p == Pauli::I {
                continue;
            }
            if seen == Pauli::I {
                seen = p;
            } else if seen != p {
                return true;
            }
        }
        false
    }

    /// Move qubit `i` to `map[i]`.
    pub fn relabeled(&self, map: &[u32]) -> Stabilizer {
        Self::from_rows_unchecked(self.rows.iter().map(|r| r.relabeled(map)).collect())
    }

    /// Whether measuring in the two bases is mutually unbiased: together the
    /// generators span the full 2n-dimensional space.
    pub fn is_unbiased_with(&self, other: &Stabilizer) -> bool {
        self.num_qubits == other.num_qubits
            && f2::rank(self.rows.iter().chain(&other.rows).map(f2::pack)) == 2 * self.num_qubits
    }
}

impl fmt::Display for Stabilizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_signed_strings().join(", "))
    }
}
