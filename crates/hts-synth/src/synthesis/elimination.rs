//! Connectivity-restricted Gaussian elimination.
//!
//! Each round turns one generator into a single-qubit `±Z` on a qubit whose
//! removal keeps the remaining qubits connected, then retires that qubit.
//! Single-qubit gates are free; parity is folded towards the chosen qubit
//! along a breadth-first tree of the remaining topology, one or two CX per
//! tree edge. No swaps are emitted.

use tracing::{debug, instrument, trace};

use hts_ir::{CliffordGate, GateSequence, Instruction, QubitId};

use crate::error::{SynthError, SynthResult};
use crate::pauli::{Pauli, PauliString};
use crate::stabilizer::Stabilizer;
use crate::topology::{Topology, mask_iter};

/// Largest register the elimination engine accepts. Row combinations are
/// enumerated exhaustively.
pub const MAX_ELIMINATION_QUBITS: usize = 12;

/// The cheapest way to clear one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    cost: usize,
    qubit: u32,
    combo: u64,
}

/// Product of the rows selected by `combo`.
fn combine(rows: &[PauliString], combo: u64) -> PauliString {
    let n = rows[0].num_qubits();
    mask_iter(combo).fold(PauliString::identity(n), |acc, r| acc.mul_commuting(&rows[r]))
}

/// Gates rotating every non-identity position of `p` to Z.
fn basis_change(p: &PauliString) -> Vec<Instruction> {
    let mut gates = Vec::new();
    for q in mask_iter(p.support()) {
        let qubit = QubitId(q as u32);
        match p.get(q) {
            Pauli::X => gates.push(Instruction::single_qubit_gate(CliffordGate::H, qubit)),
            Pauli::Y => {
                gates.push(Instruction::single_qubit_gate(CliffordGate::Sdg, qubit));
                gates.push(Instruction::single_qubit_gate(CliffordGate::H, qubit));
            }
            Pauli::Z | Pauli::I => {}
        }
    }
    gates
}

/// Fold the Z parity on `support` into `root` along the tree.
///
/// Children are processed before their parents. A qubit carrying parity
/// whose parent also does costs one CX; otherwise the parity is moved with
/// two. Returns the CX count, and pushes the gates if `out` is given.
fn fold(
    order: &[u32],
    parent: &[Option<u32>],
    support: u64,
    mut out: Option<&mut Vec<Instruction>>,
) -> usize {
    let cx = |c: u32, t: u32| Instruction::two_qubit_gate(CliffordGate::CX, QubitId(c), QubitId(t));
    let mut z = support;
    let mut cost = 0;
    for &u in order.iter().skip(1).rev() {
        if (z >> u) & 1 == 0 {
            continue;
        }
        let Some(p) = parent[u as usize] else {
            continue;
        };
        if (z >> p) & 1 == 1 {
            cost += 1;
            if let Some(out) = out.as_deref_mut() {
                out.push(cx(u, p));
            }
        } else {
            cost += 2;
            if let Some(out) = out.as_deref_mut() {
                out.push(cx(p, u));
                out.push(cx(u, p));
            }
            z |= 1 << p;
        }
        z &= !(1 << u);
    }
    cost
}

/// Find the cheapest `(qubit, row combination)` among the remaining qubits.
fn best_candidate(
    topology: &Topology,
    rows: &[PauliString],
    unpinned: u64,
    remaining: u64,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for v in mask_iter(remaining) {
        if !topology.is_connected_within(remaining & !(1 << v)) {
            continue;
        }
        let (order, parent) = topology.bfs_tree(v as u32, remaining);
        let mut combo = unpinned;
        while combo != 0 {
            let support = combine(rows, combo).support();
            let candidate = Candidate {
                cost: fold(&order, &parent, support, None),
                qubit: v as u32,
                combo,
            };
            if best.is_none_or(|b| candidate < b) {
                best = Some(candidate);
            }
            combo = (combo - 1) & unpinned;
        }
    }
    best
}

/// Readout circuit: maps `stabilizer` to the all-zero state exactly, using
/// CX gates on edges of `topology` only.
#[instrument(skip(topology, stabilizer), fields(topology = topology.name(), n = stabilizer.num_qubits()))]
pub fn readout(topology: &Topology, stabilizer: &Stabilizer) -> SynthResult<GateSequence> {
    let n = stabilizer.num_qubits();
    if topology.num_qubits() as usize != n {
        return Err(SynthError::UnsupportedConnectivity {
            name: topology.name().to_string(),
            num_qubits: n as u32,
        });
    }
    if n > MAX_ELIMINATION_QUBITS {
        return Err(SynthError::UnsupportedQubitCount {
            num_qubits: n as u32,
            max: MAX_ELIMINATION_QUBITS as u32,
        });
    }
    if !topology.is_connected() {
        return Err(SynthError::DisconnectedTopology {
            name: topology.name().to_string(),
            num_qubits: n as u32,
        });
    }

    let mut rows = stabilizer.rows().to_vec();
    let mut seq = GateSequence::new(n as u32);
    let mut remaining = topology.qubit_mask();
    let mut unpinned = remaining;
    let mut pinned_qubit = vec![0u32; n];

    while remaining != 0 {
        let Some(choice) = best_candidate(topology, &rows, unpinned, remaining) else {
            return Err(SynthError::DisconnectedTopology {
                name: topology.name().to_string(),
                num_qubits: n as u32,
            });
        };
        trace!(?choice, "eliminating qubit");

        let v = choice.qubit;
        let mut gates = basis_change(&combine(&rows, choice.combo));
        let (order, parent) = topology.bfs_tree(v, remaining);
        let support = combine(&rows, choice.combo).support();
        fold(&order, &parent, support, Some(&mut gates));

        for inst in gates {
            for row in &mut rows {
                row.conjugate_by(&inst);
            }
            seq.push(inst)?;
        }

        // The combination is now ±Z_v; it replaces its first row.
        let pivot = combine(&rows, choice.combo);
        debug_assert!(pivot.x_bits() == 0 && pivot.z_bits() == 1 << v);
        let lead = choice.combo.trailing_zeros() as usize;
        rows[lead] = pivot;
        unpinned &= !(1 << lead);
        for r in mask_iter(unpinned) {
            if (rows[r].z_bits() >> v) & 1 == 1 {
                rows[r] = rows[r].mul_commuting(&pivot);
            }
        }
        pinned_qubit[lead] = v;
        remaining &= !(1 << v);
    }

    for (row, &q) in rows.iter().zip(&pinned_qubit) {
        if row.is_negative() {
            seq.x(QubitId(q))?;
        }
    }

    debug!(two_qubit = seq.two_qubit_count(), "elimination readout synthesized");
    Ok(seq)
}
