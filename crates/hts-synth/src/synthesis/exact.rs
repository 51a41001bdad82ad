//! Exact synthesis on catalog topologies.
//!
//! A stabilizer state needs at least as many CZ gates as its
//! local-Clifford class is far from the product state, where one step applies
//! a CZ on a topology edge after arbitrary single-qubit Cliffords. The
//! distance of every class is found once per topology by breadth-first
//! search from the empty graph; readout then walks any state down the table
//! one CZ at a time.

use std::collections::VecDeque;
use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument, trace};

use hts_ir::{CliffordGate, GateSequence, Instruction, QubitId};

use crate::canonical::{self, OrbitTable};
use crate::catalog::CatalogEntry;
use crate::error::{SynthError, SynthResult};
use crate::graph::Graph;
use crate::stabilizer::Stabilizer;
use crate::topology::Topology;

/// Single-qubit Cliffords tried before a CZ, one per class of gates that do
/// not commute through it: nothing, H, and S followed by H.
const LOCAL_REPS: [&[CliffordGate]; 3] = [
    &[],
    &[CliffordGate::H],
    &[CliffordGate::S, CliffordGate::H],
];

/// A local layer on the two ends of an edge followed by a CZ across it.
#[derive(Debug, Clone, Copy)]
struct Step {
    a: u32,
    b: u32,
    rep_a: usize,
    rep_b: usize,
}

impl Step {
    fn instructions(&self) -> Vec<Instruction> {
        let local = |q: u32, rep: usize| {
            LOCAL_REPS[rep]
                .iter()
                .map(move |&g| Instruction::single_qubit_gate(g, QubitId(q)))
        };
        local(self.a, self.rep_a)
            .chain(local(self.b, self.rep_b))
            .chain(std::iter::once(Instruction::two_qubit_gate(
                CliffordGate::CZ,
                QubitId(self.a),
                QubitId(self.b),
            )))
            .collect()
    }

    /// All steps on a topology: edges in order, then local layers.
    fn all(topology: &Topology) -> impl Iterator<Item = Step> + '_ {
        topology.edges().iter().flat_map(|&(a, b)| {
            (0..LOCAL_REPS.len()).flat_map(move |rep_a| {
                (0..LOCAL_REPS.len()).map(move |rep_b| Step { a, b, rep_a, rep_b })
            })
        })
    }
}

/// Local-Clifford class of `state` after applying `step`.
fn class_after(state: &Stabilizer, step: &Step, orbits: &OrbitTable) -> SynthResult<u64> {
    let mut next = state.clone();
    for inst in step.instructions() {
        next.apply(&inst);
    }
    Ok(orbits.class_of(canonical::graph_form(&next)?.graph.code()))
}

/// Minimal number of CZ gates on a topology for every local-Clifford class.
#[derive(Debug)]
pub struct DistanceTable {
    num_qubits: usize,
    distances: FxHashMap<u64, u8>,
    max_distance: u8,
}

impl DistanceTable {
    /// Breadth-first search over classes, starting from the product state.
    #[instrument(skip(topology), fields(topology = topology.name(), n = topology.num_qubits()))]
    pub fn build(topology: &Topology) -> SynthResult<Self> {
        let n = topology.num_qubits() as usize;
        let orbits = canonical::orbits(n)?;

        let mut distances: FxHashMap<u64, u8> = FxHashMap::default();
        distances.insert(0, 0);
        let mut queue = VecDeque::from([(0u64, 0u8)]);
        let mut max_distance = 0;

        while let Some((class, d)) = queue.pop_front() {
            let state = Stabilizer::from_graph(&Graph::from_code(n, class));
            for step in Step::all(topology) {
                let next = class_after(&state, &step, orbits)?;
                if let Entry::Vacant(e) = distances.entry(next) {
                    e.insert(d + 1);
                    max_distance = max_distance.max(d + 1);
                    queue.push_back((next, d + 1));
                }
            }
        }

        info!(
            classes = distances.len(),
            total = orbits.num_classes(),
            max_distance,
            "built distance table"
        );
        Ok(Self {
            num_qubits: n,
            distances,
            max_distance,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// CZ count needed for a class, `None` if unreachable.
    pub fn distance(&self, class: u64) -> Option<u8> {
        self.distances.get(&class).copied()
    }

    /// Number of reachable classes.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Whether no class is reachable.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Largest distance of any class.
    pub fn max_distance(&self) -> u8 {
        self.max_distance
    }
}

/// Readout circuit with the minimal CZ count on a catalog topology.
///
/// Qubit labels are the entry's. The result maps `stabilizer` to the all-zero
/// state exactly, signs included; its two-qubit gates are CZs on edges.
#[instrument(skip(entry, stabilizer), fields(topology = entry.name(), n = entry.num_qubits()))]
pub fn readout(entry: &CatalogEntry, stabilizer: &Stabilizer) -> SynthResult<GateSequence> {
    let topology = entry.topology();
    let n = stabilizer.num_qubits();
    let table = entry.distances()?;
    let orbits = canonical::orbits(n)?;
    let unreachable = || SynthError::DisconnectedTopology {
        name: topology.name().to_string(),
        num_qubits: n as u32,
    };

    let mut seq = GateSequence::new(n as u32);
    let mut state = stabilizer.clone();
    loop {
        let form = canonical::graph_form(&state)?;
        seq.compose(&form.layer)?;
        let class = orbits.class_of(form.graph.code());
        state = Stabilizer::from_rows_unchecked(form.rows);

        let d = table.distance(class).ok_or_else(unreachable)?;
        trace!(class, d, "graph form reached");
        if d == 0 {
            break;
        }

        let mut chosen = None;
        for step in Step::all(topology) {
            let next = class_after(&state, &step, orbits)?;
            if table.distance(next) == Some(d - 1) {
                chosen = Some(step);
                break;
            }
        }
        let step = chosen.ok_or_else(unreachable)?;
        for inst in step.instructions() {
            state.apply(&inst);
            seq.push(inst)?;
        }
    }

    // The empty graph state: row q is ±X_q.
    for q in 0..n {
        let h = Instruction::single_qubit_gate(CliffordGate::H, QubitId(q as u32));
        state.apply(&h);
        seq.push(h)?;
    }
    for (q, row) in state.rows().iter().enumerate() {
        if row.is_negative() {
            seq.x(QubitId(q as u32))?;
        }
    }

    debug!(two_qubit = seq.two_qubit_count(), "exact readout synthesized");
    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    fn stab(rows: &[&str]) -> Stabilizer {
        Stabilizer::from_strings(rows).unwrap()
    }

    #[test]
    fn test_distance_table_small() {
        let table = catalog().lookup("full", 3).unwrap().distances().unwrap();
        // classes on three qubits: product, three single edges, connected
        assert_eq!(table.len(), 5);
        assert_eq!(table.distance(0), Some(0));
        assert_eq!(table.max_distance(), 2);

        let linear = catalog().lookup("linear", 3).unwrap().distances().unwrap();
        let edge_02 = Graph::from_edges(3, &[(0, 2)]).code();
        // needs a CZ between 0 and 2, which linear only reaches via qubit 1
        assert_eq!(linear.distance(edge_02), Some(3));
    }

    #[test]
    fn test_exact_readout_reaches_zero_state() {
        let entry = catalog().lookup("linear", 3).unwrap();
        for rows in [
            vec!["XZZ", "ZXI", "ZIX"],
            vec!["-XXX", "ZZI", "IZZ"],
            vec!["ZII", "IYI", "-IIX"],
            vec!["XIZ", "IZI", "ZIX"],
        ] {
            let s = stab(&rows);
            let seq = readout(entry, &s).unwrap();
            assert!(
                s.evolve(&seq).is_equivalent(&Stabilizer::zero_state(3)),
                "{rows:?}: {seq}"
            );
            assert!(seq.two_qubit_pairs().all(|(a, b)| entry.topology().has_edge(a, b)));
        }
    }

    #[test]
    fn test_exact_ghz_cost() {
        let entry = catalog().lookup("linear", 3).unwrap();
        let seq = readout(entry, &stab(&["XZZ", "ZXI", "ZIX"])).unwrap();
        assert_eq!(seq.two_qubit_count(), 2);
    }
}
