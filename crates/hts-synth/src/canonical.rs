//! Canonical forms of graphs and stabilizer states.
//!
//! Two notions of "same shape" are used:
//!
//! - **Isomorphism signature** of a topology: the smallest [`Graph::code`]
//!   over all relabelings. Equal signatures mean the graphs are isomorphic.
//! - **Local-complementation class** of a graph state: two graph states are
//!   related by single-qubit Cliffords exactly when their graphs lie in the
//!   same local-complementation orbit. The class id is the smallest code in
//!   the orbit.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use hts_ir::{CliffordGate, GateSequence, Instruction, QubitId};

use crate::error::{SynthError, SynthResult};
use crate::graph::Graph;
use crate::pauli::PauliString;
use crate::stabilizer::Stabilizer;

/// Largest qubit count with precomputed orbit tables.
pub const MAX_CLASS_QUBITS: usize = 6;

/// All permutations of `0..n` in lexicographic order.
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..n).collect();
    let mut out = vec![current.clone()];
    loop {
        let Some(i) = (1..n).rev().find(|&i| current[i - 1] < current[i]) else {
            return out;
        };
        let pivot = i - 1;
        let Some(j) = (i..n).rev().find(|&j| current[j] > current[pivot]) else {
            return out;
        };
        current.swap(pivot, j);
        current[i..].reverse();
        out.push(current.clone());
    }
}

/// Invert a permutation.
pub fn invert(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inv[p] = i;
    }
    inv
}

/// Isomorphism-invariant signature of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    /// Number of vertices.
    pub num_vertices: usize,
    /// Smallest code over all relabelings.
    pub code: u64,
    /// A relabeling reaching it: `graph.relabeled(&perm).code() == code`.
    pub perm: Vec<usize>,
}

/// Compute the signature of a graph with at most [`MAX_CLASS_QUBITS`]
/// vertices.
pub fn signature(graph: &Graph) -> Signature {
    let n = graph.num_vertices();
    let mut best = Signature {
        num_vertices: n,
        code: graph.code(),
        perm: (0..n).collect(),
    };
    for perm in permutations(n) {
        let code = graph.relabeled(&perm).code();
        if code < best.code {
            best.code = code;
            best.perm = perm;
        }
    }
    best
}

/// Local-complementation orbits of all labeled graphs on `n` vertices.
#[derive(Debug)]
pub struct OrbitTable {
    num_vertices: usize,
    /// Class id (smallest code in the orbit) for every graph code.
    class_of: Vec<u32>,
    num_classes: usize,
}

impl OrbitTable {
    #[instrument(level = "debug")]
    fn build(num_vertices: usize) -> Self {
        let size = 1usize << Graph::pair_count(num_vertices);
        let mut parent: Vec<u32> = (0..size as u32).collect();

        fn find(parent: &mut [u32], mut x: u32) -> u32 {
            while parent[x as usize] != x {
                let up = parent[parent[x as usize] as usize];
                parent[x as usize] = up;
                x = up;
            }
            x
        }

        for code in 0..size as u64 {
            let graph = Graph::from_code(num_vertices, code);
            for v in 0..num_vertices {
                if graph.degree(v) < 2 {
                    continue;
                }
                let mut image = graph.clone();
                image.local_complement(v);
                let a = find(&mut parent, code as u32);
                let b = find(&mut parent, image.code() as u32);
                // The smaller code becomes the root, so roots are class ids.
                if a < b {
                    parent[b as usize] = a;
                } else if b < a {
                    parent[a as usize] = b;
                }
            }
        }

        let class_of: Vec<u32> = (0..size as u32).map(|c| find(&mut parent, c)).collect();
        let num_classes = class_of
            .iter()
            .enumerate()
            .filter(|&(c, &root)| c as u32 == root)
            .count();
        debug!(num_vertices, num_classes, "built local-complementation orbits");
        Self {
            num_vertices,
            class_of,
            num_classes,
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Class id of a graph code.
    #[inline]
    pub fn class_of(&self, code: u64) -> u64 {
        u64::from(self.class_of[code as usize])
    }

    /// Number of distinct orbits.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Class ids, ascending.
    pub fn classes(&self) -> impl Iterator<Item = u64> + '_ {
        self.class_of
            .iter()
            .enumerate()
            .filter(|&(c, &root)| c as u32 == root)
            .map(|(c, _)| c as u64)
    }
}

static ORBITS: [OnceLock<OrbitTable>; MAX_CLASS_QUBITS + 1] =
    [const { OnceLock::new() }; MAX_CLASS_QUBITS + 1];

/// The orbit table for `n` vertices, built on first use.
pub fn orbits(n: usize) -> SynthResult<&'static OrbitTable> {
    if n == 0 || n > MAX_CLASS_QUBITS {
        return Err(SynthError::UnsupportedQubitCount {
            num_qubits: n as u32,
            max: MAX_CLASS_QUBITS as u32,
        });
    }
    Ok(ORBITS[n].get_or_init(|| OrbitTable::build(n)))
}

/// A stabilizer state brought to graph form by single-qubit Cliffords.
#[derive(Debug, Clone)]
pub struct GraphForm {
    /// Single-qubit gates taking the state to the graph state.
    pub layer: GateSequence,
    /// The graph.
    pub graph: Graph,
    /// Resulting generators: row `i` is `±X_i` times `Z` on the neighbors of `i`.
    pub rows: Vec<PauliString>,
}

/// Find a layer of H and S gates that maps `stabilizer` to a graph state.
pub fn graph_form(stabilizer: &Stabilizer) -> SynthResult<GraphForm> {
    let n = stabilizer.num_qubits();
    let mut rows = stabilizer.rows().to_vec();

    // --- Step 1: pivot columns of the X block ---
    let mut pivots = 0u64;
    let mut rank = 0;
    for q in 0..n {
        let Some(found) = (rank..n).find(|&r| (rows[r].x_bits() >> q) & 1 == 1) else {
            continue;
        };
        rows.swap(rank, found);
        let pivot = rows[rank];
        for row in rows.iter_mut().skip(rank + 1) {
            if (row.x_bits() >> q) & 1 == 1 {
                *row = row.mul_commuting(&pivot);
            }
        }
        pivots |= 1 << q;
        rank += 1;
    }

    // --- Step 2: Hadamard the other qubits so the X block becomes invertible ---
    let mut layer = GateSequence::new(n as u32);
    for q in 0..n {
        if (pivots >> q) & 1 == 0 {
            let h = Instruction::single_qubit_gate(CliffordGate::H, QubitId(q as u32));
            for row in &mut rows {
                row.conjugate_by(&h);
            }
            layer.push(h)?;
        }
    }

    // --- Step 3: Gauss-Jordan so that row i carries X on qubit i ---
    for q in 0..n {
        if let Some(found) = (q..n).find(|&r| (rows[r].x_bits() >> q) & 1 == 1) {
            rows.swap(q, found);
        }
        let pivot = rows[q];
        for (r, row) in rows.iter_mut().enumerate() {
            if r != q && (row.x_bits() >> q) & 1 == 1 {
                *row = row.mul_commuting(&pivot);
            }
        }
    }

    // --- Step 4: clear Y on the diagonal ---
    for q in 0..n {
        if (rows[q].z_bits() >> q) & 1 == 1 {
            let s = Instruction::single_qubit_gate(CliffordGate::S, QubitId(q as u32));
            for row in &mut rows {
                row.conjugate_by(&s);
            }
            layer.push(s)?;
        }
    }

    let graph = Graph::from_adjacency(rows.iter().map(PauliString::z_bits).collect());
    Ok(GraphForm { layer, graph, rows })
}

/// Local-Clifford equivalence class of a stabilizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LcClass {
    /// Number of qubits.
    pub num_qubits: usize,
    /// Smallest graph code in the orbit.
    pub class: u64,
    /// Code of the graph reached by [`graph_form`].
    pub graph_code: u64,
}

impl LcClass {
    /// A graph state representing the class.
    pub fn representative(&self) -> Graph {
        Graph::from_code(self.num_qubits, self.class)
    }
}

/// The local-Clifford class of a stabilizer state on up to six qubits.
pub fn lc_class(stabilizer: &Stabilizer) -> SynthResult<LcClass> {
    let n = stabilizer.num_qubits();
    let table = orbits(n)?;
    let graph_code = graph_form(stabilizer)?.graph.code();
    Ok(LcClass {
        num_qubits: n,
        class: table.class_of(graph_code),
        graph_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stab(rows: &[&str]) -> Stabilizer {
        Stabilizer::from_strings(rows).unwrap()
    }

    #[test]
    fn test_permutations() {
        assert_eq!(permutations(3).len(), 6);
        assert_eq!(permutations(3)[1], vec![0, 2, 1]);
        assert_eq!(permutations(1), vec![vec![0]]);
        assert_eq!(invert(&[2, 0, 1]), vec![1, 2, 0]);
    }

    #[test]
    fn test_signature_identifies_isomorphic_graphs() {
        let path = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let shuffled = Graph::from_edges(4, &[(2, 0), (0, 3), (3, 1)]);
        let star = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
        let a = signature(&path);
        let b = signature(&shuffled);
        assert_eq!(a.code, b.code);
        assert_ne!(a.code, signature(&star).code);
        assert_eq!(path.relabeled(&a.perm).code(), a.code);
    }

    #[test]
    fn test_orbit_counts() {
        // connected and disconnected classes on three vertices:
        // empty, one edge (three labelings), and the connected class
        let table = orbits(3).unwrap();
        assert_eq!(table.num_classes(), 5);
        assert_eq!(table.class_of(0), 0);
        let path = Graph::from_edges(3, &[(0, 1), (1, 2)]).code();
        let triangle = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).code();
        assert_eq!(table.class_of(path), table.class_of(triangle));
        assert!(orbits(7).is_err());
    }

    #[test]
    fn test_graph_form_of_product_state() {
        let form = graph_form(&Stabilizer::zero_state(3)).unwrap();
        assert_eq!(form.graph.edge_count(), 0);
        assert_eq!(form.layer.len(), 3);
        let evolved = Stabilizer::zero_state(3).evolve(&form.layer);
        assert!(evolved.is_equivalent(&Stabilizer::from_rows_unchecked(form.rows.clone())));
    }

    #[test]
    fn test_graph_form_reaches_graph_state() {
        for rows in [
            vec!["XZZ", "ZXI", "ZIX"],
            vec!["XX", "-ZZ"],
            vec!["YZI", "ZYZ", "-IZY"],
            vec!["ZZI", "IZZ", "XXX"],
        ] {
            let s = stab(&rows);
            let form = graph_form(&s).unwrap();
            let evolved = s.evolve(&form.layer);
            let graph_state = Stabilizer::from_graph(&form.graph);
            assert!(evolved.is_equivalent_mod_phase(&graph_state), "{rows:?}");
            assert!(evolved.is_equivalent(&Stabilizer::from_rows_unchecked(form.rows.clone())));
            assert!(
                form.layer.iter().all(|i| !i.is_two_qubit()),
                "layer must be local"
            );
        }
    }

    #[test]
    fn test_lc_class() {
        let ghz = lc_class(&stab(&["XXX", "ZZI", "IZZ"])).unwrap();
        let star = lc_class(&stab(&["XZZ", "ZXI", "ZIX"])).unwrap();
        assert_eq!(ghz.class, star.class);
        let product = lc_class(&Stabilizer::zero_state(3)).unwrap();
        assert_eq!(product.class, 0);
        assert_eq!(ghz.representative().edge_count(), 2);
    }
}
