//! Two-qubit connectivity of a device.

use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};

use hts_ir::{IrError, QubitId};

use crate::error::{SynthError, SynthResult};
use crate::graph::Graph;
use crate::pauli::MAX_QUBITS;

/// Named undirected connectivity graph.
///
/// Edges are stored once as `(a, b)` with `a < b`, sorted.
///
/// ## Performance
///
/// On construction, a distance matrix is precomputed using BFS from each
/// node, so `distance()` and `shortest_path()` are table lookups.
///
/// ## Deserialization
///
/// Only the name, qubit count and edge list are serialized. Deserializing
/// goes through [`from_edges`](Self::from_edges), so the edge list is
/// validated and the adjacency masks and distance/predecessor matrices are
/// rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TopologyRepr")]
pub struct Topology {
    /// Display name (`linear`, `star`, or a user label).
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Connected pairs, `a < b`, sorted.
    edges: Vec<(u32, u32)>,
    /// Neighbor bit mask per qubit.
    #[serde(skip)]
    adjacency: Vec<u64>,
    /// `dist_matrix[from][to]`, or `u32::MAX` if unreachable.
    #[serde(skip)]
    dist_matrix: Vec<Vec<u32>>,
    /// `pred_matrix[from][to]` is the node before `to` on a shortest path.
    #[serde(skip)]
    pred_matrix: Vec<Vec<u32>>,
}

#[derive(Deserialize)]
struct TopologyRepr {
    name: String,
    num_qubits: u32,
    edges: Vec<(u32, u32)>,
}

impl TryFrom<TopologyRepr> for Topology {
    type Error = SynthError;

    fn try_from(repr: TopologyRepr) -> SynthResult<Self> {
        Self::from_edges(repr.name, repr.num_qubits, repr.edges)
    }
}

impl PartialEq for Topology {
    fn eq(&self, other: &Self) -> bool {
        self.num_qubits == other.num_qubits && self.edges == other.edges
    }
}

impl Eq for Topology {}

impl Topology {
    /// Build a topology from an edge list.
    ///
    /// Duplicate and reversed pairs collapse to one edge. Fails on self loops
    /// and out-of-range qubits.
    pub fn from_edges(
        name: impl Into<String>,
        num_qubits: u32,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> SynthResult<Self> {
        if num_qubits as usize > MAX_QUBITS {
            return Err(SynthError::UnsupportedQubitCount {
                num_qubits,
                max: MAX_QUBITS as u32,
            });
        }
        let mut sorted = Vec::new();
        for (a, b) in edges {
            for q in [a, b] {
                if q >= num_qubits {
                    return Err(IrError::QubitNotFound {
                        qubit: QubitId(q),
                        num_qubits,
                        gate_name: None,
                    }
                    .into());
                }
            }
            if a == b {
                return Err(IrError::DuplicateQubit {
                    qubit: QubitId(a),
                    gate_name: None,
                }
                .into());
            }
            sorted.push((a.min(b), a.max(b)));
        }
        sorted.sort_unstable();
        sorted.dedup();

        let mut topology = Self {
            name: name.into(),
            num_qubits,
            edges: sorted,
            adjacency: vec![],
            dist_matrix: vec![],
            pred_matrix: vec![],
        };
        topology.rebuild_caches();
        Ok(topology)
    }

    /// Build from a graph.
    pub fn from_graph(name: impl Into<String>, graph: &Graph) -> Self {
        let mut topology = Self {
            name: name.into(),
            num_qubits: graph.num_vertices() as u32,
            edges: graph
                .edges()
                .into_iter()
                .map(|(a, b)| (a as u32, b as u32))
                .collect(),
            adjacency: vec![],
            dist_matrix: vec![],
            pred_matrix: vec![],
        };
        topology.rebuild_caches();
        topology
    }

    fn from_valid_edges(name: &str, n: u32, edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut graph = Graph::new(n as usize);
        for (a, b) in edges {
            graph.add_edge(a as usize, b as usize);
        }
        Self::from_graph(name, &graph)
    }

    /// Path `0-1-...-(n-1)`.
    pub fn linear(n: u32) -> Self {
        Self::from_valid_edges("linear", n, (1..n).map(|i| (i - 1, i)))
    }

    /// Every pair connected.
    pub fn full(n: u32) -> Self {
        Self::from_valid_edges(
            "full",
            n,
            (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))),
        )
    }

    /// Qubit 0 connected to all others.
    pub fn star(n: u32) -> Self {
        Self::from_valid_edges("star", n, (1..n).map(|i| (0, i)))
    }

    /// Path closed into a ring.
    pub fn cycle(n: u32) -> Self {
        Self::from_valid_edges(
            "cycle",
            n,
            (1..n).map(|i| (i - 1, i)).chain((n > 2).then(|| (0, n - 1))),
        )
    }

    /// Same edges under another name.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Recompute the adjacency masks and distance/predecessor matrices from
    /// the edge list.
    pub fn rebuild_caches(&mut self) {
        let n = self.num_qubits as usize;
        self.adjacency = vec![0; n];
        for &(a, b) in &self.edges {
            self.adjacency[a as usize] |= 1 << b;
            self.adjacency[b as usize] |= 1 << a;
        }
        self.precompute_distances();
    }

    fn precompute_distances(&mut self) {
        let n = self.num_qubits as usize;
        self.dist_matrix = vec![vec![u32::MAX; n]; n];
        self.pred_matrix = vec![vec![u32::MAX; n]; n];

        for src in 0..n {
            self.dist_matrix[src][src] = 0;
            let mut queue = VecDeque::new();
            queue.push_back(src);

            while let Some(cur) = queue.pop_front() {
                for nb in mask_iter(self.adjacency[cur]) {
                    if self.dist_matrix[src][nb] == u32::MAX {
                        self.dist_matrix[src][nb] = self.dist_matrix[src][cur] + 1;
                        self.pred_matrix[src][nb] = cur as u32;
                        queue.push_back(nb);
                    }
                }
            }
        }
    }

    /// Topology name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Connected pairs, sorted.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Whether two qubits share an edge.
    #[inline]
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.adjacency
            .get(a as usize)
            .is_some_and(|m| (m >> b) & 1 == 1)
    }

    /// Neighbor mask of `qubit`.
    #[inline]
    pub fn neighbor_mask(&self, qubit: u32) -> u64 {
        self.adjacency.get(qubit as usize).copied().unwrap_or(0)
    }

    /// Neighbors of `qubit`, ascending.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        mask_iter(self.neighbor_mask(qubit)).map(|q| q as u32)
    }

    /// Shortest-path distance, `None` if unreachable.
    pub fn distance(&self, from: u32, to: u32) -> Option<u32> {
        let d = *self.dist_matrix.get(from as usize)?.get(to as usize)?;
        (d != u32::MAX).then_some(d)
    }

    /// A shortest path from `from` to `to`, both included.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        self.distance(from, to)?;
        let preds = &self.pred_matrix[from as usize];
        let mut path = vec![to];
        let mut current = to;
        while current != from {
            current = preds[current as usize];
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// Largest finite distance between two qubits.
    pub fn diameter(&self) -> u32 {
        self.dist_matrix
            .iter()
            .flatten()
            .copied()
            .filter(|&d| d != u32::MAX)
            .max()
            .unwrap_or(0)
    }

    /// Whether every qubit is reachable from every other.
    pub fn is_connected(&self) -> bool {
        let mut graph = UnGraph::<(), ()>::with_capacity(self.num_qubits as usize, self.edges.len());
        for _ in 0..self.num_qubits {
            graph.add_node(());
        }
        graph.extend_with_edges(self.edges.iter().copied());
        connected_components(&graph) <= 1
    }

    /// Whether the qubits in `mask` induce a connected subgraph.
    pub fn is_connected_within(&self, mask: u64) -> bool {
        if mask == 0 {
            return true;
        }
        let start = mask.trailing_zeros() as usize;
        let mut seen = 1u64 << start;
        let mut frontier = seen;
        while frontier != 0 {
            let mut next = 0;
            for q in mask_iter(frontier) {
                next |= self.adjacency[q] & mask & !seen;
            }
            seen |= next;
            frontier = next;
        }
        seen == mask
    }

    /// Breadth-first tree rooted at `root` within the qubits of `mask`,
    /// visiting neighbors in ascending order.
    ///
    /// Returns the visit order and the parent of each visited qubit.
    pub fn bfs_tree(&self, root: u32, mask: u64) -> (Vec<u32>, Vec<Option<u32>>) {
        let n = self.num_qubits as usize;
        let mut parent = vec![None; n];
        let mut order = vec![root];
        let mut seen = 1u64 << root;
        let mut head = 0;
        while head < order.len() {
            let cur = order[head];
            head += 1;
            for nb in mask_iter(self.adjacency[cur as usize] & mask & !seen) {
                seen |= 1 << nb;
                parent[nb] = Some(cur);
                order.push(nb as u32);
            }
        }
        (order, parent)
    }

    /// The edges as a [`Graph`].
    pub fn to_graph(&self) -> Graph {
        Graph::from_adjacency(self.adjacency.clone())
    }

    /// Bit mask of all qubits.
    pub fn qubit_mask(&self) -> u64 {
        crate::pauli::qubit_mask(self.num_qubits as usize)
    }
}

/// Indices of the set bits of `mask`, ascending.
pub(crate) fn mask_iter(mut mask: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            None
        } else {
            let bit = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some(bit)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories() {
        assert_eq!(Topology::linear(4).edges(), &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(Topology::full(3).edges(), &[(0, 1), (0, 2), (1, 2)]);
        assert_eq!(Topology::star(4).edges(), &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(
            Topology::cycle(4).edges(),
            &[(0, 1), (0, 3), (1, 2), (2, 3)]
        );
        assert!(Topology::full(1).edges().is_empty());
    }

    #[test]
    fn test_from_edges_normalizes() {
        let t = Topology::from_edges("custom", 3, [(2, 1), (1, 2), (0, 1)]).unwrap();
        assert_eq!(t.edges(), &[(0, 1), (1, 2)]);
        assert!(t.has_edge(2, 1));
        assert!(!t.has_edge(0, 2));
        assert_eq!(t, Topology::linear(3));

        assert!(Topology::from_edges("bad", 3, [(0, 3)]).is_err());
        assert!(Topology::from_edges("bad", 3, [(1, 1)]).is_err());
    }

    #[test]
    fn test_distances_and_paths() {
        let t = Topology::linear(5);
        assert_eq!(t.distance(0, 4), Some(4));
        assert_eq!(t.shortest_path(4, 1), Some(vec![4, 3, 2, 1]));
        assert_eq!(t.diameter(), 4);
        assert_eq!(Topology::star(5).diameter(), 2);
    }

    #[test]
    fn test_connectivity() {
        assert!(Topology::linear(4).is_connected());
        let split = Topology::from_edges("split", 4, [(0, 1), (2, 3)]).unwrap();
        assert!(!split.is_connected());
        assert_eq!(split.distance(0, 3), None);

        let path = Topology::linear(4);
        assert!(path.is_connected_within(0b1110));
        assert!(!path.is_connected_within(0b1101));
    }

    #[test]
    fn test_bfs_tree() {
        let t = Topology::star(4);
        let (order, parent) = t.bfs_tree(1, 0b1111);
        assert_eq!(order, vec![1, 0, 2, 3]);
        assert_eq!(parent, vec![Some(1), None, Some(0), Some(0)]);
    }

    #[test]
    fn test_deserialize_rebuilds_caches() {
        let json = serde_json::to_string(&Topology::linear(3)).unwrap();
        let t: Topology = serde_json::from_str(&json).unwrap();
        assert_eq!(t.name(), "linear");
        assert_eq!(t.distance(0, 2), Some(2));
        assert!(t.has_edge(1, 2));
        assert_eq!(t.bfs_tree(0, 0b111).0, vec![0, 1, 2]);
        assert_eq!(t.to_graph(), Topology::linear(3).to_graph());
    }

    #[test]
    fn test_deserialize_rejects_bad_edges() {
        let json = r#"{"name":"bad","num_qubits":3,"edges":[[0,3]]}"#;
        assert!(serde_json::from_str::<Topology>(json).is_err());
        let json = r#"{"name":"bad","num_qubits":3,"edges":[[1,1]]}"#;
        assert!(serde_json::from_str::<Topology>(json).is_err());
    }
}
