//! Simple undirected graphs on up to 64 labeled vertices.
//!
//! Used both for graph states and as the edge set of a topology. Adjacency is
//! a bit mask per vertex.

use std::fmt;

/// Largest vertex count whose edge set fits in a `u64` code.
pub const MAX_CODE_VERTICES: usize = 11;

/// An undirected simple graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Graph {
    num_vertices: usize,
    adjacency: Vec<u64>,
}

impl Graph {
    /// The empty graph on `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        debug_assert!(num_vertices <= 64);
        Self {
            num_vertices,
            adjacency: vec![0; num_vertices],
        }
    }

    /// A graph with the given edges.
    pub fn from_edges(num_vertices: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new(num_vertices);
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Build from per-vertex neighbor masks. The masks must be symmetric and
    /// have no self loops.
    pub fn from_adjacency(adjacency: Vec<u64>) -> Self {
        debug_assert!(
            adjacency
                .iter()
                .enumerate()
                .all(|(v, &m)| m & (1 << v) == 0
                    && (0..adjacency.len()).all(|u| ((m >> u) & 1) == ((adjacency[u] >> v) & 1)))
        );
        Self {
            num_vertices: adjacency.len(),
            adjacency,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Neighbor mask of `v`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> u64 {
        self.adjacency[v]
    }

    /// All neighbor masks, indexed by vertex.
    pub fn adjacency(&self) -> &[u64] {
        &self.adjacency
    }

    /// Degree of `v`.
    pub fn degree(&self, v: usize) -> u32 {
        self.adjacency[v].count_ones()
    }

    /// Whether `a` and `b` are adjacent.
    #[inline]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        (self.adjacency[a] >> b) & 1 == 1
    }

    /// Add the edge `a`–`b`. Self loops are ignored.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a != b {
            self.adjacency[a] |= 1 << b;
            self.adjacency[b] |= 1 << a;
        }
    }

    /// Remove the edge `a`–`b` if present.
    pub fn remove_edge(&mut self, a: usize, b: usize) {
        self.adjacency[a] &= !(1 << b);
        self.adjacency[b] &= !(1 << a);
    }

    /// Add or remove the edge `a`–`b`.
    pub fn toggle_edge(&mut self, a: usize, b: usize) {
        if a != b {
            self.adjacency[a] ^= 1 << b;
            self.adjacency[b] ^= 1 << a;
        }
    }

    /// Add edges between consecutive vertices of `path`.
    pub fn add_path(&mut self, path: &[usize]) {
        for w in path.windows(2) {
            self.add_edge(w[0], w[1]);
        }
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|m| m.count_ones() as usize).sum::<usize>() / 2
    }

    /// Edges `(a, b)` with `a < b`, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for a in 0..self.num_vertices {
            for b in (a + 1)..self.num_vertices {
                if self.has_edge(a, b) {
                    edges.push((a, b));
                }
            }
        }
        edges
    }

    /// Local complementation at `v`: complement the subgraph induced by the
    /// neighborhood of `v`.
    pub fn local_complement(&mut self, v: usize) {
        let nv = self.adjacency[v];
        for u in 0..self.num_vertices {
            if (nv >> u) & 1 == 1 {
                self.adjacency[u] ^= nv & !(1 << u);
            }
        }
    }

    /// Exchange the labels of `a` and `b`.
    pub fn swap_vertices(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let mut map: Vec<usize> = (0..self.num_vertices).collect();
        map.swap(a, b);
        *self = self.relabeled(&map);
    }

    /// Move vertex `v` to `map[v]`.
    pub fn relabeled(&self, map: &[usize]) -> Graph {
        let mut out = Graph::new(self.num_vertices);
        for (a, b) in self.edges() {
            out.add_edge(map[a], map[b]);
        }
        out
    }

    /// Integer code of the upper triangle: bit `k` is the `k`-th pair `(i, j)`,
    /// `i < j`, in row-major order.
    pub fn code(&self) -> u64 {
        debug_assert!(self.num_vertices <= MAX_CODE_VERTICES);
        let mut code = 0u64;
        let mut bit = 0;
        for i in 0..self.num_vertices {
            for j in (i + 1)..self.num_vertices {
                if self.has_edge(i, j) {
                    code |= 1 << bit;
                }
                bit += 1;
            }
        }
        code
    }

    /// Inverse of [`Graph::code`].
    pub fn from_code(num_vertices: usize, code: u64) -> Graph {
        let mut graph = Graph::new(num_vertices);
        let mut bit = 0;
        for i in 0..num_vertices {
            for j in (i + 1)..num_vertices {
                if (code >> bit) & 1 == 1 {
                    graph.add_edge(i, j);
                }
                bit += 1;
            }
        }
        graph
    }

    /// Number of vertex pairs, i.e. the bit width of [`Graph::code`].
    pub fn pair_count(num_vertices: usize) -> usize {
        num_vertices * num_vertices.saturating_sub(1) / 2
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<String> = self.edges().iter().map(|(a, b)| format!("{a}-{b}")).collect();
        write!(f, "Graph({}; {})", self.num_vertices, edges.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_degree() {
        let mut g = Graph::new(4);
        g.add_path(&[0, 1, 2, 3]);
        g.add_edge(3, 0);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.edges(), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
        assert_eq!(g.degree(0), 2);
        g.remove_edge(0, 3);
        assert!(!g.has_edge(3, 0));
        g.toggle_edge(0, 2);
        assert!(g.has_edge(2, 0));
    }

    #[test]
    fn test_code_layout() {
        // pairs for n = 3: (0,1) -> bit 0, (0,2) -> bit 1, (1,2) -> bit 2
        let g = Graph::from_edges(3, &[(0, 2), (1, 2)]);
        assert_eq!(g.code(), 0b110);
        assert_eq!(Graph::from_code(3, 0b110), g);
        assert_eq!(Graph::pair_count(6), 15);
    }

    #[test]
    fn test_local_complement() {
        // star centered at 0 becomes complete under LC at the center
        let mut g = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
        g.local_complement(0);
        assert_eq!(g.edge_count(), 6);
        g.local_complement(0);
        assert_eq!(g, Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]));

        // LC at a leaf changes nothing
        let mut leaf = Graph::from_edges(3, &[(0, 1), (1, 2)]);
        leaf.local_complement(0);
        assert_eq!(leaf.edge_count(), 2);
    }

    #[test]
    fn test_relabel() {
        let g = Graph::from_edges(3, &[(0, 1)]);
        let mut h = g.clone();
        h.swap_vertices(1, 2);
        assert_eq!(h, Graph::from_edges(3, &[(0, 2)]));
        assert_eq!(g.relabeled(&[2, 0, 1]), Graph::from_edges(3, &[(0, 2)]));
    }
}
