//! The fixed catalog of supported connectivity graphs.
//!
//! Entries are keyed by `(qubit count, name)` and built once per process.
//! Each entry owns its minimal-CZ distance table, which is computed the
//! first time an exact synthesis on that topology needs it.

use std::sync::{LazyLock, OnceLock};

use rustc_hash::FxHashMap;
use tracing::info;

use crate::canonical::{self, Signature};
use crate::error::{SynthError, SynthResult};
use crate::graph::Graph;
use crate::synthesis::exact::DistanceTable;
use crate::topology::Topology;

/// Name accepted as a synonym for `full`.
pub const FULL_ALIAS: &str = "all";

/// One catalog topology.
#[derive(Debug)]
pub struct CatalogEntry {
    name: &'static str,
    topology: Topology,
    signature: Signature,
    distances: OnceLock<DistanceTable>,
}

impl CatalogEntry {
    fn new(name: &'static str, topology: Topology) -> Self {
        let signature = canonical::signature(&topology.to_graph());
        Self {
            name,
            topology: topology.renamed(name),
            signature,
            distances: OnceLock::new(),
        }
    }

    /// Catalog name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.topology.num_qubits()
    }

    /// The connectivity.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Isomorphism signature of the connectivity.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Minimal-CZ distance table, built on first use.
    pub fn distances(&self) -> SynthResult<&DistanceTable> {
        if let Some(table) = self.distances.get() {
            return Ok(table);
        }
        let table = DistanceTable::build(&self.topology)?;
        Ok(self.distances.get_or_init(|| table))
    }

    /// Whether the distance table has been built.
    pub fn is_precomputed(&self) -> bool {
        self.distances.get().is_some()
    }
}

/// Registry of all supported topologies.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_signature: FxHashMap<(usize, u64), usize>,
}

impl Catalog {
    fn build() -> Self {
        let mut entries = Vec::new();
        for n in 1..=6 {
            entries.push(CatalogEntry::new("full", Topology::full(n)));
        }
        for n in 3..=6 {
            entries.push(CatalogEntry::new("linear", Topology::linear(n)));
        }
        for n in 4..=6 {
            entries.push(CatalogEntry::new("star", Topology::star(n)));
        }
        for n in 4..=5 {
            entries.push(CatalogEntry::new("cycle", Topology::cycle(n)));
        }

        let mut t = Graph::new(5);
        t.add_path(&[1, 0, 2]);
        t.add_path(&[0, 3, 4]);
        entries.push(CatalogEntry::new("T", Topology::from_graph("T", &t)));

        for n in 5..=6 {
            let mut q = Topology::linear(n as u32).to_graph();
            q.add_edge(n - 1, n - 4);
            entries.push(CatalogEntry::new("Q", Topology::from_graph("Q", &q)));
        }

        let mut ladder = Topology::cycle(6).to_graph();
        ladder.add_edge(1, 4);
        entries.push(CatalogEntry::new("ladder", Topology::from_graph("ladder", &ladder)));

        let mut e = Graph::new(6);
        e.add_path(&[3, 0, 1, 2, 5]);
        e.add_edge(1, 4);
        entries.push(CatalogEntry::new("E", Topology::from_graph("E", &e)));

        let mut h = Graph::new(6);
        h.add_path(&[0, 1, 2]);
        h.add_path(&[3, 4, 5]);
        h.add_edge(1, 4);
        entries.push(CatalogEntry::new("H", Topology::from_graph("H", &h)));

        let mut by_signature = FxHashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            by_signature
                .entry((entry.signature.num_vertices, entry.signature.code))
                .or_insert(i);
        }
        info!(entries = entries.len(), "connectivity catalog initialized");
        Self {
            entries,
            by_signature,
        }
    }

    /// All entries, grouped by name.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries for one qubit count.
    pub fn entries_for(&self, num_qubits: u32) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.num_qubits() == num_qubits)
    }

    /// Look up an entry by name; `all` is accepted for `full`.
    pub fn lookup(&self, name: &str, num_qubits: u32) -> SynthResult<&CatalogEntry> {
        let key = if name == FULL_ALIAS { "full" } else { name };
        self.entries
            .iter()
            .find(|e| e.name == key && e.num_qubits() == num_qubits)
            .ok_or_else(|| SynthError::UnsupportedConnectivity {
                name: name.to_string(),
                num_qubits,
            })
    }

    /// Find the entry isomorphic to `topology`.
    ///
    /// Returns the entry and the relabeling taking qubit `q` of `topology` to
    /// qubit `map[q]` of the entry.
    pub fn find_isomorphic(&self, topology: &Topology) -> Option<(&CatalogEntry, Vec<u32>)> {
        if topology.num_qubits() as usize > canonical::MAX_CLASS_QUBITS {
            return None;
        }
        let sig = canonical::signature(&topology.to_graph());
        let index = *self.by_signature.get(&(sig.num_vertices, sig.code))?;
        let entry = &self.entries[index];
        let to_entry = canonical::invert(&entry.signature.perm);
        let map = sig.perm.iter().map(|&c| to_entry[c] as u32).collect();
        Some((entry, map))
    }
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

/// The process-wide catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// All `(qubit count, name)` pairs in the catalog.
pub fn available_connectivities() -> Vec<(u32, &'static str)> {
    let mut out: Vec<_> = catalog()
        .entries()
        .iter()
        .map(|e| (e.num_qubits(), e.name()))
        .collect();
    out.sort_by_key(|&(n, _)| n);
    out
}

/// Whether `name` names a catalog topology on `num_qubits` qubits.
pub fn is_connectivity_supported(num_qubits: u32, name: &str) -> bool {
    catalog().lookup(name, num_qubits).is_ok()
}

/// The graph of a catalog topology.
pub fn get_connectivity_graph(num_qubits: u32, name: &str) -> SynthResult<Graph> {
    Ok(catalog().lookup(name, num_qubits)?.topology().to_graph())
}
