//! Connectivity-constrained synthesis of stabilizer states.
//!
//! Two engines produce readout circuits (stabilizer state to `|0…0⟩`):
//!
//! - [`exact`]: minimal CZ count from per-topology distance tables, for every
//!   catalog topology and any graph isomorphic to one.
//! - [`elimination`]: greedy connectivity-restricted Gaussian elimination,
//!   for custom graphs without a catalog counterpart or on request.
//!
//! Preparation circuits are readout circuits run backwards.

pub mod elimination;
pub mod exact;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use hts_ir::GateSequence;

use crate::catalog::{CatalogEntry, catalog};
use crate::config::SynthesisConfig;
use crate::error::{SynthError, SynthResult};
use crate::manager::PassManagerBuilder;
use crate::passes::TwoQubitBasis;
use crate::stabilizer::Stabilizer;
use crate::topology::Topology;

/// Which engine to use when a catalog entry is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Minimal two-qubit count from precomputed tables.
    #[default]
    Exact,
    /// Greedy elimination.
    Elimination,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Exact => "exact",
            Strategy::Elimination => "elimination",
        })
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Strategy::Exact),
            "elimination" => Ok(Strategy::Elimination),
            _ => Err(format!("unknown strategy '{s}' (expected 'exact' or 'elimination')")),
        }
    }
}

/// Target connectivity: a catalog name or an explicit graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connectivity {
    /// Catalog topology with this name, sized to the stabilizer.
    Named(String),
    /// Explicit topology.
    Custom(Topology),
}

impl Default for Connectivity {
    fn default() -> Self {
        Connectivity::Named("full".to_string())
    }
}

impl From<&str> for Connectivity {
    fn from(name: &str) -> Self {
        Connectivity::Named(name.to_string())
    }
}

impl From<String> for Connectivity {
    fn from(name: String) -> Self {
        Connectivity::Named(name)
    }
}

impl From<Topology> for Connectivity {
    fn from(topology: Topology) -> Self {
        Connectivity::Custom(topology)
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Named(name) => f.write_str(name),
            Connectivity::Custom(t) => write!(f, "{} ({} edges)", t.name(), t.edges().len()),
        }
    }
}

/// A resolved connectivity request.
enum Target<'a> {
    /// A catalog entry; `map[q]` is the entry label of caller qubit `q`.
    Catalog {
        entry: &'static CatalogEntry,
        map: Vec<u32>,
        topology: &'a Topology,
    },
    /// A graph with no catalog counterpart.
    Custom(&'a Topology),
}

impl<'a> Target<'a> {
    fn resolve(connectivity: &'a Connectivity, num_qubits: u32) -> SynthResult<Self> {
        match connectivity {
            Connectivity::Named(name) => {
                let entry = catalog().lookup(name, num_qubits)?;
                Ok(Target::Catalog {
                    entry,
                    map: (0..num_qubits).collect(),
                    topology: entry.topology(),
                })
            }
            Connectivity::Custom(topology) => {
                if topology.num_qubits() != num_qubits {
                    return Err(SynthError::UnsupportedConnectivity {
                        name: topology.name().to_string(),
                        num_qubits,
                    });
                }
                if !topology.is_connected() {
                    return Err(SynthError::DisconnectedTopology {
                        name: topology.name().to_string(),
                        num_qubits,
                    });
                }
                Ok(match catalog().find_isomorphic(topology) {
                    Some((entry, map)) => {
                        debug!(catalog = entry.name(), "custom topology matches catalog entry");
                        Target::Catalog {
                            entry,
                            map,
                            topology,
                        }
                    }
                    None => Target::Custom(topology),
                })
            }
        }
    }

    fn topology(&self) -> &Topology {
        match self {
            Target::Catalog { topology, .. } => *topology,
            Target::Custom(topology) => *topology,
        }
    }
}

/// Configured synthesis front end.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    strategy: Strategy,
    basis: TwoQubitBasis,
    cancel_inverses: bool,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self {
            strategy: Strategy::Exact,
            basis: TwoQubitBasis::Cx,
            cancel_inverses: true,
        }
    }
}

impl Synthesizer {
    /// Exact engine, CX output, inverse cancellation on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings from the `synthesis` section of the configuration.
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self {
            strategy: config.strategy,
            basis: config.two_qubit_gate,
            cancel_inverses: config.cancel_inverses,
        }
    }

    /// Set the engine used for catalog topologies.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the output two-qubit gate.
    #[must_use]
    pub fn with_basis(mut self, basis: TwoQubitBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Enable or disable inverse cancellation on the output.
    #[must_use]
    pub fn with_cancel_inverses(mut self, enabled: bool) -> Self {
        self.cancel_inverses = enabled;
        self
    }

    /// The configured engine.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The configured output basis.
    pub fn basis(&self) -> TwoQubitBasis {
        self.basis
    }

    /// Circuit mapping the stabilizer state to `|0…0⟩`.
    #[instrument(
        skip(self, stabilizer),
        fields(n = stabilizer.num_qubits(), strategy = %self.strategy)
    )]
    pub fn readout(
        &self,
        stabilizer: &Stabilizer,
        connectivity: &Connectivity,
    ) -> SynthResult<GateSequence> {
        let n = stabilizer.num_qubits() as u32;
        let target = Target::resolve(connectivity, n)?;

        let mut seq = match (&target, self.strategy) {
            (Target::Catalog { entry, map, .. }, Strategy::Exact) => {
                let mut inverse = vec![0u32; map.len()];
                for (q, &m) in map.iter().enumerate() {
                    inverse[m as usize] = q as u32;
                }
                exact::readout(entry, &stabilizer.relabeled(map))?.relabeled(&inverse)?
            }
            (target, _) => elimination::readout(target.topology(), stabilizer)?,
        };

        let (pm, mut properties) = PassManagerBuilder::new()
            .with_target(target.topology().clone(), self.basis)
            .with_cancel_inverses(self.cancel_inverses)
            .build();
        pm.run(&mut seq, &mut properties)?;
        Ok(seq)
    }

    /// Circuit preparing the stabilizer state from `|0…0⟩`.
    pub fn preparation(
        &self,
        stabilizer: &Stabilizer,
        connectivity: &Connectivity,
    ) -> SynthResult<GateSequence> {
        Ok(self.readout(stabilizer, connectivity)?.inverse())
    }
}

/// Preparation circuit for `stabilizer` on `connectivity` with default
/// settings.
pub fn get_preparation_circuit(
    stabilizer: &Stabilizer,
    connectivity: impl Into<Connectivity>,
) -> SynthResult<GateSequence> {
    Synthesizer::new().preparation(stabilizer, &connectivity.into())
}

/// Readout circuit for `stabilizer` on `connectivity` with default settings.
pub fn get_readout_circuit(
    stabilizer: &Stabilizer,
    connectivity: impl Into<Connectivity>,
) -> SynthResult<GateSequence> {
    Synthesizer::new().readout(stabilizer, &connectivity.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tableau::CliffordTableau;

    fn stab(rows: &[&str]) -> Stabilizer {
        Stabilizer::from_strings(rows).unwrap()
    }

    #[test]
    fn test_prepare_then_readout_is_identity() {
        let s = stab(&["XZZ", "ZXI", "ZIX"]);
        let prep = get_preparation_circuit(&s, "linear").unwrap();
        let read = get_readout_circuit(&s, "linear").unwrap();
        let prep_t = CliffordTableau::from_sequence(&prep);
        let read_t = CliffordTableau::from_sequence(&read);
        assert!(prep_t.then(&read_t).is_identity());
        assert!(read_t.then(&prep_t).is_identity());
        assert!(Stabilizer::from_circuit(&prep).is_equivalent(&s));
    }

    #[test]
    fn test_unknown_connectivity() {
        let err = get_preparation_circuit(&Stabilizer::zero_state(3), "hexagon-7").unwrap_err();
        assert!(matches!(err, SynthError::UnsupportedConnectivity { .. }));
    }

    #[test]
    fn test_custom_isomorphic_graph_uses_catalog() {
        // linear chain labeled 1-0-2
        let custom = Topology::from_edges("bent", 3, [(0, 1), (0, 2)]).unwrap();
        let s = stab(&["XZZ", "ZXI", "ZIX"]);
        let seq = get_preparation_circuit(&s, custom.clone()).unwrap();
        assert!(Stabilizer::from_circuit(&seq).is_equivalent(&s));
        assert!(seq.two_qubit_pairs().all(|(a, b)| custom.has_edge(a, b)));
        // star graph centered on 0 is one CZ per edge
        assert_eq!(seq.two_qubit_count(), 2);
    }

    #[test]
    fn test_custom_graph_mismatch() {
        let small = Topology::linear(2);
        let err = get_readout_circuit(&Stabilizer::zero_state(3), small).unwrap_err();
        assert!(matches!(err, SynthError::UnsupportedConnectivity { .. }));

        let split = Topology::from_edges("split", 3, [(0, 1)]).unwrap();
        let err = get_readout_circuit(&Stabilizer::zero_state(3), split).unwrap_err();
        assert!(matches!(err, SynthError::DisconnectedTopology { .. }));
    }

    #[test]
    fn test_strategies_and_bases() {
        let s = stab(&["XXII", "ZZII", "IIXX", "-IIZZ"]);
        for strategy in [Strategy::Exact, Strategy::Elimination] {
            for basis in [TwoQubitBasis::Cx, TwoQubitBasis::Cz] {
                let synth = Synthesizer::new().with_strategy(strategy).with_basis(basis);
                let seq = synth.preparation(&s, &"linear".into()).unwrap();
                assert!(Stabilizer::from_circuit(&seq).is_equivalent(&s), "{strategy} {basis}");
                assert!(seq.iter().filter(|i| i.is_two_qubit()).all(|i| i.gate == basis.gate()));
            }
        }
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Exact".parse::<Strategy>().unwrap(), Strategy::Exact);
        assert!("greedy".parse::<Strategy>().is_err());
    }
}
