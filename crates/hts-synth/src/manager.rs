//! Pass manager for post-processing synthesized sequences.

use tracing::{debug, info, instrument};

use hts_ir::GateSequence;

use crate::error::SynthResult;
use crate::pass::Pass;
use crate::passes::{BasisTranslation, CancelInverses, ConnectivityCheck, TwoQubitBasis};
use crate::property::PropertySet;
use crate::topology::Topology;

/// Manages and executes a sequence of passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given sequence.
    #[instrument(skip(self, seq, properties))]
    pub fn run(&self, seq: &mut GateSequence, properties: &mut PropertySet) -> SynthResult<()> {
        debug!(
            "Running pass manager with {} passes on {} qubits",
            self.passes.len(),
            seq.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(seq, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(seq, properties)?;
                debug!(
                    "Pass {} completed, gates: {}, two-qubit: {}",
                    pass.name(),
                    seq.len(),
                    seq.two_qubit_count()
                );
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, depth: {}, two-qubit gates: {}",
            seq.depth(),
            seq.two_qubit_count()
        );

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the standard post-processing pipeline.
pub struct PassManagerBuilder {
    /// Whether to cancel adjacent inverse gates.
    cancel_inverses: bool,
    /// Target properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            cancel_inverses: true,
            properties: PropertySet::new(),
        }
    }

    /// Enable or disable inverse cancellation.
    #[must_use]
    pub fn with_cancel_inverses(mut self, enabled: bool) -> Self {
        self.cancel_inverses = enabled;
        self
    }

    /// Set the target connectivity and two-qubit basis.
    #[must_use]
    pub fn with_target(mut self, topology: Topology, basis: TwoQubitBasis) -> Self {
        self.properties.topology = Some(topology);
        self.properties.basis = Some(basis);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        if self.properties.basis.is_some() {
            pm.add_pass(BasisTranslation);
        }

        if self.cancel_inverses {
            pm.add_pass(CancelInverses);
        }

        // Verify last so nothing after it can break connectivity.
        if self.properties.topology.is_some() {
            pm.add_pass(ConnectivityCheck);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
