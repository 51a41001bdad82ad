//! Re-synthesis of a preparation circuit from its stabilizer state.

use tracing::info;

use hts_ir::GateSequence;

use crate::error::SynthResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::stabilizer::Stabilizer;
use crate::synthesis::{Connectivity, Strategy, Synthesizer};

/// Two-qubit counts around a re-synthesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Two-qubit instructions in the input.
    pub before: usize,
    /// Two-qubit instructions in the output.
    pub after: usize,
}

/// Replaces a circuit by a minimal one preparing the same state from
/// `|0…0⟩` on the given connectivity.
///
/// The basis from the property set, when present, takes precedence over the
/// synthesizer's own.
pub struct Resynthesize {
    connectivity: Connectivity,
    synthesizer: Synthesizer,
}

impl Resynthesize {
    /// Re-synthesize on `connectivity` with default synthesizer settings.
    pub fn new(connectivity: impl Into<Connectivity>) -> Self {
        Self {
            connectivity: connectivity.into(),
            synthesizer: Synthesizer::new(),
        }
    }

    /// Re-synthesize with a configured synthesizer.
    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: Synthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Use another engine.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.synthesizer = self.synthesizer.with_strategy(strategy);
        self
    }
}

impl Pass for Resynthesize {
    fn name(&self) -> &'static str {
        "Resynthesize"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, seq: &mut GateSequence, properties: &mut PropertySet) -> SynthResult<()> {
        let state = Stabilizer::from_circuit(seq);
        let out = match properties.basis {
            Some(basis) => self
                .synthesizer
                .clone()
                .with_basis(basis)
                .preparation(&state, &self.connectivity)?,
            None => self.synthesizer.preparation(&state, &self.connectivity)?,
        };

        let stats = CompressionStats {
            before: seq.two_qubit_count(),
            after: out.two_qubit_count(),
        };
        info!(
            before = stats.before,
            after = stats.after,
            connectivity = %self.connectivity,
            "re-synthesized preparation circuit"
        );
        properties.insert(stats);
        *seq = out;
        Ok(())
    }

    fn should_run(&self, seq: &GateSequence, _properties: &PropertySet) -> bool {
        seq.num_qubits() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_stats() {
        let mut seq = GateSequence::parse(2, "h0 cx0,1 cx0,1 cx0,1").unwrap();
        let mut props = PropertySet::new();
        Resynthesize::new("full").run(&mut seq, &mut props).unwrap();
        assert_eq!(
            props.get::<CompressionStats>(),
            Some(&CompressionStats { before: 3, after: 1 })
        );
    }

    #[test]
    fn test_uses_configured_synthesizer() {
        use crate::passes::TwoQubitBasis;

        let synth = Synthesizer::new()
            .with_strategy(Strategy::Elimination)
            .with_basis(TwoQubitBasis::Cz);
        let pass = Resynthesize::new("linear").with_synthesizer(synth);

        let mut seq = GateSequence::parse(3, "h0 cx0,1 cx1,2").unwrap();
        let mut props = PropertySet::new();
        pass.run(&mut seq, &mut props).unwrap();
        assert!(seq.iter().all(|i| !i.is_two_qubit() || i.gate == hts_ir::CliffordGate::CZ));

        let mut seq = GateSequence::parse(3, "h0 cx0,1 cx1,2").unwrap();
        let mut props = PropertySet::new();
        props.basis = Some(TwoQubitBasis::Cx);
        pass.run(&mut seq, &mut props).unwrap();
        assert!(seq.iter().all(|i| !i.is_two_qubit() || i.gate == hts_ir::CliffordGate::CX));
    }

    #[test]
    fn test_skips_empty_register() {
        let seq = GateSequence::new(0);
        assert!(!Resynthesize::new("full").should_run(&seq, &PropertySet::new()));
    }
}
