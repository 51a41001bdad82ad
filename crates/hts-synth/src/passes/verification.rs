//! Connectivity verification.

use tracing::debug;

use hts_ir::GateSequence;

use crate::error::{SynthError, SynthResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Result of connectivity verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the verification passed.
    pub passed: bool,
    /// Two-qubit instructions checked.
    pub two_qubit_gates: usize,
}

/// Analysis pass failing on any two-qubit instruction that is not on an edge
/// of the target topology.
///
/// Runs last, after every rewriting pass.
pub struct ConnectivityCheck;

impl Pass for ConnectivityCheck {
    fn name(&self) -> &'static str {
        "connectivity_check"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, seq: &mut GateSequence, properties: &mut PropertySet) -> SynthResult<()> {
        let Some(topology) = properties.topology.as_ref() else {
            return Ok(());
        };
        let mut checked = 0;
        for (a, b) in seq.two_qubit_pairs() {
            if !topology.has_edge(a, b) {
                return Err(SynthError::ConnectivityViolation {
                    a,
                    b,
                    name: topology.name().to_string(),
                });
            }
            checked += 1;
        }
        debug!(checked, topology = topology.name(), "connectivity verified");
        properties.insert(VerificationResult {
            passed: true,
            two_qubit_gates: checked,
        });
        Ok(())
    }

    fn should_run(&self, _seq: &GateSequence, properties: &PropertySet) -> bool {
        properties.topology.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;

    #[test]
    fn test_accepts_edges() {
        let mut seq = GateSequence::parse(3, "cx0,1 h2 cz2,1").unwrap();
        let mut props = PropertySet::new();
        props.topology = Some(Topology::linear(3));
        ConnectivityCheck.run(&mut seq, &mut props).unwrap();
        assert_eq!(
            props.get::<VerificationResult>().map(|r| r.two_qubit_gates),
            Some(2)
        );
    }

    #[test]
    fn test_rejects_non_edge() {
        let mut seq = GateSequence::parse(3, "cx0,2").unwrap();
        let mut props = PropertySet::new();
        props.topology = Some(Topology::linear(3));
        let err = ConnectivityCheck.run(&mut seq, &mut props).unwrap_err();
        assert!(matches!(err, SynthError::ConnectivityViolation { a: 0, b: 2, .. }));
    }
}
