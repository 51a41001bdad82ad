//! Cancellation of adjacent inverse gates.

use tracing::debug;

use hts_ir::{CliffordGate, GateSequence, Instruction};

use crate::error::SynthResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Result of a cancellation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancellationStats {
    /// Instructions removed, identities included.
    pub removed: usize,
}

/// Removes identity gates and pairs `G · G⁻¹` with no gate in between on
/// their qubits.
///
/// Cancellation cascades: `h0 s0 sdg0 h0` becomes empty.
pub struct CancelInverses;

impl CancelInverses {
    /// Cancel within `seq`, returning the reduced instruction list.
    pub fn cancel(seq: &GateSequence) -> Vec<Instruction> {
        let mut slots: Vec<Option<Instruction>> = Vec::with_capacity(seq.len());
        // Indices of live instructions touching each qubit.
        let mut stacks: Vec<Vec<usize>> = vec![vec![]; seq.num_qubits() as usize];

        for inst in seq.iter() {
            if inst.gate == CliffordGate::I {
                continue;
            }
            let top = stacks[inst.qubits[0].index()].last().copied();
            let cancels = top.is_some_and(|idx| {
                inst.qubits
                    .iter()
                    .all(|q| stacks[q.index()].last() == Some(&idx))
                    && slots[idx]
                        .as_ref()
                        .is_some_and(|prev| prev.gate == inst.gate.inverse() && prev.same_operands(inst))
            });

            if let (true, Some(idx)) = (cancels, top) {
                slots[idx] = None;
                for q in &inst.qubits {
                    stacks[q.index()].pop();
                }
            } else {
                let idx = slots.len();
                for q in &inst.qubits {
                    stacks[q.index()].push(idx);
                }
                slots.push(Some(inst.clone()));
            }
        }

        slots.into_iter().flatten().collect()
    }
}

impl Pass for CancelInverses {
    fn name(&self) -> &'static str {
        "CancelInverses"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, seq: &mut GateSequence, properties: &mut PropertySet) -> SynthResult<()> {
        let before = seq.len();
        let kept = Self::cancel(seq);
        let removed = before - kept.len();
        if removed > 0 {
            debug!(removed, "cancelled inverse gates");
            *seq = GateSequence::from_instructions(seq.num_qubits(), kept)?;
        }
        properties.insert(CancellationStats { removed });
        Ok(())
    }
}
