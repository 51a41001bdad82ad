//! Two-qubit basis translation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hts_ir::{CliffordGate, GateSequence, Instruction, QubitId};

use crate::error::{SynthError, SynthResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// The two-qubit gate an output sequence is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwoQubitBasis {
    /// Controlled-X.
    #[default]
    Cx,
    /// Controlled-Z.
    Cz,
}

impl TwoQubitBasis {
    /// The native two-qubit gate.
    pub fn gate(self) -> CliffordGate {
        match self {
            TwoQubitBasis::Cx => CliffordGate::CX,
            TwoQubitBasis::Cz => CliffordGate::CZ,
        }
    }
}

impl fmt::Display for TwoQubitBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gate().name())
    }
}

impl FromStr for TwoQubitBasis {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cx" | "cnot" => Ok(TwoQubitBasis::Cx),
            "cz" => Ok(TwoQubitBasis::Cz),
            _ => Err(SynthError::UnsupportedBasis(s.to_string())),
        }
    }
}

/// Rewrites every two-qubit gate into the basis gate plus Hadamards.
///
/// Operands are kept, so a sequence that respects a topology still does
/// after translation.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, seq: &mut GateSequence, properties: &mut PropertySet) -> SynthResult<()> {
        let basis = properties.basis.unwrap_or_default();
        let mut out = GateSequence::new(seq.num_qubits());
        for inst in seq.iter() {
            for r in translate(inst, basis) {
                out.push(r)?;
            }
        }
        *seq = out;
        Ok(())
    }

    fn should_run(&self, _seq: &GateSequence, properties: &PropertySet) -> bool {
        properties.basis.is_some()
    }
}

/// Translate one instruction.
pub(crate) fn translate(inst: &Instruction, basis: TwoQubitBasis) -> Vec<Instruction> {
    let h = |q: QubitId| Instruction::single_qubit_gate(CliffordGate::H, q);
    let native = |a: QubitId, b: QubitId| Instruction::two_qubit_gate(basis.gate(), a, b);
    // CX(a, b) = H(b) CZ(a, b) H(b), and the other way around.
    let conjugated = |a: QubitId, b: QubitId| vec![h(b), native(a, b), h(b)];

    match (inst.gate, basis) {
        (CliffordGate::CX, TwoQubitBasis::Cz) | (CliffordGate::CZ, TwoQubitBasis::Cx) => {
            conjugated(inst.qubits[0], inst.qubits[1])
        }
        (CliffordGate::Swap, _) => {
            let (a, b) = (inst.qubits[0], inst.qubits[1]);
            let cx = |c: QubitId, t: QubitId| match basis {
                TwoQubitBasis::Cx => vec![native(c, t)],
                TwoQubitBasis::Cz => conjugated(c, t),
            };
            [cx(a, b), cx(b, a), cx(a, b)].concat()
        }
        _ => vec![inst.clone()],
    }
}
