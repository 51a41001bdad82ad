//! Compression of Clifford preparation circuits.
//!
//! A circuit is read as the preparation of the stabilizer state it produces
//! from `|0…0⟩` and replaced by a minimal preparation of that state. The
//! result agrees with the input only on the all-zero input state: it is
//! generally a different Clifford unitary, so do not use it where the
//! circuit acts on arbitrary inputs. On full
//! connectivity the result never has more two-qubit gates than the input, and
//! compressing twice gives the same count as compressing once.

use tracing::instrument;

use hts_ir::GateSequence;

use crate::error::SynthResult;
use crate::manager::PassManager;
use crate::passes::{Resynthesize, TwoQubitBasis};
use crate::property::PropertySet;
use crate::synthesis::{Connectivity, Synthesizer};

/// Compress on full connectivity, with `basis` (`"cx"` or `"cz"`) as the
/// two-qubit gate.
pub fn compress(seq: &GateSequence, basis: &str) -> SynthResult<GateSequence> {
    compress_preparation_circuit(seq, Connectivity::default(), basis)
}

/// Compress onto a chosen connectivity.
pub fn compress_preparation_circuit(
    seq: &GateSequence,
    connectivity: impl Into<Connectivity>,
    basis: &str,
) -> SynthResult<GateSequence> {
    let basis: TwoQubitBasis = basis.parse()?;
    compress_with(seq, connectivity, &Synthesizer::new().with_basis(basis))
}

/// Compress with a configured synthesizer: its strategy, output basis and
/// inverse cancellation apply.
#[instrument(skip_all, fields(n = seq.num_qubits(), len = seq.len()))]
pub fn compress_with(
    seq: &GateSequence,
    connectivity: impl Into<Connectivity>,
    synthesizer: &Synthesizer,
) -> SynthResult<GateSequence> {
    let mut properties = PropertySet::new();
    let mut pm = PassManager::new();
    pm.add_pass(Resynthesize::new(connectivity).with_synthesizer(synthesizer.clone()));

    let mut out = seq.clone();
    pm.run(&mut out, &mut properties)?;
    Ok(out)
}
