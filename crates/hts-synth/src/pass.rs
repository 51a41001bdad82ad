//! Pass trait for post-processing gate sequences.

use hts_ir::GateSequence;

use crate::error::SynthResult;
use crate::property::PropertySet;

/// The kind of pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Reads the sequence, may write to the `PropertySet`.
    Analysis,
    /// Rewrites the sequence.
    Transformation,
}

/// A pass over a gate sequence.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given sequence.
    ///
    /// Analysis passes must leave the sequence untouched.
    fn run(&self, seq: &mut GateSequence, properties: &mut PropertySet) -> SynthResult<()>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _seq: &GateSequence, _properties: &PropertySet) -> bool {
        true
    }
}
