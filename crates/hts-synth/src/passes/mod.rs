//! Built-in passes over gate sequences.

mod cancel;
mod resynthesis;
mod translation;
mod verification;

pub use cancel::{CancelInverses, CancellationStats};
pub use resynthesis::{CompressionStats, Resynthesize};
pub use translation::{BasisTranslation, TwoQubitBasis};
pub use verification::{ConnectivityCheck, VerificationResult};
