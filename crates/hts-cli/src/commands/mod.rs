//! CLI command implementations.

pub mod common;
pub mod compress;
pub mod lc_class;
pub mod mubs;
pub mod precompute;
pub mod synthesize;
pub mod tomography;
pub mod topologies;
pub mod version;
