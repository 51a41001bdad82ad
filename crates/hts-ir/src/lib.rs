//! Clifford gate sequences for hardware-tailored stabilizer synthesis.
//!
//! This crate holds the abstract instruction stream produced by synthesis and
//! consumed by compression. It never builds host-SDK circuit objects; callers
//! render [`GateSequence`]s into whatever circuit type they use.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a position in the register
//! - **Gates**: [`CliffordGate`], the closed vocabulary of Clifford gates
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **Sequences**: [`GateSequence`], an ordered instruction list with cost metrics
//!
//! # Example: A Bell-State Preparation
//!
//! ```rust
//! use hts_ir::{GateSequence, QubitId};
//!
//! let mut seq = GateSequence::new(2);
//! seq.h(QubitId(0)).unwrap();
//! seq.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(seq.two_qubit_count(), 1);
//! assert_eq!(seq.to_string(), "h0 cx0,1");
//! ```
//!
//! # Text Form
//!
//! Sequences print and parse as whitespace-separated tokens, gate name followed
//! by qubit indices (control first):
//!
//! ```rust
//! use hts_ir::GateSequence;
//!
//! let seq = GateSequence::parse(4, "h1 s3 sdg0 cx0,2 cz1,2 swap1,2").unwrap();
//! assert_eq!(seq.native_two_qubit_count(), 5);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `id` | 1 | Identity |
//! | `x`, `y`, `z` | 1 | Pauli gates |
//! | `h` | 1 | Hadamard gate |
//! | `s`, `sdg` | 1 | S and S-dagger gates |
//! | `cx` | 2 | Controlled-NOT |
//! | `cz` | 2 | Controlled-Z |
//! | `swap` | 2 | SWAP gate |

pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod sequence;

pub use error::{IrError, IrResult};
pub use gate::CliffordGate;
pub use instruction::Instruction;
pub use qubit::QubitId;
pub use sequence::GateSequence;
