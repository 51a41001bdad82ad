//! Mutually unbiased bases of stabilizer states.
//!
//! For `n` qubits there are `2^n + 1` bases: the computational basis followed
//! by the finite-field family `{X_i Z^(M_a e_i)}` for every `a` in GF(2^n),
//! where `M_a[i][j] = Tr(a · α^i · α^j)`. The family starts with `a = 0`, the
//! X basis. Measuring in all of them is full-state tomography.

use serde::{Deserialize, Serialize};
use tracing::debug;

use hts_ir::GateSequence;

use crate::error::{SynthError, SynthResult};
use crate::pauli::PauliString;
use crate::stabilizer::Stabilizer;
use crate::synthesis::{Connectivity, Synthesizer};

/// Largest supported qubit count.
pub const MAX_MUB_QUBITS: usize = 6;

/// Irreducible polynomials defining GF(2^n), bit `k` is the `x^k` coefficient.
const IRREDUCIBLE: [u32; MAX_MUB_QUBITS + 1] = [0, 0b11, 0b111, 0b1011, 0b10011, 0b100101, 0b1000011];

fn gf_mul(mut a: u32, mut b: u32, n: usize) -> u32 {
    let poly = IRREDUCIBLE[n];
    let mut product = 0;
    while b != 0 {
        if b & 1 == 1 {
            product ^= a;
        }
        b >>= 1;
        a <<= 1;
        if (a >> n) & 1 == 1 {
            a ^= poly;
        }
    }
    product
}

/// Field trace `Σ y^(2^k)`, which is 0 or 1.
fn gf_trace(y: u32, n: usize) -> u32 {
    let mut sum = 0;
    let mut power = y;
    for _ in 0..n {
        sum ^= power;
        power = gf_mul(power, power, n);
    }
    sum
}

fn check_qubits(num_qubits: usize) -> SynthResult<()> {
    if num_qubits == 0 || num_qubits > MAX_MUB_QUBITS {
        return Err(SynthError::UnsupportedQubitCount {
            num_qubits: num_qubits as u32,
            max: MAX_MUB_QUBITS as u32,
        });
    }
    Ok(())
}

/// The `2^n + 1` bases, computational basis first.
pub fn get_mubs(num_qubits: usize) -> SynthResult<Vec<Stabilizer>> {
    check_qubits(num_qubits)?;
    let n = num_qubits;
    // α = x, so the power basis is 1, x, …, x^(n-1).
    let powers: Vec<u32> = (0..n).map(|i| 1 << i).collect();

    let mut bases = vec![Stabilizer::zero_state(n)];
    for a in 0..(1u32 << n) {
        let rows = (0..n)
            .map(|i| {
                let z = (0..n)
                    .filter(|&j| gf_trace(gf_mul(a, gf_mul(powers[i], powers[j], n), n), n) == 1)
                    .fold(0u64, |acc, j| acc | 1 << j);
                PauliString::from_bits(n, 1 << i, z, false)
            })
            .collect();
        bases.push(Stabilizer::from_rows(rows)?);
    }
    debug!(num_qubits, bases = bases.len(), "generated mutually unbiased bases");
    Ok(bases)
}

/// The bases as unsigned Pauli strings, qubit 0 first.
pub fn get_mub_strings(num_qubits: usize) -> SynthResult<Vec<Vec<String>>> {
    Ok(get_mubs(num_qubits)?
        .iter()
        .map(Stabilizer::to_strings)
        .collect())
}

/// Whether every pair of bases is mutually unbiased.
pub fn are_mutually_unbiased(bases: &[Stabilizer]) -> bool {
    bases
        .iter()
        .enumerate()
        .all(|(i, a)| bases[i + 1..].iter().all(|b| a.is_unbiased_with(b)))
}

/// Readout circuits measuring each basis, with default synthesis settings.
pub fn get_mub_circuits(
    num_qubits: usize,
    connectivity: impl Into<Connectivity>,
) -> SynthResult<Vec<GateSequence>> {
    mub_circuits(num_qubits, &connectivity.into(), &Synthesizer::new())
}

/// Readout circuits measuring each basis.
pub fn mub_circuits(
    num_qubits: usize,
    connectivity: &Connectivity,
    synthesizer: &Synthesizer,
) -> SynthResult<Vec<GateSequence>> {
    get_mubs(num_qubits)?
        .iter()
        .map(|basis| synthesizer.readout(basis, connectivity))
        .collect()
}

/// Cost summary of a set of MUB readout circuits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MubInfo {
    /// Number of circuits, `2^n + 1`.
    pub num_circuits: usize,
    /// Largest native two-qubit count of one circuit (a swap counts three).
    pub max_two_qubit_count: usize,
    /// Largest two-qubit depth of one circuit.
    pub max_two_qubit_depth: usize,
    /// Mean native two-qubit count.
    pub average_two_qubit_gates: f64,
}

impl MubInfo {
    /// Summarize a set of circuits.
    pub fn from_circuits(circuits: &[GateSequence]) -> Self {
        let counts: Vec<usize> = circuits
            .iter()
            .map(GateSequence::native_two_qubit_count)
            .collect();
        let total: usize = counts.iter().sum();
        Self {
            num_circuits: circuits.len(),
            max_two_qubit_count: counts.iter().copied().max().unwrap_or(0),
            max_two_qubit_depth: circuits
                .iter()
                .map(GateSequence::two_qubit_depth)
                .max()
                .unwrap_or(0),
            average_two_qubit_gates: if circuits.is_empty() {
                0.0
            } else {
                total as f64 / circuits.len() as f64
            },
        }
    }
}

/// Cost summary of the MUB readout circuits on a connectivity.
pub fn get_mub_info(
    num_qubits: usize,
    connectivity: impl Into<Connectivity>,
) -> SynthResult<MubInfo> {
    Ok(MubInfo::from_circuits(&get_mub_circuits(num_qubits, connectivity)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf_arithmetic() {
        // x^2 = x + 1 in GF(4)
        assert_eq!(gf_mul(0b10, 0b10, 2), 0b11);
        // x · x^2 = x^3 = x + 1 in GF(8)
        assert_eq!(gf_mul(0b010, 0b100, 3), 0b011);
        for n in 1..=MAX_MUB_QUBITS {
            for y in 0..(1u32 << n) {
                assert!(gf_trace(y, n) <= 1, "n={n} y={y}");
            }
        }
    }

    #[test]
    fn test_single_qubit_bases() {
        let bases = get_mub_strings(1).unwrap();
        assert_eq!(bases, vec![vec!["Z"], vec!["X"], vec!["Y"]]);
    }

    #[test]
    fn test_two_qubit_bases() {
        let bases = get_mubs(2).unwrap();
        assert_eq!(bases.len(), 5);
        assert_eq!(bases[1].to_strings(), vec!["XI", "IX"]);
        assert!(are_mutually_unbiased(&bases));
    }

    #[test]
    fn test_all_sizes_unbiased() {
        for n in 1..=MAX_MUB_QUBITS {
            let bases = get_mubs(n).unwrap();
            assert_eq!(bases.len(), (1 << n) + 1);
            assert!(are_mutually_unbiased(&bases), "n={n}");
        }
    }

    #[test]
    fn test_unsupported_sizes() {
        assert!(matches!(get_mubs(0), Err(SynthError::UnsupportedQubitCount { .. })));
        assert!(matches!(get_mubs(7), Err(SynthError::UnsupportedQubitCount { .. })));
    }

    #[test]
    fn test_circuits_measure_their_basis() {
        let bases = get_mubs(3).unwrap();
        let circuits = get_mub_circuits(3, "linear").unwrap();
        for (basis, circuit) in bases.iter().zip(&circuits) {
            assert!(basis.evolve(circuit).is_equivalent(&Stabilizer::zero_state(3)));
        }
        let info = MubInfo::from_circuits(&circuits);
        assert_eq!(info.num_circuits, 9);
        assert!(info.max_two_qubit_count >= info.max_two_qubit_depth);
        assert!(info.average_two_qubit_gates <= info.max_two_qubit_count as f64);
    }
}
