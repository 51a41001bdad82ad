//! Measurement circuits and expectation values from counts.
//!
//! A measurement circuit is a preparation circuit followed by a readout
//! circuit, measured in the computational basis on every qubit. Counts are
//! keyed by little-endian bitstrings: the rightmost character is qubit 0, and
//! spaces separating classical registers are ignored.
//!
//! Density matrices use the same ordering: bit `q` of a basis index is
//! qubit `q`.

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use hts_ir::{GateSequence, IrError, QubitId};

use crate::error::{SynthError, SynthResult};
use crate::mub;
use crate::pauli::{MAX_QUBITS, PauliString};
use crate::stabilizer::Stabilizer;
use crate::synthesis::{Connectivity, Synthesizer};
use crate::tableau::CliffordTableau;

/// What a fitter needs to know about a measurement circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadoutInfo {
    /// Readout circuit on the measured qubits.
    pub readout: GateSequence,
    /// Register size of the preparation circuit.
    pub total_num_qubits: u32,
    /// Measured qubits, `None` when all are.
    pub measured_qubits: Option<Vec<u32>>,
}

impl ReadoutInfo {
    /// Number of measured qubits.
    pub fn num_measured(&self) -> usize {
        self.readout.num_qubits() as usize
    }
}

/// Preparation followed by readout, with the information to evaluate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementCircuit {
    /// Gates to run before measuring every qubit.
    pub circuit: GateSequence,
    /// Readout metadata.
    pub info: ReadoutInfo,
}

fn attach_readout(
    preparation: &GateSequence,
    readout: GateSequence,
    measured_qubits: Option<&[u32]>,
) -> SynthResult<MeasurementCircuit> {
    let mut circuit = preparation.clone();
    match measured_qubits {
        None => {
            circuit.compose(&readout)?;
        }
        Some(qubits) => {
            let ids: Vec<QubitId> = qubits.iter().map(|&q| QubitId(q)).collect();
            circuit.compose_on(&readout, &ids)?;
        }
    }
    Ok(MeasurementCircuit {
        circuit,
        info: ReadoutInfo {
            readout,
            total_num_qubits: preparation.num_qubits(),
            measured_qubits: measured_qubits.map(<[u32]>::to_vec),
        },
    })
}

/// Largest register a density matrix is built for.
pub const MAX_DENSITY_QUBITS: usize = 10;

fn measured_width(total_num_qubits: u32, measured_qubits: Option<&[u32]>) -> SynthResult<usize> {
    let Some(qubits) = measured_qubits else {
        return Ok(total_num_qubits as usize);
    };
    let mut seen = 0u64;
    for &q in qubits {
        if q >= total_num_qubits || q as usize >= MAX_QUBITS {
            return Err(IrError::QubitNotFound {
                qubit: QubitId(q),
                num_qubits: total_num_qubits,
                gate_name: None,
            }
            .into());
        }
        if (seen >> q) & 1 == 1 {
            return Err(IrError::DuplicateQubit {
                qubit: QubitId(q),
                gate_name: None,
            }
            .into());
        }
        seen |= 1 << q;
    }
    Ok(qubits.len())
}

/// Circuit preparing a state and measuring the Paulis of `stabilizer` on it.
pub fn stabilizer_measurement_circuit(
    preparation: &GateSequence,
    stabilizer: &Stabilizer,
    connectivity: impl Into<Connectivity>,
    measured_qubits: Option<&[u32]>,
) -> SynthResult<MeasurementCircuit> {
    let width = measured_width(preparation.num_qubits(), measured_qubits)?;
    if width != stabilizer.num_qubits() {
        return Err(IrError::SizeMismatch {
            expected: width as u32,
            got: stabilizer.num_qubits() as u32,
        }
        .into());
    }
    let readout = Synthesizer::new().readout(stabilizer, &connectivity.into())?;
    attach_readout(preparation, readout, measured_qubits)
}

/// One measurement circuit per mutually unbiased basis of the measured
/// qubits, `2^m + 1` in total.
pub fn full_state_tomography_circuits(
    preparation: &GateSequence,
    connectivity: impl Into<Connectivity>,
    measured_qubits: Option<&[u32]>,
) -> SynthResult<Vec<MeasurementCircuit>> {
    let width = measured_width(preparation.num_qubits(), measured_qubits)?;
    let readouts = mub::mub_circuits(width, &connectivity.into(), &Synthesizer::new())?;
    debug!(width, circuits = readouts.len(), "built tomography circuits");
    readouts
        .into_iter()
        .map(|readout| attach_readout(preparation, readout, measured_qubits))
        .collect()
}

/// Readout sequences for full-state tomography of `num_qubits` qubits, one per
/// mutually unbiased basis in generation order.
pub fn get_tomography_circuits(
    num_qubits: usize,
    connectivity: impl Into<Connectivity>,
) -> SynthResult<Vec<GateSequence>> {
    mub::get_mub_circuits(num_qubits, connectivity)
}

/// Expectation values from the counts of one measurement circuit.
#[derive(Debug, Clone)]
pub struct MeasurementFitter {
    info: ReadoutInfo,
    /// Outcome bits over the measured qubits (bit `k` is measured qubit `k`)
    /// with their counts.
    outcomes: Vec<(u64, u64)>,
    shots: u64,
}

impl MeasurementFitter {
    /// Parse counts for a circuit described by `info`.
    pub fn new<K: AsRef<str>>(
        info: &ReadoutInfo,
        counts: impl IntoIterator<Item = (K, u64)>,
    ) -> SynthResult<Self> {
        let measured = measured_width(info.total_num_qubits, info.measured_qubits.as_deref())?;
        if measured != info.num_measured() {
            return Err(IrError::SizeMismatch {
                expected: measured as u32,
                got: info.num_measured() as u32,
            }
            .into());
        }
        if measured > MAX_QUBITS {
            return Err(SynthError::UnsupportedQubitCount {
                num_qubits: measured as u32,
                max: MAX_QUBITS as u32,
            });
        }

        let width = info.total_num_qubits as usize;
        let positions: Vec<usize> = match &info.measured_qubits {
            Some(qubits) => qubits.iter().map(|&q| q as usize).collect(),
            None => (0..width).collect(),
        };

        let mut outcomes = Vec::new();
        let mut shots = 0u64;
        for (key, count) in counts {
            let bits: Vec<u8> = key.as_ref().bytes().filter(|&b| b != b' ').collect();
            if bits.len() != width {
                return Err(SynthError::InvalidCounts(format!(
                    "outcome '{}' has {} bits, expected {width}",
                    key.as_ref(),
                    bits.len()
                )));
            }
            let mut outcome = 0u64;
            for (k, &q) in positions.iter().enumerate() {
                match bits[width - 1 - q] {
                    b'0' => {}
                    b'1' => outcome |= 1 << k,
                    other => {
                        return Err(SynthError::InvalidCounts(format!(
                            "outcome '{}' contains '{}'",
                            key.as_ref(),
                            other as char
                        )));
                    }
                }
            }
            shots += count;
            outcomes.push((outcome, count));
        }
        if shots == 0 {
            return Err(SynthError::InvalidCounts("no shots recorded".into()));
        }

        Ok(Self {
            info: info.clone(),
            outcomes,
            shots,
        })
    }

    /// Total number of shots.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Mean of `(-1)^(parity of outcome bits in mask)`.
    fn parity_expectation(&self, mask: u64) -> f64 {
        let signed: i64 = self
            .outcomes
            .iter()
            .map(|&(outcome, count)| {
                if (outcome & mask).count_ones() % 2 == 1 {
                    -(count as i64)
                } else {
                    count as i64
                }
            })
            .sum();
        signed as f64 / self.shots as f64
    }

    /// Every Pauli this circuit measures, identity first, with its
    /// expectation value.
    ///
    /// With `full_hilbert_space` the Paulis span the whole register (identity
    /// on unmeasured qubits); otherwise only the measured qubits.
    pub fn expectation_values(&self, full_hilbert_space: bool) -> Vec<(PauliString, f64)> {
        let m = self.info.num_measured();
        // Z parity i after readout R measures R† Z^i R on the prepared state.
        let pullback = CliffordTableau::from_sequence(&self.info.readout.inverse());

        let mut values = vec![(PauliString::identity(m), 1.0)];
        for mask in 1..(1u64 << m) {
            let image = pullback.conjugate(&PauliString::z_string(m, mask));
            let sign = if image.is_negative() { -1.0 } else { 1.0 };
            values.push((image.unsigned(), sign * self.parity_expectation(mask)));
        }

        match (&self.info.measured_qubits, full_hilbert_space) {
            (Some(qubits), true) => {
                let total = self.info.total_num_qubits as usize;
                let positions: Vec<usize> = qubits.iter().map(|&q| q as usize).collect();
                values
                    .into_iter()
                    .map(|(p, v)| (p.embedded(total, &positions), v))
                    .collect()
            }
            _ => values,
        }
    }

    fn width(&self, full_hilbert_space: bool) -> usize {
        match (&self.info.measured_qubits, full_hilbert_space) {
            (Some(_), true) => self.info.total_num_qubits as usize,
            _ => self.info.num_measured(),
        }
    }

    /// Estimate `2^-n Σ ⟨P⟩ P` over the Paulis this circuit measures.
    ///
    /// For a stabilizer measurement of an ideal preparation this is the
    /// projector onto the stabilizer state.
    pub fn density_matrix(&self, full_hilbert_space: bool) -> SynthResult<Array2<Complex64>> {
        density_matrix(
            self.width(full_hilbert_space),
            self.expectation_values(full_hilbert_space),
        )
    }
}

/// `2^-n Σ ⟨P⟩ P` for `n`-qubit Paulis.
fn density_matrix(
    num_qubits: usize,
    values: impl IntoIterator<Item = (PauliString, f64)>,
) -> SynthResult<Array2<Complex64>> {
    if num_qubits > MAX_DENSITY_QUBITS {
        return Err(SynthError::UnsupportedQubitCount {
            num_qubits: num_qubits as u32,
            max: MAX_DENSITY_QUBITS as u32,
        });
    }
    let dim = 1usize << num_qubits;
    let scale = 1.0 / dim as f64;
    let mut rho = Array2::<Complex64>::zeros((dim, dim));
    for (pauli, value) in values {
        let x = pauli.x_bits() as usize;
        let z = pauli.z_bits() as usize;
        // Y = iXZ per qubit; X flips the column index, Z signs it.
        let mut phase = Complex64::i().powu((x & z).count_ones() % 4);
        if pauli.is_negative() {
            phase = -phase;
        }
        let weight = phase * (value * scale);
        for col in 0..dim {
            let entry = if (z & col).count_ones() % 2 == 1 { -weight } else { weight };
            rho[[col ^ x, col]] += entry;
        }
    }
    Ok(rho)
}

/// Expectation values gathered from a whole tomography run.
#[derive(Debug, Clone, Default)]
pub struct TomographyFitter {
    fitters: Vec<MeasurementFitter>,
}

impl TomographyFitter {
    /// Pair each measurement circuit with its counts.
    pub fn new<C, K>(circuits: &[MeasurementCircuit], counts: impl IntoIterator<Item = C>) -> SynthResult<Self>
    where
        C: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let counts: Vec<C> = counts.into_iter().collect();
        if counts.len() != circuits.len() {
            return Err(SynthError::InvalidCounts(format!(
                "{} circuits but counts for {}",
                circuits.len(),
                counts.len()
            )));
        }
        let fitters = circuits
            .iter()
            .zip(counts)
            .map(|(circuit, counts)| MeasurementFitter::new(&circuit.info, counts))
            .collect::<SynthResult<Vec<_>>>()?;
        Ok(Self { fitters })
    }

    /// Union of the expectation values of every circuit.
    pub fn expectation_values(&self, full_hilbert_space: bool) -> FxHashMap<PauliString, f64> {
        self.fitters
            .iter()
            .flat_map(|f| f.expectation_values(full_hilbert_space))
            .collect()
    }

    /// Linear-inversion estimate of the measured state.
    pub fn density_matrix(&self, full_hilbert_space: bool) -> SynthResult<Array2<Complex64>> {
        let width = self
            .fitters
            .first()
            .map_or(0, |f| f.width(full_hilbert_space));
        density_matrix(width, self.expectation_values(full_hilbert_space))
    }
}
