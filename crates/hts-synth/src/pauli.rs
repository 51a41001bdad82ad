//! Pauli operators in symplectic (x, z) bit form.
//!
//! Qubit `i` is bit `i` of both masks: X = (1, 0), Z = (0, 1), Y = (1, 1).
//! Strings are written with qubit 0 first, so `"XZI"` is X on qubit 0.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hts_ir::{CliffordGate, Instruction};

use crate::error::SynthError;

/// Largest register a Pauli string can describe.
pub const MAX_QUBITS: usize = 64;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Build from symplectic bits.
    #[inline]
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Pauli::I,
            (true, false) => Pauli::X,
            (true, true) => Pauli::Y,
            (false, true) => Pauli::Z,
        }
    }

    /// Symplectic bits `(x, z)`.
    #[inline]
    pub fn bits(self) -> (bool, bool) {
        match self {
            Pauli::I => (false, false),
            Pauli::X => (true, false),
            Pauli::Y => (true, true),
            Pauli::Z => (false, true),
        }
    }

    /// Parse a single symbol.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    /// The symbol for this operator.
    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

/// A Hermitian Pauli string with a ± sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString {
    pub(crate) num_qubits: usize,
    pub(crate) x: u64,
    pub(crate) z: u64,
    pub(crate) negative: bool,
}

impl PauliString {
    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        debug_assert!(num_qubits <= MAX_QUBITS);
        Self {
            num_qubits,
            x: 0,
            z: 0,
            negative: false,
        }
    }

    /// Build from bit masks. Bits at or above `num_qubits` are dropped.
    pub fn from_bits(num_qubits: usize, x: u64, z: u64, negative: bool) -> Self {
        let mask = qubit_mask(num_qubits);
        Self {
            num_qubits,
            x: x & mask,
            z: z & mask,
            negative,
        }
    }

    /// A single Pauli operator on qubit `qubit`.
    pub fn single(num_qubits: usize, qubit: usize, pauli: Pauli) -> Self {
        let (x, z) = pauli.bits();
        Self::from_bits(
            num_qubits,
            u64::from(x) << qubit,
            u64::from(z) << qubit,
            false,
        )
    }

    /// Z on every qubit set in `mask`.
    pub fn z_string(num_qubits: usize, mask: u64) -> Self {
        Self::from_bits(num_qubits, 0, mask, false)
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// X-part bit mask.
    #[inline]
    pub fn x_bits(&self) -> u64 {
        self.x
    }

    /// Z-part bit mask.
    #[inline]
    pub fn z_bits(&self) -> u64 {
        self.z
    }

    /// Whether the sign is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The same operator with the sign dropped.
    pub fn unsigned(&self) -> Self {
        Self {
            negative: false,
            ..*self
        }
    }

    /// The same operator with the opposite sign.
    pub fn negated(&self) -> Self {
        Self {
            negative: !self.negative,
            ..*self
        }
    }

    /// Operator on one qubit.
    #[inline]
    pub fn get(&self, qubit: usize) -> Pauli {
        Pauli::from_bits((self.x >> qubit) & 1 == 1, (self.z >> qubit) & 1 == 1)
    }

    /// Qubits with a non-identity operator.
    #[inline]
    pub fn support(&self) -> u64 {
        self.x | self.z
    }

    /// Number of non-identity positions.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.support().count_ones()
    }

    /// Whether all positions are the identity (the sign is ignored).
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.support() == 0
    }

    /// Symplectic inner product; `false` means the operators commute.
    #[inline]
    pub fn symplectic_product(&self, other: &PauliString) -> bool {
        ((self.x & other.z) ^ (self.z & other.x)).count_ones() % 2 == 1
    }

    /// Whether the operators commute.
    #[inline]
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        !self.symplectic_product(other)
    }

    /// Multiply `self · other`.
    ///
    /// Returns the unsigned Hermitian Pauli with the combined bits and the
    /// power of `i` (mod 4) that, together with both signs, multiplies it.
    pub fn product(&self, other: &PauliString) -> (PauliString, u32) {
        let (x1, z1, x2, z2) = (self.x, self.z, other.x, other.z);
        let (px, py, pz) = (x1 & !z1, x1 & z1, !x1 & z1);
        let (qx, qy, qz) = (x2 & !z2, x2 & z2, !x2 & z2);

        // XY = iZ, YZ = iX, ZX = iY and the reverse orders give -i.
        let plus = ((px & qy) | (py & qz) | (pz & qx)).count_ones();
        let minus = ((px & qz) | (py & qx) | (pz & qy)).count_ones();
        let signs = 2 * (u32::from(self.negative) + u32::from(other.negative));
        let exponent = (plus + 3 * minus + signs) % 4;

        let result = PauliString {
            num_qubits: self.num_qubits,
            x: x1 ^ x2,
            z: z1 ^ z2,
            negative: false,
        };
        (result, exponent)
    }

    /// Multiply two commuting strings; the product is again Hermitian.
    pub fn mul_commuting(&self, other: &PauliString) -> PauliString {
        let (mut result, exponent) = self.product(other);
        debug_assert!(exponent % 2 == 0, "product of anticommuting Paulis");
        result.negative = exponent == 2;
        result
    }

    /// Conjugate in place by a Clifford instruction: `P -> U P U†`.
    ///
    /// Sign updates follow Aaronson and Gottesman.
    pub fn conjugate_by(&mut self, inst: &Instruction) {
        let a = inst.qubits[0].index();
        let bit_a = 1u64 << a;
        let xa = self.x & bit_a != 0;
        let za = self.z & bit_a != 0;

        match inst.gate {
            CliffordGate::I => {}
            CliffordGate::X => self.negative ^= za,
            CliffordGate::Y => self.negative ^= xa ^ za,
            CliffordGate::Z => self.negative ^= xa,
            CliffordGate::H => {
                self.negative ^= xa && za;
                if xa != za {
                    self.x ^= bit_a;
                    self.z ^= bit_a;
                }
            }
            CliffordGate::S => {
                self.negative ^= xa && za;
                if xa {
                    self.z ^= bit_a;
                }
            }
            CliffordGate::Sdg => {
                self.negative ^= xa && !za;
                if xa {
                    self.z ^= bit_a;
                }
            }
            CliffordGate::CX => {
                let bit_t = 1u64 << inst.qubits[1].index();
                let xt = self.x & bit_t != 0;
                let zt = self.z & bit_t != 0;
                self.negative ^= xa && zt && (xt == za);
                if xa {
                    self.x ^= bit_t;
                }
                if zt {
                    self.z ^= bit_a;
                }
            }
            CliffordGate::CZ => {
                let bit_b = 1u64 << inst.qubits[1].index();
                let xb = self.x & bit_b != 0;
                let zb = self.z & bit_b != 0;
                self.negative ^= xa && xb && (za != zb);
                if xb {
                    self.z ^= bit_a;
                }
                if xa {
                    self.z ^= bit_b;
                }
            }
            CliffordGate::Swap => {
                let bit_b = 1u64 << inst.qubits[1].index();
                self.x = swap_bits(self.x, bit_a, bit_b);
                self.z = swap_bits(self.z, bit_a, bit_b);
            }
        }
    }

    /// Move qubit `i` to position `map[i]`.
    pub fn relabeled(&self, map: &[u32]) -> PauliString {
        let mut x = 0;
        let mut z = 0;
        for (i, &m) in map.iter().enumerate().take(self.num_qubits) {
            x |= ((self.x >> i) & 1) << m;
            z |= ((self.z >> i) & 1) << m;
        }
        PauliString {
            num_qubits: self.num_qubits,
            x,
            z,
            negative: self.negative,
        }
    }

    /// Place this string on `qubits` of a wider register.
    pub fn embedded(&self, total_qubits: usize, qubits: &[usize]) -> PauliString {
        let mut x = 0;
        let mut z = 0;
        for (i, &q) in qubits.iter().enumerate().take(self.num_qubits) {
            x |= ((self.x >> i) & 1) << q;
            z |= ((self.z >> i) & 1) << q;
        }
        PauliString::from_bits(total_qubits, x, z, self.negative)
    }

    /// The operator letters without sign, qubit 0 first.
    pub fn label(&self) -> String {
        (0..self.num_qubits).map(|q| self.get(q).as_char()).collect()
    }

    /// The operator letters with an explicit `+` or `-`.
    pub fn signed_label(&self) -> String {
        let sign = if self.negative { '-' } else { '+' };
        format!("{sign}{}", self.label())
    }
}

/// Shown with a leading `-` only when negative.
impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.label())
    }
}

/// Accepts an optional leading `+` or `-` followed by `I`, `X`, `Y`, `Z`.
impl FromStr for PauliString {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| SynthError::InvalidStabilizer {
            input: format!("\"{s}\""),
            reason,
        };

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let num_qubits = body.chars().count();
        if num_qubits == 0 {
            return Err(invalid("empty Pauli string".into()));
        }
        if num_qubits > MAX_QUBITS {
            return Err(invalid(format!("more than {MAX_QUBITS} qubits")));
        }

        let mut x = 0u64;
        let mut z = 0u64;
        for (q, c) in body.chars().enumerate() {
            let pauli =
                Pauli::from_char(c).ok_or_else(|| invalid(format!("invalid symbol '{c}'")))?;
            let (px, pz) = pauli.bits();
            x |= u64::from(px) << q;
            z |= u64::from(pz) << q;
        }
        Ok(PauliString {
            num_qubits,
            x,
            z,
            negative,
        })
    }
}

/// Mask with the low `num_qubits` bits set.
#[inline]
pub(crate) fn qubit_mask(num_qubits: usize) -> u64 {
    if num_qubits >= 64 {
        u64::MAX
    } else {
        (1u64 << num_qubits) - 1
    }
}

#[inline]
fn swap_bits(v: u64, bit_a: u64, bit_b: u64) -> u64 {
    let a = v & bit_a != 0;
    let b = v & bit_b != 0;
    if a == b { v } else { v ^ bit_a ^ bit_b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hts_ir::QubitId;

    fn p(s: &str) -> PauliString {
        s.parse().unwrap()
    }

    fn conj(s: &str, gate: CliffordGate, qubits: &[u32]) -> PauliString {
        let mut ps = p(s);
        let inst = Instruction::new(gate, qubits.iter().map(|&q| QubitId(q))).unwrap();
        ps.conjugate_by(&inst);
        ps
    }

    #[test]
    fn test_parse_and_display() {
        let ps = p("-XYZI");
        assert!(ps.is_negative());
        assert_eq!(ps.get(1), Pauli::Y);
        assert_eq!(ps.weight(), 3);
        assert_eq!(ps.to_string(), "-XYZI");
        assert_eq!(p("+ZZ").signed_label(), "+ZZ");

        assert!("XA".parse::<PauliString>().is_err());
        assert!("".parse::<PauliString>().is_err());
        assert!("-".parse::<PauliString>().is_err());
    }

    #[test]
    fn test_commutation() {
        assert!(p("XX").commutes_with(&p("ZZ")));
        assert!(!p("XI").commutes_with(&p("ZI")));
        assert!(p("XZZ").commutes_with(&p("ZXI")));
    }

    #[test]
    fn test_product_phases() {
        // X·Y = iZ
        let (r, k) = p("X").product(&p("Y"));
        assert_eq!(r.label(), "Z");
        assert_eq!(k, 1);
        // Z·Y = -iX
        let (r, k) = p("Z").product(&p("Y"));
        assert_eq!(r.label(), "X");
        assert_eq!(k, 3);
        // (XX)(ZZ) = (XZ)(XZ) = (-iY)(-iY) = -YY
        assert_eq!(p("XX").mul_commuting(&p("ZZ")), p("-YY"));
        assert_eq!(p("-XI").mul_commuting(&p("-IX")), p("XX"));
    }

    #[test]
    fn test_single_qubit_conjugation() {
        assert_eq!(conj("X", CliffordGate::H, &[0]), p("Z"));
        assert_eq!(conj("Y", CliffordGate::H, &[0]), p("-Y"));
        assert_eq!(conj("X", CliffordGate::S, &[0]), p("Y"));
        assert_eq!(conj("Y", CliffordGate::S, &[0]), p("-X"));
        assert_eq!(conj("X", CliffordGate::Sdg, &[0]), p("-Y"));
        assert_eq!(conj("Y", CliffordGate::Sdg, &[0]), p("X"));
        assert_eq!(conj("Z", CliffordGate::X, &[0]), p("-Z"));
        assert_eq!(conj("X", CliffordGate::Y, &[0]), p("-X"));
        assert_eq!(conj("Y", CliffordGate::Z, &[0]), p("-Y"));
    }

    #[test]
    fn test_two_qubit_conjugation() {
        assert_eq!(conj("XI", CliffordGate::CX, &[0, 1]), p("XX"));
        assert_eq!(conj("IZ", CliffordGate::CX, &[0, 1]), p("ZZ"));
        assert_eq!(conj("YZ", CliffordGate::CX, &[0, 1]), p("XY"));
        assert_eq!(conj("XZ", CliffordGate::CX, &[0, 1]), p("-YY"));
        assert_eq!(conj("XI", CliffordGate::CZ, &[0, 1]), p("XZ"));
        assert_eq!(conj("YX", CliffordGate::CZ, &[0, 1]), p("-XY"));
        assert_eq!(conj("XZI", CliffordGate::Swap, &[0, 2]), p("IZX"));
    }

    #[test]
    fn test_relabel_and_embed() {
        let ps = p("XYZ");
        assert_eq!(ps.relabeled(&[2, 0, 1]).label(), "YZX");
        assert_eq!(p("-XZ").embedded(4, &[3, 1]).to_string(), "-IZIX");
    }
}
