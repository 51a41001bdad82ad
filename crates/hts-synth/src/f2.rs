//! Linear algebra over GF(2) on packed Pauli rows.
//!
//! A row is the 128-bit vector `x | z << 64`. Each basis slot remembers which
//! input rows were combined to form it, so callers can recover the phase of a
//! combination by multiplying those rows.

use crate::pauli::PauliString;

/// Pack the symplectic bits of a Pauli string into one vector.
#[inline]
pub fn pack(p: &PauliString) -> u128 {
    u128::from(p.x_bits()) | (u128::from(p.z_bits()) << 64)
}

/// Incrementally built row-echelon basis, one slot per leading bit.
#[derive(Debug, Clone)]
pub struct XorBasis {
    slots: Vec<Option<(u128, u128)>>,
    rank: usize,
}

impl Default for XorBasis {
    fn default() -> Self {
        Self::new()
    }
}

impl XorBasis {
    /// An empty basis.
    pub fn new() -> Self {
        Self {
            slots: vec![None; 128],
            rank: 0,
        }
    }

    /// Number of independent vectors inserted so far.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Reduce `v` against the basis.
    ///
    /// Returns the residual and the combination of inserted rows that was
    /// subtracted. A zero residual means `v` is that combination.
    pub fn reduce(&self, mut v: u128) -> (u128, u128) {
        let mut combo = 0u128;
        while v != 0 {
            let top = 127 - v.leading_zeros() as usize;
            match self.slots[top] {
                Some((b, c)) => {
                    v ^= b;
                    combo ^= c;
                }
                None => break,
            }
        }
        (v, combo)
    }

    /// Insert `v`, tagged with `tag` (normally a single bit naming the input
    /// row). Returns `false` if `v` was already in the span.
    pub fn insert(&mut self, v: u128, tag: u128) -> bool {
        let mut v = v;
        let mut combo = tag;
        while v != 0 {
            let top = 127 - v.leading_zeros() as usize;
            match self.slots[top] {
                Some((b, c)) => {
                    v ^= b;
                    combo ^= c;
                }
                None => {
                    self.slots[top] = Some((v, combo));
                    self.rank += 1;
                    return true;
                }
            }
        }
        false
    }

    /// Whether `v` lies in the span.
    pub fn contains(&self, v: u128) -> bool {
        self.reduce(v).0 == 0
    }
}

/// GF(2) rank of a set of vectors.
pub fn rank(vectors: impl IntoIterator<Item = u128>) -> usize {
    let mut basis = XorBasis::new();
    for v in vectors {
        basis.insert(v, 0);
    }
    basis.rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank() {
        assert_eq!(rank([0b011, 0b101, 0b110]), 2);
        assert_eq!(rank([0b001, 0b010, 0b100]), 3);
        assert_eq!(rank([0, 0]), 0);
        assert_eq!(rank([1u128 << 127, 1]), 2);
    }

    #[test]
    fn test_reduce_recovers_combination() {
        let mut basis = XorBasis::new();
        assert!(basis.insert(0b1100, 0b01));
        assert!(basis.insert(0b0110, 0b10));
        assert!(!basis.insert(0b1010, 0b100));

        let (residual, combo) = basis.reduce(0b1010);
        assert_eq!(residual, 0);
        assert_eq!(combo, 0b11);
        assert!(!basis.contains(0b0001));
    }

    #[test]
    fn test_pack_layout() {
        let p: PauliString = "XZY".parse().unwrap();
        assert_eq!(pack(&p), 0b101 | (0b110u128 << 64));
    }
}
