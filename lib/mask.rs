//! Per-bit selection masks for broadcast application of single-qubit gates.
//!
//! A mask is either an integer bitmask or a sequence already in per-position
//! form. Either way it is expanded to a window of exactly `n` booleans, in one
//! of two bit-ordering conventions:
//!
//! - *little-endian*: position 0 is the least-significant bit of the mask;
//! - *big-endian*: position 0 is bit `n - 1`, the most-significant bit of the
//! window.
//!
//! The two conventions are mirror images of each other.
//!
//! ```
//! # use qgates::mask::*;
//! assert_eq!(to_bits_le(0b0011, 4), vec![true,  true,  false, false]);
//! assert_eq!(to_bits_be(0b0011, 4), vec![false, false, true,  true ]);
//! ```

/// Bit ordering convention used to expand a [`Mask`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endian {
    /// Position 0 is the least-significant bit.
    Little,
    /// Position 0 is the most-significant bit of the window.
    Big,
}

/// A selection of positions in an ordered sequence of qubits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mask {
    /// Integer bitmask. Bits past position 63 read as unset.
    Int(u64),
    /// Explicit per-position flags, read in little-endian order.
    Seq(Vec<bool>),
}

impl From<u64> for Mask {
    fn from(m: u64) -> Self { Self::Int(m) }
}

impl From<u32> for Mask {
    fn from(m: u32) -> Self { Self::Int(m.into()) }
}

impl From<i32> for Mask {
    /// Negative values are reinterpreted as their two's-complement bit pattern,
    /// so `-1` selects every position.
    fn from(m: i32) -> Self { Self::Int(i64::from(m) as u64) }
}

impl From<Vec<bool>> for Mask {
    fn from(m: Vec<bool>) -> Self { Self::Seq(m) }
}

impl From<&[bool]> for Mask {
    fn from(m: &[bool]) -> Self { Self::Seq(m.to_vec()) }
}

impl<const N: usize> From<[bool; N]> for Mask {
    fn from(m: [bool; N]) -> Self { Self::Seq(m.to_vec()) }
}

impl Mask {
    // read position `k`, counting from the least-significant end
    fn get(&self, k: usize) -> bool {
        match self {
            Self::Int(m) => k < 64 && (m >> k) & 1 == 1,
            Self::Seq(m) => m.get(k).copied().unwrap_or(false),
        }
    }

    /// Expand `self` to exactly `n` flags in the given convention.
    pub fn expand(&self, n: usize, endian: Endian) -> Vec<bool> {
        match endian {
            Endian::Little => (0..n).map(|k| self.get(k)).collect(),
            Endian::Big => (0..n).rev().map(|k| self.get(k)).collect(),
        }
    }
}

/// Expand `mask` to `n` flags, with position 0 taken from the least-significant
/// bit.
pub fn to_bits_le<M>(mask: M, n: usize) -> Vec<bool>
where M: Into<Mask>
{
    mask.into().expand(n, Endian::Little)
}

/// Expand `mask` to `n` flags, with position 0 taken from bit `n - 1`.
pub fn to_bits_be<M>(mask: M, n: usize) -> Vec<bool>
where M: Into<Mask>
{
    mask.into().expand(n, Endian::Big)
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use super::*;

    #[test]
    fn int_le() {
        assert_eq!(to_bits_le(0b101_u64, 3), vec![true, false, true]);
        assert_eq!(to_bits_le(0b110_u64, 3), vec![false, true, true]);
        assert_eq!(to_bits_le(0b110_u64, 5), vec![false, true, true, false, false]);
        assert_eq!(to_bits_le(0b110_u64, 2), vec![false, true]);
        assert!(to_bits_le(0_u64, 0).is_empty());
    }

    #[test]
    fn int_be() {
        assert_eq!(to_bits_be(0b110_u64, 3), vec![true, true, false]);
        assert_eq!(to_bits_be(0b110_u64, 5), vec![false, false, true, true, false]);
        assert_eq!(to_bits_be(0b110_u64, 2), vec![true, false]);
    }

    #[test]
    fn wide_window() {
        let le = to_bits_le(u64::MAX, 70);
        assert!(le[..64].iter().all(|b| *b));
        assert!(le[64..].iter().all(|b| !*b));
        assert_eq!(to_bits_le(-1, 4), vec![true; 4]);
    }

    #[test]
    fn seq() {
        assert_eq!(to_bits_le([true, false], 3), vec![true, false, false]);
        assert_eq!(to_bits_be([true, false], 3), vec![false, false, true]);
        assert_eq!(to_bits_le(vec![false, true, true], 2), vec![false, true]);
    }

    #[test]
    fn mirror() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let m: u64 = rng.gen();
            let n: usize = rng.gen_range(0..=64);
            let mut le = to_bits_le(m, n);
            le.reverse();
            assert_eq!(le, to_bits_be(m, n));
        }
    }
}
