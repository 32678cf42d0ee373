//! Exact rotation angles for use as classical gate arguments.
//!
//! A [`Phase`] is stored as a rational fraction of a full turn, so that the
//! special angles used to short-circuit parametric gates (0, π, π/2, ...) can
//! be compared exactly. All arithmetic is performed modulo 2*π*.

use std::{ f64::consts::TAU, fmt };
use num_complex::Complex64 as C64;
use num_rational::Rational64 as R64;
use num_traits::{ One, Zero };

// reduce a fraction of a turn into [0, 1)
fn turns(a: R64) -> R64 { a - a.floor() }

/// An angle, represented as the rational number *φ* such that the angle is
/// 2*π* × *φ*.
///
/// ```
/// # use qgates::phase::Phase;
/// assert_eq!( Phase::new(3, 4),     -Phase::new(1, 4) );
/// assert_eq!( Phase::pi() / 2,       Phase::pi2()     );
/// assert_eq!( Phase::pi2() + Phase::pi2(), Phase::pi() );
/// assert_eq!( Phase::pi4().to_string(), "π/4"          );
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Phase(R64);

impl PartialEq for Phase {
    fn eq(&self, other: &Self) -> bool { turns(self.0 - other.0).is_zero() }
}

impl Eq for Phase { }

impl PartialOrd for Phase {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Phase {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        turns(self.0).cmp(&turns(other.0))
    }
}

impl std::hash::Hash for Phase {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        turns(self.0).hash(state)
    }
}

impl Phase {
    /// Construct a new `Phase` as `(numer / denom) × 2π`.
    ///
    /// *Panics if `denom` is zero.*
    pub fn new(numer: i64, denom: i64) -> Self {
        Self(turns(R64::new(numer, denom)))
    }

    /// Approximate an angle in radians.
    ///
    /// Returns `None` if the angle is NaN, infinite, or otherwise has no
    /// rational approximation.
    pub fn from_float(f: f64) -> Option<Self> {
        R64::approximate_float(f / TAU).map(|ph| Self(turns(ph)))
    }

    /// Convert to an angle in radians in `[0, 2π)`.
    pub fn into_float(self) -> f64 {
        let ph = turns(self.0);
        TAU * (*ph.numer() as f64 / *ph.denom() as f64)
    }

    /// Return the fraction of a full turn represented by `self`, in `[0, 1)`.
    pub fn turns(self) -> R64 { turns(self.0) }

    /// 0 ≡ 2π.
    pub fn zero() -> Self { Self(R64::zero()) }

    /// π.
    pub fn pi() -> Self { Self(R64::new(1, 2)) }

    /// π/2.
    pub fn pi2() -> Self { Self(R64::new(1, 4)) }

    /// π/4.
    pub fn pi4() -> Self { Self(R64::new(1, 8)) }

    /// π/8.
    pub fn pi8() -> Self { Self(R64::new(1, 16)) }

    /// 2π/`n`.
    ///
    /// *Panics if `n` is zero.*
    pub fn frac(n: i64) -> Self { Self(turns(R64::new(1, n))) }

    /// Return `true` if `self` is zero modulo 2π.
    pub fn is_zero(self) -> bool { self == Self::zero() }

    /// Return `true` if `self` is an integer multiple of 2π/`n`.
    pub fn is_mult(self, n: i64) -> bool {
        (self.turns() * n).is_integer()
    }

    /// Return the complex number of modulus 1 with argument `self`.
    pub fn cis(self) -> C64 { C64::cis(self.into_float()) }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() { return write!(f, "0"); }
        // in units of π rather than 2π
        let modpi = self.turns() * 2;
        if modpi.is_one() {
            write!(f, "π")
        } else if *modpi.numer() == 1 {
            write!(f, "π/{}", modpi.denom())
        } else if *modpi.denom() <= 1000 {
            write!(f, "({})π", modpi)
        } else {
            write!(f, "{}π", *modpi.numer() as f64 / *modpi.denom() as f64)
        }
    }
}

impl std::ops::Neg for Phase {
    type Output = Phase;

    fn neg(self) -> Self::Output { Self(turns(-self.0)) }
}

impl std::ops::Add for Phase {
    type Output = Phase;

    fn add(self, rhs: Phase) -> Self::Output { Self(turns(self.0 + rhs.0)) }
}

impl std::ops::Sub for Phase {
    type Output = Phase;

    fn sub(self, rhs: Phase) -> Self::Output { Self(turns(self.0 - rhs.0)) }
}

impl std::ops::Mul<i64> for Phase {
    type Output = Phase;

    fn mul(self, rhs: i64) -> Self::Output { Self(turns(self.0 * rhs)) }
}

impl std::ops::Div<i64> for Phase {
    type Output = Phase;

    fn div(self, rhs: i64) -> Self::Output { Self(turns(self.0 / rhs)) }
}
