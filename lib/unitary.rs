//! Unitary matrices for the standard gates.
//!
//! Matrices are given in the computational basis with the first target qubit
//! as the most significant bit, so that for controlled gates the controls come
//! first and the target block sits in the lower-right corner.

use std::f64::consts::FRAC_1_SQRT_2;
use ndarray::{ array, s, Array2 };
use num_complex::Complex64 as C64;
use crate::{ c, gate::Arg };

/// Identity on `n` qubits.
pub fn identity(n: usize) -> Array2<C64> { Array2::eye(1 << n) }

/// Embed the single- or multi-qubit unitary `u` in the lower-right block of an
/// identity with `controls` additional control qubits.
pub fn controlled(u: &Array2<C64>, controls: usize) -> Array2<C64> {
    let dim = u.nrows() << controls;
    let off = dim - u.nrows();
    let mut out = Array2::eye(dim);
    out.slice_mut(s![off.., off..]).assign(u);
    out
}

/// Global phase `e^{iθ}` as a 1 × 1 matrix.
pub fn p(theta: f64) -> Array2<C64> { array![[c!(e theta)]] }

/// Rotation by `theta` about *x*.
pub fn rx(theta: f64) -> Array2<C64> {
    let (s, c) = (theta / 2.0).sin_cos();
    array![
        [c!(c),    c!(i -s)],
        [c!(i -s), c!(c)   ],
    ]
}

/// Rotation by `theta` about *y*.
pub fn ry(theta: f64) -> Array2<C64> {
    let (s, c) = (theta / 2.0).sin_cos();
    array![
        [c!(c), c!(-s)],
        [c!(s), c!(c) ],
    ]
}

/// Rotation by `theta` about *z*.
pub fn rz(theta: f64) -> Array2<C64> {
    array![
        [c!(e -theta / 2.0), c!(0.0)           ],
        [c!(0.0),            c!(e theta / 2.0) ],
    ]
}

/// Phase `e^{iθ}` on the ∣1⟩ component.
fn phase1(theta: f64) -> Array2<C64> {
    array![
        [c!(1.0), c!(0.0)    ],
        [c!(0.0), c!(e theta)],
    ]
}

fn x() -> Array2<C64> {
    array![[c!(0.0), c!(1.0)], [c!(1.0), c!(0.0)]]
}

fn y() -> Array2<C64> {
    array![[c!(0.0), c!(i -1.0)], [c!(i 1.0), c!(0.0)]]
}

fn z() -> Array2<C64> {
    array![[c!(1.0), c!(0.0)], [c!(0.0), c!(-1.0)]]
}

fn h() -> Array2<C64> {
    let r = FRAC_1_SQRT_2;
    array![[c!(r), c!(r)], [c!(r), c!(-r)]]
}

fn swap() -> Array2<C64> {
    let mut out: Array2<C64> = Array2::zeros((4, 4));
    out[[0, 0]] = c!(1.0);
    out[[1, 2]] = c!(1.0);
    out[[2, 1]] = c!(1.0);
    out[[3, 3]] = c!(1.0);
    out
}

/// Return the unitary matrix of the standard gate `name` bound to `args`.
///
/// Returns `None` for unknown names, measurements, composites with no fixed
/// matrix, or parametric gates with missing arguments.
pub fn matrix(name: &str, args: &[Arg]) -> Option<Array2<C64>> {
    use std::f64::consts::{ FRAC_PI_2, FRAC_PI_4 };
    let theta = || args.first().map(|a| a.as_f64());
    let mat =
        match name {
            "P" => p(theta()?),
            "I1" => identity(1),
            "X" => x(),
            "Y" => y(),
            "Z" => z(),
            "H" => h(),
            "S" => phase1(FRAC_PI_2),
            "Sd" => phase1(-FRAC_PI_2),
            "T" => phase1(FRAC_PI_4),
            "Td" => phase1(-FRAC_PI_4),
            "Rx" => rx(theta()?),
            "Ry" => ry(theta()?),
            "Rz" => rz(theta()?),
            "I2" => identity(2),
            "SWAP" => swap(),
            "CX" => controlled(&x(), 1),
            "CY" => controlled(&y(), 1),
            "CZ" => controlled(&z(), 1),
            "CS" => controlled(&phase1(FRAC_PI_2), 1),
            "CSd" => controlled(&phase1(-FRAC_PI_2), 1),
            "CT" => controlled(&phase1(FRAC_PI_4), 1),
            "CTd" => controlled(&phase1(-FRAC_PI_4), 1),
            "CRz" => controlled(&phase1(theta()?), 1),
            "I3" => identity(3),
            "CSWAP" => controlled(&swap(), 1),
            "CCX" => controlled(&x(), 2),
            "CCRz" => controlled(&phase1(theta()?), 2),
            _ => { return None; },
        };
    Some(mat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_unitary(u: &Array2<C64>) -> bool {
        let prod = u.t().mapv(|z| z.conj()).dot(u);
        let eye: Array2<C64> = Array2::eye(u.nrows());
        (prod - eye).iter().all(|z| z.norm() < 1e-12)
    }

    #[test]
    fn standard_unitaries() {
        let names = [
            "I1", "X", "Y", "Z", "H", "S", "Sd", "T", "Td", "I2", "SWAP",
            "CX", "CY", "CZ", "CS", "CSd", "CT", "CTd", "I3", "CSWAP", "CCX",
        ];
        for name in names {
            let u = matrix(name, &[]).unwrap();
            assert!(is_unitary(&u), "{name} is not unitary");
        }
        for name in ["P", "Rx", "Ry", "Rz", "CRz", "CCRz"] {
            let u = matrix(name, &[Arg::Real(0.3)]).unwrap();
            assert!(is_unitary(&u), "{name} is not unitary");
            assert!(matrix(name, &[]).is_none());
        }
        assert!(matrix("M", &[]).is_none());
        assert!(matrix("noGate", &[]).is_none());
    }

    #[test]
    fn dimensions() {
        assert_eq!(matrix("P", &[Arg::Real(1.0)]).unwrap().dim(), (1, 1));
        assert_eq!(matrix("H", &[]).unwrap().dim(), (2, 2));
        assert_eq!(matrix("CX", &[]).unwrap().dim(), (4, 4));
        assert_eq!(matrix("CCX", &[]).unwrap().dim(), (8, 8));
    }

    #[test]
    fn controlled_blocks() {
        let cx = matrix("CX", &[]).unwrap();
        assert_eq!(cx[[2, 3]], c!(1.0));
        assert_eq!(cx[[3, 2]], c!(1.0));
        assert_eq!(cx[[2, 2]], c!(0.0));
        assert_eq!(cx[[0, 0]], c!(1.0));

        let ccx = matrix("CCX", &[]).unwrap();
        assert_eq!(ccx[[6, 7]], c!(1.0));
        assert_eq!(ccx[[5, 5]], c!(1.0));
    }

    #[test]
    fn rotations_at_pi() {
        use std::f64::consts::PI;
        let rx = rx(PI);
        assert!((rx[[0, 1]] - c!(i -1.0)).norm() < 1e-12);
        let rz = rz(PI);
        assert!((rz[[0, 0]] - c!(i -1.0)).norm() < 1e-12);
        assert!((rz[[1, 1]] - c!(i 1.0)).norm() < 1e-12);
    }
}
