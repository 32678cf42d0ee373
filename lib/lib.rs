#![allow(clippy::module_inception)]

//! Definition and application of quantum gates, independent of how the qubits
//! they act on are simulated or recorded.
//!
//! - [`gate`] provides fixed gates ([`Gate`][gate::Gate]), families of gates
//! parameterized by classical arguments
//! ([`GenericGate`][gate::GenericGate]), and the records left behind when a
//! gate is applied ([`GateInstance`][gate::GateInstance]). Gates are either
//! primitive, in which case they're handed off to a backend, or composite,
//! in which case they expand into other gates.
//! - [`state`] defines the [`State`][state::State] trait implemented by
//! backends and the [`Qubit`][state::Qubit] handles gates are applied to.
//! - [`mask`] selects the qubits a single-qubit gate is broadcast over.
//! - [`gates`] holds the standard gate set, shared by the whole program.
//! - [`circuit`] is a backend that only records what it's given.
//! - [`unitary`] gives matrix forms for the standard gates.
//!
//! [Quantum logic gates][wiki] are described in the usual
//! [circuit notation][qcircuits].
//!
//! [wiki]: https://en.wikipedia.org/wiki/Quantum_logic_gate
//! [qcircuits]: https://en.wikipedia.org/wiki/Quantum_circuit

pub mod phase;
pub mod mask;
pub mod state;
pub mod gate;
pub mod gates;
pub mod unitary;
pub mod circuit;

pub extern crate num_complex;
/// Create `num_complex::Complex64`s with succinct syntax.
///
/// ```
/// use std::f64::consts::FRAC_PI_2;
/// use num_complex::Complex64;
/// use qgates::c;
///
/// assert_eq!( c!(i -1.0),        Complex64::new(0.0, -1.0)             );
/// assert_eq!( c!(e FRAC_PI_2),   Complex64::cis(FRAC_PI_2)             );
/// assert_eq!( c!(0.5),           Complex64::new(0.5, 0.0)              );
/// assert_eq!( c!(0.5, 2.0),      Complex64::new(0.5, 2.0)              );
/// assert_eq!( c!(2.0, e FRAC_PI_2), Complex64::from_polar(2.0, FRAC_PI_2) );
/// ```
#[macro_export]
macro_rules! c {
    ( i $im:expr )
        => { $crate::num_complex::Complex64::new(0.0, $im) };
    ( e $ph:expr )
        => { $crate::num_complex::Complex64::cis($ph) };
    ( $re:expr )
        => { $crate::num_complex::Complex64::new($re, 0.0) };
    ( $r:expr, e $ph:expr )
        => { $crate::num_complex::Complex64::from_polar($r, $ph) };
    ( $re:expr, $im:expr )
        => { $crate::num_complex::Complex64::new($re, $im) };
}
