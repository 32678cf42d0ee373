//! Definitions of gates and their application to quantum-state backends.
//!
//! There are three layers:
//!
//! - [`GenericGate`] describes a family of gates parameterized by some number
//! of classical arguments (e.g. a rotation angle). [Binding][GenericGate::bind]
//! the arguments produces a [`Gate`].
//! - [`Gate`] describes an operation on a (usually fixed) number of qubits. It
//! is either *primitive*, in which case applying it hands it over to the
//! [`State`][crate::state::State] that owns its target qubits, or *composite*,
//! in which case applying it calls a decomposition that applies other gates in
//! turn.
//! - [`GateInstance`] is the immutable record of a single primitive
//! application, suitable for histories, replay, and display.
//!
//! ```
//! use qgates::{ circuit::Circuit, gate::*, gates::registry, phase::Phase };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let g = registry();
//! let circuit = Circuit::new();
//! let q = circuit.new_register(2, "q")?;
//!
//! // a controlled-Z rotation, decomposed into primitives for any angle
//! let crz = GenericGate::composite("CRz2", 2, 1, |args| {
//!     let half = args[0].as_f64() / 2.0;
//!     Body::composite(move |bits| {
//!         registry().rz.bind([half])?.apply(&bits[1])?;
//!         registry().cx.apply(bits)?;
//!         registry().rz.bind([-half])?.apply(&bits[1])?;
//!         registry().cx.apply(bits)
//!     })
//!     .into()
//! });
//!
//! g.h.apply(&q)?;
//! crz.bind([Phase::pi2()])?.apply(&q)?;
//! let history: Vec<String> =
//!     circuit.history().iter().map(|inst| inst.to_string()).collect();
//! assert_eq!(history[0], "H(0)");
//! assert_eq!(history[2], "Rz_0.7853981633974483(1)");
//! assert_eq!(history[3], "CX(0, 1)");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use thiserror::Error;
use crate::{ phase::Phase, state::StateError };

#[derive(Debug, Error)]
pub enum GateError {
    #[error("error binding gate '{gate}': expected {expected} classical argument(s), but got {actual}")]
    ArgMismatch { gate: String, expected: usize, actual: usize },

    #[error("error applying gate '{gate}': acts on {expected} qubit(s), but got {actual}")]
    BitMismatch { gate: String, expected: usize, actual: usize },

    #[error("error applying mask: exactly one of little- or big-endian must be specified")]
    MaskEndianness,

    #[error("error applying gate '{0}': no target qubit to reach a state through")]
    NoState(String),

    #[error("error applying gate '{0}': state is already in use")]
    StateBusy(String),

    #[error("error in replay: unknown gate '{0}'")]
    UnknownGate(String),

    #[error(transparent)]
    State(StateError),
}
pub type GateResult<T> = Result<T, GateError>;
use GateError::*;

impl GateError {
    /// Return `true` if `self` reports a mismatched number of classical
    /// arguments or target qubits.
    pub fn is_arity(&self) -> bool {
        matches!(self, ArgMismatch { .. } | BitMismatch { .. })
    }

    /// Return `true` if `self` reports an invalid way of calling a gate, rather
    /// than a count mismatch or a backend failure.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            MaskEndianness | NoState(_) | StateBusy(_) | UnknownGate(_)
        )
    }

    /// Return `true` if `self` was raised by a backend.
    pub fn is_state(&self) -> bool { matches!(self, State(_)) }
}

pub(crate) mod instance;
pub use instance::*;

#[allow(clippy::module_inception)]
pub(crate) mod gate;
pub use gate::*;

pub(crate) mod generic;
pub use generic::*;

/// Number of qubits a gate acts on.
///
/// Integers convert with the sign convention `n > 0` → `Fixed(n)`, `0` →
/// `Zero`, `n < 0` → `Variadic`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No target qubits; the gate acts on its state as a whole.
    Zero,
    /// Exactly this many target qubits.
    Fixed(usize),
    /// Any number of target qubits; not checked.
    Variadic,
}

impl From<i32> for Arity {
    fn from(size: i32) -> Self {
        match size {
            0 => Self::Zero,
            n if n > 0 => Self::Fixed(n as usize),
            _ => Self::Variadic,
        }
    }
}

impl Arity {
    /// Return `true` if `self` is `Zero`.
    pub fn is_zero(&self) -> bool { matches!(self, Self::Zero) }

    /// Return `true` if `self` is `Fixed`.
    pub fn is_fixed(&self) -> bool { matches!(self, Self::Fixed(_)) }

    /// Return `true` if `self` is `Variadic`.
    pub fn is_variadic(&self) -> bool { matches!(self, Self::Variadic) }

    /// Return the signed size, following the same convention as the integer
    /// conversion.
    pub fn size(&self) -> isize {
        match self {
            Self::Zero => 0,
            Self::Fixed(n) => *n as isize,
            Self::Variadic => -1,
        }
    }
}

/// Number of classical arguments a [`GenericGate`] takes.
///
/// Integers convert with `n >= 0` → `Exact(n)` and `n < 0` → `Any`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgCount {
    Exact(usize),
    Any,
}

impl From<i32> for ArgCount {
    fn from(n: i32) -> Self {
        if n >= 0 { Self::Exact(n as usize) } else { Self::Any }
    }
}

/// A classical gate argument.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Arg {
    /// An exact angle.
    Phase(Phase),
    /// A real number; angles are in radians.
    Real(f64),
    /// An integer.
    Int(i64),
}

impl From<Phase> for Arg {
    fn from(ph: Phase) -> Self { Self::Phase(ph) }
}

impl From<f64> for Arg {
    fn from(x: f64) -> Self { Self::Real(x) }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self { Self::Int(n) }
}

impl Arg {
    /// Return the argument as a real number, converting phases to radians.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Phase(ph) => ph.into_float(),
            Self::Real(x) => *x,
            Self::Int(n) => *n as f64,
        }
    }

    /// Return the argument as an exact angle, approximating other numbers as
    /// radians.
    pub fn as_phase(&self) -> Option<Phase> {
        match self {
            Self::Phase(ph) => Some(*ph),
            Self::Real(x) => Phase::from_float(*x),
            Self::Int(n) => Phase::from_float(*n as f64),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phase(ph) => fmt::Display::fmt(ph, f),
            Self::Real(x) => fmt::Display::fmt(x, f),
            Self::Int(n) => fmt::Display::fmt(n, f),
        }
    }
}

/// Anything identified by a gate name.
///
/// Two gates (or instances) are of the same *kind* if their names are equal,
/// whatever their classical arguments.
pub trait GateKind {
    /// Return the gate name.
    fn name(&self) -> &str;

    /// Return `true` if `self` and `other` are the same kind of gate.
    fn instance_of<K>(&self, other: &K) -> bool
    where K: GateKind + ?Sized
    {
        self.name() == other.name()
    }
}
