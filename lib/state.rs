//! Interface to the quantum-state backends that gates are ultimately applied
//! to, and the qubit handles used to reach them.

use std::{ cell::RefCell, fmt, rc::Rc };
use crate::gate::Gate;

/// Error type returned by a [`State`] backend.
///
/// Backend errors are passed through gate application untouched; see
/// [`GateError::State`][crate::gate::GateError::State].
pub type StateError = Box<dyn std::error::Error + Send + Sync>;

/// Shared, mutable reference to a backend.
pub type StateRef = Rc<RefCell<dyn State>>;

/// A quantum-state backend.
///
/// This is the only point at which a gate has any effect: every primitive
/// application eventually lands in a call to [`apply_gate`][Self::apply_gate].
/// The backend is responsible for the actual unitary or measurement effect and
/// for recording the application (e.g. via [`Gate::make_instance`]) if it keeps
/// a history.
pub trait State {
    /// Apply the primitive `gate` to `bits`.
    ///
    /// `bits` is empty for zero-arity gates, which act on the state as a whole
    /// (e.g. a global phase).
    fn apply_gate(&mut self, gate: &Gate, bits: &[Qubit]) -> Result<(), StateError>;
}

/// Handle to a single qubit, owned by some [`State`].
///
/// Cloning a `Qubit` is cheap and produces a handle to the same qubit.
#[derive(Clone)]
pub struct Qubit {
    index: usize,
    state: StateRef,
}

impl Qubit {
    /// Create a handle to the `index`-th qubit of `state`.
    pub fn new(index: usize, state: StateRef) -> Self { Self { index, state } }

    /// Return the index of the qubit in its backend.
    pub fn index(&self) -> usize { self.index }

    /// Return a reference to the owning backend.
    pub fn state(&self) -> &StateRef { &self.state }

    /// Return `true` if `self` and `other` belong to the same backend.
    pub fn same_state(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qubit({})", self.index)
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// Anything that can be read as a bit index for a
/// [`GateInstance`][crate::gate::GateInstance].
pub trait BitIndex {
    fn bit_index(&self) -> usize;
}

impl BitIndex for usize {
    fn bit_index(&self) -> usize { *self }
}

impl BitIndex for &usize {
    fn bit_index(&self) -> usize { **self }
}

impl BitIndex for Qubit {
    fn bit_index(&self) -> usize { self.index }
}

impl BitIndex for &Qubit {
    fn bit_index(&self) -> usize { self.index }
}

/// Conversion into the flat, ordered sequence of target qubits for a gate
/// application.
///
/// A single qubit, a slice, array, or `Vec` of qubits, and an array or slice of
/// qubit references are all accepted, so that a whole register can be passed
/// in place of its individual qubits.
pub trait IntoBits {
    fn into_bits(self) -> Vec<Qubit>;
}

impl IntoBits for &Qubit {
    fn into_bits(self) -> Vec<Qubit> { vec![self.clone()] }
}

impl IntoBits for Vec<Qubit> {
    fn into_bits(self) -> Vec<Qubit> { self }
}

impl IntoBits for &Vec<Qubit> {
    fn into_bits(self) -> Vec<Qubit> { self.clone() }
}

impl IntoBits for &[Qubit] {
    fn into_bits(self) -> Vec<Qubit> { self.to_vec() }
}

impl<const N: usize> IntoBits for &[Qubit; N] {
    fn into_bits(self) -> Vec<Qubit> { self.to_vec() }
}

impl IntoBits for &[&Qubit] {
    fn into_bits(self) -> Vec<Qubit> { self.iter().map(|q| (*q).clone()).collect() }
}

impl<const N: usize> IntoBits for [&Qubit; N] {
    fn into_bits(self) -> Vec<Qubit> { self.into_iter().cloned().collect() }
}
