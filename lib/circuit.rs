//! A recording backend that owns qubit allocation and the history of applied
//! gates.
//!
//! [`Circuit`] doesn't simulate anything: every primitive gate that reaches it
//! is appended to an ordered, append-only history of [`GateInstance`]s, which
//! can later be inspected, displayed, or replayed onto another circuit.
//!
//! ```
//! # use qgates::{ circuit::Circuit, gates::registry };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let g = registry();
//! let circuit = Circuit::new();
//! let q = circuit.new_register(2, "q")?;
//! g.h.apply(&q[0])?;
//! g.cx.apply(&q)?;
//! assert_eq!(circuit.to_string(), "H(0)\nCX(0, 1)");
//! assert_eq!(circuit.labels(), vec!["q_0", "q_1"]);
//! # Ok(())
//! # }
//! ```

use std::{ cell::RefCell, fmt, rc::Rc };
use itertools::Itertools;
use thiserror::Error;
use crate::{
    gate::{ Gate, GateError, GateInstance, GateResult },
    gates::{ registry, Entry },
    state::{ Qubit, State, StateError, StateRef },
};

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("error applying gate '{0}': qubit {1} is out of range for a circuit of {2} qubit(s)")]
    QubitOutOfRange(String, usize, usize),

    #[error("error adding register: a register named '{0}' already exists")]
    DuplicateRegister(String),

    #[error("error adding register: registers must have at least one qubit")]
    EmptyRegister,
}
pub type CircuitResult<T> = Result<T, CircuitError>;
use CircuitError::*;

/// Options for a [`Circuit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CircuitOptions {
    /// Append applied gates to the history. If `false`, gates are still
    /// checked against the circuit's qubits but not recorded.
    pub record_history: bool,
}

impl Default for CircuitOptions {
    fn default() -> Self { Self { record_history: true } }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Register {
    name: String,
    bits: Vec<usize>,
}

#[derive(Debug, Default)]
struct CircuitData {
    n: usize,
    registers: Vec<Register>,
    history: Vec<GateInstance>,
    options: CircuitOptions,
}

impl State for CircuitData {
    fn apply_gate(&mut self, gate: &Gate, bits: &[Qubit])
        -> Result<(), StateError>
    {
        if let Some(q) = bits.iter().find(|q| q.index() >= self.n) {
            return Err(
                QubitOutOfRange(gate.name().to_string(), q.index(), self.n).into()
            );
        }
        if self.options.record_history {
            self.history.push(gate.make_instance(bits));
        }
        Ok(())
    }
}

/// A collection of named qubit registers and the history of gates applied to
/// them.
///
/// `Circuit` is a shared handle; clones refer to the same circuit.
#[derive(Clone)]
pub struct Circuit(Rc<RefCell<CircuitData>>);

impl Default for Circuit {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0.borrow(), f)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.borrow().history.iter().join("\n"))
    }
}

impl Circuit {
    /// Create a new, empty circuit.
    pub fn new() -> Self { Self::with_options(CircuitOptions::default()) }

    /// Create a new, empty circuit with options.
    pub fn with_options(options: CircuitOptions) -> Self {
        let data = CircuitData { options, ..CircuitData::default() };
        Self(Rc::new(RefCell::new(data)))
    }

    fn state_ref(&self) -> StateRef { self.0.clone() }

    /// Return the total number of qubits.
    pub fn n(&self) -> usize { self.0.borrow().n }

    /// Allocate a new register of `n` qubits named `name`.
    pub fn new_register(&self, n: usize, name: &str) -> CircuitResult<Vec<Qubit>> {
        if n == 0 { return Err(EmptyRegister); }
        let mut data = self.0.borrow_mut();
        if data.registers.iter().any(|reg| reg.name == name) {
            return Err(DuplicateRegister(name.to_string()));
        }
        let bits: Vec<usize> = (data.n..data.n + n).collect();
        data.n += n;
        data.registers.push(Register { name: name.to_string(), bits: bits.clone() });
        drop(data);
        Ok(bits.into_iter().map(|k| self.qubit(k)).collect())
    }

    /// Return a handle to the `k`-th qubit.
    ///
    /// The index is not checked until a gate is applied to the qubit.
    pub fn qubit(&self, k: usize) -> Qubit { Qubit::new(k, self.state_ref()) }

    /// Return handles to all qubits of the register `name`, if it exists.
    pub fn register(&self, name: &str) -> Option<Vec<Qubit>> {
        let bits =
            self.0.borrow().registers.iter()
            .find(|reg| reg.name == name)
            .map(|reg| reg.bits.clone())?;
        Some(bits.into_iter().map(|k| self.qubit(k)).collect())
    }

    /// Return the names of all registers, in order of allocation.
    pub fn register_names(&self) -> Vec<String> {
        self.0.borrow().registers.iter().map(|reg| reg.name.clone()).collect()
    }

    /// Return a label for every qubit: the register name for single-qubit
    /// registers, or `name_i` for the `i`-th qubit of larger ones.
    pub fn labels(&self) -> Vec<String> {
        let data = self.0.borrow();
        let mut labels = vec![String::new(); data.n];
        for reg in data.registers.iter() {
            if let [k] = reg.bits.as_slice() {
                labels[*k] = reg.name.clone();
            } else {
                for (i, k) in reg.bits.iter().enumerate() {
                    labels[*k] = format!("{}_{}", reg.name, i);
                }
            }
        }
        labels
    }

    /// Return a copy of the history.
    pub fn history(&self) -> Vec<GateInstance> { self.0.borrow().history.clone() }

    /// Return the number of recorded gates.
    pub fn len(&self) -> usize { self.0.borrow().history.len() }

    /// Return `true` if no gates have been recorded.
    pub fn is_empty(&self) -> bool { self.0.borrow().history.is_empty() }

    /// Return `true` if any recorded gate cannot be simulated by restricted
    /// methods.
    pub fn is_divergent(&self) -> bool {
        self.0.borrow().history.iter().any(|inst| inst.is_divergent())
    }

    /// Return `true` if any recorded gate is a measurement.
    pub fn has_measurement(&self) -> bool {
        self.0.borrow().history.iter().any(|inst| inst.is_measurement())
    }

    /// Re-apply the standard gates recorded in `history` to the qubits of
    /// `self` with the same indices.
    ///
    /// Zero-arity gates are routed through qubit 0, failing with
    /// [`GateError::NoState`] if `self` has no qubits. Fails on the first
    /// instance whose name is not in the [registry][crate::gates::Registry],
    /// leaving earlier instances applied.
    pub fn replay(&self, history: &[GateInstance]) -> GateResult<()> {
        for inst in history.iter() {
            let gate =
                match registry().get(inst.name()) {
                    Some(Entry::Gate(gate)) => gate.clone(),
                    Some(Entry::Generic(family)) =>
                        family.bind(inst.args().iter().copied())?,
                    None => {
                        return Err(GateError::UnknownGate(inst.name().to_string()));
                    },
                };
            let bits: Vec<Qubit> =
                if inst.bits().is_empty() {
                    if self.n() == 0 {
                        return Err(GateError::NoState(inst.name().to_string()));
                    }
                    vec![self.qubit(0)]
                } else {
                    inst.bits().iter().map(|k| self.qubit(*k)).collect()
                };
            gate.apply_single(&bits)?;
        }
        Ok(())
    }
}
