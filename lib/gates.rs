//! The standard gate set.
//!
//! All standard gates live in a single [`Registry`], built on first use and
//! never modified afterward. Gates are looked up either through the registry's
//! fields or by name with [`Registry::get`].
//!
//! ```
//! # use qgates::{ circuit::Circuit, gates::{ registry, Entry }, phase::Phase };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let g = registry();
//! let circuit = Circuit::new();
//! let a = circuit.new_register(3, "a")?;
//! let x = circuit.new_register(1, "x")?;
//!
//! g.h.apply(&a)?;
//! g.rz.bind([Phase::pi4()])?.apply(&a[1])?;
//! g.swap.apply([&a[1], &x[0]])?;
//! g.cx.apply([&a[0], &x[0]])?;
//! g.crz.bind([Phase::frac(6)])?.apply([&a[1], &a[2]])?;
//!
//! assert_eq!(circuit.history().len(), 7);
//! assert!(matches!(g.get("CNOT"), Some(Entry::Gate(cx)) if cx.name() == "CX"));
//! # Ok(())
//! # }
//! ```

use std::sync::OnceLock;
use rustc_hash::FxHashMap;
use crate::gate::{ Gate, GenericGate };

/// A registered gate.
#[derive(Copy, Clone, Debug)]
pub enum Entry<'a> {
    /// A gate with no classical arguments.
    Gate(&'a Gate),
    /// A family of gates with classical arguments.
    Generic(&'a GenericGate),
}

impl<'a> Entry<'a> {
    /// Return `true` if `self` is `Gate`.
    pub fn is_gate(&self) -> bool { matches!(self, Self::Gate(_)) }

    /// Return `true` if `self` is `Generic`.
    pub fn is_generic(&self) -> bool { matches!(self, Self::Generic(_)) }
}

// which field of `Registry` a name refers to
#[derive(Copy, Clone)]
enum Slot {
    Gate(fn(&Registry) -> &Gate),
    Generic(fn(&Registry) -> &GenericGate),
}

/// The standard gate set.
pub struct Registry {
    /// Does nothing to any number of qubits.
    pub no_gate: Gate,

    /// Single-qubit measurement.
    pub m: Gate,

    /// Global phase `e^{iθ}`.
    pub p: GenericGate,

    /// Hadamard.
    pub h: Gate,
    /// Single-qubit identity.
    pub i1: Gate,
    /// Pauli *X*.
    pub x: Gate,
    /// Pauli *Y*.
    pub y: Gate,
    /// Pauli *Z*.
    pub z: Gate,
    /// π/2 phase.
    pub s: Gate,
    /// -π/2 phase.
    pub sd: Gate,
    /// π/4 phase.
    pub t: Gate,
    /// -π/4 phase.
    pub td: Gate,
    /// Rotation about *x*.
    pub rx: GenericGate,
    /// Rotation about *y*.
    pub ry: GenericGate,
    /// Rotation about *z*.
    pub rz: GenericGate,

    /// Two-qubit identity.
    pub i2: Gate,
    pub swap: Gate,
    /// Controlled *X* (CNOT).
    pub cx: Gate,
    pub cy: Gate,
    pub cz: Gate,
    pub cs: Gate,
    pub csd: Gate,
    pub ct: Gate,
    pub ctd: Gate,
    /// Controlled phase rotation.
    pub crz: GenericGate,

    /// Three-qubit identity.
    pub i3: Gate,
    /// Controlled swap (Fredkin).
    pub cswap: Gate,
    /// Doubly controlled *X* (Toffoli).
    pub ccx: Gate,
    /// Doubly controlled phase rotation.
    pub ccrz: GenericGate,

    names: FxHashMap<&'static str, Slot>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&&str> = self.names.keys().collect();
        names.sort();
        f.debug_struct("Registry").field("names", &names).finish()
    }
}

/// Return the standard gate set.
///
/// The registry is constructed on first use and shared for the lifetime of the
/// program.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::build)
}

impl Registry {
    fn build() -> Self {
        let names: FxHashMap<&'static str, Slot> =
            [
                ("noGate", Slot::Gate(|r| &r.no_gate)),
                ("M",      Slot::Gate(|r| &r.m)),
                ("P",      Slot::Generic(|r| &r.p)),
                ("H",      Slot::Gate(|r| &r.h)),
                ("I1",     Slot::Gate(|r| &r.i1)),
                ("X",      Slot::Gate(|r| &r.x)),
                ("Y",      Slot::Gate(|r| &r.y)),
                ("Z",      Slot::Gate(|r| &r.z)),
                ("S",      Slot::Gate(|r| &r.s)),
                ("Sd",     Slot::Gate(|r| &r.sd)),
                ("T",      Slot::Gate(|r| &r.t)),
                ("Td",     Slot::Gate(|r| &r.td)),
                ("Rx",     Slot::Generic(|r| &r.rx)),
                ("Ry",     Slot::Generic(|r| &r.ry)),
                ("Rz",     Slot::Generic(|r| &r.rz)),
                ("I2",     Slot::Gate(|r| &r.i2)),
                ("SWAP",   Slot::Gate(|r| &r.swap)),
                ("CX",     Slot::Gate(|r| &r.cx)),
                ("CNOT",   Slot::Gate(|r| &r.cx)),
                ("CY",     Slot::Gate(|r| &r.cy)),
                ("CZ",     Slot::Gate(|r| &r.cz)),
                ("CS",     Slot::Gate(|r| &r.cs)),
                ("CSd",    Slot::Gate(|r| &r.csd)),
                ("CT",     Slot::Gate(|r| &r.ct)),
                ("CTd",    Slot::Gate(|r| &r.ctd)),
                ("CRz",    Slot::Generic(|r| &r.crz)),
                ("I3",     Slot::Gate(|r| &r.i3)),
                ("CSWAP",  Slot::Gate(|r| &r.cswap)),
                ("CCX",    Slot::Gate(|r| &r.ccx)),
                ("TOFF",   Slot::Gate(|r| &r.ccx)),
                ("CCRz",   Slot::Generic(|r| &r.ccrz)),
            ]
            .into_iter()
            .collect();

        Self {
            no_gate: Gate::composite("noGate", -1, |_| Ok(())),

            m: Gate::new("M", 1).with_measurement(true),

            p: GenericGate::new("P", 0, 1),

            h: Gate::new("H", 1).with_divergent(true),
            i1: Gate::new("I1", 1),
            x: Gate::new("X", 1),
            y: Gate::new("Y", 1),
            z: Gate::new("Z", 1),
            s: Gate::new("S", 1),
            sd: Gate::new("Sd", 1),
            t: Gate::new("T", 1),
            td: Gate::new("Td", 1),
            rx: GenericGate::new("Rx", 1, 1),
            ry: GenericGate::new("Ry", 1, 1),
            rz: GenericGate::new("Rz", 1, 1),

            i2: Gate::new("I2", 2),
            swap: Gate::new("SWAP", 2),
            cx: Gate::new("CX", 2),
            cy: Gate::new("CY", 2),
            cz: Gate::new("CZ", 2),
            cs: Gate::new("CS", 2),
            csd: Gate::new("CSd", 2),
            ct: Gate::new("CT", 2),
            ctd: Gate::new("CTd", 2),
            crz: GenericGate::new("CRz", 2, 1),

            i3: Gate::new("I3", 3),
            cswap: Gate::new("CSWAP", 3),
            ccx: Gate::new("CCX", 3),
            ccrz: GenericGate::new("CCRz", 3, 1),

            names,
        }
    }

    /// Look up a gate by name.
    ///
    /// `CNOT` and `TOFF` are accepted as aliases for `CX` and `CCX`.
    pub fn get(&self, name: &str) -> Option<Entry<'_>> {
        self.names.get(name)
            .map(|slot| {
                match slot {
                    Slot::Gate(f) => Entry::Gate(f(self)),
                    Slot::Generic(f) => Entry::Generic(f(self)),
                }
            })
    }

    /// Return an iterator over all registered names, including aliases, in
    /// arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::gate::{ Arity, ArgCount, GateKind };
    use super::*;

    #[test]
    fn lookup() {
        let g = registry();
        for name in g.names() {
            let found =
                match g.get(name) {
                    Some(Entry::Gate(gate)) => gate.name().to_string(),
                    Some(Entry::Generic(family)) => family.name().to_string(),
                    None => panic!("missing {name}"),
                };
            match name {
                "CNOT" => assert_eq!(found, "CX"),
                "TOFF" => assert_eq!(found, "CCX"),
                _ => assert_eq!(found, name),
            }
        }
        assert!(g.get("CRz").unwrap().is_generic());
        assert!(g.get("CX").unwrap().is_gate());
        assert!(g.get("nope").is_none());
        assert_eq!(g.names().count(), 31);
    }

    #[test]
    fn flags_and_arity() {
        let g = registry();
        assert!(g.h.is_divergent());
        assert!(!g.x.is_divergent());
        assert!(g.m.is_measurement());
        assert_eq!(g.p.arity(), Arity::Zero);
        assert_eq!(g.p.num_args(), ArgCount::Exact(1));
        assert_eq!(g.no_gate.arity(), Arity::Variadic);
        assert!(g.no_gate.is_composite());
        assert_eq!(g.cswap.arity(), Arity::Fixed(3));
        assert_eq!(g.crz.arity(), Arity::Fixed(2));
    }

    #[test]
    fn shared() {
        assert!(std::ptr::eq(registry(), registry()));
        let a = registry().rz.bind([0.1]).unwrap();
        let b = registry().rz.bind([0.2]).unwrap();
        assert!(a.instance_of(&b));
        assert!(registry().rz.bind(Vec::<f64>::new()).is_err());
    }

    #[test]
    fn matrices() {
        let g = registry();
        assert!(g.h.matrix().is_some());
        assert!(g.crz.bind([0.5]).unwrap().matrix().is_some());
        assert!(g.m.matrix().is_none());
    }
}
