use std::fmt;
use itertools::Itertools;
use crate::gate::{ Arg, GateKind };

/// Immutable record of a single primitive gate application.
///
/// Instances are produced by [`Gate::make_instance`][crate::gate::Gate::make_instance]
/// at the point where a primitive gate reaches its backend. Two instances are
/// equal if all their fields are equal; use
/// [`instance_of`][GateKind::instance_of] to compare only by kind.
///
/// Displays as `name(b0, b1, ...)`, or `name_a0,a1,...(b0, b1, ...)` when
/// there are classical arguments. Real arguments use the shortest `f64`
/// form, so a whole number prints without a fractional part (`P_1()`).
///
/// ```
/// # use qgates::{ gate::GateKind, gates::registry, phase::Phase };
/// let g = registry();
/// assert_eq!(g.h.make_instance([2]).to_string(), "H(2)");
/// assert_eq!(g.cx.make_instance([0, 3]).to_string(), "CX(0, 3)");
///
/// let rz = g.rz.bind([Phase::pi4()]).unwrap();
/// let inst = rz.make_instance([1]);
/// assert_eq!(inst.to_string(), "Rz_π/4(1)");
/// assert!(inst.instance_of(&g.rz));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GateInstance {
    name: String,
    args: Vec<Arg>,
    bits: Vec<usize>,
    divergent: bool,
    measurement: bool,
}

impl GateInstance {
    pub(crate) fn new(
        name: String,
        args: Vec<Arg>,
        bits: Vec<usize>,
        divergent: bool,
        measurement: bool,
    ) -> Self
    {
        Self { name, args, bits, divergent, measurement }
    }

    /// Return the gate name.
    pub fn name(&self) -> &str { &self.name }

    /// Return the classical arguments the gate was bound to.
    pub fn args(&self) -> &[Arg] { &self.args }

    /// Return the indices of the target qubits, in application order.
    pub fn bits(&self) -> &[usize] { &self.bits }

    /// Return `true` if the gate cannot be simulated by restricted (e.g.
    /// stabilizer) methods.
    pub fn is_divergent(&self) -> bool { self.divergent }

    /// Return `true` if the gate is a measurement.
    pub fn is_measurement(&self) -> bool { self.measurement }
}

impl GateKind for GateInstance {
    fn name(&self) -> &str { &self.name }
}

impl fmt::Display for GateInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}({})", self.name, self.bits.iter().join(", "))
        } else {
            write!(
                f,
                "{}_{}({})",
                self.name,
                self.args.iter().join(","),
                self.bits.iter().join(", "),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    fn inst(name: &str, args: Vec<Arg>, bits: Vec<usize>) -> GateInstance {
        GateInstance::new(name.to_string(), args, bits, false, false)
    }

    #[test]
    fn display() {
        assert_eq!(inst("H", vec![], vec![2]).to_string(), "H(2)");
        assert_eq!(inst("CCX", vec![], vec![4, 0, 1]).to_string(), "CCX(4, 0, 1)");
        assert_eq!(inst("P", vec![Arg::Real(0.5)], vec![]).to_string(), "P_0.5()");
        assert_eq!(inst("Rz", vec![Arg::Real(0.5)], vec![1]).to_string(), "Rz_0.5(1)");
        assert_eq!(
            inst("U", vec![Phase::pi().into(), Arg::Int(3)], vec![0, 1]).to_string(),
            "U_π,3(0, 1)",
        );
        assert_eq!(inst("noGate", vec![], vec![]).to_string(), "noGate()");
        assert_eq!(inst("P", vec![Arg::Real(1.0)], vec![]).to_string(), "P_1()");
        assert_eq!(inst("Rx", vec![Arg::Real(-2.0)], vec![0]).to_string(), "Rx_-2(0)");
    }

    #[test]
    fn kind() {
        let a = inst("Rz", vec![Arg::Real(0.5)], vec![1]);
        let b = inst("Rz", vec![Arg::Real(1.5)], vec![2]);
        let c = inst("Rx", vec![Arg::Real(0.5)], vec![1]);
        assert!(a.instance_of(&b));
        assert!(!a.instance_of(&c));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
