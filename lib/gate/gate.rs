use std::{ fmt, sync::Arc };
use ndarray::Array2;
use num_complex::Complex64 as C64;
use tracing::{ debug, trace };
use crate::{
    gate::{ Arg, Arity, GateError, GateInstance, GateKind, GateResult },
    mask::{ Endian, Mask },
    state::{ BitIndex, IntoBits, Qubit },
    unitary,
};
use GateError::*;

/// Decomposition of a composite gate into other gate applications.
///
/// The function receives the target qubits of the composite gate and is
/// expected to apply further gates to them.
pub type Decomposition = Arc<dyn Fn(&[Qubit]) -> GateResult<()> + Send + Sync>;

/// What applying a [`Gate`] does.
#[derive(Clone)]
pub enum Body {
    /// Hand the gate over to the backend of its target qubits.
    Primitive,
    /// Apply other gates.
    Composite(Decomposition),
}

impl Body {
    /// Wrap a function as a composite body.
    pub fn composite<F>(f: F) -> Self
    where F: Fn(&[Qubit]) -> GateResult<()> + Send + Sync + 'static
    {
        Self::Composite(Arc::new(f))
    }

    /// Return `true` if `self` is `Primitive`.
    pub fn is_primitive(&self) -> bool { matches!(self, Self::Primitive) }

    /// Return `true` if `self` is `Composite`.
    pub fn is_composite(&self) -> bool { matches!(self, Self::Composite(_)) }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => write!(f, "Primitive"),
            Self::Composite(_) => write!(f, "Composite(..)"),
        }
    }
}

/// Options for [`Gate::apply_with`].
///
/// Masks only apply to single-qubit gates, where they select which of the
/// given qubits the gate is broadcast to. A mask must be accompanied by
/// exactly one endianness flag; `little_endian(false)` is the same as
/// `big_endian(true)`.
///
/// ```
/// # use qgates::gate::Apply;
/// let opts = Apply::new().mask(0b101).big_endian(true);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Apply {
    pub mask: Option<Mask>,
    pub little_endian: Option<bool>,
    pub big_endian: Option<bool>,
}

impl Apply {
    /// No mask: apply to every qubit.
    pub fn new() -> Self { Self::default() }

    /// Set the selection mask.
    pub fn mask<M>(mut self, mask: M) -> Self
    where M: Into<Mask>
    {
        self.mask = Some(mask.into());
        self
    }

    /// Set the little-endian flag.
    pub fn little_endian(mut self, le: bool) -> Self {
        self.little_endian = Some(le);
        self
    }

    /// Set the big-endian flag.
    pub fn big_endian(mut self, be: bool) -> Self {
        self.big_endian = Some(be);
        self
    }

    // expand to one flag per qubit
    pub(crate) fn selection(&self, n: usize) -> GateResult<Vec<bool>> {
        let Some(mask) = &self.mask else { return Ok(vec![true; n]); };
        let big =
            match (self.little_endian, self.big_endian) {
                (Some(le), None) => !le,
                (None, Some(be)) => be,
                _ => { return Err(MaskEndianness); },
            };
        let endian = if big { Endian::Big } else { Endian::Little };
        Ok(mask.expand(n, endian))
    }
}

/// A quantum operation on some number of qubits.
///
/// A `Gate` is either primitive or composite (see [`Body`]) and may carry
/// classical arguments if it was produced by a
/// [`GenericGate`][crate::gate::GenericGate]. Its name, arity, and arguments
/// are fixed at construction.
#[derive(Clone)]
pub struct Gate {
    name: String,
    arity: Arity,
    args: Vec<Arg>,
    body: Body,
    divergent: bool,
    measurement: bool,
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("args", &self.args)
            .field("body", &self.body)
            .field("divergent", &self.divergent)
            .field("measurement", &self.measurement)
            .finish()
    }
}

impl GateKind for Gate {
    fn name(&self) -> &str { &self.name }
}

impl Gate {
    /// Create a new primitive gate with no classical arguments.
    pub fn new<S, A>(name: S, arity: A) -> Self
    where
        S: Into<String>,
        A: Into<Arity>,
    {
        Self::bound(name.into(), arity.into(), Vec::new(), Body::Primitive)
    }

    /// Create a new composite gate, applied by calling `f` on its target
    /// qubits.
    pub fn composite<S, A, F>(name: S, arity: A, f: F) -> Self
    where
        S: Into<String>,
        A: Into<Arity>,
        F: Fn(&[Qubit]) -> GateResult<()> + Send + Sync + 'static,
    {
        Self::bound(name.into(), arity.into(), Vec::new(), Body::composite(f))
    }

    pub(crate) fn bound(name: String, arity: Arity, args: Vec<Arg>, body: Body)
        -> Self
    {
        Self { name, arity, args, body, divergent: false, measurement: false }
    }

    /// Mark `self` as (not) simulable by restricted methods.
    pub fn with_divergent(mut self, divergent: bool) -> Self {
        self.divergent = divergent;
        self
    }

    /// Mark `self` as (not) a measurement.
    pub fn with_measurement(mut self, measurement: bool) -> Self {
        self.measurement = measurement;
        self
    }

    /// Return the gate name.
    pub fn name(&self) -> &str { &self.name }

    /// Return the number of qubits the gate acts on.
    pub fn arity(&self) -> Arity { self.arity }

    /// Return the signed size of the gate; see [`Arity::size`].
    pub fn size(&self) -> isize { self.arity.size() }

    /// Return the classical arguments bound to the gate.
    pub fn args(&self) -> &[Arg] { &self.args }

    /// Return the gate's body.
    pub fn body(&self) -> &Body { &self.body }

    /// Return `true` if the gate is composite.
    pub fn is_composite(&self) -> bool { self.body.is_composite() }

    /// Return `true` if the gate cannot be simulated by restricted methods.
    pub fn is_divergent(&self) -> bool { self.divergent }

    /// Return `true` if the gate is a measurement.
    pub fn is_measurement(&self) -> bool { self.measurement }

    /// Return the unitary matrix of the gate, if it is one of the standard
    /// gates with a known matrix.
    pub fn matrix(&self) -> Option<Array2<C64>> {
        unitary::matrix(&self.name, &self.args)
    }

    /// Record an application of `self` to `bits`.
    pub fn make_instance<I>(&self, bits: I) -> GateInstance
    where
        I: IntoIterator,
        I::Item: BitIndex,
    {
        GateInstance::new(
            self.name.clone(),
            self.args.clone(),
            bits.into_iter().map(|b| b.bit_index()).collect(),
            self.divergent,
            self.measurement,
        )
    }

    /// Apply `self` to `bits`.
    ///
    /// Single-qubit gates are broadcast over every qubit in `bits`, in order.
    /// All other gates are applied once to the whole sequence.
    pub fn apply<B>(&self, bits: B) -> GateResult<()>
    where B: IntoBits
    {
        self.apply_with(bits, Apply::new())
    }

    /// Apply `self` to `bits` with a selection mask.
    ///
    /// The mask is only used by single-qubit gates, for which the gate is
    /// applied to each qubit in `bits` whose mask position is set, in order.
    /// Fails with [`GateError::MaskEndianness`] before applying anything if a
    /// mask is given without exactly one endianness flag.
    pub fn apply_with<B>(&self, bits: B, opts: Apply) -> GateResult<()>
    where B: IntoBits
    {
        let bits = bits.into_bits();
        if self.arity == Arity::Fixed(1) {
            let selection = opts.selection(bits.len())?;
            bits.iter().zip(selection)
                .filter(|(_, m)| *m)
                .try_for_each(|(b, _)| {
                    self.apply_single(std::slice::from_ref(b))
                })
        } else {
            self.apply_single(&bits)
        }
    }

    /// Apply `self` once to exactly the qubits in `bits`.
    ///
    /// Composite gates call their decomposition. Primitive gates are handed to
    /// the backend of the first qubit in `bits`; zero-arity gates receive no
    /// target qubits there, the first qubit serving only to locate the backend.
    pub fn apply_single(&self, bits: &[Qubit]) -> GateResult<()> {
        if let Arity::Fixed(n) = self.arity {
            if bits.len() != n {
                return Err(BitMismatch {
                    gate: self.name.clone(),
                    expected: n,
                    actual: bits.len(),
                });
            }
        }
        match &self.body {
            Body::Composite(f) => {
                trace!(gate = %self.name, bits = bits.len(), "expanding composite gate");
                f(bits)
            },
            Body::Primitive => {
                let first =
                    bits.first().ok_or_else(|| NoState(self.name.clone()))?;
                let targets: &[Qubit] = if self.arity.is_zero() { &[] } else { bits };
                debug!(
                    gate = %self.name,
                    args = self.args.len(),
                    bits = targets.len(),
                    "applying primitive gate"
                );
                let mut state =
                    first.state().try_borrow_mut()
                    .map_err(|_| StateBusy(self.name.clone()))?;
                state.apply_gate(self, targets).map_err(GateError::State)
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{ cell::RefCell, rc::Rc };
    use crate::state::{ State, StateError, StateRef };
    use super::*;

    /// Backend that records every call it receives as `(gate name, bit
    /// indices)`.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) calls: Vec<(String, Vec<usize>)>,
        pub(crate) fail: bool,
    }

    impl State for Recorder {
        fn apply_gate(&mut self, gate: &Gate, bits: &[Qubit])
            -> Result<(), StateError>
        {
            if self.fail { return Err("recorder failure".into()); }
            self.calls.push((
                gate.name().to_string(),
                bits.iter().map(|q| q.index()).collect(),
            ));
            Ok(())
        }
    }

    pub(crate) fn recorder(n: usize) -> (Rc<RefCell<Recorder>>, Vec<Qubit>) {
        let rec = Rc::new(RefCell::new(Recorder::default()));
        let state: StateRef = rec.clone();
        let bits = (0..n).map(|k| Qubit::new(k, state.clone())).collect();
        (rec, bits)
    }

    fn calls(rec: &Rc<RefCell<Recorder>>) -> Vec<(String, Vec<usize>)> {
        rec.borrow().calls.clone()
    }

    #[test]
    fn primitive_dispatch() {
        let (rec, q) = recorder(3);
        let cx = Gate::new("CX", 2);
        cx.apply([&q[2], &q[0]]).unwrap();
        assert_eq!(calls(&rec), vec![("CX".to_string(), vec![2, 0])]);
    }

    #[test]
    fn broadcast() {
        let (rec, q) = recorder(3);
        let h = Gate::new("H", 1);
        h.apply(&q).unwrap();
        assert_eq!(
            calls(&rec),
            vec![
                ("H".to_string(), vec![0]),
                ("H".to_string(), vec![1]),
                ("H".to_string(), vec![2]),
            ],
        );
        h.apply(&q[1]).unwrap();
        assert_eq!(calls(&rec).len(), 4);
    }

    #[test]
    fn masked_broadcast() {
        let (rec, q) = recorder(4);
        let x = Gate::new("X", 1);
        x.apply_with(&q, Apply::new().mask(0b0011).little_endian(true)).unwrap();
        x.apply_with(&q, Apply::new().mask(0b0011).big_endian(true)).unwrap();
        x.apply_with(&q, Apply::new().mask(0b0001).little_endian(false)).unwrap();
        let bits: Vec<usize> =
            calls(&rec).into_iter().map(|(_, b)| b[0]).collect();
        assert_eq!(bits, vec![0, 1, 2, 3, 3]);
    }

    #[test]
    fn mask_endianness() {
        let (rec, q) = recorder(2);
        let x = Gate::new("X", 1);
        let neither = x.apply_with(&q, Apply::new().mask(1));
        assert!(matches!(neither, Err(MaskEndianness)));
        let both =
            x.apply_with(&q, Apply::new().mask(1).little_endian(true).big_endian(false));
        assert!(matches!(both, Err(MaskEndianness)));
        assert!(both.unwrap_err().is_config());
        assert!(calls(&rec).is_empty());

        // flags without a mask are fine
        x.apply_with(&q, Apply::new().big_endian(true)).unwrap();
        assert_eq!(calls(&rec).len(), 2);
    }

    #[test]
    fn mask_ignored_for_multi() {
        let (rec, q) = recorder(2);
        let cz = Gate::new("CZ", 2);
        cz.apply_with(&q, Apply::new().mask(0)).unwrap();
        assert_eq!(calls(&rec), vec![("CZ".to_string(), vec![0, 1])]);
    }

    #[test]
    fn bit_mismatch() {
        let (rec, q) = recorder(3);
        let cx = Gate::new("CX", 2);
        let err = cx.apply(&q).unwrap_err();
        assert!(err.is_arity());
        assert!(matches!(
            err,
            BitMismatch { expected: 2, actual: 3, .. }
        ));
        assert!(Gate::new("H", 1).apply_single(&q[..2]).is_err());
        assert!(calls(&rec).is_empty());
    }

    #[test]
    fn zero_arity() {
        let (rec, q) = recorder(3);
        let p = Gate::new("P", 0);
        p.apply(&q[1..]).unwrap();
        assert_eq!(calls(&rec), vec![("P".to_string(), vec![])]);

        let err = p.apply(Vec::<Qubit>::new()).unwrap_err();
        assert!(matches!(err, NoState(_)));
    }

    #[test]
    fn composite_without_bits() {
        use std::sync::atomic::{ AtomicUsize, Ordering };
        let runs = Arc::new(AtomicUsize::new(0));
        let runs_global = runs.clone();
        let global = Gate::composite("G", 0, move |bits| {
            assert!(bits.is_empty());
            runs_global.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let runs_noop = runs.clone();
        let noop = Gate::composite("noGate", -1, move |bits| {
            assert!(bits.is_empty());
            runs_noop.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        global.apply(Vec::<Qubit>::new()).unwrap();
        noop.apply(Vec::<Qubit>::new()).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn broadcast_over_nothing() {
        let (rec, _) = recorder(1);
        let h = Gate::new("H", 1);
        h.apply(Vec::<Qubit>::new()).unwrap();
        h.apply_with(
            Vec::<Qubit>::new(),
            Apply::new().mask(0b1).little_endian(true),
        ).unwrap();
        assert!(calls(&rec).is_empty());
    }

    #[test]
    fn zero_arity_routes_through_first() {
        let (rec_a, a) = recorder(1);
        let (rec_b, b) = recorder(1);
        let p = Gate::new("P", 0);
        p.apply([&b[0], &a[0]]).unwrap();
        assert!(calls(&rec_a).is_empty());
        assert_eq!(calls(&rec_b), vec![("P".to_string(), vec![])]);
    }

    #[test]
    fn variadic() {
        let (rec, q) = recorder(4);
        let barrier = Gate::new("BARRIER", -1);
        barrier.apply(&q).unwrap();
        barrier.apply(&q[..1]).unwrap();
        assert_eq!(
            calls(&rec),
            vec![
                ("BARRIER".to_string(), vec![0, 1, 2, 3]),
                ("BARRIER".to_string(), vec![0]),
            ],
        );
    }

    #[test]
    fn composite_recursion() {
        let (rec, q) = recorder(2);
        let swap = Gate::composite("SWAP", 2, |bits| {
            let cx = Gate::new("CX", 2);
            cx.apply(bits)?;
            cx.apply([&bits[1], &bits[0]])?;
            cx.apply(bits)
        });
        // composites of composites
        let swap_twice = Gate::composite("SWAP2", 2, move |bits| {
            swap.apply(bits)?;
            swap.apply(bits)
        });
        swap_twice.apply(&q).unwrap();
        let names: Vec<String> =
            calls(&rec).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["CX"; 6]);
        assert_eq!(calls(&rec)[1].1, vec![1, 0]);
    }

    #[test]
    fn composite_broadcast() {
        let (rec, q) = recorder(3);
        let hh = Gate::composite("HH", 1, |bits| {
            Gate::new("H", 1).apply(bits)?;
            Gate::new("H", 1).apply(bits)
        });
        hh.apply_with(&q, Apply::new().mask(0b110).little_endian(true)).unwrap();
        assert_eq!(
            calls(&rec),
            vec![
                ("H".to_string(), vec![1]),
                ("H".to_string(), vec![1]),
                ("H".to_string(), vec![2]),
                ("H".to_string(), vec![2]),
            ],
        );
    }

    #[test]
    fn exactly_one_path() {
        let (rec, q) = recorder(2);
        let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let hits_inner = hits.clone();
        let comp = Gate::composite("C", 2, move |_| {
            hits_inner.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        });
        comp.apply(&q).unwrap();
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert!(calls(&rec).is_empty());

        Gate::new("C", 2).apply(&q).unwrap();
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(calls(&rec).len(), 1);
    }

    #[test]
    fn state_error_passthrough() {
        let (rec, q) = recorder(1);
        rec.borrow_mut().fail = true;
        let err = Gate::new("X", 1).apply(&q).unwrap_err();
        assert!(err.is_state());
        assert_eq!(err.to_string(), "recorder failure");
    }

    #[test]
    fn state_busy() {
        let (rec, q) = recorder(1);
        let _guard = rec.borrow();
        let err = Gate::new("X", 1).apply(&q).unwrap_err();
        assert!(matches!(err, StateBusy(_)));
    }

    #[test]
    fn instances() {
        let m = Gate::new("M", 1).with_measurement(true);
        let inst = m.make_instance([3_usize]);
        assert!(inst.is_measurement());
        assert!(!inst.is_divergent());
        assert_eq!(inst, m.make_instance(vec![3_usize]));
        assert_eq!(inst.to_string(), "M(3)");

        let (_, q) = recorder(2);
        let cx = Gate::new("CX", 2);
        assert_eq!(cx.make_instance(&q).bits(), &[0, 1]);
    }

    #[test]
    fn kind() {
        let a = Gate::new("Rz", 1);
        let b = Gate::new("Rz", 2);
        let c = Gate::new("Rx", 1);
        assert!(a.instance_of(&b));
        assert!(!a.instance_of(&c));
        assert!(a.make_instance([0_usize]).instance_of(&a));
    }
}
