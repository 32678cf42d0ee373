use std::{ fmt, sync::Arc };
use tracing::trace;
use crate::gate::{
    Arg,
    ArgCount,
    Arity,
    Body,
    Gate,
    GateError,
    GateKind,
    GateResult,
};

/// The outcome of binding classical arguments in a [`GenericGate`].
#[derive(Clone, Debug)]
pub enum Binding {
    /// Use this gate as-is in place of the bound one.
    Gate(Gate),
    /// Bind the arguments into a new gate with this body.
    Body(Body),
}

impl From<Gate> for Binding {
    fn from(gate: Gate) -> Self { Self::Gate(gate) }
}

impl From<Body> for Binding {
    fn from(body: Body) -> Self { Self::Body(body) }
}

/// Function called on the classical arguments of a [`GenericGate`] when they
/// are bound.
pub type Binder = Arc<dyn Fn(&[Arg]) -> Binding + Send + Sync>;

/// A family of gates parameterized by classical arguments.
///
/// Binding arguments with [`bind`][Self::bind] produces a concrete [`Gate`]
/// carrying the factory's name, arity, and flags. If the factory has a binder,
/// the binder decides the gate's body for the given arguments, or may replace
/// the gate outright, e.g. to map special angles onto a known fixed gate.
///
/// ```
/// # use qgates::{ gate::*, gates::registry, phase::Phase };
/// // phase rotation that reduces to named gates where possible
/// let ph = GenericGate::composite("Ph", 1, 1, |args| {
///     match args[0].as_phase() {
///         Some(ph) if ph == Phase::pi() => registry().z.clone().into(),
///         Some(ph) if ph == Phase::pi2() => registry().s.clone().into(),
///         _ => Body::Primitive.into(),
///     }
/// });
/// assert_eq!(ph.bind([Phase::pi()]).unwrap().name(), "Z");
/// assert_eq!(ph.bind([Phase::pi8()]).unwrap().name(), "Ph");
/// assert!(ph.bind(Vec::<Arg>::new()).unwrap_err().is_arity());
/// ```
#[derive(Clone)]
pub struct GenericGate {
    name: String,
    arity: Arity,
    num_args: ArgCount,
    binder: Option<Binder>,
    divergent: bool,
    measurement: bool,
}

impl fmt::Debug for GenericGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericGate")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("num_args", &self.num_args)
            .field("binder", &self.binder.as_ref().map(|_| ".."))
            .field("divergent", &self.divergent)
            .field("measurement", &self.measurement)
            .finish()
    }
}

impl GateKind for GenericGate {
    fn name(&self) -> &str { &self.name }
}

impl GenericGate {
    /// Create a new family of primitive gates.
    pub fn new<S, A, N>(name: S, arity: A, num_args: N) -> Self
    where
        S: Into<String>,
        A: Into<Arity>,
        N: Into<ArgCount>,
    {
        Self {
            name: name.into(),
            arity: arity.into(),
            num_args: num_args.into(),
            binder: None,
            divergent: false,
            measurement: false,
        }
    }

    /// Create a new family of gates whose bodies are determined by calling
    /// `f` on the bound arguments.
    pub fn composite<S, A, N, F>(name: S, arity: A, num_args: N, f: F) -> Self
    where
        S: Into<String>,
        A: Into<Arity>,
        N: Into<ArgCount>,
        F: Fn(&[Arg]) -> Binding + Send + Sync + 'static,
    {
        let mut new = Self::new(name, arity, num_args);
        new.binder = Some(Arc::new(f));
        new
    }

    /// Mark produced gates as (not) simulable by restricted methods.
    pub fn with_divergent(mut self, divergent: bool) -> Self {
        self.divergent = divergent;
        self
    }

    /// Mark produced gates as (not) measurements.
    pub fn with_measurement(mut self, measurement: bool) -> Self {
        self.measurement = measurement;
        self
    }

    /// Return the name of produced gates.
    pub fn name(&self) -> &str { &self.name }

    /// Return the arity of produced gates.
    pub fn arity(&self) -> Arity { self.arity }

    /// Return the number of classical arguments.
    pub fn num_args(&self) -> ArgCount { self.num_args }

    /// Return `true` if produced gates are not simulable by restricted methods.
    pub fn is_divergent(&self) -> bool { self.divergent }

    /// Return `true` if produced gates are measurements.
    pub fn is_measurement(&self) -> bool { self.measurement }

    /// Bind classical arguments, producing a concrete gate.
    ///
    /// Fails if the number of arguments doesn't match
    /// [`num_args`][Self::num_args], in which case the binder is never called.
    pub fn bind<I>(&self, args: I) -> GateResult<Gate>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let args: Vec<Arg> = args.into_iter().map(|a| a.into()).collect();
        if let ArgCount::Exact(n) = self.num_args {
            if args.len() != n {
                return Err(GateError::ArgMismatch {
                    gate: self.name.clone(),
                    expected: n,
                    actual: args.len(),
                });
            }
        }
        let body =
            match self.binder.as_ref().map(|f| f(args.as_slice())) {
                Some(Binding::Gate(gate)) => {
                    trace!(generic = %self.name, gate = %gate.name(), "binding replaced by fixed gate");
                    return Ok(gate);
                },
                Some(Binding::Body(body)) => body,
                None => Body::Primitive,
            };
        Ok(
            Gate::bound(self.name.clone(), self.arity, args, body)
                .with_divergent(self.divergent)
                .with_measurement(self.measurement)
        )
    }
}
