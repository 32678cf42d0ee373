use qgates::{
    circuit::Circuit,
    gate::*,
    gates::registry,
    phase::Phase,
};
use tracing_subscriber::EnvFilter;

// controlled phase rotation, decomposed for generic angles
//
// ∣c⟩ --------------*--------------*--Rz(θ/2)--
//                   |              |
// ∣t⟩ --Rz(θ/2)-----X--Rz(-θ/2)----X-----------
//
// angles that are multiples of π/2 are mapped onto fixed gates instead
fn crot() -> GenericGate {
    GenericGate::composite("CRot", 2, 1, |args| {
        let g = registry();
        match args[0].as_phase() {
            Some(ph) if ph.is_zero() => g.i2.clone().into(),
            Some(ph) if ph == Phase::pi() => g.cz.clone().into(),
            Some(ph) if ph == Phase::pi2() => g.cs.clone().into(),
            Some(ph) if ph == -Phase::pi2() => g.csd.clone().into(),
            _ => {
                let half = args[0].as_f64() / 2.0;
                Body::composite(move |bits| {
                    let g = registry();
                    g.rz.bind([half])?.apply(&bits[1])?;
                    g.cx.apply(bits)?;
                    g.rz.bind([-half])?.apply(&bits[1])?;
                    g.cx.apply(bits)?;
                    g.rz.bind([half])?.apply(&bits[0])
                })
                .into()
            },
        }
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let circuit = Circuit::new();
    let c = circuit.new_register(1, "c")?;
    let t = circuit.new_register(1, "t")?;
    let pair = [&c[0], &t[0]];

    let crot = crot();
    registry().h.apply(&c)?;
    for ph in [Phase::pi(), Phase::pi2(), Phase::pi4(), -Phase::pi2()] {
        crot.bind([ph])?.apply(pair)?;
    }

    let labels = circuit.labels();
    println!("qubits: {}", labels.join(", "));
    for inst in circuit.history() {
        println!("{}", inst);
    }
    println!("divergent: {}", circuit.is_divergent());
    Ok(())
}
