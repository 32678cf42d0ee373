use qgates::{
    circuit::Circuit,
    gate::Apply,
    gates::registry,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let g = registry();
    let circuit = Circuit::new();
    let q = circuit.new_register(5, "q")?;

    // 0b00110 selects q_1 and q_2 read little-endian, q_2 and q_3 big-endian
    g.x.apply_with(&q, Apply::new().mask(0b00110).little_endian(true))?;
    g.z.apply_with(&q, Apply::new().mask(0b00110).big_endian(true))?;
    g.h.apply_with(&q, Apply::new().mask([true, false, true]).little_endian(true))?;

    // no endianness given: rejected before anything is applied
    let err = g.y.apply_with(&q, Apply::new().mask(0b1)).unwrap_err();
    println!("rejected: {}", err);

    // masks are ignored by multi-qubit gates
    g.cx.apply_with([&q[0], &q[4]], Apply::new().mask(0).little_endian(true))?;

    println!("{}", circuit);

    let copy = Circuit::new();
    copy.new_register(5, "r")?;
    copy.replay(&circuit.history())?;
    assert_eq!(copy.history(), circuit.history());
    println!("replayed {} gates", copy.len());
    Ok(())
}
