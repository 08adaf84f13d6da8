use sproc::{CallError, Connection, Out, call, call_sql, types};

pub fn reuse<E: Connection>(connection: &mut E) {
    // A named call runs at most once.
    let sum = Out::of(types::bigint());
    let mlt = Out::of(types::numeric());
    let mut once = call("test_math")
        .input("val1", 1)
        .input("val2", 2)
        .output("out_sum", &sum)
        .output("out_mlt", &mlt);
    once.run(connection).expect("The first run goes through");
    assert!(matches!(once.run(connection), Err(CallError::State(..))));

    // So does a positional call.
    let mut positional = call_sql("{call test_math(?, ?, ?, ?)}").input(1).input(2);
    let _sum = positional.output_of(types::integer());
    let _mlt = positional.output_of(types::integer());
    positional
        .run(connection)
        .expect("The first run goes through");
    assert!(matches!(
        positional.run(connection),
        Err(CallError::State(..))
    ));

    // A holder cannot be read before its call ran.
    let pending = Out::of(types::integer());
    assert!(matches!(pending.get(), Err(CallError::State(..))));

    // A holder takes a value exactly once.
    let out = Out::of(types::integer());
    out.set_value(Some(1)).expect("The first value goes in");
    assert!(matches!(out.set_value(Some(2)), Err(CallError::State(..))));
    assert_eq!(out.get().expect("the injected value is readable"), Some(1));

    // A used holder cannot be attached to a second call.
    let recycled = Out::of(types::bigint());
    let mlt = Out::of(types::numeric());
    call("test_math")
        .input("val1", 1)
        .input("val2", 2)
        .output("out_sum", &recycled)
        .output("out_mlt", &mlt)
        .run(connection)
        .expect("The first run goes through");
    let mlt = Out::of(types::numeric());
    let rejected = call("test_math")
        .input("val1", 3)
        .input("val2", 4)
        .output("out_sum", &recycled)
        .output("out_mlt", &mlt)
        .run(connection);
    assert!(matches!(rejected, Err(CallError::State(..))));
}
