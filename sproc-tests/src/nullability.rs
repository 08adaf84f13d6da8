use sproc::{CallError, Connection, Out, call, types};

pub fn nullability<E: Connection>(connection: &mut E) {
    // NULL travels in as a typed NULL and comes back out as an absent value.
    let echoed = Out::of(types::varchar());
    call("echo")
        .input("value", None::<&str>)
        .output("echoed", &echoed)
        .run(connection)
        .expect("Failed to echo NULL");
    assert_eq!(echoed.get().expect("echoed has a value"), None);
    assert!(matches!(
        echoed.get_required(),
        Err(CallError::NullValue(..))
    ));

    // The required accessor passes a present value through unchanged.
    let echoed = Out::of(types::varchar());
    call("echo")
        .input("value", "present")
        .output("echoed", &echoed)
        .run(connection)
        .expect("Failed to echo a value");
    assert_eq!(echoed.get_required().expect("echoed is not NULL"), "present");

    // Holder and callback sinks can mix on the same call.
    let sum = Out::of(types::integer());
    call("test_math")
        .input("val1", 1)
        .input("val2", 2)
        .output("out_sum", &sum)
        .output_with("out_mlt", types::numeric(), |_| {})
        .run(connection)
        .expect("Failed to run test_math");
    assert_eq!(sum.get().expect("out_sum has a value"), Some(3));
}
