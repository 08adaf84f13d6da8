use parking_lot::Mutex;
use rust_decimal::Decimal;
use sproc::{Connection, Out, call, call_sql, types};
use std::sync::Arc;

pub fn math<E: Connection>(connection: &mut E) {
    // Positional call, holders created by the call itself.
    let mut positional = call_sql("{call test_math(?, ?, ?, ?)}").input(5).input(7);
    let sum = positional.output_of(types::integer());
    let mlt = positional.output_of(types::integer());
    positional
        .run(connection)
        .expect("Failed to run the positional test_math call");
    assert_eq!(sum.get().expect("out_sum has a value"), Some(12));
    assert_eq!(mlt.get().expect("out_mlt has a value"), Some(35));

    // Positional call with caller-held holders and wider result types.
    let sum = Out::of(types::bigint());
    let mlt = Out::of(types::numeric());
    call_sql("{call test_math(?, ?, ?, ?)}")
        .input(1_i64)
        .input(Decimal::from(2))
        .output(&sum)
        .output(&mlt)
        .run(connection)
        .expect("Failed to run the positional test_math call");
    assert_eq!(sum.get().expect("out_sum has a value"), Some(3));
    assert_eq!(mlt.get().expect("out_mlt has a value"), Some(Decimal::from(2)));

    // Named call.
    let sum = Out::of(types::bigint());
    let mlt = Out::of(types::numeric());
    call("test_math")
        .input("val1", 1)
        .input("val2", 2)
        .output("out_sum", &sum)
        .output("out_mlt", &mlt)
        .run(connection)
        .expect("Failed to run the named test_math call");
    assert_eq!(sum.get().expect("out_sum has a value"), Some(3));
    assert_eq!(mlt.get().expect("out_mlt has a value"), Some(Decimal::from(2)));

    // Named call with callback outputs.
    let seen = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    call("test_math")
        .input("val1", 10)
        .input("val2", 4)
        .output_with("out_sum", types::bigint(), move |value| {
            *captured.lock() = value;
        })
        .output_with("out_mlt", types::numeric(), |_| {})
        .run(connection)
        .expect("Failed to run the named test_math call");
    assert_eq!(*seen.lock(), Some(14));

    // Named call with holders created by the call.
    let mut named = call("test_math").input("val1", 3).input("val2", 4);
    let sum = named.output_of("out_sum", types::integer());
    let mlt = named.output_of("out_mlt", types::integer());
    named
        .run(connection)
        .expect("Failed to run the named test_math call");
    assert_eq!(sum.get_required().expect("out_sum is not NULL"), 7);
    assert_eq!(mlt.get_required().expect("out_mlt is not NULL"), 12);
}
