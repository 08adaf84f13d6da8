use rust_decimal::Decimal;
use sproc::{Connection, Out, call, types};

/// Named parameters match the routine's formals by name, so the declaration
/// order of a call can disagree with the formal order without changing the
/// outcome.
pub fn ordering<E: Connection>(connection: &mut E) {
    let sum = Out::of(types::bigint());
    let mlt = Out::of(types::numeric());
    let mut swapped = call("test_math")
        .input("val2", 2)
        .input("val1", 10)
        .output("out_mlt", &mlt)
        .output("out_sum", &sum);
    swapped
        .run(connection)
        .expect("Failed to run test_math with swapped declarations");
    assert_eq!(
        swapped.sql(),
        Some("{call test_math(val2 => ?, val1 => ?, out_mlt => ?, out_sum => ?)}")
    );
    assert_eq!(sum.get().expect("out_sum has a value"), Some(12));
    assert_eq!(mlt.get().expect("out_mlt has a value"), Some(Decimal::from(20)));
}
