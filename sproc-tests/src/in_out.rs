use parking_lot::Mutex;
use sproc::{Connection, Out, call, call_sql, types};
use std::sync::Arc;

pub fn in_out<E: Connection>(connection: &mut E) {
    // The same placeholder carries a value in and a value out.
    let io = Out::of(types::integer());
    call("test_in_out")
        .in_out("io", 41, &io)
        .run(connection)
        .expect("Failed to run test_in_out");
    assert_eq!(io.get().expect("io has a value"), Some(42));

    // Callback form, the output side reuses the input's type.
    let seen = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    call("test_in_out")
        .in_out_with("io", 7, move |value| {
            *captured.lock() = value;
        })
        .run(connection)
        .expect("Failed to run test_in_out");
    assert_eq!(*seen.lock(), Some(8));

    // Positional form.
    let io = Out::of(types::bigint());
    call_sql("{call test_in_out(?)}")
        .in_out(1000_i64, &io)
        .run(connection)
        .expect("Failed to run test_in_out");
    assert_eq!(io.get_required().expect("io is not NULL"), 1001);
}
