use rust_decimal::Decimal;
use sproc::{Connection, In, IntoIn, Out, SqlType, call, types};
use time::macros::datetime;

fn echo<E: Connection, T>(
    connection: &mut E,
    value: impl IntoIn<Native = T>,
    ty: SqlType<T>,
) -> Option<T>
where
    T: Clone + Send + 'static,
{
    let echoed = Out::of(ty);
    call("echo")
        .input("value", value)
        .output("echoed", &echoed)
        .run(connection)
        .expect("Failed to run echo");
    echoed.get().expect("echoed has a value")
}

/// Every builtin type that round trips through a plain fetch, bound with the
/// type the catalog infers for it.
pub fn roundtrip<E: Connection>(connection: &mut E) {
    assert_eq!(echo(connection, true, types::boolean()), Some(true));
    assert_eq!(echo(connection, 42, types::integer()), Some(42));
    assert_eq!(
        echo(connection, 9_876_543_210_i64, types::bigint()),
        Some(9_876_543_210)
    );
    assert_eq!(echo(connection, 2.5_f64, types::double()), Some(2.5));
    assert_eq!(
        echo(connection, Decimal::new(123_45, 2), types::decimal()),
        Some(Decimal::new(123_45, 2))
    );
    assert_eq!(
        echo(connection, "Hello world!", types::varchar()),
        Some("Hello world!".to_owned())
    );
    assert_eq!(
        echo(
            connection,
            datetime!(2024-02-29 12:00:10),
            types::timestamp()
        ),
        Some(datetime!(2024-02-29 12:00:10))
    );

    // NULL for each of them comes back absent rather than as a default.
    assert_eq!(echo(connection, None::<i32>, types::integer()), None);
    assert_eq!(echo(connection, None::<String>, types::varchar()), None);

    // An explicit In overrides the inferred type, numeric instead of decimal.
    assert_eq!(
        echo(
            connection,
            In::new(Some(Decimal::from(7)), types::numeric()).expect("numeric has a bind side"),
            types::numeric()
        ),
        Some(Decimal::from(7))
    );
}
