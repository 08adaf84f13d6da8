use sproc::{Connection, call_returning, types};

pub fn functions<E: Connection>(connection: &mut E) {
    let concat = call_returning("get_concat", types::varchar())
        .input("s1", "qwe")
        .input("s2", "rty")
        .run(connection)
        .expect("Failed to run get_concat");
    assert_eq!(concat.as_deref(), Some("qwerty"));

    // Declaration order does not matter for the return value either.
    let mut swapped = call_returning("get_concat", types::varchar())
        .input("s2", "rty")
        .input("s1", "qwe");
    let concat = swapped.run(connection).expect("Failed to run get_concat");
    assert_eq!(concat.as_deref(), Some("qwerty"));
    assert_eq!(swapped.sql(), Some("{? = call get_concat(s2 => ?, s1 => ?)}"));

    // A NULL argument makes the result NULL, which reads back as absent.
    let concat = call_returning("get_concat", types::varchar())
        .input("s1", Some("qwe"))
        .input("s2", None::<&str>)
        .run(connection)
        .expect("Failed to run get_concat");
    assert_eq!(concat, None);
}
