use sproc::{CallError, Connection, call, call_returning, types};

pub fn recovery<E: Connection>(connection: &mut E) {
    // Without a handler the backend failure propagates.
    let outcome = call("raise_error").run(connection);
    assert!(matches!(outcome, Err(CallError::Backend(..))));

    // A handler can substitute a result for the failure.
    let recovered = call_returning("raise_error", types::varchar())
        .on_error(|error| {
            assert!(error.is_backend());
            Ok(Some("fallback".to_owned()))
        })
        .expect("The first handler installs")
        .run(connection)
        .expect("The handler substitutes the failure");
    assert_eq!(recovered.as_deref(), Some("fallback"));

    // Or keep failing with whatever it decides.
    let outcome = call("raise_error")
        .on_error(Err)
        .expect("The first handler installs")
        .run(connection);
    assert!(matches!(outcome, Err(CallError::Backend(..))));

    // Preparing an unknown routine is a backend failure too, so the handler
    // sees it.
    let outcome = call("no_such_routine").run(connection);
    assert!(matches!(outcome, Err(CallError::Backend(..))));
    let recovered = call("no_such_routine")
        .on_error(|_| Ok(None))
        .expect("The first handler installs")
        .run(connection)
        .expect("The handler swallows the missing routine");
    assert_eq!(recovered, None);

    // Only one handler per call.
    let doubled = call("raise_error")
        .on_error(|_| Ok(None))
        .expect("The first handler installs")
        .on_error(|_| Ok(None));
    assert!(matches!(doubled, Err(CallError::Config(..))));

    // Lifecycle errors bypass the handler.
    let mut repeated = call("test_math")
        .input("val1", 1)
        .input("val2", 2)
        .output_with("out_sum", types::bigint(), |_| {})
        .output_with("out_mlt", types::numeric(), |_| {})
        .on_error(|_| panic!("the handler must not see a reuse error"))
        .expect("The first handler installs");
    repeated.run(connection).expect("The first run goes through");
    assert!(matches!(
        repeated.run(connection),
        Err(CallError::State(..))
    ));
}
