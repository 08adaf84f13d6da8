use sproc::{AsValue, CallError, Connection, In, Out, Result, RowLabeled, SqlType, Value, call};

/// Row shape produced by the `find_people` fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i32,
    pub name: String,
}

/// Maps one cursor row to a [`Person`], NULL in either column is an error.
pub fn person_row(row: &RowLabeled, _index: usize) -> Result<Person> {
    let column = |name: &str| -> Result<Value> {
        row.get_column(name)
            .cloned()
            .ok_or_else(|| CallError::Conversion(format!("the cursor has no `{name}` column")))
    };
    let id = i32::try_from_value(column("id")?)?
        .ok_or_else(|| CallError::Conversion("the `id` column is NULL".into()))?;
    let name = String::try_from_value(column("name")?)?
        .ok_or_else(|| CallError::Conversion("the `name` column is NULL".into()))?;
    Ok(Person { id, name })
}

/// Exercises a vendor cursor type against the fixture routines. The caller
/// passes the type because each vendor registers cursors under its own code.
pub fn cursors<E: Connection>(connection: &mut E, people: SqlType<Vec<Person>>) {
    let found = Out::of(people.clone());
    call("find_people")
        .input("min_id", 0)
        .output("people", &found)
        .run(connection)
        .expect("Failed to run find_people");
    assert_eq!(
        found.get().expect("people has a value"),
        Some(vec![
            Person {
                id: 1,
                name: "Ada".to_owned(),
            },
            Person {
                id: 2,
                name: "Brian".to_owned(),
            },
        ])
    );

    // An empty cursor materializes as an empty list, not as NULL.
    let found = Out::of(people.clone());
    call("find_people")
        .input("min_id", 1000)
        .output("people", &found)
        .run(connection)
        .expect("Failed to run find_people");
    assert_eq!(found.get().expect("people has a value"), Some(Vec::new()));

    // A row the mapper rejects fails the whole extraction.
    let found = Out::of(people.clone());
    let outcome = call("broken_people").output("people", &found).run(connection);
    assert!(matches!(outcome, Err(CallError::Conversion(..))));

    // Cursors only come back from the database, they cannot be bound.
    assert!(matches!(
        In::new(None::<Vec<Person>>, people),
        Err(CallError::Config(..))
    ));
}
