#[cfg(test)]
mod tests {
    use sproc::{In, Out, call};
    use sproc_oracle::{BINARY_DOUBLE, CURSOR, binary_double, cursor};
    use sproc_tests::{cursors, init_logs, person_row, standard_db};

    #[test]
    fn cursor_outputs() {
        init_logs();
        let db = standard_db();
        let mut connection = db.connect();
        let people = cursor(person_row);
        assert_eq!(people.to_string(), "cursor[-10]");
        assert_eq!(people.code(), CURSOR);
        cursors(&mut connection, people);
        assert_eq!(db.open_statements(), 0, "Expected every statement released");
    }

    #[test]
    fn native_double() {
        init_logs();
        let db = standard_db();
        let mut connection = db.connect();
        let ty = binary_double();
        assert_eq!(ty.code(), BINARY_DOUBLE);
        let echoed = Out::of(binary_double());
        call("echo")
            .input(
                "value",
                In::new(Some(2.5_f64), ty).expect("binary_double has a bind side"),
            )
            .output("echoed", &echoed)
            .run(&mut connection)
            .expect("Failed to echo a binary double");
        assert_eq!(echoed.get().expect("echoed has a value"), Some(2.5));
    }
}
