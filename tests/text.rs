#[cfg(test)]
mod tests {
    use sproc::{call, call_returning, types};
    use sproc_tests::{init_logs, standard_db};

    #[test]
    fn procedure_text() {
        init_logs();
        let db = standard_db();
        let mut connection = db.connect();
        let mut math = call("test_math")
            .input("val1", 1)
            .input("val2", 2)
            .output_with("out_sum", types::bigint(), |_| {})
            .output_with("out_mlt", types::numeric(), |_| {});
        assert_eq!(math.sql(), None);
        math.run(&mut connection).expect("Failed to run test_math");
        assert_eq!(
            math.sql(),
            Some("{call test_math(val1 => ?, val2 => ?, out_sum => ?, out_mlt => ?)}")
        );
    }

    #[test]
    fn function_text() {
        init_logs();
        let db = standard_db();
        let mut connection = db.connect();
        let mut concat = call_returning("get_concat", types::varchar())
            .input("s1", "qwe")
            .input("s2", "rty");
        concat
            .run(&mut connection)
            .expect("Failed to run get_concat");
        assert_eq!(concat.sql(), Some("{? = call get_concat(s1 => ?, s2 => ?)}"));
    }

    #[test]
    fn no_parameter_text() {
        init_logs();
        let db = standard_db();
        let mut connection = db.connect();
        let mut bare = call("raise_error")
            .on_error(|_| Ok(None))
            .expect("The first handler installs");
        bare.run(&mut connection)
            .expect("The handler swallows the failure");
        // The text is recorded even though the routine failed.
        assert_eq!(bare.sql(), Some("{call raise_error()}"));
    }

    #[test]
    #[should_panic(expected = "routine name must not be empty")]
    fn empty_name_panics() {
        let _ = call("");
    }
}
