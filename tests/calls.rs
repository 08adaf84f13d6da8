#[cfg(test)]
mod tests {
    use sproc_tests::{execute_tests, init_logs, standard_db};

    #[test]
    fn scripted_backend() {
        init_logs();
        let db = standard_db();
        let mut connection = db.connect();
        execute_tests(&mut connection);
        assert_eq!(
            db.open_statements(),
            0,
            "Expected every statement handle released, the failing paths included"
        );
        assert_eq!(
            db.open_lobs(),
            0,
            "Expected every large object freed during extraction"
        );
    }
}
