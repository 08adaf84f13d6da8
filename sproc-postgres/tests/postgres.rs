#[cfg(test)]
mod tests {
    use sproc::TypeCode;
    use sproc_postgres::cursor;
    use sproc_tests::{cursors, init_logs, person_row, standard_db};

    #[test]
    fn cursor_outputs() {
        init_logs();
        let db = standard_db();
        let mut connection = db.connect();
        let people = cursor(person_row);
        assert_eq!(people.to_string(), "refcursor[2012]");
        assert_eq!(people.code(), TypeCode::REF_CURSOR);
        cursors(&mut connection, people);
        assert_eq!(db.open_statements(), 0, "Expected every statement released");
    }
}
