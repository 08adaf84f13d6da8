//! PostgreSQL-specific call types.

use sproc_core::{Result, RowLabeled, SqlType, Statement, TypeCode, map_rows};
use std::sync::Arc;

/// Refcursor-valued output: drains the cursor through the given row mapper
/// and yields the mapped rows in cursor order, an empty list for an empty
/// cursor. The row handle is closed before the values are returned.
///
/// Read-only, a refcursor can only come back from the database. PostgreSQL
/// reports refcursor outputs with the standard ref cursor code.
pub fn cursor<T, F>(mapper: F) -> SqlType<Vec<T>>
where
    T: Send + Sync + 'static,
    F: Fn(&RowLabeled, usize) -> Result<T> + Send + Sync + 'static,
{
    let mapper = Arc::new(mapper);
    SqlType::read_only("refcursor", TypeCode::REF_CURSOR, move |statement, index| {
        let mut rows = statement.take_rows(index)?;
        map_rows(&mut *rows, mapper.as_ref()).map(Some)
    })
}
