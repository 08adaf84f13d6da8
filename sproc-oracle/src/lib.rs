//! Oracle-specific call types.

use sproc_core::{Result, RowLabeled, SqlType, Statement, TypeCode, map_rows};
use std::sync::Arc;

/// Oracle's driver-native cursor type code, predating the standard ref
/// cursor code.
pub const CURSOR: TypeCode = TypeCode(-10);

/// Oracle's native binary double type code.
pub const BINARY_DOUBLE: TypeCode = TypeCode(101);

/// Cursor-valued output: drains the cursor through the given row mapper and
/// yields the mapped rows in cursor order, an empty list for an empty cursor.
/// The row handle is closed before the values are returned.
///
/// Read-only, a cursor can only come back from the database.
pub fn cursor<T, F>(mapper: F) -> SqlType<Vec<T>>
where
    T: Send + Sync + 'static,
    F: Fn(&RowLabeled, usize) -> Result<T> + Send + Sync + 'static,
{
    let mapper = Arc::new(mapper);
    SqlType::read_only("cursor", CURSOR, move |statement, index| {
        let mut rows = statement.take_rows(index)?;
        map_rows(&mut *rows, mapper.as_ref()).map(Some)
    })
}

/// Oracle `BINARY_DOUBLE`, binds and reads native double precision floats.
pub fn binary_double() -> SqlType<f64> {
    SqlType::simple("binary_double", BINARY_DOUBLE)
}
