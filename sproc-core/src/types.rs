//! Builtin catalog of portable call-level types.
//!
//! Every function returns a fresh handle to the same logical type, handles
//! compare equal by name and code.

use crate::{Lob, SqlType, Statement, TypeCode, Value};
use rust_decimal::Decimal;
use std::sync::Arc;
use time::PrimitiveDateTime;

pub fn integer() -> SqlType<i32> {
    SqlType::simple("integer", TypeCode::INTEGER)
}

pub fn bigint() -> SqlType<i64> {
    SqlType::simple("bigint", TypeCode::BIGINT)
}

pub fn boolean() -> SqlType<bool> {
    SqlType::simple("boolean", TypeCode::BOOLEAN)
}

pub fn double() -> SqlType<f64> {
    SqlType::simple("double", TypeCode::DOUBLE)
}

pub fn numeric() -> SqlType<Decimal> {
    SqlType::simple("numeric", TypeCode::NUMERIC)
}

pub fn decimal() -> SqlType<Decimal> {
    SqlType::simple("decimal", TypeCode::DECIMAL)
}

pub fn varchar() -> SqlType<String> {
    SqlType::simple("varchar", TypeCode::VARCHAR)
}

/// Plain binary type. Unlike [`blob`] a zero-length input binds as a
/// zero-length byte string, not as NULL.
pub fn binary() -> SqlType<Vec<u8>> {
    SqlType::simple("binary", TypeCode::BINARY)
}

/// Large-object binary type.
///
/// Absent and zero-length inputs both bind as a typed NULL, some backends
/// reject a zero-length large-object bind outright. Outputs are read through
/// a scoped large-object handle which is freed before the bytes are returned,
/// and an absent or zero-length object reads back as NULL.
pub fn blob() -> SqlType<Vec<u8>> {
    SqlType::of(
        "blob",
        TypeCode::BLOB,
        Some(Arc::new(|statement, index, code, value: Option<Vec<u8>>| {
            let value = match value {
                Some(bytes) if !bytes.is_empty() => Value::Blob(Some(bytes.into())),
                _ => Value::Blob(None),
            };
            statement.bind_in(index, code, value)
        })),
        Arc::new(|statement, index| {
            let Some(mut lob) = statement.take_lob(index)? else {
                return Ok(None);
            };
            if lob.size()? == 0 {
                return Ok(None);
            }
            lob.read_all().map(Some)
        }),
    )
}

pub fn timestamp() -> SqlType<PrimitiveDateTime> {
    SqlType::simple("timestamp", TypeCode::TIMESTAMP)
}
