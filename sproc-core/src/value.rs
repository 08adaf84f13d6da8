use crate::{CallError, Result};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::any;
use time::PrimitiveDateTime;

/// Dynamically typed value crossing the statement boundary.
///
/// Every variant carries an `Option` payload. A variant with an empty payload
/// is a typed NULL: it tells the backend which type the placeholder has even
/// though no data travels with it, which is what binding a database NULL
/// requires.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Timestamp(Option<PrimitiveDateTime>),
}

impl Value {
    /// True for [`Value::Null`] and for every typed NULL.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Int32(None)
                | Value::Int64(None)
                | Value::Float64(None)
                | Value::Decimal(None)
                | Value::Varchar(None)
                | Value::Blob(None)
                | Value::Timestamp(None)
        )
    }
}

/// Conversion between a native Rust type and the [`Value`] moved through
/// statement binds and fetches.
pub trait AsValue {
    /// The typed NULL variant of this type, used when binding an absent value.
    fn as_empty_value() -> Value;

    fn as_value(self) -> Value;

    /// `Ok(None)` when the value is a database NULL of any type, an error
    /// when the variant cannot represent `Self`.
    fn try_from_value(value: Value) -> Result<Option<Self>>
    where
        Self: Sized;
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat:pat => $conversion:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Option<Self>> {
                match value {
                    v if v.is_null() => Ok(None),
                    $destination(Some(v)) => Ok(Some(v.into())),
                    $($pat => $conversion,)*
                    _ => Err(CallError::conversion(format!(
                        "Cannot convert {:?} to {}",
                        value,
                        any::type_name::<Self>(),
                    ))),
                }
            }
        }
    };
}

impl_as_value!(
    bool,
    Value::Boolean,
    Value::Int32(Some(v)) => Ok(Some(v != 0)),
);
impl_as_value!(i32, Value::Int32);
impl_as_value!(
    i64,
    Value::Int64,
    Value::Int32(Some(v)) => Ok(Some(v as i64)),
    Value::Decimal(Some(v)) => v
        .to_i64()
        .filter(|_| v.is_integer())
        .map(Some)
        .ok_or_else(|| CallError::conversion(format!(
            "The decimal value `{v}` does not fit into a i64"
        ))),
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Int32(Some(v)) => Ok(Some(v as f64)),
    Value::Decimal(Some(v)) => v
        .to_f64()
        .map(Some)
        .ok_or_else(|| CallError::conversion(format!(
            "The decimal value `{v}` does not fit into a f64"
        ))),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Int32(Some(v)) => Ok(Some(Decimal::new(v as i64, 0))),
    Value::Int64(Some(v)) => Ok(Some(Decimal::new(v, 0))),
);
impl_as_value!(String, Value::Varchar);
impl_as_value!(Vec<u8>, Value::Blob);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}
