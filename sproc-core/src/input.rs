use crate::{CallError, Result, SqlType, Statement, types};
use rust_decimal::Decimal;
use std::fmt::{self, Debug};
use time::PrimitiveDateTime;

/// An input parameter: a value, or a typed NULL, paired with the type that
/// knows how to bind it.
pub struct In<T> {
    value: Option<T>,
    ty: SqlType<T>,
}

impl<T> In<T> {
    /// Pair a value with an explicit type. Rejected when the type has no
    /// bind side (cursor and other read-only types).
    pub fn new(value: Option<T>, ty: SqlType<T>) -> Result<Self> {
        if !ty.has_setter() {
            return Err(CallError::config(format!(
                "Type {ty} cannot be used as an input"
            )));
        }
        Ok(Self { value, ty })
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn sql_type(&self) -> &SqlType<T> {
        &self.ty
    }

    pub(crate) fn bind(self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        self.ty.bind(statement, index, self.value)
    }
}

impl<T: Debug> Debug for In<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "In{{{} {:?}}}", self.ty.name(), self.value)
    }
}

impl<T: PartialEq> PartialEq for In<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.value == other.value
    }
}

/// Infallible conversion into an [`In`] for the native types the builtin
/// catalog covers, so calls can be declared with plain values. An `Option`
/// declares a nullable input, `None` binds a typed NULL.
pub trait IntoIn {
    type Native;

    fn into_in(self) -> In<Self::Native>;
}

impl<T> IntoIn for In<T> {
    type Native = T;

    fn into_in(self) -> In<T> {
        self
    }
}

macro_rules! impl_into_in {
    ($source:ty => $native:ty, $ty:expr, |$value:ident| $conversion:expr) => {
        impl IntoIn for $source {
            type Native = $native;
            fn into_in(self) -> In<$native> {
                let $value = self;
                In {
                    value: Some($conversion),
                    ty: $ty,
                }
            }
        }
        impl IntoIn for Option<$source> {
            type Native = $native;
            fn into_in(self) -> In<$native> {
                In {
                    value: self.map(|$value| $conversion),
                    ty: $ty,
                }
            }
        }
    };
}

impl_into_in!(bool => bool, types::boolean(), |v| v);
impl_into_in!(i32 => i32, types::integer(), |v| v);
impl_into_in!(i64 => i64, types::bigint(), |v| v);
impl_into_in!(f64 => f64, types::double(), |v| v);
impl_into_in!(Decimal => Decimal, types::decimal(), |v| v);
impl_into_in!(String => String, types::varchar(), |v| v);
impl_into_in!(Vec<u8> => Vec<u8>, types::blob(), |v| v);
impl_into_in!(PrimitiveDateTime => PrimitiveDateTime, types::timestamp(), |v| v);

impl<'a> IntoIn for &'a str {
    type Native = String;

    fn into_in(self) -> In<String> {
        In {
            value: Some(self.to_owned()),
            ty: types::varchar(),
        }
    }
}

impl<'a> IntoIn for Option<&'a str> {
    type Native = String;

    fn into_in(self) -> In<String> {
        In {
            value: self.map(str::to_owned),
            ty: types::varchar(),
        }
    }
}

impl<'a> IntoIn for &'a [u8] {
    type Native = Vec<u8>;

    fn into_in(self) -> In<Vec<u8>> {
        In {
            value: Some(self.to_vec()),
            ty: types::blob(),
        }
    }
}

impl<'a> IntoIn for Option<&'a [u8]> {
    type Native = Vec<u8>;

    fn into_in(self) -> In<Vec<u8>> {
        In {
            value: self.map(<[u8]>::to_vec),
            ty: types::blob(),
        }
    }
}
