use crate::{AsValue, CallError, Result, Statement, TypeCode};
use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

/// Bind side of a [`SqlType`]: pushes one native value (or a typed NULL when
/// the value is absent) into a statement placeholder.
pub type Setter<T> =
    Arc<dyn Fn(&mut dyn Statement, u16, TypeCode, Option<T>) -> Result<()> + Send + Sync>;

/// Fetch side of a [`SqlType`]: reads one output placeholder, `None` for a
/// database NULL.
pub type Extractor<T> = Arc<dyn Fn(&mut dyn Statement, u16) -> Result<Option<T>> + Send + Sync>;

/// A call-level type: how values of the native type `T` travel through
/// statement binds and output registrations.
///
/// Handles are cheap to clone and usually come from [`types`](crate::types)
/// or from a vendor crate. For backend types the catalog does not cover, an
/// ad-hoc instance can be assembled at the call site with [`SqlType::of`] or
/// [`SqlType::read_only`].
pub struct SqlType<T> {
    name: &'static str,
    code: TypeCode,
    setter: Option<Setter<T>>,
    extractor: Extractor<T>,
}

impl<T> SqlType<T> {
    pub fn of(
        name: &'static str,
        code: TypeCode,
        setter: Option<Setter<T>>,
        extractor: Extractor<T>,
    ) -> Self {
        Self {
            name,
            code,
            setter,
            extractor,
        }
    }

    /// A type usable for outputs only. Using it for an input is rejected at
    /// declaration time, cursor types are the common case.
    pub fn read_only(
        name: &'static str,
        code: TypeCode,
        extractor: impl Fn(&mut dyn Statement, u16) -> Result<Option<T>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            code,
            setter: None,
            extractor: Arc::new(extractor),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn code(&self) -> TypeCode {
        self.code
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    pub(crate) fn bind(
        &self,
        statement: &mut dyn Statement,
        index: u16,
        value: Option<T>,
    ) -> Result<()> {
        let Some(setter) = &self.setter else {
            return Err(CallError::config(format!(
                "Type {self} cannot be used as an input"
            )));
        };
        setter(statement, index, self.code, value)
    }

    pub(crate) fn extract(&self, statement: &mut dyn Statement, index: u16) -> Result<Option<T>> {
        (self.extractor)(statement, index)
    }
}

impl<T: AsValue + 'static> SqlType<T> {
    /// Derive both sides from the [`AsValue`] conversions: inputs bind the
    /// converted [`Value`](crate::Value), outputs are read back through
    /// [`Statement::fetch_out`].
    pub fn simple(name: &'static str, code: TypeCode) -> Self {
        Self {
            name,
            code,
            setter: Some(Arc::new(|statement, index, code, value: Option<T>| {
                let value = match value {
                    Some(value) => value.as_value(),
                    None => T::as_empty_value(),
                };
                statement.bind_in(index, code, value)
            })),
            extractor: Arc::new(|statement, index| {
                T::try_from_value(statement.fetch_out(index)?)
            }),
        }
    }
}

impl<T> Clone for SqlType<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            code: self.code,
            setter: self.setter.clone(),
            extractor: self.extractor.clone(),
        }
    }
}

impl<T> PartialEq for SqlType<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.code == other.code
    }
}

impl<T> Display for SqlType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.code)
    }
}

impl<T> Debug for SqlType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SqlType {}[{}]", self.name, self.code)
    }
}
