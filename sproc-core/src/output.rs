use crate::{CallError, Result, SqlType, Statement};
use parking_lot::Mutex;
use std::{
    fmt::{self, Debug},
    sync::Arc,
};

/// Lifecycle of an output slot. Strictly forward: an output registers with a
/// statement exactly once and takes a value exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Registered,
    Extracted,
}

struct Cell<T> {
    phase: Phase,
    value: Option<T>,
}

/// An output parameter holder shared between the caller and the call.
///
/// Clones are cheap and all read the same cell, so one handle can be attached
/// to a call while another is kept for reading the result afterwards. The
/// value is `None` when the routine produced a database NULL.
pub struct Out<T> {
    ty: SqlType<T>,
    cell: Arc<Mutex<Cell<T>>>,
}

impl<T> Out<T> {
    pub fn of(ty: SqlType<T>) -> Self {
        Self {
            ty,
            cell: Arc::new(Mutex::new(Cell {
                phase: Phase::Created,
                value: None,
            })),
        }
    }

    pub fn sql_type(&self) -> &SqlType<T> {
        &self.ty
    }

    /// Store a value directly, skipping the statement round trip. Meant for
    /// test doubles standing in for a real backend, the holder behaves as if
    /// a call had produced the value.
    pub fn set_value(&self, value: Option<T>) -> Result<()> {
        let mut cell = self.cell.lock();
        if cell.phase == Phase::Extracted {
            return Err(CallError::state(format!(
                "output {} already has a value",
                self.ty
            )));
        }
        cell.value = value;
        cell.phase = Phase::Extracted;
        Ok(())
    }

    pub(crate) fn register(&self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        {
            let mut cell = self.cell.lock();
            if cell.phase != Phase::Created {
                return Err(CallError::state(format!(
                    "output {} is already registered",
                    self.ty
                )));
            }
            cell.phase = Phase::Registered;
        }
        statement.register_out(index, self.ty.code())
    }

    pub(crate) fn extract(&self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        {
            let cell = self.cell.lock();
            match cell.phase {
                Phase::Created => {
                    return Err(CallError::state(format!(
                        "output {} was never registered",
                        self.ty
                    )));
                }
                Phase::Extracted => {
                    return Err(CallError::state(format!(
                        "output {} already has a value",
                        self.ty
                    )));
                }
                Phase::Registered => {}
            }
        }
        let value = self.ty.extract(statement, index)?;
        let mut cell = self.cell.lock();
        cell.value = value;
        cell.phase = Phase::Extracted;
        Ok(())
    }
}

impl<T: Clone> Out<T> {
    /// The extracted value, `None` for a database NULL. Fails while the call
    /// has not run yet.
    pub fn get(&self) -> Result<Option<T>> {
        let cell = self.cell.lock();
        if cell.phase != Phase::Extracted {
            return Err(CallError::state(format!(
                "output {} has no value, the call did not run",
                self.ty
            )));
        }
        Ok(cell.value.clone())
    }

    /// Like [`Out::get`] but a database NULL is an error.
    pub fn get_required(&self) -> Result<T> {
        self.get()?
            .ok_or_else(|| CallError::NullValue(format!("output {} is NULL", self.ty)))
    }
}

impl<T> Clone for Out<T> {
    fn clone(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<T: Debug> Debug for Out<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.lock();
        if cell.phase == Phase::Extracted {
            write!(f, "Out{{type={}, value={:?}}}", self.ty, cell.value)
        } else {
            write!(f, "Out{{type={}}}", self.ty)
        }
    }
}

impl<T: PartialEq> PartialEq for Out<T> {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.cell, &other.cell) {
            return true;
        }
        if self.ty != other.ty {
            return false;
        }
        let left = self.cell.lock();
        let right = other.cell.lock();
        left.phase == right.phase && left.value == right.value
    }
}

/// Output slot delivering the extracted value to a callback instead of a
/// shared holder.
pub(crate) struct ConsumerOut<T> {
    ty: SqlType<T>,
    phase: Phase,
    consumer: Option<Box<dyn FnOnce(Option<T>) + Send>>,
}

impl<T> ConsumerOut<T> {
    pub(crate) fn new(ty: SqlType<T>, consumer: impl FnOnce(Option<T>) + Send + 'static) -> Self {
        Self {
            ty,
            phase: Phase::Created,
            consumer: Some(Box::new(consumer)),
        }
    }

    fn register(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        if self.phase != Phase::Created {
            return Err(CallError::state(format!(
                "output {} is already registered",
                self.ty
            )));
        }
        self.phase = Phase::Registered;
        statement.register_out(index, self.ty.code())
    }

    fn extract(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        match self.phase {
            Phase::Created => {
                return Err(CallError::state(format!(
                    "output {} was never registered",
                    self.ty
                )));
            }
            Phase::Extracted => {
                return Err(CallError::state(format!(
                    "output {} already delivered its value",
                    self.ty
                )));
            }
            Phase::Registered => {}
        }
        let value = self.ty.extract(statement, index)?;
        self.phase = Phase::Extracted;
        if let Some(consumer) = self.consumer.take() {
            consumer(value);
        }
        Ok(())
    }
}

/// The two delivery modes of an output slot.
pub(crate) enum OutParam<T> {
    Shared(Out<T>),
    Consumer(ConsumerOut<T>),
}

impl<T> OutParam<T> {
    pub(crate) fn register(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        match self {
            OutParam::Shared(out) => out.register(statement, index),
            OutParam::Consumer(out) => out.register(statement, index),
        }
    }

    pub(crate) fn extract(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        match self {
            OutParam::Shared(out) => out.extract(statement, index),
            OutParam::Consumer(out) => out.extract(statement, index),
        }
    }
}
