use crate::{CallError, Result, RowLabeled, TypeCode, Value};

/// Hands out callable statement handles.
///
/// The associated type lets a statement borrow from its connection, backends
/// with reference-counted internals can return an owned handle and ignore the
/// lifetime.
pub trait Connection {
    type Statement<'c>: Statement
    where
        Self: 'c;

    /// Prepare the given call text and return a fresh statement handle.
    /// Dropping the handle releases the statement, on every exit path.
    fn prepare_call(&mut self, sql: &str) -> Result<Self::Statement<'_>>;
}

/// One prepared invocation of a stored routine.
///
/// Placeholder indices are 1-based and follow the order of the `?` markers in
/// the call text. The protocol is strict: inputs are bound and outputs
/// registered before [`Statement::execute`], values are fetched after it.
pub trait Statement {
    /// Bind an input placeholder. A [`Value`] with an empty payload is a
    /// typed NULL bind.
    fn bind_in(&mut self, index: u16, code: TypeCode, value: Value) -> Result<()>;

    /// Register a placeholder as an output of the given type.
    fn register_out(&mut self, index: u16, code: TypeCode) -> Result<()>;

    fn execute(&mut self) -> Result<()>;

    /// Read a registered output. A native NULL comes back as a typed NULL
    /// [`Value`].
    fn fetch_out(&mut self, index: u16) -> Result<Value>;

    /// Take a cursor-valued output as an iterable row handle. Dropping the
    /// handle closes the cursor.
    fn take_rows(&mut self, _index: u16) -> Result<Box<dyn Rows + '_>> {
        Err(CallError::Unsupported(
            "this backend does not produce cursor outputs".into(),
        ))
    }

    /// Take a large-object output, `None` when it is NULL. Dropping the
    /// handle frees the object on the backend.
    fn take_lob(&mut self, _index: u16) -> Result<Option<Box<dyn Lob + '_>>> {
        Err(CallError::Unsupported(
            "this backend does not produce large-object outputs".into(),
        ))
    }
}

/// Forward-only row handle produced by a cursor output.
pub trait Rows {
    fn next_row(&mut self) -> Result<Option<RowLabeled>>;
}

/// Large-object handle, kept open only while its bytes are being read.
pub trait Lob {
    fn size(&mut self) -> Result<u64>;

    fn read_all(&mut self) -> Result<Vec<u8>>;
}
