use std::result;
use thiserror::Error;

/// Failure raised while declaring, binding, executing or extracting a call.
///
/// The first five variants describe mistakes on the caller's side of the
/// statement boundary, [`CallError::Backend`] wraps whatever the database
/// driver reported.
#[derive(Debug, Error)]
pub enum CallError {
    /// The call was put together incorrectly, for example a read-only type
    /// used as an input or a second error handler on the same call.
    #[error("invalid call declaration: {0}")]
    Config(String),
    /// A parameter or call was driven through its lifecycle in the wrong
    /// order, for example reading an output before the call ran.
    #[error("invalid call state: {0}")]
    State(String),
    /// A required value came back as database NULL.
    #[error("unexpected NULL: {0}")]
    NullValue(String),
    /// The database produced a value the declared type cannot represent.
    #[error("{0}")]
    Conversion(String),
    /// The backend does not implement a capability the call relies on.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    /// Failure reported by the database while preparing or running the call.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = result::Result<T, CallError>;

impl CallError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    pub(crate) fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion(message.into())
    }

    /// True when the error originated in the database rather than in how the
    /// call was declared or driven. Only these errors reach the recovery
    /// handler of a named call.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(..))
    }
}
