mod call;
mod connection;
mod error;
mod input;
mod named;
mod output;
mod row;
mod slot;
mod sql_type;
mod type_code;
pub mod types;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use call::*;
pub use connection::*;
pub use error::*;
pub use input::*;
pub use named::*;
pub use output::*;
pub use row::*;
pub use sql_type::*;
pub use type_code::*;
pub use value::*;
