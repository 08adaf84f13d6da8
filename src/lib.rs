//! Typed IN, OUT and INOUT parameter binding for stored procedure and
//! function calls. Calls are declared by position over explicit call text or
//! by name with the text synthesized, run against a backend connection, and
//! read back through typed output holders.

pub use sproc_core::*;
