use std::fmt::{self, Display};

/// Numeric type code reported to the backend when binding a placeholder or
/// registering an output.
///
/// The constants cover the portable call-level codes, vendor crates add their
/// own for driver extensions (Oracle's cursor code for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeCode(pub i32);

impl TypeCode {
    pub const BIGINT: TypeCode = TypeCode(-5);
    pub const BINARY: TypeCode = TypeCode(-2);
    pub const BLOB: TypeCode = TypeCode(2004);
    pub const BOOLEAN: TypeCode = TypeCode(16);
    pub const DECIMAL: TypeCode = TypeCode(3);
    pub const DOUBLE: TypeCode = TypeCode(8);
    pub const INTEGER: TypeCode = TypeCode(4);
    pub const NUMERIC: TypeCode = TypeCode(2);
    pub const OTHER: TypeCode = TypeCode(1111);
    pub const REF_CURSOR: TypeCode = TypeCode(2012);
    pub const TIMESTAMP: TypeCode = TypeCode(93);
    pub const VARCHAR: TypeCode = TypeCode(12);
}

impl Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
