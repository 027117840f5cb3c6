//! Abstract column types and expression value types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The declared type an expression evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Boolean.
    Boolean,
    /// Any integer width.
    Integer,
    /// Binary floating point.
    Float,
    /// Fixed-point decimal.
    Decimal,
    /// Character data.
    String,
    /// Date, time or timestamp.
    DateTime,
    /// Raw bytes.
    Binary,
    /// UUID.
    Guid,
    /// Not known (e.g. NULL literal).
    Unknown,
}

impl ValueType {
    /// Returns whether the type is an integer, float or decimal.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Decimal)
    }

    /// Returns whether the type can carry a fractional part.
    #[must_use]
    pub const fn is_fractional(self) -> bool {
        matches!(self, Self::Float | Self::Decimal)
    }
}

/// Abstract (vendor-neutral) column data types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Boolean.
    Boolean,

    // Integer types
    /// Signed 1-byte integer.
    SByte,
    /// Unsigned 1-byte integer.
    Byte,
    /// Signed 2-byte integer.
    Int16,
    /// Signed 4-byte integer.
    Int32,
    /// Signed 8-byte integer.
    Int64,

    // Floating point
    /// 4-byte float.
    Single,
    /// 8-byte float.
    Double,

    // Fixed point
    /// Arbitrary-precision decimal.
    Decimal {
        /// Total number of digits.
        precision: Option<u8>,
        /// Number of digits after the decimal point.
        scale: Option<u8>,
    },
    /// Currency with four decimals (19 digits).
    Money,
    /// Currency with four decimals (10 digits).
    SmallMoney,

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    VarChar(Option<u32>),
    /// Fixed-length Unicode string.
    NChar(Option<u32>),
    /// Variable-length Unicode string.
    NVarChar(Option<u32>),
    /// Unbounded text.
    Text,
    /// Unbounded Unicode text.
    NText,

    // Date/time types
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    DateTime,
    /// Date and time with explicit fractional-second precision.
    DateTime2(Option<u8>),
    /// Date and time with minute accuracy.
    SmallDateTime,
    /// Date and time with a UTC offset.
    DateTimeOffset,

    // Binary types
    /// Fixed-length binary.
    Binary(Option<u32>),
    /// Variable-length binary.
    VarBinary(Option<u32>),
    /// Binary large object.
    Blob,

    /// UUID.
    Guid,

    /// Database-specific type text, emitted verbatim.
    Custom(String),
}

impl DataType {
    /// Returns the generic SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Boolean => String::from("BOOLEAN"),
            Self::SByte | Self::Byte => String::from("TINYINT"),
            Self::Int16 => String::from("SMALLINT"),
            Self::Int32 => String::from("INTEGER"),
            Self::Int64 => String::from("BIGINT"),
            Self::Single => String::from("REAL"),
            Self::Double => String::from("DOUBLE PRECISION"),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => String::from("DECIMAL"),
            },
            Self::Money => String::from("MONEY"),
            Self::SmallMoney => String::from("SMALLMONEY"),
            Self::Char(len) => with_length("CHAR", *len),
            Self::VarChar(len) => with_length("VARCHAR", *len),
            Self::NChar(len) => with_length("NCHAR", *len),
            Self::NVarChar(len) => with_length("NVARCHAR", *len),
            Self::Text => String::from("TEXT"),
            Self::NText => String::from("NTEXT"),
            Self::Date => String::from("DATE"),
            Self::Time => String::from("TIME"),
            Self::DateTime => String::from("DATETIME"),
            Self::DateTime2(precision) => match precision {
                Some(p) => format!("DATETIME2({p})"),
                None => String::from("DATETIME2"),
            },
            Self::SmallDateTime => String::from("SMALLDATETIME"),
            Self::DateTimeOffset => String::from("DATETIMEOFFSET"),
            Self::Binary(len) => with_length("BINARY", *len),
            Self::VarBinary(len) => with_length("VARBINARY", *len),
            Self::Blob => String::from("BLOB"),
            Self::Guid => String::from("UUID"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Returns the value type of expressions of this data type.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean => ValueType::Boolean,
            Self::SByte | Self::Byte | Self::Int16 | Self::Int32 | Self::Int64 => {
                ValueType::Integer
            }
            Self::Single | Self::Double => ValueType::Float,
            Self::Decimal { .. } | Self::Money | Self::SmallMoney => ValueType::Decimal,
            Self::Char(_)
            | Self::VarChar(_)
            | Self::NChar(_)
            | Self::NVarChar(_)
            | Self::Text
            | Self::NText => ValueType::String,
            Self::Date
            | Self::Time
            | Self::DateTime
            | Self::DateTime2(_)
            | Self::SmallDateTime
            | Self::DateTimeOffset => ValueType::DateTime,
            Self::Binary(_) | Self::VarBinary(_) | Self::Blob => ValueType::Binary,
            Self::Guid => ValueType::Guid,
            Self::Custom(_) => ValueType::Unknown,
        }
    }
}

fn with_length(name: &str, len: Option<u32>) -> String {
    match len {
        Some(n) => format!("{name}({n})"),
        None => String::from(name),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
