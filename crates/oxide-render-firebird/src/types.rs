//! Column type mapping.

use oxide_render_core::ast::DataType;

/// Highest DECIMAL precision Firebird accepts.
pub const MAX_DECIMAL_PRECISION: u8 = 18;

/// Returns the Firebird column type for an abstract data type.
#[must_use]
pub fn map_data_type(data_type: &DataType) -> String {
    match data_type {
        DataType::Decimal {
            precision: Some(p),
            scale,
        } if *p > MAX_DECIMAL_PRECISION => DataType::Decimal {
            precision: Some(MAX_DECIMAL_PRECISION),
            scale: *scale,
        }
        .to_sql(),
        DataType::SByte | DataType::Byte => String::from("SMALLINT"),
        DataType::Money => String::from("DECIMAL(18, 4)"),
        DataType::SmallMoney => String::from("DECIMAL(10, 4)"),
        DataType::DateTime | DataType::DateTime2(_) | DataType::SmallDateTime => {
            String::from("TIMESTAMP")
        }
        DataType::NVarChar(Some(len)) if *len > 0 => format!("VARCHAR({len})"),
        DataType::NVarChar(_) => String::from("VARCHAR"),
        other => other.to_sql(),
    }
}
