//! Storage helpers.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a TEXT-stored decimal, with a fallback for scientific notation.
///
/// Stored values are always produced by `Decimal::to_string`, so a parse
/// failure means hand-edited or corrupted data; it is logged and read as
/// zero rather than failing the whole row.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e_decimal) => match Decimal::from_scientific(value) {
            Ok(d) => d,
            Err(e_scientific) => {
                log::error!(
                    "Failed to parse {} '{}': as decimal ({}), as scientific ({}). Reading as zero.",
                    field_name,
                    value,
                    e_decimal,
                    e_scientific
                );
                Decimal::ZERO
            }
        },
    }
}

/// Optional-column variant of [`parse_decimal`].
pub fn parse_decimal_opt(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal(v, field_name))
}
