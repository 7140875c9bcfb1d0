//! Conversion of one quantity into every denomination.

use crate::units::rational::{pow10, Rational};
use crate::units::{ConversionError, Unit};

/// Fractional digits kept when rendering a denomination.
pub const DISPLAY_PRECISION: usize = 30;

/// One quantity expressed in all eleven denominations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denominations {
    base: Rational,
    entries: Vec<(Unit, String)>,
}

impl Denominations {
    /// The exact quantity in wei. May be fractional.
    pub fn base_units(&self) -> &Rational {
        &self.base
    }

    /// Rendered value for `unit`.
    pub fn get(&self, unit: Unit) -> &str {
        self.entries
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, v)| v.as_str())
            .unwrap_or("0")
    }

    /// Entries in `Unit::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Unit, &str)> {
        self.entries.iter().map(|(u, v)| (*u, v.as_str()))
    }
}

/// Convert `amount`, given in `unit`, into every denomination.
pub fn convert(amount: &str, unit: Unit) -> Result<Denominations, ConversionError> {
    let quantity: Rational = amount.parse()?;
    convert_rational(&quantity, unit)
}

/// Same as [`convert`] for an already parsed quantity.
pub fn convert_rational(quantity: &Rational, unit: Unit) -> Result<Denominations, ConversionError> {
    let base = quantity.mul_int(pow10(unit.decimals())?)?;

    let entries = Unit::ALL
        .into_iter()
        .map(|target| {
            let value = base.div_int(pow10(target.decimals())?)?;
            Ok((target, value.to_decimal_string(DISPLAY_PRECISION)?))
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;

    Ok(Denominations { base, entries })
}
