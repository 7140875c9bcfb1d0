//! Ether denominations and exact conversion between them.
//!
//! # Data Flow
//! ```text
//! "1.5" + ether
//!     → rational.rs (exact parse, no floats)
//!     → × 10^18 (base units, still exact)
//!     → converter.rs (÷ each scale, 30 fractional digits)
//!     → Denominations (wei .. tether, in order)
//! ```

pub mod converter;
pub mod rational;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use converter::{convert, convert_rational, Denominations, DISPLAY_PRECISION};
pub use rational::Rational;

/// Errors raised while parsing or converting quantities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Input is not a non-negative rational number.
    #[error("invalid number: <{0}>")]
    InvalidNumber(String),

    /// Unit name is not one of the supported denominations.
    #[error("unknown unit: <{0}>")]
    UnknownUnit(String),

    /// Intermediate value exceeded 512 bits.
    #[error("number out of range")]
    Overflow,
}

/// A named multiple of wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Wei,
    Kwei,
    Mwei,
    Gwei,
    Szabo,
    Finney,
    Ether,
    Kether,
    Mether,
    Gether,
    Tether,
}

impl Unit {
    /// Every denomination, smallest first.
    pub const ALL: [Unit; 11] = [
        Unit::Wei,
        Unit::Kwei,
        Unit::Mwei,
        Unit::Gwei,
        Unit::Szabo,
        Unit::Finney,
        Unit::Ether,
        Unit::Kether,
        Unit::Mether,
        Unit::Gether,
        Unit::Tether,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Wei => "wei",
            Unit::Kwei => "kwei",
            Unit::Mwei => "mwei",
            Unit::Gwei => "gwei",
            Unit::Szabo => "szabo",
            Unit::Finney => "finney",
            Unit::Ether => "ether",
            Unit::Kether => "kether",
            Unit::Mether => "mether",
            Unit::Gether => "gether",
            Unit::Tether => "tether",
        }
    }

    /// Power of ten relating this unit to wei.
    pub fn decimals(&self) -> usize {
        match self {
            Unit::Wei => 0,
            Unit::Kwei => 3,
            Unit::Mwei => 6,
            Unit::Gwei => 9,
            Unit::Szabo => 12,
            Unit::Finney => 15,
            Unit::Ether => 18,
            Unit::Kether => 21,
            Unit::Mether => 24,
            Unit::Gether => 27,
            Unit::Tether => 30,
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Unit::Wei)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_order_and_scales() {
        let decimals: Vec<usize> = Unit::ALL.iter().map(Unit::decimals).collect();
        assert_eq!(decimals, vec![0, 3, 6, 9, 12, 15, 18, 21, 24, 27, 30]);
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("gwei".parse::<Unit>().unwrap(), Unit::Gwei);
        assert_eq!("Ether".parse::<Unit>().unwrap(), Unit::Ether);
        assert_eq!(
            "eth".parse::<Unit>().unwrap_err(),
            ConversionError::UnknownUnit("eth".to_string())
        );
    }
}
