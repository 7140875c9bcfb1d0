//! Exact non-negative rational numbers over 512-bit integers.
//!
//! Denomination scales span thirty orders of magnitude, so quantities are
//! never routed through floating point. Every value is kept reduced.

use alloy::primitives::aliases::U512;
use std::fmt;
use std::str::FromStr;

use crate::units::ConversionError;

/// A reduced fraction `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    num: U512,
    den: U512,
}

impl Rational {
    /// Build a reduced fraction. Fails on a zero denominator.
    pub fn new(num: U512, den: U512) -> Result<Self, ConversionError> {
        if den.is_zero() {
            return Err(ConversionError::InvalidNumber("division by zero".to_string()));
        }
        let g = gcd(num, den);
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    pub fn from_integer(value: U512) -> Self {
        Self {
            num: value,
            den: U512::from(1u64),
        }
    }

    pub fn numerator(&self) -> U512 {
        self.num
    }

    pub fn denominator(&self) -> U512 {
        self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.den == U512::from(1u64)
    }

    /// Multiply by an integer factor.
    pub fn mul_int(&self, factor: U512) -> Result<Self, ConversionError> {
        let g = gcd(factor, self.den);
        let num = self
            .num
            .checked_mul(factor / g)
            .ok_or(ConversionError::Overflow)?;
        Self::new(num, self.den / g)
    }

    /// Divide by a non-zero integer divisor.
    pub fn div_int(&self, divisor: U512) -> Result<Self, ConversionError> {
        if divisor.is_zero() {
            return Err(ConversionError::InvalidNumber("division by zero".to_string()));
        }
        let g = gcd(self.num, divisor);
        let den = self
            .den
            .checked_mul(divisor / g)
            .ok_or(ConversionError::Overflow)?;
        Self::new(self.num / g, den)
    }

    /// Render with at most `precision` fractional digits.
    ///
    /// The last kept digit is rounded half up. Trailing zeros and a dangling
    /// decimal point are trimmed, so integral values print without a point.
    pub fn to_decimal_string(&self, precision: usize) -> Result<String, ConversionError> {
        let scale = pow10(precision)?;
        let scaled = self.num.checked_mul(scale).ok_or(ConversionError::Overflow)?;
        let mut quotient = scaled / self.den;
        let remainder = scaled % self.den;
        // half up: 2r >= den, written so nothing can overflow
        if remainder >= self.den - remainder {
            quotient += U512::from(1u64);
        }

        let int_part = quotient / scale;
        let frac_part = quotient % scale;
        if precision == 0 || frac_part.is_zero() {
            return Ok(int_part.to_string());
        }

        let frac = format!("{:0>width$}", frac_part.to_string(), width = precision);
        Ok(format!("{}.{}", int_part, frac.trim_end_matches('0')))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for Rational {
    type Err = ConversionError;

    /// Accepts `12`, `1.5`, `.5`, `1.5e3`, `2E-4` and `3/2`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ConversionError::InvalidNumber(input.to_string());
        let s = input.trim();
        let s = s.strip_prefix('+').unwrap_or(s);
        if s.is_empty() || s.starts_with('-') {
            return Err(invalid());
        }

        if let Some((num, den)) = s.split_once('/') {
            let num = parse_digits(num).ok_or_else(invalid)?;
            let den = parse_digits(den).ok_or_else(invalid)?;
            return Self::new(num, den).map_err(|_| invalid());
        }

        let (mantissa, exponent) = match s.find(&['e', 'E'][..]) {
            Some(idx) => {
                let exp: i64 = s[idx + 1..].parse().map_err(|_| invalid())?;
                (&s[..idx], exp)
            }
            None => (s, 0),
        };

        let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }
        let digits = format!("{}{}", int_digits, frac_digits);
        let value = parse_digits(&digits).ok_or_else(invalid)?;
        if value.is_zero() {
            return Ok(Self::from_integer(value));
        }

        let shift = exponent
            .checked_sub(frac_digits.len() as i64)
            .ok_or(ConversionError::Overflow)?;
        let magnitude = usize::try_from(shift.unsigned_abs()).map_err(|_| ConversionError::Overflow)?;
        let factor = pow10(magnitude)?;
        let base = Self::from_integer(value);
        if shift >= 0 {
            base.mul_int(factor)
        } else {
            base.div_int(factor)
        }
    }
}

/// `10^exp`, failing once the result no longer fits in 512 bits.
pub(crate) fn pow10(exp: usize) -> Result<U512, ConversionError> {
    U512::from(10u64)
        .checked_pow(U512::from(exp))
        .ok_or(ConversionError::Overflow)
}

fn parse_digits(s: &str) -> Option<U512> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U512::from_str_radix(s, 10).ok()
}

fn gcd(mut a: U512, mut b: U512) -> U512 {
    while !b.is_zero() {
        let r = a % b;
        a = b;
        b = r;
    }
    if a.is_zero() {
        U512::from(1u64)
    } else {
        a
    }
}
