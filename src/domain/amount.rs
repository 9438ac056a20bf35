//! Amount type
//!
//! Domain primitive for the `cantidad` of an event.
//! Amounts are validated at construction time, so a stored event can never
//! carry a zero or negative value.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Amount represents a validated monetary value.
///
/// # Invariants
/// - Value is always positive (> 0)
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use eventos_api::domain::Amount;
///
/// let amount = Amount::new(Decimal::new(1500, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(1500, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must be positive (got {0})")]
    NotPositive(Decimal),

    #[error("Amount exceeds maximum representable value")]
    Overflow,

    #[error("Amount is below the smallest representable value")]
    Underflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl AmountError {
    /// A well-formed positive number that does not fit the decimal range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, AmountError::Overflow | AmountError::Underflow)
    }
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::NotPositive` if value <= 0
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }
        Ok(Self(value.normalize()))
    }

    /// Create an Amount from an integer (no decimal places).
    pub fn from_integer(value: i64) -> Result<Self, AmountError> {
        Self::new(Decimal::from(value))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts plain decimals (`"12.50"`) as well as the exponent form JSON
/// numbers may take (`"1e3"`). Surrounding whitespace is ignored.
///
/// Positive numbers outside the decimal range are reported as `Overflow`
/// or `Underflow` rather than as unparseable.
impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| out_of_range(trimmed).unwrap_or(AmountError::ParseError(e.to_string())))?;
        Amount::new(decimal)
    }
}

/// Classify text that is a finite positive float but not a `Decimal`
fn out_of_range(text: &str) -> Option<AmountError> {
    // f64 parsing also takes "inf" and "NaN"
    if !text.bytes().all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b)) {
        return None;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => Some(AmountError::Overflow),
        Ok(value) if value.is_finite() && value > 0.0 => Some(AmountError::Underflow),
        _ => None,
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

/// Serialized as a JSON number: whole amounts as integers (`1500`),
/// fractional ones as floats (`12.5`).
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero() {
            if let Some(whole) = self.0.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match self.0.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(dec!(100));
        assert!(amount.is_ok());
        assert_eq!(amount.unwrap().value(), dec!(100));
    }

    #[test]
    fn test_amount_zero_rejected() {
        let amount = Amount::new(Decimal::ZERO);
        assert!(matches!(amount, Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_amount_negative_rejected() {
        let amount = Amount::new(dec!(-5));
        assert!(matches!(amount, Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_amount_from_str() {
        let amount: Amount = "123.456".parse().unwrap();
        assert_eq!(amount.value(), dec!(123.456));

        let padded: Amount = " 42 ".parse().unwrap();
        assert_eq!(padded.value(), dec!(42));
    }

    #[test]
    fn test_amount_from_scientific() {
        let amount: Amount = "1.5e3".parse().unwrap();
        assert_eq!(amount.value(), dec!(1500));
    }

    #[test]
    fn test_amount_garbage_rejected() {
        assert!(matches!(
            "abc".parse::<Amount>(),
            Err(AmountError::ParseError(_))
        ));
        assert!(matches!("".parse::<Amount>(), Err(AmountError::ParseError(_))));
    }

    #[test]
    fn test_amount_out_of_decimal_range() {
        let largest: Amount = "79228162514264337593543950335".parse().unwrap();
        assert_eq!(largest.value(), Decimal::MAX);

        let too_large = "1e30".parse::<Amount>().unwrap_err();
        assert_eq!(too_large, AmountError::Overflow);
        assert!(too_large.is_out_of_range());
        assert_eq!(
            "79228162514264337593543950336".parse::<Amount>(),
            Err(AmountError::Overflow)
        );

        assert_eq!("1e-40".parse::<Amount>(), Err(AmountError::Underflow));

        // Negative and non-numeric text keep their own errors
        assert!(matches!("-1e30".parse::<Amount>(), Err(AmountError::ParseError(_))));
        assert!(matches!("inf".parse::<Amount>(), Err(AmountError::ParseError(_))));
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let whole = Amount::from_integer(1500).unwrap();
        assert_eq!(serde_json::to_string(&whole).unwrap(), "1500");

        let trailing_zeros = Amount::new(dec!(650.00)).unwrap();
        assert_eq!(serde_json::to_string(&trailing_zeros).unwrap(), "650");

        let fractional = Amount::new(dec!(12.5)).unwrap();
        assert_eq!(serde_json::to_string(&fractional).unwrap(), "12.5");
    }
}
