//! Money representation at the JSON boundary
//!
//! Amounts are stored and computed as integer cents (`i64`). They cross the
//! JSON boundary as plain decimal numbers with at most two fraction digits
//! (e.g. `2.5` for 2.50 EUR). The serde modules here perform the conversion
//! exactly via [`rust_decimal`]; floating point never participates in
//! arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Number of decimal places for money display values
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum accepted money value in cents (999,999.99)
pub const MAX_CENTS: i64 = 99_999_999;

/// Errors produced when reading a money value at the JSON boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// NaN or infinity
    #[error("money value must be a finite number")]
    NotFinite,
    /// Negative amount
    #[error("money value must not be negative")]
    Negative,
    /// More than two fraction digits
    #[error("money value must have at most 2 decimal places")]
    TooPrecise,
    /// Exceeds [`MAX_CENTS`]
    #[error("money value is too large")]
    TooLarge,
}

/// Convert integer cents to the JSON display value
pub fn cents_to_f64(cents: i64) -> f64 {
    Decimal::new(cents, DECIMAL_PLACES).to_f64().unwrap_or_default()
}

/// Convert a JSON number to integer cents
///
/// `Decimal::from_f64` strips float noise (`0.1 + 0.2` reads as `0.3`),
/// so only genuinely sub-cent input is rejected.
pub fn f64_to_cents(value: f64) -> Result<i64, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    let decimal = Decimal::from_f64(value).ok_or(MoneyError::TooLarge)?;
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(MoneyError::Negative);
    }
    let cents = decimal * Decimal::ONE_HUNDRED;
    if !cents.fract().is_zero() {
        return Err(MoneyError::TooPrecise);
    }
    let cents = cents.to_i64().ok_or(MoneyError::TooLarge)?;
    if cents > MAX_CENTS {
        return Err(MoneyError::TooLarge);
    }
    Ok(cents)
}

/// Cents as a two-decimal JSON number
///
/// Usage: `#[serde(with = "crate::models::money::cents")]` on an `i64` field.
pub mod cents {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(cents: &i64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_f64(super::cents_to_f64(*cents))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        super::f64_to_cents(value).map_err(serde::de::Error::custom)
    }
}

/// Optional cents as a two-decimal JSON number or null
///
/// Usage: `#[serde(default, with = "crate::models::money::cents_opt")]`
/// on an `Option<i64>` field.
pub mod cents_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(cents: &Option<i64>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match cents {
            Some(c) => s.serialize_some(&super::cents_to_f64(*c)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<f64>::deserialize(deserializer)? {
            Some(value) => super::f64_to_cents(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_cents_to_f64() {
        assert_eq!(cents_to_f64(0), 0.0);
        assert_eq!(cents_to_f64(1), 0.01);
        assert_eq!(cents_to_f64(250), 2.5);
        assert_eq!(cents_to_f64(300), 3.0);
        assert_eq!(cents_to_f64(30), 0.3);
        assert_eq!(cents_to_f64(MAX_CENTS), 999_999.99);
    }

    #[test]
    fn test_f64_to_cents_exact() {
        assert_eq!(f64_to_cents(0.0), Ok(0));
        assert_eq!(f64_to_cents(0.01), Ok(1));
        assert_eq!(f64_to_cents(2.5), Ok(250));
        assert_eq!(f64_to_cents(2.50), Ok(250));
        assert_eq!(f64_to_cents(3.0), Ok(300));
        assert_eq!(f64_to_cents(999_999.99), Ok(MAX_CENTS));
    }

    #[test]
    fn test_f64_to_cents_strips_float_noise() {
        // 0.1 + 0.2 == 0.30000000000000004 in f64
        assert_eq!(f64_to_cents(0.1 + 0.2), Ok(30));
    }

    #[test]
    fn test_f64_to_cents_rejects_sub_cent() {
        assert_eq!(f64_to_cents(2.505), Err(MoneyError::TooPrecise));
        assert_eq!(f64_to_cents(0.001), Err(MoneyError::TooPrecise));
    }

    #[test]
    fn test_f64_to_cents_rejects_negative() {
        assert_eq!(f64_to_cents(-1.0), Err(MoneyError::Negative));
        assert_eq!(f64_to_cents(-0.01), Err(MoneyError::Negative));
    }

    #[test]
    fn test_f64_to_cents_rejects_non_finite() {
        assert_eq!(f64_to_cents(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(f64_to_cents(f64::INFINITY), Err(MoneyError::NotFinite));
        assert_eq!(f64_to_cents(f64::NEG_INFINITY), Err(MoneyError::NotFinite));
    }

    #[test]
    fn test_f64_to_cents_rejects_too_large() {
        assert_eq!(f64_to_cents(1_000_000.0), Err(MoneyError::TooLarge));
        assert_eq!(f64_to_cents(f64::MAX), Err(MoneyError::TooLarge));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(f64_to_cents(-0.0), Ok(0));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Precio {
        #[serde(with = "super::cents")]
        precio: i64,
    }

    #[test]
    fn test_cents_serde() {
        let p = Precio { precio: 250 };
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"precio":2.5}"#);

        let parsed: Precio = serde_json::from_str(r#"{"precio":2.5}"#).unwrap();
        assert_eq!(parsed.precio, 250);

        let parsed: Precio = serde_json::from_str(r#"{"precio":8}"#).unwrap();
        assert_eq!(parsed.precio, 800);
    }

    #[test]
    fn test_cents_serde_rejects_invalid() {
        assert!(serde_json::from_str::<Precio>(r#"{"precio":-2.5}"#).is_err());
        assert!(serde_json::from_str::<Precio>(r#"{"precio":2.505}"#).is_err());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct PrecioOpt {
        #[serde(default, with = "super::cents_opt")]
        precio: Option<i64>,
    }

    #[test]
    fn test_cents_opt_serde() {
        let p = PrecioOpt { precio: Some(250) };
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"precio":2.5}"#);

        let parsed: PrecioOpt = serde_json::from_str(r#"{"precio":2.5}"#).unwrap();
        assert_eq!(parsed.precio, Some(250));

        let parsed: PrecioOpt = serde_json::from_str(r#"{"precio":null}"#).unwrap();
        assert_eq!(parsed.precio, None);

        let parsed: PrecioOpt = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.precio, None);
    }
}
