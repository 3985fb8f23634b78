//! Casting temperature input coercion
//!
//! Clients send `casting_temp` either as a JSON number or as a numeric
//! string. Anything that does not reduce to a finite `f64` is rejected
//! before any parameter is computed.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by the predictor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("Invalid casting temperature value")]
    InvalidInput,
}

/// A validated, finite casting temperature.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct CastingTemperature(f64);

impl CastingTemperature {
    /// Temperature used when the request omits `casting_temp`.
    pub const DEFAULT: Self = Self(0.0);

    pub fn new(value: f64) -> Result<Self, PredictError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(PredictError::InvalidInput)
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// Coerce an optional JSON field. `None` (field absent) yields the default.
    pub fn from_json(field: Option<&Value>) -> Result<Self, PredictError> {
        match field {
            None => Ok(Self::DEFAULT),
            Some(Value::Number(n)) => n.as_f64().ok_or(PredictError::InvalidInput).and_then(Self::new),
            Some(Value::String(s)) => s.parse(),
            Some(_) => Err(PredictError::InvalidInput),
        }
    }

    /// Coerce the raw JSON text of a field.
    ///
    /// Number literals are parsed directly as `f64`, so a literal outside the
    /// `f64` range (`1e400`) becomes infinite and is rejected here instead of
    /// failing the whole body.
    pub fn from_raw_json(raw: &str) -> Result<Self, PredictError> {
        let raw = raw.trim();
        if raw.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            return raw.parse();
        }
        let value: Value = serde_json::from_str(raw).map_err(|_| PredictError::InvalidInput)?;
        Self::from_json(Some(&value))
    }
}

impl FromStr for CastingTemperature {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| PredictError::InvalidInput)?;
        Self::new(value)
    }
}

impl From<CastingTemperature> for f64 {
    fn from(t: CastingTemperature) -> Self {
        t.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_field_defaults_to_zero() {
        assert_eq!(CastingTemperature::from_json(None).unwrap().value(), 0.0);
    }

    #[test]
    fn test_numbers_and_numeric_strings_accepted() {
        let cases = [
            (json!(30), 30.0),
            (json!(-12.5), -12.5),
            (json!("30"), 30.0),
            (json!("  718.25 "), 718.25),
            (json!("1e3"), 1000.0),
            (json!("-40"), -40.0),
        ];
        for (input, expected) in cases {
            let t = CastingTemperature::from_json(Some(&input)).unwrap();
            assert!((t.value() - expected).abs() < 1e-12, "{input} parsed as {}", t.value());
        }
    }

    #[test]
    fn test_non_numeric_rejected() {
        let cases = [
            json!("abc"),
            json!(""),
            json!("12abc"),
            json!("nan"),
            json!("inf"),
            json!(true),
            json!(null),
            json!([30]),
            json!({"value": 30}),
        ];
        for input in cases {
            assert_eq!(
                CastingTemperature::from_json(Some(&input)),
                Err(PredictError::InvalidInput),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_raw_number_literals() {
        assert_eq!(CastingTemperature::from_raw_json("30").unwrap().value(), 30.0);
        assert_eq!(CastingTemperature::from_raw_json("-1.5E2").unwrap().value(), -150.0);
        assert_eq!(CastingTemperature::from_raw_json(r#""45""#).unwrap().value(), 45.0);
    }

    #[test]
    fn test_raw_out_of_range_number_rejected() {
        for raw in ["1e400", "-1e400", r#""1e400""#, "null", "true", "[1]"] {
            assert_eq!(
                CastingTemperature::from_raw_json(raw),
                Err(PredictError::InvalidInput),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_message_is_fixed() {
        assert_eq!(
            PredictError::InvalidInput.to_string(),
            "Invalid casting temperature value"
        );
    }
}
