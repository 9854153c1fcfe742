//! Tolerant decoding for model replies. Models capitalise enum values, add
//! spaces and send scores as floats or strings; none of that should throw
//! away an otherwise usable answer.

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// `"Strong Match"`, `"strong-match"` and `"STRONG_MATCH"` all read as `strong_match`.
pub fn token(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Reads a 0–100 score from an integer, a float (rounded) or a numeric string
/// such as `"85%"`. Out-of-range values are clamped.
pub fn score<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        Value::Null => Some(0.0),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => Ok(n.round().clamp(0.0, 100.0) as u32),
        _ => Err(D::Error::custom(format!("expected a score, got {value}"))),
    }
}

/// Implements case-insensitive `parse` and `Deserialize` for a unit enum.
/// Unknown or null values map to the fallback variant.
macro_rules! lenient_enum {
    ($ty:ty, fallback = $fallback:expr, { $( $($text:literal)|+ => $variant:expr ),+ $(,)? }) => {
        impl $ty {
            pub fn parse(raw: &str) -> Self {
                match $crate::llm_client::lenient::token(raw).as_str() {
                    $( $($text)|+ => $variant, )+
                    _ => $fallback,
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let raw = <Option<String> as serde::Deserialize>::deserialize(d)?;
                Ok(raw.as_deref().map(<$ty>::parse).unwrap_or($fallback))
            }
        }
    };
}

pub(crate) use lenient_enum;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Scored {
        #[serde(deserialize_with = "score")]
        value: u32,
    }

    fn read(json: &str) -> Result<u32, serde_json::Error> {
        serde_json::from_str::<Scored>(json).map(|s| s.value)
    }

    #[test]
    fn test_token_normalises_case_and_separators() {
        assert_eq!(token(" Strong Match "), "strong_match");
        assert_eq!(token("NEARLY-IMPOSSIBLE"), "nearly_impossible");
    }

    #[test]
    fn test_score_accepts_floats_and_strings() {
        assert_eq!(read(r#"{"value": 85.5}"#).unwrap(), 86);
        assert_eq!(read(r#"{"value": "72"}"#).unwrap(), 72);
        assert_eq!(read(r#"{"value": "64%"}"#).unwrap(), 64);
        assert_eq!(read(r#"{"value": 140}"#).unwrap(), 100);
        assert_eq!(read(r#"{"value": -3}"#).unwrap(), 0);
    }

    #[test]
    fn test_score_rejects_words() {
        assert!(read(r#"{"value": "very good"}"#).is_err());
        assert!(read(r#"{"value": [1]}"#).is_err());
    }
}
