//! Data models for Battlelog entities.
//!
//! - `BattlepackRecord`, `BattlepacksResponse`: wire shapes of the pack listing
//! - `Battlepack`: the id-only projection the opener works with
//! - `OpenOutcome`, `OpenStatus`, `OpenFailure`: settled result of one open

pub mod battlepack;
pub mod outcome;

pub use battlepack::{Battlepack, BattlepackRecord, BattlepacksResponse, UNOPENED_SENTINEL};
pub use outcome::{OpenFailure, OpenOutcome, OpenStatus};

// Helper to deserialize string or number as Option<String>
pub(crate) fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct StringOrNumberVisitor;

    impl<'de> de::Visitor<'de> for StringOrNumberVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            if v.is_empty() {
                Ok(None)
            } else {
                Ok(Some(v.to_string()))
            }
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(integral_f64(v).map(|n| n.to_string()))
        }

        fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}

// Helper to deserialize an integer-valued number as Option<i64>.
// Strings, fractions and anything else become None rather than an error.
pub(crate) fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        _ => None,
    })
}

fn integral_f64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}
