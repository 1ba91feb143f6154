//! Null-tolerant wire decoding helpers
//!
//! The backend and routing service emit explicit JSON `null` interchangeably
//! with an absent field. A field-level deserializer coalesces `null` to the
//! field's default so one null value never fails the surrounding structure.

use serde::{Deserialize, Deserializer};

/// Deserialize a value, mapping `null` to `T::default()`.
///
/// Pair with `#[serde(default)]` so the absent-field case is covered too.
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "null_to_default")]
        value: f64,
    }

    #[test]
    fn null_and_absent_both_yield_the_default() {
        let p: Probe = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(p.value, 0.0);
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.value, 0.0);
        let p: Probe = serde_json::from_str(r#"{"value": 3.5}"#).unwrap();
        assert_eq!(p.value, 3.5);
    }
}
