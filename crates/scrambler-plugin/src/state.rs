//! Persisted parameter state.
//!
//! State format: a flat JSON object mapping each parameter's string id to
//! its value.
//!
//! ```json
//! {"damping":0.5,"dryLevel":0.4000000059604645,"roomSize":0.5,
//!  "wetLevel":0.33000001311302185,"width":1.0}
//! ```
//!
//! Values are written as the exact f64 widening of the stored f32, so every
//! in-range value reads back bit-for-bit. Using string ids (not indices)
//! keeps state valid if parameters are ever reordered.

use crate::error::PluginError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered mapping of parameter string id to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamState {
    values: BTreeMap<String, f32>,
}

impl ParamState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `name`.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// Store a value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: f32) {
        self.values.insert(name.into(), value);
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode as the JSON state blob.
    pub fn to_bytes(&self) -> Vec<u8> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(k, &v)| (k.clone(), serde_json::Value::from(f64::from(v))))
            .collect();
        // Serializing a Value never fails: keys are strings and non-finite
        // numbers are already mapped to null by `Value::from`.
        serde_json::to_vec(&serde_json::Value::Object(map)).unwrap_or_default()
    }

    /// Decode a JSON state blob.
    ///
    /// Entries whose value is not a number are skipped; the caller decides
    /// which keys it understands. Fails only if the bytes are not JSON or
    /// the top level is not an object.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PluginError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        let serde_json::Value::Object(obj) = value else {
            return Err(PluginError::NotAnObject);
        };

        let mut state = Self::new();
        for (key, val) in obj {
            let Some(v) = val.as_f64() else {
                tracing::debug!(key = %key, "skipping non-numeric state entry");
                continue;
            };
            state.insert(key, v as f32);
        }
        Ok(state)
    }
}

impl<K: Into<String>> FromIterator<(K, f32)> for ParamState {
    fn from_iter<I: IntoIterator<Item = (K, f32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_flat_object() {
        let state: ParamState = [("width", 1.0), ("damping", 0.5)].into_iter().collect();
        let json = String::from_utf8(state.to_bytes()).unwrap();
        assert_eq!(json, r#"{"damping":0.5,"width":1.0}"#);
    }

    #[test]
    fn values_round_trip_bit_exact() {
        let state: ParamState = [("wetLevel", 0.33), ("dryLevel", 0.1 + 0.2)]
            .into_iter()
            .collect();
        let decoded = ParamState::from_bytes(&state.to_bytes()).unwrap();
        assert_eq!(decoded, state);
        assert_eq!(
            decoded.get("wetLevel").map(f32::to_bits),
            Some(0.33f32.to_bits())
        );
    }

    #[test]
    fn skips_non_numeric_entries() {
        let state =
            ParamState::from_bytes(br#"{"roomSize":"big","damping":0.25,"width":null}"#).unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("damping"), Some(0.25));
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            ParamState::from_bytes(b"[1, 2, 3]"),
            Err(PluginError::NotAnObject)
        ));
        assert!(matches!(
            ParamState::from_bytes(b"42"),
            Err(PluginError::NotAnObject)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ParamState::from_bytes(b"{\"roomSize\": "),
            Err(PluginError::InvalidState(_))
        ));
        assert!(matches!(
            ParamState::from_bytes(b""),
            Err(PluginError::InvalidState(_))
        ));
    }

    #[test]
    fn empty_object_is_empty_state() {
        let state = ParamState::from_bytes(b"{}").unwrap();
        assert!(state.is_empty());
    }
}
