use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw device record as returned by the remote store.
///
/// Records are open-ended mappings of field name to value; no two records
/// are guaranteed to share the same key set, and values may be strings,
/// numbers, nulls, or nested arrays. All downstream field access goes
/// through the field resolver, never through direct key lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the value under `key`, or `None` when the key is absent or
    /// the record is not a mapping at all.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(key))
    }

    /// Whether the record is a JSON object. Non-mapping records still
    /// normalize, with every field resolving to the not-available sentinel.
    pub fn is_mapping(&self) -> bool {
        self.0.is_object()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_on_object() {
        let record = RawRecord::new(json!({"deviceName": "NCOX"}));
        assert_eq!(record.get("deviceName"), Some(&json!("NCOX")));
        assert_eq!(record.get("missing"), None);
        assert!(record.is_mapping());
    }

    #[test]
    fn test_get_on_non_mapping() {
        let record = RawRecord::new(json!(["not", "a", "mapping"]));
        assert_eq!(record.get("deviceName"), None);
        assert!(!record.is_mapping());
    }

    #[test]
    fn test_deserializes_transparently() {
        let records: Vec<RawRecord> =
            serde_json::from_str(r#"[{"name": "NCOX"}, {"Memory": "16GB"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Memory"), Some(&serde_json::json!("16GB")));
    }
}
