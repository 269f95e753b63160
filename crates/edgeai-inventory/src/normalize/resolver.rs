//! Field resolution for heterogeneous device records.
//!
//! Raw records spell the same logical field many ways ("Memory" vs
//! "memory" vs "RAM", "Operating Tempeture" as found in the live store).
//! Each canonical field carries a priority-ordered candidate key list;
//! the first key present with a usable value wins, and everything else
//! resolves to the not-available sentinel. Resolution is pure and never
//! fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::RawRecord;

/// Placeholder rendered wherever a value resolved to the sentinel.
pub const NOT_AVAILABLE: &str = "Not Available";

/// String values that count as "no value" regardless of key match.
const REJECTED_VALUES: [&str; 4] = ["unknown", "none", "n/a", "not specified"];

/// Result of resolving one logical field from a raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Text(String),
    Number(f64),
    Items(Vec<String>),
    /// The sentinel: no candidate key produced a usable value. This is
    /// what flows downstream instead of null.
    NotAvailable,
}

impl ResolvedValue {
    pub fn is_available(&self) -> bool {
        !matches!(self, ResolvedValue::NotAvailable)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Collapses the value to a display string; numbers are rendered
    /// without a trailing `.0`, item lists joined with commas.
    pub fn display(&self) -> String {
        match self {
            ResolvedValue::Text(s) => s.clone(),
            ResolvedValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            ResolvedValue::Items(items) => items.join(", "),
            ResolvedValue::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }

    /// The value as an owned string, or `None` for the sentinel.
    pub fn into_display(self) -> Option<String> {
        match self {
            ResolvedValue::NotAvailable => None,
            other => Some(other.display()),
        }
    }
}

/// Canonical specification fields.
///
/// The closed set of logical spec names used by the formatter and the
/// exporters; raw key spellings never leak past the resolver.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SpecField {
    Processor,
    Memory,
    Storage,
    Gpu,
    Os,
    Ethernet,
    Io,
    Expansion,
    Buttons,
    OperatingTemperature,
    Wireless,
    Wlan,
    Bt,
    Camera,
    VideoChannels,
    Certifications,
    AiPerformance,
    Weight,
    Dimensions,
    Power,
    Price,
}

impl SpecField {
    pub const ALL: [SpecField; 21] = [
        SpecField::Processor,
        SpecField::Memory,
        SpecField::Storage,
        SpecField::Gpu,
        SpecField::Os,
        SpecField::Ethernet,
        SpecField::Io,
        SpecField::Expansion,
        SpecField::Buttons,
        SpecField::OperatingTemperature,
        SpecField::Wireless,
        SpecField::Wlan,
        SpecField::Bt,
        SpecField::Camera,
        SpecField::VideoChannels,
        SpecField::Certifications,
        SpecField::AiPerformance,
        SpecField::Weight,
        SpecField::Dimensions,
        SpecField::Power,
        SpecField::Price,
    ];

    /// Human-readable label used on detail views and report rows.
    pub fn label(&self) -> &'static str {
        match self {
            SpecField::Processor => "Processor",
            SpecField::Memory => "Memory",
            SpecField::Storage => "Storage",
            SpecField::Gpu => "GPU",
            SpecField::Os => "OS",
            SpecField::Ethernet => "Ethernet",
            SpecField::Io => "I/O",
            SpecField::Expansion => "Expansion",
            SpecField::Buttons => "Buttons",
            SpecField::OperatingTemperature => "Operating Temperature",
            SpecField::Wireless => "Wireless",
            SpecField::Wlan => "WLAN",
            SpecField::Bt => "BT",
            SpecField::Camera => "Camera",
            SpecField::VideoChannels => "Video Channels",
            SpecField::Certifications => "Certifications",
            SpecField::AiPerformance => "AI Performance",
            SpecField::Weight => "Weight",
            SpecField::Dimensions => "Dimensions",
            SpecField::Power => "Power",
            SpecField::Price => "Price",
        }
    }

    /// Priority-ordered raw key spellings tried for this field. These
    /// include every spelling observed in the live store, misspellings
    /// included ("Operating Tempeture").
    pub fn candidate_keys(&self) -> &'static [&'static str] {
        match self {
            SpecField::Processor => &["Processor", "processor", "CPU", "cpu"],
            SpecField::Memory => &["Memory", "memory", "RAM", "ram"],
            SpecField::Storage => &["Storage", "storage"],
            SpecField::Gpu => &["GPU", "gpu", "Graphics", "graphics"],
            SpecField::Os => &["OS", "os", "operating_system", "Operating System"],
            SpecField::Ethernet => &["Ethernet", "ethernet", "networking", "Networking", "LAN"],
            SpecField::Io => &["I/O", "IO", "io", "io_interfaces"],
            SpecField::Expansion => &["Expansion", "expansion", "Expansion Slots"],
            SpecField::Buttons => &["Button", "Buttons", "button", "buttons"],
            SpecField::OperatingTemperature => &[
                "Operating Tempeture",
                "Operating Temperature",
                "operating_temperature",
            ],
            SpecField::Wireless => &["Wireless", "wireless"],
            SpecField::Wlan => &["WLAN", "wlan"],
            SpecField::Bt => &["BT", "bt", "Bluetooth", "bluetooth"],
            SpecField::Camera => &["Camera", "camera"],
            SpecField::VideoChannels => &["Video Channels", "Video CH", "video_channels"],
            SpecField::Certifications => &["Certifications", "Certification", "certifications"],
            SpecField::AiPerformance => &["AI Performance", "performance", "ai_performance"],
            SpecField::Weight => &["Weight", "weight"],
            SpecField::Dimensions => &["Dimension", "Dimensions", "dimensions"],
            SpecField::Power => &["Power", "power", "power_input"],
            SpecField::Price => &["Price", "price"],
        }
    }
}

// Candidate key lists for the logical non-spec fields.
pub(crate) const NAME_KEYS: &[&str] = &["deviceName", "name", "device_name"];
pub(crate) const MODEL_KEYS: &[&str] = &["model", "Model", "deviceName", "name"];
pub(crate) const TAG_KEYS: &[&str] = &["tag", "Tag"];
pub(crate) const STATUS_KEYS: &[&str] = &["Super Mode", "super_mode", "status", "Status"];
pub(crate) const DESCRIPTION_KEYS: &[&str] = &["description_summary", "description"];
pub(crate) const APPLICATION_KEYS: &[&str] = &["applications", "Applications"];
pub(crate) const ID_KEYS: &[&str] = &["_id", "id", "device_id"];

/// Resolves a canonical spec field from a raw record.
pub fn resolve_spec(record: &RawRecord, field: SpecField) -> ResolvedValue {
    resolve_keys(record, field.candidate_keys())
}

/// Resolves the first usable value among `keys`, in priority order.
///
/// A value is usable when it is a non-empty, non-whitespace string that is
/// not one of the rejected placeholder words, a finite number, or a
/// non-empty array. Nested `specs` objects are searched after the top
/// level, so both flat and nested record shapes resolve.
pub fn resolve_keys(record: &RawRecord, keys: &[&str]) -> ResolvedValue {
    for key in keys {
        if let Some(value) = record.get(key) {
            if let Some(resolved) = coerce(value) {
                return resolved;
            }
        }
    }
    // Fall back to the nested specs object used by the flat mock shape.
    if let Some(Value::Object(specs)) = record.get("specs") {
        for key in keys {
            if let Some(value) = specs.get(*key) {
                if let Some(resolved) = coerce(value) {
                    return resolved;
                }
            }
        }
    }
    ResolvedValue::NotAvailable
}

/// Resolves the record's remote identifier, tolerating the extended-JSON
/// `{"$oid": "..."}` shape the store emits for object ids.
pub fn resolve_id(record: &RawRecord) -> Option<String> {
    for key in ID_KEYS {
        match record.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Object(map)) => {
                if let Some(Value::String(oid)) = map.get("$oid") {
                    if !oid.trim().is_empty() {
                        return Some(oid.trim().to_string());
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn coerce(value: &Value) -> Option<ResolvedValue> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            let lowered = trimmed.to_lowercase();
            if REJECTED_VALUES.contains(&lowered.as_str()) {
                return None;
            }
            Some(ResolvedValue::Text(trimmed.to_string()))
        }
        Value::Number(n) => {
            let n = n.as_f64()?;
            if n.is_finite() {
                Some(ResolvedValue::Number(n))
            } else {
                None
            }
        }
        Value::Array(items) => {
            let texts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                    Value::Object(map) => match map.get("name") {
                        Some(Value::String(s)) if !s.trim().is_empty() => {
                            Some(s.trim().to_string())
                        }
                        _ => None,
                    },
                    _ => None,
                })
                .collect();
            if texts.is_empty() {
                None
            } else {
                Some(ResolvedValue::Items(texts))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_candidate_wins() {
        let record = RawRecord::new(json!({"Memory": "16GB", "memory": "8GB"}));
        assert_eq!(
            resolve_spec(&record, SpecField::Memory),
            ResolvedValue::Text("16GB".to_string())
        );
    }

    #[test]
    fn test_lower_priority_key_used_when_first_absent() {
        let record = RawRecord::new(json!({"memory": "8GB"}));
        assert_eq!(
            resolve_spec(&record, SpecField::Memory),
            ResolvedValue::Text("8GB".to_string())
        );
    }

    #[test]
    fn test_rejected_placeholder_values() {
        for word in ["Unknown", "NONE", "n/a", "Not Specified", "  ", ""] {
            let record = RawRecord::new(json!({ "Memory": word }));
            assert_eq!(
                resolve_spec(&record, SpecField::Memory),
                ResolvedValue::NotAvailable,
                "{word:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_null_skipped_in_favor_of_lower_priority() {
        let record = RawRecord::new(json!({"Memory": null, "memory": "8GB"}));
        assert_eq!(
            resolve_spec(&record, SpecField::Memory),
            ResolvedValue::Text("8GB".to_string())
        );
    }

    #[test]
    fn test_nested_specs_fallback() {
        let record = RawRecord::new(json!({
            "name": "NCOX",
            "specs": {"processor": "NVIDIA Jetson Orin NX", "operating_temperature": "-20 ~ 60°C"}
        }));
        assert_eq!(
            resolve_spec(&record, SpecField::Processor),
            ResolvedValue::Text("NVIDIA Jetson Orin NX".to_string())
        );
        assert_eq!(
            resolve_spec(&record, SpecField::OperatingTemperature),
            ResolvedValue::Text("-20 ~ 60°C".to_string())
        );
    }

    #[test]
    fn test_misspelled_store_key_resolves() {
        let record = RawRecord::new(json!({"Operating Tempeture": "-20 ~ 60°C"}));
        assert_eq!(
            resolve_spec(&record, SpecField::OperatingTemperature),
            ResolvedValue::Text("-20 ~ 60°C".to_string())
        );
    }

    #[test]
    fn test_non_mapping_record_resolves_everything_to_sentinel() {
        let record = RawRecord::new(json!("just a string"));
        for field in SpecField::ALL {
            assert_eq!(resolve_spec(&record, field), ResolvedValue::NotAvailable);
        }
        assert_eq!(resolve_id(&record), None);
    }

    #[test]
    fn test_numeric_value() {
        let record = RawRecord::new(json!({"performance": 16}));
        assert_eq!(
            resolve_spec(&record, SpecField::AiPerformance),
            ResolvedValue::Number(16.0)
        );
    }

    #[test]
    fn test_array_of_names() {
        let record = RawRecord::new(json!({
            "applications": [{"name": "Smart Surveillance"}, {"name": "Retail Analytics"}]
        }));
        assert_eq!(
            resolve_keys(&record, APPLICATION_KEYS),
            ResolvedValue::Items(vec![
                "Smart Surveillance".to_string(),
                "Retail Analytics".to_string()
            ])
        );
    }

    #[test]
    fn test_resolve_id_extended_json() {
        let record = RawRecord::new(json!({"_id": {"$oid": "67f4044ea91332165a91a8ab"}}));
        assert_eq!(resolve_id(&record), Some("67f4044ea91332165a91a8ab".to_string()));

        let record = RawRecord::new(json!({"id": "device-1"}));
        assert_eq!(resolve_id(&record), Some("device-1".to_string()));
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(ResolvedValue::Number(16.0).display(), "16");
        assert_eq!(ResolvedValue::Number(7.5).display(), "7.5");
        assert_eq!(ResolvedValue::NotAvailable.display(), NOT_AVAILABLE);
        assert_eq!(
            ResolvedValue::Items(vec!["a".to_string(), "b".to_string()]).display(),
            "a, b"
        );
    }
}
