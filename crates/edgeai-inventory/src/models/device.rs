use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize::resolver::{SpecField, NOT_AVAILABLE};

/// Presentation category for a device, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    Edge,
    Server,
}

impl DeviceCategory {
    /// Detects the category from a raw device name. Anything containing
    /// "server" (case-insensitively) is a server, everything else edge.
    pub fn from_device_name(name: &str) -> Self {
        if name.to_lowercase().contains("server") {
            DeviceCategory::Server
        } else {
            DeviceCategory::Edge
        }
    }

    /// Display-name prefix for this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            DeviceCategory::Edge => "Edge AI",
            DeviceCategory::Server => "AI Edge Server",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Edge => "edge",
            DeviceCategory::Server => "server",
        }
    }
}

/// Closed set of application kinds used for icon selection.
///
/// Unrecognized application names map to `Other` rather than growing the
/// set at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationKind {
    Surveillance,
    Industrial,
    Building,
    Energy,
    Infrastructure,
    Manufacturing,
    Maintenance,
    Retail,
    Traffic,
    Robotics,
    Navigation,
    Automation,
    Fleet,
    Automotive,
    Healthcare,
    Computation,
    Other,
}

impl ApplicationKind {
    /// Maps an application name to its kind.
    pub fn classify(name: &str) -> Self {
        match name.trim() {
            "Smart Surveillance" => ApplicationKind::Surveillance,
            "Industrial Quality Inspection" | "Industrial Automation" => {
                ApplicationKind::Industrial
            }
            "Building Monitoring and Management" => ApplicationKind::Building,
            "Optimize Energy Usage" => ApplicationKind::Energy,
            "Urban Infrastructure Management" => ApplicationKind::Infrastructure,
            "Manufacturing Optimization" => ApplicationKind::Manufacturing,
            "Predictive Maintenance" => ApplicationKind::Maintenance,
            "Retail Analytics" | "Customer Behavior Analytics" => ApplicationKind::Retail,
            "Traffic Violation Detection" => ApplicationKind::Traffic,
            "Autonomous Mobile Robot (AMR)" => ApplicationKind::Robotics,
            "Real-Time Navigation" => ApplicationKind::Navigation,
            "Automation Efficiency" => ApplicationKind::Automation,
            "Fleet Management" => ApplicationKind::Fleet,
            "Autonomous Driving" => ApplicationKind::Automotive,
            "Healthcare and Medical" => ApplicationKind::Healthcare,
            "Real-Time AI Computation" | "High-Performance Computing" => {
                ApplicationKind::Computation
            }
            _ => ApplicationKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationKind::Surveillance => "surveillance",
            ApplicationKind::Industrial => "industrial",
            ApplicationKind::Building => "building",
            ApplicationKind::Energy => "energy",
            ApplicationKind::Infrastructure => "infrastructure",
            ApplicationKind::Manufacturing => "manufacturing",
            ApplicationKind::Maintenance => "maintenance",
            ApplicationKind::Retail => "retail",
            ApplicationKind::Traffic => "traffic",
            ApplicationKind::Robotics => "robotics",
            ApplicationKind::Navigation => "navigation",
            ApplicationKind::Automation => "automation",
            ApplicationKind::Fleet => "fleet",
            ApplicationKind::Automotive => "automotive",
            ApplicationKind::Healthcare => "healthcare",
            ApplicationKind::Computation => "computation",
            ApplicationKind::Other => "other",
        }
    }
}

/// The canonical in-memory representation of a device.
///
/// Built once per raw record by the normalizer and immutable afterwards;
/// every downstream consumer (query engine, formatter, exporters) reads
/// from this view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedDevice {
    /// Stable identifier, unique within one ingested batch.
    pub id: String,
    /// Raw device name with the category prefix applied.
    pub display_name: String,
    pub model_name: String,
    pub category: DeviceCategory,
    /// Validated tag: always a non-empty, non-whitespace string when present.
    pub tag: Option<String>,
    /// Performance in TOPS; 0 when absent or non-numeric. Always finite
    /// and non-negative so it can participate in numeric sorts.
    pub performance_score: f64,
    /// Free-text status as found in the record ("Enable", "disabled", ...).
    pub status_raw: Option<String>,
    pub description_summary: Option<String>,
    pub applications: Vec<String>,
    /// Canonical spec field -> resolved raw value. Absent means the field
    /// resolved to the not-available sentinel.
    pub specs: BTreeMap<SpecField, Option<String>>,
}

impl NormalizedDevice {
    /// Resolved raw value for a canonical spec field, if available.
    pub fn spec(&self, field: SpecField) -> Option<&str> {
        self.specs.get(&field).and_then(|v| v.as_deref())
    }

    /// Display/export rendering for a spec field: the raw value, or the
    /// "Not Available" placeholder.
    pub fn spec_display(&self, field: SpecField) -> String {
        self.spec(field).map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
    }

    /// Whether the device status normalizes to enabled. Synonyms
    /// enable/enabled count as enabled; disable/disabled and anything
    /// unrecognized count as disabled.
    pub fn is_enabled(&self) -> bool {
        match &self.status_raw {
            Some(raw) => matches!(raw.trim().to_lowercase().as_str(), "enable" | "enabled"),
            None => false,
        }
    }

    /// Short status label used in export columns.
    pub fn status_label(&self) -> &'static str {
        if self.is_enabled() {
            "Enabled"
        } else {
            "Disabled"
        }
    }

    /// Long status text shown on device detail views.
    pub fn formatted_status(&self) -> String {
        format!("Super Mode: {}", self.status_label())
    }

    /// Performance rendering for display/export: `"<n> TOPS"` when the
    /// performance field was present in the record, the "Not Available"
    /// placeholder when it was missing. Never renders a fabricated 0.
    pub fn performance_display(&self) -> String {
        if self.spec(SpecField::AiPerformance).is_none() {
            return NOT_AVAILABLE.to_string();
        }
        if self.performance_score.fract() == 0.0 {
            format!("{} TOPS", self.performance_score as i64)
        } else {
            format!("{} TOPS", self.performance_score)
        }
    }

    /// Whether the tag should be rendered at all.
    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }
}
