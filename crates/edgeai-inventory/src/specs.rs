//! Specification formatting for display and export.
//!
//! Groups a device's canonical fields into fixed sections and applies the
//! shared value-formatting rules (sentinel placeholder, `<n>GB` and
//! `<n>kg` unit splitting, temperature unit annotation). The same rules
//! apply regardless of whether the output goes to a screen or a report
//! encoder.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::NormalizedDevice;
use crate::normalize::{SpecField, NOT_AVAILABLE};

fn gb_value_re() -> &'static Regex {
    static GB_VALUE_RE: OnceLock<Regex> = OnceLock::new();
    GB_VALUE_RE.get_or_init(|| Regex::new(r"^(\d+)GB$").expect("valid GB value pattern"))
}

fn kg_value_re() -> &'static Regex {
    static KG_VALUE_RE: OnceLock<Regex> = OnceLock::new();
    KG_VALUE_RE.get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)?)kg$").expect("valid kg value pattern"))
}

/// Fixed display groups for device specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecGroup {
    Core,
    Connectivity,
    Performance,
    Physical,
}

impl SpecGroup {
    pub const ALL: [SpecGroup; 4] = [
        SpecGroup::Core,
        SpecGroup::Connectivity,
        SpecGroup::Performance,
        SpecGroup::Physical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SpecGroup::Core => "Core",
            SpecGroup::Connectivity => "Connectivity",
            SpecGroup::Performance => "Performance",
            SpecGroup::Physical => "Physical",
        }
    }

    /// The canonical fields belonging to this group, in display order.
    pub fn fields(&self) -> &'static [SpecField] {
        match self {
            SpecGroup::Core => &[
                SpecField::Processor,
                SpecField::Memory,
                SpecField::Storage,
                SpecField::Os,
                SpecField::Gpu,
            ],
            SpecGroup::Connectivity => &[
                SpecField::Ethernet,
                SpecField::Wlan,
                SpecField::Bt,
                SpecField::Wireless,
                SpecField::Io,
            ],
            SpecGroup::Performance => &[
                SpecField::Gpu,
                SpecField::AiPerformance,
                SpecField::VideoChannels,
            ],
            SpecGroup::Physical => &[
                SpecField::OperatingTemperature,
                SpecField::Weight,
                SpecField::Expansion,
            ],
        }
    }
}

/// How much of the specification to show or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecTier {
    /// Core group only.
    Basic,
    /// All groups.
    Full,
}

/// A spec value after the shared formatting rules have been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedValue {
    NotAvailable,
    Text(String),
    /// A `<number><unit>` value split for display (e.g. "16GB", "4.5kg").
    Quantity { amount: String, unit: &'static str },
    /// A temperature value with the °C unit annotated separately.
    Temperature { range: String },
}

impl FormattedValue {
    /// Recombined display string; identical to the raw value for
    /// available fields, the shared placeholder otherwise.
    pub fn display(&self) -> String {
        match self {
            FormattedValue::NotAvailable => NOT_AVAILABLE.to_string(),
            FormattedValue::Text(text) => text.clone(),
            FormattedValue::Quantity { amount, unit } => format!("{amount}{unit}"),
            FormattedValue::Temperature { range } => format!("{range}°C"),
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            FormattedValue::Quantity { unit, .. } => Some(unit),
            FormattedValue::Temperature { .. } => Some("°C"),
            _ => None,
        }
    }
}

/// Applies the uniform value-formatting rules to a resolved raw value.
pub fn format_value(raw: Option<&str>) -> FormattedValue {
    let raw = match raw {
        Some(value) => value,
        None => return FormattedValue::NotAvailable,
    };
    if let Some(caps) = gb_value_re().captures(raw) {
        return FormattedValue::Quantity {
            amount: caps[1].to_string(),
            unit: "GB",
        };
    }
    if let Some(caps) = kg_value_re().captures(raw) {
        return FormattedValue::Quantity {
            amount: caps[1].to_string(),
            unit: "kg",
        };
    }
    if let Some(range) = raw.strip_suffix("°C") {
        return FormattedValue::Temperature {
            range: range.to_string(),
        };
    }
    FormattedValue::Text(raw.to_string())
}

/// One formatted entry of a specification section.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecEntry {
    pub field: SpecField,
    pub label: &'static str,
    pub value: FormattedValue,
    pub tier: SpecTier,
}

/// A display group with its formatted entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSection {
    pub group: SpecGroup,
    pub entries: Vec<SpecEntry>,
}

/// Formats a device's specification into grouped sections.
///
/// `Basic` returns only the Core group; `Full` returns all groups. Core
/// entries are tier `Basic`, every other entry tier `Full`.
pub fn format_device(device: &NormalizedDevice, tier: SpecTier) -> Vec<SpecSection> {
    let groups: &[SpecGroup] = match tier {
        SpecTier::Basic => &[SpecGroup::Core],
        SpecTier::Full => &SpecGroup::ALL,
    };

    groups
        .iter()
        .map(|group| SpecSection {
            group: *group,
            entries: group
                .fields()
                .iter()
                .map(|field| SpecEntry {
                    field: *field,
                    label: field.label(),
                    value: format_value(device.spec(*field)),
                    tier: if *group == SpecGroup::Core {
                        SpecTier::Basic
                    } else {
                        SpecTier::Full
                    },
                })
                .collect(),
        })
        .collect()
}
