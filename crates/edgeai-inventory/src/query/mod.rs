//! Deterministic filtering and sorting over the normalized collection.
//!
//! The query engine only reads the canonical collection and produces
//! derived views; it never mutates devices in place.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{DeviceCategory, NormalizedDevice};
use crate::normalize::SpecField;

fn gb_re() -> &'static Regex {
    static GB_RE: OnceLock<Regex> = OnceLock::new();
    GB_RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*GB").expect("valid GB pattern"))
}

/// Active filter constraints. Absent fields are unconstrained; all set
/// predicates are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: Option<String>,
    pub category: Option<DeviceCategory>,
    pub model: Option<String>,
    pub status_enabled: Option<bool>,
    pub performance_range: Option<(f64, f64)>,
    pub memory_min_gb: Option<u32>,
}

impl FilterState {
    /// Whether any constraint is set. Distinct from "matches everything":
    /// an active filter with zero results is a "no matches" state, not an
    /// error state.
    pub fn is_active(&self) -> bool {
        self.search_term.is_some()
            || self.category.is_some()
            || self.model.is_some()
            || self.status_enabled.is_some()
            || self.performance_range.is_some()
            || self.memory_min_gb.is_some()
    }

    pub fn matches(&self, device: &NormalizedDevice) -> bool {
        if let Some(term) = &self.search_term {
            let needle = term.to_lowercase();
            let in_name = device.display_name.to_lowercase().contains(&needle);
            let in_model = device.model_name.to_lowercase().contains(&needle);
            if !in_name && !in_model {
                return false;
            }
        }
        if let Some(category) = self.category {
            if device.category != category {
                return false;
            }
        }
        if let Some(model) = &self.model {
            if device.model_name != *model {
                return false;
            }
        }
        if let Some(enabled) = self.status_enabled {
            if device.is_enabled() != enabled {
                return false;
            }
        }
        if let Some((min, max)) = self.performance_range {
            if device.performance_score < min || device.performance_score > max {
                return false;
            }
        }
        if let Some(min_gb) = self.memory_min_gb {
            // Devices whose memory spec cannot be parsed are excluded
            // whenever a memory floor is requested.
            match memory_gb(device) {
                Some(gb) if gb >= min_gb => {}
                _ => return false,
            }
        }
        true
    }

    /// Human-readable lines describing the active constraints, used for
    /// the filter-summary header on exports.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(term) = &self.search_term {
            lines.push(format!("Search: {term}"));
        }
        if let Some(category) = self.category {
            lines.push(format!("Category: {}", category.as_str()));
        }
        if let Some(model) = &self.model {
            lines.push(format!("Model: {model}"));
        }
        if let Some(enabled) = self.status_enabled {
            lines.push(format!(
                "Status: {}",
                if enabled { "Enabled" } else { "Disabled" }
            ));
        }
        if let Some((min, max)) = self.performance_range {
            lines.push(format!("Performance: {min} - {max} TOPS"));
        }
        if let Some(min_gb) = self.memory_min_gb {
            lines.push(format!("Memory: at least {min_gb}GB"));
        }
        lines
    }
}

/// Sort modes. `None` is not "no comparator": it restores the ingestion
/// order of the filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortState {
    #[default]
    None,
    ByName,
    ByModel,
    ByPerformanceDesc,
    ByStatus,
}

impl SortState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortState::None => "none",
            SortState::ByName => "name",
            SortState::ByModel => "model",
            SortState::ByPerformanceDesc => "performance",
            SortState::ByStatus => "status",
        }
    }

    /// Parses a persisted preference value; unknown values fall back to
    /// `None` rather than erroring.
    pub fn from_preference(value: &str) -> Self {
        match value {
            "name" => SortState::ByName,
            "model" => SortState::ByModel,
            "performance" => SortState::ByPerformanceDesc,
            "status" => SortState::ByStatus,
            _ => SortState::None,
        }
    }
}

/// Parses the first `<digits>GB` out of the device memory spec
/// ("16GB/8GB LPDDR5" parses as 16).
pub fn memory_gb(device: &NormalizedDevice) -> Option<u32> {
    let memory = device.spec(SpecField::Memory)?;
    let caps = gb_re().captures(memory)?;
    caps[1].parse().ok()
}

/// Returns the ordered subset of `devices` passing `filter`, arranged by
/// `sort`.
///
/// `devices` must be the canonical collection in ingestion order. All
/// sorts are stable; ties preserve the relative ingestion order.
/// `SortState::None` re-projects the ids passing the filter against the
/// full ingestion-order collection, so switching the sort back to none
/// visibly restores the original ordering for the same filtered subset.
pub fn query(
    devices: &[NormalizedDevice],
    filter: &FilterState,
    sort: SortState,
) -> Vec<NormalizedDevice> {
    let mut selected: Vec<NormalizedDevice> = devices
        .iter()
        .filter(|device| filter.matches(device))
        .cloned()
        .collect();

    match sort {
        SortState::None => {
            let passing: HashSet<&str> = selected.iter().map(|d| d.id.as_str()).collect();
            devices
                .iter()
                .filter(|device| passing.contains(device.id.as_str()))
                .cloned()
                .collect()
        }
        SortState::ByName => {
            selected.sort_by(|a, b| lexicographic(&a.display_name, &b.display_name));
            selected
        }
        SortState::ByModel => {
            selected.sort_by(|a, b| lexicographic(&a.model_name, &b.model_name));
            selected
        }
        SortState::ByPerformanceDesc => {
            selected.sort_by(|a, b| {
                b.performance_score
                    .total_cmp(&a.performance_score)
            });
            selected
        }
        SortState::ByStatus => {
            selected.sort_by_key(|device| !device.is_enabled());
            selected
        }
    }
}

// Locale-free comparison: lowercase both operands, fall back to the raw
// string so the order is total.
fn lexicographic(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
