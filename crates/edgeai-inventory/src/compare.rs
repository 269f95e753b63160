//! Side-by-side device comparison.
//!
//! The comparison selection is independent session state keyed by device
//! id: it survives filter and sort changes, and a compared device stays
//! selected even while filtered out of the current view. Ids that no
//! longer resolve to a device are silently dropped at read time.

use crate::models::NormalizedDevice;
use crate::normalize::SpecField;

/// Mutable selection of device identifiers, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    ids: Vec<String>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the id when absent, removes it when present. Returns whether
    /// the id is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Empties the selection. Only explicit resets clear it; filtering
    /// never does.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolves the selection against the canonical collection, in
    /// selection order. Unknown ids are dropped without error.
    pub fn selected_devices<'a>(
        &self,
        devices: &'a [NormalizedDevice],
    ) -> Vec<&'a NormalizedDevice> {
        self.ids
            .iter()
            .filter_map(|id| devices.iter().find(|device| &device.id == id))
            .collect()
    }
}

/// One attribute row of the comparison view: a value per selected device,
/// flagged when the devices disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
    /// True unless every selected device renders the identical displayed
    /// value for this attribute.
    pub differing: bool,
}

const COMPARED_SPECS: [SpecField; 8] = [
    SpecField::Memory,
    SpecField::Storage,
    SpecField::Gpu,
    SpecField::Os,
    SpecField::Ethernet,
    SpecField::Io,
    SpecField::OperatingTemperature,
    SpecField::Weight,
];

/// Computes the attribute rows for the comparison view/report.
pub fn comparison_rows(devices: &[&NormalizedDevice]) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();

    rows.push(make_row("Model", devices, |d| d.model_name.clone()));
    rows.push(make_row("AI Performance", devices, |d| d.performance_display()));
    rows.push(make_row("Status", devices, |d| d.status_label().to_string()));
    for field in COMPARED_SPECS {
        rows.push(make_row(field.label(), devices, |d| d.spec_display(field)));
    }

    rows
}

fn make_row(
    label: &'static str,
    devices: &[&NormalizedDevice],
    render: impl Fn(&NormalizedDevice) -> String,
) -> ComparisonRow {
    let values: Vec<String> = devices.iter().map(|d| render(d)).collect();
    let differing = values.windows(2).any(|pair| pair[0] != pair[1]);
    ComparisonRow {
        label,
        values,
        differing,
    }
}
