//! Report export.
//!
//! All three encoders consume one shared tabular projection of the
//! filtered/sorted device list, so the exported content is identical by
//! construction and only the container format differs.

pub mod csv;
pub mod pdf;
pub mod xlsx;

pub use self::csv::CsvExporter;
pub use self::pdf::{PdfExporter, WatermarkMode};
pub use self::xlsx::XlsxExporter;

use chrono::Utc;

use crate::error::Result;
use crate::models::NormalizedDevice;
use crate::normalize::SpecField;

pub const SPEC_TABLE_TITLE: &str = "Device Specifications";
pub const COMPARISON_TABLE_TITLE: &str = "Device Comparison";

pub const SPEC_HEADERS: [&str; 12] = [
    "Device Name",
    "Model",
    "AI Performance",
    "Memory",
    "Storage",
    "Status",
    "GPU",
    "OS",
    "Ethernet",
    "I/O",
    "Price",
    "Certifications",
];

pub const COMPARISON_HEADERS: [&str; 6] = [
    "Device Name",
    "Model",
    "AI Performance",
    "Memory",
    "Storage",
    "Status",
];

/// A fully rendered logical table: the common input to every encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

/// Projects the device list onto the 12-column specification table.
pub fn specification_table(devices: &[NormalizedDevice]) -> ReportTable {
    ReportTable {
        title: SPEC_TABLE_TITLE,
        headers: &SPEC_HEADERS,
        rows: devices.iter().map(specification_row).collect(),
    }
}

/// Projects the device list onto the 6-column comparison table.
pub fn comparison_table(devices: &[NormalizedDevice]) -> ReportTable {
    ReportTable {
        title: COMPARISON_TABLE_TITLE,
        headers: &COMPARISON_HEADERS,
        rows: devices.iter().map(comparison_row).collect(),
    }
}

fn specification_row(device: &NormalizedDevice) -> Vec<String> {
    vec![
        device.display_name.clone(),
        device.model_name.clone(),
        device.performance_display(),
        device.spec_display(SpecField::Memory),
        device.spec_display(SpecField::Storage),
        device.status_label().to_string(),
        device.spec_display(SpecField::Gpu),
        device.spec_display(SpecField::Os),
        device.spec_display(SpecField::Ethernet),
        device.spec_display(SpecField::Io),
        device.spec_display(SpecField::Price),
        device.spec_display(SpecField::Certifications),
    ]
}

fn comparison_row(device: &NormalizedDevice) -> Vec<String> {
    vec![
        device.display_name.clone(),
        device.model_name.clone(),
        device.performance_display(),
        device.spec_display(SpecField::Memory),
        device.spec_display(SpecField::Storage),
        device.status_label().to_string(),
    ]
}

/// Filter-summary line placed above exported tables when any filter is
/// active.
pub fn filter_summary(applied_filters: &[String]) -> Option<String> {
    if applied_filters.is_empty() {
        None
    } else {
        Some(format!("Filters applied: {}", applied_filters.join("; ")))
    }
}

/// Report filename with an embedded ISO date stamp.
pub fn report_file_name(extension: &str) -> String {
    report_file_name_for(Utc::now().date_naive(), extension)
}

pub fn report_file_name_for(date: chrono::NaiveDate, extension: &str) -> String {
    format!("edge_devices_report_{}.{}", date.format("%Y-%m-%d"), extension)
}

/// Common contract for the three report encoders.
pub trait Exporter {
    /// Encodes the filtered/sorted device list into the target format.
    /// `applied_filters` carries the active filter summary lines.
    fn export(&self, devices: &[NormalizedDevice], applied_filters: &[String]) -> Result<Vec<u8>>;

    fn extension(&self) -> &'static str;

    fn file_name(&self) -> String {
        report_file_name(self.extension())
    }
}
