//! Delimited-text encoder.
//!
//! Serializes the two logical tables as quoted, comma-separated text,
//! concatenated with a blank-line separator. Every field is quoted
//! (embedded quotes doubled by the writer), so the output survives
//! arbitrary spec values.

use csv::{QuoteStyle, WriterBuilder};

use super::{
    comparison_table, filter_summary, specification_table, Exporter, ReportTable,
};
use crate::error::{EdgeError, InventoryErrorExt, Result};
use crate::models::NormalizedDevice;

pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(
        &self,
        devices: &[NormalizedDevice],
        applied_filters: &[String],
    ) -> Result<String> {
        let mut output = String::new();

        if let Some(summary) = filter_summary(applied_filters) {
            output.push_str(&format!("\"{}\"\n\n", summary.replace('"', "\"\"")));
        }

        output.push_str(&write_table(&specification_table(devices))?);
        output.push('\n');
        output.push_str(&write_table(&comparison_table(devices))?);

        Ok(output)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for CsvExporter {
    fn export(&self, devices: &[NormalizedDevice], applied_filters: &[String]) -> Result<Vec<u8>> {
        CsvExporter::export(self, devices, applied_filters).map(String::into_bytes)
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

fn write_table(table: &ReportTable) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .flexible(true)
        .from_writer(vec![]);

    wtr.write_record([table.title])?;
    wtr.write_record(table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| EdgeError::export_error(format!("CSV writer error: {e}")))?;
    String::from_utf8(data)
        .map_err(|e| EdgeError::export_error(format!("UTF-8 conversion error: {e}")))
}
