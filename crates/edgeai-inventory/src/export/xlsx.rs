//! Spreadsheet encoder.
//!
//! Two named sheets over the shared tabular projection, with a styled
//! header row and alternating row fill. When any filter is active each
//! sheet gets leading filter-summary text followed by a blank spacer row
//! before the header row.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use super::{comparison_table, filter_summary, specification_table, Exporter, ReportTable};
use crate::error::Result;
use crate::models::NormalizedDevice;

pub struct XlsxExporter;

impl XlsxExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(
        &self,
        devices: &[NormalizedDevice],
        applied_filters: &[String],
    ) -> Result<Vec<u8>> {
        let mut workbook = self.build_workbook(devices, applied_filters)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Writes the report straight to a file path.
    pub fn export_to_path(
        &self,
        devices: &[NormalizedDevice],
        applied_filters: &[String],
        path: &Path,
    ) -> Result<()> {
        let mut workbook = self.build_workbook(devices, applied_filters)?;
        workbook.save(path)?;
        Ok(())
    }

    fn build_workbook(
        &self,
        devices: &[NormalizedDevice],
        applied_filters: &[String],
    ) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(0xD9E1F2));
        let stripe_format = Format::new().set_background_color(Color::RGB(0xF2F2F2));

        {
            let sheet = workbook.add_worksheet();
            write_table(
                sheet,
                &specification_table(devices),
                applied_filters,
                &header_format,
                &stripe_format,
            )?;
        }
        {
            let sheet = workbook.add_worksheet();
            write_table(
                sheet,
                &comparison_table(devices),
                applied_filters,
                &header_format,
                &stripe_format,
            )?;
        }

        Ok(workbook)
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for XlsxExporter {
    fn export(&self, devices: &[NormalizedDevice], applied_filters: &[String]) -> Result<Vec<u8>> {
        XlsxExporter::export(self, devices, applied_filters)
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

fn write_table(
    sheet: &mut Worksheet,
    table: &ReportTable,
    applied_filters: &[String],
    header_format: &Format,
    stripe_format: &Format,
) -> Result<()> {
    sheet.set_name(table.title)?;

    let mut row = 0u32;
    if let Some(summary) = filter_summary(applied_filters) {
        sheet.write_string(row, 0, summary.as_str()).ok();
        // Blank spacer row between the summary and the header row.
        row += 2;
    }

    for (idx, title) in table.headers.iter().enumerate() {
        sheet
            .write_string_with_format(row, idx as u16, *title, header_format)
            .ok();
    }
    row += 1;

    for (data_idx, data_row) in table.rows.iter().enumerate() {
        for (col, cell) in data_row.iter().enumerate() {
            if data_idx % 2 == 1 {
                sheet
                    .write_string_with_format(row, col as u16, cell.as_str(), stripe_format)
                    .ok();
            } else {
                sheet.write_string(row, col as u16, cell.as_str()).ok();
            }
        }
        row += 1;
    }

    Ok(())
}
