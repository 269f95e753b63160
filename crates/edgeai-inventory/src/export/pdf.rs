//! Paginated-document encoder.
//!
//! One page per device (multi-section spec tables) followed by a final
//! comparison-table page. Every page carries a diagonal repeating
//! watermark chosen by the export mode, and a footer with the page number
//! and a generated reference code. An empty device list still yields a
//! valid single-page document stating that no devices match.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use uuid::Uuid;

use super::{comparison_table, filter_summary, Exporter, ReportTable};
use crate::error::{EdgeError, InventoryErrorExt, Result};
use crate::models::NormalizedDevice;
use crate::normalize::SpecField;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const LINE_HEIGHT: i64 = 14;

/// Watermark selection for document exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatermarkMode {
    #[default]
    Internal,
    Draft,
    External,
}

impl WatermarkMode {
    /// The fixed literal stamped diagonally across every page.
    pub fn text(&self) -> &'static str {
        match self {
            WatermarkMode::Internal => "INTERNAL USE ONLY",
            WatermarkMode::Draft => "DRAFT - NOT FOR DISTRIBUTION",
            WatermarkMode::External => "CONFIDENTIAL",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WatermarkMode::Internal => "internal",
            WatermarkMode::Draft => "draft",
            WatermarkMode::External => "external",
        }
    }
}

pub struct PdfExporter {
    mode: WatermarkMode,
}

impl PdfExporter {
    pub fn new(mode: WatermarkMode) -> Self {
        Self { mode }
    }

    pub fn export(
        &self,
        devices: &[NormalizedDevice],
        applied_filters: &[String],
    ) -> Result<Vec<u8>> {
        let reference_code = generate_reference_code();
        let summary = filter_summary(applied_filters);

        let mut pages: Vec<Vec<Operation>> = Vec::new();
        if devices.is_empty() {
            pages.push(empty_page_ops(self.mode, summary.as_deref()));
        } else {
            for device in devices {
                pages.push(device_page_ops(device, self.mode, summary.as_deref()));
            }
            pages.push(comparison_page_ops(
                &comparison_table(devices),
                self.mode,
                summary.as_deref(),
            ));
        }

        let total = pages.len();
        for (idx, ops) in pages.iter_mut().enumerate() {
            ops.extend(footer_ops(idx + 1, total, &reference_code));
        }

        assemble_document(pages)
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(WatermarkMode::Internal)
    }
}

impl Exporter for PdfExporter {
    fn export(&self, devices: &[NormalizedDevice], applied_filters: &[String]) -> Result<Vec<u8>> {
        PdfExporter::export(self, devices, applied_filters)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

fn generate_reference_code() -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(5)
        .collect::<String>()
        .to_uppercase();
    format!("REF-{}-{}", Utc::now().format("%Y%m%d"), suffix)
}

// Helvetica is WinAnsi-encoded; anything outside latin-1 degrades to '?'.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

fn text_ops(ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_text(text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Diagonal repeating watermark, drawn first so page content overlays it.
fn watermark_ops(mode: WatermarkMode) -> Vec<Operation> {
    let mut ops = Vec::new();
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("g", vec![Object::Real(0.85)]));
    // Rotate the text grid 45 degrees around the page origin.
    ops.push(Operation::new(
        "cm",
        vec![
            Object::Real(0.7071),
            Object::Real(0.7071),
            Object::Real(-0.7071),
            Object::Real(0.7071),
            Object::Real(0.0),
            Object::Real(0.0),
        ],
    ));
    for row in 0..6 {
        for col in 0..3 {
            let x = -150 + col * 320;
            let y = -250 + row * 180;
            text_ops(&mut ops, "F2", 28, x, y, mode.text());
        }
    }
    ops.push(Operation::new("Q", vec![]));
    ops
}

fn footer_ops(page_number: usize, total_pages: usize, reference_code: &str) -> Vec<Operation> {
    let mut ops = Vec::new();
    text_ops(
        &mut ops,
        "F1",
        9,
        MARGIN,
        20,
        &format!("Page {page_number} of {total_pages}"),
    );
    text_ops(&mut ops, "F1", 9, PAGE_WIDTH - 170, 20, reference_code);
    ops
}

fn header_ops(ops: &mut Vec<Operation>, title: &str, summary: Option<&str>) -> i64 {
    text_ops(ops, "F2", 16, MARGIN, PAGE_HEIGHT - 52, "Edge AI Device Report");
    let mut y = PAGE_HEIGHT - 72;
    if let Some(summary) = summary {
        text_ops(ops, "F1", 9, MARGIN, y, &truncate(summary, 100));
        y -= LINE_HEIGHT;
    }
    y -= 10;
    text_ops(ops, "F2", 13, MARGIN, y, title);
    y - 24
}

fn section_ops(
    ops: &mut Vec<Operation>,
    y: &mut i64,
    title: &str,
    rows: &[(&str, String)],
) {
    text_ops(ops, "F2", 11, MARGIN, *y, title);
    *y -= LINE_HEIGHT + 4;
    for (label, value) in rows {
        text_ops(
            ops,
            "F1",
            10,
            MARGIN + 10,
            *y,
            &format!("{label}: {}", truncate(value, 70)),
        );
        *y -= LINE_HEIGHT;
    }
    *y -= 8;
}

fn device_page_ops(
    device: &NormalizedDevice,
    mode: WatermarkMode,
    summary: Option<&str>,
) -> Vec<Operation> {
    let mut ops = watermark_ops(mode);
    let mut y = header_ops(&mut ops, &device.display_name, summary);

    section_ops(
        &mut ops,
        &mut y,
        "System Information",
        &[
            ("Model", device.model_name.clone()),
            ("Category", device.category.prefix().to_string()),
            ("Status", device.formatted_status()),
            ("Processor", device.spec_display(SpecField::Processor)),
            ("Memory", device.spec_display(SpecField::Memory)),
            ("Storage", device.spec_display(SpecField::Storage)),
            ("OS", device.spec_display(SpecField::Os)),
        ],
    );
    section_ops(
        &mut ops,
        &mut y,
        "Performance",
        &[
            ("AI Performance", device.performance_display()),
            ("GPU", device.spec_display(SpecField::Gpu)),
            ("Video Channels", device.spec_display(SpecField::VideoChannels)),
        ],
    );
    section_ops(
        &mut ops,
        &mut y,
        "Connectivity",
        &[
            ("Ethernet", device.spec_display(SpecField::Ethernet)),
            ("WLAN", device.spec_display(SpecField::Wlan)),
            ("BT", device.spec_display(SpecField::Bt)),
            ("Wireless", device.spec_display(SpecField::Wireless)),
            ("I/O", device.spec_display(SpecField::Io)),
        ],
    );

    let applications = if device.applications.is_empty() {
        crate::normalize::NOT_AVAILABLE.to_string()
    } else {
        device.applications.join(", ")
    };
    let description = device
        .description_summary
        .clone()
        .unwrap_or_else(|| crate::normalize::NOT_AVAILABLE.to_string());
    section_ops(
        &mut ops,
        &mut y,
        "Additional Information",
        &[
            (
                "Operating Temperature",
                device.spec_display(SpecField::OperatingTemperature),
            ),
            ("Weight", device.spec_display(SpecField::Weight)),
            ("Dimensions", device.spec_display(SpecField::Dimensions)),
            ("Power", device.spec_display(SpecField::Power)),
            ("Expansion", device.spec_display(SpecField::Expansion)),
            ("Certifications", device.spec_display(SpecField::Certifications)),
            ("Applications", applications),
            ("Description", description),
        ],
    );

    ops
}

fn comparison_page_ops(
    table: &ReportTable,
    mode: WatermarkMode,
    summary: Option<&str>,
) -> Vec<Operation> {
    let mut ops = watermark_ops(mode);
    let mut y = header_ops(&mut ops, table.title, summary);

    let column_x: [i64; 6] = [40, 160, 250, 340, 430, 520];
    for (col, header) in table.headers.iter().enumerate() {
        text_ops(&mut ops, "F2", 9, column_x[col], y, header);
    }
    y -= LINE_HEIGHT;

    for row in &table.rows {
        for (col, cell) in row.iter().enumerate() {
            text_ops(&mut ops, "F1", 9, column_x[col], y, &truncate(cell, 20));
        }
        y -= LINE_HEIGHT;
    }

    ops
}

fn empty_page_ops(mode: WatermarkMode, summary: Option<&str>) -> Vec<Operation> {
    let mut ops = watermark_ops(mode);
    let y = header_ops(&mut ops, "Device Report", summary);
    text_ops(&mut ops, "F1", 12, MARGIN, y, "no devices match");
    ops
}

fn assemble_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_font,
            "F2" => bold_font,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    let page_count = pages.len() as i64;
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| EdgeError::export_error(format!("PDF content error: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| EdgeError::export_error(format!("PDF write error: {e}")))?;
    Ok(buffer)
}
