//! Device inventory core: normalization, querying, comparison, and report
//! export for heterogeneous edge AI device records.
//!
//! Raw records arrive from a remote store with inconsistent, sometimes
//! absent field names. This crate normalizes them into one canonical view
//! model, offers deterministic filtering/sorting and multi-device
//! comparison over it, and exports the current result set into three
//! structurally different report formats carrying identical content.

pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod prefs;
pub mod query;
pub mod specs;
pub mod state;

pub use compare::{comparison_rows, ComparisonRow, ComparisonSet};
pub use config::InventoryConfig;
pub use error::{EdgeError, InventoryErrorExt, Result};
pub use export::{CsvExporter, Exporter, PdfExporter, WatermarkMode, XlsxExporter};
pub use ingest::{CatalogState, DeviceApiClient, DeviceCatalog, EmptyReason};
pub use models::{ApplicationKind, DeviceCategory, NormalizedDevice, RawRecord};
pub use normalize::{Normalizer, SpecField, TagCategory, NOT_AVAILABLE};
pub use prefs::{FilePreferenceStore, PreferenceStore, Preferences, ViewMode};
pub use query::{query, FilterState, SortState};
pub use specs::{format_device, format_value, FormattedValue, SpecGroup, SpecTier};
pub use state::{Debouncer, FilterChange, SessionState};
