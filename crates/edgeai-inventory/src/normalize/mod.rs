//! Normalization of raw device records into the canonical view model.

pub mod resolver;
pub mod tags;

pub use resolver::{resolve_keys, resolve_spec, ResolvedValue, SpecField, NOT_AVAILABLE};
pub use tags::TagCategory;

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::models::{DeviceCategory, NormalizedDevice, RawRecord};

fn up_to_re() -> &'static Regex {
    static UP_TO_RE: OnceLock<Regex> = OnceLock::new();
    UP_TO_RE.get_or_init(|| {
        Regex::new(r"(?i)up to\s+(\d+(?:\.\d+)?)").expect("valid up-to pattern")
    })
}

fn tops_re() -> &'static Regex {
    static TOPS_RE: OnceLock<Regex> = OnceLock::new();
    TOPS_RE.get_or_init(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*TOPS").expect("valid TOPS pattern"))
}

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number pattern"))
}

/// Builds the canonical device collection from a batch of raw records.
///
/// Order-preserving: the output order is the ingestion order that
/// `SortState::None` restores. Every input record yields exactly one
/// normalized device; records missing every expected key still normalize
/// with sentinel specs and a generated id.
#[derive(Debug, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, records: &[RawRecord]) -> Vec<NormalizedDevice> {
        let mut seen_ids: HashSet<String> = HashSet::new();
        let devices: Vec<NormalizedDevice> = records
            .iter()
            .map(|record| self.normalize_record(record, &mut seen_ids))
            .collect();
        debug!(count = devices.len(), "normalized device batch");
        devices
    }

    fn normalize_record(
        &self,
        record: &RawRecord,
        seen_ids: &mut HashSet<String>,
    ) -> NormalizedDevice {
        let id = unique_id(resolve_id_or_generate(record), seen_ids);

        let raw_name = resolver::resolve_keys(record, resolver::NAME_KEYS)
            .into_display()
            .unwrap_or_else(|| format!("Unknown Device ({id})"));
        let category = DeviceCategory::from_device_name(&raw_name);
        let display_name = apply_category_prefix(&raw_name, category);

        let model_name = resolver::resolve_keys(record, resolver::MODEL_KEYS)
            .into_display()
            .unwrap_or_else(|| raw_name.clone());

        let tag = resolver::resolve_keys(record, resolver::TAG_KEYS)
            .as_text()
            .map(str::to_string);

        let status_raw = resolver::resolve_keys(record, resolver::STATUS_KEYS)
            .as_text()
            .map(str::to_string);

        let description_summary = resolver::resolve_keys(record, resolver::DESCRIPTION_KEYS)
            .as_text()
            .map(str::to_string);

        let applications = match resolver::resolve_keys(record, resolver::APPLICATION_KEYS) {
            ResolvedValue::Items(items) => items,
            ResolvedValue::Text(single) => vec![single],
            _ => Vec::new(),
        };

        let mut specs: BTreeMap<SpecField, Option<String>> = BTreeMap::new();
        for field in SpecField::ALL {
            specs.insert(field, resolve_spec(record, field).into_display());
        }

        let performance_score = extract_performance(&resolve_spec(record, SpecField::AiPerformance));

        NormalizedDevice {
            id,
            display_name,
            model_name,
            category,
            tag,
            performance_score,
            status_raw,
            description_summary,
            applications,
            specs,
        }
    }
}

fn resolve_id_or_generate(record: &RawRecord) -> String {
    match resolver::resolve_id(record) {
        Some(remote) => {
            if remote.starts_with("device-") {
                remote
            } else {
                format!("device-{remote}")
            }
        }
        None => format!("device-{}", Uuid::new_v4().simple()),
    }
}

// Ids must be unique within one batch; a colliding remote id gets an
// index suffix rather than dropping the record.
fn unique_id(candidate: String, seen: &mut HashSet<String>) -> String {
    if seen.insert(candidate.clone()) {
        return candidate;
    }
    let mut counter = 2;
    loop {
        let next = format!("{candidate}-{counter}");
        if seen.insert(next.clone()) {
            return next;
        }
        counter += 1;
    }
}

/// Prefixes the raw name with its category label unless already prefixed.
fn apply_category_prefix(raw_name: &str, category: DeviceCategory) -> String {
    let prefix = category.prefix();
    if raw_name
        .to_lowercase()
        .starts_with(&prefix.to_lowercase())
    {
        raw_name.to_string()
    } else {
        format!("{prefix} {raw_name}")
    }
}

/// Mines a numeric TOPS value out of the resolved performance field.
///
/// Tries, in order: a bare number, an "Up to N" phrase, an "N TOPS"
/// phrase, then the largest number anywhere in the text. Anything else is
/// 0 so that performance always participates in numeric sorts.
pub fn extract_performance(value: &ResolvedValue) -> f64 {
    let score = match value {
        ResolvedValue::Number(n) => *n,
        ResolvedValue::Text(text) => {
            if let Some(caps) = up_to_re().captures(text) {
                caps[1].parse().unwrap_or(0.0)
            } else if let Some(caps) = tops_re().captures(text) {
                caps[1].parse().unwrap_or(0.0)
            } else {
                number_re()
                    .find_iter(text)
                    .filter_map(|m| m.as_str().parse::<f64>().ok())
                    .fold(0.0_f64, f64::max)
            }
        }
        _ => 0.0,
    };
    if score.is_finite() {
        score.max(0.0)
    } else {
        0.0
    }
}
