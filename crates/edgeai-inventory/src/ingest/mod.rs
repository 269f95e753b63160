//! Ingestion of raw device records from the remote store.
//!
//! The core treats the endpoint as an opaque read-only JSON array: any
//! subset or superset of fields, including a completely empty array, must
//! be tolerated. A completing fetch fully replaces the normalized
//! collection; there is no merging. When two fetches overlap, the one
//! that completes last wins regardless of issue order.

use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::InventoryConfig;
use crate::error::{EdgeError, InventoryErrorExt, Result};
use crate::models::{NormalizedDevice, RawRecord};
use crate::normalize::Normalizer;

/// Client for the read-only device endpoint.
#[derive(Clone)]
pub struct DeviceApiClient {
    client: Client,
    base_url: String,
}

impl DeviceApiClient {
    pub fn new(config: &InventoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Fetches the raw record array. Transport and parse failures surface
    /// as retryable typed errors; they are never swallowed.
    pub async fn fetch_devices(&self) -> Result<Vec<RawRecord>> {
        let url = format!("{}/api/devices/with-tags", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(EdgeError::fetch_failed(format!(
                "device endpoint returned status: {}",
                response.status()
            )));
        }

        let records = response.json::<Vec<RawRecord>>().await?;
        info!(count = records.len(), "fetched raw device records");
        Ok(records)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// The normalized collection owned by the ingestion side.
///
/// Built once per successful fetch; the query engine only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct DeviceCatalog {
    devices: Vec<NormalizedDevice>,
}

impl DeviceCatalog {
    pub fn from_records(records: &[RawRecord]) -> Self {
        Self {
            devices: Normalizer::new().normalize(records),
        }
    }

    /// Devices in ingestion order.
    pub fn devices(&self) -> &[NormalizedDevice] {
        &self.devices
    }

    pub fn get(&self, id: &str) -> Option<&NormalizedDevice> {
        self.devices.iter().find(|device| device.id == id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Why a rendered device list is empty. The two cases must stay visually
/// and programmatically distinguishable: a failed fetch offers a retry,
/// an over-narrow filter offers a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    FetchFailed,
    NoMatches,
}

/// Lifecycle of the in-memory collection across fetches.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready(DeviceCatalog),
    Failed {
        message: String,
        retryable: bool,
    },
}

impl CatalogState {
    /// Marks a fetch as outstanding. While loading, stale queries are not
    /// rendered; the previous collection is discarded rather than shown.
    pub fn begin_fetch(&mut self) {
        *self = CatalogState::Loading;
    }

    /// Applies a completed fetch. Called in completion order: a later
    /// completion fully replaces whatever an earlier one installed
    /// (last-writer-wins, an accepted inconsistency of the source system).
    pub fn complete_fetch(&mut self, outcome: Result<Vec<RawRecord>>) {
        match outcome {
            Ok(records) => {
                *self = CatalogState::Ready(DeviceCatalog::from_records(&records));
            }
            Err(err) => {
                warn!(error = %err, "device fetch failed");
                *self = CatalogState::Failed {
                    retryable: err.is_retriable(),
                    message: err.to_string(),
                };
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    pub fn catalog(&self) -> Option<&DeviceCatalog> {
        match self {
            CatalogState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// Classifies an empty rendered list: failed fetch vs over-narrow
    /// filter. `None` while loading or when devices are showing.
    pub fn empty_reason(&self, filtered_count: usize) -> Option<EmptyReason> {
        match self {
            CatalogState::Failed { .. } => Some(EmptyReason::FetchFailed),
            CatalogState::Ready(_) if filtered_count == 0 => Some(EmptyReason::NoMatches),
            _ => None,
        }
    }
}
