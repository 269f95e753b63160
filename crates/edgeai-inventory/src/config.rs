use serde::{Deserialize, Serialize};

/// Default debounce window for search input, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub search_debounce_ms: u64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            api_base_url: std::env::var("DEVICE_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            timeout_secs: std::env::var("DEVICE_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            search_debounce_ms: std::env::var("SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}
