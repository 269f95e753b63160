//! Session state and the debounce primitive.
//!
//! Filter, sort, and comparison state live in one explicit session object
//! with a single mutation entry point per concern, instead of ambient
//! variables mutated from event callbacks. All mutation is synchronous;
//! the only suspension point in the system is the device fetch.

use std::time::{Duration, Instant};

use crate::compare::ComparisonSet;
use crate::models::{DeviceCategory, NormalizedDevice};
use crate::prefs::{Preferences, ViewMode};
use crate::query::{query, FilterState, SortState};

/// One filter mutation. Routed through `SessionState::apply_filter_change`
/// so filter state has exactly one writer.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Search(Option<String>),
    Category(Option<DeviceCategory>),
    Model(Option<String>),
    Status(Option<bool>),
    PerformanceRange(Option<(f64, f64)>),
    MemoryMin(Option<u32>),
    Reset,
}

/// UI-held session state driving the query engine.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    filter: FilterState,
    sort: SortState,
    comparison: ComparisonSet,
    view_mode: ViewMode,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores session state from the persisted preference blob.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        let mut filter = FilterState::default();
        if !preferences.search_term.is_empty() {
            filter.search_term = Some(preferences.search_term.clone());
        }
        if !preferences.model_value.is_empty() {
            filter.model = Some(preferences.model_value.clone());
        }
        match preferences.status_value.as_str() {
            "enabled" => filter.status_enabled = Some(true),
            "disabled" => filter.status_enabled = Some(false),
            _ => {}
        }

        Self {
            filter,
            sort: SortState::from_preference(&preferences.sort_value),
            comparison: ComparisonSet::new(),
            view_mode: preferences.view_mode,
        }
    }

    /// Snapshot for persistence.
    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            search_term: self.filter.search_term.clone().unwrap_or_default(),
            status_value: match self.filter.status_enabled {
                Some(true) => "enabled".to_string(),
                Some(false) => "disabled".to_string(),
                None => String::new(),
            },
            model_value: self.filter.model.clone().unwrap_or_default(),
            sort_value: self.sort.as_str().to_string(),
            view_mode: self.view_mode,
            expansion_value: String::new(),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// The single mutation entry point for filter state.
    pub fn apply_filter_change(&mut self, change: FilterChange) {
        match change {
            FilterChange::Search(term) => {
                self.filter.search_term = term.filter(|t| !t.trim().is_empty());
            }
            FilterChange::Category(category) => self.filter.category = category,
            FilterChange::Model(model) => {
                self.filter.model = model.filter(|m| !m.trim().is_empty());
            }
            FilterChange::Status(status) => self.filter.status_enabled = status,
            FilterChange::PerformanceRange(range) => self.filter.performance_range = range,
            FilterChange::MemoryMin(min) => self.filter.memory_min_gb = min,
            FilterChange::Reset => self.filter = FilterState::default(),
        }
    }

    /// The single mutation entry point for sort state.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Comparison selection survives filter/sort/view changes; only
    /// these two entry points mutate it.
    pub fn toggle_comparison(&mut self, id: &str) -> bool {
        self.comparison.toggle(id)
    }

    pub fn clear_comparison(&mut self) {
        self.comparison.clear();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Pure recompute of the derived view from the canonical collection.
    pub fn run_query(&self, devices: &[NormalizedDevice]) -> Vec<NormalizedDevice> {
        query(devices, &self.filter, self.sort)
    }

    /// Selected comparison devices against the canonical collection.
    pub fn compared_devices<'a>(
        &self,
        devices: &'a [NormalizedDevice],
    ) -> Vec<&'a NormalizedDevice> {
        self.comparison.selected_devices(devices)
    }
}

/// Cancellable debounce window.
///
/// Each submit restarts the window, so only the last value submitted
/// before the delay elapses is ever delivered. Deadlines are explicit
/// (`poll` with a clock reading) rather than hidden in timer callbacks.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the window.
    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Yields the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => {
                self.pending.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    /// Drops the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
