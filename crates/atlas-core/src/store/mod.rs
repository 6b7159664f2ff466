// ── View state store ──
//
// Single owner of everything the directory screen shows: the collection,
// the selection, the search and region inputs, and the fetch lifecycle.
// All transitions are synchronous; the fetch itself runs elsewhere and
// reports back through `apply_fetch_result`.

pub mod derive;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{Country, CountryCode};
use crate::pipeline::Catalog;

pub use derive::{filter_countries, region_set};

/// Label of the region option that disables the region filter.
pub const ALL_REGIONS: &str = "All Regions";

/// Which top-level view the store is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase<'a> {
    Loading,
    Failed(&'a CoreError),
    Ready,
}

/// Side effect requested by a transition, applied by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Return the detail view to its top.
    ScrollToTop,
}

/// View state for the country directory.
///
/// A new store is loading with retry counter 0; the caller runs the first
/// fetch for generation 0.
#[derive(Debug)]
pub struct ViewStore {
    countries: Arc<Vec<Arc<Country>>>,
    by_code: HashMap<CountryCode, usize>,
    selected: Option<Arc<Country>>,
    search_term: String,
    region_filter: Option<String>,
    retry_count: u64,
    loading: bool,
    error: Option<CoreError>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            countries: Arc::new(Vec::new()),
            by_code: HashMap::new(),
            selected: None,
            search_term: String::new(),
            region_filter: None,
            retry_count: 0,
            loading: true,
            error: None,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn countries(&self) -> &[Arc<Country>] {
        &self.countries
    }

    pub fn selected(&self) -> Option<&Arc<Country>> {
        self.selected.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn region_filter(&self) -> Option<&str> {
        self.region_filter.as_deref()
    }

    /// Fetch generation. Bumped by every accepted retry.
    pub fn retry_count(&self) -> u64 {
        self.retry_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&CoreError> {
        self.error.as_ref()
    }

    pub fn phase(&self) -> Phase<'_> {
        if self.loading {
            Phase::Loading
        } else if let Some(err) = &self.error {
            Phase::Failed(err)
        } else {
            Phase::Ready
        }
    }

    /// Look up a record by primary key.
    pub fn get(&self, code: &CountryCode) -> Option<&Arc<Country>> {
        self.by_code.get(code).and_then(|&i| self.countries.get(i))
    }

    // ── Derived views ────────────────────────────────────────────────

    pub fn regions(&self) -> Vec<String> {
        region_set(&self.countries)
    }

    pub fn filtered(&self) -> Vec<Arc<Country>> {
        filter_countries(&self.countries, &self.search_term, self.region_filter())
    }

    /// Selector entries: `None` ("All Regions") then every region.
    pub fn region_options(&self) -> Vec<Option<String>> {
        std::iter::once(None)
            .chain(self.regions().into_iter().map(Some))
            .collect()
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn select_country(&mut self, country: Arc<Country>) -> Effect {
        debug!(code = %country.code, "select country");
        self.selected = Some(country);
        Effect::ScrollToTop
    }

    /// Select the neighbour with the given code. Unknown codes are ignored.
    pub fn select_by_border_code(&mut self, code: &CountryCode) -> Option<Effect> {
        let country = self.get(code).cloned();
        match country {
            Some(country) => Some(self.select_country(country)),
            None => {
                debug!(%code, "border code not in collection");
                None
            }
        }
    }

    // ── Filters ──────────────────────────────────────────────────────

    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.search_term = text.into();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    pub fn set_region_filter(&mut self, region: Option<String>) {
        self.region_filter = region;
    }

    /// Step the region filter through `region_options()`, wrapping around.
    /// A filter no longer among the options restarts from "All Regions".
    pub fn cycle_region(&mut self, forward: bool) {
        let options = self.region_options();
        let current = options
            .iter()
            .position(|o| o.as_deref() == self.region_filter())
            .unwrap_or(0);
        let len = options.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.region_filter = options.into_iter().nth(next).flatten();
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────

    /// Ask for another fetch. Returns the new generation, or `None` while a
    /// fetch is already in flight.
    pub fn request_retry(&mut self) -> Option<u64> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.loading = true;
        self.retry_count += 1;
        debug!(generation = self.retry_count, "retry requested");
        Some(self.retry_count)
    }

    /// Publish the outcome of the fetch for `generation`. Stale generations
    /// are dropped. Returns whether the result was applied.
    ///
    /// On failure the previous collection stays in memory; only the error
    /// view changes.
    pub fn apply_fetch_result(
        &mut self,
        generation: u64,
        result: Result<Catalog, CoreError>,
    ) -> bool {
        if generation != self.retry_count {
            debug!(generation, current = self.retry_count, "dropping stale fetch result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(catalog) => {
                self.by_code = catalog
                    .countries
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (c.code.clone(), i))
                    .collect();
                self.countries = catalog.countries;
                self.selected = Some(catalog.default);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err);
            }
        }
        true
    }
}
