//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use atlas_core::{Catalog, CoreError, Country, CountryCode};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Fetch ─────────────────────────────────────────────────────
    /// User asked to load again ("Try Again").
    RequestRetry,
    /// A fetch finished. `generation` is the retry counter it ran for.
    CatalogLoaded {
        generation: u64,
        result: Result<Catalog, CoreError>,
    },

    // ── Filters ───────────────────────────────────────────────────
    SetSearch(String),
    ClearSearch,
    CycleRegion { forward: bool },

    // ── Selection ─────────────────────────────────────────────────
    SelectCountry(Arc<Country>),
    SelectBorder(CountryCode),

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}
