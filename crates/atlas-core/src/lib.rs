//! Domain layer between `atlas-api` and the terminal UI.
//!
//! - **[`FetchPipeline`]**: runs one complete load, a retried GET through
//!   [`atlas_api::CountriesClient`], an all-or-nothing validation pass, and
//!   default-selection lookup. Produces a [`Catalog`] or a [`CoreError`].
//!
//! - **[`ViewStore`]**: synchronous state for the directory screen:
//!   collection, selection, search text, region filter and the retry
//!   generation. Region set and filtered list are derived on read.
//!
//! - **Domain model** ([`model`]): [`Country`] and its value types, keyed by
//!   [`CountryCode`].

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod validate;

#[cfg(test)]
pub(crate) mod fixtures;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_COUNTRY, DEFAULT_ENDPOINT, DirectoryConfig, RetryPolicy};
pub use error::CoreError;
pub use model::{Coordinates, Country, CountryCode, CountryName, Currency, Flags};
pub use pipeline::{Catalog, FetchPipeline};
pub use store::{ALL_REGIONS, Effect, Phase, ViewStore};
