// ── Domain model ──
//
// Canonical types consumed by the view store and the UI. Wire types from
// `atlas-api` are converted into these in `convert.rs`.

pub mod country;

pub use country::{Coordinates, Country, CountryCode, CountryName, Currency, Flags};
