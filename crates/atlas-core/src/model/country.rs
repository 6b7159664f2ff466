// ── Country domain type ──
//
// One validated record. Immutable once built; the store shares records
// behind `Arc` so the selection is a reference into the collection.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── CountryCode ─────────────────────────────────────────────────────

/// Three-letter country identifier (`cca3`). Primary key of the collection
/// and the target of every border reference. Compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for CountryCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// ── Supporting value types ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Image locations for the country's flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    /// Raster image. Always non-empty on a validated record.
    pub png: String,
    /// Vector image. May be empty.
    pub svg: String,
}

// ── Country ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    pub code: CountryCode,
    pub region: String,
    pub subregion: Option<String>,
    /// Empty for territories without a capital.
    pub capital: Vec<String>,
    pub population: u64,
    /// Square kilometres.
    pub area: f64,
    pub coordinates: Option<Coordinates>,
    /// Neighbour codes in source order.
    pub borders: Vec<CountryCode>,
    pub timezones: Vec<String>,
    /// Keyed by currency code, in source order.
    pub currencies: IndexMap<String, Currency>,
    /// Keyed by language code, in source order.
    pub languages: IndexMap<String, String>,
    pub flags: Flags,
}

impl Country {
    /// Neighbour codes in ascending order.
    pub fn sorted_borders(&self) -> Vec<CountryCode> {
        let mut borders = self.borders.clone();
        borders.sort();
        borders
    }

    /// Capitals joined with ", ", or `N/A`.
    pub fn capital_display(&self) -> String {
        if self.capital.is_empty() {
            "N/A".into()
        } else {
            self.capital.join(", ")
        }
    }

    pub fn subregion_display(&self) -> &str {
        self.subregion
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("N/A")
    }

    pub fn language_names(&self) -> Vec<&str> {
        self.languages.values().map(String::as_str).collect()
    }

    /// `"Name (Symbol)"` per currency, in source order.
    pub fn currency_labels(&self) -> Vec<String> {
        self.currencies
            .values()
            .map(|c| format!("{} ({})", c.name, c.symbol))
            .collect()
    }

    /// Case-insensitive substring match on the common name. `needle_lower`
    /// must already be lowercase.
    pub(crate) fn name_contains(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.name.common.to_lowercase().contains(needle_lower)
    }
}
