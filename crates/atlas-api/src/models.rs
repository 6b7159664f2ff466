// REST Countries v3.1 wire types
//
// Only the fields the directory uses are modeled. Everything except the
// name and flags is optional on the wire; absent or `null` values become
// empty defaults so a territory without a capital still deserializes.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// `null` and missing both map to `T::default()`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One element of the `/v3.1/all` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    pub name: RawName,
    #[serde(default, deserialize_with = "null_default")]
    pub cca3: String,
    /// `None` when the field is absent (territories without a capital).
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_default")]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub population: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub area: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub latlng: Vec<f64>,
    #[serde(default, deserialize_with = "null_default")]
    pub borders: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub timezones: Vec<String>,
    /// Keyed by ISO 4217 code, in source order.
    #[serde(default, deserialize_with = "null_default")]
    pub currencies: IndexMap<String, RawCurrency>,
    /// Keyed by ISO 639-3 code, in source order.
    #[serde(default, deserialize_with = "null_default")]
    pub languages: IndexMap<String, String>,
    pub flags: RawFlags,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawName {
    pub common: String,
    #[serde(default, deserialize_with = "null_default")]
    pub official: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCurrency {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFlags {
    pub png: String,
    #[serde(default, deserialize_with = "null_default")]
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}
