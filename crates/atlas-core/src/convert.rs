// ── API-to-domain type conversions ──
//
// Bridges `atlas_api` wire records into `atlas_core::model` types. Required
// fields are checked in `validate` before conversion runs; this module only
// reshapes and fills defaults.

use atlas_api::{RawCountry, RawCurrency};

use crate::model::{Coordinates, Country, CountryCode, CountryName, Currency, Flags};

// ── Helpers ────────────────────────────────────────────────────────

/// `[lat, lng]` when the wire list carries at least two numbers.
fn coordinates(latlng: &[f64]) -> Option<Coordinates> {
    match latlng {
        [latitude, longitude, ..] => Some(Coordinates {
            latitude: *latitude,
            longitude: *longitude,
        }),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<RawCurrency> for Currency {
    fn from(raw: RawCurrency) -> Self {
        Self {
            name: raw.name,
            symbol: raw.symbol,
        }
    }
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        let official = if raw.name.official.is_empty() {
            raw.name.common.clone()
        } else {
            raw.name.official
        };

        Country {
            name: CountryName {
                common: raw.name.common,
                official,
            },
            code: CountryCode::new(raw.cca3),
            region: raw.region,
            subregion: non_empty(raw.subregion),
            capital: raw.capital.unwrap_or_default(),
            population: raw.population,
            area: raw.area,
            coordinates: coordinates(&raw.latlng),
            borders: raw.borders.into_iter().map(CountryCode::new).collect(),
            timezones: raw.timezones,
            currencies: raw
                .currencies
                .into_iter()
                .map(|(code, c)| (code, Currency::from(c)))
                .collect(),
            languages: raw.languages,
            flags: Flags {
                png: raw.flags.png,
                svg: raw.flags.svg,
            },
        }
    }
}
