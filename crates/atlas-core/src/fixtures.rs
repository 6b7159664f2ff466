// Test builders shared by the unit test modules.

use indexmap::IndexMap;

use crate::model::{Country, CountryCode, CountryName, Flags};

pub(crate) fn country(common: &str, code: &str, region: &str) -> Country {
    Country {
        name: CountryName {
            common: common.into(),
            official: common.into(),
        },
        code: CountryCode::new(code),
        region: region.into(),
        subregion: None,
        capital: Vec::new(),
        population: 0,
        area: 0.0,
        coordinates: None,
        borders: Vec::new(),
        timezones: Vec::new(),
        currencies: IndexMap::new(),
        languages: IndexMap::new(),
        flags: Flags {
            png: format!("{}.png", code.to_lowercase()),
            svg: String::new(),
        },
    }
}

pub(crate) fn with_borders(mut country: Country, borders: &[&str]) -> Country {
    country.borders = borders.iter().copied().map(CountryCode::from).collect();
    country
}
