// ── Fetch pipeline ──
//
// One end-to-end load: retried GET, shape check, record validation, default
// lookup. Nothing leaves this module until every step has succeeded.

use std::sync::Arc;

use tracing::{debug, info, warn};

use atlas_api::CountriesClient;
use atlas_api::transport::TransportConfig;

use crate::config::DirectoryConfig;
use crate::error::CoreError;
use crate::model::Country;
use crate::validate::validate_records;

// ── Catalog ──────────────────────────────────────────────────────

/// A validated collection plus the record to select first.
///
/// Cheap to clone. `default` points into `countries`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub countries: Arc<Vec<Arc<Country>>>,
    pub default: Arc<Country>,
}

impl Catalog {
    /// Build a catalog from validated countries, resolving the default by
    /// exact common name.
    pub fn from_countries(countries: Vec<Country>, default_name: &str) -> Result<Self, CoreError> {
        let countries: Vec<Arc<Country>> = countries.into_iter().map(Arc::new).collect();
        let default = countries
            .iter()
            .find(|c| c.name.common == default_name)
            .cloned()
            .ok_or_else(|| CoreError::DefaultEntryMissing {
                name: default_name.to_owned(),
            })?;
        Ok(Self {
            countries: Arc::new(countries),
            default,
        })
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

// ── FetchPipeline ────────────────────────────────────────────────

/// Runs the load sequence against the configured endpoint.
pub struct FetchPipeline {
    client: CountriesClient,
    default_country: String,
}

impl FetchPipeline {
    pub fn new(config: &DirectoryConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            retry: config.retry,
        };
        let client = CountriesClient::new(config.endpoint.clone(), &transport)?;
        Ok(Self {
            client,
            default_country: config.default_country.clone(),
        })
    }

    /// Fetch, validate, and resolve the default selection.
    pub async fn run(&self) -> Result<Catalog, CoreError> {
        debug!(endpoint = %self.client.endpoint(), "fetching countries");

        let outcome = self.load().await;
        match &outcome {
            Ok(catalog) => info!(
                count = catalog.len(),
                default = %catalog.default.name.common,
                "country catalog loaded"
            ),
            Err(err) => warn!(error = %err, detail = %err.diagnostic(), "country fetch failed"),
        }
        outcome
    }

    async fn load(&self) -> Result<Catalog, CoreError> {
        let document = self.client.fetch_all().await?;
        let countries = validate_records(document)?;
        Catalog::from_countries(countries, &self.default_country)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::country;

    #[test]
    fn default_points_into_collection() {
        let catalog = Catalog::from_countries(
            vec![country("Japan", "JPN", "Asia"), country("Afghanistan", "AFG", "Asia")],
            "Afghanistan",
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(Arc::ptr_eq(&catalog.default, &catalog.countries[1]));
    }

    #[test]
    fn default_match_is_exact() {
        let err = Catalog::from_countries(vec![country("afghanistan", "AFG", "Asia")], "Afghanistan")
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::DefaultEntryMissing {
                name: "Afghanistan".into()
            }
        );
    }
}
