// ── Runtime fetch configuration ──
//
// Describes where the data comes from and how patiently to ask for it.
// Built by the config crate or a test; core never reads config files.

use std::time::Duration;

use url::Url;

pub use atlas_api::{DEFAULT_ENDPOINT, RetryPolicy};

/// Common name of the record selected after every successful fetch.
pub const DEFAULT_COUNTRY: &str = "Afghanistan";

/// Configuration for the fetch pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryConfig {
    /// Endpoint returning every country as a JSON array.
    pub endpoint: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Exact common name of the default selection.
    pub default_country: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: atlas_api::transport::DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            default_country: DEFAULT_COUNTRY.into(),
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("built-in endpoint is a valid URL")
}
