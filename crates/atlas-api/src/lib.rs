// atlas-api: Async Rust client for the REST Countries API

pub mod client;
pub mod error;
pub mod models;
pub mod retry;
pub mod transport;

pub use client::CountriesClient;
pub use error::Error;
pub use models::{RawCountry, RawCurrency, RawFlags, RawName};
pub use retry::RetryPolicy;
pub use transport::TransportConfig;

/// Public endpoint serving every country in the v3.1 shape.
pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all";
