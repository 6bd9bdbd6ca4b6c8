//! Commodity Rates - Rust Implementation
//!
//! Fetches commodity rates from commodities-api.com and inverts them.

pub mod csv_output;
pub mod error;
pub mod fetcher;
pub mod rates;
pub mod transport;

pub use error::{ErrorKind, FetchError};
pub use fetcher::{FetcherConfig, RateFetcher, RateRequest};
pub use rates::{invert_envelope, invert_rates, Envelope, RateMap};
pub use transport::{HttpTransport, RawResponse, Transport};

/// Default API base URL
pub const API_BASE_URL: &str = "https://commodities-api.com/api";

/// Default endpoint for current rates
pub const DEFAULT_ENDPOINT: &str = "latest";

/// Environment variable holding the access key
pub const API_KEY_ENV: &str = "API_KEY";
