//! Catalog lookup errors. All of them are recoverable: the caller falls back to generated identity.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    // Configuration
    #[error("Catalog endpoint is not configured. Set GAMES_API, games_api in the config file, or pass --games-api.")]
    MissingEndpoint,

    #[error("Provider '{provider}' has no catalog vendor name (db_name) configured.")]
    MissingVendor { provider: String },

    #[error("Invalid catalog URL {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(reqwest::Error),

    // Transport
    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} from catalog: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read catalog response from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Unexpected catalog response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}
