// ── Client configuration ──
//
// Owned config struct constructed by the caller; the library never reads
// config files. The debounce window and request timeout are tuning knobs
// here, not constants buried in the pipeline.

use std::time::Duration;

use url::Url;

use folio_api::{Error, Gateway, TransportConfig};

/// Configuration for one storefront client session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin (single origin; all paths are joined onto it).
    pub base_url: Url,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Delay after the last filter edit before a list fetch is issued.
    pub debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:5001/"
                .parse()
                .expect("default base URL is valid"),
            timeout: Duration::from_secs(30),
            debounce: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Build the shared transport gateway from this config.
    pub fn build_gateway(&self) -> Result<Gateway, Error> {
        let transport = TransportConfig {
            timeout: self.timeout,
        };
        Gateway::new(self.base_url.clone(), &transport)
    }
}
