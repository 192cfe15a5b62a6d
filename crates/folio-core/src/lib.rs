// folio-core: Consumer-facing orchestration over folio-api.
//
// Provides the debounced, filter-driven pagination pipeline every list
// view runs on, plus the client configuration that builds the shared
// gateway.

pub mod config;
pub mod fetcher;

pub use config::ClientConfig;
pub use fetcher::ListFetcher;

// Re-export the transport surface consumers interact with.
pub use folio_api::{Error, Gateway, ListFilter, Paged, RequestOptions};
