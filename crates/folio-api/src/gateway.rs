// ── Transport gateway ──
//
// Wraps the shared reqwest::Client with loader bookkeeping, envelope
// classification, and the transport-failure notification channel. Every
// outgoing call flows through `dispatch`: register the path, send,
// deregister, purge conflicts, classify.

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::loader::{ArrivalFate, LoaderState};
use crate::models::Envelope;
use crate::transport::TransportConfig;

const NOTICE_CHANNEL_SIZE: usize = 16;

/// Per-call dispatch options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Skip loader participation for this call. Used for background,
    /// non-user-facing calls (e.g. the cart badge refresh).
    pub skip_loader: bool,
}

impl RequestOptions {
    /// Options for a background call that must not drive the loader.
    pub fn background() -> Self {
        Self { skip_loader: true }
    }
}

/// Shared transport gateway for the bookstore API.
///
/// Cheaply cloneable; all clones share the loader state and the
/// notification channel. Never panics on a failure path -- every failure
/// surfaces as an `Err`.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    loader: std::sync::Arc<LoaderState>,
    notices: broadcast::Sender<String>,
}

impl Gateway {
    /// Create a gateway for the given backend origin.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::from_reqwest(http, base_url))
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages headers).
    pub fn from_reqwest(http: reqwest::Client, base_url: Url) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_SIZE);
        Self {
            http,
            base_url: normalize_base_url(base_url),
            loader: std::sync::Arc::new(LoaderState::new()),
            notices,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Subscribe to loader visibility changes.
    pub fn loader(&self) -> tokio::sync::watch::Receiver<bool> {
        self.loader.watch()
    }

    /// Current loader visibility.
    pub fn is_loading(&self) -> bool {
        self.loader.is_visible()
    }

    /// Mark `path` as superseded: when its outcome arrives, the token is
    /// cleared and every residual occurrence of the path is purged from
    /// the in-flight set.
    pub fn mark_conflicted(&self, path: &str) {
        self.loader.mark_conflicted(path);
    }

    /// Subscribe to the fire-and-forget user notification channel.
    ///
    /// One message is sent per transport-level failure, carrying the
    /// failure's message. Application-level failures never notify here;
    /// callers own their own feedback for those.
    pub fn notices(&self) -> broadcast::Receiver<String> {
        self.notices.subscribe()
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.get_opts(path, RequestOptions::default()).await
    }

    pub async fn get_opts<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: RequestOptions,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");
        self.dispatch(self.http.get(url), path, opts).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        self.get_with_params_opts(path, params, RequestOptions::default())
            .await
    }

    pub async fn get_with_params_opts<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        opts: RequestOptions,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");
        self.dispatch(self.http.get(url).query(params), path, opts)
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");
        self.dispatch(self.http.post(url).json(body), path, RequestOptions::default())
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");
        self.dispatch(self.http.put(url).json(body), path, RequestOptions::default())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");
        self.dispatch(self.http.delete(url), path, RequestOptions::default())
            .await
    }

    // ── Dispatch core ────────────────────────────────────────────────

    /// Loader registration, exchange, arrival bookkeeping, classification.
    ///
    /// The request identifier is the path (not the full query string):
    /// two searches with different keywords count as duplicates of the
    /// same endpoint for conflict purposes.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        path: &str,
        opts: RequestOptions,
    ) -> Result<T, Error> {
        let track = !opts.skip_loader;
        let seq = self.loader.begin(path, track);

        let outcome = self.exchange(req).await;

        let fate = self.loader.arrive(path, seq, track);
        if fate == ArrivalFate::Stale {
            debug!(path, "discarding superseded response");
            return Err(Error::Superseded {
                path: path.to_owned(),
            });
        }

        match outcome {
            Ok(value) => Ok(value),
            Err(err) => {
                if err.is_transport() {
                    warn!(path, error = %err, "request failed");
                    let _ = self.notices.send(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Send the request and classify the response envelope.
    async fn exchange<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, Error> {
        let resp = req.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;
        envelope.into_payload()
    }
}

/// Base URLs must end with `/` so that joining relative paths works.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
