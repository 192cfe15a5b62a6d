use thiserror::Error;

/// Top-level error type for the `folio-api` crate.
///
/// Two failure channels feed this enum: transport-level failures
/// (connection, timeout, non-2xx status, unparseable envelope) and
/// application-level failures embedded in a 200-status envelope.
/// `Superseded` is neither: it marks a response that arrived for a
/// request that is no longer the latest issued for its path.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport channel ───────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-2xx response without a usable envelope.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body could not be parsed as the expected envelope,
    /// with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Application channel ─────────────────────────────────────────
    /// Envelope parsed successfully but its `code` signals failure.
    /// Carries the envelope's `detail` as the message.
    #[error("API error ({code}): {message}")]
    Application { code: String, message: String },

    // ── Ordering ────────────────────────────────────────────────────
    /// A newer request to the same path was issued before this
    /// response arrived; the payload was discarded.
    #[error("Response superseded by a newer request to {path}")]
    Superseded { path: String },
}

impl Error {
    /// Returns `true` for failures on the transport channel.
    ///
    /// These are the errors that trigger the gateway's user-visible
    /// notification. Application failures and superseded arrivals do not.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::InvalidUrl(_) | Self::Http { .. } | Self::Deserialization { .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The gateway performs no retries itself; this exists so a caller
    /// can layer a retry policy on top.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => matches!(*status, 502 | 503 | 504),
            _ => false,
        }
    }

    /// Extract the application-level error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Application { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}
