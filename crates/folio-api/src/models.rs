// Wire-level response shapes shared by every endpoint.
//
// The backend wraps all payloads in `{ code, detail, data }`. Presence of
// a `code` other than "OK" marks an application-level failure even though
// the transport call succeeded; an absent `code` is success.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

/// The envelope's success sentinel.
pub const SUCCESS_CODE: &str = "OK";

/// The `{ code, detail, data }` wrapper around every response payload.
///
/// Parsed untyped first so that error envelopes (where `data` is null)
/// never fail payload deserialization before classification.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Classify the envelope and extract the payload.
    ///
    /// A `code` other than [`SUCCESS_CODE`] becomes `Error::Application`
    /// carrying `detail` (or a generic message). Otherwise `data` is
    /// deserialized into `T`; a mismatch is a deserialization error,
    /// never a silent success.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T, Error> {
        if let Some(code) = self.code {
            if code != SUCCESS_CODE {
                let message = self
                    .detail
                    .unwrap_or_else(|| format!("request failed with code {code}"));
                return Err(Error::Application { code, message });
            }
        }

        let preview = self.data.to_string();
        serde_json::from_value(self.data).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: preview,
        })
    }
}

/// One page of a filtered list.
///
/// `total_records` reflects the full matching set independent of
/// `results.len()`, so pagination controls can compute total pages even
/// when the current page is short or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub results: Vec<T>,
    pub total_records: u64,
}

impl<T> Paged<T> {
    /// "No visible rows" for the current page. Distinct from a zero
    /// total: deleting the last item on a page leaves an empty page
    /// with a non-zero total.
    pub fn is_empty_page(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of pages at the given page size.
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_records.div_ceil(u64::from(page_size))
    }
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            total_records: 0,
        }
    }
}
