// ── Filter-driven paginated fetcher ──
//
// One state machine per list view. Filter edits are coalesced through a
// debounce task; pagination transitions fetch immediately, cancelling
// any pending debounce. Results replace the previous page wholesale on
// success and are left untouched on failure.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use folio_api::{Error, ListFilter, Paged};

type FetchFn<T> = Arc<dyn Fn(ListFilter) -> BoxFuture<'static, Result<Paged<T>, Error>> + Send + Sync>;

struct Shared<T: Clone + Send + Sync + 'static> {
    filter: Mutex<ListFilter>,
    results: watch::Sender<Paged<T>>,
    fetch: FetchFn<T>,
}

impl<T: Clone + Send + Sync + 'static> Shared<T> {
    fn filter(&self) -> MutexGuard<'_, ListFilter> {
        self.filter.lock().expect("filter lock poisoned")
    }
}

/// Per-list-view fetch state machine.
///
/// Owns the current [`ListFilter`] and a watch channel of the latest
/// [`Paged`] results. User-driven filter edits are debounced so a burst
/// of keystrokes yields exactly one fetch, issued with the filter state
/// as of the last edit.
pub struct ListFetcher<T: Clone + Send + Sync + 'static> {
    shared: Arc<Shared<T>>,
    pending: Option<JoinHandle<()>>,
    debounce: Duration,
}

impl<T: Clone + Send + Sync + 'static> ListFetcher<T> {
    /// Create a fetcher around an async fetch function (typically a
    /// closure over a domain service call).
    pub fn new<F, Fut>(debounce: Duration, fetch: F) -> Self
    where
        F: Fn(ListFilter) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Paged<T>, Error>> + Send + 'static,
    {
        let fetch: FetchFn<T> = Arc::new(move |filter| Box::pin(fetch(filter)));
        let (results, _) = watch::channel(Paged::default());
        Self {
            shared: Arc::new(Shared {
                filter: Mutex::new(ListFilter::default()),
                results,
                fetch,
            }),
            pending: None,
            debounce,
        }
    }

    /// Subscribe to result replacements.
    pub fn results(&self) -> watch::Receiver<Paged<T>> {
        self.shared.results.subscribe()
    }

    /// The latest fetched page.
    pub fn current(&self) -> Paged<T> {
        self.shared.results.borrow().clone()
    }

    /// Snapshot of the current filter state.
    pub fn filter(&self) -> ListFilter {
        self.shared.filter().clone()
    }

    // ── Debounced transitions ────────────────────────────────────────

    /// Record a keyword edit: reset to page 1 and re-arm the debounce.
    pub fn edit_keyword(&mut self, keyword: impl Into<String>) {
        {
            let mut filter = self.shared.filter();
            filter.keyword = keyword.into();
            filter.page_index = 1;
        }
        self.schedule();
    }

    /// Record a category filter change: reset to page 1 and re-arm the
    /// debounce.
    pub fn set_category(&mut self, category_id: Option<i64>) {
        {
            let mut filter = self.shared.filter();
            filter.category_id = category_id;
            filter.page_index = 1;
        }
        self.schedule();
    }

    /// Arm the debounce: cancel any pending fetch task and start a new
    /// one. The task snapshots the filter at expiry, not at edit time,
    /// so coalesced edits fetch with the final state.
    fn schedule(&mut self) {
        self.cancel_pending();
        let shared = Arc::clone(&self.shared);
        // Create the sleep here so the window is anchored at edit time,
        // not at the spawned task's first poll.
        let sleep = tokio::time::sleep(self.debounce);
        self.pending = Some(tokio::spawn(async move {
            sleep.await;
            let filter = shared.filter().clone();
            match (shared.fetch)(filter).await {
                Ok(page) => {
                    shared.results.send_replace(page);
                }
                // Previous results stay in place; transport failures
                // already notified through the gateway channel.
                Err(e) => warn!(error = %e, "debounced list fetch failed"),
            }
        }));
    }

    // ── Immediate transitions ────────────────────────────────────────

    /// Jump to a page (1-based). Fetches immediately; a pending debounce
    /// from a prior edit is cancelled, not awaited.
    pub async fn go_to_page(&mut self, page_index: u32) -> Result<(), Error> {
        self.cancel_pending();
        self.shared.filter().page_index = page_index.max(1);
        self.run_now().await
    }

    /// Change the page size and reset to page 1. Fetches immediately.
    pub async fn set_page_size(&mut self, page_size: u32) -> Result<(), Error> {
        self.cancel_pending();
        {
            let mut filter = self.shared.filter();
            filter.page_size = page_size.max(1);
            filter.page_index = 1;
        }
        self.run_now().await
    }

    /// Re-fetch with the current filter (e.g. after a delete).
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.cancel_pending();
        self.run_now().await
    }

    async fn run_now(&self) -> Result<(), Error> {
        let filter = self.shared.filter().clone();
        let page = (self.shared.fetch)(filter).await?;
        self.shared.results.send_replace(page);
        Ok(())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for ListFetcher<T> {
    fn drop(&mut self) {
        // View unmount: a debounce armed just before teardown must not
        // fire afterwards.
        self.cancel_pending();
    }
}
