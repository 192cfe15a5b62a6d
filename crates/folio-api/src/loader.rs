// ── In-flight bookkeeping and loader visibility ──
//
// One owned service holds the in-flight request set, the conflict token,
// and the per-path sequence stamps. The gateway is the only mutator;
// consumers observe visibility through a watch channel.
//
// Invariant: visible ⇔ the in-flight set is non-empty, re-established at
// every mutation point and nowhere else.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::watch;

/// What became of a response once its bookkeeping was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalFate {
    /// This response belongs to the latest request issued for its path.
    Current,
    /// A newer request for the same path was issued while this one was
    /// in flight; the payload must be discarded.
    Stale,
}

#[derive(Default)]
struct LoaderInner {
    /// Paths awaiting a response. Duplicates allowed: two overlapping
    /// calls to the same endpoint each hold an entry.
    in_flight: Vec<String>,
    /// At most one path singled out as "may be superseded".
    conflict: Option<String>,
    /// Latest sequence stamp issued per path.
    latest: HashMap<String, u64>,
    next_seq: u64,
}

/// Process-wide loader state, owned by the gateway.
///
/// No ambient globals: construct one, hand it to the gateway, and
/// subscribe to [`watch`](Self::watch) for visibility changes.
pub struct LoaderState {
    inner: Mutex<LoaderInner>,
    visible: watch::Sender<bool>,
}

impl LoaderState {
    pub fn new() -> Self {
        let (visible, _) = watch::channel(false);
        Self {
            inner: Mutex::new(LoaderInner::default()),
            visible,
        }
    }

    /// Register a dispatch. Returns the sequence stamp the arrival must
    /// present to be considered current.
    ///
    /// `track` is false for background calls that opt out of loader
    /// participation; they are still stamped, since staleness is an
    /// ordering concern, not a UI one.
    pub fn begin(&self, path: &str, track: bool) -> u64 {
        let mut inner = self.lock();
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.latest.insert(path.to_owned(), seq);
        if track {
            inner.in_flight.push(path.to_owned());
        }
        self.sync_visible(&inner);
        seq
    }

    /// Apply arrival bookkeeping: deregister the request, run the
    /// conflict purge, recompute visibility, and judge staleness.
    pub fn arrive(&self, path: &str, seq: u64, track: bool) -> ArrivalFate {
        let mut inner = self.lock();

        if track {
            if let Some(pos) = inner.in_flight.iter().position(|p| p == path) {
                inner.in_flight.remove(pos);
            }
        }

        // Conflict purge: clear the token and strip every residual
        // occurrence of the path, covering duplicates issued before the
        // tracked request resolved.
        if inner.conflict.as_deref() == Some(path) {
            inner.conflict = None;
            inner.in_flight.retain(|p| p != path);
        }

        let stale = inner.latest.get(path) != Some(&seq);
        if !stale {
            inner.latest.remove(path);
        }

        self.sync_visible(&inner);

        if stale { ArrivalFate::Stale } else { ArrivalFate::Current }
    }

    /// Single out `path` as eligible to have its duplicates purged on
    /// arrival. Replaces any previously tracked token.
    pub fn mark_conflicted(&self, path: &str) {
        let mut inner = self.lock();
        inner.conflict = Some(path.to_owned());
    }

    /// Subscribe to loader visibility changes.
    pub fn watch(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    /// Current loader visibility.
    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LoaderInner> {
        self.inner.lock().expect("loader state lock poisoned")
    }

    fn sync_visible(&self, inner: &LoaderInner) {
        let now = !inner.in_flight.is_empty();
        // send_if_modified so watchers only wake on real transitions.
        self.visible.send_if_modified(|v| {
            if *v == now {
                false
            } else {
                *v = now;
                true
            }
        });
    }
}

impl Default for LoaderState {
    fn default() -> Self {
        Self::new()
    }
}
