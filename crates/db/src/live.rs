//! Live queries over the local cache.
//!
//! A [`LiveQuery`] owns a background task that runs a query, keeps the
//! latest result in a `watch` channel, and re-runs the query whenever one of
//! its tables is written. Handles are multicast and replay the latest value
//! to new subscribers. The task never finishes on its own: it stops when
//! every handle has been dropped or its [`CancelHandle`] is cancelled.

use std::future::Future;

use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::changes::Table;
use crate::error::StoreError;
use crate::store::LocalStore;

/// Cancels a live query or one of its callback subscriptions.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Handle to a continuously re-evaluated query.
pub struct LiveQuery<T> {
    rx: watch::Receiver<Option<T>>,
    /// Whether this handle has already yielded the value it started with.
    primed: bool,
    cancel: CancellationToken,
}

impl<T> LiveQuery<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Spawn the query task. Use [`LocalStore::live`] instead of calling this
    /// directly.
    pub(crate) fn spawn<F, Fut>(store: LocalStore, tables: &[Table], query: F) -> Self
    where
        F: Fn(LocalStore) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);
        // Subscribe before the first run so no write can slip in between.
        let changes = store.changes();
        let cancel = CancellationToken::new();
        let tables = tables.to_vec();

        tokio::spawn(run_query(store, tables, query, tx, changes, cancel.clone()));

        Self {
            rx,
            primed: false,
            cancel,
        }
    }

    /// Wait for the next value.
    ///
    /// The first call on a fresh handle returns the latest value immediately
    /// if one is available. Returns `None` once the query has been cancelled.
    pub async fn next(&mut self) -> Option<T> {
        if !self.primed {
            self.primed = true;
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Some(value);
            }
        }

        loop {
            self.rx.changed().await.ok()?;
            if let Some(value) = self.rx.borrow_and_update().clone() {
                return Some(value);
            }
        }
    }

    /// The latest value without waiting.
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Invoke `on_change` for the latest value and every later change.
    ///
    /// The returned handle stops this callback only; cancelling the query
    /// itself also stops every callback. Cloning a `LiveQuery` gives another
    /// pull-based handle that replays the latest value.
    pub fn subscribe<F>(&self, mut on_change: F) -> CancelHandle
    where
        F: FnMut(T) + Send + 'static,
    {
        let token = self.cancel.child_token();
        let mut handle = self.clone();
        let stop = token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    next = handle.next() => match next {
                        Some(value) => on_change(value),
                        None => break,
                    },
                }
            }
        });

        CancelHandle::new(token)
    }

    /// Handle that stops the query task for every subscriber.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(self.cancel.clone())
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Clones replay the latest value on their first `next()`.
impl<T> Clone for LiveQuery<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            primed: false,
            cancel: self.cancel.clone(),
        }
    }
}

async fn run_query<T, F, Fut>(
    store: LocalStore,
    tables: Vec<Table>,
    query: F,
    tx: watch::Sender<Option<T>>,
    mut changes: broadcast::Receiver<Table>,
    cancel: CancellationToken,
) where
    T: PartialEq + Send + Sync + 'static,
    F: Fn(LocalStore) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
{
    let mut rerun = true;

    loop {
        if rerun {
            match query(store.clone()).await {
                Ok(value) => {
                    tx.send_if_modified(|current| {
                        if current.as_ref() == Some(&value) {
                            return false;
                        }
                        *current = Some(value);
                        true
                    });
                }
                Err(e) => {
                    tracing::warn!(tables = ?tables, error = %e, "Live query failed, keeping previous value");
                }
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tx.closed() => break,
            change = changes.recv() => {
                rerun = match change {
                    Ok(table) => tables.contains(&table),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Live query lagged behind change bus");
                        true
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
            }
        }
    }

    tracing::trace!(tables = ?tables, "Live query stopped");
}
