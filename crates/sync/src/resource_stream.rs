//! Live [`Resource`] streams returned by repository reads.
//!
//! Every read spawns one task that produces resources into an unbounded
//! channel. The [`ResourceStream`] owns a drop guard on the task's
//! cancellation token, so dropping the stream (or calling
//! [`ResourceStream::cancel`]) stops the task, aborts any in-flight remote
//! fetch, and releases its live query.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use taskhub_core::auth::{AuthContext, NO_AUTHENTICATED_USER};
use taskhub_core::error::SyncError;
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::{LocalStore, StoreError, Table};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

// ---------------------------------------------------------------------------
// Sender
// ---------------------------------------------------------------------------

/// Producer side of a [`ResourceStream`].
#[derive(Debug)]
pub struct ResourceSender<T> {
    tx: mpsc::UnboundedSender<Resource<T>>,
}

impl<T> ResourceSender<T> {
    /// Queue a resource. Returns `false` once the stream has been dropped.
    pub fn emit(&self, resource: Resource<T>) -> bool {
        self.tx.send(resource).is_ok()
    }
}

impl<T> Clone for ResourceSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stream
// ---------------------------------------------------------------------------

/// A live, deduplicated sequence of [`Resource`] states.
///
/// Consecutive equal states are delivered once. The stream never ends on its
/// own while its producer is live; it ends after [`ResourceStream::cancel`].
pub struct ResourceStream<T> {
    rx: mpsc::UnboundedReceiver<Resource<T>>,
    last: Option<Resource<T>>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl<T> ResourceStream<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Run `producer` on a new task, feeding the returned stream.
    pub fn spawn<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(ResourceSender<T>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = producer(ResourceSender { tx });

        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = task => {}
            }
        });

        Self {
            rx,
            last: None,
            _guard: cancel.clone().drop_guard(),
            cancel,
        }
    }

    /// Wait for the next distinct state. `None` once the stream is cancelled.
    pub async fn next(&mut self) -> Option<Resource<T>> {
        std::future::poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }

    /// Stop the producer. Already queued states are still delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

// No field is structurally pinned.
impl<T> Unpin for ResourceStream<T> {}

impl<T> Stream for ResourceStream<T>
where
    T: Clone + PartialEq,
{
    type Item = Resource<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match this.rx.poll_recv(cx) {
                Poll::Ready(Some(item)) => {
                    if this.last.as_ref() == Some(&item) {
                        continue;
                    }
                    this.last = Some(item.clone());
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Cache-first read
// ---------------------------------------------------------------------------

/// The standard read: `Loading`, then a best-effort remote refresh, then
/// every result of a live query over `tables` mapped through `to_resource`.
///
/// A failed refresh is logged and the cached data is served.
pub(crate) async fn refresh_then_watch<V, U, R, Q, QFut, M>(
    out: &ResourceSender<U>,
    store: &LocalStore,
    resource: &str,
    tables: &[Table],
    refresh: R,
    query: Q,
    to_resource: M,
) where
    V: Clone + PartialEq + Send + Sync + 'static,
    R: Future<Output = Result<(), SyncError>>,
    Q: Fn(LocalStore) -> QFut + Send + 'static,
    QFut: Future<Output = Result<V, StoreError>> + Send + 'static,
    M: Fn(V) -> Resource<U>,
{
    if !out.emit(Resource::Loading) {
        return;
    }

    if let Err(e) = refresh.await {
        tracing::warn!(resource, error = %e, "Remote refresh failed, serving cached data");
    }

    let mut live = store.live(tables, query);
    while let Some(value) = live.next().await {
        if !out.emit(to_resource(value)) {
            break;
        }
    }
}

/// Run `session` for the signed-in user, restarting it whenever the user
/// changes.
///
/// While nobody is signed in the stream reports
/// `Error("No authenticated user")`.
pub(crate) async fn for_each_session<U, F, Fut>(auth: &AuthContext, out: &ResourceSender<U>, mut session: F)
where
    F: FnMut(DbId) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut users = auth.watch_user_id();
    loop {
        let user = *users.borrow_and_update();
        let run = async {
            match user {
                Some(user_id) => session(user_id).await,
                None => {
                    out.emit(Resource::Loading);
                    out.emit(Resource::error(NO_AUTHENTICATED_USER));
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            changed = users.changed() => {
                if changed.is_err() {
                    break;
                }
                tracing::debug!("Session changed, restarting read");
            }
            _ = run => break,
        }
    }
}
