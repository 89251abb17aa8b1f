//! Single-assignment handles and the deadline race built on them
//!
//! A [`Pending`] is resolved through any clone of its linked [`Resolver`].
//! Only the first resolution is delivered, every later attempt is a no-op
//! that reports `false`. [`race`] pairs an arbitrary action with a deadline
//! timer so that whichever of the two resolves first determines the outcome.
use std::{
    fmt::Debug,
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    task::{Context, Poll},
    time::Duration,
};

use futures::{channel::oneshot, FutureExt};
use parking_lot::Mutex;
use tokio::{runtime::Handle, task::AbortHandle, time::Instant};
use tracing::trace;

struct Slot<T> {
    resolved: AtomicBool,
    sender: Mutex<Option<oneshot::Sender<T>>>,
    timer: Mutex<Option<AbortHandle>>,
}

/// The writing side of a [`Pending`] handle
///
/// Clones share the same slot, so any of them may resolve the handle, but only once.
pub struct Resolver<T> {
    slot: Arc<Slot<T>>,
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Debug for Resolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("race::Resolver")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

impl<T> Resolver<T> {
    /// Resolves the linked [`Pending`] with `value`
    ///
    /// Returns `true` if this call won, `false` if the handle was already resolved,
    /// in which case `value` is dropped. A won resolution also cancels any deadline
    /// timer attached by [`race`].
    pub fn resolve(&self, value: T) -> bool {
        match self.claim() {
            Some(claim) => {
                claim.fill(value);
                self.disarm();
                true
            }
            None => {
                trace!("handle already resolved, discarding value");
                false
            }
        }
    }

    /// Whether any resolver has already resolved the handle
    pub fn is_resolved(&self) -> bool {
        self.slot.resolved.load(Ordering::Acquire)
    }

    fn claim(&self) -> Option<Claim<T>> {
        if self.slot.resolved.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Claim {
            sender: self.slot.sender.lock().take(),
        })
    }

    fn arm(&self, timer: AbortHandle) {
        let mut slot = self.slot.timer.lock();
        if self.is_resolved() {
            timer.abort();
        } else {
            *slot = Some(timer);
        }
    }

    fn disarm(&self) {
        if let Some(timer) = self.slot.timer.lock().take() {
            timer.abort();
        }
    }
}

// Exclusive right to deliver the value, held between winning the flag and sending.
struct Claim<T> {
    sender: Option<oneshot::Sender<T>>,
}

impl<T> Claim<T> {
    fn fill(self, value: T) {
        if let Some(sender) = self.sender {
            // the receiving handle may have been dropped, nobody is waiting then
            if sender.send(value).is_err() {
                trace!("pending handle dropped before resolution");
            }
        }
    }
}

/// A value that is resolved exactly once by an external writer
///
/// Completes with the first value passed to [`Resolver::resolve`].
/// If every resolver is dropped without resolving, the handle never completes;
/// pair it with a deadline through [`race`] when that matters.
#[must_use = "a pending handle does nothing unless polled"]
pub struct Pending<T> {
    receiver: Option<oneshot::Receiver<T>>,
}

impl<T> Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("race::Pending")
            .field("waiting", &self.receiver.is_some())
            .finish()
    }
}

impl<T> Future for Pending<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Pending;
        };
        match receiver.poll_unpin(cx) {
            Poll::Ready(Ok(value)) => {
                self.receiver = None;
                Poll::Ready(value)
            }
            Poll::Ready(Err(oneshot::Canceled)) => {
                trace!("all resolvers dropped without a value, handle will never resolve");
                self.receiver = None;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Returns an unresolved [`Pending`] handle along with its linked [`Resolver`]
pub fn pending<T>() -> (Resolver<T>, Pending<T>) {
    let (tx, rx) = oneshot::channel();
    let resolver = Resolver {
        slot: Arc::new(Slot {
            resolved: AtomicBool::new(false),
            sender: Mutex::new(Some(tx)),
            timer: Mutex::new(None),
        }),
    };
    (resolver, Pending { receiver: Some(rx) })
}

/// Races `action` against a deadline timer spawned on `runtime`
///
/// `action` receives the resolver of the returned handle and is run before this
/// function returns; it is expected to hand the resolver to whatever eventually
/// produces the value. If the handle is still unresolved once `deadline` has passed,
/// `on_elapsed` is called exactly once with the measured elapsed time and its value
/// resolves the handle. Any later resolution by the action is ignored.
///
/// When the action wins, the timer is aborted and `on_elapsed` is never called.
pub fn race<T, A, F>(runtime: &Handle, deadline: Duration, action: A, on_elapsed: F) -> Pending<T>
where
    T: Send + 'static,
    A: FnOnce(Resolver<T>),
    F: FnOnce(Duration) -> T + Send + 'static,
{
    let (resolver, pending) = pending();
    let started = Instant::now();
    let timer = runtime.spawn({
        let resolver = resolver.clone();
        async move {
            tokio::time::sleep_until(started + deadline).await;
            if let Some(claim) = resolver.claim() {
                claim.fill(on_elapsed(started.elapsed()));
            }
        }
    });
    resolver.arm(timer.abort_handle());
    action(resolver);
    pending
}
