//! The contract between a bridged call and the synchronous operation it runs
use std::{borrow::Cow, fmt::Debug, marker::PhantomData};

use crate::{
    error::CallError,
    race::{Pending, Resolver},
};

/// Handle returned for a bridged call
///
/// Resolves to the operation's value, its error, or a [`CallTimeoutError`](crate::CallTimeoutError).
pub type PendingCall<T, E> = Pending<Result<T, CallError<E>>>;

/// Completion callback handed to an [`Operation`]
///
/// Consumed on use, so an operation completes through it at most once.
/// Every method reports whether the completion was delivered; `false` means the call
/// had already been resolved (typically by its deadline) and the value was discarded.
pub struct Callback<T, E> {
    resolver: Resolver<Result<T, CallError<E>>>,
}

impl<T, E> Callback<T, E> {
    /// Wraps the resolver of a [`PendingCall`]
    pub fn new(resolver: Resolver<Result<T, CallError<E>>>) -> Self {
        Self { resolver }
    }

    /// Completes the call with the operation's result value
    pub fn complete(self, value: T) -> bool {
        self.resolver.resolve(Ok(value))
    }

    /// Fails the call with the operation's error
    pub fn fail(self, error: E) -> bool {
        self.resolver.resolve(Err(CallError::Operation(error)))
    }

    /// Completes or fails the call depending on `result`
    pub fn finish(self, result: Result<T, E>) -> bool {
        match result {
            Ok(value) => self.complete(value),
            Err(error) => self.fail(error),
        }
    }

    /// Whether the call was already resolved
    pub fn is_resolved(&self) -> bool {
        self.resolver.is_resolved()
    }
}

impl<T, E> Debug for Callback<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// A synchronous, callback-accepting unit of work bound to its arguments
///
/// `invoke` runs on a blocking thread. It may complete the callback before returning or hand
/// it to something that completes it later. An `Err` returned from `invoke` fails the call
/// immediately, unless the callback already resolved it.
pub trait Operation: Send + 'static {
    /// Value passed to the callback on success
    type Output: Send + 'static;
    /// Error the operation fails with
    type Error: Send + 'static;

    /// Name used in timeout errors and logs
    fn name(&self) -> &str;

    /// Runs the operation, injecting the completion callback
    fn invoke(self, callback: Callback<Self::Output, Self::Error>) -> Result<(), Self::Error>;
}

/// An [`Operation`] made from a name and a closure
///
/// Built with [`operation`].
pub struct FnOperation<F, T, E> {
    name: Cow<'static, str>,
    invoke: F,
    _result: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> Debug for FnOperation<F, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOperation").field("name", &self.name).finish()
    }
}

/// Binds a closure and its captured arguments into a named [`Operation`]
///
/// ```
/// use kube_bridge_core::{operation, Operation};
///
/// let op = operation("read_answer", |callback| {
///     callback.complete(42);
///     Ok::<_, std::io::Error>(())
/// });
/// assert_eq!(op.name(), "read_answer");
/// ```
pub fn operation<T, E, F>(name: impl Into<Cow<'static, str>>, invoke: F) -> FnOperation<F, T, E>
where
    F: FnOnce(Callback<T, E>) -> Result<(), E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    FnOperation {
        name: name.into(),
        invoke,
        _result: PhantomData,
    }
}

impl<F, T, E> Operation for FnOperation<F, T, E>
where
    F: FnOnce(Callback<T, E>) -> Result<(), E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Error = E;
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(self, callback: Callback<T, E>) -> Result<(), E> {
        (self.invoke)(callback)
    }
}
