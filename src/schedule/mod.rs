//! Where the pending units of a merge run.
//!
//! Every input of an [`AsyncZip`][crate::vec::AsyncZip] has at most one
//! fetch in flight. That fetch is a *task*: a unit of work started by a
//! [`Schedule`] implementation, which the merge polls for its result and can
//! cancel.
//!
//! The scheduler is handed to the merge explicitly through its
//! [`Config`][crate::stream::Config]; nothing is looked up from ambient state.
//!
//! - [`Inline`] (the default) drives each fetch in place, from the task that
//!   polls the merged stream.
#![cfg_attr(
    feature = "spawn",
    doc = "- [`Executor`] and [`LocalExecutor`] spawn each fetch onto an executor, so inputs keep\n  making progress while the consumer is not pulling."
)]

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_lite::ready;
use pin_project::pin_project;

#[cfg(feature = "spawn")]
mod spawn;

#[cfg(feature = "spawn")]
pub use spawn::{Executor, LocalExecutor, Spawned};

/// A started, cancellable unit of work.
///
/// Polling a task resolves to `Some(output)` once the work has finished, or
/// to `None` if the work was dropped before it could finish (for example
/// because its executor shut down).
pub trait Task: Future {
    /// Cancel the task.
    ///
    /// Requests cancellation and resolves once the task has stopped running
    /// and released everything it owned. A task that already finished
    /// acknowledges immediately; its output is dropped.
    fn poll_cancel(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()>;
}

/// Starts the pending units of a merge.
pub trait Schedule<F: Future> {
    /// The handle to a started unit.
    type Task: Task<Output = Option<F::Output>>;

    /// Start a new unit of work running `future`.
    fn start(&self, future: F) -> Self::Task;
}

/// Drive every unit in place, on the task that polls the merged stream.
///
/// Units only make progress while the merged stream is being polled.
/// Cancelling a unit drops it on the spot.
#[derive(Debug, Default, Clone, Copy)]
pub struct Inline;

impl<F: Future> Schedule<F> for Inline {
    type Task = InlineTask<F>;

    fn start(&self, future: F) -> Self::Task {
        InlineTask {
            future: Some(future),
        }
    }
}

/// A unit of work driven in place.
///
/// This `struct` is created by the [`Inline`] scheduler.
#[derive(Debug)]
#[pin_project]
#[must_use = "tasks do nothing unless polled"]
pub struct InlineTask<F> {
    #[pin]
    future: Option<F>,
}

impl<F: Future> Future for InlineTask<F> {
    type Output = Option<F::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        match this.future.as_mut().as_pin_mut() {
            Some(future) => {
                let output = ready!(future.poll(cx));
                this.future.set(None);
                Poll::Ready(Some(output))
            }
            // Cancelled, or polled after completion.
            None => Poll::Ready(None),
        }
    }
}

impl<F: Future> Task for InlineTask<F> {
    fn poll_cancel(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        self.project().future.set(None);
        Poll::Ready(())
    }
}
