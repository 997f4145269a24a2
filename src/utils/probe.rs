use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;

/// One scripted reaction of a [`Probe`] to a produce-next call.
#[derive(Debug)]
pub(crate) enum Step<T, E> {
    /// Yield this value.
    Value(T),
    /// Fail with this error.
    Fail(E),
    /// Return `Pending` once, waking ourselves right away.
    Yield,
    /// Return `Pending` without ever waking up again.
    Stall,
}

/// What a [`Probe`] observed while being driven.
#[derive(Debug, Default)]
pub(crate) struct Stats {
    fetches: AtomicUsize,
    after_end: AtomicUsize,
    ended: AtomicBool,
    dropped: AtomicBool,
}

impl Stats {
    /// Number of produce-next calls that resolved.
    pub(crate) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of polls received after the probe reported its end or failure.
    pub(crate) fn polled_after_end(&self) -> usize {
        self.after_end.load(Ordering::SeqCst)
    }

    pub(crate) fn is_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

/// A scripted input that records how it is driven.
#[derive(Debug)]
pub(crate) struct Probe<T, E> {
    steps: VecDeque<Step<T, E>>,
    stats: Arc<Stats>,
}

impl<T, E> Probe<T, E> {
    pub(crate) fn new(steps: impl IntoIterator<Item = Step<T, E>>) -> (Self, Arc<Stats>) {
        let stats = Arc::new(Stats::default());
        let probe = Self {
            steps: steps.into_iter().collect(),
            stats: stats.clone(),
        };
        (probe, stats)
    }

    /// A probe that yields every value right away, then ends.
    pub(crate) fn values(values: impl IntoIterator<Item = T>) -> (Self, Arc<Stats>) {
        Self::new(values.into_iter().map(Step::Value))
    }
}

impl<T, E> Unpin for Probe<T, E> {}

impl<T, E> Stream for Probe<T, E> {
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.stats.ended.load(Ordering::SeqCst) {
            self.stats.after_end.fetch_add(1, Ordering::SeqCst);
            return Poll::Ready(None);
        }

        let item = match self.steps.pop_front() {
            Some(Step::Yield) => {
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            Some(Step::Stall) => {
                self.steps.push_front(Step::Stall);
                return Poll::Pending;
            }
            Some(Step::Value(value)) => Some(Ok(value)),
            Some(Step::Fail(error)) => {
                self.stats.ended.store(true, Ordering::SeqCst);
                Some(Err(error))
            }
            None => {
                self.stats.ended.store(true, Ordering::SeqCst);
                None
            }
        };
        self.stats.fetches.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(item)
    }
}

impl<T, E> Drop for Probe<T, E> {
    fn drop(&mut self) {
        self.stats.dropped.store(true, Ordering::SeqCst);
    }
}
