#![allow(dead_code)]

use futures_core::Stream;
use futures_lite::{future, stream, StreamExt};

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

pub type BoxStream<T> = Pin<Box<dyn Stream<Item = T> + Send + 'static>>;

/// An input that yields each character of `s`, right away.
pub fn letters(s: &str) -> BoxStream<Result<char, Infallible>> {
    let chars: Vec<_> = s.chars().map(Ok).collect();
    Box::pin(stream::iter(chars))
}

/// An input that yields `values`, giving up its turn `delays[i]` times
/// before producing value `i`.
pub fn delayed<T>(values: Vec<T>, delays: Vec<usize>) -> BoxStream<Result<T, Infallible>>
where
    T: Send + 'static,
{
    let steps: Vec<_> = values.into_iter().zip(delays).collect();
    Box::pin(stream::iter(steps).then(|(value, delay)| async move {
        for _ in 0..delay {
            future::yield_now().await;
        }
        Ok(value)
    }))
}

/// What a [`Counted`] input observed.
#[derive(Debug, Default)]
pub struct Stats {
    fetches: AtomicUsize,
    after_end: AtomicUsize,
    ended: AtomicBool,
    dropped: AtomicBool,
}

impl Stats {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn polled_after_end(&self) -> usize {
        self.after_end.load(Ordering::SeqCst)
    }

    pub fn is_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

/// Wraps an input and records every produce-next call made on it.
pub struct Counted<S> {
    inner: S,
    stats: Arc<Stats>,
}

pub fn counted<S>(inner: S) -> (Counted<S>, Arc<Stats>) {
    let stats = Arc::new(Stats::default());
    let counted = Counted {
        inner,
        stats: stats.clone(),
    };
    (counted, stats)
}

impl<S, T, E> Stream for Counted<S>
where
    S: Stream<Item = Result<T, E>> + Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.stats.ended.load(Ordering::SeqCst) {
            self.stats.after_end.fetch_add(1, Ordering::SeqCst);
            return Poll::Ready(None);
        }
        let item = std::task::ready!(Pin::new(&mut self.inner).poll_next(cx));
        self.stats.fetches.fetch_add(1, Ordering::SeqCst);
        if !matches!(item, Some(Ok(_))) {
            self.stats.ended.store(true, Ordering::SeqCst);
        }
        Poll::Ready(item)
    }
}

impl<S> Drop for Counted<S> {
    fn drop(&mut self) {
        self.stats.dropped.store(true, Ordering::SeqCst);
    }
}

/// An input that yields `ok` values and then fails with `error`.
pub fn failing<T>(ok: Vec<T>, error: &'static str) -> BoxStream<Result<T, &'static str>>
where
    T: Send + 'static,
{
    let items: Vec<_> = ok.into_iter().map(Ok).chain([Err(error)]).collect();
    Box::pin(stream::iter(items))
}
