use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::TryStream;

/// What a single produce-next call on an input resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The input produced a value.
    Value(T),
    /// The input signalled end-of-sequence.
    End,
    /// The input failed.
    Failure(E),
}

impl<T, E> From<Option<Result<T, E>>> for Outcome<T, E> {
    fn from(item: Option<Result<T, E>>) -> Self {
        match item {
            Some(Ok(value)) => Outcome::Value(value),
            Some(Err(error)) => Outcome::Failure(error),
            None => Outcome::End,
        }
    }
}

/// One in-flight produce-next call on an input.
///
/// The fetch owns its input while it runs and hands it back together with
/// the [`Outcome`], so the same input can be fetched from again later. This
/// is the work a [`Schedule`][crate::schedule::Schedule] implementation is
/// asked to start.
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Fetch<S> {
    stream: Option<S>,
}

impl<S> Fetch<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }
}

impl<S> Future for Fetch<S>
where
    S: TryStream + Unpin,
{
    type Output = (S, Outcome<S::Ok, S::Error>);

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(mut stream) = self.stream.take() else {
            panic!("`Fetch` must not be polled after completing");
        };

        match Pin::new(&mut stream).try_poll_next(cx) {
            Poll::Ready(item) => Poll::Ready((stream, item.into())),
            Poll::Pending => {
                self.stream = Some(stream);
                Poll::Pending
            }
        }
    }
}
