use super::slots::{Resolved, Slots};
use super::AsyncZip as AsyncZipTrait;
use super::{Config, Fetch, Length, Row, YieldWhen, ZipError};
use crate::schedule::{Inline, Schedule};
use crate::utils::WakerVec;

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::collections::VecDeque;

use futures_core::stream::{FusedStream, Stream};
use futures_core::TryStream;
use futures_lite::ready;
use pin_project::pin_project;
use tracing::debug;

/// Where the merge is between two pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// The previous step emitted; the next pull starts a new step.
    Running,
    /// A step is in progress and its wait condition does not hold yet.
    Draining,
    /// A shortest zip ran out; in-flight fetches are being cancelled.
    Stopping,
    /// Every input is exhausted, or the merge was stopped.
    Done,
}

/// A stream that aggregates multiple fallible streams into rows.
///
/// This `struct` is created by the [`async_zip`] and [`async_zip_with`]
/// methods on the [`AsyncZip`] trait. See its documentation for more.
///
/// Every pull runs one step: each active input that has no fetch in flight
/// gets one, then the merge waits until the configured [`YieldWhen`]
/// condition holds and emits the row. The stream ends once every input is
/// exhausted (or, for [`Length::Shortest`], once any input is). In the
/// latter case the fetches still in flight are cancelled, and the end is only
/// signalled once each of them has stopped.
///
/// Failures are not fatal. A failing input is retired and its [`ZipError`] is
/// emitted on its own, after the row of the step it happened in.
///
/// Dropping the stream drops every fetch still in flight. Use
/// [`cancel`][AsyncZip::cancel] to also wait until each of them has stopped.
///
/// [`async_zip`]: trait.AsyncZip.html#method.async_zip
/// [`async_zip_with`]: trait.AsyncZip.html#method.async_zip_with
/// [`AsyncZip`]: crate::stream::AsyncZip
#[must_use = "streams do nothing unless polled"]
#[pin_project]
pub struct AsyncZip<S, Sch = Inline>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    #[pin]
    slots: Slots<S, Sch::Task>,
    scheduler: Sch,
    yield_when: YieldWhen,
    length: Length,
    wakers: WakerVec,
    /// Slots that resolved with a value during the current step, in
    /// resolution order.
    resolved: Vec<usize>,
    failures: VecDeque<ZipError<S::Error>>,
    phase: Phase,
}

impl<S, Sch> AsyncZip<S, Sch>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    pub(crate) fn new(streams: Vec<S>, config: Config<Sch>) -> Self {
        let len = streams.len();
        Self {
            slots: Slots::new(streams),
            scheduler: config.scheduler,
            yield_when: config.yield_when,
            length: config.length,
            wakers: WakerVec::new(len),
            resolved: Vec::with_capacity(len),
            failures: VecDeque::new(),
            phase: Phase::Running,
        }
    }

    /// Number of inputs that can still produce values.
    pub fn active(&self) -> usize {
        match self.phase {
            Phase::Stopping | Phase::Done => 0,
            _ => self.slots.active(),
        }
    }

    /// Stop the merge.
    ///
    /// Cancels every fetch still in flight and resolves once each of them has
    /// acknowledged, after which every input has been dropped. The stream
    /// yields `None` from then on; failures that were not emitted yet are
    /// discarded.
    pub fn cancel(self: Pin<&mut Self>) -> Cancel<'_, S, Sch> {
        Cancel { zip: self }
    }

    /// Poll-based version of [`cancel`][Self::cancel].
    pub fn poll_cancel(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.project();
        ready!(this.slots.poll_cancel(cx));

        this.wakers.readiness().lock().unwrap().clear_all_ready();
        this.resolved.clear();
        this.failures.clear();
        if *this.phase != Phase::Done {
            debug!("merge cancelled");
            *this.phase = Phase::Done;
        }
        Poll::Ready(())
    }
}

impl<S, Sch> fmt::Debug for AsyncZip<S, Sch>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.states().iter()).finish()
    }
}

/// Start a fetch for the slot at `index` if it needs one, and make sure the
/// next scan polls it.
fn issue<S, Sch>(
    slots: Pin<&mut Slots<S, Sch::Task>>,
    scheduler: &Sch,
    wakers: &WakerVec,
    index: usize,
) where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    if slots.ensure_pending(index, scheduler) {
        wakers.readiness().lock().unwrap().set_ready(index);
    }
}

impl<S, Sch> Stream for AsyncZip<S, Sch>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    type Item = Result<Row<S::Ok>, ZipError<S::Error>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        let len = this.slots.len();

        // The end of a shortest zip is only signalled once every input has
        // been released.
        if *this.phase == Phase::Stopping {
            ready!(this.slots.as_mut().poll_cancel(cx));
            debug!(inputs = len, "merge finished");
            *this.phase = Phase::Done;
        }

        // Failures from an earlier step go out before anything else.
        if let Some(err) = this.failures.pop_front() {
            return Poll::Ready(Some(Err(err)));
        }
        if *this.phase == Phase::Done {
            return Poll::Ready(None);
        }
        if this.slots.active() == 0 {
            debug!(inputs = len, "merge finished");
            *this.phase = Phase::Done;
            return Poll::Ready(None);
        }

        if *this.phase == Phase::Running {
            for index in 0..len {
                issue(this.slots.as_mut(), this.scheduler, this.wakers, index);
            }
            *this.phase = Phase::Draining;
        }

        let stop_on_exhaustion =
            *this.yield_when == YieldWhen::AllCompleted && *this.length == Length::Shortest;
        let mut stopped = false;

        let mut readiness = this.wakers.readiness().lock().unwrap();
        readiness.set_waker(cx.waker());
        for index in 0..len {
            if !readiness.any_ready() {
                break;
            }
            if !readiness.clear_ready(index) || !this.slots.state(index).is_pending() {
                continue;
            }

            // unlock readiness so we don't deadlock when polling
            drop(readiness);

            let Some(waker) = this.wakers.get(index) else {
                unreachable!("one waker per slot");
            };
            let mut cx = Context::from_waker(waker);
            let resolved = this.slots.as_mut().poll_resolve(index, &mut cx);

            // Lock readiness so we can use it again
            readiness = this.wakers.readiness().lock().unwrap();

            match resolved {
                Poll::Pending => {}
                Poll::Ready(Resolved::Value) => this.resolved.push(index),
                Poll::Ready(Resolved::End) => stopped = stop_on_exhaustion,
                Poll::Ready(Resolved::Failure(err)) => {
                    this.failures.push_back(err);
                    stopped = stop_on_exhaustion;
                }
            }
            if stopped {
                break;
            }
        }
        drop(readiness);

        if stopped {
            // The row can never be completed: cancel every fetch in flight
            // and drop everything fetched so far.
            this.resolved.clear();
            this.wakers.readiness().lock().unwrap().clear_all_ready();
            *this.phase = Phase::Stopping;
            ready!(this.slots.as_mut().poll_cancel(cx));
            debug!(inputs = len, "merge finished");
            *this.phase = Phase::Done;
            return Poll::Ready(this.failures.pop_front().map(Err));
        }

        let row = match this.yield_when {
            YieldWhen::FirstCompleted if !this.resolved.is_empty() => {
                let mut entries = Vec::with_capacity(this.resolved.len());
                for index in this.resolved.drain(..) {
                    if let Some(value) = this.slots.as_mut().take_value(index) {
                        entries.push((index, value));
                    }
                }
                Some(entries)
            }
            YieldWhen::AllCompleted if !this.resolved.is_empty() && this.slots.all_ready() => {
                this.resolved.clear();
                let mut entries = Vec::with_capacity(len);
                for index in 0..len {
                    if let Some(value) = this.slots.as_mut().take_value(index) {
                        entries.push((index, value));
                    }
                }
                Some(entries)
            }
            _ => None,
        };

        if let Some(entries) = row {
            // Fetch the next value of every input that just contributed, so
            // executor-backed units make progress before the next pull.
            for &(index, _) in &entries {
                issue(this.slots.as_mut(), this.scheduler, this.wakers, index);
            }
            *this.phase = Phase::Running;
            return Poll::Ready(Some(Ok(Row::new(entries))));
        }

        if let Some(err) = this.failures.pop_front() {
            *this.phase = Phase::Running;
            return Poll::Ready(Some(Err(err)));
        }

        if this.slots.active() == 0 {
            debug!(inputs = len, "merge finished");
            *this.phase = Phase::Done;
            return Poll::Ready(None);
        }

        Poll::Pending
    }
}

impl<S, Sch> FusedStream for AsyncZip<S, Sch>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    fn is_terminated(&self) -> bool {
        self.phase == Phase::Done && self.failures.is_empty()
    }
}

/// Future for the [`cancel`][AsyncZip::cancel] method.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Cancel<'a, S, Sch>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    zip: Pin<&'a mut AsyncZip<S, Sch>>,
}

impl<S, Sch> fmt::Debug for Cancel<'_, S, Sch>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cancel").field(&*self.zip).finish()
    }
}

impl<S, Sch> Future for Cancel<'_, S, Sch>
where
    S: TryStream + Unpin,
    Sch: Schedule<Fetch<S>>,
{
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.zip.as_mut().poll_cancel(cx)
    }
}

impl<S> AsyncZipTrait for Vec<S>
where
    S: TryStream + Unpin,
{
    type Input = S;

    fn async_zip_with<Sch>(self, config: Config<Sch>) -> AsyncZip<S, Sch>
    where
        Sch: Schedule<Fetch<S>>,
    {
        AsyncZip::new(self, config)
    }
}
