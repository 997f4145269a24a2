use super::{Fetch, Outcome, ZipError};
use crate::schedule::{Schedule, Task};
use crate::utils::{get_pin_mut_from_vec, iter_pin_mut_vec, SlotState};

use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::TryStream;
use pin_project::pin_project;
use tracing::{debug, trace};

/// How a slot's pending unit resolved.
#[derive(Debug)]
pub(crate) enum Resolved<E> {
    /// A value is now stored in the slot.
    Value,
    /// The input reached its end.
    End,
    /// The input failed, or its unit was lost.
    Failure(ZipError<E>),
}

/// The per-input bookkeeping of a merge.
///
/// Every slot is in exactly one of these situations: its input is parked
/// (idle), its input is owned by an in-flight task (pending), a fetched value
/// waits to be emitted (ready), or it is exhausted and owns nothing.
#[pin_project]
pub(crate) struct Slots<S, T>
where
    S: TryStream,
{
    states: Vec<SlotState>,
    parked: Vec<Option<S>>,
    values: Vec<Option<S::Ok>>,
    #[pin]
    tasks: Vec<Option<T>>,
}

impl<S, T> Slots<S, T>
where
    S: TryStream + Unpin,
    T: Task<Output = Option<(S, Outcome<S::Ok, S::Error>)>>,
{
    pub(crate) fn new(streams: Vec<S>) -> Self {
        let len = streams.len();
        Self {
            states: vec![SlotState::Idle; len],
            parked: streams.into_iter().map(Some).collect(),
            values: (0..len).map(|_| None).collect(),
            tasks: (0..len).map(|_| None).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn states(&self) -> &[SlotState] {
        &self.states
    }

    pub(crate) fn state(&self, index: usize) -> SlotState {
        self.states[index]
    }

    /// Number of slots that are not exhausted.
    pub(crate) fn active(&self) -> usize {
        self.states.iter().filter(|s| !s.is_exhausted()).count()
    }

    /// Returns `true` if every active slot holds a value.
    pub(crate) fn all_ready(&self) -> bool {
        self.states
            .iter()
            .filter(|s| !s.is_exhausted())
            .all(|s| s.is_ready())
    }

    /// Start a fetch for the slot at `index` unless it already has one, holds
    /// an unemitted value, or is exhausted.
    ///
    /// Returns `true` if a new unit was started.
    pub(crate) fn ensure_pending<Sch>(
        self: Pin<&mut Self>,
        index: usize,
        scheduler: &Sch,
    ) -> bool
    where
        Sch: Schedule<Fetch<S>, Task = T>,
    {
        let this = self.project();
        if !this.states[index].is_idle() {
            return false;
        }
        let Some(stream) = this.parked[index].take() else {
            debug_assert!(false, "idle slot {index} has no parked input");
            return false;
        };

        let task = scheduler.start(Fetch::new(stream));
        if let Some(mut slot) = get_pin_mut_from_vec(this.tasks, index) {
            slot.set(Some(task));
        }
        this.states[index].set_pending();
        trace!(index, "fetch started");
        true
    }

    /// Poll the pending unit of the slot at `index`, and resolve the slot
    /// once the unit finishes.
    pub(crate) fn poll_resolve(
        mut self: Pin<&mut Self>,
        index: usize,
        cx: &mut Context<'_>,
    ) -> Poll<Resolved<S::Error>> {
        let this = self.as_mut().project();
        let Some(mut slot) = get_pin_mut_from_vec(this.tasks, index) else {
            panic!("slot {index} out of bounds");
        };
        let Some(task) = slot.as_mut().as_pin_mut() else {
            panic!("slot {index} has no pending unit");
        };
        let Poll::Ready(output) = task.poll(cx) else {
            return Poll::Pending;
        };
        slot.set(None);
        Poll::Ready(self.resolve(index, output))
    }

    /// Record how the unit of the slot at `index` finished.
    ///
    /// `None` means the unit was dropped by its scheduler, which retires the
    /// slot like a failure.
    pub(crate) fn resolve(
        self: Pin<&mut Self>,
        index: usize,
        output: Option<(S, Outcome<S::Ok, S::Error>)>,
    ) -> Resolved<S::Error> {
        let this = self.project();
        match output {
            Some((stream, Outcome::Value(value))) => {
                this.parked[index] = Some(stream);
                this.values[index] = Some(value);
                this.states[index].set_ready();
                Resolved::Value
            }
            Some((_, Outcome::End)) => {
                this.states[index].set_exhausted();
                debug!(index, "input exhausted");
                Resolved::End
            }
            Some((_, Outcome::Failure(error))) => {
                this.states[index].set_failed();
                debug!(index, "input failed");
                Resolved::Failure(ZipError::Input { index, error })
            }
            None => {
                this.states[index].set_failed();
                debug!(index, "fetch unit dropped by its scheduler");
                Resolved::Failure(ZipError::Dropped { index })
            }
        }
    }

    /// Take the value stored in the slot at `index`, leaving the slot idle.
    pub(crate) fn take_value(self: Pin<&mut Self>, index: usize) -> Option<S::Ok> {
        let this = self.project();
        let value = this.values[index].take()?;
        this.states[index].set_idle();
        Some(value)
    }

    /// Retire every slot right away: pending units are dropped, parked
    /// inputs and stored values are released.
    pub(crate) fn release(self: Pin<&mut Self>) {
        let this = self.project();
        for mut task in iter_pin_mut_vec(this.tasks) {
            task.set(None);
        }
        this.parked.iter_mut().for_each(|stream| *stream = None);
        this.values.iter_mut().for_each(|value| *value = None);
        this.states.iter_mut().for_each(SlotState::set_exhausted);
    }

    /// Cancel every pending unit and wait for each of them to acknowledge,
    /// then release every slot.
    pub(crate) fn poll_cancel(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.as_mut().project();
        let mut waiting = false;
        for mut slot in iter_pin_mut_vec(this.tasks) {
            let Some(task) = slot.as_mut().as_pin_mut() else {
                continue;
            };
            match task.poll_cancel(cx) {
                Poll::Ready(()) => slot.set(None),
                Poll::Pending => waiting = true,
            }
        }

        if waiting {
            return Poll::Pending;
        }
        self.release();
        Poll::Ready(())
    }
}
