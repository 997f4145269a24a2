/// Enumerate the bookkeeping state of a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum SlotState {
    /// The input is parked in its slot and no fetch is in flight.
    Idle,
    /// A fetch unit is in flight for this input.
    Pending,
    /// A value has been fetched and is waiting to be emitted.
    Ready,
    /// The input reached its end, or the merge stopped using it.
    Exhausted,
    /// The input failed. It is never queried again.
    Failed,
}

impl SlotState {
    /// Returns `true` if the state is [`Idle`][Self::Idle].
    #[must_use]
    #[inline]
    pub(crate) fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` if the state is [`Pending`][Self::Pending].
    #[must_use]
    #[inline]
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if the state is [`Ready`][Self::Ready].
    #[must_use]
    #[inline]
    pub(crate) fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` once the slot will never be fetched from again.
    #[must_use]
    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed)
    }

    /// Sets the state to [`Idle`][Self::Idle].
    #[inline]
    pub(crate) fn set_idle(&mut self) {
        debug_assert!(!self.is_exhausted(), "exhausted slots stay exhausted");
        *self = SlotState::Idle;
    }

    /// Sets the state to [`Pending`][Self::Pending].
    #[inline]
    pub(crate) fn set_pending(&mut self) {
        debug_assert!(!self.is_exhausted(), "exhausted slots stay exhausted");
        *self = SlotState::Pending;
    }

    /// Sets the state to [`Ready`][Self::Ready].
    #[inline]
    pub(crate) fn set_ready(&mut self) {
        *self = SlotState::Ready;
    }

    /// Sets the state to [`Exhausted`][Self::Exhausted], unless the slot
    /// already failed.
    #[inline]
    pub(crate) fn set_exhausted(&mut self) {
        if !matches!(self, Self::Failed) {
            *self = SlotState::Exhausted;
        }
    }

    /// Sets the state to [`Failed`][Self::Failed].
    #[inline]
    pub(crate) fn set_failed(&mut self) {
        *self = SlotState::Failed;
    }
}
