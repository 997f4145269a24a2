use core::task::Waker;
use fixedbitset::FixedBitSet;

/// Tracks which slots have been woken and should be polled again.
#[derive(Debug)]
pub(crate) struct ReadinessVec {
    ready_count: usize,
    readiness_list: FixedBitSet,
    parent_waker: Option<Waker>,
}

impl ReadinessVec {
    /// Create a new instance of readiness, with every slot marked ready so
    /// the first step polls each of them once.
    pub(crate) fn new(len: usize) -> Self {
        let mut readiness_list = FixedBitSet::with_capacity(len);
        readiness_list.insert_range(..);
        Self {
            ready_count: len,
            readiness_list,
            parent_waker: None,
        }
    }

    /// Set the ready state to `true` for the given index
    ///
    /// Returns the old ready state for this index
    pub(crate) fn set_ready(&mut self, index: usize) -> bool {
        if !self.readiness_list[index] {
            self.ready_count += 1;
            self.readiness_list.insert(index);
            false
        } else {
            true
        }
    }

    /// Set the ready state to `false` for the given index
    ///
    /// Returns whether the index was previously ready
    pub(crate) fn clear_ready(&mut self, index: usize) -> bool {
        if self.readiness_list[index] {
            self.ready_count -= 1;
            self.readiness_list.set(index, false);
            true
        } else {
            false
        }
    }

    /// Forget every pending wake-up.
    pub(crate) fn clear_all_ready(&mut self) {
        self.readiness_list.clear();
        self.ready_count = 0;
    }

    /// Returns `true` if any of the slots are ready.
    pub(crate) fn any_ready(&self) -> bool {
        self.ready_count > 0
    }

    /// Access the parent waker.
    #[inline]
    pub(crate) fn parent_waker(&self) -> Option<&Waker> {
        self.parent_waker.as_ref()
    }

    /// Set the parent `Waker`. This needs to be called at the start of every
    /// `poll` function.
    pub(crate) fn set_waker(&mut self, parent_waker: &Waker) {
        match &mut self.parent_waker {
            Some(prev) => prev.clone_from(parent_waker),
            None => self.parent_waker = Some(parent_waker.clone()),
        }
    }
}
