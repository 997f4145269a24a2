use std::sync::{Arc, Mutex};
use std::task::Wake;

use super::ReadinessVec;

/// A waker handed to the pending unit of a single slot.
///
/// Waking it marks the slot as ready and forwards the wake-up to the task
/// that polls the merged stream.
#[derive(Debug, Clone)]
pub(crate) struct SlotWaker {
    pub(crate) index: usize,
    pub(crate) readiness: Arc<Mutex<ReadinessVec>>,
}

impl SlotWaker {
    /// Create a new instance of `SlotWaker`.
    pub(crate) fn new(index: usize, readiness: Arc<Mutex<ReadinessVec>>) -> Self {
        Self { index, readiness }
    }
}

impl Wake for SlotWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref()
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let mut readiness = self.readiness.lock().unwrap();
        if !readiness.set_ready(self.index) {
            // A spawned unit can finish before the merged stream registers
            // its waker. The readiness bit is picked up by the next poll.
            if let Some(parent) = readiness.parent_waker() {
                parent.wake_by_ref();
            }
        }
    }
}
