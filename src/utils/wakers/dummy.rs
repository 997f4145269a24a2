use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::Wake;

/// A waker that only counts how often it was woken.
#[derive(Debug, Default)]
pub(crate) struct DummyWaker {
    woken: AtomicUsize,
}

impl DummyWaker {
    pub(crate) fn count(&self) -> usize {
        self.woken.load(Ordering::SeqCst)
    }
}

impl Wake for DummyWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.woken.fetch_add(1, Ordering::SeqCst);
    }
}
