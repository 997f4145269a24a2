use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_channel::oneshot;
use futures_util::future::{AbortHandle, Abortable};
use futures_util::task::{LocalSpawn, LocalSpawnExt, Spawn, SpawnExt};
use tracing::warn;

use super::{Schedule, Task};

/// Spawn every unit onto a thread-safe executor.
///
/// Units keep running in the background between pulls, so the next value of
/// every input is fetched while the consumer is busy with the previous row.
///
/// Dropping the merged stream aborts every unit but cannot wait for them, so
/// an input may outlive the stream until its executor next runs. Await
/// [`cancel`][crate::vec::AsyncZip::cancel] first to be sure every input has
/// been dropped.
///
/// # Examples
///
/// ```
/// use asynczip::prelude::*;
/// use asynczip::schedule::Executor;
/// use asynczip::stream::{Config, ALL_COMPLETED};
/// use futures::executor::LocalPool;
/// use futures_lite::{stream, StreamExt};
///
/// let mut pool = LocalPool::new();
/// let config = Config::new()
///     .yield_when(ALL_COMPLETED)
///     .scheduler(Executor::new(pool.spawner()));
///
/// let a = stream::iter(vec![Ok::<_, ()>(1), Ok(2)]);
/// let b = stream::iter(vec![Ok::<_, ()>(3), Ok(4)]);
/// let mut s = vec![a, b].async_zip_with(config);
///
/// pool.run_until(async {
///     let row = s.next().await.unwrap().unwrap();
///     assert_eq!(row.into_values(), vec![1, 3]);
/// });
/// ```
#[derive(Debug, Clone)]
pub struct Executor<Sp> {
    spawner: Sp,
}

impl<Sp: Spawn> Executor<Sp> {
    /// Bind units to `spawner`.
    pub fn new(spawner: Sp) -> Self {
        Self { spawner }
    }
}

impl<Sp, F> Schedule<F> for Executor<Sp>
where
    Sp: Spawn,
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    type Task = Spawned<F::Output>;

    fn start(&self, future: F) -> Self::Task {
        let (work, spawned) = Spawned::pair(future);
        if let Err(err) = self.spawner.spawn(work) {
            warn!(%err, "failed to spawn fetch unit");
        }
        spawned
    }
}

/// Spawn every unit onto a single-threaded executor.
///
/// Like [`Executor`], but inputs do not need to be `Send`.
///
/// As with [`Executor`], await [`cancel`][crate::vec::AsyncZip::cancel]
/// before dropping the merged stream to wait for every unit to stop.
#[derive(Debug, Clone)]
pub struct LocalExecutor<Sp> {
    spawner: Sp,
}

impl<Sp: LocalSpawn> LocalExecutor<Sp> {
    /// Bind units to `spawner`.
    pub fn new(spawner: Sp) -> Self {
        Self { spawner }
    }
}

impl<Sp, F> Schedule<F> for LocalExecutor<Sp>
where
    Sp: LocalSpawn,
    F: Future + 'static,
    F::Output: 'static,
{
    type Task = Spawned<F::Output>;

    fn start(&self, future: F) -> Self::Task {
        let (work, spawned) = Spawned::pair(future);
        if let Err(err) = self.spawner.spawn_local(work) {
            warn!(%err, "failed to spawn fetch unit");
        }
        spawned
    }
}

/// A unit of work running on an executor.
///
/// This `struct` is created by the [`Executor`] and [`LocalExecutor`]
/// schedulers. Dropping it aborts the work.
#[must_use = "dropping a spawned unit aborts it"]
pub struct Spawned<T> {
    abort: AbortHandle,
    receiver: oneshot::Receiver<T>,
}

impl<T> Spawned<T> {
    /// Wrap `future` so it can be aborted, and reports back to the handle.
    ///
    /// The sender is only dropped after the wrapped future has been dropped,
    /// so a resolved receiver means the work has fully stopped.
    fn pair<F>(future: F) -> (impl Future<Output = ()>, Self)
    where
        F: Future<Output = T>,
    {
        let (sender, receiver) = oneshot::channel();
        let (abort, registration) = AbortHandle::new_pair();
        let work = async move {
            if let Ok(output) = Abortable::new(future, registration).await {
                let _ = sender.send(output);
            }
        };
        (work, Self { abort, receiver })
    }
}

impl<T> fmt::Debug for Spawned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawned").finish_non_exhaustive()
    }
}

impl<T> Future for Spawned<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(Result::ok)
    }
}

impl<T> Task for Spawned<T> {
    fn poll_cancel(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.abort.abort();
        Pin::new(&mut self.receiver).poll(cx).map(|_| ())
    }
}

impl<T> Drop for Spawned<T> {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
