//! Host timer facility for time-based sources.
//!
//! Synchronous producers never touch a scheduler. `timer`, `interval`,
//! `delay` and `from_future` register their work here and resume on the same
//! logical thread when it is due.

use std::{
  cell::{Cell, RefCell},
  future::Future,
  rc::Rc,
};

use futures::future::AbortHandle;
pub use std::time::Duration;

use crate::subscription::SubscriptionLike;

mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioLocalScheduler;

/// A Scheduler orders tasks and runs them when they are due.
pub trait Scheduler: Clone + 'static {
  /// Drive `future` to completion on this scheduler.
  fn spawn<Fut>(&self, future: Fut) -> TaskHandle
  where
    Fut: Future<Output = ()> + 'static;

  /// Run `task` once, after `delay` if one is given.
  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + 'static;

  /// Run `task` every `period`, the first time after `initial_delay` (or one
  /// `period` when it is `None`). The task receives a run counter starting
  /// at zero. It only stops when the handle is unsubscribed.
  fn schedule_repeating<T>(
    &self, task: T, period: Duration, initial_delay: Option<Duration>,
  ) -> TaskHandle
  where
    T: FnMut(usize) + 'static;
}

/// Handle of one scheduled task.
///
/// Unsubscribing guarantees no further run of the task. A handle whose task
/// has run to completion reports itself closed.
#[derive(Clone, Debug, Default)]
pub struct TaskHandle(Rc<TaskState>);

#[derive(Debug, Default)]
struct TaskState {
  closed: Cell<bool>,
  abort: RefCell<Option<AbortHandle>>,
}

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  /// A handle for a task that has nothing left to run.
  pub fn finished() -> Self {
    let handle = Self::default();
    handle.mark_finished();
    handle
  }

  pub(crate) fn abortable(abort: AbortHandle) -> Self {
    let handle = Self::default();
    *handle.0.abort.borrow_mut() = Some(abort);
    handle
  }

  pub(crate) fn mark_finished(&self) {
    self.0.closed.set(true);
    self.0.abort.borrow_mut().take();
  }
}

impl SubscriptionLike for TaskHandle {
  fn unsubscribe(&mut self) {
    if self.0.closed.replace(true) {
      return;
    }
    tracing::trace!("scheduled task cancelled");
    if let Some(abort) = self.0.abort.borrow_mut().take() {
      abort.abort();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.closed.get() }
}

/// Wrap `future` so the returned handle can abort it, and mark the handle
/// finished when the future completes.
pub(crate) fn abortable_task<Fut>(
  future: Fut,
) -> (impl Future<Output = ()> + 'static, TaskHandle)
where
  Fut: Future<Output = ()> + 'static,
{
  use futures::FutureExt;

  let (future, abort) = futures::future::abortable(future);
  let handle = TaskHandle::abortable(abort);
  let finished = handle.clone();
  (future.map(move |_| finished.mark_finished()), handle)
}

#[cfg(feature = "timer")]
mod local_spawner {
  use futures::{executor::LocalSpawner, task::LocalSpawnExt, FutureExt};

  use super::*;

  fn sleep(duration: Duration) -> impl Future<Output = ()> {
    futures_time::task::sleep(duration.into()).map(|_| ())
  }

  impl Scheduler for LocalSpawner {
    fn spawn<Fut>(&self, future: Fut) -> TaskHandle
    where
      Fut: Future<Output = ()> + 'static,
    {
      let (future, handle) = abortable_task(future);
      match self.spawn_local(future) {
        Ok(()) => handle,
        Err(err) => {
          tracing::error!(%err, "local executor refused a task");
          TaskHandle::finished()
        }
      }
    }

    fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
    where
      T: FnOnce() + 'static,
    {
      self.spawn(async move {
        if let Some(delay) = delay {
          sleep(delay).await;
        }
        task();
      })
    }

    fn schedule_repeating<T>(
      &self, mut task: T, period: Duration, initial_delay: Option<Duration>,
    ) -> TaskHandle
    where
      T: FnMut(usize) + 'static,
    {
      self.spawn(async move {
        sleep(initial_delay.unwrap_or(period)).await;
        let mut count = 0;
        loop {
          task(count);
          count += 1;
          sleep(period).await;
        }
      })
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::rc::Rc;

  #[test]
  fn unsubscribe_and_finish() {
    let mut handle = TaskHandle::new();
    assert!(!handle.is_closed());
    handle.unsubscribe();
    assert!(handle.is_closed());
    assert!(TaskHandle::finished().is_closed());
  }

  #[cfg(feature = "timer")]
  #[test]
  fn local_spawner_schedule() {
    use futures::executor::LocalPool;

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let hit = Rc::new(Cell::new(0));
    let c_hit = hit.clone();
    let handle =
      spawner.schedule(move || c_hit.set(1), Some(Duration::from_millis(1)));
    let c_hit = hit.clone();
    let mut cancelled =
      spawner.schedule(move || c_hit.set(2), Some(Duration::from_millis(5)));
    cancelled.unsubscribe();

    pool.run();
    assert_eq!(hit.get(), 1);
    assert!(handle.is_closed());
  }

  #[cfg(feature = "timer")]
  #[test]
  fn local_spawner_repeating() {
    use futures::executor::LocalPool;

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let ticks = Rc::new(RefCell::new(vec![]));
    let c_ticks = ticks.clone();
    let handle = Rc::new(RefCell::new(None::<TaskHandle>));
    let c_handle = handle.clone();
    let task = spawner.schedule_repeating(
      move |i| {
        c_ticks.borrow_mut().push(i);
        if i == 2 {
          if let Some(h) = c_handle.borrow_mut().as_mut() {
            h.unsubscribe();
          }
        }
      },
      Duration::from_millis(1),
      None,
    );
    *handle.borrow_mut() = Some(task);

    pool.run();
    assert_eq!(*ticks.borrow(), vec![0, 1, 2]);
  }
}
