use std::future::Future;

use super::{abortable_task, Duration, Scheduler, TaskHandle};

/// Runs tasks with `tokio::task::spawn_local`.
///
/// Every call must happen inside a `tokio::task::LocalSet`, which is what
/// keeps the non-`Send` stream state on one thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioLocalScheduler;

impl Scheduler for TokioLocalScheduler {
  fn spawn<Fut>(&self, future: Fut) -> TaskHandle
  where
    Fut: Future<Output = ()> + 'static,
  {
    let (future, handle) = abortable_task(future);
    tokio::task::spawn_local(future);
    handle
  }

  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + 'static,
  {
    self.spawn(async move {
      if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
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
      tokio::time::sleep(initial_delay.unwrap_or(period)).await;
      let mut count = 0;
      loop {
        task(count);
        count += 1;
        tokio::time::sleep(period).await;
      }
    })
  }
}
