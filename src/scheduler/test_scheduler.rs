//! A virtual clock for tests of `timer`, `interval`, `delay` and
//! `from_future`. Time stands still until a test moves it.
//!
//! # Usage
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxstream::prelude::*;
//!
//! TestScheduler::init();
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! observable::of(42)
//!   .delay(Duration::from_millis(100), TestScheduler)
//!   .subscribe(move |v| c_seen.borrow_mut().push(v));
//!
//! TestScheduler::advance_by(Duration::from_millis(99));
//! assert!(seen.borrow().is_empty());
//! TestScheduler::advance_by(Duration::from_millis(1));
//! assert_eq!(*seen.borrow(), vec![42]);
//! ```
//!
//! The clock and the queue are thread-local: tests running in parallel on
//! different harness threads never see each other's tasks.

use std::{
  cell::RefCell,
  cmp::Ordering,
  collections::BinaryHeap,
  future::Future,
  rc::Rc,
};

use futures::{
  executor::{LocalPool, LocalSpawner},
  task::LocalSpawnExt,
};

use super::{abortable_task, Duration, Scheduler, TaskHandle};
use crate::subscription::SubscriptionLike;

#[derive(Default)]
struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  task: Box<dyn FnOnce()>,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // BinaryHeap is a max-heap: reversed so the earliest, then oldest, pops first.
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

thread_local! {
  static TEST_SCHEDULER_STATE: RefCell<TestSchedulerState>
    = RefCell::new(TestSchedulerState::default());
  static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
  static SPAWNER: RefCell<LocalSpawner>
    = RefCell::new(POOL.with(|pool| pool.borrow().spawner()));
}

/// Handle to this thread's virtual clock; every value is interchangeable.
///
/// Spawned futures run on a thread-local `LocalPool` that is drained every
/// time the clock moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct TestScheduler;

impl TestScheduler {
  /// Reset the virtual time to zero and drop every pending task.
  ///
  /// Call it at the start of each test.
  pub fn init() {
    TEST_SCHEDULER_STATE.with(|state| {
      let mut state = state.borrow_mut();
      state.virtual_time = Duration::ZERO;
      state.task_queue.clear();
      state.next_task_id = 0;
    });
    let pool = LocalPool::new();
    SPAWNER.with(|spawner| *spawner.borrow_mut() = pool.spawner());
    POOL.with(|old| *old.borrow_mut() = pool);
  }

  /// The current virtual time.
  pub fn now() -> Duration {
    TEST_SCHEDULER_STATE.with(|state| state.borrow().virtual_time)
  }

  /// Number of timed tasks waiting in the queue, cancelled ones included.
  pub fn pending_count() -> usize {
    TEST_SCHEDULER_STATE.with(|state| state.borrow().task_queue.len())
  }

  pub fn is_empty() -> bool {
    TEST_SCHEDULER_STATE.with(|state| state.borrow().task_queue.is_empty())
  }

  /// Advance virtual time by `duration`, running every task that falls due
  /// on the way, in time order and FIFO within the same instant.
  pub fn advance_by(duration: Duration) {
    let target_time = Self::now() + duration;
    tracing::trace!(?target_time, "advance virtual time");
    Self::execute_tasks_until(Some(target_time));
    TEST_SCHEDULER_STATE.with(|state| {
      state.borrow_mut().virtual_time = target_time;
    });
  }

  /// Run every pending task, moving the clock to each one's time.
  ///
  /// A repeating task keeps rescheduling itself, so with an `interval` still
  /// subscribed this never returns. Use `advance_by` for those.
  pub fn flush() { Self::execute_tasks_until(None); }

  fn run_spawned() { POOL.with(|pool| pool.borrow_mut().run_until_stalled()); }

  fn execute_tasks_until(target_time: Option<Duration>) {
    loop {
      Self::run_spawned();
      let task = TEST_SCHEDULER_STATE.with(|state| {
        let mut state = state.borrow_mut();
        let due = state.task_queue.peek().is_some_and(|peek| {
          target_time.map_or(true, |limit| peek.scheduled_time <= limit)
        });
        if !due {
          return None;
        }
        let scheduled_task = state.task_queue.pop()?;
        state.virtual_time = scheduled_task.scheduled_time;
        Some(scheduled_task)
      });

      let Some(scheduled_task) = task else {
        break;
      };
      if !scheduled_task.handle.is_closed() {
        (scheduled_task.task)();
      }
    }
  }

  fn push(delay: Duration, handle: TaskHandle, task: Box<dyn FnOnce()>) {
    TEST_SCHEDULER_STATE.with(|state| {
      let mut state = state.borrow_mut();
      let scheduled_time = state.virtual_time + delay;
      let task_id = state.next_task_id;
      tracing::trace!(task_id, ?scheduled_time, "task scheduled");
      state.next_task_id += 1;
      state.task_queue.push(ScheduledTask { scheduled_time, task_id, task, handle });
    });
  }

  fn push_repeating<T>(
    task: Rc<RefCell<T>>, count: usize, delay: Duration, period: Duration,
    handle: TaskHandle,
  ) where
    T: FnMut(usize) + 'static,
  {
    let c_handle = handle.clone();
    Self::push(
      delay,
      handle,
      Box::new(move || {
        (&mut *task.borrow_mut())(count);
        if !c_handle.is_closed() {
          Self::push_repeating(task, count + 1, period, period, c_handle);
        }
      }),
    );
  }
}

impl Scheduler for TestScheduler {
  fn spawn<Fut>(&self, future: Fut) -> TaskHandle
  where
    Fut: Future<Output = ()> + 'static,
  {
    let (future, handle) = abortable_task(future);
    let spawned = SPAWNER.with(|spawner| spawner.borrow().spawn_local(future));
    match spawned {
      Ok(()) => handle,
      Err(err) => {
        tracing::error!(%err, "test scheduler refused a task");
        TaskHandle::finished()
      }
    }
  }

  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + 'static,
  {
    let handle = TaskHandle::new();
    let finished = handle.clone();
    Self::push(
      delay.unwrap_or(Duration::ZERO),
      handle.clone(),
      Box::new(move || {
        task();
        finished.mark_finished();
      }),
    );
    handle
  }

  fn schedule_repeating<T>(
    &self, task: T, period: Duration, initial_delay: Option<Duration>,
  ) -> TaskHandle
  where
    T: FnMut(usize) + 'static,
  {
    let handle = TaskHandle::new();
    Self::push_repeating(
      Rc::new(RefCell::new(task)),
      0,
      initial_delay.unwrap_or(period),
      period,
      handle.clone(),
    );
    handle
  }
}
