use std::convert::Infallible;

use crate::prelude::*;

/// Returns an observable which emits `0` once `delay` has passed on
/// `scheduler`.
///
/// Without a `period` it completes right after. With one it keeps emitting
/// `1, 2, 3, ...` every `period` and never completes by itself.
pub fn timer<S>(delay: Duration, period: Option<Duration>, scheduler: S) -> TimerObservable<S> {
  TimerObservable { delay, period, scheduler }
}

#[derive(Clone)]
pub struct TimerObservable<S> {
  pub(crate) delay: Duration,
  pub(crate) period: Option<Duration>,
  pub(crate) scheduler: S,
}

impl<S: Scheduler> Observable for TimerObservable<S> {
  type Item = usize;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<usize, Infallible>) -> Subscription {
    let Self { delay, period, scheduler } = self;
    let c_subscriber = subscriber.clone();
    let handle = match period {
      None => scheduler.schedule(
        move || {
          c_subscriber.next(0);
          c_subscriber.complete();
        },
        Some(delay),
      ),
      Some(period) => {
        scheduler.schedule_repeating(move |seq| c_subscriber.next(seq), period, Some(delay))
      }
    };
    subscriber.add(handle);
    subscriber.subscription()
  }
}
