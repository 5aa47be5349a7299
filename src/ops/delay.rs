use crate::{ops::subscribe_upstream, prelude::*};

/// Delays every notification of the source by `delay`, keeping their order.
/// An error is delayed like a value, so the values emitted before it still
/// arrive first.
///
/// ```
/// use rxstream::prelude::*;
///
/// TestScheduler::init();
/// observable::from_iter(0..3)
///   .delay(Duration::from_millis(10), TestScheduler)
///   .subscribe(|v| println!("{v}"));
/// // nothing printed yet
/// TestScheduler::advance_by(Duration::from_millis(10));
/// // 0, 1, 2
/// ```
pub fn delay<SD>(delay: Duration, scheduler: SD) -> Delay<SD> { Delay { delay, scheduler } }

#[derive(Clone)]
pub struct Delay<SD> {
  delay: Duration,
  scheduler: SD,
}

impl<S: Observable, SD: Scheduler> Operator<S> for Delay<SD> {
  type Output = DelayOp<S, SD>;

  fn apply(self, source: S) -> Self::Output {
    DelayOp { source, delay: self.delay, scheduler: self.scheduler }
  }
}

#[derive(Clone)]
pub struct DelayOp<S, SD> {
  pub(crate) source: S,
  pub(crate) delay: Duration,
  pub(crate) scheduler: SD,
}

impl<S: Observable, SD: Scheduler> Observable for DelayOp<S, SD> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer =
      DelayObserver { observer: subscriber, delay: self.delay, scheduler: self.scheduler };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct DelayObserver<Item, Err, SD> {
  observer: Subscriber<Item, Err>,
  delay: Duration,
  scheduler: SD,
}

impl<Item, Err, SD> DelayObserver<Item, Err, SD>
where
  Item: 'static,
  Err: 'static,
  SD: Scheduler,
{
  fn later(&self, deliver: impl FnOnce(Subscriber<Item, Err>) + 'static) {
    let subscriber = self.observer.clone();
    let handle = self.scheduler.schedule(move || deliver(subscriber), Some(self.delay));
    // Unsubscribing downstream cancels every pending delivery.
    self.observer.add(handle);
  }
}

impl<Item, Err, SD> Observer<Item, Err> for DelayObserver<Item, Err, SD>
where
  Item: 'static,
  Err: 'static,
  SD: Scheduler,
{
  #[inline]
  fn next(&mut self, value: Item) { self.later(move |s| s.next(value)) }

  #[inline]
  fn error(self, err: Err) { self.later(move |s| s.error(err)) }

  #[inline]
  fn complete(self) { self.later(|s| s.complete()) }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
