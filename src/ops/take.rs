use crate::{ops::subscribe_upstream, prelude::*};

/// Emits only the first `count` values emitted by the source Observable.
///
/// `take` returns an Observable that emits only the first `count` values
/// emitted by the source Observable. If the source emits fewer than `count`
/// values then all of its values are emitted. After that, it completes and
/// unsubscribes from the source, regardless if the source completes.
///
/// # Example
/// Take the first 5 values of an infinite source.
///
/// ```
/// # use rxstream::prelude::*;
///
/// observable::from_iter(0..).take(5).subscribe(|v| println!("{}", v));
///
/// // print logs:
/// // 0
/// // 1
/// // 2
/// // 3
/// // 4
/// ```
pub fn take(count: usize) -> Take { Take(count) }

#[derive(Clone, Copy)]
pub struct Take(usize);

impl<S: Observable> Operator<S> for Take {
  type Output = TakeOp<S>;

  fn apply(self, source: S) -> Self::Output { TakeOp { source, count: self.0 } }
}

#[derive(Clone)]
pub struct TakeOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<S: Observable> Observable for TakeOp<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    if self.count == 0 {
      subscriber.complete();
      return downstream;
    }
    let observer = TakeObserver { observer: subscriber, count: self.count, hits: 0 };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct TakeObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  count: usize,
  hits: usize,
}

impl<Item, Err> Observer<Item, Err> for TakeObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if self.hits < self.count {
      self.hits += 1;
      self.observer.next(value);
      if self.hits == self.count {
        // Completing closes the downstream subscription, which holds the
        // upstream one.
        self.observer.complete();
      }
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
