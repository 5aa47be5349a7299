use std::convert::Infallible;

use crate::prelude::*;

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Stops pulling from the iterator as soon as the subscriber is closed, so
/// an endless iterator is fine behind `take`.
///
/// # Examples
///
/// A simple example for a range:
///
/// ```
/// use rxstream::prelude::*;
///
/// observable::from_iter(0..10)
///   .subscribe(|v| {println!("{},", v)});
/// ```
///
/// Or with a vector:
///
/// ```
/// use rxstream::prelude::*;
///
/// observable::from_iter(vec![0,1,2,3])
///   .subscribe(|v| {println!("{},", v)});
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<Iter> Observable for ObservableIter<Iter>
where
  Iter: IntoIterator + 'static,
  Iter::Item: 'static,
{
  type Item = Iter::Item;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<Iter::Item, Infallible>) -> Subscription {
    for v in self.0 {
      if subscriber.is_closed() {
        return subscriber.subscription();
      }
      subscriber.next(v);
    }
    subscriber.complete();
    subscriber.subscription()
  }
}
