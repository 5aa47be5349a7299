use std::{cell::Cell, rc::Rc};

use crate::{ops::subscribe_upstream, prelude::*};

/// Subscribes to every source at once and forwards their values as they
/// arrive. Completes once all of them complete; the first error is forwarded
/// and unsubscribes every other source.
///
/// ```
/// use rxstream::prelude::*;
///
/// let evens = observable::from_iter((0..10).filter(|v| v % 2 == 0)).box_it();
/// let odds = observable::from_iter((0..10).filter(|v| v % 2 == 1)).box_it();
/// observable::merge(vec![evens, odds]).subscribe(|v| println!("{v}"));
/// ```
///
/// An empty list completes on subscription.
pub fn merge<S, I>(sources: I) -> Merge<S>
where
  S: Observable,
  I: IntoIterator<Item = S>,
{
  Merge { sources: sources.into_iter().collect() }
}

#[derive(Clone)]
pub struct Merge<S> {
  sources: Vec<S>,
}

impl<S: Observable> Observable for Merge<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    if self.sources.is_empty() {
      subscriber.complete();
      return downstream;
    }
    let remaining = Rc::new(Cell::new(self.sources.len()));
    for source in self.sources {
      if downstream.is_closed() {
        break;
      }
      let observer = MergeObserver { observer: subscriber.clone(), remaining: remaining.clone() };
      subscribe_upstream(source, observer, &downstream);
    }
    downstream
  }

  fn is_hot(&self) -> bool { self.sources.iter().any(Observable::is_hot) }
}

pub struct MergeObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  remaining: Rc<Cell<usize>>,
}

impl<Item, Err> Observer<Item, Err> for MergeObserver<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    let remaining = self.remaining.get() - 1;
    self.remaining.set(remaining);
    if remaining == 0 {
      self.observer.complete();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
