use smallvec::SmallVec;

use crate::{subscriber::Subscriber, subscription::DynamicSubscriptions};

/// A frozen copy of the registry, taken when a broadcast starts.
pub(crate) type Snapshot<Item, Err> = SmallVec<[Subscriber<Item, Err>; 2]>;

/// Subscribers registered on a subject, keyed by the id handed out on
/// registration.
pub(crate) struct Subscribers<Item, Err> {
  inner: DynamicSubscriptions<Subscriber<Item, Err>>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Self { inner: DynamicSubscriptions::default() } }
}

impl<Item, Err> Subscribers<Item, Err> {
  #[inline]
  pub(crate) fn add(&mut self, subscriber: Subscriber<Item, Err>) -> usize {
    self.inner.add(subscriber)
  }

  #[inline]
  pub(crate) fn remove(&mut self, id: usize) -> Option<Subscriber<Item, Err>> {
    self.inner.remove(id)
  }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.inner.len() }

  pub(crate) fn snapshot(&self) -> Snapshot<Item, Err> { self.inner.iter().cloned().collect() }

  /// Empty the registry, handing back everything that was in it.
  pub(crate) fn take_all(&mut self) -> Snapshot<Item, Err> { self.inner.drain().collect() }
}

/// Deliver `value` to every subscriber of `snapshot`, in order.
///
/// All but the last receive a clone; the last one gets `value` itself.
/// Subscribers closed since the snapshot was taken ignore the call.
pub(crate) fn broadcast_value<Item: Clone, Err>(snapshot: Snapshot<Item, Err>, value: Item) {
  let mut iter = snapshot.into_iter().peekable();
  while let Some(subscriber) = iter.next() {
    if iter.peek().is_some() {
      subscriber.next(value.clone());
    } else {
      subscriber.next(value);
      break;
    }
  }
}

pub(crate) fn broadcast_error<Item, Err: Clone>(snapshot: Snapshot<Item, Err>, err: Err) {
  let mut iter = snapshot.into_iter().peekable();
  while let Some(subscriber) = iter.next() {
    if iter.peek().is_some() {
      subscriber.error(err.clone());
    } else {
      subscriber.error(err);
      break;
    }
  }
}

pub(crate) fn broadcast_complete<Item, Err>(snapshot: Snapshot<Item, Err>) {
  for subscriber in snapshot {
    subscriber.complete();
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::observer::FnMutObserver;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn last_subscriber_gets_the_original() {
    let clones = Rc::new(RefCell::new(0));

    #[derive(Debug)]
    struct Tracked(Rc<RefCell<usize>>);
    impl Clone for Tracked {
      fn clone(&self) -> Self {
        *self.0.borrow_mut() += 1;
        Tracked(self.0.clone())
      }
    }

    let mut subscribers = Subscribers::<Tracked, ()>::default();
    for _ in 0..3 {
      subscribers.add(Subscriber::new(FnMutObserver(|_: Tracked| {})));
    }
    broadcast_value(subscribers.snapshot(), Tracked(clones.clone()));
    assert_eq!(*clones.borrow(), 2);
  }

  #[test]
  fn take_all_empties() {
    let mut subscribers = Subscribers::<i32, ()>::default();
    let id = subscribers.add(Subscriber::new(FnMutObserver(|_: i32| {})));
    subscribers.add(Subscriber::new(FnMutObserver(|_: i32| {})));
    assert_eq!(subscribers.take_all().len(), 2);
    assert_eq!(subscribers.len(), 0);
    assert!(subscribers.remove(id).is_none());
    // Nobody left to receive it.
    broadcast_value(subscribers.snapshot(), 1);
  }
}
