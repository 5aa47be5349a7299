use std::{cell::RefCell, rc::Rc};

use super::{AsObservable, AsObserver, Subject};
use crate::prelude::*;

/// A [`Subject`] that holds a current value.
///
/// Every new subscriber first receives the current value, then whatever is
/// pushed afterwards. Once stopped it only replays the terminal notification.
pub struct BehaviorSubject<Item, Err> {
  subject: Subject<Item, Err>,
  value: Rc<RefCell<Item>>,
}

impl<Item, Err> Clone for BehaviorSubject<Item, Err> {
  fn clone(&self) -> Self {
    BehaviorSubject { subject: self.subject.clone(), value: self.value.clone() }
  }
}

impl<Item, Err> BehaviorSubject<Item, Err> {
  #[inline]
  pub fn new(value: Item) -> Self {
    Self { subject: Subject::default(), value: Rc::new(RefCell::new(value)) }
  }

  #[inline]
  pub fn subscriber_count(&self) -> usize { self.subject.subscriber_count() }

  #[inline]
  pub fn is_stopped(&self) -> bool { self.subject.is_stopped() }

  pub fn as_observable(&self) -> AsObservable<Self> { AsObservable(self.clone()) }

  pub fn as_observer(&self) -> AsObserver<Self> { AsObserver(self.clone()) }

  #[inline]
  pub fn complete(&self) { self.subject.complete() }
}

impl<Item: Clone, Err> BehaviorSubject<Item, Err> {
  /// A clone of the current value.
  #[doc(alias = "get_value")]
  pub fn value(&self) -> Item { self.value.borrow().clone() }

  /// Store `value` as the current one, then broadcast it.
  pub fn next(&self, value: Item) {
    if self.subject.is_stopped() {
      return;
    }
    *self.value.borrow_mut() = value.clone();
    self.subject.next(value);
  }
}

impl<Item, Err: Clone> BehaviorSubject<Item, Err> {
  #[inline]
  pub fn error(&self, err: Err) { self.subject.error(err) }
}

impl<Item, Err> Observable for BehaviorSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) -> Subscription {
    if !self.subject.is_stopped() {
      let current = self.value.borrow().clone();
      subscriber.next(current);
    }
    self.subject.actual_subscribe(subscriber)
  }

  #[inline]
  fn is_hot(&self) -> bool { true }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for AsObserver<BehaviorSubject<Item, Err>> {
  #[inline]
  fn next(&mut self, value: Item) { self.0.next(value) }

  #[inline]
  fn error(self, err: Err) { self.0.error(err) }

  #[inline]
  fn complete(self) { self.0.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_stopped() }
}
