//! Boxed Observable types and traits for type erasure
//!
//! This module provides a type-erased observable for use in contexts where
//! heterogeneous observables need to be stored or passed around, such as the
//! source lists of `merge` and `concat`.

use std::rc::Rc;

use crate::prelude::*;

/// Object-safe observable trait for type erasure.
///
/// Subscribing through a shared reference clones the underlying observable,
/// so a boxed observable can be subscribed any number of times.
pub trait DynObservable<Item, Err> {
  fn dyn_subscribe(&self, subscriber: Subscriber<Item, Err>) -> Subscription;
  fn dyn_is_hot(&self) -> bool;
}

impl<S> DynObservable<S::Item, S::Err> for S
where
  S: Observable + Clone,
{
  fn dyn_subscribe(&self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    self.clone().actual_subscribe(subscriber)
  }

  fn dyn_is_hot(&self) -> bool { self.is_hot() }
}

/// A type-erased observable, created by [`ObservableExt::box_it`].
pub struct BoxOp<Item, Err>(Rc<dyn DynObservable<Item, Err>>);

impl<Item, Err> Clone for BoxOp<Item, Err> {
  fn clone(&self) -> Self { BoxOp(self.0.clone()) }
}

impl<Item: 'static, Err: 'static> BoxOp<Item, Err> {
  pub fn new<S>(source: S) -> Self
  where
    S: Observable<Item = Item, Err = Err> + Clone,
  {
    BoxOp(Rc::new(source))
  }
}

impl<Item: 'static, Err: 'static> Observable for BoxOp<Item, Err> {
  type Item = Item;
  type Err = Err;

  #[inline]
  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) -> Subscription {
    self.0.dyn_subscribe(subscriber)
  }

  #[inline]
  fn is_hot(&self) -> bool { self.0.dyn_is_hot() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn box_observable() {
    let test = Rc::new(RefCell::new(0));
    let c_test = test.clone();
    let mut boxed: BoxOp<i32, std::convert::Infallible> = observable::of(100).box_it();
    boxed.clone().subscribe(move |v| *c_test.borrow_mut() = v);
    assert_eq!(*test.borrow(), 100);

    let c_test = test.clone();
    boxed = observable::empty().box_it();
    boxed.subscribe(move |_| *c_test.borrow_mut() = 1);
    assert_eq!(*test.borrow(), 100);
  }

  #[test]
  fn heterogeneous_sources_in_one_vec() {
    let sources: Vec<BoxOp<i64, std::convert::Infallible>> = vec![
      observable::of(1).box_it(),
      observable::range(2, 2).box_it(),
      observable::from_iter(vec![4, 5]).map(|v| v * 10).box_it(),
    ];
    let seen = Rc::new(RefCell::new(vec![]));
    for source in sources {
      let c_seen = seen.clone();
      source.subscribe(move |v| c_seen.borrow_mut().push(v));
    }
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 40, 50]);
  }

  #[test]
  fn hot_flag_survives_boxing() {
    let subject = Subject::<i32, ()>::new();
    assert!(subject.box_it().is_hot());
    assert!(!observable::of(1).map_err(|e| -> () { match e {} }).box_it().is_hot());
  }
}
