use std::{convert::Infallible, marker::PhantomData};

use crate::prelude::*;

/// Creates an observable that emits no items, just terminates with an error.
///
/// # Arguments
///
/// * `err` - An error to emit and terminate with
pub fn throw_err<Item, Err>(err: Err) -> ThrowObservable<Item, Err> {
  ThrowObservable(err, PhantomData)
}

pub struct ThrowObservable<Item, Err>(Err, PhantomData<fn() -> Item>);

impl<Item, Err: Clone> Clone for ThrowObservable<Item, Err> {
  fn clone(&self) -> Self { ThrowObservable(self.0.clone(), PhantomData) }
}

impl<Item: 'static, Err: 'static> Observable for ThrowObservable<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) -> Subscription {
    subscriber.error(self.0);
    subscriber.subscription()
  }
}

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// # Examples
/// ```
/// use rxstream::prelude::*;
///
/// observable::empty()
///   .subscribe(|v: i32| {println!("{},", v)});
///
/// // Result: no thing printed
/// ```
pub fn empty<Item>() -> EmptyObservable<Item> { EmptyObservable(PhantomData) }

pub struct EmptyObservable<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for EmptyObservable<Item> {
  fn clone(&self) -> Self { EmptyObservable(PhantomData) }
}

impl<Item: 'static> Observable for EmptyObservable<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Infallible>) -> Subscription {
    subscriber.complete();
    subscriber.subscription()
  }
}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error. Only an explicit
/// unsubscribe ends it.
pub fn never<Item>() -> NeverObservable<Item> { NeverObservable(PhantomData) }

pub struct NeverObservable<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for NeverObservable<Item> {
  fn clone(&self) -> Self { NeverObservable(PhantomData) }
}

impl<Item: 'static> Observable for NeverObservable<Item> {
  type Item = Item;
  type Err = Infallible;

  #[inline]
  fn actual_subscribe(self, subscriber: Subscriber<Item, Infallible>) -> Subscription {
    subscriber.subscription()
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::Cell, rc::Rc};

  #[test]
  fn throw() {
    let value_emitted = Rc::new(Cell::new(false));
    let completed = Rc::new(Cell::new(false));
    let error_emitted = Rc::new(Cell::new(String::new()));
    let (c_value, c_completed, c_error) =
      (value_emitted.clone(), completed.clone(), error_emitted.clone());

    observable::throw_err::<i32, _>(String::from("error")).subscribe_all(
      move |_| c_value.set(true),
      move |e| c_error.set(e),
      move || c_completed.set(true),
    );

    assert!(!value_emitted.get());
    assert!(!completed.get());
    assert_eq!(error_emitted.take(), "error");
  }

  #[test]
  fn empty() {
    let hits = Rc::new(Cell::new(0));
    let completed = Rc::new(Cell::new(false));
    let (c_hits, c_completed) = (hits.clone(), completed.clone());

    observable::empty::<i32>().subscribe_complete(
      move |_| c_hits.set(c_hits.get() + 1),
      move || c_completed.set(true),
    );

    assert_eq!(hits.get(), 0);
    assert!(completed.get());
  }

  #[test]
  fn never() {
    let hits = Rc::new(Cell::new(0));
    let completed = Rc::new(Cell::new(false));
    let (c_hits, c_completed) = (hits.clone(), completed.clone());

    let mut subscription = observable::never::<i32>().subscribe_complete(
      move |_| c_hits.set(c_hits.get() + 1),
      move || c_completed.set(true),
    );
    assert!(!subscription.is_closed());
    subscription.unsubscribe();

    assert!(subscription.is_closed());
    assert_eq!(hits.get(), 0);
    assert!(!completed.get());
  }
}
