use crate::prelude::*;

/// Creates an observable that will on subscription defer to another observable
/// that is supplied by a supplier-function which will be run once at each
/// subscription
///
/// To defer a future or a plain value, return `from_future(..)` or `of(..)`
/// from the supplier.
///
/// ```rust
/// # use rxstream::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::of("Hello!")
/// })
///   .subscribe(move |v| {
///     println!("{}", v);
///   });
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<F, O>(observable_supplier: F) -> DeferObservable<F>
where
  F: FnOnce() -> O + 'static,
  O: Observable,
{
  DeferObservable(observable_supplier)
}

#[derive(Clone)]
pub struct DeferObservable<F>(F);

impl<F, O> Observable for DeferObservable<F>
where
  F: FnOnce() -> O + 'static,
  O: Observable,
{
  type Item = O::Item;
  type Err = O::Err;

  fn actual_subscribe(self, subscriber: Subscriber<O::Item, O::Err>) -> Subscription {
    (self.0)().actual_subscribe(subscriber)
  }
}

/// Like [`defer`], but the supplier may fail. An `Err` from the supplier is
/// delivered to the subscriber as the stream error.
///
/// ```rust
/// # use rxstream::prelude::*;
/// observable::defer_result(|| -> Result<_, String> {
///   let port: u16 = "80a".parse().map_err(|e| format!("{e}"))?;
///   Ok(observable::of(port).map_err(|e| -> String { match e {} }))
/// })
/// .subscribe_err(|port| println!("port {port}"), |e| println!("bad port: {e}"));
/// ```
pub fn defer_result<F, O>(observable_supplier: F) -> DeferResultObservable<F>
where
  F: FnOnce() -> Result<O, O::Err> + 'static,
  O: Observable,
{
  DeferResultObservable(observable_supplier)
}

#[derive(Clone)]
pub struct DeferResultObservable<F>(F);

impl<F, O> Observable for DeferResultObservable<F>
where
  F: FnOnce() -> Result<O, O::Err> + 'static,
  O: Observable,
{
  type Item = O::Item;
  type Err = O::Err;

  fn actual_subscribe(self, subscriber: Subscriber<O::Item, O::Err>) -> Subscription {
    match (self.0)() {
      Ok(source) => source.actual_subscribe(subscriber),
      Err(err) => {
        subscriber.error(err);
        subscriber.subscription()
      }
    }
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  #[test]
  fn no_results_before_deferred_subscribe() {
    let calls = Rc::new(Cell::new(0));
    let c_calls = calls.clone();
    let deferred = observable::defer(move || {
      c_calls.set(c_calls.get() + 1);
      observable::of(c_calls.get())
    });
    assert_eq!(calls.get(), 0);

    let seen = Rc::new(RefCell::new(vec![]));
    for _ in 0..2 {
      let c_seen = seen.clone();
      deferred.clone().subscribe(move |v| c_seen.borrow_mut().push(v));
    }

    assert_eq!(calls.get(), 2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn supplier_error_becomes_stream_error() {
    let error = Rc::new(RefCell::new(None));
    let c_error = error.clone();
    observable::defer_result(|| -> Result<observable::ThrowObservable<i32, &str>, &str> {
      Err("bad input")
    })
    .subscribe_err(|_| {}, move |e| *c_error.borrow_mut() = Some(e));

    assert_eq!(*error.borrow(), Some("bad input"));
  }
}
