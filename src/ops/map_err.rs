use crate::{ops::subscribe_upstream, prelude::*};

/// Converts the error of the source with `func`, leaving values untouched.
///
/// Infallible sources (`Err = Infallible`) use it to join fallible ones:
/// `observable::of(1).map_err(|e| -> MyError { match e {} })`.
pub fn map_err<F>(func: F) -> MapErr<F> { MapErr(func) }

#[derive(Clone)]
pub struct MapErr<F>(F);

impl<S, F, E> Operator<S> for MapErr<F>
where
  S: Observable,
  F: FnOnce(S::Err) -> E + 'static,
  E: 'static,
{
  type Output = MapErrOp<S, F>;

  fn apply(self, source: S) -> Self::Output { MapErrOp { source, func: self.0 } }
}

#[derive(Clone)]
pub struct MapErrOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, E> Observable for MapErrOp<S, F>
where
  S: Observable,
  F: FnOnce(S::Err) -> E + 'static,
  E: 'static,
{
  type Item = S::Item;
  type Err = E;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, E>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = MapErrObserver { observer: subscriber, func: self.func };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct MapErrObserver<Item, E, F> {
  observer: Subscriber<Item, E>,
  func: F,
}

impl<Item, Err, E, F> Observer<Item, Err> for MapErrObserver<Item, E, F>
where
  F: FnOnce(Err) -> E,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error((self.func)(err)) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn converts_the_error() {
    let error = Rc::new(RefCell::new(None));
    let c_error = error.clone();
    observable::throw_err::<i32, _>(404)
      .map_err(|code| format!("status {code}"))
      .subscribe_err(|_| {}, move |e| *c_error.borrow_mut() = Some(e));
    assert_eq!(error.borrow().as_deref(), Some("status 404"));
  }
}
