use crate::{ops::subscribe_upstream, prelude::*};

/// Calls `func` with a reference to every value, then forwards the value
/// unchanged. Useful for logging and other side effects in a pipeline.
pub fn tap<F>(func: F) -> Tap<F> { Tap(func) }

#[derive(Clone)]
pub struct Tap<F>(F);

impl<S, F> Operator<S> for Tap<F>
where
  S: Observable,
  F: FnMut(&S::Item) + 'static,
{
  type Output = TapOp<S, F>;

  fn apply(self, source: S) -> Self::Output { TapOp { source, func: self.0 } }
}

#[derive(Clone)]
pub struct TapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F> Observable for TapOp<S, F>
where
  S: Observable,
  F: FnMut(&S::Item) + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = TapObserver { observer: subscriber, func: self.func };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct TapObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  func: F,
}

impl<Item, Err, F> Observer<Item, Err> for TapObserver<Item, Err, F>
where
  F: FnMut(&Item),
{
  fn next(&mut self, value: Item) {
    (self.func)(&value);
    self.observer.next(value)
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

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
  fn sees_every_value_first() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_tap, c_next) = (log.clone(), log.clone());
    observable::from_iter(1..=2)
      .tap(move |v| c_tap.borrow_mut().push(format!("tap {v}")))
      .subscribe(move |v| c_next.borrow_mut().push(format!("next {v}")));
    assert_eq!(*log.borrow(), vec!["tap 1", "next 1", "tap 2", "next 2"]);
  }
}
