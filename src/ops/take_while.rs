use crate::{ops::subscribe_upstream, prelude::*};

/// Emits values while the result of a predicate holds, then completes and
/// unsubscribes from the source. The failing value is dropped.
///
/// ```
/// # use rxstream::prelude::*;
/// observable::from_iter(0..).take_while(|v| *v < 3).subscribe(|v| println!("{v}"));
/// // 0, 1, 2
/// ```
pub fn take_while<F>(predicate: F) -> TakeWhile<F> { TakeWhile { predicate, inclusive: false } }

/// Like [`take_while`], but the value that fails the predicate is emitted
/// before completing.
pub fn take_while_inclusive<F>(predicate: F) -> TakeWhile<F> {
  TakeWhile { predicate, inclusive: true }
}

#[derive(Clone)]
pub struct TakeWhile<F> {
  predicate: F,
  inclusive: bool,
}

impl<S, F> Operator<S> for TakeWhile<F>
where
  S: Observable,
  F: FnMut(&S::Item) -> bool + 'static,
{
  type Output = TakeWhileOp<S, F>;

  fn apply(self, source: S) -> Self::Output {
    TakeWhileOp { source, predicate: self.predicate, inclusive: self.inclusive }
  }
}

#[derive(Clone)]
pub struct TakeWhileOp<S, F> {
  pub(crate) source: S,
  pub(crate) predicate: F,
  pub(crate) inclusive: bool,
}

impl<S, F> Observable for TakeWhileOp<S, F>
where
  S: Observable,
  F: FnMut(&S::Item) -> bool + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = TakeWhileObserver {
      observer: subscriber,
      predicate: self.predicate,
      inclusive: self.inclusive,
    };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct TakeWhileObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  predicate: F,
  inclusive: bool,
}

impl<Item, Err, F> Observer<Item, Err> for TakeWhileObserver<Item, Err, F>
where
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value);
    } else {
      if self.inclusive {
        self.observer.next(value);
      }
      self.observer.complete();
    }
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
  fn base_function() {
    let seen = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(false));
    let (c_seen, c_completed) = (seen.clone(), completed.clone());

    observable::from_iter(0..)
      .take_while(|v| *v < 4)
      .subscribe_complete(
        move |v| c_seen.borrow_mut().push(v),
        move || *c_completed.borrow_mut() = true,
      );

    assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    assert!(*completed.borrow());
  }

  #[test]
  fn inclusive() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::from_iter(vec![2, 4, 5, 6])
      .pipe(ops::take_while_inclusive(|v: &i32| v % 2 == 0))
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![2, 4, 5]);
  }
}
