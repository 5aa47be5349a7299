use crate::{ops::subscribe_upstream, prelude::*};

/// Emits only the last value of the source, once it completes. An empty
/// source completes without a value.
pub fn last() -> Last { Last }

#[derive(Clone, Copy)]
pub struct Last;

impl<S: Observable> Operator<S> for Last {
  type Output = LastOp<S>;

  fn apply(self, source: S) -> Self::Output { LastOp { source } }
}

#[derive(Clone)]
pub struct LastOp<S> {
  pub(crate) source: S,
}

impl<S: Observable> Observable for LastOp<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = LastObserver { observer: subscriber, last: None };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct LastObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  last: Option<Item>,
}

impl<Item, Err> Observer<Item, Err> for LastObserver<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { self.last = Some(value); }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    if let Some(last) = self.last {
      self.observer.next(last);
    }
    self.observer.complete();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn last_value() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::from_iter(0..5).last().subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![4]);
  }

  #[test]
  fn error_drops_the_held_value() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_next, c_err) = (log.clone(), log.clone());
    observable::create(|s: Subscriber<i32, &str>| {
      s.next(1);
      s.error("broken");
    })
    .pipe(ops::last())
    .subscribe_err(
      move |v| c_next.borrow_mut().push(format!("{v}")),
      move |e| c_err.borrow_mut().push(e.to_string()),
    );
    assert_eq!(*log.borrow(), vec!["broken"]);
  }
}
