use crate::{ops::subscribe_upstream, prelude::*};

/// Only emit when the current value is different than the last emitted one.
///
/// The first value is always emitted.
///
/// ```
/// use rxstream::prelude::*;
///
/// observable::from_iter(vec![1, 1, 2, 2, 1])
///   .distinct_until_changed()
///   .subscribe(|v| println!("{v}"));
/// // 1, 2, 1
/// ```
pub fn distinct_until_changed() -> DistinctUntilChanged { DistinctUntilChanged }

/// Like [`distinct_until_changed`] with a custom equality: `compare(last,
/// current)` returning true suppresses `current`.
pub fn distinct_until_changed_by<F>(compare: F) -> DistinctUntilChangedBy<F> {
  DistinctUntilChangedBy(compare)
}

#[derive(Clone, Copy)]
pub struct DistinctUntilChanged;

#[derive(Clone)]
pub struct DistinctUntilChangedBy<F>(F);

impl<S> Operator<S> for DistinctUntilChanged
where
  S: Observable,
  S::Item: PartialEq + Clone,
{
  type Output = DistinctUntilChangedOp<S>;

  fn apply(self, source: S) -> Self::Output { DistinctUntilChangedOp { source } }
}

impl<S, F> Operator<S> for DistinctUntilChangedBy<F>
where
  S: Observable,
  S::Item: Clone,
  F: FnMut(&S::Item, &S::Item) -> bool + 'static,
{
  type Output = DistinctUntilChangedByOp<S, F>;

  fn apply(self, source: S) -> Self::Output {
    DistinctUntilChangedByOp { source, compare: self.0 }
  }
}

#[derive(Clone)]
pub struct DistinctUntilChangedOp<S> {
  pub(crate) source: S,
}

#[derive(Clone)]
pub struct DistinctUntilChangedByOp<S, F> {
  pub(crate) source: S,
  pub(crate) compare: F,
}

impl<S> Observable for DistinctUntilChangedOp<S>
where
  S: Observable,
  S::Item: PartialEq + Clone,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    DistinctUntilChangedByOp { source: self.source, compare: |a: &S::Item, b: &S::Item| a == b }
      .actual_subscribe(subscriber)
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

impl<S, F> Observable for DistinctUntilChangedByOp<S, F>
where
  S: Observable,
  S::Item: Clone,
  F: FnMut(&S::Item, &S::Item) -> bool + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer =
      DistinctUntilChangedObserver { observer: subscriber, compare: self.compare, last: None };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct DistinctUntilChangedObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  compare: F,
  last: Option<Item>,
}

impl<Item, Err, F> Observer<Item, Err> for DistinctUntilChangedObserver<Item, Err, F>
where
  Item: Clone,
  F: FnMut(&Item, &Item) -> bool,
{
  fn next(&mut self, value: Item) {
    let duplicate = match &self.last {
      Some(last) => (self.compare)(last, &value),
      None => false,
    };
    if !duplicate {
      self.last = Some(value.clone());
      self.observer.next(value);
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
  fn smoke() {
    let x = Rc::new(RefCell::new(vec![]));
    let x_c = x.clone();
    observable::from_iter(vec![1, 1, 2, 2, 1])
      .distinct_until_changed()
      .subscribe(move |v| x_c.borrow_mut().push(v));
    assert_eq!(*x.borrow(), vec![1, 2, 1]);
  }

  #[test]
  fn by_field() {
    #[derive(Clone, Debug, PartialEq)]
    struct Reading {
      sensor: &'static str,
      value: i32,
    }

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::from_iter(vec![
      Reading { sensor: "a", value: 1 },
      Reading { sensor: "a", value: 2 },
      Reading { sensor: "b", value: 3 },
      Reading { sensor: "b", value: 4 },
      Reading { sensor: "a", value: 5 },
    ])
    .distinct_until_changed_by(|last, current| last.sensor == current.sensor)
    .subscribe(move |r| c_seen.borrow_mut().push(r.value));
    assert_eq!(*seen.borrow(), vec![1, 3, 5]);
  }

  #[test]
  fn through_pipe() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::from_iter("aabbbc".chars())
      .pipe(ops::distinct_until_changed())
      .subscribe(move |c| c_seen.borrow_mut().push(c));
    assert_eq!(*seen.borrow(), vec!['a', 'b', 'c']);
  }

  #[test]
  fn terminals_pass_through_at_once() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_next, c_complete) = (log.clone(), log.clone());
    let source = Subject::<i32, &str>::new();
    source.clone().distinct_until_changed().subscribe_complete(
      move |v| c_next.borrow_mut().push(format!("next {v}")),
      move || c_complete.borrow_mut().push("complete".to_string()),
    );
    source.next(1);
    source.next(1);
    assert_eq!(*log.borrow(), vec!["next 1"]);
    source.complete();
    assert_eq!(*log.borrow(), vec!["next 1", "complete"]);

    let log = Rc::new(RefCell::new(vec![]));
    let (c_next, c_err) = (log.clone(), log.clone());
    let source = Subject::<i32, &str>::new();
    source.clone().distinct_until_changed().subscribe_err(
      move |v| c_next.borrow_mut().push(format!("next {v}")),
      move |e| c_err.borrow_mut().push(format!("error {e}")),
    );
    source.next(2);
    source.error("boom");
    assert_eq!(*log.borrow(), vec!["next 2", "error boom"]);
    source.next(3);
    assert_eq!(log.borrow().len(), 2);
  }
}
