use crate::{ops::subscribe_upstream, prelude::*};

/// Drops the first `count` values of the source and mirrors the rest.
///
/// A source emitting `count` values or fewer yields none. `skip` completes
/// or errors only when the source does.
///
/// ```
/// # use rxstream::prelude::*;
/// observable::from_iter(0..10).skip(5).subscribe(|v| println!("{v}"));
/// // 5, 6, 7, 8, 9
/// ```
pub fn skip(count: usize) -> Skip { Skip(count) }

#[derive(Clone, Copy)]
pub struct Skip(usize);

impl<S: Observable> Operator<S> for Skip {
  type Output = SkipOp<S>;

  fn apply(self, source: S) -> Self::Output { SkipOp { source, count: self.0 } }
}

#[derive(Clone)]
pub struct SkipOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<S: Observable> Observable for SkipOp<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = SkipObserver { observer: subscriber, count: self.count, hits: 0 };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct SkipObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  count: usize,
  hits: usize,
}

impl<Item, Err> Observer<Item, Err> for SkipObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if self.hits < self.count {
      self.hits += 1;
    } else {
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
  use std::{cell::Cell, rc::Rc};

  #[test]
  fn base_function() {
    let completed = Rc::new(Cell::new(false));
    let next_count = Rc::new(Cell::new(0));
    let (c_completed, c_next) = (completed.clone(), next_count.clone());

    observable::from_iter(0..100)
      .skip(5)
      .subscribe_complete(move |_| c_next.set(c_next.get() + 1), move || c_completed.set(true));

    assert!(completed.get());
    assert_eq!(next_count.get(), 95);
  }

  #[test]
  fn base_empty_function() {
    let completed = Rc::new(Cell::new(false));
    let next_count = Rc::new(Cell::new(0));
    let (c_completed, c_next) = (completed.clone(), next_count.clone());

    observable::from_iter(0..100)
      .skip(101)
      .subscribe_complete(move |_| c_next.set(c_next.get() + 1), move || c_completed.set(true));

    assert!(completed.get());
    assert_eq!(next_count.get(), 0);
  }

  #[test]
  fn into_shared() {
    let seen = Rc::new(Cell::new(0));
    let c_seen = seen.clone();
    observable::from_iter(0..10)
      .skip(5)
      .skip(3)
      .subscribe(move |v| c_seen.set(c_seen.get() + v));
    assert_eq!(seen.get(), 8 + 9);
  }

  #[test]
  fn completes_only_with_source() {
    let completed = Rc::new(Cell::new(false));
    let c_completed = completed.clone();
    let source = Subject::<i32, ()>::new();
    source.clone().skip(2).subscribe_complete(|_| {}, move || c_completed.set(true));

    (0..5).for_each(|v| source.next(v));
    assert!(!completed.get());
    source.complete();
    assert!(completed.get());
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_skip);

  fn bench_skip(b: &mut bencher::Bencher) { b.iter(base_function); }
}
