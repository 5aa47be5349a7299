use crate::{ops::subscribe_upstream, prelude::*};

/// Emit only those items from an Observable that pass a predicate test
/// # Example
///
/// ```
/// use rxstream::prelude::*;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let coll = Rc::new(RefCell::new(vec![]));
/// let coll_clone = coll.clone();
///
/// observable::from_iter(0..10)
///   .filter(|v| *v % 2 == 0)
///   .subscribe(move |v| {
///      coll_clone.borrow_mut().push(v);
///   });
///
/// // only even numbers received.
/// assert_eq!(coll.borrow().clone(), vec![0, 2, 4, 6, 8]);
/// ```
pub fn filter<F>(filter: F) -> Filter<F> { Filter(filter) }

#[derive(Clone)]
pub struct Filter<F>(F);

impl<S, F> Operator<S> for Filter<F>
where
  S: Observable,
  F: FnMut(&S::Item) -> bool + 'static,
{
  type Output = FilterOp<S, F>;

  fn apply(self, source: S) -> Self::Output { FilterOp { source, filter: self.0 } }
}

#[derive(Clone)]
pub struct FilterOp<S, F> {
  pub(crate) source: S,
  pub(crate) filter: F,
}

impl<S, F> Observable for FilterOp<S, F>
where
  S: Observable,
  F: FnMut(&S::Item) -> bool + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = FilterObserver { observer: subscriber, filter: self.filter };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct FilterObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  filter: F,
}

impl<Item, Err, F> Observer<Item, Err> for FilterObserver<Item, Err, F>
where
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.filter)(&value) {
      self.observer.next(value)
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
