use crate::{ops::subscribe_upstream, prelude::*};

/// Emits only the first value, then completes and unsubscribes from the
/// source. An empty source completes without a value.
pub fn first<Item>() -> First<Item> { First(None) }

/// Like [`first`], but emits `default` when the source completes empty.
pub fn first_or<Item>(default: Item) -> First<Item> { First(Some(default)) }

#[derive(Clone)]
pub struct First<Item>(Option<Item>);

impl<S: Observable> Operator<S> for First<S::Item> {
  type Output = FirstOp<S>;

  fn apply(self, source: S) -> Self::Output { FirstOp { source, default: self.0 } }
}

pub struct FirstOp<S: Observable> {
  pub(crate) source: S,
  pub(crate) default: Option<S::Item>,
}

impl<S> Clone for FirstOp<S>
where
  S: Observable + Clone,
  S::Item: Clone,
{
  fn clone(&self) -> Self {
    FirstOp { source: self.source.clone(), default: self.default.clone() }
  }
}

impl<S: Observable> Observable for FirstOp<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = FirstObserver { observer: subscriber, default: self.default };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct FirstObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  default: Option<Item>,
}

impl<Item, Err> Observer<Item, Err> for FirstObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    self.observer.next(value);
    self.observer.complete();
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    if let Some(default) = self.default {
      self.observer.next(default);
    }
    self.observer.complete()
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
