use crate::{ops::subscribe_upstream, prelude::*};

/// Creates an operator which calls a closure on each element and uses its
/// return as the value.
pub fn map<F>(func: F) -> Map<F> { Map(func) }

/// Like [`map`], but the closure may fail. An `Err` is delivered downstream
/// as the stream error and the source is unsubscribed.
pub fn try_map<F>(func: F) -> TryMap<F> { TryMap(func) }

#[derive(Clone)]
pub struct Map<F>(F);

#[derive(Clone)]
pub struct TryMap<F>(F);

impl<S, F, B> Operator<S> for Map<F>
where
  S: Observable,
  F: FnMut(S::Item) -> B + 'static,
  B: 'static,
{
  type Output = MapOp<S, F>;

  fn apply(self, source: S) -> Self::Output { MapOp { source, func: self.0 } }
}

impl<S, F, B> Operator<S> for TryMap<F>
where
  S: Observable,
  F: FnMut(S::Item) -> Result<B, S::Err> + 'static,
  B: 'static,
{
  type Output = TryMapOp<S, F>;

  fn apply(self, source: S) -> Self::Output { TryMapOp { source, func: self.0 } }
}

#[derive(Clone)]
pub struct MapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for MapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> B + 'static,
  B: 'static,
{
  type Item = B;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<B, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = MapObserver { observer: subscriber, func: self.func };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct MapObserver<B, Err, F> {
  observer: Subscriber<B, Err>,
  func: F,
}

impl<Item, B, Err, F> Observer<Item, Err> for MapObserver<B, Err, F>
where
  F: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[derive(Clone)]
pub struct TryMapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for TryMapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> Result<B, S::Err> + 'static,
  B: 'static,
{
  type Item = B;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<B, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    let observer = TryMapObserver { observer: subscriber, func: self.func };
    subscribe_upstream(self.source, observer, &downstream);
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}

pub struct TryMapObserver<B, Err, F> {
  observer: Subscriber<B, Err>,
  func: F,
}

impl<Item, B, Err, F> Observer<Item, Err> for TryMapObserver<B, Err, F>
where
  F: FnMut(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    match (self.func)(value) {
      Ok(v) => self.observer.next(v),
      Err(err) => self.observer.error(err),
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
