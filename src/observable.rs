//! Observable trait, the subscribe surface and creation functions.
//!
//! An observable is a plain value describing how to produce notifications.
//! Cold observables run their producer again for every subscription, so a
//! value is subscribed more than once by cloning it. Hot observables
//! (subjects) share one execution among every current subscriber.

use std::marker::PhantomData;

use crate::{
  observer::{FnMutObserver, Observer, ObserverAll},
  ops::{
    delay::DelayOp,
    distinct_until_changed::{DistinctUntilChangedByOp, DistinctUntilChangedOp},
    filter::FilterOp,
    first::FirstOp,
    last::LastOp,
    map::{MapOp, TryMapOp},
    map_err::MapErrOp,
    skip::SkipOp,
    start_with::StartWithOp,
    take::TakeOp,
    take_while::TakeWhileOp,
    tap::TapOp,
    Operator,
  },
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionLike, SubscriptionWrapper},
};

mod boxed;
pub use boxed::*;
mod defer;
pub use defer::*;
mod from_future;
pub use from_future::*;
mod from_iter;
pub use from_iter::*;
mod interval;
pub use interval::*;
mod of;
pub use of::*;
mod range;
pub use range::*;
mod timer;
pub use timer::*;
mod trivial;
pub use trivial::*;

pub use crate::ops::{
  concat::{concat, Concat},
  into_future::ObservableFuture,
  merge::{merge, Merge},
};

/// A source of `next`, `error` and `complete` notifications.
///
/// `actual_subscribe` starts one execution that pushes into `subscriber` and
/// returns the subscription of that execution. The subscribe methods on
/// [`ObservableExt`] are what users call.
pub trait Observable: 'static {
  type Item: 'static;
  type Err: 'static;

  fn actual_subscribe(self, subscriber: Subscriber<Self::Item, Self::Err>) -> Subscription;

  /// Whether subscribers share one execution (hot) instead of each running
  /// the producer anew (cold).
  #[inline]
  fn is_hot(&self) -> bool { false }
}

/// Subscribe methods and chained operators available on every observable.
pub trait ObservableExt: Observable + Sized {
  /// Subscribe with a `next` handler only.
  ///
  /// Synchronous sources deliver every value before this returns.
  fn subscribe<N>(self, next: N) -> SubscriptionWrapper<Subscription>
  where
    N: FnMut(Self::Item) + 'static,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> SubscriptionWrapper<Subscription>
  where
    N: FnMut(Self::Item) + 'static,
    E: FnOnce(Self::Err) + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, || {}))
  }

  fn subscribe_complete<N, C>(self, next: N, complete: C) -> SubscriptionWrapper<Subscription>
  where
    N: FnMut(Self::Item) + 'static,
    C: FnOnce() + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, |_: Self::Err| {}, complete))
  }

  fn subscribe_all<N, E, C>(
    self, next: N, error: E, complete: C,
  ) -> SubscriptionWrapper<Subscription>
  where
    N: FnMut(Self::Item) + 'static,
    E: FnOnce(Self::Err) + 'static,
    C: FnOnce() + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, complete))
  }

  /// Subscribe any observer, including a subject.
  fn subscribe_with<O>(self, observer: O) -> SubscriptionWrapper<Subscription>
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    let subscriber = Subscriber::new(observer);
    let subscription = subscriber.subscription();
    let teardown = self.actual_subscribe(subscriber);
    subscription.add(teardown);
    SubscriptionWrapper(subscription)
  }

  /// Apply an operator, or a tuple of operators left to right.
  ///
  /// ```rust
  /// use rxstream::prelude::*;
  ///
  /// let doubled_evens = observable::from_iter(0..10)
  ///   .pipe((ops::filter(|v: &i32| v % 2 == 0), ops::map(|v: i32| v * 2)));
  /// # let _ = doubled_evens;
  /// ```
  #[inline]
  fn pipe<Op: Operator<Self>>(self, operator: Op) -> Op::Output { operator.apply(self) }

  /// Type-erase this observable.
  #[inline]
  fn box_it(self) -> BoxOp<Self::Item, Self::Err>
  where
    Self: Clone,
  {
    BoxOp::new(self)
  }

  /// Subscribe now; resolves with the last value once the stream completes.
  fn to_future(self) -> ObservableFuture<Result<Option<Self::Item>, Self::Err>> {
    crate::ops::into_future::to_future(self)
  }

  #[inline]
  fn map<B, F>(self, func: F) -> MapOp<Self, F>
  where
    F: FnMut(Self::Item) -> B + 'static,
    B: 'static,
  {
    MapOp { source: self, func }
  }

  /// Map with a fallible projection. An `Err` ends the stream with that error.
  #[inline]
  fn try_map<B, F>(self, func: F) -> TryMapOp<Self, F>
  where
    F: FnMut(Self::Item) -> Result<B, Self::Err> + 'static,
    B: 'static,
  {
    TryMapOp { source: self, func }
  }

  #[inline]
  fn map_err<E, F>(self, func: F) -> MapErrOp<Self, F>
  where
    F: FnOnce(Self::Err) -> E + 'static,
    E: 'static,
  {
    MapErrOp { source: self, func }
  }

  #[inline]
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Self::Item) -> bool + 'static,
  {
    FilterOp { source: self, filter }
  }

  /// Run a side effect on each value and pass it on unchanged.
  #[inline]
  fn tap<F>(self, func: F) -> TapOp<Self, F>
  where
    F: FnMut(&Self::Item) + 'static,
  {
    TapOp { source: self, func }
  }

  #[inline]
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self>
  where
    Self::Item: PartialEq + Clone,
  {
    DistinctUntilChangedOp { source: self }
  }

  #[inline]
  fn distinct_until_changed_by<F>(self, compare: F) -> DistinctUntilChangedByOp<Self, F>
  where
    Self::Item: Clone,
    F: FnMut(&Self::Item, &Self::Item) -> bool + 'static,
  {
    DistinctUntilChangedByOp { source: self, compare }
  }

  #[inline]
  fn skip(self, count: usize) -> SkipOp<Self> { SkipOp { source: self, count } }

  #[inline]
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp { source: self, count } }

  #[inline]
  fn take_while<F>(self, predicate: F) -> TakeWhileOp<Self, F>
  where
    F: FnMut(&Self::Item) -> bool + 'static,
  {
    TakeWhileOp { source: self, predicate, inclusive: false }
  }

  /// Like `take_while`, but also emits the value that failed the predicate.
  #[inline]
  fn take_while_inclusive<F>(self, predicate: F) -> TakeWhileOp<Self, F>
  where
    F: FnMut(&Self::Item) -> bool + 'static,
  {
    TakeWhileOp { source: self, predicate, inclusive: true }
  }

  #[inline]
  fn start_with(self, values: Vec<Self::Item>) -> StartWithOp<Self> {
    StartWithOp { source: self, values }
  }

  #[inline]
  fn first(self) -> FirstOp<Self> { FirstOp { source: self, default: None } }

  /// Emit the first value, or `default` if the source completes empty.
  #[inline]
  fn first_or(self, default: Self::Item) -> FirstOp<Self> {
    FirstOp { source: self, default: Some(default) }
  }

  #[inline]
  fn last(self) -> LastOp<Self> { LastOp { source: self } }

  #[inline]
  fn delay<SD: Scheduler>(self, delay: Duration, scheduler: SD) -> DelayOp<Self, SD> {
    DelayOp { source: self, delay, scheduler }
  }

  /// Merge with one other observable of the same item and error types.
  fn merge<S>(self, other: S) -> Merge<BoxOp<Self::Item, Self::Err>>
  where
    Self: Clone,
    S: Observable<Item = Self::Item, Err = Self::Err> + Clone,
  {
    merge(vec![self.box_it(), other.box_it()])
  }

  /// Subscribe to `other` once this observable completes.
  fn concat_with<S>(self, other: S) -> Concat<BoxOp<Self::Item, Self::Err>>
  where
    Self: Clone,
    S: Observable<Item = Self::Item, Err = Self::Err> + Clone,
  {
    concat(vec![self.box_it(), other.box_it()])
  }
}

impl<T: Observable> ObservableExt for T {}

/// An observable from a producer closure, run once per subscription.
///
/// The producer receives the subscriber and returns its teardown: `()` for
/// none, a [`Teardown`](crate::subscription::Teardown), or any other
/// subscription.
///
/// ```rust
/// use rxstream::prelude::*;
///
/// let source = observable::create(|subscriber: Subscriber<i32, &str>| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.complete();
///   Teardown::new(|| println!("released"))
/// });
/// source.subscribe(|v| println!("{v}"));
/// ```
pub fn create<F, Item, Err, U>(producer: F) -> Create<F, Item, Err>
where
  F: FnOnce(Subscriber<Item, Err>) -> U + 'static,
  U: SubscriptionLike + 'static,
{
  Create { producer, _hint: PhantomData }
}

pub struct Create<F, Item, Err> {
  producer: F,
  _hint: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self {
    Create { producer: self.producer.clone(), _hint: PhantomData }
  }
}

impl<F, Item, Err, U> Observable for Create<F, Item, Err>
where
  F: FnOnce(Subscriber<Item, Err>) -> U + 'static,
  U: SubscriptionLike + 'static,
  Item: 'static,
  Err: 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) -> Subscription {
    let subscription = subscriber.subscription();
    let teardown = (self.producer)(subscriber);
    subscription.add(teardown);
    subscription
  }
}
