//! Awaiting an observable.
//!
//! [`ObservableExt::to_future`](crate::observable::ObservableExt::to_future),
//! [`first_value_from`] and [`last_value_from`] subscribe right away and hand
//! back a future that settles with the stream. Dropping the future before it
//! settles unsubscribes from the source.

use std::{
  cell::RefCell,
  future::Future,
  pin::Pin,
  rc::Rc,
  task::{Context, Poll, Waker},
};

use crate::{ops::first::FirstOp, prelude::*};

/// Options for [`first_value_from_with`] and [`last_value_from_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueConfig<Item> {
  /// Resolve with this value instead of [`EmptyError`] when the source
  /// completes without emitting.
  pub default_value: Option<Item>,
}

impl<Item> Default for ValueConfig<Item> {
  fn default() -> Self { ValueConfig { default_value: None } }
}

impl<Item> ValueConfig<Item> {
  pub fn with_default(value: Item) -> Self { ValueConfig { default_value: Some(value) } }
}

/// A future settled by the notifications of an observable.
///
/// It is created already subscribed, so the source runs whether or not the
/// future is ever polled. Polling after it resolved stays pending.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct ObservableFuture<Output> {
  state: Rc<RefCell<SettleState<Output>>>,
  subscription: Subscription,
}

struct SettleState<Output> {
  result: Option<Output>,
  waker: Option<Waker>,
}

impl<Output> Future for ObservableFuture<Output> {
  type Output = Output;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Output> {
    let mut state = self.state.borrow_mut();
    match state.result.take() {
      Some(output) => Poll::Ready(output),
      None => {
        state.waker = Some(cx.waker().clone());
        Poll::Pending
      }
    }
  }
}

impl<Output> Drop for ObservableFuture<Output> {
  fn drop(&mut self) { self.subscription.unsubscribe(); }
}

struct SettleObserver<Item, Output, C, E> {
  latest: Option<Item>,
  state: Rc<RefCell<SettleState<Output>>>,
  on_complete: C,
  on_error: E,
}

fn settle<Output>(state: &RefCell<SettleState<Output>>, output: Output) {
  let waker = {
    let mut state = state.borrow_mut();
    state.result = Some(output);
    state.waker.take()
  };
  tracing::trace!("observable future settled");
  if let Some(waker) = waker {
    waker.wake();
  }
}

impl<Item, Err, Output, C, E> Observer<Item, Err> for SettleObserver<Item, Output, C, E>
where
  C: FnOnce(Option<Item>) -> Output,
  E: FnOnce(Err) -> Output,
{
  #[inline]
  fn next(&mut self, value: Item) { self.latest = Some(value); }

  fn error(self, err: Err) { settle(&self.state, (self.on_error)(err)) }

  fn complete(self) { settle(&self.state, (self.on_complete)(self.latest)) }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

fn settle_with<S, Output, C, E>(source: S, on_complete: C, on_error: E) -> ObservableFuture<Output>
where
  S: Observable,
  Output: 'static,
  C: FnOnce(Option<S::Item>) -> Output + 'static,
  E: FnOnce(S::Err) -> Output + 'static,
{
  let state = Rc::new(RefCell::new(SettleState { result: None, waker: None }));
  let observer = SettleObserver { latest: None, state: state.clone(), on_complete, on_error };
  let subscriber = Subscriber::new(observer);
  let subscription = subscriber.subscription();
  let teardown = source.actual_subscribe(subscriber);
  subscription.add(teardown);
  ObservableFuture { state, subscription }
}

/// Resolves `Ok(Some(last))` on completion, `Ok(None)` if nothing was
/// emitted, and `Err(err)` if the source errors.
pub(crate) fn to_future<S: Observable>(
  source: S,
) -> ObservableFuture<Result<Option<S::Item>, S::Err>> {
  settle_with(source, Ok, Err)
}

fn value_from<S: Observable>(
  source: S, config: ValueConfig<S::Item>,
) -> ObservableFuture<Result<S::Item, ValueError<S::Err>>> {
  settle_with(
    source,
    move |latest| latest.or(config.default_value).ok_or(ValueError::Empty(EmptyError)),
    |err| Err(ValueError::Source(err)),
  )
}

/// Resolves with the first value of `source` and unsubscribes from it.
///
/// An empty source gives [`ValueError::Empty`], an erroring one
/// [`ValueError::Source`].
///
/// ```
/// use futures::executor::block_on;
/// use rxstream::prelude::*;
///
/// let first = block_on(first_value_from(observable::from_iter(10..)));
/// assert_eq!(first, Ok(10));
/// ```
pub fn first_value_from<S: Observable>(
  source: S,
) -> ObservableFuture<Result<S::Item, ValueError<S::Err>>> {
  first_value_from_with(source, ValueConfig::default())
}

pub fn first_value_from_with<S: Observable>(
  source: S, config: ValueConfig<S::Item>,
) -> ObservableFuture<Result<S::Item, ValueError<S::Err>>> {
  value_from(FirstOp { source, default: None }, config)
}

/// Resolves with the last value of `source` once it completes.
///
/// A source that never completes leaves the future pending forever.
pub fn last_value_from<S: Observable>(
  source: S,
) -> ObservableFuture<Result<S::Item, ValueError<S::Err>>> {
  last_value_from_with(source, ValueConfig::default())
}

#[doc(alias = "last_value_from_or")]
pub fn last_value_from_with<S: Observable>(
  source: S, config: ValueConfig<S::Item>,
) -> ObservableFuture<Result<S::Item, ValueError<S::Err>>> {
  value_from(source, config)
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use futures::{
    executor::{block_on, LocalPool},
    task::LocalSpawnExt,
  };
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  #[test]
  fn first_of_sync_source() {
    let pulled = Rc::new(Cell::new(0));
    let c_pulled = pulled.clone();
    let source = observable::from_iter(1..).tap(move |_| c_pulled.set(c_pulled.get() + 1));
    assert_eq!(block_on(first_value_from(source)), Ok(1));
    assert_eq!(pulled.get(), 1);
  }

  #[test]
  fn first_of_empty() {
    let res = block_on(first_value_from(observable::empty::<i32>()));
    assert_eq!(res, Err(ValueError::Empty(EmptyError)));

    let res = block_on(first_value_from_with(observable::empty(), ValueConfig::with_default(7)));
    assert_eq!(res, Ok(7));
  }

  #[test]
  fn source_error() {
    let res = block_on(last_value_from(observable::throw_err::<i32, _>("boom")));
    assert_eq!(res, Err(ValueError::Source("boom")));

    let res = block_on(first_value_from_with(
      observable::throw_err::<i32, _>("late"),
      ValueConfig::with_default(0),
    ));
    assert_eq!(res, Err(ValueError::Source("late")));

    let res = block_on(last_value_from(observable::create(|s: Subscriber<i32, &str>| {
      s.next(1);
      s.error("after one");
      s.subscription()
    })));
    assert_eq!(res, Err(ValueError::Source("after one")));
  }

  #[test]
  fn last_of_sequence() {
    assert_eq!(block_on(last_value_from(observable::from_iter(0..5))), Ok(4));
    let res = block_on(last_value_from_with(
      observable::empty(),
      ValueConfig { default_value: Some("none") },
    ));
    assert_eq!(res, Ok("none"));
  }

  #[test]
  fn to_future_results() {
    assert_eq!(block_on(observable::of(3).to_future()), Ok(Some(3)));
    assert_eq!(block_on(observable::empty::<i32>().to_future()), Ok(None));
    assert_eq!(block_on(observable::throw_err::<i32, _>(1).to_future()), Err(1));
  }

  #[test]
  fn settles_on_later_emission() {
    let mut pool = LocalPool::new();
    let subject = Subject::<i32, ()>::new();
    let result = Rc::new(RefCell::new(None));
    let c_result = result.clone();
    let future = first_value_from(subject.clone());
    pool
      .spawner()
      .spawn_local(async move { *c_result.borrow_mut() = Some(future.await) })
      .unwrap();

    pool.run_until_stalled();
    assert_eq!(*result.borrow(), None);
    subject.next(5);
    pool.run_until_stalled();
    assert_eq!(*result.borrow(), Some(Ok(5)));
    assert_eq!(subject.subscriber_count(), 0);
  }

  #[test]
  fn dropping_unsubscribes() {
    let subject = Subject::<i32, ()>::new();
    let future = last_value_from(subject.clone());
    assert_eq!(subject.subscriber_count(), 1);
    drop(future);
    assert_eq!(subject.subscriber_count(), 0);
  }
}
