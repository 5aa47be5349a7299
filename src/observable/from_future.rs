use std::{convert::Infallible, marker::PhantomData};

use futures::future::{Future, FutureExt, Shared};

use crate::prelude::*;

/// An observable that emits the output of `future`, then completes.
///
/// The output is always a value, `Result` outputs included; see
/// [`from_future_result`] to route `Err` into the error channel. The future
/// is driven by `scheduler` and shared, so it runs once no matter how many
/// subscriptions observe its settlement.
///
/// ```rust
/// # use rxstream::prelude::*;
/// # use std::{cell::Cell, rc::Rc};
/// use futures::{executor::LocalPool, future};
///
/// let mut pool = LocalPool::new();
/// let res = Rc::new(Cell::new(0));
/// let c_res = res.clone();
/// observable::from_future(future::ready(1), pool.spawner())
///   .subscribe(move |v| c_res.set(v));
///
/// assert_eq!(res.get(), 0);
/// pool.run();
/// assert_eq!(res.get(), 1);
/// ```
pub fn from_future<F, S>(future: F, scheduler: S) -> FutureObservable<F, S>
where
  F: Future,
  F::Output: Clone,
{
  FutureObservable { future: future.shared(), scheduler }
}

pub struct FutureObservable<F: Future, S> {
  future: Shared<F>,
  scheduler: S,
}

impl<F: Future, S: Clone> Clone for FutureObservable<F, S> {
  fn clone(&self) -> Self {
    FutureObservable { future: self.future.clone(), scheduler: self.scheduler.clone() }
  }
}

impl<F, S> Observable for FutureObservable<F, S>
where
  F: Future + 'static,
  F::Output: Clone + 'static,
  S: Scheduler,
{
  type Item = F::Output;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<F::Output, Infallible>) -> Subscription {
    let c_subscriber = subscriber.clone();
    let handle = self.scheduler.spawn(self.future.map(move |v| {
      c_subscriber.next(v);
      c_subscriber.complete();
    }));
    subscriber.add(handle);
    subscriber.subscription()
  }
}

/// Like [`from_future`] for futures resolving to a `Result`: `Ok(v)` emits
/// `v` and completes, `Err(e)` errors the stream.
pub fn from_future_result<F, S, Item, Err>(
  future: F, scheduler: S,
) -> FutureResultObservable<F, S, Item, Err>
where
  F: Future<Output = Result<Item, Err>>,
  Item: Clone,
  Err: Clone,
{
  FutureResultObservable { future: future.shared(), scheduler, marker: PhantomData }
}

pub struct FutureResultObservable<F: Future, S, Item, Err> {
  future: Shared<F>,
  scheduler: S,
  marker: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Future, S: Clone, Item, Err> Clone for FutureResultObservable<F, S, Item, Err> {
  fn clone(&self) -> Self {
    FutureResultObservable {
      future: self.future.clone(),
      scheduler: self.scheduler.clone(),
      marker: PhantomData,
    }
  }
}

impl<F, S, Item, Err> Observable for FutureResultObservable<F, S, Item, Err>
where
  F: Future<Output = Result<Item, Err>> + 'static,
  S: Scheduler,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) -> Subscription {
    let c_subscriber = subscriber.clone();
    let handle = self.scheduler.spawn(self.future.map(move |v| match v {
      Ok(v) => {
        c_subscriber.next(v);
        c_subscriber.complete();
      }
      Err(err) => c_subscriber.error(err),
    }));
    subscriber.add(handle);
    subscriber.subscription()
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use futures::{
    channel::oneshot,
    executor::LocalPool,
    future::{self, FutureExt},
  };
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  #[test]
  fn emits_after_settlement() {
    TestScheduler::init();
    let (tx, rx) = oneshot::channel::<i32>();
    let seen = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(Cell::new(false));
    let (c_seen, c_completed) = (seen.clone(), completed.clone());
    observable::from_future(rx.map(|v| v.unwrap_or_default()), TestScheduler)
      .subscribe_complete(
        move |v| c_seen.borrow_mut().push(v),
        move || c_completed.set(true),
      );

    TestScheduler::flush();
    assert!(seen.borrow().is_empty());
    assert!(!completed.get());

    let _ = tx.send(7);
    TestScheduler::flush();
    assert_eq!(*seen.borrow(), vec![7]);
    assert!(completed.get());
  }

  #[cfg(feature = "timer")]
  #[test]
  fn shared_between_subscribers() {
    let mut local = LocalPool::new();
    let polls = Rc::new(Cell::new(0));
    let c_polls = polls.clone();
    let source = observable::from_future(
      future::lazy(move |_| {
        c_polls.set(c_polls.get() + 1);
        42
      }),
      local.spawner(),
    );
    let sum = Rc::new(Cell::new(0));
    let (s1, s2) = (sum.clone(), sum.clone());
    source.clone().subscribe(move |v| s1.set(s1.get() + v));
    source.subscribe(move |v| s2.set(s2.get() + v));

    local.run();
    assert_eq!(polls.get(), 1);
    assert_eq!(sum.get(), 84);
  }

  #[cfg(feature = "timer")]
  #[test]
  fn from_future_result() {
    let mut local = LocalPool::new();
    let hits = Rc::new(Cell::new(0));
    let errs = Rc::new(Cell::new(0));
    let (c_hits, c_errs) = (hits.clone(), errs.clone());
    let (c_hits2, c_errs2) = (hits.clone(), errs.clone());

    observable::from_future_result(future::ok::<i32, ()>(1), local.spawner())
      .subscribe_err(move |_| c_hits.set(c_hits.get() + 1), move |_| c_errs.set(c_errs.get() + 1));
    observable::from_future_result(future::err::<i32, ()>(()), local.spawner())
      .subscribe_err(move |_| c_hits2.set(c_hits2.get() + 1), move |_| c_errs2.set(c_errs2.get() + 1));

    local.run();
    assert_eq!(hits.get(), 1);
    assert_eq!(errs.get(), 1);
  }

  #[test]
  fn unsubscribe_before_settlement() {
    TestScheduler::init();
    let hit = Rc::new(Cell::new(false));
    let c_hit = hit.clone();
    let mut subscription =
      observable::from_future(future::ready(1), TestScheduler).subscribe(move |_| c_hit.set(true));
    subscription.unsubscribe();
    TestScheduler::flush();
    assert!(!hit.get());
  }
}
