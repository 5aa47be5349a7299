//! Hot multicast sources.
//!
//! A [`Subject`] is both an observer and an observable: values pushed into it
//! are delivered to every subscriber currently registered, in subscription
//! order. [`BehaviorSubject`] also keeps the latest value and replays it to
//! each new subscriber.

use std::{cell::RefCell, rc::Rc};

use crate::prelude::*;

mod behavior_subject;
pub use behavior_subject::BehaviorSubject;
mod subscribers;
use subscribers::{broadcast_complete, broadcast_error, broadcast_value, Subscribers};

/// A multicast source that pushes to every current subscriber.
///
/// Cloning a subject yields another handle to the same registry.
///
/// ```rust
/// use rxstream::prelude::*;
///
/// let subject = Subject::<i32, ()>::new();
/// subject.clone().subscribe(|v| println!("a {v}"));
/// subject.clone().subscribe(|v| println!("b {v}"));
/// subject.next(1);
/// // a 1
/// // b 1
/// ```
pub struct Subject<Item, Err> {
  inner: Rc<RefCell<SubjectState<Item, Err>>>,
}

struct SubjectState<Item, Err> {
  observers: Subscribers<Item, Err>,
  terminal: Option<Terminal<Err>>,
}

#[derive(Clone)]
enum Terminal<Err> {
  Error(Err),
  Complete,
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject { inner: self.inner.clone() } }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self {
    Subject {
      inner: Rc::new(RefCell::new(SubjectState {
        observers: Subscribers::default(),
        terminal: None,
      })),
    }
  }
}

impl<Item, Err> Subject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// Number of subscribers currently registered.
  pub fn subscriber_count(&self) -> usize { self.inner.borrow().observers.len() }

  /// Whether `error` or `complete` has been called.
  pub fn is_stopped(&self) -> bool { self.inner.borrow().terminal.is_some() }

  /// A read-only view: it can be subscribed to but not pushed into.
  pub fn as_observable(&self) -> AsObservable<Self> { AsObservable(self.clone()) }

  /// An observer feeding this subject, for `subscribe_with`.
  pub fn as_observer(&self) -> AsObserver<Self> { AsObserver(self.clone()) }

  pub fn complete(&self) {
    let observers = {
      let mut state = self.inner.borrow_mut();
      if state.terminal.is_some() {
        return;
      }
      state.terminal = Some(Terminal::Complete);
      state.observers.take_all()
    };
    tracing::debug!(subscribers = observers.len(), "subject completed");
    broadcast_complete(observers);
  }
}

impl<Item: Clone, Err> Subject<Item, Err> {
  /// Deliver `value` to every subscriber registered when the call starts.
  ///
  /// Subscribers added by a callback during the broadcast do not receive
  /// this value. Does nothing once the subject is stopped.
  pub fn next(&self, value: Item) {
    let observers = {
      let state = self.inner.borrow();
      if state.terminal.is_some() {
        return;
      }
      state.observers.snapshot()
    };
    broadcast_value(observers, value);
  }
}

impl<Item, Err: Clone> Subject<Item, Err> {
  pub fn error(&self, err: Err) {
    let observers = {
      let mut state = self.inner.borrow_mut();
      if state.terminal.is_some() {
        return;
      }
      state.terminal = Some(Terminal::Error(err.clone()));
      state.observers.take_all()
    };
    tracing::debug!(subscribers = observers.len(), "subject errored");
    broadcast_error(observers, err);
  }
}

impl<Item, Err> Observable for Subject<Item, Err>
where
  Item: 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) -> Subscription {
    let subscription = subscriber.subscription();
    let terminal = self.inner.borrow().terminal.clone();
    match terminal {
      Some(Terminal::Error(err)) => subscriber.error(err),
      Some(Terminal::Complete) => subscriber.complete(),
      None if !subscriber.is_closed() => {
        let id = self.inner.borrow_mut().observers.add(subscriber);
        let registry = Rc::downgrade(&self.inner);
        subscription.add(Teardown::new(move || {
          if let Some(inner) = registry.upgrade() {
            let removed = inner.borrow_mut().observers.remove(id);
            drop(removed);
          }
        }));
      }
      None => {}
    }
    subscription
  }

  #[inline]
  fn is_hot(&self) -> bool { true }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for AsObserver<Subject<Item, Err>> {
  #[inline]
  fn next(&mut self, value: Item) { self.0.next(value) }

  #[inline]
  fn error(self, err: Err) { self.0.error(err) }

  #[inline]
  fn complete(self) { self.0.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_stopped() }
}

/// The sink end of a subject, see [`Subject::as_observer`].
///
/// The subject itself keeps `next`, `error` and `complete` as `&self`
/// methods; this handle is what `subscribe_with` takes to pipe another
/// observable into it.
#[derive(Clone)]
pub struct AsObserver<S>(S);

/// Read-only wrapper around a hot source, see [`Subject::as_observable`].
#[derive(Clone)]
pub struct AsObservable<S>(S);

impl<S: Observable> Observable for AsObservable<S> {
  type Item = S::Item;
  type Err = S::Err;

  #[inline]
  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    self.0.actual_subscribe(subscriber)
  }

  #[inline]
  fn is_hot(&self) -> bool { self.0.is_hot() }
}
