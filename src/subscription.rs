use smallvec::SmallVec;
use std::{
  any::Any,
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

mod dynamic;
pub use dynamic::DynamicSubscriptions;

/// Anything that can be cancelled: subscriptions, teardown closures,
/// scheduled tasks.
pub trait SubscriptionLike {
  /// Stop the execution and release what it holds. Calling it again has no
  /// effect.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

/// The unit subscription owns nothing to release, so it is always closed.
impl SubscriptionLike for () {
  #[inline]
  fn unsubscribe(&mut self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl Debug for Box<dyn SubscriptionLike> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Box<dyn SubscriptionLike>")
      .field("is_closed", &self.is_closed())
      .finish()
  }
}

/// The cancellation handle of one execution of an observable.
///
/// Cloning shares the same underlying state. `unsubscribe` is idempotent: the
/// first call marks the subscription closed and runs every registered
/// teardown exactly once, later calls do nothing. A teardown added to a
/// subscription that is already closed runs immediately.
#[derive(Clone, Debug, Default)]
pub struct Subscription(Rc<RefCell<Inner>>);

impl Subscription {
  /// A subscription that is already closed.
  pub fn closed() -> Self {
    let subscription = Self::default();
    subscription.0.borrow_mut().closed = true;
    subscription
  }

  /// Register `subscription` to be released when this one is.
  pub fn add<S: SubscriptionLike + 'static>(&self, subscription: S) {
    if self.is_same(&subscription) || subscription.is_closed() {
      return;
    }
    let mut subscription = subscription;
    let mut inner = self.0.borrow_mut();
    if inner.closed {
      drop(inner);
      subscription.unsubscribe();
    } else {
      inner.add(Box::new(subscription));
    }
  }

  /// Register a closure to run when this subscription is released.
  #[inline]
  pub fn add_teardown(&self, teardown: impl FnOnce() + 'static) {
    self.add(Teardown::new(teardown))
  }

  /// Count of teardowns still waiting to run.
  pub fn teardown_size(&self) -> usize { self.0.borrow().teardown.len() }

  fn is_same(&self, other: &dyn Any) -> bool {
    if let Some(other) = other.downcast_ref::<Self>() {
      Rc::ptr_eq(&self.0, &other.0)
    } else {
      false
    }
  }
}

impl SubscriptionLike for Subscription {
  fn unsubscribe(&mut self) {
    let teardown = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    // The borrow is released first: teardowns may touch this subscription.
    for mut t in teardown {
      t.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.borrow().closed }
}

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[Box<dyn SubscriptionLike>; 1]>,
}

impl Debug for Inner {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Inner")
      .field("closed", &self.closed)
      .field("teardown_count", &self.teardown.len())
      .finish()
  }
}

impl Inner {
  fn add(&mut self, v: Box<dyn SubscriptionLike>) {
    self.teardown.retain(|v| !v.is_closed());
    self.teardown.push(v);
  }
}

/// A cleanup closure run at most once, when the owning subscription ends.
pub struct Teardown(Option<Box<dyn FnOnce()>>);

impl Teardown {
  pub fn new(f: impl FnOnce() + 'static) -> Self { Teardown(Some(Box::new(f))) }
}

impl SubscriptionLike for Teardown {
  #[inline]
  fn unsubscribe(&mut self) {
    if let Some(f) = self.0.take() {
      f()
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_none() }
}

impl<T: ?Sized> SubscriptionLike for Box<T>
where
  T: SubscriptionLike,
{
  #[inline]
  fn unsubscribe(&mut self) {
    let s = &mut **self;
    s.unsubscribe()
  }

  #[inline]
  fn is_closed(&self) -> bool {
    let s = &**self;
    s.is_closed()
  }
}

/// What the `subscribe` methods return. Dropping it leaves the stream
/// running; call `unsubscribe_when_dropped` to tie the stream to a scope.
#[derive(Clone, Debug)]
pub struct SubscriptionWrapper<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionWrapper<T> {
  /// Unsubscribe once the returned guard is dropped.
  ///
  /// Bind the guard to a named variable: `let _ = ...` drops it on the spot.
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<T> {
    SubscriptionGuard(self.0)
  }

  pub fn into_inner(self) -> T { self.0 }
}

impl<T: SubscriptionLike> SubscriptionLike for SubscriptionWrapper<T> {
  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe() }
}

/// Unsubscribes the wrapped subscription on drop.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  pub fn new(subscription: T) -> SubscriptionGuard<T> {
    SubscriptionGuard(subscription)
  }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
