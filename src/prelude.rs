//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::error::{EmptyError, ValueError};
pub use crate::observable;
pub use crate::observable::{
  BoxOp, Create, Observable, ObservableExt, ObservableFuture,
};
pub use crate::observer::{FnMutObserver, Observer, ObserverAll};
pub use crate::ops;
pub use crate::ops::into_future::{
  first_value_from, first_value_from_with, last_value_from,
  last_value_from_with, ValueConfig,
};
pub use crate::ops::Operator;
pub use crate::scheduler::{Duration, Scheduler, TaskHandle, TestScheduler};
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioLocalScheduler;
pub use crate::subject::{AsObservable, AsObserver, BehaviorSubject, Subject};
pub use crate::subscriber::{Notification, Subscriber};
pub use crate::subscription::{
  Subscription, SubscriptionGuard, SubscriptionLike, SubscriptionWrapper,
  Teardown,
};
pub use crate::of_sequence;
