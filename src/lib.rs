//! # rxstream: a push-based reactive event-stream engine
//!
//! Cold observables, hot subjects, a composable operator pipeline,
//! multi-source combinators and future interop, all running on a single
//! logical thread.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxstream::prelude::*;
//!
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(move |v| c_seen.borrow_mut().push(v));
//!
//! assert_eq!(*seen.borrow(), vec![0, 4, 8, 12, 16]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A cold or hot source of notifications |
//! | [`Observer`] | Consumes `next`, `error` and `complete` notifications |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Subject`] / [`BehaviorSubject`] | Hot, multicast stream-and-sink |
//! | [`Scheduler`] | Host timer facility used by time-based sources |
//!
//! ## Feature Flags
//!
//! - **`timer`** (default): `Scheduler` for `futures::executor::LocalSpawner`
//!   backed by `futures-time`.
//! - **`tokio-scheduler`**: `Scheduler` running on a tokio `LocalSet`.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`BehaviorSubject`]: subject::BehaviorSubject
//! [`Scheduler`]: scheduler::Scheduler
#[cfg(test)]
#[macro_use]
extern crate bencher;

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;

pub use prelude::*;
