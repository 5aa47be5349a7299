use std::{
  cell::RefCell,
  collections::VecDeque,
  rc::{Rc, Weak},
};

use crate::{
  observer::{BoxedObserver, Observer},
  subscription::{Subscription, SubscriptionLike},
};

/// One notification of an observable's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

/// The emit handle a producer pushes notifications into.
///
/// A `Subscriber` wraps the downstream observer together with the
/// subscription of this execution, and guards the observer contract:
///
/// - after `error` or `complete` nothing else is delivered, and the
///   subscription is unsubscribed so every teardown runs;
/// - after the subscription is closed nothing is delivered;
/// - a notification pushed while the observer is still handling the previous
///   one is queued and delivered once that call returns.
///
/// Cloning a subscriber yields another handle to the same execution.
pub struct Subscriber<Item, Err> {
  core: Rc<RefCell<SubscriberCore<Item, Err>>>,
  subscription: Subscription,
}

struct SubscriberCore<Item, Err> {
  observer: Option<BoxedObserver<Item, Err>>,
  stopped: bool,
  emitting: bool,
  queue: VecDeque<Notification<Item, Err>>,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self {
    Subscriber {
      core: self.core.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<Item: 'static, Err: 'static> Subscriber<Item, Err> {
  pub fn new<O>(observer: O) -> Self
  where
    O: Observer<Item, Err> + 'static,
  {
    let core = Rc::new(RefCell::new(SubscriberCore {
      observer: Some(Box::new(observer) as BoxedObserver<Item, Err>),
      stopped: false,
      emitting: false,
      queue: VecDeque::new(),
    }));
    let subscription = Subscription::default();
    let weak: Weak<RefCell<SubscriberCore<Item, Err>>> = Rc::downgrade(&core);
    subscription.add_teardown(move || {
      if let Some(core) = weak.upgrade() {
        // Release the observer, and everything it captures, outside the
        // borrow.
        let observer = {
          let mut core = core.borrow_mut();
          core.queue.clear();
          core.observer.take()
        };
        drop(observer);
      }
    });
    Subscriber { core, subscription }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  #[inline]
  pub fn next(&self, value: Item) { self.emit(Notification::Next(value)) }

  #[inline]
  pub fn error(&self, err: Err) { self.emit(Notification::Error(err)) }

  #[inline]
  pub fn complete(&self) { self.emit(Notification::Complete) }

  /// Whether a terminal notification was received or the subscription ended.
  pub fn is_closed(&self) -> bool {
    self.core.borrow().stopped || self.subscription.is_closed()
  }

  /// Chain a teardown to this execution.
  #[inline]
  pub fn add<S: SubscriptionLike + 'static>(&self, teardown: S) {
    self.subscription.add(teardown)
  }

  /// The subscription of this execution.
  #[inline]
  pub fn subscription(&self) -> Subscription { self.subscription.clone() }

  fn emit(&self, notification: Notification<Item, Err>) {
    {
      let mut core = self.core.borrow_mut();
      if core.stopped || self.subscription.is_closed() {
        return;
      }
      if !matches!(notification, Notification::Next(_)) {
        core.stopped = true;
      }
      if core.emitting {
        core.queue.push_back(notification);
        return;
      }
      core.emitting = true;
    }

    let mut notification = Some(notification);
    while let Some(n) = notification.take() {
      let observer = self.core.borrow_mut().observer.take();
      let Some(mut observer) = observer else { break };
      match n {
        Notification::Next(v) => {
          observer.next(v);
          if !self.subscription.is_closed() {
            self.core.borrow_mut().observer = Some(observer);
          }
        }
        Notification::Error(err) => {
          observer.error(err);
          self.subscription.clone().unsubscribe();
        }
        Notification::Complete => {
          observer.complete();
          self.subscription.clone().unsubscribe();
        }
      }
      if self.subscription.is_closed() {
        break;
      }
      notification = self.core.borrow_mut().queue.pop_front();
    }

    let mut core = self.core.borrow_mut();
    core.emitting = false;
    if self.subscription.is_closed() {
      core.queue.clear();
      let observer = core.observer.take();
      drop(core);
      drop(observer);
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{observer::ObserverAll, subscription::Teardown};
  use std::cell::Cell;

  fn recorder(
    log: &Rc<RefCell<Vec<Notification<i32, &'static str>>>>,
  ) -> Subscriber<i32, &'static str> {
    let (n, e, c) = (log.clone(), log.clone(), log.clone());
    Subscriber::new(ObserverAll::new(
      move |v| n.borrow_mut().push(Notification::Next(v)),
      move |err| e.borrow_mut().push(Notification::Error(err)),
      move || c.borrow_mut().push(Notification::Complete),
    ))
  }

  #[test]
  fn nothing_after_error() {
    let log = Rc::new(RefCell::new(vec![]));
    let subscriber = recorder(&log);
    subscriber.next(1);
    subscriber.error("boom");
    subscriber.next(2);
    subscriber.complete();
    subscriber.error("again");

    assert_eq!(
      *log.borrow(),
      vec![Notification::Next(1), Notification::Error("boom")]
    );
    assert!(subscriber.is_closed());
    assert!(subscriber.subscription().is_closed());
  }

  #[test]
  fn terminal_runs_teardown_once() {
    let log = Rc::new(RefCell::new(vec![]));
    let subscriber = recorder(&log);
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    subscriber.add(Teardown::new(move || c_hits.set(c_hits.get() + 1)));

    subscriber.complete();
    subscriber.subscription().unsubscribe();
    subscriber.complete();

    assert_eq!(hits.get(), 1);
  }

  #[test]
  fn nothing_after_unsubscribe() {
    let log = Rc::new(RefCell::new(vec![]));
    let subscriber = recorder(&log);
    subscriber.next(1);
    subscriber.subscription().unsubscribe();
    subscriber.next(2);
    subscriber.complete();

    assert_eq!(*log.borrow(), vec![Notification::Next(1)]);
  }

  #[test]
  fn reentrant_notifications_are_serialized() {
    let log = Rc::new(RefCell::new(vec![]));
    let slot: Rc<RefCell<Option<Subscriber<i32, ()>>>> = Rc::default();
    let (c_log, c_slot) = (log.clone(), slot.clone());
    let subscriber = Subscriber::new(crate::observer::FnMutObserver(
      move |v: i32| {
        c_log.borrow_mut().push(format!("start {v}"));
        if v == 1 {
          if let Some(s) = c_slot.borrow().as_ref() {
            s.next(2);
          }
        }
        c_log.borrow_mut().push(format!("end {v}"));
      },
    ));
    *slot.borrow_mut() = Some(subscriber.clone());
    subscriber.next(1);

    assert_eq!(*log.borrow(), vec!["start 1", "end 1", "start 2", "end 2"]);
  }
}
