use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{ops::subscribe_upstream, prelude::*};

/// Subscribes to the sources one after another, each once the previous one
/// completes, and completes after the last. An error ends the result, and the
/// remaining sources are never subscribed.
///
/// ```
/// use rxstream::prelude::*;
///
/// observable::concat(vec![
///   observable::from_iter(1..3).box_it(),
///   observable::range(3, 2).map(|v| v as i32).box_it(),
/// ])
/// .subscribe(|v| println!("{v}"));
/// // 1, 2, 3, 4
/// ```
pub fn concat<S, I>(sources: I) -> Concat<S>
where
  S: Observable,
  I: IntoIterator<Item = S>,
{
  Concat { sources: sources.into_iter().collect() }
}

#[derive(Clone)]
pub struct Concat<S> {
  sources: Vec<S>,
}

impl<S: Observable> Observable for Concat<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    subscribe_next(Rc::new(RefCell::new(self.sources.into())), subscriber);
    downstream
  }

  fn is_hot(&self) -> bool { self.sources.iter().any(Observable::is_hot) }
}

fn subscribe_next<S: Observable>(
  queue: Rc<RefCell<VecDeque<S>>>, subscriber: Subscriber<S::Item, S::Err>,
) {
  let next = queue.borrow_mut().pop_front();
  match next {
    Some(source) => {
      let downstream = subscriber.subscription();
      subscribe_upstream(source, ConcatObserver { observer: subscriber, queue }, &downstream);
    }
    None => subscriber.complete(),
  }
}

pub struct ConcatObserver<S: Observable> {
  observer: Subscriber<S::Item, S::Err>,
  queue: Rc<RefCell<VecDeque<S>>>,
}

impl<S: Observable> Observer<S::Item, S::Err> for ConcatObserver<S> {
  #[inline]
  fn next(&mut self, value: S::Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: S::Err) { self.observer.error(err) }

  fn complete(self) {
    if !self.observer.is_closed() {
      subscribe_next(self.queue, self.observer);
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn sequential() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::concat(vec![
      observable::from_iter(vec![1, 2]).box_it(),
      observable::range(3, 2).map(|v| v as i32).box_it(),
    ])
    .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);
  }

  #[test]
  fn waits_for_completion() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let head = Subject::<i32, ()>::new();
    head
      .clone()
      .concat_with(observable::of(100).map_err(|e| -> () { match e {} }))
      .subscribe(move |v| c_seen.borrow_mut().push(v));

    head.next(1);
    assert_eq!(*seen.borrow(), vec![1]);
    head.complete();
    assert_eq!(*seen.borrow(), vec![1, 100]);
  }

  #[test]
  fn error_stops_the_chain() {
    let subscribed = Rc::new(RefCell::new(false));
    let errors = Rc::new(RefCell::new(vec![]));
    let (c_subscribed, c_errors) = (subscribed.clone(), errors.clone());

    let tail = observable::defer(move || {
      *c_subscribed.borrow_mut() = true;
      observable::of(2).map_err(|e| -> &'static str { match e {} })
    });
    observable::throw_err::<i32, _>("broken")
      .concat_with(tail)
      .subscribe_err(|_| {}, move |e| c_errors.borrow_mut().push(e));

    assert_eq!(*errors.borrow(), vec!["broken"]);
    assert!(!*subscribed.borrow());
  }

  #[test]
  fn unsubscribe_stops_later_sources() {
    TestScheduler::init();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let mut subscription = observable::timer(Duration::from_millis(10), None, TestScheduler)
      .concat_with(observable::timer(Duration::from_millis(10), None, TestScheduler))
      .subscribe(move |v| c_seen.borrow_mut().push(v));

    TestScheduler::advance_by(Duration::from_millis(10));
    subscription.unsubscribe();
    TestScheduler::flush();
    assert_eq!(*seen.borrow(), vec![0]);
  }
}
