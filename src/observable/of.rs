use std::convert::Infallible;

use crate::prelude::*;

/// Creates an observable producing multiple values.
///
/// Completes immediately after emitting the values given, in order. Never
/// emits an error. With no values it completes right away.
///
/// # Examples
///
/// ```
/// use rxstream::prelude::*;
///
/// of_sequence!(1, 2, 3)
///   .subscribe(|v| {println!("{},", v)});
///
/// // print log:
/// // 1
/// // 2
/// // 3
/// ```
#[macro_export]
macro_rules! of_sequence {
  ( $( $item:expr ),* $(,)? ) => {
    $crate::observable::create(
      move |s: $crate::subscriber::Subscriber<_, ::std::convert::Infallible>| {
        $(
          s.next($item);
        )*
        s.complete();
      },
    )
  };
}

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given. Never emits an error.
///
/// # Examples
///
/// ```
/// use rxstream::prelude::*;
///
/// observable::of(123)
///   .subscribe(|v| {println!("{},", v)});
/// ```
pub fn of<Item>(v: Item) -> OfObservable<Item> { OfObservable(v) }

#[derive(Clone)]
pub struct OfObservable<Item>(pub(crate) Item);

impl<Item: 'static> Observable for OfObservable<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Infallible>) -> Subscription {
    subscriber.next(self.0);
    subscriber.complete();
    subscriber.subscription()
  }
}
