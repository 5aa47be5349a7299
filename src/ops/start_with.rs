use crate::prelude::*;

/// Emits `values` synchronously on subscription, then subscribes to the
/// source.
pub fn start_with<Item>(values: Vec<Item>) -> StartWith<Item> { StartWith(values) }

#[derive(Clone)]
pub struct StartWith<Item>(Vec<Item>);

impl<S: Observable> Operator<S> for StartWith<S::Item> {
  type Output = StartWithOp<S>;

  fn apply(self, source: S) -> Self::Output { StartWithOp { source, values: self.0 } }
}

pub struct StartWithOp<S: Observable> {
  pub(crate) source: S,
  pub(crate) values: Vec<S::Item>,
}

impl<S> Clone for StartWithOp<S>
where
  S: Observable + Clone,
  S::Item: Clone,
{
  fn clone(&self) -> Self {
    StartWithOp { source: self.source.clone(), values: self.values.clone() }
  }
}

impl<S: Observable> Observable for StartWithOp<S> {
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) -> Subscription {
    let downstream = subscriber.subscription();
    for v in self.values {
      if subscriber.is_closed() {
        return downstream;
      }
      subscriber.next(v);
    }
    if !subscriber.is_closed() {
      downstream.add(self.source.actual_subscribe(subscriber));
    }
    downstream
  }

  #[inline]
  fn is_hot(&self) -> bool { self.source.is_hot() }
}
