//! The operator library.
//!
//! Every operator exists twice: as a chained method on
//! [`ObservableExt`](crate::observable::ObservableExt) and as a free factory
//! returning an [`Operator`] value for [`pipe`](crate::observable::ObservableExt::pipe).

use crate::prelude::*;

pub mod concat;
pub mod delay;
pub mod distinct_until_changed;
pub mod filter;
pub mod first;
pub mod into_future;
pub mod last;
pub mod map;
pub mod map_err;
pub mod merge;
pub mod skip;
pub mod start_with;
pub mod take;
pub mod take_while;
pub mod tap;

pub use delay::delay;
pub use distinct_until_changed::{distinct_until_changed, distinct_until_changed_by};
pub use filter::filter;
pub use first::{first, first_or};
pub use last::last;
pub use map::{map, try_map};
pub use map_err::map_err;
pub use skip::skip;
pub use start_with::start_with;
pub use take::take;
pub use take_while::{take_while, take_while_inclusive};
pub use tap::tap;

/// A transformation from one observable into another.
///
/// Tuples of operators are operators too, applied left to right, which is how
/// `pipe` composes several of them.
pub trait Operator<S: Observable> {
  type Output: Observable;

  fn apply(self, source: S) -> Self::Output;
}

impl<S, A, B> Operator<S> for (A, B)
where
  S: Observable,
  A: Operator<S>,
  B: Operator<A::Output>,
{
  type Output = B::Output;

  fn apply(self, source: S) -> Self::Output { self.1.apply(self.0.apply(source)) }
}

impl<S, A, B, C> Operator<S> for (A, B, C)
where
  S: Observable,
  A: Operator<S>,
  B: Operator<A::Output>,
  C: Operator<B::Output>,
{
  type Output = C::Output;

  fn apply(self, source: S) -> Self::Output {
    let (a, b, c) = self;
    c.apply(b.apply(a.apply(source)))
  }
}

impl<S, A, B, C, D> Operator<S> for (A, B, C, D)
where
  S: Observable,
  A: Operator<S>,
  B: Operator<A::Output>,
  C: Operator<B::Output>,
  D: Operator<C::Output>,
{
  type Output = D::Output;

  fn apply(self, source: S) -> Self::Output {
    let (a, b, c, d) = self;
    d.apply(c.apply(b.apply(a.apply(source))))
  }
}

impl<S, A, B, C, D, E> Operator<S> for (A, B, C, D, E)
where
  S: Observable,
  A: Operator<S>,
  B: Operator<A::Output>,
  C: Operator<B::Output>,
  D: Operator<C::Output>,
  E: Operator<D::Output>,
{
  type Output = E::Output;

  fn apply(self, source: S) -> Self::Output {
    let (a, b, c, d, e) = self;
    e.apply(d.apply(c.apply(b.apply(a.apply(source)))))
  }
}

/// Subscribe `source` with `observer`, an operator's observer wrapping the
/// downstream subscriber.
///
/// The upstream subscription joins `downstream` before the source starts, so
/// a synchronous source sees a downstream unsubscribe (from `take`, `first`)
/// right away and stops producing.
pub(crate) fn subscribe_upstream<S, O>(source: S, observer: O, downstream: &Subscription)
where
  S: Observable,
  O: Observer<S::Item, S::Err> + 'static,
{
  let upstream = Subscriber::new(observer);
  let subscription = upstream.subscription();
  downstream.add(subscription.clone());
  if subscription.is_closed() {
    return;
  }
  let teardown = source.actual_subscribe(upstream);
  subscription.add(teardown);
}
