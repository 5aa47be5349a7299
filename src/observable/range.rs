use std::ops::RangeInclusive;

use super::{from_iter, ObservableIter};

/// Creates an observable emitting `count` consecutive integers starting at
/// `start`, then completing. A `count` of zero or less emits nothing.
///
/// The sequence stops at `i64::MAX`: values past it do not exist, so a range
/// reaching beyond it emits fewer than `count` values.
///
/// ```
/// use rxstream::prelude::*;
///
/// observable::range(5, 4).subscribe(|v| println!("{v}"));
/// // prints 5, 6, 7, 8
/// ```
pub fn range(start: i64, count: i64) -> ObservableIter<RangeInclusive<i64>> {
  if count <= 0 {
    return from_iter(1..=0);
  }
  let last = start.checked_add(count - 1).unwrap_or(i64::MAX);
  from_iter(start..=last)
}
