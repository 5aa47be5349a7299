use crate::prelude::*;

use super::{timer, TimerObservable};

/// Creates an observable which will fire at `period` time into the future,
/// and will repeat every `period` interval after. Emits `0, 1, 2, ...` and
/// never completes.
///
/// Same as `timer(period, Some(period), scheduler)`.
pub fn interval<S>(period: Duration, scheduler: S) -> TimerObservable<S> {
  timer(period, Some(period), scheduler)
}
