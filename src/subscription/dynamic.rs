use smallvec::SmallVec;

/// An id-keyed registry of live entries.
///
/// Each `add` hands back a fresh id that is never reused, so a stale id held
/// by a teardown can only miss, never remove someone else's entry. Insertion
/// order is kept, which is also the order `iter` and `drain` report.
///
/// ```rust
/// use rxstream::subscription::DynamicSubscriptions;
///
/// let mut subs: DynamicSubscriptions<&str> = DynamicSubscriptions::default();
/// let first = subs.add("first");
/// subs.add("second");
///
/// assert_eq!(subs.remove(first), Some("first"));
/// assert_eq!(subs.remove(first), None);
/// assert_eq!(subs.len(), 1);
/// ```
pub struct DynamicSubscriptions<U> {
  next_id: usize,
  items: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for DynamicSubscriptions<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> DynamicSubscriptions<U> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Add an item and return its unique id.
  #[inline]
  pub fn add(&mut self, item: U) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, item));
    id
  }

  /// Remove an item by id, `None` if it is already gone.
  pub fn remove(&mut self, id: usize) -> Option<U> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn contains(&self, id: usize) -> bool {
    self.items.iter().any(|(i, _)| *i == id)
  }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = U> + '_ {
    self.items.drain(..).map(|(_, item)| item)
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> {
    self.items.iter().map(|(_, item)| item)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn ids_are_never_reused() {
    let mut subs = DynamicSubscriptions::new();
    let a = subs.add(1);
    subs.remove(a);
    let b = subs.add(2);
    assert_ne!(a, b);
    assert!(!subs.contains(a));
    assert!(subs.contains(b));
  }

  #[test]
  fn keeps_insertion_order() {
    let mut subs = DynamicSubscriptions::new();
    subs.add('a');
    let b = subs.add('b');
    subs.add('c');
    subs.remove(b);
    assert_eq!(subs.iter().copied().collect::<Vec<_>>(), vec!['a', 'c']);
    assert_eq!(subs.drain().collect::<Vec<_>>(), vec!['a', 'c']);
    assert!(subs.is_empty());
  }
}
