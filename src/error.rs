//! Error types raised by the future interop.

use thiserror::Error;

/// A stream completed without emitting a value, and no default was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("no elements in sequence")]
pub struct EmptyError;

/// Why `first_value_from` or `last_value_from` did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError<Err> {
  #[error(transparent)]
  Empty(#[from] EmptyError),
  #[error("source observable errored: {0:?}")]
  Source(Err),
}

impl<Err> ValueError<Err> {
  pub fn is_empty(&self) -> bool { matches!(self, ValueError::Empty(_)) }

  /// The source error, if that is what ended the stream.
  pub fn into_source(self) -> Option<Err> {
    match self {
      ValueError::Source(err) => Some(err),
      ValueError::Empty(_) => None,
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display() {
    assert_eq!(EmptyError.to_string(), "no elements in sequence");
    let empty: ValueError<&str> = EmptyError.into();
    assert_eq!(empty.to_string(), "no elements in sequence");
    assert!(empty.is_empty());
    assert_eq!(
      ValueError::Source("boom").to_string(),
      "source observable errored: \"boom\""
    );
    assert_eq!(ValueError::Source(1).into_source(), Some(1));
  }
}
