// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;
use crate::bound::Bound;

/// Every failure of the set algebra. None of them is transient: they all denote a logic error of the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexSpaceError {
  #[error("malformed interval: stop {stop} is below start {start}")]
  MalformedInterval { start: Bound, stop: Bound },

  #[error("a union needs at least two components, got {0}; use `union` instead")]
  TooFewComponents(usize),

  #[error("empty set given as a union component; use `union` instead")]
  EmptyComponent,

  #[error("a box needs at least two axes, got {0}")]
  TooFewAxes(usize),

  #[error("dimension mismatch: expected {expected}, found {found}")]
  DimensionMismatch { expected: usize, found: usize },

  #[error("the empty set can not be {0}")]
  EmptyOperand(&'static str),

  #[error("index {index} out of range for an axis of size {size}")]
  IndexOutOfRange { index: i64, size: u64 },

  #[error("slice step {0} is not supported, only unit steps are")]
  UnsupportedStep(i64),

  #[error("unsupported operand combination: {op} on {operand}")]
  UnsupportedOperands { op: &'static str, operand: &'static str },

  #[error("operation requires a bounded set")]
  Unbounded,

  #[error("coordinate overflow")]
  Overflow,

  #[error("halo width {width} on periodic axis {axis} exceeds the global extent {extent}")]
  HaloExceedsDomain { axis: usize, width: i64, extent: u64 },

  #[error("domain {0} is not inside the global domain")]
  DomainOutsideGlobal(i32),
}

pub type Result<T> = std::result::Result<T, IndexSpaceError>;

/// Fails with `DimensionMismatch` unless `found == expected`.
pub(crate) fn check_dim(expected: usize, found: usize) -> Result<()> {
  if expected == found { Ok(()) }
  else { Err(IndexSpaceError::DimensionMismatch { expected, found }) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display() {
    let e = IndexSpaceError::DimensionMismatch { expected: 3, found: 2 };
    assert_eq!(e.to_string(), "dimension mismatch: expected 3, found 2");

    let e = IndexSpaceError::MalformedInterval { start: Bound::from(4), stop: Bound::NegInf };
    assert_eq!(e.to_string(), "malformed interval: stop -inf is below start 4");

    let e = IndexSpaceError::EmptyOperand("extended");
    assert_eq!(e.to_string(), "the empty set can not be extended");

    let e = IndexSpaceError::DomainOutsideGlobal(7);
    assert_eq!(e.to_string(), "domain 7 is not inside the global domain");
  }

  #[test]
  fn check_dim_reports_both_sides() {
    assert_eq!(check_dim(2, 2), Ok(()));
    assert_eq!(check_dim(2, 3), Err(IndexSpaceError::DimensionMismatch { expected: 2, found: 3 }));
  }
}
