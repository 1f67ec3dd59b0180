// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Coordinates of the index space.
//!
//! A `Bound` is either a finite `i64` coordinate or one of the two sentinels `-inf` and `+inf`. The sentinels only appear as ends of unbounded intervals (the universe and the complements computed from it), they are never iterated.
//!
//! ```rust
//! use index_space::Bound;
//!
//! assert!(Bound::NegInf < Bound::from(-1_000_000));
//! assert!(Bound::from(7) < Bound::PosInf);
//! assert_eq!(Bound::PosInf.offset(3).unwrap(), Bound::PosInf);
//! ```

use std::fmt;
use num_traits::Bounded as NumBounded;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use crate::error::{IndexSpaceError, Result};

/// A coordinate along one axis, totally ordered as `NegInf < Finite(_) < PosInf`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Bound {
  NegInf,
  Finite(i64),
  PosInf
}

impl Bound
{
  pub fn is_finite(self) -> bool {
    match self {
      Bound::Finite(_) => true,
      _ => false
    }
  }

  pub fn finite(self) -> Option<i64> {
    match self {
      Bound::Finite(v) => Some(v),
      _ => None
    }
  }

  /// The finite value, or `Unbounded` for the sentinels.
  pub fn to_finite(self) -> Result<i64> {
    self.finite().ok_or(IndexSpaceError::Unbounded)
  }

  /// Shifts a finite coordinate by `delta`. Unbounded ends stay where they are.
  pub fn offset(self, delta: i64) -> Result<Bound> {
    match self {
      Bound::Finite(v) => v.checked_add(delta)
        .map(Bound::Finite)
        .ok_or(IndexSpaceError::Overflow),
      unbounded => Ok(unbounded)
    }
  }

  /// Number of integers in `[lower, upper)`, saturating at `u64::MAX` when either end is unbounded.
  pub fn distance(lower: Bound, upper: Bound) -> u64 {
    if upper <= lower {
      return 0;
    }
    match (lower, upper) {
      (Bound::Finite(l), Bound::Finite(u)) =>
        (u as i128 - l as i128).to_u64().unwrap_or(u64::MAX),
      _ => u64::MAX
    }
  }
}

impl NumBounded for Bound
{
  fn min_value() -> Bound {
    Bound::NegInf
  }

  fn max_value() -> Bound {
    Bound::PosInf
  }
}

impl From<i64> for Bound
{
  fn from(v: i64) -> Bound {
    Bound::Finite(v)
  }
}

impl From<i32> for Bound
{
  fn from(v: i32) -> Bound {
    Bound::Finite(v as i64)
  }
}

impl PartialEq<i64> for Bound
{
  fn eq(&self, other: &i64) -> bool {
    *self == Bound::Finite(*other)
  }
}

impl fmt::Display for Bound
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Bound::NegInf => write!(f, "-inf"),
      Bound::Finite(v) => write!(f, "{}", v),
      Bound::PosInf => write!(f, "inf")
    }
  }
}
