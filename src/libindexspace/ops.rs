// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interval and box specific operations and their arguments.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use serde::{Deserialize, Serialize};
use crate::error::{IndexSpaceError, Result};

/// Smallest primitive set containing both operands.
pub trait Hull<RHS = Self>
{
  type Output;
  fn hull(&self, rhs: &RHS) -> Self::Output;
}

/// The unbounded set of a primitive kind.
pub trait Whole
{
  fn whole() -> Self;
}

/// Number of cells added before and after an interval.
///
/// A single integer converts to a symmetric width, a pair `(before, after)` to an asymmetric one. The serialized form follows the same convention.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "WidthRepr", into = "WidthRepr")]
pub struct HaloWidth {
  pub before: i64,
  pub after: i64
}

impl HaloWidth
{
  pub fn new(before: i64, after: i64) -> HaloWidth {
    HaloWidth { before, after }
  }

  pub fn symmetric(width: i64) -> HaloWidth {
    HaloWidth::new(width, width)
  }

  pub fn negated(self) -> Result<HaloWidth> {
    match (self.before.checked_neg(), self.after.checked_neg()) {
      (Some(before), Some(after)) => Ok(HaloWidth::new(before, after)),
      _ => Err(IndexSpaceError::Overflow)
    }
  }

  pub fn widest(self) -> i64 {
    self.before.max(self.after)
  }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WidthRepr {
  Symmetric(i64),
  Asymmetric(i64, i64)
}

impl From<WidthRepr> for HaloWidth
{
  fn from(repr: WidthRepr) -> HaloWidth {
    match repr {
      WidthRepr::Symmetric(w) => HaloWidth::symmetric(w),
      WidthRepr::Asymmetric(before, after) => HaloWidth::new(before, after)
    }
  }
}

impl From<HaloWidth> for WidthRepr
{
  fn from(w: HaloWidth) -> WidthRepr {
    if w.before == w.after { WidthRepr::Symmetric(w.before) }
    else { WidthRepr::Asymmetric(w.before, w.after) }
  }
}

macro_rules! halo_width_from_impl
{
  ( $( $t: ty ),* ) =>
  {$(
    impl From<$t> for HaloWidth
    {
      fn from(w: $t) -> HaloWidth {
        HaloWidth::symmetric(w as i64)
      }
    }

    impl From<($t, $t)> for HaloWidth
    {
      fn from((before, after): ($t, $t)) -> HaloWidth {
        HaloWidth::new(before as i64, after as i64)
      }
    }
  )*}
}

halo_width_from_impl!(i32, i64);

/// Relative selection along one axis with Python-like semantics: negative positions count from the end, missing positions mean "from the start" and "to the end".
///
/// Only the unit step is supported; any other step is rejected when the slice is applied.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AxisSlice {
  pub start: Option<i64>,
  pub stop: Option<i64>,
  pub step: Option<i64>
}

impl AxisSlice
{
  pub fn new(start: Option<i64>, stop: Option<i64>) -> AxisSlice {
    AxisSlice { start, stop, step: None }
  }

  pub fn full() -> AxisSlice {
    AxisSlice::default()
  }

  pub fn with_step(self, step: i64) -> AxisSlice {
    AxisSlice { step: Some(step), ..self }
  }

  pub(crate) fn check_step(&self) -> Result<()> {
    match self.step {
      None | Some(1) => Ok(()),
      Some(step) => Err(IndexSpaceError::UnsupportedStep(step))
    }
  }
}

impl From<RangeFull> for AxisSlice
{
  fn from(_: RangeFull) -> AxisSlice {
    AxisSlice::full()
  }
}

macro_rules! axis_slice_from_impl
{
  ( $( $t: ty ),* ) =>
  {$(
    impl From<Range<$t>> for AxisSlice
    {
      fn from(r: Range<$t>) -> AxisSlice {
        AxisSlice::new(Some(r.start as i64), Some(r.end as i64))
      }
    }

    impl From<RangeFrom<$t>> for AxisSlice
    {
      fn from(r: RangeFrom<$t>) -> AxisSlice {
        AxisSlice::new(Some(r.start as i64), None)
      }
    }

    impl From<RangeTo<$t>> for AxisSlice
    {
      fn from(r: RangeTo<$t>) -> AxisSlice {
        AxisSlice::new(None, Some(r.end as i64))
      }
    }
  )*}
}

axis_slice_from_impl!(i32, i64);

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::{assert_de_tokens, assert_ser_tokens, Token};

  #[test]
  fn halo_width_conversions() {
    assert_eq!(HaloWidth::from(2), HaloWidth::new(2, 2));
    assert_eq!(HaloWidth::from((1, 3)), HaloWidth::new(1, 3));
    assert_eq!(HaloWidth::new(1, -3).negated(), Ok(HaloWidth::new(-1, 3)));
    assert_eq!(HaloWidth::new(i64::MIN, 0).negated(), Err(IndexSpaceError::Overflow));
    assert_eq!(HaloWidth::new(1, 3).widest(), 3);
  }

  #[test]
  fn halo_width_serde() {
    assert_ser_tokens(&HaloWidth::symmetric(2), &[Token::I64(2)]);
    assert_de_tokens(&HaloWidth::symmetric(2), &[Token::I64(2)]);
    assert_de_tokens(&HaloWidth::new(0, 1), &[
      Token::Seq { len: Some(2) },
      Token::I64(0),
      Token::I64(1),
      Token::SeqEnd
    ]);
  }

  #[test]
  fn axis_slice_conversions() {
    assert_eq!(AxisSlice::from(..), AxisSlice::full());
    assert_eq!(AxisSlice::from(1..3), AxisSlice::new(Some(1), Some(3)));
    assert_eq!(AxisSlice::from(-2..), AxisSlice::new(Some(-2), None));
    assert_eq!(AxisSlice::from(..-1), AxisSlice::new(None, Some(-1)));
    assert_eq!(AxisSlice::full().with_step(1).check_step(), Ok(()));
    assert_eq!(AxisSlice::full().with_step(2).check_step(), Err(IndexSpaceError::UnsupportedStep(2)));
  }
}
