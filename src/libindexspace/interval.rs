// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Half-open interval of integers along one axis.
//!
//! An interval `[start, stop)` contains every integer `x` with `start <= x < stop`. The ends may be unbounded, which is how the universe `(-inf, inf)` and the complements computed from it are represented. There is a single empty interval: whenever `stop <= start` both ends are normalized to `(0, 0)`.
//!
//! # Examples
//!
//! ```rust
//! use index_space::{Interval, Set, union};
//!
//! let a = Interval::new(0, 10);
//! let holes = a.without(Interval::new(3, 5)).unwrap();
//! assert_eq!(holes, union(vec![Interval::new(0, 3), Interval::new(5, 10)]).unwrap());
//! assert_eq!(holes.size(), 8);
//!
//! // Any reversed or degenerate range is the empty interval.
//! assert_eq!(Interval::new(7, 2), Interval::EMPTY);
//! ```

use std::convert::TryFrom;
use std::fmt;
use std::ops::Range;
use gcollections::kind::Collection;
use gcollections::ops::{
  Bounded, Cardinality, Contains, Difference, Disjoint, Empty, Intersection, Overlap, Subset,
  Union
};
use num_traits::Bounded as NumBounded;
use serde::{Deserialize, Serialize};
use crate::bound::Bound;
use crate::error::{IndexSpaceError, Result};
use crate::ops::{AxisSlice, HaloWidth, Hull, Whole};
use crate::set::Set;
use crate::union::UnionOf;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Bound, Bound)", into = "(Bound, Bound)")]
pub struct Interval {
  start: Bound,
  stop: Bound
}

impl Interval
{
  pub const EMPTY: Interval = Interval { start: Bound::Finite(0), stop: Bound::Finite(0) };

  /// Builds `[start, stop)`, normalizing every range with `stop <= start` to the empty interval.
  pub fn new(start: impl Into<Bound>, stop: impl Into<Bound>) -> Interval {
    let start = start.into();
    let stop = stop.into();
    if stop <= start { Interval::EMPTY }
    else { Interval { start, stop } }
  }

  /// Like `new` but rejects reversed ranges instead of normalizing them.
  pub fn checked(start: impl Into<Bound>, stop: impl Into<Bound>) -> Result<Interval> {
    let start = start.into();
    let stop = stop.into();
    if stop < start {
      Err(IndexSpaceError::MalformedInterval { start, stop })
    } else {
      Ok(Interval::new(start, stop))
    }
  }

  pub fn universe() -> Interval {
    Interval { start: Bound::min_value(), stop: Bound::max_value() }
  }

  pub fn start(&self) -> Bound {
    self.start
  }

  pub fn stop(&self) -> Bound {
    self.stop
  }

  pub fn as_pair(&self) -> (Bound, Bound) {
    (self.start, self.stop)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.stop
  }

  pub fn is_bounded(&self) -> bool {
    self.start.is_finite() && self.stop.is_finite()
  }

  /// Number of elements, `u64::MAX` for an unbounded interval.
  pub fn size(&self) -> u64 {
    Bound::distance(self.start, self.stop)
  }

  pub fn contains(&self, x: impl Into<Bound>) -> bool {
    let x = x.into();
    self.start <= x && x < self.stop
  }

  pub fn intersect(&self, other: &Interval) -> Interval {
    let start = self.start.max(other.start);
    let stop = start.max(self.stop.min(other.stop));
    Interval::new(start, stop)
  }

  /// Everything outside of `self`: `(-inf, start) U [stop, inf)`.
  pub fn complement(&self) -> Set {
    if self.is_empty() {
      return Set::Interval(Interval::universe());
    }
    UnionOf::from_parts(1, vec![
      Interval::new(Bound::NegInf, self.start),
      Interval::new(self.stop, Bound::PosInf)
    ], true)
  }

  pub fn complement_in(&self, relative_to: impl Into<Set>) -> Result<Set> {
    self.complement().intersect(&relative_to.into())
  }

  /// The at most two pieces of `self` outside of `other`, in increasing order.
  pub(crate) fn difference_parts(&self, other: &Interval) -> Vec<Interval> {
    if other.is_empty() {
      return vec![*self];
    }
    vec![
      Interval::new(Bound::NegInf, other.start).intersect(self),
      Interval::new(other.stop, Bound::PosInf).intersect(self)
    ].into_iter()
     .filter(|piece| !piece.is_empty())
     .collect()
  }

  pub fn without(&self, other: impl Into<Set>) -> Result<Set> {
    Set::Interval(*self).without(&other.into())
  }

  pub fn union(&self, other: impl Into<Set>) -> Result<Set> {
    Set::Interval(*self).union(&other.into())
  }

  pub fn is_subset(&self, other: impl Into<Set>) -> Result<bool> {
    Set::Interval(*self).is_subset(&other.into())
  }

  /// Grows the interval by `width.before` cells before `start` and `width.after` cells after `stop`. Unbounded ends are left as is.
  pub fn extend(&self, width: impl Into<HaloWidth>) -> Result<Interval> {
    self.grow(width.into(), "extended")
  }

  pub fn shrink(&self, width: impl Into<HaloWidth>) -> Result<Interval> {
    self.grow(width.into().negated()?, "shrunk")
  }

  fn grow(&self, width: HaloWidth, op: &'static str) -> Result<Interval> {
    if self.is_empty() {
      return Err(IndexSpaceError::EmptyOperand(op));
    }
    let before = width.before.checked_neg().ok_or(IndexSpaceError::Overflow)?;
    Ok(Interval::new(self.start.offset(before)?, self.stop.offset(width.after)?))
  }

  pub fn translate(&self, delta: i64) -> Result<Interval> {
    if self.is_empty() {
      return Err(IndexSpaceError::EmptyOperand("translated"));
    }
    Ok(Interval::new(self.start.offset(delta)?, self.stop.offset(delta)?))
  }

  /// The elements in increasing order. Each call yields a fresh iterator.
  pub fn iter(&self) -> Result<Range<i64>> {
    Ok(self.start.to_finite()?..self.stop.to_finite()?)
  }

  /// The element at relative position `index`, counted from `stop` when negative.
  pub fn get(&self, index: i64) -> Result<i64> {
    let base = if index >= 0 { self.start } else { self.stop };
    let x = base.to_finite()?.checked_add(index).ok_or(IndexSpaceError::Overflow)?;
    if self.contains(x) { Ok(x) }
    else { Err(IndexSpaceError::IndexOutOfRange { index, size: self.size() }) }
  }

  /// The sub-interval selected by relative positions.
  pub fn slice(&self, slice: impl Into<AxisSlice>) -> Result<Interval> {
    let slice = slice.into();
    slice.check_step()?;
    let relative = |position: Option<i64>, default: Bound| match position {
      None => Ok(default),
      Some(p) if p < 0 => self.stop.offset(p),
      Some(p) => self.start.offset(p)
    };
    let start = relative(slice.start, self.start)?;
    let stop = relative(slice.stop, self.stop)?;
    Ok(Interval::new(start, stop))
  }
}

impl TryFrom<(Bound, Bound)> for Interval
{
  type Error = IndexSpaceError;

  fn try_from((start, stop): (Bound, Bound)) -> Result<Interval> {
    Interval::checked(start, stop)
  }
}

impl From<Interval> for (Bound, Bound)
{
  fn from(i: Interval) -> (Bound, Bound) {
    i.as_pair()
  }
}

impl From<Range<i64>> for Interval
{
  fn from(r: Range<i64>) -> Interval {
    Interval::new(r.start, r.end)
  }
}

impl fmt::Debug for Interval
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {})", self.start, self.stop)
  }
}

impl fmt::Display for Interval
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

impl Hull for Interval
{
  type Output = Interval;

  fn hull(&self, other: &Interval) -> Interval {
    if self.is_empty() { *other }
    else if other.is_empty() { *self }
    else {
      Interval::new(self.start.min(other.start), self.stop.max(other.stop))
    }
  }
}

impl Whole for Interval
{
  fn whole() -> Interval {
    Interval::universe()
  }
}

impl Collection for Interval
{
  type Item = Bound;
}

impl Contains for Interval
{
  fn contains(&self, value: &Bound) -> bool {
    Interval::contains(self, *value)
  }
}

/// `upper` is the exclusive end of the interval.
impl Bounded for Interval
{
  fn lower(&self) -> Bound {
    self.start
  }

  fn upper(&self) -> Bound {
    self.stop
  }
}

impl Cardinality for Interval
{
  type Size = u64;

  fn size(&self) -> u64 {
    Interval::size(self)
  }
}

impl Empty for Interval
{
  fn empty() -> Interval {
    Interval::EMPTY
  }
}

impl Intersection for Interval
{
  type Output = Interval;

  fn intersection(&self, other: &Interval) -> Interval {
    self.intersect(other)
  }
}

impl Union for Interval
{
  type Output = Set;

  fn union(&self, other: &Interval) -> Set {
    UnionOf::from_parts(1, vec![*self, *other], false).simplify()
  }
}

impl Difference for Interval
{
  type Output = Set;

  fn difference(&self, other: &Interval) -> Set {
    UnionOf::from_parts(1, self.difference_parts(other), true)
  }
}

impl Subset for Interval
{
  fn is_subset(&self, other: &Interval) -> bool {
    Set::Interval(*other).complement().meet(&Set::Interval(*self)).is_empty()
  }
}

impl Overlap for Interval
{
  fn overlap(&self, other: &Interval) -> bool {
    !self.intersect(other).is_empty()
  }
}

impl Disjoint for Interval
{
  fn is_disjoint(&self, other: &Interval) -> bool {
    !self.overlap(other)
  }
}
