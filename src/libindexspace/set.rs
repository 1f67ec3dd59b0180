// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sets of the index space.
//!
//! `Set` is the closed sum of the four shapes a region can take: an interval, a box, a union of intervals or a union of boxes. Intervals and their unions have dimension 1, boxes and their unions dimension 2 or more, so two sets of the same dimension are always of the same family.
//!
//! Every binary operation checks the dimensions of its operands and then dispatches on both shapes. Set difference is always "the complement of what is removed, intersected with what remains", except between two boxes where axes are peeled one at a time. Equality is point-set equality, decided by testing inclusion both ways.
//!
//! # Examples
//!
//! ```rust
//! use index_space::{IndexBox, Interval, Set};
//!
//! let global = Set::from(Interval::new(0, 10) * Interval::new(0, 10));
//! let local = Interval::new(0, 5) * Interval::new(0, 5);
//! let halo = Set::from(local.extend(&[1, 1]).unwrap());
//!
//! let exchange = halo.intersect(&global).unwrap()
//!   .without(&Set::from(local)).unwrap()
//!   .simplify();
//! assert_eq!(exchange.size(), 11);
//! ```

use std::fmt;
use crate::error::{check_dim, IndexSpaceError, Result};
use crate::index_box::IndexBox;
use crate::interval::Interval;
use crate::ops::HaloWidth;
use crate::points::Points;
use crate::union::{flatten, union, BoxUnion, IntervalUnion, Primitive};

#[derive(Clone)]
pub enum Set {
  Interval(Interval),
  Box(IndexBox),
  IntervalUnion(IntervalUnion),
  BoxUnion(BoxUnion)
}

impl Set
{
  /// The canonical empty set of dimension `dim`.
  pub fn empty(dim: usize) -> Set {
    if dim <= 1 { Set::Interval(Interval::EMPTY) }
    else { Set::Box(IndexBox::canonical_empty(dim)) }
  }

  /// The unbounded set of dimension `dim`.
  pub fn universe(dim: usize) -> Set {
    if dim <= 1 { Set::Interval(Interval::universe()) }
    else { Set::Box(IndexBox::unbounded(dim)) }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Set::Interval(_) => "Interval",
      Set::Box(_) => "Box",
      Set::IntervalUnion(_) => "IntervalUnion",
      Set::BoxUnion(_) => "BoxUnion"
    }
  }

  pub fn dim(&self) -> usize {
    match self {
      Set::Interval(_) | Set::IntervalUnion(_) => 1,
      Set::Box(b) => b.dim(),
      Set::BoxUnion(u) => u.dim()
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Set::Interval(i) => i.is_empty(),
      Set::Box(b) => b.is_empty(),
      Set::IntervalUnion(u) => u.is_empty(),
      Set::BoxUnion(u) => u.is_empty()
    }
  }

  /// Number of elements, saturating at `u64::MAX` for unbounded sets.
  pub fn size(&self) -> u64 {
    match self {
      Set::Interval(i) => i.size(),
      Set::Box(b) => b.size(),
      Set::IntervalUnion(u) => u.size(),
      Set::BoxUnion(u) => u.size()
    }
  }

  /// Primitive sets and unions marked disjoint.
  pub fn is_disjoint_form(&self) -> bool {
    match self {
      Set::Interval(_) | Set::Box(_) => true,
      Set::IntervalUnion(u) => u.is_disjoint(),
      Set::BoxUnion(u) => u.is_disjoint()
    }
  }

  /// Smallest interval or box containing the set.
  pub fn bounds(&self) -> Set {
    match self {
      Set::Interval(_) | Set::Box(_) => self.clone(),
      Set::IntervalUnion(u) => Set::Interval(u.bounds()),
      Set::BoxUnion(u) => Set::Box(u.bounds())
    }
  }

  /// `false` for points of another dimension.
  pub fn contains(&self, point: &[i64]) -> bool {
    match self {
      Set::Interval(i) => point.len() == 1 && i.contains(point[0]),
      Set::Box(b) => b.contains(point),
      Set::IntervalUnion(u) => point.len() == 1 && u.args().iter().any(|i| i.contains(point[0])),
      Set::BoxUnion(u) => u.args().iter().any(|b| b.contains(point))
    }
  }

  pub fn intersect(&self, other: &Set) -> Result<Set> {
    check_dim(self.dim(), other.dim())?;
    Ok(self.meet(other))
  }

  // precondition: same dimension.
  pub(crate) fn meet(&self, other: &Set) -> Set {
    match (self, other) {
      (Set::IntervalUnion(u), _) => u.meet(other),
      (_, Set::IntervalUnion(u)) => u.meet(self),
      (Set::BoxUnion(u), _) => u.meet(other),
      (_, Set::BoxUnion(u)) => u.meet(self),
      (Set::Interval(a), Set::Interval(b)) => Set::Interval(a.intersect(b)),
      (Set::Box(a), Set::Box(b)) => Set::Box(a.meet(b)),
      (Set::Interval(_), Set::Box(_)) | (Set::Box(_), Set::Interval(_)) =>
        unreachable!("operands of different dimensions")
    }
  }

  /// Everything outside of the set, relative to the universe of its dimension.
  pub fn complement(&self) -> Set {
    match self {
      Set::Interval(i) => i.complement(),
      Set::Box(b) => b.complement(),
      Set::IntervalUnion(u) => u.complement_in(Set::universe(1)),
      Set::BoxUnion(u) => u.complement_in(Set::universe(u.dim()))
    }
  }

  /// The complement of the set intersected with `relative_to`.
  pub fn complement_in(&self, relative_to: &Set) -> Result<Set> {
    self.complement().intersect(relative_to)
  }

  /// Elements of `self` that are not in `other`.
  pub fn without(&self, other: &Set) -> Result<Set> {
    check_dim(self.dim(), other.dim())?;
    Ok(self.difference(other))
  }

  /// Removes every set of `others` in turn.
  pub fn without_all(&self, others: &[Set]) -> Result<Set> {
    others.iter().try_fold(self.clone(), |rest, other| rest.without(other))
  }

  // precondition: same dimension.
  pub(crate) fn difference(&self, other: &Set) -> Set {
    match (self, other) {
      (Set::IntervalUnion(u), _) => u.difference(other),
      (Set::BoxUnion(u), _) => u.difference(other),
      (Set::Interval(_), _) => other.complement().meet(self),
      (Set::Box(a), Set::Box(b)) => a.subtract(b),
      (Set::Box(_), Set::BoxUnion(u)) => u.complement_in(self.clone()),
      (Set::Box(_), Set::Interval(_)) | (Set::Box(_), Set::IntervalUnion(_)) =>
        unreachable!("operands of different dimensions")
    }
  }

  /// Union of `self` and `other`, simplified.
  pub fn union(&self, other: &Set) -> Result<Set> {
    Ok(union(vec![self.clone(), other.clone()])?.simplify())
  }

  /// `true` iff nothing of `self` lies outside of `other`.
  pub fn is_subset(&self, other: &Set) -> Result<bool> {
    check_dim(self.dim(), other.dim())?;
    Ok(self.subset_of(other))
  }

  // precondition: same dimension.
  pub(crate) fn subset_of(&self, other: &Set) -> bool {
    other.complement().meet(self).is_empty()
  }

  /// Point-set equality; sets of different dimensions are never equal.
  pub fn set_eq(&self, other: &Set) -> bool {
    self.dim() == other.dim() && self.subset_of(other) && other.subset_of(self)
  }

  /// A disjoint union with touching components fused; primitives are returned as they are.
  pub fn simplify(&self) -> Set {
    match self {
      Set::Interval(_) | Set::Box(_) => self.clone(),
      Set::IntervalUnion(u) => u.simplify(),
      Set::BoxUnion(u) => u.simplify()
    }
  }

  /// The same points as a union marked disjoint, without fusing.
  pub fn make_disjoint(&self) -> Set {
    match self {
      Set::Interval(_) | Set::Box(_) => self.clone(),
      Set::IntervalUnion(u) => u.make_disjoint(),
      Set::BoxUnion(u) => u.make_disjoint()
    }
  }

  /// Shifts every axis by its own delta.
  pub fn translate(&self, deltas: &[i64]) -> Result<Set> {
    check_dim(self.dim(), deltas.len())?;
    match self {
      Set::Interval(i) => Ok(Set::Interval(i.translate(deltas[0])?)),
      Set::Box(b) => Ok(Set::Box(b.translate(deltas)?)),
      Set::IntervalUnion(u) => u.map(|i| Ok(Set::Interval(i.translate(deltas[0])?))),
      Set::BoxUnion(u) => u.map(|b| Ok(Set::Box(b.translate(deltas)?)))
    }
  }

  /// Grows a primitive set by one width per axis. Unions can not be extended.
  pub fn extend(&self, widths: &[HaloWidth]) -> Result<Set> {
    match self {
      Set::Interval(i) => {
        check_dim(1, widths.len())?;
        Ok(Set::Interval(i.extend(widths[0])?))
      }
      Set::Box(b) => Ok(Set::Box(b.extend(widths)?)),
      _ => Err(IndexSpaceError::UnsupportedOperands { op: "extend", operand: self.kind() })
    }
  }

  pub fn shrink(&self, widths: &[HaloWidth]) -> Result<Set> {
    match self {
      Set::Interval(i) => {
        check_dim(1, widths.len())?;
        Ok(Set::Interval(i.shrink(widths[0])?))
      }
      Set::Box(b) => Ok(Set::Box(b.shrink(widths)?)),
      _ => Err(IndexSpaceError::UnsupportedOperands { op: "shrink", operand: self.kind() })
    }
  }

  /// Cartesian product, distributing over unions on either side.
  pub fn product(&self, other: &Set) -> Set {
    let dim = self.dim() + other.dim();
    match (self, other) {
      (Set::IntervalUnion(u), _) =>
        distribute(dim, u.args(), u.is_disjoint() && other.is_disjoint_form(), |arg| arg.product(other)),
      (Set::BoxUnion(u), _) =>
        distribute(dim, u.args(), u.is_disjoint() && other.is_disjoint_form(), |arg| arg.product(other)),
      (_, Set::IntervalUnion(u)) =>
        distribute(dim, u.args(), u.is_disjoint() && self.is_disjoint_form(), |arg| self.product(arg)),
      (_, Set::BoxUnion(u)) =>
        distribute(dim, u.args(), u.is_disjoint() && self.is_disjoint_form(), |arg| self.product(arg)),
      (Set::Interval(a), Set::Interval(b)) => Set::Box(a * b),
      (Set::Interval(a), Set::Box(b)) => Set::Box(a * b),
      (Set::Box(a), Set::Interval(b)) => Set::Box(a * b),
      (Set::Box(a), Set::Box(b)) => Set::Box(a * b)
    }
  }

  /// Coordinate tuples of every component in turn, axis 0 varying slowest. Overlapping components of a raw union yield their common points more than once.
  pub fn points(&self) -> Result<Points> {
    match self {
      Set::Interval(i) => Points::new(vec![vec![*i]]),
      Set::Box(b) => b.iter(),
      Set::IntervalUnion(u) => Points::new(u.args().iter().map(|i| vec![*i]).collect()),
      Set::BoxUnion(u) => Points::new(u.args().iter().map(|b| b.axes().to_vec()).collect())
    }
  }

  /// The interval or box components, one per element of a union.
  pub fn components(&self) -> Vec<Set> {
    match self {
      Set::Interval(_) | Set::Box(_) => vec![self.clone()],
      Set::IntervalUnion(u) => u.args().iter().cloned().map(Set::Interval).collect(),
      Set::BoxUnion(u) => u.args().iter().cloned().map(Set::Box).collect()
    }
  }
}

// precondition: `dim` is the dimension of every product.
fn distribute<T, F>(dim: usize, args: &[T], disjoint: bool, f: F) -> Set where
 T: Primitive,
 F: Fn(&Set) -> Set
{
  let parts = args.iter().map(|arg| f(&arg.clone().into_set())).collect();
  flatten::<IndexBox>(dim, parts, disjoint)
}

impl PartialEq for Set
{
  fn eq(&self, other: &Set) -> bool {
    self.set_eq(other)
  }
}

impl From<Interval> for Set
{
  fn from(i: Interval) -> Set {
    Set::Interval(i)
  }
}

impl From<IndexBox> for Set
{
  fn from(b: IndexBox) -> Set {
    Set::Box(b)
  }
}

impl From<IntervalUnion> for Set
{
  fn from(u: IntervalUnion) -> Set {
    Set::IntervalUnion(u)
  }
}

impl From<BoxUnion> for Set
{
  fn from(u: BoxUnion) -> Set {
    Set::BoxUnion(u)
  }
}

impl fmt::Debug for Set
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Set::Interval(i) => write!(f, "{:?}", i),
      Set::Box(b) => write!(f, "{:?}", b),
      Set::IntervalUnion(u) => write!(f, "{:?}", u),
      Set::BoxUnion(u) => write!(f, "{:?}", u)
    }
  }
}

impl fmt::Display for Set
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}
