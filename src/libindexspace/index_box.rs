// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Axis-aligned boxes of the index space.
//!
//! An `IndexBox` is the Cartesian product of one [interval](../interval/index.html) per axis, with at least two axes. Boxes are built by multiplying intervals or from a pair of inclusive corners:
//!
//! ```rust
//! use index_space::{IndexBox, Interval};
//!
//! let b = Interval::new(0, 5) * Interval::new(0, 3);
//! assert_eq!(b, IndexBox::from_corners(&[0, 0], &[4, 2]).unwrap());
//! assert_eq!(b.shape(), vec![5, 3]);
//! assert_eq!(b.corners().unwrap(), (vec![0, 0], vec![4, 2]));
//! ```
//!
//! Removing a box from another is not a box in general. The difference peels one axis at a time and yields at most `2 * dim` disjoint boxes.

use std::convert::TryFrom;
use std::fmt;
use std::ops::Mul;
use serde::{Deserialize, Serialize};
use crate::bound::Bound;
use crate::error::{check_dim, IndexSpaceError, Result};
use crate::interval::Interval;
use crate::ops::{AxisSlice, HaloWidth, Hull};
use crate::points::Points;
use crate::set::Set;
use crate::union::UnionOf;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct IndexBox {
  axes: Vec<Interval>
}

impl IndexBox
{
  pub fn new(axes: Vec<Interval>) -> Result<IndexBox> {
    if axes.len() < 2 {
      return Err(IndexSpaceError::TooFewAxes(axes.len()));
    }
    Ok(IndexBox::from_axes(axes))
  }

  // precondition: `axes.len() >= 2`.
  pub(crate) fn from_axes(axes: Vec<Interval>) -> IndexBox {
    debug_assert!(axes.len() >= 2, "A box needs at least two axes.");
    if axes.iter().any(Interval::is_empty) {
      IndexBox::canonical_empty(axes.len())
    } else {
      IndexBox { axes }
    }
  }

  pub(crate) fn canonical_empty(dim: usize) -> IndexBox {
    IndexBox { axes: vec![Interval::EMPTY; dim] }
  }

  pub(crate) fn unbounded(dim: usize) -> IndexBox {
    IndexBox { axes: vec![Interval::universe(); dim] }
  }

  /// The empty box of dimension `dim`.
  pub fn empty(dim: usize) -> Result<IndexBox> {
    IndexBox::new(vec![Interval::EMPTY; dim])
  }

  pub fn universe(dim: usize) -> Result<IndexBox> {
    IndexBox::new(vec![Interval::universe(); dim])
  }

  /// Box spanning the inclusive corners `first` and `last`.
  pub fn from_corners(first: &[i64], last: &[i64]) -> Result<IndexBox> {
    check_dim(first.len(), last.len())?;
    let axes = first.iter().zip(last)
      .map(|(&f, &l)| {
        let stop = l.checked_add(1).ok_or(IndexSpaceError::Overflow)?;
        Ok(Interval::new(f, stop))
      })
      .collect::<Result<Vec<_>>>()?;
    IndexBox::new(axes)
  }

  pub fn dim(&self) -> usize {
    self.axes.len()
  }

  pub fn axes(&self) -> &[Interval] {
    &self.axes
  }

  pub fn axis(&self, axis: usize) -> Option<&Interval> {
    self.axes.get(axis)
  }

  pub fn as_pairs(&self) -> Vec<(Bound, Bound)> {
    self.axes.iter().map(Interval::as_pair).collect()
  }

  pub fn shape(&self) -> Vec<u64> {
    self.axes.iter().map(Interval::size).collect()
  }

  /// Number of cells, saturating at `u64::MAX`.
  pub fn size(&self) -> u64 {
    self.axes.iter().fold(1u64, |acc, axis| acc.saturating_mul(axis.size()))
  }

  pub fn is_empty(&self) -> bool {
    self.axes.iter().any(Interval::is_empty)
  }

  pub fn is_bounded(&self) -> bool {
    self.axes.iter().all(Interval::is_bounded)
  }

  /// `false` for points of another dimension.
  pub fn contains(&self, point: &[i64]) -> bool {
    point.len() == self.dim() &&
      self.axes.iter().zip(point).all(|(axis, &x)| axis.contains(x))
  }

  pub fn intersect(&self, other: &IndexBox) -> Result<IndexBox> {
    check_dim(self.dim(), other.dim())?;
    Ok(self.meet(other))
  }

  // precondition: same dimension.
  pub(crate) fn meet(&self, other: &IndexBox) -> IndexBox {
    IndexBox::from_axes(self.axes.iter().zip(&other.axes)
      .map(|(a, b)| a.intersect(b))
      .collect())
  }

  /// `self` minus `other` as at most `2 * dim` disjoint boxes.
  // precondition: same dimension.
  pub(crate) fn subtract(&self, other: &IndexBox) -> Set {
    let pieces = peel(&self.axes, &other.axes)
      .into_iter()
      .map(IndexBox::from_axes)
      .collect();
    UnionOf::from_parts(self.dim(), pieces, true)
  }

  pub fn complement(&self) -> Set {
    IndexBox::unbounded(self.dim()).subtract(self)
  }

  pub fn complement_in(&self, relative_to: impl Into<Set>) -> Result<Set> {
    self.complement().intersect(&relative_to.into())
  }

  pub fn without(&self, other: impl Into<Set>) -> Result<Set> {
    Set::Box(self.clone()).without(&other.into())
  }

  pub fn union(&self, other: impl Into<Set>) -> Result<Set> {
    Set::Box(self.clone()).union(&other.into())
  }

  pub fn is_subset(&self, other: impl Into<Set>) -> Result<bool> {
    Set::Box(self.clone()).is_subset(&other.into())
  }

  /// Grows every axis by its own width, one width per axis.
  pub fn extend<W: Into<HaloWidth> + Copy>(&self, widths: &[W]) -> Result<IndexBox> {
    self.per_axis(widths.len(), "extended", |i, axis| axis.extend(widths[i]))
  }

  pub fn shrink<W: Into<HaloWidth> + Copy>(&self, widths: &[W]) -> Result<IndexBox> {
    self.per_axis(widths.len(), "shrunk", |i, axis| axis.shrink(widths[i]))
  }

  pub fn translate(&self, deltas: &[i64]) -> Result<IndexBox> {
    self.per_axis(deltas.len(), "translated", |i, axis| axis.translate(deltas[i]))
  }

  fn per_axis<F>(&self, len: usize, op: &'static str, f: F) -> Result<IndexBox> where
   F: Fn(usize, &Interval) -> Result<Interval>
  {
    if self.is_empty() {
      return Err(IndexSpaceError::EmptyOperand(op));
    }
    check_dim(self.dim(), len)?;
    let axes = self.axes.iter().enumerate()
      .map(|(i, axis)| f(i, axis))
      .collect::<Result<Vec<_>>>()?;
    Ok(IndexBox::from_axes(axes))
  }

  /// Coordinate tuples with axis 0 varying slowest.
  pub fn iter(&self) -> Result<Points> {
    Points::new(vec![self.axes.clone()])
  }

  /// The coordinate tuple at relative position `index`, negative positions counting from the end of their axis.
  pub fn point(&self, index: &[i64]) -> Result<Vec<i64>> {
    check_dim(self.dim(), index.len())?;
    self.axes.iter().zip(index)
      .map(|(axis, &i)| axis.get(i))
      .collect()
  }

  pub fn slice(&self, slices: &[AxisSlice]) -> Result<IndexBox> {
    check_dim(self.dim(), slices.len())?;
    let axes = self.axes.iter().zip(slices)
      .map(|(axis, &s)| axis.slice(s))
      .collect::<Result<Vec<_>>>()?;
    Ok(IndexBox::from_axes(axes))
  }

  /// `self[0, .., 0]`.
  pub fn first(&self) -> Result<Vec<i64>> {
    self.point(&vec![0; self.dim()])
  }

  /// `self[-1, .., -1]`.
  pub fn last(&self) -> Result<Vec<i64>> {
    self.point(&vec![-1; self.dim()])
  }

  /// The inclusive corner pair `(first, last)`.
  pub fn corners(&self) -> Result<(Vec<i64>, Vec<i64>)> {
    Ok((self.first()?, self.last()?))
  }
}

/// Removes box `b` from box `a`, both given by their axes.
///
/// Either some axis pair does not overlap and nothing is removed, or `a` splits into the part of the first axis outside of `b` times the remaining axes, and the part of the first axis inside `b` times the recursive difference of the remaining axes.
fn peel(a: &[Interval], b: &[Interval]) -> Vec<Vec<Interval>> {
  if a.iter().zip(b).any(|(x, y)| x.intersect(y).is_empty()) {
    return vec![a.to_vec()];
  }
  let mut pieces: Vec<Vec<Interval>> = a[0].difference_parts(&b[0])
    .into_iter()
    .map(|head| prepend(head, &a[1..]))
    .collect();
  if a.len() > 1 {
    let common = a[0].intersect(&b[0]);
    pieces.extend(peel(&a[1..], &b[1..])
      .into_iter()
      .map(|tail| prepend(common, &tail)));
  }
  pieces
}

fn prepend(head: Interval, tail: &[Interval]) -> Vec<Interval> {
  let mut axes = Vec::with_capacity(tail.len() + 1);
  axes.push(head);
  axes.extend_from_slice(tail);
  axes
}

impl Hull for IndexBox
{
  type Output = IndexBox;

  fn hull(&self, other: &IndexBox) -> IndexBox {
    if self.is_empty() { other.clone() }
    else if other.is_empty() { self.clone() }
    else {
      IndexBox::from_axes(self.axes.iter().zip(&other.axes)
        .map(|(a, b)| a.hull(b))
        .collect())
    }
  }
}

impl TryFrom<Vec<Interval>> for IndexBox
{
  type Error = IndexSpaceError;

  fn try_from(axes: Vec<Interval>) -> Result<IndexBox> {
    IndexBox::new(axes)
  }
}

impl From<IndexBox> for Vec<Interval>
{
  fn from(b: IndexBox) -> Vec<Interval> {
    b.axes
  }
}

impl fmt::Debug for IndexBox
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let axes: Vec<String> = self.axes.iter().map(|a| format!("{:?}", a)).collect();
    write!(f, "{}", axes.join(" x "))
  }
}

impl fmt::Display for IndexBox
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

// Cartesian products. An empty factor yields the empty box of the combined dimension.

impl<'a, 'b> Mul<&'b Interval> for &'a Interval
{
  type Output = IndexBox;

  fn mul(self, other: &Interval) -> IndexBox {
    IndexBox::from_axes(vec![*self, *other])
  }
}

impl<'a, 'b> Mul<&'b IndexBox> for &'a Interval
{
  type Output = IndexBox;

  fn mul(self, other: &IndexBox) -> IndexBox {
    IndexBox::from_axes(prepend(*self, &other.axes))
  }
}

impl<'a, 'b> Mul<&'b Interval> for &'a IndexBox
{
  type Output = IndexBox;

  fn mul(self, other: &Interval) -> IndexBox {
    let mut axes = self.axes.clone();
    axes.push(*other);
    IndexBox::from_axes(axes)
  }
}

impl<'a, 'b> Mul<&'b IndexBox> for &'a IndexBox
{
  type Output = IndexBox;

  fn mul(self, other: &IndexBox) -> IndexBox {
    let mut axes = self.axes.clone();
    axes.extend_from_slice(&other.axes);
    IndexBox::from_axes(axes)
  }
}

forward_all_binop!(impl Mul for Interval, mul, Interval => IndexBox);
forward_all_binop!(impl Mul for Interval, mul, IndexBox => IndexBox);
forward_all_binop!(impl Mul for IndexBox, mul, Interval => IndexBox);
forward_all_binop!(impl Mul for IndexBox, mul, IndexBox => IndexBox);

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::{assert_de_tokens_error, Token};
  use crate::union::union;

  fn square(lo: i64, hi: i64) -> IndexBox {
    Interval::new(lo, hi) * Interval::new(lo, hi)
  }

  #[test]
  fn construction() {
    assert_eq!(IndexBox::new(vec![Interval::new(0, 1)]), Err(IndexSpaceError::TooFewAxes(1)));
    let b = IndexBox::from_corners(&[0, 1, 2], &[3, 4, 5]).unwrap();
    assert_eq!(b.dim(), 3);
    assert_eq!(b.shape(), vec![4, 4, 4]);
    assert_eq!(b.size(), 64);
    assert_eq!(IndexBox::from_corners(&[0, 1], &[3]),
      Err(IndexSpaceError::DimensionMismatch { expected: 2, found: 1 }));
  }

  #[test]
  fn canonical_empty() {
    let b = Interval::new(0, 4) * Interval::new(3, 3);
    assert!(b.is_empty());
    assert_eq!(b, IndexBox::empty(2).unwrap());
    assert_eq!(b.size(), 0);
    let c = &b * Interval::new(0, 9);
    assert_eq!(c.dim(), 3);
    assert!(c.is_empty());
    assert_eq!(IndexBox::empty(1), Err(IndexSpaceError::TooFewAxes(1)));
  }

  #[test]
  fn products() {
    let i = Interval::new(0, 2);
    let b = Interval::new(0, 2) * Interval::new(5, 6);
    assert_eq!((&i * &b).as_pairs()[2], (Bound::from(5), Bound::from(6)));
    assert_eq!((b.clone() * i).dim(), 3);
    assert_eq!((&b * &b).dim(), 4);
    assert_eq!((i * Interval::new(1, 1)).dim(), 2);
  }

  #[test]
  fn contains() {
    let b = square(0, 5);
    assert!(b.contains(&[0, 4]));
    assert!(!b.contains(&[5, 0]));
    assert!(!b.contains(&[1, 1, 1]));
  }

  #[test]
  fn intersect() {
    assert_eq!(square(0, 5).intersect(&square(3, 8)), Ok(square(3, 5)));
    assert!(square(0, 3).intersect(&square(3, 8)).unwrap().is_empty());
    let cube = &square(0, 1) * Interval::new(0, 1);
    assert_eq!(square(0, 1).intersect(&cube),
      Err(IndexSpaceError::DimensionMismatch { expected: 2, found: 3 }));
  }

  #[test]
  fn subtract_peels_axes() {
    let hole = square(0, 3).subtract(&square(1, 2));
    assert_eq!(hole.size(), 8);
    match &hole {
      Set::BoxUnion(u) => {
        assert!(u.is_disjoint());
        assert_eq!(u.len(), 4);
      }
      other => panic!("expected a union, got {:?}", other)
    }
    assert!(!hole.contains(&[1, 1]));

    // No overlap along one axis: nothing is removed.
    assert_eq!(square(0, 3).subtract(&(Interval::new(0, 3) * Interval::new(5, 6))), Set::Box(square(0, 3)));
    assert!(square(1, 2).subtract(&square(0, 3)).is_empty());

    let cube = &square(0, 3) * Interval::new(0, 3);
    let core = &square(1, 2) * Interval::new(1, 2);
    match cube.subtract(&core) {
      Set::BoxUnion(u) => {
        assert_eq!(u.len(), 6);
        assert_eq!(Set::BoxUnion(u).size(), 26);
      }
      other => panic!("expected a union, got {:?}", other)
    }
  }

  #[test]
  fn complement() {
    let b = square(0, 2);
    let c = b.complement();
    assert!(c.contains(&[-1, 0]));
    assert!(c.contains(&[0, 2]));
    assert!(!c.contains(&[1, 1]));
    assert_eq!(c.complement(), Set::Box(b));
  }

  #[test]
  fn without_and_subset() {
    let b = square(0, 4);
    let pieces = union(vec![square(0, 1), square(3, 4)]).unwrap();
    assert_eq!(b.without(pieces.clone()).unwrap().size(), 14);
    assert!(square(1, 3).is_subset(b.clone()).unwrap());
    assert!(!b.is_subset(square(1, 3)).unwrap());
    assert!(b.is_subset(union(vec![
      Interval::new(0, 2) * Interval::new(0, 4),
      Interval::new(1, 4) * Interval::new(0, 4)
    ]).unwrap()).unwrap());
  }

  #[test]
  fn extend_shrink_translate() {
    let b = square(0, 5);
    assert_eq!(b.extend(&[1, 1]), Ok(square(-1, 6)));
    assert_eq!(b.extend(&[(0, 1), (2, 0)]), Ok(Interval::new(0, 6) * Interval::new(-2, 5)));
    assert_eq!(b.extend(&[3, 2]).unwrap().shrink(&[3, 2]), Ok(b.clone()));
    assert_eq!(b.translate(&[1, -1]), Ok(Interval::new(1, 6) * Interval::new(-1, 4)));
    assert_eq!(b.extend(&[1]), Err(IndexSpaceError::DimensionMismatch { expected: 2, found: 1 }));
    assert_eq!(IndexBox::canonical_empty(2).extend(&[1, 1]), Err(IndexSpaceError::EmptyOperand("extended")));
    assert_eq!(IndexBox::canonical_empty(2).translate(&[1, 1]), Err(IndexSpaceError::EmptyOperand("translated")));
  }

  #[test]
  fn iteration_axis_zero_slowest() {
    let b = Interval::new(0, 2) * Interval::new(5, 7);
    let points: Vec<Vec<i64>> = b.iter().unwrap().collect();
    assert_eq!(points, vec![vec![0, 5], vec![0, 6], vec![1, 5], vec![1, 6]]);
    assert_eq!(b.iter().unwrap().count(), 4);
    assert_eq!(IndexBox::unbounded(2).iter().err(), Some(IndexSpaceError::Unbounded));
  }

  #[test]
  fn indexing() {
    let b = IndexBox::from_corners(&[2, 3], &[6, 9]).unwrap();
    assert_eq!(b.point(&[0, 0]), Ok(vec![2, 3]));
    assert_eq!(b.point(&[-1, -1]), Ok(vec![6, 9]));
    assert_eq!(b.point(&[1, -2]), Ok(vec![3, 8]));
    assert_eq!(b.point(&[5, 0]), Err(IndexSpaceError::IndexOutOfRange { index: 5, size: 5 }));
    assert_eq!(b.corners(), Ok((vec![2, 3], vec![6, 9])));
    assert_eq!(b.slice(&[AxisSlice::from(1..3), AxisSlice::from(..-1)]),
      Ok(Interval::new(3, 5) * Interval::new(3, 9)));
    assert_eq!(b.slice(&[AxisSlice::full(), AxisSlice::full().with_step(3)]),
      Err(IndexSpaceError::UnsupportedStep(3)));
  }

  #[test]
  fn hull() {
    assert_eq!(square(0, 1).hull(&square(4, 5)), square(0, 5));
    assert_eq!(IndexBox::canonical_empty(2).hull(&square(4, 5)), square(4, 5));
  }

  #[test]
  fn deserialize_rejects_one_axis() {
    assert_de_tokens_error::<IndexBox>(&[
      Token::Seq { len: Some(1) },
      Token::Tuple { len: 2 },
      Token::NewtypeVariant { name: "Bound", variant: "Finite" },
      Token::I64(0),
      Token::NewtypeVariant { name: "Bound", variant: "Finite" },
      Token::I64(1),
      Token::TupleEnd,
      Token::SeqEnd
    ], "a box needs at least two axes, got 1");
  }
}
