// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Unions of primitive sets.
//!
//! A `UnionOf<T>` stores at least two non-empty primitives of the same kind and dimension, either intervals ([`IntervalUnion`](type.IntervalUnion.html)) or boxes ([`BoxUnion`](type.BoxUnion.html)). Unions are flat and never nested. The `disjoint` flag records whether the components are known to be pairwise disjoint; it is a promise made by whoever built the union, and operations keep it only when they can guarantee it.
//!
//! The [`union`](fn.union.html) factory is the only place where components are repaired: nested unions are flattened, empty components dropped, and a union of zero or one component degenerates to the empty primitive or to that component.
//!
//! # Representation quality
//!
//! A union goes from *raw* (components may overlap) to *disjoint* with [`make_disjoint`](struct.UnionOf.html#method.make_disjoint), and to *simplified* with `simplify`, which additionally fuses touching components. Two disjoint components touch when the one-cell dilation of one intersects the other; for sorted disjoint intervals this is exactly `previous.stop == next.start`.
//!
//! ```rust
//! use index_space::{Interval, Set, union};
//!
//! let u = union(vec![Interval::new(0, 3), Interval::new(3, 6)]).unwrap();
//! assert_eq!(u.simplify(), Set::Interval(Interval::new(0, 6)));
//! ```

use std::fmt;
use tracing::trace;
use crate::error::{check_dim, IndexSpaceError, Result};
use crate::index_box::IndexBox;
use crate::interval::Interval;
use crate::ops::{HaloWidth, Hull};
use crate::set::Set;

/// The primitive kinds a union can hold.
pub trait Primitive: Clone + PartialEq + fmt::Debug + Hull<Output = Self>
{
  fn dim(&self) -> usize;
  fn is_empty(&self) -> bool;
  fn size(&self) -> u64;
  fn into_set(self) -> Set;
  /// The canonical empty set of this kind.
  fn empty_set(dim: usize) -> Set;
  fn wrap(union: UnionOf<Self>) -> Set;
  /// Splits a set of this kind into its primitive components.
  fn components(set: Set) -> Vec<Self>;
}

impl Primitive for Interval
{
  fn dim(&self) -> usize { 1 }
  fn is_empty(&self) -> bool { Interval::is_empty(self) }
  fn size(&self) -> u64 { Interval::size(self) }
  fn into_set(self) -> Set { Set::Interval(self) }
  fn empty_set(_dim: usize) -> Set { Set::Interval(Interval::EMPTY) }
  fn wrap(union: IntervalUnion) -> Set { Set::IntervalUnion(union) }

  fn components(set: Set) -> Vec<Interval> {
    match set {
      Set::Interval(i) => vec![i],
      Set::IntervalUnion(u) => u.args,
      other => {
        debug_assert!(false, "{} mixed into a union of intervals.", other.kind());
        vec![]
      }
    }
  }
}

impl Primitive for IndexBox
{
  fn dim(&self) -> usize { IndexBox::dim(self) }
  fn is_empty(&self) -> bool { IndexBox::is_empty(self) }
  fn size(&self) -> u64 { IndexBox::size(self) }
  fn into_set(self) -> Set { Set::Box(self) }
  fn empty_set(dim: usize) -> Set { Set::Box(IndexBox::canonical_empty(dim)) }
  fn wrap(union: BoxUnion) -> Set { Set::BoxUnion(union) }

  fn components(set: Set) -> Vec<IndexBox> {
    match set {
      Set::Box(b) => vec![b],
      Set::BoxUnion(u) => u.args,
      other => {
        debug_assert!(false, "{} mixed into a union of boxes.", other.kind());
        vec![]
      }
    }
  }
}

#[derive(Clone)]
pub struct UnionOf<T> {
  args: Vec<T>,
  disjoint: bool
}

pub type IntervalUnion = UnionOf<Interval>;
pub type BoxUnion = UnionOf<IndexBox>;

impl<T: Primitive> UnionOf<T>
{
  /// Wraps `args` as they are. Use [`union`](fn.union.html) to flatten, filter and degenerate arbitrary sets.
  pub fn new(args: Vec<T>, disjoint: bool) -> Result<UnionOf<T>> {
    if args.len() < 2 {
      return Err(IndexSpaceError::TooFewComponents(args.len()));
    }
    if args.iter().any(T::is_empty) {
      return Err(IndexSpaceError::EmptyComponent);
    }
    let dim = args[0].dim();
    for arg in &args {
      check_dim(dim, arg.dim())?;
    }
    Ok(UnionOf { args, disjoint })
  }

  /// Filters empty primitives and degenerates to a primitive when fewer than two remain.
  // precondition: every primitive has dimension `dim`.
  pub(crate) fn from_parts(dim: usize, parts: Vec<T>, disjoint: bool) -> Set {
    let mut args: Vec<T> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    match args.len() {
      0 => T::empty_set(dim),
      1 => args.remove(0).into_set(),
      _ => T::wrap(UnionOf { args, disjoint })
    }
  }

  pub fn args(&self) -> &[T] {
    &self.args
  }

  pub fn into_args(self) -> Vec<T> {
    self.args
  }

  pub fn len(&self) -> usize {
    self.args.len()
  }

  pub fn is_disjoint(&self) -> bool {
    self.disjoint
  }

  pub fn dim(&self) -> usize {
    self.args[0].dim()
  }

  pub fn is_empty(&self) -> bool {
    self.args.iter().all(T::is_empty)
  }

  /// Number of elements, counting overlapping elements once.
  pub fn size(&self) -> u64 {
    if self.disjoint {
      self.args.iter().fold(0u64, |acc, arg| acc.saturating_add(arg.size()))
    } else {
      self.make_disjoint().size()
    }
  }

  /// Smallest primitive containing every component.
  pub fn bounds(&self) -> T {
    let first = self.args[0].clone();
    self.args[1..].iter().fold(first, |hull, arg| hull.hull(arg))
  }

  /// Removes from every component the components before it, in order.
  pub fn make_disjoint(&self) -> Set {
    if self.disjoint {
      return T::wrap(self.clone());
    }
    let mut parts: Vec<Set> = self.args.iter().cloned().map(T::into_set).collect();
    for i in 0..parts.len() {
      for j in (i + 1)..parts.len() {
        parts[j] = parts[j].difference(&parts[i]);
      }
    }
    flatten::<T>(self.dim(), parts, true)
  }

  // precondition: `other` has the dimension of `self`.
  pub(crate) fn meet(&self, other: &Set) -> Set {
    let parts = self.args.iter()
      .map(|arg| arg.clone().into_set().meet(other))
      .collect();
    flatten::<T>(self.dim(), parts, self.disjoint && other.is_disjoint_form())
  }

  // precondition: `other` has the dimension of `self`.
  pub(crate) fn difference(&self, other: &Set) -> Set {
    let parts = self.args.iter()
      .map(|arg| arg.clone().into_set().difference(other))
      .collect();
    flatten::<T>(self.dim(), parts, self.disjoint)
  }

  /// Everything of `universe` outside of every component.
  pub(crate) fn complement_in(&self, universe: Set) -> Set {
    self.args.iter().fold(universe, |rest, arg| rest.difference(&arg.clone().into_set()))
  }

  pub(crate) fn map<F>(&self, f: F) -> Result<Set> where
   F: Fn(&T) -> Result<Set>
  {
    let parts = self.args.iter().map(f).collect::<Result<Vec<_>>>()?;
    Ok(flatten::<T>(self.dim(), parts, self.disjoint))
  }
}

impl UnionOf<Interval>
{
  /// Sorts the disjoint components and fuses every one that starts where the previous one stops.
  pub fn simplify(&self) -> Set {
    let disjoint = match self.make_disjoint() {
      Set::IntervalUnion(u) => u,
      degenerate => return degenerate
    };
    let mut args = disjoint.args;
    args.sort_by_key(|arg| (arg.start(), arg.stop()));
    let mut fused: Vec<Interval> = Vec::with_capacity(args.len());
    for arg in args {
      match fused.last_mut() {
        Some(last) if last.stop() == arg.start() => *last = Interval::new(last.start(), arg.stop()),
        _ => fused.push(arg)
      }
    }
    UnionOf::from_parts(1, fused, true)
  }
}

impl UnionOf<IndexBox>
{
  /// Greedily replaces pairs of touching boxes by their bounding box whenever it stays inside the union, until no replacement lowers the number of components.
  ///
  /// The result is disjoint and a fixed point of the fusion, not necessarily a cover with the fewest boxes.
  pub fn simplify(&self) -> Set {
    let mut current = match self.make_disjoint() {
      Set::BoxUnion(u) => u,
      degenerate => return degenerate
    };
    while let Some(fused) = current.fuse_once() {
      match fused {
        Set::BoxUnion(u) => current = u,
        degenerate => return degenerate
      }
    }
    Set::BoxUnion(current)
  }

  /// One fusion step on a disjoint union, `None` if no touching pair can be fused.
  fn fuse_once(&self) -> Option<Set> {
    let dim = self.dim();
    let whole = Set::BoxUnion(self.clone());
    let ones = vec![HaloWidth::symmetric(1); dim];
    for (i, curr) in self.args.iter().enumerate() {
      let grown = match curr.extend(&ones) {
        Ok(grown) => grown,
        Err(_) => continue
      };
      for (j, other) in self.args.iter().enumerate() {
        if i == j || grown.meet(other).is_empty() {
          continue;
        }
        let covering = Set::Box(curr.hull(other));
        if !covering.subset_of(&whole) {
          continue;
        }
        let mut parts: Vec<Set> = self.args.iter().enumerate()
          .filter(|&(k, _)| k != i && k != j)
          .map(|(_, rest)| Set::Box(rest.clone()))
          .filter(|rest| !rest.subset_of(&covering))
          .map(|rest| rest.difference(&covering))
          .collect();
        parts.push(covering);
        let fused = flatten::<IndexBox>(dim, parts, true);
        let count = match &fused {
          Set::BoxUnion(u) => u.len(),
          _ => 1
        };
        if count < self.len() {
          trace!(from = self.len(), to = count, "fused touching boxes {} and {}", i, j);
          return Some(fused);
        }
      }
    }
    None
  }
}

impl<T: fmt::Debug> fmt::Debug for UnionOf<T>
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let args: Vec<String> = self.args.iter().map(|a| format!("{:?}", a)).collect();
    write!(f, "union({})", args.join(", "))
  }
}

/// Collects the primitive components of sets of one kind into a single set.
// precondition: every set has dimension `dim` and is of kind `T`.
pub(crate) fn flatten<T: Primitive>(dim: usize, sets: Vec<Set>, disjoint: bool) -> Set {
  let parts = sets.into_iter().flat_map(T::components).collect();
  UnionOf::from_parts(dim, parts, disjoint)
}

/// Union of `sets`, without simplification and without assuming the operands are disjoint.
///
/// Every operand must have the same dimension. Nested unions are flattened and empty operands dropped.
pub fn union<I, S>(sets: I) -> Result<Set> where
 I: IntoIterator<Item = S>,
 S: Into<Set>
{
  union_with(sets, false)
}

/// Like [`union`](fn.union.html) with an explicit promise that the operands are pairwise disjoint.
pub fn union_with<I, S>(sets: I, disjoint: bool) -> Result<Set> where
 I: IntoIterator<Item = S>,
 S: Into<Set>
{
  let sets: Vec<Set> = sets.into_iter().map(Into::into).collect();
  let dim = match sets.first() {
    Some(first) => first.dim(),
    None => return Err(IndexSpaceError::TooFewComponents(0))
  };
  for set in &sets {
    check_dim(dim, set.dim())?;
  }
  Ok(if dim == 1 { flatten::<Interval>(dim, sets, disjoint) }
     else { flatten::<IndexBox>(dim, sets, disjoint) })
}

/// Intersection of `first` with every set of `rest`, left to right.
pub fn intersect<I, S>(first: impl Into<Set>, rest: I) -> Result<Set> where
 I: IntoIterator<Item = S>,
 S: Into<Set>
{
  rest.into_iter().try_fold(first.into(), |acc, set| acc.intersect(&set.into()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn i(start: i64, stop: i64) -> Interval {
    Interval::new(start, stop)
  }

  fn rect(x: (i64, i64), y: (i64, i64)) -> IndexBox {
    i(x.0, x.1) * i(y.0, y.1)
  }

  fn test_simplify(test_id: &str, input: Vec<Interval>, expected: Vec<(i64, i64)>) {
    let result = union(input).unwrap().simplify();
    let components: Vec<(i64, i64)> = match &result {
      Set::Interval(x) if x.is_empty() => vec![],
      Set::Interval(x) => vec![(x.start().to_finite().unwrap(), x.stop().to_finite().unwrap())],
      Set::IntervalUnion(u) => {
        assert!(u.is_disjoint(), "{} | {:?} is not marked disjoint.", test_id, u);
        u.args().iter()
          .map(|x| (x.start().to_finite().unwrap(), x.stop().to_finite().unwrap()))
          .collect()
      }
      other => panic!("{} | unexpected {:?}", test_id, other)
    };
    assert_eq!(components, expected, "{} | {:?}", test_id, result);
  }

  #[test]
  fn construction_failures() {
    assert_eq!(IntervalUnion::new(vec![i(0, 1)], false).err(), Some(IndexSpaceError::TooFewComponents(1)));
    assert_eq!(IntervalUnion::new(vec![i(0, 1), i(2, 2)], false).err(), Some(IndexSpaceError::EmptyComponent));
    let cube = &rect((0, 1), (0, 1)) * i(0, 1);
    assert_eq!(BoxUnion::new(vec![rect((0, 1), (0, 1)), cube], false).err(),
      Some(IndexSpaceError::DimensionMismatch { expected: 2, found: 3 }));
    let u = IntervalUnion::new(vec![i(0, 1), i(5, 6)], true).unwrap();
    assert_eq!(u.len(), 2);
    assert!(u.is_disjoint());
  }

  #[test]
  fn factory_degenerates() {
    assert_eq!(union(Vec::<Set>::new()).err(), Some(IndexSpaceError::TooFewComponents(0)));
    match union(vec![i(0, 0), i(3, 3)]).unwrap() {
      Set::Interval(x) => assert!(x.is_empty()),
      other => panic!("expected the empty interval, got {:?}", other)
    }
    match union(vec![i(0, 0), i(1, 4)]).unwrap() {
      Set::Interval(x) => assert_eq!(x, i(1, 4)),
      other => panic!("expected a single interval, got {:?}", other)
    }
    match union(vec![rect((0, 0), (0, 1)), rect((0, 1), (2, 2))]).unwrap() {
      Set::Box(b) => assert_eq!(b, IndexBox::canonical_empty(2)),
      other => panic!("expected the empty box, got {:?}", other)
    }
  }

  #[test]
  fn factory_flattens() {
    let inner = union(vec![i(0, 1), i(4, 5)]).unwrap();
    match union(vec![inner, Set::Interval(i(8, 9))]).unwrap() {
      Set::IntervalUnion(u) => assert_eq!(u.args(), &[i(0, 1), i(4, 5), i(8, 9)]),
      other => panic!("expected a flat union, got {:?}", other)
    }
    assert_eq!(union(vec![Set::Interval(i(0, 1)), Set::Box(rect((0, 1), (0, 1)))]).err(),
      Some(IndexSpaceError::DimensionMismatch { expected: 1, found: 2 }));
  }

  #[test]
  fn size_counts_overlap_once() {
    let raw = IntervalUnion::new(vec![i(0, 5), i(3, 8), i(4, 6)], false).unwrap();
    assert_eq!(raw.size(), 8);
    let disjoint = IntervalUnion::new(vec![i(0, 5), i(6, 8)], true).unwrap();
    assert_eq!(disjoint.size(), 7);
    let boxes = BoxUnion::new(vec![rect((0, 2), (0, 2)), rect((1, 3), (1, 3))], false).unwrap();
    assert_eq!(boxes.size(), 7);
  }

  #[test]
  fn make_disjoint() {
    let raw = IntervalUnion::new(vec![i(0, 5), i(3, 8), i(1, 2)], false).unwrap();
    match raw.make_disjoint() {
      Set::IntervalUnion(u) => {
        assert!(u.is_disjoint());
        assert_eq!(u.args(), &[i(0, 5), i(5, 8)]);
      }
      other => panic!("expected a union, got {:?}", other)
    }
    let nested = IntervalUnion::new(vec![i(0, 5), i(1, 2)], false).unwrap();
    assert_eq!(nested.make_disjoint(), Set::Interval(i(0, 5)));
  }

  #[test]
  fn bounds() {
    let u = IntervalUnion::new(vec![i(4, 5), i(-2, 0)], false).unwrap();
    assert_eq!(u.bounds(), i(-2, 5));
    let b = BoxUnion::new(vec![rect((0, 1), (5, 6)), rect((3, 4), (0, 1))], false).unwrap();
    assert_eq!(b.bounds(), rect((0, 4), (0, 6)));
  }

  #[test]
  fn simplify_intervals() {
    let cases = vec![
      ("touching", vec![i(0, 3), i(3, 6)], vec![(0, 6)]),
      ("unsorted", vec![i(6, 9), i(0, 3), i(3, 6)], vec![(0, 9)]),
      ("gap", vec![i(0, 3), i(4, 6)], vec![(0, 3), (4, 6)]),
      ("overlap", vec![i(0, 4), i(2, 6), i(8, 9)], vec![(0, 6), (8, 9)]),
      ("contained", vec![i(0, 10), i(2, 3)], vec![(0, 10)]),
      ("empty", vec![i(1, 1), i(2, 2)], vec![])
    ];
    for (test_id, input, expected) in cases {
      test_simplify(test_id, input, expected);
    }
  }

  #[test]
  fn simplify_boxes_fuses_strips() {
    let strips = union(vec![
      rect((0, 1), (0, 4)),
      rect((1, 2), (0, 4)),
      rect((2, 3), (0, 4))
    ]).unwrap();
    assert_eq!(strips.simplify(), Set::Box(rect((0, 3), (0, 4))));
    match strips.simplify() {
      Set::Box(b) => assert_eq!(b, rect((0, 3), (0, 4))),
      other => panic!("expected a single box, got {:?}", other)
    }
  }

  #[test]
  fn simplify_boxes_keeps_l_shape() {
    let l_shape = union(vec![
      rect((0, 1), (0, 1)),
      rect((1, 2), (0, 1)),
      rect((0, 1), (1, 2))
    ]).unwrap();
    let simplified = l_shape.simplify();
    match &simplified {
      Set::BoxUnion(u) => {
        assert!(u.is_disjoint());
        assert_eq!(u.len(), 2);
      }
      other => panic!("expected two boxes, got {:?}", other)
    }
    assert_eq!(simplified.size(), 3);
    assert_eq!(simplified, l_shape);
  }

  #[test]
  fn simplify_boxes_overlapping_input() {
    let u = union(vec![rect((0, 4), (0, 2)), rect((0, 4), (1, 3)), rect((2, 3), (0, 3))]).unwrap();
    let simplified = u.simplify();
    assert_eq!(simplified, Set::Box(rect((0, 4), (0, 3))));
  }

  #[test]
  fn intersect_many() {
    let result = intersect(i(0, 10), vec![i(2, 12), i(-5, 7)]).unwrap();
    assert_eq!(result, Set::Interval(i(2, 7)));
    assert_eq!(intersect(i(0, 10), Vec::<Interval>::new()).unwrap(), Set::Interval(i(0, 10)));
    let u = union(vec![i(0, 2), i(5, 8)]).unwrap();
    assert_eq!(intersect(u, vec![i(1, 6)]).unwrap(), union(vec![i(1, 2), i(5, 6)]).unwrap());
  }
}
