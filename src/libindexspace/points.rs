// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::Result;
use crate::interval::Interval;

/// Lazy iterator over the coordinate tuples of a sequence of boxes.
///
/// Each block is visited in turn, with axis 0 varying slowest. Only the current tuple is kept in memory; cloning the iterator restarts nothing but duplicates its position.
#[derive(Clone, Debug)]
pub struct Points {
  blocks: Vec<Vec<(i64, i64)>>,
  block: usize,
  cursor: Option<Vec<i64>>
}

impl Points
{
  /// Fails with `Unbounded` if one of the blocks has an unbounded axis.
  pub(crate) fn new(blocks: Vec<Vec<Interval>>) -> Result<Points> {
    let mut finite = Vec::with_capacity(blocks.len());
    for axes in blocks {
      if axes.iter().any(Interval::is_empty) {
        continue;
      }
      let axes = axes.iter()
        .map(|axis| Ok((axis.start().to_finite()?, axis.stop().to_finite()?)))
        .collect::<Result<Vec<_>>>()?;
      finite.push(axes);
    }
    Ok(Points { blocks: finite, block: 0, cursor: None })
  }

  /// Steps `cursor` like an odometer, the last axis turning fastest. Returns `false` once the block is exhausted.
  fn advance(axes: &[(i64, i64)], cursor: &mut [i64]) -> bool {
    for (axis, &(lo, hi)) in axes.iter().enumerate().rev() {
      cursor[axis] += 1;
      if cursor[axis] < hi {
        return true;
      }
      cursor[axis] = lo;
    }
    false
  }
}

impl Iterator for Points
{
  type Item = Vec<i64>;

  fn next(&mut self) -> Option<Vec<i64>> {
    while self.block < self.blocks.len() {
      let axes = &self.blocks[self.block];
      match self.cursor.as_mut() {
        None => {
          let first: Vec<i64> = axes.iter().map(|&(lo, _)| lo).collect();
          self.cursor = Some(first.clone());
          return Some(first);
        }
        Some(cursor) => {
          if Points::advance(axes, cursor) {
            return Some(cursor.clone());
          }
          self.block += 1;
          self.cursor = None;
        }
      }
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bound::Bound;
  use crate::error::IndexSpaceError;

  #[test]
  fn single_axis() {
    let points: Vec<_> = Points::new(vec![vec![Interval::new(2, 5)]]).unwrap().collect();
    assert_eq!(points, vec![vec![2], vec![3], vec![4]]);
  }

  #[test]
  fn blocks_in_order() {
    let blocks = vec![
      vec![Interval::new(0, 1), Interval::new(0, 2)],
      vec![Interval::new(0, 0), Interval::new(0, 2)],
      vec![Interval::new(5, 7), Interval::new(1, 2)]
    ];
    let points: Vec<_> = Points::new(blocks).unwrap().collect();
    assert_eq!(points, vec![vec![0, 0], vec![0, 1], vec![5, 1], vec![6, 1]]);
  }

  #[test]
  fn three_axes() {
    let axes = vec![Interval::new(0, 2), Interval::new(0, 2), Interval::new(0, 2)];
    let points: Vec<_> = Points::new(vec![axes]).unwrap().collect();
    assert_eq!(points.len(), 8);
    assert_eq!(points[1], vec![0, 0, 1]);
    assert_eq!(points[4], vec![1, 0, 0]);
    assert_eq!(points[7], vec![1, 1, 1]);
  }

  #[test]
  fn unbounded_is_rejected() {
    let axes = vec![Interval::new(0, Bound::PosInf)];
    assert_eq!(Points::new(vec![axes]).err(), Some(IndexSpaceError::Unbounded));
  }
}
