// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This library describes regions of a structured grid as sets of integer indices, and computes with them. The primitive sets are half-open [intervals](interval/index.html) along one axis and axis-aligned [boxes](index_box/index.html) of two or more axes; anything else is a [union](union/index.html) of primitives of the same kind. All of them are values of the [`Set`](set/enum.Set.html) sum type, which provides the set algebra: intersection, difference, union, complement, inclusion and equality of point sets.
//!
//! The main client of this algebra is the [halo module](halo/index.html), which computes the cells that a sub-domain of a grid must receive from its neighbours.
//!
//! # Examples
//!
//! ```rust
//! use index_space::{union, Interval, Set};
//!
//! let a = union(vec![Interval::new(0, 4), Interval::new(2, 8)]).unwrap();
//! let b = Set::from(Interval::new(6, 12));
//! assert_eq!(a.intersect(&b).unwrap(), Set::from(Interval::new(6, 8)));
//! assert_eq!(a.simplify(), Set::from(Interval::new(0, 8)));
//! ```
//!
//! Every value is immutable; operations return new sets. Failures, such as combining sets of different dimensions, are reported as [`IndexSpaceError`](error/enum.IndexSpaceError.html).

mod macros;

pub mod bound;
pub mod error;
pub mod ops;
pub mod interval;
pub mod index_box;
pub mod points;
pub mod union;
pub mod set;
pub mod halo;

pub use bound::Bound;
pub use error::{IndexSpaceError, Result};
pub use ops::{AxisSlice, HaloWidth, Hull, Whole};
pub use interval::Interval;
pub use index_box::IndexBox;
pub use points::Points;
pub use union::{intersect, union, union_with, BoxUnion, IntervalUnion, Primitive, UnionOf};
pub use set::Set;
pub use halo::{DomainDescriptor, HaloConfig, HaloContainer, HaloFragment, HaloGenerator};
