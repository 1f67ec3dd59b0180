// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Halo regions of sub-domains of a regular grid.
//!
//! A grid is a finite global box split into sub-domains. The halo of a sub-domain is the set of cells within a given width around it that belong to the grid but not to the sub-domain itself. On a periodic axis the grid wraps around, so cells beyond one end of the global box are images of cells at the other end.
//!
//! Each halo is returned as fragments: boxes given both in coordinates relative to the first corner of the sub-domain (`local`) and in coordinates of the global box (`global`).
//!
//! ```rust
//! use index_space::{DomainDescriptor, HaloGenerator, HaloWidth, Interval};
//!
//! let global = Interval::new(0, 10) * Interval::new(0, 10);
//! let generator = HaloGenerator::new(global, vec![HaloWidth::symmetric(1); 2], vec![false, false]).unwrap();
//! let domain = DomainDescriptor::new(0, Interval::new(0, 5) * Interval::new(0, 5)).unwrap();
//! let halo = generator.generate(&domain).unwrap();
//! assert_eq!(halo.local().size(), 11);
//! ```

use std::convert::TryFrom;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::error::{check_dim, IndexSpaceError, Result};
use crate::index_box::IndexBox;
use crate::ops::HaloWidth;
use crate::set::Set;
use crate::union::flatten;

/// A sub-domain of the grid: a finite non-empty box with an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainDescriptor {
  id: i32,
  indices: IndexBox
}

impl DomainDescriptor
{
  pub fn new(id: i32, indices: IndexBox) -> Result<DomainDescriptor> {
    if indices.is_empty() {
      return Err(IndexSpaceError::EmptyOperand("used as a domain"));
    }
    if !indices.is_bounded() {
      return Err(IndexSpaceError::Unbounded);
    }
    Ok(DomainDescriptor { id, indices })
  }

  pub fn id(&self) -> i32 {
    self.id
  }

  pub fn indices(&self) -> &IndexBox {
    &self.indices
  }
}

/// Halo widths and periodicity of every axis, as read from a configuration file.
///
/// `periodic` may be left out, in which case no axis is periodic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaloConfig {
  pub halos: Vec<HaloWidth>,
  #[serde(default)]
  pub periodic: Vec<bool>
}

#[derive(Clone, Debug)]
pub struct HaloGenerator {
  global: IndexBox,
  halos: Vec<HaloWidth>,
  periodic: Vec<bool>,
  extents: Vec<i64>
}

impl HaloGenerator
{
  /// Fails if the global box is empty or unbounded, if `halos` or `periodic` do not have one entry per axis, or if a halo on a periodic axis is wider than the grid along that axis.
  pub fn new(global: IndexBox, halos: Vec<HaloWidth>, periodic: Vec<bool>) -> Result<HaloGenerator> {
    check_dim(global.dim(), halos.len())?;
    check_dim(global.dim(), periodic.len())?;
    if global.is_empty() {
      return Err(IndexSpaceError::EmptyOperand("used as the global domain"));
    }
    if !global.is_bounded() {
      return Err(IndexSpaceError::Unbounded);
    }
    let extents = global.shape().into_iter()
      .map(|extent| i64::try_from(extent).map_err(|_| IndexSpaceError::Overflow))
      .collect::<Result<Vec<_>>>()?;
    for (axis, (halo, &extent)) in halos.iter().zip(&extents).enumerate() {
      if periodic[axis] && halo.widest() > extent {
        return Err(IndexSpaceError::HaloExceedsDomain { axis, width: halo.widest(), extent: extent as u64 });
      }
    }
    Ok(HaloGenerator { global, halos, periodic, extents })
  }

  pub fn from_config(global: IndexBox, config: HaloConfig) -> Result<HaloGenerator> {
    let periodic =
      if config.periodic.is_empty() { vec![false; global.dim()] }
      else { config.periodic };
    HaloGenerator::new(global, config.halos, periodic)
  }

  pub fn global(&self) -> &IndexBox {
    &self.global
  }

  /// The halo of `domain`, split into fragments that each lie inside one periodic image of the global box. The domain must lie inside the global box.
  pub fn generate(&self, domain: &DomainDescriptor) -> Result<HaloContainer> {
    let indices = domain.indices();
    check_dim(self.global.dim(), indices.dim())?;
    if indices.meet(&self.global) != *indices {
      return Err(IndexSpaceError::DomainOutsideGlobal(domain.id()));
    }
    let reach = indices.extend(&self.halos[..])?.meet(&self.limits()?);
    let halo = Set::Box(reach).difference(&Set::Box(indices.clone())).simplify();
    let origin: Vec<i64> = indices.first()?.into_iter().map(|x| -x).collect();

    let mut fragments = vec![];
    for piece in halo.components() {
      let piece = match piece {
        Set::Box(b) => b,
        _ => continue
      };
      for shift in self.images() {
        let deltas: Vec<i64> = shift.iter().zip(&self.extents).map(|(k, e)| k * e).collect();
        let image = piece.meet(&self.global.translate(&deltas)?);
        if image.is_empty() {
          continue;
        }
        let back: Vec<i64> = deltas.iter().map(|d| -d).collect();
        fragments.push(HaloFragment {
          local: image.translate(&origin)?,
          global: image.translate(&back)?
        });
      }
    }
    debug!(domain = domain.id(), fragments = fragments.len(), "generated halo");
    Ok(HaloContainer { dim: self.global.dim(), fragments })
  }

  /// Region a halo may reach: the global box, widened by one period on periodic axes.
  fn limits(&self) -> Result<IndexBox> {
    let widths: Vec<HaloWidth> = self.periodic.iter().zip(&self.extents)
      .map(|(&periodic, &extent)| HaloWidth::symmetric(if periodic { extent } else { 0 }))
      .collect();
    self.global.extend(&widths[..])
  }

  /// Every combination of periods `-1`, `0` and `1` on periodic axes, `0` elsewhere.
  fn images(&self) -> Vec<Vec<i64>> {
    self.periodic.iter().fold(vec![vec![]], |images, &periodic| {
      let shifts: &'static [i64] = if periodic { &[-1, 0, 1] } else { &[0] };
      images.into_iter()
        .flat_map(|prefix| shifts.iter().map(move |&k| {
          let mut image = prefix.clone();
          image.push(k);
          image
        }))
        .collect()
    })
  }
}

/// One box of a halo, in the coordinates of the sub-domain and of the global box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HaloFragment {
  pub local: IndexBox,
  pub global: IndexBox
}

impl HaloFragment
{
  pub fn local_corners(&self) -> Result<(Vec<i64>, Vec<i64>)> {
    self.local.corners()
  }

  pub fn global_corners(&self) -> Result<(Vec<i64>, Vec<i64>)> {
    self.global.corners()
  }
}

#[derive(Clone, Debug)]
pub struct HaloContainer {
  dim: usize,
  fragments: Vec<HaloFragment>
}

impl HaloContainer
{
  pub fn fragments(&self) -> &[HaloFragment] {
    &self.fragments
  }

  pub fn len(&self) -> usize {
    self.fragments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fragments.is_empty()
  }

  /// The halo relative to the first corner of the sub-domain. Fragments never overlap there.
  pub fn local(&self) -> Set {
    let parts = self.fragments.iter().map(|f| Set::Box(f.local.clone())).collect();
    flatten::<IndexBox>(self.dim, parts, true)
  }

  /// The halo in global coordinates. On a periodic axis narrower than the sub-domain plus its halo, distinct fragments may designate the same cells.
  pub fn global(&self) -> Set {
    let parts = self.fragments.iter().map(|f| Set::Box(f.global.clone())).collect();
    flatten::<IndexBox>(self.dim, parts, false)
  }
}
