//! Deterministic 2D Worley noise with nearest/second-nearest tracking.

use glam::{DVec2, IVec2, Vec2};

use super::CellSampler;
use crate::types::{CellData, CellIndex, PointData};

const PRIME_X: i32 = 501_125_321;
const PRIME_Z: i32 = 1_136_930_381;
const HASH_MUL: i32 = 0x27d4_eb2d;

/// Salt separating the cell value stream from the jitter stream.
const VALUE_SALT: i32 = 0x5f35_6495;

/// Outermost lattice ring searched for the second-nearest seed. The four seeds
/// of the 2x2 block around a point lie within 1.5√2 of it, and ring 4 starts 3
/// squares away.
const MAX_SEARCH_RING: i32 = 3;

/// Noise configuration, shared immutably by every evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseConfig {
  pub seed: i32,

  /// Lattice squares per world unit. Smaller = larger cells. Must be > 0.
  pub frequency: f64,

  /// Distance (lattice units) over which `edge_factor` ramps from 0 to 1.
  pub edge_smoothing: f64,

  /// Seed displacement inside its lattice square, clamped to [0, 1].
  /// 0 gives a regular grid of square cells.
  pub jitter: f64,
}

impl Default for NoiseConfig {
  fn default() -> Self {
    Self {
      seed: 1337,
      frequency: 0.01,
      edge_smoothing: 0.1,
      jitter: 1.0,
    }
  }
}

impl NoiseConfig {
  pub fn new(seed: i32) -> Self {
    Self {
      seed,
      ..Self::default()
    }
  }

  pub fn with_frequency(mut self, frequency: f64) -> Self {
    self.frequency = frequency;
    self
  }

  pub fn with_edge_smoothing(mut self, edge_smoothing: f64) -> Self {
    self.edge_smoothing = edge_smoothing;
    self
  }

  pub fn with_jitter(mut self, jitter: f64) -> Self {
    self.jitter = jitter;
    self
  }
}

/// Worley noise field.
///
/// Holds configuration only; evaluation has no hidden state.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorleyNoise {
  config: NoiseConfig,
}

impl WorleyNoise {
  pub fn new(config: NoiseConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &NoiseConfig {
    &self.config
  }

  /// Seed point of a lattice square, in lattice space.
  #[inline]
  pub(super) fn seed_point(&self, lattice: IVec2) -> DVec2 {
    let h = hash(self.config.seed, lattice);
    let offset = DVec2::new(
      (h & 0xFFFF) as f64 / 65536.0,
      (h >> 16) as f64 / 65536.0,
    );
    let jitter = self.config.jitter.clamp(0.0, 1.0);
    lattice.as_dvec2() + DVec2::splat(0.5) + (offset - DVec2::splat(0.5)) * jitter
  }

  /// Cell value in [0, 1), a pure function of seed and lattice.
  #[inline]
  fn cell_value(&self, lattice: IVec2) -> f32 {
    let h = hash(self.config.seed ^ VALUE_SALT, lattice);
    // 24 bits fit an f32 mantissa exactly, keeping the result below 1.0
    (h >> 8) as f32 / 16_777_216.0
  }

  /// Nearest and second-nearest seed around a point in lattice space.
  ///
  /// Returns `((lattice, dist²), (lattice, dist²))`. Ties keep the first
  /// candidate in scan order.
  ///
  /// The 3x3 block around `p` always holds the nearest seed, but with a large
  /// jitter the second-nearest can sit two or three squares out. Outer rings
  /// are scanned until their closest possible seed is farther than the
  /// current second-nearest.
  fn nearest_two(&self, p: DVec2) -> ((IVec2, f64), (IVec2, f64)) {
    let base = p.floor();
    // `as` saturates, so non-finite input degrades instead of panicking
    let base = IVec2::new(base.x as i32, base.y as i32);

    let mut nearest = (base, f64::MAX);
    let mut second = (base, f64::MAX);

    for dx in -1..=1 {
      for dz in -1..=1 {
        let lattice = IVec2::new(base.x.wrapping_add(dx), base.y.wrapping_add(dz));
        let dist_sq = self.seed_point(lattice).distance_squared(p);
        keep_two(&mut nearest, &mut second, (lattice, dist_sq));
      }
    }

    // Seeds stay at least `margin` inside their square
    let margin = 0.5 - 0.5 * self.config.jitter.clamp(0.0, 1.0);
    for ring in 2..=MAX_SEARCH_RING {
      let bound = (ring - 1) as f64 + margin;
      if bound * bound >= second.1 {
        break;
      }
      for dx in -ring..=ring {
        for dz in -ring..=ring {
          if dx.abs() != ring && dz.abs() != ring {
            continue;
          }
          let lattice = IVec2::new(base.x.wrapping_add(dx), base.y.wrapping_add(dz));
          if self.seed_box_distance_squared(lattice, p, margin) < second.1 {
            let dist_sq = self.seed_point(lattice).distance_squared(p);
            keep_two(&mut nearest, &mut second, (lattice, dist_sq));
          }
        }
      }
    }

    (nearest, second)
  }

  /// Squared distance from `p` to the area a lattice square's seed can occupy.
  #[inline]
  fn seed_box_distance_squared(&self, lattice: IVec2, p: DVec2, margin: f64) -> f64 {
    let min = lattice.as_dvec2() + DVec2::splat(margin);
    let max = lattice.as_dvec2() + DVec2::splat(1.0 - margin);
    p.max(min).min(max).distance_squared(p)
  }
}

impl CellSampler for WorleyNoise {
  fn evaluate(&self, x: f64, z: f64) -> PointData {
    let p = DVec2::new(x, z) * self.config.frequency;
    let ((current, d0_sq), (adjacent, d1_sq)) = self.nearest_two(p);

    let d0 = d0_sq.sqrt();
    let d1 = d1_sq.sqrt();

    let edge_factor = if self.config.edge_smoothing > 0.0 {
      ((d1 - d0) / self.config.edge_smoothing).clamp(0.0, 1.0)
    } else {
      1.0
    };

    PointData {
      position: IVec2::new(x.round() as i32, z.round() as i32),
      current_cell_index: CellIndex::from_lattice(current),
      adjacent_cell_index: CellIndex::from_lattice(adjacent),
      current_cell_value: self.cell_value(current),
      distance: d0 as f32,
      edge_factor: if edge_factor.is_nan() { 0.0 } else { edge_factor as f32 },
      is_set: false,
    }
  }

  fn cell_data(&self, index: CellIndex) -> CellData {
    let lattice = index.lattice();
    let world = self.seed_point(lattice) / self.config.frequency;
    CellData {
      index,
      position: Vec2::new(world.x as f32, world.y as f32),
      value: self.cell_value(lattice),
    }
  }
}

#[inline]
fn keep_two(nearest: &mut (IVec2, f64), second: &mut (IVec2, f64), candidate: (IVec2, f64)) {
  if candidate.1 < nearest.1 {
    *second = *nearest;
    *nearest = candidate;
  } else if candidate.1 < second.1 {
    *second = candidate;
  }
}

/// Lattice hash: FastNoise-style prime mix followed by an avalanche
/// finalizer.
#[inline(always)]
fn hash(seed: i32, lattice: IVec2) -> u32 {
  let h = (seed ^ lattice.x.wrapping_mul(PRIME_X) ^ lattice.y.wrapping_mul(PRIME_Z))
    .wrapping_mul(HASH_MUL);

  let mut h = h as u32;
  h ^= h >> 15;
  h = h.wrapping_mul(0x2c1b_3c6d);
  h ^= h >> 12;
  h = h.wrapping_mul(0x297a_2d39);
  h ^= h >> 15;
  h
}
