//! Grid layout constants and index helpers shared by the matrix, flood fill
//! and mesher.
//!
//! # Matrix Layout
//!
//! A [`SpatialMatrix`](crate::matrix::SpatialMatrix) of side `width` stores
//! its slots X-major, Z-minor:
//!
//! ```text
//! index = x * width + z
//!
//!   z →   0    1    2   ...  w-1
//! x=0   [0]  [1]  [2]  ...  [w-1]
//! x=1   [w]  [w+1]...
//! ```
//!
//! Grid coordinates are relative to the matrix root; world coordinates are
//! absolute integer positions on the x/z plane.
//!
//! # Flood Fill Neighbourhood
//!
//! ```text
//!          +Z
//!           │
//!   (-1, 1) │ ( 0, 1)   ( 1, 1)
//!      ✗    │    ●         ●
//!           │
//!   (-1, 0) │ ( 0, 0)   ( 1, 0)
//!      ●    │    ✗         ●
//!   ────────┼──────────────────── +X
//!   (-1,-1) │ ( 0,-1)   ( 1,-1)
//!      ●    │    ●         ✗
//! ```
//!
//! The default neighbourhood drops every offset with `x + z == 0`, which
//! removes the centre and the `(1,-1)`/`(-1,1)` diagonal pair. Region shapes
//! depend on this exact set.

use glam::IVec2;

/// Default side length of a freshly allocated discovery matrix.
pub const DEFAULT_MATRIX_WIDTH: usize = 10;

/// Default cap on the points one flood fill may discover.
pub const DEFAULT_MAX_REGION_POINTS: usize = 1 << 20;

/// Skewed six-neighbourhood (offsets with `x + z != 0`).
pub const SKEWED_NEIGHBOR_OFFSETS: [IVec2; 6] = [
  IVec2::new(-1, -1),
  IVec2::new(-1, 0),
  IVec2::new(0, -1),
  IVec2::new(0, 1),
  IVec2::new(1, 0),
  IVec2::new(1, 1),
];

/// Full Moore neighbourhood (all eight surrounding offsets).
pub const MOORE_NEIGHBOR_OFFSETS: [IVec2; 8] = [
  IVec2::new(-1, -1),
  IVec2::new(-1, 0),
  IVec2::new(-1, 1),
  IVec2::new(0, -1),
  IVec2::new(0, 1),
  IVec2::new(1, -1),
  IVec2::new(1, 0),
  IVec2::new(1, 1),
];

/// Quad corner offsets in emission order: bottom-left, top-left, top-right,
/// bottom-right.
pub const QUAD_CORNERS: [IVec2; 4] = [
  IVec2::new(0, 0),
  IVec2::new(0, 1),
  IVec2::new(1, 1),
  IVec2::new(1, 0),
];

/// Triangle indices of one quad relative to its first vertex.
pub const QUAD_TRIANGLES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Flatten a grid coordinate into a linear slot index.
///
/// Returns `None` if either axis falls outside `[0, width)`; a plain
/// `x * width + z` would alias out-of-range columns onto valid slots.
#[inline(always)]
pub fn flatten(grid: IVec2, width: usize) -> Option<usize> {
  let w = width as i64;
  let (x, z) = (grid.x as i64, grid.y as i64);
  if x < 0 || z < 0 || x >= w || z >= w {
    return None;
  }
  Some((x * w + z) as usize)
}

/// Convert a linear slot index back to its grid coordinate.
#[inline(always)]
pub const fn unflatten(index: usize, width: usize) -> IVec2 {
  IVec2::new((index / width) as i32, (index % width) as i32)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
