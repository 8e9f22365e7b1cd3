//! Region discovery by breadth-first flood fill over grid points.
//!
//! Starting from a seed position, the fill walks outward through every grid
//! point whose cell shares the start cell's grouping, plus one ring of points
//! just beyond it. That ring is what classification later inspects to decide
//! whether the region can be walked into.
//!
//! ```text
//!   . . . . . . .        legend
//!   . o o o o . .          ■  in group (current cell grouping == G)
//!   . o ■ ■ ■ o .          o  boundary ring (kept, not expanded)
//!   . o ■ S ■ ■ o          S  seed
//!   . . o ■ ■ ■ o          .  never visited
//!   . . . o o o o
//! ```
//!
//! A step from `p` to a neighbour `q` is taken when either endpoint is in
//! group, so the fill may step out once but never twice in a row. Neighbours
//! past the `i32` range are skipped.

use std::collections::VecDeque;

use glam::IVec2;
use tracing::{debug, warn};

use crate::constants::{
  DEFAULT_MATRIX_WIDTH, DEFAULT_MAX_REGION_POINTS, MOORE_NEIGHBOR_OFFSETS, SKEWED_NEIGHBOR_OFFSETS,
};
use crate::error::{Result, SectorError};
use crate::matrix::SpatialMatrix;
use crate::noise::CellSampler;
use crate::topology::CellTopology;
use crate::types::{CellData, PointData};

/// Neighbour set the flood fill expands through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Neighborhood {
  /// Six offsets, excluding the `(1,-1)`/`(-1,1)` diagonal.
  ///
  /// Region shapes generated by existing worlds depend on this set.
  #[default]
  Skewed,

  /// All eight surrounding offsets.
  Moore,
}

impl Neighborhood {
  pub fn offsets(self) -> &'static [IVec2] {
    match self {
      Neighborhood::Skewed => &SKEWED_NEIGHBOR_OFFSETS,
      Neighborhood::Moore => &MOORE_NEIGHBOR_OFFSETS,
    }
  }
}

/// Flood fill configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloodFillConfig {
  /// Side of the matrix allocated before discovery starts. The matrix grows
  /// as needed, so this only affects how often it reallocates.
  pub initial_width: usize,

  pub neighborhood: Neighborhood,

  /// Most points one discovery may visit before giving up with
  /// [`SectorError::RegionTooLarge`]. A grouping coarse enough for one class
  /// to percolate would otherwise never close.
  pub max_points: usize,
}

impl Default for FloodFillConfig {
  fn default() -> Self {
    Self {
      initial_width: DEFAULT_MATRIX_WIDTH,
      neighborhood: Neighborhood::default(),
      max_points: DEFAULT_MAX_REGION_POINTS,
    }
  }
}

impl FloodFillConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_initial_width(mut self, width: usize) -> Self {
    self.initial_width = width;
    self
  }

  pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
    self.neighborhood = neighborhood;
    self
  }

  pub fn with_max_points(mut self, max_points: usize) -> Self {
    self.max_points = max_points;
    self
  }
}

/// Everything one flood fill discovered.
#[derive(Clone, Debug)]
pub struct DiscoveredRegion {
  /// Visited points keyed by world position.
  pub matrix: SpatialMatrix<PointData>,

  /// Visited points in discovery order, seed first.
  pub points: Vec<PointData>,

  /// Cell the seed position belongs to.
  pub start_cell: CellData,

  /// Grouping of the start cell (`G`).
  pub grouping: f32,
}

impl DiscoveredRegion {
  /// Points whose own cell is in the region's grouping.
  pub fn group_points<'a, T>(&'a self, topology: &'a T) -> impl Iterator<Item = &'a PointData> + 'a
  where
    T: CellTopology + ?Sized + 'a,
  {
    self
      .points
      .iter()
      .filter(move |p| topology.cell_grouping(p.current_cell_index) == self.grouping)
  }
}

/// Discover the region containing `seed_position`.
///
/// Every position is enqueued at most once and the fill never leaves the
/// group by more than one step, so it closes as long as the group itself is
/// finite. Fails with [`SectorError::RegionTooLarge`] once more than
/// `config.max_points` points are discovered.
#[tracing::instrument(
  skip_all,
  name = "flood_fill::discover_region",
  fields(seed_x = seed_position.x, seed_z = seed_position.y)
)]
pub fn discover_region<S, T>(
  sampler: &S,
  topology: &T,
  seed_position: IVec2,
  config: &FloodFillConfig,
) -> Result<DiscoveredRegion>
where
  S: CellSampler + ?Sized,
  T: CellTopology + ?Sized,
{
  let width = config.initial_width.max(1);
  let root = seed_position.saturating_sub(IVec2::splat((width / 2) as i32));
  let mut matrix = SpatialMatrix::new(width, root);

  let start = sampler.point_at(seed_position);
  let start_cell = sampler.cell_data(start.current_cell_index);
  let grouping = topology.cell_grouping(start.current_cell_index);

  let mut points = Vec::new();
  let mut queue = VecDeque::new();

  matrix.add_item(start, seed_position);
  queue.push_back(start);
  let mut discovered = 1usize;

  while let Some(point) = queue.pop_front() {
    points.push(point);
    let current_in_group = topology.cell_grouping(point.current_cell_index) == grouping;

    for &offset in config.neighborhood.offsets() {
      let Some(position) = offset_position(point.position, offset) else {
        continue;
      };
      if matrix.item_is_set(position) {
        continue;
      }

      let neighbor = sampler.point_at(position);
      let neighbor_in_group = topology.cell_grouping(neighbor.current_cell_index) == grouping;
      if !current_in_group && !neighbor_in_group {
        continue;
      }

      discovered += 1;
      if discovered > config.max_points {
        warn!(
          limit = config.max_points,
          start_cell = %start_cell.index,
          grouping,
          "region exceeded point limit"
        );
        return Err(SectorError::RegionTooLarge {
          start_cell: start_cell.index,
          limit: config.max_points,
        });
      }

      matrix.add_item(neighbor, position);
      queue.push_back(neighbor);
    }
  }

  debug!(
    points = points.len(),
    matrix_width = matrix.width(),
    start_cell = %start_cell.index,
    grouping,
    "region discovered"
  );

  Ok(DiscoveredRegion {
    matrix,
    points,
    start_cell,
    grouping,
  })
}

/// `position + offset`, or `None` when either axis leaves the `i32` range.
#[inline]
fn offset_position(position: IVec2, offset: IVec2) -> Option<IVec2> {
  Some(IVec2::new(
    position.x.checked_add(offset.x)?,
    position.y.checked_add(offset.y)?,
  ))
}

#[cfg(test)]
#[path = "flood_fill_test.rs"]
mod flood_fill_test;
