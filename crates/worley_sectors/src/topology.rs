//! Per-cell attributes derived from the noise field.
//!
//! Every attribute is a pure function of a cell's value, so the same index
//! always maps to the same grouping, height and height group.
//!
//! ```text
//! value   0.0        0.25        0.5        0.75        1.0
//!         ├────┬─────┼────┬──────┼────┬─────┼────┬──────┤
//! grouping  0   .125  .25  .375   .5   .625  .75  .875     (8 levels)
//! height    ─── 0 ──── ─── 1 ──── ─── 2 ──── ─── 3 ────     (4 groups)
//! ```
//!
//! Groupings are finer than height groups, so two cells of different
//! grouping can still share a height. That is what makes a sector boundary
//! walkable.

use crate::noise::{CellSampler, WorleyNoise};
use crate::types::{CellAttributes, CellData, CellIndex, PointData};

/// Cell attribute lookups used by region discovery and classification.
pub trait CellTopology: Send + Sync {
  /// Seed record for a cell.
  fn cell_data(&self, index: CellIndex) -> CellData;

  /// Coarse equivalence class; equal groupings form one macro-region.
  fn cell_grouping(&self, index: CellIndex) -> f32;

  fn cell_height(&self, index: CellIndex) -> f32;

  fn cell_height_group(&self, index: CellIndex) -> i32;

  /// Largest height-group difference that can still be walked.
  fn max_walkable_step(&self) -> i32 {
    1
  }

  /// True if the current and adjacent cell of `point` sit in different
  /// height groups that are still walkable.
  fn edge_is_sloped(&self, point: &PointData) -> bool {
    let step = (self.cell_height_group(point.current_cell_index)
      - self.cell_height_group(point.adjacent_cell_index))
    .abs();
    step > 0 && step <= self.max_walkable_step()
  }

  /// Terrain height at a grid point.
  ///
  /// Inside a cell this is the cell height; towards the boundary it blends
  /// halfway to the adjacent cell, so neighbouring cells meet at a shared
  /// height instead of a cliff.
  fn point_height(&self, point: &PointData) -> f32 {
    let current = self.cell_height(point.current_cell_index);
    if !point.has_adjacent() {
      return current;
    }
    let adjacent = self.cell_height(point.adjacent_cell_index);
    let blend = 0.5 + 0.5 * point.edge_factor.clamp(0.0, 1.0);
    adjacent + (current - adjacent) * blend
  }
}

/// Topology configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopologyConfig {
  /// Number of grouping classes the value range is split into.
  pub grouping_levels: u32,

  /// Number of height groups the value range is split into.
  pub height_groups: u32,

  /// World height of one height group.
  pub height_scale: f32,

  /// Largest height-group difference treated as a walkable slope.
  pub max_walkable_step: i32,
}

impl Default for TopologyConfig {
  fn default() -> Self {
    Self {
      grouping_levels: 8,
      height_groups: 4,
      height_scale: 5.0,
      max_walkable_step: 1,
    }
  }
}

impl TopologyConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_grouping_levels(mut self, levels: u32) -> Self {
    self.grouping_levels = levels;
    self
  }

  pub fn with_height_groups(mut self, groups: u32) -> Self {
    self.height_groups = groups;
    self
  }

  pub fn with_height_scale(mut self, scale: f32) -> Self {
    self.height_scale = scale;
    self
  }

  pub fn with_max_walkable_step(mut self, step: i32) -> Self {
    self.max_walkable_step = step;
    self
  }
}

/// Topology derived from a [`WorleyNoise`] field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TopologyUtil {
  noise: WorleyNoise,
  config: TopologyConfig,
}

impl TopologyUtil {
  pub fn new(noise: WorleyNoise, config: TopologyConfig) -> Self {
    Self { noise, config }
  }

  pub fn noise(&self) -> &WorleyNoise {
    &self.noise
  }

  pub fn config(&self) -> &TopologyConfig {
    &self.config
  }

  /// Quantize a value in [0, 1) into one of `levels` buckets.
  #[inline]
  fn bucket(value: f32, levels: u32) -> i32 {
    let levels = levels.max(1);
    ((value * levels as f32).floor() as i32).clamp(0, levels as i32 - 1)
  }

  /// All derived attributes of a cell.
  pub fn describe(&self, index: CellIndex) -> CellAttributes {
    CellAttributes {
      cell: self.cell_data(index),
      height: self.cell_height(index),
      height_group: self.cell_height_group(index),
      grouping: self.cell_grouping(index),
    }
  }
}

impl CellTopology for TopologyUtil {
  fn cell_data(&self, index: CellIndex) -> CellData {
    self.noise.cell_data(index)
  }

  fn cell_grouping(&self, index: CellIndex) -> f32 {
    let levels = self.config.grouping_levels.max(1);
    let value = self.noise.cell_data(index).value;
    Self::bucket(value, levels) as f32 / levels as f32
  }

  fn cell_height(&self, index: CellIndex) -> f32 {
    self.cell_height_group(index) as f32 * self.config.height_scale
  }

  fn cell_height_group(&self, index: CellIndex) -> i32 {
    Self::bucket(self.noise.cell_data(index).value, self.config.height_groups)
  }

  fn max_walkable_step(&self) -> i32 {
    self.config.max_walkable_step
  }
}

#[cfg(test)]
#[path = "topology_test.rs"]
mod topology_test;
