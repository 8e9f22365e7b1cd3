//! Test utilities: a synthetic block field with hand-picked groupings.
//!
//! `BlockField` tiles the plane with square cells of `cell_size` grid units.
//! Each block's grouping, height group and value can be set per lattice
//! coordinate, so tests can lay out exact region shapes instead of searching
//! real noise for them.

use std::collections::HashMap;

use glam::{IVec2, Vec2};

use crate::noise::CellSampler;
use crate::topology::CellTopology;
use crate::types::{CellData, CellIndex, PointData};

pub struct BlockField {
  pub cell_size: i32,
  pub default_grouping: f32,
  pub default_height_group: i32,
  pub default_value: f32,
  pub groupings: HashMap<IVec2, f32>,
  pub height_groups: HashMap<IVec2, i32>,
  pub values: HashMap<IVec2, f32>,
}

impl BlockField {
  pub fn new(cell_size: i32) -> Self {
    Self {
      cell_size,
      default_grouping: 0.0,
      default_height_group: 2,
      default_value: 0.5,
      groupings: HashMap::new(),
      height_groups: HashMap::new(),
      values: HashMap::new(),
    }
  }

  /// Assign `grouping` to every block in `[min, max]` (inclusive).
  pub fn with_group(mut self, min: IVec2, max: IVec2, grouping: f32) -> Self {
    for x in min.x..=max.x {
      for z in min.y..=max.y {
        self.groupings.insert(IVec2::new(x, z), grouping);
      }
    }
    self
  }

  pub fn with_height_group(mut self, block: IVec2, group: i32) -> Self {
    self.height_groups.insert(block, group);
    self
  }

  pub fn with_value(mut self, block: IVec2, value: f32) -> Self {
    self.values.insert(block, value);
    self
  }

  pub fn block_of(&self, position: IVec2) -> IVec2 {
    IVec2::new(
      position.x.div_euclid(self.cell_size),
      position.y.div_euclid(self.cell_size),
    )
  }

  pub fn index_of_block(block: IVec2) -> CellIndex {
    CellIndex::from_lattice(block)
  }

  /// Block whose border is closest to `position`.
  fn adjacent_block(&self, position: IVec2, block: IVec2) -> IVec2 {
    let local = position.wrapping_sub(block.wrapping_mul(IVec2::splat(self.cell_size)));
    let to_west = local.x;
    let to_east = self.cell_size - 1 - local.x;
    let to_south = local.y;
    let to_north = self.cell_size - 1 - local.y;

    let candidates = [
      (to_west, IVec2::new(-1, 0)),
      (to_east, IVec2::new(1, 0)),
      (to_south, IVec2::new(0, -1)),
      (to_north, IVec2::new(0, 1)),
    ];
    let (_, offset) = candidates
      .into_iter()
      .min_by_key(|(distance, _)| *distance)
      .unwrap_or((0, IVec2::X));
    block.wrapping_add(offset)
  }
}

impl CellSampler for BlockField {
  fn evaluate(&self, x: f64, z: f64) -> PointData {
    let position = IVec2::new(x.floor() as i32, z.floor() as i32);
    let block = self.block_of(position);
    let adjacent = self.adjacent_block(position, block);
    PointData {
      position,
      current_cell_index: Self::index_of_block(block),
      adjacent_cell_index: Self::index_of_block(adjacent),
      current_cell_value: *self.values.get(&block).unwrap_or(&self.default_value),
      distance: 0.0,
      edge_factor: 1.0,
      is_set: false,
    }
  }

  fn cell_data(&self, index: CellIndex) -> CellData {
    let block = index.lattice();
    let center = block.as_vec2() * self.cell_size as f32 + Vec2::splat(self.cell_size as f32 * 0.5);
    CellData {
      index,
      position: center,
      value: *self.values.get(&block).unwrap_or(&self.default_value),
    }
  }
}

impl CellTopology for BlockField {
  fn cell_data(&self, index: CellIndex) -> CellData {
    CellSampler::cell_data(self, index)
  }

  fn cell_grouping(&self, index: CellIndex) -> f32 {
    *self
      .groupings
      .get(&index.lattice())
      .unwrap_or(&self.default_grouping)
  }

  fn cell_height(&self, index: CellIndex) -> f32 {
    self.cell_height_group(index) as f32
  }

  fn cell_height_group(&self, index: CellIndex) -> i32 {
    *self
      .height_groups
      .get(&index.lattice())
      .unwrap_or(&self.default_height_group)
  }
}

/// A set point with explicit cell indices, for classifier tests.
pub fn point(position: IVec2, current: CellIndex, adjacent: CellIndex, value: f32) -> PointData {
  PointData {
    position,
    current_cell_index: current,
    adjacent_cell_index: adjacent,
    current_cell_value: value,
    distance: 0.0,
    edge_factor: 1.0,
    is_set: true,
  }
}
