//! Core data types for cell discovery and sector meshing.

use std::fmt;

use glam::{IVec2, Vec2};

/// Identifier of a Worley seed point.
///
/// Packs the seed's lattice coordinate as two 32-bit halves (x high, z low),
/// so the seed can be rebuilt from the index alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(i64);

impl CellIndex {
  /// Build an index from a lattice coordinate.
  #[inline]
  pub const fn from_lattice(lattice: IVec2) -> Self {
    Self(((lattice.x as i64) << 32) | (lattice.y as u32 as i64))
  }

  /// Lattice coordinate of the seed this index names.
  #[inline]
  pub const fn lattice(self) -> IVec2 {
    IVec2::new((self.0 >> 32) as i32, self.0 as i32)
  }

  /// Raw packed value.
  #[inline]
  pub const fn raw(self) -> i64 {
    self.0
  }

  #[inline]
  pub const fn from_raw(raw: i64) -> Self {
    Self(raw)
  }
}

impl fmt::Display for CellIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lattice = self.lattice();
    write!(f, "cell({}, {})", lattice.x, lattice.y)
  }
}

/// Per-grid-point noise record.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointData {
  /// Integer grid position on the x/z plane (`y` of the vector is world z).
  pub position: IVec2,

  /// Seed owning this point (nearest).
  pub current_cell_index: CellIndex,

  /// Second-nearest seed, used for edge and slope detection.
  pub adjacent_cell_index: CellIndex,

  /// Pseudo-random value of the current cell, in [0, 1).
  pub current_cell_value: f32,

  /// Distance to the nearest seed in lattice units.
  pub distance: f32,

  /// 0 on the boundary between the two nearest cells, 1 once the point is
  /// at least `edge_smoothing` away from it.
  pub edge_factor: f32,

  /// Whether this point has been visited/written.
  pub is_set: bool,
}

impl PointData {
  /// True when the two nearest seeds differ, i.e. the point has a neighbour
  /// cell to compare against.
  #[inline]
  pub fn has_adjacent(&self) -> bool {
    self.current_cell_index != self.adjacent_cell_index
  }
}

/// Per-cell seed record, rebuilt from a [`CellIndex`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellData {
  pub index: CellIndex,

  /// Seed point location in world units.
  pub position: Vec2,

  /// Same value carried by [`PointData::current_cell_value`].
  pub value: f32,
}

impl CellData {
  /// Nearest integer grid position to the seed point.
  pub fn grid_position(&self) -> IVec2 {
    self.position.round().as_ivec2()
  }
}

/// Derived attributes of a cell, materialised for hosts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellAttributes {
  pub cell: CellData,
  pub height: f32,
  pub height_group: i32,
  pub grouping: f32,
}

/// Sector classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SectorType {
  /// Ordinary walkable terrain.
  #[default]
  None,

  /// No walkable edge leaves the sector.
  Mountain,

  /// Walkable and low-lying.
  Lake,
}

impl SectorType {
  /// Hosts render lakes with a water surface.
  pub fn is_water(self) -> bool {
    matches!(self, SectorType::Lake)
  }
}

/// Output vertex with all mesh attributes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  /// Position in matrix-local coordinates: `(grid_x, height, grid_z)`.
  pub position: [f32; 3],

  /// Surface normal (unit vector).
  pub normal: [f32; 3],

  /// RGBA vertex color.
  pub color: [f32; 4],
}

impl Default for Vertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 1.0, 0.0],
      color: [1.0; 4],
    }
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Mesh generation result.
///
/// Vertices are not shared between quads: every emitted quad owns four
/// consecutive vertices.
#[derive(Clone, Debug, Default)]
pub struct MeshOutput {
  pub vertices: Vec<Vertex>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Number of emitted quads.
  pub fn quad_count(&self) -> usize {
    self.vertices.len() / 4
  }

  pub fn positions(&self) -> Vec<[f32; 3]> {
    self.vertices.iter().map(|v| v.position).collect()
  }

  pub fn normals(&self) -> Vec<[f32; 3]> {
    self.vertices.iter().map(|v| v.normal).collect()
  }

  pub fn colors(&self) -> Vec<[f32; 4]> {
    self.vertices.iter().map(|v| v.color).collect()
  }
}

/// Configuration for mesh generation.
#[derive(Clone, Debug)]
pub struct MeshConfig {
  /// Uniform color written to every vertex.
  pub color: [f32; 4],
}

impl Default for MeshConfig {
  fn default() -> Self {
    Self { color: [0.6; 4] }
  }
}

impl MeshConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_color(mut self, color: [f32; 4]) -> Self {
    self.color = color;
    self
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
