//! Heightfield quad mesher.
//!
//! Walks every grid square of a discovered region's matrix and emits one quad
//! for each square whose four corners were all discovered. Squares touching
//! an unset point are skipped, which leaves holes where the region ends.
//!
//! ```text
//!   tl (x, z+1) ●────● tr (x+1, z+1)        vertex order: bl, tl, tr, br
//!               │ ╱  │                      triangles:    0 1 2, 0 2 3
//!               │╱   │
//!   bl (x, z)   ●────● br (x+1, z)
//! ```
//!
//! Vertices are in matrix-local coordinates, `(grid_x, height, grid_z)`. The
//! host translates by the matrix root to place the mesh in the world.

mod normals;

pub use normals::recalculate as recalculate_normals;

use glam::IVec2;
use tracing::debug;

use crate::constants::{QUAD_CORNERS, QUAD_TRIANGLES};
use crate::error::{Result, SectorError};
use crate::matrix::SpatialMatrix;
use crate::types::{MeshConfig, MeshOutput, PointData, Vertex};

/// Build the terrain mesh of one region.
///
/// `heights` must be laid out like `matrix` (same width and root); its slots
/// give the vertex height of the matching grid point.
#[tracing::instrument(skip_all, name = "mesh::build_mesh", fields(width = matrix.width()))]
pub fn build_mesh(
  matrix: &SpatialMatrix<PointData>,
  heights: &SpatialMatrix<f32>,
  config: &MeshConfig,
) -> Result<MeshOutput> {
  if heights.width() != matrix.width() || heights.root_position() != matrix.root_position() {
    return Err(SectorError::HeightBufferMismatch {
      expected_width: matrix.width(),
      expected_root: matrix.root_position(),
      actual_width: heights.width(),
      actual_root: heights.root_position(),
    });
  }

  let mut output = MeshOutput::new();
  let width = matrix.width() as i32;
  let mut offset = 0u32;

  for x in 0..width - 1 {
    for z in 0..width - 1 {
      let origin = IVec2::new(x, z);
      let corners = QUAD_CORNERS.map(|c| origin + c);
      if !corners.iter().all(|&c| matrix.item_is_set_at(c)) {
        continue;
      }

      for corner in corners {
        let position = [corner.x as f32, heights.get_item_at(corner), corner.y as f32];
        output.bounds.encapsulate(position);
        output.vertices.push(Vertex {
          position,
          color: config.color,
          ..Default::default()
        });
      }
      output.indices.extend(QUAD_TRIANGLES.iter().map(|i| offset + i));
      offset += 4;
    }
  }

  recalculate_normals(&mut output);

  debug!(
    quads = output.quad_count(),
    vertices = output.vertices.len(),
    "sector mesh built"
  );

  Ok(output)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
