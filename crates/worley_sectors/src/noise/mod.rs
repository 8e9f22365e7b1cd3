//! Worley (cellular) noise field.
//!
//! The plane is covered by one jittered seed point per lattice square. Every
//! position belongs to its nearest seed ("current" cell) and remembers the
//! second-nearest one ("adjacent" cell), which is what region discovery and
//! slope detection work from.
//!
//! ```text
//!   lattice square         jittered seeds           cells
//!  ┌─────┬─────┐          ┌─────┬─────┐          ┌──╲──┬─────┐
//!  │     │     │          │ •   │    •│          │ A ╲ │  B  │
//!  ├─────┼─────┤   ──►    ├─────┼─────┤   ──►    ├────╲┼──╱──┤
//!  │     │     │          │   • │ •   │          │  C  ╲╱ D  │
//!  └─────┴─────┘          └─────┴─────┘          └─────┴─────┘
//! ```

mod worley;

pub use worley::{NoiseConfig, WorleyNoise};

use glam::IVec2;

use crate::types::{CellData, CellIndex, PointData};

/// Source of cell membership for grid positions.
///
/// Implementations must be pure: the same input always yields the same
/// record, regardless of call order or thread.
pub trait CellSampler: Send + Sync {
  /// Evaluate the field at a world coordinate.
  fn evaluate(&self, x: f64, z: f64) -> PointData;

  /// Rebuild a seed record from its index.
  fn cell_data(&self, index: CellIndex) -> CellData;

  /// Evaluate a grid position and mark the result as set.
  fn point_at(&self, position: IVec2) -> PointData {
    let mut point = self.evaluate(position.x as f64, position.y as f64);
    point.position = position;
    point.is_set = true;
    point
  }
}
