//! worley_sectors - Framework/engine independent Worley cell sectors
//!
//! Splits an infinite plane into sectors: connected regions of Worley cells
//! that share a coarse grouping. Each sector is discovered by flood fill,
//! classified as ordinary terrain, mountain or lake, and turned into a
//! heightfield quad mesh that a host engine can upload as-is.
//!
//! # Features
//!
//! - **Worley noise**: Deterministic jittered-seed cellular field with
//!   nearest/second-nearest cell lookup
//! - **Region discovery**: Breadth-first flood fill into a growable spatial
//!   matrix, keeping one ring of boundary points
//! - **Classification**: Pathability, sector type and aggregate value, with a
//!   thread-safe cell ownership registry
//! - **Meshing**: One quad per fully discovered grid square, angle-weighted
//!   normals
//! - **Parallel stage**: Rayon fan-out of many seeds against one world
//!
//! # Example
//!
//! ```ignore
//! use glam::IVec2;
//! use worley_sectors::{NoiseConfig, SectorWorld, WorldConfig};
//!
//! let world = SectorWorld::new(WorldConfig::new().with_noise(NoiseConfig::new(42)));
//! let sector = world.generate_sector(IVec2::new(0, 0))?;
//!
//! println!("{:?} sector with {} quads at {}",
//!     sector.sector_type(), sector.mesh.quad_count(), sector.origin());
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{flatten, unflatten, DEFAULT_MATRIX_WIDTH};
pub use error::{Result, SectorError};
pub use types::{
  CellAttributes, CellData, CellIndex, MeshConfig, MeshOutput, MinMaxAABB, PointData, SectorType,
  Vertex,
};

// Worley noise field
pub mod noise;
pub use noise::{CellSampler, NoiseConfig, WorleyNoise};

// Per-cell grouping and height
pub mod topology;
pub use topology::{CellTopology, TopologyConfig, TopologyUtil};

pub mod matrix;
pub use matrix::SpatialMatrix;

// Region discovery
pub mod flood_fill;
pub use flood_fill::{discover_region, DiscoveredRegion, FloodFillConfig, Neighborhood};

// Classification and cell ownership
pub mod sector;
pub use sector::{classify_region, CellRegistry, RegionClassification, SectorId};

// Heightfield meshing
pub mod mesh;
pub use mesh::build_mesh;

// World container - host entry point
pub mod world;
pub use world::{Sector, SectorTimings, SectorWorld, WorldConfig, WorldId};

// Task queue for parallel sector generation
pub mod task_queue;
pub use task_queue::{SectorCompletion, SectorRequest, SectorStage};

pub mod metrics;

#[cfg(test)]
pub(crate) mod test_utils;
