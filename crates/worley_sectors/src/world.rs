//! SectorWorld - host entry point tying discovery, classification and meshing
//! together.
//!
//! A world owns its noise source, its topology and the registry of claimed
//! cells. Every operation takes `&self`, so one world can serve many regions
//! in parallel (see [`SectorStage`](crate::task_queue::SectorStage)).
//!
//! ```text
//!   seed ──► discover_region ──► classify_region ──► region_heights ──► build_mesh
//!              (flood fill)      (claims cells)                          │
//!                                                                        ▼
//!                                                                      Sector
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use glam::IVec2;
use tracing::info;
use web_time::Instant;

use crate::error::Result;
use crate::flood_fill::{self, DiscoveredRegion, FloodFillConfig};
use crate::matrix::SpatialMatrix;
use crate::mesh;
use crate::noise::{CellSampler, NoiseConfig, WorleyNoise};
use crate::sector::{self, CellRegistry, RegionClassification, SectorId};
use crate::topology::{CellTopology, TopologyConfig, TopologyUtil};
use crate::types::{CellData, MeshConfig, MeshOutput, PointData, SectorType};

// =============================================================================
// WorldId - unique identifier
// =============================================================================

static WORLD_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque world identifier, unique within the process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WorldId(u64);

impl WorldId {
  pub fn new() -> Self {
    Self(WORLD_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for WorldId {
  fn default() -> Self {
    Self::new()
  }
}

// =============================================================================
// Configuration
// =============================================================================

/// Every tunable of a world in one place.
#[derive(Clone, Debug, Default)]
pub struct WorldConfig {
  pub noise: NoiseConfig,
  pub topology: TopologyConfig,
  pub flood_fill: FloodFillConfig,
  pub mesh: MeshConfig,
}

impl WorldConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
    self.noise = noise;
    self
  }

  pub fn with_topology(mut self, topology: TopologyConfig) -> Self {
    self.topology = topology;
    self
  }

  pub fn with_flood_fill(mut self, flood_fill: FloodFillConfig) -> Self {
    self.flood_fill = flood_fill;
    self
  }

  pub fn with_mesh(mut self, mesh: MeshConfig) -> Self {
    self.mesh = mesh;
    self
  }
}

// =============================================================================
// Sector - finished output
// =============================================================================

/// A fully generated sector, ready for the host to apply.
#[derive(Clone, Debug)]
pub struct Sector {
  pub id: SectorId,
  pub region: DiscoveredRegion,
  pub classification: RegionClassification,

  /// Vertex height per matrix slot, parallel to `region.matrix`.
  pub heights: SpatialMatrix<f32>,

  /// Terrain mesh in matrix-local coordinates; translate by
  /// [`origin`](Self::origin) to place it.
  pub mesh: MeshOutput,
}

impl Sector {
  pub fn sector_type(&self) -> SectorType {
    self.classification.sector_type
  }

  pub fn start_cell(&self) -> &CellData {
    &self.region.start_cell
  }

  /// World position of the mesh's local origin.
  pub fn origin(&self) -> IVec2 {
    self.region.matrix.root_position()
  }
}

/// Wall-clock cost of each generation phase, in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectorTimings {
  pub flood_fill_us: u64,
  pub classify_us: u64,
  pub mesh_us: u64,
}

impl SectorTimings {
  pub fn total_us(&self) -> u64 {
    self.flood_fill_us + self.classify_us + self.mesh_us
  }
}

// =============================================================================
// SectorWorld<S, T>
// =============================================================================

/// Per-world state, generic over the cell sampler and topology.
///
/// The defaults are the Worley field and its derived topology; tests and
/// hosts with their own cell layout can plug in other implementations with
/// [`with_sources`](Self::with_sources).
pub struct SectorWorld<S: CellSampler = WorleyNoise, T: CellTopology = TopologyUtil> {
  pub id: WorldId,
  config: WorldConfig,
  sampler: S,
  topology: T,
  registry: CellRegistry,
}

impl SectorWorld {
  /// Create a world over the Worley field described by `config`.
  pub fn new(config: WorldConfig) -> Self {
    let noise = WorleyNoise::new(config.noise);
    let topology = TopologyUtil::new(noise, config.topology);
    Self::with_sources(config, noise, topology)
  }
}

impl Default for SectorWorld {
  fn default() -> Self {
    Self::new(WorldConfig::default())
  }
}

impl<S: CellSampler, T: CellTopology> SectorWorld<S, T> {
  /// Create a world from explicit sources. `config.noise` and
  /// `config.topology` are kept for reference only.
  pub fn with_sources(config: WorldConfig, sampler: S, topology: T) -> Self {
    Self {
      id: WorldId::new(),
      config,
      sampler,
      topology,
      registry: CellRegistry::new(),
    }
  }

  pub fn config(&self) -> &WorldConfig {
    &self.config
  }

  pub fn sampler(&self) -> &S {
    &self.sampler
  }

  pub fn topology(&self) -> &T {
    &self.topology
  }

  pub fn registry(&self) -> &CellRegistry {
    &self.registry
  }

  /// Sector owning the cell under `position`, if any.
  pub fn owner_at(&self, position: IVec2) -> Option<SectorId> {
    let point = self.sampler.point_at(position);
    self.registry.owner(point.current_cell_index)
  }

  /// Release every cell claimed by `sector`, e.g. when the host unloads it.
  pub fn release_sector(&self, sector: SectorId) -> usize {
    self.registry.release(sector)
  }

  pub fn discover_region(&self, seed: IVec2) -> Result<DiscoveredRegion> {
    flood_fill::discover_region(&self.sampler, &self.topology, seed, &self.config.flood_fill)
  }

  /// Classify a region and claim its cells under a fresh [`SectorId`].
  ///
  /// Fails without claiming anything if any sector cell is already owned.
  pub fn classify_region(
    &self,
    region: &DiscoveredRegion,
  ) -> Result<(SectorId, RegionClassification)> {
    let classification =
      sector::classify_region(&region.points, region.start_cell.index, &self.topology)?;
    let id = SectorId::new();
    self
      .registry
      .claim_all(classification.sector_cell_indices(), id)?;
    Ok((id, classification))
  }

  /// Vertex height for every discovered point of `matrix`.
  pub fn region_heights(&self, matrix: &SpatialMatrix<PointData>) -> SpatialMatrix<f32> {
    matrix.map(|point| self.topology.point_height(point))
  }

  pub fn build_mesh(
    &self,
    matrix: &SpatialMatrix<PointData>,
    heights: &SpatialMatrix<f32>,
  ) -> Result<MeshOutput> {
    mesh::build_mesh(matrix, heights, &self.config.mesh)
  }

  /// Run the whole chain for the region containing `seed`.
  pub fn generate_sector(&self, seed: IVec2) -> Result<Sector> {
    self.generate_timed(seed).0
  }

  /// [`generate_sector`](Self::generate_sector), also reporting how long each
  /// phase took.
  #[tracing::instrument(
    skip_all,
    name = "world::generate_sector",
    fields(world = self.id.raw(), seed_x = seed.x, seed_z = seed.y)
  )]
  pub fn generate_timed(&self, seed: IVec2) -> (Result<Sector>, SectorTimings) {
    let mut timings = SectorTimings::default();

    let start = Instant::now();
    let region = self.discover_region(seed);
    timings.flood_fill_us = start.elapsed().as_micros() as u64;
    let region = match region {
      Ok(region) => region,
      Err(err) => return (Err(err), timings),
    };

    let start = Instant::now();
    let classified = self.classify_region(&region);
    timings.classify_us = start.elapsed().as_micros() as u64;
    let (id, classification) = match classified {
      Ok(classified) => classified,
      Err(err) => return (Err(err), timings),
    };

    let start = Instant::now();
    let heights = self.region_heights(&region.matrix);
    let mesh = self.build_mesh(&region.matrix, &heights);
    timings.mesh_us = start.elapsed().as_micros() as u64;

    let mesh = match mesh {
      Ok(mesh) => mesh,
      Err(err) => {
        self.registry.release(id);
        return (Err(err), timings);
      }
    };

    info!(
      sector = %id,
      sector_type = ?classification.sector_type,
      cells = classification.sector_cells.len(),
      quads = mesh.quad_count(),
      "sector generated"
    );

    let sector = Sector {
      id,
      region,
      classification,
      heights,
      mesh,
    };
    (Ok(sector), timings)
  }
}

#[cfg(test)]
#[path = "world_test.rs"]
mod world_test;
