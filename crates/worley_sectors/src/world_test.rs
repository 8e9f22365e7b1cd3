use glam::IVec2;

use super::*;
use crate::error::SectorError;
use crate::test_utils::BlockField;

/// Three separate 2x2-block plateaus of grouping 0.5 on a grouping-0 plain
/// of height group 2:
/// - blocks (0..=1, 0..=1): height group 2, walkable into the plain
/// - blocks (5..=6, 0..=1): height group 1, one step below the plain
/// - blocks (10..=11, 0..=1): height group 0, a pit with cliff walls
fn plateau_world() -> SectorWorld<BlockField, BlockField> {
  let field = || {
    let mut field = BlockField::new(4)
      .with_group(IVec2::new(0, 0), IVec2::new(1, 1), 0.5)
      .with_group(IVec2::new(5, 0), IVec2::new(6, 1), 0.5)
      .with_group(IVec2::new(10, 0), IVec2::new(11, 1), 0.5);
    for x in 5..=6 {
      for z in 0..=1 {
        field = field.with_height_group(IVec2::new(x, z), 1);
      }
    }
    for x in 10..=11 {
      for z in 0..=1 {
        field = field.with_height_group(IVec2::new(x, z), 0);
      }
    }
    field
  };
  SectorWorld::with_sources(WorldConfig::default(), field(), field())
}

fn noise_world() -> SectorWorld {
  SectorWorld::new(
    WorldConfig::new().with_noise(NoiseConfig::new(42).with_frequency(0.01)),
  )
}

#[test]
fn test_world_ids_are_unique() {
  let a = WorldId::new();
  let b = WorldId::new();
  assert_ne!(a, b);
  assert_ne!(noise_world().id, noise_world().id);
}

#[test]
fn test_plateau_types() {
  let world = plateau_world();

  let walkable = world.generate_sector(IVec2::new(3, 3)).unwrap();
  let lake = world.generate_sector(IVec2::new(22, 3)).unwrap();
  let pit = world.generate_sector(IVec2::new(42, 3)).unwrap();

  assert_eq!(walkable.sector_type(), SectorType::None);
  assert_eq!(lake.sector_type(), SectorType::Lake);
  assert_eq!(pit.sector_type(), SectorType::Mountain);

  for sector in [&walkable, &lake, &pit] {
    assert_eq!(sector.classification.sector_cells.len(), 4);
    assert_eq!(sector.region.grouping, 0.5);
  }
}

#[test]
fn test_generated_sector_is_consistent() {
  let world = plateau_world();
  let sector = world.generate_sector(IVec2::new(1, 6)).unwrap();

  // 8x8 plateau, 4 * 8 ring points and two reachable corners
  assert_eq!(sector.region.points.len(), 64 + 32 + 2);
  assert_eq!(sector.start_cell().index, BlockField::index_of_block(IVec2::new(0, 1)));
  assert_eq!(sector.origin(), sector.region.matrix.root_position());
  assert_eq!(sector.heights.set_flags(), sector.region.matrix.set_flags());
  assert!(sector.mesh.quad_count() >= 49, "At least the 7x7 plateau interior");
  assert_eq!(sector.mesh.vertices.len(), 4 * sector.mesh.quad_count());
}

#[test]
fn test_cells_are_claimed_by_generated_sector() {
  let world = plateau_world();
  let sector = world.generate_sector(IVec2::new(2, 2)).unwrap();

  for cell in sector.classification.sector_cell_indices() {
    assert_eq!(world.registry().owner(cell), Some(sector.id));
  }
  assert_eq!(world.owner_at(IVec2::new(7, 7)), Some(sector.id));
  assert_eq!(world.owner_at(IVec2::new(9, 9)), None, "Plain cells stay unclaimed");
}

#[test]
fn test_regenerating_claimed_region_conflicts() {
  let world = plateau_world();
  let first = world.generate_sector(IVec2::new(2, 2)).unwrap();

  let err = world.generate_sector(IVec2::new(6, 6)).unwrap_err();
  assert!(
    matches!(err, SectorError::OwnershipConflict { owner, .. } if owner == first.id),
    "Unexpected error {:?}",
    err
  );

  assert_eq!(world.release_sector(first.id), 4);
  let again = world.generate_sector(IVec2::new(6, 6)).unwrap();
  assert_ne!(again.id, first.id);
}

#[test]
fn test_step_by_step_matches_generate() {
  let world = plateau_world();
  let seed = IVec2::new(25, 5);

  let region = world.discover_region(seed).unwrap();
  let (id, classification) = world.classify_region(&region).unwrap();
  let heights = world.region_heights(&region.matrix);
  let mesh = world.build_mesh(&region.matrix, &heights).unwrap();
  world.release_sector(id);

  let sector = world.generate_sector(seed).unwrap();
  assert_eq!(sector.region.points, region.points);
  assert_eq!(sector.classification, classification);
  assert_eq!(sector.mesh.positions(), mesh.positions());
  assert_eq!(sector.mesh.indices, mesh.indices);
}

#[test]
fn test_region_heights_follow_topology() {
  let world = plateau_world();
  let region = world.discover_region(IVec2::new(3, 3)).unwrap();
  let heights = world.region_heights(&region.matrix);

  for point in &region.points {
    assert_eq!(
      heights.get_item(point.position),
      world.topology().point_height(point)
    );
  }
  // Deep inside the plateau the height is the cell height
  assert_eq!(heights.get_item(IVec2::new(3, 3)), 2.0);
}

#[test]
fn test_noise_world_generates_and_records_timings() {
  let world = noise_world();
  let (result, timings) = world.generate_timed(IVec2::new(-40, 15));
  let sector = result.unwrap();

  assert!(!sector.classification.sector_cells.is_empty());
  assert_eq!(sector.classification.master_cell, sector.classification.sector_cells[0]);
  if !sector.classification.pathable {
    assert_eq!(sector.sector_type(), SectorType::Mountain);
  }
  assert!(!sector.mesh.is_empty());
  assert_eq!(
    timings.total_us(),
    timings.flood_fill_us + timings.classify_us + timings.mesh_us
  );
}

#[test]
fn test_noise_worlds_are_deterministic() {
  let a = noise_world().generate_sector(IVec2::new(100, 100)).unwrap();
  let b = noise_world().generate_sector(IVec2::new(100, 100)).unwrap();

  assert_eq!(a.region.points, b.region.points);
  assert_eq!(a.classification, b.classification);
  assert_eq!(a.mesh.positions(), b.mesh.positions());
}

#[test]
fn test_oversized_region_fails_without_claiming() {
  let world: SectorWorld = SectorWorld::new(
    WorldConfig::new()
      .with_noise(NoiseConfig::new(42).with_frequency(0.01))
      .with_topology(TopologyConfig::default().with_grouping_levels(1))
      .with_flood_fill(FloodFillConfig::new().with_max_points(1_000)),
  );

  let (result, timings) = world.generate_timed(IVec2::new(7, 7));
  assert!(matches!(
    result,
    Err(SectorError::RegionTooLarge { limit: 1_000, .. })
  ));
  assert_eq!(timings.classify_us, 0);
  assert!(world.registry().is_empty());
}
