use glam::IVec2;

use super::*;
use crate::types::CellIndex;

/// `width × width` matrix with every grid point set except `holes`.
fn filled(width: usize, holes: &[IVec2]) -> (SpatialMatrix<PointData>, SpatialMatrix<f32>) {
  let root = IVec2::new(-3, 7);
  let mut points = SpatialMatrix::new(width, root);
  for x in 0..width as i32 {
    for z in 0..width as i32 {
      let grid = IVec2::new(x, z);
      if holes.contains(&grid) {
        continue;
      }
      let world = root + grid;
      points.add_item(
        PointData {
          position: world,
          current_cell_index: CellIndex::from_lattice(IVec2::ZERO),
          adjacent_cell_index: CellIndex::from_lattice(IVec2::ZERO),
          is_set: true,
          ..Default::default()
        },
        world,
      );
    }
  }
  let heights = points.map(|_| 2.5);
  (points, heights)
}

#[test]
fn test_full_grid_emits_every_quad() {
  let (points, heights) = filled(4, &[]);
  let mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();

  assert_eq!(mesh.quad_count(), 9);
  assert_eq!(mesh.vertices.len(), 36);
  assert_eq!(mesh.indices.len(), 54);
  assert_eq!(mesh.triangle_count(), 18);
}

#[test]
fn test_hole_removes_touching_quads() {
  let hole = IVec2::new(2, 2);
  let (points, heights) = filled(5, &[hole]);
  let mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();

  // 16 quads in a 5x5 grid, 4 of them share the (2, 2) corner
  assert_eq!(mesh.quad_count(), 12);
  assert_eq!(mesh.vertices.len(), 4 * mesh.quad_count());
  for position in mesh.positions() {
    assert!(
      !(position[0] == 2.0 && position[2] == 2.0),
      "Vertex emitted at the hole"
    );
  }
}

#[test]
fn test_quad_layout_and_indices() {
  let (points, heights) = filled(2, &[]);
  let mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();

  assert_eq!(
    mesh.positions(),
    vec![
      [0.0, 2.5, 0.0],
      [0.0, 2.5, 1.0],
      [1.0, 2.5, 1.0],
      [1.0, 2.5, 0.0],
    ]
  );
  assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
}

#[test]
fn test_indices_advance_per_quad() {
  let (points, heights) = filled(3, &[]);
  let mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();

  for (quad, chunk) in mesh.indices.chunks_exact(6).enumerate() {
    let o = quad as u32 * 4;
    assert_eq!(chunk, &[o, o + 1, o + 2, o, o + 2, o + 3]);
  }
  assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
}

#[test]
fn test_flat_mesh_faces_up() {
  let (points, heights) = filled(4, &[IVec2::new(0, 3)]);
  let mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();

  for normal in mesh.normals() {
    assert!((normal[1] - 1.0).abs() < 1e-5, "Normal {:?} is not +Y", normal);
  }
}

#[test]
fn test_sloped_normals_lean_downhill() {
  let (points, _) = filled(3, &[]);
  // Height rises with x
  let mut heights = SpatialMatrix::new(3, points.root_position());
  for (world, _) in points.iter_set() {
    let grid = points.world_to_grid(world);
    heights.add_item(grid.x as f32, world);
  }
  let mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();

  for normal in mesh.normals() {
    let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
    assert!((len - 1.0).abs() < 1e-5);
    assert!(normal[0] < 0.0 && normal[1] > 0.0, "Normal {:?} should face -X and up", normal);
  }
}

#[test]
fn test_color_and_bounds() {
  let (points, heights) = filled(3, &[]);
  let color = [0.1, 0.2, 0.3, 1.0];
  let mesh = build_mesh(&points, &heights, &MeshConfig::new().with_color(color)).unwrap();

  assert!(mesh.colors().iter().all(|&c| c == color));
  assert_eq!(mesh.bounds.min, [0.0, 2.5, 0.0]);
  assert_eq!(mesh.bounds.max, [2.0, 2.5, 2.0]);

  let default_mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();
  assert!(default_mesh.colors().iter().all(|&c| c == [0.6; 4]));
}

#[test]
fn test_sparse_matrix_yields_empty_mesh() {
  let (points, heights) = filled(3, &[IVec2::new(1, 1)]);
  let mesh = build_mesh(&points, &heights, &MeshConfig::default()).unwrap();
  assert!(mesh.is_empty(), "Every quad touches the centre");
  assert!(!mesh.bounds.is_valid());
}

#[test]
fn test_height_buffer_width_must_match() {
  let (points, _) = filled(4, &[]);
  let heights = SpatialMatrix::<f32>::new(3, points.root_position());

  let err = build_mesh(&points, &heights, &MeshConfig::default()).unwrap_err();
  assert_eq!(
    err,
    SectorError::HeightBufferMismatch {
      expected_width: 4,
      expected_root: IVec2::new(-3, 7),
      actual_width: 3,
      actual_root: IVec2::new(-3, 7),
    }
  );
}

#[test]
fn test_height_buffer_root_must_match() {
  let (points, _) = filled(4, &[]);
  let heights = SpatialMatrix::<f32>::new(4, IVec2::new(-3, 8));

  let err = build_mesh(&points, &heights, &MeshConfig::default()).unwrap_err();
  assert_eq!(
    err,
    SectorError::HeightBufferMismatch {
      expected_width: 4,
      expected_root: IVec2::new(-3, 7),
      actual_width: 4,
      actual_root: IVec2::new(-3, 8),
    }
  );
}
