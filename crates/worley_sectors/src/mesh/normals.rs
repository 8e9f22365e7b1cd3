//! Vertex normals from final mesh geometry.
//!
//! Each triangle adds its unit face normal to its three vertices, weighted by
//! the interior angle at that vertex (Thürmer & Wüthrich, "Computing Vertex
//! Normals from Polygonal Facets", 1998).

use glam::Vec3A;

use crate::types::MeshOutput;

const EPSILON_SQ: f32 = 1e-12;

/// Overwrite every vertex normal with the angle-weighted mean of its faces.
///
/// Vertices touched only by degenerate triangles fall back to `+Y`.
pub fn recalculate(output: &mut MeshOutput) {
  let mut accum = vec![Vec3A::ZERO; output.vertices.len()];

  for tri in output.indices.chunks_exact(3) {
    let ids = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
    let p = ids.map(|i| Vec3A::from_array(output.vertices[i].position));

    let face = (p[1] - p[0]).cross(p[2] - p[0]);
    let len_sq = face.length_squared();
    if len_sq < EPSILON_SQ {
      continue;
    }
    let unit = face / len_sq.sqrt();

    for corner in 0..3 {
      let here = p[corner];
      let next = p[(corner + 1) % 3];
      let prev = p[(corner + 2) % 3];
      accum[ids[corner]] += unit * corner_angle(next - here, prev - here);
    }
  }

  for (vertex, normal) in output.vertices.iter_mut().zip(accum) {
    vertex.normal = normal.try_normalize().unwrap_or(Vec3A::Y).to_array();
  }
}

/// Angle in radians between two edges leaving the same vertex.
#[inline]
fn corner_angle(a: Vec3A, b: Vec3A) -> f32 {
  let denom_sq = a.length_squared() * b.length_squared();
  if denom_sq < EPSILON_SQ {
    return 0.0;
  }
  (a.dot(b) / denom_sq.sqrt()).clamp(-1.0, 1.0).acos()
}
