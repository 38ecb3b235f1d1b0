//! Per-vertex normal computation.
//!
//! Vertex normals are accumulated from the normals of incident faces with one
//! of several weightings, then optionally normalized. Face normals are not
//! stored; they come from [`PolyMesh::face_normal`].

use nalgebra::Vector3;

use crate::mesh::{MeshIndex, PolyMesh};

/// How face normals are weighted when accumulated on vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalWeighting {
    /// Weight by face area.
    Area,
    /// Weight by the face angle at the vertex.
    #[default]
    Angle,
    /// Weight by `1 / (|e1|² |e2|²)`, where `e1` and `e2` are the face edges
    /// leaving the vertex (Nelson Max, 1999).
    NelsonMax,
}

/// Set every vertex normal to zero.
pub fn clear_per_vertex_normals<I: MeshIndex>(mesh: &mut PolyMesh<I>) {
    for v in &mut mesh.vertices {
        v.normal = Vector3::zeros();
    }
}

/// Recompute vertex normals as weighted sums of incident face normals.
///
/// The result is not normalized; call [`normalize_per_vertex_normals`]
/// afterwards for unit normals. Vertices referenced by no face get a zero
/// normal.
pub fn update_per_vertex_normals<I: MeshIndex>(mesh: &mut PolyMesh<I>, weighting: NormalWeighting) {
    let mut normals = vec![Vector3::<f64>::zeros(); mesh.num_vertices()];

    for (f, face) in mesh.faces() {
        // Length of the area vector is twice the face area
        let area_normal = mesh.face_area_vector(f);
        let normal = area_normal.normalize();
        for i in 0..face.vertex_number() as isize {
            let p = mesh.position(face.vertex_mod(i));
            let e1 = mesh.position(face.vertex_mod(i - 1)) - p;
            let e2 = mesh.position(face.vertex_mod(i + 1)) - p;
            let contribution = match weighting {
                NormalWeighting::Area => area_normal,
                NormalWeighting::Angle => normal * e1.normalize().angle(&e2.normalize()),
                NormalWeighting::NelsonMax => normal / (e1.norm_squared() * e2.norm_squared()),
            };
            normals[face.vertex_mod(i).index()] += contribution;
        }
    }

    for (v, n) in mesh.vertices.iter_mut().zip(normals) {
        v.normal = n;
    }
}

/// Scale every non-zero vertex normal to unit length.
///
/// Zero normals are left untouched.
pub fn normalize_per_vertex_normals<I: MeshIndex>(mesh: &mut PolyMesh<I>) {
    for v in &mut mesh.vertices {
        let len = v.normal.norm();
        if len > 0.0 {
            v.normal /= len;
        }
    }
}

/// Recompute unit vertex normals with the given weighting.
pub fn update_and_normalize_per_vertex_normals<I: MeshIndex>(
    mesh: &mut PolyMesh<I>,
    weighting: NormalWeighting,
) {
    update_per_vertex_normals(mesh, weighting);
    normalize_per_vertex_normals(mesh);
}
