//! Global geometric statistics of a mesh.

use nalgebra::{Matrix3, Point3, Vector3};

use crate::error::Result;
use crate::math::outer_product;
use crate::mesh::{require_per_face_adjacent_faces, FaceId, MeshIndex, PolyMesh};
use crate::space::BoundingBox;

/// Total area of all faces.
pub fn surface_area<I: MeshIndex>(mesh: &PolyMesh<I>) -> f64 {
    mesh.face_ids().map(|f| mesh.face_area(f)).sum()
}

/// Bounding box of all vertices.
pub fn bounding_box<I: MeshIndex>(mesh: &PolyMesh<I>) -> BoundingBox {
    BoundingBox::from_points(mesh.vertices().map(|(_, v)| &v.position))
}

/// Mean of the vertex positions. NaN for a mesh without vertices.
pub fn barycenter<I: MeshIndex>(mesh: &PolyMesh<I>) -> Point3<f64> {
    let sum = mesh
        .vertices()
        .fold(Vector3::zeros(), |acc, (_, v)| acc + v.position.coords);
    Point3::from(sum / mesh.num_vertices() as f64)
}

/// Area-weighted mean of the face centroids.
///
/// Unlike [`barycenter`], it does not depend on how densely the surface is
/// sampled by vertices.
pub fn shell_barycenter<I: MeshIndex>(mesh: &PolyMesh<I>) -> Point3<f64> {
    let mut sum = Vector3::zeros();
    let mut area = 0.0;
    for f in mesh.face_ids() {
        let a = mesh.face_area(f);
        sum += mesh.face_centroid(f).coords * a;
        area += a;
    }
    Point3::from(sum / area)
}

/// Total length of the border edges. Requires per-face adjacent faces.
pub fn border_length<I: MeshIndex>(mesh: &PolyMesh<I>) -> Result<f64> {
    require_per_face_adjacent_faces(mesh)?;

    let mut length = 0.0;
    for (f, face) in mesh.faces() {
        let n = face.vertex_number();
        for e in 0..n {
            if mesh.face_adj_face(f, e).is_none() {
                length += (mesh.position(face.vertex((e + 1) % n)) - mesh.position(face.vertex(e))).norm();
            }
        }
    }
    Ok(length)
}

/// Scatter matrix `Σ (p - b)(p - b)ᵀ` of `points` about their mean `b`.
///
/// Not divided by the number of points. Zero for an empty slice.
pub fn covariance_matrix_of_point_cloud(points: &[Point3<f64>]) -> Matrix3<f64> {
    if points.is_empty() {
        return Matrix3::zeros();
    }
    let bar = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / points.len() as f64;
    points.iter().fold(Matrix3::zeros(), |acc, p| {
        let e = p.coords - bar;
        acc + outer_product(&e, &e)
    })
}

/// Surface integral of `(x - b)(x - b)ᵀ` over the mesh, with `b` the
/// [`shell_barycenter`].
///
/// Integrated exactly per triangle; polygons are fan-triangulated.
pub fn covariance_matrix_of_mesh<I: MeshIndex>(mesh: &PolyMesh<I>) -> Matrix3<f64> {
    let bar = shell_barycenter(mesh);

    // Integrals of x xᵀ and x over the unit right triangle, x = (u, v, 0)
    let c0 = Matrix3::new(
        2.0, 1.0, 0.0, //
        1.0, 2.0, 0.0, //
        0.0, 0.0, 0.0,
    ) / 24.0;
    let x = Vector3::new(1.0 / 6.0, 1.0 / 6.0, 0.0);

    let mut c = Matrix3::zeros();
    for f in mesh.face_ids() {
        for [p0, p1, p2] in fan_triangles(mesh, f) {
            let mut n = (p1 - p0).cross(&(p2 - p0));
            let da = n.norm();
            n /= da * da;

            // Maps the unit triangle onto (p0, p1, p2), relative to p0
            let a = Matrix3::from_columns(&[p1 - p0, p2 - p0, n]);
            let delta = p0 - bar;

            let ax = a * x;
            let cross = ax * delta.transpose();
            let dc = a * c0 * a.transpose() + cross + cross.transpose() + delta * delta.transpose() * 0.5;
            // The determinant of A is the double area
            c += dc * da;
        }
    }
    c
}

/// Triangles of the fan around the first vertex of a face.
fn fan_triangles<I: MeshIndex>(mesh: &PolyMesh<I>, f: FaceId<I>) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
    let face = mesh.face(f);
    let p0 = *mesh.position(face.vertex(0));
    (1..face.vertex_number() - 1).map(move |i| {
        [
            p0,
            *mesh.position(face.vertex(i)),
            *mesh.position(face.vertex(i + 1)),
        ]
    })
}
