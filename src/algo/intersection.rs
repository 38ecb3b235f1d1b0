//! Mesh–sphere intersection.
//!
//! Extracts the part of a surface lying inside a sphere, as a triangle mesh.
//! Faces entirely inside are copied; faces crossing the sphere boundary are
//! refined by midpoint subdivision until the pieces are small enough, and
//! pieces falling outside are dropped. The boundary of the result therefore
//! approximates the sphere boundary within the refinement tolerance.

use std::f64::consts::PI;

use nalgebra::Point3;

use crate::mesh::{MeshIndex, PolyMesh, VertexId};
use crate::space::Sphere;

/// Closest point to `p` on the triangle `(a, b, c)`.
///
/// Region test on the barycentric coordinates of the projection (Ericson,
/// Real-Time Collision Detection, 5.1.5).
pub fn closest_point_on_triangle(
    p: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> Point3<f64> {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Distance from the sphere surface to the closest point of a triangle;
/// positive when the triangle lies entirely outside.
fn triangle_sphere_gap(sphere: &Sphere, tri: &[Point3<f64>; 3]) -> f64 {
    let closest = closest_point_on_triangle(&sphere.center, &tri[0], &tri[1], &tri[2]);
    sphere.dist(&closest)
}

fn triangle_area(tri: &[Point3<f64>; 3]) -> f64 {
    0.5 * (tri[1] - tri[0]).cross(&(tri[2] - tri[0])).norm()
}

/// A triangle still to classify. Corners taken from the input mesh keep
/// their vertex ids so unrefined faces share vertices in the output.
#[derive(Clone, Copy)]
struct Piece<I: MeshIndex> {
    points: [Point3<f64>; 3],
    source: Option<[VertexId<I>; 3]>,
}

/// Part of `mesh` inside `sphere`, refining boundary faces down to the
/// default tolerance `π r² / 10⁵`.
///
/// See [`mesh_sphere_intersection_with_tolerance`].
pub fn mesh_sphere_intersection<I: MeshIndex>(mesh: &PolyMesh<I>, sphere: &Sphere) -> PolyMesh<I> {
    let tol = PI * sphere.radius * sphere.radius / 1e5;
    mesh_sphere_intersection_with_tolerance(mesh, sphere, tol)
}

/// Part of `mesh` inside `sphere`.
///
/// Polygons are fan-triangulated. A triangle whose closest point is outside
/// the sphere is dropped; one with every vertex inside is kept. A triangle
/// crossing the boundary is split 1→4 at its edge midpoints while its area
/// exceeds `tol`, and kept as is once below.
///
/// The result is a triangle mesh with no optional component enabled; it may
/// have no faces.
pub fn mesh_sphere_intersection_with_tolerance<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    sphere: &Sphere,
    tol: f64,
) -> PolyMesh<I> {
    let mut pending: Vec<Piece<I>> = Vec::new();
    for (_, face) in mesh.faces() {
        let v0 = face.vertex(0);
        for i in 1..face.vertex_number() - 1 {
            let ids = [v0, face.vertex(i), face.vertex(i + 1)];
            pending.push(Piece {
                points: ids.map(|v| *mesh.position(v)),
                source: Some(ids),
            });
        }
    }

    let mut kept: Vec<Piece<I>> = Vec::new();
    while let Some(piece) = pending.pop() {
        if triangle_sphere_gap(sphere, &piece.points) > 0.0 {
            continue;
        }
        let all_in = piece.points.iter().all(|p| sphere.is_inside(p));
        if all_in || triangle_area(&piece.points) <= tol {
            kept.push(piece);
            continue;
        }

        let [p0, p1, p2] = piece.points;
        let m01 = nalgebra::center(&p0, &p1);
        let m12 = nalgebra::center(&p1, &p2);
        let m20 = nalgebra::center(&p2, &p0);
        for points in [[p0, m01, m20], [p1, m12, m01], [m01, m12, m20], [m20, m12, p2]] {
            pending.push(Piece { points, source: None });
        }
    }

    let mut out = PolyMesh::with_capacity(kept.len() * 3, kept.len());
    let mut remap: Vec<Option<VertexId<I>>> = vec![None; mesh.num_vertices()];
    for piece in kept {
        let ids: [VertexId<I>; 3] = match piece.source {
            Some(src) => src.map(|v| *remap[v.index()].get_or_insert_with(|| out.add_vertex(*mesh.position(v)))),
            None => piece.points.map(|p| out.add_vertex(p)),
        };
        // Pieces are non-degenerate triangles of distinct vertices
        if let Err(err) = out.add_face(&ids) {
            log::warn!("dropping intersection piece: {err}");
        }
    }
    out
}
