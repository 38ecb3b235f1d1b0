//! Procedural shapes.
//!
//! Closed shapes are wound so face normals point outward; the disk faces
//! `+z`. All shapes are triangle meshes with no optional component enabled.

use std::collections::HashMap;
use std::f64::consts::PI;

use nalgebra::Point3;

use crate::mesh::{Face, MeshIndex, PolyMesh, Vertex, VertexId};

/// Assemble a mesh from generated, already valid triangles.
fn from_triangles<I: MeshIndex>(positions: Vec<Point3<f64>>, triangles: &[[usize; 3]]) -> PolyMesh<I> {
    let mut mesh = PolyMesh::with_capacity(positions.len(), triangles.len());
    mesh.vertices = positions.into_iter().map(Vertex::new).collect();
    mesh.faces = triangles
        .iter()
        .map(|t| Face::new(t.iter().map(|&v| VertexId::new(v)).collect()))
        .collect();
    mesh
}

fn icosahedron_data(radius: f64) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let t = (1.0 + 5.0f64.sqrt()) / 2.0;
    let positions = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|&[x, y, z]| Point3::from(Point3::new(x, y, z).coords.normalize() * radius))
    .collect();

    let triangles = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    (positions, triangles)
}

/// A regular icosahedron inscribed in a sphere of the given radius.
pub fn create_icosahedron<I: MeshIndex>(radius: f64) -> PolyMesh<I> {
    let (positions, triangles) = icosahedron_data(radius);
    from_triangles(positions, &triangles)
}

/// An icosahedral sphere: an icosahedron whose faces are split 1→4
/// `subdivisions` times, new vertices being projected onto the sphere.
///
/// Midpoints are shared between neighboring faces, so the result is closed
/// and manifold, with `10·4ⁿ + 2` vertices and `20·4ⁿ` faces.
///
/// # Example
///
/// ```
/// use facetkit::algo::create::create_icosphere;
/// use facetkit::mesh::PolyMesh;
///
/// let mesh: PolyMesh = create_icosphere(1.0, 2);
/// assert_eq!(mesh.num_vertices(), 162);
/// assert_eq!(mesh.num_faces(), 320);
/// ```
pub fn create_icosphere<I: MeshIndex>(radius: f64, subdivisions: usize) -> PolyMesh<I> {
    let (mut positions, mut triangles) = icosahedron_data(radius);

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut midpoint = |a: usize, b: usize, positions: &mut Vec<Point3<f64>>| -> usize {
            *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
                let m = nalgebra::center(&positions[a], &positions[b]);
                positions.push(Point3::from(m.coords.normalize() * radius));
                positions.len() - 1
            })
        };

        let mut refined = Vec::with_capacity(triangles.len() * 4);
        for &[a, b, c] in &triangles {
            let ab = midpoint(a, b, &mut positions);
            let bc = midpoint(b, c, &mut positions);
            let ca = midpoint(c, a, &mut positions);
            refined.push([a, ab, ca]);
            refined.push([b, bc, ab]);
            refined.push([c, ca, bc]);
            refined.push([ab, bc, ca]);
        }
        triangles = refined;
    }

    from_triangles(positions, &triangles)
}

/// A latitude-longitude sphere centered at the origin, with poles on the z
/// axis.
///
/// `stacks` is the number of latitude bands (at least 2) and `segments` the
/// number of longitude bands (at least 3). Pole caps are triangle fans; the
/// other bands are split into two triangles per quad.
pub fn create_uv_sphere<I: MeshIndex>(radius: f64, stacks: usize, segments: usize) -> PolyMesh<I> {
    let stacks = stacks.max(2);
    let segments = segments.max(3);

    let mut positions = Vec::with_capacity((stacks - 1) * segments + 2);
    positions.push(Point3::new(0.0, 0.0, radius));
    for i in 1..stacks {
        let theta = PI * i as f64 / stacks as f64;
        for j in 0..segments {
            let phi = 2.0 * PI * j as f64 / segments as f64;
            positions.push(Point3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            ));
        }
    }
    positions.push(Point3::new(0.0, 0.0, -radius));
    let south = positions.len() - 1;

    // Vertex j of latitude ring i, 1 ≤ i < stacks
    let ring = |i: usize, j: usize| 1 + (i - 1) * segments + j % segments;

    let mut triangles = Vec::with_capacity(2 * stacks * segments);
    for j in 0..segments {
        triangles.push([0, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..segments {
            let (a, b, c, d) = (ring(i, j), ring(i + 1, j), ring(i + 1, j + 1), ring(i, j + 1));
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }
    for j in 0..segments {
        triangles.push([south, ring(stacks - 1, j + 1), ring(stacks - 1, j)]);
    }

    from_triangles(positions, &triangles)
}

/// A flat disk in the `z = 0` plane, centered at the origin.
///
/// The disk has a center vertex and `rings` concentric rings (at least 1) of
/// `segments` vertices each (at least 3), evenly spaced up to `radius`.
pub fn create_disk<I: MeshIndex>(radius: f64, rings: usize, segments: usize) -> PolyMesh<I> {
    let rings = rings.max(1);
    let segments = segments.max(3);

    let mut positions = Vec::with_capacity(rings * segments + 1);
    positions.push(Point3::origin());
    for i in 1..=rings {
        let r = radius * i as f64 / rings as f64;
        for j in 0..segments {
            let phi = 2.0 * PI * j as f64 / segments as f64;
            positions.push(Point3::new(r * phi.cos(), r * phi.sin(), 0.0));
        }
    }

    let ring = |i: usize, j: usize| 1 + (i - 1) * segments + j % segments;

    let mut triangles = Vec::with_capacity((2 * rings - 1) * segments);
    for j in 0..segments {
        triangles.push([0, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..rings {
        for j in 0..segments {
            let (a, b, c, d) = (ring(i, j), ring(i + 1, j), ring(i + 1, j + 1), ring(i, j + 1));
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }

    from_triangles(positions, &triangles)
}
