//! # facetkit
//!
//! Indexed polygon meshes with one-ring traversal and per-vertex principal
//! curvature estimation.
//!
//! facetkit stores a mesh as flat vertex and face arrays, with adjacency and
//! curvature kept in optional columns that algorithms request explicitly.
//! A [`MeshPos`](mesh::MeshPos) cursor walks the star of a vertex through
//! face adjacency, and two estimators fill the principal curvature column:
//! Taubin's tensor of curvature and a PCA estimator over ball
//! neighborhoods.
//!
//! ## Quick Start
//!
//! ```
//! use facetkit::prelude::*;
//! use facetkit::algo::create::create_icosphere;
//! use facetkit::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
//!
//! let mut mesh: PolyMesh = create_icosphere(1.0, 2);
//! update_per_vertex_adjacent_faces(&mut mesh);
//! update_per_face_adjacent_faces(&mut mesh);
//! mesh.enable_per_vertex_principal_curvature();
//!
//! update_principal_curvature(&mut mesh, &CurvatureOptions::default(), &NullLogger).unwrap();
//!
//! for (v, k) in mesh.vertex_ids().zip(mesh.principal_curvatures().unwrap()) {
//!     println!("{:?}: k1={:.3} k2={:.3}", v, k.max_value, k.min_value);
//! }
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use facetkit::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! // A square pyramid: one quad and four triangles
//! let faces = vec![
//!     vec![0, 3, 2, 1],
//!     vec![0, 1, 4],
//!     vec![1, 2, 4],
//!     vec![2, 3, 4],
//!     vec![3, 0, 4],
//! ];
//!
//! let mesh: PolyMesh = build_from_polygons(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 5);
//! assert_eq!(mesh.num_faces(), 5);
//! assert!(!mesh.is_triangle_mesh());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod math;
pub mod mesh;
pub mod space;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use facetkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::curvature::{
        update_principal_curvature, CurvatureAlgorithm, CurvatureOptions,
    };
    pub use crate::algo::logger::{LogLogger, Logger, NullLogger, ProgressLogger};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, to_face_vertex, Component, Face, FaceId,
        MeshIndex, MeshPos, PolyMesh, PrincipalCurvature, Vertex, VertexId,
    };
}

pub use error::{MeshError, Result};

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
        update_per_vertex_adjacent_faces(&mut mesh);
        update_per_face_adjacent_faces(&mut mesh);

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);

        // Closed: every edge has a face on the other side, every vertex has valence 3
        for f in mesh.face_ids() {
            for e in 0..3 {
                assert!(mesh.face_adj_face(f, e).is_some());
            }
        }
        for v in mesh.vertex_ids() {
            let pos = MeshPos::around_vertex(&mesh, v).unwrap();
            assert_eq!(pos.number_of_adjacent_faces_to_v(), 3, "vertex {:?}", v);
        }
    }
}
