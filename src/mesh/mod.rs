//! Core mesh data structures.
//!
//! This module provides the indexed polygon mesh representation, its optional
//! per-element components and the [`MeshPos`] cursor used for local
//! traversal.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`], which stores vertices and polygonal faces
//! in flat arrays. Topological relations that not every algorithm needs
//! (vertex-to-face and face-to-face adjacency) and the per-vertex principal
//! curvature are optional columns, enabled on demand and checked with the
//! `require_*` functions.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size. The maximum
//! value of the integer type is reserved as the "no element" sentinel.
//!
//! # Construction
//!
//! ```
//! use facetkit::mesh::{PolyMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod components;
mod index;
mod polymesh;
mod pos;

pub use builder::{build_from_polygons, build_from_triangles, to_face_vertex};
pub use components::{
    require_per_face_adjacent_faces, require_per_vertex_adjacent_faces,
    require_per_vertex_principal_curvature, Component, PrincipalCurvature,
};
pub use index::{FaceId, MeshIndex, VertexId};
pub use polymesh::{Face, PolyMesh, Vertex};
pub use pos::MeshPos;
