//! Mesh processing algorithms.
//!
//! This module contains the algorithms operating on a [`PolyMesh`](crate::mesh::PolyMesh):
//!
//! - **Topology**: vertex-face and face-face adjacency updates
//! - **Normals**: area-, angle- and Nelson-Max-weighted vertex normals
//! - **Statistics**: surface area, barycenters, border length, covariance
//! - **Intersection**: clipping a mesh by a sphere
//! - **Curvature**: Taubin95 and PCA principal curvature estimation
//! - **Creation**: procedural test shapes
//!
//! Long-running algorithms report progress through a [`logger::Logger`].

pub mod create;
pub mod curvature;
pub mod intersection;
pub mod logger;
pub mod normal;
pub mod stat;
pub mod topology;
