//! Error types for facetkit.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::mesh::Component;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
///
/// Numerical degeneracy (zero-area faces, singular covariance matrices,
/// coincident vertices) is never reported through this type: it shows up as
/// NaN or infinite values in the computed attributes instead.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has too few or repeated vertices.
    #[error("face {face} is degenerate (fewer than 3 vertices or repeated vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A per-element component required by an algorithm is not enabled.
    #[error("missing mesh component: {0}")]
    MissingComponent(Component),

    /// A one-ring walk did not close within its step budget.
    #[error("vertex {vertex} is non-manifold: one-ring walk did not close after {steps} steps")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
        /// Number of steps performed before giving up.
        steps: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
