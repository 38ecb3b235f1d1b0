//! Optional per-element components and capability checks.
//!
//! Some data is not stored by every mesh: vertex-to-face and face-to-face
//! adjacency, and the per-vertex principal curvature. These live in optional
//! columns of [`PolyMesh`] that must be enabled explicitly. Algorithms that
//! need a component check for it once, up front, with the `require_*`
//! functions in this module.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Vector3;

use super::index::MeshIndex;
use super::polymesh::PolyMesh;
use crate::error::{MeshError, Result};

/// Identifies an optional mesh component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Incident faces stored on each vertex.
    PerVertexAdjacentFaces,
    /// Adjacent face across each edge of each face.
    PerFaceAdjacentFaces,
    /// Principal curvature stored on each vertex.
    PerVertexPrincipalCurvature,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::PerVertexAdjacentFaces => "per-vertex adjacent faces",
            Component::PerFaceAdjacentFaces => "per-face adjacent faces",
            Component::PerVertexPrincipalCurvature => "per-vertex principal curvature",
        };
        f.write_str(name)
    }
}

/// Principal curvature values and directions at a vertex.
///
/// Estimators write all four fields together. Directions are unit vectors
/// lying in (or rotated into) the tangent plane of the vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalCurvature {
    /// Direction of maximum curvature.
    pub max_dir: Vector3<f64>,
    /// Direction of minimum curvature.
    pub min_dir: Vector3<f64>,
    /// Maximum curvature value.
    pub max_value: f64,
    /// Minimum curvature value.
    pub min_value: f64,
}

impl Default for PrincipalCurvature {
    fn default() -> Self {
        Self {
            max_dir: Vector3::zeros(),
            min_dir: Vector3::zeros(),
            max_value: 0.0,
            min_value: 0.0,
        }
    }
}

impl PrincipalCurvature {
    /// Mean curvature `(k1 + k2) / 2`.
    #[inline]
    pub fn mean(&self) -> f64 {
        0.5 * (self.max_value + self.min_value)
    }

    /// Gaussian curvature `k1 * k2`.
    #[inline]
    pub fn gaussian(&self) -> f64 {
        self.max_value * self.min_value
    }

    /// Shape index `(2/π) * atan((k1+k2)/(k1-k2))`, in `[-1, 1]`.
    ///
    /// Returns 0 at umbilical points.
    pub fn shape_index(&self) -> f64 {
        let diff = self.max_value - self.min_value;
        if diff.abs() < 1e-10 {
            0.0
        } else {
            (2.0 / PI) * ((self.max_value + self.min_value) / diff).atan()
        }
    }

    /// Curvedness `sqrt((k1² + k2²) / 2)`.
    pub fn curvedness(&self) -> f64 {
        ((self.max_value * self.max_value + self.min_value * self.min_value) / 2.0).sqrt()
    }

    /// Whether any value or direction component is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        !(self.max_value.is_finite()
            && self.min_value.is_finite()
            && self.max_dir.iter().all(|c| c.is_finite())
            && self.min_dir.iter().all(|c| c.is_finite()))
    }
}

fn require<I: MeshIndex>(mesh: &PolyMesh<I>, component: Component) -> Result<()> {
    if mesh.is_component_enabled(component) {
        Ok(())
    } else {
        Err(MeshError::MissingComponent(component))
    }
}

/// Fails with [`MeshError::MissingComponent`] unless the per-vertex principal
/// curvature column is enabled.
pub fn require_per_vertex_principal_curvature<I: MeshIndex>(mesh: &PolyMesh<I>) -> Result<()> {
    require(mesh, Component::PerVertexPrincipalCurvature)
}

/// Fails with [`MeshError::MissingComponent`] unless per-vertex adjacent faces
/// are enabled.
pub fn require_per_vertex_adjacent_faces<I: MeshIndex>(mesh: &PolyMesh<I>) -> Result<()> {
    require(mesh, Component::PerVertexAdjacentFaces)
}

/// Fails with [`MeshError::MissingComponent`] unless per-face adjacent faces
/// are enabled.
pub fn require_per_face_adjacent_faces<I: MeshIndex>(mesh: &PolyMesh<I>) -> Result<()> {
    require(mesh, Component::PerFaceAdjacentFaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use nalgebra::Point3;

    fn triangle() -> PolyMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_require_fails_when_disabled() {
        let mesh = triangle();
        let err = require_per_vertex_principal_curvature(&mesh).unwrap_err();
        assert!(matches!(
            err,
            MeshError::MissingComponent(Component::PerVertexPrincipalCurvature)
        ));
        assert!(require_per_vertex_adjacent_faces(&mesh).is_err());
        assert!(require_per_face_adjacent_faces(&mesh).is_err());
    }

    #[test]
    fn test_require_succeeds_when_enabled() {
        let mut mesh = triangle();
        mesh.enable_per_vertex_principal_curvature();
        mesh.enable_per_vertex_adjacent_faces();
        mesh.enable_per_face_adjacent_faces();
        assert!(require_per_vertex_principal_curvature(&mesh).is_ok());
        assert!(require_per_vertex_adjacent_faces(&mesh).is_ok());
        assert!(require_per_face_adjacent_faces(&mesh).is_ok());
    }

    #[test]
    fn test_derived_measures() {
        let pc = PrincipalCurvature {
            max_value: 2.0,
            min_value: 0.5,
            ..Default::default()
        };
        assert!((pc.mean() - 1.25).abs() < 1e-12);
        assert!((pc.gaussian() - 1.0).abs() < 1e-12);
        assert!(pc.shape_index() > 0.0 && pc.shape_index() <= 1.0);
        assert!(pc.curvedness() > 0.0);
        assert!(!pc.is_degenerate());

        let umbilic = PrincipalCurvature {
            max_value: 1.0,
            min_value: 1.0,
            ..Default::default()
        };
        assert_eq!(umbilic.shape_index(), 0.0);

        let nan = PrincipalCurvature {
            max_value: f64::NAN,
            ..Default::default()
        };
        assert!(nan.is_degenerate());
    }
}
