//! Per-vertex principal curvature estimation.
//!
//! Two estimators write the per-vertex principal curvature column of a
//! [`PolyMesh`]:
//!
//! - **Taubin95**: builds a tangent-plane tensor from the directional
//!   curvatures along the one-ring edges, weighted by the areas of the
//!   incident faces, and diagonalizes it with a Householder reflection
//!   followed by a Givens rotation.
//! - **PCA**: eigen-decomposes the covariance of the surface inside a ball
//!   around each vertex and maps the tangential eigenvalues to curvatures
//!   with a closed-form relation.
//!
//! Both recompute angle-weighted unit vertex normals first.
//!
//! Taubin95 stores its two values as computed and does not order them, so
//! `max_value < min_value` is possible. PCA always stores
//! `max_value >= min_value`.
//!
//! # Example
//!
//! ```
//! use facetkit::algo::create::create_icosphere;
//! use facetkit::algo::curvature::{update_principal_curvature, CurvatureOptions};
//! use facetkit::algo::logger::NullLogger;
//! use facetkit::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
//! use facetkit::mesh::{PolyMesh, VertexId};
//!
//! let mut mesh: PolyMesh = create_icosphere(1.0, 2);
//! update_per_vertex_adjacent_faces(&mut mesh);
//! update_per_face_adjacent_faces(&mut mesh);
//! mesh.enable_per_vertex_principal_curvature();
//!
//! update_principal_curvature(&mut mesh, &CurvatureOptions::default(), &NullLogger).unwrap();
//!
//! let k = mesh.principal_curvature(VertexId::new(0)).unwrap();
//! assert!((k.mean() - 1.0).abs() < 0.15);
//! ```
//!
//! # References
//!
//! - Taubin, G. (1995). "Estimating the Tensor of Curvature of a Surface
//!   from a Polyhedral Approximation." ICCV.
//! - Yang, P., Qian, X. (2007). "Direct Computing of Surface Curvatures for
//!   Point-Set Surfaces." Eurographics Symposium on Point-Based Graphics.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Matrix2, Matrix3, Vector3};
use rayon::prelude::*;

use crate::algo::intersection::mesh_sphere_intersection;
use crate::algo::logger::Logger;
use crate::algo::normal::{update_and_normalize_per_vertex_normals, NormalWeighting};
use crate::algo::stat::{
    bounding_box, covariance_matrix_of_mesh, covariance_matrix_of_point_cloud, surface_area,
};
use crate::error::{MeshError, Result};
use crate::math::{
    find_best_givens_rotation, householder_frame, outer_product, rotation_matrix,
    symmetric_eigen_decompose, tangent_projector,
};
use crate::mesh::{
    require_per_face_adjacent_faces, require_per_vertex_adjacent_faces,
    require_per_vertex_principal_curvature, MeshIndex, MeshPos, PolyMesh, PrincipalCurvature,
    VertexId,
};
use crate::space::{Sphere, StaticGrid3};

/// Fraction of the bounding box diagonal used as PCA radius when none is
/// given.
pub const DEFAULT_RADIUS_FRACTION: f64 = 0.1;

/// Principal curvature estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurvatureAlgorithm {
    /// Taubin's tensor of curvature over the one-ring.
    #[default]
    Taubin95,
    /// Principal component analysis of a ball neighborhood.
    Pca,
}

/// Options for principal curvature estimation.
#[derive(Debug, Clone)]
pub struct CurvatureOptions {
    /// Estimator to run (default: Taubin95).
    pub algorithm: CurvatureAlgorithm,

    /// PCA neighborhood radius. `None` uses
    /// [`DEFAULT_RADIUS_FRACTION`] of the bounding box diagonal.
    pub radius: Option<f64>,

    /// PCA only: estimate the covariance from the vertices inside the ball
    /// instead of integrating the surface clipped by it (default: true).
    pub montecarlo_sampling: bool,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,

    /// Taubin95 only: maximum number of steps of a one-ring walk before the
    /// vertex is reported as non-manifold. `None` walks until the ring
    /// closes.
    pub max_ring_steps: Option<usize>,
}

impl Default for CurvatureOptions {
    fn default() -> Self {
        Self {
            algorithm: CurvatureAlgorithm::Taubin95,
            radius: None,
            montecarlo_sampling: true,
            parallel: true,
            max_ring_steps: None,
        }
    }
}

impl CurvatureOptions {
    /// Set the estimator.
    pub fn with_algorithm(mut self, algorithm: CurvatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the PCA radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Set whether PCA samples vertices instead of clipping the surface.
    pub fn with_montecarlo_sampling(mut self, montecarlo_sampling: bool) -> Self {
        self.montecarlo_sampling = montecarlo_sampling;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Bound the one-ring walks.
    pub fn with_max_ring_steps(mut self, steps: usize) -> Self {
        self.max_ring_steps = Some(steps);
        self
    }

    /// Use sequential execution (for benchmarking).
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// One step of a one-ring walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjVertex<I: MeshIndex = u32> {
    /// The neighbor reached at this step.
    pub vertex: VertexId<I>,
    /// Twice the area of the face the step landed on.
    pub double_area: f64,
    /// Whether the current edge of the walk is a border edge.
    pub on_border: bool,
}

/// The neighbors of a vertex, in walk order.
///
/// Around a border vertex the walk bounces off both border edges, so every
/// incident face is visited twice.
#[derive(Debug, Clone)]
pub struct OneRing<I: MeshIndex = u32> {
    steps: Vec<AdjVertex<I>>,
}

impl<I: MeshIndex> OneRing<I> {
    /// Walk the star of `v` until the first neighbor is reached again.
    ///
    /// Needs both adjacency components. A vertex without incident faces
    /// yields an empty ring. The walk is only guaranteed to close when the
    /// star of `v` is a disk; with `max_steps` set, a walk still open after
    /// that many steps fails with [`MeshError::NonManifoldVertex`].
    pub fn collect(mesh: &PolyMesh<I>, v: VertexId<I>, max_steps: Option<usize>) -> Result<Self> {
        let Some(mut pos) = MeshPos::around_vertex(mesh, v) else {
            return Ok(Self { steps: Vec::new() });
        };
        let first = pos.adj_vertex();

        let mut steps = Vec::new();
        loop {
            if max_steps.is_some_and(|max| steps.len() >= max) {
                return Err(MeshError::NonManifoldVertex {
                    vertex: v.index(),
                    steps: steps.len(),
                });
            }
            pos.next_edge_adjacent_to_v();
            if pos.is_null() {
                return Err(MeshError::NonManifoldVertex {
                    vertex: v.index(),
                    steps: steps.len(),
                });
            }
            let adj = pos.adj_vertex();
            steps.push(AdjVertex {
                vertex: adj,
                double_area: 2.0 * mesh.face_area(pos.face()),
                on_border: pos.is_edge_on_border(),
            });
            if adj == first {
                break;
            }
        }
        Ok(Self { steps })
    }

    /// Steps in walk order.
    pub fn steps(&self) -> &[AdjVertex<I>] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the vertex had no incident face.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Area weight of each step.
    ///
    /// A border step is weighted by its own face area, any other step by
    /// the mean area of its face and the previous step's face, all relative
    /// to the summed areas of the ring. The step before the first one is the
    /// last one.
    pub fn weights(&self) -> Vec<f64> {
        let total: f64 = self.steps.iter().map(|s| s.double_area).sum();
        let len = self.steps.len();
        self.steps
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if s.on_border {
                    s.double_area / total
                } else {
                    let prev = &self.steps[(i + len - 1) % len];
                    0.5 * (s.double_area + prev.double_area) / total
                }
            })
            .collect()
    }
}

/// Estimate principal curvatures with the selected algorithm.
///
/// Fails with [`MeshError::MissingComponent`] if per-vertex principal
/// curvature is not enabled, before any other work. For PCA without an
/// explicit radius, the radius is [`DEFAULT_RADIUS_FRACTION`] of the bounding
/// box diagonal.
pub fn update_principal_curvature<I: MeshIndex>(
    mesh: &mut PolyMesh<I>,
    options: &CurvatureOptions,
    logger: &dyn Logger,
) -> Result<()> {
    require_per_vertex_principal_curvature(mesh)?;

    match options.algorithm {
        CurvatureAlgorithm::Taubin95 => update_principal_curvature_taubin95(mesh, options, logger),
        CurvatureAlgorithm::Pca => {
            let radius = options
                .radius
                .unwrap_or_else(|| DEFAULT_RADIUS_FRACTION * bounding_box(mesh).diagonal());
            update_principal_curvature_pca(mesh, radius, options, logger)
        }
    }
}

/// Estimate principal curvatures with Taubin's method.
///
/// Requires per-vertex principal curvature and both adjacency components.
/// Vertices without incident faces are left untouched. Every vertex is
/// computed independently, so the result does not depend on
/// [`CurvatureOptions::parallel`].
pub fn update_principal_curvature_taubin95<I: MeshIndex>(
    mesh: &mut PolyMesh<I>,
    options: &CurvatureOptions,
    logger: &dyn Logger,
) -> Result<()> {
    require_per_vertex_principal_curvature(mesh)?;
    require_per_vertex_adjacent_faces(mesh)?;
    require_per_face_adjacent_faces(mesh)?;

    logger.log(0, "Updating per vertex normals...");
    update_and_normalize_per_vertex_normals(mesh, NormalWeighting::Angle);

    logger.log(5, "Computing per vertex curvature...");
    let n = mesh.num_vertices();
    logger.start_progress("", n, 5, 5, 100);

    let mesh_ref: &PolyMesh<I> = mesh;
    let compute = |i: usize| -> Result<Option<PrincipalCurvature>> {
        let v = VertexId::new(i);
        let ring = OneRing::collect(mesh_ref, v, options.max_ring_steps)?;
        logger.progress(i);
        if ring.is_empty() {
            return Ok(None);
        }
        Ok(Some(taubin95_from_ring(mesh_ref, v, &ring)))
    };

    let results: Result<Vec<Option<PrincipalCurvature>>> = if options.parallel {
        (0..n).into_par_iter().map(compute).collect()
    } else {
        (0..n).map(compute).collect()
    };
    let results = results?;
    logger.end_progress();

    store(mesh, results);
    logger.log(100, "Per vertex curvature computed.");
    Ok(())
}

fn taubin95_from_ring<I: MeshIndex>(
    mesh: &PolyMesh<I>,
    v: VertexId<I>,
    ring: &OneRing<I>,
) -> PrincipalCurvature {
    let n = *mesh.normal(v);
    let p = *mesh.position(v);
    let tp = tangent_projector(&n);

    let mut m = Matrix3::zeros();
    for (adj, w) in ring.steps().iter().zip(ring.weights()) {
        let edge = p - mesh.position(adj.vertex);
        let kappa = 2.0 * n.dot(&edge) / edge.norm_squared();
        let t = (tp * edge).normalize();
        m += outer_product(&t, &t) * (w * kappa);
    }

    let q = householder_frame(&n);
    let qtmq = q.transpose() * m * q;

    let alpha = qtmq[(1, 1)] - qtmq[(2, 2)];
    let beta = qtmq[(2, 1)];
    let (c, s) = find_best_givens_rotation(alpha, beta);

    let minor = Matrix2::new(qtmq[(1, 1)], qtmq[(1, 2)], qtmq[(2, 1)], qtmq[(2, 2)]);
    let rot = Matrix2::new(c, s, -s, c);
    let stms = rot.transpose() * minor * rot;

    PrincipalCurvature {
        max_dir: q.column(1) * c - q.column(2) * s,
        min_dir: q.column(1) * s + q.column(2) * c,
        max_value: 3.0 * stms[(0, 0)] - stms[(1, 1)],
        min_value: 3.0 * stms[(1, 1)] - stms[(0, 0)],
    }
}

/// Where the PCA covariance of a ball neighborhood comes from.
enum Neighborhood<I: MeshIndex> {
    /// Vertices inside the ball, scaled by the total surface area.
    Sampled { grid: StaticGrid3<VertexId<I>>, area: f64 },
    /// The surface clipped by the ball, integrated exactly.
    Clipped,
}

impl<I: MeshIndex> Neighborhood<I> {
    fn covariance(&self, mesh: &PolyMesh<I>, sphere: &Sphere) -> Matrix3<f64> {
        match self {
            Neighborhood::Sampled { grid, area } => {
                let points: Vec<_> = grid.values_in_sphere(sphere).into_iter().map(|e| e.point).collect();
                covariance_matrix_of_point_cloud(&points) * (area * area / 1000.0)
            }
            Neighborhood::Clipped => covariance_matrix_of_mesh(&mesh_sphere_intersection(mesh, sphere)),
        }
    }
}

/// Estimate principal curvatures by principal component analysis of the
/// ball of `radius` around each vertex.
///
/// Requires per-vertex principal curvature; `radius` must be finite and
/// positive. With [`CurvatureOptions::montecarlo_sampling`] the covariance is
/// taken over the mesh vertices inside the ball, otherwise over the surface
/// clipped by it. Degenerate neighborhoods yield NaN or infinite values
/// rather than errors.
pub fn update_principal_curvature_pca<I: MeshIndex>(
    mesh: &mut PolyMesh<I>,
    radius: f64,
    options: &CurvatureOptions,
    logger: &dyn Logger,
) -> Result<()> {
    require_per_vertex_principal_curvature(mesh)?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::invalid_param("radius", radius, "must be finite and positive"));
    }

    logger.log(0, "Updating per vertex normals...");
    update_and_normalize_per_vertex_normals(mesh, NormalWeighting::Angle);

    logger.log(0, "Computing per vertex curvature...");
    let neighborhood = if options.montecarlo_sampling {
        Neighborhood::Sampled {
            grid: StaticGrid3::new(mesh.vertices().map(|(id, v)| (v.position, id))),
            area: surface_area(mesh),
        }
    } else {
        Neighborhood::Clipped
    };
    log::debug!(
        "pca curvature: radius {radius}, {} sampling",
        if options.montecarlo_sampling { "montecarlo" } else { "exact" }
    );

    let n = mesh.num_vertices();
    logger.start_progress("", n, 10, 0, 100);

    let mesh_ref: &PolyMesh<I> = mesh;
    let compute = |i: usize| -> Option<PrincipalCurvature> {
        let v = VertexId::new(i);
        let sphere = Sphere::new(*mesh_ref.position(v), radius);
        let covariance = neighborhood.covariance(mesh_ref, &sphere);
        logger.progress(i);
        Some(pca_from_covariance(&covariance, mesh_ref.normal(v), radius))
    };

    let results: Vec<Option<PrincipalCurvature>> = if options.parallel {
        (0..n).into_par_iter().map(compute).collect()
    } else {
        (0..n).map(compute).collect()
    };
    logger.end_progress();

    store(mesh, results);
    logger.log(100, "Per vertex curvature computed.");
    Ok(())
}

/// Principal curvatures from the covariance of a ball neighborhood of
/// radius `radius` around a point with unit normal `normal`.
fn pca_from_covariance(covariance: &Matrix3<f64>, normal: &Vector3<f64>, radius: f64) -> PrincipalCurvature {
    let (values, vectors) = symmetric_eigen_decompose(covariance);

    // The eigenvector closest to the normal is not a tangent direction
    let mut best = 0;
    let mut best_dot = f64::NEG_INFINITY;
    for i in 0..3 {
        let d = normal.dot(&vectors.column(i).normalize()).abs();
        if d > best_dot {
            best = i;
            best_dot = d;
        }
    }
    let i_max = (best + 1) % 3;
    let i_min = (best + 2) % 3;

    let max_dir = to_tangent_plane(&vectors.column(i_max).normalize(), normal);
    let min_dir = to_tangent_plane(&vectors.column(i_min).normalize(), normal);
    let (max_value, min_value) = pca_curvatures(radius, values[i_max], values[i_min]);

    if max_value < min_value {
        PrincipalCurvature {
            max_dir: min_dir,
            min_dir: max_dir,
            max_value: min_value,
            min_value: max_value,
        }
    } else {
        PrincipalCurvature {
            max_dir,
            min_dir,
            max_value,
            min_value,
        }
    }
}

/// Rotate `dir` about `dir × normal` until it is orthogonal to `normal`.
fn to_tangent_plane(dir: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    let angle = dir.dot(normal).clamp(-1.0, 1.0).acos();
    rotation_matrix(&dir.cross(normal), -(FRAC_PI_2 - angle)) * dir
}

/// Curvatures along the first and second tangent direction from the
/// covariance eigenvalues of those directions, for a ball of radius `r`.
///
/// Inverts the second-order expansion of the covariance of a ball
/// neighborhood: `κ₁ = 6 (λ₂ - 3 λ₁) / (π r⁶) + 8 / (5 r)`, and
/// symmetrically for `κ₂`.
pub fn pca_curvatures(r: f64, lambda1: f64, lambda2: f64) -> (f64, f64) {
    let r5 = r.powi(5);
    let r6 = r5 * r;
    let k1 = 0.4 * (4.0 * PI * r5 + 15.0 * lambda2 - 45.0 * lambda1) / (PI * r6);
    let k2 = 0.4 * (4.0 * PI * r5 + 15.0 * lambda1 - 45.0 * lambda2) / (PI * r6);
    (k1, k2)
}

/// Write computed curvatures into the column; `None` leaves a vertex as is.
fn store<I: MeshIndex>(mesh: &mut PolyMesh<I>, results: Vec<Option<PrincipalCurvature>>) {
    let mut skipped = 0;
    for (i, result) in results.into_iter().enumerate() {
        match (result, mesh.principal_curvature_mut(VertexId::new(i))) {
            (Some(k), Some(slot)) => *slot = k,
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        log::debug!("{skipped} vertices without incident faces left untouched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::create::{create_disk, create_icosphere};
    use crate::algo::logger::{NullLogger, ProgressLogger};
    use crate::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
    use crate::mesh::Component;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    fn prepared(mut mesh: PolyMesh) -> PolyMesh {
        update_per_vertex_adjacent_faces(&mut mesh);
        update_per_face_adjacent_faces(&mut mesh);
        mesh.enable_per_vertex_principal_curvature();
        mesh
    }

    fn curvatures(mesh: &PolyMesh) -> Vec<PrincipalCurvature> {
        mesh.principal_curvatures().unwrap().to_vec()
    }

    #[test]
    fn test_options_builder() {
        let opts = CurvatureOptions::default()
            .with_algorithm(CurvatureAlgorithm::Pca)
            .with_radius(0.5)
            .with_montecarlo_sampling(false)
            .with_max_ring_steps(64)
            .sequential();
        assert_eq!(opts.algorithm, CurvatureAlgorithm::Pca);
        assert_eq!(opts.radius, Some(0.5));
        assert!(!opts.montecarlo_sampling);
        assert!(!opts.parallel);
        assert_eq!(opts.max_ring_steps, Some(64));

        let defaults = CurvatureOptions::default();
        assert_eq!(defaults.algorithm, CurvatureAlgorithm::Taubin95);
        assert!(defaults.montecarlo_sampling && defaults.parallel);
    }

    #[test]
    fn test_one_ring_closed() {
        let mesh = prepared(create_icosphere(1.0, 2));
        for v in mesh.vertex_ids() {
            let ring = OneRing::collect(&mesh, v, None).unwrap();
            assert_eq!(ring.len(), mesh.vertex_adj_faces(v).len());
            assert!(ring.steps().iter().all(|s| !s.on_border));

            let weights = ring.weights();
            assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            assert!(weights.iter().all(|&w| w > 0.0 && w < 1.0));
        }
    }

    #[test]
    fn test_one_ring_border_visits_faces_twice() {
        let mesh = prepared(create_disk(1.0, 2, 8));
        // Vertex 9 is on the outer ring, with three incident faces
        let v = VertexId::new(9);
        let ring = OneRing::collect(&mesh, v, None).unwrap();
        assert_eq!(ring.len(), 2 * mesh.vertex_adj_faces(v).len());
        assert_eq!(ring.steps().iter().filter(|s| s.on_border).count(), 2);
        assert!(ring.weights().iter().all(|&w| w < 1.0));
    }

    #[test]
    fn test_one_ring_step_budget() {
        let mesh = prepared(create_icosphere(1.0, 0));
        let v = VertexId::new(0);
        assert_eq!(OneRing::collect(&mesh, v, Some(5)).unwrap().len(), 5);
        assert!(matches!(
            OneRing::collect(&mesh, v, Some(3)),
            Err(MeshError::NonManifoldVertex { vertex: 0, steps: 3 })
        ));
    }

    #[test]
    fn test_taubin_sphere() {
        let mut mesh = prepared(create_icosphere(1.0, 2));
        update_principal_curvature_taubin95(&mut mesh, &CurvatureOptions::default(), &NullLogger)
            .unwrap();

        for (v, k) in mesh.vertex_ids().zip(curvatures(&mesh)) {
            assert!((k.max_value - 1.0).abs() < 0.15, "{:?}: {}", v, k.max_value);
            assert!((k.min_value - 1.0).abs() < 0.15, "{:?}: {}", v, k.min_value);
            assert!(k.max_dir.dot(&k.min_dir).abs() < 1e-5);
            let n = mesh.normal(v);
            assert!(k.max_dir.dot(n).abs() < 1e-9);
            assert!(k.min_dir.dot(n).abs() < 1e-9);
        }
    }

    #[test]
    fn test_taubin_flat_disk() {
        let mut mesh = prepared(create_disk(1.0, 4, 16));
        update_principal_curvature_taubin95(&mut mesh, &CurvatureOptions::default(), &NullLogger)
            .unwrap();
        for k in curvatures(&mesh) {
            assert!(k.max_value.abs() < 1e-12);
            assert!(k.min_value.abs() < 1e-12);
            assert_relative_eq!(k.max_dir.dot(&k.min_dir), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_taubin_parallel_matches_sequential() {
        let mut a = prepared(create_icosphere(2.0, 2));
        let mut b = a.clone();
        update_principal_curvature_taubin95(&mut a, &CurvatureOptions::default(), &NullLogger).unwrap();
        update_principal_curvature_taubin95(&mut b, &CurvatureOptions::default().sequential(), &NullLogger)
            .unwrap();
        assert_eq!(curvatures(&a), curvatures(&b));
    }

    #[test]
    fn test_taubin_skips_isolated_vertex() {
        let mut mesh: PolyMesh = create_icosphere(1.0, 1);
        let lonely = mesh.add_vertex(nalgebra::Point3::new(5.0, 0.0, 0.0));
        let mut mesh = prepared(mesh);
        assert!(OneRing::collect(&mesh, lonely, None).unwrap().is_empty());
        assert!(OneRing::collect(&mesh, lonely, Some(1)).unwrap().is_empty());
        update_principal_curvature_taubin95(&mut mesh, &CurvatureOptions::default(), &NullLogger)
            .unwrap();
        assert_eq!(*mesh.principal_curvature(lonely).unwrap(), PrincipalCurvature::default());
    }

    #[test]
    fn test_missing_components() {
        let mut mesh: PolyMesh = create_icosphere(1.0, 1);
        let opts = CurvatureOptions::default();

        let err = update_principal_curvature(&mut mesh, &opts, &NullLogger).unwrap_err();
        assert!(matches!(err, MeshError::MissingComponent(Component::PerVertexPrincipalCurvature)));

        mesh.enable_per_vertex_principal_curvature();
        let err = update_principal_curvature(&mut mesh, &opts, &NullLogger).unwrap_err();
        assert!(matches!(err, MeshError::MissingComponent(Component::PerVertexAdjacentFaces)));

        update_per_vertex_adjacent_faces(&mut mesh);
        let err = update_principal_curvature(&mut mesh, &opts, &NullLogger).unwrap_err();
        assert!(matches!(err, MeshError::MissingComponent(Component::PerFaceAdjacentFaces)));

        // PCA needs no adjacency
        let pca = opts.with_algorithm(CurvatureAlgorithm::Pca);
        assert!(update_principal_curvature(&mut mesh, &pca, &NullLogger).is_ok());
    }

    #[test]
    fn test_pca_rejects_bad_radius() {
        let mut mesh = prepared(create_icosphere(1.0, 1));
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = update_principal_curvature_pca(&mut mesh, r, &CurvatureOptions::default(), &NullLogger)
                .unwrap_err();
            assert!(matches!(err, MeshError::InvalidParameter { name: "radius", .. }));
        }
    }

    #[test]
    fn test_pca_curvatures_inverts_ball_covariance() {
        // Covariance eigenvalues of a ball neighborhood on a surface with
        // principal curvatures k1, k2, to second order in r
        let (k1, k2, r): (f64, f64, f64) = (2.0, 0.5, 0.1);
        let base = 2.0 * PI / 15.0 * r.powi(5);
        let l1 = base - PI / 48.0 * (3.0 * k1 + k2) * r.powi(6);
        let l2 = base - PI / 48.0 * (k1 + 3.0 * k2) * r.powi(6);

        let (max, min) = pca_curvatures(r, l1, l2);
        assert_relative_eq!(max, k1, epsilon = 1e-9);
        assert_relative_eq!(min, k2, epsilon = 1e-9);
    }

    #[test]
    fn test_pca_exact_sphere() {
        // Values are not close to 1 here (about -27 at this radius), so only
        // ordering, tangency and symmetry are checked.
        let mut mesh = prepared(create_icosphere(1.0, 2));
        let opts = CurvatureOptions::default()
            .with_algorithm(CurvatureAlgorithm::Pca)
            .with_radius(0.3)
            .with_montecarlo_sampling(false);
        update_principal_curvature(&mut mesh, &opts, &NullLogger).unwrap();

        let ks = curvatures(&mesh);
        for (v, k) in mesh.vertex_ids().zip(&ks) {
            assert!(!k.is_degenerate());
            assert!(k.max_value >= k.min_value);
            let n = mesh.normal(v);
            assert!(k.max_dir.dot(n).abs() < 1e-9);
            assert!(k.min_dir.dot(n).abs() < 1e-9);
            assert_relative_eq!(k.max_dir.norm(), 1.0, epsilon = 1e-9);
        }

        // The twelve icosahedron vertices are equivalent by symmetry
        for k in &ks[1..12] {
            assert_relative_eq!(k.max_value, ks[0].max_value, max_relative = 1e-6);
            assert_relative_eq!(k.min_value, ks[0].min_value, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_pca_exact_disk_is_isotropic() {
        // The ball relation is not calibrated for clipped neighborhoods: the
        // center of a flat disk gets about -28 on both values, not zero. What
        // holds is that both values agree and both directions lie in the plane.
        let mut mesh = prepared(create_disk(1.0, 6, 24));
        let opts = CurvatureOptions::default()
            .with_algorithm(CurvatureAlgorithm::Pca)
            .with_radius(0.3)
            .with_montecarlo_sampling(false);
        update_principal_curvature(&mut mesh, &opts, &NullLogger).unwrap();

        let center = mesh.principal_curvature(VertexId::new(0)).unwrap();
        assert_relative_eq!(center.max_value, center.min_value, max_relative = 1e-6);
        assert!(center.max_dir.z.abs() < 1e-9);
        assert!(center.min_dir.z.abs() < 1e-9);
    }

    #[test]
    fn test_pca_montecarlo_ordering() {
        let mut mesh = prepared(create_icosphere(1.0, 2));
        let opts = CurvatureOptions::default().with_algorithm(CurvatureAlgorithm::Pca);
        update_principal_curvature(&mut mesh, &opts, &NullLogger).unwrap();
        for k in curvatures(&mesh) {
            assert!(!k.is_degenerate());
            assert!(k.max_value >= k.min_value);
        }
    }

    #[test]
    fn test_progress_is_reported() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let logger = ProgressLogger::new(move |current, _, message| {
            sink.lock().unwrap().push((current, message.to_string()));
        });

        let mut mesh = prepared(create_icosphere(1.0, 2));
        update_principal_curvature(&mut mesh, &CurvatureOptions::default(), &logger).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first().map(|(p, _)| *p), Some(0));
        assert_eq!(seen.last(), Some(&(100, "Per vertex curvature computed.".to_string())));
        assert!(seen.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
