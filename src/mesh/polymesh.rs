//! Indexed polygon mesh.
//!
//! A [`PolyMesh`] stores vertices and polygonal faces in flat arrays. Faces
//! reference their vertices by [`VertexId`], in counter-clockwise order. The
//! `i`-th edge of a face joins its `i`-th and `(i+1)`-th vertex.
//!
//! # Optional components
//!
//! Adjacency and curvature are stored in optional columns:
//!
//! - per-vertex adjacent faces: every face incident to a vertex
//! - per-face adjacent faces: for every edge of a face, the face on the other
//!   side, or the sentinel [`FaceId::invalid`] on a border edge
//! - per-vertex principal curvature
//!
//! A column is allocated with `enable_*` and dropped with `disable_*`.
//! Enabling an adjacency column only allocates it; fill it with
//! [`crate::algo::topology`].

use nalgebra::{Point3, Vector3};

use super::components::{Component, PrincipalCurvature};
use super::index::{FaceId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A vertex of the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// The vertex normal. Zero until a normal update runs.
    pub normal: Vector3<f64>,
}

impl Vertex {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// A polygonal face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face<I: MeshIndex = u32> {
    vertices: Vec<VertexId<I>>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a face from its vertices, in counter-clockwise order.
    pub fn new(vertices: Vec<VertexId<I>>) -> Self {
        Self { vertices }
    }

    /// Number of vertices (and edges) of the face.
    #[inline]
    pub fn vertex_number(&self) -> usize {
        self.vertices.len()
    }

    /// The `i`-th vertex.
    #[inline]
    pub fn vertex(&self, i: usize) -> VertexId<I> {
        self.vertices[i]
    }

    /// The vertex at position `i` taken modulo the vertex count.
    ///
    /// Negative positions wrap backwards, so `vertex_mod(-1)` is the last
    /// vertex.
    #[inline]
    pub fn vertex_mod(&self, i: isize) -> VertexId<I> {
        let n = self.vertices.len() as isize;
        self.vertices[i.rem_euclid(n) as usize]
    }

    /// All vertices in order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId<I>] {
        &self.vertices
    }

    /// Position of `v` in this face.
    pub fn index_of_vertex(&self, v: VertexId<I>) -> Option<usize> {
        self.vertices.iter().position(|&x| x == v)
    }

    /// Index of the edge joining `v0` and `v1`, in either orientation.
    pub fn index_of_edge(&self, v0: VertexId<I>, v1: VertexId<I>) -> Option<usize> {
        let n = self.vertices.len();
        (0..n).find(|&e| {
            let a = self.vertices[e];
            let b = self.vertices[(e + 1) % n];
            (a == v0 && b == v1) || (a == v1 && b == v0)
        })
    }
}

/// An indexed polygon mesh with optional per-element components.
#[derive(Debug, Clone)]
pub struct PolyMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,

    /// Incident faces of each vertex.
    pub(crate) vertex_adj_faces: Option<Vec<Vec<FaceId<I>>>>,

    /// Adjacent face across each edge of each face.
    pub(crate) face_adj_faces: Option<Vec<Vec<FaceId<I>>>>,

    /// Principal curvature of each vertex.
    pub(crate) principal_curvature: Option<Vec<PrincipalCurvature>>,
}

impl<I: MeshIndex> Default for PolyMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            faces: Vec::with_capacity(num_faces),
            vertex_adj_faces: None,
            face_adj_faces: None,
            principal_curvature: None,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    /// Get the normal of a vertex.
    #[inline]
    pub fn normal(&self, v: VertexId<I>) -> &Vector3<f64> {
        &self.vertex(v).normal
    }

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// Positions of the vertices of a face, in order.
    pub fn face_positions(&self, f: FaceId<I>) -> Vec<Point3<f64>> {
        self.face(f)
            .vertices()
            .iter()
            .map(|&v| *self.position(v))
            .collect()
    }

    /// Whether every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.vertex_number() == 3)
    }

    // ==================== Geometry ====================

    /// Area-weighted (unnormalized) normal of a face.
    ///
    /// Sum of the cross products of a triangle fan around the first vertex;
    /// its length is twice the area of a planar polygon.
    pub fn face_area_vector(&self, f: FaceId<I>) -> Vector3<f64> {
        let face = self.face(f);
        let p0 = self.position(face.vertex(0));
        let mut sum = Vector3::zeros();
        for i in 1..face.vertex_number() - 1 {
            let e1 = self.position(face.vertex(i)) - p0;
            let e2 = self.position(face.vertex(i + 1)) - p0;
            sum += e1.cross(&e2);
        }
        sum
    }

    /// Unit normal of a face.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        self.face_area_vector(f).normalize()
    }

    /// Area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        0.5 * self.face_area_vector(f).norm()
    }

    /// Centroid of the vertices of a face.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point3<f64> {
        let face = self.face(f);
        let sum = face
            .vertices()
            .iter()
            .fold(Vector3::zeros(), |acc, &v| acc + self.position(v).coords);
        Point3::from(sum / face.vertex_number() as f64)
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        if let Some(curv) = &mut self.principal_curvature {
            curv.push(PrincipalCurvature::default());
        }
        if let Some(adj) = &mut self.vertex_adj_faces {
            adj.push(Vec::new());
        }
        id
    }

    /// Add a new face and return its ID.
    ///
    /// Adjacency columns, if enabled, get empty entries for the new face and
    /// must be recomputed.
    pub fn add_face(&mut self, vertices: &[VertexId<I>]) -> Result<FaceId<I>> {
        let id = self.faces.len();
        if vertices.len() < 3 {
            return Err(MeshError::DegenerateFace { face: id });
        }
        for &v in vertices {
            if !v.is_valid() || v.index() >= self.vertices.len() {
                return Err(MeshError::InvalidVertexIndex {
                    face: id,
                    vertex: v.index(),
                });
            }
        }
        for (i, v) in vertices.iter().enumerate() {
            if vertices[i + 1..].contains(v) {
                return Err(MeshError::DegenerateFace { face: id });
            }
        }

        self.faces.push(Face::new(vertices.to_vec()));
        if let Some(adj) = &mut self.face_adj_faces {
            adj.push(vec![FaceId::invalid(); vertices.len()]);
        }
        Ok(FaceId::new(id))
    }

    // ==================== Components ====================

    /// Whether the given optional component is enabled.
    pub fn is_component_enabled(&self, component: Component) -> bool {
        match component {
            Component::PerVertexAdjacentFaces => self.vertex_adj_faces.is_some(),
            Component::PerFaceAdjacentFaces => self.face_adj_faces.is_some(),
            Component::PerVertexPrincipalCurvature => self.principal_curvature.is_some(),
        }
    }

    /// Allocate the per-vertex adjacent faces column (empty lists).
    pub fn enable_per_vertex_adjacent_faces(&mut self) {
        if self.vertex_adj_faces.is_none() {
            self.vertex_adj_faces = Some(vec![Vec::new(); self.vertices.len()]);
        }
    }

    /// Drop the per-vertex adjacent faces column.
    pub fn disable_per_vertex_adjacent_faces(&mut self) {
        self.vertex_adj_faces = None;
    }

    /// Allocate the per-face adjacent faces column (all edges on border).
    pub fn enable_per_face_adjacent_faces(&mut self) {
        if self.face_adj_faces.is_none() {
            self.face_adj_faces = Some(
                self.faces
                    .iter()
                    .map(|f| vec![FaceId::invalid(); f.vertex_number()])
                    .collect(),
            );
        }
    }

    /// Drop the per-face adjacent faces column.
    pub fn disable_per_face_adjacent_faces(&mut self) {
        self.face_adj_faces = None;
    }

    /// Allocate the per-vertex principal curvature column (zeroed).
    pub fn enable_per_vertex_principal_curvature(&mut self) {
        if self.principal_curvature.is_none() {
            self.principal_curvature =
                Some(vec![PrincipalCurvature::default(); self.vertices.len()]);
        }
    }

    /// Drop the per-vertex principal curvature column.
    pub fn disable_per_vertex_principal_curvature(&mut self) {
        self.principal_curvature = None;
    }

    /// Faces incident to `v`, or an empty slice if the column is disabled.
    pub fn vertex_adj_faces(&self, v: VertexId<I>) -> &[FaceId<I>] {
        match &self.vertex_adj_faces {
            Some(adj) => &adj[v.index()],
            None => &[],
        }
    }

    /// One face incident to `v`, if any is recorded.
    pub fn vertex_adj_face(&self, v: VertexId<I>) -> Option<FaceId<I>> {
        self.vertex_adj_faces(v).first().copied()
    }

    /// The face across edge `e` of `f`; `None` on a border edge or when the
    /// column is disabled.
    pub fn face_adj_face(&self, f: FaceId<I>, e: usize) -> Option<FaceId<I>> {
        self.face_adj_faces
            .as_ref()
            .and_then(|adj| adj[f.index()][e].to_option())
    }

    /// Position of `other` among the adjacent faces of `f`.
    pub fn index_of_adj_face(&self, f: FaceId<I>, other: FaceId<I>) -> Option<usize> {
        self.face_adj_faces
            .as_ref()
            .and_then(|adj| adj[f.index()].iter().position(|&g| g == other))
    }

    /// Principal curvature of `v`, if the column is enabled.
    pub fn principal_curvature(&self, v: VertexId<I>) -> Option<&PrincipalCurvature> {
        self.principal_curvature
            .as_ref()
            .map(|curv| &curv[v.index()])
    }

    /// Mutable principal curvature of `v`, if the column is enabled.
    pub fn principal_curvature_mut(&mut self, v: VertexId<I>) -> Option<&mut PrincipalCurvature> {
        self.principal_curvature
            .as_mut()
            .map(|curv| &mut curv[v.index()])
    }

    /// The whole principal curvature column, if enabled.
    pub fn principal_curvatures(&self) -> Option<&[PrincipalCurvature]> {
        self.principal_curvature.as_deref()
    }
}
