//! Position-in-mesh cursor.
//!
//! A [`MeshPos`] is a (face, vertex, edge) triple where the vertex is one of
//! the two endpoints of the edge, and the edge belongs to the face. Three
//! elementary moves change exactly one element of the triple:
//!
//! - [`MeshPos::flip_vertex`]: the other endpoint of the current edge
//! - [`MeshPos::flip_edge`]: the other edge of the face incident to the vertex
//! - [`MeshPos::flip_face`]: the face across the current edge
//!
//! Composing `flip_edge` and `flip_face` walks the star of the vertex, which
//! is how one-rings are enumerated without an explicit vertex-vertex
//! adjacency. All moves need per-face adjacent faces.
//!
//! ```
//! use facetkit::algo::create::create_icosahedron;
//! use facetkit::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
//! use facetkit::mesh::{MeshPos, PolyMesh, VertexId};
//!
//! let mut mesh: PolyMesh = create_icosahedron(1.0);
//! update_per_vertex_adjacent_faces(&mut mesh);
//! update_per_face_adjacent_faces(&mut mesh);
//!
//! let pos = MeshPos::around_vertex(&mesh, VertexId::new(0)).unwrap();
//! assert_eq!(pos.number_of_adjacent_faces_to_v(), 5);
//! ```

use std::cmp::Ordering;
use std::fmt;

use super::components::Component;
use super::index::{FaceId, MeshIndex, VertexId};
use super::polymesh::PolyMesh;

/// A cursor over a (face, vertex, edge) triple of a [`PolyMesh`].
///
/// Edge `e` of a face joins `face.vertex(e)` and `face.vertex_mod(e + 1)`.
/// The cursor borrows the mesh and is cheap to copy; it is not meant to be
/// shared between threads while walking.
#[derive(Clone, Copy)]
pub struct MeshPos<'a, I: MeshIndex = u32> {
    mesh: &'a PolyMesh<I>,
    face: FaceId<I>,
    vertex: VertexId<I>,
    edge: usize,
}

impl<'a, I: MeshIndex> MeshPos<'a, I> {
    /// A null cursor, not pointing to any element.
    pub fn null(mesh: &'a PolyMesh<I>) -> Self {
        Self {
            mesh,
            face: FaceId::invalid(),
            vertex: VertexId::invalid(),
            edge: usize::MAX,
        }
    }

    /// Place the cursor on `face`, at the first vertex of edge `e`.
    pub fn from_edge(mesh: &'a PolyMesh<I>, face: FaceId<I>, edge: usize) -> Option<Self> {
        if !face.is_valid() || face.index() >= mesh.num_faces() {
            return None;
        }
        let f = mesh.face(face);
        if edge >= f.vertex_number() {
            return None;
        }
        Self::with_edge(mesh, face, f.vertex(edge), edge)
    }

    /// Place the cursor on `face` at `vertex`, on the edge leaving `vertex`.
    ///
    /// Returns `None` if `vertex` does not belong to `face` or face
    /// adjacency is not enabled.
    pub fn new(mesh: &'a PolyMesh<I>, face: FaceId<I>, vertex: VertexId<I>) -> Option<Self> {
        if !face.is_valid() || face.index() >= mesh.num_faces() {
            return None;
        }
        let edge = mesh.face(face).index_of_vertex(vertex)?;
        Self::with_edge(mesh, face, vertex, edge)
    }

    /// Place the cursor on an explicit (face, vertex, edge) triple.
    pub fn with_edge(
        mesh: &'a PolyMesh<I>,
        face: FaceId<I>,
        vertex: VertexId<I>,
        edge: usize,
    ) -> Option<Self> {
        if Self::is_valid_triple(mesh, face, vertex, edge) {
            Some(Self {
                mesh,
                face,
                vertex,
                edge,
            })
        } else {
            None
        }
    }

    /// Place the cursor on the first recorded incident face of `v`.
    ///
    /// Needs per-vertex adjacent faces; returns `None` for a vertex with no
    /// incident face.
    pub fn around_vertex(mesh: &'a PolyMesh<I>, v: VertexId<I>) -> Option<Self> {
        let face = mesh.vertex_adj_face(v)?;
        Self::new(mesh, face, v)
    }

    /// Whether `(face, vertex, edge)` describes a valid position.
    ///
    /// The face must exist, face adjacency must be enabled, the edge must be
    /// an edge of the face and the vertex one of its endpoints.
    pub fn is_valid_triple(
        mesh: &PolyMesh<I>,
        face: FaceId<I>,
        vertex: VertexId<I>,
        edge: usize,
    ) -> bool {
        if !face.is_valid() || !vertex.is_valid() || face.index() >= mesh.num_faces() {
            return false;
        }
        if !mesh.is_component_enabled(Component::PerFaceAdjacentFaces) {
            return false;
        }
        let f = mesh.face(face);
        edge < f.vertex_number()
            && (vertex == f.vertex(edge) || vertex == f.vertex_mod(edge as isize + 1))
    }

    /// Whether this cursor is valid.
    pub fn is_valid(&self) -> bool {
        Self::is_valid_triple(self.mesh, self.face, self.vertex, self.edge)
    }

    /// Whether this cursor was never placed. Different from `!is_valid()`.
    pub fn is_null(&self) -> bool {
        !self.face.is_valid() || !self.vertex.is_valid() || self.edge == usize::MAX
    }

    /// The mesh this cursor walks on.
    #[inline]
    pub fn mesh(&self) -> &'a PolyMesh<I> {
        self.mesh
    }

    /// The current face.
    #[inline]
    pub fn face(&self) -> FaceId<I> {
        self.face
    }

    /// The current vertex.
    #[inline]
    pub fn vertex(&self) -> VertexId<I> {
        self.vertex
    }

    /// The current edge, as an index into the current face.
    #[inline]
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// The face across the current edge, `None` on a border.
    pub fn adj_face(&self) -> Option<FaceId<I>> {
        self.mesh.face_adj_face(self.face, self.edge)
    }

    /// The other endpoint of the current edge.
    pub fn adj_vertex(&self) -> VertexId<I> {
        let mut tmp = *self;
        tmp.flip_vertex();
        tmp.vertex
    }

    /// The other edge of the current face incident to the current vertex.
    pub fn adj_edge(&self) -> usize {
        let mut tmp = *self;
        tmp.flip_edge();
        tmp.edge
    }

    /// Whether the current edge has no adjacent face.
    ///
    /// Uses face adjacency only; border flags are not consulted.
    pub fn is_edge_on_border(&self) -> bool {
        self.adj_face().is_none()
    }

    /// Whether the current vertex is the first endpoint of the current edge.
    ///
    /// When true, the next moves walk in counter-clockwise order.
    pub fn is_ccw_oriented(&self) -> bool {
        self.mesh.face(self.face).vertex(self.edge) == self.vertex
    }

    /// Move to the face across the current edge, keeping vertex and edge.
    ///
    /// Returns `false` and stays in place when the edge is on a border. On a
    /// non-manifold edge the new edge index is found by its endpoints; if
    /// that fails the cursor becomes null and `false` is returned.
    pub fn flip_face(&mut self) -> bool {
        let Some(nf) = self.adj_face() else {
            return false;
        };

        match self.mesh.index_of_adj_face(nf, self.face) {
            Some(e) => self.edge = e,
            None => {
                let f = self.mesh.face(self.face);
                let v0 = f.vertex(self.edge);
                let v1 = f.vertex_mod(self.edge as isize + 1);
                match self.mesh.face(nf).index_of_edge(v0, v1) {
                    Some(e) => self.edge = e,
                    None => {
                        log::warn!(
                            "face {:?} lists {:?} as adjacent but shares no edge with it; \
                             face adjacency is stale",
                            self.face,
                            nf
                        );
                        *self = Self::null(self.mesh);
                        return false;
                    }
                }
            }
        }
        self.face = nf;
        true
    }

    /// Move to the other endpoint of the current edge.
    pub fn flip_vertex(&mut self) {
        let f = self.mesh.face(self.face);
        let e = self.edge as isize;
        self.vertex = if f.vertex_mod(e) == self.vertex {
            f.vertex_mod(e + 1)
        } else {
            f.vertex_mod(e)
        };
    }

    /// Move to the other edge of the current face incident to the vertex.
    pub fn flip_edge(&mut self) {
        let f = self.mesh.face(self.face);
        let n = f.vertex_number();
        self.edge = if f.vertex_mod(self.edge as isize + 1) == self.vertex {
            (self.edge + 1) % n
        } else {
            (self.edge + n - 1) % n
        };
    }

    /// Move to the next edge in the star of the current vertex.
    ///
    /// Equivalent to `flip_edge` then `flip_face`. On a border only the edge
    /// changes, so the walk bounces back and continues in the opposite
    /// direction.
    pub fn next_edge_adjacent_to_v(&mut self) {
        self.flip_edge();
        self.flip_face();
    }

    /// Move to the next border edge in the star of the current vertex.
    ///
    /// Returns `true` if a border edge different from the starting position
    /// was found; otherwise the cursor ends where it started.
    pub fn next_edge_on_border_adjacent_to_v(&mut self) -> bool {
        let start = *self;
        loop {
            self.next_edge_adjacent_to_v();
            if *self == start || self.is_edge_on_border() {
                break;
            }
        }
        *self != start
    }

    /// Number of faces incident to the current vertex.
    ///
    /// Works for border vertices too; the starting face and edge do not
    /// matter.
    pub fn number_of_adjacent_faces_to_v(&self) -> usize {
        let (count, on_border) = self.count_adjacent_faces_to_v();
        // A border makes the walk visit every face twice before closing
        if on_border {
            count / 2
        } else {
            count
        }
    }

    fn count_adjacent_faces_to_v(&self) -> (usize, bool) {
        let mut count = 0;
        let mut on_border = false;
        let mut mp = *self;
        loop {
            mp.next_edge_adjacent_to_v();
            count += 1;
            if mp.is_edge_on_border() {
                on_border = true;
            }
            if mp == *self {
                break;
            }
        }
        (count, on_border)
    }
}

impl<I: MeshIndex> PartialEq for MeshPos<'_, I> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.mesh, other.mesh)
            && self.face == other.face
            && self.vertex == other.vertex
            && self.edge == other.edge
    }
}

impl<I: MeshIndex> Eq for MeshPos<'_, I> {}

impl<I: MeshIndex> PartialOrd for MeshPos<'_, I> {
    /// Orders by face, then edge, then vertex. Cursors on different meshes
    /// are not comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !std::ptr::eq(self.mesh, other.mesh) {
            return None;
        }
        Some(
            (self.face, self.edge, self.vertex).cmp(&(other.face, other.edge, other.vertex)),
        )
    }
}

impl<I: MeshIndex> fmt::Debug for MeshPos<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshPos")
            .field("face", &self.face)
            .field("vertex", &self.vertex)
            .field("edge", &self.edge)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
    use crate::mesh::build_from_triangles;
    use nalgebra::Point3;

    /// A flat fan of `n` triangles around vertex 0. Closed when `closed`,
    /// otherwise the last triangle is missing.
    fn fan(n: usize, closed: bool) -> PolyMesh {
        let mut vertices = vec![Point3::origin()];
        for i in 0..n {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
        }
        let count = if closed { n } else { n - 1 };
        let faces: Vec<[usize; 3]> = (0..count).map(|i| [0, i + 1, (i + 1) % n + 1]).collect();
        let mut mesh = build_from_triangles(&vertices, &faces).unwrap();
        update_per_vertex_adjacent_faces(&mut mesh);
        update_per_face_adjacent_faces(&mut mesh);
        mesh
    }

    #[test]
    fn test_construction() {
        let mesh = fan(6, true);
        let pos = MeshPos::new(&mesh, FaceId::new(0), VertexId::new(0)).unwrap();
        assert!(pos.is_valid());
        assert!(!pos.is_null());
        assert_eq!(pos.edge(), 0);
        assert!(pos.is_ccw_oriented());
        assert_eq!(pos.adj_vertex(), VertexId::new(1));
        assert_eq!(pos.adj_edge(), 2);

        // Vertex 4 is not in face 0
        assert!(MeshPos::new(&mesh, FaceId::new(0), VertexId::new(4)).is_none());
        assert!(MeshPos::null(&mesh).is_null());
        assert!(!MeshPos::null(&mesh).is_valid());
    }

    #[test]
    fn test_requires_face_adjacency() {
        let mut mesh = fan(6, true);
        mesh.disable_per_face_adjacent_faces();
        assert!(MeshPos::new(&mesh, FaceId::new(0), VertexId::new(0)).is_none());
    }

    #[test]
    fn test_flips() {
        let mesh = fan(6, true);
        let mut pos = MeshPos::new(&mesh, FaceId::new(0), VertexId::new(0)).unwrap();

        pos.flip_vertex();
        assert_eq!(pos.vertex(), VertexId::new(1));
        pos.flip_vertex();
        assert_eq!(pos.vertex(), VertexId::new(0));

        pos.flip_edge();
        assert_eq!(pos.edge(), 2);
        // Edge 2 of face 0 joins vertices 2 and 0, shared with face 1
        assert!(pos.flip_face());
        assert_eq!(pos.face(), FaceId::new(1));
        assert_eq!(pos.edge(), 0);
        assert_eq!(pos.vertex(), VertexId::new(0));
        assert!(pos.is_valid());
    }

    #[test]
    fn test_ring_walk_closes() {
        let mesh = fan(7, true);
        let start = MeshPos::around_vertex(&mesh, VertexId::new(0)).unwrap();
        let first = start.adj_vertex();

        let mut pos = start;
        let mut steps = 0;
        loop {
            pos.next_edge_adjacent_to_v();
            steps += 1;
            if pos.adj_vertex() == first {
                break;
            }
        }
        assert_eq!(steps, 7);
        assert_eq!(pos, start);
        assert_eq!(start.number_of_adjacent_faces_to_v(), 7);
    }

    #[test]
    fn test_border_vertex() {
        let mesh = fan(6, false);
        let rim = MeshPos::around_vertex(&mesh, VertexId::new(2)).unwrap();
        assert_eq!(rim.number_of_adjacent_faces_to_v(), 2);

        let center = MeshPos::around_vertex(&mesh, VertexId::new(0)).unwrap();
        assert_eq!(center.number_of_adjacent_faces_to_v(), 5);

        let mut pos = center;
        assert!(pos.next_edge_on_border_adjacent_to_v());
        assert!(pos.is_edge_on_border());
        assert!(!pos.flip_face());
    }

    #[test]
    fn test_no_border_on_closed_fan() {
        let mesh = fan(5, true);
        let mut pos = MeshPos::around_vertex(&mesh, VertexId::new(0)).unwrap();
        let start = pos;
        assert!(!pos.next_edge_on_border_adjacent_to_v());
        assert_eq!(pos, start);
    }

    #[test]
    fn test_ordering() {
        let mesh = fan(6, true);
        let a = MeshPos::new(&mesh, FaceId::new(0), VertexId::new(0)).unwrap();
        let b = MeshPos::new(&mesh, FaceId::new(1), VertexId::new(0)).unwrap();
        assert!(a < b);
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
    }
}
