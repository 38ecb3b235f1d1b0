//! Adjacency updates.
//!
//! Fills the optional adjacency columns of a [`PolyMesh`] from its face
//! lists. Both functions enable the column they fill.

use crate::mesh::{FaceId, MeshIndex, PolyMesh, VertexId};

/// Record, for every vertex, all faces incident to it, in face order.
///
/// Vertices referenced by no face get an empty list.
pub fn update_per_vertex_adjacent_faces<I: MeshIndex>(mesh: &mut PolyMesh<I>) {
    let mut adj: Vec<Vec<FaceId<I>>> = vec![Vec::new(); mesh.num_vertices()];
    for (f, face) in mesh.faces() {
        for &v in face.vertices() {
            adj[v.index()].push(f);
        }
    }
    mesh.vertex_adj_faces = Some(adj);
}

/// An undirected edge of a face, keyed by its sorted endpoints.
#[derive(Debug, Clone, Copy)]
struct FaceEdge<I: MeshIndex> {
    key: (VertexId<I>, VertexId<I>),
    face: FaceId<I>,
    edge: usize,
}

/// Record, for every edge of every face, the face on the other side.
///
/// Edges are matched by their (unordered) endpoints. An edge with no match is
/// a border and gets no adjacent face. When more than two faces share an edge
/// (non-manifold), they are linked in a cycle: each points to the next one
/// sharing the edge and the last points back to the first.
pub fn update_per_face_adjacent_faces<I: MeshIndex>(mesh: &mut PolyMesh<I>) {
    let mut edges: Vec<FaceEdge<I>> = Vec::new();
    for (f, face) in mesh.faces() {
        let n = face.vertex_number();
        for e in 0..n {
            let a = face.vertex(e);
            let b = face.vertex((e + 1) % n);
            edges.push(FaceEdge {
                key: (a.min(b), a.max(b)),
                face: f,
                edge: e,
            });
        }
    }
    edges.sort_by_key(|fe| fe.key);

    let mut adj: Vec<Vec<FaceId<I>>> = mesh
        .faces()
        .map(|(_, face)| vec![FaceId::invalid(); face.vertex_number()])
        .collect();

    for cluster in edges.chunk_by(|a, b| a.key == b.key) {
        if cluster.len() < 2 {
            continue;
        }
        for (i, fe) in cluster.iter().enumerate() {
            let next = &cluster[(i + 1) % cluster.len()];
            adj[fe.face.index()][fe.edge] = next.face;
        }
    }

    mesh.face_adj_faces = Some(adj);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use nalgebra::Point3;

    fn pts(n: usize) -> Vec<Point3<f64>> {
        (0..n).map(|i| Point3::new(i as f64, (i * i) as f64, 0.0)).collect()
    }

    #[test]
    fn test_vertex_adjacency() {
        let mut mesh: PolyMesh = build_from_triangles(&pts(5), &[[0, 1, 2], [0, 2, 3]]).unwrap();
        update_per_vertex_adjacent_faces(&mut mesh);

        assert_eq!(mesh.vertex_adj_faces(VertexId::new(0)), &[FaceId::new(0), FaceId::new(1)]);
        assert_eq!(mesh.vertex_adj_faces(VertexId::new(1)), &[FaceId::new(0)]);
        assert!(mesh.vertex_adj_faces(VertexId::new(4)).is_empty());
        assert_eq!(mesh.vertex_adj_face(VertexId::new(4)), None);
    }

    #[test]
    fn test_face_adjacency_manifold() {
        let mut mesh: PolyMesh = build_from_triangles(&pts(4), &[[0, 1, 2], [2, 1, 3]]).unwrap();
        update_per_face_adjacent_faces(&mut mesh);

        let f0 = FaceId::new(0);
        let f1 = FaceId::new(1);
        // Shared edge (1, 2) is edge 1 of face 0 and edge 0 of face 1
        assert_eq!(mesh.face_adj_face(f0, 1), Some(f1));
        assert_eq!(mesh.face_adj_face(f1, 0), Some(f0));
        assert_eq!(mesh.face_adj_face(f0, 0), None);
        assert_eq!(mesh.face_adj_face(f0, 2), None);
        assert_eq!(mesh.face_adj_face(f1, 2), None);
        assert_eq!(mesh.index_of_adj_face(f1, f0), Some(0));
    }

    #[test]
    fn test_face_adjacency_non_manifold_cycle() {
        // Three triangles sharing the edge (0, 1)
        let mut mesh: PolyMesh =
            build_from_triangles(&pts(5), &[[0, 1, 2], [1, 0, 3], [0, 1, 4]]).unwrap();
        update_per_face_adjacent_faces(&mut mesh);

        let mut seen = Vec::new();
        let mut f = FaceId::new(0);
        for _ in 0..3 {
            seen.push(f);
            let e = mesh.face(f).index_of_edge(VertexId::new(0), VertexId::new(1)).unwrap();
            f = mesh.face_adj_face(f, e).unwrap();
        }
        assert_eq!(f, FaceId::new(0));
        seen.sort();
        assert_eq!(seen, vec![FaceId::new(0), FaceId::new(1), FaceId::new(2)]);
    }
}
