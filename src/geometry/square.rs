use super::{MeshData, Vertex};

/// Unit quad in the XY plane facing +Z, UVs spanning [0, 1].
pub fn square() -> MeshData {
    let vertices = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .into_iter()
        .map(|(u, v): (f32, f32)| Vertex {
            position: [u * 2.0 - 1.0, v * 2.0 - 1.0, 0.0, 1.0],
            normal: [0.0, 0.0, 1.0, 0.0],
            uv: [u, v],
        })
        .collect();

    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_is_two_triangles() {
        let mesh = square();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_square_planar_facing_z() {
        for vertex in square().vertices {
            assert_eq!(vertex.position[2], 0.0);
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0, 0.0]);
        }
    }
}
