use super::{MeshData, Vertex};

/// Unit-radius cube centered at the origin, 4 vertices per face so each
/// face carries its own normal and a full [0, 1] UV tile.
pub fn cube() -> MeshData {
    // (normal, tangent, bitangent) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, tangent, bitangent) in FACES {
        let base = vertices.len() as u32;
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let position = [
                normal[0] + (u * 2.0 - 1.0) * tangent[0] + (v * 2.0 - 1.0) * bitangent[0],
                normal[1] + (u * 2.0 - 1.0) * tangent[1] + (v * 2.0 - 1.0) * bitangent[1],
                normal[2] + (u * 2.0 - 1.0) * tangent[2] + (v * 2.0 - 1.0) * bitangent[2],
                1.0,
            ];
            vertices.push(Vertex {
                position,
                normal: [normal[0], normal[1], normal[2], 0.0],
                uv: [u, v],
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let mesh = cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn test_cube_corners_at_unit_extent() {
        for vertex in cube().vertices {
            for coord in &vertex.position[..3] {
                assert!((coord.abs() - 1.0).abs() < 1e-6);
            }
            assert_eq!(vertex.position[3], 1.0);
        }
    }

    #[test]
    fn test_cube_normals_unit_and_axis_aligned() {
        for vertex in cube().vertices {
            let n = vertex.normal;
            let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((length - 1.0).abs() < 1e-6);
            assert_eq!(n[3], 0.0);
            // Exactly one non-zero component
            let nonzero = n[..3].iter().filter(|c| c.abs() > 1e-6).count();
            assert_eq!(nonzero, 1);
        }
    }

    #[test]
    fn test_cube_uvs_cover_unit_square() {
        let mesh = cube();
        for vertex in &mesh.vertices {
            assert!((0.0..=1.0).contains(&vertex.uv[0]));
            assert!((0.0..=1.0).contains(&vertex.uv[1]));
        }
    }
}
