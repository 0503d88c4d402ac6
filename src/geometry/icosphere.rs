use std::collections::HashMap;

use glam::Vec3;

use super::{MeshData, Vertex};

/// Unit icosphere: an icosahedron whose faces are recursively split and the
/// new vertices pushed back onto the sphere. Normals equal positions; UVs
/// are an equirectangular projection.
pub fn icosphere(subdivisions: u32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut positions: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next_faces = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(&mut positions, &mut midpoints, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, c, a);
            next_faces.push([a, ab, ca]);
            next_faces.push([b, bc, ab]);
            next_faces.push([c, ca, bc]);
            next_faces.push([ab, bc, ca]);
        }
        faces = next_faces;
    }

    let vertices = positions
        .iter()
        .map(|p| Vertex {
            position: [p.x, p.y, p.z, 1.0],
            normal: [p.x, p.y, p.z, 0.0],
            uv: [
                0.5 + p.z.atan2(p.x) / (2.0 * std::f32::consts::PI),
                0.5 - p.y.asin() / std::f32::consts::PI,
            ],
        })
        .collect();

    MeshData {
        vertices,
        indices: faces.into_iter().flatten().collect(),
    }
}

/// Index of the sphere-projected midpoint of edge (a, b), deduplicated so
/// shared edges get a single vertex
fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&index) = cache.get(&key) {
        return index;
    }
    let mid = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
    let index = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, index);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdivision_counts() {
        // 10 * 4^n + 2 vertices, 20 * 4^n faces
        for (n, verts, faces) in [(0, 12, 20), (1, 42, 80), (2, 162, 320)] {
            let mesh = icosphere(n);
            assert_eq!(mesh.vertices.len(), verts);
            assert_eq!(mesh.indices.len(), faces * 3);
        }
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        for vertex in icosphere(2).vertices {
            let [x, y, z, w] = vertex.position;
            assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-5);
            assert_eq!(w, 1.0);
        }
    }

    #[test]
    fn test_normals_match_positions() {
        for vertex in icosphere(1).vertices {
            assert_eq!(&vertex.normal[..3], &vertex.position[..3]);
        }
    }

    #[test]
    fn test_uvs_in_range() {
        for vertex in icosphere(1).vertices {
            assert!((0.0..=1.0).contains(&vertex.uv[0]));
            assert!((0.0..=1.0).contains(&vertex.uv[1]));
        }
    }
}
