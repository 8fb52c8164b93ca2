// UV sphere geometry shared by every body

use std::f32::consts::PI;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Unit sphere, y-up, with counter-clockwise winding seen from outside.
    ///
    /// `rings` and `sectors` count vertices, so both must be at least 2.
    pub fn new(rings: u32, sectors: u32) -> Self {
        let rings = rings.max(2);
        let sectors = sectors.max(2);
        let ring_step = 1.0 / (rings - 1) as f32;
        let sector_step = 1.0 / (sectors - 1) as f32;

        let mut vertices = Vec::with_capacity((rings * sectors) as usize);
        for r in 0..rings {
            for s in 0..sectors {
                let phi = PI * r as f32 * ring_step;
                let theta = 2.0 * PI * s as f32 * sector_step;
                let y = (-PI / 2.0 + phi).sin();
                let x = theta.cos() * phi.sin();
                let z = theta.sin() * phi.sin();
                vertices.push(Vertex {
                    position: [x, y, z],
                    normal: [x, y, z],
                    // u runs backwards so the texture is not mirrored
                    uv: [1.0 - s as f32 * sector_step, r as f32 * ring_step],
                });
            }
        }

        let mut indices = Vec::with_capacity(((rings - 1) * (sectors - 1) * 6) as usize);
        for r in 0..rings - 1 {
            for s in 0..sectors - 1 {
                let here = r * sectors + s;
                let next_ring = (r + 1) * sectors + s;
                indices.extend_from_slice(&[here, next_ring + 1, here + 1]);
                indices.extend_from_slice(&[here, next_ring, next_ring + 1]);
            }
        }

        Self { vertices, indices }
    }
}

/// Corners of the unit cube the sky is drawn on, position only.
pub struct SkyboxCube;

impl SkyboxCube {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub const VERTICES: [[f32; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];

    // Wound counter-clockwise as seen from inside the cube.
    pub const INDICES: [u16; 36] = [
        0, 1, 2, 2, 3, 0, // -Z
        4, 7, 6, 6, 5, 4, // +Z
        0, 3, 7, 7, 4, 0, // -X
        1, 5, 6, 6, 2, 1, // +X
        3, 2, 6, 6, 7, 3, // +Y
        0, 4, 5, 5, 1, 0, // -Y
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn counts_match_resolution() {
        let mesh = SphereMesh::new(8, 16);
        assert_eq!(mesh.vertices.len(), 8 * 16);
        assert_eq!(mesh.indices.len(), 7 * 15 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        let mesh = SphereMesh::new(12, 12);
        for vertex in &mesh.vertices {
            let length = Vec3::from_array(vertex.position).length();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = SphereMesh::new(16, 16);
        for triangle in mesh.indices.chunks(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let normal = (b - a).cross(c - a);
            // Pole triangles collapse to zero area.
            if normal.length_squared() < 1e-10 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn skybox_faces_point_inward() {
        for triangle in SkyboxCube::INDICES.chunks(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                .map(|i| Vec3::from_array(SkyboxCube::VERTICES[i as usize]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) < 0.0);
        }
    }
}
