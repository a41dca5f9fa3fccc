use nalgebra_glm::{self as glm, Vec3};

/// Interleaved vertex as uploaded to the GL array buffer: position, normal, uv
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoxVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl BoxVertex {
    /// Floats per vertex in the interleaved buffer
    pub const STRIDE: usize = size_of::<BoxVertex>() / size_of::<f32>();
}

// Local frame: +X towards the viewer, +Y to the right, +Z up.
// Top ring first, counter-clockwise from the first octant, then the bottom ring.
const CORNER_SIGNS: [[f32; 3]; 8] = [
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
];

// Each face as a b c a c d, looking at it from outside:
//
//   b----a
//   |  / |
//   | /  |
//   c----d
const FACE_INDICES: [[usize; 6]; 6] = [
    [0, 3, 7, 0, 7, 4], // +X
    [1, 0, 4, 1, 4, 5], // +Y
    [2, 1, 5, 2, 5, 6], // -X
    [3, 2, 6, 3, 6, 7], // -Y
    [1, 2, 3, 1, 3, 0], // +Z
    [4, 7, 6, 4, 6, 5], // -Z
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const FACE_UVS: [[f32; 2]; 6] = [
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
];

/// Axis-aligned textured box, drawn as 36 non-indexed triangle vertices.
///
/// Library API for a GL host: upload [`BoxMesh::vertex_bytes`] into an array
/// buffer and draw it with the matrices from a
/// [`FrameReport`](crate::driver::FrameReport). The replay binary has no
/// renderer and does not build one.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxMesh {
    center: Vec3,
    /// Half-lengths along X, Y and Z
    extension: Vec3,
}

impl BoxMesh {
    pub const VERTEX_COUNT: usize = 36;

    pub fn new(center: Vec3, extension: Vec3) -> Self {
        Self { center, extension }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn extension(&self) -> Vec3 {
        self.extension
    }

    pub fn corner_points(&self) -> [Vec3; 8] {
        CORNER_SIGNS.map(|[x, y, z]| {
            self.center + glm::vec3(x, y, z).component_mul(&self.extension)
        })
    }

    pub fn vertices(&self) -> Vec<BoxVertex> {
        let corners = self.corner_points();
        let mut vertices = Vec::with_capacity(Self::VERTEX_COUNT);

        for (face, indices) in FACE_INDICES.iter().enumerate() {
            for (corner, &index) in indices.iter().enumerate() {
                let p = corners[index];
                vertices.push(BoxVertex {
                    position: [p.x, p.y, p.z],
                    normal: FACE_NORMALS[face],
                    uv: FACE_UVS[corner],
                });
            }
        }

        vertices
    }

    /// Raw bytes ready for a `STATIC_DRAW` array buffer upload
    pub fn vertex_bytes(vertices: &[BoxVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

impl Default for BoxMesh {
    fn default() -> Self {
        Self::new(Vec3::zeros(), glm::vec3(1.0, 1.0, 1.0))
    }
}
