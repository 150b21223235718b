//! Static cube geometry.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position, RGBA color, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Shader input slots, in location order.
    pub const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x4, // color
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// `f32` component count supplied at `location`, if the layout provides it.
    pub fn components_at(location: u32) -> Option<u32> {
        Self::ATTRS
            .iter()
            .find(|a| a.shader_location == location)
            .map(|a| (a.format.size() / 4) as u32)
    }
}

const fn v(pos: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Vertex {
    Vertex { pos, color, uv }
}

const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Four unique vertices per face, one flat color per face.
pub const VERTICES: [Vertex; 24] = [
    // -Z
    v([-1.0, -1.0, -1.0], MAGENTA, [0.0, 0.0]),
    v([1.0, 1.0, -1.0], MAGENTA, [1.0, 1.0]),
    v([1.0, -1.0, -1.0], MAGENTA, [1.0, 0.0]),
    v([-1.0, 1.0, -1.0], MAGENTA, [0.0, 1.0]),
    // +Z
    v([-1.0, -1.0, 1.0], RED, [0.0, 0.0]),
    v([1.0, 1.0, 1.0], RED, [1.0, 1.0]),
    v([1.0, -1.0, 1.0], RED, [1.0, 0.0]),
    v([-1.0, 1.0, 1.0], RED, [0.0, 1.0]),
    // -X
    v([-1.0, -1.0, -1.0], GREEN, [0.0, 0.0]),
    v([-1.0, 1.0, 1.0], GREEN, [1.0, 1.0]),
    v([-1.0, -1.0, 1.0], GREEN, [0.0, 1.0]),
    v([-1.0, 1.0, -1.0], GREEN, [1.0, 0.0]),
    // +X
    v([1.0, -1.0, -1.0], BLUE, [0.0, 0.0]),
    v([1.0, 1.0, 1.0], BLUE, [1.0, 1.0]),
    v([1.0, -1.0, 1.0], BLUE, [0.0, 1.0]),
    v([1.0, 1.0, -1.0], BLUE, [1.0, 0.0]),
    // -Y
    v([-1.0, -1.0, -1.0], YELLOW, [0.0, 0.0]),
    v([1.0, -1.0, 1.0], YELLOW, [1.0, 1.0]),
    v([-1.0, -1.0, 1.0], YELLOW, [0.0, 1.0]),
    v([1.0, -1.0, -1.0], YELLOW, [1.0, 0.0]),
    // +Y
    v([-1.0, 1.0, -1.0], CYAN, [0.0, 0.0]),
    v([1.0, 1.0, 1.0], CYAN, [1.0, 1.0]),
    v([-1.0, 1.0, 1.0], CYAN, [0.0, 1.0]),
    v([1.0, 1.0, -1.0], CYAN, [1.0, 0.0]),
];

/// Two triangles per face, counter-clockwise seen from outside.
pub const INDICES: [u32; 36] = [
    0, 1, 2, 0, 3, 1, //
    4, 6, 5, 4, 5, 7, //
    8, 10, 9, 8, 9, 11, //
    12, 13, 14, 12, 15, 13, //
    16, 17, 18, 16, 19, 17, //
    20, 22, 21, 20, 21, 23, //
];

pub const INDEX_COUNT: u32 = INDICES.len() as u32;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::collections::BTreeSet;

    fn pos(i: u32) -> Vec3 {
        Vec3::from(VERTICES[i as usize].pos)
    }

    fn triangles() -> impl Iterator<Item = [u32; 3]> {
        INDICES.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    #[test]
    fn indices_in_range() {
        assert!(INDICES.iter().all(|&i| (i as usize) < VERTICES.len()));
        assert_eq!(VERTICES.len(), 24);
    }

    #[test]
    fn twelve_triangles() {
        assert_eq!(INDICES.len() % 3, 0);
        assert_eq!(triangles().count(), 12);
        assert_eq!(INDEX_COUNT, 36);
    }

    #[test]
    fn each_face_is_one_quad_on_one_plane() {
        let mut normals = BTreeSet::new();

        for face in INDICES.chunks_exact(6) {
            let verts: BTreeSet<u32> = face.iter().copied().collect();
            assert_eq!(verts.len(), 4, "face {face:?} must cover exactly 4 vertices");

            // All four vertices share one coordinate fixed at +-1.
            let p: Vec<Vec3> = verts.iter().map(|&i| pos(i)).collect();
            let axis = (0..3)
                .find(|&a| p.iter().all(|q| q[a] == p[0][a]))
                .expect("face vertices are not coplanar on an axis plane");
            assert_eq!(p[0][axis].abs(), 1.0);

            let mut n = [0i8; 3];
            n[axis] = p[0][axis] as i8;
            normals.insert(n);
        }

        assert_eq!(normals.len(), 6, "every face direction appears once");
    }

    #[test]
    fn winding_is_outward_ccw() {
        for [a, b, c] in triangles() {
            let (pa, pb, pc) = (pos(a), pos(b), pos(c));
            let normal = (pb - pa).cross(pc - pa);
            let centroid = (pa + pb + pc) / 3.0;
            assert!(
                normal.dot(centroid) > 0.0,
                "triangle {a},{b},{c} faces inward"
            );
        }
    }

    #[test]
    fn layout_matches_vertex_record() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 36);
        assert_eq!(Vertex::components_at(0), Some(3));
        assert_eq!(Vertex::components_at(1), Some(4));
        assert_eq!(Vertex::components_at(2), Some(2));
        assert_eq!(Vertex::components_at(3), None);
        assert_eq!(Vertex::ATTRS[1].offset, 12);
        assert_eq!(Vertex::ATTRS[2].offset, 28);
    }
}
