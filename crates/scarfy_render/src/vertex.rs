#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    /// Corners of an axis-aligned screen-space quad, clockwise from top-left.
    ///
    /// `dest` is `[x, y, width, height]` in pixels; `uv` is `[u0, v0, u1, v1]`
    /// with `(u0, v0)` sampled at the top-left corner.
    pub fn quad(dest: [f32; 4], uv: [f32; 4], color: [f32; 4]) -> [SpriteVertex; 4] {
        let [x, y, w, h] = dest;
        let [u0, v0, u1, v1] = uv;
        [
            SpriteVertex {
                position: [x, y],
                tex_coords: [u0, v0],
                color,
            },
            SpriteVertex {
                position: [x + w, y],
                tex_coords: [u1, v0],
                color,
            },
            SpriteVertex {
                position: [x + w, y + h],
                tex_coords: [u1, v1],
                color,
            },
            SpriteVertex {
                position: [x, y + h],
                tex_coords: [u0, v1],
                color,
            },
        ]
    }
}

/// Two triangles covering the quad starting at `base`.
pub fn quad_indices(base: u32) -> [u32; 6] {
    [base, base + 1, base + 2, base, base + 2, base + 3]
}
