/// Mesh vertex as laid out in the GPU vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-frame scene data for the mesh shader
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, padded to a mat4
    pub normal_matrix: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub ambient_intensity: f32,
    pub sky_color: [f32; 3],
    pub key_intensity: f32,
    pub ground_color: [f32; 3],
    pub fill_intensity: f32,
    pub key_direction: [f32; 3],
    pub shininess: f32,
    pub key_color: [f32; 3],
    pub _pad1: f32,
    pub fill_direction: [f32; 3],
    pub _pad2: f32,
    pub fill_color: [f32; 3],
    pub _pad3: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride_matches_attributes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 40);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn test_scene_uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
    }
}
