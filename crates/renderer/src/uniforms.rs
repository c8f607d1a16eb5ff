use bytemuck::{Pod, Zeroable};
use corelib::{Mat4, light::Lighting, transform::normal_matrix};

/// Per-frame scene UBO. Matches `Scene` in `mesh.wgsl` (16-byte aligned,
/// `mat3x3` columns padded to `vec4`).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    pub mvp: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    pub object_color: [f32; 4],
    pub ambient_color: [f32; 4],
}

impl SceneUniform {
    pub fn new(model: Mat4, proj_view: Mat4, lighting: &Lighting) -> Self {
        let n = normal_matrix(model);
        Self {
            mvp: (proj_view * model).to_cols_array_2d(),
            normal_matrix: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
            light_dir: lighting.direction.extend(0.0).to_array(),
            light_color: lighting.color.extend(1.0).to_array(),
            object_color: lighting.object_color.extend(1.0).to_array(),
            ambient_color: lighting.ambient.extend(1.0).to_array(),
        }
    }
}
