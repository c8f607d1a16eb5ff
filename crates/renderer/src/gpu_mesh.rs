//! GPU buffers for a loaded mesh.

use asset::MeshData;
use wgpu::{
    Buffer, BufferUsages, Device, IndexFormat, RenderPass, VertexBufferLayout, VertexStepMode,
    util::DeviceExt,
};

use crate::{error::RenderError, mode::RenderMode};

/// Slot 0: tightly packed `vec3<f32>` positions.
pub const POSITION_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: 3 * std::mem::size_of::<f32>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
};

/// Slot 1: tightly packed `vec3<f32>` normals.
pub const NORMAL_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: 3 * std::mem::size_of::<f32>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![1 => Float32x3],
};

/// Immutable vertex/index buffers uploaded once from [`MeshData`].
pub struct GpuMesh {
    positions: Buffer,
    normals: Buffer,
    triangles: Buffer,
    triangle_index_count: u32,
    lines: Buffer,
    line_index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &Device, mesh: &MeshData) -> Result<Self, RenderError> {
        if !mesh.is_valid() {
            return Err(RenderError::InvalidMesh);
        }
        let triangle_index_count =
            u32::try_from(mesh.indices.len()).map_err(|_| RenderError::TooManyIndices)?;
        let line_index_count =
            u32::try_from(mesh.wireframe_indices.len()).map_err(|_| RenderError::TooManyIndices)?;

        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh positions"),
            contents: bytemuck::cast_slice(&mesh.positions),
            usage: BufferUsages::VERTEX,
        });
        let normals = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh normals"),
            contents: bytemuck::cast_slice(&mesh.normals),
            usage: BufferUsages::VERTEX,
        });
        let triangles = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh triangle IB"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: BufferUsages::INDEX,
        });
        // Never empty for a valid mesh: every triangle contributes edges.
        let lines = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh wireframe IB"),
            contents: bytemuck::cast_slice(&mesh.wireframe_indices),
            usage: BufferUsages::INDEX,
        });

        log::info!(
            "Uploaded mesh: {} vertices, {} triangles, {} edges",
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.edge_count()
        );

        Ok(Self {
            positions,
            normals,
            triangles,
            triangle_index_count,
            lines,
            line_index_count,
        })
    }

    /// Bind buffers and issue the draw for `mode`. Pipeline must already be set.
    pub fn draw(&self, rpass: &mut RenderPass<'_>, mode: RenderMode) {
        rpass.set_vertex_buffer(0, self.positions.slice(..));
        rpass.set_vertex_buffer(1, self.normals.slice(..));
        let (index_buf, count) = match mode {
            RenderMode::Solid => (&self.triangles, self.triangle_index_count),
            RenderMode::Wireframe => (&self.lines, self.line_index_count),
        };
        rpass.set_index_buffer(index_buf.slice(..), IndexFormat::Uint32);
        rpass.draw_indexed(0..count, 0, 0..1);
    }
}
