//! Renderer: wgpu setup, mesh upload and per-frame draw (solid or wireframe).
//! wgpu = 26.x, winit = 0.30.x

pub mod error;
pub mod gpu_mesh;
pub mod mode;
pub mod uniforms;
pub mod viewport;

use std::num::NonZeroU64;
use std::sync::Arc;

use asset::MeshData;
use corelib::{camera::Camera, light::Lighting, transform::Turntable};
use wgpu::{
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoderDescriptor, DepthBiasState, DepthStencilState, Device, DeviceDescriptor,
    Extent3d, Features, FragmentState, Instance, InstanceDescriptor, Limits, LoadOp, Operations,
    PipelineLayout, PipelineLayoutDescriptor, PowerPreference, PresentMode, PrimitiveTopology,
    Queue, RenderPassColorAttachment, RenderPassDescriptor, RenderPipeline,
    RenderPipelineDescriptor, ShaderModule, ShaderModuleDescriptor, ShaderSource, ShaderStages,
    StoreOp, Surface, SurfaceConfiguration, SurfaceError, TextureDescriptor, TextureDimension,
    TextureFormat, TextureUsages, TextureView, TextureViewDescriptor, VertexState,
    util::DeviceExt,
};
use winit::{dpi::PhysicalSize, window::Window};

pub use error::RenderError;
pub use gpu_mesh::GpuMesh;
pub use mode::RenderMode;
pub use uniforms::SceneUniform;
pub use viewport::{Viewport, fit_viewport};

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Startup options for [`RenderContext`].
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub backends: wgpu::Backends,
    pub mode: RenderMode,
    /// Straight (non-premultiplied) sRGB clear color.
    pub clear_color: [f32; 4],
    /// Aspect ratio of the drawn region; the rest of the surface is cleared only.
    pub target_aspect: f32,
    pub camera: Camera,
    pub turntable: Turntable,
    pub lighting: Lighting,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            mode: RenderMode::default(),
            clear_color: corelib::color::BLACK,
            target_aspect: 1.0,
            camera: Camera::default(),
            turntable: Turntable::default(),
            lighting: Lighting::default(),
        }
    }
}

/// Everything needed to draw a frame: GPU handles, pipelines, the uploaded mesh
/// and the scene parameters. Owned by the platform loop.
pub struct RenderContext {
    // Surface
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,

    // Device/queue
    device: Device,
    queue: Queue,

    // Pipelines & geometry
    solid_pipeline: RenderPipeline,
    wireframe_pipeline: RenderPipeline,
    mesh: GpuMesh,

    // Scene UBO
    scene_buf: Buffer,
    scene_bg: BindGroup,

    // Depth
    depth_view: TextureView,

    // Scene
    mode: RenderMode,
    clear_color: wgpu::Color,
    target_aspect: f32,
    camera: Camera,
    turntable: Turntable,
    lighting: Lighting,

    // Size cache
    width: u32,
    height: u32,
}

impl RenderContext {
    /// Create the GPU context for `window` and upload `mesh`.
    pub async fn new(
        window: Arc<Window>,
        mesh: &MeshData,
        config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        // Instance & surface
        let instance = Instance::new(&InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Teapot Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await?;

        // Surface format (prefer sRGB)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderError::UnsupportedSurface)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!("Surface configured: {:?} {}x{}", surface_format, width, height);

        let depth_view = create_depth_view(&device, &surface_config);

        // ==== Shader ====
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Mesh WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        // ==== Scene BGL/BG ====
        let scene_bgl = create_scene_bgl(&device);
        let scene_init = SceneUniform::new(
            config.turntable.matrix(0.0),
            config.camera.proj_view(),
            &config.lighting,
        );
        let scene_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene UBO"),
            contents: bytemuck::bytes_of(&scene_init),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let scene_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene BG"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buf.as_entire_binding(),
            }],
        });

        // ==== Pipelines ====
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Mesh PipelineLayout"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let solid_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_format,
            PrimitiveTopology::TriangleList,
        );
        let wireframe_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_format,
            PrimitiveTopology::LineList,
        );

        // ==== Geometry ====
        let mesh = GpuMesh::upload(&device, mesh)?;

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            solid_pipeline,
            wireframe_pipeline,
            mesh,
            scene_buf,
            scene_bg,
            depth_view,
            mode: config.mode,
            clear_color: clear_color(config.clear_color, surface_format.is_srgb()),
            target_aspect: config.target_aspect,
            camera: config.camera.with_aspect(config.target_aspect),
            turntable: config.turntable,
            lighting: config.lighting,
            width,
            height,
        })
    }

    /// Resize: reconfigure surface & recreate depth view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.surface_config.width = self.width;
        self.surface_config.height = self.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if mode != self.mode {
            log::info!("Render mode: {}", mode);
        }
        self.mode = mode;
    }

    /// Render one frame with the model posed at `time_secs`.
    pub fn render(&mut self, time_secs: f32) -> Result<(), SurfaceError> {
        // --- update scene UBO
        let scene = SceneUniform::new(
            self.turntable.matrix(time_secs),
            self.camera.proj_view(),
            &self.lighting,
        );
        self.queue
            .write_buffer(&self.scene_buf, 0, bytemuck::bytes_of(&scene));

        // --- frame & pass
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("MainEncoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("MainPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let vp = fit_viewport(self.width, self.height, self.target_aspect);
            rpass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);

            let pipeline = match self.mode {
                RenderMode::Solid => &self.solid_pipeline,
                RenderMode::Wireframe => &self.wireframe_pipeline,
            };
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            self.mesh.draw(&mut rpass, self.mode);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn is_surface_lost(err: &SurfaceError) -> bool {
        matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
    }

    pub fn recreate_surface(&mut self) {
        self.resize(self.width, self.height);
    }
}

fn create_scene_bgl(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Scene BGL"),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::VERTEX_FRAGMENT,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(std::mem::size_of::<SceneUniform>() as u64),
            },
            count: None,
        }],
    })
}

/// Solid and wireframe pipelines differ only in topology.
fn create_mesh_pipeline(
    device: &Device,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    format: TextureFormat,
    topology: PrimitiveTopology,
) -> RenderPipeline {
    let label = match topology {
        PrimitiveTopology::LineList => "Wireframe Pipeline",
        _ => "Solid Pipeline",
    };
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[gpu_mesh::POSITION_LAYOUT, gpu_mesh::NORMAL_LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("DepthTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}

/// Clear color for the surface; sRGB surfaces expect linear values.
fn clear_color([r, g, b, a]: [f32; 4], srgb_surface: bool) -> wgpu::Color {
    let channel = |c: f32| {
        let c = c as f64;
        if !srgb_surface {
            c
        } else if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    wgpu::Color {
        r: channel(r),
        g: channel(g),
        b: channel(b),
        a: a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_linearizes_for_srgb() {
        let c = clear_color([1.0, 0.0, 0.5, 0.25], true);
        assert!((c.r - 1.0).abs() < 1e-9);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.214).abs() < 1e-3);
        assert_eq!(c.a, 0.25);
    }

    #[test]
    fn clear_color_passes_through_for_linear() {
        let c = clear_color([0.5, 0.5, 0.5, 1.0], false);
        assert_eq!(c.r, 0.5);
    }

    #[test]
    fn default_config_matches_viewer() {
        let config = RenderConfig::default();
        assert_eq!(config.mode, RenderMode::Wireframe);
        assert_eq!(config.target_aspect, 1.0);
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }
}
