//! Entry point: load an OBJ mesh and show it spinning, solid or as a wireframe.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use corelib::color::{BLACK, parse_css_color};
use platform::WindowConfig;
use renderer::{RenderConfig, RenderMode};

/// View a triangulated OBJ mesh.
///
/// Press `W` to switch between solid and wireframe rendering, `Escape` to quit.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// OBJ file to display.
    mesh: PathBuf,

    /// Initial render mode: solid | wireframe.
    #[arg(long, default_value_t = RenderMode::Wireframe)]
    mode: RenderMode,

    /// GPU backend: auto | vulkan | dx12 | metal | gl.
    #[arg(long, value_name = "BACKEND", default_value = "auto", value_parser = parse_backend)]
    gpu_backend: wgpu::Backends,

    /// Initial window size, e.g. `800x800`.
    #[arg(long, value_name = "WxH", default_value = "800x800", value_parser = parse_size)]
    size: (u32, u32),

    /// Background color as `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    #[arg(long, value_name = "COLOR", default_value = "rgb(0, 0, 0)")]
    clear_color: String,

    /// Show frames per second in the window title.
    #[arg(long)]
    show_fps: bool,
}

fn parse_backend(val: &str) -> Result<wgpu::Backends, String> {
    match val.to_ascii_lowercase().as_str() {
        "auto" => Ok(wgpu::Backends::all()),
        "vulkan" | "vk" => Ok(wgpu::Backends::VULKAN),
        "dx12" | "d3d12" => Ok(wgpu::Backends::DX12),
        "metal" | "mtl" => Ok(wgpu::Backends::METAL),
        "gl" | "opengl" | "gles" => Ok(wgpu::Backends::GL),
        other => Err(format!("unknown backend '{other}'")),
    }
}

fn parse_size(val: &str) -> Result<(u32, u32), String> {
    let (w, h) = val
        .split_once('x')
        .or_else(|| val.split_once('X'))
        .ok_or_else(|| format!("expected WxH, got '{val}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    Ok((w.max(1), h.max(1)))
}

fn clear_color(css: &str) -> [f32; 4] {
    parse_css_color(css).unwrap_or_else(|| {
        log::warn!("Unrecognized clear color '{}', using black", css);
        BLACK
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!(
        "Starting teapot-viewer. Mesh: {}, mode={}, backend={:?}, show_fps={}, window_size={}x{}",
        args.mesh.display(),
        args.mode,
        args.gpu_backend,
        args.show_fps,
        args.size.0,
        args.size.1
    );

    // Load fully before any window or GPU work.
    let mesh = asset::load_obj_from_path(&args.mesh)?;
    log::info!(
        "Mesh loaded: {} vertices, {} triangles, {} edges",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.edge_count()
    );

    let window = WindowConfig {
        title: format!("Teapot - {}", args.mesh.display()),
        width: args.size.0,
        height: args.size.1,
        show_fps: args.show_fps,
    };
    let render = RenderConfig {
        backends: args.gpu_backend,
        mode: args.mode,
        clear_color: clear_color(&args.clear_color),
        ..Default::default()
    };

    platform::run(mesh, window, render)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
