//! Entry point for meshview.
//! Loads an OBJ model, prepares a GPU-ready triangle list and reports the
//! initial view.

mod config;

use anyhow::{Context, Result};
use asset::{GpuVertex, RenderMesh};
use corelib::{
    Vec3,
    camera::Camera,
    input::DragState,
    transform::ModelTransform,
    vec2,
};

use crate::config::ViewerConfig;

fn report(mesh: &RenderMesh) {
    match mesh.bounds() {
        Some(aabb) => log::info!(
            "Bounds: min={:?} max={:?} center={:?} extent={:?}",
            aabb.min,
            aabb.max,
            aabb.center(),
            aabb.extent()
        ),
        None => log::info!("Bounds: <empty mesh>"),
    }

    let gpu: Vec<GpuVertex> = mesh.to_gpu_vertices();
    let bytes: &[u8] = bytemuck::cast_slice(&gpu);
    log::info!(
        "Vertex buffer: {} vertices, {} bytes ({} byte stride)",
        gpu.len(),
        bytes.len(),
        std::mem::size_of::<GpuVertex>()
    );
}

/// Replay the configured drag and wheel input onto a fresh model transform,
/// the same way live pointer events would be applied.
fn initial_pose(cfg: &ViewerConfig, camera: &Camera) -> ModelTransform {
    let mut model = ModelTransform::identity();

    let mut drag = DragState::new();
    drag.press(vec2(0.0, 0.0));
    if let Some(delta) = drag.motion(vec2(cfg.turn.0, cfg.turn.1)) {
        model.orbit(delta, cfg.rotation_factor, camera.right());
    }
    drag.release();

    model.zoom_notches(cfg.scroll, cfg.zoom_factor);
    model
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = ViewerConfig::from_env();
    log::info!(
        "Starting meshview. model={}, window_size={}x{}, fov={}",
        cfg.model.display(),
        cfg.width,
        cfg.height,
        cfg.fov_deg
    );

    let mesh = asset::load_mesh(&cfg.model)
        .with_context(|| format!("Failed to load model {}", cfg.model.display()))?;
    report(&mesh);

    let camera = Camera::viewer(cfg.fov_deg, cfg.aspect(), cfg.z_near, cfg.z_far);
    let model = initial_pose(&cfg, &camera);
    log::info!("Model scale={:.3} orientation={:?}", model.scale, model.orientation);
    let mvp = camera.proj_view() * model.matrix();
    let origin = mvp.project_point3(Vec3::ZERO);
    log::info!(
        "Camera eye={:?} right={:?}; origin projects to {:?}",
        camera.eye,
        camera.right(),
        origin
    );

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
