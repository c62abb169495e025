use tiny_tracer_lib::{
    application::Application,
    config::CanvasConfig,
    display::{CanvasLayer, CanvasSetup, RayTracer},
    logger::init_tracing,
    raytracer::Shading,
    scene::Scene,
};
use winit::dpi::PhysicalSize;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let canvas = CanvasConfig::from_env(CanvasConfig::default())?;
    let size = PhysicalSize::new(canvas.width, canvas.height);
    let scene = Scene::lit();
    tracing::info!(
        "tracing {} spheres under {} lights",
        scene.spheres.len(),
        scene.lights.len()
    );
    let painter = RayTracer {
        scene,
        shading: Shading::Lit,
    };
    pollster::block_on(Application::<CanvasLayer<RayTracer>>::init(
        "Ray tracer",
        size,
        CanvasSetup { painter, canvas },
    ))?;
    Ok(())
}
