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
    let painter = RayTracer {
        scene: Scene::basic(),
        shading: Shading::Flat,
    };
    pollster::block_on(Application::<CanvasLayer<RayTracer>>::init(
        "Basic ray tracer",
        size,
        CanvasSetup { painter, canvas },
    ))?;
    Ok(())
}
