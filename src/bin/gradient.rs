use tiny_tracer_lib::{
    application::Application,
    config::{CanvasConfig, GRADIENT_HEIGHT, GRADIENT_WIDTH},
    display::{CanvasLayer, CanvasSetup, Gradient},
    logger::init_tracing,
};
use winit::dpi::PhysicalSize;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let canvas = CanvasConfig::from_env(CanvasConfig::new(GRADIENT_WIDTH, GRADIENT_HEIGHT))?;
    let size = PhysicalSize::new(canvas.width, canvas.height);
    pollster::block_on(Application::<CanvasLayer<Gradient>>::init(
        "Gradient",
        size,
        CanvasSetup {
            painter: Gradient,
            canvas,
        },
    ))?;
    Ok(())
}
