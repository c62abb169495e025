use glam::Vec3;

/// The plane in eye space the canvas is projected onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Distance from the eye to the viewport along +z.
    pub distance: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            distance: 1.0,
        }
    }
}

/// Map a centered canvas pixel to the eye-space direction through the
/// matching viewport point. The result is not normalized.
///
/// Panics if either canvas dimension is odd or zero.
pub fn canvas_to_viewport(
    x: i32,
    y: i32,
    canvas_width: u32,
    canvas_height: u32,
    viewport: &Viewport,
) -> Vec3 {
    assert!(
        canvas_width > 0 && canvas_width % 2 == 0,
        "canvas width must be a positive even number, got {canvas_width}"
    );
    assert!(
        canvas_height > 0 && canvas_height % 2 == 0,
        "canvas height must be a positive even number, got {canvas_height}"
    );

    Vec3::new(
        x as f32 / canvas_width as f32 * viewport.width,
        y as f32 / canvas_height as f32 * viewport.height,
        viewport.distance,
    )
}
