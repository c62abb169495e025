use std::{path::Path, time::Instant};

use glam::Vec3;
use image::{ImageFormat, ImageResult, Rgba, RgbaImage};

use crate::{
    config::CanvasConfig,
    raytracer::{trace_ray_with, Shading},
    scene::Scene,
    viewport::canvas_to_viewport,
};

const BYTES_PER_PIXEL: usize = 4;

/// Pack a color in `[0, 1]` into an RGBA8888 word (`r` in the high byte),
/// rounding each channel to nearest. Alpha is always opaque.
pub fn pack_rgba(color: Vec3) -> u32 {
    let channel = |c: f32| (c * 255.0 + 0.5).floor() as u8 as u32;
    (channel(color.x) << 24) | (channel(color.y) << 16) | (channel(color.z) << 8) | 0xff
}

/// Write `color` at centered coordinates `(x, y)`, `y` pointing up, into a
/// top-down row-major buffer whose rows are `pitch` bytes apart.
///
/// Panics if the pixel falls outside the `width` x `height` canvas, or if
/// `pitch` and `pixels` cannot hold such a canvas.
pub fn put_pixel(
    pixels: &mut [u32],
    pitch: usize,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    color: Vec3,
) {
    assert!(
        pitch % BYTES_PER_PIXEL == 0 && pitch >= width as usize * BYTES_PER_PIXEL,
        "pitch {pitch} cannot hold rows of {width} pixels"
    );
    assert!(
        pixels.len() >= pitch / BYTES_PER_PIXEL * height as usize,
        "{} words cannot hold {height} rows of {pitch} bytes",
        pixels.len()
    );

    let fx = x + (width / 2) as i32;
    let fy = (height / 2) as i32 - 1 - y;
    assert!(
        (0..width as i32).contains(&fx) && (0..height as i32).contains(&fy),
        "pixel ({x}, {y}) is outside the {width}x{height} canvas"
    );

    let row = fy as usize * (pitch / BYTES_PER_PIXEL);
    pixels[row + fx as usize] = pack_rgba(color);
}

/// Caller-owned frame of packed RGBA8888 words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    pitch: usize,
}

impl PixelBuffer {
    /// Tightly packed buffer, filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_pitch(width, height, width as usize * BYTES_PER_PIXEL)
    }

    /// Buffer whose rows are `pitch` bytes apart, as handed out by a locked
    /// streaming texture.
    pub fn with_pitch(width: u32, height: u32, pitch: usize) -> Self {
        assert!(width > 0 && height > 0, "canvas must not be empty");
        assert!(
            pitch % BYTES_PER_PIXEL == 0 && pitch >= width as usize * BYTES_PER_PIXEL,
            "pitch {pitch} cannot hold rows of {width} pixels"
        );
        Self {
            pixels: vec![0; pitch / BYTES_PER_PIXEL * height as usize],
            width,
            height,
            pitch,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed word at buffer coordinates, `(0, 0)` being the top-left corner.
    pub fn get(&self, fx: u32, fy: u32) -> u32 {
        self.pixels[self.index(fx, fy)]
    }

    /// Store a packed word at buffer coordinates.
    pub fn set(&mut self, fx: u32, fy: u32, word: u32) {
        let index = self.index(fx, fy);
        self.pixels[index] = word;
    }

    /// See [`put_pixel`].
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Vec3) {
        put_pixel(
            &mut self.pixels,
            self.pitch,
            self.width,
            self.height,
            x,
            y,
            color,
        );
    }

    /// Copy into an `image` buffer, unpacking each word as R, G, B, A bytes.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |fx, fy| {
            Rgba(self.get(fx, fy).to_be_bytes())
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        let path = path.as_ref();
        self.to_rgba_image().save_with_format(path, ImageFormat::Png)?;
        tracing::info!("saved {}x{} canvas to {}", self.width, self.height, path.display());
        Ok(())
    }

    fn index(&self, fx: u32, fy: u32) -> usize {
        assert!(
            fx < self.width && fy < self.height,
            "buffer position ({fx}, {fy}) is outside the {}x{} canvas",
            self.width,
            self.height
        );
        fy as usize * (self.pitch / BYTES_PER_PIXEL) + fx as usize
    }
}

/// Trace one ray per pixel over `[-w/2, w/2) x [-h/2, h/2)` and fill `buffer`.
///
/// Panics if the buffer size differs from the configured canvas or the
/// canvas dimensions are odd.
pub fn render(scene: &Scene, config: &CanvasConfig, shading: Shading, buffer: &mut PixelBuffer) {
    assert_eq!(
        (buffer.width(), buffer.height()),
        (config.width, config.height),
        "pixel buffer does not match the configured canvas"
    );

    let start = Instant::now();
    let half_width = (config.width / 2) as i32;
    let half_height = (config.height / 2) as i32;

    for y in -half_height..half_height {
        for x in -half_width..half_width {
            let direction = canvas_to_viewport(x, y, config.width, config.height, &config.viewport);
            let color = trace_ray_with(
                scene,
                config.eye,
                direction,
                config.t_min,
                config.t_max,
                shading,
            );
            buffer.put_pixel(x, y, color);
        }
    }

    tracing::debug!(
        "traced {}x{} canvas against {} spheres in {:?}",
        config.width,
        config.height,
        scene.spheres.len(),
        start.elapsed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgba() {
        assert_eq!(pack_rgba(Vec3::new(1.0, 0.0, 0.0)), 0xff0000ff);
        assert_eq!(pack_rgba(Vec3::ONE), 0xffffffff);
        assert_eq!(pack_rgba(Vec3::ZERO), 0x000000ff);
        // 0.5 * 255 + 0.5 = 128.0
        assert_eq!(pack_rgba(Vec3::new(0.0, 0.5, 0.0)), 0x00800000 | 0xff);
    }

    #[test]
    fn test_put_pixel_flips_vertical_axis() {
        let mut buffer = PixelBuffer::new(800, 800);
        buffer.put_pixel(0, 0, Vec3::X);
        assert_eq!(buffer.get(400, 399), 0xff0000ff);

        buffer.put_pixel(-400, 399, Vec3::Y);
        assert_eq!(buffer.get(0, 0), 0x00ff00ff);

        buffer.put_pixel(399, -400, Vec3::Z);
        assert_eq!(buffer.get(799, 799), 0x0000ffff);
    }

    #[test]
    fn test_put_pixel_honours_pitch() {
        // 2x2 canvas with one word of row padding.
        let mut pixels = vec![0u32; 6];
        put_pixel(&mut pixels, 12, 2, 2, -1, -1, Vec3::ONE);
        assert_eq!(pixels, vec![0, 0, 0, 0xffffffff, 0, 0]);

        let mut buffer = PixelBuffer::with_pitch(2, 2, 12);
        assert_eq!(buffer.pitch(), 12);
        buffer.put_pixel(0, 0, Vec3::ONE);
        assert_eq!(buffer.as_slice(), &[0, 0xffffffff, 0, 0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "is outside the 4x4 canvas")]
    fn test_put_pixel_out_of_bounds_panics() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.put_pixel(2, 0, Vec3::ONE);
    }

    #[test]
    #[should_panic(expected = "pitch 10 cannot hold rows of 2 pixels")]
    fn test_put_pixel_rejects_unaligned_pitch() {
        let mut pixels = vec![0u32; 8];
        put_pixel(&mut pixels, 10, 2, 2, 0, 0, Vec3::ONE);
    }

    #[test]
    #[should_panic(expected = "3 words cannot hold 2 rows of 8 bytes")]
    fn test_put_pixel_rejects_short_slice() {
        let mut pixels = vec![0u32; 3];
        put_pixel(&mut pixels, 8, 2, 2, 0, -1, Vec3::ONE);
    }

    #[test]
    fn test_rgba_image_skips_padding() {
        let mut buffer = PixelBuffer::with_pitch(2, 1, 16);
        buffer.set(0, 0, 0x11223344);
        buffer.set(1, 0, 0xaabbccdd);
        let img = buffer.to_rgba_image();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.as_raw(), &vec![0x11, 0x22, 0x33, 0x44, 0xaa, 0xbb, 0xcc, 0xdd]);
    }

    #[test]
    fn test_render_fills_every_pixel() {
        let config = CanvasConfig::new(8, 6);
        let mut buffer = PixelBuffer::new(8, 6);
        render(&Scene::default(), &config, Shading::Lit, &mut buffer);
        assert!(buffer.as_slice().iter().all(|&word| word == 0xffffffff));
    }
}
