use crate::canvas::PixelBuffer;

/// Green ramps left to right and blue top to bottom, both wrapping every
/// 256 pixels. Red stays at zero.
pub fn fill_gradient(buffer: &mut PixelBuffer) {
    for fy in 0..buffer.height() {
        for fx in 0..buffer.width() {
            let g = fx as u8 as u32;
            let b = fy as u8 as u32;
            buffer.set(fx, fy, (g << 16) | (b << 8) | 0xff);
        }
    }
}
