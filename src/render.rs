// render.rs - Rasterize the height field into an RGBA buffer
//
// Output is viewport-sized, 4 bytes per pixel, ready for putImageData.
// Pixels mapping outside the sampleable interior are fully transparent.
//
// Palette (interpolated height h):
//   h < -20  highlight (glyph depression)
//   h < -5   trough
//   h <  5   rest
//   h < 20   swell
//   else     black
// Crests above 8 are brightened; depths below -15 lose some alpha.

use crate::sim::HeightField;
use crate::view::Viewport;

const HIGHLIGHT: [u8; 3] = [45, 212, 191];
const TROUGH: [u8; 3] = [17, 94, 89];
const REST: [u8; 3] = [15, 118, 110];
const SWELL: [u8; 3] = [19, 78, 74];
const PEAK: [u8; 3] = [0, 0, 0];

const CREST: f32 = 8.0;
const CREST_LIFT: [u8; 3] = [20, 20, 30];

const MASK_ALPHA_BELOW: f32 = -15.0;
const MASK_ALPHA: u8 = 220;

/// Byte length of a w x h RGBA buffer, computed in usize
#[inline]
fn rgba_len(w: u32, h: u32) -> usize {
    w as usize * h as usize * 4
}

pub struct Rasterizer {
    out: Vec<u8>,
    w: u32,
    h: u32,
}

impl Rasterizer {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            out: vec![0; rgba_len(w, h)],
            w,
            h,
        }
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.out.resize(rgba_len(w, h), 0);
    }

    pub fn ptr(&self) -> *const u8 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.out
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.w as usize + x as usize) * 4;
        [self.out[i], self.out[i + 1], self.out[i + 2], self.out[i + 3]]
    }

    /// Paint every viewport pixel from the field's latest frame
    pub fn draw(&mut self, field: &HeightField, view: &Viewport) {
        let max_x = (field.width() - 1) as f32;
        let max_y = (field.height() - 1) as f32;

        for py in 0..self.h {
            let row = py as usize * self.w as usize * 4;
            for px in 0..self.w {
                let idx = row + px as usize * 4;
                let (fx, fy) = view.to_grid(px as f32, py as f32);

                if fx < 0.0 || fx >= max_x || fy < 0.0 || fy >= max_y {
                    self.out[idx..idx + 4].fill(0);
                    continue;
                }

                let rgba = shade(field.sample(fx, fy));
                self.out[idx..idx + 4].copy_from_slice(&rgba);
            }
        }
    }
}

/// Height -> RGBA
pub fn shade(h: f32) -> [u8; 4] {
    let mut c = if h < -20.0 {
        HIGHLIGHT
    } else if h < -5.0 {
        TROUGH
    } else if h < 5.0 {
        REST
    } else if h < 20.0 {
        SWELL
    } else {
        PEAK
    };

    if h > CREST {
        for (ch, lift) in c.iter_mut().zip(CREST_LIFT) {
            *ch = ch.saturating_add(lift);
        }
    }

    let a = if h < MASK_ALPHA_BELOW { MASK_ALPHA } else { 255 };
    [c[0], c[1], c[2], a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_bands() {
        assert_eq!(shade(-25.0), [45, 212, 191, 220]);
        assert_eq!(shade(-18.0), [17, 94, 89, 220]);
        assert_eq!(shade(-10.0), [17, 94, 89, 255]);
        assert_eq!(shade(0.0), [15, 118, 110, 255]);
        assert_eq!(shade(6.0), [19, 78, 74, 255]);
    }

    #[test]
    fn crests_are_brightened() {
        assert_eq!(shade(10.0), [39, 98, 104, 255]);
        // Black peak band still lifts
        assert_eq!(shade(30.0), [20, 20, 30, 255]);
    }

    #[test]
    fn overflow_pixels_are_transparent() {
        let field = HeightField::new(10, 10);
        // Last column maps past the final sampleable cell
        let view = Viewport::fit(40, 10, 10, 10);
        let mut r = Rasterizer::new(40, 10);
        r.draw(&field, &view);

        assert_eq!(r.len(), 40 * 10 * 4);
        assert_eq!(r.pixel(39, 0)[3], 0);
        assert_eq!(r.pixel(39, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn flat_field_renders_rest_colour() {
        let field = HeightField::new(10, 10);
        let view = Viewport::fit(20, 20, 10, 10);
        let mut r = Rasterizer::new(20, 20);
        r.draw(&field, &view);
        assert_eq!(r.pixel(5, 5), [15, 118, 110, 255]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn buffer_length_does_not_wrap_in_u32() {
        // 40000 * 40000 * 4 is past u32::MAX
        assert_eq!(rgba_len(40_000, 40_000), 6_400_000_000);
        assert_eq!(rgba_len(65_536, 16_384), 1 << 32);
        assert_eq!(rgba_len(0, 9), 0);
    }

    #[test]
    fn resize_tracks_viewport() {
        let mut r = Rasterizer::new(4, 4);
        r.resize(8, 2);
        assert_eq!(r.len(), 8 * 2 * 4);
        assert_eq!(r.pixels().len(), r.len());
    }
}
