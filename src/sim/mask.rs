// mask.rs - Static glyph silhouette
//
// Built once from an RGBA raster of the glyph at grid resolution.
// Immutable afterwards; the world re-stamps it onto the field every frame.

use crate::config::MASK_ALPHA_THRESHOLD;

pub struct Mask {
    w: usize,
    h: usize,
    cells: Vec<u8>,
}

impl Mask {
    /// All-zero mask (nothing burned in)
    pub fn empty(w: usize, h: usize) -> Self {
        Self { w, h, cells: vec![0; w * h] }
    }

    /// Threshold the alpha channel of a w x h RGBA raster.
    /// Short rasters leave the remaining cells unset.
    pub fn from_rgba(w: usize, h: usize, rgba: &[u8]) -> Self {
        let mut cells = vec![0; w * h];
        for (cell, px) in cells.iter_mut().zip(rgba.chunks_exact(4)) {
            if px[3] > MASK_ALPHA_THRESHOLD { *cell = 1; }
        }
        Self { w, h, cells }
    }

    #[inline]
    pub fn width(&self) -> usize { self.w }
    #[inline]
    pub fn height(&self) -> usize { self.h }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Force every masked cell of `field` to `depth`
    pub fn apply(&self, field: &mut [f32], depth: f32) {
        for (v, &m) in field.iter_mut().zip(&self.cells) {
            if m == 1 { *v = depth; }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(alphas: &[u8]) -> Vec<u8> {
        alphas.iter().flat_map(|&a| [255, 255, 255, a]).collect()
    }

    #[test]
    fn alpha_threshold_is_strict() {
        let m = Mask::from_rgba(4, 1, &raster(&[0, 128, 129, 255]));
        assert_eq!(m.count(), 2);

        let mut field = [1.0; 4];
        m.apply(&mut field, -25.0);
        assert_eq!(field, [1.0, 1.0, -25.0, -25.0]);
    }

    #[test]
    fn apply_overrides_simulated_values() {
        let m = Mask::from_rgba(3, 1, &raster(&[255, 0, 255]));
        let mut field = [12.5, 3.0, -40.0];
        m.apply(&mut field, -25.0);
        assert_eq!(field, [-25.0, 3.0, -25.0]);
    }

    #[test]
    fn short_raster_leaves_tail_unmasked() {
        // Only the first row of a 2x2 mask is supplied
        let m = Mask::from_rgba(2, 2, &raster(&[255, 255]));
        assert_eq!(m.count(), 2);

        let mut field = [0.0; 4];
        m.apply(&mut field, -25.0);
        assert_eq!(field, [-25.0, -25.0, 0.0, 0.0]);
        assert_eq!(Mask::empty(2, 2).count(), 0);
    }
}
