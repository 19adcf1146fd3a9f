// config.rs - Fixed surface constants
//
// The host page supplies no parameters; everything the surface needs lives
// here. `RippleParams` bundles them so tests can run smaller grids.

/// Logical grid size (cells). Decoupled from device pixels.
pub const GRID_WIDTH: usize = 220;
pub const GRID_HEIGHT: usize = 120;

/// Per-step energy retention, in (0, 1)
pub const DAMPING: f32 = 0.985;

/// Height forced onto every mask cell after each wave step
pub const MASK_DEPTH: f32 = -25.0;

/// Pointer impulse: cell radius and peak depth
pub const IMPULSE_RADIUS: i32 = 4;
pub const IMPULSE_STRENGTH: f32 = 9.0;

/// Glyph burned into the surface, rasterized once at mount
pub const GLYPH: &str = "R";
pub const GLYPH_FONT: &str = "bold 80px serif";

/// Alpha above which a glyph raster pixel belongs to the mask
pub const MASK_ALPHA_THRESHOLD: u8 = 128;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleParams {
    pub width: usize,
    pub height: usize,
    pub damping: f32,
    pub mask_depth: f32,
    pub impulse_radius: i32,
    pub impulse_strength: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            damping: DAMPING,
            mask_depth: MASK_DEPTH,
            impulse_radius: IMPULSE_RADIUS,
            impulse_strength: IMPULSE_STRENGTH,
        }
    }
}

impl RippleParams {
    /// Same constants on a different grid size
    pub fn with_grid(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}
