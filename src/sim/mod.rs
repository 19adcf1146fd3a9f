// sim/ - Ripple simulation
//
// Height field, glyph mask and pointer impulse, each in its own module.
// `RippleWorld` owns all of them plus the screen transform and output
// buffer for the lifetime of the mounted surface.

mod field;
mod impulse;
mod mask;

pub use field::HeightField;
pub use impulse::disturb;
pub use mask::Mask;

use crate::config::RippleParams;
use crate::render::Rasterizer;
use crate::view::Viewport;

/// Ripple surface state
pub struct RippleWorld {
    params: RippleParams,
    field: HeightField,
    mask: Mask,
    view: Viewport,

    // Output
    raster: Rasterizer,
}

impl RippleWorld {
    pub fn new(params: RippleParams, view_w: u32, view_h: u32) -> Self {
        Self::with_mask(params, Mask::empty(params.width, params.height), view_w, view_h)
    }

    pub fn with_mask(params: RippleParams, mask: Mask, view_w: u32, view_h: u32) -> Self {
        debug_assert_eq!(mask.width(), params.width);
        debug_assert_eq!(mask.height(), params.height);

        Self {
            params,
            field: HeightField::new(params.width, params.height),
            mask,
            view: Viewport::fit(view_w, view_h, params.width, params.height),
            raster: Rasterizer::new(view_w, view_h),
        }
    }

    /// New transform and output size; the wave state carries over
    pub fn resize(&mut self, view_w: u32, view_h: u32) {
        self.view = Viewport::fit(view_w, view_h, self.params.width, self.params.height);
        self.raster.resize(view_w, view_h);
    }

    /// Wave update + mask, without rendering or swapping
    pub fn step(&mut self) {
        self.field.step(self.params.damping);
        self.mask.apply(self.field.older_mut(), self.params.mask_depth);
    }

    /// One animation frame
    pub fn tick(&mut self) {
        self.step();
        self.field.swap();
        self.raster.draw(&self.field, &self.view);
    }

    /// Advance the simulation without touching the output buffer
    pub fn advance(&mut self) {
        self.step();
        self.field.swap();
    }

    /// Pointer at device pixel (px, py). Ignored outside the viewport.
    pub fn pointer(&mut self, px: f32, py: f32) {
        if !self.view.contains(px, py) { return; }
        let (cx, cy) = self.view.cell_at(px, py);
        self.impulse_at(cx, cy);
    }

    /// Impulse centred on a grid cell
    pub fn impulse_at(&mut self, cx: i32, cy: i32) {
        let (w, h) = (self.params.width, self.params.height);
        // Latest buffer: the frame on screen, read as neighbours by the next step
        disturb(
            self.field.latest_mut(),
            w,
            h,
            cx,
            cy,
            self.params.impulse_radius,
            self.params.impulse_strength,
        );
    }

    pub fn height_at(&self, x: usize, y: usize) -> f32 {
        self.field.latest()[self.field.index(x, y)]
    }

    pub fn energy(&self) -> f64 {
        self.field.energy(self.params.damping)
    }

    pub fn raster(&self) -> &Rasterizer { &self.raster }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const u8 { self.raster.ptr() }
    pub fn output_len(&self) -> usize { self.raster.len() }
    pub fn width(&self) -> u32 { self.view.width }
    pub fn height(&self) -> u32 { self.view.height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RippleParams {
        RippleParams::with_grid(12, 8)
    }

    #[test]
    fn mask_wins_over_simulation_every_frame() {
        let p = small();
        let mut rgba = vec![0u8; p.cells() * 4];
        let masked = 3 * p.width + 5;
        rgba[masked * 4 + 3] = 255;

        let mut world = RippleWorld::with_mask(p, Mask::from_rgba(p.width, p.height, &rgba), 24, 16);
        world.impulse_at(5, 3);

        for _ in 0..5 {
            world.tick();
            assert_eq!(world.height_at(5, 3), p.mask_depth);
        }
    }

    #[test]
    fn pointer_outside_viewport_is_ignored() {
        let mut world = RippleWorld::new(small(), 24, 16);
        world.pointer(-1.0, 4.0);
        world.pointer(24.0, 4.0);
        world.pointer(3.0, 16.0);
        assert!(world.field.latest().iter().all(|&v| v == 0.0));

        world.pointer(10.0, 6.0);
        assert!(world.height_at(5, 3) < 0.0);
    }

    #[test]
    fn resize_keeps_wave_state() {
        let mut world = RippleWorld::new(small(), 24, 16);
        world.impulse_at(6, 4);
        world.tick();
        let before = world.field.latest().to_vec();

        world.resize(100, 30);
        assert_eq!(world.field.latest(), &before[..]);
        assert_eq!(world.output_len(), 100 * 30 * 4);
        assert_eq!((world.width(), world.height()), (100, 30));
    }

    #[test]
    fn impulse_lands_in_displayed_frame() {
        let mut world = RippleWorld::new(small(), 24, 16);
        world.impulse_at(6, 4);

        // Visible before any step; the older buffer is untouched
        assert!(world.height_at(6, 4) < 0.0);
        assert!(world.field.older().iter().all(|&v| v == 0.0));

        // Next step reads it as the current frame, so the dip deepens
        let before = world.height_at(6, 4);
        world.advance();
        assert!(world.height_at(6, 4) < before);
    }

    #[test]
    fn tick_renders_latest_frame() {
        let mut world = RippleWorld::new(small(), 24, 16);
        world.tick();
        // Flat surface, inside the grid
        assert_eq!(world.raster().pixel(4, 4), [15, 118, 110, 255]);
    }
}
