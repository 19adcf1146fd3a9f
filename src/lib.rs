use wasm_bindgen::prelude::*;

// ============================================================================
// RIPPLE SURFACE - Pointer-reactive wave field with a glyph burned in
// ============================================================================

pub mod config;
pub mod contact;
pub mod host;
pub mod render;
pub mod sim;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

use config::RippleParams;
use sim::{Mask, RippleWorld};

/// Host-driven surface: the page owns the frame loop and blits the
/// RGBA buffer at `output_ptr` after each `tick`.
#[wasm_bindgen]
pub struct RippleSurface {
    world: RippleWorld,
}

#[wasm_bindgen]
impl RippleSurface {
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Self {
        Self { world: RippleWorld::new(RippleParams::default(), w, h) }
    }

    /// `glyph` is a GRID_WIDTH x GRID_HEIGHT RGBA raster of the glyph
    pub fn with_glyph(w: u32, h: u32, glyph: &[u8]) -> Self {
        let p = RippleParams::default();
        let mask = Mask::from_rgba(p.width, p.height, glyph);
        Self { world: RippleWorld::with_mask(p, mask, w, h) }
    }

    pub fn tick(&mut self) {
        self.world.tick();
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.world.resize(w, h);
    }

    /// Pointer move at viewport coords
    pub fn disturb(&mut self, x: f32, y: f32) {
        self.world.pointer(x, y);
    }

    /// Touch move; `touches` is the number of active touch points
    pub fn touch(&mut self, x: f32, y: f32, touches: u32) {
        if touches == 0 { return; }
        self.world.pointer(x, y);
    }

    pub fn output_ptr(&self) -> *const u8 { self.world.output_ptr() }
    pub fn output_len(&self) -> usize { self.world.output_len() }
    pub fn width(&self) -> u32 { self.world.width() }
    pub fn height(&self) -> u32 { self.world.height() }
}
