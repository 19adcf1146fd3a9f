// view.rs - Screen <-> grid transform
//
// Uniform scale chosen so the grid covers the viewport's larger dimension,
// centred. Offsets go negative when aspect ratios differ; the overflow is
// simply off screen. Pure math, no allocation.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Viewport {
    pub fn fit(width: u32, height: u32, grid_w: usize, grid_h: usize) -> Self {
        let (vw, vh) = (width as f32, height as f32);
        let (gw, gh) = (grid_w as f32, grid_h as f32);
        let scale = (vw / gw).max(vh / gh);

        Self {
            width,
            height,
            scale,
            offset_x: (vw - gw * scale) / 2.0,
            offset_y: (vh - gh * scale) / 2.0,
        }
    }

    /// Device pixel -> fractional grid coords
    #[inline]
    pub fn to_grid(&self, px: f32, py: f32) -> (f32, f32) {
        ((px - self.offset_x) / self.scale, (py - self.offset_y) / self.scale)
    }

    /// Fractional grid coords -> device pixel
    #[inline]
    pub fn to_screen(&self, gx: f32, gy: f32) -> (f32, f32) {
        (gx * self.scale + self.offset_x, gy * self.scale + self.offset_y)
    }

    /// Grid cell under a device pixel (floored)
    #[inline]
    pub fn cell_at(&self, px: f32, py: f32) -> (i32, i32) {
        let (gx, gy) = self.to_grid(px, py);
        (gx.floor() as i32, gy.floor() as i32)
    }

    #[inline]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= 0.0 && py >= 0.0 && px < self.width as f32 && py < self.height as f32
    }
}
