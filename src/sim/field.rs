// field.rs - Double-buffered height field
//
// Two equal-sized scalar buffers, row-major (index = y * w + x).
// `active` names the buffer holding the latest frame; the other one holds
// the frame before it. The wave step overwrites the older buffer in place,
// then `swap` flips the roles without copying.

pub struct HeightField {
    w: usize,
    h: usize,
    bufs: [Vec<f32>; 2],
    active: usize,
}

impl HeightField {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            bufs: [vec![0.0; w * h], vec![0.0; w * h]],
            active: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> usize { self.w }
    #[inline]
    pub fn height(&self) -> usize { self.h }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Latest frame: what gets rendered and what pointer input disturbs
    #[inline]
    pub fn latest(&self) -> &[f32] {
        &self.bufs[self.active]
    }

    #[inline]
    pub fn latest_mut(&mut self) -> &mut [f32] {
        &mut self.bufs[self.active]
    }

    /// Frame before `latest`; the next step overwrites it
    #[inline]
    pub fn older(&self) -> &[f32] {
        &self.bufs[self.active ^ 1]
    }

    #[inline]
    pub fn older_mut(&mut self) -> &mut [f32] {
        &mut self.bufs[self.active ^ 1]
    }

    /// One leapfrog step of the 2D wave equation into the older buffer.
    ///
    /// Border cells are skipped, so they keep whatever value they had.
    pub fn step(&mut self, damping: f32) {
        let w = self.w;
        let h = self.h;
        if w < 3 || h < 3 { return; }

        let [a, b] = &mut self.bufs;
        let (next, prev) = if self.active == 0 { (b, &*a) } else { (a, &*b) };

        for y in 1..h - 1 {
            let row = y * w;
            for x in 1..w - 1 {
                let i = row + x;
                let sum = prev[i - 1] + prev[i + 1] + prev[i - w] + prev[i + w];
                next[i] = (sum / 2.0 - next[i]) * damping;
            }
        }
    }

    /// Written buffer becomes `latest`
    #[inline]
    pub fn swap(&mut self) {
        self.active ^= 1;
    }

    /// Bilinear sample of `latest` at fractional grid coords.
    /// Caller guarantees `0 <= fx < w-1` and `0 <= fy < h-1`.
    #[inline]
    pub fn sample(&self, fx: f32, fy: f32) -> f32 {
        let cur = self.latest();
        let ix = fx as usize;
        let iy = fy as usize;
        let tx = fx - ix as f32;
        let ty = fy - iy as f32;

        let i = iy * self.w + ix;
        let h00 = cur[i];
        let h10 = cur[i + 1];
        let h01 = cur[i + self.w];
        let h11 = cur[i + self.w + 1];

        (1.0 - tx) * (1.0 - ty) * h00
            + tx * (1.0 - ty) * h10
            + (1.0 - tx) * ty * h01
            + tx * ty * h11
    }

    /// Discrete energy of the leapfrog scheme over interior cells:
    /// |u_n|^2 + d|u_{n-1}|^2 - 2d<u_n, A u_{n-1}>, A = 4-neighbour mean.
    /// Without input or mask it shrinks by exactly `damping` per step.
    pub fn energy(&self, damping: f32) -> f64 {
        let w = self.w;
        let h = self.h;
        if w < 3 || h < 3 { return 0.0; }

        let cur = self.latest();
        let old = self.older();
        let d = damping as f64;
        let mut e = 0.0f64;

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = y * w + x;
                let u = cur[i] as f64;
                let v = old[i] as f64;
                let avg = (old[i - 1] + old[i + 1] + old[i - w] + old[i + w]) as f64 * 0.25;
                e += u * u + d * v * v - 2.0 * d * u * avg;
            }
        }
        e
    }
}
