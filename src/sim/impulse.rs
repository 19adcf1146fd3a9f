// impulse.rs - Pointer disturbance
//
// Smooth radial dent: strongest at the centre cell, zero at the radius.

use std::f32::consts::FRAC_PI_2;

/// Subtract `strength * cos(d^2 / r^2 * pi/2)` from every cell of `field`
/// strictly within `radius` cells of (cx, cy). Cells off the grid are skipped.
pub fn disturb(
    field: &mut [f32],
    w: usize,
    h: usize,
    cx: i32,
    cy: i32,
    radius: i32,
    strength: f32,
) {
    if radius <= 0 { return; }
    let r2 = (radius * radius) as f32;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 >= radius * radius { continue; }

            let nx = cx + dx;
            let ny = cy + dy;
            if nx < 0 || ny < 0 || nx as usize >= w || ny as usize >= h { continue; }

            let falloff = (d2 as f32 / r2 * FRAC_PI_2).cos();
            field[ny as usize * w + nx as usize] -= strength * falloff;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_takes_full_strength() {
        let mut f = vec![0.0; 9 * 9];
        disturb(&mut f, 9, 9, 4, 4, 4, 9.0);
        assert!((f[4 * 9 + 4] + 9.0).abs() < 1e-6);
    }

    #[test]
    fn radius_boundary_is_untouched() {
        let mut f = vec![0.0; 9 * 9];
        disturb(&mut f, 9, 9, 4, 4, 4, 9.0);
        // Exactly r cells away along an axis
        assert_eq!(f[4 * 9 + 8], 0.0);
        assert_eq!(f[4 * 9], 0.0);
        assert_eq!(f[4], 0.0);
        // Just inside
        assert!(f[4 * 9 + 7] < 0.0);
    }

    #[test]
    fn dent_is_radially_symmetric() {
        let mut f = vec![0.0; 11 * 11];
        disturb(&mut f, 11, 11, 5, 5, 4, 9.0);
        let at = |x: usize, y: usize| f[y * 11 + x];

        for d in 1..4 {
            assert_eq!(at(5 + d, 5), at(5 - d, 5));
            assert_eq!(at(5, 5 + d), at(5, 5 - d));
            assert_eq!(at(5 + d, 5), at(5, 5 + d));
        }
        assert_eq!(at(7, 7), at(3, 3));
        assert_eq!(at(7, 3), at(3, 7));
    }

    #[test]
    fn clips_at_grid_edges() {
        let mut f = vec![0.0; 4 * 4];
        disturb(&mut f, 4, 4, 0, 0, 4, 9.0);
        assert!(f[0] < 0.0);

        let before = f.clone();
        disturb(&mut f, 4, 4, -20, -20, 4, 9.0);
        disturb(&mut f, 4, 4, 50, 2, 4, 9.0);
        assert_eq!(f, before);
    }
}
