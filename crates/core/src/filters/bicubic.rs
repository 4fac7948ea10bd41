//! Software bicubic 2x
//!
//! Cubic B-spline over a 4x4 neighbourhood. Output pixel `(i, j)` samples the
//! source at `(i / 2, j / 2)`, so every other column and row falls halfway
//! between two source pixels.

use crate::surface::{Region, RegionMut};

/// Cubic B-spline weight for a sample `x` pixels from the center
fn cubic_weight(x: f32) -> f32 {
    let p = |v: f32| if v > 0.0 { v * v * v } else { 0.0 };
    (p(x + 2.0) - 4.0 * p(x + 1.0) + 6.0 * p(x) - 4.0 * p(x - 1.0)) / 6.0
}

/// Weights for taps at offsets -1..=2, for fractions 0 and 1/2
fn kernel() -> [[f32; 4]; 2] {
    let mut k = [[0.0; 4]; 2];
    for (phase, row) in k.iter_mut().enumerate() {
        let frac = phase as f32 * 0.5;
        for (tap, w) in row.iter_mut().enumerate() {
            *w = cubic_weight(tap as f32 - 1.0 - frac);
        }
    }
    k
}

pub fn apply(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    let format = src.format();
    let (r_max, g_max, b_max) = format.channel_max();
    let (width, height) = (src.width(), src.height());
    let weights = kernel();

    for j in 0..dst.height() {
        let iv = j / 2;
        let row = dst.row_mut(j);

        if iv == height - 1 {
            // Nothing below the last row to interpolate toward
            for (i, out) in row.iter_mut().enumerate() {
                *out = src.pixel(i / 2, iv);
            }
            continue;
        }

        let wy = &weights[j & 1];
        for (i, out) in row.iter_mut().enumerate() {
            let iu = i / 2;
            let wx = &weights[i & 1];

            let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
            for (m, &w_row) in wy.iter().enumerate() {
                let sy = (iv as isize + m as isize - 1).clamp(0, height as isize - 1) as usize;
                let line = src.row(sy);
                for (n, &w_col) in wx.iter().enumerate() {
                    let sx = (iu as isize + n as isize - 1).clamp(0, width as isize - 1) as usize;
                    let (pr, pg, pb) = format.channels(line[sx]);
                    let w = w_row * w_col;
                    r += w * pr as f32;
                    g += w * pg as f32;
                    b += w * pb as f32;
                }
            }

            let to_channel = |v: f32, max: u32| (v.round().max(0.0) as u32).min(max);
            *out = format.from_channels(
                to_channel(r, r_max),
                to_channel(g, g_max),
                to_channel(b, b_max),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{buffer, run};
    use super::super::FilterKind;
    use super::*;

    #[test]
    fn test_kernel_weights_sum_to_one() {
        for phase in kernel() {
            let sum: f32 = phase.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "sum {}", sum);
        }
        assert!((cubic_weight(0.0) - 4.0 / 6.0).abs() < 1e-6);
        assert!((cubic_weight(1.0) - 1.0 / 6.0).abs() < 1e-6);
        assert_eq!(cubic_weight(2.0), 0.0);
    }

    #[test]
    fn test_flat_image_stays_flat() {
        let src = buffer(4, 4, &[0x8410; 16]);
        let dst = run(FilterKind::Bicubic, &src);
        assert!(dst.to_packed().iter().all(|&p| p == 0x8410));
    }

    #[test]
    fn test_last_row_duplicated() {
        let src = buffer(1, 2, &[0x0000, 0xFFFF]);
        let dst = run(FilterKind::Bicubic, &src);
        assert_eq!(dst.size(), (2, 4));
        assert_eq!(dst.row(2), &[0xFFFF, 0xFFFF]);
        assert_eq!(dst.row(3), &[0xFFFF, 0xFFFF]);
        // The first row picks up a little of the white below it
        assert_ne!(dst.get(0, 0), 0x0000);
        assert_ne!(dst.get(0, 0), 0xFFFF);
    }
}
