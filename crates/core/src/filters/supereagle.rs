//! SuperEagle 2x
//!
//! Edge-directed interpolation from the 2xSaI family. For each source pixel a
//! 4x4 neighbourhood decides whether the 2x2 output block follows a diagonal
//! edge, blends two pixels, or falls back to a weighted four-pixel average.
//!
//! Neighbourhood, with `5` the pixel being expanded:
//!
//! ```text
//!    B1 B2
//! 4  5  6  S2
//! 1  2  3  S1
//!    A1 A2
//! ```

use super::clamped;
use crate::graphics::ColorOps;
use crate::surface::{Region, RegionMut};

/// Score how strongly `c` and `d` side with `a` rather than `b`
///
/// Positive favours `a`, negative favours `b`.
#[inline]
pub(crate) fn vote(a: u16, b: u16, c: u16, d: u16) -> i32 {
    let mut x = 0;
    let mut y = 0;
    if a == c {
        x += 1;
    } else if b == c {
        y += 1;
    }
    if a == d {
        x += 1;
    } else if b == d {
        y += 1;
    }
    let mut r = 0;
    if x <= 1 {
        r += 1;
    }
    if y <= 1 {
        r -= 1;
    }
    r
}

pub fn apply(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    let masks = src.format().masks();
    let avg = |a, b| ColorOps::average2_in(masks, a, b);
    let avg4 = |a, b, c, d| ColorOps::average4_in(masks, a, b, c, d);

    let (width, height) = (src.width(), src.height());

    for y in 0..height {
        let cur = src.row(y);
        let [top, bottom] = dst.rows_mut::<2>(y * 2);

        if y == 0 || y == height - 1 {
            // Edge rows are copied unfiltered; the lower sub-row takes the
            // right neighbour, clamped at the last column
            for (x, &c) in cur.iter().enumerate() {
                let next = clamped(cur, x as isize + 1);
                top[x * 2] = c;
                top[x * 2 + 1] = c;
                bottom[x * 2] = next;
                bottom[x * 2 + 1] = next;
            }
            continue;
        }

        let above = src.row(y - 1);
        let below = src.row(y + 1);
        let below2 = src.row_clamped(y as isize + 2);

        for x in 0..width {
            let xi = x as isize;

            let color_b1 = above[x];
            let color_b2 = clamped(above, xi + 1);

            let color4 = clamped(cur, xi - 1);
            let color5 = cur[x];
            let color6 = clamped(cur, xi + 1);
            let color_s2 = clamped(cur, xi + 2);

            let color1 = clamped(below, xi - 1);
            let color2 = below[x];
            let color3 = clamped(below, xi + 1);
            let color_s1 = clamped(below, xi + 2);

            let color_a1 = below2[x];
            let color_a2 = clamped(below2, xi + 1);

            let p1a;
            let p1b;
            let p2a;
            let p2b;

            if color2 == color6 && color5 != color3 {
                p1b = color2;
                p2a = color2;
                p1a = if color1 == color2 || color6 == color_b2 {
                    avg(color2, avg(color2, color5))
                } else {
                    avg(color5, color6)
                };
                p2b = if color6 == color_s2 || color2 == color_a1 {
                    avg(color2, avg(color2, color3))
                } else {
                    avg(color2, color3)
                };
            } else if color5 == color3 && color2 != color6 {
                p2b = color5;
                p1a = color5;
                p1b = if color_b1 == color5 || color3 == color_s1 {
                    avg(color5, avg(color5, color6))
                } else {
                    avg(color5, color6)
                };
                p2a = if color3 == color_a2 || color4 == color5 {
                    avg(color5, avg(color5, color2))
                } else {
                    avg(color2, color3)
                };
            } else if color5 == color3 && color2 == color6 {
                let r = vote(color6, color5, color1, color_a1)
                    + vote(color6, color5, color4, color_b1)
                    + vote(color6, color5, color_a2, color_s1)
                    + vote(color6, color5, color_b2, color_s2);

                if r > 0 {
                    p1b = color2;
                    p2a = color2;
                    p1a = avg(color5, color6);
                    p2b = p1a;
                } else if r < 0 {
                    p2b = color5;
                    p1a = color5;
                    p1b = avg(color5, color6);
                    p2a = p1b;
                } else {
                    p2b = color5;
                    p1a = color5;
                    p1b = color2;
                    p2a = color2;
                }
            } else {
                let diag = avg(color2, color6);
                p2b = avg4(color3, color3, color3, diag);
                p1a = avg4(color5, color5, color5, diag);

                let anti = avg(color5, color3);
                p2a = avg4(color2, color2, color2, anti);
                p1b = avg4(color6, color6, color6, anti);
            }

            top[x * 2] = p1a;
            top[x * 2 + 1] = p1b;
            bottom[x * 2] = p2a;
            bottom[x * 2 + 1] = p2b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{buffer, run};
    use super::super::FilterKind;
    use super::*;

    #[test]
    fn test_vote_counts_matches() {
        // Both neighbours match `a`
        assert_eq!(vote(1, 2, 1, 1), -1);
        // Both match `b`
        assert_eq!(vote(1, 2, 2, 2), 1);
        // One each
        assert_eq!(vote(1, 2, 1, 2), 0);
        // Neither
        assert_eq!(vote(1, 2, 3, 4), 0);
    }

    #[test]
    fn test_flat_image_stays_flat() {
        let src = buffer(4, 4, &[0x1234; 16]);
        let dst = run(FilterKind::SuperEagle, &src);
        assert!(dst.to_packed().iter().all(|&p| p == 0x1234));
    }

    #[test]
    fn test_edge_rows_shift_lower_sub_row() {
        let pixels: Vec<u16> = (0..12).map(|i| 0x0841 * i as u16).collect();
        let src = buffer(4, 3, &pixels);
        let dst = run(FilterKind::SuperEagle, &src);
        for (src_row, dst_row) in [(0, 0), (2, 4)] {
            let row = &pixels[src_row * 4..src_row * 4 + 4];
            for x in 0..4 {
                let next = row[(x + 1).min(3)];
                for dx in 0..2 {
                    assert_eq!(dst.get(x * 2 + dx, dst_row), row[x]);
                    assert_eq!(dst.get(x * 2 + dx, dst_row + 1), next);
                }
            }
        }
        // Last column has no right neighbour and repeats itself
        assert_eq!(dst.get(7, 1), pixels[3]);
        assert_eq!(dst.get(7, 5), pixels[11]);
    }

    #[test]
    fn test_diagonal_line_keeps_its_pixels() {
        // Diagonal line of white on black
        let mut pixels = vec![0u16; 36];
        for i in 0..6 {
            pixels[i * 6 + i] = 0xFFFF;
        }
        let src = buffer(6, 6, &pixels);
        let dst = run(FilterKind::SuperEagle, &src);
        // Pixels away from the diagonal stay black
        assert_eq!(dst.get(10, 2), 0x0000);
        assert_eq!(dst.get(0, 10), 0x0000);
        // The diagonal itself stays white at the block's own position
        assert_eq!(dst.get(4, 4), 0xFFFF);
    }
}
