//! Scale2x and Advanced Scale2x

use super::clamped;
use super::supereagle::vote;
use crate::graphics::ColorOps;
use crate::surface::{Region, RegionMut};

/// Plain Scale2x
///
/// ```text
///    B          E0 E1
///  D E F   =>   E2 E3
///    H
/// ```
///
/// A sub-pixel copies an orthogonal neighbour only when that neighbour
/// matches the adjacent one and differs from the opposite pair; otherwise it
/// keeps the center.
pub fn apply(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    for y in 0..src.height() {
        let above = src.row_clamped(y as isize - 1);
        let cur = src.row(y);
        let below = src.row_clamped(y as isize + 1);

        let [top, bottom] = dst.rows_mut::<2>(y * 2);

        for x in 0..cur.len() {
            let xi = x as isize;
            let e = cur[x];
            let d = clamped(cur, xi - 1);
            let f = clamped(cur, xi + 1);
            let b = above[x];
            let h = below[x];

            top[x * 2] = if d == b && b != f && d != h { d } else { e };
            top[x * 2 + 1] = if b == f && b != d && f != h { f } else { e };
            bottom[x * 2] = if d == h && d != b && h != f { d } else { e };
            bottom[x * 2 + 1] = if h == f && d != h && b != f { f } else { e };
        }
    }
}

/// Advanced Scale2x
///
/// Scale2x's decision structure with 2xSaI-style blending, over the
/// neighbourhood
///
/// ```text
/// I E F J
/// G A B K
/// H C D L
/// M N O
/// ```
///
/// The first and last rows are doubled.
pub fn apply_advanced(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    let masks = src.format().masks();
    let avg = |a, b| ColorOps::average2_in(masks, a, b);
    let avg4 = |a, b, c, d| ColorOps::average4_in(masks, a, b, c, d);

    let height = src.height();

    for y in 0..height {
        let cur = src.row(y);
        let [top, bottom] = dst.rows_mut::<2>(y * 2);

        if y == 0 || y == height - 1 {
            for (x, &a) in cur.iter().enumerate() {
                top[x * 2] = a;
                top[x * 2 + 1] = a;
                bottom[x * 2] = a;
                bottom[x * 2 + 1] = a;
            }
            continue;
        }

        let above = src.row(y - 1);
        let below = src.row(y + 1);
        let below2 = src.row_clamped(y as isize + 2);

        for x in 0..cur.len() {
            let xi = x as isize;

            let color_i = clamped(above, xi - 1);
            let color_e = above[x];
            let color_f = clamped(above, xi + 1);
            let color_j = clamped(above, xi + 2);

            let color_g = clamped(cur, xi - 1);
            let color_a = cur[x];
            let color_b = clamped(cur, xi + 1);
            let color_k = clamped(cur, xi + 2);

            let color_h = clamped(below, xi - 1);
            let color_c = below[x];
            let color_d = clamped(below, xi + 1);
            let color_l = clamped(below, xi + 2);

            let color_m = clamped(below2, xi - 1);
            let color_n = below2[x];
            let color_o = clamped(below2, xi + 1);

            let product;
            let product1;
            let product2;

            if color_a == color_d && color_b != color_c {
                product = if (color_a == color_e && color_b == color_l)
                    || (color_a == color_c
                        && color_a == color_f
                        && color_b != color_e
                        && color_b == color_j)
                {
                    color_a
                } else {
                    avg(color_a, color_b)
                };

                product1 = if (color_a == color_g && color_c == color_o)
                    || (color_a == color_b
                        && color_a == color_h
                        && color_g != color_c
                        && color_c == color_m)
                {
                    color_a
                } else {
                    avg(color_a, color_c)
                };
                product2 = color_a;
            } else if color_b == color_c && color_a != color_d {
                product = if (color_b == color_f && color_a == color_h)
                    || (color_b == color_e
                        && color_b == color_d
                        && color_a != color_f
                        && color_a == color_i)
                {
                    color_b
                } else {
                    avg(color_a, color_b)
                };

                product1 = if (color_c == color_h && color_a == color_f)
                    || (color_c == color_g
                        && color_c == color_d
                        && color_a != color_h
                        && color_a == color_i)
                {
                    color_c
                } else {
                    avg(color_a, color_c)
                };
                product2 = color_b;
            } else if color_a == color_d && color_b == color_c {
                if color_a == color_b {
                    product = color_a;
                    product1 = color_a;
                    product2 = color_a;
                } else {
                    product1 = avg(color_a, color_c);
                    product = avg(color_a, color_b);

                    let r = vote(color_a, color_b, color_g, color_e)
                        - vote(color_b, color_a, color_k, color_f)
                        - vote(color_b, color_a, color_h, color_n)
                        + vote(color_a, color_b, color_l, color_o);

                    product2 = if r > 0 {
                        color_a
                    } else if r < 0 {
                        color_b
                    } else {
                        avg4(color_a, color_b, color_c, color_d)
                    };
                }
            } else {
                product2 = avg4(color_a, color_b, color_c, color_d);

                product = if color_a == color_c
                    && color_a == color_f
                    && color_b != color_e
                    && color_b == color_j
                {
                    color_a
                } else if color_b == color_e
                    && color_b == color_d
                    && color_a != color_f
                    && color_a == color_i
                {
                    color_b
                } else {
                    avg(color_a, color_b)
                };

                product1 = if color_a == color_b
                    && color_a == color_h
                    && color_g != color_c
                    && color_c == color_m
                {
                    color_a
                } else if color_c == color_g
                    && color_c == color_d
                    && color_a != color_h
                    && color_a == color_i
                {
                    color_c
                } else {
                    avg(color_a, color_c)
                };
            }

            top[x * 2] = color_a;
            top[x * 2 + 1] = product;
            bottom[x * 2] = product1;
            bottom[x * 2 + 1] = product2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{buffer, run};
    use super::super::FilterKind;

    fn checkerboard(size: usize) -> Vec<u16> {
        (0..size * size)
            .map(|i| if (i / size + i % size) % 2 == 0 { 0x0000 } else { 0xFFFF })
            .collect()
    }

    #[test]
    fn test_scale2x_flat_image() {
        let src = buffer(4, 4, &[0x1234; 16]);
        let dst = run(FilterKind::Scale2x, &src);
        assert_eq!(dst.size(), (8, 8));
        assert!(dst.to_packed().iter().all(|&p| p == 0x1234));
    }

    #[test]
    fn test_advanced_scale2x_flat_image() {
        let src = buffer(4, 4, &[0x1234; 16]);
        let dst = run(FilterKind::AdvancedScale2x, &src);
        assert!(dst.to_packed().iter().all(|&p| p == 0x1234));
    }

    #[test]
    fn test_scale2x_checkerboard_introduces_no_new_colors() {
        let pixels = checkerboard(4);
        let src = buffer(4, 4, &pixels);
        let dst = run(FilterKind::Scale2x, &src);
        assert_eq!(dst.size(), (8, 8));
        assert!(dst
            .to_packed()
            .iter()
            .all(|&p| p == 0x0000 || p == 0xFFFF));
        // Interior blocks reproduce the source pixel exactly
        for y in 1..3 {
            for x in 1..3 {
                let expected = pixels[y * 4 + x];
                for dy in 0..2 {
                    for dx in 0..2 {
                        assert_eq!(dst.get(x * 2 + dx, y * 2 + dy), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_scale2x_rounds_diagonal_corner() {
        // Black square with a white top-left L shape
        #[rustfmt::skip]
        let pixels = [
            0xFFFF, 0xFFFF, 0xFFFF,
            0xFFFF, 0x0000, 0x0000,
            0xFFFF, 0x0000, 0x0000,
        ];
        let src = buffer(3, 3, &pixels);
        let dst = run(FilterKind::Scale2x, &src);
        // Center pixel's top-left takes the white neighbours
        assert_eq!(dst.get(2, 2), 0xFFFF);
        assert_eq!(dst.get(3, 2), 0x0000);
        assert_eq!(dst.get(2, 3), 0x0000);
        assert_eq!(dst.get(3, 3), 0x0000);
    }

    #[test]
    fn test_advanced_scale2x_edge_rows_doubled() {
        let pixels: Vec<u16> = (0..9).map(|i| 0x1000 + i as u16).collect();
        let src = buffer(3, 3, &pixels);
        let dst = run(FilterKind::AdvancedScale2x, &src);
        for x in 0..3 {
            assert_eq!(dst.get(x * 2, 0), pixels[x]);
            assert_eq!(dst.get(x * 2 + 1, 1), pixels[x]);
            assert_eq!(dst.get(x * 2, 4), pixels[6 + x]);
            assert_eq!(dst.get(x * 2 + 1, 5), pixels[6 + x]);
        }
    }

    #[test]
    fn test_advanced_scale2x_keeps_top_left() {
        let pixels = checkerboard(5);
        let src = buffer(5, 5, &pixels);
        let dst = run(FilterKind::AdvancedScale2x, &src);
        for y in 1..4 {
            for x in 0..5 {
                assert_eq!(dst.get(x * 2, y * 2), pixels[y * 5 + x]);
            }
        }
    }
}
