//! Monitor 2x
//!
//! Bilinear expansion softened vertically toward each block's midpoint, with
//! a global brightness lift and half-brightness scanlines.

use super::clamped;
use crate::graphics::ColorOps;
use crate::surface::{Region, RegionMut};

/// Global brightness lift, about 112%
const GLOBAL_NUM: u32 = 9;
const GLOBAL_DEN: u32 = 8;
/// Scanline brightness, 50%
const SCAN_NUM: u32 = 1;
const SCAN_DEN: u32 = 2;

pub fn apply(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    let format = src.format();
    let masks = format.masks();
    let avg = |a, b| ColorOps::average2_in(masks, a, b);
    let boost = |p| ColorOps::scale_brightness_in(format, p, GLOBAL_NUM, GLOBAL_DEN);
    let scan = |p| ColorOps::scale_brightness_in(format, p, SCAN_NUM, SCAN_DEN);

    let height = src.height();

    for y in 0..height {
        let cur = src.row(y);
        let [top, bottom] = dst.rows_mut::<2>(y * 2);

        if y == height - 1 {
            for (x, &a) in cur.iter().enumerate() {
                let lit = boost(a);
                let dim = scan(lit);
                top[x * 2] = lit;
                top[x * 2 + 1] = lit;
                bottom[x * 2] = dim;
                bottom[x * 2 + 1] = dim;
            }
            continue;
        }

        let below = src.row(y + 1);
        for x in 0..cur.len() {
            let a = cur[x];
            let b = clamped(cur, x as isize + 1);
            let c = below[x];
            let d = clamped(below, x as isize + 1);

            let top_l = a;
            let top_r = avg(a, b);
            let bot_l = avg(a, c);
            let bot_r = ColorOps::average4_in(masks, a, b, c, d);

            let mid_l = avg(top_l, bot_l);
            let mid_r = avg(top_r, bot_r);

            top[x * 2] = boost(avg(top_l, mid_l));
            top[x * 2 + 1] = boost(avg(top_r, mid_r));
            bottom[x * 2] = scan(boost(avg(bot_l, mid_l)));
            bottom[x * 2 + 1] = scan(boost(avg(bot_r, mid_r)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{buffer, run};
    use super::super::FilterKind;
    use super::*;
    use crate::graphics::PixelFormat;

    #[test]
    fn test_flat_image_boost_and_scanlines() {
        let grey = PixelFormat::Rgb565.from_channels(16, 32, 16);
        let src = buffer(3, 3, &[grey; 9]);
        let dst = run(FilterKind::Monitor2x, &src);

        let lit = PixelFormat::Rgb565.from_channels(18, 36, 18);
        let dim = PixelFormat::Rgb565.from_channels(9, 18, 9);
        for y in 0..3 {
            assert_eq!(dst.row(y * 2), &[lit; 6]);
            assert_eq!(dst.row(y * 2 + 1), &[dim; 6]);
        }
    }

    #[test]
    fn test_boost_saturates_white() {
        let src = buffer(2, 2, &[0xFFFF; 4]);
        let dst = run(FilterKind::Monitor2x, &src);
        assert_eq!(dst.get(0, 0), 0xFFFF);
        assert_eq!(dst.get(0, 1), PixelFormat::Rgb565.from_channels(15, 31, 15));
    }
}
