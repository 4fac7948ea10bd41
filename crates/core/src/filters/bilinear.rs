//! Software bilinear 2x

use super::clamped;
use crate::graphics::ColorOps;
use crate::surface::{Region, RegionMut};

/// ```text
/// A B      A        (A+B)/2
/// C D  =>  (A+C)/2  (A+B+C+D)/4
/// ```
///
/// The last source row has nothing below it and is doubled as is.
pub fn apply(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    let masks = src.format().masks();
    let height = src.height();

    for y in 0..height {
        let cur = src.row(y);
        let [top, bottom] = dst.rows_mut::<2>(y * 2);

        if y == height - 1 {
            for (x, &a) in cur.iter().enumerate() {
                top[x * 2] = a;
                top[x * 2 + 1] = a;
                bottom[x * 2] = a;
                bottom[x * 2 + 1] = a;
            }
            continue;
        }

        let below = src.row(y + 1);
        for x in 0..cur.len() {
            let a = cur[x];
            let b = clamped(cur, x as isize + 1);
            let c = below[x];
            let d = clamped(below, x as isize + 1);

            top[x * 2] = a;
            top[x * 2 + 1] = ColorOps::average2_in(masks, a, b);
            bottom[x * 2] = ColorOps::average2_in(masks, a, c);
            bottom[x * 2 + 1] = ColorOps::average4_in(masks, a, b, c, d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{buffer, run};
    use super::super::FilterKind;
    use crate::graphics::ColorOps;

    #[test]
    fn test_last_row_duplicated() {
        let src = buffer(1, 2, &[0x0000, 0xFFFF]);
        let dst = run(FilterKind::Bilinear, &src);
        assert_eq!(dst.size(), (2, 4));
        // Second source row is the last one: plain copy
        assert_eq!(dst.row(2), &[0xFFFF, 0xFFFF]);
        assert_eq!(dst.row(3), &[0xFFFF, 0xFFFF]);
        // First row blends toward the row below
        assert_eq!(dst.row(0), &[0x0000, 0x0000]);
        assert_eq!(dst.row(1)[0], ColorOps::average2(0x0000, 0xFFFF));
    }

    #[test]
    fn test_horizontal_blend() {
        let src = buffer(2, 2, &[0xF800, 0x001F, 0xF800, 0x001F]);
        let dst = run(FilterKind::Bilinear, &src);
        assert_eq!(dst.get(0, 0), 0xF800);
        assert_eq!(dst.get(1, 0), ColorOps::average2(0xF800, 0x001F));
        // Right edge clamps to itself
        assert_eq!(dst.get(3, 0), 0x001F);
    }
}
