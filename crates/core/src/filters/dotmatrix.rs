//! Dot matrix 2x
//!
//! Each output pixel loses a quarter of some channels according to a 4x4
//! pattern, which reads as a grid of separated dots.

use crate::graphics::PixelFormat;
use crate::surface::{Region, RegionMut};

#[rustfmt::skip]
const DOT_MATRIX_565: [u16; 16] = [
    0x01E0, 0x0007, 0x3800, 0x0000,
    0x39E7, 0x0000, 0x39E7, 0x0000,
    0x3800, 0x0000, 0x01E0, 0x0007,
    0x39E7, 0x0000, 0x39E7, 0x0000,
];

// Same pattern with the masks moved to the 5-5-5 channel positions
#[rustfmt::skip]
const DOT_MATRIX_555: [u16; 16] = [
    0x00E0, 0x0007, 0x1C00, 0x0000,
    0x1CE7, 0x0000, 0x1CE7, 0x0000,
    0x1C00, 0x0000, 0x00E0, 0x0007,
    0x1CE7, 0x0000, 0x1CE7, 0x0000,
];

fn pattern(format: PixelFormat) -> &'static [u16; 16] {
    match format {
        PixelFormat::Rgb565 => &DOT_MATRIX_565,
        PixelFormat::Rgb555 => &DOT_MATRIX_555,
    }
}

/// Darken `c` for output position (`row`, `col`)
#[inline]
fn dot(table: &[u16; 16], c: u16, row: usize, col: usize) -> u16 {
    c - ((c >> 2) & table[((row & 3) << 2) + (col & 3)])
}

pub fn apply(src: &Region<'_>, dst: &mut RegionMut<'_>) {
    let table = pattern(src.format());

    for y in 0..src.height() {
        let jj = y * 2;
        let [top, bottom] = dst.rows_mut::<2>(jj);
        for (x, &c) in src.row(y).iter().enumerate() {
            let ii = x * 2;
            top[ii] = dot(table, c, jj, ii);
            top[ii + 1] = dot(table, c, jj, ii + 1);
            bottom[ii] = dot(table, c, jj + 1, ii);
            bottom[ii + 1] = dot(table, c, jj + 1, ii + 1);
        }
    }
}
