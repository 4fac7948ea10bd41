//! TV 2x: pixel doubling with darkened odd lines

use crate::graphics::ColorOps;
use crate::surface::{Region, RegionMut};

/// Scanline brightness as a fraction `num / den`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tv2x {
    num: u32,
    den: u32,
}

impl Tv2x {
    /// 7/8 brightness by default; an intensity of `i` gives `(100 - i) / 100`
    pub fn new(scanline_intensity: Option<u8>) -> Self {
        match scanline_intensity {
            Some(i) => Self {
                num: 100 - u32::from(i.min(100)),
                den: 100,
            },
            None => Self { num: 7, den: 8 },
        }
    }

    /// Scanline brightness as (numerator, denominator)
    pub fn brightness(&self) -> (u32, u32) {
        (self.num, self.den)
    }

    pub fn apply(&self, src: &Region<'_>, dst: &mut RegionMut<'_>) {
        let format = src.format();
        for y in 0..src.height() {
            let [top, bottom] = dst.rows_mut::<2>(y * 2);
            for (x, &p) in src.row(y).iter().enumerate() {
                let dark = ColorOps::scale_brightness_in(format, p, self.num, self.den);
                top[x * 2] = p;
                top[x * 2 + 1] = p;
                bottom[x * 2] = dark;
                bottom[x * 2 + 1] = dark;
            }
        }
    }
}

impl Default for Tv2x {
    fn default() -> Self {
        Self::new(None)
    }
}
