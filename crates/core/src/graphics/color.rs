//! Packed-pixel color arithmetic
//!
//! All operations work directly on 16-bit words. Averages use the masks from
//! [`ColorMasks`]: dropping the low bit(s) of each channel before adding makes
//! the sum fit inside the channel, and the dropped bits are recovered
//! separately. This keeps the hot loops free of per-channel unpacking.
//!
//! The plain functions (`average2`, `average4`, `scale_brightness`) operate on
//! RGB565. The `_in` variants take the layout explicitly.

use super::format::{ColorMasks, PixelFormat};

/// Packed color operation utilities
pub struct ColorOps;

impl ColorOps {
    /// Per-channel mean of two RGB565 pixels
    ///
    /// # Example
    ///
    /// ```
    /// use vidfilter_core::graphics::ColorOps;
    ///
    /// assert_eq!(ColorOps::average2(0xF800, 0xF800), 0xF800);
    /// assert_eq!(ColorOps::average2(0x0000, 0xF800), 0x7800);
    /// ```
    #[inline]
    pub fn average2(a: u16, b: u16) -> u16 {
        Self::average2_in(PixelFormat::Rgb565.masks(), a, b)
    }

    /// Per-channel mean of two pixels using the given masks
    ///
    /// Identical inputs are returned unchanged.
    #[inline]
    pub fn average2_in(masks: &ColorMasks, a: u16, b: u16) -> u16 {
        if a == b {
            return a;
        }
        ((a & masks.color) >> 1) + ((b & masks.color) >> 1) + (a & b & masks.low_pixel)
    }

    /// Per-channel mean of four RGB565 pixels
    #[inline]
    pub fn average4(a: u16, b: u16, c: u16, d: u16) -> u16 {
        Self::average4_in(PixelFormat::Rgb565.masks(), a, b, c, d)
    }

    /// Per-channel mean of four pixels using the given masks
    #[inline]
    pub fn average4_in(masks: &ColorMasks, a: u16, b: u16, c: u16, d: u16) -> u16 {
        let q = masks.qcolor as u32;
        let ql = masks.qlow_pixel as u32;
        let (a, b, c, d) = (a as u32, b as u32, c as u32, d as u32);

        let x = ((a & q) >> 2) + ((b & q) >> 2) + ((c & q) >> 2) + ((d & q) >> 2);
        let y = ((a & ql) + (b & ql) + (c & ql) + (d & ql)) >> 2;
        (x + (y & ql)) as u16
    }

    /// Multiply every RGB565 channel by `num / den`, saturating
    #[inline]
    pub fn scale_brightness(pixel: u16, num: u32, den: u32) -> u16 {
        Self::scale_brightness_in(PixelFormat::Rgb565, pixel, num, den)
    }

    /// Multiply every channel by `num / den`, saturating at the channel depth
    #[inline]
    pub fn scale_brightness_in(format: PixelFormat, pixel: u16, num: u32, den: u32) -> u16 {
        debug_assert!(den != 0, "brightness denominator must be non-zero");
        let (r, g, b) = format.channels(pixel);
        let (r_max, g_max, b_max) = format.channel_max();

        let r = (r * num / den).min(r_max);
        let g = (g * num / den).min(g_max);
        let b = (b * num / den).min(b_max);

        format.from_channels(r, g, b)
    }
}

// CTM644 blends. RGB565 only.
const HALF_MASK: u16 = 0xF7DE;
const QUARTER_MASK: u16 = 0xE79C;
const EIGHTH_MASK: u16 = 0xC718;

/// 1/4 L + 1/2 C + 1/4 R
#[inline]
pub fn blend_1_2_1(l: u16, c: u16, r: u16) -> u16 {
    let outer = ((l & QUARTER_MASK) as u32 + (r & QUARTER_MASK) as u32) >> 1;
    ((outer + (c & HALF_MASK) as u32) >> 1) as u16
}

/// 3/4 C + 1/4 N
#[inline]
pub fn blend_3_1(c: u16, n: u16) -> u16 {
    ((c & HALF_MASK) >> 1) + ((c & QUARTER_MASK) >> 2) + ((n & QUARTER_MASK) >> 2)
}

/// 3/8 A + 5/8 B
#[inline]
pub fn blend_3_5(a: u16, b: u16) -> u16 {
    ((a & QUARTER_MASK) >> 2)
        + ((a & EIGHTH_MASK) >> 3)
        + ((b & HALF_MASK) >> 1)
        + ((b & EIGHTH_MASK) >> 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average2_identity_for_every_value() {
        for a in 0..=u16::MAX {
            assert_eq!(ColorOps::average2(a, a), a);
        }
    }

    #[test]
    fn test_average4_identity_for_every_value() {
        for a in 0..=u16::MAX {
            assert_eq!(ColorOps::average4(a, a, a, a), a, "value {:04X}", a);
        }
    }

    #[test]
    fn test_average4_identity_555() {
        let masks = PixelFormat::Rgb555.masks();
        for a in 0..=0x7FFFu16 {
            assert_eq!(ColorOps::average4_in(masks, a, a, a, a), a);
            assert_eq!(ColorOps::average2_in(masks, a, a), a);
        }
    }

    #[test]
    fn test_average2_no_cross_channel_carry() {
        // Full blue and black must not spill into green
        assert_eq!(ColorOps::average2(0x001F, 0x0000), 0x000F);
        // Full green and black
        assert_eq!(ColorOps::average2(0x07E0, 0x0000), 0x03E0);
        // White and black land on mid grey with low bits dropped
        assert_eq!(ColorOps::average2(0xFFFF, 0x0000), 0x7BEF);
    }

    #[test]
    fn test_average2_recovers_shared_low_bits() {
        // Both blues are odd: 1 and 3 average to 2
        assert_eq!(ColorOps::average2(0x0001, 0x0003), 0x0002);
    }

    #[test]
    fn test_average4_of_black_and_white() {
        let v = ColorOps::average4(0xFFFF, 0xFFFF, 0x0000, 0x0000);
        let (r, g, b) = PixelFormat::Rgb565.channels(v);
        assert_eq!((r, g, b), (15, 31, 15));
    }

    #[test]
    fn test_scale_brightness_darkens_and_clamps() {
        assert_eq!(ColorOps::scale_brightness(0xFFFF, 7, 8), PixelFormat::Rgb565.from_channels(27, 55, 27));
        assert_eq!(ColorOps::scale_brightness(0xFFFF, 9, 8), 0xFFFF);
        assert_eq!(ColorOps::scale_brightness(0x0000, 9, 8), 0x0000);
        assert_eq!(ColorOps::scale_brightness(0x8410, 1, 2), PixelFormat::Rgb565.from_channels(8, 16, 8));
    }

    #[test]
    fn test_scale_brightness_matches_masked_tv_darkening() {
        // The classic masked formula used for scanlines must agree with the
        // unpacked one for 7/8.
        let m = PixelFormat::Rgb565.masks();
        for p in (0..=u16::MAX).step_by(7) {
            let masked = (((((p & m.red_blue) as u32) * 7) >> 3) as u16 & m.red_blue)
                | (((((p & m.green) as u32) * 7) >> 3) as u16 & m.green);
            assert_eq!(ColorOps::scale_brightness(p, 7, 8), masked);
        }
    }

    #[test]
    fn test_crt_blends_are_identity_on_uniform_input() {
        for c in [0x0000u16, 0xFFFF, 0xF800, 0x07E0, 0x001F] {
            let approx = |v: u16| {
                let (r0, g0, b0) = PixelFormat::Rgb565.channels(c);
                let (r1, g1, b1) = PixelFormat::Rgb565.channels(v);
                // masked blends drop low bits, so they bias slightly darker
                r0.abs_diff(r1) <= 3 && g0.abs_diff(g1) <= 3 && b0.abs_diff(b1) <= 3
            };
            assert!(approx(blend_1_2_1(c, c, c)), "1:2:1 {:04X}", c);
            assert!(approx(blend_3_1(c, c)), "3:1 {:04X}", c);
            assert!(approx(blend_3_5(c, c)), "3:5 {:04X}", c);
        }
    }

    #[test]
    fn test_blend_3_1_leans_to_center() {
        let v = blend_3_1(0xF800, 0x0000);
        let (r, _, _) = PixelFormat::Rgb565.channels(v);
        assert!(r >= 22 && r <= 24, "got red {}", r);
    }
}
