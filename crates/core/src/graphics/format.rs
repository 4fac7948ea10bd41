//! 16-bit packed pixel formats
//!
//! Every surface the engine touches stores one `u16` per pixel in either the
//! 5-6-5 or the 5-5-5 channel layout. The layout is chosen once when a buffer
//! is created and never changes afterwards.
//!
//! The interpolation code does not unpack channels; it relies on per-format
//! bitmasks that clear the low bit (or low two bits) of every channel so that
//! two (or four) pixels can be added and shifted without carries leaking from
//! one channel into the next. [`ColorMasks`] holds those masks.

use serde::{Deserialize, Serialize};

/// Packed 16-bit channel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 5 bits red, 6 bits green, 5 bits blue
    Rgb565,
    /// 1 unused bit, 5 bits red, 5 bits green, 5 bits blue
    Rgb555,
}

/// Masks used by the carry-safe packed arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMasks {
    /// Every channel with its lowest bit cleared
    pub color: u16,
    /// The lowest bit of every channel
    pub low_pixel: u16,
    /// Every channel with its two lowest bits cleared
    pub qcolor: u16,
    /// The two lowest bits of every channel
    pub qlow_pixel: u16,
    /// Red and blue channels
    pub red_blue: u16,
    /// Green channel
    pub green: u16,
}

const MASKS_565: ColorMasks = ColorMasks {
    color: 0xF7DE,
    low_pixel: 0x0821,
    qcolor: 0xE79C,
    qlow_pixel: 0x1863,
    red_blue: 0xF81F,
    green: 0x07E0,
};

const MASKS_555: ColorMasks = ColorMasks {
    color: 0x7BDE,
    low_pixel: 0x0421,
    qcolor: 0x739C,
    qlow_pixel: 0x0C63,
    red_blue: 0x7C1F,
    green: 0x03E0,
};

impl PixelFormat {
    /// Color depth as reported to the display backend
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            PixelFormat::Rgb565 => 16,
            PixelFormat::Rgb555 => 15,
        }
    }

    /// Bytes per pixel in a buffer of this format
    pub fn bytes_per_pixel(self) -> usize {
        2
    }

    /// Interpolation masks for this layout
    #[inline]
    pub fn masks(self) -> &'static ColorMasks {
        match self {
            PixelFormat::Rgb565 => &MASKS_565,
            PixelFormat::Rgb555 => &MASKS_555,
        }
    }

    /// Bit shift of the red channel
    #[inline]
    pub fn red_shift(self) -> u32 {
        match self {
            PixelFormat::Rgb565 => 11,
            PixelFormat::Rgb555 => 10,
        }
    }

    /// Width in bits of the green channel
    #[inline]
    pub fn green_bits(self) -> u32 {
        match self {
            PixelFormat::Rgb565 => 6,
            PixelFormat::Rgb555 => 5,
        }
    }

    /// Maximum raw value of each channel, as (red, green, blue)
    #[inline]
    pub fn channel_max(self) -> (u32, u32, u32) {
        (0x1F, (1 << self.green_bits()) - 1, 0x1F)
    }

    /// Split a pixel into its raw channel values
    #[inline]
    pub fn channels(self, pixel: u16) -> (u32, u32, u32) {
        let p = pixel as u32;
        let (_, g_max, _) = self.channel_max();
        ((p >> self.red_shift()) & 0x1F, (p >> 5) & g_max, p & 0x1F)
    }

    /// Join raw channel values into a pixel
    ///
    /// Values must already be within [`channel_max`](Self::channel_max).
    #[inline]
    pub fn from_channels(self, r: u32, g: u32, b: u32) -> u16 {
        ((r << self.red_shift()) | (g << 5) | b) as u16
    }

    /// Expand a pixel to 8 bits per channel using bit replication
    #[inline]
    pub fn to_rgb8(self, pixel: u16) -> (u8, u8, u8) {
        let (r, g, b) = self.channels(pixel);
        let g8 = match self {
            PixelFormat::Rgb565 => expand6to8(g),
            PixelFormat::Rgb555 => expand5to8(g),
        };
        (expand5to8(r), g8, expand5to8(b))
    }

    /// Truncate 8-bit channels into a packed pixel
    #[inline]
    pub fn from_rgb8(self, r: u8, g: u8, b: u8) -> u16 {
        let g_drop = 8 - self.green_bits();
        self.from_channels((r >> 3) as u32, (g >> g_drop) as u32, (b >> 3) as u32)
    }

    /// Re-encode a pixel of this format into `target`
    #[inline]
    pub fn convert(self, pixel: u16, target: PixelFormat) -> u16 {
        match (self, target) {
            (PixelFormat::Rgb565, PixelFormat::Rgb555) => {
                ((pixel >> 1) & 0x7FE0) | (pixel & 0x001F)
            }
            (PixelFormat::Rgb555, PixelFormat::Rgb565) => {
                let g5 = (pixel >> 5) & 0x1F;
                ((pixel & 0x7C00) << 1) | (g5 << 6) | ((g5 >> 4) << 5) | (pixel & 0x001F)
            }
            _ => pixel,
        }
    }

    /// Map a backend bit depth onto a 16-bit layout
    pub fn from_bits_per_pixel(bits: u8) -> Option<Self> {
        match bits {
            15 => Some(PixelFormat::Rgb555),
            16 => Some(PixelFormat::Rgb565),
            _ => None,
        }
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::Rgb565
    }
}

/// Replicate a 5-bit channel to 8 bits
#[inline]
pub fn expand5to8(v5: u32) -> u8 {
    ((v5 << 3) | (v5 >> 2)) as u8
}

/// Replicate a 6-bit channel to 8 bits
#[inline]
pub fn expand6to8(v6: u32) -> u8 {
    ((v6 << 2) | (v6 >> 4)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_partition_the_word() {
        for format in [PixelFormat::Rgb565, PixelFormat::Rgb555] {
            let m = format.masks();
            assert_eq!(m.color & m.low_pixel, 0);
            assert_eq!(m.qcolor & m.qlow_pixel, 0);
            assert_eq!(m.red_blue & m.green, 0);
            assert_eq!(m.color | m.low_pixel, m.red_blue | m.green);
            assert_eq!(m.qcolor | m.qlow_pixel, m.red_blue | m.green);
        }
    }

    #[test]
    fn test_channels_roundtrip_565() {
        let f = PixelFormat::Rgb565;
        assert_eq!(f.channels(0xFFFF), (31, 63, 31));
        assert_eq!(f.channels(0xF800), (31, 0, 0));
        assert_eq!(f.channels(0x07E0), (0, 63, 0));
        assert_eq!(f.from_channels(1, 2, 3), 0x0843);
    }

    #[test]
    fn test_channels_555() {
        let f = PixelFormat::Rgb555;
        assert_eq!(f.channels(0x7FFF), (31, 31, 31));
        assert_eq!(f.channels(0x7C00), (31, 0, 0));
        assert_eq!(f.from_channels(31, 31, 31), 0x7FFF);
    }

    #[test]
    fn test_expand_extremes() {
        assert_eq!(expand5to8(0), 0);
        assert_eq!(expand5to8(31), 255);
        assert_eq!(expand6to8(63), 255);
        assert_eq!(PixelFormat::Rgb565.to_rgb8(0xFFFF), (255, 255, 255));
        assert_eq!(PixelFormat::Rgb555.to_rgb8(0x7FFF), (255, 255, 255));
    }

    #[test]
    fn test_from_rgb8_truncates() {
        assert_eq!(PixelFormat::Rgb565.from_rgb8(255, 255, 255), 0xFFFF);
        assert_eq!(PixelFormat::Rgb565.from_rgb8(255, 0, 0), 0xF800);
        assert_eq!(PixelFormat::Rgb555.from_rgb8(0, 255, 0), 0x03E0);
    }

    #[test]
    fn test_convert_between_layouts() {
        let white = PixelFormat::Rgb565.convert(0xFFFF, PixelFormat::Rgb555);
        assert_eq!(white, 0x7FFF);
        let back = PixelFormat::Rgb555.convert(0x7FFF, PixelFormat::Rgb565);
        assert_eq!(back, 0xFFFF);
        assert_eq!(PixelFormat::Rgb565.convert(0x1234, PixelFormat::Rgb565), 0x1234);
    }

    #[test]
    fn test_from_bits_per_pixel() {
        assert_eq!(PixelFormat::from_bits_per_pixel(16), Some(PixelFormat::Rgb565));
        assert_eq!(PixelFormat::from_bits_per_pixel(15), Some(PixelFormat::Rgb555));
        assert_eq!(PixelFormat::from_bits_per_pixel(32), None);
        for format in [PixelFormat::Rgb565, PixelFormat::Rgb555] {
            assert_eq!(PixelFormat::from_bits_per_pixel(format.bits_per_pixel()), Some(format));
        }
    }
}
