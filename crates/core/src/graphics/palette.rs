//! Hardware color set handed to the active plugin
//!
//! The emulator core resolves ink/pen numbers to one of 32 hardware colors
//! before the frame reaches this crate. The plugin only needs those 32 RGB
//! values: indexed surfaces receive them through the display backend, and
//! true-color surfaces use the packed form to translate color indices into
//! pixels.

use serde::{Deserialize, Serialize};

use super::format::PixelFormat;

/// Number of entries in a hardware palette
pub const PALETTE_SIZE: usize = 32;

/// 8-bit per channel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into a 16-bit pixel
    #[inline]
    pub fn pack(self, format: PixelFormat) -> u16 {
        format.from_rgb8(self.r, self.g, self.b)
    }
}

/// Ordered set of 32 hardware colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Create a palette with every entry black
    pub fn new() -> Self {
        Self {
            colors: [Rgb::default(); PALETTE_SIZE],
        }
    }

    /// Create a palette from a full color list
    pub fn from_colors(colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Get a color, or black for an index past the end
    pub fn get(&self, index: usize) -> Rgb {
        self.colors.get(index).copied().unwrap_or_default()
    }

    /// Set a color; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
        }
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Pack every entry into the given layout
    pub fn packed(&self, format: PixelFormat) -> [u16; PALETTE_SIZE] {
        let mut out = [0u16; PALETTE_SIZE];
        for (slot, color) in out.iter_mut().zip(self.colors.iter()) {
            *slot = color.pack(format);
        }
        out
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// The 32 hardware colors of the emulated machine's gate array
///
/// Entries 16..31 repeat values from the first half, the way the hardware
/// decodes them.
pub const HARDWARE_PALETTE: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0x80, 0x80, 0x80), // white
    Rgb::new(0x80, 0x80, 0x80), // white
    Rgb::new(0x00, 0xFF, 0x80), // sea green
    Rgb::new(0xFF, 0xFF, 0x80), // pastel yellow
    Rgb::new(0x00, 0x00, 0x80), // blue
    Rgb::new(0xFF, 0x00, 0x80), // purple
    Rgb::new(0x00, 0x80, 0x80), // cyan
    Rgb::new(0xFF, 0x80, 0x80), // pink
    Rgb::new(0xFF, 0x00, 0x80), // purple
    Rgb::new(0xFF, 0xFF, 0x80), // pastel yellow
    Rgb::new(0xFF, 0xFF, 0x00), // bright yellow
    Rgb::new(0xFF, 0xFF, 0xFF), // bright white
    Rgb::new(0xFF, 0x00, 0x00), // bright red
    Rgb::new(0xFF, 0x00, 0xFF), // bright magenta
    Rgb::new(0xFF, 0x80, 0x00), // orange
    Rgb::new(0xFF, 0x80, 0xFF), // pastel magenta
    Rgb::new(0x00, 0x00, 0x80), // blue
    Rgb::new(0x00, 0xFF, 0x80), // sea green
    Rgb::new(0x00, 0xFF, 0x00), // bright green
    Rgb::new(0x00, 0xFF, 0xFF), // bright cyan
    Rgb::new(0x00, 0x00, 0x00), // black
    Rgb::new(0x00, 0x00, 0xFF), // bright blue
    Rgb::new(0x00, 0x80, 0x00), // green
    Rgb::new(0x00, 0x80, 0xFF), // sky blue
    Rgb::new(0x80, 0x00, 0x80), // magenta
    Rgb::new(0x80, 0xFF, 0x80), // pastel green
    Rgb::new(0x80, 0xFF, 0x00), // lime
    Rgb::new(0x80, 0xFF, 0xFF), // pastel cyan
    Rgb::new(0x80, 0x00, 0x00), // red
    Rgb::new(0x80, 0x00, 0xFF), // mauve
    Rgb::new(0x80, 0x80, 0x00), // yellow
    Rgb::new(0x80, 0x80, 0xFF), // pastel blue
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_defaults_to_black() {
        let palette = Palette::new();
        for i in 0..PALETTE_SIZE {
            assert_eq!(palette.get(i), Rgb::new(0, 0, 0));
        }
    }

    #[test]
    fn test_palette_set_get() {
        let mut palette = Palette::new();
        palette.set(3, Rgb::new(0xFF, 0x80, 0x00));
        assert_eq!(palette.get(3), Rgb::new(0xFF, 0x80, 0x00));
    }

    #[test]
    fn test_palette_out_of_bounds() {
        let mut palette = Palette::new();
        assert_eq!(palette.get(40), Rgb::default());
        // Must not panic
        palette.set(40, Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_packed_palette() {
        let palette = Palette::from_colors(HARDWARE_PALETTE);
        let packed = palette.packed(PixelFormat::Rgb565);
        assert_eq!(packed[11], 0xFFFF); // bright white
        assert_eq!(packed[20], 0x0000); // black
        assert_eq!(packed[12], 0xF800); // bright red

        let packed555 = palette.packed(PixelFormat::Rgb555);
        assert_eq!(packed555[11], 0x7FFF);
        assert_eq!(packed555[18], 0x03E0); // bright green
    }
}
