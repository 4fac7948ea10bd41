//! Pixel formats, packed color math and palettes
//!
//! Everything above this module (filters, the CRT tables, surfaces) works on
//! packed 16-bit words and goes through these helpers for channel access.

pub mod color;
pub mod format;
pub mod palette;

pub use color::ColorOps;
pub use format::{ColorMasks, PixelFormat};
pub use palette::{Palette, Rgb, HARDWARE_PALETTE, PALETTE_SIZE};
