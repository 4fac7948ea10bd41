//! Pixel scaling and CRT simulation for emulator framebuffers.
//!
//! The emulator core writes a low-resolution frame of packed 16-bit pixels
//! into the source surface of the active video plugin. On every flip the
//! plugin runs its filter into a scaled surface and hands the result to a
//! [`backend::DisplayBackend`] for presentation.

pub mod backend;
pub mod config;
pub mod crt;
pub mod filters;
pub mod geometry;
pub mod graphics;
pub mod logging;
pub mod plugin;
pub mod surface;

use thiserror::Error;

pub use config::{FullscreenMode, VideoConfig};
pub use filters::{Filter, FilterKind};
pub use geometry::{PresentLayout, Rect};
pub use graphics::{Palette, PixelFormat, Rgb};
pub use plugin::{ActivePlugin, VideoPluginDescriptor, VIDEO_PLUGINS};
pub use surface::{PixelBuffer, Region, RegionMut};

/// Visible width of the emulated display, in native pixels
pub const VISIBLE_WIDTH: usize = 384;
/// Visible height of the emulated display, in native pixels
pub const VISIBLE_HEIGHT: usize = 270;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Could not allocate {width}x{height} surface at {bits_per_pixel} bpp")]
    SurfaceAllocation {
        width: usize,
        height: usize,
        bits_per_pixel: u8,
    },
    #[error("Unsupported bit depth: {0} bpp (only 15 and 16 are supported)")]
    UnsupportedDepth(u8),
    #[error("Plugin {plugin} does not support {format:?} surfaces")]
    UnsupportedFormat {
        plugin: &'static str,
        format: PixelFormat,
    },
    #[error("Could not open display output: {0}")]
    OutputCreation(String),
    #[error("Unknown video plugin: {0}")]
    UnknownPlugin(String),
    #[error("Invalid pitch {pitch} for a row of {width} pixels")]
    InvalidPitch { pitch: usize, width: usize },
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Presentation failed: {0}")]
    Present(String),
    #[error("Configuration I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("Configuration format error: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

pub type VideoResult<T> = Result<T, VideoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VideoError::UnsupportedDepth(32);
        assert_eq!(
            err.to_string(),
            "Unsupported bit depth: 32 bpp (only 15 and 16 are supported)"
        );

        let err = VideoError::UnknownPlugin("Scale9x".to_string());
        assert_eq!(err.to_string(), "Unknown video plugin: Scale9x");

        let err = VideoError::UnsupportedFormat {
            plugin: "CTM644 4x",
            format: PixelFormat::Rgb555,
        };
        assert_eq!(
            err.to_string(),
            "Plugin CTM644 4x does not support Rgb555 surfaces"
        );
    }

    #[test]
    fn test_visible_area_matches_default_config() {
        let config = VideoConfig::default();
        assert_eq!(config.visible_width, VISIBLE_WIDTH);
        assert_eq!(config.visible_height, VISIBLE_HEIGHT);
    }
}
