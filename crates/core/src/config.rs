//! Video settings shared by the host and the active plugin

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filters::FilterOptions;
use crate::logging::{log, LogCategory, LogLevel};
use crate::{VideoResult, VISIBLE_HEIGHT, VISIBLE_WIDTH};

/// How the output window is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FullscreenMode {
    /// Regular window of `visible * scale`
    Windowed,
    /// Borderless window covering the desktop at its current resolution
    Desktop,
    /// Exclusive mode switch to the window size
    Exclusive,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Name of the selected plugin
    pub plugin: String,
    /// Window size as a multiple of the visible area
    pub scale: usize,
    pub fullscreen: bool,
    /// Use an exclusive mode switch instead of desktop fullscreen
    pub full_screen_exclusive: bool,
    /// Keep the image at an integer multiple, centered, instead of stretching
    pub preserve_aspect_ratio: bool,
    /// Source frames are rendered at half horizontal resolution
    pub half_res_x: bool,
    /// Source frames are rendered at half vertical resolution
    pub half_res_y: bool,
    /// TV 2x scanline darkening in percent; `None` keeps the classic 7/8
    pub scanline_intensity: Option<u8>,
    pub visible_width: usize,
    pub visible_height: usize,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            plugin: "Direct".to_string(),
            scale: 2,
            fullscreen: false,
            full_screen_exclusive: false,
            preserve_aspect_ratio: true,
            half_res_x: false,
            half_res_y: false,
            scanline_intensity: None,
            visible_width: VISIBLE_WIDTH,
            visible_height: VISIBLE_HEIGHT,
        }
    }
}

impl VideoConfig {
    /// Load from a JSON file, falling back to defaults
    ///
    /// A missing file is silent; a file that does not parse is reported and
    /// ignored.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log(LogCategory::Plugin, LogLevel::Warn, || {
                        format!(
                            "Warning: Failed to parse {}: {}. Using defaults.",
                            path.display(),
                            e
                        )
                    });
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write as pretty-printed JSON
    pub fn save(&self, path: &Path) -> VideoResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn fullscreen_mode(&self) -> FullscreenMode {
        match (self.fullscreen, self.full_screen_exclusive) {
            (false, _) => FullscreenMode::Windowed,
            (true, false) => FullscreenMode::Desktop,
            (true, true) => FullscreenMode::Exclusive,
        }
    }

    /// Native source frame size, halved on each axis in half-res mode
    pub fn source_size(&self) -> (usize, usize) {
        (
            self.visible_width * (2 - usize::from(self.half_res_x)),
            self.visible_height * (2 - usize::from(self.half_res_y)),
        )
    }

    /// Requested window size
    pub fn window_size(&self) -> (usize, usize) {
        let scale = self.scale.max(1);
        (self.visible_width * scale, self.visible_height * scale)
    }

    pub fn visible_size(&self) -> (usize, usize) {
        (self.visible_width, self.visible_height)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            half_res_x: self.half_res_x,
            scanline_intensity: self.scanline_intensity,
        }
    }
}
