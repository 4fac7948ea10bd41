//! Video plugin table and the active plugin lifecycle
//!
//! A plugin pairs a filter with the surfaces it needs. The host picks a
//! descriptor from [`VIDEO_PLUGINS`], calls [`ActivePlugin::init`], writes each
//! emulated frame into [`ActivePlugin::source_mut`], then calls
//! [`ActivePlugin::flip`]. [`ActivePlugin::close`] consumes the plugin and
//! releases everything it owns.

use crate::backend::DisplayBackend;
use crate::config::VideoConfig;
use crate::filters::{Filter, FilterKind};
use crate::geometry::{compute_rects, PresentLayout};
use crate::graphics::{Palette, PixelFormat, PALETTE_SIZE};
use crate::logging::{log, LogCategory, LogLevel};
use crate::surface::PixelBuffer;
use crate::{VideoError, VideoResult};

/// Static description of a selectable plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoPluginDescriptor {
    pub name: &'static str,
    /// Kept so saved configurations still resolve; never offered in menus
    pub hidden: bool,
    pub kind: FilterKind,
    /// Scaled surface size relative to the source, as (x, y)
    pub multiplier: (usize, usize),
}

impl VideoPluginDescriptor {
    const fn new(name: &'static str, hidden: bool, kind: FilterKind, mult: usize) -> Self {
        Self {
            name,
            hidden,
            kind,
            multiplier: (mult, mult),
        }
    }

    /// Whether frames go through a filter into a scaled surface
    pub fn is_scaled(&self) -> bool {
        self.kind != FilterKind::Direct
    }
}

/// Every plugin, in menu order
pub static VIDEO_PLUGINS: [VideoPluginDescriptor; 13] = [
    VideoPluginDescriptor::new("Direct", false, FilterKind::Direct, 1),
    VideoPluginDescriptor::new("Direct double", true, FilterKind::Direct, 1),
    VideoPluginDescriptor::new("Half size", true, FilterKind::Direct, 1),
    VideoPluginDescriptor::new("Double size", true, FilterKind::Direct, 1),
    VideoPluginDescriptor::new("Super eagle", false, FilterKind::SuperEagle, 2),
    VideoPluginDescriptor::new("Scale2x", false, FilterKind::Scale2x, 2),
    VideoPluginDescriptor::new("Advanced Scale2x", false, FilterKind::AdvancedScale2x, 2),
    VideoPluginDescriptor::new("TV 2x", false, FilterKind::Tv2x, 2),
    VideoPluginDescriptor::new("Software bilinear", false, FilterKind::Bilinear, 2),
    VideoPluginDescriptor::new("Software bicubic", false, FilterKind::Bicubic, 2),
    VideoPluginDescriptor::new("Dot matrix", false, FilterKind::DotMatrix, 2),
    VideoPluginDescriptor::new("Monitor 2x", false, FilterKind::Monitor2x, 2),
    VideoPluginDescriptor::new("CTM644 4x", false, FilterKind::Ctm644, 4),
];

/// Look up a plugin by name, ignoring ASCII case
pub fn find(name: &str) -> Option<&'static VideoPluginDescriptor> {
    VIDEO_PLUGINS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// Look up a plugin by name, failing with [`VideoError::UnknownPlugin`]
pub fn lookup(name: &str) -> VideoResult<&'static VideoPluginDescriptor> {
    find(name).ok_or_else(|| VideoError::UnknownPlugin(name.to_string()))
}

pub fn by_index(index: usize) -> Option<&'static VideoPluginDescriptor> {
    VIDEO_PLUGINS.get(index)
}

/// Plugins offered for interactive selection
pub fn visible() -> impl Iterator<Item = &'static VideoPluginDescriptor> {
    VIDEO_PLUGINS.iter().filter(|p| !p.hidden)
}

/// Surfaces used by scaled plugins
#[derive(Debug)]
struct ScaledSurfaces {
    /// Filter output
    scaled: PixelBuffer,
    /// Backend surface the scaled image is copied into for presentation
    display: PixelBuffer,
}

/// A plugin between `init` and `close`
#[derive(Debug)]
pub struct ActivePlugin {
    descriptor: &'static VideoPluginDescriptor,
    filter: Filter,
    source: PixelBuffer,
    scaled: Option<ScaledSurfaces>,
    layout: Option<PresentLayout>,
    output_size: (usize, usize),
    palette: [u16; PALETTE_SIZE],
    frames: u64,
}

impl ActivePlugin {
    /// Open the output and allocate every surface the plugin needs
    ///
    /// Either the whole plugin comes up or the output is closed again and
    /// the error returned; no surface outlives a failed init.
    pub fn init(
        descriptor: &'static VideoPluginDescriptor,
        backend: &mut dyn DisplayBackend,
        config: &VideoConfig,
    ) -> VideoResult<Self> {
        log(LogCategory::Plugin, LogLevel::Info, || {
            format!(
                "plugin: init {} on {} backend",
                descriptor.name,
                backend.name()
            )
        });

        let (width, height) = config.window_size();
        let output_size = backend.open_output(width, height, config.fullscreen_mode())?;

        match Self::build(descriptor, backend, config, output_size) {
            Ok(plugin) => Ok(plugin),
            Err(e) => {
                log(LogCategory::Plugin, LogLevel::Error, || {
                    format!("plugin: {} failed to init: {}", descriptor.name, e)
                });
                backend.close_output();
                Err(e)
            }
        }
    }

    fn build(
        descriptor: &'static VideoPluginDescriptor,
        backend: &mut dyn DisplayBackend,
        config: &VideoConfig,
        output_size: (usize, usize),
    ) -> VideoResult<Self> {
        let depth = backend.bits_per_pixel();
        let format =
            PixelFormat::from_bits_per_pixel(depth).ok_or(VideoError::UnsupportedDepth(depth))?;

        // Fail on capability before allocating anything
        if !descriptor.kind.supports(format) {
            return Err(VideoError::UnsupportedFormat {
                plugin: descriptor.name,
                format,
            });
        }

        let (src_w, src_h) = config.source_size();
        let source = backend.create_buffer(src_w, src_h, depth)?;

        let scaled = if descriptor.is_scaled() {
            let (mx, my) = descriptor.multiplier;
            let scaled = backend.create_buffer(src_w * mx, src_h * my, depth)?;
            let display = backend.create_buffer(src_w * mx, src_h * my, depth)?;
            Some(ScaledSurfaces { scaled, display })
        } else {
            None
        };

        let filter = Filter::new(descriptor.kind, &config.filter_options(), format)?;

        let layout = if config.preserve_aspect_ratio {
            Some(PresentLayout::compute(output_size, config.visible_size()))
        } else {
            None
        };

        if let Some(layout) = layout {
            log(LogCategory::Plugin, LogLevel::Debug, || {
                format!(
                    "plugin: render scale {} at {:?} on {}x{} output",
                    layout.render_scale, layout.dest, output_size.0, output_size.1
                )
            });
        }

        Ok(Self {
            descriptor,
            filter,
            source,
            scaled,
            layout,
            output_size,
            palette: Palette::new().packed(format),
            frames: 0,
        })
    }

    pub fn descriptor(&self) -> &'static VideoPluginDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn format(&self) -> PixelFormat {
        self.source.format()
    }

    /// Drawable size reported by the backend at init
    pub fn output_size(&self) -> (usize, usize) {
        self.output_size
    }

    pub fn layout(&self) -> Option<PresentLayout> {
        self.layout
    }

    /// Frames flipped since init
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// Surface the host renders each frame into
    pub fn source_mut(&mut self) -> &mut PixelBuffer {
        &mut self.source
    }

    /// Last filter output, for scaled plugins
    pub fn scaled(&self) -> Option<&PixelBuffer> {
        self.scaled.as_ref().map(|s| &s.scaled)
    }

    /// Install the hardware palette
    ///
    /// Every surface the plugin owns gets the entries through the backend,
    /// which only matters for indexed surfaces. The packed form is kept for
    /// [`ActivePlugin::palette_packed`].
    pub fn set_palette(&mut self, backend: &mut dyn DisplayBackend, palette: &Palette) {
        self.palette = palette.packed(self.format());
        backend.set_palette_entries(&self.source, palette.colors());
        if let Some(surfaces) = self.scaled.as_ref() {
            backend.set_palette_entries(&surfaces.scaled, palette.colors());
            backend.set_palette_entries(&surfaces.display, palette.colors());
        }
        log(LogCategory::Plugin, LogLevel::Trace, || {
            format!("plugin: palette updated for {}", self.descriptor.name)
        });
    }

    /// Packed pixel for each hardware color, in the surface format
    pub fn palette_packed(&self) -> &[u16; PALETTE_SIZE] {
        &self.palette
    }

    /// Filter the source frame and present it
    pub fn flip(&mut self, backend: &mut dyn DisplayBackend) -> VideoResult<()> {
        let dest = self.layout.map(|l| l.dest);

        match self.scaled.as_mut() {
            None => backend.present(&self.source, dest)?,
            Some(surfaces) => {
                let (src_rect, dst_rect) =
                    compute_rects(self.source.size(), surfaces.scaled.size());
                let src = self.source.region(src_rect)?;
                let mut dst = surfaces.scaled.region_mut(dst_rect)?;
                self.filter.transform(&src, &mut dst);

                surfaces.display.blit_from(&surfaces.scaled)?;
                backend.present(&surfaces.display, dest)?;
            }
        }

        self.frames += 1;
        log(LogCategory::Present, LogLevel::Trace, || {
            format!("plugin: frame {} presented", self.frames)
        });
        Ok(())
    }

    /// Release every surface and close the output
    pub fn close(self, backend: &mut dyn DisplayBackend) {
        log(LogCategory::Plugin, LogLevel::Info, || {
            format!(
                "plugin: closing {} after {} frames",
                self.descriptor.name, self.frames
            )
        });
        drop(self);
        backend.close_output();
    }
}
