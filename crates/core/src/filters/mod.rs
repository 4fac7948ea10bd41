//! Software scaling filters
//!
//! Every filter reads a source [`Region`] and writes all of a destination
//! [`RegionMut`] exactly `multiplier` times larger on each axis. Neighbours
//! past the edge of the source are replaced by the nearest edge pixel.

pub mod bicubic;
pub mod bilinear;
pub mod direct;
pub mod dotmatrix;
pub mod monitor;
pub mod scale2x;
pub mod supereagle;
pub mod tv2x;

use serde::{Deserialize, Serialize};

use crate::crt::Ctm644;
use crate::graphics::PixelFormat;
use crate::logging::{log, LogCategory, LogLevel};
use crate::surface::{Region, RegionMut};
use crate::{VideoError, VideoResult};

pub use tv2x::Tv2x;

/// Available filter algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Unscaled copy
    Direct,
    /// 2xSaI-family edge-directed interpolation
    SuperEagle,
    /// Edge-preserving pixel doubling
    Scale2x,
    /// Scale2x with 2xSaI-style blending on edges
    AdvancedScale2x,
    /// Doubling with darkened odd lines
    Tv2x,
    /// 2x2 bilinear interpolation
    Bilinear,
    /// Cubic B-spline interpolation
    Bicubic,
    /// LCD-style dot pattern
    DotMatrix,
    /// Softened bilinear with scanlines
    Monitor2x,
    /// 4x CRT phosphor triad simulation
    Ctm644,
}

impl FilterKind {
    /// Every filter, in menu order
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Direct,
        FilterKind::SuperEagle,
        FilterKind::Scale2x,
        FilterKind::AdvancedScale2x,
        FilterKind::Tv2x,
        FilterKind::Bilinear,
        FilterKind::Bicubic,
        FilterKind::DotMatrix,
        FilterKind::Monitor2x,
        FilterKind::Ctm644,
    ];

    /// Get the name of the filter for display
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Direct => "Direct",
            FilterKind::SuperEagle => "Super eagle",
            FilterKind::Scale2x => "Scale2x",
            FilterKind::AdvancedScale2x => "Advanced Scale2x",
            FilterKind::Tv2x => "TV 2x",
            FilterKind::Bilinear => "Bilinear",
            FilterKind::Bicubic => "Bicubic",
            FilterKind::DotMatrix => "Dot matrix",
            FilterKind::Monitor2x => "Monitor 2x",
            FilterKind::Ctm644 => "CTM644 4x",
        }
    }

    /// Output size factor as (x, y)
    pub fn multiplier(&self) -> (usize, usize) {
        match self {
            FilterKind::Direct => (1, 1),
            FilterKind::Ctm644 => (4, 4),
            _ => (2, 2),
        }
    }

    /// Cycle to the next filter in the sequence
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Whether the filter can run on surfaces of `format`
    pub fn supports(&self, format: PixelFormat) -> bool {
        match self {
            FilterKind::Ctm644 => format == PixelFormat::Rgb565,
            _ => true,
        }
    }
}

impl Default for FilterKind {
    fn default() -> Self {
        FilterKind::Direct
    }
}

/// Settings that change how some filters are built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    /// Source frames use half horizontal resolution
    pub half_res_x: bool,
    /// Scanline darkening for TV 2x, 0..=100
    pub scanline_intensity: Option<u8>,
}

/// A ready-to-run filter with any state it needs
#[derive(Debug)]
pub enum Filter {
    Direct,
    SuperEagle,
    Scale2x,
    AdvancedScale2x,
    Tv2x(Tv2x),
    Bilinear,
    Bicubic,
    DotMatrix,
    Monitor2x,
    Ctm644(Box<Ctm644>),
}

impl Filter {
    /// Prepare a filter for surfaces of `format`
    ///
    /// CTM644 builds its lookup tables here.
    pub fn new(kind: FilterKind, options: &FilterOptions, format: PixelFormat) -> VideoResult<Self> {
        if !kind.supports(format) {
            return Err(VideoError::UnsupportedFormat {
                plugin: kind.name(),
                format,
            });
        }

        log(LogCategory::Filter, LogLevel::Debug, || {
            format!("filter: preparing {} for {:?}", kind.name(), format)
        });

        Ok(match kind {
            FilterKind::Direct => Filter::Direct,
            FilterKind::SuperEagle => Filter::SuperEagle,
            FilterKind::Scale2x => Filter::Scale2x,
            FilterKind::AdvancedScale2x => Filter::AdvancedScale2x,
            FilterKind::Tv2x => Filter::Tv2x(Tv2x::new(options.scanline_intensity)),
            FilterKind::Bilinear => Filter::Bilinear,
            FilterKind::Bicubic => Filter::Bicubic,
            FilterKind::DotMatrix => Filter::DotMatrix,
            FilterKind::Monitor2x => Filter::Monitor2x,
            FilterKind::Ctm644 => Filter::Ctm644(Box::new(Ctm644::new(options.half_res_x))),
        })
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Direct => FilterKind::Direct,
            Filter::SuperEagle => FilterKind::SuperEagle,
            Filter::Scale2x => FilterKind::Scale2x,
            Filter::AdvancedScale2x => FilterKind::AdvancedScale2x,
            Filter::Tv2x(_) => FilterKind::Tv2x,
            Filter::Bilinear => FilterKind::Bilinear,
            Filter::Bicubic => FilterKind::Bicubic,
            Filter::DotMatrix => FilterKind::DotMatrix,
            Filter::Monitor2x => FilterKind::Monitor2x,
            Filter::Ctm644(_) => FilterKind::Ctm644,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn multiplier(&self) -> (usize, usize) {
        self.kind().multiplier()
    }

    /// Run the filter over `src`, filling all of `dst`
    pub fn transform(&self, src: &Region<'_>, dst: &mut RegionMut<'_>) {
        let (mx, my) = self.multiplier();
        debug_assert_eq!(dst.width(), src.width() * mx, "destination width");
        debug_assert_eq!(dst.height(), src.height() * my, "destination height");
        debug_assert_eq!(src.format(), dst.format(), "mixed pixel formats");

        if src.width() == 0 || src.height() == 0 {
            return;
        }

        match self {
            Filter::Direct => direct::apply(src, dst),
            Filter::SuperEagle => supereagle::apply(src, dst),
            Filter::Scale2x => scale2x::apply(src, dst),
            Filter::AdvancedScale2x => scale2x::apply_advanced(src, dst),
            Filter::Tv2x(tv) => tv.apply(src, dst),
            Filter::Bilinear => bilinear::apply(src, dst),
            Filter::Bicubic => bicubic::apply(src, dst),
            Filter::DotMatrix => dotmatrix::apply(src, dst),
            Filter::Monitor2x => monitor::apply(src, dst),
            Filter::Ctm644(ctm) => ctm.apply(src, dst),
        }
    }
}

/// Pixel `x` of `row`, clamped to the row's ends
#[inline]
pub(crate) fn clamped(row: &[u16], x: isize) -> u16 {
    row[x.clamp(0, row.len() as isize - 1) as usize]
}
