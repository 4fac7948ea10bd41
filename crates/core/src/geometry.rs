//! Source/destination rectangles and presentation layout

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin
    pub const fn sized(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the rectangle lies inside a `width`x`height` area
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

/// Rectangles for one flip: the whole source surface into the whole scaled
/// surface
pub fn compute_rects(source: (usize, usize), scaled: (usize, usize)) -> (Rect, Rect) {
    (
        Rect::sized(source.0, source.1),
        Rect::sized(scaled.0, scaled.1),
    )
}

/// Where the scaled image lands on the output when aspect ratio is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentLayout {
    /// Integer multiple of the visible area that fits the output
    pub render_scale: usize,
    /// Destination rectangle on the output, centered
    pub dest: Rect,
}

impl PresentLayout {
    /// Largest integer scale of `visible` that fits in `output`, centered
    ///
    /// The scale never drops below 1; an output smaller than the visible area
    /// gets offsets clamped at 0 and the image overhangs.
    pub fn compute(output: (usize, usize), visible: (usize, usize)) -> Self {
        let (out_w, out_h) = output;
        let (vis_w, vis_h) = (visible.0.max(1), visible.1.max(1));

        let render_scale = (out_w / vis_w).min(out_h / vis_h).max(1);
        let width = vis_w * render_scale;
        let height = vis_h * render_scale;

        Self {
            render_scale,
            dest: Rect::new(
                out_w.saturating_sub(width) / 2,
                out_h.saturating_sub(height) / 2,
                width,
                height,
            ),
        }
    }
}
