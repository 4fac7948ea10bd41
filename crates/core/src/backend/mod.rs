//! Display backend abstraction
//!
//! The video plugins never talk to a window system directly. Everything they
//! need from the outside world (an output window, surfaces in the display's
//! pixel depth, palette uploads, presentation) goes through this trait.

mod headless;

pub use headless::{HeadlessBackend, PresentedFrame};

use crate::config::FullscreenMode;
use crate::geometry::Rect;
use crate::graphics::{Rgb, PALETTE_SIZE};
use crate::surface::PixelBuffer;
use crate::VideoResult;

/// Display backend trait
pub trait DisplayBackend {
    /// Create the output window and return its drawable size
    ///
    /// In desktop fullscreen the drawable size is the desktop's, not the
    /// requested one.
    fn open_output(
        &mut self,
        width: usize,
        height: usize,
        mode: FullscreenMode,
    ) -> VideoResult<(usize, usize)>;

    /// Drawable size of the open output, or (0, 0) when closed
    fn output_size(&self) -> (usize, usize);

    /// Pixel depth of the output, in bits
    fn bits_per_pixel(&self) -> u8;

    /// Allocate a surface the backend can present
    fn create_buffer(
        &mut self,
        width: usize,
        height: usize,
        bits_per_pixel: u8,
    ) -> VideoResult<PixelBuffer>;

    /// Upload palette entries for an indexed surface
    ///
    /// True-color surfaces ignore this.
    fn set_palette_entries(&mut self, buffer: &PixelBuffer, colors: &[Rgb; PALETTE_SIZE]);

    /// Show `buffer`, stretched into `dest` or over the whole output
    fn present(&mut self, buffer: &PixelBuffer, dest: Option<Rect>) -> VideoResult<()>;

    /// Tear down the output window
    fn close_output(&mut self);

    /// Get the backend name (for debugging)
    fn name(&self) -> &str;
}
