//! In-memory display backend
//!
//! Runs the full plugin lifecycle without a window system. Presented frames
//! are recorded so hosts can save them and tests can inspect them.

use super::DisplayBackend;
use crate::config::FullscreenMode;
use crate::geometry::Rect;
use crate::graphics::{PixelFormat, Rgb, PALETTE_SIZE};
use crate::logging::{log, LogCategory, LogLevel};
use crate::surface::PixelBuffer;
use crate::{VideoError, VideoResult};

/// Copy of one presented surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedFrame {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    /// Tightly packed pixels, without the surface's row padding
    pub pixels: Vec<u16>,
    /// Destination on the output, `None` for a full-output stretch
    pub dest: Option<Rect>,
}

/// Display backend that keeps everything in memory
#[derive(Debug)]
pub struct HeadlessBackend {
    bits_per_pixel: u8,
    /// Drawable size reported for desktop fullscreen or forced by the host
    forced_output: Option<(usize, usize)>,
    output: Option<(usize, usize)>,
    /// Allocations left before `create_buffer` starts failing
    allocations_left: Option<usize>,
    allocations: usize,
    /// Extra pixels at the end of every buffer row
    row_padding: usize,
    last_frame: Option<PresentedFrame>,
    frames_presented: u64,
    palette_updates: u64,
    last_palette: Option<[Rgb; PALETTE_SIZE]>,
}

impl HeadlessBackend {
    /// Backend whose output has `bits_per_pixel` depth
    ///
    /// The depth is checked when buffers are created, so an unsupported depth
    /// surfaces as an init failure the same way a real display would.
    pub fn new(bits_per_pixel: u8) -> Self {
        Self {
            bits_per_pixel,
            forced_output: None,
            output: None,
            allocations_left: None,
            allocations: 0,
            row_padding: 0,
            last_frame: None,
            frames_presented: 0,
            palette_updates: 0,
            last_palette: None,
        }
    }

    /// Report `size` as the drawable size whatever the requested window is
    pub fn with_output_size(mut self, size: (usize, usize)) -> Self {
        self.forced_output = Some(size);
        self
    }

    /// Let `count` buffer allocations succeed, then fail every further one
    pub fn fail_allocation_after(mut self, count: usize) -> Self {
        self.allocations_left = Some(count);
        self
    }

    /// Hand out buffers whose rows carry `pixels` of padding, as display
    /// surfaces with an aligned pitch do
    pub fn with_row_padding(mut self, pixels: usize) -> Self {
        self.row_padding = pixels;
        self
    }

    pub fn is_open(&self) -> bool {
        self.output.is_some()
    }

    /// Buffers handed out so far
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn palette_updates(&self) -> u64 {
        self.palette_updates
    }

    pub fn last_palette(&self) -> Option<&[Rgb; PALETTE_SIZE]> {
        self.last_palette.as_ref()
    }

    pub fn last_frame(&self) -> Option<&PresentedFrame> {
        self.last_frame.as_ref()
    }

    /// Compose the last frame onto a black output-sized canvas
    ///
    /// The frame is stretched with nearest-neighbour sampling into its
    /// destination rectangle, or over the whole output when it has none.
    pub fn canvas(&self) -> Option<PixelBuffer> {
        let frame = self.last_frame.as_ref()?;
        let (out_w, out_h) = self.output.unwrap_or((frame.width, frame.height));
        let dest = frame.dest.unwrap_or(Rect::sized(out_w, out_h));

        let mut canvas = PixelBuffer::new(out_w, out_h, frame.format);
        if dest.is_empty() || frame.width == 0 || frame.height == 0 {
            return Some(canvas);
        }

        for dy in 0..dest.height {
            let y = dest.y + dy;
            if y >= out_h {
                break;
            }
            let sy = dy * frame.height / dest.height;
            let src_row = &frame.pixels[sy * frame.width..(sy + 1) * frame.width];
            let row = canvas.row_mut(y);
            for dx in 0..dest.width {
                let x = dest.x + dx;
                if x >= out_w {
                    break;
                }
                row[x] = src_row[dx * frame.width / dest.width];
            }
        }
        Some(canvas)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(16)
    }
}

impl DisplayBackend for HeadlessBackend {
    fn open_output(
        &mut self,
        width: usize,
        height: usize,
        mode: FullscreenMode,
    ) -> VideoResult<(usize, usize)> {
        if width == 0 || height == 0 {
            return Err(VideoError::OutputCreation(format!(
                "cannot open a {}x{} output",
                width, height
            )));
        }
        let size = self.forced_output.unwrap_or((width, height));
        self.output = Some(size);
        log(LogCategory::Present, LogLevel::Info, || {
            format!(
                "headless: output {}x{} ({:?}, requested {}x{})",
                size.0, size.1, mode, width, height
            )
        });
        Ok(size)
    }

    fn output_size(&self) -> (usize, usize) {
        self.output.unwrap_or((0, 0))
    }

    fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    fn create_buffer(
        &mut self,
        width: usize,
        height: usize,
        bits_per_pixel: u8,
    ) -> VideoResult<PixelBuffer> {
        let format = PixelFormat::from_bits_per_pixel(bits_per_pixel)
            .ok_or(VideoError::UnsupportedDepth(bits_per_pixel))?;

        if let Some(left) = self.allocations_left.as_mut() {
            if *left == 0 {
                return Err(VideoError::SurfaceAllocation {
                    width,
                    height,
                    bits_per_pixel,
                });
            }
            *left -= 1;
        }

        self.allocations += 1;
        log(LogCategory::Surface, LogLevel::Debug, || {
            format!(
                "headless: buffer {}x{} at {} bpp",
                width, height, bits_per_pixel
            )
        });
        if self.row_padding == 0 {
            return Ok(PixelBuffer::new(width, height, format));
        }
        let pitch = (width + self.row_padding) * format.bytes_per_pixel();
        PixelBuffer::with_pitch(width, height, pitch, format)
    }

    fn set_palette_entries(&mut self, _buffer: &PixelBuffer, colors: &[Rgb; PALETTE_SIZE]) {
        self.palette_updates += 1;
        self.last_palette = Some(*colors);
    }

    fn present(&mut self, buffer: &PixelBuffer, dest: Option<Rect>) -> VideoResult<()> {
        if !self.is_open() {
            return Err(VideoError::Present("output is not open".to_string()));
        }
        self.last_frame = Some(PresentedFrame {
            width: buffer.width(),
            height: buffer.height(),
            format: buffer.format(),
            pixels: buffer.to_packed(),
            dest,
        });
        self.frames_presented += 1;
        Ok(())
    }

    fn close_output(&mut self) {
        if self.output.take().is_some() {
            log(LogCategory::Present, LogLevel::Info, || {
                "headless: output closed".to_string()
            });
        }
    }

    fn name(&self) -> &str {
        "Headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reports_requested_size() {
        let mut backend = HeadlessBackend::default();
        let size = backend
            .open_output(768, 540, FullscreenMode::Windowed)
            .unwrap();
        assert_eq!(size, (768, 540));
        assert!(backend.is_open());
        backend.close_output();
        assert!(!backend.is_open());
        assert_eq!(backend.output_size(), (0, 0));
    }

    #[test]
    fn test_forced_output_size() {
        let mut backend = HeadlessBackend::default().with_output_size((1920, 1080));
        let size = backend.open_output(768, 540, FullscreenMode::Desktop).unwrap();
        assert_eq!(size, (1920, 1080));
    }

    #[test]
    fn test_rejects_unsupported_depth() {
        let mut backend = HeadlessBackend::new(24);
        let err = backend.create_buffer(4, 4, 24).unwrap_err();
        assert!(matches!(err, VideoError::UnsupportedDepth(24)));
        assert_eq!(backend.allocations(), 0);
    }

    #[test]
    fn test_buffer_format_follows_depth() {
        let mut backend = HeadlessBackend::new(15);
        let buffer = backend.create_buffer(4, 2, 15).unwrap();
        assert_eq!(buffer.format(), PixelFormat::Rgb555);
        let buffer = backend.create_buffer(4, 2, 16).unwrap();
        assert_eq!(buffer.format(), PixelFormat::Rgb565);
    }

    #[test]
    fn test_row_padding_widens_pitch() {
        let mut backend = HeadlessBackend::default().with_row_padding(3);
        let buffer = backend.create_buffer(5, 2, 16).unwrap();
        assert_eq!(buffer.size(), (5, 2));
        assert_eq!(buffer.pitch(), 16);
        assert_eq!(buffer.stride(), 8);
    }

    #[test]
    fn test_allocation_failure_after_budget() {
        let mut backend = HeadlessBackend::default().fail_allocation_after(1);
        assert!(backend.create_buffer(2, 2, 16).is_ok());
        let err = backend.create_buffer(2, 2, 16).unwrap_err();
        assert!(matches!(err, VideoError::SurfaceAllocation { .. }));
        assert_eq!(backend.allocations(), 1);
    }

    #[test]
    fn test_present_requires_open_output() {
        let mut backend = HeadlessBackend::default();
        let buffer = PixelBuffer::new(2, 2, PixelFormat::Rgb565);
        assert!(backend.present(&buffer, None).is_err());
        assert_eq!(backend.frames_presented(), 0);
    }

    #[test]
    fn test_canvas_centers_frame() {
        let mut backend = HeadlessBackend::default().with_output_size((6, 4));
        backend.open_output(2, 2, FullscreenMode::Desktop).unwrap();

        let mut buffer = PixelBuffer::new(2, 2, PixelFormat::Rgb565);
        buffer.fill(0xFFFF);
        backend
            .present(&buffer, Some(Rect::new(2, 1, 2, 2)))
            .unwrap();

        let canvas = backend.canvas().unwrap();
        assert_eq!(canvas.size(), (6, 4));
        assert_eq!(canvas.get(0, 0), 0x0000);
        assert_eq!(canvas.get(2, 1), 0xFFFF);
        assert_eq!(canvas.get(3, 2), 0xFFFF);
        assert_eq!(canvas.get(4, 2), 0x0000);
    }

    #[test]
    fn test_canvas_stretches_without_dest() {
        let mut backend = HeadlessBackend::default();
        backend.open_output(4, 4, FullscreenMode::Windowed).unwrap();

        let mut buffer = PixelBuffer::new(2, 2, PixelFormat::Rgb565);
        buffer.set(1, 1, 0xF800);
        backend.present(&buffer, None).unwrap();

        let canvas = backend.canvas().unwrap();
        assert_eq!(canvas.get(3, 3), 0xF800);
        assert_eq!(canvas.get(2, 2), 0xF800);
        assert_eq!(canvas.get(1, 1), 0x0000);
    }

    #[test]
    fn test_palette_updates_recorded() {
        let mut backend = HeadlessBackend::default();
        let buffer = PixelBuffer::new(1, 1, PixelFormat::Rgb565);
        let colors = [Rgb::new(1, 2, 3); PALETTE_SIZE];
        backend.set_palette_entries(&buffer, &colors);
        assert_eq!(backend.palette_updates(), 1);
        assert_eq!(backend.last_palette().unwrap()[0], Rgb::new(1, 2, 3));
    }
}
