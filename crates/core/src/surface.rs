//! Packed 16-bit pixel buffers and the row views filters work through
//!
//! A [`PixelBuffer`] owns its pixels and may carry padding at the end of each
//! row (`pitch` larger than `width * 2`). Filters never touch a buffer
//! directly; they receive a [`Region`] to read and a [`RegionMut`] to write,
//! both of which keep the parent's stride.

use crate::geometry::Rect;
use crate::graphics::PixelFormat;
use crate::{VideoError, VideoResult};

/// Owned row-major buffer of packed pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// Bytes per row
    pitch: usize,
    format: PixelFormat,
    pixels: Vec<u16>,
}

impl PixelBuffer {
    /// Create a tightly packed buffer filled with black
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pitch: width * format.bytes_per_pixel(),
            format,
            pixels: vec![0; width * height],
        }
    }

    /// Create a buffer whose rows are `pitch` bytes apart
    pub fn with_pitch(
        width: usize,
        height: usize,
        pitch: usize,
        format: PixelFormat,
    ) -> VideoResult<Self> {
        let bpp = format.bytes_per_pixel();
        if pitch < width * bpp || pitch % bpp != 0 {
            return Err(VideoError::InvalidPitch { pitch, width });
        }
        Ok(Self {
            width,
            height,
            pitch,
            format,
            pixels: vec![0; (pitch / bpp) * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Bytes per row
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Pixels per row, padding included
    pub fn stride(&self) -> usize {
        self.pitch / self.format.bytes_per_pixel()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw storage including row padding
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u16] {
        &mut self.pixels
    }

    /// Visible pixels of row `y`
    pub fn row(&self, y: usize) -> &[u16] {
        let start = y * self.stride();
        &self.pixels[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u16] {
        let start = y * self.stride();
        let width = self.width;
        &mut self.pixels[start..start + width]
    }

    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.row(y)[x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u16) {
        self.row_mut(y)[x] = value;
    }

    /// Fill every visible pixel
    pub fn fill(&mut self, value: u16) {
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }

    /// Copy rows from tightly packed `data`, converting from `format`
    pub fn load_packed(&mut self, data: &[u16], format: PixelFormat) -> VideoResult<()> {
        if data.len() != self.width * self.height {
            return Err(VideoError::InvalidGeometry(format!(
                "expected {} pixels, got {}",
                self.width * self.height,
                data.len()
            )));
        }
        let target = self.format;
        for (y, src) in data.chunks_exact(self.width.max(1)).enumerate() {
            for (d, &s) in self.row_mut(y).iter_mut().zip(src) {
                *d = format.convert(s, target);
            }
        }
        Ok(())
    }

    /// Visible pixels as a tightly packed vector
    pub fn to_packed(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }

    /// View over the whole buffer
    pub fn full_region(&self) -> Region<'_> {
        Region {
            data: &self.pixels,
            width: self.width,
            height: self.height,
            stride: self.stride(),
            format: self.format,
        }
    }

    /// Mutable view over the whole buffer
    pub fn full_region_mut(&mut self) -> RegionMut<'_> {
        let stride = self.stride();
        RegionMut {
            data: &mut self.pixels,
            width: self.width,
            height: self.height,
            stride,
            format: self.format,
        }
    }

    /// View over `rect`, which must lie inside the buffer
    pub fn region(&self, rect: Rect) -> VideoResult<Region<'_>> {
        let start = self.region_start(rect)?;
        Ok(Region {
            data: &self.pixels[start..],
            width: rect.width,
            height: rect.height,
            stride: self.stride(),
            format: self.format,
        })
    }

    /// Mutable view over `rect`, which must lie inside the buffer
    pub fn region_mut(&mut self, rect: Rect) -> VideoResult<RegionMut<'_>> {
        let start = self.region_start(rect)?;
        let stride = self.stride();
        Ok(RegionMut {
            data: &mut self.pixels[start..],
            width: rect.width,
            height: rect.height,
            stride,
            format: self.format,
        })
    }

    fn region_start(&self, rect: Rect) -> VideoResult<usize> {
        if !rect.fits_within(self.width, self.height) {
            return Err(VideoError::InvalidGeometry(format!(
                "region {:?} outside {}x{} buffer",
                rect, self.width, self.height
            )));
        }
        if rect.is_empty() {
            return Ok(self.pixels.len());
        }
        Ok(rect.y * self.stride() + rect.x)
    }

    /// Copy `source` into this buffer, converting the pixel format if needed
    ///
    /// Both buffers must have the same visible size.
    pub fn blit_from(&mut self, source: &PixelBuffer) -> VideoResult<()> {
        if source.size() != self.size() {
            return Err(VideoError::InvalidGeometry(format!(
                "blit {}x{} into {}x{}",
                source.width, source.height, self.width, self.height
            )));
        }
        let (from, to) = (source.format, self.format);
        for y in 0..self.height {
            let src = source.row(y);
            let dst = self.row_mut(y);
            if from == to {
                dst.copy_from_slice(src);
            } else {
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d = from.convert(s, to);
                }
            }
        }
        Ok(())
    }
}

/// Read-only rectangular view with the parent's stride
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    data: &'a [u16],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> Region<'a> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Row `y`, exactly `width` pixels long
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u16] {
        debug_assert!(y < self.height, "row {} outside region of {} rows", y, self.height);
        let data = self.data;
        let start = y * self.stride;
        &data[start..start + self.width]
    }

    /// Row `y` clamped into the region; empty for a region with no rows
    #[inline]
    pub fn row_clamped(&self, y: isize) -> &'a [u16] {
        if self.height == 0 {
            return &[];
        }
        self.row(y.clamp(0, self.height as isize - 1) as usize)
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u16 {
        self.row(y)[x]
    }
}

/// Writable rectangular view with the parent's stride
#[derive(Debug)]
pub struct RegionMut<'a> {
    data: &'a mut [u16],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> RegionMut<'a> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u16] {
        debug_assert!(y < self.height, "row {} outside region of {} rows", y, self.height);
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// `N` consecutive rows starting at `y`, borrowed together
    #[inline]
    pub fn rows_mut<const N: usize>(&mut self, y: usize) -> [&mut [u16]; N] {
        debug_assert!(y + N <= self.height, "rows {}..{} outside region", y, y + N);
        let (width, stride) = (self.width, self.stride);
        let mut rest: &mut [u16] = &mut self.data[y * stride..];
        std::array::from_fn(|_| {
            let taken = std::mem::take(&mut rest);
            let (head, tail) = taken.split_at_mut(stride.min(taken.len()));
            rest = tail;
            &mut head[..width]
        })
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u16) {
        self.row_mut(y)[x] = value;
    }
}
