//! PNG input and output for the demo host

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{bail, Context, Result};
use vidfilter_core::{PixelBuffer, PixelFormat};

/// Decoded image as 8-bit RGB triples
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Nearest-neighbour sample at `(x, y)` of a `width`x`height` grid
    fn sample(&self, x: usize, y: usize, width: usize, height: usize) -> (u8, u8, u8) {
        let sx = x * self.width / width;
        let sy = y * self.height / height;
        let i = (sy * self.width + sx) * 3;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Fill `buffer` with this image, resampled to the buffer's size
    pub fn draw_into(&self, buffer: &mut PixelBuffer) {
        let (width, height) = buffer.size();
        let format = buffer.format();
        if self.width == 0 || self.height == 0 {
            return;
        }
        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = self.sample(x, y, width, height);
                buffer.set(x, y, format.from_rgb8(r, g, b));
            }
        }
    }
}

pub fn load_png(path: &Path) -> Result<RgbImage> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut decoder = png::Decoder::new(file);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => bail!("unsupported PNG color type {:?}", other),
    };

    let mut data = Vec::with_capacity(info.width as usize * info.height as usize * 3);
    for px in bytes.chunks_exact(channels) {
        if channels < 3 {
            data.extend_from_slice(&[px[0], px[0], px[0]]);
        } else {
            data.extend_from_slice(&px[..3]);
        }
    }

    Ok(RgbImage {
        width: info.width as usize,
        height: info.height as usize,
        data,
    })
}

/// Expand packed 16-bit pixels to 8-bit RGB
pub fn buffer_to_rgb(buffer: &PixelBuffer) -> Vec<u8> {
    let format: PixelFormat = buffer.format();
    let mut out = Vec::with_capacity(buffer.width() * buffer.height() * 3);
    for y in 0..buffer.height() {
        for &p in buffer.row(y) {
            let (r, g, b) = format.to_rgb8(p);
            out.extend_from_slice(&[r, g, b]);
        }
    }
    out
}

pub fn save_png(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, buffer.width() as u32, buffer.height() as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&buffer_to_rgb(buffer))?;
    Ok(())
}
