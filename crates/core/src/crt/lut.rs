//! Lookup tables for the CTM644 phosphor triad simulation
//!
//! Both tables are indexed by a raw RGB565 pixel. The triad table holds, for
//! every source color, what each of the three phosphor stripes looks like in
//! a bright and a dim phase; the per-frame filter is then only table lookups.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::graphics::format::{expand5to8, expand6to8};
use crate::logging::{log, LogCategory, LogLevel};

/// Entries per (channel, phase) plane
const PLANE: usize = 65536;
/// Phosphor stripes: red, green, blue
pub const TRIAD_CHANNELS: usize = 3;
/// Brightness phases: dim, bright
pub const TRIAD_PHASES: usize = 2;

/// Shaping parameters for the triad table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriadParams {
    /// Stripe intensity in the bright phase
    pub bright_factor: f32,
    /// Stripe intensity in the dim phase
    pub dim_factor: f32,
    /// How much of the full color leaks into the other stripes when bright
    pub triad_tint: f32,
    /// Same, for the dim phase
    pub triad_tint_dim: f32,
    /// Lowest channel value after shaping, 0..255
    pub black_floor: f32,
    /// Fraction of the other two channels mixed into each channel
    pub cross_bleed: f32,
    /// Extra gain on the stripe's own channel
    pub mask_gain: f32,
    /// Constant added to every output channel, 0..255
    pub subpixel_floor: f32,
    /// Input gain applied before gamma
    pub gain: f32,
    /// Gamma; values at or below zero mean 1.0
    pub gamma: f32,
    /// Black point lift on the 0..1 scale; zero or less disables it
    pub output_black_point: f32,
    /// Saturation around Rec.601 luma; exactly 1.0 disables it
    pub output_saturation: f32,
}

impl TriadParams {
    /// Tuning for sources with half horizontal resolution
    pub const fn half_res() -> Self {
        Self {
            bright_factor: 1.75,
            dim_factor: 0.45,
            triad_tint: 0.50,
            triad_tint_dim: 1.00,
            black_floor: 12.0,
            cross_bleed: 0.10,
            mask_gain: 1.66,
            subpixel_floor: 3.80,
            gain: 1.00,
            gamma: 0.75,
            output_black_point: 0.00,
            output_saturation: 1.20,
        }
    }

    /// Tuning for full horizontal resolution sources
    pub const fn full_res() -> Self {
        Self {
            bright_factor: 2.8,
            dim_factor: 0.6,
            triad_tint: 0.3,
            triad_tint_dim: 0.8,
            black_floor: 6.0,
            cross_bleed: 0.1,
            mask_gain: 2.2,
            subpixel_floor: 4.0,
            gain: 1.15,
            gamma: 0.90,
            output_black_point: 0.08,
            output_saturation: 1.0,
        }
    }

    /// Preset for the given horizontal resolution mode
    pub const fn for_half_res_x(half_res_x: bool) -> Self {
        if half_res_x {
            Self::half_res()
        } else {
            Self::full_res()
        }
    }
}

/// Approximate 0..255 luma for every RGB565 value
pub struct LumaLut {
    table: Box<[u8]>,
}

impl LumaLut {
    pub fn build() -> Self {
        let table: Vec<u8> = (0..PLANE as u32)
            .map(|p| {
                let r8 = expand5to8((p >> 11) & 0x1F) as u32;
                let g8 = expand6to8((p >> 5) & 0x3F) as u32;
                let b8 = expand5to8(p & 0x1F) as u32;
                ((r8 * 54 + g8 * 183 + b8 * 19) >> 8) as u8
            })
            .collect();
        Self {
            table: table.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn get(&self, pixel: u16) -> u8 {
        self.table[pixel as usize]
    }
}

impl std::fmt::Debug for LumaLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LumaLut")
            .field("entries", &self.table.len())
            .finish()
    }
}

/// (channel, phase, source pixel) -> output pixel
pub struct TriadLut {
    table: Box<[u16]>,
}

impl TriadLut {
    /// Fill all 3 x 2 x 65536 entries from `params`
    pub fn build(params: &TriadParams) -> Self {
        let started = Instant::now();

        let gamma = if params.gamma <= 0.0 { 1.0 } else { params.gamma };
        let inv_gamma = 1.0 / gamma;
        let mut gamma_table = [0.0f32; 256];
        for (i, g) in gamma_table.iter_mut().enumerate() {
            *g = 255.0 * (i as f32 / 255.0).powf(inv_gamma);
        }

        let mut table = vec![0u16; TRIAD_CHANNELS * TRIAD_PHASES * PLANE].into_boxed_slice();
        let floor = params.subpixel_floor;

        for p in 0..PLANE {
            let pixel = p as u16;
            let mut rgb = [
                expand5to8(((pixel >> 11) & 0x1F) as u32) as f32,
                expand6to8(((pixel >> 5) & 0x3F) as u32) as f32,
                expand5to8((pixel & 0x1F) as u32) as f32,
            ];

            for c in rgb.iter_mut() {
                let gained = (*c * params.gain).clamp(0.0, 255.0);
                *c = gamma_table[gained.round().clamp(0.0, 255.0) as usize];
                *c = apply_black_point(*c, params.output_black_point);
            }
            apply_saturation(&mut rgb, params.output_saturation);

            let [r, g, b] = rgb;
            let bleed = [
                r + params.cross_bleed * (g + b) * 0.5,
                g + params.cross_bleed * (r + b) * 0.5,
                b + params.cross_bleed * (r + g) * 0.5,
            ]
            .map(|v| v.max(params.black_floor));

            for phase in 0..TRIAD_PHASES {
                let (f, t) = if phase == 1 {
                    (params.bright_factor, params.triad_tint)
                } else {
                    (params.dim_factor, params.triad_tint_dim)
                };

                let full = bleed.map(|v| v * f);
                let mask = full.map(|v| v * params.mask_gain);

                for channel in 0..TRIAD_CHANNELS {
                    let mut out = [0.0f32; 3];
                    for k in 0..3 {
                        let own = if k == channel { (1.0 - t) * mask[k] } else { 0.0 };
                        out[k] = own + t * full[k] + floor;
                    }
                    table[Self::index(channel, phase, pixel)] = pack565(out);
                }
            }
        }

        log(LogCategory::Lut, LogLevel::Info, || {
            format!(
                "lut: built {} triad entries in {:?}",
                table.len(),
                started.elapsed()
            )
        });

        Self { table }
    }

    #[inline]
    fn index(channel: usize, phase: usize, pixel: u16) -> usize {
        (channel * TRIAD_PHASES + phase) * PLANE + pixel as usize
    }

    /// Output pixel for stripe `channel` (0..3) in `phase` (0 dim, 1 bright)
    #[inline]
    pub fn get(&self, channel: u8, phase: u8, pixel: u16) -> u16 {
        self.table[Self::index(channel as usize, phase as usize, pixel)]
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl PartialEq for TriadLut {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl std::fmt::Debug for TriadLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriadLut")
            .field("entries", &self.table.len())
            .finish()
    }
}

fn apply_black_point(v255: f32, bp: f32) -> f32 {
    if bp <= 0.0 {
        return v255;
    }
    let x = ((v255 / 255.0 - bp) / (1.0 - bp)).max(0.0);
    x * 255.0
}

fn apply_saturation(rgb: &mut [f32; 3], sat: f32) {
    if sat == 1.0 {
        return;
    }
    let y = 0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2];
    for c in rgb.iter_mut() {
        *c = y + (*c - y) * sat;
    }
}

/// Round and clamp 8-bit float channels into RGB565
fn pack565(rgb: [f32; 3]) -> u16 {
    let [r, g, b] = rgb.map(|v| v.clamp(0.0, 255.0).round() as u16);
    ((r & 0xF8) << 8) | ((g & 0xFC) << 3) | (b >> 3)
}
