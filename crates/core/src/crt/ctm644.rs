//! CTM644 4x filter
//!
//! Per source pixel: a slight horizontal smear driven by luma, then sixteen
//! lookups into the triad table following a fixed stripe/brightness pattern.

use super::lut::{LumaLut, TriadLut, TriadParams};
use crate::filters::clamped;
use crate::graphics::color::{blend_1_2_1, blend_3_1, blend_3_5};
use crate::logging::{log, LogCategory, LogLevel};
use crate::surface::{Region, RegionMut};

/// Luma margin a neighbour must exceed before it bleeds into the center
const BLEED_THRESHOLD: i32 = 8;

/// How brighter neighbours bleed into a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmearMode {
    /// Light bleed: 3/4 center, 1/4 neighbour
    HalfRes,
    /// Heavy bleed: 5/8 center, 3/8 neighbour
    FullRes,
}

impl SmearMode {
    /// Blend `c` with whichever of `l` and `r` is clearly brighter
    #[inline]
    pub fn apply(self, luma: &LumaLut, c: u16, l: u16, r: u16) -> u16 {
        if c == l && c == r {
            return c;
        }

        let t = luma.get(c) as i32 + BLEED_THRESHOLD;
        let bleed_l = luma.get(l) as i32 > t;
        let bleed_r = luma.get(r) as i32 > t;

        match (bleed_l, bleed_r, self) {
            (true, true, _) => blend_1_2_1(l, c, r),
            (true, false, SmearMode::HalfRes) => blend_3_1(c, l),
            (true, false, SmearMode::FullRes) => blend_3_5(l, c),
            (false, true, SmearMode::HalfRes) => blend_3_1(c, r),
            (false, true, SmearMode::FullRes) => blend_3_5(r, c),
            (false, false, _) => c,
        }
    }
}

/// Stripe channel and brightness phase for each position of a 4-row block
#[derive(Debug, PartialEq, Eq)]
pub struct TriadPattern {
    /// Columns before the pattern repeats
    pub width: usize,
    /// Stripe channel (0 red, 1 green, 2 blue) per row and column
    pub channel: [[u8; 12]; 4],
    /// Phase (0 dim, 1 bright) per row and column
    pub bright: [[u8; 12]; 4],
}

pub static PATTERN_HALF_RES: TriadPattern = TriadPattern {
    width: 6,
    channel: [
        [0, 1, 2, 0, 1, 2, 0, 0, 0, 0, 0, 0],
        [0, 1, 2, 0, 1, 2, 0, 0, 0, 0, 0, 0],
        [0, 1, 2, 0, 1, 2, 0, 0, 0, 0, 0, 0],
        [0, 1, 2, 0, 1, 2, 0, 0, 0, 0, 0, 0],
    ],
    bright: [
        [1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0],
        [1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0],
    ],
};

pub static PATTERN_FULL_RES: TriadPattern = TriadPattern {
    width: 12,
    channel: [
        [0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2],
        [0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2],
        [0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2],
        [0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2],
    ],
    bright: [
        [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
        [1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0],
        [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0],
    ],
};

/// CTM644 state: tables, pattern and smear strategy chosen at creation
#[derive(Debug)]
pub struct Ctm644 {
    params: TriadParams,
    smear: SmearMode,
    pattern: &'static TriadPattern,
    luma: LumaLut,
    triads: TriadLut,
}

impl Ctm644 {
    /// Build the tables for the given horizontal resolution mode
    pub fn new(half_res_x: bool) -> Self {
        Self::with_params(half_res_x, TriadParams::for_half_res_x(half_res_x))
    }

    /// Build with custom triad parameters
    pub fn with_params(half_res_x: bool, params: TriadParams) -> Self {
        let (smear, pattern) = if half_res_x {
            (SmearMode::HalfRes, &PATTERN_HALF_RES)
        } else {
            (SmearMode::FullRes, &PATTERN_FULL_RES)
        };

        log(LogCategory::Lut, LogLevel::Debug, || {
            format!("lut: building CTM644 tables ({:?})", smear)
        });

        Self {
            params,
            smear,
            pattern,
            luma: LumaLut::build(),
            triads: TriadLut::build(&params),
        }
    }

    pub fn params(&self) -> &TriadParams {
        &self.params
    }

    pub fn smear_mode(&self) -> SmearMode {
        self.smear
    }

    pub fn pattern(&self) -> &'static TriadPattern {
        self.pattern
    }

    pub fn luma(&self) -> &LumaLut {
        &self.luma
    }

    pub fn triads(&self) -> &TriadLut {
        &self.triads
    }

    pub fn apply(&self, src: &Region<'_>, dst: &mut RegionMut<'_>) {
        let pattern = self.pattern;
        let pw = pattern.width;

        for y in 0..src.height() {
            let row = src.row(y);
            let mut out = dst.rows_mut::<4>(y * 4);
            let mut pcx = 0;

            for x in 0..row.len() {
                let xi = x as isize;
                let s = self
                    .smear
                    .apply(&self.luma, row[x], clamped(row, xi - 1), clamped(row, xi + 1));

                for (pr, line) in out.iter_mut().enumerate() {
                    for k in 0..4 {
                        let pc = (pcx + k) % pw;
                        line[x * 4 + k] =
                            self.triads
                                .get(pattern.channel[pr][pc], pattern.bright[pr][pc], s);
                    }
                }

                pcx = (pcx + 4) % pw;
            }
        }
    }
}
