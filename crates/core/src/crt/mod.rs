//! CRT phosphor simulation
//!
//! [`Ctm644`] expands every source pixel into a 4x4 block of phosphor triad
//! stripes. Colors come from [`lut::TriadLut`], built once when the filter is
//! created and dropped with it.

pub mod ctm644;
pub mod lut;

pub use ctm644::{Ctm644, SmearMode, TriadPattern};
pub use lut::{LumaLut, TriadLut, TriadParams};
