mod image;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use log::info;
use vidfilter_core::backend::{DisplayBackend, HeadlessBackend};
use vidfilter_core::graphics::{HARDWARE_PALETTE, PALETTE_SIZE};
use vidfilter_core::logging::{LogConfig, LogLevel};
use vidfilter_core::plugin::{self, VideoPluginDescriptor};
use vidfilter_core::{ActivePlugin, Palette, PixelBuffer, VideoConfig};

#[derive(Parser)]
#[command(name = "vidfilter", about = "Run video plugins on a headless display")]
struct Args {
    /// List the selectable plugins and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Plugin name or table index (defaults to the configured plugin)
    #[arg(long)]
    plugin: Option<String>,

    /// PNG to use as the source frame instead of the test pattern
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the last presented output to this PNG
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of frames to flip
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Video configuration JSON (missing file means defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration back to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Source frames use half horizontal resolution
    #[arg(long, default_value_t = false)]
    half_res_x: bool,

    /// Source frames use half vertical resolution
    #[arg(long, default_value_t = false)]
    half_res_y: bool,

    /// TV 2x scanline darkening, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    scanlines: Option<u8>,

    /// Window scale
    #[arg(long)]
    scale: Option<usize>,

    /// Display depth in bits (15 or 16)
    #[arg(long, default_value_t = 16)]
    depth: u8,

    /// Drawable size reported by the display, e.g. 1920x1080
    #[arg(long)]
    output_size: Option<String>,

    /// Engine log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Send engine logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_size(s: &str) -> Result<(usize, usize)> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {}", s))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

fn resolve_plugin(name: &str) -> Result<&'static VideoPluginDescriptor> {
    if let Ok(index) = name.parse::<usize>() {
        return plugin::by_index(index).ok_or_else(|| anyhow!("No plugin at index {}", index));
    }
    Ok(plugin::lookup(name)?)
}

/// Color bars over the hardware palette, scrolling one column per frame,
/// above a checkerboard for the edge-sensitive filters
fn draw_test_pattern(buffer: &mut PixelBuffer, palette: &[u16; PALETTE_SIZE], frame: u32) {
    let (width, height) = buffer.size();
    if width == 0 {
        return;
    }
    for y in 0..height {
        for x in 0..width {
            let pixel = if y < height / 2 {
                let column = (x + frame as usize) % width;
                palette[column * PALETTE_SIZE / width]
            } else if (x / 4 + y / 4) % 2 == 0 {
                palette[20]
            } else {
                palette[11]
            };
            buffer.set(x, y, pixel);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let log_config = LogConfig::global();
    if let Some(level) = args.log_level.as_deref() {
        let level = LogLevel::from_str(level).ok_or_else(|| anyhow!("Unknown log level: {}", level))?;
        log_config.set_global_level(level);
    }
    if let Some(path) = args.log_file.clone() {
        log_config.set_log_file(path)?;
    }

    if args.list {
        for (index, p) in plugin::VIDEO_PLUGINS.iter().enumerate() {
            if p.hidden {
                continue;
            }
            println!("{:2}  {:<18} {}x{}", index, p.name, p.multiplier.0, p.multiplier.1);
        }
        return Ok(());
    }

    let mut config = match args.config.as_deref() {
        Some(path) => VideoConfig::load(path),
        None => VideoConfig::default(),
    };
    if let Some(name) = args.plugin.as_deref() {
        config.plugin = resolve_plugin(name)?.name.to_string();
    }
    config.half_res_x |= args.half_res_x;
    config.half_res_y |= args.half_res_y;
    if args.scanlines.is_some() {
        config.scanline_intensity = args.scanlines;
    }
    if let Some(scale) = args.scale {
        config.scale = scale;
    }

    if let Some(path) = args.save_config.as_deref() {
        config.save(path)?;
        info!("Saved configuration to {}", path.display());
    }

    let descriptor = resolve_plugin(&config.plugin)?;
    let mut backend = HeadlessBackend::new(args.depth);
    if let Some(size) = args.output_size.as_deref() {
        backend = backend.with_output_size(parse_size(size)?);
    }

    let mut active = ActivePlugin::init(descriptor, &mut backend, &config)?;
    active.set_palette(&mut backend, &Palette::from_colors(HARDWARE_PALETTE));

    let input = match args.input.as_deref() {
        Some(path) => Some(image::load_png(path)?),
        None => None,
    };

    info!(
        "Running {} on {} backend ({}x{} source, output {}x{})",
        active.name(),
        backend.name(),
        active.source().width(),
        active.source().height(),
        active.output_size().0,
        active.output_size().1
    );

    for frame in 0..args.frames {
        let palette = *active.palette_packed();
        match input.as_ref() {
            Some(image) => image.draw_into(active.source_mut()),
            None => draw_test_pattern(active.source_mut(), &palette, frame),
        }
        active.flip(&mut backend)?;
    }

    println!(
        "{}: {} frame(s) presented at {:?}",
        active.name(),
        backend.frames_presented(),
        backend.last_frame().map(|f| (f.width, f.height))
    );

    if let Some(path) = args.output.as_deref() {
        let Some(canvas) = backend.canvas() else {
            bail!("No frame was presented");
        };
        image::save_png(path, &canvas)?;
        info!("Wrote {}x{} output to {}", canvas.width(), canvas.height(), path.display());
    }

    active.close(&mut backend);
    log_config.clear_log_file();
    Ok(())
}
