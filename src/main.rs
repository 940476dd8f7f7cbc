//! relief: turn an image into a backlit relief panel.
//!
//! Writes a binary STL solid plus two heightmaps next to the input image:
//! `<stem>_W<width>mm.stl`, `<stem>_W<width>mm_height_16bit.tif` and
//! `<stem>_W<width>mm_height_mm.tif`.
//!
//! # Logging
//!
//! `RUST_LOG` overrides the `-v` flags, e.g. `RUST_LOG=relief_panel_rs=debug`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};

use relief_panel_rs::logger::{self, info, warn};
use relief_panel_rs::relief_pipeline::thickness::params::MIN_TARGET_WIDTH_PX;
use relief_panel_rs::relief_pipeline::{
    HeightmapConfig, ImageToReliefPipeline, PreviewScale, ReliefConfig, ReliefParams,
    TiffCompression, resolve_out_base,
};

/// Image -> linear luminance -> thickness relief -> STL.
#[derive(Parser)]
#[command(name = "relief")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image file (png/jpg/webp/...)
    #[arg(short = 'i', long = "in")]
    input: PathBuf,

    /// Physical width in mm
    #[arg(long, default_value_t = 100.0)]
    width_mm: f64,

    /// Output width in pixels (at least 10)
    #[arg(long, default_value_t = 600)]
    px: u32,

    /// Base thickness in mm
    #[arg(long, default_value_t = 0.8)]
    base_mm: f64,

    /// Relief height in mm
    #[arg(long, default_value_t = 1.5)]
    relief_mm: f64,

    /// Black cut (linear luminance)
    #[arg(long, default_value_t = 0.02)]
    black: f64,

    /// White cut (linear luminance)
    #[arg(long, default_value_t = 0.98)]
    white: f64,

    /// Tone gamma (1.0 = linear)
    #[arg(long, default_value_t = 1.15)]
    tone: f64,

    /// Bright=Thin mapping (default on)
    #[arg(long, overrides_with = "no_invert", action = ArgAction::SetTrue)]
    invert: bool,

    /// Bright=Thick mapping
    #[arg(long, overrides_with = "invert", action = ArgAction::SetTrue)]
    no_invert: bool,

    /// Mirror left-right
    #[arg(long)]
    flip_x: bool,

    /// Mirror top-bottom
    #[arg(long)]
    flip_y: bool,

    /// Rotate 180 degrees (same as --flip-x --flip-y)
    #[arg(long)]
    rot180: bool,

    /// Output basename without extension; relative paths resolve under the
    /// input image folder. Default: <input_stem>_W<width_mm>mm
    #[arg(long)]
    out: Option<PathBuf>,

    /// Skip the STL (heightmaps are still written)
    #[arg(long)]
    no_stl: bool,

    /// Normalization of the 16-bit preview
    #[arg(long, value_enum, default_value = "observed")]
    preview_scale: PreviewScaleArg,

    /// TIFF compression for the heightmaps
    #[arg(long, value_enum, default_value = "deflate")]
    compression: CompressionArg,

    /// Print per-step timings
    #[arg(long)]
    timings: bool,

    /// Suppress log output
    #[arg(long, short)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PreviewScaleArg {
    /// Stretch observed min..max over the full range
    Observed,
    /// Map base..base+relief over the full range
    Fixed,
}

#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::Deflate => TiffCompression::Deflate,
        }
    }
}

impl Cli {
    fn params(&self) -> ReliefParams {
        let px = if self.px < MIN_TARGET_WIDTH_PX {
            warn!("--px {} is below {}, clamping", self.px, MIN_TARGET_WIDTH_PX);
            MIN_TARGET_WIDTH_PX
        } else {
            self.px
        };

        let mut builder = ReliefParams::builder()
            .target_width_mm(self.width_mm)
            .target_width_px(px)
            .base_mm(self.base_mm)
            .relief_mm(self.relief_mm)
            .cuts(self.black, self.white)
            .tone_gamma(self.tone)
            .invert(self.invert || !self.no_invert)
            .flip_x(self.flip_x)
            .flip_y(self.flip_y);

        if self.rot180 {
            builder = builder.rotate_180();
        }
        builder.build()
    }

    fn config(&self) -> ReliefConfig {
        let params = self.params();
        let preview_scale = match self.preview_scale {
            PreviewScaleArg::Observed => PreviewScale::Observed,
            PreviewScaleArg::Fixed => PreviewScale::Fixed {
                min_mm: params.base_mm,
                max_mm: params.max_thickness_mm(),
            },
        };

        ReliefConfig::builder()
            .params(params)
            .heightmap(HeightmapConfig {
                compression: self.compression.into(),
                preview_scale,
                ..HeightmapConfig::default()
            })
            .export_stl(!self.no_stl)
            .build()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.quiet {
        logger::init(cli.verbose);
    }

    if !cli.input.exists() {
        bail!("input image not found: {}", cli.input.display());
    }

    let config = cli.config();
    let out_base = resolve_out_base(&cli.input, cli.out.as_deref(), cli.width_mm);
    let pipeline = ImageToReliefPipeline::new(config).context("invalid relief parameters")?;

    info!(
        "Mapping: {}",
        if pipeline.config().params.invert {
            "Bright=Thin"
        } else {
            "Bright=Thick"
        }
    );

    let (artifacts, timings) = pipeline
        .convert_file_with_timings(&cli.input, &out_base)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    let (lo, hi) = artifacts.thickness_range;
    info!(
        "{}x{} field, thickness range: {:.3} .. {:.3} mm",
        artifacts.width, artifacts.height, lo, hi
    );
    if let Some(stl) = &artifacts.stl {
        info!("{} triangles -> {}", artifacts.triangles, stl.display());
    }

    if cli.timings {
        println!("{}", timings.summary());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("relief").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let params = parse(&["-i", "cat.png"]).params();
        assert_eq!(params, ReliefParams::default());
    }

    #[test]
    fn test_invert_toggle_last_wins() {
        assert!(!parse(&["-i", "a.png", "--no-invert"]).params().invert);
        assert!(parse(&["-i", "a.png", "--no-invert", "--invert"]).params().invert);
        assert!(!parse(&["-i", "a.png", "--invert", "--no-invert"]).params().invert);
    }

    #[test]
    fn test_px_is_clamped() {
        assert_eq!(parse(&["-i", "a.png", "--px", "3"]).params().target_width_px, 10);
        assert_eq!(parse(&["-i", "a.png", "--px", "250"]).params().target_width_px, 250);
    }

    #[test]
    fn test_rot180_sets_both_flips() {
        let params = parse(&["-i", "a.png", "--rot180"]).params();
        assert!(params.flip_x && params.flip_y);
    }

    #[test]
    fn test_fixed_preview_scale_uses_params() {
        let config = parse(&[
            "-i", "a.png", "--base-mm", "1", "--relief-mm", "2", "--preview-scale", "fixed",
        ])
        .config();
        assert_eq!(
            config.heightmap.preview_scale,
            PreviewScale::Fixed { min_mm: 1.0, max_mm: 3.0 }
        );
    }

    #[test]
    fn test_no_stl_disables_mesh() {
        assert!(!parse(&["-i", "a.png", "--no-stl"]).config().export_stl);
    }

    #[test]
    fn test_inverted_cuts_fail_pipeline_setup() {
        let config = parse(&["-i", "a.png", "--black", "0.9", "--white", "0.1"]).config();
        assert!(ImageToReliefPipeline::new(config).is_err());
    }
}
