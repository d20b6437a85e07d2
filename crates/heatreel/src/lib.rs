//! heatreel: turn a sequence of simulation snapshots into a color-mapped video.
//!
//! A heat-equation solver writes one text file per saved time step
//! (`sol_00000`, `sol_00001`, ...). heatreel finds those files, renders each
//! one through a color map into a numbered PNG frame, and asks an external
//! encoder (`ffmpeg` by default) to stitch the frames into `heat.avi`.
//!
//! # Quick Start
//!
//! ```no_run
//! use heatreel::*;
//!
//! fn main() -> Result<()> {
//!     let report = run(Options::new("results/"))?;
//!     println!("{} frames, video: {:?}", report.frames.len(), report.video);
//!     Ok(())
//! }
//! ```
//!
//! # Stages
//!
//! - [`SnapshotSequence`] - discovery of the ordered, gap-free snapshot files
//! - [`load_grid`] - parsing one snapshot into a [`Grid`]
//! - [`render_frame`] - color mapping a grid into a frame image
//! - [`Encoder`] - assembling frames into a video
//!
//! [`Pipeline`] drives all of them.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod encoder;
pub mod pipeline;

// Re-export core types
pub use heatreel_core::{
    discover_count, expected_name, load_grid, DataRange, EncoderOptions, Grid, HeatreelError,
    Options, Result, SnapshotNaming, SnapshotSequence,
};

// Re-export render types
pub use heatreel_render::{
    colorize, frame_file_name, render_frame, ColorMap, ColorMapRegistry, FrameError, FrameStyle,
};

pub use encoder::{EncodeError, Encoder, FfmpegEncoder};
pub use pipeline::{Pipeline, PipelineReport, FRAME_PATTERN};

/// Runs the pipeline with the encoder described by `options.encoder`.
///
/// # Example
///
/// ```no_run
/// use heatreel::*;
///
/// let mut options = Options::new(".");
/// options.encoder.frame_rate = Some(10);
/// run(options).unwrap();
/// ```
pub fn run(options: Options) -> Result<PipelineReport> {
    let encoder = FfmpegEncoder::from_options(&options.encoder);
    Pipeline::new(options, encoder).run()
}

/// Initializes `env_logger`, defaulting to the `info` level when `RUST_LOG`
/// is unset. Calling it more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
