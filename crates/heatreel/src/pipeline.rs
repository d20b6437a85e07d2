//! The snapshot-to-video pipeline.

use std::path::PathBuf;

use heatreel_core::{load_grid, Grid, HeatreelError, Options, Result, SnapshotSequence};
use heatreel_render::{render_frame, ColorMapRegistry, FrameStyle};

use crate::encoder::Encoder;

/// printf-style pattern matching the names written by
/// [`heatreel_render::frame_file_name`].
pub const FRAME_PATTERN: &str = "%05d.png";

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Number of snapshots discovered.
    pub snapshots: usize,
    /// Frames written, in index order.
    pub frames: Vec<PathBuf>,
    /// The video file, if the encoder ran.
    pub video: Option<PathBuf>,
}

/// Discovers snapshots, renders them to frames and hands the frames to an
/// [`Encoder`].
pub struct Pipeline<E> {
    options: Options,
    encoder: E,
    color_maps: ColorMapRegistry,
}

impl<E: Encoder> Pipeline<E> {
    /// Creates a pipeline with the default color maps.
    pub fn new(options: Options, encoder: E) -> Self {
        Self {
            options,
            encoder,
            color_maps: ColorMapRegistry::new(),
        }
    }

    /// Returns the options this pipeline runs with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the color map registry, e.g. to register custom maps.
    pub fn color_maps_mut(&mut self) -> &mut ColorMapRegistry {
        &mut self.color_maps
    }

    /// Runs the whole pipeline.
    ///
    /// Every snapshot is loaded before the first frame is written. The
    /// initial snapshot is skipped unless `include_initial` is set. The
    /// encoder only runs when at least one frame was written.
    ///
    /// # Errors
    ///
    /// The first discovery, parse, render or encode error aborts the run.
    /// Frames written before the failure are left on disk.
    pub fn run(&self) -> Result<PipelineReport> {
        let options = &self.options;
        options.validate()?;
        let colormap = self.color_maps.lookup(&options.colormap)?.clone();
        let style = FrameStyle::new(colormap, options.data_range).with_scale(options.scale);

        let sequence =
            SnapshotSequence::discover(&options.input_dir, &options.marker, &options.naming)?;
        log::info!(
            "found {} snapshots in '{}'",
            sequence.len(),
            options.input_dir.display()
        );

        let grids = sequence
            .paths()
            .map(|path| load_grid(&path))
            .collect::<Result<Vec<Grid>>>()?;

        let output_dir = options.output_dir();
        let first_frame = options.first_frame();
        let mut frames = Vec::with_capacity(grids.len().saturating_sub(first_frame));
        if grids.len() > first_frame {
            std::fs::create_dir_all(output_dir)?;
        }
        for (index, grid) in grids.iter().enumerate().skip(first_frame) {
            let path = render_frame(grid, index, output_dir, &style).map_err(|e| {
                HeatreelError::RenderError(format!("frame {index}: {e}"))
            })?;
            frames.push(path);
        }
        log::info!(
            "wrote {} frames to '{}'",
            frames.len(),
            output_dir.display()
        );

        let mut report = PipelineReport {
            snapshots: sequence.len(),
            frames,
            video: None,
        };

        if report.frames.is_empty() {
            log::warn!("no frames to encode; skipping video");
            return Ok(report);
        }
        if !options.encode {
            log::info!("encoding disabled; frames left in '{}'", output_dir.display());
            return Ok(report);
        }

        let pattern = output_dir.join(FRAME_PATTERN);
        let video = options.video_path();
        self.encoder
            .encode(&pattern, &video, first_frame, report.frames.len())
            .map_err(|e| HeatreelError::EncodeError(e.to_string()))?;
        report.video = Some(video);
        Ok(report)
    }
}
