use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use heatreel::{DataRange, FfmpegEncoder, Options, Pipeline};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render simulation snapshots into a color-mapped video")]
struct Args {
    /// Directory containing the snapshot files
    dir: Option<PathBuf>,

    /// JSON file with options; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Substring identifying snapshot files
    #[arg(long)]
    marker: Option<String>,

    /// Directory for frames and the video (defaults to the input directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Video file name
    #[arg(long)]
    video: Option<String>,

    /// Color map name
    #[arg(long)]
    colormap: Option<String>,

    /// Value mapped to the first color
    #[arg(long, allow_negative_numbers = true)]
    vmin: Option<f32>,

    /// Value mapped to the last color
    #[arg(long, allow_negative_numbers = true)]
    vmax: Option<f32>,

    /// Pixels per grid cell along each axis
    #[arg(long)]
    scale: Option<u32>,

    /// Input frame rate passed to the encoder
    #[arg(long)]
    framerate: Option<u32>,

    /// Encoder program
    #[arg(long, env = "HEATREEL_ENCODER")]
    encoder: Option<String>,

    /// Also render the initial snapshot (index 0)
    #[arg(long)]
    include_initial: bool,

    /// Write frames only, do not run the encoder
    #[arg(long)]
    no_encode: bool,

    /// Print the merged options as JSON and exit
    #[arg(long)]
    print_effective_config: bool,
}

impl Args {
    fn into_options(self) -> heatreel::Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_json_file(path)?,
            None => Options::default(),
        };

        if let Some(dir) = self.dir {
            options.input_dir = dir;
        }
        if let Some(output_dir) = self.output_dir {
            options.output_dir = Some(output_dir);
        }
        if let Some(marker) = self.marker {
            options.marker = marker;
        }
        if let Some(video) = self.video {
            options.video_name = video;
        }
        if let Some(colormap) = self.colormap {
            options.colormap = colormap;
        }
        options.data_range = DataRange::new(
            self.vmin.unwrap_or(options.data_range.min),
            self.vmax.unwrap_or(options.data_range.max),
        );
        if let Some(scale) = self.scale {
            options.scale = scale;
        }
        if let Some(rate) = self.framerate {
            options.encoder.frame_rate = Some(rate);
        }
        if let Some(program) = self.encoder {
            options.encoder.program = program;
        }
        if self.include_initial {
            options.include_initial = true;
        }
        if self.no_encode {
            options.encode = false;
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    heatreel::init_logging();

    let args = Args::parse();
    let print_config = args.print_effective_config;
    let options = args.into_options().context("failed to load options")?;

    if print_config {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    let input_dir = options.input_dir.clone();
    let encoder = FfmpegEncoder::from_options(&options.encoder);
    let report = Pipeline::new(options, encoder)
        .run()
        .with_context(|| format!("failed to process '{}'", input_dir.display()))?;

    log::info!(
        "done: {} snapshots, {} frames, video {}",
        report.snapshots,
        report.frames.len(),
        report
            .video
            .as_ref()
            .map_or_else(|| "not written".to_string(), |v| v.display().to_string())
    );
    Ok(())
}
