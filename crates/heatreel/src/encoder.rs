//! Video assembly through an external encoder process.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use heatreel_core::EncoderOptions;

/// Maximum number of stderr lines kept in [`EncodeError::Failed`].
const STDERR_TAIL_LINES: usize = 20;

/// Something that turns a numbered image sequence into a video.
pub trait Encoder {
    /// Encodes the images matching `image_pattern` (a printf-style pattern
    /// such as `frames/%05d.png`) into `output`. Numbering starts at
    /// `first_index` and exactly `frame_count` images are used, so stale
    /// frames past the end of this run are ignored.
    fn encode(
        &self,
        image_pattern: &Path,
        output: &Path,
        first_index: usize,
        frame_count: usize,
    ) -> Result<(), EncodeError>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    fn encode(
        &self,
        image_pattern: &Path,
        output: &Path,
        first_index: usize,
        frame_count: usize,
    ) -> Result<(), EncodeError> {
        (**self).encode(image_pattern, output, first_index, frame_count)
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(
        &self,
        image_pattern: &Path,
        output: &Path,
        first_index: usize,
        frame_count: usize,
    ) -> Result<(), EncodeError> {
        (**self).encode(image_pattern, output, first_index, frame_count)
    }
}

/// Runs `ffmpeg` (or a compatible program) as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegEncoder {
    program: String,
    frame_rate: Option<u32>,
    overwrite: bool,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::from_options(&EncoderOptions::default())
    }
}

impl FfmpegEncoder {
    /// Creates an encoder running `program` with default settings.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Creates an encoder from configuration.
    pub fn from_options(options: &EncoderOptions) -> Self {
        Self {
            program: options.program.clone(),
            frame_rate: options.frame_rate,
            overwrite: options.overwrite,
        }
    }

    /// Returns the program that will be run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the argument list for one encode.
    pub fn args(
        &self,
        image_pattern: &Path,
        output: &Path,
        first_index: usize,
        frame_count: usize,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if self.overwrite {
            args.push("-y".into());
        }
        if let Some(rate) = self.frame_rate {
            args.push("-framerate".into());
            args.push(rate.to_string().into());
        }
        args.push("-start_number".into());
        args.push(first_index.to_string().into());
        args.push("-i".into());
        args.push(image_pattern.as_os_str().to_owned());
        args.push("-frames:v".into());
        args.push(frame_count.to_string().into());
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(
        &self,
        image_pattern: &Path,
        output: &Path,
        first_index: usize,
        frame_count: usize,
    ) -> Result<(), EncodeError> {
        let args = self.args(image_pattern, output, first_index, frame_count);
        log::info!(
            "running {} {}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| EncodeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(EncodeError::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr: stderr_tail(&result.stderr),
            });
        }

        log::info!("wrote video '{}'", output.display());
        Ok(())
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Error type for encoder operations.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}
