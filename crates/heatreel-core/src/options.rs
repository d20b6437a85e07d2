//! Configuration options for heatreel.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HeatreelError, Result};
use crate::snapshot::{SnapshotNaming, DEFAULT_MARKER};

/// Options for one pipeline run.
///
/// The defaults reproduce the classic behavior: `sol_*` files in the input
/// directory, `jet` over [0, 1], frames next to the input and `heat.avi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory holding the snapshot files.
    pub input_dir: PathBuf,

    /// Directory frames and the video are written to (defaults to `input_dir`).
    pub output_dir: Option<PathBuf>,

    /// Substring that marks snapshot files in a directory listing.
    pub marker: String,

    /// Snapshot file naming.
    pub naming: SnapshotNaming,

    /// Color map name.
    pub colormap: String,

    /// Values mapped to the ends of the color map.
    pub data_range: DataRange,

    /// Each grid cell becomes a `scale` x `scale` pixel block.
    pub scale: u32,

    /// Whether snapshot 0 (the initial condition) is rendered too.
    pub include_initial: bool,

    /// Whether to run the encoder after writing frames.
    pub encode: bool,

    /// Video file name, relative to the output directory.
    pub video_name: String,

    /// External encoder settings.
    pub encoder: EncoderOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: None,
            marker: DEFAULT_MARKER.to_string(),
            naming: SnapshotNaming::default(),
            colormap: "jet".to_string(),
            data_range: DataRange::default(),
            scale: 1,
            include_initial: false,
            encode: true,
            video_name: "heat.avi".to_string(),
            encoder: EncoderOptions::default(),
        }
    }
}

impl Options {
    /// Creates default options reading from `input_dir`.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }

    /// Loads options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| HeatreelError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Returns the directory frames and video are written to.
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    /// Returns the full path of the video file.
    pub fn video_path(&self) -> PathBuf {
        self.output_dir().join(&self.video_name)
    }

    /// Returns the first snapshot index that becomes a frame.
    pub fn first_frame(&self) -> usize {
        usize::from(!self.include_initial)
    }

    /// Checks that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(invalid("marker", "must not be empty"));
        }
        if self.naming.index_width == 0 || self.naming.index_width > 20 {
            return Err(invalid(
                "naming.index_width",
                format!("must be between 1 and 20, got {}", self.naming.index_width),
            ));
        }
        if self.scale == 0 {
            return Err(invalid("scale", "must be at least 1"));
        }
        self.data_range.validate()?;
        if self.video_name.is_empty() {
            return Err(invalid("video_name", "must not be empty"));
        }
        if self.encoder.program.is_empty() {
            return Err(invalid("encoder.program", "must not be empty"));
        }
        if self.encoder.frame_rate == Some(0) {
            return Err(invalid("encoder.frame_rate", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> HeatreelError {
    HeatreelError::InvalidOption {
        name,
        reason: reason.into(),
    }
}

/// The value range mapped onto a color map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataRange {
    /// Value mapped to the first color.
    pub min: f32,
    /// Value mapped to the last color.
    pub max: f32,
}

impl Default for DataRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl DataRange {
    /// Creates a data range.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Maps `value` to [0, 1], clamping anything outside the range.
    ///
    /// NaN is passed through.
    pub fn normalize(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Checks that both ends are finite and `min < max`.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid("data_range", "bounds must be finite"));
        }
        if self.min >= self.max {
            return Err(invalid(
                "data_range",
                format!("min ({}) must be below max ({})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Settings for the external video encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Program to run.
    pub program: String,

    /// Input frame rate; the encoder default when unset.
    pub frame_rate: Option<u32>,

    /// Whether an existing video file is overwritten without asking.
    pub overwrite: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            frame_rate: None,
            overwrite: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.marker, "sol");
        assert_eq!(opts.naming.name(1), "sol_00001");
        assert_eq!(opts.colormap, "jet");
        assert_eq!(opts.data_range, DataRange::new(0.0, 1.0));
        assert_eq!(opts.scale, 1);
        assert!(!opts.include_initial);
        assert!(opts.encode);
        assert_eq!(opts.first_frame(), 1);
        assert_eq!(opts.video_path(), PathBuf::from("./heat.avi"));
        assert_eq!(opts.encoder.program, "ffmpeg");
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_output_dir_fallback() {
        let mut opts = Options::new("/data/run1");
        assert_eq!(opts.output_dir(), Path::new("/data/run1"));
        opts.output_dir = Some(PathBuf::from("/tmp/frames"));
        assert_eq!(opts.video_path(), PathBuf::from("/tmp/frames/heat.avi"));
        opts.include_initial = true;
        assert_eq!(opts.first_frame(), 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: Options =
            serde_json::from_str(r#"{ "colormap": "viridis", "encoder": { "frame_rate": 12 } }"#)
                .unwrap();
        assert_eq!(opts.colormap, "viridis");
        assert_eq!(opts.encoder.frame_rate, Some(12));
        assert_eq!(opts.encoder.program, "ffmpeg");
        assert_eq!(opts.marker, "sol");
    }

    #[test]
    fn test_partial_data_range_uses_defaults() {
        let opts: Options = serde_json::from_str(r#"{ "data_range": { "min": -1.0 } }"#).unwrap();
        assert_eq!(opts.data_range, DataRange::new(-1.0, 1.0));

        let opts: Options = serde_json::from_str(r#"{ "data_range": { "max": 400.0 } }"#).unwrap();
        assert_eq!(opts.data_range, DataRange::new(0.0, 400.0));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatreel.json");
        std::fs::write(&path, r#"{ "scale": 4, "data_range": { "min": -1.0, "max": 1.0 } }"#)
            .unwrap();
        let opts = Options::from_json_file(&path).unwrap();
        assert_eq!(opts.scale, 4);
        assert_eq!(opts.data_range, DataRange::new(-1.0, 1.0));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Options::from_json_file(&path).unwrap_err(),
            HeatreelError::JsonError(_)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut opts = Options::default();
        opts.scale = 0;
        assert!(matches!(
            opts.validate().unwrap_err(),
            HeatreelError::InvalidOption { name: "scale", .. }
        ));

        let mut opts = Options::default();
        opts.data_range = DataRange::new(1.0, 1.0);
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.marker.clear();
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.encoder.frame_rate = Some(0);
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_normalize_clamps() {
        let range = DataRange::default();
        assert_eq!(range.normalize(-0.5), 0.0);
        assert_eq!(range.normalize(0.25), 0.25);
        assert_eq!(range.normalize(1.5), 1.0);

        let range = DataRange::new(10.0, 20.0);
        assert_eq!(range.normalize(15.0), 0.5);
    }

    proptest! {
        #[test]
        fn prop_normalize_in_unit_interval(v in -1.0e6f32..1.0e6) {
            let t = DataRange::default().normalize(v);
            prop_assert!((0.0..=1.0).contains(&t));
        }

        #[test]
        fn prop_above_max_same_as_max(v in 1.0f32..1.0e6) {
            let range = DataRange::default();
            prop_assert_eq!(range.normalize(v), range.normalize(1.0));
        }
    }
}
