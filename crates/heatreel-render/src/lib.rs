//! Frame rendering for heatreel.
//!
//! This crate turns scalar grids into images:
//! - Color map system ([`ColorMap`], [`ColorMapRegistry`])
//! - Colorization of grids with a fixed value range ([`colorize`])
//! - Frame files on disk ([`render_frame`], [`save_image`])

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Color math converts between f32 samples and u8/usize indices
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod color_maps;
pub mod frame;

pub use color_maps::{ColorMap, ColorMapRegistry};
pub use frame::{
    colorize, encode_png, frame_file_name, render_frame, save_image, FrameError, FrameStyle,
};

// Re-export glam types for convenience
pub use glam::Vec3;
