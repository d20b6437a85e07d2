//! Core types for heatreel.
//!
//! This crate provides the pieces that do not depend on image encoding:
//! - [`SnapshotSequence`] discovery of ordered snapshot files in a directory
//! - [`Grid`] loading of whitespace-delimited numeric snapshots
//! - [`Options`] run configuration and its JSON form
//! - [`HeatreelError`], the error type shared by all heatreel crates

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod grid;
pub mod options;
pub mod snapshot;

pub use error::{HeatreelError, Result};
pub use grid::{load_grid, Grid};
pub use options::{DataRange, EncoderOptions, Options};
pub use snapshot::{discover_count, expected_name, SnapshotNaming, SnapshotSequence};
