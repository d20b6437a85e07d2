//! Snapshot discovery and naming.
//!
//! Simulation output is written as `sol_00000`, `sol_00001`, ... with no
//! gaps. Directory listings come back in no particular order, so the
//! sequence is rebuilt from the entry count and each expected name is then
//! checked on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HeatreelError, Result};

/// Default substring used to pick snapshot files out of a directory.
pub const DEFAULT_MARKER: &str = "sol";

/// How snapshot files are named: a prefix followed by a zero-padded index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotNaming {
    /// Text before the index.
    pub prefix: String,
    /// Number of digits the index is padded to.
    pub index_width: usize,
}

impl Default for SnapshotNaming {
    fn default() -> Self {
        Self {
            prefix: "sol_".to_string(),
            index_width: 5,
        }
    }
}

impl SnapshotNaming {
    /// Creates a naming scheme.
    pub fn new(prefix: impl Into<String>, index_width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            index_width,
        }
    }

    /// Returns the file name for the snapshot at `index`.
    pub fn name(&self, index: usize) -> String {
        format!("{}{:0width$}", self.prefix, index, width = self.index_width)
    }
}

/// Returns the default file name of the snapshot at `index`, e.g. `sol_00042`.
pub fn expected_name(index: usize) -> String {
    SnapshotNaming::default().name(index)
}

/// Counts the entries of `dir` whose name contains `marker`.
///
/// Only the count is used; listing order does not matter.
pub fn discover_count(dir: &Path, marker: &str) -> Result<usize> {
    let entries = fs::read_dir(dir).map_err(|source| HeatreelError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|source| HeatreelError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_name().to_string_lossy().contains(marker) {
            count += 1;
        }
    }
    Ok(count)
}

/// An ordered, gap-free run of snapshot files in one directory.
#[derive(Debug, Clone)]
pub struct SnapshotSequence {
    dir: PathBuf,
    naming: SnapshotNaming,
    len: usize,
}

impl SnapshotSequence {
    /// Discovers the snapshots in `dir`.
    ///
    /// The number of entries containing `marker` fixes the length `N`; every
    /// name `naming.name(0) .. naming.name(N - 1)` must then exist as a file.
    ///
    /// # Errors
    ///
    /// Returns [`HeatreelError::SequenceGap`] for the first expected file that
    /// is missing, or [`HeatreelError::DirectoryRead`] if `dir` cannot be listed.
    pub fn discover(dir: &Path, marker: &str, naming: &SnapshotNaming) -> Result<Self> {
        let discovered = discover_count(dir, marker)?;
        log::debug!(
            "{discovered} entries in '{}' match marker '{marker}'",
            dir.display()
        );

        for index in 0..discovered {
            let expected = naming.name(index);
            if !dir.join(&expected).is_file() {
                return Err(HeatreelError::SequenceGap {
                    index,
                    expected,
                    discovered,
                });
            }
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            naming: naming.clone(),
            len: discovered,
        })
    }

    /// Returns the directory the snapshots live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the number of snapshots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no snapshots were found.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the path of the snapshot at `index`, if it is in range.
    pub fn path(&self, index: usize) -> Option<PathBuf> {
        (index < self.len).then(|| self.dir.join(self.naming.name(index)))
    }

    /// Returns all snapshot paths in index order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (0..self.len).map(|index| self.dir.join(self.naming.name(index)))
    }
}
