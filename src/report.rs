//! Per-platform generation results.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, error};
use thiserror::Error;

use crate::error::{PipelineError, RasterError};

/// A target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Android => "android",
            Self::Ios => "ios",
        })
    }
}

/// Why one output file could not be produced.
#[derive(Debug, Error)]
pub enum FileFailureCause {
    #[error(transparent)]
    Transform(#[from] RasterError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A single output that failed, named by its path under the output root.
#[derive(Debug, Error)]
#[error("{target}: {cause}")]
pub struct FileFailure {
    /// e.g. `mipmap-hdpi/ic_launcher_round.png` or `icon-20x20@3x.png`.
    pub target: String,
    #[source]
    pub cause: FileFailureCause,
}

/// What a platform pipeline wrote and what it could not.
///
/// Pipelines attempt every output even after a failure, so a report can hold
/// both written files and failures.
#[derive(Debug)]
pub struct GenerationReport {
    pub platform: Platform,
    /// Output root all files were written under.
    pub root: PathBuf,
    /// Every file written, images and manifests alike, in write order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl GenerationReport {
    pub fn new(platform: Platform, root: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            root: root.into(),
            written: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Returns true if no output failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Writes one rendered output under the root, recording success or failure.
    pub(crate) fn write_output(&mut self, target: String, rendered: Result<Vec<u8>, RasterError>) {
        let path = self.root.join(&target);
        let outcome = rendered.map_err(FileFailureCause::from).and_then(|bytes| {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, bytes)?;
            Ok(())
        });

        match outcome {
            Ok(()) => {
                debug!("wrote {}", path.display());
                self.written.push(path);
            }
            Err(cause) => {
                error!("{} {target}: {cause}", self.platform);
                self.failures.push(FileFailure { target, cause });
            }
        }
    }

    /// Converts a report with failures into [`PipelineError::Incomplete`].
    pub fn into_result(self) -> Result<Self, PipelineError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(PipelineError::Incomplete {
                attempted: self.written.len() + self.failures.len(),
                failures: self.failures,
            })
        }
    }
}
