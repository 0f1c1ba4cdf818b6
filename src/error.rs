//! Error types shared by the rasterizer, the pipelines and the generator.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::report::FileFailure;

/// The transform a [`RasterError`] was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterOp {
    Probe,
    Decode,
    RasterizeVector,
    CircleMask,
    Resize,
    Extend,
    Flatten,
    Composite,
    EncodePng,
}

impl fmt::Display for RasterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Probe => "probe",
            Self::Decode => "decode",
            Self::RasterizeVector => "rasterize-vector",
            Self::CircleMask => "circle-mask",
            Self::Resize => "resize",
            Self::Extend => "extend",
            Self::Flatten => "flatten",
            Self::Composite => "composite",
            Self::EncodePng => "encode-png",
        };
        f.write_str(name)
    }
}

/// A failed image transform.
#[derive(Debug, Clone, Error)]
#[error("{op} failed{}: {reason}", file_suffix(.path))]
pub struct RasterError {
    pub op: RasterOp,
    /// File the transform was reading, if any.
    pub path: Option<PathBuf>,
    pub reason: String,
}

impl RasterError {
    pub fn new(op: RasterOp, reason: impl fmt::Display) -> Self {
        Self {
            op,
            path: None,
            reason: reason.to_string(),
        }
    }

    /// Attaches the file being read, keeping an already recorded one.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path.get_or_insert_with(|| path.to_path_buf());
        self
    }
}

fn file_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" for {}", path.display()))
        .unwrap_or_default()
}

/// Invalid input, reported before any file is written.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("invalid background color `{0}`: expected #RGB or #RRGGBB")]
    InvalidBackground(String),

    #[error("cannot read source icon {}: {source}", .path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: RasterError,
    },

    #[error("source icon must be square, got {width}x{height}")]
    SourceNotSquare { width: u32, height: u32 },

    #[error("source icon must be at least {minimum}x{minimum}, got {width}x{height}")]
    SourceTooSmall {
        width: u32,
        height: u32,
        minimum: u32,
    },

    #[error("padding ratio must be within (0, 1], got {0}")]
    InvalidPaddingRatio(f32),

    #[error("no iOS project found; pass an iOS project name or an output directory")]
    MissingIosProject,
}

/// A platform pipeline could not complete.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot load source icon {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: RasterError,
    },

    #[error("cannot prepare output directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} of {attempted} outputs failed", .failures.len())]
    Incomplete {
        attempted: usize,
        failures: Vec<FileFailure>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_error_names_the_file() {
        let err = RasterError::new(RasterOp::Decode, "bad header").with_path(Path::new("icon.png"));
        assert_eq!(err.path.as_deref(), Some(Path::new("icon.png")));
        assert_eq!(err.to_string(), "decode failed for icon.png: bad header");

        let err = err.with_path(Path::new("other.png"));
        assert_eq!(err.path.as_deref(), Some(Path::new("icon.png")));
    }

    #[test]
    fn raster_error_without_file() {
        let err = RasterError::new(RasterOp::Resize, "target size 0x0 is empty");
        assert_eq!(err.to_string(), "resize failed: target size 0x0 is empty");
    }
}
