use std::path::PathBuf;

use thiserror::Error;

/// Failures a single sampling call can surface.
///
/// Warmup is deliberately not represented here: one snapshot being too few
/// to derive a rate is a state of the CPU tracker, not an error.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The kernel source could not be opened or read (permission denied,
    /// or the process behind a per-pid path already exited).
    #[error("cannot read {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was readable but its content did not match the expected
    /// field layout.
    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },
}

impl SampleError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SampleError::Unavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(what: &'static str, detail: impl Into<String>) -> Self {
        SampleError::Malformed {
            what,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SampleError>;
