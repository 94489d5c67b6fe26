//! Transport error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while delivering a report
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Short write to {}: {written} of {expected} bytes", path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },
}

impl TransportError {
    /// True when the device node exists but the caller lacks permission.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            TransportError::Open { source, .. } | TransportError::Write { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            TransportError::ShortWrite { .. } => false,
        }
    }
}
