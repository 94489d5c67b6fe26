//! Gadget character device sink
//!
//! The device node is opened for every report and closed again before the
//! call returns, so no handle is held while the caller sleeps between
//! reports and a failed write never leaves a half-delivered report queued.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::{ReportSink, TransportError, REPORT_LEN};

/// Device node created by the `hid` gadget function on most setups
pub const DEFAULT_DEVICE_PATH: &str = "/dev/hidg0";

/// Keyboard gadget device node
#[derive(Debug, Clone)]
pub struct HidgDevice {
    path: PathBuf,
}

impl HidgDevice {
    /// Use the device node at `path`
    ///
    /// Nothing is opened until the first report is written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for HidgDevice {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_PATH)
    }
}

impl ReportSink for HidgDevice {
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), TransportError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| TransportError::Open {
                path: self.path.clone(),
                source,
            })?;

        // A single write: the gadget driver takes whole reports, so a short
        // write is reported rather than completed with a second call.
        let written = file.write(report).map_err(|source| TransportError::Write {
            path: self.path.clone(),
            source,
        })?;
        if written != REPORT_LEN {
            return Err(TransportError::ShortWrite {
                path: self.path.clone(),
                written,
                expected: REPORT_LEN,
            });
        }

        trace!(path = %self.path.display(), "report delivered");
        Ok(())
    }
}
