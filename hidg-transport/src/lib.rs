//! Report sinks for a USB HID gadget keyboard
//!
//! The Linux gadget function exposes the keyboard's IN endpoint as a
//! character device (usually `/dev/hidg0`). Every 8-byte boot-protocol
//! report written to it is forwarded to the host as-is.
//!
//! - [`HidgDevice`]: writes each report to the device node, opening and
//!   closing the file around every write
//! - [`RecordingSink`]: keeps reports in memory (dry runs, tests)

pub mod device;
pub mod error;
pub mod recording;

pub use device::{HidgDevice, DEFAULT_DEVICE_PATH};
pub use error::TransportError;
pub use recording::RecordingSink;

/// Size of a boot-protocol keyboard input report
pub const REPORT_LEN: usize = 8;

/// Destination for keyboard input reports
///
/// Each call is an independent, ordered delivery of exactly one report.
/// Implementations must not buffer: once `write_report` returns `Ok`, the
/// report has been handed to the host side.
pub trait ReportSink {
    /// Deliver one report
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), TransportError>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), TransportError> {
        (**self).write_report(report)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), TransportError> {
        (**self).write_report(report)
    }
}
