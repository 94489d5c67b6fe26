//! In-memory report sink

use crate::{ReportSink, TransportError, REPORT_LEN};

/// Sink that records every report instead of sending it anywhere
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    reports: Vec<[u8; REPORT_LEN]>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, in write order
    pub fn reports(&self) -> &[[u8; REPORT_LEN]] {
        &self.reports
    }

    /// Take the recorded reports, leaving the sink empty
    pub fn take(&mut self) -> Vec<[u8; REPORT_LEN]> {
        std::mem::take(&mut self.reports)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportSink for RecordingSink {
    fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), TransportError> {
        self.reports.push(*report);
        Ok(())
    }
}
