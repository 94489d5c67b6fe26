//! Macro dispatcher.
//!
//! Drives compiled instructions into a [`ReportSink`]. Every keystroke is a
//! press report, an optional dwell, then the all-zero release report.
//! Sleeps and dwells go through the dispatcher's [`Clock`] and nowhere else.

use std::time::Duration;

use hidg_transport::ReportSink;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::error::MacroError;
use crate::instruction::{compile, Instruction};
use crate::keymap::Keymap;
use crate::report::KeyboardReport;

/// How long a key is held between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DwellProfile {
    /// No hold: release follows press immediately.
    #[default]
    Fast,
    /// Short visible hold, closer to a person typing.
    HumanSpeed,
}

impl DwellProfile {
    pub const HUMAN_SPEED_DWELL: Duration = Duration::from_millis(100);

    pub fn duration(self) -> Duration {
        match self {
            DwellProfile::Fast => Duration::ZERO,
            DwellProfile::HumanSpeed => Self::HUMAN_SPEED_DWELL,
        }
    }
}

/// Sends keystrokes and macros to one report sink
///
/// The dwell duration is fixed at construction. One dispatcher per device:
/// the gadget accepts a single coherent report stream.
pub struct Dispatcher<S, C = SystemClock> {
    sink: S,
    clock: C,
    keymap: Keymap,
    dwell: Duration,
}

impl<S: ReportSink> Dispatcher<S, SystemClock> {
    pub fn new(sink: S, keymap: Keymap, dwell: Duration) -> Self {
        Self::with_clock(sink, SystemClock, keymap, dwell)
    }
}

impl<S: ReportSink, C: Clock> Dispatcher<S, C> {
    pub fn with_clock(sink: S, clock: C, keymap: Keymap, dwell: Duration) -> Self {
        Self {
            sink,
            clock,
            keymap,
            dwell,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Press and release a single named key.
    ///
    /// Always emits exactly two reports. Aliases include their Shift bit;
    /// `windows_key` presses Right GUI alone.
    pub fn keypress(&mut self, name: &str) -> Result<(), MacroError> {
        let stroke = self.keymap.keys().resolve(name)?;
        self.tap(KeyboardReport::pressed(stroke.modifiers, stroke.code))
    }

    /// Type a macro string.
    ///
    /// The whole string is compiled first; a bad name or malformed group
    /// anywhere aborts before the first report is written.
    pub fn sendkeys(&mut self, text: &str) -> Result<(), MacroError> {
        let program = compile(text, &self.keymap)?;
        debug!(instructions = program.len(), "macro compiled");
        self.execute(&program)
    }

    /// Run compiled instructions in order.
    pub fn execute(&mut self, program: &[Instruction]) -> Result<(), MacroError> {
        for instruction in program {
            match instruction {
                Instruction::Sleep(duration) => {
                    debug!(?duration, "sleep");
                    self.clock.sleep(*duration);
                }
                Instruction::Literal { .. } | Instruction::Chord { .. } => {
                    if let Some(report) = instruction.press_report() {
                        trace!(%instruction, "keystroke");
                        self.tap(report)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Emit one all-zero report, releasing anything the host thinks is held.
    pub fn release_all(&mut self) -> Result<(), MacroError> {
        self.send(KeyboardReport::RELEASED)
    }

    fn tap(&mut self, press: KeyboardReport) -> Result<(), MacroError> {
        self.send(press)?;
        if !self.dwell.is_zero() {
            self.clock.sleep(self.dwell);
        }
        self.send(KeyboardReport::RELEASED)
    }

    fn send(&mut self, report: KeyboardReport) -> Result<(), MacroError> {
        debug!(%report, "sending report");
        self.sink.write_report(&report.to_bytes())?;
        trace!(%report, "report sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::keymap::mods;
    use hidg_transport::{RecordingSink, TransportError, REPORT_LEN};
    use std::path::PathBuf;

    const RELEASE: [u8; REPORT_LEN] = [0; REPORT_LEN];

    fn dispatcher(dwell: Duration) -> Dispatcher<RecordingSink, ManualClock> {
        Dispatcher::with_clock(
            RecordingSink::new(),
            ManualClock::new(),
            Keymap::builtin().unwrap(),
            dwell,
        )
    }

    /// Sink that fails after a number of successful writes
    struct FailingSink {
        remaining: usize,
        written: Vec<[u8; REPORT_LEN]>,
    }

    impl ReportSink for FailingSink {
        fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), TransportError> {
            if self.remaining == 0 {
                return Err(TransportError::ShortWrite {
                    path: PathBuf::from("/dev/hidg0"),
                    written: 3,
                    expected: REPORT_LEN,
                });
            }
            self.remaining -= 1;
            self.written.push(*report);
            Ok(())
        }
    }

    #[test]
    fn keypress_emits_press_then_release() {
        let mut d = dispatcher(Duration::ZERO);
        d.keypress("a").unwrap();
        assert_eq!(d.sink().reports(), &[[0, 0, 0x04, 0, 0, 0, 0, 0], RELEASE]);
        assert!(d.clock().sleeps().is_empty());
    }

    #[test]
    fn keypress_alias_adds_shift() {
        let mut d = dispatcher(Duration::ZERO);
        d.keypress("@").unwrap();
        assert_eq!(
            d.sink().reports(),
            &[[mods::LSHIFT, 0, 0x1F, 0, 0, 0, 0, 0], RELEASE]
        );
    }

    #[test]
    fn keypress_windows_key() {
        let mut d = dispatcher(Duration::ZERO);
        d.keypress("windows_key").unwrap();
        assert_eq!(
            d.sink().reports(),
            &[[mods::RGUI, 0, 0, 0, 0, 0, 0, 0], RELEASE]
        );
    }

    #[test]
    fn keypress_unknown_key_writes_nothing() {
        let mut d = dispatcher(Duration::ZERO);
        assert!(matches!(
            d.keypress("nosuchkey"),
            Err(MacroError::KeyLookup(_))
        ));
        assert!(d.sink().is_empty());
    }

    #[test]
    fn dwell_between_press_and_release() {
        let dwell = DwellProfile::HumanSpeed.duration();
        let mut d = dispatcher(dwell);
        d.sendkeys("ab").unwrap();
        assert_eq!(d.sink().len(), 4);
        assert_eq!(d.clock().sleeps(), vec![dwell, dwell]);
    }

    #[test]
    fn sleep_instruction_uses_clock() {
        let mut d = dispatcher(Duration::ZERO);
        d.sendkeys("a{sleep 0.25}b").unwrap();
        assert_eq!(d.sink().len(), 4);
        assert_eq!(d.clock().sleeps(), vec![Duration::from_millis(250)]);
    }

    #[test]
    fn chord_combines_explicit_and_implicit_modifiers() {
        let mut d = dispatcher(Duration::ZERO);
        d.sendkeys("{ctrl+A}").unwrap();
        assert_eq!(
            d.sink().reports(),
            &[[mods::LCTRL | mods::LSHIFT, 0, 0x04, 0, 0, 0, 0, 0], RELEASE]
        );
    }

    #[test]
    fn release_all_writes_one_zero_report() {
        let mut d = dispatcher(Duration::ZERO);
        d.release_all().unwrap();
        assert_eq!(d.sink().reports(), &[RELEASE]);
    }

    #[test]
    fn write_failure_aborts_macro() {
        let sink = FailingSink {
            remaining: 3,
            written: Vec::new(),
        };
        let mut d = Dispatcher::with_clock(
            sink,
            ManualClock::new(),
            Keymap::builtin().unwrap(),
            Duration::ZERO,
        );
        let err = d.sendkeys("abc").unwrap_err();
        assert!(matches!(
            err,
            MacroError::ReportWrite(TransportError::ShortWrite { written: 3, .. })
        ));
        // a pressed+released, b pressed, then the failed release stops everything
        assert_eq!(d.into_sink().written.len(), 3);
    }

    #[test]
    fn dwell_profiles() {
        assert_eq!(DwellProfile::Fast.duration(), Duration::ZERO);
        assert!(DwellProfile::HumanSpeed.duration() > Duration::ZERO);
        assert_eq!(DwellProfile::default(), DwellProfile::Fast);
    }
}
