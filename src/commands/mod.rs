//! Command handlers for the CLI application.
//!
//! - `typing`: commands that send reports (send, press, release)
//! - `inspect`: offline commands (check, keys)

pub mod inspect;
pub mod typing;

use hidg::{
    Clock, Dispatcher, HidgConfig, HidgDevice, Keymap, MacroError, ManualClock, RecordingSink,
    ReportSink, SystemClock,
};
use tracing::info;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Dispatcher handed to command closures, real device or dry run alike
pub type CliDispatcher<'a> = Dispatcher<&'a mut dyn ReportSink, &'a dyn Clock>;

/// Build a dispatcher for the configured device and run a closure with it.
///
/// With `dry_run`, reports are recorded and printed as hex instead, and
/// pauses are summed rather than waited out.
pub fn with_dispatcher<F>(config: &HidgConfig, keymap: Keymap, dry_run: bool, f: F) -> CommandResult
where
    F: FnOnce(&mut CliDispatcher<'_>) -> Result<(), MacroError>,
{
    let dwell = config.dwell();

    if dry_run {
        let mut sink = RecordingSink::new();
        let clock = ManualClock::new();
        {
            let mut dispatcher: CliDispatcher<'_> = Dispatcher::with_clock(
                &mut sink as &mut dyn ReportSink,
                &clock as &dyn Clock,
                keymap,
                dwell,
            );
            f(&mut dispatcher)?;
        }
        for report in sink.reports() {
            println!("{}", hex(report));
        }
        info!(
            reports = sink.len(),
            paused = ?clock.elapsed(),
            "dry run, nothing written"
        );
        return Ok(());
    }

    let mut device = HidgDevice::new(&config.device);
    let clock = SystemClock;
    let mut dispatcher: CliDispatcher<'_> = Dispatcher::with_clock(
        &mut device as &mut dyn ReportSink,
        &clock as &dyn Clock,
        keymap,
        dwell,
    );
    f(&mut dispatcher).map_err(|e| {
        let hint = match &e {
            MacroError::ReportWrite(t) if t.is_permission_denied() => {
                " (is the gadget configured, and is the device writable?)"
            }
            _ => "",
        };
        anyhow::Error::new(e).context(format!(
            "Failed to type on {}{hint}",
            config.device.display()
        ))
    })
}

/// Space-separated uppercase hex
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
