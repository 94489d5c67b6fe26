// Linux USB HID gadget keyboard - shared library
// Key tables, macro parsing, report encoding and dispatch

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod instruction;
pub mod keymap;
pub mod report;
pub mod tokenizer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::HidgConfig;
pub use dispatcher::{Dispatcher, DwellProfile};
pub use error::{KeymapError, MacroError};
pub use instruction::{compile, Instruction};
pub use keymap::{mods, KeyEntry, KeyTable, Keymap, Keystroke, ModifierTable, WINDOWS_KEY};
pub use report::KeyboardReport;
pub use tokenizer::{MacroText, MacroToken};

pub use hidg_transport::{HidgDevice, RecordingSink, ReportSink, TransportError, REPORT_LEN};
