mod adb;
mod driver;
mod dump;

pub use adb::{Adb, LaunchSpec};
pub use driver::{AdbDriver, UiDriver};
pub use dump::{Bounds, UiNode, UiSnapshot, parse_ui_dump};

/// Failures talking to the attached device. `ProcessUnavailable` is the only
/// variant the scenario runner treats as fatal mid-run; everything else is
/// fatal to the call that needed the device.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("adb binary not found on PATH: {0}")]
    AdbMissing(#[from] which::Error),
    #[error("failed to run adb: {0}")]
    Io(#[from] std::io::Error),
    #[error("adb {command:?} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("malformed UI hierarchy dump: {0}")]
    MalformedDump(#[from] roxmltree::Error),
    #[error("unexpected device output: {0}")]
    UnexpectedOutput(String),
    #[error("target process {0} is no longer running")]
    ProcessUnavailable(String),
}
