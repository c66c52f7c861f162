use crate::capture::CaptureError;
use crate::config::ConfigError;
use crate::device::DeviceError;
use crate::store::StoreError;

/// Top-level failure of a harness run. Everything that reaches this level is
/// fatal to the run: element misses and failed verifications never surface
/// here, they degrade the tour instead.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
