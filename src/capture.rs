use std::path::PathBuf;

use crate::device::{Adb, DeviceError};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// External capture collaborator invoked at scenario checkpoints. The runner
/// never consults the outcome beyond logging it; a failed capture does not
/// stop a tour.
#[allow(async_fn_in_trait)]
pub trait Capture {
    async fn capture(&mut self, label: &str) -> Result<(), CaptureError>;
}

/// Captures the device framebuffer into `<dir>/<label>.png`.
#[derive(Debug)]
pub struct Screencap {
    adb: Adb,
    dir: PathBuf,
}

impl Screencap {
    /// Creates the artifact directory up front so a tour fails early when the
    /// destination is unwritable.
    pub fn create(adb: Adb, dir: PathBuf) -> Result<Self, CaptureError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Screencap { adb, dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Capture for Screencap {
    async fn capture(&mut self, label: &str) -> Result<(), CaptureError> {
        let png = self.adb.screencap().await?;
        let path = self.dir.join(format!("{label}.png"));
        tokio::fs::write(&path, png).await?;
        tracing::info!(path = %path.display(), "captured checkpoint");
        Ok(())
    }
}

/// Capture that only logs. Used when no artifacts are wanted.
#[derive(Debug, Default)]
pub struct NullCapture;

impl Capture for NullCapture {
    async fn capture(&mut self, label: &str) -> Result<(), CaptureError> {
        tracing::info!(label, "checkpoint (capture disabled)");
        Ok(())
    }
}
