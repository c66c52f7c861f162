use std::time::Duration;

use crate::device::adb::Adb;
use crate::device::dump::{UiSnapshot, parse_ui_dump};
use crate::device::DeviceError;

/// Where the on-device hierarchy dump lands before it is read back.
const DUMP_REMOTE_PATH: &str = "/sdcard/webspace_tour_dump.xml";

/// Everything the resolver, drawer verifier and scenario runner need from a
/// live device. A trait seam so scenarios run against a scripted fake in
/// tests.
#[allow(async_fn_in_trait)]
pub trait UiDriver {
    /// Fresh dump of the current UI tree. Implementations must not cache.
    async fn dump(&self) -> Result<UiSnapshot, DeviceError>;
    async fn tap(&self, x: i32, y: i32) -> Result<(), DeviceError>;
    async fn swipe(
        &self,
        from: (i32, i32),
        to: (i32, i32),
        duration: Duration,
    ) -> Result<(), DeviceError>;
    async fn type_text(&self, text: &str) -> Result<(), DeviceError>;
    async fn press_back(&self) -> Result<(), DeviceError>;
    async fn display_size(&self) -> Result<(i32, i32), DeviceError>;
    /// Whether the target process is still alive.
    async fn is_app_alive(&self) -> Result<bool, DeviceError>;
}

/// The real driver: input injection and hierarchy dumps through adb.
#[derive(Debug, Clone)]
pub struct AdbDriver {
    adb: Adb,
    package: String,
}

impl AdbDriver {
    pub fn new(adb: Adb, package: String) -> Self {
        AdbDriver { adb, package }
    }
}

impl UiDriver for AdbDriver {
    async fn dump(&self) -> Result<UiSnapshot, DeviceError> {
        self.adb
            .shell(&["uiautomator", "dump", DUMP_REMOTE_PATH])
            .await?;
        let raw = self.adb.exec_out(&["cat", DUMP_REMOTE_PATH]).await?;
        if let Err(err) = self.adb.shell(&["rm", "-f", DUMP_REMOTE_PATH]).await {
            tracing::debug!(?err, "failed to remove hierarchy dump from device");
        }
        let xml = String::from_utf8_lossy(&raw);
        let snapshot = parse_ui_dump(&xml)?;
        tracing::trace!(nodes = snapshot.nodes.len(), "dumped UI hierarchy");
        Ok(snapshot)
    }

    async fn tap(&self, x: i32, y: i32) -> Result<(), DeviceError> {
        let (x, y) = (x.to_string(), y.to_string());
        self.adb.shell(&["input", "tap", &x, &y]).await?;
        Ok(())
    }

    async fn swipe(
        &self,
        from: (i32, i32),
        to: (i32, i32),
        duration: Duration,
    ) -> Result<(), DeviceError> {
        let args = [
            from.0.to_string(),
            from.1.to_string(),
            to.0.to_string(),
            to.1.to_string(),
            duration.as_millis().to_string(),
        ];
        self.adb
            .shell(&[
                "input", "swipe", &args[0], &args[1], &args[2], &args[3], &args[4],
            ])
            .await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), DeviceError> {
        // `input text` has no escaping of its own: spaces become %s and the
        // whole argument is single-quoted for the device shell.
        let escaped = format!("'{}'", text.replace('\'', r"'\''").replace(' ', "%s"));
        self.adb.shell(&["input", "text", &escaped]).await?;
        Ok(())
    }

    async fn press_back(&self) -> Result<(), DeviceError> {
        self.adb.shell(&["input", "keyevent", "KEYCODE_BACK"]).await?;
        Ok(())
    }

    async fn display_size(&self) -> Result<(i32, i32), DeviceError> {
        self.adb.display_size().await
    }

    async fn is_app_alive(&self) -> Result<bool, DeviceError> {
        Ok(self.adb.pidof(&self.package).await?.is_some())
    }
}
