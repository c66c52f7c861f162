use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tokio::process::Command;

use crate::device::DeviceError;
use crate::utils::poll::poll_until;

const FOCUS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// How the target app is started. `demo_mode` is the boolean launch extra
/// telling the app to self-seed its built-in demo dataset; the harness keeps
/// this record so callers can check which seeding path is active instead of
/// assuming one.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub package: String,
    pub activity: String,
    pub demo_mode: bool,
}

impl LaunchSpec {
    fn component(&self) -> String {
        format!("{}/{}", self.package, self.activity)
    }
}

/// Thin wrapper over the `adb` binary. Every command runs as a subprocess;
/// there is no persistent connection state beyond the optional serial.
#[derive(Debug, Clone)]
pub struct Adb {
    program: PathBuf,
    serial: Option<String>,
}

impl Adb {
    /// Locate `adb` on the PATH. The serial pins every command to one device
    /// when several are attached.
    pub fn locate(serial: Option<String>) -> Result<Self, DeviceError> {
        let program = which::which("adb")?;
        tracing::debug!(program = %program.display(), ?serial, "located adb");
        Ok(Adb { program, serial })
    }

    /// Run an adb command and return its raw output without inspecting the
    /// exit status. Callers that can interpret failure (missing file, absent
    /// process) use this directly.
    pub async fn output(&self, args: &[&str]) -> Result<Output, DeviceError> {
        let mut command = Command::new(&self.program);
        if let Some(serial) = &self.serial {
            command.arg("-s").arg(serial);
        }
        command.args(args);
        let output = command.output().await?;
        tracing::trace!(?args, status = ?output.status, "adb command finished");
        Ok(output)
    }

    /// Run an adb command, failing on a non-zero exit status.
    async fn checked(&self, args: &[&str]) -> Result<Output, DeviceError> {
        let output = self.output(args).await?;
        if !output.status.success() {
            return Err(DeviceError::CommandFailed {
                command: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    /// `adb shell <args>`, returning stdout as text.
    pub async fn shell(&self, args: &[&str]) -> Result<String, DeviceError> {
        let mut full = vec!["shell"];
        full.extend_from_slice(args);
        let output = self.checked(&full).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `adb exec-out <args>`, returning stdout as raw bytes (no pty mangling).
    pub async fn exec_out(&self, args: &[&str]) -> Result<Vec<u8>, DeviceError> {
        let mut full = vec!["exec-out"];
        full.extend_from_slice(args);
        let output = self.checked(&full).await?;
        Ok(output.stdout)
    }

    pub async fn push(&self, local: &Path, remote: &str) -> Result<(), DeviceError> {
        let local = local.to_string_lossy();
        self.checked(&["push", local.as_ref(), remote]).await?;
        Ok(())
    }

    /// Force-stop the target process. Callers treat failure as best-effort.
    pub async fn force_stop(&self, package: &str) -> Result<(), DeviceError> {
        self.shell(&["am", "force-stop", package]).await?;
        Ok(())
    }

    /// Start the target activity on a cleared task, forwarding the demo-mode
    /// extra when the spec carries it.
    pub async fn launch(&self, spec: &LaunchSpec) -> Result<(), DeviceError> {
        let component = spec.component();
        let mut args = vec![
            "am",
            "start",
            "-W",
            "--activity-clear-task",
            "-n",
            component.as_str(),
        ];
        if spec.demo_mode {
            args.extend_from_slice(&["--ez", "demo_mode", "true"]);
        }
        tracing::info!(%component, demo_mode = spec.demo_mode, "launching target app");
        self.shell(&args).await?;
        Ok(())
    }

    /// Pid of the target process, `None` when it is not running.
    pub async fn pidof(&self, package: &str) -> Result<Option<u32>, DeviceError> {
        let output = self.output(&["shell", "pidof", package]).await?;
        if !output.status.success() {
            return Ok(None);
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.split_whitespace().next().and_then(|p| p.parse().ok()))
    }

    /// Package of the window currently holding input focus, if any.
    pub async fn focused_package(&self) -> Result<Option<String>, DeviceError> {
        static FOCUS: OnceLock<Regex> = OnceLock::new();
        let focus = FOCUS.get_or_init(|| {
            Regex::new(r"m(?:CurrentFocus|FocusedApp)=\S*\bWindow\{\S+ u\d+ ([^/\s]+)/")
                .expect("focus pattern compiles")
        });
        let dump = self.shell(&["dumpsys", "window", "windows"]).await?;
        Ok(focus
            .captures(&dump)
            .map(|captures| captures[1].to_string()))
    }

    /// Poll until the target package holds window focus, bounded by
    /// `timeout`. Returns the observed outcome; an exhausted poll is a normal
    /// result, not an error.
    pub async fn wait_for_focus(&self, package: &str, timeout: Duration) -> bool {
        poll_until(timeout, FOCUS_POLL_INTERVAL, async || {
            matches!(self.focused_package().await, Ok(Some(focused)) if focused == package)
        })
        .await
    }

    /// Display size in pixels, preferring an override resolution when set.
    pub async fn display_size(&self) -> Result<(i32, i32), DeviceError> {
        static SIZE: OnceLock<Regex> = OnceLock::new();
        let size = SIZE.get_or_init(|| {
            Regex::new(r"(?m)^(Physical|Override) size: (\d+)x(\d+)").expect("size pattern compiles")
        });
        let out = self.shell(&["wm", "size"]).await?;
        let mut physical = None;
        let mut over = None;
        for captures in size.captures_iter(&out) {
            let dims = (
                captures[2].parse().unwrap_or(0),
                captures[3].parse().unwrap_or(0),
            );
            match &captures[1] {
                "Override" => over = Some(dims),
                _ => physical = Some(dims),
            }
        }
        over.or(physical)
            .ok_or_else(|| DeviceError::UnexpectedOutput(format!("wm size: {}", out.trim())))
    }

    /// PNG screen capture of the current display.
    pub async fn screencap(&self) -> Result<Vec<u8>, DeviceError> {
        self.exec_out(&["screencap", "-p"]).await
    }
}
