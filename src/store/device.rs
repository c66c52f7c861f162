use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::device::{Adb, DeviceError};
use crate::store::{PrefOp, PrefValue, PreferenceStore, StoreError};

/// Preferences file path relative to the app's data directory (the working
/// directory of a `run-as` shell).
const PREFS_REMOTE_PATH: &str = "shared_prefs/FlutterSharedPreferences.xml";

/// World-readable staging location the rendered document is pushed to before
/// it is copied into the app sandbox.
const STAGING_REMOTE_PATH: &str = "/data/local/tmp/webspace_tour_prefs.xml";

/// The target app's preference store, reached through `adb run-as`. Reads
/// parse the live preferences document; writes render the whole document and
/// copy it into the sandbox in one shot, so a batch lands atomically or not
/// at all. Requires a debuggable target build.
#[derive(Debug)]
pub struct DevicePrefStore {
    adb: Adb,
    package: String,
    staging_local: PathBuf,
}

impl DevicePrefStore {
    pub fn new(adb: Adb, package: String) -> Self {
        let staging_local =
            std::env::temp_dir().join(format!("webspace-tour-prefs-{}.xml", std::process::id()));
        DevicePrefStore {
            adb,
            package,
            staging_local,
        }
    }

    async fn read_document(&self) -> Result<BTreeMap<String, PrefValue>, StoreError> {
        let output = self
            .adb
            .output(&["shell", "run-as", &self.package, "cat", PREFS_REMOTE_PATH])
            .await
            .map_err(StoreError::Device)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // A store that has never been written is empty, not broken.
            if stderr.contains("No such file") {
                return Ok(BTreeMap::new());
            }
            return Err(StoreError::Device(DeviceError::CommandFailed {
                command: format!("run-as {} cat {}", self.package, PREFS_REMOTE_PATH),
                status: output.status,
                stderr: stderr.trim().to_string(),
            }));
        }
        parse_prefs(&String::from_utf8_lossy(&output.stdout))
    }

    async fn write_document(
        &self,
        document: &BTreeMap<String, PrefValue>,
    ) -> Result<(), StoreError> {
        tokio::fs::write(&self.staging_local, render_prefs(document)).await?;
        self.adb
            .push(&self.staging_local, STAGING_REMOTE_PATH)
            .await?;

        let install = format!(
            "mkdir -p shared_prefs && cp {STAGING_REMOTE_PATH} {PREFS_REMOTE_PATH}"
        );
        let output = self
            .adb
            .output(&["shell", "run-as", &self.package, "sh", "-c", &install])
            .await?;
        if !output.status.success() {
            return Err(StoreError::WriteRejected(format!(
                "run-as install failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if let Err(err) = self.adb.shell(&["rm", "-f", STAGING_REMOTE_PATH]).await {
            tracing::debug!(?err, "failed to remove staged preferences from device");
        }
        if let Err(err) = tokio::fs::remove_file(&self.staging_local).await {
            tracing::debug!(?err, "failed to remove local staging file");
        }
        Ok(())
    }
}

impl PreferenceStore for DevicePrefStore {
    async fn get(&self, key: &str) -> Result<Option<PrefValue>, StoreError> {
        Ok(self.read_document().await?.get(key).cloned())
    }

    async fn apply(&mut self, ops: Vec<PrefOp>) -> Result<(), StoreError> {
        let mut document = self.read_document().await?;
        for op in ops {
            match op {
                PrefOp::Put { key, value } => {
                    document.insert(key, value);
                }
                PrefOp::Remove { key } => {
                    document.remove(&key);
                }
            }
        }
        self.write_document(&document).await
    }
}

/// Parse an Android shared-preferences document. Unknown entry kinds are
/// skipped with a warning rather than failing the read: the app may persist
/// keys this harness does not model.
pub fn parse_prefs(xml: &str) -> Result<BTreeMap<String, PrefValue>, StoreError> {
    let document = roxmltree::Document::parse(xml)?;
    let mut values = BTreeMap::new();
    let Some(map) = document
        .root()
        .children()
        .find(|node| node.has_tag_name("map"))
    else {
        return Ok(values);
    };
    for entry in map.children().filter(|node| node.is_element()) {
        let Some(name) = entry.attribute("name") else {
            continue;
        };
        let value = match entry.tag_name().name() {
            "string" => Some(PrefValue::String(entry.text().unwrap_or_default().to_string())),
            "set" => Some(PrefValue::StringSet(
                entry
                    .children()
                    .filter(|child| child.has_tag_name("string"))
                    .map(|child| child.text().unwrap_or_default().to_string())
                    .collect(),
            )),
            "long" | "int" => entry
                .attribute("value")
                .and_then(|raw| raw.parse().ok())
                .map(PrefValue::Long),
            "boolean" => entry
                .attribute("value")
                .and_then(|raw| raw.parse().ok())
                .map(PrefValue::Boolean),
            other => {
                tracing::warn!(kind = other, key = name, "skipping unmodeled preference entry");
                None
            }
        };
        if let Some(value) = value {
            values.insert(name.to_string(), value);
        }
    }
    Ok(values)
}

/// Render a preferences document in the exact layout Android writes, so a
/// seeded file is indistinguishable from one the platform produced.
pub fn render_prefs(values: &BTreeMap<String, PrefValue>) -> String {
    let mut out = String::from("<?xml version='1.0' encoding='utf-8' standalone='yes' ?>\n<map>\n");
    for (key, value) in values {
        let key = escape_xml(key);
        match value {
            PrefValue::String(s) => {
                let _ = writeln!(out, "    <string name=\"{key}\">{}</string>", escape_xml(s));
            }
            PrefValue::StringSet(items) => {
                let _ = writeln!(out, "    <set name=\"{key}\">");
                for item in items {
                    let _ = writeln!(out, "        <string>{}</string>", escape_xml(item));
                }
                let _ = writeln!(out, "    </set>");
            }
            PrefValue::Long(n) => {
                let _ = writeln!(out, "    <long name=\"{key}\" value=\"{n}\" />");
            }
            PrefValue::Boolean(b) => {
                let _ = writeln!(out, "    <boolean name=\"{key}\" value=\"{b}\" />");
            }
        }
    }
    out.push_str("</map>\n");
    out
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
