use itertools::Itertools;

use crate::model::Snapshot;
use crate::store::codec::{self, ListScheme};
use crate::store::{PrefOp, PrefValue, PreferenceStore, StoreError, full_key, keys};

/// How much of the first decoded item the verification report shows.
const PREVIEW_LEN: usize = 100;

/// Writes, clears and reads back the persisted snapshot of the target app.
/// A seed replaces the whole snapshot in one atomic batch; the harness never
/// patches individual keys of a live store.
#[derive(Debug)]
pub struct StateSeeder<S> {
    store: S,
    scheme: ListScheme,
}

impl<S: PreferenceStore> StateSeeder<S> {
    pub fn new(store: S, scheme: ListScheme) -> Self {
        StateSeeder { store, scheme }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write every snapshot key as a single commit. Propagates the store's
    /// rejection untouched; a failed seed leaves no partial snapshot behind.
    pub async fn seed(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let site_records: Vec<String> = snapshot.sites.iter().map(|s| s.to_record()).collect();
        let webspace_records: Vec<String> =
            snapshot.webspaces.iter().map(|w| w.to_record()).collect();

        let ops = vec![
            PrefOp::put(
                full_key(keys::SITES),
                codec::encode(&site_records, self.scheme),
            ),
            PrefOp::put(
                full_key(keys::WEBSPACES),
                codec::encode(&webspace_records, self.scheme),
            ),
            PrefOp::put(
                full_key(keys::SELECTED_WEBSPACE),
                PrefValue::String(snapshot.selected_webspace.clone()),
            ),
            PrefOp::put(
                full_key(keys::SELECTED_SITE),
                PrefValue::Long(snapshot.selected_site),
            ),
            PrefOp::put(
                full_key(keys::THEME_MODE),
                PrefValue::Long(snapshot.theme_mode.to_ordinal()),
            ),
            PrefOp::put(
                full_key(keys::SHOW_URL_BAR),
                PrefValue::Boolean(snapshot.show_url_bar),
            ),
        ];
        self.store.apply(ops).await?;
        tracing::info!(
            sites = snapshot.sites.len(),
            webspaces = snapshot.webspaces.len(),
            scheme = ?self.scheme,
            "seeded snapshot"
        );
        Ok(())
    }

    /// Remove every snapshot key. Clearing an already-clear store is a no-op.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        let ops = keys::ALL
            .iter()
            .map(|key| PrefOp::remove(full_key(key)))
            .collect();
        self.store.apply(ops).await?;
        tracing::info!("cleared snapshot keys");
        Ok(())
    }

    /// Read every key back and describe what is there. Missing keys are
    /// reported as absent, never raised; corrupt list data surfaces as a
    /// `DecodeError`.
    pub async fn verify(&self) -> Result<SnapshotReport, StoreError> {
        let mut report = SnapshotReport::default();
        for key in keys::ALL {
            let entry = match self.store.get(&full_key(key)).await? {
                None => KeyReport::absent(key),
                Some(value) if key == keys::SITES || key == keys::WEBSPACES => {
                    let items = codec::decode(&value, self.scheme)?;
                    KeyReport {
                        key,
                        present: true,
                        item_count: Some(items.len()),
                        preview: items.first().map(|item| truncate(item, PREVIEW_LEN)),
                    }
                }
                Some(value) => KeyReport {
                    key,
                    present: true,
                    item_count: None,
                    preview: Some(value.preview()),
                },
            };
            report.keys.push(entry);
        }
        tracing::debug!(report = %report.summary(), "verified snapshot");
        Ok(report)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}

/// Per-key outcome of a verification pass. Diagnostic only.
#[derive(Debug, Clone)]
pub struct KeyReport {
    pub key: &'static str,
    pub present: bool,
    /// Decoded item count, for the list-valued keys.
    pub item_count: Option<usize>,
    /// The first decoded item (lists) or the rendered value (scalars).
    pub preview: Option<String>,
}

impl KeyReport {
    fn absent(key: &'static str) -> Self {
        KeyReport {
            key,
            present: false,
            item_count: None,
            preview: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotReport {
    pub keys: Vec<KeyReport>,
}

impl SnapshotReport {
    pub fn key(&self, key: &str) -> Option<&KeyReport> {
        self.keys.iter().find(|entry| entry.key == key)
    }

    pub fn all_present(&self) -> bool {
        !self.keys.is_empty() && self.keys.iter().all(|entry| entry.present)
    }

    pub fn all_absent(&self) -> bool {
        self.keys.iter().all(|entry| !entry.present)
    }

    pub fn site_count(&self) -> Option<usize> {
        self.key(keys::SITES).and_then(|entry| entry.item_count)
    }

    pub fn webspace_count(&self) -> Option<usize> {
        self.key(keys::WEBSPACES).and_then(|entry| entry.item_count)
    }

    /// One line per key, for the log.
    pub fn summary(&self) -> String {
        self.keys
            .iter()
            .map(|entry| match (entry.present, entry.item_count) {
                (false, _) => format!("{}: absent", entry.key),
                (true, Some(count)) => format!("{}: {} item(s)", entry.key, count),
                (true, None) => format!(
                    "{}: {}",
                    entry.key,
                    entry.preview.as_deref().unwrap_or_default()
                ),
            })
            .join(", ")
    }
}
