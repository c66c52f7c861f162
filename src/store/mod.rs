pub mod codec;
pub mod device;
pub mod memory;
pub mod seeder;

pub use codec::{DecodeError, ListScheme};
pub use device::DevicePrefStore;
pub use memory::MemoryStore;
pub use seeder::{KeyReport, SnapshotReport, StateSeeder};

/// Every key the target app persists is namespaced under this prefix.
pub const KEY_PREFIX: &str = "flutter.";

/// Logical key names of the persisted snapshot, without the namespace prefix.
pub mod keys {
    pub const SITES: &str = "webViewModels";
    pub const WEBSPACES: &str = "webspaces";
    pub const SELECTED_WEBSPACE: &str = "selectedWebspaceId";
    pub const SELECTED_SITE: &str = "currentIndex";
    pub const THEME_MODE: &str = "themeMode";
    pub const SHOW_URL_BAR: &str = "showUrlBar";

    pub const ALL: [&str; 6] = [
        SITES,
        WEBSPACES,
        SELECTED_WEBSPACE,
        SELECTED_SITE,
        THEME_MODE,
        SHOW_URL_BAR,
    ];
}

/// Namespaced form of a logical key, as it appears on disk.
pub fn full_key(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// A value as the preference store types it on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    String(String),
    StringSet(Vec<String>),
    Long(i64),
    Boolean(bool),
}

impl PrefValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PrefValue::String(_) => "string",
            PrefValue::StringSet(_) => "string set",
            PrefValue::Long(_) => "long",
            PrefValue::Boolean(_) => "boolean",
        }
    }

    /// Short human-readable rendering for reports and logs.
    pub fn preview(&self) -> String {
        match self {
            PrefValue::String(s) => s.clone(),
            PrefValue::StringSet(items) => format!("{} item(s)", items.len()),
            PrefValue::Long(n) => n.to_string(),
            PrefValue::Boolean(b) => b.to_string(),
        }
    }
}

/// One mutation inside an atomic batch.
#[derive(Debug, Clone)]
pub enum PrefOp {
    Put { key: String, value: PrefValue },
    Remove { key: String },
}

impl PrefOp {
    pub fn put(key: impl Into<String>, value: PrefValue) -> Self {
        PrefOp::Put {
            key: key.into(),
            value,
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        PrefOp::Remove { key: key.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("store rejected commit: {0}")]
    WriteRejected(String),
    #[error(transparent)]
    Device(#[from] crate::device::DeviceError),
    #[error("malformed preferences document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value preference store of the target application.
///
/// `apply` commits a batch as a unit: a rejected batch must leave the store
/// untouched, so a seeded snapshot is either fully present or fully absent.
#[allow(async_fn_in_trait)]
pub trait PreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<PrefValue>, StoreError>;
    async fn apply(&mut self, ops: Vec<PrefOp>) -> Result<(), StoreError>;
}
