use serde::{Deserialize, Serialize};

/// Reserved id of the webspace that semantically contains every site. Its
/// stored `siteIndices` are ignored by the app, whatever is on disk.
pub const ALL_WEBSPACE_ID: &str = "__all_webspace__";

/// A named, ordered subset of the site list. Membership is by site index,
/// which is why the site list must keep its order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub site_indices: Vec<usize>,
}

impl Webspace {
    /// The reserved "all sites" webspace.
    pub fn all() -> Self {
        Webspace {
            id: ALL_WEBSPACE_ID.to_string(),
            name: "All".to_string(),
            site_indices: Vec::new(),
        }
    }

    /// A webspace with a freshly generated id. Ids are random but
    /// structurally valid; callers must not rely on any particular value and
    /// should compare webspaces by name and membership instead.
    pub fn new(name: impl Into<String>, site_indices: Vec<usize>) -> Self {
        Webspace {
            id: fresh_id(),
            name: name.into(),
            site_indices,
        }
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_WEBSPACE_ID
    }

    /// Serialize to the wire record stored inside the webspace list.
    pub fn to_record(&self) -> String {
        serde_json::to_string(self).expect("webspace record serializes")
    }

    pub fn from_record(record: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(record)
    }
}

fn fresh_id() -> String {
    format!("webspace_{:08x}", rand::random::<u32>())
}
