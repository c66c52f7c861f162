pub mod site;
pub mod snapshot;
pub mod webspace;

pub use site::{Cookie, ProxyMode, ProxySettings, Site};
pub use snapshot::{NO_SITE_SELECTED, Snapshot, SnapshotBuilder, ThemeMode};
pub use webspace::{ALL_WEBSPACE_ID, Webspace};
