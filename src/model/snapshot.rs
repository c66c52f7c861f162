use crate::model::site::Site;
use crate::model::webspace::{ALL_WEBSPACE_ID, Webspace};

/// Sentinel stored under `currentIndex` when no site is selected.
pub const NO_SITE_SELECTED: i64 = 10_000;

/// Theme preference as the app persists it, an ordinal under `themeMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub fn to_ordinal(self) -> i64 {
        match self {
            ThemeMode::Light => 0,
            ThemeMode::Dark => 1,
            ThemeMode::System => 2,
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(ThemeMode::Light),
            1 => Some(ThemeMode::Dark),
            2 => Some(ThemeMode::System),
            _ => None,
        }
    }
}

/// The full persisted configuration of the target app at one point in time:
/// the ordered site list, the ordered webspace list, the selection and the
/// display preferences. The seeder always replaces a snapshot wholesale;
/// nothing here is patched into a live store.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub sites: Vec<Site>,
    pub webspaces: Vec<Webspace>,
    pub selected_webspace: String,
    pub selected_site: i64,
    pub theme_mode: ThemeMode,
    pub show_url_bar: bool,
}

impl Snapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// The seeded site names double as the drawer probe labels: the drawer is
    /// the only surface that renders them, so resolving any of them means the
    /// drawer is open.
    pub fn site_names(&self) -> Vec<String> {
        self.sites.iter().map(|s| s.name.clone()).collect()
    }

    /// The dataset shown in the app's store listing: eight sites across the
    /// reserved "All" webspace and three themed ones.
    pub fn store_listing() -> Snapshot {
        Snapshot::builder()
            .site(Site::new("My Blog", "https://example.com/blog"))
            .site(Site::new("Home Dashboard", "http://homeserver.local:8080"))
            .site(Site::new("Photo Gallery", "https://photos.example.com"))
            .site(Site::new("Tasks", "https://tasks.example.com"))
            .site(Site::new("Personal Wiki", "http://192.168.1.100:3000"))
            .site(Site::new("Media Server", "http://192.168.1.101:8096"))
            .site(Site::new("News Feed", "https://reader.example.com"))
            .site(Site::new("Notes", "https://notes.example.com"))
            .webspace(Webspace::all())
            .webspace(Webspace::new("Work", vec![0, 3, 7]))
            .webspace(Webspace::new("Home Server", vec![1, 4, 5]))
            .webspace(Webspace::new("Personal", vec![2, 6, 7]))
            .build()
    }
}

/// Parameterized snapshot construction, so scenarios can assemble arbitrary
/// fixtures instead of sharing one hard-coded dataset.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    sites: Vec<Site>,
    webspaces: Vec<Webspace>,
    selected_webspace: Option<String>,
    selected_site: Option<i64>,
    theme_mode: Option<ThemeMode>,
    show_url_bar: bool,
}

impl SnapshotBuilder {
    pub fn site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    pub fn sites(mut self, sites: impl IntoIterator<Item = Site>) -> Self {
        self.sites.extend(sites);
        self
    }

    pub fn webspace(mut self, webspace: Webspace) -> Self {
        self.webspaces.push(webspace);
        self
    }

    pub fn webspaces(mut self, webspaces: impl IntoIterator<Item = Webspace>) -> Self {
        self.webspaces.extend(webspaces);
        self
    }

    pub fn select_webspace(mut self, id: impl Into<String>) -> Self {
        self.selected_webspace = Some(id.into());
        self
    }

    pub fn select_site(mut self, index: i64) -> Self {
        self.selected_site = Some(index);
        self
    }

    pub fn theme_mode(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = Some(mode);
        self
    }

    pub fn show_url_bar(mut self, show: bool) -> Self {
        self.show_url_bar = show;
        self
    }

    /// Defaults match a fresh tour: the "All" webspace selected, no site
    /// selected, light theme, URL bar hidden.
    pub fn build(self) -> Snapshot {
        Snapshot {
            sites: self.sites,
            webspaces: self.webspaces,
            selected_webspace: self
                .selected_webspace
                .unwrap_or_else(|| ALL_WEBSPACE_ID.to_string()),
            selected_site: self.selected_site.unwrap_or(NO_SITE_SELECTED),
            theme_mode: self.theme_mode.unwrap_or(ThemeMode::Light),
            show_url_bar: self.show_url_bar,
        }
    }
}
