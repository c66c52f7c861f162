use serde::{Deserialize, Serialize};

/// A single site as the target app persists it: one JSON record inside the
/// site list. Field names follow the app's wire schema, so a seeded record is
/// indistinguishable from one the app wrote itself.
///
/// Site identity is the record's position in the site list. Webspaces refer
/// to sites by that index, so the list order is load-bearing and must never
/// be re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub name: String,
    pub init_url: String,
    pub current_url: String,
    pub page_title: String,
    #[serde(default)]
    pub cookies: Vec<Cookie>,
    #[serde(default)]
    pub proxy_settings: ProxySettings,
    #[serde(default = "default_true")]
    pub javascript_enabled: bool,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub third_party_cookies_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Site {
    /// A site with the app's defaults: current URL and page title mirror the
    /// initial URL and display name, no cookies, default proxy, JavaScript
    /// on, third-party cookies off.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let url = url.into();
        Site {
            page_title: name.clone(),
            name,
            current_url: url.clone(),
            init_url: url,
            cookies: Vec::new(),
            proxy_settings: ProxySettings::default(),
            javascript_enabled: true,
            user_agent: String::new(),
            third_party_cookies_enabled: false,
        }
    }

    /// Serialize to the wire record stored inside the site list.
    pub fn to_record(&self) -> String {
        serde_json::to_string(self).expect("site record serializes")
    }

    pub fn from_record(record: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: String,
}

/// Per-site network routing. The app stores the mode under `type`; host and
/// port are only present for manual proxies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxySettings {
    #[serde(rename = "type")]
    pub mode: ProxyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyMode {
    Default,
    Direct,
    Manual,
}

impl Default for ProxySettings {
    fn default() -> Self {
        ProxySettings {
            mode: ProxyMode::Default,
            host: None,
            port: None,
        }
    }
}
