use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::app_dir::harness_data_file_path;
use crate::device::LaunchSpec;
use crate::scenario::PauseClass;
use crate::store::ListScheme;

/// Harness configuration, loaded from `TOUR_`-prefixed environment variables
/// with an optional `.env` file in the harness data directory. Every field
/// has a default; a bare environment runs the stock tour against the stock
/// app.
#[derive(Debug, Deserialize, Clone)]
pub struct TourConfig {
    /// Device serial, for when several devices are attached.
    #[serde(default)]
    pub device_serial: Option<String>,
    /// Package of the target app.
    #[serde(default = "default_package")]
    pub package: String,
    /// Launch activity, relative to the package.
    #[serde(default = "default_activity")]
    pub activity: String,
    /// On-disk encoding of the persisted string lists. The installed app
    /// version dictates this and nothing on disk says which it is, so it has
    /// to be configured, never sniffed.
    #[serde(default = "default_list_scheme")]
    pub list_scheme: ListScheme,
    /// Launch the app with its built-in demo dataset instead of seeding the
    /// store externally.
    #[serde(default)]
    pub demo_mode: bool,
    /// Settle delays per pause class. Humantime strings ("800ms", "2s").
    #[serde(default = "default_short_delay")]
    pub short_delay: String,
    #[serde(default = "default_medium_delay")]
    pub medium_delay: String,
    #[serde(default = "default_long_delay")]
    pub long_delay: String,
    /// Bound on the app-launch focus poll.
    #[serde(default = "default_launch_timeout")]
    pub launch_timeout: String,
    /// Where checkpoint artifacts land. Defaults to a timestamped directory
    /// under the harness data dir.
    #[serde(default)]
    pub capture_dir: Option<PathBuf>,
}

fn default_package() -> String {
    "org.codeberg.theoden8.webspace".to_string()
}

fn default_activity() -> String {
    ".MainActivity".to_string()
}

fn default_list_scheme() -> ListScheme {
    // The oldest encoding still in the installed base.
    ListScheme::StringSet
}

fn default_short_delay() -> String {
    "800ms".to_string()
}

fn default_medium_delay() -> String {
    "1500ms".to_string()
}

fn default_long_delay() -> String {
    "2500ms".to_string()
}

fn default_launch_timeout() -> String {
    "10s".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    LoadError(String),
    #[error("invalid duration {value:?} for {key}: {source}")]
    BadDuration {
        key: &'static str,
        value: String,
        source: humantime::DurationError,
    },
}

impl TourConfig {
    /// Loads the configuration from the environment, with the harness data
    /// dir's `.env` file layered underneath when present.
    pub fn load() -> Result<Self, ConfigError> {
        match harness_data_file_path(".env") {
            Ok(env_file_path) => {
                if let Err(err) = dotenvy::from_path_override(&env_file_path) {
                    tracing::debug!(?err, "no harness .env file, using process environment");
                } else {
                    tracing::info!(path = %env_file_path.display(), "loaded .env file");
                }
            }
            Err(err) => tracing::warn!(?err, "could not resolve harness data directory"),
        }

        let config: TourConfig = envy::prefixed("TOUR_")
            .from_env()
            .map_err(|err| ConfigError::LoadError(err.to_string()))?;

        // Surface bad duration strings at startup, not mid-tour.
        config.pauses()?;
        config.launch_timeout()?;
        tracing::info!(package = %config.package, scheme = ?config.list_scheme, "configuration loaded");
        Ok(config)
    }

    pub fn pauses(&self) -> Result<Pauses, ConfigError> {
        Ok(Pauses {
            short: parse_delay("short_delay", &self.short_delay)?,
            medium: parse_delay("medium_delay", &self.medium_delay)?,
            long: parse_delay("long_delay", &self.long_delay)?,
        })
    }

    pub fn launch_timeout(&self) -> Result<Duration, ConfigError> {
        parse_delay("launch_timeout", &self.launch_timeout)
    }

    pub fn launch_spec(&self) -> LaunchSpec {
        LaunchSpec {
            package: self.package.clone(),
            activity: self.activity.clone(),
            demo_mode: self.demo_mode,
        }
    }
}

fn parse_delay(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|source| ConfigError::BadDuration {
        key,
        value: value.to_string(),
        source,
    })
}

/// The three settle classes every tour timing is expressed in.
#[derive(Debug, Clone, Copy)]
pub struct Pauses {
    pub short: Duration,
    pub medium: Duration,
    pub long: Duration,
}

impl Pauses {
    pub fn duration(&self, class: PauseClass) -> Duration {
        match class {
            PauseClass::Short => self.short,
            PauseClass::Medium => self.medium,
            PauseClass::Long => self.long,
        }
    }
}
