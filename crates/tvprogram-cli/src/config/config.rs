//! `AppConfig` struct and TOML read/write.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default guide cache directory.
const DEFAULT_GUIDE_DIR: &str = "/tmp/CiefpTvProgram";

/// Default consolidated multi-channel guide.
const DEFAULT_CONSOLIDATED_GUIDE: &str = "/etc/epgimport/rytecSRB_Basic.xml";

/// Default picon directory.
const DEFAULT_PICON_DIR: &str = "/usr/lib/enigma2/python/Plugins/Extensions/CiefpTvProgram/picon";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory name under the XDG config home.
const APP_DIR: &str = "tvprogram";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Filesystem locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Filesystem locations.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathsConfig {
    /// Guide cache directory.
    #[serde(default = "default_guide_dir")]
    pub guide_dir: PathBuf,
    /// Consolidated guide checked before per-channel acquisition.
    #[serde(default = "default_consolidated_guide")]
    pub consolidated_guide: PathBuf,
    /// Directory holding `{source_id}.png` picons.
    #[serde(default = "default_picon_dir")]
    pub picon_dir: PathBuf,
    /// Fallback picon (default: `{picon_dir}/placeholder.png`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_picon: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            guide_dir: default_guide_dir(),
            consolidated_guide: default_consolidated_guide(),
            picon_dir: default_picon_dir(),
            placeholder_picon: None,
        }
    }
}

impl PathsConfig {
    /// Placeholder picon, falling back to `{picon_dir}/placeholder.png`.
    #[must_use]
    pub fn placeholder_picon(&self) -> PathBuf {
        self.placeholder_picon
            .clone()
            .unwrap_or_else(|| self.picon_dir.join("placeholder.png"))
    }
}

/// HTTP client settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// `User-Agent` header sent with guide downloads.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_guide_dir() -> PathBuf {
    PathBuf::from(DEFAULT_GUIDE_DIR)
}

fn default_consolidated_guide() -> PathBuf {
    PathBuf::from(DEFAULT_CONSOLIDATED_GUIDE)
}

fn default_picon_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PICON_DIR)
}

fn default_user_agent() -> String {
    String::from(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ))
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    /// Config file location.
    ///
    /// `dir` (the `--dir` override) wins, then `$XDG_CONFIG_HOME/tvprogram`,
    /// then `$HOME/.config/tvprogram`. An empty `XDG_CONFIG_HOME` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set and no
    /// override was given.
    pub fn path(dir: Option<&Path>) -> Result<PathBuf> {
        Self::path_with(dir, |key| std::env::var_os(key))
    }

    /// [`Self::path`] over an injectable environment lookup.
    fn path_with(
        dir: Option<&Path>,
        env: impl Fn(&str) -> Option<std::ffi::OsString>,
    ) -> Result<PathBuf> {
        if let Some(d) = dir {
            return Ok(d.join(CONFIG_FILE));
        }

        let config_home = match env("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            Some(xdg) => PathBuf::from(xdg),
            None => PathBuf::from(env("HOME").context("neither XDG_CONFIG_HOME nor HOME is set")?)
                .join(".config"),
        };
        Ok(config_home.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Resolves the config location and loads it.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be resolved or the file is
    /// unreadable or invalid.
    pub fn load_from_dir(dir: Option<&Path>) -> Result<Self> {
        let path = Self::path(dir).context("failed to resolve config path")?;
        Self::load(&path)
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
