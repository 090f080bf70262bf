//! Application configuration module.
//!
//! Manages the TOML config file holding guide cache, consolidated guide and
//! picon locations plus HTTP client settings. The file lives at
//! `{--dir}/config.toml`, `$XDG_CONFIG_HOME/tvprogram/config.toml` or
//! `~/.config/tvprogram/config.toml`.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
