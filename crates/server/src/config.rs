use std::path::Path;

use anyhow::{bail, Context};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "server.toml";
pub const DEFAULT_SESSION_SECRET: &str = "dev-session-secret";

/// Browsers clamp cookie lifetimes to 400 days; longer values only risk
/// overflowing the expiry arithmetic.
pub const MAX_SESSION_TTL_SECONDS: i64 = 400 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub session_secret: String,
    pub session_cookie_name: String,
    pub session_ttl_seconds: i64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".into(),
            session_secret: DEFAULT_SESSION_SECRET.into(),
            session_cookie_name: "session".into(),
            session_ttl_seconds: 31 * 24 * 60 * 60,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn uses_default_secret(&self) -> bool {
        self.session_secret == DEFAULT_SESSION_SECRET
    }
}

/// Defaults, then `server.toml` if present, then `APP__*` environment
/// variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(CONFIG_FILE), None)
}

pub(crate) fn load_settings_from(
    path: &Path,
    env: Option<config::Map<String, String>>,
) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let settings: Settings = Config::builder()
        .set_default("bind_addr", defaults.bind_addr)?
        .set_default("session_secret", defaults.session_secret)?
        .set_default("session_cookie_name", defaults.session_cookie_name)?
        .set_default("session_ttl_seconds", defaults.session_ttl_seconds)?
        .set_default("log_filter", defaults.log_filter)?
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .with_context(|| format!("failed to load settings from '{}'", path.display()))?
        .try_deserialize()
        .context("invalid settings")?;

    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    if settings.session_secret.trim().is_empty() {
        bail!("session_secret must not be empty");
    }
    if !(1..=MAX_SESSION_TTL_SECONDS).contains(&settings.session_ttl_seconds) {
        bail!(
            "session_ttl_seconds must be between 1 and {MAX_SESSION_TTL_SECONDS}, got {}",
            settings.session_ttl_seconds
        );
    }
    if settings.session_cookie_name.trim().is_empty()
        || settings
            .session_cookie_name
            .contains(|c: char| c == ';' || c == '=' || c.is_whitespace())
    {
        bail!(
            "session_cookie_name '{}' is not a valid cookie name",
            settings.session_cookie_name
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
