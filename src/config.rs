//! Runtime configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `STATUSBOARD_*` environment variables (nested keys use `__`, e.g.
//! `STATUSBOARD_PAGE__TITLE`), then command-line flags.
//!
//! ```toml
//! listen_addr = "0.0.0.0:8080"
//! ingest_path = "/api/status"
//! snapshot_path = "/var/lib/statusboard/status.json"
//! token = "change-me"
//!
//! [page]
//! title = "Example Status"
//! refresh_secs = 60
//! utc_offset = "+01:00"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Fully resolved settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Path that accepts snapshot submissions.
    pub ingest_path: String,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
    /// Shared secret reporters pass as the `token` query parameter.
    #[serde(default)]
    pub token: Option<String>,
    /// The single persisted snapshot document.
    pub snapshot_path: PathBuf,
    pub page: PageSettings,
}

/// Presentation settings shared by the HTML page and the terminal dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSettings {
    pub title: String,
    /// Client-side refresh interval.
    pub refresh_secs: u64,
    /// Fixed offset used to display the report time, e.g. "+01:00".
    #[serde(default)]
    pub utc_offset: Option<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "Service Status".to_string(),
            refresh_secs: 60,
            utc_offset: None,
        }
    }
}

impl PageSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    /// The display offset; UTC when unset.
    pub fn offset(&self) -> Result<FixedOffset> {
        match self.utc_offset.as_deref() {
            None | Some("") | Some("Z") | Some("UTC") => Ok(Utc.fix()),
            Some(s) => s
                .parse::<FixedOffset>()
                .with_context(|| format!("invalid page.utc_offset {s:?}, expected e.g. \"+01:00\"")),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let defaults = PageSettings::default();
        let mut builder = Config::builder()
            .set_default("listen_addr", "0.0.0.0:8080")?
            .set_default("ingest_path", "/api/status")?
            .set_default("max_body_bytes", 1024_i64 * 1024)?
            .set_default("snapshot_path", "status.json")?
            .set_default("page.title", defaults.title)?
            .set_default("page.refresh_secs", defaults.refresh_secs as i64)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("STATUSBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to load configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.ingest_path.starts_with('/') {
            bail!("ingest_path must start with '/', got {:?}", self.ingest_path);
        }
        if matches!(self.ingest_path.as_str(), "/" | "/status.json" | "/health" | "/healthz") {
            bail!("ingest_path {:?} collides with a built-in route", self.ingest_path);
        }
        self.page.offset()?;
        Ok(())
    }

    /// The ingest token, required to accept submissions.
    pub fn require_token(&self) -> Result<&str> {
        match self.token.as_deref() {
            Some(t) if !t.is_empty() => Ok(t),
            _ => bail!(
                "no ingest token configured; set `token` in the config file, \
                 STATUSBOARD_TOKEN, or pass --token"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.ingest_path, "/api/status");
        assert_eq!(settings.max_body_bytes, 1024 * 1024);
        assert_eq!(settings.page.refresh_secs, 60);
        assert_eq!(settings.page.title, "Service Status");
        assert_eq!(settings.page.offset().unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
token = "abc"
snapshot_path = "/srv/status.json"

[page]
title = "Zy Status"
utc_offset = "+02:00"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.require_token().unwrap(), "abc");
        assert_eq!(settings.snapshot_path, PathBuf::from("/srv/status.json"));
        assert_eq!(settings.page.title, "Zy Status");
        assert_eq!(settings.page.refresh_secs, 60);
        assert_eq!(settings.page.offset().unwrap().local_minus_utc(), 7200);
    }

    #[test]
    fn test_invalid_offset_is_rejected() {
        let page = PageSettings {
            utc_offset: Some("Europe/Berlin".to_string()),
            ..PageSettings::default()
        };
        assert!(page.offset().is_err());
    }

    #[test]
    fn test_ingest_path_must_not_shadow_page() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"ingest_path = "/""#).unwrap();
        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_token_is_reported() {
        let page = PageSettings::default();
        let settings = Settings {
            listen_addr: "127.0.0.1:0".to_string(),
            ingest_path: "/api/status".to_string(),
            max_body_bytes: 10,
            token: Some(String::new()),
            snapshot_path: PathBuf::from("status.json"),
            page,
        };
        assert!(settings.require_token().is_err());
    }
}
