//! Layered configuration.
//!
//! Lowest to highest priority:
//!
//! 1. built-in defaults,
//! 2. a TOML, YAML or JSON file (picked by extension; TOML otherwise),
//! 3. environment variables prefixed with `LONGBOX_`, nested with `__`
//!    (e.g. `LONGBOX_FETCH__MAX_ATTEMPTS=5`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use longbox_fetch::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "LONGBOX_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: ClientConfig,
}
impl Config {
    /// Loads and validates the configuration.
    ///
    /// An explicit `path` must exist. Without one, the platform default
    /// ([`default_path`](Self::default_path)) is used if it exists.
    #[tracing::instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path)?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// The merged provider stack, before extraction.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        let file = match path {
            Some(path) if !path.is_file() => {
                tracing::warn!(path = %path.display(), "configuration file not found");
                exn::bail!(ErrorKind::Load);
            },
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        match file {
            Some(file) => {
                tracing::debug!(path = %file.display(), "merging configuration file");
                figment = match file.extension().and_then(|ext| ext.to_str()) {
                    Some("yaml" | "yml") => figment.merge(Yaml::file(file)),
                    Some("json") => figment.merge(Json::file(file)),
                    _ => figment.merge(Toml::file(file)),
                };
            },
            None => tracing::trace!("no configuration file; using defaults and environment"),
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// `<platform config dir>/longbox/config.toml`, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "longbox").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        let fetch = &self.fetch;
        if fetch.max_attempts == 0 {
            exn::bail!(ErrorKind::Invalid("fetch.max_attempts"));
        }
        if fetch.request_timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("fetch.request_timeout_secs"));
        }
        let base_url = url::Url::parse(&fetch.base_url).or_raise(|| ErrorKind::Invalid("fetch.base_url"))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            exn::bail!(ErrorKind::Invalid("fetch.base_url"));
        }
        Ok(())
    }
}
