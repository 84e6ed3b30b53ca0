//! `quire.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [store]
//! dir = ".quire/contracts"
//!
//! [render]
//! default_mode = "pdf"
//!
//! [session]
//! actor = "studio"
//!
//! [logging]
//! filter = "quire=info"
//!
//! [registry]
//! templates = "templates.json"
//! ```
//!
//! Every section is optional. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use quire_eval::RenderMode;
use serde::{Deserialize, Serialize};

/// Default config file looked up in the working directory.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "quire.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QuireConfig {
    pub store: StoreSettings,
    pub render: RenderSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
    pub registry: RegistrySettings,
}

/// `[store]` section: where contracts are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StoreSettings {
    pub dir: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            dir: PathBuf::from(".quire/contracts"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RenderSettings {
    pub default_mode: RenderMode,
}

/// `[session]` section: who is recorded on audit events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SessionSettings {
    pub actor: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            actor: "studio".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: "warn".to_string(),
        }
    }
}

/// `[registry]` section: an admin-authored template registry replacing the
/// built-in one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct RegistrySettings {
    pub templates: Option<PathBuf>,
}

/// Load the config at `path`, or at [`DEFAULT_CONFIG_PATH`] when `path` is
/// `None`.
///
/// A missing default file is not an error; a missing explicit file is.
pub(crate) fn load_config(path: Option<&Path>) -> Result<QuireConfig, String> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    if !explicit && !path.exists() {
        return Ok(QuireConfig::default());
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    parse_config(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

pub(crate) fn parse_config(content: &str) -> Result<QuireConfig, toml::de::Error> {
    toml::from_str(content)
}
