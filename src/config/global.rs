//! Global configuration management.
//!
//! The optional file `~/.cljdeps/config.toml` customizes where artifacts and
//! caches live and which commands list dependencies:
//!
//! ```toml
//! local_repository = "~/.m2/repository"
//! cache_dir = "~/.cache/cljdeps"
//! skip_dirs = ["target", "checkouts"]
//!
//! [tools]
//! lein = "lein with-profile +test deps :tree"
//! boot = "boot --no-colors show --deps"
//! ```
//!
//! Every field is optional. Paths may start with `~`.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, ENV_CONFIG};
use crate::core::CljdepsError;
use crate::tool::Tool;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Dependency command overrides per build tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommands {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lein: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot: Option<String>,
}

impl ToolCommands {
    #[must_use]
    pub fn get(&self, tool: Tool) -> Option<&str> {
        match tool {
            Tool::Lein => self.lein.as_deref(),
            Tool::Boot => self.boot.as_deref(),
        }
    }
}

/// Contents of the global configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Root of the local Maven repository holding resolved jars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,

    /// Directory holding per-project dependency caches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Directory names skipped while discovering manifest files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_dirs: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "is_default_tools")]
    pub tools: ToolCommands,
}

fn is_default_tools(tools: &ToolCommands) -> bool {
    *tools == ToolCommands::default()
}

impl GlobalConfig {
    /// Loads from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the default configuration.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content).map_err(|e| CljdepsError::ConfigError {
            message: format!("{}: {}", path.display(), e.message()),
        })?;
        config.expand_paths();
        Ok(config)
    }

    /// `$CLJDEPS_CONFIG`, else `~/.cljdeps/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_CONFIG) {
            return Ok(PathBuf::from(path));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn expand_paths(&mut self) {
        for path in [&mut self.local_repository, &mut self.cache_dir].into_iter().flatten() {
            *path = expand_tilde(path);
        }
    }
}

/// Expands a leading `~` using the home directory.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}
