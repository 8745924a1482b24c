//! Configuration: the global config file and the directories derived from it.
//!
//! Resolution order for each directory is environment variable, then config
//! file, then the platform default:
//!
//! | Setting          | Environment           | Default                         |
//! |------------------|-----------------------|---------------------------------|
//! | cache directory  | `CLJDEPS_CACHE_DIR`   | `~/.cljdeps/cache`              |
//! | local repository | `CLJDEPS_LOCAL_REPO`  | `~/.m2/repository`              |
//! | config file      | `CLJDEPS_CONFIG`      | `~/.cljdeps/config.toml`        |

mod global;

pub use global::{GlobalConfig, ToolCommands, expand_tilde};

use crate::constants::{CONFIG_DIR_NAME, ENV_CACHE_DIR, ENV_LOCAL_REPO};
use anyhow::Result;
use std::path::PathBuf;

/// Directory holding per-project dependency caches.
pub fn get_cache_dir(config: &GlobalConfig) -> Result<PathBuf> {
    // Environment override first (essential for testing)
    if let Some(dir) = std::env::var_os(ENV_CACHE_DIR) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.cache_dir {
        return Ok(dir.clone());
    }
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME).join("cache"))
}

/// Root of the local Maven repository.
pub fn get_local_repository(config: &GlobalConfig) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_LOCAL_REPO) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.local_repository {
        return Ok(dir.clone());
    }
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
    Ok(home.join(".m2").join("repository"))
}
