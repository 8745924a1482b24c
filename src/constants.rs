//! Global constants used throughout the cljdeps codebase.
//!
//! File names, environment variable names and command templates that are
//! shared by several modules live here so they are defined exactly once.

/// Manifest file name recognized for Leiningen projects.
pub const LEIN_MANIFEST: &str = "project.clj";

/// Manifest file name recognized for Boot projects.
pub const BOOT_MANIFEST: &str = "build.boot";

/// Command used to print the Leiningen dependency tree.
pub const LEIN_DEPS_COMMAND: &str = "lein deps :tree";

/// Command used to print the Boot dependency tree.
pub const BOOT_DEPS_COMMAND: &str = "boot --no-colors show --deps";

/// Name of the per-user configuration directory under the home directory.
pub const CONFIG_DIR_NAME: &str = ".cljdeps";

/// Name of the global configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Sub-directory of the cache directory holding one dependency file per project.
pub const PROJECTS_CACHE_DIR: &str = "projects";

/// Extension of persisted per-project dependency caches.
pub const CACHE_FILE_EXTENSION: &str = "deps";

/// Number of hex characters of the project path digest used in cache file names.
pub const PROJECT_ID_LEN: usize = 16;

/// Overrides the global configuration file location.
pub const ENV_CONFIG: &str = "CLJDEPS_CONFIG";

/// Overrides the cache directory.
pub const ENV_CACHE_DIR: &str = "CLJDEPS_CACHE_DIR";

/// Overrides the local Maven repository root.
pub const ENV_LOCAL_REPO: &str = "CLJDEPS_LOCAL_REPO";

/// Disables progress bars when set.
pub const ENV_NO_PROGRESS: &str = "CLJDEPS_NO_PROGRESS";

/// Directories never descended into while discovering manifest files.
pub const DEFAULT_SKIP_DIRS: &[&str] = &["target", "node_modules", "out"];
