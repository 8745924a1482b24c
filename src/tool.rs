//! Supported Clojure build tools.
//!
//! A [`Tool`] is chosen purely by the manifest file name: `project.clj` means
//! Leiningen, `build.boot` means Boot. Each tool knows the command that prints
//! its resolved dependency tree.

use crate::constants::{BOOT_DEPS_COMMAND, BOOT_MANIFEST, LEIN_DEPS_COMMAND, LEIN_MANIFEST};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A build tool whose dependency tree cljdeps knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Lein,
    Boot,
}

impl Tool {
    /// Every supported tool, in discovery order.
    pub const ALL: [Tool; 2] = [Tool::Lein, Tool::Boot];

    /// The manifest file name this tool reads.
    #[must_use]
    pub const fn manifest_file_name(self) -> &'static str {
        match self {
            Tool::Lein => LEIN_MANIFEST,
            Tool::Boot => BOOT_MANIFEST,
        }
    }

    /// The built-in command that lists dependencies.
    #[must_use]
    pub const fn default_command(self) -> &'static str {
        match self {
            Tool::Lein => LEIN_DEPS_COMMAND,
            Tool::Boot => BOOT_DEPS_COMMAND,
        }
    }

    /// Selects the tool owning `path` by its file name.
    ///
    /// Returns `None` for anything that is not a recognized manifest.
    #[must_use]
    pub fn for_path(path: &Path) -> Option<Tool> {
        let name = path.file_name()?.to_str()?;
        Tool::ALL.into_iter().find(|tool| tool.manifest_file_name() == name)
    }

    /// File extensions (with the dot) of every manifest file name.
    ///
    /// The dependency cache uses these to tell key lines from coordinate lines.
    #[must_use]
    pub fn manifest_suffixes() -> Vec<String> {
        let mut suffixes: Vec<String> = Tool::ALL
            .iter()
            .filter_map(|tool| {
                Path::new(tool.manifest_file_name())
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{ext}"))
            })
            .collect();
        suffixes.dedup();
        suffixes
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Lein => write!(f, "lein"),
            Tool::Boot => write!(f, "boot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_for_path_matches_file_name() {
        assert_eq!(Tool::for_path(Path::new("/work/app/project.clj")), Some(Tool::Lein));
        assert_eq!(Tool::for_path(Path::new("/work/app/build.boot")), Some(Tool::Boot));
        assert_eq!(Tool::for_path(Path::new("/work/app/deps.edn")), None);
        assert_eq!(Tool::for_path(Path::new("/work/app/my-project.clj")), None);
        assert_eq!(Tool::for_path(&PathBuf::from("/")), None);
    }

    #[test]
    fn test_manifest_suffixes() {
        assert_eq!(Tool::manifest_suffixes(), vec![".clj".to_string(), ".boot".to_string()]);
    }

    #[test]
    fn test_display_and_commands() {
        assert_eq!(Tool::Lein.to_string(), "lein");
        assert!(Tool::Lein.default_command().starts_with("lein "));
        assert!(Tool::Boot.default_command().starts_with("boot "));
    }
}
