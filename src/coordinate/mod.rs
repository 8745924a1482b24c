//! Dependency coordinate parsing.
//!
//! Build tools print each resolved dependency as a Clojure vector such as
//! `[org.clojure/clojure "1.9.0"]`, optionally followed by keyword options
//! (`:scope "test"`, `:exclusions [...]`). This module turns such a line into a
//! [`Coordinate`]: the Maven group as a path (`org/clojure`), the artifact id
//! and the version.
//!
//! Parsing is deliberately forgiving. A line without any symbol yields `None`
//! and is skipped by callers; a missing version yields an empty string rather
//! than an error.
//!
//! # Examples
//!
//! ```rust
//! use cljdeps_cli::coordinate::parse_coordinate;
//!
//! let coord = parse_coordinate(r#"  [org.clojure/clojure "1.9.0"]"#).unwrap();
//! assert_eq!(coord.group_path, "org/clojure");
//! assert_eq!(coord.artifact_id, "clojure");
//! assert_eq!(coord.version, "1.9.0");
//!
//! // A spec without a group uses the artifact id as its group
//! let ring = parse_coordinate(r#"[ring "1.7.0"]"#).unwrap();
//! assert_eq!(ring.group_path, "ring");
//! ```

pub mod lexer;

use lexer::{Lexer, TokenKind};
use std::fmt;
use std::path::PathBuf;

/// A parsed group/artifact/version triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Group id with `.` replaced by `/`, e.g. `org/clojure`.
    pub group_path: String,
    pub artifact_id: String,
    /// Version string, empty when the expression carried none.
    pub version: String,
}

impl Coordinate {
    /// Builds a coordinate from an artifact spec (`group/artifact` or `artifact`).
    ///
    /// Returns `None` when either side of the `/` is empty.
    #[must_use]
    pub fn from_spec(spec: &str, version: impl Into<String>) -> Option<Self> {
        let (group, artifact) = match spec.split_once('/') {
            Some((group, artifact)) => (group, artifact),
            None => (spec, spec),
        };
        if group.is_empty() || artifact.is_empty() {
            return None;
        }

        Some(Self {
            group_path: group.replace('.', "/"),
            artifact_id: artifact.to_string(),
            version: version.into(),
        })
    }

    /// Directory of this version inside a Maven repository, relative to its root.
    #[must_use]
    pub fn repository_dir(&self) -> PathBuf {
        let mut dir: PathBuf = self.group_path.split('/').collect();
        dir.push(&self.artifact_id);
        dir.push(&self.version);
        dir
    }

    /// File name of the main jar, `<artifact>-<version>.jar`.
    #[must_use]
    pub fn jar_file_name(&self) -> String {
        format!("{}-{}.jar", self.artifact_id, self.version)
    }

    /// Dotted Maven group id.
    #[must_use]
    pub fn group_id(&self) -> String {
        self.group_path.replace('/', ".")
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id(), self.artifact_id, self.version)
    }
}

/// Parses one coordinate expression.
///
/// The first symbol is the artifact spec; symbol-class tokens directly after it
/// are merged into it until a string, whitespace or comment. The first string
/// literal after the artifact spec is the version.
#[must_use]
pub fn parse_coordinate(text: &str) -> Option<Coordinate> {
    let tokens = Lexer::new(text).tokenize();
    let mut iter = tokens.iter().peekable();

    let first = iter.find(|tok| tok.kind == TokenKind::Symbol)?;
    let mut spec = first.text.to_string();
    while let Some(tok) = iter.next_if(|tok| matches!(tok.kind, TokenKind::Symbol | TokenKind::Number)) {
        spec.push_str(tok.text);
    }

    let version =
        iter.find(|tok| tok.kind == TokenKind::String).map(|tok| tok.unquoted()).unwrap_or_default();

    Coordinate::from_spec(&spec, version)
}
