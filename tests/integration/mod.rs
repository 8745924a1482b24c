//! Integration test suite for cljdeps
//!
//! End-to-end tests that run the `cljdeps` binary against temporary projects.
//! Build tools are replaced by shell scripts with canned `deps :tree` output,
//! so the suites that need them only run on unix.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **cli**: argument handling, configuration and error rendering
//! - **sync**: full and partial resolution through `cljdeps sync`
//! - **init**: cold start versus restore from the cache
//! - **roots**: mapping coordinates to jars in the local repository
//! - **cache_cmd**: `cljdeps cache show | path | clear`

#[path = "../common/mod.rs"]
mod common;

mod cache_cmd;
mod cli;
#[cfg(unix)]
mod init;
#[cfg(unix)]
mod roots;
#[cfg(unix)]
mod sync;

/// Output of a Leiningen project with two direct dependencies.
pub const LEIN_TREE: &str = "Retrieving org/clojure/clojure/1.9.0/clojure-1.9.0.pom from central\n \
                             [org.clojure/clojure \"1.9.0\"]\n   \
                             [org.clojure/spec.alpha \"0.1.143\"]\n \
                             [ring \"1.7.0\"]\n";
