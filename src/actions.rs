//! The two user-facing sync triggers.
//!
//! "Sync selected" re-resolves the manifests among a selection of files;
//! "sync all" re-resolves the whole project. Both are disabled while a
//! resolution is running. The enablement checks are advisory: the
//! coordinator itself rejects a start while busy.

use crate::core::CljdepsError;
use crate::resolver::{ProjectContext, ResolutionHandle};
use crate::tool::Tool;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// The members of `selection` that are Leiningen or Boot manifests.
#[must_use]
pub fn recognized_manifests<P: AsRef<Path>>(selection: &[P]) -> Vec<PathBuf> {
    selection
        .iter()
        .map(|path| path.as_ref())
        .filter(|path| Tool::for_path(path).is_some())
        .map(Path::to_path_buf)
        .collect()
}

/// Enabled when the selection holds a manifest and nothing is resolving.
#[must_use]
pub fn sync_selected_enabled<P: AsRef<Path>>(ctx: &ProjectContext, selection: &[P]) -> bool {
    !ctx.is_busy() && selection.iter().any(|path| Tool::for_path(path.as_ref()).is_some())
}

#[must_use]
pub fn sync_all_enabled(ctx: &ProjectContext) -> bool {
    !ctx.is_busy()
}

/// Re-resolves the manifests in `selection`.
///
/// Fails with [`CljdepsError::NoManifestFiles`] when there are none.
pub fn sync_selected<P: AsRef<Path>>(
    ctx: &ProjectContext,
    selection: &[P],
) -> Result<ResolutionHandle> {
    let manifests = recognized_manifests(selection);
    if manifests.is_empty() {
        return Err(CljdepsError::NoManifestFiles.into());
    }
    tracing::debug!("Syncing {} selected manifest files", manifests.len());
    ctx.resolve(manifests)
}

pub fn sync_all(ctx: &ProjectContext) -> Result<ResolutionHandle> {
    ctx.resolve_all()
}
