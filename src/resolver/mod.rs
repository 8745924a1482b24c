//! Background dependency resolution for one project.
//!
//! A [`ProjectContext`] owns everything needed to keep a project's classpath
//! current: the shared [`DependencyMap`], the on-disk [`DependencyCache`], the
//! [`Invoker`] that runs build tools and the [`ArtifactLocator`] that turns
//! coordinate lines into opened jars.
//!
//! # Runs
//!
//! [`initialize`], [`resolve_all`] and [`resolve`] each schedule at most one
//! background run and return immediately with a [`ResolutionHandle`]. A run:
//!
//! 1. waits once for the host to become ready,
//! 2. runs the build tool for every manifest, sequentially and in sorted order,
//!    replacing that manifest's entry as soon as its output is collected,
//! 3. writes the whole mapping to the cache file,
//! 4. schedules a "library roots changed" notification on the roots queue.
//!
//! The project's busy flag is set by the entry point and cleared only after the
//! notification of step 4 has executed. While it is set every entry point
//! fails with [`CljdepsError::ResolutionInProgress`], so runs never overlap.
//!
//! Reading is never blocked: [`library_roots`] works from a snapshot of the
//! mapping and may be called from any thread at any time.
//!
//! [`initialize`]: ProjectContext::initialize
//! [`resolve_all`]: ProjectContext::resolve_all
//! [`resolve`]: ProjectContext::resolve
//! [`library_roots`]: ProjectContext::library_roots

mod mapping;
mod roots;
mod run;

pub use mapping::DependencyMap;
pub use roots::RootsChangeQueue;
pub use run::{BusyFlag, ResolutionHandle, RunKind, RunProgress, RunReport};

use crate::cache::{DependencyCache, cache_file_for_project};
use crate::config::{self, GlobalConfig};
use crate::core::CljdepsError;
use crate::host::ProjectHost;
use crate::invoker::Invoker;
use crate::locator::{ArchiveOpener, ArchiveRoot, ArtifactLocator};
use crate::tool::Tool;
use crate::utils::ProgressBar;
use anyhow::Result;
use run::BusyGuard;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

/// Result of [`ProjectContext::initialize`].
#[derive(Debug)]
pub enum InitOutcome {
    /// The mapping was loaded from the cache file.
    Restored {
        entries: usize,
        handle: ResolutionHandle,
    },
    /// No usable cache; a full resolution was scheduled.
    Resolving(ResolutionHandle),
}

impl InitOutcome {
    #[must_use]
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }

    #[must_use]
    pub fn into_handle(self) -> ResolutionHandle {
        match self {
            Self::Restored {
                handle,
                ..
            }
            | Self::Resolving(handle) => handle,
        }
    }
}

enum RunPlan {
    All,
    Files(Vec<PathBuf>),
}

/// Builder for [`ProjectContext`].
///
/// Unset directories and commands fall back to the [`GlobalConfig`] (itself
/// defaulting to environment variables and platform paths).
pub struct ProjectContextBuilder {
    project_dir: PathBuf,
    host: Arc<dyn ProjectHost>,
    config: GlobalConfig,
    cache_file: Option<PathBuf>,
    local_repository: Option<PathBuf>,
    invoker: Option<Invoker>,
    opener: Option<Arc<dyn ArchiveOpener>>,
    show_progress: bool,
}

impl ProjectContextBuilder {
    #[must_use]
    pub fn config(mut self, config: GlobalConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `path` as the cache file instead of the per-project default.
    #[must_use]
    pub fn cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn local_repository(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_repository = Some(path.into());
        self
    }

    #[must_use]
    pub fn invoker(mut self, invoker: Invoker) -> Self {
        self.invoker = Some(invoker);
        self
    }

    #[must_use]
    pub fn archive_opener(mut self, opener: Arc<dyn ArchiveOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    /// Draws a terminal progress bar during runs. Off by default.
    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Builds the context and starts its roots-change queue.
    ///
    /// Must be called inside a Tokio runtime; background runs are spawned on it.
    pub fn build(self) -> Result<ProjectContext> {
        let runtime = Handle::try_current()
            .map_err(|_| anyhow::anyhow!("ProjectContext must be built inside a Tokio runtime"))?;

        let project_dir = std::path::absolute(&self.project_dir).unwrap_or(self.project_dir);

        let cache_path = match self.cache_file {
            Some(path) => path,
            None => cache_file_for_project(&config::get_cache_dir(&self.config)?, &project_dir),
        };
        let repo_root = match self.local_repository {
            Some(path) => path,
            None => config::get_local_repository(&self.config)?,
        };

        let invoker = self.invoker.unwrap_or_else(|| {
            Tool::ALL.into_iter().fold(Invoker::new(), |invoker, tool| {
                match self.config.tools.get(tool) {
                    Some(command) => invoker.with_command(tool, command),
                    None => invoker,
                }
            })
        });
        let locator = match self.opener {
            Some(opener) => ArtifactLocator::with_opener(repo_root, opener),
            None => ArtifactLocator::new(repo_root),
        };

        debug!(
            "Project {} uses cache {} and repository {}",
            project_dir.display(),
            cache_path.display(),
            locator.repo_root().display()
        );

        let (progress, _) = watch::channel(None);
        Ok(ProjectContext {
            inner: Arc::new(Inner {
                project_dir,
                host: self.host,
                mapping: DependencyMap::new(),
                cache: DependencyCache::new(cache_path, Tool::manifest_suffixes()),
                invoker,
                locator,
                busy: BusyFlag::default(),
                roots_queue: RootsChangeQueue::start(&runtime),
                runtime,
                progress,
                show_progress: self.show_progress,
            }),
        })
    }
}

/// Per-project resolution state and entry points.
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct ProjectContext {
    inner: Arc<Inner>,
}

struct Inner {
    project_dir: PathBuf,
    host: Arc<dyn ProjectHost>,
    mapping: DependencyMap,
    cache: DependencyCache,
    invoker: Invoker,
    locator: ArtifactLocator,
    busy: BusyFlag,
    roots_queue: RootsChangeQueue,
    runtime: Handle,
    progress: watch::Sender<Option<RunProgress>>,
    show_progress: bool,
}

impl std::fmt::Debug for ProjectContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectContext")
            .field("project_dir", &self.inner.project_dir)
            .field("cache", &self.inner.cache.path())
            .field("busy", &self.inner.busy.is_set())
            .finish_non_exhaustive()
    }
}

impl ProjectContext {
    pub fn builder(
        project_dir: impl Into<PathBuf>,
        host: Arc<dyn ProjectHost>,
    ) -> ProjectContextBuilder {
        ProjectContextBuilder {
            project_dir: project_dir.into(),
            host,
            config: GlobalConfig::default(),
            cache_file: None,
            local_repository: None,
            invoker: None,
            opener: None,
            show_progress: false,
        }
    }

    /// Restores the mapping from the cache file, or schedules a full
    /// resolution when there is none.
    ///
    /// A restore runs no build tool; it only schedules the roots notification.
    pub fn initialize(&self) -> Result<InitOutcome> {
        let guard = self.acquire()?;

        match self.inner.cache.read() {
            Ok(Some(restored)) => {
                let entries = restored.len();
                let coordinates = restored.values().map(Vec::len).sum();
                self.inner.mapping.replace_all(restored);
                info!(
                    "Restored {} manifest entries for {} from {}",
                    entries,
                    self.inner.project_dir.display(),
                    self.inner.cache.path().display()
                );

                let inner = Arc::clone(&self.inner);
                let task = self.inner.runtime.spawn(async move {
                    inner.schedule_reindex(guard).await;
                    RunReport {
                        files_total: entries,
                        files_resolved: entries,
                        coordinates,
                        ..RunReport::new(RunKind::Restored)
                    }
                });
                Ok(InitOutcome::Restored {
                    entries,
                    handle: ResolutionHandle::new(task),
                })
            }
            Ok(None) => {
                debug!("No dependency cache at {}", self.inner.cache.path().display());
                Ok(InitOutcome::Resolving(self.spawn_run(RunPlan::All, guard)))
            }
            Err(e) => {
                warn!("Ignoring unreadable dependency cache: {:#}", e);
                Ok(InitOutcome::Resolving(self.spawn_run(RunPlan::All, guard)))
            }
        }
    }

    /// Clears the mapping and re-resolves every manifest the host reports.
    pub fn resolve_all(&self) -> Result<ResolutionHandle> {
        let guard = self.acquire()?;
        Ok(self.spawn_run(RunPlan::All, guard))
    }

    /// Re-resolves only `files`, keeping every other entry.
    ///
    /// Paths that are not a recognized manifest are skipped.
    pub fn resolve<I, P>(&self, files: I) -> Result<ResolutionHandle>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let guard = self.acquire()?;
        let files = files
            .into_iter()
            .map(|file| {
                let file = file.as_ref();
                std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf())
            })
            .collect();
        Ok(self.spawn_run(RunPlan::Files(files), guard))
    }

    /// Opened jars for every coordinate line in the mapping.
    ///
    /// Keys are visited in sorted order and lines in stored order; a jar
    /// appears once, at its first occurrence. Lines that do not parse or whose
    /// jar is missing are left out.
    #[must_use]
    pub fn library_roots(&self) -> Vec<ArchiveRoot> {
        let mut seen = HashSet::new();
        let mut roots = Vec::new();
        for lines in self.inner.mapping.snapshot().into_values() {
            for line in &lines {
                if let Some(root) = self.inner.locator.locate_expression(line)
                    && seen.insert(root.path().to_path_buf())
                {
                    roots.push(root);
                }
            }
        }
        roots
    }

    /// Stored coordinate lines for one manifest.
    #[must_use]
    pub fn dependencies_of(&self, manifest: &Path) -> Option<Vec<String>> {
        self.inner.mapping.get(&manifest.to_string_lossy())
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.busy.is_set()
    }

    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        self.inner.busy.clone()
    }

    /// Receives the current file of a running resolution, `None` when idle.
    #[must_use]
    pub fn subscribe_progress(&self) -> watch::Receiver<Option<RunProgress>> {
        self.inner.progress.subscribe()
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.inner.project_dir
    }

    #[must_use]
    pub fn mapping(&self) -> &DependencyMap {
        &self.inner.mapping
    }

    #[must_use]
    pub fn cache(&self) -> &DependencyCache {
        &self.inner.cache
    }

    #[must_use]
    pub fn locator(&self) -> &ArtifactLocator {
        &self.inner.locator
    }

    fn acquire(&self) -> Result<BusyGuard> {
        self.inner.busy.try_acquire().ok_or_else(|| {
            debug!("Resolution already running for {}", self.inner.project_dir.display());
            CljdepsError::ResolutionInProgress.into()
        })
    }

    fn spawn_run(&self, plan: RunPlan, guard: BusyGuard) -> ResolutionHandle {
        let inner = Arc::clone(&self.inner);
        ResolutionHandle::new(self.inner.runtime.spawn(inner.run(plan, guard)))
    }
}

impl Inner {
    async fn run(self: Arc<Self>, plan: RunPlan, guard: BusyGuard) -> RunReport {
        let start = std::time::Instant::now();
        let (kind, files) = match plan {
            RunPlan::All => {
                self.mapping.clear();
                (RunKind::Full, self.discover_manifests().await)
            }
            RunPlan::Files(files) => (RunKind::Partial, files),
        };

        let mut report = RunReport::new(kind);
        self.resolve_files(files, &mut report).await;
        report.cache_written = self.persist().await;
        self.schedule_reindex(guard).await;

        info!(
            target: "resolver::perf",
            "Resolved {}/{} manifest files ({} coordinates) in {:.2?}",
            report.files_resolved,
            report.files_total,
            report.coordinates,
            start.elapsed()
        );
        report
    }

    async fn discover_manifests(&self) -> Vec<PathBuf> {
        let host = Arc::clone(&self.host);
        let discovered = tokio::task::spawn_blocking(move || {
            Tool::ALL.into_iter().flat_map(|tool| host.list_manifest_files(tool)).collect::<Vec<_>>()
        })
        .await;

        match discovered {
            Ok(files) => files,
            Err(e) => {
                warn!("Manifest discovery failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn resolve_files(&self, files: Vec<PathBuf>, report: &mut RunReport) {
        let files: BTreeSet<PathBuf> = files.into_iter().collect();
        report.files_total = files.len();

        let host = Arc::clone(&self.host);
        if let Err(e) = tokio::task::spawn_blocking(move || host.wait_until_ready()).await {
            warn!("Waiting for the project host failed: {}", e);
        }

        let bar = if self.show_progress {
            ProgressBar::new(files.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_prefix("Resolving");

        let total = files.len();
        for (index, file) in files.iter().enumerate() {
            let label = file.to_string_lossy().into_owned();
            self.progress.send_replace(Some(RunProgress {
                fraction: index as f64 / total as f64,
                label: label.clone(),
            }));
            bar.set_position(index as u64);
            bar.set_message(label.clone());

            let Some(tool) = Tool::for_path(file) else {
                debug!("Skipping {}: not a recognized manifest", label);
                report.files_skipped += 1;
                continue;
            };

            let work_dir = file.parent().unwrap_or_else(|| Path::new("."));
            let lines = self.invoker.list_dependencies(tool, work_dir).await;
            debug!(target: "resolver", "{} reported {} coordinate lines", label, lines.len());

            report.coordinates += lines.len();
            report.files_resolved += 1;
            self.mapping.insert(label, lines);
        }

        bar.finish_and_clear();
        self.progress.send_replace(None);
    }

    /// Writes the mapping to the cache file. Failures are logged, not raised.
    async fn persist(&self) -> bool {
        let snapshot = self.mapping.snapshot();
        let cache = self.cache.clone();
        match tokio::task::spawn_blocking(move || cache.write(&snapshot)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!("Failed to persist dependency cache: {:#}", e);
                false
            }
            Err(e) => {
                warn!("Dependency cache writer failed: {}", e);
                false
            }
        }
    }

    /// Queues the roots notification and waits for it to execute.
    ///
    /// The busy flag clears inside the job, after the host was notified.
    async fn schedule_reindex(&self, guard: BusyGuard) {
        let (done_tx, done_rx) = oneshot::channel();
        let host = Arc::clone(&self.host);
        let scheduled = self.roots_queue.schedule(move || {
            host.notify_library_roots_changed();
            drop(guard);
            let _ = done_tx.send(());
        });
        if !scheduled {
            warn!("Roots change queue is closed; library roots were not refreshed");
        }
        let _ = done_rx.await;
    }
}
