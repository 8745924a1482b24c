//! Progress reporting for resolution runs.
//!
//! A thin wrapper over `indicatif` that becomes a hidden bar when progress is
//! disabled (`CLJDEPS_NO_PROGRESS`, `--no-progress`, or non-interactive use).

use crate::constants::ENV_NO_PROGRESS;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};

fn is_progress_disabled() -> bool {
    std::env::var_os(ENV_NO_PROGRESS).is_some()
}

#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// A visible bar of `len` steps, or a hidden one when progress is disabled.
    pub fn new(len: u64) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(default_style());
            bar
        };
        Self {
            inner: bar,
        }
    }

    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_length(&self, len: u64) {
        self.inner.set_length(len);
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    pub fn set_position(&self, pos: u64) {
        self.inner.set_position(pos);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn default_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}
