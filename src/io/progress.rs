//! Progress display for the generation and refinement phases
//!
//! A sampling run has up to two long phases: growing the diamond order by
//! order, and sweeping the heat-bath refiner. Each phase gets its own bar;
//! the manager keeps the styling in one place and is a no-op when quiet
//! output was requested.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg:>9} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display across sampling phases
pub struct ProgressManager {
    active: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active phase
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Begin a new phase, finishing any previous one
    pub fn start_phase(&mut self, label: &'static str, length: u64) {
        self.finish_phase();
        let bar = ProgressBar::new(length);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_message(label);
        self.active = Some(bar);
    }

    /// Advance the active phase by one unit
    pub fn tick(&self) {
        if let Some(bar) = &self.active {
            bar.inc(1);
        }
    }

    /// Finish and clear the active phase
    pub fn finish_phase(&mut self) {
        if let Some(bar) = self.active.take() {
            bar.finish_and_clear();
        }
    }
}
