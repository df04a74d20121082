//! Terminal progress bar for bill retrieval.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Percent-complete bar driven by the retrieval progress callback.
///
/// Hidden when stderr is not a terminal or output is quiet.
pub struct FetchProgress {
    bar: ProgressBar,
}

impl FetchProgress {
    pub fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(100);
        if quiet || !std::io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
        }
        bar.set_message("fetching bills");
        Self { bar }
    }

    /// Move to `percent`. Values only ever grow.
    pub fn set(&self, percent: u8) {
        let percent = u64::from(percent.min(100));
        if percent > self.bar.position() {
            self.bar.set_position(percent);
        }
    }

    pub fn finish(&self, message: &'static str) {
        if !self.bar.is_finished() {
            self.bar.finish_with_message(message);
        }
    }

    /// Stop and erase the bar.
    pub fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Drop for FetchProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
