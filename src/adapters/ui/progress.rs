//! Implements ProgressPort with indicatif. One bar per tag.

use crate::domain::{ProgressStyle, ProgressUpdate};
use crate::ports::ProgressPort;
use indicatif::{ProgressBar, ProgressStyle as BarStyle};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

const BAR_TEMPLATE: &str = "{spinner:.magenta} {msg:32!} [{bar:30.cyan/blue}] {pos}/{len}";
const SPINNER_TEMPLATE: &str = "{spinner:.magenta} {msg}";

#[derive(Default)]
pub struct IndicatifProgress {
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl IndicatifProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn bars(&self) -> MutexGuard<'_, HashMap<String, ProgressBar>> {
        self.bars.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear every bar and hold its redraws until `f` returns. Anything else
    /// writing to the terminal, prompts in particular, runs through here.
    pub fn suspend<T>(&self, f: impl FnOnce() -> T) -> T {
        let bars: Vec<ProgressBar> = self.bars().values().cloned().collect();
        suspend_all(&bars, f)
    }
}

fn suspend_all<T>(bars: &[ProgressBar], f: impl FnOnce() -> T) -> T {
    match bars.split_first() {
        Some((bar, rest)) => bar.suspend(|| suspend_all(rest, f)),
        None => f(),
    }
}

fn build_bar(message: &str, style: ProgressStyle) -> ProgressBar {
    let bar = match style {
        ProgressStyle::Horizontal => {
            let bar = ProgressBar::new(0);
            bar.set_style(
                BarStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| BarStyle::default_bar())
                    .progress_chars("=>-"),
            );
            bar
        }
        ProgressStyle::Spinner => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                BarStyle::with_template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| BarStyle::default_spinner()),
            );
            bar
        }
    };
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(message.to_string());
    bar
}

impl ProgressPort for IndicatifProgress {
    fn show(&self, tag: &str, message: &str, style: ProgressStyle, cancelable: bool) {
        let mut bars = self.bars();
        if bars.contains_key(tag) {
            return;
        }
        debug!(tag, ?style, cancelable, "showing progress");
        bars.insert(tag.to_string(), build_bar(message, style));
    }

    fn set_progress(&self, tag: &str, update: &ProgressUpdate) {
        let bars = self.bars();
        let Some(bar) = bars.get(tag) else {
            return;
        };
        bar.set_length(update.max);
        bar.set_position(update.current);
        bar.set_message(update.message.clone());
    }

    fn dismiss(&self, tag: &str) {
        if let Some(bar) = self.bars().remove(tag) {
            debug!(tag, "dismissing progress");
            bar.finish_and_clear();
        }
    }
}
