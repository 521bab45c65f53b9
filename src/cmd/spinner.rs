//! Spinner rendering of runner progress

use std::cell::RefCell;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::fmt::{CHECKMARK, CROSSMARK, WARNING};
use crate::runner::{RunObserver, RunState};

/// Shows one spinner per transition and leaves a status line behind when it ends
#[derive(Default)]
pub struct SpinnerObserver {
    active: RefCell<Option<(ProgressBar, String)>>,
}

impl SpinnerObserver {
    /// Create an idle observer
    pub fn new() -> Self {
        Self::default()
    }

    fn finish(&self, line: String) {
        if let Some((bar, _)) = self.active.borrow_mut().take() {
            bar.finish_and_clear();
        }
        println!("{}", line);
    }

    fn message(&self) -> String {
        self.active
            .borrow()
            .as_ref()
            .map(|(_, message)| message.clone())
            .unwrap_or_default()
    }
}

impl RunObserver for SpinnerObserver {
    fn step_started(&self, _target: RunState, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        if let Some((previous, _)) = self.active.replace(Some((bar, message.to_string()))) {
            previous.finish_and_clear();
        }
    }

    fn step_succeeded(&self, _target: RunState) {
        let message = self.message();
        self.finish(format!("{} {}", CHECKMARK, message));
    }

    fn step_warned(&self, _target: RunState, warning: &str) {
        self.finish(format!("{} {}", WARNING, style(warning).yellow()));
    }

    fn step_failed(&self, _target: RunState) {
        let message = self.message();
        self.finish(format!("{} {}", CROSSMARK, style(message).red()));
    }
}

impl Drop for SpinnerObserver {
    fn drop(&mut self) {
        if let Some((bar, _)) = self.active.get_mut().take() {
            bar.finish_and_clear();
        }
    }
}
