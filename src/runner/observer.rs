//! Progress notifications from the benchmark runner
//!
//! The runner announces every transition it takes. The CLI renders these as
//! a spinner; tests record them with [`MemoryObserver`].

use std::sync::{Arc, Mutex};

use super::RunState;

/// Receives progress notifications from [`super::BenchmarkRunner`]
pub trait RunObserver {
    /// A transition towards `target` has started
    fn step_started(&self, target: RunState, message: &str);

    /// The transition completed normally
    fn step_succeeded(&self, target: RunState);

    /// The transition completed with a recoverable problem
    fn step_warned(&self, target: RunState, warning: &str);

    /// The transition failed and the run is aborting
    fn step_failed(&self, target: RunState);
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RunObserver for NoOpObserver {
    fn step_started(&self, _target: RunState, _message: &str) {}

    fn step_succeeded(&self, _target: RunState) {}

    fn step_warned(&self, _target: RunState, _warning: &str) {}

    fn step_failed(&self, _target: RunState) {}
}

/// One recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedStep {
    /// `step_started`
    Started(RunState, String),
    /// `step_succeeded`
    Succeeded(RunState),
    /// `step_warned`
    Warned(RunState, String),
    /// `step_failed`
    Failed(RunState),
}

/// In-memory observer for testing
#[derive(Debug, Clone, Default)]
pub struct MemoryObserver {
    steps: Arc<Mutex<Vec<ObservedStep>>>,
}

impl MemoryObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a panic in another
    /// thread while holding the lock.
    pub fn steps(&self) -> Vec<ObservedStep> {
        self.steps
            .lock()
            .expect("Memory observer lock poisoned")
            .clone()
    }

    /// Targets of the transitions that completed, warnings included
    pub fn completed(&self) -> Vec<RunState> {
        self.steps()
            .into_iter()
            .filter_map(|step| match step {
                ObservedStep::Succeeded(state) | ObservedStep::Warned(state, _) => Some(state),
                _ => None,
            })
            .collect()
    }

    fn push(&self, step: ObservedStep) {
        self.steps
            .lock()
            .expect("Memory observer lock poisoned")
            .push(step);
    }
}

impl RunObserver for MemoryObserver {
    fn step_started(&self, target: RunState, message: &str) {
        self.push(ObservedStep::Started(target, message.to_string()));
    }

    fn step_succeeded(&self, target: RunState) {
        self.push(ObservedStep::Succeeded(target));
    }

    fn step_warned(&self, target: RunState, warning: &str) {
        self.push(ObservedStep::Warned(target, warning.to_string()));
    }

    fn step_failed(&self, target: RunState) {
        self.push(ObservedStep::Failed(target));
    }
}
