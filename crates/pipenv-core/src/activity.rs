//! Activity reporting
//!
//! Activities are short human-readable lines such as
//! `pipenv <disabled '...'>`. They are deterministic for a given input
//! state but are not a machine contract.

use std::sync::Mutex;

/// Receives activity lines from the orchestrator.
pub trait ActivityReporter {
    fn report(&self, label: &str, detail: &str);
}

/// Emits activities as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ActivityReporter for TracingReporter {
    fn report(&self, label: &str, detail: &str) {
        tracing::info!(activity = label, "{}", detail);
    }
}

/// Collects activities in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    activities: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(label, detail)` pairs in reporting order
    pub fn activities(&self) -> Vec<(String, String)> {
        match self.activities.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ActivityReporter for RecordingReporter {
    fn report(&self, label: &str, detail: &str) {
        let mut guard = match self.activities.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((label.to_string(), detail.to_string()));
    }
}
