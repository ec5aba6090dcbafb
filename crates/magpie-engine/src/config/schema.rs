use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Suite-wide configuration, loaded once and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base URL of the application under test.
    pub base_url: String,
    /// Path of the employees list page, relative to `base_url`.
    pub employees_path: String,
    pub timeouts: TimeoutConfig,
    pub duplicate_markers: DuplicateMarkers,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            employees_path: "/allemployees".to_string(),
            timeouts: TimeoutConfig::default(),
            duplicate_markers: DuplicateMarkers::default(),
        }
    }
}

/// Every wait the resolver issues carries one of these bounds; exceeding a
/// bound yields a definitive "strategy failed" instead of a hang.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Cap for a single strategy attempt.
    pub attempt_ms: u64,
    /// Overall budget for one logical action's whole chain.
    pub budget_ms: u64,
    /// Visibility wait before interacting with a control.
    pub visibility_ms: u64,
    /// Probe window for a delete-confirmation control.
    pub confirm_ms: u64,
    /// Existence probe window for duplicate markers after submission.
    pub duplicate_probe_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            attempt_ms: 2_000,
            budget_ms: 30_000,
            visibility_ms: 10_000,
            confirm_ms: 2_000,
            duplicate_probe_ms: 2_000,
        }
    }
}

impl TimeoutConfig {
    pub fn attempt(&self) -> Duration {
        Duration::from_millis(self.attempt_ms)
    }

    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }

    pub fn visibility(&self) -> Duration {
        Duration::from_millis(self.visibility_ms)
    }

    pub fn confirm(&self) -> Duration {
        Duration::from_millis(self.confirm_ms)
    }

    pub fn duplicate_probe(&self) -> Duration {
        Duration::from_millis(self.duplicate_probe_ms)
    }
}

/// Markers probed after a creation submission to classify "already exists".
///
/// The heuristic is markup-dependent, so both lists stay configurable per
/// environment instead of being baked into the flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateMarkers {
    /// CSS selectors of error/toast containers.
    pub selectors: Vec<String>,
    /// Text fragments that indicate a duplicate.
    pub text: Vec<String>,
}

impl Default for DuplicateMarkers {
    fn default() -> Self {
        Self {
            selectors: vec!["[class*=\"error\"]".to_string(), ".toast-error".to_string()],
            text: vec!["already exists".to_string()],
        }
    }
}
