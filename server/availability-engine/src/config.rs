//! Engine configuration with permissive defaults.

use crate::error::EngineError;

/// Tunable thresholds for availability detection.
///
/// The all-zero default accepts every failure run and leaves overload
/// detection off.
#[derive(Debug, Clone, Default)]
pub struct Config {
  /// Minimum consecutive no-response samples for an outage window (0 = any run).
  pub min_failure_run: u32,
  /// Trailing-average response threshold; averages strictly above it count as overload.
  pub overload_threshold: f64,
  /// Trailing window size in valid samples (0 disables overload detection).
  pub overload_window: usize,
}

impl Config {
  /// Reject caller contract violations before any detector runs.
  pub fn validate(&self) -> Result<(), EngineError> {
    if !self.overload_threshold.is_finite() || self.overload_threshold < 0.0 {
      return Err(EngineError::validation(
        "overload_threshold",
        "must be finite and non-negative",
      ));
    }
    Ok(())
  }
}
