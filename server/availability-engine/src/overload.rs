//! Overload detection: trailing moving-average response time above a threshold.

use chrono::NaiveDateTime;

use crate::types::{Event, EventKind, Sample};

enum ScanState {
  Normal,
  Overloaded { start: NaiveDateTime },
}

/// Mean of the most recent `window` valid samples at or before `at`.
///
/// No-response samples are skipped without consuming a window slot; the scan
/// stops at the start of the series. When no valid sample is in reach the
/// average is 0.
pub fn trailing_average(samples: &[Sample], at: usize, window: usize) -> f64 {
  let mut sum = 0.0;
  let mut count = 0usize;
  for sample in samples[..=at].iter().rev() {
    if let Some(response) = sample.response {
      sum += f64::from(response);
      count += 1;
      if count == window {
        break;
      }
    }
  }
  if count == 0 {
    0.0
  } else {
    sum / count as f64
  }
}

/// Scan one server's series for overload windows.
///
/// The trailing average is recomputed at every sample; a window opens when it
/// first exceeds `threshold` (strict `>`) and closes at the first sample where
/// it no longer does. `window == 0` disables the detector entirely. A window
/// still open at the end of the series emits nothing.
pub fn detect_overloads(samples: &[Sample], threshold: f64, window: usize) -> Vec<Event> {
  if window == 0 {
    return Vec::new();
  }

  let mut events = Vec::new();
  let mut state = ScanState::Normal;

  for (index, sample) in samples.iter().enumerate() {
    let average = trailing_average(samples, index, window);
    let over = average > threshold;

    state = match state {
      ScanState::Normal if over => ScanState::Overloaded {
        start: sample.timestamp,
      },
      ScanState::Normal => ScanState::Normal,
      ScanState::Overloaded { start } if over => ScanState::Overloaded { start },
      ScanState::Overloaded { start } => {
        events.push(Event {
          kind: EventKind::Overload,
          start,
          end: sample.timestamp,
          member: None,
        });
        ScanState::Normal
      }
    };
  }

  events
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  fn ts(min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 10, 19)
      .unwrap()
      .and_hms_opt(14, min, 0)
      .unwrap()
  }

  fn up(min: u32, response: u32) -> Sample {
    Sample {
      timestamp: ts(min),
      response: Some(response),
    }
  }

  fn down(min: u32) -> Sample {
    Sample {
      timestamp: ts(min),
      response: None,
    }
  }

  #[test]
  fn zero_window_is_a_no_op() {
    let samples = vec![up(0, 1000), up(1, 1000)];
    assert!(detect_overloads(&samples, 0.0, 0).is_empty());
  }

  #[test]
  fn trailing_average_uses_most_recent_valid_samples() {
    let samples = vec![up(0, 40), up(1, 60), up(2, 70), up(3, 30)];
    assert_eq!(trailing_average(&samples, 0, 2), 40.0);
    assert_eq!(trailing_average(&samples, 1, 2), 50.0);
    assert_eq!(trailing_average(&samples, 2, 2), 65.0);
    assert_eq!(trailing_average(&samples, 3, 2), 50.0);
  }

  #[test]
  fn trailing_average_skips_absent_samples() {
    let samples = vec![up(0, 100), down(1), down(2), up(3, 50)];
    // The two no-response samples do not consume window slots.
    assert_eq!(trailing_average(&samples, 2, 2), 100.0);
    assert_eq!(trailing_average(&samples, 3, 2), 75.0);
  }

  #[test]
  fn trailing_average_is_zero_with_no_valid_samples() {
    let samples = vec![down(0), down(1)];
    assert_eq!(trailing_average(&samples, 1, 3), 0.0);
  }

  #[test]
  fn strict_threshold_single_window() {
    // Averages over a 2-sample window: 40, 50, 65, 50. Only 65 > 50.
    let samples = vec![up(0, 40), up(1, 60), up(2, 70), up(3, 30)];
    let events = detect_overloads(&samples, 50.0, 2);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Overload);
    assert_eq!(events[0].start, ts(2));
    assert_eq!(events[0].end, ts(3));
  }

  #[test]
  fn trailing_open_window_not_emitted() {
    let samples = vec![up(0, 10), up(1, 1000), up(2, 1000)];
    assert!(detect_overloads(&samples, 50.0, 2).is_empty());
  }

  #[test]
  fn all_absent_series_never_overloads() {
    let samples = vec![down(0), down(1), down(2)];
    assert!(detect_overloads(&samples, 0.0, 2).is_empty());
  }
}
