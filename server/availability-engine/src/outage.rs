//! Outage detection: maximal runs of consecutive no-response samples.

use chrono::NaiveDateTime;

use crate::types::{Event, EventKind, Sample};

enum ScanState {
  Normal,
  Failing { start: NaiveDateTime, count: u32 },
}

/// Scan one server's series for outage windows.
///
/// A window opens at the first no-response sample of a run and closes at the
/// next responding sample; it is emitted only when the run held at least
/// `min_run` consecutive no-response samples (0 accepts every run). `min_run`
/// is a run length, not a duration: samples count regardless of the elapsed
/// time between them. A run still open at the end of the series emits
/// nothing.
pub fn detect_outages(samples: &[Sample], min_run: u32) -> Vec<Event> {
  let mut events = Vec::new();
  let mut state = ScanState::Normal;

  for sample in samples {
    state = match (state, sample.response) {
      (ScanState::Normal, Some(_)) => ScanState::Normal,
      (ScanState::Normal, None) => ScanState::Failing {
        start: sample.timestamp,
        count: 1,
      },
      (ScanState::Failing { start, count }, None) => ScanState::Failing {
        start,
        count: count + 1,
      },
      (ScanState::Failing { start, count }, Some(_)) => {
        if count >= min_run {
          events.push(Event {
            kind: EventKind::Down,
            start,
            end: sample.timestamp,
            member: None,
          });
        }
        ScanState::Normal
      }
    };
  }

  events
}
