//! Core types for the availability engine (log records, internal models, report contracts).

use chrono::NaiveDateTime;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Log records (wire contract — what the loader parses)
// ---------------------------------------------------------------------------

/// One parsed log line: `YYYYMMDDHHMMSS,A.B.C.D/MASK,RESPONSE_OR_DASH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord {
  pub timestamp: NaiveDateTime,
  pub address: u32,
  pub mask_len: u8,
  /// `None` for the `-` no-response marker.
  pub response: Option<u32>,
}

// ---------------------------------------------------------------------------
// Internal models
// ---------------------------------------------------------------------------

/// One measurement in a server's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
  pub timestamp: NaiveDateTime,
  /// Response time; `None` when the probe got no reply.
  pub response: Option<u32>,
}

/// Per-server time series, one per distinct source address.
///
/// Samples stay in input order. The subnet prefix is fixed from the mask on
/// the server's first log line and never recomputed.
#[derive(Debug, Clone)]
pub struct Server {
  pub address: u32,
  pub subnet_prefix: u32,
  /// Position of this server's subnet in discovery order; assigned by the grouper.
  pub subnet_index: usize,
  pub samples: Vec<Sample>,
}

/// Servers sharing a masked address prefix.
///
/// `members` holds indices into the loaded server list, in first-appearance
/// order.
#[derive(Debug, Clone)]
pub struct Subnet {
  pub prefix: u32,
  pub members: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
  Down,
  Overload,
  SubnetDown,
}

/// A detected window; `start <= end` always.
///
/// `member` is the server's position within its subnet and is set only on
/// outage windows feeding the subnet correlator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
  pub kind: EventKind,
  pub start: NaiveDateTime,
  pub end: NaiveDateTime,
  pub member: Option<usize>,
}

impl Event {
  pub fn duration_secs(&self) -> i64 {
    (self.end - self.start).num_seconds()
  }
}

// ---------------------------------------------------------------------------
// Report contract (what we emit)
// ---------------------------------------------------------------------------

/// Timestamp format used in rendered reports and JSON output.
pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct WindowOutput {
  pub start: String,
  pub end: String,
  pub duration_secs: i64,
}

impl WindowOutput {
  pub fn from_event(event: &Event) -> Self {
    Self {
      start: event.start.format(TIME_FORMAT).to_string(),
      end: event.end.format(TIME_FORMAT).to_string(),
      duration_secs: event.duration_secs(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerReport {
  pub address: String,
  pub outages: Vec<WindowOutput>,
  pub overloads: Vec<WindowOutput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubnetReport {
  pub subnet: String,
  pub outages: Vec<WindowOutput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub servers: Vec<ServerReport>,
  pub subnets: Vec<SubnetReport>,
}
