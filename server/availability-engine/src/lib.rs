//! Availability report engine — deterministic, batch, rule-based.
//!
//! Ingests a per-server response log (timestamp, address/mask, response time
//! or no-response marker) and derives availability windows: per-server
//! outages (consecutive no-response runs), per-server overloads (trailing
//! moving-average latency above a threshold), and subnet-wide outages (every
//! member of a subnet down at once).
//!
//! No AI, no DB, no network; pure computation + in-memory state.

pub mod addr;
pub mod config;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod log;
pub mod outage;
pub mod overload;
pub mod report;
pub mod subnet;
pub mod types;

pub use config::Config;
pub use engine::analyze;
pub use error::EngineError;
pub use types::{Event, EventKind, Report, Sample, Server, Subnet};
