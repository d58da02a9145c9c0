//! Log loading: parse raw response-log lines and fold them into per-server series.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;

use crate::addr;
use crate::error::EngineError;
use crate::types::{LogRecord, Sample, Server};

/// Parse one `YYYYMMDDHHMMSS,A.B.C.D/MASK,RESPONSE_OR_DASH` line.
pub fn parse_line(line: &str) -> Result<LogRecord, EngineError> {
  let mut fields = line.splitn(3, ',');
  let ts_field = fields.next().unwrap_or("");
  let addr_field = fields
    .next()
    .ok_or_else(|| EngineError::validation("record", "expected 3 comma-separated fields"))?;
  let response_field = fields
    .next()
    .ok_or_else(|| EngineError::validation("record", "expected 3 comma-separated fields"))?;

  let timestamp = NaiveDateTime::parse_from_str(ts_field, "%Y%m%d%H%M%S").map_err(|e| {
    EngineError::validation("timestamp", &format!("invalid YYYYMMDDHHMMSS: {}", e))
  })?;
  let (address, mask_len) = addr::parse_cidr(addr_field)?;
  let response = match response_field.trim() {
    "-" => None,
    value => Some(value.parse::<u32>().map_err(|_| {
      EngineError::validation("response", "expected a non-negative integer or '-'")
    })?),
  };

  Ok(LogRecord {
    timestamp,
    address,
    mask_len,
    response,
  })
}

/// Fold log lines into per-server series.
///
/// One `Server` per distinct address, created on first sighting; the subnet
/// prefix is computed from the first-seen mask and later masks are ignored.
/// Samples append in input order. Blank lines are skipped; a malformed line
/// fails the whole load with its 1-based line number. The address lookup
/// table lives only for the duration of the load.
pub fn load<R: BufRead>(reader: R) -> Result<Vec<Server>, EngineError> {
  let mut address_to_index: HashMap<u32, usize> = HashMap::new();
  let mut servers: Vec<Server> = Vec::new();

  for (number, line) in reader.lines().enumerate() {
    let line = line?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let record = parse_line(trimmed)
      .map_err(|e| EngineError::parse(format!("line {}: {}", number + 1, e)))?;

    let index = match address_to_index.get(&record.address) {
      Some(&index) => index,
      None => {
        let index = servers.len();
        address_to_index.insert(record.address, index);
        servers.push(Server {
          address: record.address,
          subnet_prefix: addr::subnet_prefix(record.address, record.mask_len),
          subnet_index: 0,
          samples: Vec::new(),
        });
        index
      }
    };

    servers[index].samples.push(Sample {
      timestamp: record.timestamp,
      response: record.response,
    });
  }

  Ok(servers)
}

/// Load a log file from disk.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<Server>, EngineError> {
  let file = File::open(path)?;
  load(BufReader::new(file))
}
