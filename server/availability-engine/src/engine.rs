//! Report assembly: run every detector across loaded servers and subnets.

use crate::addr;
use crate::config::Config;
use crate::correlation;
use crate::error::EngineError;
use crate::outage;
use crate::overload;
use crate::subnet;
use crate::types::{Report, Server, ServerReport, SubnetReport, WindowOutput};

/// Run the full analysis: group subnets, detect per-server outage and
/// overload windows, correlate subnet-wide outages, assemble the report.
///
/// Servers and subnets with no events are omitted, so an all-quiet log yields
/// an empty report. Deterministic: re-running on the same input yields
/// identical output.
pub fn analyze(servers: &mut [Server], config: &Config) -> Result<Report, EngineError> {
  config.validate()?;

  let subnets = subnet::group(servers);

  let mut server_reports = Vec::new();
  for server in servers.iter() {
    let outages = outage::detect_outages(&server.samples, config.min_failure_run);
    let overloads = overload::detect_overloads(
      &server.samples,
      config.overload_threshold,
      config.overload_window,
    );
    if outages.is_empty() && overloads.is_empty() {
      continue;
    }
    server_reports.push(ServerReport {
      address: addr::format(server.address),
      outages: outages.iter().map(WindowOutput::from_event).collect(),
      overloads: overloads.iter().map(WindowOutput::from_event).collect(),
    });
  }

  let mut subnet_reports = Vec::new();
  for net in &subnets {
    let events = correlation::subnet_outages(servers, net, config.min_failure_run);
    if events.is_empty() {
      continue;
    }
    subnet_reports.push(SubnetReport {
      subnet: addr::format(net.prefix),
      outages: events.iter().map(WindowOutput::from_event).collect(),
    });
  }

  Ok(Report {
    servers: server_reports,
    subnets: subnet_reports,
  })
}
