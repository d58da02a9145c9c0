//! Human-readable report rendering.

use std::fmt::Write;

use crate::types::{Report, WindowOutput};

fn push_windows(out: &mut String, label: &str, windows: &[WindowOutput]) {
  for window in windows {
    let _ = writeln!(
      out,
      "\t{} {} -- {} ({} sec)",
      label, window.start, window.end, window.duration_secs
    );
  }
}

/// Render the report as text: one heading per server or subnet, one
/// tab-indented line per window.
pub fn render(report: &Report) -> String {
  let mut out = String::new();
  for server in &report.servers {
    let _ = writeln!(out, "Address:{}", server.address);
    push_windows(&mut out, "down:", &server.outages);
    push_windows(&mut out, "overload:", &server.overloads);
  }
  for net in &report.subnets {
    let _ = writeln!(out, "Subnet Address:{}", net.subnet);
    push_windows(&mut out, "subnet down:", &net.outages);
  }
  out
}
