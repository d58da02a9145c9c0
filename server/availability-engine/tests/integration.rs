//! Integration tests for the availability engine.

use availability_engine::{analyze, log, Config};
use std::io::Cursor;

// Two servers in 192.168.1.0/24 with overlapping outages, one server in
// 10.20.30.0/24 that stays up but slows down.
const SAMPLE_LOG: &str = "\
20201019095500,192.168.1.1/24,12
20201019100000,192.168.1.1/24,-
20201019100000,192.168.1.2/24,25
20201019100500,192.168.1.1/24,-
20201019100500,192.168.1.2/24,-
20201019101000,192.168.1.1/24,8
20201019101000,192.168.1.2/24,-
20201019101500,192.168.1.2/24,-
20201019102000,192.168.1.2/24,30
20201019110000,10.20.30.5/24,40
20201019110100,10.20.30.5/24,60
20201019110200,10.20.30.5/24,70
20201019110300,10.20.30.5/24,30
";

fn sample_config() -> Config {
  Config {
    min_failure_run: 1,
    overload_threshold: 50.0,
    overload_window: 2,
  }
}

#[test]
fn full_report_from_sample_log() {
  let mut servers = log::load(Cursor::new(SAMPLE_LOG)).unwrap();
  let report = analyze(&mut servers, &sample_config()).unwrap();

  // Per-server windows, in discovery order.
  assert_eq!(report.servers.len(), 3);

  let a = &report.servers[0];
  assert_eq!(a.address, "192.168.1.1");
  assert_eq!(a.outages.len(), 1);
  assert_eq!(a.outages[0].start, "2020/10/19 10:00:00");
  assert_eq!(a.outages[0].end, "2020/10/19 10:10:00");
  assert_eq!(a.outages[0].duration_secs, 600);
  assert!(a.overloads.is_empty());

  let b = &report.servers[1];
  assert_eq!(b.address, "192.168.1.2");
  assert_eq!(b.outages.len(), 1);
  assert_eq!(b.outages[0].start, "2020/10/19 10:05:00");
  assert_eq!(b.outages[0].end, "2020/10/19 10:20:00");
  assert_eq!(b.outages[0].duration_secs, 900);

  let c = &report.servers[2];
  assert_eq!(c.address, "10.20.30.5");
  assert!(c.outages.is_empty());
  assert_eq!(c.overloads.len(), 1);
  // Trailing 2-sample averages 40, 50, 65, 50: only 65 exceeds the threshold.
  assert_eq!(c.overloads[0].start, "2020/10/19 11:02:00");
  assert_eq!(c.overloads[0].end, "2020/10/19 11:03:00");
  assert_eq!(c.overloads[0].duration_secs, 60);

  // Subnet-wide outage only where both /24 members overlap; the subnet of the
  // never-down server emits nothing.
  assert_eq!(report.subnets.len(), 1);
  let net = &report.subnets[0];
  assert_eq!(net.subnet, "192.168.1.0");
  assert_eq!(net.outages.len(), 1);
  assert_eq!(net.outages[0].start, "2020/10/19 10:05:00");
  assert_eq!(net.outages[0].end, "2020/10/19 10:10:00");
  assert_eq!(net.outages[0].duration_secs, 300);
}

#[test]
fn deterministic_output_across_runs() {
  let mut servers1 = log::load(Cursor::new(SAMPLE_LOG)).unwrap();
  let json1 = serde_json::to_string(&analyze(&mut servers1, &sample_config()).unwrap()).unwrap();

  let mut servers2 = log::load(Cursor::new(SAMPLE_LOG)).unwrap();
  let json2 = serde_json::to_string(&analyze(&mut servers2, &sample_config()).unwrap()).unwrap();

  assert_eq!(json1, json2, "same input must produce identical output");
}

#[test]
fn overload_section_off_with_zero_window() {
  let mut servers = log::load(Cursor::new(SAMPLE_LOG)).unwrap();
  let config = Config {
    overload_window: 0,
    ..sample_config()
  };
  let report = analyze(&mut servers, &config).unwrap();

  // The slow-but-up server drops out of the report entirely.
  assert_eq!(report.servers.len(), 2);
  assert!(report.servers.iter().all(|s| s.overloads.is_empty()));
}

#[test]
fn min_run_filters_short_outages() {
  let mut servers = log::load(Cursor::new(SAMPLE_LOG)).unwrap();
  let config = Config {
    min_failure_run: 3,
    ..sample_config()
  };
  let report = analyze(&mut servers, &config).unwrap();

  // Only 192.168.1.2 failed three consecutive probes, so the subnet is never
  // fully down either.
  let down: Vec<&str> = report
    .servers
    .iter()
    .filter(|s| !s.outages.is_empty())
    .map(|s| s.address.as_str())
    .collect();
  assert_eq!(down, vec!["192.168.1.2"]);
  assert!(report.subnets.is_empty());
}

#[test]
fn single_member_subnet_mirrors_server_outages() {
  let raw = "\
20201019100000,10.20.30.5/24,10
20201019100100,10.20.30.5/24,-
20201019100200,10.20.30.5/24,12
";
  let mut servers = log::load(Cursor::new(raw)).unwrap();
  let report = analyze(&mut servers, &sample_config()).unwrap();

  assert_eq!(report.servers.len(), 1);
  assert_eq!(report.subnets.len(), 1);
  assert_eq!(report.subnets[0].subnet, "10.20.30.0");
  assert_eq!(report.subnets[0].outages.len(), 1);
  assert_eq!(report.subnets[0].outages[0].start, report.servers[0].outages[0].start);
  assert_eq!(report.subnets[0].outages[0].end, report.servers[0].outages[0].end);
}

#[test]
fn empty_log_yields_empty_report() {
  let mut servers = log::load(Cursor::new("")).unwrap();
  let report = analyze(&mut servers, &Config::default()).unwrap();
  assert!(report.servers.is_empty());
  assert!(report.subnets.is_empty());
}

#[test]
fn malformed_line_fails_the_load_with_its_number() {
  let raw = "20201019100000,10.20.30.5/24,10\n20201019100100,10.20.30.5,12\n";
  let err = log::load(Cursor::new(raw)).unwrap_err();
  assert!(err.to_string().contains("line 2"), "{}", err);
}
