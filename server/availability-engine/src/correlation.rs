//! Subnet outage correlation: find the intervals during which every member of
//! a subnet is simultaneously inside an outage window.
//!
//! Works on per-member outage windows rather than raw samples, so the subnet
//! sweep stays decoupled from per-server threshold semantics and costs
//! O(windows log windows) instead of O(series length x member count).

use chrono::NaiveDateTime;

use crate::outage;
use crate::types::{Event, EventKind, Server, Subnet};

/// Boundary marker kinds. Exits sort before enters at equal timestamps, so a
/// member recovering at the exact instant another fails cannot fabricate a
/// zero-width all-down interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MarkerKind {
  ExitDown,
  EnterDown,
}

#[derive(Debug, Clone, Copy)]
struct Marker {
  timestamp: NaiveDateTime,
  kind: MarkerKind,
  member: usize,
}

/// Detect subnet-wide outages for one subnet.
///
/// Runs the outage detector over every member with the same `min_run`, tags
/// each window with the member's position in the subnet, and sweeps the
/// merged boundaries.
pub fn subnet_outages(servers: &[Server], subnet: &Subnet, min_run: u32) -> Vec<Event> {
  let mut windows = Vec::new();
  for (member, &server_index) in subnet.members.iter().enumerate() {
    for mut event in outage::detect_outages(&servers[server_index].samples, min_run) {
      event.member = Some(member);
      windows.push(event);
    }
  }
  correlate(subnet.members.len(), &windows)
}

/// Sweep member-tagged outage windows and emit one event per interval during
/// which all `member_count` members were down at once.
///
/// A subnet with zero members never emits: the all-down AND over an empty
/// member set is defined as false, not vacuously true. Windows without a
/// member tag in range cannot vote and are ignored.
pub fn correlate(member_count: usize, windows: &[Event]) -> Vec<Event> {
  if member_count == 0 {
    return Vec::new();
  }

  let mut markers: Vec<Marker> = Vec::new();
  for window in windows {
    let member = match window.member {
      Some(member) if member < member_count => member,
      _ => continue,
    };
    markers.push(Marker {
      timestamp: window.start,
      kind: MarkerKind::EnterDown,
      member,
    });
    markers.push(Marker {
      timestamp: window.end,
      kind: MarkerKind::ExitDown,
      member,
    });
  }
  // Stable sort: markers with equal (timestamp, kind) keep window discovery
  // order (members in subnet order, each member's windows chronological).
  markers.sort_by_key(|marker| (marker.timestamp, marker.kind));

  let mut down = vec![false; member_count];
  let mut subnet_start: Option<NaiveDateTime> = None;
  let mut events = Vec::new();

  for marker in &markers {
    down[marker.member] = marker.kind == MarkerKind::EnterDown;
    let all_down = down.iter().all(|&flag| flag);

    match (subnet_start, all_down) {
      (None, true) => subnet_start = Some(marker.timestamp),
      (Some(start), false) => {
        events.push(Event {
          kind: EventKind::SubnetDown,
          start,
          end: marker.timestamp,
          member: None,
        });
        subnet_start = None;
      }
      _ => {}
    }
  }

  events
}
