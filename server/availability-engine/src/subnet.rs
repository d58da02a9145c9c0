//! Subnet grouping: partition servers by masked address prefix.

use std::collections::HashMap;

use crate::types::{Server, Subnet};

/// Group servers by subnet prefix.
///
/// Subnet order is the order each distinct prefix first appears; member order
/// within a subnet is the order each server first appeared. Assigns every
/// server its `subnet_index`. The prefix lookup table is local to this pass
/// and discarded afterwards.
pub fn group(servers: &mut [Server]) -> Vec<Subnet> {
  let mut prefix_to_index: HashMap<u32, usize> = HashMap::new();
  let mut subnets: Vec<Subnet> = Vec::new();

  for (server_index, server) in servers.iter_mut().enumerate() {
    let subnet_index = match prefix_to_index.get(&server.subnet_prefix) {
      Some(&index) => index,
      None => {
        let index = subnets.len();
        prefix_to_index.insert(server.subnet_prefix, index);
        subnets.push(Subnet {
          prefix: server.subnet_prefix,
          members: Vec::new(),
        });
        index
      }
    };

    server.subnet_index = subnet_index;
    subnets[subnet_index].members.push(server_index);
  }

  subnets
}
