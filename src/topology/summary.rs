//! Topology summary statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{DeviceKind, DeviceRole, Topology};

/// Per-VLAN entry in the topology summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlanSummary {
    pub name: String,
    pub description: String,
    pub device_count: usize,
}

/// Basic counts describing a topology, carried in every network report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub total_devices: usize,
    pub total_links: usize,
    pub total_vlans: usize,
    /// Every device kind, zero when absent
    pub device_types: BTreeMap<String, usize>,
    /// Every device role, zero when absent
    pub device_roles: BTreeMap<String, usize>,
    pub average_links_per_device: f64,
    pub vlan_summary: BTreeMap<u16, VlanSummary>,
    pub largest_vlan: usize,
    /// Smallest non-empty VLAN, 0 if every VLAN is empty
    pub smallest_vlan: usize,
    pub devices_per_location: BTreeMap<String, usize>,
}

impl TopologySummary {
    pub fn from_topology(topology: &Topology) -> Self {
        let device_types = DeviceKind::ALL
            .iter()
            .map(|kind| {
                let count = topology.devices.iter().filter(|d| d.kind == *kind).count();
                (kind.to_string(), count)
            })
            .collect();

        let device_roles = DeviceRole::ALL
            .iter()
            .map(|role| {
                let count = topology.devices.iter().filter(|d| d.role == *role).count();
                (role.to_string(), count)
            })
            .collect();

        let average_links_per_device = if topology.devices.is_empty() {
            0.0
        } else {
            topology.links.len() as f64 * 2.0 / topology.devices.len() as f64
        };

        let vlan_summary = topology
            .vlans
            .iter()
            .map(|vlan| {
                (
                    vlan.id,
                    VlanSummary {
                        name: vlan.name.clone(),
                        description: vlan.description.clone(),
                        device_count: vlan.device_count(),
                    },
                )
            })
            .collect();

        let largest_vlan = topology
            .vlans
            .iter()
            .map(|v| v.device_count())
            .max()
            .unwrap_or(0);

        let smallest_vlan = topology
            .vlans
            .iter()
            .map(|v| v.device_count())
            .filter(|&count| count > 0)
            .min()
            .unwrap_or(0);

        let mut devices_per_location: BTreeMap<String, usize> = BTreeMap::new();
        for device in &topology.devices {
            *devices_per_location.entry(device.location.clone()).or_insert(0) += 1;
        }

        Self {
            total_devices: topology.devices.len(),
            total_links: topology.links.len(),
            total_vlans: topology.vlans.len(),
            device_types,
            device_roles,
            average_links_per_device,
            vlan_summary,
            largest_vlan,
            smallest_vlan,
            devices_per_location,
        }
    }
}
