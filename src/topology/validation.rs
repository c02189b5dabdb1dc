//! Topology normalization and reference validation.
//!
//! Field-level checks (empty ids, VLAN id range, duplicates) always run at
//! load time. Reference checks report link endpoints and VLAN members that do
//! not resolve to a device; callers decide whether those are fatal.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::types::{Topology, VLAN_ID_MAX, VLAN_ID_MIN};

/// Errors that make a topology unusable
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("Device ID cannot be empty")]
    EmptyDeviceId,

    #[error("Duplicate device ID: {0}")]
    DuplicateDevice(String),

    #[error("Link endpoints cannot be empty ({from} -> {to})")]
    EmptyLinkEndpoint { from: String, to: String },

    #[error("Link speed cannot be empty ({from} -> {to})")]
    EmptyLinkSpeed { from: String, to: String },

    #[error("VLAN ID {0} is outside the valid range 1-4094")]
    VlanIdOutOfRange(u16),

    #[error("VLAN {0} name cannot be empty")]
    EmptyVlanName(u16),

    #[error("Duplicate VLAN ID: {0}")]
    DuplicateVlan(u16),

    #[error("Topology validation failed:\n{}", format_references(.0))]
    UnresolvedReferences(Vec<UnresolvedReference>),
}

fn format_references(references: &[UnresolvedReference]) -> String {
    references
        .iter()
        .map(|r| format!("  - {}", r))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A device reference that does not match any device in the topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReference {
    LinkSource { source: String, target: String },
    LinkTarget { source: String, target: String },
    VlanMember { vlan_id: u16, device_id: String },
}

impl UnresolvedReference {
    /// Identifier of the missing device
    pub fn device_id(&self) -> &str {
        match self {
            UnresolvedReference::LinkSource { source, .. } => source,
            UnresolvedReference::LinkTarget { target, .. } => target,
            UnresolvedReference::VlanMember { device_id, .. } => device_id,
        }
    }
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReference::LinkSource { source, target } => write!(
                f,
                "Link {} -> {} references non-existent source device: {}",
                source, target, source
            ),
            UnresolvedReference::LinkTarget { source, target } => write!(
                f,
                "Link {} -> {} references non-existent target device: {}",
                source, target, target
            ),
            UnresolvedReference::VlanMember { vlan_id, device_id } => write!(
                f,
                "VLAN {} references non-existent device: {}",
                vlan_id, device_id
            ),
        }
    }
}

/// Trim identifiers, drop empty VLAN members and enforce field invariants.
pub fn normalize_topology(mut topology: Topology) -> Result<Topology, TopologyError> {
    let mut seen_devices = HashSet::new();
    for device in &mut topology.devices {
        let id = device.id.trim();
        if id.is_empty() {
            return Err(TopologyError::EmptyDeviceId);
        }
        device.id = id.to_string();
        device.location = device.location.trim().to_string();
        if !seen_devices.insert(device.id.clone()) {
            return Err(TopologyError::DuplicateDevice(device.id.clone()));
        }
    }

    for link in &mut topology.links {
        let source = link.source.trim().to_string();
        let target = link.target.trim().to_string();
        if source.is_empty() || target.is_empty() {
            return Err(TopologyError::EmptyLinkEndpoint { from: source, to: target });
        }
        let speed = link.speed.trim().to_string();
        if speed.is_empty() {
            return Err(TopologyError::EmptyLinkSpeed { from: source, to: target });
        }
        link.source = source;
        link.target = target;
        link.speed = speed;
    }

    let mut seen_vlans = HashSet::new();
    for vlan in &mut topology.vlans {
        if !(VLAN_ID_MIN..=VLAN_ID_MAX).contains(&vlan.id) {
            return Err(TopologyError::VlanIdOutOfRange(vlan.id));
        }
        let name = vlan.name.trim();
        if name.is_empty() {
            return Err(TopologyError::EmptyVlanName(vlan.id));
        }
        vlan.name = name.to_string();
        if !seen_vlans.insert(vlan.id) {
            return Err(TopologyError::DuplicateVlan(vlan.id));
        }

        let members: BTreeSet<String> = vlan
            .devices
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        vlan.devices = members;
    }

    Ok(topology)
}

/// List every link endpoint and VLAN member that names an unknown device.
///
/// Order follows the input: links first, then VLANs, members sorted.
pub fn find_unresolved_references(topology: &Topology) -> Vec<UnresolvedReference> {
    let device_ids = topology.device_ids();
    let mut unresolved = Vec::new();

    for link in &topology.links {
        if !device_ids.contains(link.source.as_str()) {
            unresolved.push(UnresolvedReference::LinkSource {
                source: link.source.clone(),
                target: link.target.clone(),
            });
        }
        if !device_ids.contains(link.target.as_str()) {
            unresolved.push(UnresolvedReference::LinkTarget {
                source: link.source.clone(),
                target: link.target.clone(),
            });
        }
    }

    for vlan in &topology.vlans {
        for device_id in &vlan.devices {
            if !device_ids.contains(device_id.as_str()) {
                unresolved.push(UnresolvedReference::VlanMember {
                    vlan_id: vlan.id,
                    device_id: device_id.clone(),
                });
            }
        }
    }

    unresolved
}

/// Fail with every unresolved reference if there are any
pub fn validate_references(topology: &Topology) -> Result<(), TopologyError> {
    let unresolved = find_unresolved_references(topology);
    if unresolved.is_empty() {
        Ok(())
    } else {
        Err(TopologyError::UnresolvedReferences(unresolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::types::{Device, DeviceKind, DeviceRole, Link, LinkKind, Vlan};

    fn switch(id: &str) -> Device {
        Device::new(id, DeviceKind::Switch, DeviceRole::Access, "Lab")
    }

    #[test]
    fn test_normalize_trims_and_dedups_members() {
        let topology = Topology::new(
            vec![switch(" sw1 "), switch("sw2")],
            vec![Link::new(" sw1", "sw2 ", LinkKind::Ethernet, " 1G ")],
            vec![Vlan::new(10, "  Users ", ["sw1", " sw1", "", "  ", "sw2"])],
        );

        let topology = normalize_topology(topology).unwrap();
        assert_eq!(topology.devices[0].id, "sw1");
        assert_eq!(topology.links[0].endpoints(), ("sw1", "sw2"));
        assert_eq!(topology.links[0].speed, "1G");
        assert_eq!(topology.vlans[0].name, "Users");
        let members: Vec<&str> = topology.vlans[0].devices.iter().map(String::as_str).collect();
        assert_eq!(members, vec!["sw1", "sw2"]);
    }

    #[test]
    fn test_normalize_rejects_bad_fields() {
        let dup = Topology::new(vec![switch("sw1"), switch("sw1")], vec![], vec![]);
        assert_eq!(
            normalize_topology(dup).unwrap_err(),
            TopologyError::DuplicateDevice("sw1".to_string())
        );

        let empty_id = Topology::new(vec![switch("   ")], vec![], vec![]);
        assert_eq!(normalize_topology(empty_id).unwrap_err(), TopologyError::EmptyDeviceId);

        let vlan_zero = Topology::new(vec![], vec![], vec![Vlan::new(0, "Zero", ["sw1"])]);
        assert_eq!(
            normalize_topology(vlan_zero).unwrap_err(),
            TopologyError::VlanIdOutOfRange(0)
        );

        let vlan_high = Topology::new(vec![], vec![], vec![Vlan::new(4095, "High", ["sw1"])]);
        assert!(normalize_topology(vlan_high).is_err());

        let blank_name = Topology::new(vec![], vec![], vec![Vlan::new(5, " ", ["sw1"])]);
        assert_eq!(normalize_topology(blank_name).unwrap_err(), TopologyError::EmptyVlanName(5));

        let dup_vlan = Topology::new(
            vec![],
            vec![],
            vec![Vlan::new(5, "A", ["sw1"]), Vlan::new(5, "B", ["sw1"])],
        );
        assert_eq!(normalize_topology(dup_vlan).unwrap_err(), TopologyError::DuplicateVlan(5));

        let no_speed = Topology::new(
            vec![switch("sw1"), switch("sw2")],
            vec![Link::new("sw1", "sw2", LinkKind::Ethernet, "")],
            vec![],
        );
        assert!(matches!(
            normalize_topology(no_speed),
            Err(TopologyError::EmptyLinkSpeed { .. })
        ));
    }

    #[test]
    fn test_find_unresolved_references() {
        let topology = Topology::new(
            vec![switch("sw1")],
            vec![Link::new("sw1", "ghost", LinkKind::Ethernet, "1G")],
            vec![Vlan::new(10, "Users", ["sw1", "phantom"])],
        );

        let unresolved = find_unresolved_references(&topology);
        assert_eq!(unresolved.len(), 2);
        assert_eq!(unresolved[0].device_id(), "ghost");
        assert_eq!(
            unresolved[1],
            UnresolvedReference::VlanMember { vlan_id: 10, device_id: "phantom".to_string() }
        );

        let err = validate_references(&topology).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("non-existent target device: ghost"));
        assert!(message.contains("VLAN 10 references non-existent device: phantom"));
    }

    #[test]
    fn test_valid_topology_has_no_unresolved_references() {
        let topology = Topology::new(
            vec![switch("sw1"), switch("sw2")],
            vec![Link::new("sw1", "sw2", LinkKind::Ethernet, "1G")],
            vec![Vlan::new(10, "Users", ["sw1", "sw2"])],
        );
        assert!(validate_references(&topology).is_ok());
    }
}
