//! Topology type definitions.
//!
//! Devices, physical links and VLAN membership lists, as loaded from a
//! topology file. The analysis engine treats a `Topology` as read-only.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::summary::TopologySummary;

/// Lowest and highest usable 802.1Q VLAN ids
pub const VLAN_ID_MIN: u16 = 1;
pub const VLAN_ID_MAX: u16 = 4094;

/// Free-form key/value data attached to devices, links and VLANs
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Type of network device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    Switch,
    Router,
    Controller,
    AccessPoint,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 4] = [
        DeviceKind::Switch,
        DeviceKind::Router,
        DeviceKind::Controller,
        DeviceKind::AccessPoint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Switch => "switch",
            DeviceKind::Router => "router",
            DeviceKind::Controller => "controller",
            DeviceKind::AccessPoint => "access-point",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a device in the network hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceRole {
    Core,
    Distribution,
    Access,
    Edge,
    Wifi,
    Storage,
}

impl DeviceRole {
    pub const ALL: [DeviceRole; 6] = [
        DeviceRole::Core,
        DeviceRole::Distribution,
        DeviceRole::Access,
        DeviceRole::Edge,
        DeviceRole::Wifi,
        DeviceRole::Storage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceRole::Core => "core",
            DeviceRole::Distribution => "distribution",
            DeviceRole::Access => "access",
            DeviceRole::Edge => "edge",
            DeviceRole::Wifi => "wifi",
            DeviceRole::Storage => "storage",
        }
    }
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical medium of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    Ethernet,
    Fiber,
    Wireless,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkKind::Ethernet => "ethernet",
            LinkKind::Fiber => "fiber",
            LinkKind::Wireless => "wireless",
        };
        f.write_str(s)
    }
}

/// A network device (switch, router, controller, access point)
///
/// Two devices are equal when their identifiers are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub role: DeviceRole,
    pub location: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

impl Device {
    pub fn new(id: impl Into<String>, kind: DeviceKind, role: DeviceRole, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            role,
            location: location.into(),
            metadata: Metadata::new(),
        }
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Device {}

impl Hash for Device {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A physical, undirected connection between two devices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub speed: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: LinkKind, speed: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            speed: speed.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.source, &self.target)
    }

    pub fn connects(&self, device_id: &str) -> bool {
        self.source == device_id || self.target == device_id
    }

    /// The endpoint opposite `device_id`, if the link touches it
    pub fn other_endpoint(&self, device_id: &str) -> Option<&str> {
        if self.source == device_id {
            Some(&self.target)
        } else if self.target == device_id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// A VLAN and the devices configured to participate in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vlan {
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub devices: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

impl Vlan {
    pub fn new<I, S>(id: u16, name: impl Into<String>, devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            devices: devices.into_iter().map(Into::into).collect(),
            metadata: Metadata::new(),
        }
    }

    pub fn has_device(&self, device_id: &str) -> bool {
        self.devices.contains(device_id)
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

/// Complete network topology: devices, links and VLANs in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    pub devices: Vec<Device>,
    pub links: Vec<Link>,
    pub vlans: Vec<Vlan>,
}

impl Topology {
    pub fn new(devices: Vec<Device>, links: Vec<Link>, vlans: Vec<Vlan>) -> Self {
        Self { devices, links, vlans }
    }

    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == device_id)
    }

    pub fn vlan(&self, vlan_id: u16) -> Option<&Vlan> {
        self.vlans.iter().find(|v| v.id == vlan_id)
    }

    pub fn device_ids(&self) -> BTreeSet<&str> {
        self.devices.iter().map(|d| d.id.as_str()).collect()
    }

    /// All links touching `device_id`
    pub fn device_links(&self, device_id: &str) -> Vec<&Link> {
        self.links.iter().filter(|l| l.connects(device_id)).collect()
    }

    /// Devices on the far side of every link touching `device_id`
    pub fn device_neighbors(&self, device_id: &str) -> Vec<&str> {
        self.links
            .iter()
            .filter_map(|l| l.other_endpoint(device_id))
            .collect()
    }

    pub fn summary(&self) -> TopologySummary {
        TopologySummary::from_topology(self)
    }
}
