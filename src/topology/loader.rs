//! Topology file loading.
//!
//! Topologies are JSON documents with `devices`, `links` and `vlans` arrays.
//! Files ending in `.yaml`/`.yml` are read as YAML with the same shape.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use log::{info, warn};

use super::types::Topology;
use super::validation::{find_unresolved_references, normalize_topology, validate_references};

/// Serialization format of a topology document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyFormat {
    Json,
    Yaml,
}

impl TopologyFormat {
    /// Pick the format from the file extension, JSON unless it says YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                TopologyFormat::Yaml
            }
            _ => TopologyFormat::Json,
        }
    }
}

/// Parse and normalize a topology document without checking references
pub fn parse_topology(content: &str, format: TopologyFormat) -> Result<Topology> {
    let raw: Topology = match format {
        TopologyFormat::Json => {
            serde_json::from_str(content).context("Invalid JSON topology document")?
        }
        TopologyFormat::Yaml => {
            serde_yaml::from_str(content).context("Invalid YAML topology document")?
        }
    };

    let topology = normalize_topology(raw)?;
    Ok(topology)
}

/// Load a topology file and reject any dangling device reference
pub fn load_topology(path: &Path) -> Result<Topology> {
    let topology = load_topology_unchecked(path)?;
    validate_references(&topology)
        .with_context(|| format!("Topology file {} failed validation", path.display()))?;
    Ok(topology)
}

/// Load a topology file, keeping dangling references for permissive analysis
pub fn load_topology_unchecked(path: &Path) -> Result<Topology> {
    info!("Loading network topology from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read topology file {}", path.display()))?;

    let topology = parse_topology(&content, TopologyFormat::from_path(path))
        .with_context(|| format!("Failed to parse topology file {}", path.display()))?;

    let unresolved = find_unresolved_references(&topology);
    if !unresolved.is_empty() {
        warn!(
            "Topology {} has {} unresolved device references",
            path.display(),
            unresolved.len()
        );
    }

    info!(
        "Loaded {} devices, {} links, {} VLANs",
        topology.devices.len(),
        topology.links.len(),
        topology.vlans.len()
    );

    Ok(topology)
}

/// Write a topology back out as pretty JSON
pub fn save_topology(topology: &Topology, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(topology).context("Failed to serialize topology")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write topology to {}", path.display()))?;

    info!("Topology written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_with_suffix(suffix: &str) -> NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    const SAMPLE: &str = r#"{
  "devices": [
    {"id": "core1", "type": "router", "role": "core", "location": "DC1"},
    {"id": "sw1", "type": "switch", "role": "access", "location": "DC1", "metadata": {"rack": "A1"}},
    {"id": "sw2", "type": "switch", "role": "access", "location": "DC2"}
  ],
  "links": [
    {"source": "core1", "target": "sw1", "type": "fiber", "speed": "10G"},
    {"source": "core1", "target": "sw2", "type": "ethernet", "speed": "1G"}
  ],
  "vlans": [
    {"id": 10, "name": "Users", "description": "Office users", "devices": ["sw1", "sw2", "sw2 "]},
    {"id": 20, "name": "Empty"}
  ]
}"#;

    #[test]
    fn test_load_json_topology() {
        let mut temp_file = temp_with_suffix(".json");
        write!(temp_file, "{}", SAMPLE).unwrap();

        let topology = load_topology(temp_file.path()).unwrap();
        assert_eq!(topology.devices.len(), 3);
        assert_eq!(topology.links.len(), 2);
        assert_eq!(topology.vlans.len(), 2);
        assert_eq!(topology.vlan(10).unwrap().device_count(), 2);
        assert_eq!(topology.vlan(20).unwrap().device_count(), 0);
        assert_eq!(topology.devices[1].metadata["rack"], "A1");
    }

    #[test]
    fn test_load_yaml_topology() {
        let yaml = r#"
devices:
  - id: sw1
    type: switch
    role: access
    location: Lab
links: []
vlans:
  - id: 30
    name: Lab
    devices: [sw1]
"#;
        let mut temp_file = temp_with_suffix(".yaml");
        write!(temp_file, "{}", yaml).unwrap();

        let topology = load_topology(temp_file.path()).unwrap();
        assert_eq!(topology.devices[0].id, "sw1");
        assert!(topology.vlan(30).unwrap().has_device("sw1"));
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let result = parse_topology(r#"{"devices": [], "links": []}"#, TopologyFormat::Json);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_device_type_is_rejected() {
        let json = r#"{"devices": [{"id": "x", "type": "firewall", "role": "edge", "location": "L"}], "links": [], "vlans": []}"#;
        assert!(parse_topology(json, TopologyFormat::Json).is_err());
    }

    #[test]
    fn test_dangling_reference_checked_vs_unchecked() {
        let json = r#"{
  "devices": [{"id": "sw1", "type": "switch", "role": "access", "location": "L"}],
  "links": [{"source": "sw1", "target": "ghost", "type": "ethernet", "speed": "1G"}],
  "vlans": [{"id": 10, "name": "Users", "devices": ["sw1", "ghost"]}]
}"#;
        let mut temp_file = temp_with_suffix(".json");
        write!(temp_file, "{}", json).unwrap();

        assert!(load_topology(temp_file.path()).is_err());

        let topology = load_topology_unchecked(temp_file.path()).unwrap();
        assert_eq!(topology.links.len(), 1);
        assert!(topology.vlan(10).unwrap().has_device("ghost"));
    }

    #[test]
    fn test_save_and_reload() {
        let topology = parse_topology(SAMPLE, TopologyFormat::Json).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("topology.json");

        save_topology(&topology, &path).unwrap();
        let reloaded = load_topology(&path).unwrap();
        assert_eq!(reloaded.devices, topology.devices);
        assert_eq!(reloaded.vlans.len(), topology.vlans.len());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(TopologyFormat::from_path(Path::new("net.yml")), TopologyFormat::Yaml);
        assert_eq!(TopologyFormat::from_path(Path::new("net.YAML")), TopologyFormat::Yaml);
        assert_eq!(TopologyFormat::from_path(Path::new("net.json")), TopologyFormat::Json);
        assert_eq!(TopologyFormat::from_path(Path::new("net")), TopologyFormat::Json);
    }
}
