#[cfg(test)]
mod island_scenarios {
    use std::collections::BTreeSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use vlan_islands::analysis::{VlanAnalysisResult, VlanIslandAnalyzer};
    use vlan_islands::config::{AnalyzerConfig, ValidationMode};
    use vlan_islands::topology::{
        load_topology, load_topology_unchecked, Device, DeviceKind, DeviceRole, Link, LinkKind,
        Topology, Vlan,
    };

    fn switch(id: &str) -> Device {
        Device::new(id, DeviceKind::Switch, DeviceRole::Access, "Building-A")
    }

    fn topology(devices: &[&str], links: &[(&str, &str)], vlans: Vec<Vlan>) -> Topology {
        Topology::new(
            devices.iter().map(|id| switch(id)).collect(),
            links
                .iter()
                .map(|(a, b)| Link::new(*a, *b, LinkKind::Ethernet, "1G"))
                .collect(),
            vlans,
        )
    }

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn check_invariants(analyzer: &VlanIslandAnalyzer, result: &VlanAnalysisResult) {
        // islands partition the VLAN members present in the physical graph
        let mut seen = BTreeSet::new();
        for island in &result.islands {
            for device in &island.devices {
                assert!(seen.insert(device.clone()), "{} appears in two islands", device);
            }
        }
        let graph = analyzer.physical_graph();
        let resolved: BTreeSet<String> = analyzer
            .vlan(result.vlan_id)
            .unwrap()
            .devices
            .iter()
            .filter(|d| graph.contains(d))
            .cloned()
            .collect();
        assert_eq!(seen, resolved);
        assert_eq!(seen.len(), result.total_devices);

        assert_eq!(result.has_islands, result.islands.len() > 1);
        assert_eq!(result.fragmentation_ratio == 0.0, result.islands.len() <= 1);
        assert_eq!(result.isolated_devices(), result.total_devices - result.main_island_size);

        if let Some(main) = result.islands.first() {
            assert!(main.is_main_island);
            assert_eq!(main.size(), result.main_island_size);
            assert!(result.islands.iter().skip(1).all(|i| !i.is_main_island));
            assert!(result.islands.iter().all(|i| i.size() <= main.size()));
        } else {
            assert_eq!(result.main_island_size, 0);
        }
    }

    /// Split VLAN: sw4/sw5 are physically cut off from the rest
    #[test]
    fn test_scenario_split_vlan() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["sw1", "sw2", "sw3", "sw4", "sw5"],
            &[("sw1", "sw2"), ("sw2", "sw3"), ("sw4", "sw5")],
            vec![Vlan::new(10, "Users", ["sw1", "sw2", "sw3", "sw4", "sw5"])],
        ));

        let result = analyzer.analyze_vlan(10).unwrap();
        check_invariants(&analyzer, &result);
        assert_eq!(result.island_count(), 2);
        assert_eq!(result.islands[0].devices, set(&["sw1", "sw2", "sw3"]));
        assert_eq!(result.islands[1].devices, set(&["sw4", "sw5"]));
        assert_eq!(result.main_island_size, 3);
        assert!((result.fragmentation_ratio - 0.4).abs() < 1e-12);
        assert!(result.has_islands);
    }

    /// Chain of three switches forms a single island
    #[test]
    fn test_scenario_connected_vlan() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["sw1", "sw2", "sw3"],
            &[("sw1", "sw2"), ("sw2", "sw3")],
            vec![Vlan::new(20, "Voice", ["sw1", "sw2", "sw3"])],
        ));

        let result = analyzer.analyze_vlan(20).unwrap();
        check_invariants(&analyzer, &result);
        assert_eq!(result.island_count(), 1);
        assert!(!result.has_islands);
        assert_eq!(result.fragmentation_ratio, 0.0);

        let report = analyzer.analyze_all_vlans();
        assert!(report.problematic_vlans.is_empty());
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn test_scenario_empty_vlan() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["sw1"],
            &[],
            vec![Vlan::new(30, "Unused", Vec::<String>::new())],
        ));

        let result = analyzer.analyze_vlan(30).unwrap();
        check_invariants(&analyzer, &result);
        assert_eq!(result.island_count(), 0);
        assert_eq!(result.total_devices, 0);
        assert!(!result.has_islands);
        assert_eq!(result.fragmentation_ratio, 0.0);
    }

    /// Equal-size islands: the one holding the smallest device id is main
    #[test]
    fn test_scenario_tied_singletons() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["b-switch", "a-switch"],
            &[],
            vec![Vlan::new(40, "Lab", ["b-switch", "a-switch"])],
        ));

        let result = analyzer.analyze_vlan(40).unwrap();
        check_invariants(&analyzer, &result);
        assert_eq!(result.island_count(), 2);
        assert_eq!(result.islands[0].devices, set(&["a-switch"]));
        assert!(result.islands[0].is_main_island);
        assert_eq!(result.islands[1].devices, set(&["b-switch"]));
        assert!((result.fragmentation_ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_paths_respect_islands() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["sw1", "sw2", "sw3", "sw4", "sw5"],
            &[("sw1", "sw2"), ("sw2", "sw3"), ("sw1", "sw3"), ("sw4", "sw5")],
            vec![Vlan::new(10, "Users", ["sw1", "sw2", "sw3", "sw4", "sw5"])],
        ));

        assert!(analyzer.find_connection_paths("sw1", "sw4", 10).is_empty());

        let paths = analyzer.find_connection_paths("sw1", "sw3", 10);
        assert!(!paths.is_empty());
        let max_hops = analyzer.config().max_path_hops;
        for path in &paths {
            assert_eq!(path.first().map(String::as_str), Some("sw1"));
            assert_eq!(path.last().map(String::as_str), Some("sw3"));
            assert!(path.len() - 1 <= max_hops);
            let unique: BTreeSet<&String> = path.iter().collect();
            assert_eq!(unique.len(), path.len());
        }
    }

    /// Stale members are left out of every island
    #[test]
    fn test_stale_member_excluded_from_islands() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["sw1", "sw2", "sw3"],
            &[("sw1", "sw2")],
            vec![Vlan::new(60, "Printers", ["sw1", "sw2", "sw3", "retired-sw"])],
        ));

        let result = analyzer.analyze_vlan(60).unwrap();
        check_invariants(&analyzer, &result);
        assert_eq!(result.total_devices, 3);
        assert_eq!(result.island_count(), 2);
        assert_eq!(result.unresolved_devices, vec!["retired-sw".to_string()]);
    }

    /// A link through a non-member does not join two VLAN members
    #[test]
    fn test_non_member_transit_not_used() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["sw1", "core", "sw2"],
            &[("sw1", "core"), ("core", "sw2")],
            vec![Vlan::new(50, "Guest", ["sw1", "sw2"])],
        ));

        let result = analyzer.analyze_vlan(50).unwrap();
        check_invariants(&analyzer, &result);
        assert_eq!(result.island_count(), 2);

        let suggestions = analyzer.island_connectivity_suggestions(50).unwrap();
        assert_eq!(suggestions.candidate_count(), 1);
        assert_eq!(
            suggestions.connection_opportunities[0].bridge_candidates[0].bridge_device,
            "core"
        );
    }

    #[test]
    fn test_repeated_analysis_is_identical() {
        let analyzer = VlanIslandAnalyzer::new(topology(
            &["sw1", "sw2", "sw3", "sw4"],
            &[("sw1", "sw2"), ("sw3", "sw4")],
            vec![
                Vlan::new(10, "Users", ["sw1", "sw2", "sw3", "sw4"]),
                Vlan::new(20, "Voice", ["sw1", "sw3"]),
            ],
        ));

        let first = analyzer.analyze_all_vlans();
        let second = analyzer.analyze_all_vlans();
        assert_eq!(first.vlan_results, second.vlan_results);
        assert_eq!(first.recommendations, second.recommendations);
        assert_eq!(first.total_islands, 4);
        for result in &first.vlan_results {
            check_invariants(&analyzer, result);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let devices: Vec<String> = (0..40).map(|i| format!("sw{:02}", i)).collect();
        let device_refs: Vec<&str> = devices.iter().map(String::as_str).collect();
        let links: Vec<(&str, &str)> = device_refs
            .windows(2)
            .enumerate()
            .filter(|(i, _)| i % 7 != 6)
            .map(|(_, w)| (w[0], w[1]))
            .collect();
        let vlans: Vec<Vlan> = (1..=12u16)
            .map(|id| {
                let members = device_refs
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| i % (id as usize) < 4)
                    .map(|(_, d)| *d);
                Vlan::new(id, format!("VLAN-{}", id), members)
            })
            .collect();
        let topo = topology(&device_refs, &links, vlans);

        let sequential = VlanIslandAnalyzer::new(topo.clone()).analyze_all_vlans();
        let parallel = VlanIslandAnalyzer::with_config(
            topo,
            AnalyzerConfig {
                parallel: true,
                ..AnalyzerConfig::default()
            },
        )
        .unwrap()
        .analyze_all_vlans();

        assert_eq!(sequential.vlan_results, parallel.vlan_results);
        assert_eq!(sequential.recommendations, parallel.recommendations);
    }

    #[test]
    fn test_load_json_file_and_analyze() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "devices": [
                    {{"id": "sw1", "type": "switch", "role": "access", "location": "A"}},
                    {{"id": "sw2", "type": "switch", "role": "access", "location": "A"}},
                    {{"id": "ap1", "type": "access-point", "role": "wifi", "location": "B"}}
                ],
                "links": [
                    {{"source": "sw1", "target": "sw2", "type": "ethernet", "speed": "1G"}},
                    {{"source": "sw2", "target": "ghost", "type": "fiber", "speed": "10G"}}
                ],
                "vlans": [
                    {{"id": 10, "name": "Users", "devices": ["sw1", "sw2", "ap1"]}}
                ]
            }}"#
        )
        .unwrap();

        assert!(load_topology(file.path()).is_err());

        let loaded = load_topology_unchecked(file.path()).unwrap();
        assert!(VlanIslandAnalyzer::with_config(loaded.clone(), AnalyzerConfig::strict()).is_err());

        let analyzer = VlanIslandAnalyzer::with_config(
            loaded,
            AnalyzerConfig {
                validation_mode: ValidationMode::Permissive,
                ..AnalyzerConfig::default()
            },
        )
        .unwrap();
        let result = analyzer.analyze_vlan(10).unwrap();
        check_invariants(&analyzer, &result);
        assert_eq!(result.island_count(), 2);
        assert_eq!(result.islands[1].devices, set(&["ap1"]));
    }
}
