//! Report generation for VLAN island analysis.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::topology::TopologySummary;

use super::types::*;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    analysis_metadata: JsonMetadata,
    topology_summary: &'a TopologySummary,
    vlan_analysis: Vec<JsonVlan<'a>>,
    recommendations: &'a [String],
    summary: JsonSummary<'a>,
}

#[derive(Debug, Serialize)]
struct JsonMetadata {
    timestamp: String,
    total_vlans_analyzed: usize,
    problematic_vlans_count: usize,
    total_islands: usize,
}

#[derive(Debug, Serialize)]
struct JsonVlan<'a> {
    vlan_id: u16,
    vlan_name: &'a str,
    total_devices: usize,
    island_count: usize,
    has_connectivity_issues: bool,
    main_island_size: usize,
    isolated_devices: usize,
    fragmentation_ratio: f64,
    islands: Vec<JsonIsland<'a>>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    unresolved_devices: &'a [String],
}

#[derive(Debug, Serialize)]
struct JsonIsland<'a> {
    island_id: usize,
    devices: Vec<&'a str>,
    device_count: usize,
    is_main_island: bool,
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    healthy_vlans: usize,
    problematic_vlans: usize,
    worst_fragmented_vlan: Option<JsonWorst<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonWorst<'a> {
    vlan_id: u16,
    vlan_name: &'a str,
    fragmentation_ratio: f64,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn json_view(report: &NetworkAnalysisReport) -> JsonReport<'_> {
    let vlan_analysis = report
        .vlan_results
        .iter()
        .map(|r| JsonVlan {
            vlan_id: r.vlan_id,
            vlan_name: &r.vlan_name,
            total_devices: r.total_devices,
            island_count: r.island_count(),
            has_connectivity_issues: r.has_islands,
            main_island_size: r.main_island_size,
            isolated_devices: r.isolated_devices(),
            fragmentation_ratio: round4(r.fragmentation_ratio),
            islands: r
                .islands
                .iter()
                .map(|i| JsonIsland {
                    island_id: i.island_id,
                    devices: i.devices.iter().map(String::as_str).collect(),
                    device_count: i.size(),
                    is_main_island: i.is_main_island,
                })
                .collect(),
            unresolved_devices: &r.unresolved_devices,
        })
        .collect();

    JsonReport {
        analysis_metadata: JsonMetadata {
            timestamp: report.timestamp.to_rfc3339(),
            total_vlans_analyzed: report.vlan_results.len(),
            problematic_vlans_count: report.problematic_vlans.len(),
            total_islands: report.total_islands,
        },
        topology_summary: &report.topology_summary,
        vlan_analysis,
        recommendations: &report.recommendations,
        summary: JsonSummary {
            healthy_vlans: report.healthy_vlans().len(),
            problematic_vlans: report.problematic_vlans.len(),
            worst_fragmented_vlan: report.worst_fragmented_vlan().map(|w| JsonWorst {
                vlan_id: w.vlan_id,
                vlan_name: &w.vlan_name,
                fragmentation_ratio: round4(w.fragmentation_ratio),
            }),
        },
    }
}

/// Render the report as pretty JSON
pub fn render_json_report(report: &NetworkAnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(&json_view(report)).context("Failed to serialize report to JSON")
}

/// Generate JSON report
pub fn generate_json_report(report: &NetworkAnalysisReport, output_path: &Path) -> Result<()> {
    let json = render_json_report(report)?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Render the human-readable text report
pub fn render_text_report(report: &NetworkAnalysisReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                        VLAN ISLAND ANALYSIS REPORT".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    let summary = &report.topology_summary;
    lines.push(format!("Analysis Date: {}", report.timestamp.to_rfc3339()));
    lines.push(format!("Devices: {}", summary.total_devices));
    lines.push(format!("Links: {}", summary.total_links));
    lines.push(format!("VLANs: {}", summary.total_vlans));
    lines.push(format!(
        "Average links per device: {:.2}",
        summary.average_links_per_device
    ));
    lines.push(String::new());

    lines.push(format!("Total islands: {}", report.total_islands));
    lines.push(format!("Healthy VLANs: {}", report.healthy_vlans().len()));
    lines.push(format!("Problematic VLANs: {}", report.problematic_vlans.len()));
    lines.push(String::new());

    if !report.problematic_vlans.is_empty() {
        lines.push("=".repeat(80));
        lines.push("                           FRAGMENTED VLANS".to_string());
        lines.push("=".repeat(80));
        lines.push(String::new());

        for result in &report.problematic_vlans {
            lines.push(format!(
                "VLAN {} ({}): {} devices, {} islands, {:.1}% fragmented",
                result.vlan_id,
                result.vlan_name,
                result.total_devices,
                result.island_count(),
                result.fragmentation_ratio * 100.0
            ));
            for island in &result.islands {
                let marker = if island.is_main_island { " (main)" } else { "" };
                let devices: Vec<&str> = island.devices.iter().map(String::as_str).collect();
                lines.push(format!(
                    "  Island {}{}: {}",
                    island.island_id,
                    marker,
                    devices.join(", ")
                ));
            }
            lines.push(String::new());
        }
    }

    lines.push("=".repeat(80));
    lines.push("                            RECOMMENDATIONS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());
    lines.extend(report.recommendations.iter().cloned());
    lines.push(String::new());

    // Footer
    lines.push("=".repeat(80));

    lines.join("\n")
}

/// Generate human-readable text report
pub fn generate_text_report(report: &NetworkAnalysisReport, output_path: &Path) -> Result<()> {
    let content = render_text_report(report);
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print a summary to stdout
pub fn print_summary(report: &NetworkAnalysisReport) {
    println!("\n=== VLAN ISLAND ANALYSIS SUMMARY ===\n");
    println!("Devices: {}", report.topology_summary.total_devices);
    println!("Links: {}", report.topology_summary.total_links);
    println!("VLANs analyzed: {}", report.vlan_results.len());
    println!("Total islands: {}", report.total_islands);

    println!(
        "\n{:<8} {:<20} {:>8} {:>8} {:>10} {:>10}",
        "VLAN", "Name", "Devices", "Islands", "Isolated", "Frag %"
    );
    for result in &report.vlan_results {
        println!(
            "{:<8} {:<20} {:>8} {:>8} {:>10} {:>9.1}%",
            result.vlan_id,
            result.vlan_name,
            result.total_devices,
            result.island_count(),
            result.isolated_devices(),
            result.fragmentation_ratio * 100.0
        );
    }

    println!();
    for line in &report.recommendations {
        println!("{}", line);
    }
    println!();
}
