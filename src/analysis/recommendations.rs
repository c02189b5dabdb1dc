//! Recommendation text derived from problematic VLANs.

use super::types::VlanAnalysisResult;

/// Generic remediation steps appended whenever islands exist
pub const REMEDIATION_STEPS: [&str; 5] = [
    "1. Review physical connectivity between isolated devices",
    "2. Check VLAN configuration on intermediate switches",
    "3. Verify trunk port configurations",
    "4. Consider adding redundant links for critical paths",
    "5. Use network visualization to identify connection gaps",
];

pub const HEALTHY_MESSAGE: &str = "[+] No VLAN islands detected. Network topology appears healthy.";

/// Build recommendation lines for the given problematic VLANs.
///
/// VLANs are listed by fragmentation ratio, worst first, keeping input order
/// for equal ratios. The priority line names the worst VLAN when its ratio
/// exceeds `priority_threshold`.
pub fn generate_recommendations(
    problematic: &[VlanAnalysisResult],
    priority_threshold: f64,
) -> Vec<String> {
    if problematic.is_empty() {
        return vec![HEALTHY_MESSAGE.to_string()];
    }

    let mut sorted: Vec<&VlanAnalysisResult> = problematic.iter().collect();
    sorted.sort_by(|a, b| b.fragmentation_ratio.total_cmp(&a.fragmentation_ratio));

    let mut recommendations = Vec::with_capacity(sorted.len() + REMEDIATION_STEPS.len() + 5);
    recommendations.push(format!(
        "[!] Detected {} VLANs with connectivity issues:",
        problematic.len()
    ));

    for result in &sorted {
        recommendations.push(format!(
            "  - VLAN {} ({}): {} islands, {} devices isolated",
            result.vlan_id,
            result.vlan_name,
            result.island_count(),
            result.isolated_devices()
        ));
    }

    recommendations.push(String::new());
    recommendations.push("Recommended actions:".to_string());
    recommendations.extend(REMEDIATION_STEPS.iter().map(|s| s.to_string()));

    if let Some(worst) = sorted.first() {
        if worst.fragmentation_ratio > priority_threshold {
            recommendations.push(String::new());
            recommendations.push(format!(
                "Priority: VLAN {} has {:.1}% of devices isolated - investigate immediately",
                worst.vlan_id,
                worst.fragmentation_ratio * 100.0
            ));
        }
    }

    recommendations
}
