//! VLAN island detection CLI.
//!
//! Loads a JSON or YAML topology and reports VLANs whose members are split
//! into physically disconnected islands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};
use env_logger::Env;
use log::LevelFilter;

use vlan_islands::analysis::{self, VlanAnalysisResult, VlanIslandAnalyzer};
use vlan_islands::config::{AnalyzerConfig, ValidationMode};
use vlan_islands::config_loader;
use vlan_islands::topology::{self, Topology};

#[derive(Parser, Debug)]
#[command(name = "vlan-islands")]
#[command(about = "Detect VLAN islands in network topologies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the analyzer configuration YAML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    threads: usize,

    /// Analyze VLANs in parallel
    #[arg(long, global = true)]
    parallel: bool,

    /// Reject topologies with dangling device references
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze every VLAN in the topology
    Analyze {
        /// Topology file (.json, .yaml or .yml)
        topology: PathBuf,

        /// Write JSON and text reports into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze a single VLAN
    Vlan {
        topology: PathBuf,
        vlan_id: u16,
    },

    /// Suggest bridge devices for the islands of a VLAN
    Suggest {
        topology: PathBuf,
        vlan_id: u16,
    },

    /// List simple paths between two members of a VLAN
    Paths {
        topology: PathBuf,
        vlan_id: u16,
        source: String,
        target: String,

        /// Maximum path length in hops (overrides the config file)
        #[arg(long)]
        max_hops: Option<usize>,
    },

    /// Check a topology file for unresolved device references
    Validate {
        topology: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // RUST_LOG, when set, is used as-is. Otherwise the logger accepts
    // everything and the level is capped globally, first from the CLI flag
    // so config loading is logged, then from the resolved config.
    let from_env = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(Env::default().default_filter_or("trace")).init();
    if !from_env {
        log::set_max_level(level_filter(cli.log_level.as_deref()));
    }

    let config = resolve_config(&cli)?;
    if !from_env {
        // CLI flag wins over the config file, resolve_config already applied it
        log::set_max_level(level_filter(config.log_level.as_deref()));
    }

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match &cli.command {
        Commands::Analyze { topology, output } => {
            let analyzer = build_analyzer(topology, &config)?;
            let report = analyzer.analyze_all_vlans();

            analysis::print_summary(&report);

            if let Some(output_dir) = output {
                fs::create_dir_all(output_dir).with_context(|| {
                    format!("Failed to create output directory: {}", output_dir.display())
                })?;
                analysis::generate_json_report(&report, &output_dir.join("vlan_analysis.json"))?;
                analysis::generate_text_report(&report, &output_dir.join("vlan_analysis.txt"))?;
                log::info!("Analysis complete. Reports written to {}", output_dir.display());
            }
        }
        Commands::Vlan { topology, vlan_id } => {
            let analyzer = build_analyzer(topology, &config)?;
            let Some(result) = analyzer.analyze_vlan(*vlan_id) else {
                bail!("VLAN {} not found in topology", vlan_id);
            };
            print_vlan_result(&result);
        }
        Commands::Suggest { topology, vlan_id } => {
            let analyzer = build_analyzer(topology, &config)?;
            if analyzer.vlan(*vlan_id).is_none() {
                bail!("VLAN {} not found in topology", vlan_id);
            }

            match analyzer.island_connectivity_suggestions(*vlan_id) {
                None => println!("VLAN {} has no islands", vlan_id),
                Some(suggestions) => {
                    println!(
                        "\nVLAN {} ({}): {} islands, {} bridge candidates\n",
                        suggestions.vlan_id,
                        suggestions.vlan_name,
                        suggestions.island_count,
                        suggestions.candidate_count()
                    );
                    if suggestions.connection_opportunities.is_empty() {
                        println!("No single-hop bridge found for any island");
                    }
                    for opportunity in &suggestions.connection_opportunities {
                        println!(
                            "Island {} [{}]",
                            opportunity.isolated_island.island_id,
                            opportunity.isolated_island.devices.join(", ")
                        );
                        for candidate in &opportunity.bridge_candidates {
                            println!("  - {}", candidate.action);
                        }
                    }
                }
            }
        }
        Commands::Paths {
            topology,
            vlan_id,
            source,
            target,
            max_hops,
        } => {
            let mut config = config.clone();
            if let Some(hops) = max_hops {
                config.max_path_hops = *hops;
                config.validate()?;
            }
            let analyzer = build_analyzer(topology, &config)?;
            if analyzer.vlan(*vlan_id).is_none() {
                bail!("VLAN {} not found in topology", vlan_id);
            }

            let paths = analyzer.find_connection_paths(source, target, *vlan_id);
            if paths.is_empty() {
                println!(
                    "No path from {} to {} within VLAN {} ({} hops max)",
                    source, target, vlan_id, config.max_path_hops
                );
            }
            for path in &paths {
                println!("{}", path.join(" -> "));
            }
        }
        Commands::Validate { topology } => {
            let topology = topology::load_topology_unchecked(topology)?;
            let unresolved = topology::find_unresolved_references(&topology);

            println!("{}", summary_line(&topology));
            if unresolved.is_empty() {
                println!("All device references resolve");
            } else {
                for reference in &unresolved {
                    println!("  - {}", reference);
                }
                bail!("{} unresolved device references", unresolved.len());
            }
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = config_loader::load_config_or_default(cli.config.as_deref())?;
    if cli.parallel {
        config.parallel = true;
    }
    if cli.strict {
        config.validation_mode = ValidationMode::Strict;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = Some(level.clone());
    }
    config.validate()?;
    Ok(config)
}

fn level_filter(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn build_analyzer(path: &Path, config: &AnalyzerConfig) -> Result<VlanIslandAnalyzer> {
    let topology = match config.validation_mode {
        ValidationMode::Strict => topology::load_topology(path)?,
        ValidationMode::Permissive => topology::load_topology_unchecked(path)?,
    };

    let analyzer = VlanIslandAnalyzer::with_config(topology, config.clone())
        .with_context(|| format!("Failed to analyze topology {}", path.display()))?;
    Ok(analyzer)
}

fn summary_line(topology: &Topology) -> String {
    format!(
        "Topology: {} devices, {} links, {} VLANs",
        topology.devices.len(),
        topology.links.len(),
        topology.vlans.len()
    )
}

fn print_vlan_result(result: &VlanAnalysisResult) {
    println!("\n=== VLAN {} ({}) ===\n", result.vlan_id, result.vlan_name);
    println!("Devices: {}", result.total_devices);
    println!("Islands: {}", result.island_count());
    println!("Main island size: {}", result.main_island_size);
    println!("Isolated devices: {}", result.isolated_devices());
    println!("Fragmentation: {:.1}%", result.fragmentation_ratio * 100.0);

    if !result.unresolved_devices.is_empty() {
        println!("Unresolved members: {}", result.unresolved_devices.join(", "));
    }

    for island in &result.islands {
        let marker = if island.is_main_island { " (main)" } else { "" };
        let devices: Vec<&str> = island.devices.iter().map(String::as_str).collect();
        println!("  Island {}{}: {}", island.island_id, marker, devices.join(", "));
    }
    println!();
}
