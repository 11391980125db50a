//! `rudder-cli` — demonstration driver for the rudder router.
//!
//! Seeds a router with weighted nodes, issues a sweep of random-key
//! lookups, prints the observed load distribution next to the
//! weight-proportional expectation, then removes nodes one at a time and
//! repeats the sweep to show how load redistributes.
//!
//! # Usage
//!
//! ```text
//! rudder-cli simulate                              # built-in demo nodes
//! rudder-cli simulate -c rudder.toml               # nodes from a config file
//! rudder-cli simulate -n 100000 --node db-1 --node db-2:3
//! rudder-cli simulate --no-churn                   # initial distribution only
//! ```

mod config;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::Rng;
use rudder::HashRouter;
use tracing::info;

use config::{CliConfig, NodeEntry};

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "rudder-cli",
    version,
    about = "Weighted consistent-hash routing driver"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed nodes, run lookup sweeps, and print the load distribution.
    Simulate {
        /// Number of random-key lookups per sweep.
        #[arg(short = 'n', long)]
        keys: Option<usize>,

        /// Virtual nodes per unit of weight.
        #[arg(long)]
        virtual_number: Option<usize>,

        /// Node to seed, as `<id>` or `<id>:<weight>`. Can be repeated.
        #[arg(long = "node")]
        nodes: Vec<String>,

        /// Skip the removal sweeps; print only the initial distribution.
        #[arg(long)]
        no_churn: bool,
    },
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing("info");

    match cli.command {
        Commands::Simulate {
            keys,
            virtual_number,
            nodes,
            no_churn,
        } => {
            let keys = keys.unwrap_or(config.simulate.keys);
            let virtual_number = virtual_number.unwrap_or(config.ring.virtual_number);
            // CLI nodes override config nodes; fall back to the built-in demo set.
            let seeds = if !nodes.is_empty() {
                nodes
                    .iter()
                    .map(|s| parse_node_spec(s))
                    .collect::<Result<Vec<_>>>()?
            } else if !config.nodes.is_empty() {
                config.nodes
            } else {
                default_nodes()
            };
            cmd_simulate(virtual_number, &seeds, keys, !no_churn)
        }
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// The four weighted nodes seeded when nothing is configured.
fn default_nodes() -> Vec<NodeEntry> {
    (1..=4)
        .map(|i| NodeEntry {
            id: format!("server_id_{i}"),
            weight: i,
        })
        .collect()
}

/// Parse a `<id>` or `<id>:<weight>` node spec.
fn parse_node_spec(s: &str) -> Result<NodeEntry> {
    match s.rsplit_once(':') {
        Some((id, weight)) => {
            if id.is_empty() {
                bail!("empty node id in spec {s:?}");
            }
            let weight = weight
                .parse()
                .with_context(|| format!("invalid weight in node spec {s:?}"))?;
            Ok(NodeEntry {
                id: id.to_string(),
                weight,
            })
        }
        None => Ok(NodeEntry {
            id: s.to_string(),
            weight: 1,
        }),
    }
}

// -----------------------------------------------------------------------
// simulate
// -----------------------------------------------------------------------

fn cmd_simulate(virtual_number: usize, seeds: &[NodeEntry], keys: usize, churn: bool) -> Result<()> {
    let router = HashRouter::new(virtual_number);
    for node in seeds {
        router
            .add(&node.id, node.weight)
            .with_context(|| format!("failed to seed node {:?}", node.id))?;
        info!(node_id = %node.id, weight = node.weight, "seeded node");
    }

    println!(
        "Ring: {} nodes, {} virtual nodes ({virtual_number} per unit of weight)",
        router.node_count(),
        router.vnode_count(),
    );
    println!("Routing {keys} random keys:");
    print_sweep(&router, keys);

    if churn {
        for node in seeds {
            router.remove(&node.id)?;
            if router.is_empty() {
                println!("Removed {:?}; ring is empty.", node.id);
                break;
            }
            println!("Removed {:?}; rerouting {keys} keys:", node.id);
            print_sweep(&router, keys);
        }
    }

    Ok(())
}

/// Route `keys` random keys and print per-node hit counts with observed
/// and weight-proportional expected shares.
fn print_sweep(router: &HashRouter, keys: usize) {
    let mut rng = rand::rng();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..keys {
        let key = format!("key_{}", rng.random::<u64>());
        if let Some(owner) = router.get(&key) {
            *counts.entry(owner).or_default() += 1;
        }
    }

    let mut ids = router.node_ids();
    ids.sort();
    let total_weight: u32 = ids.iter().filter_map(|id| router.weight_of(id)).sum();

    for id in &ids {
        let hits = counts.get(id).copied().unwrap_or(0);
        let observed = hits as f64 / keys as f64 * 100.0;
        let expected = router.weight_of(id).unwrap_or(0) as f64 / f64::from(total_weight) * 100.0;
        println!("  {id:<16} {hits:>10} hits  {observed:>6.2}% (expected {expected:.2}%)");
    }
    println!();
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_spec_with_weight() {
        let node = parse_node_spec("db-1:3").unwrap();
        assert_eq!(node.id, "db-1");
        assert_eq!(node.weight, 3);
    }

    #[test]
    fn test_parse_node_spec_defaults_weight_to_one() {
        let node = parse_node_spec("db-1").unwrap();
        assert_eq!(node.id, "db-1");
        assert_eq!(node.weight, 1);
    }

    #[test]
    fn test_parse_node_spec_rejects_bad_input() {
        assert!(parse_node_spec("db-1:heavy").is_err());
        assert!(parse_node_spec(":3").is_err());
    }

    #[test]
    fn test_cli_node_flags_captured() {
        let cli = Cli::try_parse_from([
            "rudder-cli",
            "simulate",
            "--node",
            "a:1",
            "--node",
            "b:2",
        ])
        .expect("CLI should parse with --node flags");

        match cli.command {
            Commands::Simulate { nodes, .. } => {
                assert_eq!(nodes, ["a:1", "b:2"]);
            }
        }
    }

    #[test]
    fn test_cli_keys_flag_captured() {
        let cli = Cli::try_parse_from(["rudder-cli", "simulate", "-n", "5000"]).unwrap();
        match cli.command {
            Commands::Simulate { keys, .. } => {
                assert_eq!(keys, Some(5000));
            }
        }
    }

    #[test]
    fn test_default_nodes_carry_increasing_weights() {
        let nodes = default_nodes();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].id, "server_id_1");
        assert_eq!(nodes[0].weight, 1);
        assert_eq!(nodes[3].id, "server_id_4");
        assert_eq!(nodes[3].weight, 4);
    }
}
