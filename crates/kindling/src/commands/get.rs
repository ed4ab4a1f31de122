//! Cluster listing commands

use crate::cli::{GetClustersArgs, GetCommands};
use anyhow::Result;
use kindling_cluster::{ClusterManager, ClusterSummary, DockerManager};
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

/// Run a get subcommand
pub async fn run(cmd: GetCommands) -> Result<()> {
    match cmd {
        GetCommands::Clusters(args) => clusters(args).await,
    }
}

/// List clusters
async fn clusters(args: GetClustersArgs) -> Result<()> {
    let manager = DockerManager::new();
    let summaries = manager.list().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if summaries.is_empty() {
        eprintln!("No clusters found.");
        eprintln!();
        eprintln!("Create a cluster with:");
        eprintln!("  {} create --name my-cluster", "kindling".cyan());
    } else {
        print_cluster_table(&summaries);
    }

    Ok(())
}

/// Table row for cluster list
#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "NODES")]
    nodes: String,
}

/// Print cluster list as a table
fn print_cluster_table(summaries: &[ClusterSummary]) {
    let rows: Vec<ClusterRow> = summaries
        .iter()
        .map(|s| ClusterRow {
            name: s.name.clone(),
            nodes: s.nodes.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}
