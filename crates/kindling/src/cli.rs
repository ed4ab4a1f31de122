//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use kindling_config::DEFAULT_CLUSTER_NAME;

/// Kindling - Local Kubernetes test clusters in Docker
#[derive(Parser, Debug)]
#[command(name = "kindling")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a local Kubernetes cluster
    Create(CreateArgs),

    /// Delete a cluster
    Delete(DeleteArgs),

    /// Get cluster resources
    #[command(subcommand)]
    Get(GetCommands),
}

// Create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Cluster name
    #[arg(long, default_value = DEFAULT_CLUSTER_NAME)]
    pub name: String,

    /// Path to a cluster config file
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Number of control-plane nodes in the cluster
    #[arg(long, allow_negative_numbers = true)]
    pub control_plane_nodes: Option<i32>,

    /// Number of worker nodes in the cluster
    #[arg(long, allow_negative_numbers = true)]
    pub worker_nodes: Option<i32>,

    /// Node docker image to use for booting the cluster
    #[arg(long)]
    pub image: Option<String>,

    /// Retain nodes for debugging when cluster creation fails
    #[arg(long)]
    pub retain: bool,

    /// Create an external etcd container and use it for the cluster
    #[arg(long)]
    pub external_etcd: bool,

    /// Add an external load balancer (implicit if control-plane nodes > 1)
    #[arg(long)]
    pub external_load_balancer: bool,
}

// Delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Cluster name
    #[arg(long, default_value = DEFAULT_CLUSTER_NAME)]
    pub name: String,

    /// Do not fail if the cluster does not exist
    #[arg(short, long)]
    pub force: bool,
}

// Get commands
#[derive(Subcommand, Debug)]
pub enum GetCommands {
    /// List clusters
    Clusters(GetClustersArgs),
}

#[derive(Args, Debug)]
pub struct GetClustersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
