//! Cluster creation command
//!
//! Runs the creation pipeline: validate the caller's intent, synthesize a
//! cluster configuration from the flags (or replace it with one loaded
//! from a config document), then hand the configuration and creation
//! options to the cluster manager.

use crate::cli::CreateArgs;
use anyhow::{Context, Result};
use kindling_cluster::{ClusterManager, CreateOptions, DockerManager};
use kindling_config::{encoding, Cluster, ClusterIntent};
use owo_colors::OwoColorize;

/// Run the create command
pub async fn run(args: CreateArgs) -> Result<()> {
    let intent = intent_from_args(args);
    let manager = DockerManager::new();
    create(&intent, &manager).await
}

/// Validate intent, build the configuration, and hand off to the manager
async fn create(intent: &ClusterIntent, manager: &dyn ClusterManager) -> Result<()> {
    intent.validate()?;

    let cluster = build_cluster(intent)?;

    let options = CreateOptions::new()
        .with_external_load_balancer(intent.external_load_balancer)
        .with_external_etcd(intent.external_etcd)
        .with_retain(intent.retain);

    manager
        .create(&intent.name, &cluster, &options)
        .await
        .context("failed to create cluster")?;

    print_cluster_created(&intent.name, &cluster);
    Ok(())
}

/// Produce exactly one internal cluster configuration from the intent
///
/// The configuration is synthesized from the flag counts; a config
/// document, if supplied, replaces the synthesized configuration
/// entirely. Validation has already rejected the ambiguous combination
/// of a document plus explicit topology flags.
fn build_cluster(intent: &ClusterIntent) -> Result<Cluster> {
    let mut cluster =
        encoding::synthesize(intent.control_planes(), intent.workers(), intent.image())
            .context("error initializing the cluster cfg")?;

    if let Some(path) = &intent.config {
        cluster = encoding::load(path).context("error loading config")?;
    }

    Ok(cluster)
}

/// Map parsed flags onto the cluster intent
fn intent_from_args(args: CreateArgs) -> ClusterIntent {
    ClusterIntent {
        name: args.name,
        config: args.config,
        control_plane_nodes: args.control_plane_nodes,
        worker_nodes: args.worker_nodes,
        image: args.image,
        retain: args.retain,
        external_etcd: args.external_etcd,
        external_load_balancer: args.external_load_balancer,
    }
}

/// Print cluster creation success message
fn print_cluster_created(name: &str, cluster: &Cluster) {
    eprintln!();
    eprintln!(
        "{} Cluster '{}' created successfully",
        "Success:".green().bold(),
        name.cyan()
    );
    eprintln!();
    eprintln!(
        "  Control-plane nodes:  {}",
        cluster.control_planes().count()
    );
    eprintln!("  Worker nodes:         {}", cluster.workers().count());
    eprintln!();
    eprintln!("To inspect the cluster:");
    eprintln!("  {} get clusters", "kindling".cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use kindling_config::{v1alpha, NodeRole};

    fn args() -> CreateArgs {
        CreateArgs {
            name: "test".to_string(),
            config: None,
            control_plane_nodes: None,
            worker_nodes: None,
            image: None,
            retain: false,
            external_etcd: false,
            external_load_balancer: false,
        }
    }

    #[test]
    fn test_intent_from_args_preserves_was_set() {
        let mut a = args();
        a.control_plane_nodes = Some(1);
        let intent = intent_from_args(a);
        assert_eq!(intent.control_plane_nodes, Some(1));
        assert_eq!(intent.worker_nodes, None);
    }

    #[test]
    fn test_build_cluster_from_flags() {
        let mut a = args();
        a.control_plane_nodes = Some(3);
        a.worker_nodes = Some(2);
        a.image = Some("custom:tag".to_string());
        let cluster = build_cluster(&intent_from_args(a)).unwrap();

        assert_eq!(cluster.nodes.len(), 5);
        assert!(cluster.nodes[..3]
            .iter()
            .all(|n| n.role == NodeRole::ControlPlane && n.image == "custom:tag"));
        assert!(cluster.nodes[3..]
            .iter()
            .all(|n| n.role == NodeRole::Worker && n.image == "custom:tag"));
    }

    #[test]
    fn test_build_cluster_defaults() {
        let cluster = build_cluster(&intent_from_args(args())).unwrap();
        assert_eq!(cluster.nodes.len(), 1);
        assert_eq!(cluster.nodes[0].role, NodeRole::ControlPlane);
        assert_eq!(cluster.nodes[0].image, v1alpha::DEFAULT_NODE_IMAGE);
    }

    #[test]
    fn test_document_replaces_synthesized_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cluster.yaml");
        std::fs::write(
            &path,
            "apiVersion: kindling.dev/v1alpha1\nkind: Cluster\nnodes:\n  - role: worker\n",
        )
        .unwrap();

        let mut a = args();
        a.config = Some(Utf8PathBuf::from_path_buf(path).unwrap());
        let cluster = build_cluster(&intent_from_args(a)).unwrap();

        // Document wins: one worker, not the default control-plane.
        assert_eq!(cluster.nodes.len(), 1);
        assert_eq!(cluster.nodes[0].role, NodeRole::Worker);
    }

    #[test]
    fn test_load_failure_carries_context() {
        let mut a = args();
        a.config = Some(Utf8PathBuf::from("/tmp/missing-kindling-doc-98765.yaml"));
        let err = build_cluster(&intent_from_args(a)).unwrap_err();
        assert!(format!("{:#}", err).contains("error loading config"));
    }
}
